//! Integration tests for the tool layer
//!
//! These exercise the full invoke pipeline end to end: schema validation,
//! tree routing, fallback behavior and failure containment, using probe
//! handlers that record whether they ran.

use super::*;
use crate::bag::ArgumentBag;
use crate::error::Result;
use crate::router::{ActionHandler, TreeBuilder, handler_fn};
use crate::schema::{ParamKind, ParamSpec};
use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Handler that counts its invocations and replies with a fixed tag
#[derive(Clone)]
struct Probe {
    tag: &'static str,
    runs: Arc<AtomicUsize>,
}

impl Probe {
    fn new(tag: &'static str) -> Self {
        Self {
            tag,
            runs: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn run_count(&self) -> usize {
        self.runs.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ActionHandler for Probe {
    async fn run(&self, args: ArgumentBag) -> Result<Outcome> {
        self.runs.fetch_add(1, Ordering::SeqCst);
        Ok(Outcome::success(self.tag, args.into_value()))
    }
}

/// Tool fixture mirroring the canonical shape: a required `action` enum
/// routed through a flat tree with no fallback.
fn action_tool(create: Probe, load: Probe) -> Tool {
    Tool::builder("fixture", "Routes on action")
        .param(
            ParamSpec::required("action", "Operation to perform", ParamKind::String)
                .with_one_of(["create", "load", "delete"]),
        )
        .tree(
            TreeBuilder::new()
                .key("action")
                .leaf("create", create)
                .leaf("load", load),
        )
        .build()
        .expect("fixture should build")
}

#[tokio::test]
async fn test_missing_required_key_skips_every_handler() {
    let create = Probe::new("created");
    let load = Probe::new("loaded");
    let tool = action_tool(create.clone(), load.clone());

    let outcome = tool.invoke(ArgumentBag::new()).await;

    assert!(outcome.is_error());
    assert_eq!(outcome.message, "missing required parameter 'action'");
    assert_eq!(create.run_count(), 0);
    assert_eq!(load.run_count(), 0);
}

#[tokio::test]
async fn test_end_to_end_routing() {
    let create = Probe::new("created");
    let load = Probe::new("loaded");
    let tool = action_tool(create.clone(), load.clone());

    // declared branch -> its handler
    let outcome = tool.invoke(ArgumentBag::new().with("action", "load")).await;
    assert!(outcome.is_success());
    assert_eq!(outcome.message, "loaded");
    assert_eq!(load.run_count(), 1);
    assert_eq!(create.run_count(), 0);

    // in the enum but not in the tree -> routing error, distinct from the
    // schema error above
    let outcome = tool.invoke(ArgumentBag::new().with("action", "delete")).await;
    assert!(outcome.is_error());
    assert_eq!(outcome.message, "missing or invalid 'action' parameter");
    assert_eq!(create.run_count(), 0);
    assert_eq!(load.run_count(), 1);
}

#[tokio::test]
async fn test_routing_matches_case_insensitively() {
    let create = Probe::new("created");
    let load = Probe::new("loaded");
    let tool = action_tool(create.clone(), load);

    for spelling in ["Create", "CREATE", " create "] {
        let outcome = tool.invoke(ArgumentBag::new().with("action", spelling)).await;
        assert!(outcome.is_success(), "{spelling:?} should route");
        assert_eq!(outcome.message, "created");
    }
    assert_eq!(create.run_count(), 3);
}

#[tokio::test]
async fn test_default_leaf_unifies_absent_and_unrecognized() {
    let by_index = Probe::new("by-index");
    let by_path = Probe::new("by-path");
    let tool = Tool::builder("loader", "Load with an optional mode")
        .param(ParamSpec::optional("mode", "Resolution mode", ParamKind::String))
        .tree(
            TreeBuilder::new()
                .optional_key("mode")
                .leaf("index", by_index)
                .default_leaf(by_path.clone()),
        )
        .build()
        .unwrap();

    // absent optional key
    let outcome = tool.invoke(ArgumentBag::new()).await;
    assert_eq!(outcome.message, "by-path");

    // present but unrecognized value
    let outcome = tool.invoke(ArgumentBag::new().with("mode", "sideways")).await;
    assert_eq!(outcome.message, "by-path");

    assert_eq!(by_path.run_count(), 2);
}

#[tokio::test]
async fn test_enum_validation_is_case_insensitive() {
    let create = Probe::new("created");
    let tool = action_tool(create.clone(), Probe::new("loaded"));

    let outcome = tool.invoke(ArgumentBag::new().with("action", "A")).await;
    assert!(outcome.is_error());
    assert!(outcome.message.starts_with("parameter 'action' must be one of"));
    assert_eq!(create.run_count(), 0);

    // uppercase member passes validation and routes
    let outcome = tool.invoke(ArgumentBag::new().with("action", "CREATE")).await;
    assert!(outcome.is_success());
    assert_eq!(create.run_count(), 1);
}

#[tokio::test]
async fn test_range_validation_boundaries() {
    let tool = Tool::builder("sized", "Validates a quality range")
        .param(ParamSpec::required("action", "Operation", ParamKind::String))
        .param(
            ParamSpec::optional("quality", "Quality level", ParamKind::Integer)
                .with_range(0.0, 100.0),
        )
        .tree(TreeBuilder::new().key("action").leaf(
            "set",
            handler_fn(|args: ArgumentBag| async move {
                Ok(Outcome::success_msg(format!(
                    "quality={}",
                    args.i64_value("quality").unwrap_or(-1)
                )))
            }),
        ))
        .build()
        .unwrap();

    for ok in [0, 100] {
        let bag = ArgumentBag::new().with("action", "set").with("quality", ok);
        let outcome = tool.invoke(bag).await;
        assert!(outcome.is_success(), "{ok} should pass");
    }
    for bad in [-1, 101] {
        let bag = ArgumentBag::new().with("action", "set").with("quality", bad);
        let outcome = tool.invoke(bag).await;
        assert_eq!(
            outcome.message, "parameter 'quality' must be between 0 and 100",
            "{bad} should fail"
        );
    }
}

#[tokio::test]
async fn test_handlers_receive_the_full_bag() {
    let tool = Tool::builder("echo", "Echoes sibling keys")
        .param(ParamSpec::required("action", "Operation", ParamKind::String))
        .param(ParamSpec::optional("name", "Asset name", ParamKind::String))
        .tree(TreeBuilder::new().key("action").leaf(
            "show",
            handler_fn(|args: ArgumentBag| async move {
                let name = args.require_str("name")?.to_string();
                Ok(Outcome::success(name, args.into_value()))
            }),
        ))
        .build()
        .unwrap();

    let bag = ArgumentBag::new().with("action", "show").with("name", "Ada");
    let outcome = tool.invoke(bag).await;

    assert_eq!(outcome.message, "Ada");
    // the handler saw the routing key too, not a pruned bag
    assert_eq!(outcome.data["action"], json!("show"));
}

#[tokio::test]
async fn test_invocation_is_idempotent_for_pure_handlers() {
    let tool = Tool::builder("pure", "No hidden state")
        .param(ParamSpec::required("action", "Operation", ParamKind::String))
        .tree(TreeBuilder::new().key("action").leaf(
            "ping",
            handler_fn(|_| async { Ok(Outcome::success("pong", json!({"n": 1}))) }),
        ))
        .build()
        .unwrap();

    let bag = ArgumentBag::new().with("action", "ping");
    let first = tool.invoke(bag.clone()).await;
    let second = tool.invoke(bag).await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_concurrent_invocations_share_one_tool() {
    let create = Probe::new("created");
    let load = Probe::new("loaded");
    let tool = Arc::new(action_tool(create.clone(), load.clone()));

    let mut handles = Vec::new();
    for i in 0..16 {
        let tool = Arc::clone(&tool);
        let action = if i % 2 == 0 { "create" } else { "load" };
        handles.push(tokio::spawn(async move {
            tool.invoke(ArgumentBag::new().with("action", action)).await
        }));
    }
    for handle in handles {
        assert!(handle.await.unwrap().is_success());
    }

    assert_eq!(create.run_count(), 8);
    assert_eq!(load.run_count(), 8);
}

#[tokio::test]
async fn test_registry_round_trip() {
    let mut registry = ToolRegistry::new();
    registry
        .register(action_tool(Probe::new("created"), Probe::new("loaded")))
        .unwrap();

    let outcome = registry
        .invoke("fixture", ArgumentBag::new().with("action", "create"))
        .await;
    assert!(outcome.is_success());

    let descriptors = registry.descriptors();
    assert_eq!(descriptors[0].name, "fixture");
    assert_eq!(descriptors[0].params[0].one_of.as_deref().unwrap().len(), 3);
}

#[tokio::test]
async fn test_null_discriminator_is_rejected_before_routing() {
    let tool = action_tool(Probe::new("created"), Probe::new("loaded"));

    // null counts as present but satisfies no declared kind
    let outcome = tool.invoke(ArgumentBag::new().with("action", Value::Null)).await;
    assert!(outcome.is_error());
    assert_eq!(outcome.message, "parameter 'action' expects string, got null");
}
