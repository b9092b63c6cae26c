//! The decision tree and its routing walk
//!
//! A tree is built once per tool at construction time and never mutated
//! afterwards, so concurrent invocations share it without locking. The walk
//! itself is synchronous and pure: it only resolves which handler to run,
//! leaving execution to the caller.

use super::handler::BoxedHandler;
use crate::bag::ArgumentBag;
use indexmap::IndexMap;
use tracing::debug;

/// Routing failed: a discriminator key was absent or matched no branch
///
/// This is distinct from a schema violation. It occurs only for keys used as
/// discriminators, never for ordinary data keys.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("missing or invalid '{key}' parameter")]
pub struct DispatchError {
    /// The discriminator that could not be resolved
    pub key: String,
}

/// One node of the routing structure
///
/// Children are stored under normalized labels (trimmed, lowercased) in
/// declaration order. Labels are unique per node by construction.
pub(crate) enum DecisionNode {
    Key {
        key: String,
        children: IndexMap<String, DecisionNode>,
        fallback: Option<Box<DecisionNode>>,
    },
    Leaf {
        handler: BoxedHandler,
    },
}

impl std::fmt::Debug for DecisionNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecisionNode::Key {
                key,
                children,
                fallback,
            } => f
                .debug_struct("Key")
                .field("key", key)
                .field("labels", &children.keys().collect::<Vec<_>>())
                .field("has_fallback", &fallback.is_some())
                .finish(),
            DecisionNode::Leaf { .. } => f.debug_struct("Leaf").finish(),
        }
    }
}

fn count_leaves(node: &DecisionNode) -> usize {
    match node {
        DecisionNode::Leaf { .. } => 1,
        DecisionNode::Key {
            children, fallback, ..
        } => {
            children.values().map(count_leaves).sum::<usize>()
                + fallback.as_deref().map_or(0, count_leaves)
        }
    }
}

/// Immutable routing structure mapping discriminator values to handlers
///
/// Every path from the root ends in a leaf or in a [`DispatchError`]. Built
/// through [`TreeBuilder`](super::TreeBuilder); read-only afterwards.
pub struct DecisionTree {
    root: DecisionNode,
}

impl std::fmt::Debug for DecisionTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecisionTree")
            .field("root", &self.root)
            .field("leaf_count", &self.leaf_count())
            .finish()
    }
}

impl DecisionTree {
    pub(crate) fn new(root: DecisionNode) -> Self {
        Self { root }
    }

    /// Number of reachable leaves, fallbacks included
    pub fn leaf_count(&self) -> usize {
        count_leaves(&self.root)
    }

    /// Walk the tree for one invocation and resolve the handler to run
    ///
    /// At each key node the bag value's normalized string form is matched
    /// against the child labels. An unmatched or absent value takes the
    /// fallback when one exists; the fallback slot deliberately unifies both
    /// cases. With no fallback, routing fails at that key.
    pub fn resolve(&self, bag: &ArgumentBag) -> Result<&BoxedHandler, DispatchError> {
        let mut node = &self.root;
        loop {
            match node {
                DecisionNode::Leaf { handler } => return Ok(handler),
                DecisionNode::Key {
                    key,
                    children,
                    fallback,
                } => {
                    let label = bag.discriminant(key);
                    let child = label.as_deref().and_then(|l| children.get(l));
                    debug!(
                        key = %key,
                        label = ?label,
                        matched = child.is_some(),
                        "routing on key"
                    );
                    node = match child.or_else(|| fallback.as_deref()) {
                        Some(next) => next,
                        None => return Err(DispatchError { key: key.clone() }),
                    };
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::{TreeBuilder, handler_fn};
    use crate::tool::Outcome;
    use serde_json::Value;

    fn tag(name: &'static str) -> impl crate::router::ActionHandler + Clone {
        handler_fn(move |_args| async move { Ok(Outcome::success(name, Value::Null)) })
    }

    async fn route(tree: &DecisionTree, bag: ArgumentBag) -> String {
        let handler = tree.resolve(&bag).expect("should resolve");
        handler.run(bag).await.expect("handler should run").message
    }

    fn action_tree() -> DecisionTree {
        TreeBuilder::new()
            .key("action")
            .leaf("create", tag("created"))
            .leaf("load", tag("loaded"))
            .build()
            .expect("tree should build")
    }

    #[tokio::test]
    async fn test_resolves_declared_labels() {
        let tree = action_tree();
        assert_eq!(tree.leaf_count(), 2);

        let bag = ArgumentBag::new().with("action", "create");
        assert_eq!(route(&tree, bag).await, "created");

        let bag = ArgumentBag::new().with("action", "load");
        assert_eq!(route(&tree, bag).await, "loaded");
    }

    #[tokio::test]
    async fn test_matching_is_case_insensitive_and_trimmed() {
        let tree = action_tree();

        for spelling in ["Create", "CREATE", "  create  ", "cReAtE"] {
            let bag = ArgumentBag::new().with("action", spelling);
            assert_eq!(route(&tree, bag).await, "created", "{spelling:?}");
        }
    }

    #[test]
    fn test_unroutable_key_error_message() {
        let tree = action_tree();

        let err = tree.resolve(&ArgumentBag::new()).unwrap_err();
        assert_eq!(err.to_string(), "missing or invalid 'action' parameter");

        let bag = ArgumentBag::new().with("action", "delete");
        let err = tree.resolve(&bag).unwrap_err();
        assert_eq!(err.key, "action");
    }

    #[tokio::test]
    async fn test_fallback_unifies_absent_and_unrecognized() {
        let tree = TreeBuilder::new()
            .key("mode")
            .leaf("index", tag("by-index"))
            .default_leaf(tag("by-path"))
            .build()
            .unwrap();

        // absent key takes the fallback
        assert_eq!(route(&tree, ArgumentBag::new()).await, "by-path");

        // unrecognized value takes the same fallback
        let bag = ArgumentBag::new().with("mode", "bogus");
        assert_eq!(route(&tree, bag).await, "by-path");

        // a declared label still wins
        let bag = ArgumentBag::new().with("mode", "index");
        assert_eq!(route(&tree, bag).await, "by-index");
    }

    #[tokio::test]
    async fn test_nested_branch_routes_on_second_key() {
        let tree = TreeBuilder::new()
            .key("action")
            .leaf("create", tag("created"))
            .branch("load")
            .optional_key("mode")
            .leaf("index", tag("load-index"))
            .leaf("path", tag("load-path"))
            .default_leaf(tag("load-default"))
            .up()
            .build()
            .unwrap();

        let bag = ArgumentBag::new().with("action", "load").with("mode", "index");
        assert_eq!(route(&tree, bag).await, "load-index");

        let bag = ArgumentBag::new().with("action", "load");
        assert_eq!(route(&tree, bag).await, "load-default");

        let bag = ArgumentBag::new().with("action", "load").with("mode", "sideways");
        assert_eq!(route(&tree, bag).await, "load-default");

        let bag = ArgumentBag::new().with("action", "create").with("mode", "index");
        assert_eq!(route(&tree, bag).await, "created");
    }

    #[tokio::test]
    async fn test_routes_on_numeric_and_boolean_values() {
        let tree = TreeBuilder::new()
            .key("enabled")
            .leaf("true", tag("on"))
            .leaf("false", tag("off"))
            .build()
            .unwrap();

        let bag = ArgumentBag::new().with("enabled", true);
        assert_eq!(route(&tree, bag).await, "on");

        let tree = TreeBuilder::new()
            .key("slot")
            .leaf("0", tag("first"))
            .leaf("1", tag("second"))
            .build()
            .unwrap();

        let bag = ArgumentBag::new().with("slot", 1);
        assert_eq!(route(&tree, bag).await, "second");
    }

    #[test]
    fn test_non_scalar_value_routes_like_absent() {
        let tree = action_tree();

        let bag = ArgumentBag::new().with("action", serde_json::json!(["create"]));
        let err = tree.resolve(&bag).unwrap_err();
        assert_eq!(err.key, "action");

        let bag = ArgumentBag::new().with("action", Value::Null);
        assert!(tree.resolve(&bag).is_err());
    }

    #[tokio::test]
    async fn test_resolution_is_stateless_across_calls() {
        let tree = action_tree();

        let bag = ArgumentBag::new().with("action", "load");
        let first = route(&tree, bag.clone()).await;
        let second = route(&tree, bag).await;
        assert_eq!(first, second);
    }
}
