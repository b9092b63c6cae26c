//! Shader editor tool
//!
//! Stores shader source text by name. The tool never interprets or
//! generates shader code; the backend keeps whatever text it is given.

use std::sync::Arc;

use crate::bag::ArgumentBag;
use crate::editor::ShaderBackend;
use crate::error::Result;
use crate::router::{handler_fn, TreeBuilder};
use crate::schema::{ParamKind, ParamSpec};
use crate::tool::{Outcome, Tool};

/// Build the `shader` tool over a shader backend
pub fn shader_tool(backend: Arc<dyn ShaderBackend>) -> Result<Tool> {
    let create = {
        let backend = backend.clone();
        handler_fn(move |args: ArgumentBag| {
            let backend = backend.clone();
            async move {
                let name = args.require_str("name")?;
                let source = args.require_str("source")?;
                let shader = backend.create_shader(name, source).await?;
                Ok(Outcome::success(
                    format!("created shader '{}'", shader.name),
                    serde_json::to_value(&shader)?,
                ))
            }
        })
    };

    let read = {
        let backend = backend.clone();
        handler_fn(move |args: ArgumentBag| {
            let backend = backend.clone();
            async move {
                let name = args.require_str("name")?;
                let shader = backend.read_shader(name).await?;
                Ok(Outcome::success(
                    format!("shader '{}', {} bytes", shader.name, shader.source.len()),
                    serde_json::to_value(&shader)?,
                ))
            }
        })
    };

    let update = {
        let backend = backend.clone();
        handler_fn(move |args: ArgumentBag| {
            let backend = backend.clone();
            async move {
                let name = args.require_str("name")?;
                let source = args.require_str("source")?;
                let shader = backend.update_shader(name, source).await?;
                Ok(Outcome::success(
                    format!("updated shader '{}'", shader.name),
                    serde_json::to_value(&shader)?,
                ))
            }
        })
    };

    let delete = {
        let backend = backend.clone();
        handler_fn(move |args: ArgumentBag| {
            let backend = backend.clone();
            async move {
                let name = args.require_str("name")?;
                let shader = backend.delete_shader(name).await?;
                Ok(Outcome::success(
                    format!("deleted shader '{}'", shader.name),
                    serde_json::to_value(&shader)?,
                ))
            }
        })
    };

    Tool::builder("shader", "Create, read, update and delete shader assets")
        .param(
            ParamSpec::required("action", "Shader operation to perform", ParamKind::String)
                .with_one_of(["create", "read", "update", "delete"])
                .with_example("create"),
        )
        .param(
            ParamSpec::required("name", "Shader name", ParamKind::String)
                .with_example("toon_lit"),
        )
        .param(ParamSpec::optional(
            "source",
            "Shader source text, for create and update",
            ParamKind::String,
        ))
        .tree(
            TreeBuilder::new()
                .key("action")
                .leaf("create", create)
                .leaf("read", read)
                .leaf("update", update)
                .leaf("delete", delete),
        )
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::MemoryProject;

    fn tool() -> (Tool, Arc<MemoryProject>) {
        let project = MemoryProject::shared("demo");
        let tool = shader_tool(project.clone()).unwrap();
        (tool, project)
    }

    #[tokio::test]
    async fn test_create_read_update_delete() {
        let (tool, _) = tool();

        let outcome = tool
            .invoke(
                ArgumentBag::new()
                    .with("action", "create")
                    .with("name", "toon")
                    .with("source", "half4 frag() { return 1; }"),
            )
            .await;
        assert!(outcome.is_success());
        assert_eq!(outcome.message, "created shader 'toon'");

        let outcome = tool
            .invoke(
                ArgumentBag::new()
                    .with("action", "update")
                    .with("name", "toon")
                    .with("source", "half4 frag() { return 0; }"),
            )
            .await;
        assert!(outcome.is_success());

        let outcome = tool
            .invoke(ArgumentBag::new().with("action", "read").with("name", "toon"))
            .await;
        assert!(outcome.is_success());
        assert_eq!(
            outcome.data["source"],
            serde_json::json!("half4 frag() { return 0; }")
        );

        let outcome = tool
            .invoke(
                ArgumentBag::new()
                    .with("action", "delete")
                    .with("name", "toon"),
            )
            .await;
        assert!(outcome.is_success());
        assert_eq!(outcome.message, "deleted shader 'toon'");
    }

    #[tokio::test]
    async fn test_create_requires_source() {
        let (tool, _) = tool();

        let outcome = tool
            .invoke(
                ArgumentBag::new()
                    .with("action", "create")
                    .with("name", "toon"),
            )
            .await;

        assert!(outcome.is_error());
        assert_eq!(outcome.message, "missing or invalid 'source' parameter");
    }

    #[tokio::test]
    async fn test_read_unknown_shader_is_contained() {
        let (tool, _) = tool();

        let outcome = tool
            .invoke(
                ArgumentBag::new()
                    .with("action", "read")
                    .with("name", "ghost"),
            )
            .await;

        assert!(outcome.is_error());
        assert_eq!(outcome.message, "editor error: no shader named 'ghost'");
    }

    #[tokio::test]
    async fn test_routing_is_case_insensitive() {
        let (tool, _) = tool();

        let outcome = tool
            .invoke(
                ArgumentBag::new()
                    .with("action", " Create ")
                    .with("name", "toon")
                    .with("source", "x"),
            )
            .await;

        assert!(outcome.is_success());
        assert_eq!(outcome.message, "created shader 'toon'");
    }
}
