//! Scene editor tool
//!
//! Routes on `action`; the `load` action opens a nested branch on the
//! optional `mode` key with `index` and `path` children and a default leaf
//! that loads by path, so `{action: load, path: ..}` works without naming a
//! mode at all.

use std::sync::Arc;

use crate::bag::ArgumentBag;
use crate::editor::SceneBackend;
use crate::error::{ErganeError, Result};
use crate::router::{handler_fn, TreeBuilder};
use crate::schema::{ParamKind, ParamSpec};
use crate::tool::{Outcome, Tool};

/// Build the `scene` tool over a scene backend
pub fn scene_tool(backend: Arc<dyn SceneBackend>) -> Result<Tool> {
    let create = {
        let backend = backend.clone();
        handler_fn(move |args: ArgumentBag| {
            let backend = backend.clone();
            async move {
                let name = args.require_str("name")?;
                let path = args.require_str("path")?;
                let scene = backend.create_scene(name, path).await?;
                Ok(Outcome::success(
                    format!("created scene '{}' at '{}'", scene.name, scene.path),
                    serde_json::to_value(&scene)?,
                ))
            }
        })
    };

    let load_by_index = {
        let backend = backend.clone();
        handler_fn(move |args: ArgumentBag| {
            let backend = backend.clone();
            async move {
                let index = args.require_i64("index")?;
                let index = usize::try_from(index)
                    .map_err(|_| ErganeError::Parameter("index".to_string()))?;
                let scene = backend.load_scene_by_index(index).await?;
                Ok(Outcome::success(
                    format!("loaded scene '{}'", scene.path),
                    serde_json::to_value(&scene)?,
                ))
            }
        })
    };

    // Also bound as the default leaf: load without a mode means load by path
    let load_by_path = {
        let backend = backend.clone();
        handler_fn(move |args: ArgumentBag| {
            let backend = backend.clone();
            async move {
                let path = args.require_str("path")?;
                let scene = backend.load_scene_by_path(path).await?;
                Ok(Outcome::success(
                    format!("loaded scene '{}'", scene.path),
                    serde_json::to_value(&scene)?,
                ))
            }
        })
    };

    let save = {
        let backend = backend.clone();
        handler_fn(move |_args: ArgumentBag| {
            let backend = backend.clone();
            async move {
                let scene = backend.save_scene().await?;
                Ok(Outcome::success(
                    format!("saved scene '{}'", scene.path),
                    serde_json::to_value(&scene)?,
                ))
            }
        })
    };

    let unload = {
        let backend = backend.clone();
        handler_fn(move |_args: ArgumentBag| {
            let backend = backend.clone();
            async move {
                let scene = backend.unload_scene().await?;
                Ok(Outcome::success(
                    format!("unloaded scene '{}'", scene.path),
                    serde_json::to_value(&scene)?,
                ))
            }
        })
    };

    let list = {
        let backend = backend.clone();
        handler_fn(move |_args: ArgumentBag| {
            let backend = backend.clone();
            async move {
                let scenes = backend.list_scenes().await;
                let active = backend.active_scene().await.map(|s| s.path);
                let message = format!("{} scenes", scenes.len());
                let data = serde_json::json!({
                    "scenes": scenes,
                    "active": active,
                });
                Ok(Outcome::success(message, data))
            }
        })
    };

    Tool::builder("scene", "Create, load, save, unload and list project scenes")
        .param(
            ParamSpec::required("action", "Scene operation to perform", ParamKind::String)
                .with_one_of(["create", "load", "save", "unload", "list"])
                .with_example("create"),
        )
        .param(ParamSpec::optional(
            "name",
            "Scene name, for create",
            ParamKind::String,
        ))
        .param(
            ParamSpec::optional("path", "Project-relative scene path", ParamKind::String)
                .with_example("scenes/main"),
        )
        // Deliberately no enum on mode: an unrecognized mode falls through
        // to the default leaf instead of failing validation
        .param(
            ParamSpec::optional("mode", "How load picks the scene", ParamKind::String)
                .with_example("index"),
        )
        .param(ParamSpec::optional(
            "index",
            "Scene position for load by index",
            ParamKind::Integer,
        ))
        .tree(
            TreeBuilder::new()
                .key("action")
                .leaf("create", create)
                .branch("load")
                .optional_key("mode")
                .leaf("index", load_by_index)
                .leaf("path", load_by_path.clone())
                .default_leaf(load_by_path)
                .up()
                .leaf("save", save)
                .leaf("unload", unload)
                .leaf("list", list),
        )
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::MemoryProject;
    use serde_json::json;

    fn tool() -> (Tool, Arc<MemoryProject>) {
        let project = MemoryProject::shared("demo");
        let tool = scene_tool(project.clone()).unwrap();
        (tool, project)
    }

    #[tokio::test]
    async fn test_create_then_list() {
        let (tool, _) = tool();

        let outcome = tool
            .invoke(
                ArgumentBag::new()
                    .with("action", "create")
                    .with("name", "Main")
                    .with("path", "scenes/main"),
            )
            .await;
        assert!(outcome.is_success());
        assert_eq!(outcome.message, "created scene 'Main' at 'scenes/main'");

        let outcome = tool.invoke(ArgumentBag::new().with("action", "list")).await;
        assert!(outcome.is_success());
        assert_eq!(outcome.message, "1 scenes");
        assert_eq!(outcome.data["active"], json!("scenes/main"));
    }

    #[tokio::test]
    async fn test_load_without_mode_uses_path() {
        let (tool, project) = tool();
        project.create_scene("Main", "scenes/main").await.unwrap();
        project.create_scene("Boss", "scenes/boss").await.unwrap();

        let outcome = tool
            .invoke(
                ArgumentBag::new()
                    .with("action", "load")
                    .with("path", "scenes/main"),
            )
            .await;

        assert!(outcome.is_success());
        assert_eq!(outcome.message, "loaded scene 'scenes/main'");
    }

    #[tokio::test]
    async fn test_load_by_index() {
        let (tool, project) = tool();
        project.create_scene("Main", "scenes/main").await.unwrap();
        project.create_scene("Boss", "scenes/boss").await.unwrap();

        let outcome = tool
            .invoke(
                ArgumentBag::new()
                    .with("action", "load")
                    .with("mode", "index")
                    .with("index", 1),
            )
            .await;

        assert!(outcome.is_success());
        assert_eq!(outcome.message, "loaded scene 'scenes/boss'");
    }

    #[tokio::test]
    async fn test_unrecognized_mode_falls_back_to_path() {
        let (tool, project) = tool();
        project.create_scene("Main", "scenes/main").await.unwrap();

        let outcome = tool
            .invoke(
                ArgumentBag::new()
                    .with("action", "load")
                    .with("mode", "fuzzy")
                    .with("path", "scenes/main"),
            )
            .await;

        assert!(outcome.is_success());
        assert_eq!(outcome.message, "loaded scene 'scenes/main'");
    }

    #[tokio::test]
    async fn test_save_without_active_scene_is_contained() {
        let (tool, _) = tool();

        let outcome = tool.invoke(ArgumentBag::new().with("action", "save")).await;

        assert!(outcome.is_error());
        assert_eq!(outcome.message, "editor error: no active scene");
    }

    #[tokio::test]
    async fn test_action_enum_is_validated() {
        let (tool, _) = tool();

        let outcome = tool
            .invoke(ArgumentBag::new().with("action", "destroy"))
            .await;

        assert!(outcome.is_error());
        assert!(outcome.message.contains("'action'"));
    }

    #[tokio::test]
    async fn test_unload_then_save_fails() {
        let (tool, project) = tool();
        project.create_scene("Main", "scenes/main").await.unwrap();

        let outcome = tool
            .invoke(ArgumentBag::new().with("action", "unload"))
            .await;
        assert!(outcome.is_success());
        assert_eq!(outcome.message, "unloaded scene 'scenes/main'");

        let outcome = tool.invoke(ArgumentBag::new().with("action", "save")).await;
        assert!(outcome.is_error());
    }
}
