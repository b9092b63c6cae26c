//! Scriptable-object editor tool
//!
//! Flat routing on `action`. The `set` action takes a `properties` object
//! and applies it through the record's field-patch interface; objects accept
//! any property name, so this tool never rejects patch fields.

use std::sync::Arc;

use crate::bag::ArgumentBag;
use crate::editor::ScriptableBackend;
use crate::error::Result;
use crate::router::{handler_fn, TreeBuilder};
use crate::schema::{ParamKind, ParamSpec};
use crate::tool::{Outcome, Tool};

/// Build the `scriptable` tool over a scriptable-object backend
pub fn scriptable_tool(backend: Arc<dyn ScriptableBackend>) -> Result<Tool> {
    let create = {
        let backend = backend.clone();
        handler_fn(move |args: ArgumentBag| {
            let backend = backend.clone();
            async move {
                let type_name = args.require_str("type")?;
                let path = args.require_str("path")?;
                let object = backend.create_object(type_name, path).await?;
                Ok(Outcome::success(
                    format!("created {} at '{}'", object.type_name, object.path),
                    serde_json::to_value(&object)?,
                ))
            }
        })
    };

    let set = {
        let backend = backend.clone();
        handler_fn(move |args: ArgumentBag| {
            let backend = backend.clone();
            async move {
                let path = args.require_str("path")?;
                let patch = args.require_object("properties")?;
                let (object, _ignored) = backend.set_properties(path, patch).await?;
                Ok(Outcome::success(
                    format!("updated {} properties on '{}'", patch.len(), object.path),
                    serde_json::to_value(&object)?,
                ))
            }
        })
    };

    let get = {
        let backend = backend.clone();
        handler_fn(move |args: ArgumentBag| {
            let backend = backend.clone();
            async move {
                let path = args.require_str("path")?;
                let object = backend.get_object(path).await?;
                Ok(Outcome::success(
                    format!("fetched '{}'", object.path),
                    serde_json::to_value(&object)?,
                ))
            }
        })
    };

    let delete = {
        let backend = backend.clone();
        handler_fn(move |args: ArgumentBag| {
            let backend = backend.clone();
            async move {
                let path = args.require_str("path")?;
                let object = backend.delete_object(path).await?;
                Ok(Outcome::success(
                    format!("deleted '{}'", object.path),
                    serde_json::to_value(&object)?,
                ))
            }
        })
    };

    Tool::builder(
        "scriptable",
        "Create, inspect and update scriptable data objects",
    )
    .param(
        ParamSpec::required("action", "Object operation to perform", ParamKind::String)
            .with_one_of(["create", "set", "get", "delete"])
            .with_example("create"),
    )
    .param(
        ParamSpec::required("path", "Project-relative object path", ParamKind::String)
            .with_example("data/goblin"),
    )
    .param(
        ParamSpec::optional("type", "Declared object type, for create", ParamKind::String)
            .with_example("EnemyStats"),
    )
    .param(ParamSpec::optional(
        "properties",
        "Property values to apply, for set",
        ParamKind::Object,
    ))
    .tree(
        TreeBuilder::new()
            .key("action")
            .leaf("create", create)
            .leaf("set", set)
            .leaf("get", get)
            .leaf("delete", delete),
    )
    .build()
}
