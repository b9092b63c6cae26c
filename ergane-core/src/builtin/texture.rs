//! Texture importer tool
//!
//! `set` treats every bag key other than `action` and `path` as a settings
//! field. Declared fields (`max_size`, `filter_mode`, `srgb`, `readable`)
//! are validated up front; undeclared keys pass validation but come back in
//! the outcome's `ignored` list when the record rejects them.

use std::sync::Arc;

use serde_json::Map;

use crate::bag::ArgumentBag;
use crate::editor::TextureBackend;
use crate::error::Result;
use crate::router::{handler_fn, TreeBuilder};
use crate::schema::{ParamKind, ParamSpec};
use crate::tool::{Outcome, Tool};

/// Keys consumed by routing and addressing, never part of the settings patch
const RESERVED_KEYS: [&str; 2] = ["action", "path"];

/// Build the `texture` tool over a texture backend
pub fn texture_tool(backend: Arc<dyn TextureBackend>) -> Result<Tool> {
    let settings = {
        let backend = backend.clone();
        handler_fn(move |args: ArgumentBag| {
            let backend = backend.clone();
            async move {
                let path = args.require_str("path")?;
                let settings = backend.texture_settings(path).await?;
                Ok(Outcome::success(
                    format!("settings for '{}'", settings.path),
                    serde_json::to_value(&settings)?,
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
                let patch: Map<_, _> = args
                    .as_object()
                    .iter()
                    .filter(|(key, _)| !RESERVED_KEYS.contains(&key.as_str()))
                    .map(|(key, value)| (key.clone(), value.clone()))
                    .collect();

                let (settings, ignored) = backend.set_texture(path, &patch).await?;
                let message = if ignored.is_empty() {
                    format!("updated settings for '{}'", settings.path)
                } else {
                    format!(
                        "updated settings for '{}' (ignored: {})",
                        settings.path,
                        ignored.join(", ")
                    )
                };
                let data = serde_json::json!({
                    "settings": settings,
                    "ignored": ignored,
                });
                Ok(Outcome::success(message, data))
            }
        })
    };

    let reimport = {
        let backend = backend.clone();
        handler_fn(move |args: ArgumentBag| {
            let backend = backend.clone();
            async move {
                let path = args.require_str("path")?;
                let settings = backend.reimport_texture(path).await?;
                Ok(Outcome::success(
                    format!("reimported '{}'", settings.path),
                    serde_json::to_value(&settings)?,
                ))
            }
        })
    };

    Tool::builder("texture", "Inspect and adjust texture importer settings")
        .param(
            ParamSpec::required("action", "Texture operation to perform", ParamKind::String)
                .with_one_of(["settings", "set", "reimport"])
                .with_example("set"),
        )
        .param(
            ParamSpec::required("path", "Project-relative texture path", ParamKind::String)
                .with_example("textures/rock"),
        )
        .param(
            ParamSpec::optional("max_size", "Largest kept dimension", ParamKind::Integer)
                .with_range(32.0, 16384.0)
                .with_example(2048),
        )
        .param(
            ParamSpec::optional("filter_mode", "Sampling filter", ParamKind::String)
                .with_one_of(["point", "bilinear", "trilinear"]),
        )
        .param(ParamSpec::optional(
            "srgb",
            "Treat color data as sRGB",
            ParamKind::Boolean,
        ))
        .param(ParamSpec::optional(
            "readable",
            "Allow CPU reads of pixel data",
            ParamKind::Boolean,
        ))
        .tree(
            TreeBuilder::new()
                .key("action")
                .leaf("settings", settings)
                .leaf("set", set)
                .leaf("reimport", reimport),
        )
        .build()
}
