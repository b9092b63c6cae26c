//! # Ergane - Schema-Validated Tool Routing for Editor Automation
//!
//! Ergane (Ἐργάνη) turns remotely-invoked editor commands into typed tools:
//! - Ordered parameter schemas with enum and range validation
//! - A keyed decision tree routing each call to exactly one handler
//! - Contained handler failures: callers always get a structured outcome
//! - An insertion-ordered registry with allowlist filtering
//! - Built-in scene, scriptable-object, shader and texture editor tools
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ergane_core::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let tool = Tool::builder("greeter", "Routes greetings")
//!         .param(
//!             ParamSpec::required("action", "What to do", ParamKind::String)
//!                 .with_one_of(["hello", "bye"]),
//!         )
//!         .tree(
//!             TreeBuilder::new()
//!                 .key("action")
//!                 .leaf("hello", handler_fn(|_args| async move {
//!                     Ok(Outcome::success_msg("hi there"))
//!                 }))
//!                 .leaf("bye", handler_fn(|_args| async move {
//!                     Ok(Outcome::success_msg("see you"))
//!                 })),
//!         )
//!         .build()?;
//!
//!     let outcome = tool.invoke(ArgumentBag::new().with("action", "Hello")).await;
//!     assert!(outcome.is_success());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! A call travels three layers, each with one job:
//! - **Schema**: the bag is checked against the tool's declared parameters;
//!   the first violation aborts the call before any handler runs
//! - **Routing**: discriminator keys walk the decision tree, matching
//!   case-insensitively, falling back to default leaves where declared
//! - **Handler**: the leaf runs with the full original bag; errors are
//!   converted to error outcomes at the tool boundary
//!
//! Tools are immutable after construction and safe to invoke concurrently.

pub mod bag;
pub mod builtin;
pub mod config;
pub mod editor;
pub mod error;
pub mod router;
pub mod schema;
pub mod tool;

/// Current library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Re-export commonly used types
pub mod prelude {
    pub use crate::bag::{ArgumentBag, ValueKind};
    pub use crate::builtin::{
        register_builtins, scene_tool, scriptable_tool, shader_tool, texture_tool,
    };
    pub use crate::config::{ErganeConfig, ProjectConfig, ToolsConfig};
    pub use crate::editor::{
        FieldPatch, MemoryProject, SceneBackend, SceneRecord, ScriptableBackend,
        ScriptableObject, ShaderAsset, ShaderBackend, TextureBackend, TextureSettings,
        apply_patch,
    };
    pub use crate::error::{ErganeError, Result};
    pub use crate::router::{
        ActionHandler, BoxedHandler, DecisionTree, DispatchError, FnHandler, TreeBuilder,
        TreeError, handler_fn,
    };
    pub use crate::schema::{ParamKind, ParamSpec, SchemaViolation, check, validate};
    pub use crate::tool::{
        Outcome, RegistryError, Tool, ToolBuilder, ToolDescriptor, ToolRegistry,
    };
}
