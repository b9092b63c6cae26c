//! Editor project state behind backend traits
//!
//! The tools in [`crate::builtin`] talk to these traits; [`MemoryProject`]
//! is the in-process implementation used by tests and the CLI harness.

pub mod project;
pub mod records;

pub use project::{
    MemoryProject, SceneBackend, ScriptableBackend, ShaderBackend, TextureBackend,
};
pub use records::{
    apply_patch, FieldPatch, SceneRecord, ScriptableObject, ShaderAsset, TextureSettings,
};
