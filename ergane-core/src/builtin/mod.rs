//! Built-in editor tools
//!
//! Four tools over a shared editor backend: scenes, scriptable objects,
//! shaders and texture importer settings. Each module exposes a constructor
//! returning a configured [`Tool`](crate::tool::Tool); [`register_builtins`]
//! installs all of them at once.

pub mod scene;
pub mod scriptable;
pub mod shader;
pub mod texture;

use std::sync::Arc;

use crate::editor::{SceneBackend, ScriptableBackend, ShaderBackend, TextureBackend};
use crate::error::Result;
use crate::tool::ToolRegistry;

pub use scene::scene_tool;
pub use scriptable::scriptable_tool;
pub use shader::shader_tool;
pub use texture::texture_tool;

/// Register the four built-in tools over one backend
pub fn register_builtins<B>(registry: &mut ToolRegistry, backend: Arc<B>) -> Result<()>
where
    B: SceneBackend + ScriptableBackend + ShaderBackend + TextureBackend + 'static,
{
    registry.register(scene_tool(backend.clone())?)?;
    registry.register(scriptable_tool(backend.clone())?)?;
    registry.register(shader_tool(backend.clone())?)?;
    registry.register(texture_tool(backend)?)?;
    Ok(())
}
