//! Editor backends and the in-memory project
//!
//! The built-in tools never touch project state directly; they call one of
//! the backend traits below. [`MemoryProject`] implements all four against a
//! single in-memory state table, which is where the domain serialization
//! rules live (single active scene, unique asset paths). The router layer
//! above stays free of locks.

use std::sync::Arc;

use async_trait::async_trait;
use indexmap::IndexMap;
use serde_json::Map;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;

use crate::editor::records::{
    apply_patch, SceneRecord, ScriptableObject, ShaderAsset, TextureSettings,
};
use crate::error::{ErganeError, Result};

/// Scene lifecycle operations
#[async_trait]
pub trait SceneBackend: Send + Sync {
    /// Create a scene at a new path and make it the active scene
    async fn create_scene(&self, name: &str, path: &str) -> Result<SceneRecord>;

    /// Make the scene at `path` the active scene
    async fn load_scene_by_path(&self, path: &str) -> Result<SceneRecord>;

    /// Make the scene at position `index` (creation order) the active scene
    async fn load_scene_by_index(&self, index: usize) -> Result<SceneRecord>;

    /// Save the active scene, bumping its modification stamp
    async fn save_scene(&self) -> Result<SceneRecord>;

    /// Deactivate the active scene and return it
    async fn unload_scene(&self) -> Result<SceneRecord>;

    /// The currently active scene, if any
    async fn active_scene(&self) -> Option<SceneRecord>;

    /// All scenes in creation order
    async fn list_scenes(&self) -> Vec<SceneRecord>;
}

/// Scriptable-object storage operations
#[async_trait]
pub trait ScriptableBackend: Send + Sync {
    /// Create an object at a new path
    async fn create_object(&self, type_name: &str, path: &str) -> Result<ScriptableObject>;

    /// Patch the properties of an existing object
    ///
    /// Returns the updated object and the names of rejected patch fields.
    async fn set_properties(
        &self,
        path: &str,
        patch: &Map<String, Value>,
    ) -> Result<(ScriptableObject, Vec<String>)>;

    /// Fetch an existing object
    async fn get_object(&self, path: &str) -> Result<ScriptableObject>;

    /// Remove an existing object and return it
    async fn delete_object(&self, path: &str) -> Result<ScriptableObject>;
}

/// Shader asset storage operations
#[async_trait]
pub trait ShaderBackend: Send + Sync {
    /// Store a shader under a new name
    async fn create_shader(&self, name: &str, source: &str) -> Result<ShaderAsset>;

    /// Fetch an existing shader
    async fn read_shader(&self, name: &str) -> Result<ShaderAsset>;

    /// Replace the source of an existing shader
    async fn update_shader(&self, name: &str, source: &str) -> Result<ShaderAsset>;

    /// Remove an existing shader and return it
    async fn delete_shader(&self, name: &str) -> Result<ShaderAsset>;
}

/// Texture importer-settings operations
#[async_trait]
pub trait TextureBackend: Send + Sync {
    /// Fetch the settings for an imported texture
    async fn texture_settings(&self, path: &str) -> Result<TextureSettings>;

    /// Patch the settings at `path`, creating defaults when absent
    ///
    /// Returns the updated settings and the names of rejected patch fields.
    async fn set_texture(
        &self,
        path: &str,
        patch: &Map<String, Value>,
    ) -> Result<(TextureSettings, Vec<String>)>;

    /// Re-run the import for an existing texture, bumping its stamp
    async fn reimport_texture(&self, path: &str) -> Result<TextureSettings>;
}

#[derive(Debug, Default)]
struct ProjectState {
    scenes: IndexMap<String, SceneRecord>,
    active_scene: Option<String>,
    objects: IndexMap<String, ScriptableObject>,
    shaders: IndexMap<String, ShaderAsset>,
    textures: IndexMap<String, TextureSettings>,
}

/// An in-memory editor project implementing all four backends
///
/// Assets are keyed by path (shaders by name) in creation order. Every
/// operation takes the state lock for its whole check-and-mutate step, so
/// uniqueness and active-scene rules hold under concurrent tool calls.
#[derive(Debug)]
pub struct MemoryProject {
    name: String,
    state: RwLock<ProjectState>,
}

impl MemoryProject {
    /// Create an empty project
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: RwLock::new(ProjectState::default()),
        }
    }

    /// Create an empty project wrapped for sharing across tools
    pub fn shared(name: impl Into<String>) -> Arc<Self> {
        Arc::new(Self::new(name))
    }

    /// The project name
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Default for MemoryProject {
    fn default() -> Self {
        Self::new("untitled")
    }
}

fn editor_error(message: impl Into<String>) -> ErganeError {
    ErganeError::Editor(message.into())
}

#[async_trait]
impl SceneBackend for MemoryProject {
    async fn create_scene(&self, name: &str, path: &str) -> Result<SceneRecord> {
        let mut state = self.state.write().await;
        if state.scenes.contains_key(path) {
            return Err(editor_error(format!("scene already exists at '{}'", path)));
        }

        let scene = SceneRecord::new(name, path);
        debug!(project = %self.name, path = %path, "created scene");
        state.scenes.insert(path.to_string(), scene.clone());
        state.active_scene = Some(path.to_string());
        Ok(scene)
    }

    async fn load_scene_by_path(&self, path: &str) -> Result<SceneRecord> {
        let mut state = self.state.write().await;
        let scene = state
            .scenes
            .get(path)
            .cloned()
            .ok_or_else(|| editor_error(format!("no scene at '{}'", path)))?;

        debug!(project = %self.name, path = %path, "loaded scene");
        state.active_scene = Some(path.to_string());
        Ok(scene)
    }

    async fn load_scene_by_index(&self, index: usize) -> Result<SceneRecord> {
        let mut state = self.state.write().await;
        let (path, scene) = state
            .scenes
            .get_index(index)
            .map(|(path, scene)| (path.clone(), scene.clone()))
            .ok_or_else(|| {
                editor_error(format!(
                    "scene index {} out of range ({} scenes)",
                    index,
                    state.scenes.len()
                ))
            })?;

        debug!(project = %self.name, path = %path, index, "loaded scene");
        state.active_scene = Some(path);
        Ok(scene)
    }

    async fn save_scene(&self) -> Result<SceneRecord> {
        let mut state = self.state.write().await;
        let path = state
            .active_scene
            .clone()
            .ok_or_else(|| editor_error("no active scene"))?;

        // The active path always names a stored scene; scenes are never
        // removed while active.
        let scene = state
            .scenes
            .get_mut(&path)
            .ok_or_else(|| editor_error(format!("no scene at '{}'", path)))?;
        scene.touch();
        debug!(project = %self.name, path = %path, "saved scene");
        Ok(scene.clone())
    }

    async fn unload_scene(&self) -> Result<SceneRecord> {
        let mut state = self.state.write().await;
        let path = state
            .active_scene
            .take()
            .ok_or_else(|| editor_error("no active scene"))?;

        let scene = state
            .scenes
            .get(&path)
            .cloned()
            .ok_or_else(|| editor_error(format!("no scene at '{}'", path)))?;
        debug!(project = %self.name, path = %path, "unloaded scene");
        Ok(scene)
    }

    async fn active_scene(&self) -> Option<SceneRecord> {
        let state = self.state.read().await;
        let path = state.active_scene.as_deref()?;
        state.scenes.get(path).cloned()
    }

    async fn list_scenes(&self) -> Vec<SceneRecord> {
        let state = self.state.read().await;
        state.scenes.values().cloned().collect()
    }
}

#[async_trait]
impl ScriptableBackend for MemoryProject {
    async fn create_object(&self, type_name: &str, path: &str) -> Result<ScriptableObject> {
        let mut state = self.state.write().await;
        if state.objects.contains_key(path) {
            return Err(editor_error(format!("object already exists at '{}'", path)));
        }

        let object = ScriptableObject::new(type_name, path);
        debug!(project = %self.name, path = %path, type_name = %type_name, "created object");
        state.objects.insert(path.to_string(), object.clone());
        Ok(object)
    }

    async fn set_properties(
        &self,
        path: &str,
        patch: &Map<String, Value>,
    ) -> Result<(ScriptableObject, Vec<String>)> {
        let mut state = self.state.write().await;
        let object = state
            .objects
            .get_mut(path)
            .ok_or_else(|| editor_error(format!("no object at '{}'", path)))?;

        let rejected = apply_patch(object, patch);
        object.touch();
        debug!(project = %self.name, path = %path, fields = patch.len(), "patched object");
        Ok((object.clone(), rejected))
    }

    async fn get_object(&self, path: &str) -> Result<ScriptableObject> {
        let state = self.state.read().await;
        state
            .objects
            .get(path)
            .cloned()
            .ok_or_else(|| editor_error(format!("no object at '{}'", path)))
    }

    async fn delete_object(&self, path: &str) -> Result<ScriptableObject> {
        let mut state = self.state.write().await;
        let object = state
            .objects
            .shift_remove(path)
            .ok_or_else(|| editor_error(format!("no object at '{}'", path)))?;
        debug!(project = %self.name, path = %path, "deleted object");
        Ok(object)
    }
}

#[async_trait]
impl ShaderBackend for MemoryProject {
    async fn create_shader(&self, name: &str, source: &str) -> Result<ShaderAsset> {
        let mut state = self.state.write().await;
        if state.shaders.contains_key(name) {
            return Err(editor_error(format!("shader '{}' already exists", name)));
        }

        let shader = ShaderAsset::new(name, source);
        debug!(project = %self.name, shader = %name, "created shader");
        state.shaders.insert(name.to_string(), shader.clone());
        Ok(shader)
    }

    async fn read_shader(&self, name: &str) -> Result<ShaderAsset> {
        let state = self.state.read().await;
        state
            .shaders
            .get(name)
            .cloned()
            .ok_or_else(|| editor_error(format!("no shader named '{}'", name)))
    }

    async fn update_shader(&self, name: &str, source: &str) -> Result<ShaderAsset> {
        let mut state = self.state.write().await;
        let shader = state
            .shaders
            .get_mut(name)
            .ok_or_else(|| editor_error(format!("no shader named '{}'", name)))?;

        shader.source = source.to_string();
        shader.touch();
        debug!(project = %self.name, shader = %name, "updated shader");
        Ok(shader.clone())
    }

    async fn delete_shader(&self, name: &str) -> Result<ShaderAsset> {
        let mut state = self.state.write().await;
        let shader = state
            .shaders
            .shift_remove(name)
            .ok_or_else(|| editor_error(format!("no shader named '{}'", name)))?;
        debug!(project = %self.name, shader = %name, "deleted shader");
        Ok(shader)
    }
}

#[async_trait]
impl TextureBackend for MemoryProject {
    async fn texture_settings(&self, path: &str) -> Result<TextureSettings> {
        let state = self.state.read().await;
        state
            .textures
            .get(path)
            .cloned()
            .ok_or_else(|| editor_error(format!("no texture settings for '{}'", path)))
    }

    async fn set_texture(
        &self,
        path: &str,
        patch: &Map<String, Value>,
    ) -> Result<(TextureSettings, Vec<String>)> {
        let mut state = self.state.write().await;
        let settings = state
            .textures
            .entry(path.to_string())
            .or_insert_with(|| TextureSettings::new(path));

        let rejected = apply_patch(settings, patch);
        settings.touch();
        debug!(project = %self.name, path = %path, fields = patch.len(), "patched texture");
        Ok((settings.clone(), rejected))
    }

    async fn reimport_texture(&self, path: &str) -> Result<TextureSettings> {
        let mut state = self.state.write().await;
        let settings = state
            .textures
            .get_mut(path)
            .ok_or_else(|| editor_error(format!("no texture settings for '{}'", path)))?;

        settings.touch();
        debug!(project = %self.name, path = %path, "reimported texture");
        Ok(settings.clone())
    }
}
