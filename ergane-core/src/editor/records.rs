//! Asset records managed by the editor backends
//!
//! These are the typed records the built-in tools read and write. Each
//! carries an asset id and a modification stamp. Records whose fields an
//! external agent may patch by name implement [`FieldPatch`]: an explicit
//! per-type capability instead of reflection, so every record decides which
//! names it accepts and what shape their values must have.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Apply one named field to a record of runtime-determined shape
///
/// Returns `false` when the field name is unknown or the value has the
/// wrong shape; the record is left untouched for that field.
pub trait FieldPatch {
    fn set_field(&mut self, name: &str, value: &Value) -> bool;
}

/// Apply every entry of a patch object, collecting the rejected field names
///
/// Accepted fields are applied even when others are rejected; a patch is
/// not transactional.
pub fn apply_patch<T: FieldPatch>(target: &mut T, patch: &Map<String, Value>) -> Vec<String> {
    patch
        .iter()
        .filter(|(name, value)| !target.set_field(name, value))
        .map(|(name, _)| name.clone())
        .collect()
}

/// A scene asset in the project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneRecord {
    /// Asset id
    pub id: Uuid,

    /// Scene name
    pub name: String,

    /// Project-relative path, unique across scenes
    pub path: String,

    /// Last modification stamp
    pub modified_at: DateTime<Utc>,
}

impl SceneRecord {
    /// Create a new scene record
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            path: path.into(),
            modified_at: Utc::now(),
        }
    }

    /// Bump the modification stamp
    pub fn touch(&mut self) {
        self.modified_at = Utc::now();
    }
}

/// A scriptable data asset with free-form named properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptableObject {
    /// Asset id
    pub id: Uuid,

    /// Declared type of the object
    pub type_name: String,

    /// Project-relative path, unique across scriptable objects
    pub path: String,

    /// Named property values
    pub properties: Map<String, Value>,

    /// Last modification stamp
    pub modified_at: DateTime<Utc>,
}

impl ScriptableObject {
    /// Create a new object with no properties
    pub fn new(type_name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            type_name: type_name.into(),
            path: path.into(),
            properties: Map::new(),
            modified_at: Utc::now(),
        }
    }

    /// Bump the modification stamp
    pub fn touch(&mut self) {
        self.modified_at = Utc::now();
    }
}

impl FieldPatch for ScriptableObject {
    // Properties are free-form: any name is accepted, null clears
    fn set_field(&mut self, name: &str, value: &Value) -> bool {
        if value.is_null() {
            self.properties.remove(name);
        } else {
            self.properties.insert(name.to_string(), value.clone());
        }
        true
    }
}

/// A shader asset: a name and its stored source text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShaderAsset {
    /// Asset id
    pub id: Uuid,

    /// Shader name, unique across shaders
    pub name: String,

    /// Source text as given; never interpreted here
    pub source: String,

    /// Last modification stamp
    pub modified_at: DateTime<Utc>,
}

impl ShaderAsset {
    /// Create a new shader asset
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            source: source.into(),
            modified_at: Utc::now(),
        }
    }

    /// Bump the modification stamp
    pub fn touch(&mut self) {
        self.modified_at = Utc::now();
    }
}

/// Importer settings for one texture asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureSettings {
    /// Asset id
    pub id: Uuid,

    /// Project-relative path of the texture
    pub path: String,

    /// Largest dimension the importer keeps, in pixels
    pub max_size: i64,

    /// Sampling filter: point, bilinear or trilinear
    pub filter_mode: String,

    /// Whether color data is sRGB
    pub srgb: bool,

    /// Whether the CPU may read pixels back
    pub readable: bool,

    /// Last modification stamp
    pub modified_at: DateTime<Utc>,
}

impl TextureSettings {
    /// Default settings for a texture at `path`
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            path: path.into(),
            max_size: 2048,
            filter_mode: "bilinear".to_string(),
            srgb: true,
            readable: false,
            modified_at: Utc::now(),
        }
    }

    /// Bump the modification stamp
    pub fn touch(&mut self) {
        self.modified_at = Utc::now();
    }
}

impl FieldPatch for TextureSettings {
    fn set_field(&mut self, name: &str, value: &Value) -> bool {
        match name {
            "max_size" => match value.as_i64() {
                Some(v) => {
                    self.max_size = v;
                    true
                }
                None => false,
            },
            "filter_mode" => match value.as_str() {
                Some(v) => {
                    self.filter_mode = v.to_string();
                    true
                }
                None => false,
            },
            "srgb" => match value.as_bool() {
                Some(v) => {
                    self.srgb = v;
                    true
                }
                None => false,
            },
            "readable" => match value.as_bool() {
                Some(v) => {
                    self.readable = v;
                    true
                }
                None => false,
            },
            _ => false,
        }
    }
}
