//! Tool registration, lookup and introspection listing
//!
//! The registry keeps tools in registration order and rejects duplicate
//! names up front. [`ToolRegistry::invoke`] gives remote callers the uniform
//! wire shape even for unknown tool names: an error [`Outcome`], not a Rust
//! error, so the transport never needs a second failure path.

use crate::bag::ArgumentBag;
use crate::tool::{Outcome, Tool, ToolDescriptor};
use indexmap::IndexMap;
use std::sync::Arc;
use tracing::debug;

/// Error type for registry operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// A tool with this name is already registered
    #[error("tool '{0}' is already registered")]
    DuplicateTool(String),

    /// No tool with this name is registered
    #[error("tool '{0}' not found")]
    NotFound(String),
}

/// Registry of tools, ordered by registration
#[derive(Default)]
pub struct ToolRegistry {
    tools: IndexMap<String, Arc<Tool>>,
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tool_count", &self.tools.len())
            .field("tools", &self.tools.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl ToolRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool
    ///
    /// Returns an error if a tool with the same name is already registered.
    pub fn register(&mut self, tool: Tool) -> Result<(), RegistryError> {
        let name = tool.name().to_string();
        if self.tools.contains_key(&name) {
            return Err(RegistryError::DuplicateTool(name));
        }
        debug!(tool = %name, "registered tool");
        self.tools.insert(name, Arc::new(tool));
        Ok(())
    }

    /// Remove a tool by name, returning it if present
    pub fn unregister(&mut self, name: &str) -> Option<Arc<Tool>> {
        // shift_remove keeps the registration order of the remaining tools
        self.tools.shift_remove(name)
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<&Arc<Tool>> {
        self.tools.get(name)
    }

    /// Check whether a tool is registered
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Tool names in registration order
    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(|s| s.as_str()).collect()
    }

    /// Number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Introspection records for every tool, in registration order
    pub fn descriptors(&self) -> Vec<ToolDescriptor> {
        self.tools.values().map(|t| t.descriptor()).collect()
    }

    /// Keep only the tools named in the allowlist
    ///
    /// Names absent from the registry are ignored; the surviving tools keep
    /// their registration order.
    pub fn retain_allowed(&mut self, allowlist: &[String]) {
        self.tools.retain(|name, _| allowlist.iter().any(|a| a == name));
    }

    /// Invoke a tool by name
    ///
    /// An unknown name comes back as an error outcome so remote callers see
    /// the uniform wire shape.
    pub async fn invoke(&self, name: &str, bag: ArgumentBag) -> Outcome {
        match self.tools.get(name) {
            Some(tool) => tool.invoke(bag).await,
            None => Outcome::error(RegistryError::NotFound(name.to_string()).to_string()),
        }
    }
}
