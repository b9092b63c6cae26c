//! Fluent construction of decision trees
//!
//! The builder is a stateful cursor over the tree being assembled: `key`
//! names the discriminator the current node inspects, `leaf` and `branch`
//! attach children under it, `up` closes a branch scope. Construction
//! mistakes are recorded as they happen and surfaced by `build`, so a
//! malformed tree fails at tool construction time, never at first dispatch.

use super::handler::ActionHandler;
use super::tree::{DecisionNode, DecisionTree};
use indexmap::IndexMap;
use std::sync::Arc;

/// Construction-time error for a routing tree
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// A key name or branch label was empty after trimming
    #[error("empty label or key name")]
    EmptyName,

    /// `key` or `optional_key` was called twice in one scope
    #[error("scope '{scope}' already inspects key '{existing}'")]
    KeyAlreadySet { scope: String, existing: String },

    /// `leaf`, `branch` or `default_leaf` was called before any key was named
    #[error("a leaf or branch requires key() or optional_key() first")]
    NoKeyInScope,

    /// Two children (leaf or branch) share a normalized label
    #[error("duplicate label '{label}' under key '{key}'")]
    DuplicateLabel { key: String, label: String },

    /// `default_leaf` was called twice for one node
    #[error("default leaf already set under key '{key}'")]
    FallbackAlreadySet { key: String },

    /// An optional key has no default leaf to absorb the absent case
    #[error("optional key '{key}' requires a default leaf")]
    OptionalWithoutFallback { key: String },

    /// A key node routes nowhere
    #[error("key '{key}' has no children and no default leaf")]
    EmptyNode { key: String },

    /// A branch scope was closed without ever naming its key
    #[error("scope '{scope}' never named its key")]
    ScopeWithoutKey { scope: String },

    /// `up` was called with no open branch scope
    #[error("up() called at the root scope")]
    UpAtRoot,
}

/// One open scope during construction
struct Frame {
    /// Label this scope attaches under in its parent; empty for the root
    label: String,
    key: Option<String>,
    optional: bool,
    children: IndexMap<String, DecisionNode>,
    fallback: Option<DecisionNode>,
}

impl Frame {
    fn root() -> Self {
        Self::branch(String::new())
    }

    fn branch(label: String) -> Self {
        Self {
            label,
            key: None,
            optional: false,
            children: IndexMap::new(),
            fallback: None,
        }
    }

    fn scope(&self) -> String {
        if self.label.is_empty() {
            "root".to_string()
        } else {
            self.label.clone()
        }
    }

    fn finalize(self) -> Result<DecisionNode, TreeError> {
        let scope = self.scope();
        let Some(key) = self.key else {
            return Err(TreeError::ScopeWithoutKey { scope });
        };
        if self.children.is_empty() && self.fallback.is_none() {
            return Err(TreeError::EmptyNode { key });
        }
        if self.optional && self.fallback.is_none() {
            return Err(TreeError::OptionalWithoutFallback { key });
        }
        Ok(DecisionNode::Key {
            key,
            children: self.children,
            fallback: self.fallback.map(Box::new),
        })
    }
}

fn normalize_label(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Fluent builder assembling a [`DecisionTree`]
///
/// Not thread-safe and not reusable: each builder performs a single build
/// pass and is consumed by [`build`](TreeBuilder::build). The first mistake
/// recorded during construction is returned from `build`.
pub struct TreeBuilder {
    stack: Vec<Frame>,
    error: Option<TreeError>,
}

impl TreeBuilder {
    /// Create a builder with an empty root scope
    pub fn new() -> Self {
        Self {
            stack: vec![Frame::root()],
            error: None,
        }
    }

    /// Name the discriminator key the current scope inspects
    pub fn key(self, name: impl Into<String>) -> Self {
        self.set_key(name.into(), false)
    }

    /// Name the discriminator key, tolerating its absence at dispatch time
    ///
    /// An optional key must be paired with a
    /// [`default_leaf`](TreeBuilder::default_leaf); without one, an absent
    /// key would reintroduce the routing error the optional form exists to
    /// avoid, so `build` rejects it.
    pub fn optional_key(self, name: impl Into<String>) -> Self {
        self.set_key(name.into(), true)
    }

    /// Attach a terminal handler under `label`; the cursor stays put
    pub fn leaf<H>(mut self, label: impl Into<String>, handler: H) -> Self
    where
        H: ActionHandler + 'static,
    {
        if self.error.is_some() {
            return self;
        }
        let label = normalize_label(&label.into());
        if label.is_empty() {
            self.error = Some(TreeError::EmptyName);
            return self;
        }
        let frame = match self.stack.last_mut() {
            Some(frame) => frame,
            None => return self,
        };
        let Some(key) = frame.key.clone() else {
            self.error = Some(TreeError::NoKeyInScope);
            return self;
        };
        if frame.children.contains_key(&label) {
            self.error = Some(TreeError::DuplicateLabel { key, label });
            return self;
        }
        frame.children.insert(
            label,
            DecisionNode::Leaf {
                handler: Arc::new(handler),
            },
        );
        self
    }

    /// Attach a nested key node under `label` and move the cursor into it
    ///
    /// The nested scope names its own discriminator with the next `key` or
    /// `optional_key` call, then closes with [`up`](TreeBuilder::up).
    pub fn branch(mut self, label: impl Into<String>) -> Self {
        if self.error.is_some() {
            return self;
        }
        let label = normalize_label(&label.into());
        if label.is_empty() {
            self.error = Some(TreeError::EmptyName);
            return self;
        }
        let frame = match self.stack.last_mut() {
            Some(frame) => frame,
            None => return self,
        };
        let Some(key) = frame.key.clone() else {
            self.error = Some(TreeError::NoKeyInScope);
            return self;
        };
        if frame.children.contains_key(&label) {
            self.error = Some(TreeError::DuplicateLabel { key, label });
            return self;
        }
        self.stack.push(Frame::branch(label));
        self
    }

    /// Bind the fallback handler of the current key node
    ///
    /// The fallback is taken when the key is absent from the bag or its
    /// value matches no declared label.
    pub fn default_leaf<H>(mut self, handler: H) -> Self
    where
        H: ActionHandler + 'static,
    {
        if self.error.is_some() {
            return self;
        }
        let frame = match self.stack.last_mut() {
            Some(frame) => frame,
            None => return self,
        };
        let Some(key) = frame.key.clone() else {
            self.error = Some(TreeError::NoKeyInScope);
            return self;
        };
        if frame.fallback.is_some() {
            self.error = Some(TreeError::FallbackAlreadySet { key });
            return self;
        }
        frame.fallback = Some(DecisionNode::Leaf {
            handler: Arc::new(handler),
        });
        self
    }

    /// Close the current branch scope, returning the cursor to its parent
    pub fn up(mut self) -> Self {
        if self.error.is_some() {
            return self;
        }
        if let Err(error) = self.close_top() {
            self.error = Some(error);
        }
        self
    }

    /// Validate and freeze the tree; the builder is consumed
    ///
    /// Any branch scopes still open are closed as if `up` had been called,
    /// so a chain may end at any depth.
    pub fn build(mut self) -> Result<DecisionTree, TreeError> {
        if let Some(error) = self.error {
            return Err(error);
        }
        while self.stack.len() > 1 {
            self.close_top()?;
        }
        let root = match self.stack.pop() {
            Some(frame) => frame.finalize()?,
            None => return Err(TreeError::ScopeWithoutKey { scope: "root".into() }),
        };
        Ok(DecisionTree::new(root))
    }

    fn set_key(mut self, name: String, optional: bool) -> Self {
        if self.error.is_some() {
            return self;
        }
        let name = name.trim().to_string();
        if name.is_empty() {
            self.error = Some(TreeError::EmptyName);
            return self;
        }
        let frame = match self.stack.last_mut() {
            Some(frame) => frame,
            None => return self,
        };
        if let Some(existing) = &frame.key {
            self.error = Some(TreeError::KeyAlreadySet {
                scope: frame.scope(),
                existing: existing.clone(),
            });
            return self;
        }
        frame.key = Some(name);
        frame.optional = optional;
        self
    }

    fn close_top(&mut self) -> Result<(), TreeError> {
        if self.stack.len() < 2 {
            return Err(TreeError::UpAtRoot);
        }
        let Some(frame) = self.stack.pop() else {
            return Err(TreeError::UpAtRoot);
        };
        let label = frame.label.clone();
        let node = frame.finalize()?;
        let Some(parent) = self.stack.last_mut() else {
            return Err(TreeError::UpAtRoot);
        };
        parent.children.insert(label, node);
        Ok(())
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
