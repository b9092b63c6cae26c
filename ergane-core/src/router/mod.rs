//! Keyed decision-tree command routing
//!
//! Every tool owns one [`DecisionTree`]: an immutable structure that maps
//! discriminator key values (usually `action`) to leaf handlers, with
//! optional fallback slots for absent or unrecognized values. Trees are
//! assembled once through [`TreeBuilder`] at tool construction time, so a
//! malformed routing table is a construction error, never a runtime
//! surprise.

mod builder;
mod handler;
mod tree;

pub use builder::{TreeBuilder, TreeError};
pub use handler::{ActionHandler, BoxedHandler, FnHandler, handler_fn};
pub use tree::{DecisionTree, DispatchError};
