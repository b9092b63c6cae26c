//! Tools: the public entry point combining validation and dispatch
//!
//! A [`Tool`] bundles an ordered parameter schema with a decision tree and
//! exposes one `invoke(bag) -> Outcome` surface. The [`ToolRegistry`] holds
//! the tools a host exposes, in registration order, and serves both lookup
//! and introspection listing.

mod base;
mod outcome;
mod registry;

pub use base::{Tool, ToolBuilder, ToolDescriptor};
pub use outcome::Outcome;
pub use registry::{RegistryError, ToolRegistry};

#[cfg(test)]
mod tests;
