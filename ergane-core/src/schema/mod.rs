//! Parameter schemas and argument validation
//!
//! A tool's schema is an ordered list of [`ParamSpec`]s. [`validate`] checks
//! an incoming bag against it; [`check`] is the fail-fast form used on the
//! invoke path. Keys with no matching spec pass through untouched, leaving
//! room for handler-only data.

mod param;
mod validate;

pub use param::{ParamKind, ParamSpec};
pub use validate::{SchemaViolation, check, validate};
