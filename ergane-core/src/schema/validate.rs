//! Argument validation against a tool's declared parameters
//!
//! Validation runs before dispatch. It is advisory by contract: callers on
//! the invoke path surface only the first violation (fail fast), while
//! [`validate`] returns every violation for diagnostics.

use crate::bag::{ArgumentBag, ValueKind};
use crate::schema::{ParamKind, ParamSpec};

/// A single validation failure
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchemaViolation {
    /// A required key was absent from the bag
    #[error("missing required parameter '{key}'")]
    MissingRequiredKey { key: String },

    /// A key was present with an incompatible runtime type
    #[error("parameter '{key}' expects {expected}, got {actual}")]
    TypeMismatch {
        key: String,
        expected: ParamKind,
        actual: ValueKind,
    },

    /// A key's value is not in the declared enumeration
    #[error("parameter '{key}' must be one of {allowed:?}")]
    NotInEnum { key: String, allowed: Vec<String> },

    /// A numeric key's value falls outside the declared range
    #[error("parameter '{key}' must be between {min} and {max}")]
    OutOfRange { key: String, min: f64, max: f64 },
}

impl SchemaViolation {
    /// The parameter the violation concerns
    pub fn key(&self) -> &str {
        match self {
            SchemaViolation::MissingRequiredKey { key }
            | SchemaViolation::TypeMismatch { key, .. }
            | SchemaViolation::NotInEnum { key, .. }
            | SchemaViolation::OutOfRange { key, .. } => key,
        }
    }
}

/// Check a bag against an ordered parameter list, reporting every violation
///
/// Violations come back in declaration order, at most one per parameter.
/// Keys present in the bag with no matching spec are ignored, so callers may
/// pass auxiliary data consumed directly by leaf handlers.
pub fn validate(bag: &ArgumentBag, specs: &[ParamSpec]) -> Vec<SchemaViolation> {
    let mut violations = Vec::new();

    for spec in specs {
        let Some(value) = bag.get(&spec.name) else {
            if spec.required {
                violations.push(SchemaViolation::MissingRequiredKey {
                    key: spec.name.clone(),
                });
            }
            continue;
        };

        if !spec.kind.admits(value) {
            violations.push(SchemaViolation::TypeMismatch {
                key: spec.name.clone(),
                expected: spec.kind,
                actual: ValueKind::of(value),
            });
            continue;
        }

        if let (Some(allowed), Some(s)) = (&spec.one_of, value.as_str()) {
            let given = s.trim().to_lowercase();
            if !allowed.iter().any(|a| a.trim().to_lowercase() == given) {
                violations.push(SchemaViolation::NotInEnum {
                    key: spec.name.clone(),
                    allowed: allowed.clone(),
                });
                continue;
            }
        }

        if let (Some((min, max)), Some(n)) = (spec.range, value.as_f64()) {
            if n < min || n > max {
                violations.push(SchemaViolation::OutOfRange {
                    key: spec.name.clone(),
                    min,
                    max,
                });
            }
        }
    }

    violations
}

/// Fail-fast variant: the first violation in declaration order, if any
pub fn check(bag: &ArgumentBag, specs: &[ParamSpec]) -> Result<(), SchemaViolation> {
    match validate(bag, specs).into_iter().next() {
        Some(violation) => Err(violation),
        None => Ok(()),
    }
}
