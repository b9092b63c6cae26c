//! The tool base: schema validation plus tree dispatch behind one entry point
//!
//! A [`Tool`] is the only surface the transport layer talks to. It owns an
//! ordered parameter schema and a routing tree, both frozen at construction,
//! and exposes a single [`invoke`](Tool::invoke) that validates, routes and
//! contains handler failures. A tool instance holds no per-call state, so
//! concurrent invocations share it freely.

use crate::bag::ArgumentBag;
use crate::error::{ErganeError, Result};
use crate::router::{DecisionTree, TreeBuilder};
use crate::schema::{self, ParamSpec};
use crate::tool::Outcome;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tracing::{debug, warn};

/// Introspection record for one tool: name, description and accepted keys
///
/// Parameters keep their declaration order. Served to external callers for
/// discovery without requiring an invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    /// Tool name
    pub name: String,
    /// Tool description
    pub description: String,
    /// Accepted parameters, in declaration order
    pub params: Vec<ParamSpec>,
}

/// An editor-automation tool: named, schema-validated, tree-routed
///
/// Built through [`Tool::builder`]; immutable afterwards. Each call to
/// [`invoke`](Tool::invoke) is a single pass: validate against the parameter
/// schema (fail fast on the first violation), walk the decision tree, run
/// the resolved handler, and fold any failure into an error [`Outcome`].
pub struct Tool {
    name: String,
    description: String,
    params: Vec<ParamSpec>,
    tree: DecisionTree,
}

impl std::fmt::Debug for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tool")
            .field("name", &self.name)
            .field("params", &self.params.iter().map(|p| &p.name).collect::<Vec<_>>())
            .field("tree", &self.tree)
            .finish()
    }
}

impl Tool {
    /// Start building a tool with the given name and description
    pub fn builder(name: impl Into<String>, description: impl Into<String>) -> ToolBuilder {
        ToolBuilder {
            name: name.into(),
            description: description.into(),
            params: Vec::new(),
            tree: None,
        }
    }

    /// Tool name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Tool description
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Declared parameters, in declaration order
    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    /// Execute one invocation: validate, route, contain
    ///
    /// The first schema violation aborts before any handler runs. Routing
    /// errors and handler failures come back as error outcomes with the
    /// original message; nothing else about a failure leaks past this
    /// boundary.
    pub async fn invoke(&self, bag: ArgumentBag) -> Outcome {
        if let Err(violation) = schema::check(&bag, &self.params) {
            warn!(tool = %self.name, %violation, "rejected invocation");
            return Outcome::error(violation.to_string());
        }

        let handler = match self.tree.resolve(&bag) {
            Ok(handler) => handler,
            Err(err) => {
                warn!(tool = %self.name, key = %err.key, "routing failed");
                return Outcome::error(err.to_string());
            }
        };

        debug!(tool = %self.name, "dispatching");
        match handler.run(bag).await {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(tool = %self.name, error = %err, "handler failed");
                Outcome::error(err.to_string())
            }
        }
    }

    /// Introspection record for discovery and documentation
    pub fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: self.name.clone(),
            description: self.description.clone(),
            params: self.params.clone(),
        }
    }

    /// Parameters rendered as a JSON-Schema-shaped object
    ///
    /// Enum values, numeric bounds and examples carry through; `required`
    /// lists the mandatory keys in declaration order.
    pub fn input_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for spec in &self.params {
            let mut prop = Map::new();
            prop.insert("type".into(), json!(spec.kind.json_type()));
            prop.insert("description".into(), json!(spec.description));
            if let Some(one_of) = &spec.one_of {
                prop.insert("enum".into(), json!(one_of));
            }
            if let Some((min, max)) = spec.range {
                prop.insert("minimum".into(), json!(min));
                prop.insert("maximum".into(), json!(max));
            }
            if !spec.examples.is_empty() {
                prop.insert("examples".into(), json!(spec.examples));
            }
            properties.insert(spec.name.clone(), Value::Object(prop));
            if spec.required {
                required.push(spec.name.clone());
            }
        }

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }
}

/// Builder for [`Tool`]
///
/// Collects the parameter schema and the routing tree, then freezes both.
/// Construction mistakes (duplicate parameter names, a malformed tree, a
/// missing tree) fail here, at tool construction time.
pub struct ToolBuilder {
    name: String,
    description: String,
    params: Vec<ParamSpec>,
    tree: Option<TreeBuilder>,
}

impl ToolBuilder {
    /// Declare one accepted parameter; order of calls is the declared order
    pub fn param(mut self, spec: ParamSpec) -> Self {
        self.params.push(spec);
        self
    }

    /// Attach the routing tree, still in builder form
    ///
    /// The tree is built (and its construction validated) by
    /// [`build`](ToolBuilder::build).
    pub fn tree(mut self, tree: TreeBuilder) -> Self {
        self.tree = Some(tree);
        self
    }

    /// Validate and freeze the tool
    pub fn build(self) -> Result<Tool> {
        if self.name.trim().is_empty() {
            return Err(ErganeError::Construction("tool name is empty".to_string()));
        }
        for (i, spec) in self.params.iter().enumerate() {
            if self.params[..i].iter().any(|p| p.name == spec.name) {
                return Err(ErganeError::Construction(format!(
                    "duplicate parameter '{}' in tool '{}'",
                    spec.name, self.name
                )));
            }
        }
        let Some(tree) = self.tree else {
            return Err(ErganeError::Construction(format!(
                "tool '{}' has no routing tree",
                self.name
            )));
        };

        Ok(Tool {
            name: self.name,
            description: self.description,
            params: self.params,
            tree: tree.build()?,
        })
    }
}
