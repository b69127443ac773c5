//! Resource records exchanged with the API.
//!
//! Every field has a default so partial records (list views, older servers)
//! still decode.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A key/value pair, used for parameters and annotations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyValue {
    /// Key.
    pub key: String,
    /// Any JSON value.
    pub value: Value,
}

impl KeyValue {
    /// Create a pair.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// How an action runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Exec {
    /// Runtime kind, e.g. `nodejs:20`, `python:3` or `blackbox`.
    pub kind: String,
    /// Source code, or base64 when `binary` is set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Container image for `blackbox` actions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Entry point.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main: Option<String>,
    /// `code` is a base64 archive.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub binary: bool,
}

/// Resource limits of an action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Timeout in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
    /// Memory in megabytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory: Option<u64>,
    /// Log size in megabytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logs: Option<u64>,
}

/// An action: a function deployed on the platform.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Action {
    /// Owning namespace.
    pub namespace: String,
    /// Name, possibly `package/action`.
    pub name: String,
    /// Semantic version assigned by the server.
    pub version: String,
    /// Visible to other namespaces.
    pub publish: bool,
    /// Runtime and code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exec: Option<Exec>,
    /// Annotations.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<KeyValue>,
    /// Default parameters.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<KeyValue>,
    /// Resource limits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limits: Option<Limits>,
}

/// A trigger: a named channel of events.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Trigger {
    /// Owning namespace.
    pub namespace: String,
    /// Name.
    pub name: String,
    /// Semantic version assigned by the server.
    pub version: String,
    /// Visible to other namespaces.
    pub publish: bool,
    /// Annotations.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<KeyValue>,
    /// Default parameters merged into every fired event.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<KeyValue>,
}

/// Whether a rule reacts to its trigger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleState {
    /// Firing the trigger invokes the action.
    #[default]
    Active,
    /// The rule is ignored.
    Inactive,
}

/// A rule: binds a trigger to an action.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rule {
    /// Owning namespace.
    pub namespace: String,
    /// Name.
    pub name: String,
    /// Semantic version assigned by the server.
    pub version: String,
    /// Visible to other namespaces.
    pub publish: bool,
    /// Current state, as reported by the server.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RuleState>,
    /// Fully qualified trigger name.
    pub trigger: String,
    /// Fully qualified action name.
    pub action: String,
}

/// Outcome of an activation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivationResponse {
    /// `success`, `application error`, `action developer error` or
    /// `whisk internal error`.
    pub status: String,
    /// Numeric form of `status`.
    #[serde(rename = "statusCode")]
    pub status_code: i64,
    /// `true` when `status` is `success`.
    pub success: bool,
    /// Value returned by the action.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
}

/// A record of one action or trigger run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Activation {
    /// Owning namespace.
    pub namespace: String,
    /// Name of the activated entity.
    pub name: String,
    /// Version of the activated entity.
    pub version: String,
    /// Subject that caused the activation.
    pub subject: String,
    /// Identifier.
    #[serde(rename = "activationId")]
    pub activation_id: String,
    /// Start time, epoch milliseconds.
    pub start: i64,
    /// End time, epoch milliseconds.
    pub end: i64,
    /// Duration in milliseconds.
    pub duration: i64,
    /// Outcome.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<ActivationResponse>,
    /// Captured log lines.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub logs: Vec<String>,
    /// Annotations.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<KeyValue>,
}

/// Logs of one activation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivationLogs {
    /// Log lines, in order.
    pub logs: Vec<String>,
}

/// Identifier returned by non-blocking invocations and trigger fires.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivationId {
    /// Identifier.
    #[serde(rename = "activationId")]
    pub activation_id: String,
}

/// Source package of a package binding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Binding {
    /// Namespace of the bound package.
    pub namespace: String,
    /// Name of the bound package.
    pub name: String,
}

/// A package: a group of actions and feeds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Package {
    /// Owning namespace.
    pub namespace: String,
    /// Name.
    pub name: String,
    /// Semantic version assigned by the server.
    pub version: String,
    /// Visible to other namespaces.
    pub publish: bool,
    /// Set when this package is a binding of another one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub binding: Option<Binding>,
    /// Annotations.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<KeyValue>,
    /// Parameters shared by the package's actions.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<KeyValue>,
}
