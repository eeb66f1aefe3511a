//! Parameter normalization: untyped tool arguments in, typed [`ParameterSet`] out.
//!
//! Every downstream stage (argument building, output rendering) reads only the
//! typed set. Values of an unsupported JSON type (null, arrays, objects) are
//! dropped here so a loosely typed caller never trips an error for them.
//! Per-operation [`ValidationRule`]s run once, right after coercion.

use std::collections::BTreeMap;

use serde_json::Value;
use thiserror::Error;

/// One typed parameter value. An absent parameter is simply not in the set.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Bool(bool),
    Str(String),
    Number(f64),
}

impl ParamValue {
    /// Coerces one JSON value; `None` means "treat as absent".
    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(Self::Bool(*b)),
            Value::String(s) => Some(Self::Str(s.clone())),
            Value::Number(n) => n.as_f64().map(Self::Number),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

/// Typed parameters of one invocation, looked up by name.
///
/// Backed by a `BTreeMap` so iteration is sorted and never depends on the
/// insertion order of the caller's JSON object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterSet {
    values: BTreeMap<String, ParamValue>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Coerces a raw argument bag. A missing bag, or anything that is not a
    /// JSON object, yields an empty set.
    pub fn from_json(raw: Option<&Value>) -> Self {
        let values = raw
            .and_then(Value::as_object)
            .map(|map| {
                map.iter()
                    .filter_map(|(k, v)| ParamValue::from_json(v).map(|pv| (k.clone(), pv)))
                    .collect()
            })
            .unwrap_or_default();
        Self { values }
    }

    /// Builder-style insert, mostly for tests and programmatic callers.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    /// Boolean value, or `None` when absent or of another type.
    pub fn bool(&self, name: &str) -> Option<bool> {
        match self.values.get(name) {
            Some(ParamValue::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    /// Non-empty string value. Empty strings count as "not chosen".
    pub fn str(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(ParamValue::Str(s)) if !s.is_empty() => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        match self.values.get(name) {
            Some(ParamValue::Number(n)) => Some(*n),
            _ => None,
        }
    }

    /// True only when the parameter is a boolean set to `true`.
    pub fn is_set(&self, name: &str) -> bool {
        self.bool(name).unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// A precondition an operation places on its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationRule {
    /// `param` must be a non-empty string; `label` names it in the message.
    Required {
        param: &'static str,
        label: &'static str,
    },
    /// Remote execution must carry a command: the transport cannot drive an
    /// interactive shell.
    OneShotCommand { param: &'static str },
    /// Cluster login targets either one named cluster (`name`) or every
    /// cluster (`all` flag), never both and never neither.
    ClusterTarget {
        name: &'static str,
        all: &'static str,
    },
}

/// Why an invocation was rejected before any command was built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{label} is required")]
    Missing {
        param: &'static str,
        label: &'static str,
    },
    #[error(
        "Command is required. Interactive shell sessions are not supported via MCP - you must \
         provide a specific command to execute."
    )]
    InteractiveSession { param: &'static str },
    #[error(
        "Either '{name}' must be specified for single cluster login, or '{all}' must be true for \
         batch login to all accessible clusters."
    )]
    NoTarget {
        name: &'static str,
        all: &'static str,
    },
    #[error(
        "'{name}' and '{all}' are mutually exclusive. Specify either a specific cluster name or \
         use --all for batch login."
    )]
    ConflictingTargets {
        name: &'static str,
        all: &'static str,
    },
}

impl ValidationError {
    /// Parameter names involved in the violated rule.
    pub fn fields(&self) -> Vec<&'static str> {
        match *self {
            Self::Missing { param, .. } | Self::InteractiveSession { param } => vec![param],
            Self::NoTarget { name, all } | Self::ConflictingTargets { name, all } => {
                vec![name, all]
            }
        }
    }
}

impl ValidationRule {
    fn check(&self, params: &ParameterSet) -> Result<(), ValidationError> {
        match *self {
            Self::Required { param, label } => match params.str(param) {
                Some(_) => Ok(()),
                None => Err(ValidationError::Missing { param, label }),
            },
            Self::OneShotCommand { param } => match params.str(param) {
                Some(_) => Ok(()),
                None => Err(ValidationError::InteractiveSession { param }),
            },
            Self::ClusterTarget { name, all } => {
                match (params.str(name).is_some(), params.is_set(all)) {
                    (true, true) => Err(ValidationError::ConflictingTargets { name, all }),
                    (false, false) => Err(ValidationError::NoTarget { name, all }),
                    _ => Ok(()),
                }
            }
        }
    }
}

/// Runs `rules` in order and stops at the first violation.
pub fn validate(params: &ParameterSet, rules: &[ValidationRule]) -> Result<(), ValidationError> {
    rules.iter().try_for_each(|rule| rule.check(params))
}

/// Coerces `raw` and validates it against `rules`.
pub fn normalize(
    raw: Option<&Value>,
    rules: &[ValidationRule],
) -> Result<ParameterSet, ValidationError> {
    let params = ParameterSet::from_json(raw);
    validate(&params, rules)?;
    Ok(params)
}
