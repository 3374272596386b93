//! Declarative request validation.
//!
//! A route declares an ordered list of [`Rule`]s. Each rule looks at one field
//! of a [`RequestSnapshot`] and contributes at most one [`FieldError`]. Rules
//! are evaluated exhaustively: a failing rule never stops the ones after it, so
//! a client sees every problem with its request at once, in declaration order.

pub mod coerce;
pub mod rules;

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Where a validated field lives in the request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Params,
    Body,
}

/// A single check against one field
#[derive(Clone, Copy)]
pub enum Check {
    NotEmpty,
    IsNumeric,
    IsInt,
    IsBoolean,
    /// Arbitrary predicate over the raw value (`None` when the field is absent)
    Custom(fn(Option<&Value>) -> bool),
}

impl Check {
    pub fn passes(&self, value: Option<&Value>) -> bool {
        match self {
            Check::NotEmpty => !coerce::to_text(value).is_empty(),
            Check::IsNumeric => coerce::is_numeric(&coerce::to_text(value)),
            Check::IsInt => coerce::is_int(&coerce::to_text(value)),
            Check::IsBoolean => coerce::is_boolean(&coerce::to_text(value)),
            Check::Custom(predicate) => predicate(value),
        }
    }
}

impl std::fmt::Debug for Check {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Check::NotEmpty => write!(f, "NotEmpty"),
            Check::IsNumeric => write!(f, "IsNumeric"),
            Check::IsInt => write!(f, "IsInt"),
            Check::IsBoolean => write!(f, "IsBoolean"),
            Check::Custom(_) => write!(f, "Custom"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub location: Location,
    pub field: &'static str,
    pub check: Check,
    pub message: &'static str,
}

impl Rule {
    pub const fn param(field: &'static str, check: Check, message: &'static str) -> Self {
        Self { location: Location::Params, field, check, message }
    }

    pub const fn body(field: &'static str, check: Check, message: &'static str) -> Self {
        Self { location: Location::Body, field, check, message }
    }

    /// Run the check, producing an error entry on failure
    pub fn evaluate(&self, request: &RequestSnapshot) -> Option<FieldError> {
        let value = request.field(self.location, self.field);
        if self.check.passes(value.as_ref()) {
            return None;
        }
        Some(FieldError {
            kind: "field",
            value,
            msg: self.message.to_string(),
            path: self.field.to_string(),
            location: self.location,
        })
    }
}

/// Ordered rules for one route
pub type RuleSet = &'static [Rule];

/// Evaluate every rule in order, collecting all failures.
pub fn evaluate(rules: &[Rule], request: &RequestSnapshot) -> Vec<FieldError> {
    rules.iter().filter_map(|rule| rule.evaluate(request)).collect()
}

/// One failed rule, serialized as `{type, value?, msg, path, location}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    pub msg: String,
    pub path: String,
    pub location: Location,
}

/// Parsed view of an inbound request that rules and handlers read from
#[derive(Debug, Clone, Default)]
pub struct RequestSnapshot {
    pub params: HashMap<String, String>,
    pub body: Value,
}

impl RequestSnapshot {
    pub fn new(params: HashMap<String, String>, body: Value) -> Self {
        Self { params, body }
    }

    pub fn empty_body() -> Value {
        Value::Object(Map::new())
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Body field lookup; non-object bodies have no fields
    pub fn body_field(&self, name: &str) -> Option<&Value> {
        self.body.as_object().and_then(|map| map.get(name))
    }

    pub fn field(&self, location: Location, name: &str) -> Option<Value> {
        match location {
            Location::Params => self.param(name).map(|v| Value::String(v.to_string())),
            Location::Body => self.body_field(name).cloned(),
        }
    }
}
