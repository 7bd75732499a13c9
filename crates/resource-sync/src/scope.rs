//! # Scope Descriptors
//!
//! Several modules may subscribe to one *shared* operation. The general
//! transactions list and the per-property report both listen to
//! `"transactions/list"`, but each must only react to its own calls.
//!
//! A [`ScopeDescriptor`] is a declared predicate over an invocation's call
//! arguments. It is attached at registration and evaluated for every phase
//! (Started, Succeeded, Failed) of every bound event, so a module that does not
//! match never sees its flags, error or data touched.
//!
//! | Descriptor | Matches when |
//! |------------|--------------|
//! | `Any` | always |
//! | `Has(k)` | `args[k]` is present and not null |
//! | `Missing(k)` | `args[k]` is absent or null |
//! | `Equals(k, v)` | `args[k]` equals `v` (scalars compare loosely: `7 == "7"`) |
//! | `NotEquals(k, v)` | `!Equals(k, v)` |
//! | `All(..)` / `AnyOf(..)` | conjunction / disjunction |

use serde_json::Value;

/// Predicate over an invocation's call arguments.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ScopeDescriptor {
    #[default]
    Any,
    Has(String),
    Missing(String),
    Equals(String, Value),
    NotEquals(String, Value),
    All(Vec<ScopeDescriptor>),
    AnyOf(Vec<ScopeDescriptor>),
}

impl ScopeDescriptor {
    pub fn has(key: impl Into<String>) -> Self {
        ScopeDescriptor::Has(key.into())
    }

    pub fn missing(key: impl Into<String>) -> Self {
        ScopeDescriptor::Missing(key.into())
    }

    pub fn equals(key: impl Into<String>, value: impl Into<Value>) -> Self {
        ScopeDescriptor::Equals(key.into(), value.into())
    }

    pub fn not_equals(key: impl Into<String>, value: impl Into<Value>) -> Self {
        ScopeDescriptor::NotEquals(key.into(), value.into())
    }

    /// Conjunction, flattening nested `All`s.
    pub fn and(self, other: ScopeDescriptor) -> Self {
        match (self, other) {
            (ScopeDescriptor::Any, other) | (other, ScopeDescriptor::Any) => other,
            (ScopeDescriptor::All(mut left), ScopeDescriptor::All(right)) => {
                left.extend(right);
                ScopeDescriptor::All(left)
            }
            (ScopeDescriptor::All(mut left), other) => {
                left.push(other);
                ScopeDescriptor::All(left)
            }
            (this, other) => ScopeDescriptor::All(vec![this, other]),
        }
    }

    pub fn matches(&self, args: &Value) -> bool {
        match self {
            ScopeDescriptor::Any => true,
            ScopeDescriptor::Has(key) => present(args, key).is_some(),
            ScopeDescriptor::Missing(key) => present(args, key).is_none(),
            ScopeDescriptor::Equals(key, expected) => {
                present(args, key).is_some_and(|actual| loosely_equal(actual, expected))
            }
            ScopeDescriptor::NotEquals(key, expected) => {
                !present(args, key).is_some_and(|actual| loosely_equal(actual, expected))
            }
            ScopeDescriptor::All(parts) => parts.iter().all(|p| p.matches(args)),
            ScopeDescriptor::AnyOf(parts) => parts.iter().any(|p| p.matches(args)),
        }
    }
}

fn present<'a>(args: &'a Value, key: &str) -> Option<&'a Value> {
    args.get(key).filter(|v| !v.is_null())
}

fn loosely_equal(actual: &Value, expected: &Value) -> bool {
    if actual == expected {
        return true;
    }
    match (scalar_text(actual), scalar_text(expected)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_owned()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
