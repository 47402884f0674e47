//! crates/logging/src/redact.rs
//! Literal-match redaction of sensitive log arguments.

use serde_json::Value;

/// Placeholder substituted for redacted content.
pub const REDACTED: &str = "[REDACTED]";

/// Literal key and value rules applied to every outgoing argument.
///
/// A string argument equal to a configured value becomes [`REDACTED`]; inside
/// keyed structures, the value under any configured key becomes [`REDACTED`],
/// recursively through nested objects and arrays. The rule set is fixed per
/// logger instance and empty by default — a seam callers fill with the
/// secrets their process handles.
///
/// Sanitisation never touches the message template, only the arguments.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RedactionRules {
    keys: Vec<String>,
    values: Vec<String>,
}

impl RedactionRules {
    /// Creates a rule set from literal key names and literal values.
    pub fn new<K, V>(keys: K, values: V) -> Self
    where
        K: IntoIterator<Item = String>,
        V: IntoIterator<Item = String>,
    {
        Self {
            keys: keys.into_iter().collect(),
            values: values.into_iter().collect(),
        }
    }

    /// Reports whether the rule set contains no rules at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty() && self.values.is_empty()
    }

    /// Returns sanitized copies of the given arguments.
    ///
    /// Each argument is sanitized independently, so the result does not
    /// depend on argument order, and sanitizing already-sanitized output is
    /// a no-op.
    #[must_use]
    pub fn sanitize(&self, args: &[Value]) -> Vec<Value> {
        if self.is_empty() {
            return args.to_vec();
        }
        args.iter()
            .map(|arg| {
                let mut sanitized = arg.clone();
                self.apply(&mut sanitized);
                sanitized
            })
            .collect()
    }

    fn apply(&self, value: &mut Value) {
        match value {
            Value::String(text) => {
                if self.values.iter().any(|candidate| candidate == text) {
                    *text = REDACTED.to_string();
                }
            }
            Value::Object(map) => {
                for (key, entry) in map.iter_mut() {
                    if self.keys.iter().any(|candidate| candidate == key) {
                        *entry = Value::String(REDACTED.to_string());
                    } else {
                        self.apply(entry);
                    }
                }
            }
            Value::Array(items) => {
                for item in items.iter_mut() {
                    self.apply(item);
                }
            }
            _ => {}
        }
    }
}
