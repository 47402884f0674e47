//! crates/logging-sink/src/format.rs
//! Printf-style placeholder substitution over structured argument values.

use serde_json::Value;

/// Substitutes placeholders in `template` with the given arguments.
///
/// Recognized placeholders: `%s` renders the argument as display text, `%d`
/// renders numbers (anything else becomes `NaN`), `%j` renders compact JSON,
/// and `%%` is a literal percent sign. Placeholders beyond the argument list
/// are left in place; surplus arguments are appended space-separated after
/// the message.
///
/// Mismatched placeholder/argument types are not an error; the argument is
/// rendered under the placeholder's rules as-is.
#[must_use]
pub fn substitute(template: &str, args: &[Value]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut remaining = args.iter();
    let mut chars = template.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '%' {
            out.push(ch);
            continue;
        }
        match chars.peek().copied() {
            Some('%') => {
                chars.next();
                out.push('%');
            }
            Some(spec @ ('s' | 'd' | 'j')) => {
                if let Some(arg) = remaining.next() {
                    chars.next();
                    out.push_str(&render_spec(spec, arg));
                } else {
                    out.push('%');
                }
            }
            _ => out.push('%'),
        }
    }

    for arg in remaining {
        out.push(' ');
        out.push_str(&display_value(arg));
    }

    out
}

/// Renders a value the way it should appear inside a log line: strings
/// verbatim, everything else as compact JSON.
#[must_use]
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn render_spec(spec: char, value: &Value) -> String {
    match spec {
        's' => display_value(value),
        'd' => match value {
            Value::Number(number) => number.to_string(),
            _ => String::from("NaN"),
        },
        _ => value.to_string(),
    }
}
