//! Agent-route body transformations
//!
//! The agent backend expects and returns a slightly different JSON shape
//! than the gateway's callers use, so the gateway adapts the schema in
//! both directions. Documents that are missing the relevant structure
//! pass through untouched; these transforms fill gaps, never reject.

use serde_json::{json, Value};

/// Walk a chain of object keys, returning the value at the end of the
/// path if every step exists.
fn descend_mut<'a>(value: &'a mut Value, path: &[&str]) -> Option<&'a mut Value> {
    path.iter().try_fold(value, |node, key| node.get_mut(*key))
}

/// Pre-forward adjustment of an agent request body.
///
/// If the document carries a `data.context` object, `messages` is
/// defaulted to an empty list (a present value is never overwritten) and
/// `system.dialog_turn_counter` is normalized to an integer. A missing
/// `system` object is created with the counter at 0.
pub fn prepare_agent_request(doc: &mut Value) {
    let Some(context) = descend_mut(doc, &["data", "context"]).and_then(Value::as_object_mut)
    else {
        return;
    };

    context
        .entry("messages")
        .or_insert_with(|| Value::Array(Vec::new()));

    match context.get_mut("system") {
        None => {
            context.insert("system".to_string(), json!({ "dialog_turn_counter": 0 }));
        }
        Some(system) => {
            if let Some(counter) = system.get_mut("dialog_turn_counter") {
                if let Some(normalized) = coerce_to_integer(counter) {
                    *counter = Value::from(normalized);
                }
            }
        }
    }
}

/// Post-receive adjustment of an agent response body.
///
/// `data.output.text` arrives from the backend as a list of lines;
/// callers expect a single newline-joined string. A value of any other
/// shape is left as-is.
pub fn flatten_agent_response(doc: &mut Value) {
    let Some(text) = descend_mut(doc, &["data", "output", "text"]) else {
        return;
    };

    if let Some(joined) = join_string_lines(text) {
        *text = Value::String(joined);
    }
}

/// Interpret a JSON value as an integer where possible. Integers pass
/// through, numeric strings parse; anything else is rejected.
fn coerce_to_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Join a list value into one string, provided every element is a string.
fn join_string_lines(value: &Value) -> Option<String> {
    let items = value.as_array()?;
    let lines: Option<Vec<&str>> = items.iter().map(Value::as_str).collect();
    lines.map(|lines| lines.join("\n"))
}
