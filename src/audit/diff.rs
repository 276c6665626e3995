//! Change summaries for audit entries

use serde_json::{Map, Value};

/// Summarize top-level field changes between two entry snapshots
///
/// Returns `None` when nothing changed.
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    let mut changes = Vec::new();
    collect(before, after, "", false, &mut changes);
    (!changes.is_empty()).then(|| changes.join(", "))
}

/// Field changes, descending into nested objects
///
/// Nested keys are joined with dots, so a plan edit shows up as
/// `allocation.moradia: 600.0 -> 500.0`.
pub fn generate_detailed_diff(before: &Value, after: &Value, prefix: &str) -> Vec<String> {
    let mut changes = Vec::new();
    collect(before, after, prefix, true, &mut changes);
    changes
}

fn collect(before: &Value, after: &Value, prefix: &str, nested: bool, out: &mut Vec<String>) {
    match (before, after) {
        (Value::Object(old), Value::Object(new)) => compare_objects(old, new, prefix, nested, out),
        _ if before != after => out.push(change_line(prefix, before, after)),
        _ => {}
    }
}

fn compare_objects(
    old: &Map<String, Value>,
    new: &Map<String, Value>,
    prefix: &str,
    nested: bool,
    out: &mut Vec<String>,
) {
    for (key, old_val) in old {
        let path = join(prefix, key);
        match new.get(key) {
            None => out.push(format!("{}: {} -> (removed)", path, format_value(old_val))),
            Some(new_val) if old_val == new_val => {}
            Some(new_val) if nested && old_val.is_object() && new_val.is_object() => {
                collect(old_val, new_val, &path, nested, out)
            }
            Some(new_val) => out.push(change_line(&path, old_val, new_val)),
        }
    }

    for (key, new_val) in new.iter().filter(|(key, _)| !old.contains_key(*key)) {
        out.push(format!(
            "{}: (added) -> {}",
            join(prefix, key),
            format_value(new_val)
        ));
    }
}

fn change_line(path: &str, before: &Value, after: &Value) -> String {
    let values = format!("{} -> {}", format_value(before), format_value(after));
    if path.is_empty() {
        values
    } else {
        format!("{}: {}", path, values)
    }
}

fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

/// Short display form of a JSON value
fn format_value(value: &Value) -> String {
    match value {
        // descriptions may hold accented text, so cut on chars
        Value::String(s) if s.chars().count() > 50 => {
            let head: String = s.chars().take(47).collect();
            format!("\"{}...\"", head)
        }
        Value::Array(items) => format!("[{} items]", items.len()),
        Value::Object(fields) => format!("{{{} fields}}", fields.len()),
        other => other.to_string(),
    }
}
