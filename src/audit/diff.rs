//! Field-level diff summaries for audit entries

use serde_json::Value;

/// Summarize top-level field changes between two JSON objects
///
/// Returns `None` when nothing changed. Fields are reported in key order.
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    let changes: Vec<String> = match (before, after) {
        (Value::Object(b), Value::Object(a)) => {
            let mut keys: Vec<&String> = b.keys().chain(a.keys()).collect();
            keys.sort();
            keys.dedup();

            keys.into_iter()
                .filter_map(|key| match (b.get(key), a.get(key)) {
                    (Some(old), Some(new)) if old != new => Some(format!(
                        "{}: {} -> {}",
                        key,
                        format_value(old),
                        format_value(new)
                    )),
                    (Some(old), None) => {
                        Some(format!("{}: {} -> (removed)", key, format_value(old)))
                    }
                    (None, Some(new)) => Some(format!("{}: (added) -> {}", key, format_value(new))),
                    _ => None,
                })
                .collect()
        }
        _ if before != after => vec![format!(
            "{} -> {}",
            format_value(before),
            format_value(after)
        )],
        _ => Vec::new(),
    };

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) if s.chars().count() > 50 => {
            let head: String = s.chars().take(47).collect();
            format!("\"{}...\"", head)
        }
        Value::String(s) => format!("\"{}\"", s),
        Value::Array(items) => format!("[{} items]", items.len()),
        Value::Object(fields) => format!("{{{} fields}}", fields.len()),
        other => other.to_string(),
    }
}
