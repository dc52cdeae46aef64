//! Dotted path expressions over untyped JSON.

use serde_json::Value;

/// Resolves a dotted path expression against a JSON value.
///
/// Segments are separated by `.`; a segment consisting solely of digits
/// indexes into an array (e.g., `data.items.0.price`). An empty path
/// resolves to the root value. Any missing segment, or a segment applied to
/// a value of the wrong kind, resolves to `None`: evaluation never fails.
pub fn resolve_path<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(root);
    }

    let mut current = root;
    for segment in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => {
                let index: usize = segment.parse().ok()?;
                items.get(index)?
            }
            _ => return None,
        };
    }
    Some(current)
}
