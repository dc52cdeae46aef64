//! Token value resolution against a visitor profile.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::models::{RequestMappingConfig, TokenMapping, VisitorProfile};

/// Resolves one token to the string substituted into templates.
///
/// Resolution order:
/// 1. Look the token up in the profile; an absent field (or JSON `null`)
///    falls back to the mapping's `default_value`, or the empty string.
/// 2. Stringify: scalars render bare (no surrounding quotes), composites
///    (arrays/objects) serialize to compact JSON text.
/// 3. If `value_mapping` contains the stringified value as an exact key,
///    replace it with the mapped value.
///
/// Always resolves to *some* string: missing tokens are not an error.
pub fn resolve_token_value(
    token: &str,
    profile: &VisitorProfile,
    mapping: &TokenMapping,
) -> String {
    let resolved = match profile.fields.get(token) {
        Some(Value::Null) | None => mapping.default_value.clone().unwrap_or_default(),
        Some(value) => stringify_field(value),
    };

    match mapping.value_mapping.get(&resolved) {
        Some(mapped) => mapped.clone(),
        None => resolved,
    }
}

/// Resolves every token in a mapping config, producing the substitution map
/// consumed by [`render_template`](super::render_template).
pub fn resolve_request_tokens(
    config: &RequestMappingConfig,
    profile: &VisitorProfile,
) -> BTreeMap<String, String> {
    config
        .tokens
        .iter()
        .map(|(token, mapping)| {
            (
                token.clone(),
                resolve_token_value(token, profile, mapping),
            )
        })
        .collect()
}

/// Renders a profile field value as substitution text.
///
/// Strings pass through unquoted; numbers and booleans use their canonical
/// text form; arrays and objects serialize to compact JSON.
fn stringify_field(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(_) | Value::Object(_) => {
            serde_json::to_string(value).unwrap_or_default()
        }
        other => other.to_string(),
    }
}
