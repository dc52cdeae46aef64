//! Template rendering with `{token}` substitution.

use std::collections::BTreeMap;

/// Renders a template by replacing every `{token}` occurrence with its
/// resolved value.
///
/// Tokens present in the template but absent from `values` are left
/// unreplaced and pass through literally: an explicit tolerance policy so
/// that a vendor template referencing an unconfigured token degrades to
/// sending the placeholder rather than failing the integration. An empty
/// template yields an empty string.
pub fn render_template(template: &str, values: &BTreeMap<String, String>) -> String {
    if template.is_empty() {
        return String::new();
    }

    let mut rendered = template.to_string();
    for (token, value) in values {
        let placeholder = format!("{{{token}}}");
        if rendered.contains(&placeholder) {
            rendered = rendered.replace(&placeholder, value);
        }
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_substitutes_every_occurrence() {
        let rendered = render_template(
            "{fp}/{fp}?email={email}",
            &values(&[("fp", "abc123"), ("email", "v@example.com")]),
        );
        assert_eq!(rendered, "abc123/abc123?email=v@example.com");
    }

    #[test]
    fn test_empty_template_yields_empty_output() {
        assert_eq!(render_template("", &values(&[("fp", "abc")])), "");
    }

    #[test]
    fn test_render_with_no_tokens_is_identity() {
        // render(T, ∅) = T for any template.
        let template = r#"{"amount":"{payout}","static":true}"#;
        assert_eq!(render_template(template, &BTreeMap::new()), template);
    }

    #[test]
    fn test_unknown_tokens_pass_through_literally() {
        let rendered = render_template(
            "{known} and {unknown}",
            &values(&[("known", "yes")]),
        );
        assert_eq!(rendered, "yes and {unknown}");
    }

    #[test]
    fn test_json_body_template_with_default() {
        // Concrete scenario: profile has no payout field, default "0".
        let rendered = render_template(
            r#"{"amount":"{payout}"}"#,
            &values(&[("payout", "0")]),
        );
        assert_eq!(rendered, r#"{"amount":"0"}"#);
    }

    #[test]
    fn test_empty_value_substitutes_empty_string() {
        let rendered = render_template("x={gone}!", &values(&[("gone", "")]));
        assert_eq!(rendered, "x=!");
    }
}
