//! Offer record extraction from parsed vendor responses.

use serde_json::Value;

use crate::extract::resolve_path;
use crate::models::{OfferRecord, ResponseParserConfig};

/// Extracts the ordered list of offer records from a parsed response body.
///
/// Resolves `offer_list_path` against the body; anything other than an
/// array (wrong kind, missing path) yields an empty list: vendors
/// returning malformed shapes must not crash the pipeline. For each array
/// element, one record is built by evaluating every mapping path against
/// that element; missing paths resolve to JSON `null` rather than raising.
/// Output order matches element order at `offer_list_path`.
pub fn extract_offers(body: &Value, config: &ResponseParserConfig) -> Vec<OfferRecord> {
    let Some(Value::Array(elements)) = resolve_path(body, &config.offer_list_path) else {
        return Vec::new();
    };

    elements
        .iter()
        .map(|element| {
            config
                .mapping
                .iter()
                .map(|(field, path)| {
                    let value = resolve_path(element, path)
                        .cloned()
                        .unwrap_or(Value::Null);
                    (field.clone(), value)
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parser(list_path: &str, mapping: &[(&str, &str)]) -> ResponseParserConfig {
        ResponseParserConfig {
            offer_list_path: list_path.to_string(),
            mapping: mapping
                .iter()
                .map(|(field, path)| (field.to_string(), path.to_string()))
                .collect(),
        }
    }

    #[test]
    fn test_extracts_mapped_fields_in_element_order() {
        // Concrete scenario: {"data":{"items":[{"t":"Offer1","u":"http://x"}]}}
        let body = json!({"data": {"items": [
            {"t": "Offer1", "u": "http://x"},
            {"t": "Offer2", "u": "http://y"}
        ]}});
        let config = parser("data.items", &[("title", "t"), ("url", "u")]);

        let offers = extract_offers(&body, &config);

        assert_eq!(offers.len(), 2);
        assert_eq!(offers[0]["title"], json!("Offer1"));
        assert_eq!(offers[0]["url"], json!("http://x"));
        assert_eq!(offers[1]["title"], json!("Offer2"));
    }

    #[test]
    fn test_non_array_list_path_yields_empty_list() {
        let config = parser("data.items", &[("title", "t")]);

        let object_at_path = json!({"data": {"items": {"t": "not-a-list"}}});
        assert!(extract_offers(&object_at_path, &config).is_empty());

        let scalar_at_path = json!({"data": {"items": 42}});
        assert!(extract_offers(&scalar_at_path, &config).is_empty());
    }

    #[test]
    fn test_missing_list_path_yields_empty_list() {
        let body = json!({"data": {}});
        let config = parser("data.items", &[("title", "t")]);
        assert!(extract_offers(&body, &config).is_empty());
    }

    #[test]
    fn test_missing_mapping_path_resolves_to_null() {
        let body = json!({"offers": [{"t": "Offer1"}]});
        let config = parser("offers", &[("title", "t"), ("payout", "price.amount")]);

        let offers = extract_offers(&body, &config);

        assert_eq!(offers.len(), 1);
        assert_eq!(offers[0]["title"], json!("Offer1"));
        assert_eq!(offers[0]["payout"], Value::Null);
    }

    #[test]
    fn test_nested_and_indexed_mapping_paths() {
        let body = json!({"offers": [
            {"meta": {"cta": ["Apply now", "Learn more"]}, "payout": {"usd": 1.25}}
        ]});
        let config = parser("offers", &[("cta", "meta.cta.0"), ("usd", "payout.usd")]);

        let offers = extract_offers(&body, &config);

        assert_eq!(offers[0]["cta"], json!("Apply now"));
        assert_eq!(offers[0]["usd"], json!(1.25));
    }

    #[test]
    fn test_empty_offer_array_yields_empty_list() {
        let body = json!({"offers": []});
        let config = parser("offers", &[("title", "t")]);
        assert!(extract_offers(&body, &config).is_empty());
    }
}
