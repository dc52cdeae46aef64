//! Domain types for vendor integrations and visitor profiles.
//!
//! An [`Integration`] is pure data: endpoint environments, a token mapping
//! config for building requests, and a parser config for reading responses.
//! Vendor behavior varies entirely by this stored configuration: there are
//! no per-vendor code paths anywhere in the engine.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Environment name consumed by the engine. Integrations may carry other
/// environments (staging, sandbox); only this one is dispatched.
pub const PRODUCTION_ENVIRONMENT: &str = "production";

/// One target endpoint of a vendor integration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Environment {
    /// Environment name (e.g., "production", "staging").
    pub name: String,
    /// Target URL for vendor calls.
    pub url: String,
    /// HTTP method (defaults to POST, the common case for offer vendors).
    #[serde(default = "default_method")]
    pub method: String,
    /// Header set sent with every call. Values may contain `{token}`
    /// placeholders and are rendered like the body template.
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    /// Request body template containing `{token}` placeholders.
    #[serde(default)]
    pub body_template: String,
}

fn default_method() -> String {
    "POST".to_string()
}

/// Per-token mapping entry of a [`RequestMappingConfig`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenMapping {
    /// Value used when the visitor profile has no field for the token.
    #[serde(default)]
    pub default_value: Option<String>,
    /// Exact-match lookup table overriding the resolved value before
    /// substitution (e.g., mapping internal state codes to vendor codes).
    #[serde(default)]
    pub value_mapping: BTreeMap<String, String>,
}

/// Mapping from token name to its resolution rules.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestMappingConfig {
    /// Token name → resolution rules.
    pub tokens: BTreeMap<String, TokenMapping>,
}

/// Declarative response extraction rules for one vendor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseParserConfig {
    /// Path expression locating the array of offers inside the vendor's
    /// JSON body (e.g., "data.items").
    pub offer_list_path: String,
    /// Output-field name → path expression evaluated against each offer
    /// element.
    #[serde(default)]
    pub mapping: BTreeMap<String, String>,
}

/// One vendor's configuration: endpoints, request mapping, parsing rules.
///
/// Loaded as a read-only snapshot for the duration of one aggregation run.
#[derive(Debug, Clone)]
pub struct Integration {
    /// Integration row id.
    pub id: i64,
    /// Human-readable vendor name (for logs and alerts).
    pub name: String,
    /// Inactive integrations are never loaded by the config store.
    pub active: bool,
    /// All configured environments for this vendor.
    pub environments: Vec<Environment>,
    /// Token resolution rules for request construction.
    pub request_mapping: RequestMappingConfig,
    /// Extraction rules for the vendor's response.
    pub response_parser: ResponseParserConfig,
}

impl Integration {
    /// Returns the single environment named "production", or `None` when the
    /// integration has zero or more than one: such integrations are skipped
    /// by the engine rather than treated as errors.
    pub fn production_environment(&self) -> Option<&Environment> {
        let mut production = self
            .environments
            .iter()
            .filter(|env| env.name == PRODUCTION_ENVIRONMENT);
        match (production.next(), production.next()) {
            (Some(env), None) => Some(env),
            _ => None,
        }
    }
}

/// A visitor's stored field data, keyed by an opaque fingerprint.
#[derive(Debug, Clone)]
pub struct VisitorProfile {
    /// Opaque identifier correlating the visitor to this profile.
    pub fingerprint: String,
    /// Field name → value. Values may be scalars or composites; composites
    /// are serialized to JSON text when substituted into templates.
    pub fields: serde_json::Map<String, Value>,
}

/// Normalized output unit produced by parsing one vendor response element.
///
/// A flat mapping of output-field name → extracted value with no fixed
/// schema beyond what the [`ResponseParserConfig`] declares. Transient:
/// returned to the caller, never persisted.
pub type OfferRecord = serde_json::Map<String, Value>;
