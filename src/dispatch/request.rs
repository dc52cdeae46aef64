//! Request construction from integration config and visitor data.

use log::{debug, warn};

use crate::mapping::{render_template, resolve_request_tokens};
use crate::models::{Integration, VisitorProfile};

/// One concrete HTTP request, ready for dispatch.
///
/// Everything the executor needs, plus the snapshots the call log stores.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    /// Integration this request was built for.
    pub integration_id: i64,
    /// Vendor name, for logs.
    pub integration_name: String,
    /// HTTP method from the production environment.
    pub method: String,
    /// Target URL with tokens substituted.
    pub url: String,
    /// Rendered header set.
    pub headers: Vec<(String, String)>,
    /// Rendered request body.
    pub body: String,
}

/// Builds the outbound request for one integration.
///
/// Resolves every configured token against the visitor profile, then
/// renders the production environment's body template, header values, and
/// URL. Returns `None` when the integration has no single production
/// environment: such integrations are skipped, not failed.
pub fn prepare_request(
    integration: &Integration,
    profile: &VisitorProfile,
) -> Option<PreparedRequest> {
    let Some(environment) = integration.production_environment() else {
        debug!(
            "Skipping integration {} ({}): no single production environment",
            integration.id, integration.name
        );
        return None;
    };

    let tokens = resolve_request_tokens(&integration.request_mapping, profile);

    let url = render_template(&environment.url, &tokens);
    if let Err(e) = url::Url::parse(&url) {
        warn!(
            "Skipping integration {} ({}): invalid production URL {url:?}: {e}",
            integration.id, integration.name
        );
        return None;
    }

    let headers = environment
        .headers
        .iter()
        .map(|(name, value)| (name.clone(), render_template(value, &tokens)))
        .collect();

    Some(PreparedRequest {
        integration_id: integration.id,
        integration_name: integration.name.clone(),
        method: environment.method.clone(),
        url,
        headers,
        body: render_template(&environment.body_template, &tokens),
    })
}
