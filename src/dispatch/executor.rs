//! Concurrent vendor call execution.

use std::time::Duration;

use futures::stream::FuturesUnordered;
use futures::StreamExt;
use log::{debug, warn};
use reqwest::Method;

use crate::error_handling::{
    categorize_reqwest_error, categorize_status, DispatchStats, VendorErrorType,
};
use crate::utils::sanitize_and_truncate_error_message;

use super::request::PreparedRequest;

/// Outcome classification for one vendor call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallStatus {
    /// Vendor responded with a 2xx status.
    Success,
    /// Vendor responded with a non-2xx status (body still captured).
    HttpError,
    /// The call exceeded the per-call timeout and was abandoned.
    Timeout,
    /// The call failed below HTTP (connect, request build, body read).
    TransportError,
}

impl CallStatus {
    /// Stable string form stored in the call log's status column.
    pub fn as_str(&self) -> &'static str {
        match self {
            CallStatus::Success => "success",
            CallStatus::HttpError => "http_error",
            CallStatus::Timeout => "timeout",
            CallStatus::TransportError => "transport_error",
        }
    }
}

/// The resolved result of one vendor call: either a response snapshot or a
/// distinguishable failure, plus wall-clock duration. Returned by value
/// from each call task and collected at the join: tasks never write into
/// shared state.
#[derive(Debug)]
pub struct CallOutcome {
    /// The request that was dispatched (kept for the call log snapshot).
    pub request: PreparedRequest,
    /// Outcome classification.
    pub status: CallStatus,
    /// HTTP status code, when a response line was received.
    pub http_status: Option<u16>,
    /// Response headers, when a response was received.
    pub response_headers: Vec<(String, String)>,
    /// Response body, when one was read to completion.
    pub response_body: Option<String>,
    /// Wall-clock duration from dispatch to final byte (or abandonment).
    pub duration: Duration,
    /// Failure detail for unsuccessful calls.
    pub error: Option<String>,
}

impl CallOutcome {
    /// True when the vendor responded 2xx.
    pub fn is_success(&self) -> bool {
        self.status == CallStatus::Success
    }
}

/// Dispatches every prepared request concurrently and waits for all of
/// them.
///
/// All requests are issued without waiting on one another; the call
/// suspends until every request has completed or been abandoned by its own
/// timeout. One request's failure never aborts its siblings. Outcomes are
/// returned in completion order: callers needing integration order key off
/// `integration_id`.
pub async fn dispatch_all(
    client: &reqwest::Client,
    requests: Vec<PreparedRequest>,
    call_timeout: Duration,
    stats: &DispatchStats,
) -> Vec<CallOutcome> {
    let mut calls: FuturesUnordered<_> = requests
        .into_iter()
        .map(|request| execute_call(client, request, call_timeout, stats))
        .collect();

    let mut outcomes = Vec::with_capacity(calls.len());
    while let Some(outcome) = calls.next().await {
        match outcome.status {
            CallStatus::Success => debug!(
                "Vendor {} responded {} in {}ms",
                outcome.request.integration_name,
                outcome.http_status.unwrap_or(0),
                outcome.duration.as_millis()
            ),
            _ => warn!(
                "Vendor {} call failed ({}): {}",
                outcome.request.integration_name,
                outcome.status.as_str(),
                outcome.error.as_deref().unwrap_or("no detail")
            ),
        }
        outcomes.push(outcome);
    }
    outcomes
}

/// Executes one vendor call with its own timeout and classifies the result.
async fn execute_call(
    client: &reqwest::Client,
    request: PreparedRequest,
    call_timeout: Duration,
    stats: &DispatchStats,
) -> CallOutcome {
    let method = match Method::from_bytes(request.method.as_bytes()) {
        Ok(method) => method,
        Err(_) => {
            stats.increment(VendorErrorType::RequestBuildError);
            let error = format!("Unsupported HTTP method: {}", request.method);
            return CallOutcome {
                request,
                status: CallStatus::TransportError,
                http_status: None,
                response_headers: Vec::new(),
                response_body: None,
                duration: Duration::ZERO,
                error: Some(error),
            };
        }
    };

    let started = std::time::Instant::now();
    match tokio::time::timeout(call_timeout, send_request(client, method, &request)).await {
        Ok(Ok((http_status, response_headers, response_body))) => {
            // Duration covers dispatch through the final body byte
            let duration = started.elapsed();
            if (200..300).contains(&http_status) {
                CallOutcome {
                    request,
                    status: CallStatus::Success,
                    http_status: Some(http_status),
                    response_headers,
                    response_body: Some(response_body),
                    duration,
                    error: None,
                }
            } else {
                stats.increment(categorize_status(http_status));
                let error = format!("Vendor returned HTTP {http_status}");
                CallOutcome {
                    request,
                    status: CallStatus::HttpError,
                    http_status: Some(http_status),
                    response_headers,
                    response_body: Some(response_body),
                    duration,
                    error: Some(error),
                }
            }
        }
        Ok(Err(e)) => {
            let duration = started.elapsed();
            let category = categorize_reqwest_error(&e);
            stats.increment(category);
            let status = if category == VendorErrorType::CallTimeout {
                CallStatus::Timeout
            } else {
                CallStatus::TransportError
            };
            CallOutcome {
                request,
                status,
                http_status: e.status().map(|s| s.as_u16()),
                response_headers: Vec::new(),
                response_body: None,
                duration,
                error: Some(sanitize_and_truncate_error_message(&e.to_string())),
            }
        }
        Err(_elapsed) => {
            stats.increment(VendorErrorType::CallTimeout);
            let error = format!(
                "Vendor call timeout after {} seconds",
                call_timeout.as_secs_f64()
            );
            CallOutcome {
                request,
                status: CallStatus::Timeout,
                http_status: None,
                response_headers: Vec::new(),
                response_body: None,
                duration: started.elapsed(),
                error: Some(error),
            }
        }
    }
}

/// Sends one request and reads the response to completion.
///
/// Headers are captured before the body read so an aborted body still
/// leaves something for diagnosis in the error path's message.
async fn send_request(
    client: &reqwest::Client,
    method: Method,
    request: &PreparedRequest,
) -> Result<(u16, Vec<(String, String)>, String), reqwest::Error> {
    let mut builder = client.request(method, request.url.as_str());
    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    if !request.body.is_empty() {
        builder = builder.body(request.body.clone());
    }

    let response = builder.send().await?;
    let http_status = response.status().as_u16();
    let headers: Vec<(String, String)> = response
        .headers()
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_str().unwrap_or("").to_string()))
        .collect();
    let body = response.text().await?;
    Ok((http_status, headers, body))
}
