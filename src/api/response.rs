//! Response pipeline: status normalization, then JSON parsing.
//!
//! The gateway reports failures in several shapes (OAuth-style
//! `error`/`error_description`, REST-style nested `status`, or no JSON at
//! all); every one of them collapses into a single [`PayuError`].

use anyhow::{Context, Result};
use reqwest::{Response, StatusCode, Url};
use serde_json::Value;

use super::error::PayuError;

/// Reads the response body once, raises a [`PayuError`] for non-success
/// statuses, and parses the success body as JSON.
pub async fn into_json(response: Response) -> Result<Value> {
    let url = response.url().clone();
    let status = response.status();
    let bytes = response
        .bytes()
        .await
        .context("Failed to read response body")?;

    check_status(&url, status, &bytes)?;

    let value = serde_json::from_slice(&bytes)
        .with_context(|| format!("Failed to parse JSON response from {url}"))?;
    Ok(value)
}

/// Classifies a response: statuses in [200, 400) pass, everything else is
/// normalized into a [`PayuError`] carrying the raw body when it parsed.
pub fn check_status(url: &Url, status: StatusCode, body: &[u8]) -> Result<(), PayuError> {
    if (200..400).contains(&status.as_u16()) {
        return Ok(());
    }

    let Ok(data) = serde_json::from_slice::<Value>(body) else {
        return Err(PayuError::new(format!("{url} - RESPONSE FORMAT"), None));
    };

    if let (Some(error), Some(description)) = (data.get("error"), data.get("error_description")) {
        let message = format!("{url} - {}: {}", json_text(error), json_text(description));
        return Err(PayuError::new(message, Some(data)));
    }

    if let Some(order_status) = data.get("status") {
        if let (Some(code), Some(desc)) = (
            order_status.get("statusCode"),
            order_status.get("statusDesc"),
        ) {
            let message = format!("{url} - {}: {}", json_text(code), json_text(desc));
            return Err(PayuError::new(message, Some(data)));
        }
    }

    Err(PayuError::new(
        format!("{url} - UNKNOWN ERROR"),
        Some(data),
    ))
}

/// Strings render bare, everything else in its serialized form.
fn json_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
