//! Transport adapter over `reqwest` with a fixed per-attempt timeout and
//! bounded retries on connection timeouts.

use anyhow::{Context, Result};
use log::debug;
use reqwest::{Client, RequestBuilder, Response, redirect};
use std::time::Duration;

use super::retry::{RetryPolicy, with_retry};
use crate::api::Endpoint;

/// Hard timeout applied to every attempt.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(4);

/// Executes [`Endpoint`] requests against a fixed base URL.
///
/// Two underlying clients are kept: the default one, and one that never
/// follows redirects, for endpoints that must observe the first response of a
/// redirect chain. Every retry builds a fresh request, so each attempt is a
/// new network attempt with an unmodified body.
#[derive(Debug)]
pub struct Transport {
    client: Client,
    direct_client: Client,
    base_url: String,
    policy: RetryPolicy,
}

impl Transport {
    pub fn new(base_url: impl Into<String>, policy: RetryPolicy) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        let direct_client = Client::builder()
            .redirect(redirect::Policy::none())
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            direct_client,
            base_url: base_url.into(),
            policy,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends the endpoint's request, retrying per the configured policy.
    ///
    /// Any delivered response is returned as-is, whatever its status; only
    /// failures to deliver (connect errors, attempt timeouts) are retried.
    /// On exhaustion the last transport error propagates unmodified.
    #[tracing::instrument(skip(self, endpoint, bearer), fields(operation = endpoint.name))]
    pub async fn send(&self, endpoint: &Endpoint, bearer: Option<&str>) -> Result<Response> {
        let url = format!("{}{}", self.base_url, endpoint.path);

        debug!("{} {}", endpoint.method, endpoint.path);

        with_retry(&self.policy, endpoint.name, || {
            let request = self.build_request(&url, endpoint, bearer);
            async move {
                let response = request.send().await.context("Failed to send request")?;
                Ok(response)
            }
        })
        .await
    }

    fn build_request(&self, url: &str, endpoint: &Endpoint, bearer: Option<&str>) -> RequestBuilder {
        let client = if endpoint.follow_redirects {
            &self.client
        } else {
            &self.direct_client
        };

        let mut request = client
            .request(endpoint.method.clone(), url)
            .timeout(REQUEST_TIMEOUT);

        if !endpoint.query.is_empty() {
            request = request.query(&endpoint.query);
        }
        if let Some(body) = &endpoint.body {
            request = request.json(body);
        }
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }

        request
    }
}
