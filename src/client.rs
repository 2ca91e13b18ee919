//! The PayU client: authorization bootstrap and the API operation catalog.

use anyhow::{Context, Result};
use log::debug;
use serde::Deserialize;
use serde_json::Value;

use crate::api::{Endpoint, into_json};
use crate::http::{RetryPolicy, Transport};

/// PayU environment, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Sandbox,
    Production,
}

impl Environment {
    pub fn base_url(&self) -> &'static str {
        match self {
            Environment::Sandbox => "https://secure.snd.payu.com",
            Environment::Production => "https://secure.payu.com",
        }
    }
}

#[derive(Deserialize)]
struct AuthResponse {
    access_token: String,
}

/// Client for the PayU REST API.
///
/// Construction performs the OAuth client-credentials exchange; the value
/// only exists once a bearer token has been obtained, and that token never
/// changes for the client's lifetime. All fields are immutable after
/// construction, so one instance may be shared across tasks freely. The
/// concurrency guarantees are exactly those of the underlying
/// `reqwest::Client`; no extra locking is added on top.
///
/// Operations return the parsed JSON body. Non-success responses raise a
/// [`PayuError`](crate::api::PayuError); transport failures (e.g. a connection timeout that survived
/// the retry budget) propagate as the underlying `reqwest::Error`. Both are
/// reachable through `anyhow::Error::downcast_ref`.
#[derive(Debug)]
pub struct PayuClient {
    transport: Transport,
    token: String,
}

impl PayuClient {
    /// Authorizes against the given environment with the default retry
    /// policy and returns a ready client.
    #[tracing::instrument(skip(client_id, client_secret))]
    pub async fn new(
        client_id: &str,
        client_secret: &str,
        environment: Environment,
    ) -> Result<Self> {
        Self::connect(
            client_id,
            client_secret,
            environment.base_url(),
            RetryPolicy::default(),
        )
        .await
    }

    /// Authorizes against an explicit base URL with an explicit retry
    /// policy. The authorization call itself runs through the same transport
    /// and response pipeline as every other operation, so a rejected
    /// credential surfaces as a [`PayuError`](crate::api::PayuError).
    #[tracing::instrument(skip_all, fields(base_url))]
    pub async fn connect(
        client_id: &str,
        client_secret: &str,
        base_url: &str,
        policy: RetryPolicy,
    ) -> Result<Self> {
        let transport = Transport::new(base_url, policy)?;

        debug!("Authorizing against {}...", transport.base_url());

        let response = transport
            .send(&Endpoint::authorize(client_id, client_secret), None)
            .await?;
        let body = into_json(response).await?;
        let auth: AuthResponse = serde_json::from_value(body)
            .context("Authorization response did not contain an access token")?;

        Ok(Self {
            transport,
            token: auth.access_token,
        })
    }

    /// `GET /api/v2_1/paymethods`: payment methods available to the shop.
    #[tracing::instrument(skip(self))]
    pub async fn pay_methods(&self) -> Result<Value> {
        self.execute(Endpoint::pay_methods()).await
    }

    /// `GET /api/v2_1/orders/{order_id}`: current order details.
    #[tracing::instrument(skip(self))]
    pub async fn order_status(&self, order_id: &str) -> Result<Value> {
        self.execute(Endpoint::order_status(order_id)).await
    }

    /// `POST /api/v2_1/orders`: create an order.
    ///
    /// The gateway answers order creation with a redirect to the payment
    /// page; the client does not follow it, so the returned JSON is the
    /// gateway's own response (redirect URI included).
    #[tracing::instrument(skip(self, order))]
    pub async fn create_order(&self, order: Value) -> Result<Value> {
        self.execute(Endpoint::create_order(order)).await
    }

    /// `DELETE /api/v2_1/orders/{order_id}`: cancel an order.
    #[tracing::instrument(skip(self))]
    pub async fn order_cancel(&self, order_id: &str) -> Result<Value> {
        self.execute(Endpoint::order_cancel(order_id)).await
    }

    /// `POST /api/v2_1/orders/{order_id}/refunds`: refund the full order
    /// amount. `refund` overrides the default body verbatim when supplied.
    #[tracing::instrument(skip(self, refund))]
    pub async fn order_full_refund(&self, order_id: &str, refund: Option<Value>) -> Result<Value> {
        self.execute(Endpoint::order_full_refund(order_id, refund))
            .await
    }

    /// `POST /api/v2_1/orders/{order_id}/refunds`: refund with a
    /// caller-supplied body, e.g. a partial amount.
    #[tracing::instrument(skip(self, refund))]
    pub async fn order_refund(&self, order_id: &str, refund: Value) -> Result<Value> {
        self.execute(Endpoint::order_refund(order_id, refund)).await
    }

    /// `GET /api/v2_1/orders/{order_id}/transactions`: transactions
    /// recorded for an order.
    #[tracing::instrument(skip(self))]
    pub async fn get_transactions(&self, order_id: &str) -> Result<Value> {
        self.execute(Endpoint::get_transactions(order_id)).await
    }

    /// `PUT /api/v2_1/orders/{order_id}/status`: confirm (complete) an
    /// order. `status` overrides the default body verbatim when supplied.
    #[tracing::instrument(skip(self, status))]
    pub async fn order_confirm(&self, order_id: &str, status: Option<Value>) -> Result<Value> {
        self.execute(Endpoint::order_confirm(order_id, status))
            .await
    }

    async fn execute(&self, endpoint: Endpoint) -> Result<Value> {
        let response = self.transport.send(&endpoint, Some(&self.token)).await?;
        into_json(response).await
    }
}
