//! Request descriptors for the PayU API.
//!
//! Each operation has one constructor producing a plain descriptor (method,
//! path, query, body) that the transport consumes uniformly.

use reqwest::Method;
use serde_json::{Value, json};

/// A single API request: everything the transport needs to build it.
#[derive(Debug, Clone)]
pub struct Endpoint {
    /// Operation name, used in logs.
    pub name: &'static str,
    pub method: Method,
    pub path: String,
    pub query: Vec<(&'static str, String)>,
    pub body: Option<Value>,
    /// `create_order` must observe the first response of a redirect chain,
    /// so it alone disables redirect following.
    pub follow_redirects: bool,
}

impl Endpoint {
    fn new(name: &'static str, method: Method, path: String) -> Self {
        Self {
            name,
            method,
            path,
            query: Vec::new(),
            body: None,
            follow_redirects: true,
        }
    }

    /// `POST /pl/standard/user/oauth/authorize`: OAuth client-credentials
    /// exchange. Credentials travel as query parameters.
    pub fn authorize(client_id: &str, client_secret: &str) -> Self {
        let mut endpoint = Self::new(
            "authorize",
            Method::POST,
            "/pl/standard/user/oauth/authorize".to_string(),
        );
        endpoint.query = vec![
            ("grant_type", "client_credentials".to_string()),
            ("client_id", client_id.to_string()),
            ("client_secret", client_secret.to_string()),
        ];
        endpoint
    }

    /// `GET /api/v2_1/paymethods`
    pub fn pay_methods() -> Self {
        Self::new(
            "pay_methods",
            Method::GET,
            "/api/v2_1/paymethods".to_string(),
        )
    }

    /// `GET /api/v2_1/orders/{order_id}`
    pub fn order_status(order_id: &str) -> Self {
        Self::new(
            "order_status",
            Method::GET,
            format!("/api/v2_1/orders/{order_id}"),
        )
    }

    /// `POST /api/v2_1/orders`: redirects are not followed so the caller
    /// sees the gateway's own response rather than the redirect target.
    pub fn create_order(order: Value) -> Self {
        let mut endpoint = Self::new(
            "create_order",
            Method::POST,
            "/api/v2_1/orders".to_string(),
        );
        endpoint.body = Some(order);
        endpoint.follow_redirects = false;
        endpoint
    }

    /// `DELETE /api/v2_1/orders/{order_id}`
    pub fn order_cancel(order_id: &str) -> Self {
        Self::new(
            "order_cancel",
            Method::DELETE,
            format!("/api/v2_1/orders/{order_id}"),
        )
    }

    /// `POST /api/v2_1/orders/{order_id}/refunds` with a caller-supplied
    /// refund body.
    pub fn order_refund(order_id: &str, refund: Value) -> Self {
        let mut endpoint = Self::new(
            "order_refund",
            Method::POST,
            format!("/api/v2_1/orders/{order_id}/refunds"),
        );
        endpoint.body = Some(refund);
        endpoint
    }

    /// `POST /api/v2_1/orders/{order_id}/refunds`, defaulting to a full
    /// refund body when the caller supplies none.
    pub fn order_full_refund(order_id: &str, refund: Option<Value>) -> Self {
        let mut endpoint = Self::order_refund(order_id, refund.unwrap_or_else(full_refund_body));
        endpoint.name = "order_full_refund";
        endpoint
    }

    /// `GET /api/v2_1/orders/{order_id}/transactions`
    pub fn get_transactions(order_id: &str) -> Self {
        Self::new(
            "get_transactions",
            Method::GET,
            format!("/api/v2_1/orders/{order_id}/transactions"),
        )
    }

    /// `PUT /api/v2_1/orders/{order_id}/status`, defaulting to a COMPLETED
    /// status when the caller supplies none.
    pub fn order_confirm(order_id: &str, status: Option<Value>) -> Self {
        let mut endpoint = Self::new(
            "order_confirm",
            Method::PUT,
            format!("/api/v2_1/orders/{order_id}/status"),
        );
        endpoint.body = Some(status.unwrap_or_else(confirm_body));
        endpoint
    }
}

/// Fresh default body for a full refund. Constructed per call so no default
/// value is ever shared between requests.
pub fn full_refund_body() -> Value {
    json!({"refund": {"description": "Refund"}})
}

/// Fresh default body for an order confirmation.
pub fn confirm_body() -> Value {
    json!({"orderStatus": "COMPLETED"})
}
