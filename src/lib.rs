//! Client library for the PayU REST API.
//!
//! Authorizes once via the OAuth client-credentials exchange, then exposes
//! the order and payment-method operations with a fixed per-request timeout,
//! bounded retries on connection timeouts, and a single normalized error type
//! for the gateway's heterogeneous failure shapes.
//!
//! ```no_run
//! use payu::{Environment, PayuClient};
//! use serde_json::json;
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let client = PayuClient::new("client-id", "client-secret", Environment::Sandbox).await?;
//! let methods = client.pay_methods().await?;
//! let status = client.order_status("WZHF5FFDRJ140731GUEST000P01").await?;
//! client.order_full_refund("WZHF5FFDRJ140731GUEST000P01", None).await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod client;
pub mod http;

pub use api::PayuError;
pub use client::{Environment, PayuClient};
pub use http::RetryPolicy;
