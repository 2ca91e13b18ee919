//! HTTP transport module with timeout and retry handling.

mod retry;
mod transport;

pub use retry::{DEFAULT_MAX_ATTEMPTS, RetryPolicy, RetryPredicate, is_connect_timeout, with_retry};
pub use transport::{REQUEST_TIMEOUT, Transport};
