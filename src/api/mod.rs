//! Request descriptors, response handling, and the normalized API error.

mod endpoint;
mod error;
mod response;

pub use endpoint::{Endpoint, confirm_body, full_refund_body};
pub use error::PayuError;
pub use response::{check_status, into_json};
