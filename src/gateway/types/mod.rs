//! Gateway wire types
//!
//! - [`response`]: the `{code, msg, data}` envelope and error codes

pub mod response;

pub use response::{ApiResponse, error_codes};
