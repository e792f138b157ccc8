//! HTTP protocol layer module
//!
//! Response construction shared by the lookup routes, decoupled from the
//! lookup logic itself.

pub mod response;

// Re-export commonly used builders
pub use response::{
    build_fault_response, build_formatted_response, build_invalid_ip_response,
    build_plain_response,
};
