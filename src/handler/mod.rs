//! Request handler module
//!
//! Responsible for request routing dispatch and the lookup flow: caller
//! address validation, metadata projection, and format rendering.

pub mod ip;
pub mod router;

// Re-export main entry point
pub use router::handle_request;
