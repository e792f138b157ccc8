//! Error types for request handling.

use thiserror::Error;

/// Failures that can occur while answering a lookup request.
///
/// Two tiers. `InvalidAddress` is the only validation failure a client can
/// trigger; its display text is the response body. Every other variant is an
/// unhandled fault and is reported as a diagnostic trace.
#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("invalid ip")]
    InvalidAddress,

    #[error("missing metadata header: {0}")]
    MissingMetadata(String),

    #[error("metadata header is not visible ASCII")]
    MetadataEncoding(#[source] hyper::header::ToStrError),

    #[error("metadata header is not valid JSON")]
    MetadataParse(#[source] serde_json::Error),

    #[error("metadata does not match the expected shape")]
    MetadataShape(#[source] serde_json::Error),

    #[error("response serialization failed")]
    Serialize(#[source] serde_json::Error),
}

impl HandlerError {
    /// True for the validation tier, whose display text is sent verbatim.
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidAddress)
    }

    /// The error followed by its source chain, one `caused by:` per line.
    pub fn diagnostic_trace(&self) -> String {
        let mut trace = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            trace.push_str("\ncaused by: ");
            trace.push_str(&cause.to_string());
            source = cause.source();
        }
        trace
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json_error() -> serde_json::Error {
        serde_json::from_str::<serde_json::Value>("{ not json").unwrap_err()
    }

    #[test]
    fn test_validation_tier() {
        assert!(HandlerError::InvalidAddress.is_validation());
        assert!(!HandlerError::MissingMetadata("x-edge-metadata".to_string()).is_validation());
        assert!(!HandlerError::MetadataParse(json_error()).is_validation());
    }

    #[test]
    fn test_invalid_address_body() {
        assert_eq!(HandlerError::InvalidAddress.to_string(), "invalid ip");
    }

    #[test]
    fn test_trace_without_source() {
        let trace = HandlerError::MissingMetadata("x-edge-metadata".to_string()).diagnostic_trace();
        assert_eq!(trace, "missing metadata header: x-edge-metadata");
    }

    #[test]
    fn test_trace_includes_cause_chain() {
        let trace = HandlerError::MetadataParse(json_error()).diagnostic_trace();
        let mut lines = trace.lines();
        assert_eq!(lines.next(), Some("metadata header is not valid JSON"));
        let cause = lines.next().unwrap();
        assert!(cause.starts_with("caused by: "), "got: {cause}");
    }
}
