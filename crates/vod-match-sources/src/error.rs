use thiserror::Error;

/// Failures at an external call boundary
///
/// Callers in the matching engine never propagate these; they log and
/// degrade to an empty result.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Network failure, including timeouts
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    /// Non-success HTTP status
    #[error("request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// Response body could not be decoded
    #[error("malformed response from {source_name}: {message}")]
    Parse { source_name: String, message: String },

    /// Key/value store read or write failure
    #[error("storage failure: {0}")]
    Storage(String),
}

impl SourceError {
    pub fn parse(source_name: impl Into<String>, message: impl ToString) -> Self {
        SourceError::Parse {
            source_name: source_name.into(),
            message: message.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, SourceError::Status { status: 404, .. })
    }
}

impl From<std::io::Error> for SourceError {
    fn from(e: std::io::Error) -> Self {
        SourceError::Storage(e.to_string())
    }
}
