//! Graph store gateway error types.

use crate::domain::DomainError;

/// Errors that can occur when fetching the network from its store.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication failed
    #[error("unauthorized: check NEO4J_USER and NEO4J_PASSWORD")]
    Unauthorized,

    /// Store returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse a response or file
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// The store rejected the query
    #[error("query error {code}: {message}")]
    Query { code: String, message: String },

    /// A result row had the wrong shape
    #[error("invalid row: {message}")]
    InvalidRow { message: String },

    /// A row parsed but holds invalid station or edge data
    #[error("invalid network data: {0}")]
    InvalidData(#[from] DomainError),

    /// Reading a network file failed
    #[error("I/O error: {message}")]
    Io { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = GatewayError::Api {
            status: 500,
            message: "Internal Server Error".into(),
        };
        assert_eq!(err.to_string(), "API error 500: Internal Server Error");

        let err = GatewayError::Query {
            code: "Neo.ClientError.Statement.SyntaxError".into(),
            message: "Invalid input".into(),
        };
        assert_eq!(
            err.to_string(),
            "query error Neo.ClientError.Statement.SyntaxError: Invalid input"
        );

        let err = GatewayError::InvalidData(DomainError::InvalidTime(-1.0));
        assert!(err.to_string().starts_with("invalid network data: invalid travel time"));
    }
}
