use thiserror::Error;

/// Application-level errors
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Reasoner error: {0}")]
    Reasoner(#[from] ReasonerError),

    #[error("Submission already in flight for this debate")]
    ConcurrentSubmission,

    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Errors raised while validating an externally supplied argument map.
///
/// A map that fails validation is rejected wholesale; the previous
/// snapshot is retained and the caller may retry with its original input.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Missing field: {field}")]
    MissingField { field: String },

    #[error("Duplicate node id: {id}")]
    DuplicateNodeId { id: String },

    #[error("Duplicate edge id: {id}")]
    DuplicateEdgeId { id: String },

    #[error("Edge {edge_id} references unknown node: {node_id}")]
    DanglingEdge { edge_id: String, node_id: String },

    #[error("Node {node_id} has more than one outgoing edge")]
    MultipleParents { node_id: String },

    #[error("Statement cannot be empty")]
    EmptyStatement,
}

/// Reasoning-service transport errors
#[derive(Debug, Error)]
pub enum ReasonerError {
    #[error("Reasoner unavailable: {message} (retries: {retries})")]
    Unavailable { message: String, retries: u32 },

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response: {message}")]
    InvalidResponse { message: String },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

/// Result type alias for map validation
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Result type alias for reasoning-service operations
pub type ReasonerResult<T> = Result<T, ReasonerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::Config {
            message: "missing key".to_string(),
        };
        assert_eq!(err.to_string(), "Configuration error: missing key");

        let err = AppError::Internal {
            message: "unexpected".to_string(),
        };
        assert_eq!(err.to_string(), "Internal error: unexpected");

        let err = AppError::ConcurrentSubmission;
        assert_eq!(
            err.to_string(),
            "Submission already in flight for this debate"
        );
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::MissingField {
            field: "nodes".to_string(),
        };
        assert_eq!(err.to_string(), "Missing field: nodes");

        let err = ValidationError::DuplicateNodeId {
            id: "n1".to_string(),
        };
        assert_eq!(err.to_string(), "Duplicate node id: n1");

        let err = ValidationError::DanglingEdge {
            edge_id: "e1".to_string(),
            node_id: "ghost".to_string(),
        };
        assert_eq!(err.to_string(), "Edge e1 references unknown node: ghost");

        let err = ValidationError::MultipleParents {
            node_id: "n2".to_string(),
        };
        assert_eq!(err.to_string(), "Node n2 has more than one outgoing edge");
    }

    #[test]
    fn test_reasoner_error_display() {
        let err = ReasonerError::Unavailable {
            message: "server down".to_string(),
            retries: 3,
        };
        assert_eq!(
            err.to_string(),
            "Reasoner unavailable: server down (retries: 3)"
        );

        let err = ReasonerError::Api {
            status: 401,
            message: "unauthorized".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 401 - unauthorized");

        let err = ReasonerError::Timeout { timeout_ms: 5000 };
        assert_eq!(err.to_string(), "Request timeout after 5000ms");
    }

    #[test]
    fn test_validation_error_conversion_to_app_error() {
        let err = ValidationError::DuplicateEdgeId {
            id: "e7".to_string(),
        };
        let app_err: AppError = err.into();
        assert!(matches!(app_err, AppError::Validation(_)));
        assert!(app_err.to_string().contains("Duplicate edge id"));
    }

    #[test]
    fn test_reasoner_error_conversion_to_app_error() {
        let err = ReasonerError::Timeout { timeout_ms: 1000 };
        let app_err: AppError = err.into();
        assert!(matches!(app_err, AppError::Reasoner(_)));
    }
}
