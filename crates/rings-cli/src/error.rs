use thiserror::Error;

/// Main error type for rings-cli
#[derive(Error, Debug)]
pub enum RingsError {
    #[error("Health gateway unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("Authorization required. Please run 'rings auth login' first.")]
    NotAuthenticated,

    #[error("Read access to activity summaries was denied: {0}")]
    AuthorizationDenied(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Failed to serialize export payload: {0}")]
    SerializationFailed(String),

    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid date format: {0}. Expected YYYY-MM-DD")]
    InvalidDateFormat(String),

    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidRange { start: String, end: String },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type Result<T> = std::result::Result<T, RingsError>;

impl RingsError {
    /// Create a provider-unavailable error from a message
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::ProviderUnavailable(msg.into())
    }

    /// Create an authorization-denied error from a message
    pub fn denied(msg: impl Into<String>) -> Self {
        Self::AuthorizationDenied(msg.into())
    }

    /// Create a query-failure error from a message
    pub fn query(msg: impl Into<String>) -> Self {
        Self::QueryFailed(msg.into())
    }

    /// Create a configuration error from a message
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid parameter error from a message
    pub fn invalid_param(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }
}

impl From<reqwest::Error> for RingsError {
    /// Connection-level failures mean the gateway itself is unreachable,
    /// which the pipeline reports as provider unavailability rather than a
    /// query failure.
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            Self::ProviderUnavailable(err.to_string())
        } else {
            Self::Http(err)
        }
    }
}

/// Format an error for end-user display
pub fn format_user_error(err: &RingsError) -> String {
    err.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RingsError::ProviderUnavailable("connection refused".to_string());
        assert_eq!(
            err.to_string(),
            "Health gateway unavailable: connection refused"
        );
    }

    #[test]
    fn test_not_authenticated_error() {
        let err = RingsError::NotAuthenticated;
        assert!(err.to_string().contains("rings auth login"));
    }

    #[test]
    fn test_invalid_date_format_error() {
        let err = RingsError::InvalidDateFormat("not-a-date".to_string());
        assert!(err.to_string().contains("not-a-date"));
        assert!(err.to_string().contains("YYYY-MM-DD"));
    }

    #[test]
    fn test_invalid_range_error() {
        let err = RingsError::InvalidRange {
            start: "2023-03-05".to_string(),
            end: "2023-03-01".to_string(),
        };
        assert!(err.to_string().contains("2023-03-05"));
        assert!(err.to_string().contains("2023-03-01"));
    }

    #[test]
    fn test_error_constructors() {
        let unavailable = RingsError::unavailable("no gateway");
        assert!(matches!(unavailable, RingsError::ProviderUnavailable(_)));

        let denied = RingsError::denied("read scope rejected");
        assert!(matches!(denied, RingsError::AuthorizationDenied(_)));

        let query = RingsError::query("bad request");
        assert!(matches!(query, RingsError::QueryFailed(_)));

        let config = RingsError::config("no config dir");
        assert!(matches!(config, RingsError::Config(_)));
    }
}
