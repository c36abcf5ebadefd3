// Error types for figma-files.
// Covers configuration, Figma API, parsing, and filesystem errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FigmaError {
    #[error("Figma API error: {0}")]
    Api(#[from] reqwest::Error),

    #[error("Authentication failed: invalid or expired access token")]
    Unauthorized,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Rate limit exceeded, retry after {retry_after}")]
    RateLimited { retry_after: String },

    #[error("Missing Figma access token (set FIGMA_TOKEN)")]
    MissingToken,

    #[error("Missing Figma team ID (set FIGMA_TEAM_ID or pass --team-id)")]
    MissingTeamId,

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl FigmaError {
    /// Whether this error comes from missing or invalid configuration.
    pub fn is_configuration(&self) -> bool {
        matches!(self, FigmaError::MissingToken | FigmaError::MissingTeamId)
    }
}

pub type Result<T> = std::result::Result<T, FigmaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_errors() {
        assert!(FigmaError::MissingToken.is_configuration());
        assert!(FigmaError::MissingTeamId.is_configuration());
        assert!(!FigmaError::Unauthorized.is_configuration());
        assert!(!FigmaError::Other("HTTP 500".to_string()).is_configuration());
    }
}
