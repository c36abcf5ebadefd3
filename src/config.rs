// Runtime configuration.
// Resolves the access token and team ID before anything is fetched.

use std::fmt;

use crate::error::{FigmaError, Result};

/// Environment variable holding the personal access token.
pub const TOKEN_VAR: &str = "FIGMA_TOKEN";

/// Settings required to talk to the Figma API.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    pub token: String,
    pub team_id: String,
}

impl Config {
    /// Validate explicit settings. Blank values count as missing.
    pub fn resolve(token: Option<String>, team_id: Option<String>) -> Result<Self> {
        let token = non_blank(token).ok_or(FigmaError::MissingToken)?;
        let team_id = non_blank(team_id).ok_or(FigmaError::MissingTeamId)?;
        Ok(Self { token, team_id })
    }

    /// Read the token from `FIGMA_TOKEN`. The team ID is resolved by the
    /// command line parser (`--team-id` or `FIGMA_TEAM_ID`).
    pub fn from_env(team_id: Option<String>) -> Result<Self> {
        Self::resolve(std::env::var(TOKEN_VAR).ok(), team_id)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// Keep the token out of logs and panic messages.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("token", &"<redacted>")
            .field("team_id", &self.team_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve() {
        let config = Config::resolve(Some(" tok ".into()), Some("123".into())).unwrap();
        assert_eq!(config.token, "tok");
        assert_eq!(config.team_id, "123");
    }

    #[test]
    fn test_missing_token() {
        let err = Config::resolve(None, Some("123".into())).unwrap_err();
        assert!(matches!(err, FigmaError::MissingToken));
        assert!(err.is_configuration());

        let err = Config::resolve(Some("  ".into()), Some("123".into())).unwrap_err();
        assert!(matches!(err, FigmaError::MissingToken));
    }

    #[test]
    fn test_missing_team() {
        let err = Config::resolve(Some("tok".into()), Some(String::new())).unwrap_err();
        assert!(matches!(err, FigmaError::MissingTeamId));
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = Config::resolve(Some("secret".into()), Some("123".into())).unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("secret"));
        assert!(debug.contains("123"));
    }
}
