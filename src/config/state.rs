// Application state shared by every handler

use std::sync::Arc;
use std::time::Duration;
use crate::config::environment::EnvironmentVariables;
use crate::github::GitHubClient;

#[derive(Debug, Clone)]
pub struct AppState {
    pub environment: Arc<EnvironmentVariables>,
    pub github: GitHubClient,
}

impl AppState {
    /// Builds state around a loaded configuration
    pub fn new(environment: EnvironmentVariables) -> anyhow::Result<Self> {
        let environment_arc: Arc<EnvironmentVariables> = Arc::new(environment);

        let github: GitHubClient = GitHubClient::new(
            environment_arc.github_api_url.as_ref(),
            Duration::from_secs(environment_arc.github_timeout_seconds),
        )?;

        Ok(Self {
            environment: environment_arc,
            github,
        })
    }

    /// Resolves the token for a request: explicit value first, then the server token
    pub fn resolve_token(&self, supplied: Option<&str>) -> Option<String> {
        supplied
            .map(str::trim)
            .filter(|t: &&str| !t.is_empty())
            .map(str::to_string)
            .or_else(|| self.environment.github_api_token.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn state_with_token(token: Option<&str>) -> AppState {
        let mut vars: HashMap<String, String> = HashMap::new();
        if let Some(t) = token {
            vars.insert("GITHUB_API_TOKEN".into(), t.into());
        }
        AppState::new(EnvironmentVariables::from_map(&vars).unwrap()).unwrap()
    }

    #[test]
    fn request_token_wins_over_server_token() {
        let state = state_with_token(Some("server"));
        assert_eq!(state.resolve_token(Some("request")).as_deref(), Some("request"));
    }

    #[test]
    fn blank_request_token_falls_back_to_server() {
        let state = state_with_token(Some("server"));
        assert_eq!(state.resolve_token(Some("  ")).as_deref(), Some("server"));
        assert_eq!(state.resolve_token(None).as_deref(), Some("server"));
    }

    #[test]
    fn unusable_github_url_fails_construction() {
        let mut vars: HashMap<String, String> = HashMap::new();
        vars.insert("GITHUB_API_URL".into(), "not a url".into());
        let env = EnvironmentVariables::from_map(&vars).unwrap();
        assert!(AppState::new(env).is_err());
    }

    #[test]
    fn no_token_anywhere_resolves_to_none() {
        let state = state_with_token(None);
        assert!(state.resolve_token(None).is_none());
    }
}
