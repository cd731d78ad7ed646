// Start of file: /src/config/environment.rs

// * Environment configuration with zero-copy defaults.

use std::{borrow::Cow, collections::HashMap, fmt};
// * anyhow for convenient error handling
use anyhow::{Context, Result};
use tracing::{debug, warn};

// ! Default values for environment variables (used if variables aren't set):
const DEFAULT_ENVIRONMENT: &str = "development";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PROTOCOL: &str = "http";
const DEFAULT_PORT: u16 = 8501;
const DEFAULT_MAX_BODY_SIZE: usize = 10_485_760; // 10MB
const DEFAULT_TIMEOUT: u64 = 30; // 30 seconds
const DEFAULT_GITHUB_ORG: &str = "uken";
const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
const DEFAULT_GITHUB_TIMEOUT: u64 = 10; // 10 seconds

// * A struct containing all environment variables used by the app
#[derive(Clone)]
pub struct EnvironmentVariables {
    pub environment: Cow<'static, str>,
    pub host: Cow<'static, str>,
    pub port: u16,
    pub protocol: Cow<'static, str>,
    pub max_request_body_size: usize,
    pub default_timeout_seconds: u64,
    pub github_api_token: Option<String>,
    pub github_org: Cow<'static, str>,
    pub github_api_url: Cow<'static, str>,
    pub github_timeout_seconds: u64,
}

// ! The token must never reach the logs
impl fmt::Debug for EnvironmentVariables {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvironmentVariables")
            .field("environment", &self.environment)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("protocol", &self.protocol)
            .field("max_request_body_size", &self.max_request_body_size)
            .field("default_timeout_seconds", &self.default_timeout_seconds)
            .field(
                "github_api_token",
                &self.github_api_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("github_org", &self.github_org)
            .field("github_api_url", &self.github_api_url)
            .field("github_timeout_seconds", &self.github_timeout_seconds)
            .finish()
    }
}

impl EnvironmentVariables {
    // * Loads environment variables from the process (and .env).
    // * Only reads .env if ENVIRONMENT != "production".
    pub fn load() -> Result<Self> {
        // ? In non-production environments, attempt to load .env
        if std::env::var("ENVIRONMENT").unwrap_or_default() != "production" {
            dotenv::dotenv().ok();
        }

        // * Collect all environment vars from the system and .env
        let vars: HashMap<String, String> = std::env::vars()
            .chain(dotenv::vars())
            .collect();

        let config: EnvironmentVariables = Self::from_map(&vars)?;

        if cfg!(debug_assertions) {
            debug!("Loaded environment configuration: {:#?}", config);
        }

        Ok(config)
    }

    // * Builds the configuration from an explicit key/value map,
    // * providing defaults if missing
    pub fn from_map(vars: &HashMap<String, String>) -> Result<Self> {
        // * A small helper closure to fetch a variable by key
        let get_var = |key: &str| vars.get(key).map(String::as_str);

        Ok(Self {
            environment: get_var("ENVIRONMENT")
                .map(|s| Cow::Owned(s.into()))
                .unwrap_or_else(|| {
                    warn!("Missing ENVIRONMENT, defaulting to '{DEFAULT_ENVIRONMENT}'");
                    Cow::Borrowed(DEFAULT_ENVIRONMENT)
                }),

            host: get_var("HOST")
                .map(|s| Cow::Owned(s.into()))
                .unwrap_or(Cow::Borrowed(DEFAULT_HOST)),

            port: get_var("PORT")
                .map(|s| s.parse().context("Invalid PORT value"))
                .transpose()?
                .unwrap_or(DEFAULT_PORT),

            protocol: get_var("PROTOCOL")
                .map(|s| Cow::Owned(s.into()))
                .unwrap_or(Cow::Borrowed(DEFAULT_PROTOCOL)),

            max_request_body_size: get_var("MAX_REQUEST_BODY_SIZE")
                .map(|s| s.parse().context("Invalid MAX_REQUEST_BODY_SIZE"))
                .transpose()?
                .unwrap_or(DEFAULT_MAX_BODY_SIZE),

            default_timeout_seconds: get_var("DEFAULT_TIMEOUT_SECONDS")
                .map(|s| s.parse().context("Invalid DEFAULT_TIMEOUT_SECONDS"))
                .transpose()?
                .unwrap_or(DEFAULT_TIMEOUT),

            // ? Blank tokens count as unset
            github_api_token: match get_var("GITHUB_API_TOKEN").map(str::trim) {
                Some(token) if !token.is_empty() => Some(token.to_string()),
                _ => {
                    warn!("Missing GITHUB_API_TOKEN, a token must be supplied per request");
                    None
                }
            },

            github_org: get_var("GITHUB_ORG")
                .map(|s| Cow::Owned(s.into()))
                .unwrap_or(Cow::Borrowed(DEFAULT_GITHUB_ORG)),

            github_api_url: get_var("GITHUB_API_URL")
                .map(|s| Cow::Owned(s.trim_end_matches('/').into()))
                .unwrap_or(Cow::Borrowed(DEFAULT_GITHUB_API_URL)),

            github_timeout_seconds: get_var("GITHUB_TIMEOUT_SECONDS")
                .map(|s| s.parse().context("Invalid GITHUB_TIMEOUT_SECONDS"))
                .transpose()?
                .unwrap_or(DEFAULT_GITHUB_TIMEOUT),
        })
    }
}


// End of file: /src/config/environment.rs
