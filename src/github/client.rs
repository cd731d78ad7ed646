use std::time::{Duration, SystemTime, UNIX_EPOCH};

use reqwest::{header, Client, Response, StatusCode};
use tracing::{debug, info, instrument};

use crate::error::{AppError, Result};
use crate::github::models::{OrgStats, RepoStats, Repository};

const PER_PAGE: usize = 100;

#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    base_url: String,
}

impl GitHubClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            header::HeaderValue::from_static("2022-11-28"),
        );
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static(concat!("org-stats-app/", env!("CARGO_PKG_VERSION"))),
        );

        let base_url = base_url.trim_end_matches('/');
        reqwest::Url::parse(base_url).map_err(|e| {
            AppError::InvalidInput(format!("Invalid GitHub API URL '{}': {}", base_url, e))
        })?;

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    /// Lists every repository of `org` and reduces each to its headline counters
    #[instrument(skip(self, token))]
    pub async fn fetch_org_stats(&self, org: &str, token: &str) -> Result<OrgStats> {
        validate_org_name(org)?;
        if token.trim().is_empty() {
            return Err(AppError::MissingToken);
        }

        let url = format!("{}/orgs/{}/repos", self.base_url, org);
        info!("Fetching repositories for organization: {}", org);

        let repos: Vec<Repository> = self.fetch_all(&url, org, token).await?;
        info!("Fetched {} repositories for {}", repos.len(), org);

        Ok(OrgStats::new(
            org,
            repos.into_iter().map(RepoStats::from).collect(),
        ))
    }

    async fn fetch_all(&self, base_url: &str, org: &str, token: &str) -> Result<Vec<Repository>> {
        let mut all_items: Vec<Repository> = Vec::new();
        let mut page: usize = 1;

        loop {
            let url = format!("{}?per_page={}&page={}", base_url, PER_PAGE, page);
            debug!("Fetching: {}", url);

            let response = self.client.get(&url).bearer_auth(token).send().await?;
            let response = check_status(response, org).await?;

            // Check for next page in Link header
            let has_next = response
                .headers()
                .get(header::LINK)
                .and_then(|v| v.to_str().ok())
                .map(|v| v.contains("rel=\"next\""))
                .unwrap_or(false);

            let items: Vec<Repository> = response.json().await?;
            let items_count = items.len();
            all_items.extend(items);

            if !has_next || items_count < PER_PAGE {
                break;
            }

            page += 1;
        }

        Ok(all_items)
    }
}

/// Organization logins are ASCII alphanumerics and hyphens
pub fn validate_org_name(org: &str) -> Result<()> {
    if org.is_empty() {
        return Err(AppError::InvalidInput("organization name cannot be empty".into()));
    }
    if !org.chars().all(|c: char| c.is_ascii_alphanumeric() || c == '-') {
        return Err(AppError::InvalidInput(format!(
            "organization name '{}' may only contain alphanumeric characters and hyphens",
            org
        )));
    }
    Ok(())
}

async fn check_status(response: Response, org: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    match status {
        StatusCode::UNAUTHORIZED => Err(AppError::InvalidToken),
        StatusCode::NOT_FOUND => Err(AppError::OrgNotFound(org.to_string())),
        StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS if is_rate_limited(&response) => {
            Err(AppError::RateLimited(retry_after_secs(&response)))
        }
        _ => {
            let body = response.text().await.unwrap_or_default();
            Err(AppError::GitHubApi {
                status: status.as_u16(),
                message: body,
            })
        }
    }
}

fn header_u64(response: &Response, name: &str) -> Option<u64> {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}

fn is_rate_limited(response: &Response) -> bool {
    response.status() == StatusCode::TOO_MANY_REQUESTS
        || header_u64(response, "x-ratelimit-remaining") == Some(0)
}

fn retry_after_secs(response: &Response) -> u64 {
    if let Some(secs) = header_u64(response, "retry-after") {
        return secs;
    }

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();

    header_u64(response, "x-ratelimit-reset")
        .map(|reset| reset.saturating_sub(now))
        .unwrap_or(60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_regular_org_names() {
        assert!(validate_org_name("uken").is_ok());
        assert!(validate_org_name("rust-lang").is_ok());
    }

    #[test]
    fn rejects_empty_and_path_like_names() {
        assert!(matches!(validate_org_name(""), Err(AppError::InvalidInput(_))));
        assert!(matches!(validate_org_name("../users"), Err(AppError::InvalidInput(_))));
        assert!(matches!(validate_org_name("a b"), Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn unparseable_base_url_is_rejected() {
        let result = GitHubClient::new("not a url", Duration::from_secs(1));
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn blank_token_fails_before_any_request() {
        let client = GitHubClient::new("http://127.0.0.1:1", Duration::from_secs(1)).unwrap();
        let result = client.fetch_org_stats("uken", "  ").await;
        assert!(matches!(result, Err(AppError::MissingToken)));
    }
}
