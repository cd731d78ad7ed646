// Browser page served at the root

use axum::{extract::State, response::Html};
use tracing::{instrument, info};

use crate::config::state::AppState;

const INDEX_HTML: &str = include_str!("../../../static/index.html");

/// Renders the single-page UI with the configured default organization
#[instrument(skip(state))]
pub async fn index_handler(State(state): State<AppState>) -> Html<String> {
    info!("Serving index page");

    Html(render_index(
        &state.environment.github_org,
        state.environment.github_api_token.is_some(),
    ))
}

pub fn render_index(default_org: &str, server_token: bool) -> String {
    INDEX_HTML
        .replace("{{DEFAULT_ORG}}", &escape_html(default_org))
        .replace("{{SERVER_TOKEN}}", if server_token { "true" } else { "false" })
}

fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_carries_title_and_token_prompt() {
        let page = render_index("uken", false);
        assert!(page.contains("GitHub Organization Statistics"));
        assert!(page.contains("Enter your GitHub API token:"));
        assert!(page.contains("type=\"password\""));
        assert!(page.contains("value=\"uken\""));
        assert!(!page.contains("{{"));
    }

    #[test]
    fn organization_is_escaped() {
        let page = render_index("<script>", true);
        assert!(page.contains("&lt;script&gt;"));
        assert!(!page.contains("value=\"<script>\""));
    }
}
