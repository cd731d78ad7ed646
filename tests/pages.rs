//! tests/pages.rs
//! The browser page and the status endpoint.

mod common;

use reqwest::{header, StatusCode};
use serde_json::Value;

#[tokio::test]
async fn index_serves_html_unwrapped() {
    let base_url = common::spawn_app_with(&[("GITHUB_ORG", "rust-lang")]);

    let resp = reqwest::get(format!("{}/", base_url)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/html"));

    let page = resp.text().await.unwrap();
    assert!(page.contains("<title>GitHub Organization Statistics</title>"));
    assert!(page.contains("Enter your GitHub API token:"));
    assert!(page.contains("value=\"rust-lang\""));
    assert!(page.contains("const SERVER_TOKEN = false;"));
}

#[tokio::test]
async fn status_reports_health_without_leaking_the_token() {
    let base_url = common::spawn_app_with(&[("GITHUB_API_TOKEN", "ghp_secret")]);

    let resp = reqwest::get(format!("{}/status", base_url)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let text = resp.text().await.unwrap();
    assert!(!text.contains("ghp_secret"));

    let body: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(body["status"], "OK");
    assert_eq!(body["code"], 200);
    assert_eq!(body["data"]["status"], "healthy");
    assert_eq!(body["data"]["server_token_configured"], true);
    assert!(body["date"].is_string());
}
