//! Ensures that requests taking too long result in a 408 timeout.

use crate::common;

use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use tokio::time::timeout;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn returns_408_when_github_is_slower_than_the_request_timeout() {
    // * GitHub answers after 3s; the app gives each request 1s.
    let github = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("[]")
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&github)
        .await;

    let base_url: String = common::spawn_app_with(&[
        ("GITHUB_API_URL", &github.uri()),
        ("DEFAULT_TIMEOUT_SECONDS", "1"),
    ]);

    let resp_result = timeout(
        Duration::from_secs(5), // client-side timeout duration
        reqwest::Client::new()
            .post(format!("{}/api/github/stats", base_url))
            .json(&serde_json::json!({ "token": "ghp_test", "org": "uken" }))
            .send(),
    )
    .await;

    assert!(resp_result.is_ok(), "Client timed out waiting for server.");
    let resp: reqwest::Response = resp_result.unwrap().expect("Request failed unexpectedly.");

    assert_eq!(resp.status(), StatusCode::REQUEST_TIMEOUT);

    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["status"], "REQUEST_TIMEOUT");
    assert_eq!(json["code"], 408);
}
