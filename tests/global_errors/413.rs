//! Ensures that an upload larger than MAX_REQUEST_BODY_SIZE triggers 413.

use crate::common;

use reqwest::StatusCode;
use serde_json::Value;

#[tokio::test]
async fn returns_413_when_upload_exceeds_body_limit() {
    let base_url: String = common::spawn_app_with(&[("MAX_REQUEST_BODY_SIZE", "1024")]);

    let mut oversized: Vec<u8> = b"a,b\n".to_vec();
    oversized.extend(std::iter::repeat(b"1,2\n").take(1024).flatten());

    let resp: reqwest::Response = reqwest::Client::new()
        .post(format!("{}/api/data/summary?file_name=big.csv", base_url))
        .body(oversized)
        .send()
        .await
        .expect("Failed to send large request.");

    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);

    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["status"], "PAYLOAD_TOO_LARGE");
    assert_eq!(json["code"], 413);
}
