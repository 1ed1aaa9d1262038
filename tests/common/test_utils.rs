use axum::{
    Router,
    body::Body,
    http::{Request, Response},
};
use dish_advisor::{
    config::{Config, LlmConfig},
    recommend::{Recommender, RecommenderSettings},
    server::{self, handlers::AppState},
};
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::fs;

use super::mocks::MockLlmClient;

pub const BOUNDARY: &str = "dish-advisor-test-boundary";

/// Bytes that start like a JPEG. Nothing downstream decodes them.
pub const JPEG_BYTES: &[u8] = &[0xff, 0xd8, 0xff, 0xe0, 0x00, 0x10, b'J', b'F', b'I', b'F'];

/// First bytes of a PNG signature.
pub const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

pub fn create_test_llm_config(base_url: &str) -> LlmConfig {
    LlmConfig {
        base_url: base_url.to_string(),
        api_key: "test-api-key".to_string(),
        model: "gpt-4o-mini".to_string(),
        max_tokens: 1000,
        temperature: None,
    }
}

pub fn create_recommender(mock: Arc<MockLlmClient>) -> Recommender {
    Recommender::new(mock, RecommenderSettings::from_config(&Config::default()))
}

pub fn create_test_app(mock: Arc<MockLlmClient>, max_upload_bytes: usize) -> Router {
    let state = AppState {
        recommender: Arc::new(create_recommender(mock)),
    };
    server::router(state, max_upload_bytes)
}

/// Writes a config file into a fresh temp dir and returns both.
pub async fn create_test_config_file(content: &str) -> (TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let path = dir.path().join("config.yaml");
    fs::write(&path, content).await.unwrap();
    (dir, path)
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}

/// Hand-built `multipart/form-data` body, shaped like a browser's form post.
#[derive(Default)]
pub struct MultipartBody {
    body: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(
        mut self,
        name: &str,
        file_name: &str,
        content_type: Option<&str>,
        bytes: &[u8],
    ) -> Self {
        let mut head = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n"
        );
        if let Some(content_type) = content_type {
            head.push_str(&format!("Content-Type: {content_type}\r\n"));
        }
        head.push_str("\r\n");

        self.body.extend_from_slice(head.as_bytes());
        self.body.extend_from_slice(bytes);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    pub fn into_request(mut self, uri: &str) -> Request<Body> {
        self.body
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(self.body))
            .unwrap()
    }
}
