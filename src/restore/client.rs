/// Restoration client
///
/// Sends one photo plus a fixed instruction to the generative image model
/// and hands back the first image the model returns.
use reqwest::Client;
use tracing::{debug, info, warn};

use super::wire::{GenerateContentRequest, GenerateContentResponse};
use crate::config::Config;
use crate::error::{RestoreError, StartupError};
use crate::state::data::EncodedPayload;

/// Instruction sent with every photo
pub const RESTORATION_PROMPT: &str = "\
Restore this old photograph.
Enhance its quality, fix any damages like scratches, dust, or tears, and colorize it realistically.
The goal is to make it look like a modern, high-quality photograph while preserving the original subjects and composition.
Do not add any elements that were not in the original photo.";

/// Media type assumed when the service does not label its image
pub const DEFAULT_OUTPUT_MEDIA_TYPE: &str = "image/png";

/// Base64 image data extracted from a response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageOutput {
    pub base64: String,
    pub media_type: String,
}

/// A configured handle to the image service.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct RestorationClient {
    http: Client,
    url: String,
    api_key: String,
}

impl RestorationClient {
    /// Build a client from startup configuration
    pub fn new(config: &Config) -> Result<Self, StartupError> {
        let http = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(StartupError::Client)?;

        let url = format!("{}/models/{}:generateContent", config.endpoint, config.model);
        info!(model = %config.model, "image service client ready");

        Ok(Self {
            http,
            url,
            api_key: config.api_key.clone(),
        })
    }

    /// Full URL requests are posted to
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Send a photo for restoration and return the first image in the reply
    pub async fn restore(&self, payload: &EncodedPayload) -> Result<ImageOutput, RestoreError> {
        let request = GenerateContentRequest::image_edit(
            &payload.base64,
            &payload.media_type,
            RESTORATION_PROMPT,
        );

        debug!(
            media_type = %payload.media_type,
            payload_len = payload.base64.len(),
            "sending restoration request"
        );

        let response = self
            .http
            .post(&self.url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, "image service rejected the request");
            return Err(RestoreError::Service { status, body });
        }

        let body: GenerateContentResponse = response.json().await?;
        extract_image(&body)
    }
}

/// Pick the first inline image out of a response
pub fn extract_image(response: &GenerateContentResponse) -> Result<ImageOutput, RestoreError> {
    let blob = response.first_inline_image().ok_or(RestoreError::NoImage)?;

    let media_type = if blob.mime_type.is_empty() {
        DEFAULT_OUTPUT_MEDIA_TYPE.to_string()
    } else {
        blob.mime_type.clone()
    };

    Ok(ImageOutput {
        base64: blob.data.clone(),
        media_type,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::State,
        http::{HeaderMap, StatusCode, Uri},
        Json, Router,
    };
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tokio::net::TcpListener;
    use tokio::sync::{oneshot, Mutex};

    #[derive(Clone)]
    struct MockState {
        status: StatusCode,
        reply: Value,
        captured: Arc<Mutex<Option<oneshot::Sender<CapturedRequest>>>>,
    }

    struct CapturedRequest {
        path: String,
        headers: HeaderMap,
        body: Value,
    }

    async fn handle_generate(
        State(state): State<MockState>,
        uri: Uri,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> (StatusCode, Json<Value>) {
        if let Some(tx) = state.captured.lock().await.take() {
            let _ = tx.send(CapturedRequest {
                path: uri.path().to_string(),
                headers,
                body,
            });
        }
        (state.status, Json(state.reply.clone()))
    }

    /// Spawn a stand-in for the image service answering every request with `reply`
    async fn spawn_service(
        status: StatusCode,
        reply: Value,
    ) -> (RestorationClient, oneshot::Receiver<CapturedRequest>) {
        std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        let (tx, rx) = oneshot::channel();
        let state = MockState {
            status,
            reply,
            captured: Arc::new(Mutex::new(Some(tx))),
        };
        // every path lands here; the test inspects the captured path instead
        let app = Router::new().fallback(handle_generate).with_state(state);
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        let config = Config {
            api_key: "test-key".to_string(),
            model: "test-image-model".to_string(),
            endpoint: format!("http://{addr}/v1beta"),
        };
        (RestorationClient::new(&config).expect("client"), rx)
    }

    fn payload() -> EncodedPayload {
        EncodedPayload {
            base64: "/9j/4AAQSkZJRg==".to_string(),
            media_type: "image/jpeg".to_string(),
        }
    }

    #[tokio::test]
    async fn test_single_image_segment_is_returned_verbatim() {
        let (client, _rx) = spawn_service(
            StatusCode::OK,
            json!({
                "candidates": [{ "content": { "parts": [
                    { "inlineData": { "mimeType": "image/png", "data": "iVBORw0KGgoAAAANSUhEUg==" } }
                ]}}]
            }),
        )
        .await;

        let output = client.restore(&payload()).await.expect("restore");
        assert_eq!(output.base64, "iVBORw0KGgoAAAANSUhEUg==");
        assert_eq!(output.media_type, "image/png");
    }

    #[tokio::test]
    async fn test_response_without_image_fails() {
        let (client, _rx) = spawn_service(
            StatusCode::OK,
            json!({
                "candidates": [{ "content": { "parts": [
                    { "text": "I cannot restore this image." }
                ]}}]
            }),
        )
        .await;

        let err = client.restore(&payload()).await.expect_err("must fail");
        assert!(matches!(err, RestoreError::NoImage), "unexpected error: {err}");
    }

    #[tokio::test]
    async fn test_service_error_status_fails() {
        let (client, _rx) = spawn_service(
            StatusCode::FORBIDDEN,
            json!({ "error": { "code": 403, "message": "API key not valid" } }),
        )
        .await;

        let err = client.restore(&payload()).await.expect_err("must fail");
        match err {
            RestoreError::Service { status, body } => {
                assert_eq!(status, reqwest::StatusCode::FORBIDDEN);
                assert!(body.contains("API key not valid"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_request_carries_image_prompt_and_modality() {
        let (client, rx) = spawn_service(
            StatusCode::OK,
            json!({ "candidates": [{ "content": { "parts": [
                { "inlineData": { "mimeType": "image/png", "data": "AA==" } }
            ]}}]}),
        )
        .await;

        client.restore(&payload()).await.expect("restore");
        let CapturedRequest { path, headers, body } = rx.await.expect("captured request");

        assert_eq!(path, "/v1beta/models/test-image-model:generateContent");
        assert_eq!(headers.get("x-goog-api-key").unwrap(), "test-key");

        let parts = &body["contents"][0]["parts"];
        assert_eq!(parts[0]["inlineData"]["data"], "/9j/4AAQSkZJRg==");
        assert_eq!(parts[0]["inlineData"]["mimeType"], "image/jpeg");
        assert_eq!(parts[1]["text"], RESTORATION_PROMPT);
        assert_eq!(body["generationConfig"]["responseModalities"], json!(["IMAGE"]));
    }

    #[tokio::test]
    async fn test_unreachable_service_fails_with_request_error() {
        std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
        // bind then drop to get a port nothing listens on
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            listener.local_addr().unwrap()
        };
        let client = RestorationClient::new(&Config {
            api_key: "k".to_string(),
            model: "m".to_string(),
            endpoint: format!("http://{addr}"),
        })
        .unwrap();

        let err = client.restore(&payload()).await.expect_err("must fail");
        assert!(matches!(err, RestoreError::Request(_)), "unexpected error: {err}");
    }

    #[test]
    fn test_missing_media_type_defaults_to_png() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{ "content": { "parts": [{ "inlineData": { "data": "AA==" } }] } }]
        }))
        .unwrap();

        let output = extract_image(&response).unwrap();
        assert_eq!(output.media_type, DEFAULT_OUTPUT_MEDIA_TYPE);
        assert_eq!(output.base64, "AA==");
    }

    #[test]
    fn test_prompt_forbids_new_content() {
        assert!(RESTORATION_PROMPT.starts_with("Restore this old photograph."));
        assert!(RESTORATION_PROMPT.contains("colorize it realistically"));
        assert!(RESTORATION_PROMPT.contains("Do not add any elements"));
    }
}
