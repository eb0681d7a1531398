//! HTTP server for document upload and extraction

pub mod routes;
pub mod state;

use axum::{extract::State, http::StatusCode, routing::get, Router};
use std::net::SocketAddr;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::ExtractConfig;
use crate::error::Result;
use state::AppState;

/// Extraction HTTP Server
pub struct ExtractServer {
    config: ExtractConfig,
    state: AppState,
}

impl ExtractServer {
    /// Create a new server with the local filesystem store
    pub fn new(config: ExtractConfig) -> Result<Self> {
        let state = AppState::new(config.clone())?;
        Ok(Self { config, state })
    }

    /// Create a server around existing state
    pub fn with_state(state: AppState) -> Self {
        Self {
            config: state.config().clone(),
            state,
        }
    }

    /// Build the router with all routes
    pub fn router(&self) -> Router {
        let router = Router::new()
            .route("/health", get(health_check))
            .route("/ready", get(readiness))
            .nest("/api", routes::api_routes(self.config.server.max_upload_size))
            .with_state(self.state.clone())
            .layer(TraceLayer::new_for_http());

        if self.config.server.enable_cors {
            router.layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            )
        } else {
            router
        }
    }

    /// Start the server
    pub async fn start(self) -> Result<()> {
        let addr: SocketAddr = self
            .address()
            .parse()
            .map_err(|e| crate::error::Error::Config(format!("Invalid address: {}", e)))?;

        let router = self.router();

        tracing::info!("Starting extraction server on http://{}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| crate::error::Error::Config(format!("Failed to bind: {}", e)))?;

        axum::serve(listener, router)
            .await
            .map_err(|e| crate::error::Error::Internal(format!("Server error: {}", e)))?;

        Ok(())
    }

    /// Get the server address
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.server.host, self.config.server.port)
    }
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Readiness check: the document store must be usable
async fn readiness(State(state): State<AppState>) -> StatusCode {
    let store = state.document_store();
    match store.health_check().await {
        Ok(true) => StatusCode::OK,
        Ok(false) => {
            tracing::warn!("Document store {} is not ready", store.name());
            StatusCode::SERVICE_UNAVAILABLE
        }
        Err(e) => {
            tracing::warn!("Document store {} health check failed: {}", store.name(), e);
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::archive::test_support::build_zip;
    use crate::types::{DocumentRecord, DocumentStatus, ExtractResponse, UploadResponse};
    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request, StatusCode};
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use serde_json::{json, Value};
    use tempfile::TempDir;
    use tower::ServiceExt;
    use uuid::Uuid;

    fn server(dir: &TempDir) -> ExtractServer {
        let mut config = ExtractConfig::default();
        config.storage.data_dir = dir.path().to_path_buf();
        ExtractServer::new(config).unwrap()
    }

    async fn send(router: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };

        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    async fn upload(router: &Router, filename: &str, mime: &str, data: &[u8]) -> UploadResponse {
        let body = json!({
            "filename": filename,
            "mime": mime,
            "size": data.len(),
            "contentBase64": STANDARD.encode(data),
        });
        let (status, value) = send(router.clone(), Method::POST, "/api/upload", Some(body)).await;
        assert_eq!(status, StatusCode::OK, "{}", value);
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let dir = TempDir::new().unwrap();
        let response = server(&dir)
            .router()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_readiness_follows_store() {
        let dir = TempDir::new().unwrap();
        let router = server(&dir).router();

        let (status, _) = send(router.clone(), Method::GET, "/ready", None).await;
        assert_eq!(status, StatusCode::OK);

        std::fs::remove_dir_all(dir.path().join("raw")).unwrap();
        let (status, _) = send(router, Method::GET, "/ready", None).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_upload_then_extract_text() {
        let dir = TempDir::new().unwrap();
        let router = server(&dir).router();

        let uploaded = upload(&router, "hello world.txt", "text/plain", b"  hello\n").await;
        assert!(uploaded.storage_path.starts_with("raw/"));
        assert!(uploaded.storage_path.ends_with("-hello-world.txt"));

        let body = json!({ "doc_id": uploaded.doc_id });
        let (status, value) = send(router.clone(), Method::POST, "/api/extract", Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        let response: ExtractResponse = serde_json::from_value(value).unwrap();
        assert_eq!(response.doc_id, uploaded.doc_id);
        assert_eq!(response.status, DocumentStatus::Processed);
        assert_eq!(response.extracted_text_length, 5);

        let uri = format!("/api/documents/{}", uploaded.doc_id);
        let (status, value) = send(router, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        let record: DocumentRecord = serde_json::from_value(value).unwrap();
        assert_eq!(record.status, DocumentStatus::Processed);
        assert_eq!(record.extracted_text.as_deref(), Some("hello"));
    }

    #[tokio::test]
    async fn test_extract_docx_counts_characters() {
        let dir = TempDir::new().unwrap();
        let router = server(&dir).router();

        let xml = r#"<w:document xmlns:w="w"><w:body><w:p><w:r><w:t>Café</w:t></w:r></w:p></w:body></w:document>"#;
        let data = build_zip(&[("word/document.xml", xml.as_bytes())]);
        let uploaded = upload(&router, "menu.docx", "application/octet-stream", &data).await;

        let body = json!({ "doc_id": uploaded.doc_id.to_string() });
        let (status, value) = send(router, Method::POST, "/api/extract", Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["status"], "processed");
        assert_eq!(value["extracted_text_length"], 4);
    }

    #[tokio::test]
    async fn test_extract_failure_marks_error() {
        let dir = TempDir::new().unwrap();
        let router = server(&dir).router();

        let uploaded = upload(&router, "blob.bin", "application/octet-stream", &[0xff, 0xfe]).await;
        let body = json!({ "doc_id": uploaded.doc_id });
        let (status, value) = send(router.clone(), Method::POST, "/api/extract", Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["status"], "error");
        assert_eq!(value["extracted_text_length"], 0);

        let uri = format!("/api/documents/{}", uploaded.doc_id);
        let (_, value) = send(router, Method::GET, &uri, None).await;
        assert_eq!(value["status"], "error");
        assert!(value.get("extracted_text").is_none());
    }

    #[tokio::test]
    async fn test_extract_bad_requests() {
        let dir = TempDir::new().unwrap();
        let router = server(&dir).router();

        let (status, value) = send(router.clone(), Method::POST, "/api/extract", Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(value["error"]["type"], "bad_request");

        let body = json!({ "doc_id": "not-a-uuid" });
        let (status, _) = send(router.clone(), Method::POST, "/api/extract", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let body = json!({ "doc_id": Uuid::new_v4() });
        let (status, value) = send(router.clone(), Method::POST, "/api/extract", Some(body)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(value["error"]["type"], "not_found");

        let (status, _) = send(router, Method::GET, "/api/extract", None).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_malformed_json_bodies() {
        let dir = TempDir::new().unwrap();
        let router = server(&dir).router();

        for uri in ["/api/extract", "/api/upload"] {
            let (status, value) = send(router.clone(), Method::POST, uri, None).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
            assert_eq!(value["error"]["type"], "bad_request");
        }

        let (status, value) =
            send(router.clone(), Method::POST, "/api/extract", Some(json!({ "doc_id": 42 }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(value["error"]["type"], "bad_request");

        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/upload")
            .header("content-type", "application/json")
            .body(Body::from("{\"filename\": "))
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_extract_with_missing_bytes_is_storage_error() {
        let dir = TempDir::new().unwrap();
        let router = server(&dir).router();

        let uploaded = upload(&router, "gone.txt", "text/plain", b"soon gone").await;
        std::fs::remove_file(dir.path().join(&uploaded.storage_path)).unwrap();

        let body = json!({ "doc_id": uploaded.doc_id });
        let (status, value) = send(router.clone(), Method::POST, "/api/extract", Some(body)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(value["error"]["type"], "storage_error");

        let uri = format!("/api/documents/{}", uploaded.doc_id);
        let (_, value) = send(router, Method::GET, &uri, None).await;
        assert_eq!(value["status"], "uploaded");
    }

    #[tokio::test]
    async fn test_upload_validation() {
        let dir = TempDir::new().unwrap();
        let router = server(&dir).router();

        let body = json!({ "filename": "a.txt", "contentBase64": "aGk=" });
        let (status, _) = send(router.clone(), Method::POST, "/api/upload", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let body = json!({ "filename": "a.txt", "mime": "text/plain", "contentBase64": "%%%" });
        let (status, _) = send(router.clone(), Method::POST, "/api/upload", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let body = json!({
            "filename": "big.pdf",
            "mime": "application/pdf",
            "size": 11 * 1024 * 1024,
            "contentBase64": "aGk=",
        });
        let (status, value) = send(router, Method::POST, "/api/upload", Some(body)).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(value["error"]["type"], "payload_too_large");
    }

    #[tokio::test]
    async fn test_unknown_document_record() {
        let dir = TempDir::new().unwrap();
        let router = server(&dir).router();

        let uri = format!("/api/documents/{}", Uuid::new_v4());
        let (status, _) = send(router.clone(), Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(router, Method::GET, "/api/documents/nope", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
