//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use docvault_api::{Stores, assemble_state, build_app};
use docvault_core::config::{
    AppConfig, AuthConfig, DatabaseConfig, LoggingConfig, ServerConfig, StorageConfig,
};
use docvault_database::memory::MemoryStore;
use docvault_storage::LocalBlobStore;

/// Admin token every test app is configured with.
pub const ADMIN_TOKEN: &str = "test-admin-token";

/// A password that satisfies the credential rules.
pub const PASSWORD: &str = "Str0ng!Pass";

const BOUNDARY: &str = "docvault-test-boundary";

/// Test application context
pub struct TestApp {
    /// The Axum app for making test requests
    pub router: Router,
    /// Backing store for direct inspection
    pub store: Arc<MemoryStore>,
    /// Upload root; removed when the app is dropped
    pub uploads: TempDir,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Create a new test application over an in-memory store and a
    /// temporary upload directory.
    pub async fn new() -> Self {
        Self::with_upload_limit_mb(1).await
    }

    /// Same as [`TestApp::new`] with a custom upload limit.
    pub async fn with_upload_limit_mb(max_upload_size_mb: u64) -> Self {
        let uploads = TempDir::new().expect("Failed to create upload dir");
        let uploads_dir = uploads.path().to_string_lossy().into_owned();

        let config = AppConfig {
            server: ServerConfig {
                max_upload_size_mb,
                ..ServerConfig::default()
            },
            database: DatabaseConfig {
                url: "postgres://unused/docvault".to_string(),
                max_connections: 1,
                min_connections: 0,
                connect_timeout_seconds: 1,
                idle_timeout_seconds: 1,
            },
            auth: AuthConfig {
                admin_token: ADMIN_TOKEN.to_string(),
                jwt_secret: "integration-test-secret".to_string(),
                session_ttl_seconds: 3600,
            },
            storage: StorageConfig {
                uploads_dir: uploads_dir.clone(),
            },
            logging: LoggingConfig::default(),
        };

        let store = Arc::new(MemoryStore::new());
        let blobs = LocalBlobStore::new(&uploads_dir)
            .await
            .expect("Failed to init blob store");

        let stores = Stores {
            credentials: store.clone(),
            sessions: store.clone(),
            documents: store.clone(),
            blobs: Arc::new(blobs),
        };
        let state = assemble_state(config.clone(), stores).expect("Failed to assemble state");

        Self {
            router: build_app(state),
            store,
            uploads,
            config,
        }
    }

    /// Register a user through the API and return the response.
    pub async fn register(&self, login: &str, password: &str) -> TestResponse {
        let body = serde_json::json!({
            "token": ADMIN_TOKEN,
            "login": login,
            "pswd": password,
        });
        self.request("POST", "/api/register", Some(body), None).await
    }

    /// Sign in and return the raw response.
    pub async fn sign_in(&self, login: &str, password: &str) -> TestResponse {
        let body = serde_json::json!({ "login": login, "pswd": password });
        self.request("POST", "/api/auth", Some(body), None).await
    }

    /// Register a user, sign in, and return the session token.
    pub async fn user(&self, login: &str) -> String {
        let registered = self.register(login, PASSWORD).await;
        assert_eq!(
            registered.status,
            StatusCode::OK,
            "Register failed: {:?}",
            registered.body
        );

        let response = self.sign_in(login, PASSWORD).await;
        assert_eq!(
            response.status,
            StatusCode::OK,
            "Sign-in failed: {:?}",
            response.body
        );

        response.body["response"]["token"]
            .as_str()
            .expect("No token in sign-in response")
            .to_string()
    }

    /// Upload a metadata-only document and return its id.
    pub async fn create_doc(
        &self,
        token: &str,
        name: &str,
        public: bool,
        grants: &[&str],
    ) -> String {
        let mut form = Multipart::new()
            .text("name", name)
            .text("public", if public { "true" } else { "false" })
            .text("json", r#"{"k":"v"}"#);
        for login in grants {
            form = form.text("grant[]", login);
        }

        let response = self.upload(token, form).await;
        assert_eq!(
            response.status,
            StatusCode::OK,
            "Upload failed: {:?}",
            response.body
        );

        self.find_doc_id(token, name).await
    }

    /// Look up the id of one of the caller's own documents by name.
    pub async fn find_doc_id(&self, token: &str, name: &str) -> String {
        let uri = format!("/api/docs?key=name&value={name}&limit=100");
        let listing = self.request("GET", &uri, None, Some(token)).await;
        listing.body["data"]["docs"]
            .as_array()
            .and_then(|docs| docs.iter().find(|d| d["name"] == name))
            .and_then(|d| d["id"].as_str())
            .expect("Uploaded document not listed")
            .to_string()
    }

    /// Post a multipart form to `/api/docs`.
    pub async fn upload(&self, token: &str, form: Multipart) -> TestResponse {
        let req = Request::builder()
            .method("POST")
            .uri("/api/docs")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::from(form.finish()))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(token) = token {
            req = req.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Send a prepared request and collect the response.
    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let bytes = axum::body::to_bytes(response.into_body(), 16 * 1024 * 1024)
            .await
            .expect("Failed to read body")
            .to_vec();

        let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            body,
            bytes,
            content_type,
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body, `Null` when the body is not JSON
    pub body: Value,
    /// Raw body bytes
    pub bytes: Vec<u8>,
    /// `Content-Type` header, if any
    pub content_type: Option<String>,
}

impl TestResponse {
    /// The `error.text` reason of a failed request.
    pub fn error_text(&self) -> &str {
        self.body["error"]["text"].as_str().unwrap_or_default()
    }
}

/// Minimal `multipart/form-data` body builder.
#[derive(Debug, Default)]
pub struct Multipart {
    body: Vec<u8>,
}

impl Multipart {
    /// Start an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a text part.
    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    /// Add a file part.
    pub fn file(mut self, name: &str, filename: &str, data: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(data);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    /// Close the form and return the encoded body.
    pub fn finish(mut self) -> Vec<u8> {
        self.body
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        self.body
    }
}
