//! Integration tests for document upload, retrieval, listing and deletion.

mod helpers;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};

use helpers::{Multipart, TestApp};

#[tokio::test]
async fn test_upload_metadata_document() {
    let app = TestApp::new().await;
    let token = app.user("alice123").await;

    let form = Multipart::new()
        .text("name", "notes")
        .text("mime", "application/json")
        .text("json", r#"{"title":"hello"}"#);
    let response = app.upload(&token, form).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["json"], r#"{"title":"hello"}"#);
    assert_eq!(response.body["data"]["file"], "");
    assert_eq!(app.store.document_count().await, 1);
}

#[tokio::test]
async fn test_get_metadata_document_returns_json() {
    let app = TestApp::new().await;
    let token = app.user("alice123").await;
    let id = app.create_doc(&token, "notes", false, &[]).await;

    let response = app
        .request("GET", &format!("/api/docs/{id}"), None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let doc = &response.body["data"];
    assert_eq!(doc["id"], id.as_str());
    assert_eq!(doc["name"], "notes");
    assert_eq!(doc["is_file"], false);
    assert_eq!(doc["public"], false);
    assert_eq!(doc["json"], r#"{"k":"v"}"#);
    assert_eq!(doc["grants"], serde_json::json!(["alice123"]));
    assert!(doc.get("file_path").is_none());
    assert!(doc.get("owner_id").is_none());
}

#[tokio::test]
async fn test_file_upload_is_served_back() {
    let app = TestApp::new().await;
    let token = app.user("alice123").await;

    let form = Multipart::new()
        .text("name", "report")
        .text("mime", "text/plain")
        .text("is_file", "true")
        .file("file", "report.txt", b"quarterly numbers");
    let upload = app.upload(&token, form).await;
    assert_eq!(upload.status, StatusCode::OK);
    assert_eq!(upload.body["data"]["file"], "report.txt");

    let id = app.find_doc_id(&token, "report").await;
    let response = app
        .request("GET", &format!("/api/docs/{id}"), None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.bytes, b"quarterly numbers");
    assert_eq!(response.content_type.as_deref(), Some("text/plain"));
}

#[tokio::test]
async fn test_file_without_mime_is_octet_stream() {
    let app = TestApp::new().await;
    let token = app.user("alice123").await;

    let form = Multipart::new()
        .text("name", "blob")
        .text("is_file", "1")
        .file("file", "blob.bin", &[0u8, 1, 2, 3]);
    assert_eq!(app.upload(&token, form).await.status, StatusCode::OK);

    let id = app.find_doc_id(&token, "blob").await;
    let response = app
        .request("GET", &format!("/api/docs/{id}"), None, Some(&token))
        .await;

    assert_eq!(response.bytes, vec![0u8, 1, 2, 3]);
    assert_eq!(
        response.content_type.as_deref(),
        Some("application/octet-stream")
    );
}

#[tokio::test]
async fn test_upload_rejections() {
    let app = TestApp::new().await;
    let token = app.user("alice123").await;

    let no_name = app.upload(&token, Multipart::new().text("json", "{}")).await;
    assert_eq!(no_name.status, StatusCode::BAD_REQUEST);
    assert_eq!(no_name.error_text(), "name is empty");

    let no_file = app
        .upload(
            &token,
            Multipart::new().text("name", "x").text("is_file", "true"),
        )
        .await;
    assert_eq!(no_file.status, StatusCode::BAD_REQUEST);
    assert_eq!(no_file.error_text(), "file not found");

    let bad_flag = app
        .upload(
            &token,
            Multipart::new().text("name", "x").text("public", "maybe"),
        )
        .await;
    assert_eq!(bad_flag.status, StatusCode::BAD_REQUEST);
    assert_eq!(bad_flag.error_text(), "invalid meta data");

    assert_eq!(app.store.document_count().await, 0);
}

#[tokio::test]
async fn test_upload_not_multipart() {
    let app = TestApp::new().await;
    let token = app.user("alice123").await;

    let response = app
        .request(
            "POST",
            "/api/docs",
            Some(serde_json::json!({ "name": "x" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_text(), "invalid meta data");
}

#[tokio::test]
async fn test_upload_over_limit() {
    let app = TestApp::new().await;
    let token = app.user("alice123").await;

    // Over the 1 MiB file limit but within the request body allowance.
    let data = vec![b'a'; 1024 * 1024 + 512 * 1024];
    let form = Multipart::new()
        .text("name", "big")
        .text("is_file", "true")
        .file("file", "big.bin", &data);
    let response = app.upload(&token, form).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_text(), "file is too large");
    assert_eq!(app.store.document_count().await, 0);
}

#[tokio::test]
async fn test_upload_same_filename_conflicts() {
    let app = TestApp::new().await;
    let token = app.user("alice123").await;

    let form = || {
        Multipart::new()
            .text("name", "draft")
            .text("is_file", "true")
            .file("file", "draft.txt", b"v1")
    };
    assert_eq!(app.upload(&token, form()).await.status, StatusCode::OK);

    let response = app.upload(&token, form()).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_text(), "file with this name already exists");
    assert_eq!(app.store.document_count().await, 1);
}

#[tokio::test]
async fn test_same_filename_for_different_owners() {
    let app = TestApp::new().await;
    let alice = app.user("alice123").await;
    let bob = app.user("bobby123").await;

    for token in [&alice, &bob] {
        let form = Multipart::new()
            .text("name", "cv")
            .text("is_file", "true")
            .file("file", "cv.pdf", b"%PDF");
        assert_eq!(app.upload(token, form).await.status, StatusCode::OK);
    }
}

#[tokio::test]
async fn test_check_document() {
    let app = TestApp::new().await;
    let token = app.user("alice123").await;
    let id = app.create_doc(&token, "notes", false, &[]).await;

    let found = app
        .request("HEAD", &format!("/api/docs/{id}"), None, Some(&token))
        .await;
    assert_eq!(found.status, StatusCode::OK);

    let missing = app
        .request(
            "HEAD",
            &format!("/api/docs/{}", uuid::Uuid::new_v4()),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_unknown_or_malformed_id() {
    let app = TestApp::new().await;
    let token = app.user("alice123").await;

    let unknown = app
        .request(
            "GET",
            &format!("/api/docs/{}", uuid::Uuid::new_v4()),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);
    assert_eq!(unknown.error_text(), "document not found");

    let malformed = app
        .request("GET", "/api/docs/not-a-uuid", None, Some(&token))
        .await;
    assert_eq!(malformed.status, StatusCode::NOT_FOUND);
    assert_eq!(malformed.error_text(), "document not found");
}

#[tokio::test]
async fn test_delete_document_and_blob() {
    let app = TestApp::new().await;
    let token = app.user("alice123").await;

    let form = Multipart::new()
        .text("name", "scan")
        .text("is_file", "true")
        .file("file", "scan.png", b"png-bytes");
    assert_eq!(app.upload(&token, form).await.status, StatusCode::OK);
    let id = app.find_doc_id(&token, "scan").await;

    let response = app
        .request("DELETE", &format!("/api/docs/{id}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["response"][id.as_str()], true);

    assert_eq!(app.store.document_count().await, 0);
    assert_eq!(app.store.grant_count().await, 0);

    let gone = app
        .request("GET", &format!("/api/docs/{id}"), None, Some(&token))
        .await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);

    // The blob was removed, so the same file name can be uploaded again.
    let form = Multipart::new()
        .text("name", "scan")
        .text("is_file", "true")
        .file("file", "scan.png", b"png-bytes");
    assert_eq!(app.upload(&token, form).await.status, StatusCode::OK);
}

#[tokio::test]
async fn test_delete_twice_is_not_found() {
    let app = TestApp::new().await;
    let token = app.user("alice123").await;
    let id = app.create_doc(&token, "notes", false, &[]).await;
    let uri = format!("/api/docs/{id}");

    assert_eq!(
        app.request("DELETE", &uri, None, Some(&token)).await.status,
        StatusCode::OK
    );

    let again = app.request("DELETE", &uri, None, Some(&token)).await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
    assert_eq!(again.error_text(), "document not found");
}

#[tokio::test]
async fn test_list_pagination_and_order() {
    let app = TestApp::new().await;
    let token = app.user("alice123").await;
    for name in ["first", "second", "third"] {
        app.create_doc(&token, name, false, &[]).await;
    }

    let names = |body: &serde_json::Value| -> Vec<String> {
        body["data"]["docs"]
            .as_array()
            .unwrap()
            .iter()
            .map(|d| d["name"].as_str().unwrap().to_string())
            .collect()
    };

    let page1 = app
        .request("GET", "/api/docs?limit=2&page=1", None, Some(&token))
        .await;
    let page2 = app
        .request("GET", "/api/docs?limit=2&page=2", None, Some(&token))
        .await;
    let page3 = app
        .request("GET", "/api/docs?limit=2&page=3", None, Some(&token))
        .await;

    assert_eq!(names(&page1.body), vec!["first", "second"]);
    assert_eq!(names(&page2.body), vec!["third"]);
    assert!(names(&page3.body).is_empty());

    // Bad paging values fall back to the defaults.
    let defaults = app
        .request("GET", "/api/docs?limit=abc&page=-1", None, Some(&token))
        .await;
    assert_eq!(defaults.status, StatusCode::OK);
    assert_eq!(names(&defaults.body), vec!["first", "second", "third"]);
}

#[tokio::test]
async fn test_list_filter() {
    let app = TestApp::new().await;
    let token = app.user("alice123").await;
    app.create_doc(&token, "invoice-2024", false, &[]).await;
    app.create_doc(&token, "invoice-2025", false, &[]).await;
    app.create_doc(&token, "holiday", false, &[]).await;

    let filtered = app
        .request("GET", "/api/docs?key=name&value=invoice", None, Some(&token))
        .await;
    assert_eq!(filtered.body["data"]["docs"].as_array().unwrap().len(), 2);

    // Unknown keys are ignored rather than rejected.
    let unknown = app
        .request(
            "GET",
            "/api/docs?key=owner_id&value=invoice",
            None,
            Some(&token),
        )
        .await;
    assert_eq!(unknown.status, StatusCode::OK);
    assert_eq!(unknown.body["data"]["docs"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_cors_preflight() {
    let app = TestApp::new().await;

    let req = Request::builder()
        .method("OPTIONS")
        .uri("/api/docs")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();
    let response = app.send(req).await;

    assert_eq!(response.status, StatusCode::OK);
}
