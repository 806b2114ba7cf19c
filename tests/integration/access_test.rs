//! Integration tests for document visibility across users.

mod helpers;

use axum::http::StatusCode;

use helpers::{Multipart, TestApp};

/// Alice owns a private, a public and a shared-with-Bob document.
struct Fixture {
    app: TestApp,
    alice: String,
    bob: String,
    carol: String,
    private_id: String,
    public_id: String,
    shared_id: String,
}

async fn fixture() -> Fixture {
    let app = TestApp::new().await;
    let alice = app.user("alice123").await;
    let bob = app.user("bobby123").await;
    let carol = app.user("carol123").await;

    let private_id = app.create_doc(&alice, "private", false, &[]).await;
    let public_id = app.create_doc(&alice, "public", true, &[]).await;
    let shared_id = app.create_doc(&alice, "shared", false, &["bobby123"]).await;

    Fixture {
        app,
        alice,
        bob,
        carol,
        private_id,
        public_id,
        shared_id,
    }
}

fn listed_names(body: &serde_json::Value) -> Vec<String> {
    body["data"]["docs"]
        .as_array()
        .map(|docs| {
            docs.iter()
                .filter_map(|d| d["name"].as_str().map(str::to_owned))
                .collect()
        })
        .unwrap_or_default()
}

async fn get_status(app: &TestApp, token: &str, id: &str) -> StatusCode {
    app.request("GET", &format!("/api/docs/{id}"), None, Some(token))
        .await
        .status
}

#[tokio::test]
async fn test_owner_sees_everything() {
    let f = fixture().await;

    for id in [&f.private_id, &f.public_id, &f.shared_id] {
        assert_eq!(get_status(&f.app, &f.alice, id).await, StatusCode::OK);
    }

    let own = f.app.request("GET", "/api/docs", None, Some(&f.alice)).await;
    assert_eq!(listed_names(&own.body), vec!["private", "public", "shared"]);
}

#[tokio::test]
async fn test_private_document_is_hidden() {
    let f = fixture().await;

    let response = f
        .app
        .request(
            "GET",
            &format!("/api/docs/{}", f.private_id),
            None,
            Some(&f.bob),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.error_text(), "document not found");

    let head = f
        .app
        .request(
            "HEAD",
            &format!("/api/docs/{}", f.private_id),
            None,
            Some(&f.bob),
        )
        .await;
    assert_eq!(head.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_public_document_is_visible_to_all() {
    let f = fixture().await;

    assert_eq!(get_status(&f.app, &f.bob, &f.public_id).await, StatusCode::OK);
    assert_eq!(get_status(&f.app, &f.carol, &f.public_id).await, StatusCode::OK);
}

#[tokio::test]
async fn test_grant_is_per_user() {
    let f = fixture().await;

    assert_eq!(get_status(&f.app, &f.bob, &f.shared_id).await, StatusCode::OK);
    assert_eq!(
        get_status(&f.app, &f.carol, &f.shared_id).await,
        StatusCode::NOT_FOUND
    );

    let shared = f
        .app
        .request(
            "GET",
            &format!("/api/docs/{}", f.shared_id),
            None,
            Some(&f.bob),
        )
        .await;
    assert_eq!(
        shared.body["data"]["grants"],
        serde_json::json!(["alice123", "bobby123"])
    );
}

#[tokio::test]
async fn test_listing_another_users_documents() {
    let f = fixture().await;

    let as_bob = f
        .app
        .request("GET", "/api/docs?login=alice123", None, Some(&f.bob))
        .await;
    assert_eq!(as_bob.status, StatusCode::OK);
    assert_eq!(listed_names(&as_bob.body), vec!["public", "shared"]);

    let as_carol = f
        .app
        .request("GET", "/api/docs?login=alice123", None, Some(&f.carol))
        .await;
    assert_eq!(listed_names(&as_carol.body), vec!["public"]);
}

#[tokio::test]
async fn test_own_listing_excludes_others() {
    let f = fixture().await;

    let own = f.app.request("GET", "/api/docs", None, Some(&f.bob)).await;
    assert_eq!(own.status, StatusCode::OK);
    assert!(listed_names(&own.body).is_empty());

    // An empty login selector also means the caller's own documents.
    let empty = f
        .app
        .request("GET", "/api/docs?login=", None, Some(&f.bob))
        .await;
    assert!(listed_names(&empty.body).is_empty());
}

#[tokio::test]
async fn test_listing_unknown_login() {
    let f = fixture().await;

    let response = f
        .app
        .request("GET", "/api/docs?login=ghost123", None, Some(&f.bob))
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.error_text(), "user not found");
}

#[tokio::test]
async fn test_only_owner_can_delete() {
    let f = fixture().await;

    for id in [&f.shared_id, &f.public_id] {
        let response = f
            .app
            .request("DELETE", &format!("/api/docs/{id}"), None, Some(&f.bob))
            .await;
        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(get_status(&f.app, &f.alice, id).await, StatusCode::OK);
    }
    assert_eq!(f.app.store.document_count().await, 3);
}

#[tokio::test]
async fn test_unknown_grantee_is_ignored() {
    let f = fixture().await;

    let id = f
        .app
        .create_doc(&f.alice, "lonely", false, &["ghost123"])
        .await;
    let response = f
        .app
        .request("GET", &format!("/api/docs/{id}"), None, Some(&f.alice))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["grants"], serde_json::json!(["alice123"]));
}

#[tokio::test]
async fn test_granted_file_can_be_downloaded() {
    let f = fixture().await;

    let form = Multipart::new()
        .text("name", "contract")
        .text("mime", "application/pdf")
        .text("is_file", "true")
        .text("grant[]", "bobby123")
        .file("file", "contract.pdf", b"%PDF-1.7");
    assert_eq!(f.app.upload(&f.alice, form).await.status, StatusCode::OK);
    let id = f.app.find_doc_id(&f.alice, "contract").await;

    let as_bob = f
        .app
        .request("GET", &format!("/api/docs/{id}"), None, Some(&f.bob))
        .await;
    assert_eq!(as_bob.status, StatusCode::OK);
    assert_eq!(as_bob.bytes, b"%PDF-1.7");
    assert_eq!(as_bob.content_type.as_deref(), Some("application/pdf"));

    assert_eq!(get_status(&f.app, &f.carol, &id).await, StatusCode::NOT_FOUND);
}
