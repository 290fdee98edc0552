//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variables: DATABASE_URL, JWT_SECRET
//!
//! Run with: cargo test -p integration-tests --test api_tests

use community_core::RecordId;
use integration_tests::{
    assert_json, assert_status, category_form, check_test_env, file_part, png, server_form,
    CategoryResponse, ChannelResponse, CreateChannelRequest, ErrorBody, ServerResponse,
    TestServer,
};
use reqwest::multipart::Form;
use reqwest::StatusCode;

const OWNER: RecordId = RecordId::new(9_000_001);
const MEMBER: RecordId = RecordId::new(9_000_002);

async fn create_category(server: &TestServer, token: &str) -> CategoryResponse {
    let (_, form) = category_form("Category");
    let response = server
        .post_form("/api/v1/categories", token, form)
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

async fn create_server(server: &TestServer, token: &str, category_id: &str) -> ServerResponse {
    let (_, form) = server_form(category_id);
    let response = server
        .post_form("/api/v1/servers", token, form)
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

async fn select(server: &TestServer, query: &str) -> Vec<ServerResponse> {
    let response = server
        .get(&format!("/api/v1/server/select{query}"))
        .await
        .unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_openapi_document_served() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api-docs/openapi.json").await.unwrap();
    let doc: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(doc["paths"]["/api/v1/server/select"].is_object());
}

// ============================================================================
// Category Tests
// ============================================================================

#[tokio::test]
async fn test_category_icon_upload_and_replace() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = server.token_for(OWNER);

    let (name, form) = category_form("Gaming");
    let form = form.part("icon", file_part("f1.png", png(64, 64)));
    let response = server
        .post_form("/api/v1/categories", &token, form)
        .await
        .unwrap();
    let created: CategoryResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(created.name, name);
    let first_icon = created.icon.expect("icon stored");
    assert_eq!(
        first_icon,
        format!("/media/category/{}/category_icon/f1.png", created.id)
    );
    assert!(server.stored_path(&first_icon).exists());

    // Stored file is served back
    let response = server.get(&first_icon).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    // Replacing the icon deletes the old file
    let form = Form::new().part("icon", file_part("f2.png", png(32, 32)));
    let response = server
        .patch_form(&format!("/api/v1/categories/{}", created.id), &token, form)
        .await
        .unwrap();
    let updated: CategoryResponse = assert_json(response, StatusCode::OK).await.unwrap();

    let second_icon = updated.icon.expect("icon stored");
    assert!(second_icon.ends_with("/category_icon/f2.png"));
    assert!(server.stored_path(&second_icon).exists());
    assert!(!server.stored_path(&first_icon).exists());
    assert_eq!(updated.description.as_deref(), Some("Integration test category"));
}

#[tokio::test]
async fn test_category_icon_accepts_any_file() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = server.token_for(OWNER);

    let (_, form) = category_form("Big");
    let form = form.part("icon", file_part("logo.png", png(128, 128)));
    let response = server
        .post_form("/api/v1/categories", &token, form)
        .await
        .unwrap();
    let created: CategoryResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert!(server.stored_path(&created.icon.unwrap()).exists());

    let (_, form) = category_form("Gif");
    let form = form.part("icon", file_part("icon.gif", b"GIF89a".to_vec()));
    let response = server
        .post_form("/api/v1/categories", &token, form)
        .await
        .unwrap();
    let created: CategoryResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert!(created.icon.unwrap().ends_with("/category_icon/icon.gif"));
}

#[tokio::test]
async fn test_category_requires_auth() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, form) = category_form("Anon");
    let response = server
        .client
        .post(format!("{}/api/v1/categories", server.base_url()))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_delete_category_removes_files() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = server.token_for(OWNER);

    let (_, form) = category_form("Doomed");
    let form = form.part("icon", file_part("i.png", png(16, 16)));
    let response = server
        .post_form("/api/v1/categories", &token, form)
        .await
        .unwrap();
    let category: CategoryResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let (_, form) = server_form(&category.id);
    let form = form.part("banner", file_part("b.png", png(400, 100)));
    let response = server
        .post_form("/api/v1/servers", &token, form)
        .await
        .unwrap();
    let created: ServerResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let icon = category.icon.unwrap();
    let banner = created.banner.unwrap();

    let response = server
        .delete_auth(&format!("/api/v1/categories/{}", category.id), &token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    assert!(!server.stored_path(&icon).exists());
    assert!(!server.stored_path(&banner).exists());

    let response = server
        .get(&format!("/api/v1/servers/{}", created.id))
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Server Tests
// ============================================================================

#[tokio::test]
async fn test_create_server_with_files() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = server.token_for(OWNER);
    let category = create_category(&server, &token).await;

    let (name, form) = server_form(&category.id);
    let form = form
        .text("description", "Hangout")
        .part("icon", file_part("i.png", png(70, 70)))
        .part("banner", file_part("b.png", png(1200, 300)));
    let response = server
        .post_form("/api/v1/servers", &token, form)
        .await
        .unwrap();
    let created: ServerResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(created.name, name);
    assert_eq!(created.owner, OWNER.to_string());
    assert_eq!(created.category, category.name);
    assert_eq!(created.description.as_deref(), Some("Hangout"));
    assert_eq!(
        created.icon.as_deref(),
        Some(format!("/media/server/{}/server_icons/i.png", created.id).as_str())
    );
    assert_eq!(
        created.banner.as_deref(),
        Some(format!("/media/server/{}/server_banners/b.png", created.id).as_str())
    );
}

#[tokio::test]
async fn test_server_icon_too_large() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = server.token_for(OWNER);
    let category = create_category(&server, &token).await;

    let (_, form) = server_form(&category.id);
    let form = form
        .part("icon", file_part("big.png", png(71, 70)))
        .part("banner", file_part("b.gif", png(300, 100)));
    let response = server
        .post_form("/api/v1/servers", &token, form)
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();

    assert_eq!(body.error.code, "VALIDATION_ERROR");
    let details = body.error.details.unwrap();
    assert!(details.get("icon").is_some());
    assert!(details.get("banner").is_some());
}

#[tokio::test]
async fn test_clear_server_banner() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = server.token_for(OWNER);
    let category = create_category(&server, &token).await;

    let (_, form) = server_form(&category.id);
    let form = form.part("banner", file_part("b.png", png(300, 100)));
    let response = server
        .post_form("/api/v1/servers", &token, form)
        .await
        .unwrap();
    let created: ServerResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    let banner = created.banner.unwrap();

    let form = Form::new().text("clear_banner", "true");
    let response = server
        .patch_form(&format!("/api/v1/servers/{}", created.id), &token, form)
        .await
        .unwrap();
    let updated: ServerResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert!(updated.banner.is_none());
    assert!(!server.stored_path(&banner).exists());
}

#[tokio::test]
async fn test_only_owner_updates_server() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let owner = server.token_for(OWNER);
    let other = server.token_for(MEMBER);
    let category = create_category(&server, &owner).await;
    let created = create_server(&server, &owner, &category.id).await;

    let form = Form::new().text("name", "Hijacked");
    let response = server
        .patch_form(&format!("/api/v1/servers/{}", created.id), &other, form)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

// ============================================================================
// Listing Tests
// ============================================================================

#[tokio::test]
async fn test_listing_filters() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let owner = server.token_for(OWNER);
    let member = server.token_for(MEMBER);

    let category = create_category(&server, &owner).await;
    let first = create_server(&server, &owner, &category.id).await;
    let second = create_server(&server, &owner, &category.id).await;

    let response = server
        .put_auth(&format!("/api/v1/servers/{}/members/@me", second.id), &member)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    // Category filter keeps both, in id order
    let by_category = select(&server, &format!("?category={}", category.name)).await;
    let ids: Vec<&str> = by_category.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, [first.id.as_str(), second.id.as_str()]);

    // Limit after the category filter
    let limited = select(&server, &format!("?category={}&qty=1", category.name)).await;
    assert_eq!(limited.len(), 1);
    assert_eq!(limited[0].id, first.id);

    // Single server with member count
    let single = select(
        &server,
        &format!("?by_serverid={}&with_num_members=true", second.id),
    )
    .await;
    assert_eq!(single.len(), 1);
    assert_eq!(single[0].num_members, Some(2));

    // Membership filter for the caller
    let response = server
        .get_auth(
            &format!("/api/v1/server/select?by_user=true&category={}", category.name),
            &member,
        )
        .await
        .unwrap();
    let mine: Vec<ServerResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].id, second.id);
}

#[tokio::test]
async fn test_listing_errors() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .get("/api/v1/server/select?by_user=true")
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::UNAUTHORIZED)
        .await
        .unwrap();
    assert_eq!(body.error.code, "AUTHENTICATION_REQUIRED");

    let response = server.get("/api/v1/server/select?qty=abc").await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server
        .get("/api/v1/server/select?by_serverid=1")
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST)
        .await
        .unwrap();
    assert_eq!(body.error.message, "Server with id 1 not found");
}

// ============================================================================
// Channel Tests
// ============================================================================

#[tokio::test]
async fn test_channels_listed_with_server() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = server.token_for(OWNER);
    let category = create_category(&server, &token).await;
    let created = create_server(&server, &token, &category.id).await;

    let response = server
        .post_auth(
            &format!("/api/v1/servers/{}/channels", created.id),
            &token,
            &CreateChannelRequest::named("General-Chat"),
        )
        .await
        .unwrap();
    let channel: ChannelResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(channel.name, "general-chat");
    assert_eq!(channel.server, created.id);
    assert_eq!(channel.owner, OWNER.to_string());

    let listed = select(&server, &format!("?by_serverid={}", created.id)).await;
    assert_eq!(listed[0].channel_server.len(), 1);
    assert_eq!(listed[0].channel_server[0].id, channel.id);
    assert_eq!(listed[0].channel_server[0].topic, "Test topic");
}

// ============================================================================
// Member Tests
// ============================================================================

#[tokio::test]
async fn test_join_and_leave() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let owner = server.token_for(OWNER);
    let member = server.token_for(MEMBER);
    let category = create_category(&server, &owner).await;
    let created = create_server(&server, &owner, &category.id).await;
    let path = format!("/api/v1/servers/{}/members/@me", created.id);

    let response = server.put_auth(&path, &member).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.put_auth(&path, &member).await.unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();

    let response = server.delete_auth(&path, &member).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.delete_auth(&path, &owner).await.unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}
