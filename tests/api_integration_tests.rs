//! Integration Tests for API Endpoints
//!
//! Full request/response cycles against the seeded catalog: 20 phones and
//! 20 users, default page size 5.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use catalog_api::{create_router, AppState, Config};
use serde_json::Value;
use tower::ServiceExt;

// == Helper Functions ==

fn create_test_app() -> Router {
    create_router(AppState::from_config(&Config::default()).unwrap())
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, String) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = send(app, "GET", uri, None).await;
    (status, serde_json::from_str(&body).unwrap())
}

fn ids(page: &Value) -> Vec<u64> {
    page["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_u64().unwrap())
        .collect()
}

// == List Endpoints ==

#[tokio::test]
async fn test_first_page_of_users() {
    let app = create_test_app();
    let (status, page) = get_json(&app, "/api/users?page=1&limit=5").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&page), vec![1, 2, 3, 4, 5]);
    assert_eq!(page["page"], 1);
    assert_eq!(page["limit"], 5);
    assert_eq!(page["totalItems"], 20);
    assert_eq!(page["totalPages"], 4);
    assert_eq!(
        page["links"]["self"],
        "http://localhost:3000/api/users?page=1&limit=5"
    );
    assert_eq!(
        page["links"]["next"],
        "http://localhost:3000/api/users?page=2&limit=5"
    );
    assert_eq!(
        page["links"]["last"],
        "http://localhost:3000/api/users?page=4&limit=5"
    );
    assert!(page["links"].get("prev").is_none());
}

#[tokio::test]
async fn test_last_page_of_phones() {
    let app = create_test_app();
    let (status, page) = get_json(&app, "/api/phones?page=4&limit=5").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&page), vec![16, 17, 18, 19, 20]);
    assert_eq!(
        page["links"]["prev"],
        "http://localhost:3000/api/phones?page=3&limit=5"
    );
    assert!(page["links"].get("next").is_none());
}

#[tokio::test]
async fn test_page_past_the_end_is_empty() {
    let app = create_test_app();
    let (status, page) = get_json(&app, "/api/phones?page=5&limit=5").await;

    assert_eq!(status, StatusCode::OK);
    assert!(ids(&page).is_empty());
    assert_eq!(page["totalItems"], 20);
    assert_eq!(
        page["links"]["prev"],
        "http://localhost:3000/api/phones?page=4&limit=5"
    );
    assert!(page["links"].get("next").is_none());
}

#[tokio::test]
async fn test_defaults_apply_when_params_missing() {
    let app = create_test_app();
    let (status, page) = get_json(&app, "/api/users").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["page"], 1);
    assert_eq!(page["limit"], 5);
    assert_eq!(ids(&page).len(), 5);
}

#[tokio::test]
async fn test_users_embed_their_client() {
    let app = create_test_app();
    let (_, page) = get_json(&app, "/api/users?page=1&limit=1").await;

    let user = &page["items"][0];
    assert_eq!(user["firstName"], "Prénom 0");
    assert!(user["client"]["email"].as_str().unwrap().ends_with("@user.user"));
}

#[tokio::test]
async fn test_invalid_pagination_rejected() {
    let app = create_test_app();
    for uri in [
        "/api/users?page=0",
        "/api/users?limit=0",
        "/api/users?page=-2",
        "/api/phones?limit=ten",
        "/api/phones?limit=101",
    ] {
        let (status, body) = get_json(&app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert!(body["error"].is_string());
    }

    // Rejected before the cache is consulted.
    let (_, stats) = get_json(&app, "/stats").await;
    assert_eq!(stats["hits"], 0);
    assert_eq!(stats["misses"], 0);
}

// == Caching ==

#[tokio::test]
async fn test_repeat_request_is_cache_hit_with_identical_body() {
    let app = create_test_app();

    let (_, first) = send(&app, "GET", "/api/users?page=2&limit=5", None).await;
    let (_, second) = send(&app, "GET", "/api/users?page=2&limit=5", None).await;
    assert_eq!(first, second);

    let (_, stats) = get_json(&app, "/stats").await;
    assert_eq!(stats["misses"], 1);
    assert_eq!(stats["hits"], 1);
    assert_eq!(stats["total_entries"], 1);
}

#[tokio::test]
async fn test_different_limits_are_cached_separately() {
    let app = create_test_app();
    get_json(&app, "/api/phones?page=1&limit=5").await;
    get_json(&app, "/api/phones?page=1&limit=10").await;

    let (_, stats) = get_json(&app, "/stats").await;
    assert_eq!(stats["misses"], 2);
    assert_eq!(stats["total_entries"], 2);
}

#[tokio::test]
async fn test_create_user_evicts_cached_user_pages() {
    let app = create_test_app();
    let (_, before) = get_json(&app, "/api/users?page=4&limit=5").await;
    assert_eq!(before["totalItems"], 20);
    get_json(&app, "/api/phones?page=1&limit=5").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/users",
        Some(r#"{"firstName":"Ada","lastName":"Lovelace","email":"ada@mail.com","client_id":3}"#),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let created: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(created["id"], 21);
    assert_eq!(created["client"]["id"], 3);

    let (_, stats) = get_json(&app, "/stats").await;
    assert_eq!(stats["invalidations"], 1);
    assert_eq!(stats["total_entries"], 1, "phone page must survive");

    let (_, after) = get_json(&app, "/api/users?page=4&limit=5").await;
    assert_eq!(after["totalItems"], 21);
    assert_eq!(after["totalPages"], 5);
    assert!(after["links"].get("next").is_some());
}

#[tokio::test]
async fn test_delete_phone_then_lists_and_detail_reflect_it() {
    let app = create_test_app();
    let (_, before) = get_json(&app, "/api/phones?page=1&limit=5").await;
    assert_eq!(ids(&before), vec![1, 2, 3, 4, 5]);

    let (status, _) = send(&app, "DELETE", "/api/phones/3", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = get_json(&app, "/api/phones/3").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, after) = get_json(&app, "/api/phones?page=1&limit=5").await;
    assert_eq!(ids(&after), vec![1, 2, 4, 5, 6]);
    assert_eq!(after["totalItems"], 19);
}

#[tokio::test]
async fn test_delete_missing_record_is_not_found() {
    let app = create_test_app();
    get_json(&app, "/api/users?page=1&limit=5").await;

    let (status, _) = send(&app, "DELETE", "/api/users/404", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, stats) = get_json(&app, "/stats").await;
    assert_eq!(stats["total_entries"], 1, "nothing written, nothing invalidated");
}

// == Detail and Validation ==

#[tokio::test]
async fn test_phone_detail() {
    let app = create_test_app();
    let (status, phone) = get_json(&app, "/api/phones/7").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(phone["id"], 7);
    assert_eq!(phone["name"], "nom 6");
}

#[tokio::test]
async fn test_create_user_validation_errors() {
    let app = create_test_app();
    let (status, body) = send(
        &app,
        "POST",
        "/api/users",
        Some(r#"{"firstName":"","lastName":"Doe","email":"not-an-email"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json: Value = serde_json::from_str(&body).unwrap();
    let fields: Vec<&str> = json["violations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["email", "firstName"]);
}

#[tokio::test]
async fn test_wrongly_typed_field_is_a_violation() {
    let app = create_test_app();
    let (status, body) = send(
        &app,
        "POST",
        "/api/users",
        Some(r#"{"firstName":5,"lastName":"x","email":"a@b.c"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["error"], "Validation failed");
    assert_eq!(json["violations"][0]["field"], "firstName");
}

#[tokio::test]
async fn test_malformed_body_is_a_violation() {
    let app = create_test_app();
    let (status, body) = send(&app, "POST", "/api/phones", Some(r#"{"name":"#)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["violations"][0]["field"], "body");

    let (_, stats) = get_json(&app, "/stats").await;
    assert_eq!(stats["invalidations"], 0);
}

#[tokio::test]
async fn test_create_phone_sets_location() {
    let app = create_test_app();
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/phones")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    r#"{"name":"Pixel","brand":"Google","color":"Black","price":599.0,"description":"phone"}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        response.headers()[header::LOCATION],
        "http://localhost:3000/api/phones/21"
    );
}

#[tokio::test]
async fn test_health_endpoint() {
    let (status, json) = get_json(&create_test_app(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
}

// == Over the wire ==

#[tokio::test]
async fn test_served_over_tcp() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(async move {
        axum::serve(listener, create_test_app()).await.unwrap();
    });

    let url = format!("http://{addr}/api/phones?page=2&limit=3");
    let client = reqwest::Client::new();
    let first = client.get(&url).send().await.unwrap();
    assert_eq!(first.status(), reqwest::StatusCode::OK);
    let first: Value = first.json().await.unwrap();
    assert_eq!(ids(&first), vec![4, 5, 6]);

    let second: Value = client.get(&url).send().await.unwrap().json().await.unwrap();
    assert_eq!(first, second);

    server.abort();
}
