use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use ideabox::server::{build_router, AppState};
use ideabox::store::fs_backend::JsonFileBackend;
use ideabox::store::mem_backend::MemBackend;
use ideabox::store::IdeaStore;
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

fn mem_app() -> (Router, Arc<IdeaStore<MemBackend>>) {
    let store = Arc::new(IdeaStore::with_backend(MemBackend::new()));
    (build_router(AppState::shared(Arc::clone(&store))), store)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            Body::from(value.to_string())
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
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn create_assigns_id_and_empty_tags() {
    let (app, _) = mem_app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/ideas",
        Some(json!({"title": "A", "description": "B", "category": "tech"})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(!body["id"].as_str().unwrap().is_empty());
    assert_eq!(body["tags"], json!([]));
    assert_eq!(body["title"], "A");
    assert_eq!(body["category"], "tech");
    assert!(body["createdAt"].as_str().unwrap().ends_with('Z'));
}

#[tokio::test]
async fn missing_description_is_rejected_without_mutation() {
    let (app, _) = mem_app();
    send(
        &app,
        Method::POST,
        "/api/ideas",
        Some(json!({"title": "Keep", "description": "me", "category": "work"})),
    )
    .await;
    let (_, before) = send(&app, Method::GET, "/api/ideas", None).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/ideas",
        Some(json!({"title": "A", "category": "tech"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Title, description, and category are required");

    let (status, after) = send(&app, Method::GET, "/api/ideas", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(after, before);
}

#[tokio::test]
async fn update_unknown_id_is_not_found() {
    let (app, store) = mem_app();
    send(
        &app,
        Method::POST,
        "/api/ideas",
        Some(json!({"title": "A", "description": "B", "category": "tech"})),
    )
    .await;
    let before = store.get_all();

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/ideas/does-not-exist",
        Some(json!({"title": "X", "description": "Y", "category": "work"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Idea not found");
    assert_eq!(store.get_all(), before);
}

#[tokio::test]
async fn update_replaces_fields_and_keeps_created_at() {
    let (app, _) = mem_app();
    let (_, created) = send(
        &app,
        Method::POST,
        "/api/ideas",
        Some(json!({"title": "A", "description": "B", "category": "tech", "tags": ["x"]})),
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/api/ideas/{}", id),
        Some(json!({"title": "A2", "description": "B2", "category": "business"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["createdAt"], created["createdAt"]);
    assert_eq!(updated["category"], "business");
    assert_eq!(updated["tags"], json!([]));
}

#[tokio::test]
async fn update_validates_before_lookup() {
    let (app, _) = mem_app();
    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/ideas/whatever",
        Some(json!({"title": "", "description": "B", "category": "tech"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_then_delete_again() {
    let (app, _) = mem_app();
    let (_, created) = send(
        &app,
        Method::POST,
        "/api/ideas",
        Some(json!({"title": "A", "description": "B", "category": "tech"})),
    )
    .await;
    let uri = format!("/api/ideas/{}", created["id"].as_str().unwrap());

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (_, listed) = send(&app, Method::GET, "/api/ideas", None).await;
    assert_eq!(listed, json!([]));

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Idea not found");
}

#[tokio::test]
async fn list_is_newest_first() {
    let (app, _) = mem_app();
    for title in ["one", "two", "three"] {
        send(
            &app,
            Method::POST,
            "/api/ideas",
            Some(json!({"title": title, "description": "d", "category": "personal"})),
        )
        .await;
    }
    let (_, listed) = send(&app, Method::GET, "/api/ideas", None).await;
    let titles: Vec<&str> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["three", "two", "one"]);
}

#[tokio::test]
async fn write_failure_is_a_generic_500() {
    let (app, store) = mem_app();
    store.backend().set_simulate_write_error(true);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/ideas",
        Some(json!({"title": "A", "description": "B", "category": "tech"})),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Failed to save idea"}));
}

#[tokio::test]
async fn read_failure_lists_empty() {
    let (app, store) = mem_app();
    store.backend().set_simulate_read_error(true);
    let (status, body) = send(&app, Method::GET, "/api/ideas", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn invalid_category_and_bad_json_are_400() {
    let (app, _) = mem_app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/ideas",
        Some(json!({"title": "A", "description": "B", "category": "hobby"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Category must be one of"));

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/ideas")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_routes_and_methods_are_404() {
    let (app, _) = mem_app();
    for (method, uri) in [
        (Method::GET, "/api/nothing"),
        (Method::PATCH, "/api/ideas"),
        (Method::GET, "/api/ideas/some-id"),
        (Method::POST, "/api/health"),
    ] {
        let (status, body) = send(&app, method, uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
        assert_eq!(body["error"], "Endpoint not found");
    }
}

#[tokio::test]
async fn health_reports_ok() {
    let (app, _) = mem_app();
    let (status, body) = send(&app, Method::GET, "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OK");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn health_details_follow_the_data_file() {
    let dir = TempDir::new().unwrap();
    let store = IdeaStore::with_backend(JsonFileBackend::new(dir.path().join("ideas.json")));
    let app = build_router(AppState::new(store));

    let (status, body) = send(&app, Method::GET, "/api/health/details", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "degraded");

    send(
        &app,
        Method::POST,
        "/api/ideas",
        Some(json!({"title": "A", "description": "B", "category": "tech"})),
    )
    .await;
    let (status, body) = send(&app, Method::GET, "/api/health/details", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["checks"]["dataFile"]["accessible"], true);
}

#[tokio::test]
async fn file_backed_server_persists_across_instances() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data").join("ideas.json");

    let store = IdeaStore::with_backend(JsonFileBackend::new(&path));
    store.initialize().unwrap();
    let app = build_router(AppState::new(store));
    let (_, created) = send(
        &app,
        Method::POST,
        "/api/ideas",
        Some(json!({"title": "A", "description": "B", "category": "creative", "tags": ["x", "x"]})),
    )
    .await;

    let reopened = build_router(AppState::new(IdeaStore::with_backend(JsonFileBackend::new(&path))));
    let (_, listed) = send(&reopened, Method::GET, "/api/ideas", None).await;
    assert_eq!(listed, json!([created]));
    assert_eq!(listed[0]["tags"], json!(["x", "x"]));
}
