//! Brand API HTTP tests

use super::{build_test_router, delete_json, get_json, post_json, put_json, TestAppState};
use crate::api::{admin_token, create_test_brand, create_test_vehicle, viewer_token};
use axum::http::{header, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

#[tokio::test]
async fn test_list_brands_requires_token() {
    let app = build_test_router(TestAppState::new());

    let (status, body): (_, Option<Value>) = get_json(&app, "/api/v1/brands", None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let body = body.unwrap();
    assert_eq!(body["status"], 401);
    assert_eq!(body["detail"], "Missing authorization token");
}

#[tokio::test]
async fn test_list_brands_rejects_bad_token() {
    let app = build_test_router(TestAppState::new());

    let (status, _): (_, Option<Value>) =
        get_json(&app, "/api/v1/brands", Some("not.a.token")).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_list_brands_paginated() {
    let state = TestAppState::new();
    for name in ["Volvo", "Audi", "Saab"] {
        state.brand_repo.add_brand(create_test_brand(name, "SE")).await;
    }
    let app = build_test_router(state);

    let (status, body): (_, Option<Value>) = get_json(
        &app,
        "/api/v1/brands?page=1&per_page=2",
        Some(&viewer_token()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let body = body.unwrap();
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Audi", "Saab"]);
    assert_eq!(body["pagination"]["total"], 3);
    assert_eq!(body["pagination"]["total_pages"], 2);
}

#[tokio::test]
async fn test_list_brands_rejects_zero_page() {
    let app = build_test_router(TestAppState::new());

    let (status, body): (_, Option<Value>) =
        get_json(&app, "/api/v1/brands?page=0", Some(&viewer_token())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.unwrap()["status"], 400);
}

#[tokio::test]
async fn test_list_brands_page_beyond_range_is_empty() {
    let state = TestAppState::new();
    state.brand_repo.add_brand(create_test_brand("Volvo", "SE")).await;
    let app = build_test_router(state);

    let (status, body): (_, Option<Value>) = get_json(
        &app,
        "/api/v1/brands?page=9223372036854775807&per_page=100",
        Some(&viewer_token()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let body = body.unwrap();
    assert!(body["data"].as_array().unwrap().is_empty());
    assert_eq!(body["pagination"]["total"], 1);
}

#[tokio::test]
async fn test_get_brand() {
    let state = TestAppState::new();
    let brand = create_test_brand("Volvo", "SE");
    let id = brand.id;
    state.brand_repo.add_brand(brand).await;
    let app = build_test_router(state);

    let (status, body): (_, Option<Value>) =
        get_json(&app, &format!("/api/v1/brands/{}", id), Some(&viewer_token())).await;

    assert_eq!(status, StatusCode::OK);
    let body = body.unwrap();
    assert_eq!(body["data"]["name"], "Volvo");
    assert_eq!(body["data"]["country_code"], "SE");
    assert_eq!(body["data"]["created_by"], "seed");
}

#[tokio::test]
async fn test_get_brand_not_found() {
    let app = build_test_router(TestAppState::new());

    let (status, body): (_, Option<Value>) = get_json(
        &app,
        "/api/v1/brands/6ba7b810-9dad-11d1-80b4-00c04fd430c8",
        Some(&viewer_token()),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body.unwrap()["status"], 404);
}

#[tokio::test]
async fn test_create_brand() {
    let state = TestAppState::new();
    let mut rx = state.events.subscribe();
    let app = build_test_router(state);

    let response = post_json::<_, Value>(
        &app,
        "/api/v1/brands",
        &json!({ "name": "Volvo", "country_code": "se" }),
        Some(&admin_token()),
    )
    .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let body = response.body.unwrap();
    let id = body["data"]["id"].as_str().unwrap();
    assert_eq!(body["data"]["country_code"], "SE");
    assert_eq!(body["data"]["created_by"], "admin@example.com");
    assert_eq!(
        response.headers.get(header::LOCATION).unwrap(),
        &format!("/api/v1/brands/{}", id)
    );

    let notification = rx.try_recv().unwrap();
    assert_eq!(notification.event_type, "vehicle_brand.created");
    assert_eq!(notification.source, "vehicle-service");
}

#[tokio::test]
async fn test_create_brand_requires_fleet_admin() {
    let state = TestAppState::new();
    let brand_repo = state.brand_repo.clone();
    let app = build_test_router(state);

    let response = post_json::<_, Value>(
        &app,
        "/api/v1/brands",
        &json!({ "name": "Volvo", "country_code": "SE" }),
        Some(&viewer_token()),
    )
    .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body.unwrap()["status"], 403);
    assert_eq!(brand_repo.len().await, 0);
}

#[tokio::test]
async fn test_create_brand_unknown_country() {
    let app = build_test_router(TestAppState::new());

    let response = post_json::<_, Value>(
        &app,
        "/api/v1/brands",
        &json!({ "name": "Lada", "country_code": "RU" }),
        Some(&admin_token()),
    )
    .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let body = response.body.unwrap();
    assert_eq!(
        body["errors"]["country_code"][0],
        "Country 'RU' is not configured"
    );
}

#[tokio::test]
async fn test_create_brand_invalid_input() {
    let app = build_test_router(TestAppState::new());

    let response = post_json::<_, Value>(
        &app,
        "/api/v1/brands",
        &json!({ "name": "", "country_code": "1" }),
        Some(&admin_token()),
    )
    .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let body = response.body.unwrap();
    assert!(body["errors"]["name"].is_array());
    assert!(body["errors"]["country_code"].is_array());
}

#[tokio::test]
async fn test_create_brand_duplicate_name() {
    let state = TestAppState::new();
    state.brand_repo.add_brand(create_test_brand("Volvo", "SE")).await;
    let app = build_test_router(state);

    let response = post_json::<_, Value>(
        &app,
        "/api/v1/brands",
        &json!({ "name": "volvo", "country_code": "SE" }),
        Some(&admin_token()),
    )
    .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body.unwrap()["status"], 409);
}

#[tokio::test]
async fn test_update_brand() {
    let state = TestAppState::new();
    let brand = create_test_brand("Volvo", "SE");
    let id = brand.id;
    state.brand_repo.add_brand(brand).await;
    let app = build_test_router(state);

    let (status, body): (_, Option<Value>) = put_json(
        &app,
        &format!("/api/v1/brands/{}", id),
        &json!({ "country_code": "deu" }),
        Some(&admin_token()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let body = body.unwrap();
    assert_eq!(body["data"]["name"], "Volvo");
    assert_eq!(body["data"]["country_code"], "DEU");
    assert_eq!(body["data"]["modified_by"], "admin@example.com");
}

#[tokio::test]
async fn test_delete_brand() {
    let state = TestAppState::new();
    let brand = create_test_brand("Volvo", "SE");
    let id = brand.id;
    state.brand_repo.add_brand(brand).await;
    let app = build_test_router(state);

    let (status, body): (_, Option<Value>) = delete_json(
        &app,
        &format!("/api/v1/brands/{}", id),
        Some(&admin_token()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap()["message"], "Brand deleted successfully");

    let (status, _): (_, Option<Value>) =
        get_json(&app, &format!("/api/v1/brands/{}", id), Some(&viewer_token())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_brand_in_use() {
    let state = TestAppState::new();
    let brand = create_test_brand("Volvo", "SE");
    let id = brand.id;
    state.brand_repo.add_brand(brand).await;
    state
        .vehicle_repo
        .add_vehicle(create_test_vehicle("YV1DZ8256C2271234", id, None))
        .await;
    let app = build_test_router(state);

    let (status, body): (_, Option<Value>) = delete_json(
        &app,
        &format!("/api/v1/brands/{}", id),
        Some(&admin_token()),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body.unwrap()["detail"]
        .as_str()
        .unwrap()
        .contains("1 vehicle"));
}
