//! Owner API HTTP tests

use super::{build_test_router, delete_json, get_json, post_json, put_json, TestAppState};
use crate::api::{
    admin_token, create_test_brand, create_test_owner, create_test_vehicle, viewer_token,
};
use axum::http::{header, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

#[tokio::test]
async fn test_list_owners_sorted_by_name() {
    let state = TestAppState::new();
    state
        .owner_repo
        .add_owner(create_test_owner("Grace", "Hopper", "grace@example.com"))
        .await;
    state
        .owner_repo
        .add_owner(create_test_owner("Ada", "Lovelace", "ada@example.com"))
        .await;
    state
        .owner_repo
        .add_owner(create_test_owner("Alan", "Hopper", "alan@example.com"))
        .await;
    let app = build_test_router(state);

    let (status, body): (_, Option<Value>) =
        get_json(&app, "/api/v1/owners", Some(&viewer_token())).await;

    assert_eq!(status, StatusCode::OK);
    let body = body.unwrap();
    let emails: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["email"].as_str().unwrap())
        .collect();
    assert_eq!(
        emails,
        vec!["alan@example.com", "grace@example.com", "ada@example.com"]
    );
    assert_eq!(body["pagination"]["per_page"], 20);
}

#[tokio::test]
async fn test_create_owner() {
    let app = build_test_router(TestAppState::new());

    let response = post_json::<_, Value>(
        &app,
        "/api/v1/owners",
        &json!({
            "first_name": " Ada ",
            "last_name": "Lovelace",
            "email": "Ada@Example.com",
            "phone": "+44 20 7946 0000"
        }),
        Some(&admin_token()),
    )
    .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let body = response.body.unwrap();
    assert_eq!(body["data"]["first_name"], "Ada");
    assert_eq!(body["data"]["email"], "ada@example.com");
    assert!(response
        .headers
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("/api/v1/owners/"));
}

#[tokio::test]
async fn test_create_owner_invalid_email() {
    let app = build_test_router(TestAppState::new());

    let response = post_json::<_, Value>(
        &app,
        "/api/v1/owners",
        &json!({ "first_name": "Ada", "last_name": "Lovelace", "email": "nope" }),
        Some(&admin_token()),
    )
    .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body.unwrap()["errors"]["email"].is_array());
}

#[tokio::test]
async fn test_create_owner_duplicate_email() {
    let state = TestAppState::new();
    state
        .owner_repo
        .add_owner(create_test_owner("Ada", "Lovelace", "ada@example.com"))
        .await;
    let app = build_test_router(state);

    let response = post_json::<_, Value>(
        &app,
        "/api/v1/owners",
        &json!({ "first_name": "Ada", "last_name": "King", "email": "ADA@example.com" }),
        Some(&admin_token()),
    )
    .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_update_owner_clears_phone() {
    let state = TestAppState::new();
    let mut owner = create_test_owner("Ada", "Lovelace", "ada@example.com");
    owner.phone = Some("+44 20 7946 0000".to_string());
    let id = owner.id;
    state.owner_repo.add_owner(owner).await;
    let app = build_test_router(state);

    let (status, body): (_, Option<Value>) = put_json(
        &app,
        &format!("/api/v1/owners/{}", id),
        &json!({ "last_name": "King", "phone": "" }),
        Some(&admin_token()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let body = body.unwrap();
    assert_eq!(body["data"]["last_name"], "King");
    assert!(body["data"]["phone"].is_null());
}

#[tokio::test]
async fn test_update_owner_requires_fleet_admin() {
    let state = TestAppState::new();
    let owner = create_test_owner("Ada", "Lovelace", "ada@example.com");
    let id = owner.id;
    state.owner_repo.add_owner(owner).await;
    let app = build_test_router(state);

    let (status, _): (_, Option<Value>) = put_json(
        &app,
        &format!("/api/v1/owners/{}", id),
        &json!({ "last_name": "King" }),
        Some(&viewer_token()),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_owner_vehicles() {
    let state = TestAppState::new();
    let brand = create_test_brand("Volvo", "SE");
    let ada = create_test_owner("Ada", "Lovelace", "ada@example.com");
    let grace = create_test_owner("Grace", "Hopper", "grace@example.com");
    let ada_id = ada.id;
    state
        .vehicle_repo
        .add_vehicle(create_test_vehicle("YV1DZ8256C2271234", brand.id, Some(ada.id)))
        .await;
    state
        .vehicle_repo
        .add_vehicle(create_test_vehicle("YV1DZ8256C2271235", brand.id, Some(grace.id)))
        .await;
    state.brand_repo.add_brand(brand).await;
    state.owner_repo.add_owner(ada).await;
    state.owner_repo.add_owner(grace).await;
    let app = build_test_router(state);

    let (status, body): (_, Option<Value>) = get_json(
        &app,
        &format!("/api/v1/owners/{}/vehicles", ada_id),
        Some(&viewer_token()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let body = body.unwrap();
    assert_eq!(body["pagination"]["total"], 1);
    assert_eq!(body["data"][0]["vin"], "YV1DZ8256C2271234");
}

#[tokio::test]
async fn test_owner_vehicles_unknown_owner() {
    let app = build_test_router(TestAppState::new());

    let (status, _): (_, Option<Value>) = get_json(
        &app,
        "/api/v1/owners/6ba7b810-9dad-11d1-80b4-00c04fd430c8/vehicles",
        Some(&viewer_token()),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_owner_with_vehicles() {
    let state = TestAppState::new();
    let owner = create_test_owner("Ada", "Lovelace", "ada@example.com");
    let id = owner.id;
    state
        .vehicle_repo
        .add_vehicle(create_test_vehicle(
            "YV1DZ8256C2271234",
            create_test_brand("Volvo", "SE").id,
            Some(id),
        ))
        .await;
    state.owner_repo.add_owner(owner).await;
    let app = build_test_router(state);

    let (status, _): (_, Option<Value>) = delete_json(
        &app,
        &format!("/api/v1/owners/{}", id),
        Some(&admin_token()),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_delete_owner() {
    let state = TestAppState::new();
    let mut rx = state.events.subscribe();
    let owner = create_test_owner("Ada", "Lovelace", "ada@example.com");
    let id = owner.id;
    state.owner_repo.add_owner(owner).await;
    let app = build_test_router(state);

    let (status, body): (_, Option<Value>) = delete_json(
        &app,
        &format!("/api/v1/owners/{}", id),
        Some(&admin_token()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap()["message"], "Owner deleted successfully");
    let notification = rx.try_recv().unwrap();
    assert_eq!(notification.event_type, "vehicle_owner.deleted");
    assert_eq!(notification.aggregate_id, id.to_string());
}
