//! Country API HTTP Handler Tests

use super::{
    build_test_router, delete_json, get_json, post_json, post_json_as, put_json, TestAppState,
};
use crate::api::create_test_country;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use motorpool_common::ProblemDetails;
use serde_json::json;
use tower::ServiceExt;
use vendor_configuration::domain::CountryDto;

// ============================================================================
// Queries
// ============================================================================

#[tokio::test]
async fn test_list_countries_sorted_by_name() {
    let state = TestAppState::new();
    state
        .country_repo
        .add_country(create_test_country("SE", "SWE", "Sweden"))
        .await;
    state
        .country_repo
        .add_country(create_test_country("DK", "DNK", "Denmark"))
        .await;
    let app = build_test_router(state);

    let (status, body): (StatusCode, Option<Vec<CountryDto>>) =
        get_json(&app, "/api/v1/countries").await;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<_> = body.unwrap().into_iter().map(|c| c.name).collect();
    assert_eq!(names, vec!["Denmark", "Sweden"]);
}

#[tokio::test]
async fn test_list_countries_empty() {
    let app = build_test_router(TestAppState::new());

    let (status, body): (StatusCode, Option<Vec<CountryDto>>) =
        get_json(&app, "/api/v1/countries").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.unwrap().is_empty());
}

#[tokio::test]
async fn test_get_country_by_id() {
    let state = TestAppState::new();
    let country = create_test_country("NO", "NOR", "Norway");
    let id = country.id;
    state.country_repo.add_country(country).await;
    let app = build_test_router(state);

    let (status, body): (StatusCode, Option<CountryDto>) =
        get_json(&app, &format!("/api/v1/countries/{}", id)).await;

    assert_eq!(status, StatusCode::OK);
    let dto = body.unwrap();
    assert_eq!(dto.id, id);
    assert_eq!(dto.iso3_code, "NOR");
    assert_eq!(dto.modification.created_by, "seed");
}

#[tokio::test]
async fn test_get_unknown_country_returns_404_problem() {
    let app = build_test_router(TestAppState::new());

    let (status, body): (StatusCode, Option<ProblemDetails>) = get_json(
        &app,
        "/api/v1/countries/00000000-0000-0000-0000-000000000001",
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body.unwrap().status, 404);
}

#[tokio::test]
async fn test_get_malformed_id_returns_400_problem() {
    let app = build_test_router(TestAppState::new());

    let (status, body): (StatusCode, Option<ProblemDetails>) =
        get_json(&app, "/api/v1/countries/not-a-uuid").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body.unwrap().instance.as_deref(),
        Some("/api/v1/countries/not-a-uuid")
    );
}

#[tokio::test]
async fn test_get_by_iso_code_matches_either_code() {
    let state = TestAppState::new();
    state
        .country_repo
        .add_country(create_test_country("FI", "FIN", "Finland"))
        .await;
    let app = build_test_router(state);

    for code in ["fi", "FIN"] {
        let (status, body): (StatusCode, Option<CountryDto>) =
            get_json(&app, &format!("/api/v1/countries/iso/{}", code)).await;
        assert_eq!(status, StatusCode::OK, "lookup by {}", code);
        assert_eq!(body.unwrap().name, "Finland");
    }

    let (status, _): (StatusCode, Option<ProblemDetails>) =
        get_json(&app, "/api/v1/countries/iso/XX").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_by_malformed_iso_code_returns_400() {
    let app = build_test_router(TestAppState::new());

    let (status, body): (StatusCode, Option<ProblemDetails>) =
        get_json(&app, "/api/v1/countries/iso/ABCD").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.unwrap().errors.contains_key("code"));
}

// ============================================================================
// Create
// ============================================================================

#[tokio::test]
async fn test_create_country_returns_201_with_location() {
    let state = TestAppState::new();
    let mut notifications = state.events.subscribe();
    let app = build_test_router(state.clone());

    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/countries")
        .header("Content-Type", "application/json")
        .header("x-user-id", "alice")
        .body(Body::from(
            json!({"iso2_code": "se", "iso3_code": "swe", "name": "Sweden"}).to_string(),
        ))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let location = response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let created: CountryDto = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(location, format!("/api/v1/countries/{}", created.id));
    assert_eq!(created.iso2_code, "SE");
    assert_eq!(created.modification.created_by, "alice");

    let (status, _): (StatusCode, Option<CountryDto>) = get_json(&app, &location).await;
    assert_eq!(status, StatusCode::OK);

    let notification = notifications.try_recv().unwrap();
    assert_eq!(notification.event_type, "country.created");
    assert_eq!(notification.aggregate_id, created.id.to_string());
}

#[tokio::test]
async fn test_create_without_user_header_is_anonymous() {
    let app = build_test_router(TestAppState::new());

    let (status, body): (StatusCode, Option<CountryDto>) = post_json(
        &app,
        "/api/v1/countries",
        &json!({"iso2_code": "IS", "iso3_code": "ISL", "name": "Iceland"}),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body.unwrap().modification.created_by, "anonymous");
}

#[tokio::test]
async fn test_create_duplicate_iso_code_returns_400() {
    let state = TestAppState::new();
    state
        .country_repo
        .add_country(create_test_country("SE", "SWE", "Sweden"))
        .await;
    let app = build_test_router(state.clone());

    let (status, body): (StatusCode, Option<ProblemDetails>) = post_json_as(
        &app,
        "/api/v1/countries",
        &json!({"iso2_code": "se", "iso3_code": "SWZ", "name": "Sweden again"}),
        Some("alice"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let problem = body.unwrap();
    assert_eq!(
        problem.errors["iso2_code"],
        vec!["ISO2 code 'SE' is already in use".to_string()]
    );
    assert!(!problem.errors.contains_key("iso3_code"));
    assert_eq!(state.country_repo.len().await, 1);
}

#[tokio::test]
async fn test_create_missing_fields_returns_400_per_field() {
    let app = build_test_router(TestAppState::new());

    let (status, body): (StatusCode, Option<ProblemDetails>) =
        post_json(&app, "/api/v1/countries", &json!({"iso2_code": "S1"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let problem = body.unwrap();
    assert_eq!(problem.title, "One or more validation errors occurred.");
    let fields: Vec<_> = problem.errors.keys().cloned().collect();
    assert_eq!(fields, vec!["iso2_code", "iso3_code", "name"]);
}

#[tokio::test]
async fn test_create_malformed_json_returns_400_problem() {
    let app = build_test_router(TestAppState::new());

    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/countries")
        .header("Content-Type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/problem+json"
    );
}

// ============================================================================
// Update
// ============================================================================

#[tokio::test]
async fn test_update_country() {
    let state = TestAppState::new();
    let country = create_test_country("NO", "NOR", "Norge");
    let id = country.id;
    state.country_repo.add_country(country).await;
    let app = build_test_router(state);

    let (status, body): (StatusCode, Option<CountryDto>) = put_json(
        &app,
        &format!("/api/v1/countries/{}", id),
        &json!({"iso2_code": "NO", "iso3_code": "NOR", "name": "Norway"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let dto = body.unwrap();
    assert_eq!(dto.name, "Norway");
    assert_eq!(dto.modification.modified_by.as_deref(), Some("anonymous"));
}

#[tokio::test]
async fn test_update_to_code_of_other_country_returns_400() {
    let state = TestAppState::new();
    let norway = create_test_country("NO", "NOR", "Norway");
    let id = norway.id;
    state.country_repo.add_country(norway).await;
    state
        .country_repo
        .add_country(create_test_country("DK", "DNK", "Denmark"))
        .await;
    let app = build_test_router(state);

    let (status, body): (StatusCode, Option<ProblemDetails>) = put_json(
        &app,
        &format!("/api/v1/countries/{}", id),
        &json!({"iso2_code": "NO", "iso3_code": "DNK", "name": "Norway"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.unwrap().errors.contains_key("iso3_code"));
}

#[tokio::test]
async fn test_update_unknown_country_returns_404() {
    let app = build_test_router(TestAppState::new());

    let (status, _): (StatusCode, Option<ProblemDetails>) = put_json(
        &app,
        "/api/v1/countries/00000000-0000-0000-0000-000000000002",
        &json!({"iso2_code": "NO", "iso3_code": "NOR", "name": "Norway"}),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_unknown_country_with_taken_codes_returns_404() {
    let state = TestAppState::new();
    state
        .country_repo
        .add_country(create_test_country("SE", "SWE", "Sweden"))
        .await;
    let app = build_test_router(state);

    let (status, body): (StatusCode, Option<ProblemDetails>) = put_json(
        &app,
        "/api/v1/countries/00000000-0000-0000-0000-000000000002",
        &json!({"iso2_code": "SE", "iso3_code": "SWE", "name": "Sweden"}),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.unwrap().errors.is_empty());
}

// ============================================================================
// Delete
// ============================================================================

#[tokio::test]
async fn test_delete_country_returns_204() {
    let state = TestAppState::new();
    let mut notifications = state.events.subscribe();
    let country = create_test_country("FI", "FIN", "Finland");
    let id = country.id;
    state.country_repo.add_country(country).await;
    let app = build_test_router(state.clone());

    let (status, body): (StatusCode, Option<serde_json::Value>) =
        delete_json(&app, &format!("/api/v1/countries/{}", id)).await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_none());
    assert_eq!(state.country_repo.len().await, 0);
    assert_eq!(notifications.try_recv().unwrap().event_type, "country.deleted");

    let (status, _): (StatusCode, Option<ProblemDetails>) =
        delete_json(&app, &format!("/api/v1/countries/{}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ============================================================================
// System
// ============================================================================

#[tokio::test]
async fn test_health_and_ready() {
    let app = build_test_router(TestAppState::new());

    let (status, body): (StatusCode, Option<serde_json::Value>) = get_json(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap()["status"], "healthy");

    let (status, _): (StatusCode, Option<serde_json::Value>) = get_json(&app, "/ready").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_route_returns_problem() {
    let app = build_test_router(TestAppState::new());

    let (status, body): (StatusCode, Option<ProblemDetails>) =
        get_json(&app, "/api/v1/nowhere").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body.unwrap().instance.as_deref(), Some("/api/v1/nowhere"));
}

#[tokio::test]
async fn test_problem_carries_correlation_id() {
    let app = build_test_router(TestAppState::new());

    let request = Request::builder()
        .uri("/api/v1/countries/00000000-0000-0000-0000-000000000009")
        .header("x-correlation-id", "corr-404")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let problem: ProblemDetails = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(problem.trace_id.as_deref(), Some("corr-404"));
}
