//! Country API handlers
//!
//! Handlers only translate HTTP into mediator requests; the `Outcome` each
//! request answers with decides the status code.

use crate::application::country::{
    CountryInput, CreateCountry, DeleteCountry, GetCountries, GetCountryById, GetCountryByIsoCode,
    UpdateCountry,
};
use crate::domain::{CountryDto, StringUuid};
use crate::state::HasMediator;
use axum::{extract::State, response::Response};
use motorpool_common::extract::{ApiJson, ApiPath, RequestContext};
use motorpool_common::{ProblemDetails, Result};

pub fn location(country: &CountryDto) -> String {
    format!("/api/v1/countries/{}", country.id)
}

/// List all countries
#[utoipa::path(
    get,
    path = "/api/v1/countries",
    tag = "Countries",
    responses(
        (status = 200, description = "All countries ordered by name", body = Vec<CountryDto>)
    )
)]
pub async fn list<S: HasMediator>(State(state): State<S>) -> Result<Response> {
    Ok(state.mediator().send(GetCountries).await?.into_ok())
}

/// Get a country by id
#[utoipa::path(
    get,
    path = "/api/v1/countries/{id}",
    tag = "Countries",
    params(("id" = String, Path, description = "Country id")),
    responses(
        (status = 200, description = "Country", body = CountryDto),
        (status = 400, description = "Malformed id", body = ProblemDetails),
        (status = 404, description = "Unknown country", body = ProblemDetails)
    )
)]
pub async fn get<S: HasMediator>(
    State(state): State<S>,
    ApiPath(id): ApiPath<StringUuid>,
) -> Result<Response> {
    Ok(state
        .mediator()
        .send(GetCountryById { id })
        .await?
        .into_ok())
}

/// Get a country by its ISO2 or ISO3 code
#[utoipa::path(
    get,
    path = "/api/v1/countries/iso/{code}",
    tag = "Countries",
    params(("code" = String, Path, description = "ISO 3166-1 alpha-2 or alpha-3 code")),
    responses(
        (status = 200, description = "Country", body = CountryDto),
        (status = 400, description = "Malformed code", body = ProblemDetails),
        (status = 404, description = "Unknown code", body = ProblemDetails)
    )
)]
pub async fn get_by_iso_code<S: HasMediator>(
    State(state): State<S>,
    ApiPath(code): ApiPath<String>,
) -> Result<Response> {
    Ok(state
        .mediator()
        .send(GetCountryByIsoCode { code })
        .await?
        .into_ok())
}

/// Create a country
#[utoipa::path(
    post,
    path = "/api/v1/countries",
    tag = "Countries",
    request_body = CountryInput,
    responses(
        (status = 201, description = "Created", body = CountryDto),
        (status = 400, description = "Validation failed", body = ProblemDetails),
        (status = 409, description = "ISO code taken concurrently", body = ProblemDetails)
    )
)]
pub async fn create<S: HasMediator>(
    State(state): State<S>,
    ctx: RequestContext,
    ApiJson(input): ApiJson<CountryInput>,
) -> Result<Response> {
    Ok(state
        .mediator()
        .send(CreateCountry::new(input, ctx.actor))
        .await?
        .into_created(location))
}

/// Replace a country's codes and name
#[utoipa::path(
    put,
    path = "/api/v1/countries/{id}",
    tag = "Countries",
    params(("id" = String, Path, description = "Country id")),
    request_body = CountryInput,
    responses(
        (status = 200, description = "Updated", body = CountryDto),
        (status = 400, description = "Validation failed", body = ProblemDetails),
        (status = 404, description = "Unknown country", body = ProblemDetails)
    )
)]
pub async fn update<S: HasMediator>(
    State(state): State<S>,
    ctx: RequestContext,
    ApiPath(id): ApiPath<StringUuid>,
    ApiJson(input): ApiJson<CountryInput>,
) -> Result<Response> {
    Ok(state
        .mediator()
        .send(UpdateCountry::new(id, input, ctx.actor))
        .await?
        .into_ok())
}

/// Delete a country
#[utoipa::path(
    delete,
    path = "/api/v1/countries/{id}",
    tag = "Countries",
    params(("id" = String, Path, description = "Country id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Unknown country", body = ProblemDetails)
    )
)]
pub async fn delete<S: HasMediator>(
    State(state): State<S>,
    ctx: RequestContext,
    ApiPath(id): ApiPath<StringUuid>,
) -> Result<Response> {
    Ok(state
        .mediator()
        .send(DeleteCountry {
            id,
            actor: ctx.actor,
        })
        .await?
        .into_no_content())
}
