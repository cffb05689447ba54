//! Model binding: extractors whose rejections are problem details

use crate::problem::ProblemDetails;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        FromRequest, FromRequestParts, Path, Query, Request,
    },
    http::{request::Parts, HeaderMap, StatusCode},
    Json,
};
use serde::de::DeserializeOwned;
use std::convert::Infallible;
use uuid::Uuid;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const CORRELATION_ID_HEADER: &str = "x-correlation-id";
const REQUEST_ID_HEADER: &str = "x-request-id";
pub const ANONYMOUS: &str = "anonymous";

/// JSON body; malformed bodies are answered with a 400 problem, a missing
/// or wrong content type with 415.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ProblemDetails;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let path = req.uri().path().to_string();
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(json_problem(rejection).with_instance(path)),
        }
    }
}

fn json_problem(rejection: JsonRejection) -> ProblemDetails {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => {
            ProblemDetails::new(StatusCode::UNSUPPORTED_MEDIA_TYPE, "Unsupported Media Type")
                .with_detail("Expected request with `Content-Type: application/json`")
        }
        JsonRejection::JsonDataError(err) => ProblemDetails::bad_request(err.body_text()),
        JsonRejection::JsonSyntaxError(_) => {
            ProblemDetails::bad_request("The request body is not valid JSON")
        }
        _ => ProblemDetails::bad_request("Invalid request body"),
    }
}

/// Path parameters; unparsable segments are a 400 problem
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiPath<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ProblemDetails;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(ApiPath(value)),
            Err(rejection) => Err(path_problem(rejection).with_instance(parts.uri.path())),
        }
    }
}

fn path_problem(rejection: PathRejection) -> ProblemDetails {
    match rejection {
        PathRejection::FailedToDeserializePathParams(err) => {
            ProblemDetails::bad_request(err.body_text())
        }
        _ => ProblemDetails::internal(),
    }
}

/// Query string; unparsable values are a 400 problem
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ProblemDetails;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(ApiQuery(value)),
            Err(QueryRejection::FailedToDeserializeQueryString(err)) => {
                Err(ProblemDetails::bad_request(err.body_text()).with_instance(parts.uri.path()))
            }
            Err(_) => Err(ProblemDetails::bad_request("Invalid query string")),
        }
    }
}

/// Who is calling and under which correlation id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub actor: String,
    pub correlation_id: String,
}

impl RequestContext {
    pub fn from_parts(parts: &Parts) -> Self {
        Self::from_headers(&parts.headers)
    }

    pub fn from_headers(headers: &HeaderMap) -> Self {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        Self {
            actor: header(USER_ID_HEADER).unwrap_or_else(|| ANONYMOUS.to_string()),
            correlation_id: header(CORRELATION_ID_HEADER)
                .or_else(|| header(REQUEST_ID_HEADER))
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
        }
    }
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(RequestContext::from_parts(parts))
    }
}
