//! Result-union returned by mediator handlers
//!
//! A handler answers with exactly one of four shapes. The HTTP layer
//! pattern-matches the shape to a status code, so handlers never touch
//! transport concerns:
//!
//! | variant    | `into_ok` | `into_created` | `into_no_content` |
//! |------------|-----------|----------------|-------------------|
//! | `Single`   | 200       | 201 + Location | 204               |
//! | `List`     | 200       | 200            | 204               |
//! | `NotFound` | 404       | 404            | 404               |
//! | `Fault`    | fault's   | fault's        | fault's           |

use crate::error::AppError;
use crate::mediator::PipelineResponse;
use crate::problem::ProblemDetails;
use crate::validation::ValidationFailure;
use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Single(T),
    List(Vec<T>),
    NotFound,
    Fault(ProblemDetails),
}

impl<T> Outcome<T> {
    pub fn is_fault(&self) -> bool {
        matches!(self, Outcome::Fault(_))
    }

    pub fn map<U, F>(self, mut f: F) -> Outcome<U>
    where
        F: FnMut(T) -> U,
    {
        match self {
            Outcome::Single(value) => Outcome::Single(f(value)),
            Outcome::List(values) => Outcome::List(values.into_iter().map(f).collect()),
            Outcome::NotFound => Outcome::NotFound,
            Outcome::Fault(problem) => Outcome::Fault(problem),
        }
    }

    /// `Some(value)` → `Single`, `None` → `NotFound`
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(value) => Outcome::Single(value),
            None => Outcome::NotFound,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Single(_) => "single",
            Outcome::List(_) => "list",
            Outcome::NotFound => "not_found",
            Outcome::Fault(_) => "fault",
        }
    }
}

impl<T> From<AppError> for Outcome<T> {
    fn from(err: AppError) -> Self {
        match err {
            AppError::NotFound(_) => Outcome::NotFound,
            other => Outcome::Fault(other.to_problem()),
        }
    }
}

impl<T, E> From<std::result::Result<T, E>> for Outcome<T>
where
    E: Into<AppError>,
{
    fn from(result: std::result::Result<T, E>) -> Self {
        match result {
            Ok(value) => Outcome::Single(value),
            Err(err) => err.into().into(),
        }
    }
}

impl<T: Send + 'static> PipelineResponse for Outcome<T> {
    fn from_validation_failures(failures: Vec<ValidationFailure>) -> Self {
        Outcome::Fault(ProblemDetails::validation(failures))
    }

    fn outcome_label(&self) -> &'static str {
        self.label()
    }
}

impl<T: Serialize> Outcome<T> {
    /// 200 for values, 404 for `NotFound`
    pub fn into_ok(self) -> Response {
        match self {
            Outcome::Single(value) => (StatusCode::OK, Json(value)).into_response(),
            Outcome::List(values) => (StatusCode::OK, Json(values)).into_response(),
            Outcome::NotFound => not_found(),
            Outcome::Fault(problem) => problem.into_response(),
        }
    }

    /// 201 with a `Location` header built from the created value
    pub fn into_created<F>(self, location: F) -> Response
    where
        F: FnOnce(&T) -> String,
    {
        match self {
            Outcome::Single(value) => {
                let location = location(&value);
                let mut response = (StatusCode::CREATED, Json(value)).into_response();
                match HeaderValue::from_str(&location) {
                    Ok(value) => {
                        response.headers_mut().insert(header::LOCATION, value);
                    }
                    Err(_) => {
                        tracing::warn!(location = %location, "Location is not a valid header value")
                    }
                }
                response
            }
            other => other.into_ok(),
        }
    }

    /// 204 when the operation produced a value
    pub fn into_no_content(self) -> Response {
        match self {
            Outcome::Single(_) | Outcome::List(_) => StatusCode::NO_CONTENT.into_response(),
            Outcome::NotFound => not_found(),
            Outcome::Fault(problem) => problem.into_response(),
        }
    }
}

fn not_found() -> Response {
    ProblemDetails::not_found("The requested resource was not found").into_response()
}

impl<T: Serialize> IntoResponse for Outcome<T> {
    fn into_response(self) -> Response {
        self.into_ok()
    }
}
