//! Validation glue between `validator` rules and the mediator pipeline

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

/// A single failed rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationFailure {
    pub field: String,
    pub code: String,
    pub message: String,
}

impl ValidationFailure {
    pub fn new(
        field: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            code: code.into(),
            message: message.into(),
        }
    }

    /// Flatten `validator` errors into failures. Nested structs and lists get
    /// dotted / indexed field paths. The result is sorted by field.
    pub fn from_errors(errors: &ValidationErrors) -> Vec<Self> {
        let mut failures = Vec::new();
        collect(errors, None, &mut failures);
        failures.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.code.cmp(&b.code)));
        failures
    }
}

impl std::fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn collect(errors: &ValidationErrors, prefix: Option<&str>, out: &mut Vec<ValidationFailure>) {
    for (field, kind) in errors.errors() {
        let path = match prefix {
            Some(prefix) => format!("{}.{}", prefix, field),
            None => field.to_string(),
        };
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for error in field_errors {
                    out.push(ValidationFailure::new(
                        path.clone(),
                        error.code.to_string(),
                        describe(error),
                    ));
                }
            }
            ValidationErrorsKind::Struct(nested) => collect(nested, Some(&path), out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect(nested, Some(&format!("{}[{}]", path, index)), out);
                }
            }
        }
    }
}

/// Human-readable message for a rule, preferring the one set on the rule itself
fn describe(error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return message.to_string();
    }

    let param = |name: &str| error.params.get(name).map(|v| v.to_string());

    match error.code.as_ref() {
        "required" => "is required".to_string(),
        "email" => "must be a valid email address".to_string(),
        "url" => "must be a valid URL".to_string(),
        "regex" => "has an invalid format".to_string(),
        "length" => match (param("equal"), param("min"), param("max")) {
            (Some(equal), _, _) => format!("must be exactly {} characters long", equal),
            (None, Some(min), Some(max)) => {
                format!("must be between {} and {} characters long", min, max)
            }
            (None, Some(min), None) => format!("must be at least {} characters long", min),
            (None, None, Some(max)) => format!("must be at most {} characters long", max),
            _ => "has an invalid length".to_string(),
        },
        "range" => match (param("min"), param("max")) {
            (Some(min), Some(max)) => format!("must be between {} and {}", min, max),
            (Some(min), None) => format!("must be at least {}", min),
            (None, Some(max)) => format!("must be at most {}", max),
            _ => "is out of range".to_string(),
        },
        other => format!("failed the '{}' rule", other),
    }
}

/// A rule set evaluated against a request before it reaches its handler.
///
/// Validators may be asynchronous (e.g. uniqueness checks against a
/// repository) and report every failure they find rather than the first one.
#[async_trait]
pub trait RequestValidator<R: Send + Sync>: Send + Sync {
    async fn validate(&self, request: &R) -> Vec<ValidationFailure>;
}

/// Runs the `validator` derive rules of a request
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldRules;

#[async_trait]
impl<R> RequestValidator<R> for FieldRules
where
    R: Validate + Send + Sync,
{
    async fn validate(&self, request: &R) -> Vec<ValidationFailure> {
        match request.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => ValidationFailure::from_errors(&errors),
        }
    }
}
