//! OpenAPI documentation assembly

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Motorpool Vendor Configuration API",
        version = "0.4.0",
        description = "Country reference data shared by the Motorpool services",
        license(name = "Proprietary"),
        contact(name = "Motorpool Team")
    ),
    tags(
        (name = "System", description = "Health checks"),
        (name = "Countries", description = "ISO 3166-1 countries"),
    ),
    components(
        schemas(
            motorpool_common::StringUuid,
            motorpool_common::ModificationInfo,
            motorpool_common::ProblemDetails,
            motorpool_common::api::HealthResponse,
            crate::domain::CountryDto,
            crate::application::country::CountryInput,
        ),
    ),
    paths(
        motorpool_common::api::health::health,
        motorpool_common::api::health::ready,
        crate::api::country::list,
        crate::api::country::get,
        crate::api::country::get_by_iso_code,
        crate::api::country::create,
        crate::api::country::update,
        crate::api::country::delete,
    ),
)]
pub struct ApiDoc;

impl ApiDoc {
    pub fn build() -> utoipa::openapi::OpenApi {
        Self::openapi()
    }
}
