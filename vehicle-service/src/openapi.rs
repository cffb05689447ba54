//! OpenAPI documentation assembly

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Motorpool Vehicle Service API",
        version = "0.4.0",
        description = "Vehicles, brands, owners and application users",
        license(name = "Proprietary"),
        contact(name = "Motorpool Team")
    ),
    tags(
        (name = "System", description = "Health checks"),
        (name = "Brands", description = "Vehicle manufacturers"),
        (name = "Owners", description = "Vehicle owners"),
        (name = "Vehicles", description = "Registered vehicles"),
        (name = "Users", description = "Application users known from access tokens"),
    ),
    security(
        ("bearer_jwt" = [])
    ),
    components(
        schemas(
            motorpool_common::StringUuid,
            motorpool_common::ModificationInfo,
            motorpool_common::ProblemDetails,
            motorpool_common::api::HealthResponse,
            motorpool_common::api::MessageResponse,
            motorpool_common::api::PaginationMeta,
            crate::domain::VehicleBrand,
            crate::domain::CreateBrandInput,
            crate::domain::UpdateBrandInput,
            crate::domain::VehicleOwner,
            crate::domain::CreateOwnerInput,
            crate::domain::UpdateOwnerInput,
            crate::domain::Vehicle,
            crate::domain::CreateVehicleInput,
            crate::domain::UpdateVehicleInput,
            crate::domain::ApplicationUser,
        ),
    ),
    paths(
        motorpool_common::api::health::health,
        motorpool_common::api::health::ready,
        crate::api::brand::list,
        crate::api::brand::get,
        crate::api::brand::create,
        crate::api::brand::update,
        crate::api::brand::delete,
        crate::api::owner::list,
        crate::api::owner::get,
        crate::api::owner::list_vehicles,
        crate::api::owner::create,
        crate::api::owner::update,
        crate::api::owner::delete,
        crate::api::vehicle::list,
        crate::api::vehicle::get,
        crate::api::vehicle::create,
        crate::api::vehicle::update,
        crate::api::vehicle::delete,
        crate::api::user::me,
        crate::api::user::get,
    ),
)]
pub struct ApiDoc;

impl ApiDoc {
    /// The generated document plus the bearer security scheme
    pub fn build() -> utoipa::openapi::OpenApi {
        let mut doc = Self::openapi();
        if let Some(components) = doc.components.as_mut() {
            components.security_schemes.insert(
                "bearer_jwt".to_string(),
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
        doc
    }
}
