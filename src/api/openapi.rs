//! OpenAPI document for the REST surface.

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

use super::dto::{EquipmentLoginRequest, EquipmentRequest};
use super::handlers::{equipment, system};
use crate::domain::{Equipment, EquipmentType, Question};
use crate::error::{ErrorBody, ErrorResponse};

/// Aggregated OpenAPI description of every endpoint.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "Equipment Checklist API",
        description = "Equipment records of the equipment-checklist system."
    ),
    paths(
        equipment::list_equipments,
        equipment::get_equipment,
        equipment::create_equipment,
        equipment::update_equipment,
        equipment::login_equipment,
        equipment::delete_equipment,
        system::health_handler,
        system::ready_handler,
    ),
    components(schemas(
        Equipment,
        EquipmentType,
        Question,
        EquipmentRequest,
        EquipmentLoginRequest,
        ErrorResponse,
        ErrorBody,
    )),
    modifiers(&BearerSecurity),
    tags(
        (name = "Equipments", description = "Equipment records"),
        (name = "System", description = "Health and readiness"),
    )
)]
pub struct ApiDoc;

/// Registers the `bearer` security scheme referenced by the equipment paths.
#[derive(Debug)]
struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_equipment_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/Equipments",
            "/api/Equipments/{id}",
            "/api/Equipments/Auth",
            "/health",
            "/ready",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn registers_bearer_scheme() {
        let doc = ApiDoc::openapi();
        let has_scheme = doc
            .components
            .as_ref()
            .is_some_and(|c| c.security_schemes.contains_key("bearer"));
        assert!(has_scheme);
    }
}
