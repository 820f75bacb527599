//! Equipment CRUD handlers: list, get, create, update, login, delete.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::http::header::LOCATION;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{EquipmentLoginRequest, EquipmentRequest};
use crate::app_state::AppState;
use crate::domain::Equipment;
use crate::error::{ApiError, ErrorResponse};
use crate::service::equipment_service::INVALID_EQUIPMENT_ID;

/// Mount point of the equipment resource.
pub const EQUIPMENTS_PATH: &str = "/api/Equipments";

/// `GET /Equipments` — List every equipment.
///
/// # Errors
///
/// Returns [`ApiError::Internal`] on store failure.
#[utoipa::path(
    get,
    path = "/api/Equipments",
    tag = "Equipments",
    summary = "List equipment",
    description = "Returns every equipment record with its type and the type's checklist questions. Not paginated.",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "All equipment", body = Vec<Equipment>),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse),
    )
)]
pub async fn list_equipments(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let equipments = state.equipment_service.list().await?;
    Ok(Json(equipments))
}

/// `GET /Equipments/{id}` — Get one equipment.
///
/// # Errors
///
/// Returns [`ApiError::NotFound`] if the equipment does not exist.
#[utoipa::path(
    get,
    path = "/api/Equipments/{id}",
    tag = "Equipments",
    summary = "Get equipment",
    description = "Returns a single equipment record without its relations.",
    security(("bearer" = [])),
    params(
        ("id" = String, Path, description = "Equipment ID"),
    ),
    responses(
        (status = 200, description = "Equipment record", body = Equipment),
        (status = 404, description = "Equipment not found", body = ErrorResponse),
    )
)]
pub async fn get_equipment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let equipment = state.equipment_service.get(&id).await?;
    Ok(Json(equipment))
}

/// `POST /Equipments` — Create an equipment.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] on an invalid ID or unknown type,
/// [`ApiError::Conflict`] if the ID is taken.
#[utoipa::path(
    post,
    path = "/api/Equipments",
    tag = "Equipments",
    summary = "Create equipment",
    description = "Creates an equipment record. The ID must be exactly 5 characters and the equipment type must exist.",
    security(("bearer" = [])),
    request_body = EquipmentRequest,
    responses(
        (status = 201, description = "Equipment created", body = Equipment),
        (status = 400, description = "Malformed body, invalid ID or unknown equipment type", body = ErrorResponse),
        (status = 409, description = "Equipment ID already exists", body = ErrorResponse),
    )
)]
pub async fn create_equipment(
    State(state): State<AppState>,
    body: Result<Json<EquipmentRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = body?;
    let equipment = state.equipment_service.create(req.into()).await?;
    let location = format!("{EQUIPMENTS_PATH}/{}", equipment.id);
    Ok((StatusCode::CREATED, [(LOCATION, location)], Json(equipment)))
}

/// `PUT /Equipments/{id}` — Replace an equipment.
///
/// # Errors
///
/// Returns [`ApiError::BadRequest`] on an ID mismatch,
/// [`ApiError::Validation`] on an invalid ID, [`ApiError::NotFound`] if
/// the equipment does not exist.
#[utoipa::path(
    put,
    path = "/api/Equipments/{id}",
    tag = "Equipments",
    summary = "Update equipment",
    description = "Fully replaces an equipment record. The path ID must equal the body ID.",
    security(("bearer" = [])),
    params(
        ("id" = String, Path, description = "Equipment ID"),
    ),
    request_body = EquipmentRequest,
    responses(
        (status = 204, description = "Equipment updated"),
        (status = 400, description = "Malformed body, ID mismatch or invalid ID", body = ErrorResponse),
        (status = 404, description = "Equipment not found", body = ErrorResponse),
    )
)]
pub async fn update_equipment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<EquipmentRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = body?;
    state.equipment_service.update(&id, req.into()).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /Equipments/Auth` — Resolve an equipment by ID for check-in.
///
/// # Errors
///
/// Returns [`ApiError::BadRequest`] if the ID is unknown.
#[utoipa::path(
    post,
    path = "/api/Equipments/Auth",
    tag = "Equipments",
    summary = "Equipment login",
    description = "Looks up an equipment by ID and returns it with its type. No credential is checked and no token is issued.",
    security(("bearer" = [])),
    request_body = EquipmentLoginRequest,
    responses(
        (status = 200, description = "Equipment with its type", body = Equipment),
        (status = 400, description = "Invalid Equipment ID", body = ErrorResponse),
    )
)]
pub async fn login_equipment(
    State(state): State<AppState>,
    body: Result<Json<EquipmentLoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    // An unreadable body or absent ID is treated like an unknown equipment.
    let Ok(Json(EquipmentLoginRequest { id: Some(id) })) = body else {
        return Err(ApiError::BadRequest(INVALID_EQUIPMENT_ID.to_string()));
    };
    let equipment = state.equipment_service.login(&id).await?;
    Ok(Json(equipment))
}

/// `DELETE /Equipments/{id}` — Delete an unreferenced equipment.
///
/// # Errors
///
/// Returns [`ApiError::NotFound`] if the equipment does not exist,
/// [`ApiError::Validation`] if checklists still reference it.
#[utoipa::path(
    delete,
    path = "/api/Equipments/{id}",
    tag = "Equipments",
    summary = "Delete equipment",
    description = "Deletes an equipment that no checklist references and returns the deleted record.",
    security(("bearer" = [])),
    params(
        ("id" = String, Path, description = "Equipment ID"),
    ),
    responses(
        (status = 200, description = "Deleted equipment", body = Equipment),
        (status = 400, description = "Equipment still referenced", body = ErrorResponse),
        (status = 404, description = "Equipment not found", body = ErrorResponse),
    )
)]
pub async fn delete_equipment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let equipment = state.equipment_service.delete(&id).await?;
    Ok(Json(equipment))
}

/// Equipment routes, relative to `/api`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/Equipments", get(list_equipments).post(create_equipment))
        .route("/Equipments/Auth", post(login_equipment))
        .route(
            "/Equipments/{id}",
            get(get_equipment)
                .put(update_equipment)
                .delete(delete_equipment),
        )
}
