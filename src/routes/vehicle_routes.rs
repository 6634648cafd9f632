use axum::{
    extract::{OriginalUri, Query, State},
    http::StatusCode,
    middleware,
    routing::get,
    Json, Router,
};

use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::vehicle_dto::{
    ListVehiclesParams, Paginated, VehicleCreateRequest, VehiclePatchRequest, VehicleResponse,
};
use crate::middleware::auth::{require_staff, require_token};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extract::{AppJson, PathId};

/// CRUD de vehículos; todas las rutas exigen token de cuenta staff
pub fn create_vehicle_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles).post(create_vehicle))
        .route(
            "/:id",
            get(get_vehicle)
                .put(replace_vehicle)
                .patch(patch_vehicle)
                .delete(delete_vehicle),
        )
        .layer(middleware::from_fn(require_staff))
        .layer(middleware::from_fn_with_state(state, require_token))
}

async fn list_vehicles(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<ListVehiclesParams>,
) -> Result<Json<Paginated<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(state.vehicles.clone());
    let response = controller.list(uri.path(), params).await?;
    Ok(Json(response))
}

async fn create_vehicle(
    State(state): State<AppState>,
    AppJson(request): AppJson<VehicleCreateRequest>,
) -> Result<(StatusCode, Json<VehicleResponse>), AppError> {
    let controller = VehicleController::new(state.vehicles.clone());
    let response = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn get_vehicle(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> Result<Json<VehicleResponse>, AppError> {
    let controller = VehicleController::new(state.vehicles.clone());
    let response = controller.retrieve(id).await?;
    Ok(Json(response))
}

async fn replace_vehicle(
    State(state): State<AppState>,
    PathId(id): PathId,
    AppJson(request): AppJson<VehicleCreateRequest>,
) -> Result<Json<VehicleResponse>, AppError> {
    let controller = VehicleController::new(state.vehicles.clone());
    let response = controller.replace(id, request).await?;
    Ok(Json(response))
}

async fn patch_vehicle(
    State(state): State<AppState>,
    PathId(id): PathId,
    AppJson(request): AppJson<VehiclePatchRequest>,
) -> Result<Json<VehicleResponse>, AppError> {
    let controller = VehicleController::new(state.vehicles.clone());
    let response = controller.patch(id, request).await?;
    Ok(Json(response))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> Result<StatusCode, AppError> {
    let controller = VehicleController::new(state.vehicles.clone());
    controller.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
