use axum::{
    extract::State,
    middleware,
    routing::{get, post},
    Extension, Json, Router,
};

use crate::controllers::auth_controller::AuthController;
use crate::dto::auth_dto::{LoginRequest, LoginResponse, LogoutResponse, ProfileResponse};
use crate::middleware::auth::{require_token, CurrentUser};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extract::AppJson;

/// Endpoints de autenticación administrativa. Login es público;
/// logout y profile requieren un token vigente.
pub fn create_auth_router(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/logout", post(logout))
        .route("/profile", get(profile))
        .layer(middleware::from_fn_with_state(state, require_token));

    Router::new().route("/login", post(login)).merge(protected)
}

async fn login(
    State(state): State<AppState>,
    AppJson(request): AppJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let controller = AuthController::new(state.auth.clone());
    let response = controller.login(request).await?;
    Ok(Json(response))
}

async fn logout(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<LogoutResponse>, AppError> {
    let controller = AuthController::new(state.auth.clone());
    let response = controller.logout(&user.token_key).await?;
    Ok(Json(response))
}

async fn profile(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<ProfileResponse>, AppError> {
    let controller = AuthController::new(state.auth.clone());
    Ok(Json(controller.profile(user.account)))
}
