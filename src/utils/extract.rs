//! Extractores con rechazo uniforme
//!
//! Los extractores de axum responden a un body ilegible con texto
//! plano y códigos variados (400/415/422), y a un id de ruta que no es
//! numérico con otro 400 de texto plano. Aquí ambos rechazos se
//! convierten al cuerpo JSON estándar de la aplicación: 400 para el
//! body, 404 para el id (un id que no parsea responde igual que un id
//! sin fila en la tabla).

use async_trait::async_trait;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;

use crate::utils::errors::AppError;

pub struct AppJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for AppJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(AppJson(value)),
            Err(rejection) => Err(AppError::BadRequest(rejection.body_text())),
        }
    }
}

/// Id numérico tomado del segmento `:id` de la ruta
pub struct PathId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for PathId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

        match raw.parse::<i64>() {
            Ok(id) => Ok(PathId(id)),
            Err(_) => Err(AppError::NotFound(format!(
                "vehicle with id '{}' not found",
                raw
            ))),
        }
    }
}
