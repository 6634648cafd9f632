//! Middleware de autenticación por token
//!
//! Este módulo maneja la autenticación con tokens opacos, extracción
//! del header Authorization y verificación de cuentas staff.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
    Extension,
};

use crate::{models::user::Account, state::AppState, utils::errors::AppError};

/// Cuenta autenticada que se inyecta en las requests
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub account: Account,
    /// Clave del token que autenticó esta request (logout la borra)
    pub token_key: String,
}

fn missing_credentials() -> AppError {
    AppError::Unauthorized("Authentication credentials were not provided.".to_string())
}

/// Extrae la clave de un header `Authorization: Token <key>`
fn token_from_header(value: &str) -> Result<&str, AppError> {
    let mut parts = value.split_whitespace();
    match parts.next() {
        Some(keyword) if keyword.eq_ignore_ascii_case("token") => {}
        _ => return Err(missing_credentials()),
    }
    let key = parts.next().ok_or_else(|| {
        AppError::Unauthorized("Invalid token header. No credentials provided.".to_string())
    })?;
    if parts.next().is_some() {
        return Err(AppError::Unauthorized(
            "Invalid token header. Token string should not contain spaces.".to_string(),
        ));
    }
    Ok(key)
}

/// Middleware de autenticación: resuelve el token contra el store
pub async fn require_token(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let key = {
        let header_value = request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(missing_credentials)?;
        token_from_header(header_value)?.to_string()
    };

    let account = state
        .auth
        .account_for_token(&key)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid token.".to_string()))?;

    if !account.is_active {
        return Err(AppError::Unauthorized(
            "User inactive or deleted.".to_string(),
        ));
    }

    request.extensions_mut().insert(CurrentUser {
        account,
        token_key: key,
    });

    Ok(next.run(request).await)
}

/// Middleware para verificar permisos de staff (se apila sobre require_token)
pub async fn require_staff(
    Extension(user): Extension<CurrentUser>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !user.account.is_staff {
        return Err(AppError::Forbidden(
            "You do not have permission to perform this action.".to_string(),
        ));
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_from_header() {
        assert_eq!(token_from_header("Token abc123").unwrap(), "abc123");
        assert_eq!(token_from_header("token abc123").unwrap(), "abc123");
    }

    #[test]
    fn test_rejects_other_schemes() {
        assert!(token_from_header("Bearer abc123").is_err());
        assert!(token_from_header("").is_err());
    }

    #[test]
    fn test_rejects_malformed_token_headers() {
        let err = token_from_header("Token").unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));

        let err = token_from_header("Token abc def").unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }
}
