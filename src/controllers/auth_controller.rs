use std::sync::Arc;

use lazy_static::lazy_static;

use crate::dto::auth_dto::{LoginRequest, LoginResponse, LogoutResponse, ProfileResponse};
use crate::models::user::Account;
use crate::repositories::AuthStore;
use crate::utils::errors::{AppError, AppResult};

lazy_static! {
    /// Hash señuelo: la rama de usuario desconocido verifica contra este
    /// hash para que el tiempo de respuesta no delate qué cuentas existen
    static ref DECOY_PASSWORD_HASH: String =
        bcrypt::hash("decoy", bcrypt::DEFAULT_COST).unwrap_or_default();
}

pub struct AuthController {
    store: Arc<dyn AuthStore>,
}

impl AuthController {
    pub fn new(store: Arc<dyn AuthStore>) -> Self {
        Self { store }
    }

    /// Login administrativo. Todas las causas de rechazo (usuario
    /// desconocido, contraseña mala, cuenta inactiva, cuenta no staff)
    /// responden igual para no filtrar qué cuentas existen.
    pub async fn login(&self, request: LoginRequest) -> AppResult<LoginResponse> {
        let username = request.username.unwrap_or_default();
        let password = request.password.unwrap_or_default();

        let account = match self.store.find_account_by_username(&username).await? {
            Some(account) => account,
            None => {
                let _ = bcrypt::verify(&password, &DECOY_PASSWORD_HASH);
                return Err(AppError::InvalidLogin);
            }
        };

        let password_ok = bcrypt::verify(&password, &account.password_hash)
            .map_err(|e| AppError::Hash(e.to_string()))?;

        if !password_ok || !account.is_active || !account.is_staff {
            return Err(AppError::InvalidLogin);
        }

        let token = self.store.get_or_create_token(account.id).await?;
        Ok(LoginResponse::success(token.key, account.username))
    }

    /// Invalida el token que autenticó la request
    pub async fn logout(&self, token_key: &str) -> AppResult<LogoutResponse> {
        self.store.delete_token(token_key).await?;
        Ok(LogoutResponse::success())
    }

    pub fn profile(&self, account: Account) -> ProfileResponse {
        ProfileResponse::from(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Un señuelo malformado haría que verify devuelva Err y la rama de
    // usuario desconocido se saltaría el trabajo de bcrypt
    #[test]
    fn test_decoy_hash_is_well_formed() {
        assert!(bcrypt::verify("whatever", &DECOY_PASSWORD_HASH).is_ok());
        assert!(!bcrypt::verify("whatever", &DECOY_PASSWORD_HASH).unwrap());
    }
}
