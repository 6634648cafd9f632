use serde::{Deserialize, Serialize};

use crate::models::Account;

// Login request: los campos faltantes no son error de validación,
// simplemente hacen fallar la autenticación
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
    pub message: String,
}

impl LoginResponse {
    pub fn success(token: String, username: String) -> Self {
        Self {
            token,
            username,
            message: "Admin login successful".to_string(),
        }
    }
}

// Logout response
#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub message: String,
}

impl LogoutResponse {
    pub fn success() -> Self {
        Self {
            message: "Logout successful".to_string(),
        }
    }
}

// Perfil de la cuenta autenticada
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub username: String,
    pub email: String,
    pub is_staff: bool,
    pub is_superuser: bool,
}

impl From<Account> for ProfileResponse {
    fn from(account: Account) -> Self {
        Self {
            username: account.username,
            email: account.email,
            is_staff: account.is_staff,
            is_superuser: account.is_superuser,
        }
    }
}
