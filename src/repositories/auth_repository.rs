//! Repositorio de cuentas y tokens
//!
//! Cuentas administrativas y sus tokens opacos (uno por cuenta). El
//! login reutiliza el token existente si lo hay; el logout lo borra.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

use crate::models::{Account, AuthToken, NewAccount};
use crate::utils::errors::{AppError, AppResult};
use crate::utils::token::generate_token_key;

#[async_trait]
pub trait AuthStore: Send + Sync {
    async fn find_account_by_username(&self, username: &str) -> AppResult<Option<Account>>;

    async fn create_account(&self, fields: NewAccount) -> AppResult<Account>;

    /// Devuelve el token vigente de la cuenta, creándolo si no existe
    async fn get_or_create_token(&self, user_id: i64) -> AppResult<AuthToken>;

    /// Resuelve la cuenta dueña de una clave de token
    async fn account_for_token(&self, key: &str) -> AppResult<Option<Account>>;

    /// Borra la clave; devuelve false si no existía
    async fn delete_token(&self, key: &str) -> AppResult<bool>;
}

/// Implementación sobre PostgreSQL
pub struct PgAuthStore {
    pool: PgPool,
}

impl PgAuthStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthStore for PgAuthStore {
    async fn find_account_by_username(&self, username: &str) -> AppResult<Option<Account>> {
        let account = sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        Ok(account)
    }

    async fn create_account(&self, fields: NewAccount) -> AppResult<Account> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO accounts (username, email, password_hash, is_staff, is_superuser, is_active, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, NOW())
            RETURNING *
            "#,
        )
        .bind(&fields.username)
        .bind(&fields.email)
        .bind(&fields.password_hash)
        .bind(fields.is_staff)
        .bind(fields.is_superuser)
        .bind(fields.is_active)
        .fetch_one(&self.pool)
        .await?;

        Ok(account)
    }

    async fn get_or_create_token(&self, user_id: i64) -> AppResult<AuthToken> {
        // El no-op del DO UPDATE permite RETURNING también cuando el
        // token ya existía, en una sola sentencia atómica
        let token = sqlx::query_as::<_, AuthToken>(
            r#"
            INSERT INTO auth_tokens (key, user_id, created_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id
            RETURNING *
            "#,
        )
        .bind(generate_token_key())
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(token)
    }

    async fn account_for_token(&self, key: &str) -> AppResult<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            SELECT a.*
            FROM accounts a
            JOIN auth_tokens t ON t.user_id = a.id
            WHERE t.key = $1
            "#,
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    async fn delete_token(&self, key: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM auth_tokens WHERE key = $1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Implementación en memoria para tests
#[derive(Debug, Default)]
pub struct MemoryAuthStore {
    inner: std::sync::RwLock<AuthInner>,
}

#[derive(Debug, Default)]
struct AuthInner {
    accounts: Vec<Account>,
    tokens: Vec<AuthToken>,
    next_id: i64,
}

impl MemoryAuthStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_poisoned() -> AppError {
    AppError::Internal("Lock poisoned".to_string())
}

#[async_trait]
impl AuthStore for MemoryAuthStore {
    async fn find_account_by_username(&self, username: &str) -> AppResult<Option<Account>> {
        let inner = self.inner.read().map_err(|_| lock_poisoned())?;
        Ok(inner
            .accounts
            .iter()
            .find(|a| a.username == username)
            .cloned())
    }

    async fn create_account(&self, fields: NewAccount) -> AppResult<Account> {
        let mut inner = self.inner.write().map_err(|_| lock_poisoned())?;

        if inner.accounts.iter().any(|a| a.username == fields.username) {
            return Err(AppError::BadRequest(format!(
                "account with username '{}' already exists",
                fields.username
            )));
        }

        inner.next_id += 1;
        let account = Account {
            id: inner.next_id,
            username: fields.username,
            email: fields.email,
            password_hash: fields.password_hash,
            is_staff: fields.is_staff,
            is_superuser: fields.is_superuser,
            is_active: fields.is_active,
            created_at: Utc::now(),
        };
        inner.accounts.push(account.clone());
        Ok(account)
    }

    async fn get_or_create_token(&self, user_id: i64) -> AppResult<AuthToken> {
        let mut inner = self.inner.write().map_err(|_| lock_poisoned())?;

        if let Some(existing) = inner.tokens.iter().find(|t| t.user_id == user_id) {
            return Ok(existing.clone());
        }

        let token = AuthToken {
            key: generate_token_key(),
            user_id,
            created_at: Utc::now(),
        };
        inner.tokens.push(token.clone());
        Ok(token)
    }

    async fn account_for_token(&self, key: &str) -> AppResult<Option<Account>> {
        let inner = self.inner.read().map_err(|_| lock_poisoned())?;
        let Some(token) = inner.tokens.iter().find(|t| t.key == key) else {
            return Ok(None);
        };
        Ok(inner
            .accounts
            .iter()
            .find(|a| a.id == token.user_id)
            .cloned())
    }

    async fn delete_token(&self, key: &str) -> AppResult<bool> {
        let mut inner = self.inner.write().map_err(|_| lock_poisoned())?;
        let before = inner.tokens.len();
        inner.tokens.retain(|t| t.key != key);
        Ok(inner.tokens.len() != before)
    }
}
