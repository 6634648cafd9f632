//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use sqlx::PgPool;
use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::repositories::{
    AuthStore, MemoryAuthStore, MemoryVehicleStore, PgAuthStore, PgVehicleStore, VehicleStore,
};

#[derive(Clone)]
pub struct AppState {
    pub vehicles: Arc<dyn VehicleStore>,
    pub auth: Arc<dyn AuthStore>,
    pub config: EnvironmentConfig,
}

impl AppState {
    /// Estado respaldado por PostgreSQL
    pub fn new(pool: PgPool, config: EnvironmentConfig) -> Self {
        Self {
            vehicles: Arc::new(PgVehicleStore::new(pool.clone())),
            auth: Arc::new(PgAuthStore::new(pool)),
            config,
        }
    }

    /// Estado respaldado en memoria, para tests y demos sin base de datos
    pub fn in_memory(config: EnvironmentConfig) -> Self {
        Self {
            vehicles: Arc::new(MemoryVehicleStore::new()),
            auth: Arc::new(MemoryAuthStore::new()),
            config,
        }
    }
}
