//! Repositorios de acceso a datos
//!
//! Cada repositorio expone un trait de almacén con una implementación
//! PostgreSQL para producción y otra en memoria para los tests.

pub mod auth_repository;
pub mod vehicle_repository;

pub use auth_repository::{AuthStore, MemoryAuthStore, PgAuthStore};
pub use vehicle_repository::{MemoryVehicleStore, PgVehicleStore, VehicleStore};
