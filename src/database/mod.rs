//! Módulo de base de datos
//!
//! Maneja la conexión, el pool y las migraciones de PostgreSQL

pub mod connection;

pub use connection::{create_pool, run_migrations};
