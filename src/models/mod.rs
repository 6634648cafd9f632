//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema PostgreSQL con las convenciones estándar.

pub mod user;
pub mod vehicle;

pub use user::{Account, AuthToken, NewAccount};
pub use vehicle::{
    NewVehicle, SearchScope, Transmission, Variant, Vehicle, VehicleChanges, VehicleOrdering,
    VehicleQuery, VehicleType,
};
