//! DTOs del API
//!
//! Requests y responses serializables, separados de los modelos de base
//! de datos.

pub mod auth_dto;
pub mod vehicle_dto;

pub use auth_dto::{LoginRequest, LoginResponse, LogoutResponse, ProfileResponse};
pub use vehicle_dto::{
    ListVehiclesParams, Paginated, VehicleCreateRequest, VehiclePatchRequest, VehicleResponse,
};
