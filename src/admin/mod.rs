//! Consola administrativa
//!
//! Este módulo contiene la interfaz HTML de administración: branding,
//! colores de insignias y las páginas CRUD de vehículos.

pub mod colors;
pub mod site;
pub mod vehicle_admin;

pub use vehicle_admin::create_admin_router;
