//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores, validación,
//! paginación, tokens y otras funcionalidades comunes.

pub mod errors;
pub mod extract;
pub mod pagination;
pub mod token;
pub mod validation;
