//! Utilidades de validación
//!
//! Este módulo contiene las funciones helper que los DTOs usan como
//! validadores `custom`. Los mensajes replican el formato que los
//! formularios del frontend ya consumen.

use validator::ValidationError;

use crate::models::{Transmission, Variant, VehicleType};

fn text_error(message: String) -> ValidationError {
    let mut error = ValidationError::new("text");
    error.message = Some(message.into());
    error
}

fn choice_error(value: &str) -> ValidationError {
    let mut error = ValidationError::new("choice");
    error.message = Some(format!("\"{}\" is not a valid choice.", value).into());
    error
}

/// Texto obligatorio: rechaza blancos y longitudes por encima del máximo
pub fn validate_text(value: &str, max: usize) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(text_error("This field may not be blank.".to_string()));
    }
    if value.chars().count() > max {
        return Err(text_error(format!(
            "Ensure this field has no more than {} characters.",
            max
        )));
    }
    Ok(())
}

/// Texto opcional: admite blancos, solo acota la longitud
pub fn validate_optional_text(value: &str, max: usize) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(text_error(format!(
            "Ensure this field has no more than {} characters.",
            max
        )));
    }
    Ok(())
}

// Reglas por campo, cableadas a los atributos `custom` de los DTOs

pub fn validate_brand_name(value: &str) -> Result<(), ValidationError> {
    validate_text(value, 100)
}

pub fn validate_vehicle_name(value: &str) -> Result<(), ValidationError> {
    validate_text(value, 100)
}

pub fn validate_model_number(value: &str) -> Result<(), ValidationError> {
    validate_text(value, 50)
}

pub fn validate_registration_number(value: &str) -> Result<(), ValidationError> {
    validate_text(value, 50)
}

pub fn validate_chassis_number(value: &str) -> Result<(), ValidationError> {
    validate_text(value, 100)
}

pub fn validate_engine_number(value: &str) -> Result<(), ValidationError> {
    validate_text(value, 100)
}

pub fn validate_vehicle_subtype(value: &str) -> Result<(), ValidationError> {
    validate_optional_text(value, 50)
}

pub fn validate_vehicle_type(value: &str) -> Result<(), ValidationError> {
    match VehicleType::parse(value) {
        Some(_) => Ok(()),
        None => Err(choice_error(value)),
    }
}

pub fn validate_variant(value: &str) -> Result<(), ValidationError> {
    match Variant::parse(value) {
        Some(_) => Ok(()),
        None => Err(choice_error(value)),
    }
}

pub fn validate_transmission(value: &str) -> Result<(), ValidationError> {
    match Transmission::parse(value) {
        Some(_) => Ok(()),
        None => Err(choice_error(value)),
    }
}
