//! DTOs de Vehicles
//!
//! Requests de creación/actualización con sus reglas de validación,
//! response del API y envoltorio de paginación. Los requests llevan los
//! campos como `Option` para poder responder "This field is required."
//! campo por campo en lugar de rechazar el cuerpo entero.

use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{NewVehicle, Transmission, Variant, Vehicle, VehicleChanges, VehicleType};
use crate::utils::errors::FieldErrors;
use crate::utils::validation::{
    validate_brand_name, validate_chassis_number, validate_engine_number, validate_model_number,
    validate_registration_number, validate_transmission, validate_variant, validate_vehicle_name,
    validate_vehicle_subtype, validate_vehicle_type,
};

/// Request para crear un vehículo (también cuerpo de PUT)
#[derive(Debug, Default, Deserialize, Validate)]
pub struct VehicleCreateRequest {
    #[validate(required(message = "This field is required."), custom = "validate_brand_name")]
    pub brand_name: Option<String>,

    #[validate(required(message = "This field is required."), custom = "validate_vehicle_name")]
    pub vehicle_name: Option<String>,

    #[validate(required(message = "This field is required."), custom = "validate_model_number")]
    pub model_number: Option<String>,

    #[validate(
        required(message = "This field is required."),
        custom = "validate_registration_number"
    )]
    pub registration_number: Option<String>,

    #[validate(required(message = "This field is required."), custom = "validate_vehicle_type")]
    pub vehicle_type: Option<String>,

    #[validate(custom = "validate_vehicle_subtype")]
    pub vehicle_subtype: Option<String>,

    #[validate(required(message = "This field is required."), custom = "validate_variant")]
    pub variant: Option<String>,

    #[validate(required(message = "This field is required."), custom = "validate_transmission")]
    pub transmission: Option<String>,

    #[validate(required(message = "This field is required."), custom = "validate_chassis_number")]
    pub chassis_number: Option<String>,

    #[validate(required(message = "This field is required."), custom = "validate_engine_number")]
    pub engine_number: Option<String>,

    pub description: Option<String>,
}

impl VehicleCreateRequest {
    /// Valida el request completo y lo convierte en campos listos para
    /// insertar. Los strings se almacenan sin espacios en los extremos.
    pub fn validated(self) -> Result<NewVehicle, FieldErrors> {
        self.validate().map_err(FieldErrors::from)?;

        let vehicle_type = required_field(self.vehicle_type, "vehicle_type")?;
        let variant = required_field(self.variant, "variant")?;
        let transmission = required_field(self.transmission, "transmission")?;

        Ok(NewVehicle {
            brand_name: trimmed(required_field(self.brand_name, "brand_name")?),
            vehicle_name: trimmed(required_field(self.vehicle_name, "vehicle_name")?),
            model_number: trimmed(required_field(self.model_number, "model_number")?),
            registration_number: trimmed(required_field(
                self.registration_number,
                "registration_number",
            )?),
            vehicle_type: parse_choice(&vehicle_type, "vehicle_type", VehicleType::parse)?,
            vehicle_subtype: self.vehicle_subtype.map(trimmed),
            variant: parse_choice(&variant, "variant", Variant::parse)?,
            transmission: parse_choice(&transmission, "transmission", Transmission::parse)?,
            chassis_number: trimmed(required_field(self.chassis_number, "chassis_number")?),
            engine_number: trimmed(required_field(self.engine_number, "engine_number")?),
            description: self.description.map(trimmed),
        })
    }

    /// Versión PUT: mismos requisitos que crear, pero expresada como un
    /// reemplazo completo de campos (los opcionales ausentes se limpian).
    pub fn full_changes(self) -> Result<VehicleChanges, FieldErrors> {
        Ok(VehicleChanges::from(self.validated()?))
    }
}

impl From<NewVehicle> for VehicleChanges {
    fn from(fields: NewVehicle) -> Self {
        VehicleChanges {
            brand_name: Some(fields.brand_name),
            vehicle_name: Some(fields.vehicle_name),
            model_number: Some(fields.model_number),
            registration_number: Some(fields.registration_number),
            vehicle_type: Some(fields.vehicle_type),
            vehicle_subtype: Some(fields.vehicle_subtype),
            variant: Some(fields.variant),
            transmission: Some(fields.transmission),
            chassis_number: Some(fields.chassis_number),
            engine_number: Some(fields.engine_number),
            description: Some(fields.description),
        }
    }
}

/// Request para actualización parcial (PATCH).
///
/// Los campos opcionales del modelo usan doble `Option` para distinguir
/// "no tocar" (ausente) de "limpiar" (null explícito).
#[derive(Debug, Default, Deserialize, Validate)]
pub struct VehiclePatchRequest {
    #[validate(custom = "validate_brand_name")]
    pub brand_name: Option<String>,

    #[validate(custom = "validate_vehicle_name")]
    pub vehicle_name: Option<String>,

    #[validate(custom = "validate_model_number")]
    pub model_number: Option<String>,

    #[validate(custom = "validate_registration_number")]
    pub registration_number: Option<String>,

    #[validate(custom = "validate_vehicle_type")]
    pub vehicle_type: Option<String>,

    #[serde(default, deserialize_with = "double_option")]
    pub vehicle_subtype: Option<Option<String>>,

    #[validate(custom = "validate_variant")]
    pub variant: Option<String>,

    #[validate(custom = "validate_transmission")]
    pub transmission: Option<String>,

    #[validate(custom = "validate_chassis_number")]
    pub chassis_number: Option<String>,

    #[validate(custom = "validate_engine_number")]
    pub engine_number: Option<String>,

    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
}

impl VehiclePatchRequest {
    pub fn changes(self) -> Result<VehicleChanges, FieldErrors> {
        self.validate().map_err(FieldErrors::from)?;

        let vehicle_subtype = match self.vehicle_subtype {
            None => None,
            Some(None) => Some(None),
            Some(Some(raw)) => {
                validate_vehicle_subtype(&raw).map_err(|e| single_error("vehicle_subtype", e))?;
                Some(Some(trimmed(raw)))
            }
        };

        Ok(VehicleChanges {
            brand_name: self.brand_name.map(trimmed),
            vehicle_name: self.vehicle_name.map(trimmed),
            model_number: self.model_number.map(trimmed),
            registration_number: self.registration_number.map(trimmed),
            vehicle_type: self
                .vehicle_type
                .map(|raw| parse_choice(&raw, "vehicle_type", VehicleType::parse))
                .transpose()?,
            vehicle_subtype,
            variant: self
                .variant
                .map(|raw| parse_choice(&raw, "variant", Variant::parse))
                .transpose()?,
            transmission: self
                .transmission
                .map(|raw| parse_choice(&raw, "transmission", Transmission::parse))
                .transpose()?,
            chassis_number: self.chassis_number.map(trimmed),
            engine_number: self.engine_number.map(trimmed),
            description: self.description.map(|inner| inner.map(trimmed)),
        })
    }
}

/// Response de vehículo para la API
#[derive(Debug, Serialize)]
pub struct VehicleResponse {
    pub id: i64,
    pub brand_name: String,
    pub vehicle_name: String,
    pub model_number: String,
    pub registration_number: String,
    pub vehicle_type: VehicleType,
    pub vehicle_subtype: Option<String>,
    pub variant: Variant,
    pub transmission: Transmission,
    pub chassis_number: String,
    pub engine_number: String,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.id,
            brand_name: vehicle.brand_name,
            vehicle_name: vehicle.vehicle_name,
            model_number: vehicle.model_number,
            registration_number: vehicle.registration_number,
            vehicle_type: vehicle.vehicle_type,
            vehicle_subtype: vehicle.vehicle_subtype,
            variant: vehicle.variant,
            transmission: vehicle.transmission,
            chassis_number: vehicle.chassis_number,
            engine_number: vehicle.engine_number,
            description: vehicle.description,
            created_at: vehicle
                .created_at
                .to_rfc3339_opts(SecondsFormat::Micros, true),
            updated_at: vehicle
                .updated_at
                .to_rfc3339_opts(SecondsFormat::Micros, true),
        }
    }
}

/// Query params del listado, tal como llegan en la URL
#[derive(Debug, Default, Deserialize)]
pub struct ListVehiclesParams {
    pub search: Option<String>,
    pub ordering: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
}

/// Envoltorio de paginación del listado
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub count: i64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

fn trimmed(value: String) -> String {
    value.trim().to_string()
}

fn required_field<T>(value: Option<T>, field: &'static str) -> Result<T, FieldErrors> {
    value.ok_or_else(|| FieldErrors::single(field, "This field is required."))
}

fn parse_choice<T>(
    value: &str,
    field: &'static str,
    parse: fn(&str) -> Option<T>,
) -> Result<T, FieldErrors> {
    parse(value)
        .ok_or_else(|| FieldErrors::single(field, format!("\"{}\" is not a valid choice.", value)))
}

fn single_error(field: &str, error: validator::ValidationError) -> FieldErrors {
    let message = error
        .message
        .as_ref()
        .map(|m| m.to_string())
        .unwrap_or_else(|| "Invalid value.".to_string());
    FieldErrors::single(field, message)
}

/// Distingue "campo ausente" (None) de "null explícito" (Some(None))
fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}
