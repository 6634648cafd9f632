//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle, sus enums de catálogo y los
//! tipos de consulta/escritura que entiende el almacén. Mapea exactamente
//! al schema PostgreSQL con primary key 'id'.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};

/// Tipo de vehículo - almacenado como VARCHAR(20)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum VehicleType {
    Car,
    Bike,
    Truck,
    Bus,
    Van,
    Other,
}

impl VehicleType {
    pub const ALL: [VehicleType; 6] = [
        VehicleType::Car,
        VehicleType::Bike,
        VehicleType::Truck,
        VehicleType::Bus,
        VehicleType::Van,
        VehicleType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleType::Car => "car",
            VehicleType::Bike => "bike",
            VehicleType::Truck => "truck",
            VehicleType::Bus => "bus",
            VehicleType::Van => "van",
            VehicleType::Other => "other",
        }
    }

    /// Etiqueta legible para la consola
    pub fn label(&self) -> &'static str {
        match self {
            VehicleType::Car => "Car",
            VehicleType::Bike => "Bike",
            VehicleType::Truck => "Truck",
            VehicleType::Bus => "Bus",
            VehicleType::Van => "Van",
            VehicleType::Other => "Other",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == raw)
    }
}

/// Variante (nivel de acabado) - almacenado como VARCHAR(30)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum Variant {
    Base,
    Standard,
    Deluxe,
    Sport,
    Luxury,
    Limited,
    Premium,
    Custom,
}

impl Variant {
    pub const ALL: [Variant; 8] = [
        Variant::Base,
        Variant::Standard,
        Variant::Deluxe,
        Variant::Sport,
        Variant::Luxury,
        Variant::Limited,
        Variant::Premium,
        Variant::Custom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Base => "base",
            Variant::Standard => "standard",
            Variant::Deluxe => "deluxe",
            Variant::Sport => "sport",
            Variant::Luxury => "luxury",
            Variant::Limited => "limited",
            Variant::Premium => "premium",
            Variant::Custom => "custom",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Variant::Base => "Base",
            Variant::Standard => "Standard",
            Variant::Deluxe => "Deluxe",
            Variant::Sport => "Sport",
            Variant::Luxury => "Luxury",
            Variant::Limited => "Limited Edition",
            Variant::Premium => "Premium",
            Variant::Custom => "Custom",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == raw)
    }
}

/// Transmisión - almacenado como VARCHAR(20)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum Transmission {
    Manual,
    Automatic,
    SemiAutomatic,
}

impl Transmission {
    pub const ALL: [Transmission; 3] = [
        Transmission::Manual,
        Transmission::Automatic,
        Transmission::SemiAutomatic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Transmission::Manual => "manual",
            Transmission::Automatic => "automatic",
            Transmission::SemiAutomatic => "semi_automatic",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Transmission::Manual => "Manual",
            Transmission::Automatic => "Automatic",
            Transmission::SemiAutomatic => "Semi-Automatic",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == raw)
    }
}

/// Vehicle principal - mapea exactamente a la tabla vehicles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
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
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Vehicle {
    /// Título legible del registro, usado como encabezado en la consola
    pub fn display_title(&self) -> String {
        format!(
            "{} {} ({})",
            self.brand_name, self.vehicle_name, self.registration_number
        )
    }
}

/// Campos de un vehículo nuevo, ya validados por la capa de DTOs
#[derive(Debug, Clone)]
pub struct NewVehicle {
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
}

/// Cambios parciales sobre un vehículo existente.
///
/// `None` significa "no tocar el campo". Para los campos opcionales el
/// nivel exterior distingue además entre asignar un valor y limpiarlo.
#[derive(Debug, Clone, Default)]
pub struct VehicleChanges {
    pub brand_name: Option<String>,
    pub vehicle_name: Option<String>,
    pub model_number: Option<String>,
    pub registration_number: Option<String>,
    pub vehicle_type: Option<VehicleType>,
    pub vehicle_subtype: Option<Option<String>>,
    pub variant: Option<Variant>,
    pub transmission: Option<Transmission>,
    pub chassis_number: Option<String>,
    pub engine_number: Option<String>,
    pub description: Option<Option<String>>,
}

impl VehicleChanges {
    pub fn is_empty(&self) -> bool {
        self.brand_name.is_none()
            && self.vehicle_name.is_none()
            && self.model_number.is_none()
            && self.registration_number.is_none()
            && self.vehicle_type.is_none()
            && self.vehicle_subtype.is_none()
            && self.variant.is_none()
            && self.transmission.is_none()
            && self.chassis_number.is_none()
            && self.engine_number.is_none()
            && self.description.is_none()
    }
}

/// Orden de listado: campo + dirección, con `-created_at` por defecto
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VehicleOrdering {
    BrandNameAsc,
    BrandNameDesc,
    CreatedAtAsc,
    #[default]
    CreatedAtDesc,
}

impl VehicleOrdering {
    /// Interpreta el parámetro `ordering`; valores fuera de la lista
    /// blanca devuelven None y el llamador aplica el orden por defecto.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "brand_name" => Some(VehicleOrdering::BrandNameAsc),
            "-brand_name" => Some(VehicleOrdering::BrandNameDesc),
            "created_at" => Some(VehicleOrdering::CreatedAtAsc),
            "-created_at" => Some(VehicleOrdering::CreatedAtDesc),
            _ => None,
        }
    }

    /// Cláusula ORDER BY. El id entra como desempate para que la
    /// paginación sea estable entre páginas.
    pub fn sql(&self) -> &'static str {
        match self {
            VehicleOrdering::BrandNameAsc => "brand_name ASC, id ASC",
            VehicleOrdering::BrandNameDesc => "brand_name DESC, id DESC",
            VehicleOrdering::CreatedAtAsc => "created_at ASC, id ASC",
            VehicleOrdering::CreatedAtDesc => "created_at DESC, id DESC",
        }
    }
}

/// Sobre qué campos corre la búsqueda de texto
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchScope {
    /// brand_name, vehicle_name, registration_number
    #[default]
    Api,
    /// Los tres de la API más chassis_number y engine_number
    Admin,
}

impl SearchScope {
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            SearchScope::Api => &["brand_name", "vehicle_name", "registration_number"],
            SearchScope::Admin => &[
                "brand_name",
                "vehicle_name",
                "registration_number",
                "chassis_number",
                "engine_number",
            ],
        }
    }
}

/// Consulta de listado ya normalizada (búsqueda, filtros, orden y página)
#[derive(Debug, Clone, Default)]
pub struct VehicleQuery {
    pub search: Option<String>,
    pub search_scope: SearchScope,
    pub vehicle_type: Option<VehicleType>,
    pub variant: Option<Variant>,
    pub transmission: Option<Transmission>,
    pub created_after: Option<DateTime<Utc>>,
    pub created_before: Option<DateTime<Utc>>,
    pub ordering: VehicleOrdering,
    pub limit: i64,
    pub offset: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_round_trip_keys() {
        assert_eq!(VehicleType::parse("car"), Some(VehicleType::Car));
        assert_eq!(VehicleType::parse("van"), Some(VehicleType::Van));
        assert_eq!(VehicleType::parse("plane"), None);
        assert_eq!(Variant::parse("limited"), Some(Variant::Limited));
        assert_eq!(Variant::parse("Limited"), None);
        assert_eq!(
            Transmission::parse("semi_automatic"),
            Some(Transmission::SemiAutomatic)
        );
        assert_eq!(Transmission::parse("semi-automatic"), None);
    }

    #[test]
    fn test_enum_labels() {
        assert_eq!(VehicleType::Bus.label(), "Bus");
        assert_eq!(Variant::Limited.label(), "Limited Edition");
        assert_eq!(Transmission::SemiAutomatic.label(), "Semi-Automatic");
    }

    #[test]
    fn test_ordering_whitelist() {
        assert_eq!(
            VehicleOrdering::parse("brand_name"),
            Some(VehicleOrdering::BrandNameAsc)
        );
        assert_eq!(
            VehicleOrdering::parse("-brand_name"),
            Some(VehicleOrdering::BrandNameDesc)
        );
        assert_eq!(
            VehicleOrdering::parse("-created_at"),
            Some(VehicleOrdering::CreatedAtDesc)
        );
        assert_eq!(VehicleOrdering::parse("registration_number"), None);
        assert_eq!(VehicleOrdering::parse(""), None);
        assert_eq!(VehicleOrdering::default(), VehicleOrdering::CreatedAtDesc);
    }

    #[test]
    fn test_display_title() {
        let vehicle = Vehicle {
            id: 1,
            brand_name: "Toyota".to_string(),
            vehicle_name: "Corolla".to_string(),
            model_number: "E210".to_string(),
            registration_number: "MH12AB1234".to_string(),
            vehicle_type: VehicleType::Car,
            vehicle_subtype: Some("Sedan".to_string()),
            variant: Variant::Standard,
            transmission: Transmission::Manual,
            chassis_number: "CH-001".to_string(),
            engine_number: "EN-001".to_string(),
            description: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(vehicle.display_title(), "Toyota Corolla (MH12AB1234)");
    }
}
