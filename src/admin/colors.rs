//! Colores de las insignias de la consola
//!
//! Tablas estáticas de color por valor de enum. Cualquier clave fuera
//! de tabla cae al color de reserva.

use lazy_static::lazy_static;
use std::collections::HashMap;

/// Color aplicado a cualquier valor sin entrada en las tablas
pub const FALLBACK_COLOR: &str = "#6c757d";

lazy_static! {
    pub static ref VEHICLE_TYPE_COLORS: HashMap<&'static str, &'static str> = {
        let mut colors = HashMap::new();
        colors.insert("car", "#007bff"); // Blue
        colors.insert("bike", "#28a745"); // Green
        colors.insert("truck", "#ffc107"); // Yellow
        colors.insert("bus", "#17a2b8"); // Cyan
        colors.insert("van", "#6f42c1"); // Purple
        colors.insert("other", "#6c757d"); // Gray
        colors
    };
    pub static ref VARIANT_COLORS: HashMap<&'static str, &'static str> = {
        let mut colors = HashMap::new();
        colors.insert("base", "#6c757d");
        colors.insert("standard", "#007bff");
        colors.insert("deluxe", "#28a745");
        colors.insert("sport", "#dc3545");
        colors.insert("luxury", "#6610f2");
        colors.insert("limited", "#fd7e14");
        colors.insert("premium", "#20c997");
        colors.insert("custom", "#17a2b8");
        colors
    };
    pub static ref TRANSMISSION_COLORS: HashMap<&'static str, &'static str> = {
        let mut colors = HashMap::new();
        colors.insert("manual", "#007bff");
        colors.insert("automatic", "#28a745");
        colors.insert("semi_automatic", "#ffc107");
        colors
    };
}

pub fn vehicle_type_color(value: &str) -> &'static str {
    VEHICLE_TYPE_COLORS
        .get(value)
        .copied()
        .unwrap_or(FALLBACK_COLOR)
}

pub fn variant_color(value: &str) -> &'static str {
    VARIANT_COLORS.get(value).copied().unwrap_or(FALLBACK_COLOR)
}

pub fn transmission_color(value: &str) -> &'static str {
    TRANSMISSION_COLORS
        .get(value)
        .copied()
        .unwrap_or(FALLBACK_COLOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::vehicle::{Transmission, Variant, VehicleType};

    #[test]
    fn test_known_colors() {
        assert_eq!(vehicle_type_color("car"), "#007bff");
        assert_eq!(vehicle_type_color("van"), "#6f42c1");
        assert_eq!(variant_color("limited"), "#fd7e14");
        assert_eq!(variant_color("premium"), "#20c997");
        assert_eq!(transmission_color("semi_automatic"), "#ffc107");
    }

    #[test]
    fn test_unknown_value_falls_back() {
        assert_eq!(vehicle_type_color("hovercraft"), FALLBACK_COLOR);
        assert_eq!(variant_color(""), FALLBACK_COLOR);
        assert_eq!(transmission_color("cvt"), FALLBACK_COLOR);
    }

    #[test]
    fn test_every_enum_value_has_a_color() {
        for vehicle_type in VehicleType::ALL {
            assert!(VEHICLE_TYPE_COLORS.contains_key(vehicle_type.as_str()));
        }
        for variant in Variant::ALL {
            assert!(VARIANT_COLORS.contains_key(variant.as_str()));
        }
        for transmission in Transmission::ALL {
            assert!(TRANSMISSION_COLORS.contains_key(transmission.as_str()));
        }
    }
}
