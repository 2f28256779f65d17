//! # Materials Catalog
//!
//! Read-only reference rates for foundation, structure, exterior, roofing,
//! labor and equipment. The catalog is informational: estimates use the
//! fixed rates in [`crate::estimate::tables`], which agree with the rows
//! here.
//!
//! ## Example
//!
//! ```rust
//! use cost_core::materials::{material_by_name, materials_by_category, MaterialCategory};
//!
//! let roofing = materials_by_category(MaterialCategory::Roofing);
//! assert_eq!(roofing.len(), 3);
//!
//! let steel = material_by_name(MaterialCategory::Structure, "Steel Frame").unwrap();
//! assert_eq!(steel.cost_per_unit, 2200.0);
//! ```

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{EstimateError, EstimateResult};

/// Catalog section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialCategory {
    Foundation,
    Structure,
    Exterior,
    Roofing,
    Labor,
    Equipment,
}

impl MaterialCategory {
    pub const ALL: [MaterialCategory; 6] = [
        MaterialCategory::Foundation,
        MaterialCategory::Structure,
        MaterialCategory::Exterior,
        MaterialCategory::Roofing,
        MaterialCategory::Labor,
        MaterialCategory::Equipment,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            MaterialCategory::Foundation => "foundation",
            MaterialCategory::Structure => "structure",
            MaterialCategory::Exterior => "exterior",
            MaterialCategory::Roofing => "roofing",
            MaterialCategory::Labor => "labor",
            MaterialCategory::Equipment => "equipment",
        }
    }

    /// Parse a category code, ignoring case
    pub fn from_str_flexible(s: &str) -> EstimateResult<Self> {
        let needle = s.trim().to_lowercase();
        MaterialCategory::ALL
            .iter()
            .copied()
            .find(|c| c.code() == needle)
            .ok_or_else(|| EstimateError::invalid_input("category", s, "Unknown material category"))
    }
}

impl std::fmt::Display for MaterialCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// One catalog row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialRate {
    /// 1-based row id
    pub id: u32,
    pub category: MaterialCategory,
    pub name: String,
    pub unit: String,
    pub cost_per_unit: f64,
}

const CATALOG_ROWS: &[(MaterialCategory, &str, &str, f64)] = &[
    (MaterialCategory::Foundation, "Concrete", "cu yd", 125.0),
    (MaterialCategory::Foundation, "Reinforced Concrete", "cu yd", 145.0),
    (MaterialCategory::Foundation, "Pile Foundation", "linear ft", 45.0),
    (MaterialCategory::Structure, "Steel Frame", "ton", 2200.0),
    (MaterialCategory::Structure, "Concrete Frame", "cu yd", 180.0),
    (MaterialCategory::Structure, "Wood Frame", "board ft", 3.0),
    (MaterialCategory::Structure, "High-Strength Structural Steel", "ton", 1922.0),
    (MaterialCategory::Exterior, "Brick", "sq ft", 28.0),
    (MaterialCategory::Exterior, "Concrete", "sq ft", 15.0),
    (MaterialCategory::Exterior, "Metal Panels", "sq ft", 22.0),
    (MaterialCategory::Exterior, "Glass Curtain Wall", "sq ft", 75.0),
    (MaterialCategory::Exterior, "Triple-Glazed Glass", "sq ft", 42.0),
    (MaterialCategory::Exterior, "Double-Glazed Glass", "sq ft", 32.0),
    (MaterialCategory::Roofing, "Metal", "sq ft", 18.0),
    (MaterialCategory::Roofing, "Asphalt Shingles", "sq ft", 7.0),
    (MaterialCategory::Roofing, "Membrane", "sq ft", 12.0),
    (MaterialCategory::Labor, "Foundation Work", "hour", 45.0),
    (MaterialCategory::Labor, "Structural Work", "hour", 55.0),
    (MaterialCategory::Labor, "Finishing Work", "hour", 42.0),
    (MaterialCategory::Labor, "Electrical Work", "hour", 65.0),
    (MaterialCategory::Labor, "Plumbing Work", "hour", 68.0),
    (MaterialCategory::Equipment, "Heavy Machinery", "day", 1200.0),
    (MaterialCategory::Equipment, "Scaffolding", "sq ft", 2.5),
    (MaterialCategory::Equipment, "Small Tools", "day", 85.0),
];

static CATALOG: Lazy<Vec<MaterialRate>> = Lazy::new(|| {
    CATALOG_ROWS
        .iter()
        .zip(1u32..)
        .map(|(&(category, name, unit, cost_per_unit), id)| MaterialRate {
            id,
            category,
            name: name.to_string(),
            unit: unit.to_string(),
            cost_per_unit,
        })
        .collect()
});

/// Every catalog row, in id order
pub fn materials() -> &'static [MaterialRate] {
    &CATALOG
}

/// Rows in one category, in id order
pub fn materials_by_category(category: MaterialCategory) -> Vec<&'static MaterialRate> {
    CATALOG.iter().filter(|m| m.category == category).collect()
}

/// Look up a row by id
pub fn material(id: u32) -> Option<&'static MaterialRate> {
    CATALOG.iter().find(|m| m.id == id)
}

/// Look up a row by category and name (case-insensitive)
pub fn material_by_name(category: MaterialCategory, name: &str) -> EstimateResult<&'static MaterialRate> {
    CATALOG
        .iter()
        .find(|m| m.category == category && m.name.eq_ignore_ascii_case(name.trim()))
        .ok_or_else(|| EstimateError::material_not_found(format!("{} ({})", name, category)))
}
