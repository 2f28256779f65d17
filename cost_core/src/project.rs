//! # Project Input
//!
//! `ProjectInput` carries the building parameters a user supplies for an
//! estimate: dimensions, material selections and labor figures.
//!
//! The estimation functions in [`crate::estimate`] trust their input. Callers
//! that accept data from outside (HTTP handlers, the CLI, the project store)
//! run [`ProjectInput::validate`] first.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "name": "Riverside Office",
//!   "type": "commercial",
//!   "length": 80.0,
//!   "width": 60.0,
//!   "height": 24.0,
//!   "foundation": "concrete",
//!   "structure": "steel",
//!   "exterior": "glass",
//!   "roofing": "metal",
//!   "laborRate": 45.0,
//!   "laborHours": 5600.0
//! }
//! ```
//!
//! ## Example
//!
//! ```rust
//! use cost_core::project::{ProjectInput, ProjectType};
//!
//! let input = ProjectInput::new("Riverside Office", ProjectType::Commercial, 80.0, 60.0, 24.0, 45.0, 5600.0);
//! assert!(input.validate().is_ok());
//! assert_eq!(input.square_footage().0, 4800.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{EstimateError, EstimateResult};
use crate::units::{CubicFeet, Feet, SquareFeet};

/// Minimum number of characters in a project name
pub const MIN_NAME_LEN: usize = 3;

/// Declares a selection enum with its wire code and display name.
macro_rules! selection_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal {
            $($(#[$vmeta:meta])* $variant:ident => $code:literal, $display:literal;)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
        }

        impl $name {
            /// All variants, in form order
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            /// Lowercase wire code (e.g. "concrete")
            pub fn code(&self) -> &'static str {
                match self {
                    $($name::$variant => $code,)+
                }
            }

            /// Human-readable name for reports
            pub fn display_name(&self) -> &'static str {
                match self {
                    $($name::$variant => $display,)+
                }
            }

            /// Parse from a code or display name, ignoring case and surrounding space
            pub fn from_str_flexible(s: &str) -> EstimateResult<Self> {
                let needle = s.trim().to_lowercase();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| v.code() == needle || v.display_name().to_lowercase() == needle)
                    .ok_or_else(|| {
                        EstimateError::invalid_input(
                            $field,
                            s,
                            format!(
                                "Expected one of: {}",
                                $name::ALL.iter().map(|v| v.code()).collect::<Vec<_>>().join(", ")
                            ),
                        )
                    })
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.display_name())
            }
        }

        impl std::str::FromStr for $name {
            type Err = EstimateError;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $name::from_str_flexible(s)
            }
        }
    };
}

selection_enum! {
    /// Kind of building being estimated
    ProjectType, "type" {
        Residential => "residential", "Residential";
        Commercial => "commercial", "Commercial";
        Industrial => "industrial", "Industrial";
        Infrastructure => "infrastructure", "Infrastructure";
    }
}

selection_enum! {
    /// Foundation system
    Foundation, "foundation" {
        Concrete => "concrete", "Concrete";
        /// Reinforced concrete
        Reinforced => "reinforced", "Reinforced";
        Pile => "pile", "Pile";
    }
}

selection_enum! {
    /// Primary structural system
    Structure, "structure" {
        Steel => "steel", "Steel";
        Concrete => "concrete", "Concrete";
        Wood => "wood", "Wood";
    }
}

selection_enum! {
    /// Exterior cladding
    Exterior, "exterior" {
        Brick => "brick", "Brick";
        Concrete => "concrete", "Concrete";
        Metal => "metal", "Metal";
        Glass => "glass", "Glass";
    }
}

selection_enum! {
    /// Roofing system
    Roofing, "roofing" {
        Metal => "metal", "Metal";
        /// Asphalt shingles
        Shingle => "shingle", "Shingle";
        Membrane => "membrane", "Membrane";
    }
}

/// Building parameters supplied by the user.
///
/// Immutable once handed to the estimator. Dimensions are in feet, labor
/// rate in currency per hour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInput {
    /// Project name shown on reports
    pub name: String,

    /// Building type
    #[serde(rename = "type")]
    pub project_type: ProjectType,

    /// Building length (ft)
    pub length: f64,

    /// Building width (ft)
    pub width: f64,

    /// Building height (ft)
    pub height: f64,

    pub foundation: Foundation,

    pub structure: Structure,

    pub exterior: Exterior,

    pub roofing: Roofing,

    /// Labor rate (currency/hour)
    pub labor_rate: f64,

    /// Total labor hours
    pub labor_hours: f64,

    /// Free-text notes; never used by calculations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_requirements: Option<String>,
}

impl ProjectInput {
    /// Create an input with the default material selections
    /// (concrete foundation, steel structure, glass exterior, metal roof).
    pub fn new(
        name: impl Into<String>,
        project_type: ProjectType,
        length: f64,
        width: f64,
        height: f64,
        labor_rate: f64,
        labor_hours: f64,
    ) -> Self {
        ProjectInput {
            name: name.into(),
            project_type,
            length,
            width,
            height,
            foundation: Foundation::Concrete,
            structure: Structure::Steel,
            exterior: Exterior::Glass,
            roofing: Roofing::Metal,
            labor_rate,
            labor_hours,
            additional_requirements: None,
        }
    }

    /// Footprint area, `length × width`.
    pub fn square_footage(&self) -> SquareFeet {
        Feet(self.length) * Feet(self.width)
    }

    /// Enclosed volume, `length × width × height`.
    pub fn volume(&self) -> CubicFeet {
        self.square_footage() * Feet(self.height)
    }

    /// Validate input parameters.
    ///
    /// Rejects short names and non-positive or non-finite numbers. Enum
    /// membership is already enforced by deserialization.
    pub fn validate(&self) -> EstimateResult<()> {
        if self.name.trim().chars().count() < MIN_NAME_LEN {
            return Err(EstimateError::invalid_input(
                "name",
                self.name.clone(),
                format!("Project name must be at least {} characters", MIN_NAME_LEN),
            ));
        }

        let positives = [
            ("length", self.length, "Length must be positive"),
            ("width", self.width, "Width must be positive"),
            ("height", self.height, "Height must be positive"),
            ("laborRate", self.labor_rate, "Labor rate must be positive"),
            ("laborHours", self.labor_hours, "Labor hours must be positive"),
        ];
        for (field, value, reason) in positives {
            if !value.is_finite() || value <= 0.0 {
                return Err(EstimateError::invalid_input(field, value.to_string(), reason));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ProjectInput {
        ProjectInput::new("Riverside Office", ProjectType::Commercial, 80.0, 60.0, 24.0, 45.0, 5600.0)
    }

    #[test]
    fn test_geometry() {
        let input = sample();
        assert_eq!(input.square_footage(), SquareFeet(4800.0));
        assert_eq!(input.volume(), CubicFeet(115_200.0));
    }

    #[test]
    fn test_valid_input_passes() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_dimensions() {
        let mut input = sample();
        input.width = 0.0;
        match input.validate() {
            Err(EstimateError::InvalidInput { field, .. }) => assert_eq!(field, "width"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }

        let mut input = sample();
        input.labor_hours = -10.0;
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_rejects_non_finite_labor() {
        let mut input = sample();
        input.labor_rate = f64::NAN;
        assert!(input.validate().is_err());

        let mut input = sample();
        input.labor_hours = f64::INFINITY;
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_rejects_short_name() {
        let mut input = sample();
        input.name = "AB".to_string();
        match input.validate() {
            Err(EstimateError::InvalidInput { field, .. }) => assert_eq!(field, "name"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["type"], "commercial");
        assert_eq!(json["laborRate"], 45.0);
        assert_eq!(json["roofing"], "metal");
        assert!(json.get("additionalRequirements").is_none());
    }

    #[test]
    fn test_deserialize_rejects_unknown_enum() {
        let json = r#"{
            "name": "Depot", "type": "spaceport",
            "length": 10, "width": 10, "height": 10,
            "foundation": "pile", "structure": "wood", "exterior": "brick", "roofing": "shingle",
            "laborRate": 30, "laborHours": 100
        }"#;
        assert!(serde_json::from_str::<ProjectInput>(json).is_err());
    }

    #[test]
    fn test_deserialize_with_notes() {
        let json = r#"{
            "name": "Depot", "type": "industrial",
            "length": 10, "width": 10, "height": 10,
            "foundation": "pile", "structure": "wood", "exterior": "brick", "roofing": "shingle",
            "laborRate": 30, "laborHours": 100,
            "additionalRequirements": "Loading dock on north face"
        }"#;
        let input: ProjectInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.project_type, ProjectType::Industrial);
        assert_eq!(input.roofing, Roofing::Shingle);
        assert_eq!(input.additional_requirements.as_deref(), Some("Loading dock on north face"));
    }

    #[test]
    fn test_flexible_parsing() {
        assert_eq!(Foundation::from_str_flexible("  Reinforced ").unwrap(), Foundation::Reinforced);
        assert_eq!("GLASS".parse::<Exterior>().unwrap(), Exterior::Glass);
        match Structure::from_str_flexible("adobe") {
            Err(EstimateError::InvalidInput { field, reason, .. }) => {
                assert_eq!(field, "structure");
                assert!(reason.contains("steel, concrete, wood"));
            }
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_all_lists() {
        assert_eq!(ProjectType::ALL.len(), 4);
        assert_eq!(Foundation::ALL.len(), 3);
        assert_eq!(Exterior::ALL.len(), 4);
        assert_eq!(Roofing::Shingle.to_string(), "Shingle");
    }
}
