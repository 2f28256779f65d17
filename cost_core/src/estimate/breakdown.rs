//! # Cost Breakdown Generator
//!
//! Maps project geometry and labor figures to the nine priced line items
//! of [`LINE_ITEM_TABLE`].
//!
//! Rounding order is part of the contract: the quantity is rounded first,
//! and `total = round(rounded_quantity × unit_cost)`. Multiplying first and
//! rounding once gives different totals (e.g. Steel: 57.6 tons → 58 tons →
//! $127,600 rather than $126,720).
//!
//! Input is not re-validated here. Negative dimensions yield negative
//! quantities rather than an error.

use serde::{Deserialize, Serialize};

use crate::project::ProjectInput;
use crate::units::round_half_up;

use super::tables::{LineItemTemplate, LINE_ITEM_TABLE};

/// Line-item category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CostCategory {
    Materials,
    Labor,
    Equipment,
}

impl CostCategory {
    pub const ALL: [CostCategory; 3] = [CostCategory::Materials, CostCategory::Labor, CostCategory::Equipment];

    pub fn display_name(&self) -> &'static str {
        match self {
            CostCategory::Materials => "Materials",
            CostCategory::Labor => "Labor",
            CostCategory::Equipment => "Equipment",
        }
    }
}

impl std::fmt::Display for CostCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One priced row of the breakdown.
///
/// ## JSON Example
///
/// ```json
/// {
///   "category": "Materials",
///   "item": "Steel",
///   "quantity": 58.0,
///   "unit": "tons",
///   "unitCost": 2200.0,
///   "total": 127600.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostLineItem {
    pub category: CostCategory,
    pub item: String,
    /// Rounded to the nearest whole unit
    pub quantity: f64,
    pub unit: String,
    /// Currency per unit
    pub unit_cost: f64,
    /// `round(quantity × unit_cost)`
    pub total: f64,
}

impl CostLineItem {
    /// Price one template row for a project.
    pub fn from_template(template: &LineItemTemplate, input: &ProjectInput) -> Self {
        let quantity = round_half_up(template.raw_quantity(input));
        let unit_cost = template.unit_cost.resolve(input);
        CostLineItem {
            category: template.category,
            item: template.item.to_string(),
            quantity,
            unit: template.unit.to_string(),
            unit_cost,
            total: round_half_up(quantity * unit_cost),
        }
    }
}

/// Generate the nine-item cost breakdown for a project.
///
/// # Example
///
/// ```rust
/// use cost_core::estimate::generate_cost_breakdown;
/// use cost_core::project::{ProjectInput, ProjectType};
///
/// let input = ProjectInput::new("Riverside Office", ProjectType::Commercial, 80.0, 60.0, 24.0, 45.0, 5600.0);
/// let items = generate_cost_breakdown(&input);
///
/// assert_eq!(items.len(), 9);
/// assert_eq!(items[0].item, "Concrete");
/// assert_eq!(items[0].total, 216_000.0);
/// ```
pub fn generate_cost_breakdown(input: &ProjectInput) -> Vec<CostLineItem> {
    LINE_ITEM_TABLE
        .iter()
        .map(|template| CostLineItem::from_template(template, input))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::ProjectType;

    fn sample() -> ProjectInput {
        ProjectInput::new("Riverside Office", ProjectType::Commercial, 80.0, 60.0, 24.0, 45.0, 5600.0)
    }

    fn find<'a>(items: &'a [CostLineItem], name: &str) -> &'a CostLineItem {
        items.iter().find(|i| i.item == name).unwrap()
    }

    #[test]
    fn test_example_breakdown() {
        let items = generate_cost_breakdown(&sample());

        let expected = [
            ("Concrete", CostCategory::Materials, 1728.0, "cu yd", 125.0, 216_000.0),
            ("Steel", CostCategory::Materials, 58.0, "tons", 2200.0, 127_600.0),
            ("Glass", CostCategory::Materials, 1920.0, "sq ft", 32.0, 61_440.0),
            ("Metal Roofing", CostCategory::Materials, 5280.0, "sq ft", 18.0, 95_040.0),
            ("Foundation Work", CostCategory::Labor, 840.0, "hours", 45.0, 37_800.0),
            ("Structural Work", CostCategory::Labor, 1960.0, "hours", 45.0, 88_200.0),
            ("Finishing Work", CostCategory::Labor, 2800.0, "hours", 45.0, 126_000.0),
            ("Heavy Machinery", CostCategory::Equipment, 70.0, "days", 1200.0, 84_000.0),
            ("Scaffolding", CostCategory::Equipment, 3840.0, "sq ft", 2.5, 9_600.0),
        ];

        assert_eq!(items.len(), expected.len());
        for (item, (name, category, quantity, unit, unit_cost, total)) in items.iter().zip(expected) {
            assert_eq!(item.item, name);
            assert_eq!(item.category, category, "{}", name);
            assert_eq!(item.quantity, quantity, "{}", name);
            assert_eq!(item.unit, unit, "{}", name);
            assert_eq!(item.unit_cost, unit_cost, "{}", name);
            assert_eq!(item.total, total, "{}", name);
        }
    }

    #[test]
    fn test_total_uses_rounded_quantity() {
        let items = generate_cost_breakdown(&sample());
        let steel = find(&items, "Steel");
        // 57.6 × 2200 = 126,720 if multiplied before rounding
        assert_eq!(steel.quantity, 58.0);
        assert_eq!(steel.total, 127_600.0);
    }

    #[test]
    fn test_labor_uses_project_rate() {
        let mut input = sample();
        input.labor_rate = 62.5;
        let items = generate_cost_breakdown(&input);
        for item in items.iter().filter(|i| i.category == CostCategory::Labor) {
            assert_eq!(item.unit_cost, 62.5);
        }
        // 840 h × 62.5 = 52,500
        assert_eq!(find(&items, "Foundation Work").total, 52_500.0);
    }

    #[test]
    fn test_fractional_rate_total_rounds_half_up() {
        let mut input = sample();
        input.labor_hours = 10.0;
        input.labor_rate = 25.5;
        let items = generate_cost_breakdown(&input);
        // round(10 × 0.15) = 2 hours, 2 × 25.5 = 51
        assert_eq!(find(&items, "Foundation Work").quantity, 2.0);
        assert_eq!(find(&items, "Foundation Work").total, 51.0);
        // round(10 × 0.35) = round(3.5) = 4 hours
        assert_eq!(find(&items, "Structural Work").quantity, 4.0);
    }

    #[test]
    fn test_small_project_rounds_to_zero_without_error() {
        let input = ProjectInput::new("Shed", ProjectType::Residential, 2.0, 2.0, 2.0, 10.0, 1.0);
        let items = generate_cost_breakdown(&input);
        assert_eq!(items.len(), 9);
        assert_eq!(find(&items, "Steel").quantity, 0.0);
        assert_eq!(find(&items, "Steel").total, 0.0);
        assert_eq!(find(&items, "Heavy Machinery").quantity, 0.0);
    }

    #[test]
    fn test_invalid_input_does_not_panic() {
        let input = ProjectInput::new("Bad", ProjectType::Industrial, -10.0, 20.0, 5.0, 40.0, -100.0);
        let items = generate_cost_breakdown(&input);
        assert_eq!(items.len(), 9);
        assert!(find(&items, "Concrete").total < 0.0);
    }

    #[test]
    fn test_material_selections_do_not_change_breakdown() {
        use crate::project::{Exterior, Foundation, Roofing, Structure};

        let base = generate_cost_breakdown(&sample());
        let mut input = sample();
        input.foundation = Foundation::Pile;
        input.structure = Structure::Wood;
        input.exterior = Exterior::Brick;
        input.roofing = Roofing::Shingle;
        assert_eq!(generate_cost_breakdown(&input), base);
    }

    #[test]
    fn test_serialization_shape() {
        let items = generate_cost_breakdown(&sample());
        let json = serde_json::to_value(&items[1]).unwrap();
        assert_eq!(json["category"], "Materials");
        assert_eq!(json["unitCost"], 2200.0);
        assert_eq!(json["total"], 127_600.0);
    }
}
