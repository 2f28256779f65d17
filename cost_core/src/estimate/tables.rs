//! Fixed line-item and suggestion tables.
//!
//! Every rate and proportional multiplier the estimator uses is declared
//! here once. The breakdown and optimization generators evaluate these
//! templates against a [`ProjectInput`]; neither hardcodes per-item
//! arithmetic.

use crate::errors::{EstimateError, EstimateResult};
use crate::project::ProjectInput;

use super::breakdown::CostCategory;
use super::optimization::OptimizationCategory;

// ============================================================================
// Rates and multipliers
// ============================================================================

/// Concrete, cubic yards per cubic foot of building volume
pub const CONCRETE_PER_CU_FT: f64 = 0.015;
/// Concrete, $ per cubic yard
pub const CONCRETE_RATE: f64 = 125.0;

/// Structural steel, tons per cubic foot of building volume
pub const STEEL_PER_CU_FT: f64 = 0.0005;
/// Premium structural steel, $ per ton
pub const STEEL_RATE: f64 = 2200.0;

/// Glazing, square feet of glass per square foot of floor
pub const GLASS_PER_SQ_FT: f64 = 0.4;
/// Double-glazed panels, $ per square foot
pub const DOUBLE_GLAZED_RATE: f64 = 32.0;
/// Triple-glazed panels, $ per square foot
pub const TRIPLE_GLAZED_RATE: f64 = 42.0;

/// Roofing, square feet of roof per square foot of floor
pub const ROOFING_PER_SQ_FT: f64 = 1.1;
/// Metal roofing, $ per square foot
pub const METAL_ROOFING_RATE: f64 = 18.0;

/// Share of labor hours spent on foundation work
pub const FOUNDATION_LABOR_SHARE: f64 = 0.15;
/// Share of labor hours spent on structural work
pub const STRUCTURAL_LABOR_SHARE: f64 = 0.35;
/// Share of labor hours spent on finishing work
pub const FINISHING_LABOR_SHARE: f64 = 0.50;

/// Labor hours per day of heavy machinery rental
pub const LABOR_HOURS_PER_MACHINERY_DAY: f64 = 80.0;
/// Heavy machinery, $ per day
pub const HEAVY_MACHINERY_RATE: f64 = 1200.0;

/// Scaffolding, square feet per square foot of floor
pub const SCAFFOLDING_PER_SQ_FT: f64 = 0.8;
/// Scaffolding, $ per square foot
pub const SCAFFOLDING_RATE: f64 = 2.5;

/// Overhead as a fraction of materials + labor + equipment
pub const OVERHEAD_RATE: f64 = 0.12;

/// Steel cost saved by switching to high-strength structural steel
pub const HIGH_STRENGTH_STEEL_SAVINGS: f64 = 0.125;
/// Total cost saved by optimizing column spacing
pub const COLUMN_SPACING_SAVINGS: f64 = 0.012;
/// Roofing cost saved by a gable instead of a hip roof
pub const GABLE_ROOF_SAVINGS: f64 = 0.1;

/// Tolerance for the labor share sum-to-one check
const LABOR_SHARE_TOLERANCE: f64 = 1e-9;

// ============================================================================
// Line items
// ============================================================================

/// Project measure a line-item quantity is proportional to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityBasis {
    /// length × width × height (cu ft)
    Volume,
    /// length × width (sq ft)
    SquareFootage,
    /// Total labor hours
    LaborHours,
}

impl QuantityBasis {
    /// Read this measure off a project
    pub fn measure(&self, input: &ProjectInput) -> f64 {
        match self {
            QuantityBasis::Volume => input.volume().0,
            QuantityBasis::SquareFootage => input.square_footage().0,
            QuantityBasis::LaborHours => input.labor_hours,
        }
    }
}

/// How a basis measure becomes a quantity.
///
/// Division is kept distinct from multiplication by the reciprocal so the
/// floating-point result matches `basis / divisor` exactly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scale {
    Times(f64),
    Per(f64),
}

impl Scale {
    pub fn apply(&self, base: f64) -> f64 {
        match self {
            Scale::Times(factor) => base * factor,
            Scale::Per(divisor) => base / divisor,
        }
    }
}

/// Unit price of a line item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UnitCost {
    /// A fixed catalog rate
    Fixed(f64),
    /// The project's own labor rate
    LaborRate,
}

impl UnitCost {
    pub fn resolve(&self, input: &ProjectInput) -> f64 {
        match self {
            UnitCost::Fixed(rate) => *rate,
            UnitCost::LaborRate => input.labor_rate,
        }
    }
}

/// One row of the breakdown table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineItemTemplate {
    pub category: CostCategory,
    pub item: &'static str,
    pub basis: QuantityBasis,
    pub scale: Scale,
    pub unit: &'static str,
    pub unit_cost: UnitCost,
}

impl LineItemTemplate {
    /// Quantity before rounding
    pub fn raw_quantity(&self, input: &ProjectInput) -> f64 {
        self.scale.apply(self.basis.measure(input))
    }
}

/// The nine line items every estimate contains, in report order.
pub const LINE_ITEM_TABLE: [LineItemTemplate; 9] = [
    LineItemTemplate {
        category: CostCategory::Materials,
        item: "Concrete",
        basis: QuantityBasis::Volume,
        scale: Scale::Times(CONCRETE_PER_CU_FT),
        unit: "cu yd",
        unit_cost: UnitCost::Fixed(CONCRETE_RATE),
    },
    LineItemTemplate {
        category: CostCategory::Materials,
        item: "Steel",
        basis: QuantityBasis::Volume,
        scale: Scale::Times(STEEL_PER_CU_FT),
        unit: "tons",
        unit_cost: UnitCost::Fixed(STEEL_RATE),
    },
    LineItemTemplate {
        category: CostCategory::Materials,
        item: "Glass",
        basis: QuantityBasis::SquareFootage,
        scale: Scale::Times(GLASS_PER_SQ_FT),
        unit: "sq ft",
        unit_cost: UnitCost::Fixed(DOUBLE_GLAZED_RATE),
    },
    LineItemTemplate {
        category: CostCategory::Materials,
        item: "Metal Roofing",
        basis: QuantityBasis::SquareFootage,
        scale: Scale::Times(ROOFING_PER_SQ_FT),
        unit: "sq ft",
        unit_cost: UnitCost::Fixed(METAL_ROOFING_RATE),
    },
    LineItemTemplate {
        category: CostCategory::Labor,
        item: "Foundation Work",
        basis: QuantityBasis::LaborHours,
        scale: Scale::Times(FOUNDATION_LABOR_SHARE),
        unit: "hours",
        unit_cost: UnitCost::LaborRate,
    },
    LineItemTemplate {
        category: CostCategory::Labor,
        item: "Structural Work",
        basis: QuantityBasis::LaborHours,
        scale: Scale::Times(STRUCTURAL_LABOR_SHARE),
        unit: "hours",
        unit_cost: UnitCost::LaborRate,
    },
    LineItemTemplate {
        category: CostCategory::Labor,
        item: "Finishing Work",
        basis: QuantityBasis::LaborHours,
        scale: Scale::Times(FINISHING_LABOR_SHARE),
        unit: "hours",
        unit_cost: UnitCost::LaborRate,
    },
    LineItemTemplate {
        category: CostCategory::Equipment,
        item: "Heavy Machinery",
        basis: QuantityBasis::LaborHours,
        scale: Scale::Per(LABOR_HOURS_PER_MACHINERY_DAY),
        unit: "days",
        unit_cost: UnitCost::Fixed(HEAVY_MACHINERY_RATE),
    },
    LineItemTemplate {
        category: CostCategory::Equipment,
        item: "Scaffolding",
        basis: QuantityBasis::SquareFootage,
        scale: Scale::Times(SCAFFOLDING_PER_SQ_FT),
        unit: "sq ft",
        unit_cost: UnitCost::Fixed(SCAFFOLDING_RATE),
    },
];

/// Check that the labor rows split total labor hours exactly once.
///
/// Every labor row must be a plain share of `LaborHours`, and the shares
/// must sum to 1.
pub fn check_labor_fractions(table: &[LineItemTemplate]) -> EstimateResult<()> {
    let mut total = 0.0;
    for row in table.iter().filter(|r| r.category == CostCategory::Labor) {
        match (row.basis, row.scale) {
            (QuantityBasis::LaborHours, Scale::Times(share)) => total += share,
            _ => {
                return Err(EstimateError::invalid_input(
                    "labor fractions",
                    row.item,
                    "Labor rows must be a share of total labor hours",
                ))
            }
        }
    }

    if (total - 1.0).abs() > LABOR_SHARE_TOLERANCE {
        return Err(EstimateError::invalid_input(
            "labor fractions",
            total.to_string(),
            "Labor shares must sum to 1.0",
        ));
    }
    Ok(())
}

// ============================================================================
// Suggestions
// ============================================================================

/// Measure a savings estimate is proportional to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SavingsBasis {
    Volume,
    SquareFootage,
    /// Grand total from the aggregate
    TotalCost,
}

/// One row of the suggestion table.
///
/// Savings are `basis × factors[0] × factors[1] × ...`, multiplied left
/// to right, then rounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SuggestionTemplate {
    pub category: OptimizationCategory,
    pub description: &'static str,
    pub basis: SavingsBasis,
    pub factors: &'static [f64],
}

impl SuggestionTemplate {
    /// Savings before rounding
    pub fn raw_savings(&self, input: &ProjectInput, total_cost: f64) -> f64 {
        let base = match self.basis {
            SavingsBasis::Volume => input.volume().0,
            SavingsBasis::SquareFootage => input.square_footage().0,
            SavingsBasis::TotalCost => total_cost,
        };
        self.factors.iter().fold(base, |acc, factor| acc * factor)
    }
}

/// The four suggestions every estimate contains, in report order.
pub const SUGGESTION_TABLE: [SuggestionTemplate; 4] = [
    SuggestionTemplate {
        category: OptimizationCategory::MaterialAlternatives,
        description: "Replace premium steel with high-strength structural steel",
        basis: SavingsBasis::Volume,
        factors: &[STEEL_PER_CU_FT, STEEL_RATE, HIGH_STRENGTH_STEEL_SAVINGS],
    },
    SuggestionTemplate {
        category: OptimizationCategory::MaterialAlternatives,
        description: "Use double-glazed instead of triple-glazed glass panels",
        basis: SavingsBasis::SquareFootage,
        factors: &[GLASS_PER_SQ_FT, TRIPLE_GLAZED_RATE - DOUBLE_GLAZED_RATE],
    },
    SuggestionTemplate {
        category: OptimizationCategory::DesignModifications,
        description: "Optimize column spacing to reduce steel requirements",
        basis: SavingsBasis::TotalCost,
        factors: &[COLUMN_SPACING_SAVINGS],
    },
    SuggestionTemplate {
        category: OptimizationCategory::DesignModifications,
        description: "Simplify roof design from hip to gable",
        basis: SavingsBasis::SquareFootage,
        factors: &[ROOFING_PER_SQ_FT, METAL_ROOFING_RATE, GABLE_ROOF_SAVINGS],
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::ProjectType;

    fn sample() -> ProjectInput {
        ProjectInput::new("Riverside Office", ProjectType::Commercial, 80.0, 60.0, 24.0, 45.0, 5600.0)
    }

    #[test]
    fn test_standard_table_labor_shares_sum_to_one() {
        assert!(check_labor_fractions(&LINE_ITEM_TABLE).is_ok());
    }

    #[test]
    fn test_unbalanced_labor_shares_rejected() {
        let mut table = LINE_ITEM_TABLE;
        table[6].scale = Scale::Times(0.45);
        assert!(check_labor_fractions(&table).is_err());
    }

    #[test]
    fn test_labor_row_on_wrong_basis_rejected() {
        let mut table = LINE_ITEM_TABLE;
        table[4].basis = QuantityBasis::SquareFootage;
        match check_labor_fractions(&table) {
            Err(EstimateError::InvalidInput { value, .. }) => assert_eq!(value, "Foundation Work"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_machinery_is_a_division() {
        let row = &LINE_ITEM_TABLE[7];
        assert_eq!(row.item, "Heavy Machinery");
        assert_eq!(row.raw_quantity(&sample()), 5600.0 / 80.0);
    }

    #[test]
    fn test_raw_quantities_for_example() {
        let input = sample();
        let raw: Vec<f64> = LINE_ITEM_TABLE.iter().map(|r| r.raw_quantity(&input)).collect();
        assert!((raw[0] - 1728.0).abs() < 1e-9);
        assert!((raw[1] - 57.6).abs() < 1e-9);
        assert!((raw[5] - 1960.0).abs() < 1e-9);
        assert_eq!(raw[8], 3840.0);
    }

    #[test]
    fn test_glass_premium_is_ten_dollars() {
        assert_eq!(SUGGESTION_TABLE[1].factors[1], 10.0);
    }

    #[test]
    fn test_raw_savings_uses_total_cost_only_for_column_spacing() {
        let input = sample();
        let a: Vec<f64> = SUGGESTION_TABLE.iter().map(|s| s.raw_savings(&input, 1000.0)).collect();
        let b: Vec<f64> = SUGGESTION_TABLE.iter().map(|s| s.raw_savings(&input, 2000.0)).collect();
        assert_eq!(a[0], b[0]);
        assert_eq!(a[1], b[1]);
        assert_eq!(a[3], b[3]);
        assert!((a[2] - 12.0).abs() < 1e-12);
        assert!((b[2] - 24.0).abs() < 1e-12);
    }
}
