//! # Cost Estimation
//!
//! The deterministic pipeline that turns a [`ProjectInput`] into a cost
//! breakdown, aggregate totals and savings suggestions:
//!
//! ```text
//! ProjectInput ─► generate_cost_breakdown ─► aggregate ─► total_cost
//!      │                                                      │
//!      └──────────────► generate_optimizations ◄──────────────┘
//!                              │
//!                              ▼
//!                          summarize
//! ```
//!
//! Each stage is a pure function; [`estimate`] chains all four and adds the
//! per-area figures. Every caller goes through this module, so the formulas
//! exist exactly once.
//!
//! ## Example
//!
//! ```rust
//! use cost_core::estimate::estimate;
//! use cost_core::project::{ProjectInput, ProjectType};
//!
//! let input = ProjectInput::new("Riverside Office", ProjectType::Commercial, 80.0, 60.0, 24.0, 45.0, 5600.0);
//! let project = estimate(&input).unwrap();
//!
//! assert_eq!(project.costs.total_cost, 947_162.0);
//! assert_eq!(project.summary.potential_savings, 55_910.0);
//! assert_eq!(project.square_footage, 4800.0);
//! ```

pub mod aggregate;
pub mod breakdown;
pub mod optimization;
pub mod tables;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{EstimateError, EstimateResult};
use crate::project::ProjectInput;
use crate::units::Dollars;

pub use aggregate::{aggregate, category_totals, CategoryTotal, ChartBucket, CostAggregate};
pub use breakdown::{generate_cost_breakdown, CostCategory, CostLineItem};
pub use optimization::{
    generate_optimizations, summarize, OptimizationCategory, OptimizationSuggestion, OptimizationSummary,
};

/// A project with every derived figure attached.
///
/// This is the only artifact handed to report renderers, charts and
/// persistence. It serializes flat: input fields, cost buckets and
/// savings totals sit side by side at the top level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectWithCalculations {
    #[serde(flatten)]
    pub input: ProjectInput,

    #[serde(flatten)]
    pub costs: CostAggregate,

    /// length × width
    pub square_footage: f64,

    /// total_cost / square_footage
    pub cost_per_square_foot: f64,

    pub cost_breakdown_items: Vec<CostLineItem>,

    pub optimization_suggestions: Vec<OptimizationSuggestion>,

    #[serde(flatten)]
    pub summary: OptimizationSummary,
}

/// Run the full estimate for a project.
///
/// The input is not validated here; see [`ProjectInput::validate`].
///
/// # Errors
///
/// * `DegenerateGeometry` - square footage is zero or not finite
/// * `DegenerateAggregate` - total cost is zero or not finite
pub fn estimate(input: &ProjectInput) -> EstimateResult<ProjectWithCalculations> {
    let area = input.square_footage();
    if area.0 == 0.0 || !area.0.is_finite() {
        return Err(EstimateError::degenerate_geometry(area.0, "costPerSquareFoot"));
    }

    let items = generate_cost_breakdown(input);
    let costs = aggregate(&items);
    debug!(
        project = %input.name,
        materials = costs.materials_cost,
        labor = costs.labor_cost,
        equipment = costs.equipment_cost,
        overhead = costs.overhead_cost,
        total = costs.total_cost,
        "Aggregated cost breakdown"
    );

    let suggestions = generate_optimizations(input, costs.total_cost);
    let summary = summarize(&suggestions, costs.total_cost)?;
    debug!(
        project = %input.name,
        savings = summary.potential_savings,
        percentage = summary.savings_percentage,
        "Summarized optimization suggestions"
    );

    Ok(ProjectWithCalculations {
        input: input.clone(),
        costs,
        square_footage: area.0,
        cost_per_square_foot: (Dollars(costs.total_cost) / area).0,
        cost_breakdown_items: items,
        optimization_suggestions: suggestions,
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::ProjectType;

    fn sample() -> ProjectInput {
        ProjectInput::new("Riverside Office", ProjectType::Commercial, 80.0, 60.0, 24.0, 45.0, 5600.0)
    }

    #[test]
    fn test_example_estimate() {
        let project = estimate(&sample()).unwrap();
        assert_eq!(project.costs.total_cost, 947_162.0);
        assert_eq!(project.square_footage, 4800.0);
        assert!((project.cost_per_square_foot - 197.325_416_666_666_65).abs() < 1e-9);
        assert_eq!(project.cost_breakdown_items.len(), 9);
        assert_eq!(project.optimization_suggestions.len(), 4);
        assert_eq!(project.summary.optimized_cost, 891_252.0);
    }

    #[test]
    fn test_estimate_is_deterministic() {
        let a = estimate(&sample()).unwrap();
        let b = estimate(&sample()).unwrap();
        assert_eq!(a, b);
        assert_eq!(serde_json::to_string(&a).unwrap(), serde_json::to_string(&b).unwrap());
    }

    #[test]
    fn test_estimate_matches_stagewise_aggregate() {
        let input = sample();
        let project = estimate(&input).unwrap();
        assert_eq!(project.costs, aggregate(&generate_cost_breakdown(&input)));
        assert_eq!(project.costs, aggregate(&project.cost_breakdown_items));
    }

    #[test]
    fn test_zero_area_is_degenerate_geometry() {
        let input = ProjectInput::new("Flat", ProjectType::Residential, 0.0, 60.0, 24.0, 45.0, 5600.0);
        match estimate(&input) {
            Err(EstimateError::DegenerateGeometry { square_footage, .. }) => assert_eq!(square_footage, 0.0),
            other => panic!("Expected DegenerateGeometry, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_total_is_degenerate_aggregate() {
        // Every quantity rounds to zero
        let input = ProjectInput::new("Tiny", ProjectType::Residential, 0.1, 0.1, 0.1, 1.0, 0.4);
        assert!(matches!(estimate(&input), Err(EstimateError::DegenerateAggregate { .. })));
    }

    #[test]
    fn test_flat_json_shape() {
        let json = serde_json::to_value(estimate(&sample()).unwrap()).unwrap();
        assert_eq!(json["name"], "Riverside Office");
        assert_eq!(json["type"], "commercial");
        assert_eq!(json["totalCost"], 947_162.0);
        assert_eq!(json["overheadCost"], 101_482.0);
        assert_eq!(json["potentialSavings"], 55_910.0);
        assert_eq!(json["squareFootage"], 4800.0);
        assert_eq!(json["costBreakdownItems"].as_array().unwrap().len(), 9);
        assert_eq!(json["optimizationSuggestions"][0]["category"], "Material Alternatives");
    }

    #[test]
    fn test_json_roundtrip() {
        let project = estimate(&sample()).unwrap();
        let json = serde_json::to_string(&project).unwrap();
        let back: ProjectWithCalculations = serde_json::from_str(&json).unwrap();
        assert_eq!(back, project);
    }
}
