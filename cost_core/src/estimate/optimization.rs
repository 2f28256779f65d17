//! # Optimization Suggestions
//!
//! Savings suggestions are evaluated from [`SUGGESTION_TABLE`]. The
//! column-spacing suggestion scales with the grand total, so this step
//! needs the aggregate's `total_cost` and must run after [`aggregate`].
//!
//! [`aggregate`]: super::aggregate::aggregate

use serde::{Deserialize, Serialize};

use crate::errors::{EstimateError, EstimateResult};
use crate::project::ProjectInput;
use crate::units::round_half_up;

use super::tables::SUGGESTION_TABLE;

/// Suggestion grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptimizationCategory {
    #[serde(rename = "Material Alternatives")]
    MaterialAlternatives,
    #[serde(rename = "Design Modifications")]
    DesignModifications,
}

impl OptimizationCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            OptimizationCategory::MaterialAlternatives => "Material Alternatives",
            OptimizationCategory::DesignModifications => "Design Modifications",
        }
    }
}

impl std::fmt::Display for OptimizationCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A proposed cost reduction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationSuggestion {
    pub category: OptimizationCategory,
    pub description: String,
    /// Estimated savings, rounded to whole currency units
    pub savings: f64,
}

/// Savings totals derived from the suggestions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationSummary {
    /// Sum of all suggestion savings
    pub potential_savings: f64,
    /// `total_cost - potential_savings`
    pub optimized_cost: f64,
    /// `100 × potential_savings / total_cost`
    pub savings_percentage: f64,
}

/// Generate the four savings suggestions for a project.
///
/// Every suggestion is emitted, even when its savings round to 0.
pub fn generate_optimizations(input: &ProjectInput, total_cost: f64) -> Vec<OptimizationSuggestion> {
    SUGGESTION_TABLE
        .iter()
        .map(|template| OptimizationSuggestion {
            category: template.category,
            description: template.description.to_string(),
            savings: round_half_up(template.raw_savings(input, total_cost)),
        })
        .collect()
}

/// Summarize suggestions against the project's total cost.
///
/// # Errors
///
/// `DegenerateAggregate` when `total_cost` is zero or not finite, since the
/// savings percentage is undefined.
///
/// # Example
///
/// ```rust
/// use cost_core::estimate::summarize;
///
/// assert!(summarize(&[], 0.0).is_err());
/// assert_eq!(summarize(&[], 1000.0).unwrap().optimized_cost, 1000.0);
/// ```
pub fn summarize(suggestions: &[OptimizationSuggestion], total_cost: f64) -> EstimateResult<OptimizationSummary> {
    if total_cost == 0.0 || !total_cost.is_finite() {
        return Err(EstimateError::degenerate_aggregate(total_cost, "savingsPercentage"));
    }

    let potential_savings: f64 = suggestions.iter().map(|s| s.savings).sum();
    Ok(OptimizationSummary {
        potential_savings,
        optimized_cost: total_cost - potential_savings,
        savings_percentage: 100.0 * potential_savings / total_cost,
    })
}
