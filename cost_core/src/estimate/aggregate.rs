//! # Aggregation
//!
//! The single place where line items become the four cost buckets and
//! the grand total. Every caller (estimate, project store, report) goes
//! through [`aggregate`], so the buckets can never drift apart between
//! call sites.

use serde::{Deserialize, Serialize};

use crate::units::round_half_up;

use super::breakdown::{CostCategory, CostLineItem};
use super::tables::OVERHEAD_RATE;

/// Four-bucket cost summary plus grand total.
///
/// Always derived from line items; never stored independently.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostAggregate {
    pub materials_cost: f64,
    pub labor_cost: f64,
    pub equipment_cost: f64,
    /// `round(0.12 × (materials + labor + equipment))`
    pub overhead_cost: f64,
    /// Sum of all four buckets
    pub total_cost: f64,
}

impl CostAggregate {
    /// Materials + labor + equipment (before overhead)
    pub fn subtotal(&self) -> f64 {
        self.materials_cost + self.labor_cost + self.equipment_cost
    }

    /// The four buckets as labeled values, in chart order.
    pub fn chart_buckets(&self) -> Vec<ChartBucket> {
        vec![
            ChartBucket::new("Materials", self.materials_cost),
            ChartBucket::new("Labor", self.labor_cost),
            ChartBucket::new("Equipment", self.equipment_cost),
            ChartBucket::new("Overhead", self.overhead_cost),
        ]
    }
}

/// A labeled value for chart renderers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartBucket {
    pub label: String,
    pub value: f64,
}

impl ChartBucket {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        ChartBucket {
            label: label.into(),
            value,
        }
    }
}

/// Sum of line-item totals for one category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: CostCategory,
    pub total: f64,
}

/// Group line-item totals by category, in order of first appearance.
///
/// Categories with no items are omitted.
pub fn category_totals(items: &[CostLineItem]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();
    for item in items {
        match totals.iter_mut().find(|t| t.category == item.category) {
            Some(existing) => existing.total += item.total,
            None => totals.push(CategoryTotal {
                category: item.category,
                total: item.total,
            }),
        }
    }
    totals
}

/// Aggregate line items into the cost buckets.
///
/// A category with no items contributes 0.
///
/// # Example
///
/// ```rust
/// use cost_core::estimate::{aggregate, generate_cost_breakdown};
/// use cost_core::project::{ProjectInput, ProjectType};
///
/// let input = ProjectInput::new("Riverside Office", ProjectType::Commercial, 80.0, 60.0, 24.0, 45.0, 5600.0);
/// let costs = aggregate(&generate_cost_breakdown(&input));
///
/// assert_eq!(costs.materials_cost, 500_080.0);
/// assert_eq!(costs.overhead_cost, 101_482.0);
/// assert_eq!(costs.total_cost, 947_162.0);
/// ```
pub fn aggregate(items: &[CostLineItem]) -> CostAggregate {
    let bucket = |category: CostCategory| -> f64 {
        items
            .iter()
            .filter(|i| i.category == category)
            .map(|i| i.total)
            .sum()
    };

    let materials_cost = bucket(CostCategory::Materials);
    let labor_cost = bucket(CostCategory::Labor);
    let equipment_cost = bucket(CostCategory::Equipment);
    let subtotal = materials_cost + labor_cost + equipment_cost;
    let overhead_cost = round_half_up(subtotal * OVERHEAD_RATE);

    CostAggregate {
        materials_cost,
        labor_cost,
        equipment_cost,
        overhead_cost,
        total_cost: subtotal + overhead_cost,
    }
}
