//! # Report Data
//!
//! Prepares a [`ProjectWithCalculations`] for presentation: currency
//! formatted key/value tables, the line-item table, chart buckets and the
//! savings summary. Renderers (PDF, web, terminal) only lay these out.
//!
//! ## Example
//!
//! ```rust
//! use cost_core::estimate::estimate;
//! use cost_core::project::{ProjectInput, ProjectType};
//! use cost_core::report::ReportData;
//!
//! let input = ProjectInput::new("Riverside Office", ProjectType::Commercial, 80.0, 60.0, 24.0, 45.0, 5600.0);
//! let report = ReportData::from_estimate(&estimate(&input).unwrap());
//!
//! assert_eq!(report.title, "Riverside Office - Cost Estimation Report");
//! assert_eq!(report.optimization_summary.savings, "$55,910");
//! println!("{}", report.render_text());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::estimate::{ChartBucket, ProjectWithCalculations};

// ============================================================================
// Formatting
// ============================================================================

/// Most decimals the formatters print; larger requests are clamped.
pub const MAX_FORMAT_DECIMALS: u32 = 15;

/// Format with thousands separators and a fixed number of decimals.
///
/// Halves round away from zero. `format_number(1234.5, 0) == "1,235"`.
/// Works across the whole f64 range; non-finite values print as-is.
pub fn format_number(value: f64, decimals: u32) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let decimals = decimals.min(MAX_FORMAT_DECIMALS) as usize;
    let digits = scaled_digits(value.abs(), decimals);
    let (whole, frac) = digits.split_at(digits.len() - decimals);

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && digits.bytes().any(|b| b != b'0') { "-" } else { "" };
    if frac.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, frac)
    }
}

/// Decimal digits of `magnitude × 10^decimals`, rounded, with at least one
/// digit ahead of the decimal point.
fn scaled_digits(magnitude: f64, decimals: usize) -> String {
    let digits = if magnitude.fract() == 0.0 {
        // Whole values print exactly; scaling them could lose digits
        format!("{:.0}{}", magnitude, "0".repeat(decimals))
    } else {
        format!("{:.0}", (magnitude * 10f64.powi(decimals as i32)).round())
    };
    format!("{:0>width$}", digits, width = decimals + 1)
}

/// Whole-dollar currency, e.g. `"$947,162"` or `"-$1,200"`
pub fn format_currency(amount: f64) -> String {
    format_currency_with_decimals(amount, 0)
}

/// Currency with a fixed number of decimals, e.g. `"$197.33"`
pub fn format_currency_with_decimals(amount: f64, decimals: u32) -> String {
    let body = format_number(amount.abs(), decimals);
    if amount < 0.0 && body.chars().any(|c| c.is_ascii_digit() && c != '0') {
        format!("-${}", body)
    } else {
        format!("${}", body)
    }
}

/// Percentage with one decimal, e.g. `"5.9%"`
pub fn format_percentage(percentage: f64) -> String {
    format!("{}%", format_number(percentage, 1))
}

/// Plain quantity with separators and up to three decimals, e.g. `"5,600"`
pub fn format_quantity(value: f64) -> String {
    let text = format_number(value, 3);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

// ============================================================================
// Report Structures
// ============================================================================

/// A labeled, preformatted value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub name: String,
    pub value: String,
}

impl ReportRow {
    fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        ReportRow {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// One row of the line-item table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportLineItem {
    pub category: String,
    pub item: String,
    /// Quantity with its unit, e.g. `"58 tons"`
    pub quantity: String,
    pub unit_cost: String,
    pub total: String,
}

/// Headline savings figures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSavings {
    pub savings: String,
    pub percentage: String,
    pub optimized: String,
}

/// One formatted suggestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSuggestion {
    pub category: String,
    pub description: String,
    pub savings: String,
}

/// Everything a renderer needs, already formatted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportData {
    pub title: String,
    pub project_details: Vec<ReportRow>,
    pub cost_summary: Vec<ReportRow>,
    /// Raw bucket values for charts
    pub cost_breakdown: Vec<ChartBucket>,
    pub line_items: Vec<ReportLineItem>,
    pub optimization_summary: ReportSavings,
    pub optimization_items: Vec<ReportSuggestion>,
}

impl ReportData {
    /// Build report data from a completed estimate.
    pub fn from_estimate(project: &ProjectWithCalculations) -> Self {
        let input = &project.input;
        let costs = &project.costs;

        let project_details = vec![
            ReportRow::new("Project Type", input.project_type.display_name()),
            ReportRow::new(
                "Dimensions",
                format!("{} x {} x {} ft", input.length, input.width, input.height),
            ),
            ReportRow::new("Square Footage", format!("{} sq ft", format_quantity(project.square_footage))),
            ReportRow::new("Foundation", input.foundation.display_name()),
            ReportRow::new("Structure", input.structure.display_name()),
            ReportRow::new("Exterior", input.exterior.display_name()),
            ReportRow::new("Roofing", input.roofing.display_name()),
            ReportRow::new("Labor Rate", format!("{}/hr", format_currency(input.labor_rate))),
            ReportRow::new("Labor Hours", format_quantity(input.labor_hours)),
        ];

        let cost_summary = vec![
            ReportRow::new("Total Cost", format_currency(costs.total_cost)),
            ReportRow::new("Materials", format_currency(costs.materials_cost)),
            ReportRow::new("Labor", format_currency(costs.labor_cost)),
            ReportRow::new("Equipment", format_currency(costs.equipment_cost)),
            ReportRow::new("Overhead", format_currency(costs.overhead_cost)),
            ReportRow::new(
                "Cost per sq ft",
                format_currency_with_decimals(project.cost_per_square_foot, 2),
            ),
        ];

        let line_items = project
            .cost_breakdown_items
            .iter()
            .map(|item| ReportLineItem {
                category: item.category.to_string(),
                item: item.item.clone(),
                quantity: format!("{} {}", format_quantity(item.quantity), item.unit),
                unit_cost: format_currency_with_decimals(item.unit_cost, 2),
                total: format_currency(item.total),
            })
            .collect();

        let optimization_items = project
            .optimization_suggestions
            .iter()
            .map(|s| ReportSuggestion {
                category: s.category.to_string(),
                description: s.description.clone(),
                savings: format_currency(s.savings),
            })
            .collect();

        ReportData {
            title: format!("{} - Cost Estimation Report", input.name),
            project_details,
            cost_summary,
            cost_breakdown: costs.chart_buckets(),
            line_items,
            optimization_summary: ReportSavings {
                savings: format_currency(project.summary.potential_savings),
                percentage: format_percentage(project.summary.savings_percentage),
                optimized: format_currency(project.summary.optimized_cost),
            },
            optimization_items,
        }
    }

    /// Lay the report out as plain text
    pub fn render_text(&self) -> String {
        self.to_string()
    }
}

fn write_rows(f: &mut fmt::Formatter<'_>, heading: &str, rows: &[ReportRow]) -> fmt::Result {
    writeln!(f, "{}", heading)?;
    let width = rows.iter().map(|r| r.name.len()).max().unwrap_or(0);
    for row in rows {
        writeln!(f, "  {:<width$}  {}", row.name, row.value, width = width)?;
    }
    writeln!(f)
}

impl fmt::Display for ReportData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(self.title.len());
        writeln!(f, "{}", rule)?;
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", rule)?;
        writeln!(f)?;

        write_rows(f, "Project Details", &self.project_details)?;
        write_rows(f, "Cost Summary", &self.cost_summary)?;

        writeln!(f, "Cost Breakdown")?;
        let headers = ["Category", "Item", "Quantity", "Unit Cost", "Total"];
        let mut widths = headers.map(str::len);
        for li in &self.line_items {
            for (w, cell) in widths
                .iter_mut()
                .zip([&li.category, &li.item, &li.quantity, &li.unit_cost, &li.total])
            {
                *w = (*w).max(cell.len());
            }
        }
        writeln!(
            f,
            "  {:<w0$}  {:<w1$}  {:>w2$}  {:>w3$}  {:>w4$}",
            headers[0],
            headers[1],
            headers[2],
            headers[3],
            headers[4],
            w0 = widths[0],
            w1 = widths[1],
            w2 = widths[2],
            w3 = widths[3],
            w4 = widths[4],
        )?;
        for li in &self.line_items {
            writeln!(
                f,
                "  {:<w0$}  {:<w1$}  {:>w2$}  {:>w3$}  {:>w4$}",
                li.category,
                li.item,
                li.quantity,
                li.unit_cost,
                li.total,
                w0 = widths[0],
                w1 = widths[1],
                w2 = widths[2],
                w3 = widths[3],
                w4 = widths[4],
            )?;
        }
        writeln!(f)?;

        writeln!(f, "Optimization Suggestions")?;
        for s in &self.optimization_items {
            writeln!(f, "  [{}] {}: {}", s.category, s.description, s.savings)?;
        }
        writeln!(
            f,
            "  Potential savings {} ({}), optimized cost {}",
            self.optimization_summary.savings,
            self.optimization_summary.percentage,
            self.optimization_summary.optimized
        )
    }
}
