//! # cost_core - Construction Cost Estimation Engine
//!
//! `cost_core` turns building parameters (dimensions, materials, labor) into
//! a priced cost breakdown, aggregate totals and savings suggestions. All
//! inputs and outputs are JSON-serializable, so HTTP handlers, report
//! renderers and the CLI share one implementation of the formulas.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **Single Source**: Every formula lives in one table, evaluated by one function
//! - **Deterministic**: The same input always produces bit-identical output
//! - **Rich Errors**: Structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use cost_core::estimate::estimate;
//! use cost_core::project::{ProjectInput, ProjectType};
//!
//! let input = ProjectInput::new("Riverside Office", ProjectType::Commercial, 80.0, 60.0, 24.0, 45.0, 5600.0);
//! input.validate().unwrap();
//!
//! let project = estimate(&input).unwrap();
//! assert_eq!(project.costs.total_cost, 947_162.0);
//!
//! // Serialize to JSON for storage or transmission
//! let json = serde_json::to_string_pretty(&project).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`project`] - Project input and validation
//! - [`estimate`] - Breakdown, aggregation and optimization pipeline
//! - [`materials`] - Reference material rate catalog
//! - [`report`] - Formatted report data for renderers
//! - [`store`] - Saved projects keyed by UUID
//! - [`file_io`] - Store files with locked, atomic updates
//! - [`units`] - Unit wrappers and the rounding rule
//! - [`errors`] - Structured error types

pub mod errors;
pub mod estimate;
#[cfg(not(target_arch = "wasm32"))]
pub mod file_io;
pub mod materials;
pub mod project;
pub mod report;
pub mod store;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use errors::{EstimateError, EstimateResult};
pub use estimate::{
    aggregate, estimate, generate_cost_breakdown, generate_optimizations, summarize, CostAggregate, CostLineItem,
    OptimizationSuggestion, OptimizationSummary, ProjectWithCalculations,
};
#[cfg(not(target_arch = "wasm32"))]
pub use file_io::{load_store, save_store, with_locked_store, StoreLock};
pub use project::ProjectInput;
pub use report::ReportData;
pub use store::{ProjectStore, StoredProject};
