//! # Project Store
//!
//! `ProjectStore` is the root container for saved estimates. Stores
//! serialize to `.cwp` files as human-readable JSON (see [`crate::file_io`]).
//!
//! ## Structure
//!
//! ```text
//! ProjectStore
//! ├── meta: StoreMetadata (version, owner, timestamps)
//! └── projects: HashMap<Uuid, StoredProject>
//!               ├── input: ProjectInput          (source of truth)
//!               └── calculations: ProjectWithCalculations (cache)
//! ```
//!
//! Stored calculations are a cache. [`ProjectStore::report`] always
//! recomputes from the stored input, and [`ProjectStore::verify`] checks
//! the cache against a recomputation.
//!
//! ## Example
//!
//! ```rust
//! use cost_core::project::{ProjectInput, ProjectType};
//! use cost_core::store::ProjectStore;
//!
//! let mut store = ProjectStore::new("estimating@acme.com");
//! let input = ProjectInput::new("Riverside Office", ProjectType::Commercial, 80.0, 60.0, 24.0, 45.0, 5600.0);
//!
//! let id = store.create_project(input).unwrap().id;
//! assert!(store.verify(&id).is_ok());
//! assert_eq!(store.report(&id).unwrap().costs.total_cost, 947_162.0);
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::{EstimateError, EstimateResult};
use crate::estimate::{estimate, ProjectWithCalculations};
use crate::project::ProjectInput;

/// Current schema version for .cwp files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// A saved estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredProject {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    /// What the user entered
    pub input: ProjectInput,
    /// Figures computed when the project was saved
    pub calculations: ProjectWithCalculations,
}

/// Root store container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectStore {
    pub meta: StoreMetadata,

    /// All saved projects, keyed by UUID
    pub projects: HashMap<Uuid, StoredProject>,
}

impl ProjectStore {
    /// Create a new empty store.
    pub fn new(owner: impl Into<String>) -> Self {
        let now = Utc::now();
        ProjectStore {
            meta: StoreMetadata {
                version: SCHEMA_VERSION.to_string(),
                owner: owner.into(),
                created: now,
                modified: now,
            },
            projects: HashMap::new(),
        }
    }

    /// Validate, estimate and save a project.
    ///
    /// # Errors
    ///
    /// * `InvalidInput` - the input fails [`ProjectInput::validate`]
    /// * `DegenerateGeometry` / `DegenerateAggregate` - from [`estimate`]
    pub fn create_project(&mut self, input: ProjectInput) -> EstimateResult<&StoredProject> {
        input.validate()?;
        let calculations = estimate(&input)?;

        let id = Uuid::new_v4();
        let project = StoredProject {
            id,
            created_at: Utc::now(),
            input,
            calculations,
        };
        info!(%id, name = %project.input.name, total = project.calculations.costs.total_cost, "Saved project");

        self.projects.insert(id, project);
        self.touch();
        self.get_project(&id)
    }

    /// Get a saved project by UUID.
    pub fn get_project(&self, id: &Uuid) -> EstimateResult<&StoredProject> {
        self.projects.get(id).ok_or_else(|| EstimateError::project_not_found(id))
    }

    /// Remove a saved project by UUID.
    ///
    /// Returns the removed project if it existed.
    pub fn remove_project(&mut self, id: &Uuid) -> Option<StoredProject> {
        let project = self.projects.remove(id);
        if project.is_some() {
            info!(%id, "Removed project");
            self.touch();
        }
        project
    }

    /// All saved projects, newest first.
    pub fn list_projects(&self) -> Vec<&StoredProject> {
        let mut projects: Vec<&StoredProject> = self.projects.values().collect();
        projects.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        projects
    }

    pub fn project_count(&self) -> usize {
        self.projects.len()
    }

    /// Recompute a saved project's figures from its stored input.
    pub fn report(&self, id: &Uuid) -> EstimateResult<ProjectWithCalculations> {
        estimate(&self.get_project(id)?.input)
    }

    /// Check the cached figures of a saved project against a recomputation.
    ///
    /// # Errors
    ///
    /// `CacheMismatch` naming the first diverging field.
    pub fn verify(&self, id: &Uuid) -> EstimateResult<()> {
        let stored = self.get_project(id)?;
        let fresh = estimate(&stored.input)?;
        if let Some(field) = first_difference(&stored.calculations, &fresh) {
            warn!(%id, field, "Cached calculations diverge from recomputation");
            return Err(EstimateError::cache_mismatch(id, field));
        }
        Ok(())
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }
}

impl Default for ProjectStore {
    fn default() -> Self {
        ProjectStore::new("")
    }
}

/// Name the first field where a cached estimate differs from a fresh one.
fn first_difference(cached: &ProjectWithCalculations, fresh: &ProjectWithCalculations) -> Option<&'static str> {
    if cached.input != fresh.input {
        Some("input")
    } else if cached.costs != fresh.costs {
        Some("costs")
    } else if cached.square_footage != fresh.square_footage {
        Some("squareFootage")
    } else if cached.cost_per_square_foot != fresh.cost_per_square_foot {
        Some("costPerSquareFoot")
    } else if cached.cost_breakdown_items != fresh.cost_breakdown_items {
        Some("costBreakdownItems")
    } else if cached.optimization_suggestions != fresh.optimization_suggestions {
        Some("optimizationSuggestions")
    } else if cached.summary != fresh.summary {
        Some("summary")
    } else {
        None
    }
}

/// Store metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Who owns this store (email or username)
    pub owner: String,

    pub created: DateTime<Utc>,

    pub modified: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::ProjectType;

    fn sample() -> ProjectInput {
        ProjectInput::new("Riverside Office", ProjectType::Commercial, 80.0, 60.0, 24.0, 45.0, 5600.0)
    }

    #[test]
    fn test_store_creation() {
        let store = ProjectStore::new("estimating@acme.com");
        assert_eq!(store.meta.owner, "estimating@acme.com");
        assert_eq!(store.meta.version, SCHEMA_VERSION);
        assert_eq!(store.project_count(), 0);
    }

    #[test]
    fn test_create_and_remove() {
        let mut store = ProjectStore::default();
        let id = store.create_project(sample()).unwrap().id;
        assert_eq!(store.project_count(), 1);
        assert_eq!(store.get_project(&id).unwrap().calculations.costs.total_cost, 947_162.0);

        assert!(store.remove_project(&id).is_some());
        assert!(store.remove_project(&id).is_none());
        assert!(matches!(store.get_project(&id), Err(EstimateError::ProjectNotFound { .. })));
    }

    #[test]
    fn test_create_rejects_invalid_input() {
        let mut store = ProjectStore::default();
        let mut input = sample();
        input.height = 0.0;
        assert!(matches!(store.create_project(input), Err(EstimateError::InvalidInput { .. })));
        assert_eq!(store.project_count(), 0);
    }

    #[test]
    fn test_report_matches_direct_estimate() {
        let mut store = ProjectStore::default();
        let id = store.create_project(sample()).unwrap().id;
        let via_store = store.report(&id).unwrap();
        let direct = estimate(&sample()).unwrap();
        assert_eq!(via_store.costs, direct.costs);
        assert_eq!(via_store, store.get_project(&id).unwrap().calculations);
    }

    #[test]
    fn test_verify_detects_tampered_cache() {
        let mut store = ProjectStore::default();
        let id = store.create_project(sample()).unwrap().id;
        assert!(store.verify(&id).is_ok());

        // A cache computed with a bulk materials formula must be caught
        if let Some(project) = store.projects.get_mut(&id) {
            project.calculations.costs.materials_cost = 115_200.0 * 2.5;
        }
        match store.verify(&id) {
            Err(EstimateError::CacheMismatch { field, .. }) => assert_eq!(field, "costs"),
            other => panic!("Expected CacheMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_list_newest_first() {
        let mut store = ProjectStore::default();
        let first = store.create_project(sample()).unwrap().id;
        let mut second_input = sample();
        second_input.name = "Warehouse".to_string();
        let second = store.create_project(second_input).unwrap().id;

        if let Some(p) = store.projects.get_mut(&first) {
            p.created_at = p.created_at - chrono::Duration::hours(1);
        }

        let listed: Vec<Uuid> = store.list_projects().iter().map(|p| p.id).collect();
        assert_eq!(listed, vec![second, first]);
    }

    #[test]
    fn test_store_serialization() {
        let mut store = ProjectStore::new("owner");
        let id = store.create_project(sample()).unwrap().id;
        let json = serde_json::to_string_pretty(&store).unwrap();
        assert!(json.contains("Riverside Office"));

        let roundtrip: ProjectStore = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.get_project(&id).unwrap(), store.get_project(&id).unwrap());
        assert!(roundtrip.verify(&id).is_ok());
    }
}
