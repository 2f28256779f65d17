//! Subcommand handlers.
//!
//! Each handler returns the text to print, so main owns stdout and the
//! handlers stay testable.

use std::fs;
use std::path::Path;

use cost_core::errors::{EstimateError, EstimateResult};
use cost_core::estimate::{estimate, ProjectWithCalculations};
use cost_core::file_io::{load_store, load_store_for_reading, with_locked_store, LockHolder};
use cost_core::materials::{materials, materials_by_category, MaterialCategory, MaterialRate};
use cost_core::project::{Exterior, Foundation, ProjectInput, ProjectType, Roofing, Structure};
use cost_core::report::{format_currency, format_currency_with_decimals, ReportData};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::cli::{OutputFormat, ProjectArgs};

/// Build a `ProjectInput` from a JSON file or the individual flags.
pub fn project_from_args(args: &ProjectArgs) -> EstimateResult<ProjectInput> {
    if let Some(path) = &args.input {
        let json = fs::read_to_string(path)
            .map_err(|e| EstimateError::file_error("read", path.display().to_string(), e.to_string()))?;
        let input: ProjectInput = serde_json::from_str(&json)?;
        debug!(path = %path.display(), "Read project input");
        return Ok(input);
    }

    Ok(ProjectInput {
        name: args.name.clone().ok_or_else(|| EstimateError::missing_field("name"))?,
        project_type: ProjectType::from_str_flexible(&args.project_type)?,
        length: args.length.ok_or_else(|| EstimateError::missing_field("length"))?,
        width: args.width.ok_or_else(|| EstimateError::missing_field("width"))?,
        height: args.height.ok_or_else(|| EstimateError::missing_field("height"))?,
        foundation: Foundation::from_str_flexible(&args.foundation)?,
        structure: Structure::from_str_flexible(&args.structure)?,
        exterior: Exterior::from_str_flexible(&args.exterior)?,
        roofing: Roofing::from_str_flexible(&args.roofing)?,
        labor_rate: args.labor_rate.ok_or_else(|| EstimateError::missing_field("laborRate"))?,
        labor_hours: args.labor_hours.ok_or_else(|| EstimateError::missing_field("laborHours"))?,
        additional_requirements: args.notes.clone(),
    })
}

/// `costwise estimate`
pub fn run_estimate(
    args: &ProjectArgs,
    format: OutputFormat,
    save: Option<(&Path, &str)>,
) -> EstimateResult<String> {
    let input = project_from_args(args)?;
    input.validate()?;

    let (id, project) = match save {
        Some((path, user)) => {
            let (id, project) = with_locked_store(path, user, |store| {
                store.create_project(input).map(|p| (p.id, p.calculations.clone()))
            })?;
            info!(%id, path = %path.display(), "Estimate saved");
            (Some(id), project)
        }
        None => (None, estimate(&input)?),
    };

    let mut out = render_project(&project, format)?;
    if let Some(id) = id {
        if format == OutputFormat::Text {
            out.push_str(&format!("\nSaved as {}\n", id));
        }
    }
    Ok(out)
}

/// `costwise list`
pub fn run_list(store_path: &Path, format: OutputFormat) -> EstimateResult<String> {
    if !store_path.exists() {
        return Ok(match format {
            OutputFormat::Text => "No saved projects.\n".to_string(),
            OutputFormat::Json => "[]".to_string(),
        });
    }
    let (store, editor) = load_store_for_reading(store_path)?;
    let note = editor_note(editor.as_ref());
    let projects = store.list_projects();

    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(&projects)?);
    }
    if projects.is_empty() {
        return Ok(format!("No saved projects.\n{}", note));
    }

    let mut out = format!("{:<36}  {:<24}  {:<14}  {:>14}  {}\n", "ID", "Name", "Type", "Total", "Created");
    for p in projects {
        out.push_str(&format!(
            "{:<36}  {:<24}  {:<14}  {:>14}  {}\n",
            p.id,
            truncate(&p.input.name, 24),
            p.input.project_type.display_name(),
            format_currency(p.calculations.costs.total_cost),
            p.created_at.format("%Y-%m-%d %H:%M"),
        ));
    }
    out.push_str(&note);
    Ok(out)
}

/// `costwise show <id>`, always recomputed from the stored input
pub fn run_show(store_path: &Path, id: &str, format: OutputFormat) -> EstimateResult<String> {
    let (store, editor) = load_store_for_reading(store_path)?;
    let note = editor_note(editor.as_ref());
    let project = store.report(&parse_id(id)?)?;
    let mut out = render_project(&project, format)?;
    if format == OutputFormat::Text {
        out.push_str(&note);
    }
    Ok(out)
}

/// `costwise verify <id>`
pub fn run_verify(store_path: &Path, id: &str) -> EstimateResult<String> {
    let store = load_store(store_path)?;
    let id = parse_id(id)?;
    store.verify(&id)?;
    Ok(format!("{}: cached figures match a fresh estimate\n", id))
}

/// `costwise remove <id>`
pub fn run_remove(store_path: &Path, id: &str, user: &str) -> EstimateResult<String> {
    let id = parse_id(id)?;
    if !store_path.exists() {
        return Err(EstimateError::project_not_found(id));
    }
    let name = with_locked_store(store_path, user, |store| {
        store
            .remove_project(&id)
            .map(|p| p.input.name)
            .ok_or_else(|| EstimateError::project_not_found(id))
    })?;
    Ok(format!("Removed {} ({})\n", name, id))
}

/// `costwise materials`
pub fn run_materials(category: Option<&str>, format: OutputFormat) -> EstimateResult<String> {
    let rows: Vec<&MaterialRate> = match category {
        Some(code) => materials_by_category(MaterialCategory::from_str_flexible(code)?),
        None => materials().iter().collect(),
    };

    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(&rows)?);
    }

    let mut out = format!("{:>3}  {:<11}  {:<32}  {:<10}  {:>12}\n", "ID", "Category", "Name", "Unit", "Cost/Unit");
    for m in rows {
        out.push_str(&format!(
            "{:>3}  {:<11}  {:<32}  {:<10}  {:>12}\n",
            m.id,
            m.category,
            m.name,
            m.unit,
            format_currency_with_decimals(m.cost_per_unit, 2),
        ));
    }
    Ok(out)
}

fn render_project(project: &ProjectWithCalculations, format: OutputFormat) -> EstimateResult<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(project)?),
        OutputFormat::Text => Ok(ReportData::from_estimate(project).render_text()),
    }
}

/// Log who is editing the store and return a note for text output.
fn editor_note(editor: Option<&LockHolder>) -> String {
    match editor {
        Some(holder) => {
            warn!(%holder, "Store is being edited; figures may change");
            format!(
                "\nNote: {} has been editing this store since {}\n",
                holder,
                holder.since.format("%Y-%m-%d %H:%M")
            )
        }
        None => String::new(),
    }
}

fn parse_id(id: &str) -> EstimateResult<Uuid> {
    Uuid::parse_str(id.trim()).map_err(|e| EstimateError::invalid_input("id", id, e.to_string()))
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut t: String = s.chars().take(max - 1).collect();
        t.push('~');
        t
    }
}
