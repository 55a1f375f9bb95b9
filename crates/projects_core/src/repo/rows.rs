//! Row-to-entity mappers, one per result shape.

use crate::db::extract::{
    integer, optional_decimal, optional_integer, optional_text, text, ExtractResult,
};
use crate::model::category::Category;
use crate::model::material::Material;
use crate::model::project::Project;
use crate::model::step::Step;
use rusqlite::Row;

pub(crate) const PROJECT_COLUMNS: &str =
    "project_id, project_name, estimated_hours, actual_hours, difficulty, notes";

pub(crate) fn project_from_row(row: &Row<'_>) -> ExtractResult<Project> {
    let mut project = Project::new(text(row, "project_name")?);
    project.project_id = Some(integer(row, "project_id")?);
    project.estimated_hours = optional_decimal(row, "estimated_hours")?;
    project.actual_hours = optional_decimal(row, "actual_hours")?;
    project.difficulty = optional_integer(row, "difficulty")?;
    project.notes = optional_text(row, "notes")?;
    Ok(project)
}

pub(crate) fn material_from_row(row: &Row<'_>) -> ExtractResult<Material> {
    Ok(Material {
        material_id: integer(row, "material_id")?,
        project_id: integer(row, "project_id")?,
        material_name: text(row, "material_name")?,
        num_required: optional_integer(row, "num_required")?,
        cost: optional_decimal(row, "cost")?,
    })
}

pub(crate) fn step_from_row(row: &Row<'_>) -> ExtractResult<Step> {
    Ok(Step {
        step_id: integer(row, "step_id")?,
        project_id: integer(row, "project_id")?,
        step_text: text(row, "step_text")?,
        step_order: integer(row, "step_order")?,
    })
}

pub(crate) fn category_from_row(row: &Row<'_>) -> ExtractResult<Category> {
    Ok(Category {
        category_id: integer(row, "category_id")?,
        category_name: text(row, "category_name")?,
    })
}
