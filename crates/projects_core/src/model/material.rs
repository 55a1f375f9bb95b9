//! Material read model.

use super::decimal::Decimal;
use super::project::ProjectId;
use serde::{Deserialize, Serialize};

/// One material line required by a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Material {
    pub material_id: i64,
    pub project_id: ProjectId,
    pub material_name: String,
    pub num_required: Option<i32>,
    pub cost: Option<Decimal>,
}
