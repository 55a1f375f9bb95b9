//! Step read model.

use super::project::ProjectId;
use serde::{Deserialize, Serialize};

/// One instruction of a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub step_id: i64,
    pub project_id: ProjectId,
    pub step_text: String,
    /// Author-assigned position. Rows are not re-sorted by it on read.
    pub step_order: i32,
}
