//! Category read model.

use serde::{Deserialize, Serialize};

/// Category linked to projects through `project_category`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub category_id: i64,
    pub category_name: String,
}
