use crate::recipient::Category;
use serde::{Deserialize, Serialize};

/// Who a scheduled job delivers to when it fires. Job names are unique
/// within the scheduler registry; registering a duplicate name is a no-op.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum JobTarget {
    All,
    Category { tag: Category },
    Phone { number: String },
}
