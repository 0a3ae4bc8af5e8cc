use super::Operation;
use crate::stmt::{Condition, SortBy};

#[derive(Debug, Clone)]
pub struct FindMany {
    pub table: String,

    pub filter: Condition,

    pub limit: Option<usize>,

    pub offset: Option<usize>,

    /// Sort column (physical name) and direction
    pub sort: Option<SortBy>,

    /// Columns to return. `None` returns full rows.
    pub select: Option<Vec<String>>,
}

impl From<FindMany> for Operation {
    fn from(value: FindMany) -> Self {
        Self::FindMany(value)
    }
}
