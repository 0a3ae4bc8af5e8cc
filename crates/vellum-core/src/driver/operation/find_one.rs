use super::Operation;
use crate::stmt::Condition;

#[derive(Debug, Clone)]
pub struct FindOne {
    pub table: String,

    pub filter: Condition,

    /// Columns to return. `None` returns the full row.
    pub select: Option<Vec<String>>,
}

impl From<FindOne> for Operation {
    fn from(value: FindOne) -> Self {
        Self::FindOne(value)
    }
}
