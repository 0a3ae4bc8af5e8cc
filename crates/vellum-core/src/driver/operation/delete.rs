use super::Operation;
use crate::stmt::Condition;

#[derive(Debug, Clone)]
pub struct Delete {
    pub table: String,

    /// Primary key column, used to restrict the delete to one row
    pub key: String,

    pub filter: Condition,
}

impl From<Delete> for Operation {
    fn from(value: Delete) -> Self {
        Self::Delete(value)
    }
}
