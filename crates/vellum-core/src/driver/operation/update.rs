use super::Operation;
use crate::stmt::{Condition, Record};

#[derive(Debug, Clone)]
pub struct Update {
    pub table: String,

    /// Primary key column, used to restrict the update to one row
    pub key: String,

    pub filter: Condition,

    /// Column values to assign
    pub values: Record,
}

impl From<Update> for Operation {
    fn from(value: Update) -> Self {
        Self::Update(value)
    }
}
