use super::Operation;
use crate::stmt::Record;

#[derive(Debug, Clone)]
pub struct Create {
    /// Table to insert into
    pub table: String,

    /// Column values to insert
    pub row: Record,

    /// When set, the backend generates this column's value with its native
    /// auto-increment. The row never carries a value for it.
    pub auto_increment: Option<String>,
}

impl From<Create> for Operation {
    fn from(value: Create) -> Self {
        Self::Create(value)
    }
}
