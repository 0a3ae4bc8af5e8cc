use super::{Record, Statement};

#[derive(Debug, Clone)]
pub struct Insert {
    pub table: String,

    /// Column values to insert
    pub row: Record,

    /// Return the inserted row. Ignored by flavors without `RETURNING`.
    pub returning: bool,
}

impl From<Insert> for Statement {
    fn from(value: Insert) -> Self {
        Self::Insert(value)
    }
}
