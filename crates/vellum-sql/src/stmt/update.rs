use super::{Condition, Record, Statement};

#[derive(Debug, Clone)]
pub struct Update {
    pub table: String,

    /// Column assignments
    pub values: Record,

    pub filter: Condition,

    /// When set, only the first matching row is updated. Holds the key column
    /// used to single it out.
    pub single: Option<String>,

    /// Return the updated rows. Ignored by flavors without `RETURNING`.
    pub returning: bool,
}

impl From<Update> for Statement {
    fn from(value: Update) -> Self {
        Self::Update(value)
    }
}
