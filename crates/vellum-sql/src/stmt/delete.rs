use super::{Condition, Statement};

#[derive(Debug, Clone)]
pub struct Delete {
    pub table: String,

    pub filter: Condition,

    /// When set, only the first matching row is deleted. Holds the key column
    /// used to single it out.
    pub single: Option<String>,
}

impl From<Delete> for Statement {
    fn from(value: Delete) -> Self {
        Self::Delete(value)
    }
}
