use super::Operation;
use crate::stmt::Condition;

#[derive(Debug, Clone)]
pub struct Count {
    pub table: String,

    pub filter: Condition,
}

impl From<Count> for Operation {
    fn from(value: Count) -> Self {
        Self::Count(value)
    }
}
