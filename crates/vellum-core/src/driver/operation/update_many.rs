use super::Operation;
use crate::stmt::{Condition, Record};

#[derive(Debug, Clone)]
pub struct UpdateMany {
    pub table: String,

    pub filter: Condition,

    pub values: Record,
}

impl From<UpdateMany> for Operation {
    fn from(value: UpdateMany) -> Self {
        Self::UpdateMany(value)
    }
}
