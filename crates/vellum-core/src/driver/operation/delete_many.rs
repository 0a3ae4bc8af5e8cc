use super::Operation;
use crate::stmt::Condition;

#[derive(Debug, Clone)]
pub struct DeleteMany {
    pub table: String,

    pub filter: Condition,
}

impl From<DeleteMany> for Operation {
    fn from(value: DeleteMany) -> Self {
        Self::DeleteMany(value)
    }
}
