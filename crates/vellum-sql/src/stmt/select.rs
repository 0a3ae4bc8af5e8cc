use super::{Condition, SortBy, Statement};

#[derive(Debug, Clone)]
pub struct Select {
    pub table: String,

    pub projection: Projection,

    pub filter: Condition,

    pub order_by: Option<SortBy>,

    pub limit: Option<usize>,

    pub offset: Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    /// Every column
    All,

    /// The listed columns
    Columns(Vec<String>),

    /// A single `count` column holding the number of matching rows
    Count,
}

impl From<Option<Vec<String>>> for Projection {
    fn from(value: Option<Vec<String>>) -> Self {
        match value {
            Some(columns) if !columns.is_empty() => Projection::Columns(columns),
            _ => Projection::All,
        }
    }
}

impl From<Select> for Statement {
    fn from(value: Select) -> Self {
        Self::Select(value)
    }
}
