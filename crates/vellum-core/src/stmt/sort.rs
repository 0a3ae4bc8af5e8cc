use serde::Deserialize;

/// Ordering requested by `find_many`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortBy {
    /// Logical field name when passed to the adapter, physical column name
    /// when passed to a driver.
    pub field: String,
    pub direction: Direction,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl SortBy {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Desc,
        }
    }
}
