use vellum_core::stmt::{Filter, SortBy};

/// Arguments of [`super::Db::find_many`].
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Query {
    pub filter: Vec<Filter>,

    /// Maximum number of records. Defaults to the configured cap.
    pub limit: Option<usize>,

    pub offset: Option<usize>,

    pub sort_by: Option<SortBy>,

    /// Logical fields to return. All returned fields when `None`.
    pub select: Option<Vec<String>>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter.push(filter);
        self
    }

    pub fn filters(mut self, filters: impl IntoIterator<Item = Filter>) -> Self {
        self.filter.extend(filters);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn sort_by(mut self, sort_by: SortBy) -> Self {
        self.sort_by = Some(sort_by);
        self
    }

    pub fn select<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.select = Some(fields.into_iter().map(Into::into).collect());
        self
    }
}

impl From<Vec<Filter>> for Query {
    fn from(filter: Vec<Filter>) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }
}
