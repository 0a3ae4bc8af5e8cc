use crate::{stmt::Record, Error, Result};

#[derive(Debug)]
pub struct Response {
    pub rows: Rows,
}

#[derive(Debug)]
pub enum Rows {
    /// Number of rows impacted by the operation
    Count(u64),

    /// Physical rows returned by the operation
    Values(Vec<Record>),
}

impl Response {
    pub fn count(count: u64) -> Self {
        Self {
            rows: Rows::Count(count),
        }
    }

    pub fn values(rows: Vec<Record>) -> Self {
        Self {
            rows: Rows::Values(rows),
        }
    }

    pub fn empty() -> Self {
        Self::values(vec![])
    }

    /// Returns the rows, failing if the driver reported a count.
    pub fn into_values(self) -> Result<Vec<Record>> {
        match self.rows {
            Rows::Values(rows) => Ok(rows),
            Rows::Count(count) => Err(Error::invalid_result(format!(
                "expected rows, got count {count}"
            ))),
        }
    }

    /// Returns the first row, if any.
    pub fn into_first(self) -> Result<Option<Record>> {
        Ok(self.into_values()?.into_iter().next())
    }

    /// Returns the affected or counted number of rows.
    ///
    /// Some backends report aggregates as a single row; the first column of
    /// that row is read and, if it is text, parsed.
    pub fn into_count(self) -> Result<u64> {
        match self.rows {
            Rows::Count(count) => Ok(count),
            Rows::Values(rows) => {
                let Some(row) = rows.into_iter().next() else {
                    return Ok(0);
                };
                let Some((_, value)) = row.into_iter().next() else {
                    return Err(Error::invalid_result("aggregate row has no columns"));
                };
                let count = value.to_i64()?;
                u64::try_from(count)
                    .map_err(|_| Error::invalid_result(format!("negative count {count}")))
            }
        }
    }
}

impl Rows {
    pub fn is_count(&self) -> bool {
        matches!(self, Self::Count(_))
    }

    pub fn is_values(&self) -> bool {
        matches!(self, Self::Values(_))
    }
}
