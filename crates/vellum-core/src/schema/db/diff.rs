use super::{Schema as DbSchema, Type};
use crate::{
    driver::{Capability, Dialect},
    schema::{
        app::{Field, Model},
        Schema,
    },
    Error, Result,
};

use std::fmt;

/// Differences between the logical schema and a store's physical tables.
///
/// Only additive changes are computed. A column whose type differs from the
/// expected one is reported as [`Drift`] and never altered.
#[derive(Debug)]
pub struct SchemaDiff<'a> {
    /// Logical schema the diff was computed from
    pub app: &'a Schema,

    pub dialect: Dialect,

    /// Identifiers are backend-generated integers.
    pub numeric_ids: bool,

    /// Tables needing work, in migration order
    pub tables: Vec<TableDiff<'a>>,

    pub drift: Vec<Drift>,
}

/// Work needed on one table.
#[derive(Debug)]
pub struct TableDiff<'a> {
    /// Physical table name
    pub table: &'a str,

    pub model: &'a Model,

    /// Fields to materialize. All of the model's fields when the table is
    /// created, only missing ones otherwise.
    pub fields: Vec<&'a Field>,

    pub order: i64,

    /// The table does not exist yet.
    pub create: bool,
}

/// A column present on both sides whose type differs from the expected one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Drift {
    pub table: String,
    pub column: String,
    pub expected: String,
    pub actual: String,
}

impl<'a> SchemaDiff<'a> {
    /// Diffs `app` against the introspected `physical` schema.
    ///
    /// Fails if the backend has no dialect, since column types cannot be
    /// computed without one.
    pub fn new(
        app: &'a Schema,
        physical: &DbSchema,
        capability: &Capability,
        numeric_ids: bool,
    ) -> Result<Self> {
        let Some(dialect) = capability.dialect else {
            return Err(Error::invalid_driver_configuration(
                "cannot determine the column types of this backend",
            ));
        };

        let mut tables = vec![];
        let mut drift = vec![];

        for model in app.ordered_models() {
            let Some(existing) = physical.table(model.table()) else {
                tables.push(TableDiff {
                    table: model.table(),
                    model,
                    fields: model.fields.iter().collect(),
                    order: model.effective_order(),
                    create: true,
                });
                continue;
            };

            let mut missing = vec![];

            for field in &model.fields {
                match existing.column(field.column()) {
                    None => missing.push(field),
                    Some(column) => {
                        let expected = Type::for_field(field, dialect, numeric_ids);

                        if !expected.matches(&column.data_type, dialect) {
                            let item = Drift {
                                table: existing.name.clone(),
                                column: column.name.clone(),
                                expected: expected.name(dialect),
                                actual: column.data_type.clone(),
                            };
                            tracing::warn!(
                                table = %item.table,
                                column = %item.column,
                                expected = %item.expected,
                                actual = %item.actual,
                                "schema drift detected"
                            );
                            drift.push(item);
                        }
                    }
                }
            }

            if !missing.is_empty() {
                tables.push(TableDiff {
                    table: model.table(),
                    model,
                    fields: missing,
                    order: model.effective_order(),
                    create: false,
                });
            }
        }

        Ok(Self {
            app,
            dialect,
            numeric_ids,
            tables,
            drift,
        })
    }

    /// True when the store already matches the logical schema.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl fmt::Display for Drift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}: expected {}, found {}",
            self.table, self.column, self.expected, self.actual
        )
    }
}
