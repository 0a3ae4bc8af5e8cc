use super::{Drift, SchemaDiff, Type};
use crate::{
    driver::Dialect,
    schema::{
        app::{Field, OnDelete},
        Schema,
    },
    Error, Result,
};

use std::fmt;

/// Ordered DDL work computed from a [`SchemaDiff`].
///
/// A plan is the single input to both script generation and execution, so a
/// dry run and a live run always agree.
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    pub dialect: Dialect,

    pub steps: Vec<PlanStep>,

    /// Type mismatches found while diffing. Reported, never corrected.
    pub drift: Vec<Drift>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlanStep {
    CreateTable(TableDef),
    AddColumn { table: String, column: ColumnDef },
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableDef {
    pub name: String,
    pub columns: Vec<ColumnDef>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    pub name: String,
    pub ty: Type,
    pub nullable: bool,
    pub unique: bool,
    pub primary_key: bool,

    /// The backend generates the value on insert.
    pub auto_increment: bool,

    pub references: Option<ForeignKey>,
}

/// A foreign key, addressed by physical names.
#[derive(Debug, Clone, PartialEq)]
pub struct ForeignKey {
    pub table: String,
    pub column: String,
    pub on_delete: OnDelete,
}

impl Plan {
    pub fn from_diff(diff: &SchemaDiff<'_>) -> Result<Plan> {
        let mut steps = vec![];

        for table in &diff.tables {
            let columns = table
                .fields
                .iter()
                .map(|field| ColumnDef::for_field(diff.app, field, diff.dialect, diff.numeric_ids))
                .collect::<Result<Vec<_>>>()?;

            if table.create {
                steps.push(PlanStep::CreateTable(TableDef {
                    name: table.table.to_string(),
                    columns,
                }));
            } else {
                steps.extend(columns.into_iter().map(|column| PlanStep::AddColumn {
                    table: table.table.to_string(),
                    column,
                }));
            }
        }

        Ok(Plan {
            dialect: diff.dialect,
            steps,
            drift: diff.drift.clone(),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Tables the plan creates, in creation order.
    pub fn created_tables(&self) -> impl Iterator<Item = &TableDef> + '_ {
        self.steps.iter().filter_map(|step| match step {
            PlanStep::CreateTable(table) => Some(table),
            PlanStep::AddColumn { .. } => None,
        })
    }
}

impl ColumnDef {
    pub fn for_field(
        app: &Schema,
        field: &Field,
        dialect: Dialect,
        numeric_ids: bool,
    ) -> Result<ColumnDef> {
        let references = match &field.references {
            Some(reference) => {
                let target = app.resolve_model(&reference.model)?;
                let column = target.field_named(&reference.field).ok_or_else(|| {
                    Error::invalid_schema(format!(
                        "field `{}` references unknown field `{}.{}`",
                        field.name, target.name, reference.field
                    ))
                })?;

                Some(ForeignKey {
                    table: target.table().to_string(),
                    column: column.column().to_string(),
                    on_delete: reference.on_delete,
                })
            }
            None => None,
        };

        Ok(ColumnDef {
            name: field.column().to_string(),
            ty: Type::for_field(field, dialect, numeric_ids),
            nullable: !field.required && !field.primary_key,
            unique: field.unique && !field.primary_key,
            primary_key: field.primary_key,
            auto_increment: field.primary_key && numeric_ids,
            references,
        })
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in &self.steps {
            match step {
                PlanStep::CreateTable(table) => {
                    let columns = table
                        .columns
                        .iter()
                        .map(|column| column.name.as_str())
                        .collect::<Vec<_>>()
                        .join(", ");
                    writeln!(f, "create table {} ({columns})", table.name)?;
                }
                PlanStep::AddColumn { table, column } => {
                    writeln!(
                        f,
                        "add column {table}.{} {}",
                        column.name,
                        column.ty.name(self.dialect)
                    )?;
                }
            }
        }
        Ok(())
    }
}
