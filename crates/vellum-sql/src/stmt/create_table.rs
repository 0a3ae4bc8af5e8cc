use super::{ColumnDef, Statement};

use vellum_core::schema::db::TableDef;

#[derive(Debug, Clone)]
pub struct CreateTable {
    /// Name of the table
    pub name: String,

    /// Column definitions
    pub columns: Vec<ColumnDef>,
}

impl CreateTable {
    /// The primary key column, if any.
    pub fn primary_key(&self) -> Option<&ColumnDef> {
        self.columns.iter().find(|column| column.primary_key)
    }
}

impl Statement {
    pub fn create_table(table: &TableDef) -> Self {
        CreateTable {
            name: table.name.clone(),
            columns: table.columns.clone(),
        }
        .into()
    }
}

impl From<CreateTable> for Statement {
    fn from(value: CreateTable) -> Self {
        Self::CreateTable(value)
    }
}
