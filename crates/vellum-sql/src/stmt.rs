mod add_column;
pub use add_column::AddColumn;

mod create_table;
pub use create_table::CreateTable;

mod delete;
pub use delete::Delete;

mod insert;
pub use insert::Insert;

mod select;
pub use select::{Projection, Select};

mod update;
pub use update::Update;

pub use vellum_core::schema::db::ColumnDef;
pub use vellum_core::stmt::*;

use vellum_core::driver::Operation;

#[derive(Debug, Clone)]
pub enum Statement {
    AddColumn(AddColumn),
    CreateTable(CreateTable),
    Delete(Delete),
    Insert(Insert),
    Select(Select),
    Update(Update),
}

impl Statement {
    pub fn is_query(&self) -> bool {
        matches!(self, Statement::Select(_))
    }

    /// True if executing the statement yields rows.
    pub fn returns_rows(&self) -> bool {
        match self {
            Statement::Select(_) => true,
            Statement::Insert(insert) => insert.returning,
            Statement::Update(update) => update.returning,
            _ => false,
        }
    }
}

impl From<Operation> for Statement {
    fn from(op: Operation) -> Self {
        match op {
            Operation::Create(op) => Insert {
                table: op.table,
                row: op.row,
                returning: true,
            }
            .into(),
            Operation::FindOne(op) => Select {
                table: op.table,
                projection: Projection::from(op.select),
                filter: op.filter,
                order_by: None,
                limit: Some(1),
                offset: None,
            }
            .into(),
            Operation::FindMany(op) => Select {
                table: op.table,
                projection: Projection::from(op.select),
                filter: op.filter,
                order_by: op.sort,
                limit: op.limit,
                offset: op.offset,
            }
            .into(),
            Operation::Update(op) => Update {
                table: op.table,
                values: op.values,
                filter: op.filter,
                single: Some(op.key),
                returning: true,
            }
            .into(),
            Operation::UpdateMany(op) => Update {
                table: op.table,
                values: op.values,
                filter: op.filter,
                single: None,
                returning: false,
            }
            .into(),
            Operation::Delete(op) => Delete {
                table: op.table,
                filter: op.filter,
                single: Some(op.key),
            }
            .into(),
            Operation::DeleteMany(op) => Delete {
                table: op.table,
                filter: op.filter,
                single: None,
            }
            .into(),
            Operation::Count(op) => Select {
                table: op.table,
                projection: Projection::Count,
                filter: op.filter,
                order_by: None,
                limit: None,
                offset: None,
            }
            .into(),
        }
    }
}
