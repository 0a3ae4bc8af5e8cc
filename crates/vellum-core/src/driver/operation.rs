mod count;
pub use count::Count;

mod create;
pub use create::Create;

mod delete;
pub use delete::Delete;

mod delete_many;
pub use delete_many::DeleteMany;

mod find_many;
pub use find_many::FindMany;

mod find_one;
pub use find_one::FindOne;

mod update;
pub use update::Update;

mod update_many;
pub use update_many::UpdateMany;

/// A single driver call. All names are physical.
#[derive(Debug, Clone)]
pub enum Operation {
    /// Insert one row, returning it.
    Create(Create),

    /// Return the first matching row, if any.
    FindOne(FindOne),

    /// Return matching rows.
    FindMany(FindMany),

    /// Update the first matching row, returning it.
    Update(Update),

    /// Update every matching row, returning the affected count.
    UpdateMany(UpdateMany),

    /// Delete the first matching row, returning the affected count.
    Delete(Delete),

    /// Delete every matching row, returning the affected count.
    DeleteMany(DeleteMany),

    /// Count matching rows.
    Count(Count),
}

impl Operation {
    /// The table the operation targets.
    pub fn table(&self) -> &str {
        match self {
            Operation::Create(op) => &op.table,
            Operation::FindOne(op) => &op.table,
            Operation::FindMany(op) => &op.table,
            Operation::Update(op) => &op.table,
            Operation::UpdateMany(op) => &op.table,
            Operation::Delete(op) => &op.table,
            Operation::DeleteMany(op) => &op.table,
            Operation::Count(op) => &op.table,
        }
    }

    /// Short name of the operation, used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Create(_) => "create",
            Operation::FindOne(_) => "find_one",
            Operation::FindMany(_) => "find_many",
            Operation::Update(_) => "update",
            Operation::UpdateMany(_) => "update_many",
            Operation::Delete(_) => "delete",
            Operation::DeleteMany(_) => "delete_many",
            Operation::Count(_) => "count",
        }
    }
}
