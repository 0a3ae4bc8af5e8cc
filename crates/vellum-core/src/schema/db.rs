mod column;
pub use column::Column;

mod diff;
pub use diff::{Drift, SchemaDiff, TableDiff};

mod migration;
pub use migration::Migration;

mod plan;
pub use plan::{ColumnDef, ForeignKey, Plan, PlanStep, TableDef};

mod schema;
pub use schema::Schema;

mod table;
pub use table::Table;

mod ty;
pub use ty::Type;
