#[macro_use]
mod fmt;
use fmt::ToSql;

mod delim;
use delim::{Comma, Delimited};

mod flavor;
use flavor::Flavor;

mod ident;
use ident::Ident;

mod params;
pub use params::{Params, Placeholder};

// Fragment serializers
mod column_def;
mod expr;
mod statement;
mod ty;
mod value;

use crate::{stmt::Statement, MigrationStatement};

use vellum_core::schema::db::{Migration, Plan};

/// Serialize a statement to a SQL string
#[derive(Debug)]
pub struct Serializer {
    /// The database flavor handles the differences between SQL dialects and
    /// supported features.
    flavor: Flavor,
}

struct Formatter<'a, T> {
    /// Handle to the serializer
    serializer: &'a Serializer,

    /// Where to write the serialized SQL
    dst: &'a mut String,

    /// Where to store parameters
    params: &'a mut T,
}

impl Serializer {
    /// Serializes a statement. Values are pushed to `params` and replaced by
    /// placeholders.
    pub fn serialize(&self, stmt: &Statement, params: &mut impl Params) -> String {
        let mut ret = String::new();

        let mut fmt = Formatter {
            serializer: self,
            dst: &mut ret,
            params,
        };

        stmt.to_sql(&mut fmt);
        ret
    }

    /// Compiles a migration plan into DDL statements.
    pub fn serialize_migration(&self, plan: &Plan) -> Migration {
        let statements = MigrationStatement::from_plan(plan)
            .iter()
            .map(|ms| {
                // DDL carries no bound values
                let mut params = Vec::new();
                self.serialize(ms.statement(), &mut params)
            })
            .collect();

        Migration::Sql(statements)
    }

    fn is_sqlite(&self) -> bool {
        matches!(self.flavor, Flavor::Sqlite)
    }

    fn is_mysql(&self) -> bool {
        matches!(self.flavor, Flavor::Mysql)
    }
}
