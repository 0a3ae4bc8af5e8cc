mod capability;
pub use capability::{Capability, Dialect};

mod response;
pub use response::{Response, Rows};

pub mod operation;
pub use operation::Operation;

use crate::{
    async_trait,
    schema::db::{self, Migration, Plan},
    Error, Result,
};

use std::fmt::Debug;

/// A storage backend.
///
/// Every operation receives already-resolved physical table and column names
/// and already-coerced values. Drivers never see logical names.
#[async_trait]
pub trait Driver: Debug + Send + Sync + 'static {
    /// Describes the driver's capability, which drives value coercion and
    /// migration planning.
    fn capability(&self) -> &Capability;

    /// Execute a database operation.
    async fn exec(&self, op: Operation) -> Result<Response>;

    /// Reads the tables and columns currently present in the store.
    async fn introspect(&self) -> Result<db::Schema> {
        Err(Error::unsupported_feature(
            "this driver does not support schema introspection",
        ))
    }

    /// Compiles a migration plan into the backend's DDL without executing it.
    fn generate_migration(&self, _plan: &Plan) -> Result<Migration> {
        Err(Error::unsupported_feature(
            "this driver does not support migrations",
        ))
    }

    /// Applies a previously generated migration.
    async fn apply_migration(&self, _migration: &Migration) -> Result<()> {
        Err(Error::unsupported_feature(
            "this driver does not support migrations",
        ))
    }
}
