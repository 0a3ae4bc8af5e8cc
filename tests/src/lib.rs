#[macro_use]
mod macros;

pub mod db;
pub mod fixture;

mod vellum_test;
// Re-export for use in macros - needs to be public for macro expansion
pub use vellum_test::VellumTest;

use vellum::{
    db::Builder,
    driver::{operation, Capability},
    Db, Record, Result,
};
use vellum_core::stmt::Condition;

#[async_trait::async_trait]
pub trait Setup: Send + Sync + 'static {
    /// Opens a fresh store with the builder's schema materialized.
    async fn setup(&self, builder: Builder) -> Db {
        let db = self.connect(builder).await.unwrap();
        self.prepare(&db).await.unwrap();
        db
    }

    async fn connect(&self, builder: Builder) -> Result<Db>;

    /// Creates tables ahead of the first write, for stores that need it.
    async fn prepare(&self, _db: &Db) -> Result<()> {
        Ok(())
    }

    fn capability(&self) -> &Capability;
}

/// Reads a row as the driver stores it, bypassing every conversion.
pub async fn raw_row(db: &Db, table: &str, id_column: &str, id: vellum::Value) -> Record {
    db.driver()
        .exec(
            operation::FindOne {
                table: table.to_string(),
                filter: Condition::eq(id_column, id),
                select: None,
            }
            .into(),
        )
        .await
        .unwrap()
        .into_first()
        .unwrap()
        .expect("row not found")
}
