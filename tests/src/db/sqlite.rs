use vellum::{db::Builder, driver::Capability, Db, Result};

use crate::Setup;

#[derive(Default)]
pub struct SetupSqlite;

impl SetupSqlite {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl Setup for SetupSqlite {
    async fn connect(&self, mut builder: Builder) -> Result<Db> {
        builder.connect("sqlite::memory:")
    }

    async fn prepare(&self, db: &Db) -> Result<()> {
        db.migrator().run().await?;
        Ok(())
    }

    fn capability(&self) -> &Capability {
        &Capability::SQLITE
    }
}
