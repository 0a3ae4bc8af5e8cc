use vellum::{db::Builder, driver::Capability, Db, Result};

use crate::Setup;

#[derive(Default)]
pub struct SetupMemory;

impl SetupMemory {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl Setup for SetupMemory {
    async fn connect(&self, mut builder: Builder) -> Result<Db> {
        builder.connect("memory:")
    }

    fn capability(&self) -> &Capability {
        &Capability::MEMORY
    }
}
