use vellum_core::{
    driver::Driver,
    schema::db::{Migration, Plan, SchemaDiff},
    Result, Schema,
};

/// Brings a store's tables in line with the logical schema.
///
/// A run introspects the store, diffs it against the schema and plans the
/// additive DDL. The plan can then be compiled to a script, executed, or
/// both; neither repeats the diff.
pub struct Migrator<'a> {
    schema: &'a Schema,
    driver: &'a dyn Driver,
    numeric_ids: bool,
}

impl<'a> Migrator<'a> {
    pub fn new(schema: &'a Schema, driver: &'a dyn Driver, numeric_ids: bool) -> Self {
        Self {
            schema,
            driver,
            numeric_ids,
        }
    }

    /// Introspect, diff and plan.
    pub async fn plan(&self) -> Result<Plan> {
        let physical = self.driver.introspect().await?;
        let diff = SchemaDiff::new(
            self.schema,
            &physical,
            self.driver.capability(),
            self.numeric_ids,
        )?;
        let plan = Plan::from_diff(&diff)?;

        tracing::debug!(
            steps = plan.steps.len(),
            drift = plan.drift.len(),
            "migration planned"
        );

        Ok(plan)
    }

    /// The plan as backend DDL, without executing it.
    pub fn generate(&self, plan: &Plan) -> Result<Migration> {
        self.driver.generate_migration(plan)
    }

    /// The plan as a script of `;`-terminated statements.
    pub fn compile(&self, plan: &Plan) -> Result<String> {
        Ok(self.generate(plan)?.script())
    }

    /// Applies the plan. An empty plan is a no-op.
    pub async fn execute(&self, plan: &Plan) -> Result<()> {
        if plan.is_empty() {
            return Ok(());
        }

        let migration = self.generate(plan)?;
        self.driver.apply_migration(&migration).await?;

        tracing::info!(steps = plan.steps.len(), "migration applied");
        Ok(())
    }

    /// Plans and executes in one step, returning the executed plan.
    pub async fn run(&self) -> Result<Plan> {
        let plan = self.plan().await?;
        self.execute(&plan).await?;
        Ok(plan)
    }
}
