use vellum_core::schema::db::{Plan, PlanStep};

use crate::stmt::Statement;

/// A DDL statement produced from one step of a migration [`Plan`].
#[derive(Debug, Clone)]
pub struct MigrationStatement {
    statement: Statement,
}

impl MigrationStatement {
    /// Converts plan steps to statements, preserving plan order.
    pub fn from_plan(plan: &Plan) -> Vec<Self> {
        plan.steps
            .iter()
            .map(|step| MigrationStatement {
                statement: match step {
                    PlanStep::CreateTable(table) => Statement::create_table(table),
                    PlanStep::AddColumn { table, column } => Statement::add_column(table, column),
                },
            })
            .collect()
    }

    pub fn statement(&self) -> &Statement {
        &self.statement
    }
}
