use super::TableDef;

/// Database migration generated from a [`super::Plan`] by a driver.
#[derive(Debug, Clone, PartialEq)]
pub enum Migration {
    /// DDL statements, executed in order
    Sql(Vec<String>),

    /// Tables to materialize, for stores without a schema language
    Tables(Vec<TableDef>),
}

impl Migration {
    /// Individual SQL statements, without terminators.
    pub fn statements(&self) -> Vec<&str> {
        match self {
            Migration::Sql(statements) => statements.iter().map(String::as_str).collect(),
            Migration::Tables(_) => vec![],
        }
    }

    /// The migration as a script: statements joined by `;` and newlines.
    pub fn script(&self) -> String {
        match self {
            Migration::Sql(statements) => statements
                .iter()
                .map(|statement| format!("{statement};\n"))
                .collect(),
            Migration::Tables(tables) => tables
                .iter()
                .map(|table| format!("-- create table {}\n", table.name))
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Migration::Sql(statements) => statements.is_empty(),
            Migration::Tables(tables) => tables.is_empty(),
        }
    }
}
