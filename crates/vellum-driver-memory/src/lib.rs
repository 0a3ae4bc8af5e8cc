use indexmap::IndexMap;
use std::{
    cmp::Ordering,
    sync::{Mutex, MutexGuard},
};
use vellum_core::{
    async_trait,
    driver::{operation, Capability, Driver, Operation, Response},
    err,
    schema::db::{self, Migration, Plan},
    stmt::{Direction, Record, SortBy, Value},
    Error, Result,
};

/// In-memory backend, used for tests.
///
/// Tables are created on first write. Conditions are evaluated directly
/// against stored rows, so results follow the same semantics as the SQL
/// backends without a query language in between.
#[derive(Debug, Default)]
pub struct Memory {
    tables: Mutex<IndexMap<String, Table>>,
}

#[derive(Debug, Default)]
struct Table {
    rows: Vec<Record>,

    /// Last issued auto-increment value. Never decreases, so deleted ids
    /// are not reused.
    last_id: i64,

    /// Columns seen so far, in first-seen order
    columns: Vec<String>,
}

impl Memory {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, IndexMap<String, Table>>> {
        self.tables
            .lock()
            .map_err(|_| err!("memory store lock poisoned"))
    }
}

#[async_trait]
impl Driver for Memory {
    fn capability(&self) -> &Capability {
        &Capability::MEMORY
    }

    async fn exec(&self, op: Operation) -> Result<Response> {
        let mut tables = self.lock()?;
        tracing::trace!(op = op.name(), table = op.table(), "memory exec");

        match op {
            Operation::Create(op) => create(&mut tables, op),
            Operation::FindOne(op) => {
                let rows = tables
                    .get(&op.table)
                    .and_then(|table| table.rows.iter().find(|row| op.filter.eval(row)))
                    .map(|row| project(row, op.select.as_deref()))
                    .into_iter()
                    .collect();
                Ok(Response::values(rows))
            }
            Operation::FindMany(op) => Ok(Response::values(find_many(&tables, op))),
            Operation::Update(op) => {
                let Some(table) = tables.get_mut(&op.table) else {
                    return Ok(Response::empty());
                };
                let Some(row) = table.rows.iter_mut().find(|row| op.filter.eval(row)) else {
                    return Ok(Response::empty());
                };
                assign(row, &op.values);
                let updated = row.clone();
                table.observe(&op.values);
                Ok(Response::values(vec![updated]))
            }
            Operation::UpdateMany(op) => {
                let Some(table) = tables.get_mut(&op.table) else {
                    return Ok(Response::count(0));
                };
                let mut count = 0;
                for row in table.rows.iter_mut().filter(|row| op.filter.eval(row)) {
                    assign(row, &op.values);
                    count += 1;
                }
                table.observe(&op.values);
                Ok(Response::count(count))
            }
            Operation::Delete(op) => {
                let Some(table) = tables.get_mut(&op.table) else {
                    return Ok(Response::count(0));
                };
                match table.rows.iter().position(|row| op.filter.eval(row)) {
                    Some(index) => {
                        table.rows.remove(index);
                        Ok(Response::count(1))
                    }
                    None => Ok(Response::count(0)),
                }
            }
            Operation::DeleteMany(op) => {
                let Some(table) = tables.get_mut(&op.table) else {
                    return Ok(Response::count(0));
                };
                let before = table.rows.len();
                table.rows.retain(|row| !op.filter.eval(row));
                Ok(Response::count((before - table.rows.len()) as u64))
            }
            Operation::Count(op) => {
                let count = tables
                    .get(&op.table)
                    .map(|table| table.rows.iter().filter(|row| op.filter.eval(row)).count())
                    .unwrap_or(0);
                Ok(Response::count(count as u64))
            }
        }
    }

    async fn introspect(&self) -> Result<db::Schema> {
        let tables = self.lock()?;

        Ok(db::Schema {
            tables: tables
                .iter()
                .map(|(name, table)| db::Table {
                    name: name.clone(),
                    columns: table
                        .columns
                        .iter()
                        .map(|column| db::Column::new(column, "any"))
                        .collect(),
                })
                .collect(),
        })
    }

    fn generate_migration(&self, plan: &Plan) -> Result<Migration> {
        Ok(Migration::Tables(plan.created_tables().cloned().collect()))
    }

    async fn apply_migration(&self, migration: &Migration) -> Result<()> {
        let Migration::Tables(defs) = migration else {
            return Err(Error::unsupported_feature(
                "the memory store cannot run SQL migrations",
            ));
        };

        let mut tables = self.lock()?;

        for def in defs {
            let table = tables.entry(def.name.clone()).or_default();
            for column in &def.columns {
                table.observe_column(&column.name);
            }
        }

        Ok(())
    }
}

impl Table {
    fn observe(&mut self, row: &Record) {
        for column in row.keys() {
            self.observe_column(column);
        }
    }

    fn observe_column(&mut self, column: &str) {
        if !self.columns.iter().any(|c| c == column) {
            self.columns.push(column.to_string());
        }
    }
}

fn create(tables: &mut IndexMap<String, Table>, op: operation::Create) -> Result<Response> {
    let table = tables.entry(op.table).or_default();
    let mut row = op.row;

    if let Some(column) = op.auto_increment {
        if row.contains(&column) {
            return Err(Error::invalid_result(format!(
                "auto-increment column `{column}` was given a value"
            )));
        }

        table.last_id += 1;
        let mut with_id = Record::with_capacity(row.len() + 1);
        with_id.insert(column, table.last_id);
        for (name, value) in row {
            with_id.insert(name, value);
        }
        row = with_id;
    }

    table.observe(&row);
    table.rows.push(row.clone());
    Ok(Response::values(vec![row]))
}

fn find_many(tables: &IndexMap<String, Table>, op: operation::FindMany) -> Vec<Record> {
    let Some(table) = tables.get(&op.table) else {
        return vec![];
    };

    let mut rows: Vec<&Record> = table.rows.iter().filter(|row| op.filter.eval(row)).collect();

    if let Some(sort) = &op.sort {
        rows.sort_by(|a, b| compare(a, b, sort));
    }

    rows.into_iter()
        .skip(op.offset.unwrap_or(0))
        .take(op.limit.unwrap_or(usize::MAX))
        .map(|row| project(row, op.select.as_deref()))
        .collect()
}

/// Orders rows by one column. Nulls sort first, as in SQLite.
fn compare(a: &Record, b: &Record, sort: &SortBy) -> Ordering {
    let a = a.get(&sort.field).unwrap_or(&Value::Null);
    let b = b.get(&sort.field).unwrap_or(&Value::Null);

    let ordering = match (a.is_null(), b.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.compare(b).unwrap_or(Ordering::Equal),
    };

    match sort.direction {
        Direction::Asc => ordering,
        Direction::Desc => ordering.reverse(),
    }
}

fn project(row: &Record, select: Option<&[String]>) -> Record {
    match select {
        Some(columns) if !columns.is_empty() => columns
            .iter()
            .map(|column| {
                (
                    column.clone(),
                    row.get(column).cloned().unwrap_or(Value::Null),
                )
            })
            .collect(),
        _ => row.clone(),
    }
}

fn assign(row: &mut Record, values: &Record) {
    for (column, value) in values {
        row.insert(column, value.clone());
    }
}
