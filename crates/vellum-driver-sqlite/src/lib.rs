mod value;
pub(crate) use value::Value;

use rusqlite::Connection;
use std::{
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard},
};
use url::Url;
use vellum_core::{
    async_trait,
    driver::{Capability, Dialect, Driver, Operation, Response},
    err,
    schema::db::{self, Migration, Plan},
    stmt::Record,
    Error, Result,
};
use vellum_sql as sql;

/// SQLite backend.
///
/// A single connection is shared behind a mutex. Statements are executed
/// synchronously while the lock is held; SQLite serializes writers anyway.
#[derive(Debug)]
pub struct Sqlite {
    location: Location,
    connection: Mutex<Connection>,
}

#[derive(Debug, Clone, PartialEq)]
enum Location {
    File(PathBuf),
    InMemory,
}

impl Sqlite {
    /// Opens a database from a connection URL.
    ///
    /// Accepted forms are `sqlite::memory:`, `sqlite:relative/path.db`,
    /// `sqlite:///absolute/path.db` and `sqlite://relative/path.db`.
    pub fn new(url: impl AsRef<str>) -> Result<Self> {
        Self::from_location(parse_url(url.as_ref())?)
    }

    /// Create an in-memory SQLite database
    pub fn in_memory() -> Result<Self> {
        Self::from_location(Location::InMemory)
    }

    /// Open a SQLite database at the specified file path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_location(Location::File(path.as_ref().to_path_buf()))
    }

    fn from_location(location: Location) -> Result<Self> {
        let connection = match &location {
            Location::File(path) => Connection::open(path),
            Location::InMemory => Connection::open_in_memory(),
        }
        .map_err(Error::driver)?;

        connection
            .execute_batch("PRAGMA foreign_keys = ON")
            .map_err(Error::driver)?;

        Ok(Self {
            location,
            connection: Mutex::new(connection),
        })
    }

    /// Connection URL of this database.
    pub fn url(&self) -> String {
        match &self.location {
            Location::InMemory => "sqlite::memory:".to_string(),
            Location::File(path) => format!("sqlite:{}", path.display()),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.connection
            .lock()
            .map_err(|_| err!("sqlite connection lock poisoned"))
    }
}

fn parse_url(src: &str) -> Result<Location> {
    let url = Url::parse(src).map_err(|e| {
        Error::invalid_driver_configuration(format!("invalid connection URL `{src}`: {e}"))
    })?;

    if url.scheme() != "sqlite" {
        return Err(Error::invalid_driver_configuration(format!(
            "connection URL does not have a `sqlite` scheme; url={src}"
        )));
    }

    let path = match url.host_str() {
        Some(host) => format!("{host}{}", url.path()),
        None => url.path().to_string(),
    };

    if path == ":memory:" {
        Ok(Location::InMemory)
    } else if path.is_empty() {
        Err(Error::invalid_driver_configuration(format!(
            "connection URL has no database path; url={src}"
        )))
    } else {
        Ok(Location::File(PathBuf::from(path)))
    }
}

#[async_trait]
impl Driver for Sqlite {
    fn capability(&self) -> &Capability {
        &Capability::SQLITE
    }

    async fn exec(&self, op: Operation) -> Result<Response> {
        let connection = self.lock()?;
        exec(&connection, op)
    }

    async fn introspect(&self) -> Result<db::Schema> {
        let connection = self.lock()?;
        introspect(&connection)
    }

    fn generate_migration(&self, plan: &Plan) -> Result<Migration> {
        if plan.dialect != Dialect::Sqlite {
            return Err(Error::invalid_driver_configuration(format!(
                "cannot apply a {} plan to sqlite",
                plan.dialect
            )));
        }

        Ok(sql::Serializer::sqlite().serialize_migration(plan))
    }

    async fn apply_migration(&self, migration: &Migration) -> Result<()> {
        let Migration::Sql(_) = migration else {
            return Err(Error::unsupported_feature(
                "sqlite only applies SQL migrations",
            ));
        };

        let connection = self.lock()?;
        apply(&connection, migration)
    }
}

fn exec(connection: &Connection, op: Operation) -> Result<Response> {
    let statement = sql::Statement::from(op);

    let mut params: Vec<vellum_core::stmt::Value> = vec![];
    let sql_str = sql::Serializer::sqlite().serialize(&statement, &mut params);
    tracing::trace!(sql = %sql_str, params = params.len(), "sqlite exec");

    let params = params.into_iter().map(Value::from).collect::<Vec<_>>();
    let mut stmt = connection.prepare_cached(&sql_str).map_err(Error::driver)?;

    if !statement.returns_rows() {
        let count = stmt
            .execute(rusqlite::params_from_iter(params.iter()))
            .map_err(Error::driver)?;

        return Ok(Response::count(count as u64));
    }

    let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
    let mut rows = stmt
        .query(rusqlite::params_from_iter(params.iter()))
        .map_err(Error::driver)?;

    let mut ret = vec![];

    while let Some(row) = rows.next().map_err(Error::driver)? {
        let mut record = Record::with_capacity(columns.len());

        for (index, column) in columns.iter().enumerate() {
            record.insert(column.as_str(), Value::from_sql(row, index)?.into_inner());
        }

        ret.push(record);
    }

    Ok(Response::values(ret))
}

fn introspect(connection: &Connection) -> Result<db::Schema> {
    let mut tables = connection
        .prepare(
            "SELECT name FROM sqlite_master \
             WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
        )
        .map_err(Error::driver)?;

    let names = tables
        .query_map([], |row| row.get::<_, String>(0))
        .map_err(Error::driver)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .map_err(Error::driver)?;

    let mut columns = connection
        .prepare("SELECT name, type, \"notnull\", pk FROM pragma_table_info(?1) ORDER BY cid")
        .map_err(Error::driver)?;

    let mut schema = db::Schema::default();

    for name in names {
        let mut table = db::Table::new(&name);

        table.columns = columns
            .query_map([&name], |row| {
                Ok(db::Column {
                    name: row.get(0)?,
                    data_type: row.get(1)?,
                    nullable: row.get::<_, i64>(2)? == 0,
                    primary_key: row.get::<_, i64>(3)? > 0,
                })
            })
            .map_err(Error::driver)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(Error::driver)?;

        schema.tables.push(table);
    }

    Ok(schema)
}

/// Runs every statement in one transaction, rolling back on the first
/// failure.
fn apply(connection: &Connection, migration: &Migration) -> Result<()> {
    connection.execute_batch("BEGIN").map_err(Error::driver)?;

    for statement in migration.statements() {
        tracing::debug!(sql = %statement, "applying migration statement");

        if let Err(e) = connection.execute(statement, []) {
            connection.execute_batch("ROLLBACK").map_err(Error::driver)?;
            return Err(Error::driver(e));
        }
    }

    connection.execute_batch("COMMIT").map_err(Error::driver)?;
    Ok(())
}
