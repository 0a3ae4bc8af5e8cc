use serde::Deserialize;

/// What a backend can represent natively.
///
/// The adapter uses these flags to decide how logical values are stored: a
/// backend without native booleans receives `1`/`0`, one without native dates
/// receives ISO-8601 text, one without JSON receives serialized arrays.
#[derive(Debug)]
pub struct Capability {
    /// Native boolean values.
    pub booleans: bool,

    /// Native date/time values.
    pub dates: bool,

    /// Native JSON values (used for array fields).
    pub json: bool,

    /// Backend-native auto-incrementing numeric identifiers.
    pub numeric_ids: bool,

    /// Supports `contains`, `starts_with` and `ends_with` filters.
    pub pattern_matching: bool,

    /// Writes can return the affected rows in the same statement.
    pub returning: bool,

    /// SQL dialect used for DDL. `None` for stores without a schema language,
    /// which cannot be migrated.
    pub dialect: Option<Dialect>,
}

/// SQL dialects the migration engine knows how to type columns for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    Sqlite,
    Postgresql,
    Mysql,
}

impl Capability {
    /// SQLite capabilities.
    pub const SQLITE: Self = Self {
        booleans: false,
        dates: false,
        json: false,
        numeric_ids: true,
        pattern_matching: true,
        returning: true,
        dialect: Some(Dialect::Sqlite),
    };

    /// PostgreSQL capabilities.
    pub const POSTGRESQL: Self = Self {
        booleans: true,
        dates: true,
        json: true,
        dialect: Some(Dialect::Postgresql),
        ..Self::SQLITE
    };

    /// MySQL capabilities.
    pub const MYSQL: Self = Self {
        booleans: false,
        dates: true,
        json: true,
        returning: false,
        dialect: Some(Dialect::Mysql),
        ..Self::SQLITE
    };

    /// In-memory store capabilities. Values are kept as-is.
    pub const MEMORY: Self = Self {
        booleans: true,
        dates: true,
        json: true,
        numeric_ids: true,
        pattern_matching: true,
        returning: true,
        dialect: None,
    };
}

impl Dialect {
    pub fn name(self) -> &'static str {
        match self {
            Dialect::Sqlite => "sqlite",
            Dialect::Postgresql => "postgresql",
            Dialect::Mysql => "mysql",
        }
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
