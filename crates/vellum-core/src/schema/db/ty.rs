use crate::{
    driver::Dialect,
    schema::app::{Field, FieldType},
};

/// Column storage type.
///
/// A `Type` is rendered to SQL per dialect with [`Type::name`]. Several
/// types share a rendering on backends with fewer native types: SQLite
/// stores booleans as `INTEGER` and JSON as `TEXT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Type {
    /// Unconstrained text type
    Text,

    /// Text type with an explicit maximum length
    VarChar(u64),

    /// A signed integer of `n` bytes
    Integer(u8),

    /// A boolean value
    Boolean,

    /// An instant in time
    Timestamp,

    /// A JSON document
    Json,
}

impl Type {
    /// Computes the column type for a logical field.
    ///
    /// The identifier and foreign keys to an identifier follow the id mode:
    /// integers when the backend generates numeric ids, text otherwise.
    pub fn for_field(field: &Field, dialect: Dialect, numeric_ids: bool) -> Type {
        if field.is_id_like() {
            return match (numeric_ids, dialect) {
                (true, _) => Type::Integer(if field.bigint { 8 } else { 4 }),
                (false, Dialect::Mysql) => Type::VarChar(36),
                (false, _) => Type::Text,
            };
        }

        match field.ty {
            FieldType::String => match dialect {
                Dialect::Mysql if field.unique || field.sortable || field.references.is_some() => {
                    Type::VarChar(255)
                }
                _ => Type::Text,
            },
            FieldType::Number => Type::Integer(if field.bigint { 8 } else { 4 }),
            FieldType::Boolean => Type::Boolean,
            FieldType::Date => Type::Timestamp,
            FieldType::StringArray | FieldType::NumberArray => Type::Json,
        }
    }

    /// SQL type name in the given dialect.
    pub fn name(self, dialect: Dialect) -> String {
        match (self, dialect) {
            (Type::Text, _) => "TEXT".to_string(),
            (Type::VarChar(n), _) => format!("VARCHAR({n})"),
            (Type::Integer(_), Dialect::Sqlite) => "INTEGER".to_string(),
            (Type::Integer(n), Dialect::Postgresql) if n <= 4 => "INTEGER".to_string(),
            (Type::Integer(n), Dialect::Mysql) if n <= 4 => "INT".to_string(),
            (Type::Integer(_), _) => "BIGINT".to_string(),
            (Type::Boolean, Dialect::Sqlite) => "INTEGER".to_string(),
            (Type::Boolean, _) => "BOOLEAN".to_string(),
            (Type::Timestamp, Dialect::Sqlite) => "DATE".to_string(),
            (Type::Timestamp, Dialect::Postgresql) => "TIMESTAMPTZ".to_string(),
            (Type::Timestamp, Dialect::Mysql) => "TIMESTAMP(3)".to_string(),
            (Type::Json, Dialect::Sqlite) => "TEXT".to_string(),
            (Type::Json, Dialect::Postgresql) => "JSONB".to_string(),
            (Type::Json, Dialect::Mysql) => "JSON".to_string(),
        }
    }

    /// Returns true if a type name reported by the database is the same
    /// storage type as `self`, ignoring case and aliases.
    pub fn matches(self, reported: &str, dialect: Dialect) -> bool {
        family(&self.name(dialect)) == family(reported)
    }
}

/// Normalizes a type name to its family so aliases compare equal.
fn family(name: &str) -> String {
    let name = name.trim().to_ascii_lowercase();
    let base = name.split('(').next().unwrap_or(&name).trim();

    match base {
        "int" | "integer" | "int4" | "int2" | "smallint" | "mediumint" | "serial" => "integer",
        "bigint" | "int8" | "bigserial" => "bigint",
        "text" | "varchar" | "character varying" | "char" | "character" | "tinytext"
        | "mediumtext" | "longtext" | "string" => "text",
        "bool" | "boolean" => "boolean",
        // MySQL reports BOOLEAN columns as tinyint(1)
        "tinyint" if name.starts_with("tinyint(1)") => "boolean",
        "date" | "datetime" | "timestamp" | "timestamptz" | "timestamp with time zone"
        | "timestamp without time zone" => "timestamp",
        "json" | "jsonb" => "json",
        other => other,
    }
    .to_string()
}
