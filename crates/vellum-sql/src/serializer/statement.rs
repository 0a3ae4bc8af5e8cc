use super::{Comma, Flavor, Ident, Params, ToSql};

use crate::stmt::{self, Direction, Projection};

use vellum_core::stmt::{Condition, Value};

impl ToSql for &stmt::Statement {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        match self {
            stmt::Statement::AddColumn(stmt) => stmt.to_sql(f),
            stmt::Statement::CreateTable(stmt) => stmt.to_sql(f),
            stmt::Statement::Delete(stmt) => stmt.to_sql(f),
            stmt::Statement::Insert(stmt) => stmt.to_sql(f),
            stmt::Statement::Select(stmt) => stmt.to_sql(f),
            stmt::Statement::Update(stmt) => stmt.to_sql(f),
        }
    }
}

struct ColumnsWithConstraints<'a>(&'a stmt::CreateTable);

impl ToSql for ColumnsWithConstraints<'_> {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let columns = &self.0.columns;

        for (index, column) in columns.iter().enumerate() {
            fmt!(f, "\n    " column);
            if index < columns.len() - 1 {
                fmt!(f, ",");
            }
        }

        // SQLite declares an auto-incrementing key inline
        match self.0.primary_key() {
            Some(pk) if !(pk.auto_increment && f.serializer.is_sqlite()) => {
                fmt!(f, ",\n    PRIMARY KEY (" Ident(&pk.name) ")");
            }
            _ => {}
        }

        if f.serializer.is_mysql() {
            for column in columns {
                if let Some(fk) = &column.references {
                    fmt!(f, ",\n    FOREIGN KEY (" Ident(&column.name) ") " fk);
                }
            }
        }

        fmt!(f, "\n");
    }
}

impl ToSql for &stmt::CreateTable {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let columns = ColumnsWithConstraints(self);

        fmt!(f, "CREATE TABLE " Ident(&self.name) " (" columns ")");
    }
}

impl ToSql for &stmt::AddColumn {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let table_name = Ident(&self.table);
        let column = &self.column;

        fmt!(f, "ALTER TABLE " table_name " ADD COLUMN " column);

        if f.serializer.is_mysql() {
            if let Some(fk) = &self.column.references {
                fmt!(f, ", ADD FOREIGN KEY (" Ident(&self.column.name) ") " fk);
            }
        }
    }
}

impl ToSql for &stmt::Insert {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let table_name = Ident(&self.table);

        fmt!(f, "INSERT INTO " table_name);

        if self.row.is_empty() {
            match f.serializer.flavor {
                Flavor::Mysql => fmt!(f, " () VALUES ()"),
                _ => fmt!(f, " DEFAULT VALUES"),
            }
        } else {
            let columns = Comma(self.row.keys().map(Ident));
            let values = Comma(self.row.iter().map(|(_, value)| value));
            fmt!(f, " (" columns ") VALUES (" values ")");
        }

        returning(self.returning, f);
    }
}

impl ToSql for &stmt::Select {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        fmt!(f, "SELECT ");

        match &self.projection {
            Projection::All => fmt!(f, "*"),
            Projection::Columns(columns) => fmt!(f, Comma(columns.iter().map(Ident))),
            Projection::Count => fmt!(f, "COUNT(*) AS " Ident("count")),
        }

        fmt!(f, " FROM " Ident(&self.table));
        filter(&self.filter, f);

        if let Some(order_by) = &self.order_by {
            let direction = match order_by.direction {
                Direction::Asc => " ASC",
                Direction::Desc => " DESC",
            };
            fmt!(f, " ORDER BY " Ident(&order_by.field) direction);
        }

        match (self.limit, self.offset) {
            (Some(limit), Some(offset)) => fmt!(f, " LIMIT " limit " OFFSET " offset),
            (Some(limit), None) => fmt!(f, " LIMIT " limit),
            (None, Some(offset)) => {
                // OFFSET requires LIMIT on SQLite and MySQL
                let unbounded = match f.serializer.flavor {
                    Flavor::Sqlite => " LIMIT -1",
                    Flavor::Mysql => " LIMIT 18446744073709551615",
                    Flavor::Postgresql => "",
                };
                fmt!(f, unbounded " OFFSET " offset);
            }
            (None, None) => {}
        }
    }
}

impl ToSql for &stmt::Update {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let assignments = Comma(self.values.iter().map(|(column, value)| Assignment(column, value)));

        fmt!(f, "UPDATE " Ident(&self.table) " SET " assignments);
        single_row_filter(&self.table, &self.filter, self.single.as_deref(), f);
        returning(self.returning, f);
    }
}

impl ToSql for &stmt::Delete {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        fmt!(f, "DELETE FROM " Ident(&self.table));
        single_row_filter(&self.table, &self.filter, self.single.as_deref(), f);
    }
}

struct Assignment<'a>(&'a str, &'a Value);

impl ToSql for Assignment<'_> {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        fmt!(f, Ident(self.0) " = " self.1);
    }
}

fn filter<P: Params>(condition: &Condition, f: &mut super::Formatter<'_, P>) {
    if !condition.is_empty() {
        fmt!(f, " WHERE " condition);
    }
}

/// Restricts an update or delete to the first matching row.
///
/// MySQL supports `LIMIT` on writes but cannot select from the table being
/// written in a subquery; the other flavors are the reverse.
fn single_row_filter<P: Params>(
    table: &str,
    condition: &Condition,
    key: Option<&str>,
    f: &mut super::Formatter<'_, P>,
) {
    let Some(key) = key else {
        filter(condition, f);
        return;
    };

    if f.serializer.is_mysql() {
        filter(condition, f);
        fmt!(f, " LIMIT 1");
        return;
    }

    fmt!(f, " WHERE " Ident(key) " IN (SELECT " Ident(key) " FROM " Ident(table));
    filter(condition, f);
    fmt!(f, " LIMIT 1)");
}

fn returning<P: Params>(returning: bool, f: &mut super::Formatter<'_, P>) {
    if returning && !f.serializer.is_mysql() {
        fmt!(f, " RETURNING *");
    }
}
