use super::{Flavor, Ident, Params, ToSql};

use vellum_core::schema::db::{ColumnDef, ForeignKey, Type};

impl ToSql for &ColumnDef {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let name = Ident(&self.name);

        if self.auto_increment {
            match f.serializer.flavor {
                // SQLite only auto-increments an inline `INTEGER PRIMARY KEY`
                Flavor::Sqlite => fmt!(f, name " INTEGER PRIMARY KEY AUTOINCREMENT"),
                Flavor::Postgresql => {
                    let serial = match self.ty {
                        Type::Integer(n) if n > 4 => " BIGSERIAL",
                        _ => " SERIAL",
                    };
                    fmt!(f, name serial " NOT NULL")
                }
                Flavor::Mysql => fmt!(f, name " " self.ty " NOT NULL AUTO_INCREMENT"),
            }
            return;
        }

        fmt!(f, name " " self.ty);

        if !self.nullable {
            fmt!(f, " NOT NULL");
        }

        if self.unique {
            fmt!(f, " UNIQUE");
        }

        // MySQL parses inline references but ignores them; its foreign keys
        // are emitted as table constraints.
        if let Some(fk) = &self.references {
            if !f.serializer.is_mysql() {
                fmt!(f, " " fk);
            }
        }
    }
}

impl ToSql for &ForeignKey {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        fmt!(
            f, "REFERENCES " Ident(&self.table) " (" Ident(&self.column) ") ON DELETE " self.on_delete.as_sql()
        );
    }
}
