use super::{Params, ToSql};

use vellum_core::schema::db;

impl ToSql for db::Type {
    fn to_sql<T: Params>(self, f: &mut super::Formatter<'_, T>) {
        let name = self.name(f.serializer.dialect());
        fmt!(f, name);
    }
}
