use super::{Comma, Params, ToSql};

use vellum_core::stmt::Value;

impl ToSql for &Value {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        match self {
            // Lists only appear on the right side of `IN`
            Value::List(values) => fmt!(f, "(" Comma(values) ")"),
            value => {
                let placeholder = f.params.push(value);
                fmt!(f, placeholder)
            }
        }
    }
}
