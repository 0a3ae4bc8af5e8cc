use super::{Delimited, Ident, Params, ToSql};

use vellum_core::stmt::{Condition, Expr, Op, Value};

/// Renders a non-empty condition. Callers check `is_empty` first.
impl ToSql for &Condition {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        fmt!(f, Delimited(&self.and, " AND "));

        if self.or.is_empty() {
            return;
        }

        if !self.and.is_empty() {
            fmt!(f, " AND ");
        }

        fmt!(f, "(" Delimited(&self.or, " OR ") ")");
    }
}

impl ToSql for &Expr {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let column = Ident(&self.column);

        match (self.op, &self.value) {
            (Op::Eq, Value::Null) => fmt!(f, column " IS NULL"),
            (Op::Ne, Value::Null) => fmt!(f, column " IS NOT NULL"),
            // A null column is "not equal" to any value
            (Op::Ne, value) => {
                fmt!(f, "(" Ident(&self.column) " <> " value " OR " column " IS NULL)")
            }
            (Op::In, Value::List(values)) if values.is_empty() => fmt!(f, "1 = 0"),
            (Op::In, value @ Value::List(_)) => fmt!(f, column " IN " value),
            (Op::In, value) => fmt!(f, column " = " value),
            (Op::Contains | Op::StartsWith | Op::EndsWith, Value::String(raw)) => {
                let escaped = escape_like(raw);
                let pattern = &Value::String(match self.op {
                    Op::Contains => format!("%{escaped}%"),
                    Op::StartsWith => format!("{escaped}%"),
                    _ => format!("%{escaped}"),
                });

                // Backslash is MySQL's default escape and cannot be written
                // as a one-character literal there
                let escape = if f.serializer.is_mysql() {
                    ""
                } else {
                    " ESCAPE '\\'"
                };
                fmt!(f, column " LIKE " pattern escape);
            }
            // Only text matches a pattern
            (Op::Contains | Op::StartsWith | Op::EndsWith, _) => fmt!(f, "1 = 0"),
            (op, value) => {
                let op = match op {
                    Op::Eq => " = ",
                    Op::Gt => " > ",
                    Op::Gte => " >= ",
                    Op::Lt => " < ",
                    _ => " <= ",
                };
                fmt!(f, column op value);
            }
        }
    }
}

/// Escapes `LIKE` wildcards so the caller's text matches literally.
fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
