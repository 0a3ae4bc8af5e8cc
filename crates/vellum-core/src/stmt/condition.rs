use super::{Op, Record, Value};

use std::cmp::Ordering;

/// A normalized where clause, addressed by physical column name.
///
/// Filters connected with `AND` land in `and`; filters connected with `OR`
/// land in `or`. An empty bucket places no constraint. When both buckets are
/// populated the condition is `(and1 AND and2 ...) AND (or1 OR or2 ...)`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Condition {
    pub and: Vec<Expr>,
    pub or: Vec<Expr>,
}

/// A single comparison against a physical column.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub column: String,
    pub op: Op,
    pub value: Value,
}

impl Condition {
    /// A condition matching every row.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.and.is_empty() && self.or.is_empty()
    }

    /// Matches rows whose `column` equals `value`.
    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            and: vec![Expr::new(column, Op::Eq, value)],
            or: vec![],
        }
    }

    /// Evaluates the condition against a physical row.
    pub fn eval(&self, row: &Record) -> bool {
        let and = self.and.iter().all(|expr| expr.eval(row));
        let or = self.or.is_empty() || self.or.iter().any(|expr| expr.eval(row));
        and && or
    }
}

impl Expr {
    pub fn new(column: impl Into<String>, op: Op, value: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            op,
            value: value.into(),
        }
    }

    /// Evaluates the comparison against a physical row. A missing column is
    /// treated as null.
    pub fn eval(&self, row: &Record) -> bool {
        let actual = row.get(&self.column).unwrap_or(&Value::Null);

        match self.op {
            Op::Eq => values_eq(actual, &self.value),
            Op::Ne => !values_eq(actual, &self.value),
            Op::Gt => actual.compare(&self.value) == Some(Ordering::Greater),
            Op::Gte => matches!(
                actual.compare(&self.value),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            Op::Lt => actual.compare(&self.value) == Some(Ordering::Less),
            Op::Lte => matches!(
                actual.compare(&self.value),
                Some(Ordering::Less | Ordering::Equal)
            ),
            Op::In => match &self.value {
                Value::List(items) => items.iter().any(|item| values_eq(actual, item)),
                other => values_eq(actual, other),
            },
            Op::Contains | Op::StartsWith | Op::EndsWith => {
                let (Some(actual), Some(pattern)) = (actual.as_str(), self.value.as_str()) else {
                    return false;
                };

                match self.op {
                    Op::Contains => actual.contains(pattern),
                    Op::StartsWith => actual.starts_with(pattern),
                    _ => actual.ends_with(pattern),
                }
            }
        }
    }
}

fn values_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::List(a), Value::List(b)) => a == b,
        _ => a.compare(b) == Some(Ordering::Equal),
    }
}
