use crate::Coercion;

use vellum_core::{
    driver::Capability,
    schema::{app::Model, Schema},
    stmt::{Condition, Connector, Expr, Filter, Op, Value},
    Error, Result,
};

/// Turns caller filters into a physical [`Condition`].
///
/// Field names are resolved to columns and values coerced the way they are
/// stored. Filters are routed to the `or` bucket when their connector is
/// `OR`, and to the `and` bucket otherwise.
pub(crate) fn normalize(
    schema: &Schema,
    model: &Model,
    filters: &[Filter],
    capability: &Capability,
    coercion: Coercion<'_>,
) -> Result<Condition> {
    let mut condition = Condition::default();

    for filter in filters {
        let field = schema.resolve_field(&model.name, &filter.field)?;

        if filter.op.is_pattern() && !capability.pattern_matching {
            return Err(Error::unsupported_feature(format!(
                "`{}` filters on {}.{}",
                filter.op.as_str(),
                model.name,
                field.name
            )));
        }

        let value = match (filter.op, filter.value.clone()) {
            // Patterns match text as written
            (op, value @ Value::String(_)) if op.is_pattern() => value,
            (op, value) if op.is_pattern() => {
                return Err(Error::type_conversion(value, "string"));
            }
            (Op::In, Value::List(items)) => Value::List(
                items
                    .into_iter()
                    .map(|item| coercion.to_physical(field, item))
                    .collect::<Result<_>>()?,
            ),
            (_, value) => coercion.to_physical(field, value)?,
        };

        let expr = Expr::new(field.column(), filter.op, value);

        match filter.connector {
            Connector::And => condition.and.push(expr),
            Connector::Or => condition.or.push(expr),
        }
    }

    Ok(condition)
}
