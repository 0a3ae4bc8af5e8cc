use vellum_core::{
    driver::Capability,
    schema::app::{Field, FieldType},
    stmt::Value,
    Error, Result,
};

/// Converts values between their logical form and the form a backend stores.
///
/// Which conversions apply depends only on the backend's [`Capability`] and
/// the field's declared type.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Coercion<'a> {
    capability: &'a Capability,

    /// Identifiers are backend-generated integers.
    numeric_ids: bool,
}

impl<'a> Coercion<'a> {
    pub(crate) fn new(capability: &'a Capability, numeric_ids: bool) -> Self {
        Self {
            capability,
            numeric_ids,
        }
    }

    /// Logical value to the value handed to the driver.
    pub(crate) fn to_physical(&self, field: &Field, value: Value) -> Result<Value> {
        if value.is_null() {
            return Ok(value);
        }

        if field.is_id_like() && self.numeric_ids {
            return numeric_id(value);
        }

        match field.ty {
            FieldType::Boolean if !self.capability.booleans => Ok(match value {
                Value::Bool(true) => Value::I64(1),
                Value::Bool(false) => Value::I64(0),
                other => other,
            }),
            FieldType::Date => {
                let value = match value {
                    Value::String(text) => Value::Timestamp(parse_timestamp(&text)?),
                    other => other,
                };

                match value {
                    Value::Timestamp(ts) if !self.capability.dates => {
                        Ok(Value::String(iso8601(ts)))
                    }
                    other => Ok(other),
                }
            }
            FieldType::StringArray | FieldType::NumberArray if !self.capability.json => {
                match value {
                    list @ Value::List(_) => Ok(Value::String(serde_json::to_string(
                        &list.to_json(),
                    )?)),
                    other => Ok(other),
                }
            }
            _ => Ok(value),
        }
    }

    /// Value read from the driver to its logical form.
    pub(crate) fn to_logical(&self, field: &Field, value: Value) -> Result<Value> {
        if value.is_null() {
            return Ok(value);
        }

        if field.is_id_like() {
            return Ok(string_id(value));
        }

        match field.ty {
            FieldType::Boolean => Ok(match value {
                Value::I64(n) => Value::Bool(n != 0),
                Value::String(text) if text == "true" || text == "1" => Value::Bool(true),
                Value::String(text) if text == "false" || text == "0" => Value::Bool(false),
                other => other,
            }),
            FieldType::Date => match value {
                Value::String(text) => Ok(Value::Timestamp(parse_timestamp(&text)?)),
                other => Ok(other),
            },
            FieldType::StringArray | FieldType::NumberArray => match value {
                Value::String(text) => {
                    let json: serde_json::Value = serde_json::from_str(&text)?;
                    Ok(Value::from_json(json))
                }
                other => Ok(other),
            },
            FieldType::Number => match value {
                Value::String(_) => Ok(Value::I64(value.to_i64()?)),
                other => Ok(other),
            },
            FieldType::String => Ok(value),
        }
    }
}

fn numeric_id(value: Value) -> Result<Value> {
    match value {
        Value::List(items) => Ok(Value::List(
            items.into_iter().map(numeric_id).collect::<Result<_>>()?,
        )),
        Value::Null => Ok(Value::Null),
        other => Ok(Value::I64(other.to_i64()?)),
    }
}

fn string_id(value: Value) -> Value {
    match value {
        Value::I64(n) => Value::String(n.to_string()),
        Value::F64(n) => Value::String(n.to_string()),
        Value::List(items) => Value::List(items.into_iter().map(string_id).collect()),
        other => other,
    }
}

/// Fixed millisecond precision, so stored dates sort as text.
fn iso8601(ts: jiff::Timestamp) -> String {
    ts.strftime("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// Accepts RFC 3339 instants, and civil date-times (taken as UTC) as written
/// by other tools.
fn parse_timestamp(text: &str) -> Result<jiff::Timestamp> {
    if let Ok(ts) = text.parse::<jiff::Timestamp>() {
        return Ok(ts);
    }

    let civil = text
        .parse::<jiff::civil::DateTime>()
        .map_err(|_| Error::type_conversion(Value::String(text.to_string()), "date"))?;

    Ok(civil.to_zoned(jiff::tz::TimeZone::UTC)?.timestamp())
}
