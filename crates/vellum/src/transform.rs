use crate::{Coercion, IdGenerator};

use vellum_core::{
    driver::Capability,
    schema::app::{Field, Model},
    stmt::{Record, Value},
    Result,
};

/// Write being prepared by the input pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Update,
}

/// Where a value passed to a [`ValueTransform`] comes from.
#[derive(Debug, Clone, Copy)]
pub struct TransformContext<'a> {
    pub model: &'a Model,
    pub field: &'a Field,

    /// The write being prepared, or `None` when transforming output.
    pub action: Option<Action>,

    pub capability: &'a Capability,
}

/// Backend-specific conversion applied after the built-in coercions.
///
/// Both methods see the coerced value and may replace it entirely.
pub trait ValueTransform: Send + Sync + 'static {
    fn input(&self, cx: &TransformContext<'_>, value: Value) -> Result<Value> {
        let _ = cx;
        Ok(value)
    }

    fn output(&self, cx: &TransformContext<'_>, value: Value) -> Result<Value> {
        let _ = cx;
        Ok(value)
    }
}

/// Who assigns identifiers on create.
#[derive(Clone, Copy)]
pub(crate) enum Ids<'a> {
    /// The adapter generates one. Caller-supplied values are dropped.
    Generate(&'a dyn IdGenerator),

    /// The backend auto-increments. Caller-supplied values are dropped.
    Backend,

    /// Generation is disabled. A caller-supplied value is stored as given.
    Caller,
}

/// Maps records between logical and physical shape for one model.
pub(crate) struct Transform<'a> {
    pub(crate) capability: &'a Capability,
    pub(crate) coercion: Coercion<'a>,
    pub(crate) custom: Option<&'a dyn ValueTransform>,
    pub(crate) ids: Ids<'a>,
}

impl Transform<'_> {
    /// Builds the physical row for a write.
    ///
    /// Only declared fields are emitted. Defaults apply on create only.
    pub(crate) fn input(&self, model: &Model, mut data: Record, action: Action) -> Result<Record> {
        let mut row = Record::with_capacity(model.fields.len());

        let id = model.id();
        let explicit_id = data.remove(&id.name);

        match (action, self.ids, explicit_id) {
            (Action::Create, Ids::Caller, Some(value)) => {
                row.insert(id.column(), self.coercion.to_physical(id, value)?);
            }
            (Action::Create, Ids::Caller, None) => {}
            (Action::Create, ids, explicit_id) => {
                if explicit_id.is_some() {
                    tracing::warn!(
                        model = %model.name,
                        "ignoring explicit identifier on create; identifiers are assigned by the adapter"
                    );
                }

                if let Ids::Generate(generator) = ids {
                    let value = Value::String(generator.generate(&model.name));
                    row.insert(id.column(), self.coercion.to_physical(id, value)?);
                }
            }
            (Action::Update, _, Some(_)) => {
                tracing::debug!(model = %model.name, "identifier cannot be updated; ignored");
            }
            (Action::Update, _, None) => {}
        }

        for field in model.fields.iter().filter(|field| !field.primary_key) {
            let mut supplied = data.remove(&field.name);

            if supplied.is_some() && !field.input {
                tracing::debug!(
                    model = %model.name,
                    field = %field.name,
                    "field does not accept input; ignored"
                );
                supplied = None;
            }

            let explicit = supplied.is_some();

            let value = match supplied {
                Some(value) => value,
                // Updates only write what the caller supplied
                None if action == Action::Update => continue,
                None => match &field.default {
                    Some(default) => default.resolve(),
                    None if field.transform.input.is_some() => Value::Null,
                    None => continue,
                },
            };

            let value = match &field.transform.input {
                Some(f) => f(value),
                None => value,
            };

            // A transform over an absent field may decline to produce a value
            if value.is_null() && !explicit && field.default.is_none() {
                continue;
            }

            let value = self.coercion.to_physical(field, value)?;
            let value = match self.custom {
                Some(custom) => custom.input(&self.context(model, field, Some(action)), value)?,
                None => value,
            };

            row.insert(field.column(), value);
        }

        for key in data.keys() {
            tracing::debug!(model = %model.name, field = key, "unknown field; ignored");
        }

        Ok(row)
    }

    /// Builds the logical record from a physical row.
    ///
    /// `select` names the logical fields to return; the identifier is always
    /// included. Hidden fields are never returned.
    pub(crate) fn output(
        &self,
        model: &Model,
        mut row: Record,
        select: Option<&[String]>,
    ) -> Result<Record> {
        let mut record = Record::with_capacity(model.fields.len());

        for field in &model.fields {
            if !field.returned {
                continue;
            }

            if let Some(select) = select {
                if !field.primary_key && !select.iter().any(|name| *name == field.name) {
                    continue;
                }
            }

            // Stores that keep sparse rows omit never-written columns
            let value = row.remove(field.column()).unwrap_or(Value::Null);

            let value = match &field.transform.output {
                Some(f) => f(value),
                None => value,
            };
            let value = self.coercion.to_logical(field, value)?;
            let value = match self.custom {
                Some(custom) => custom.output(&self.context(model, field, None), value)?,
                None => value,
            };

            record.insert(&field.name, value);
        }

        Ok(record)
    }

    fn context<'b>(
        &'b self,
        model: &'b Model,
        field: &'b Field,
        action: Option<Action>,
    ) -> TransformContext<'b> {
        TransformContext {
            model,
            field,
            action,
            capability: self.capability,
        }
    }
}
