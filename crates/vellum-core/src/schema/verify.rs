use super::{app::Model, Schema};
use crate::{Error, Result};

use std::collections::HashSet;

struct Verify<'a> {
    schema: &'a Schema,
}

impl Schema {
    pub(super) fn verify(&self) -> Result<()> {
        Verify { schema: self }.verify()
    }
}

impl Verify<'_> {
    fn verify(&self) -> Result<()> {
        self.verify_table_names_are_unique()?;

        for model in self.schema.models() {
            self.verify_field_names_are_unique(model)?;
            self.verify_references_exist(model)?;
        }

        Ok(())
    }

    fn verify_table_names_are_unique(&self) -> Result<()> {
        let mut names = HashSet::new();

        for model in self.schema.models() {
            if !names.insert(model.table()) {
                return Err(Error::invalid_schema(format!(
                    "table `{}` of model `{}` is used by another model",
                    model.table(),
                    model.name
                )));
            }
        }

        Ok(())
    }

    fn verify_field_names_are_unique(&self, model: &Model) -> Result<()> {
        let mut names = HashSet::new();
        let mut columns = HashSet::new();

        for field in &model.fields {
            if !names.insert(field.name.as_str()) {
                return Err(Error::invalid_schema(format!(
                    "field `{}` is declared twice on model `{}`",
                    field.name, model.name
                )));
            }

            if !columns.insert(field.column()) {
                return Err(Error::invalid_schema(format!(
                    "column `{}` of field `{}.{}` is used by another field",
                    field.column(),
                    model.name,
                    field.name
                )));
            }
        }

        Ok(())
    }

    fn verify_references_exist(&self, model: &Model) -> Result<()> {
        for field in &model.fields {
            let Some(reference) = &field.references else {
                continue;
            };

            let target = self.schema.resolve_model(&reference.model).map_err(|_| {
                Error::invalid_schema(format!(
                    "field `{}.{}` references unknown model `{}`",
                    model.name, field.name, reference.model
                ))
            })?;

            if target.field_named(&reference.field).is_none() {
                return Err(Error::invalid_schema(format!(
                    "field `{}.{}` references unknown field `{}.{}`",
                    model.name, field.name, target.name, reference.field
                )));
            }
        }

        Ok(())
    }
}
