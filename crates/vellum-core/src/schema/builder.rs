use super::{
    app::{Field, Model},
    name, Schema,
};
use crate::{Error, Result};

use indexmap::IndexMap;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct Builder {
    models: Vec<Model>,

    use_plural: bool,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pluralize default table names and accept plural model names.
    pub fn use_plural(&mut self, use_plural: bool) -> &mut Self {
        self.use_plural = use_plural;
        self
    }

    pub fn model(&mut self, model: Model) -> &mut Self {
        self.models.push(model);
        self
    }

    pub fn models(&mut self, models: impl IntoIterator<Item = Model>) -> &mut Self {
        self.models.extend(models);
        self
    }

    pub fn build(&mut self) -> Result<Schema> {
        let mut models = IndexMap::with_capacity(self.models.len());

        for (index, mut model) in std::mem::take(&mut self.models).into_iter().enumerate() {
            if models.contains_key(&model.name) {
                return Err(Error::invalid_schema(format!(
                    "model `{}` is declared twice",
                    model.name
                )));
            }

            model.index = index;
            model.table = match &model.table_name {
                Some(table) => table.clone(),
                None if self.use_plural => name::plural(&model.name),
                None => model.name.clone(),
            };
            place_id_first(&mut model)?;

            models.insert(model.name.clone(), model);
        }

        let tables = models
            .values()
            .map(|model| (model.table.clone(), model.name.clone()))
            .collect::<HashMap<_, _>>();

        let schema = Schema {
            models,
            tables,
            use_plural: self.use_plural,
        };

        schema.verify()?;
        Ok(schema)
    }
}

/// Every model has exactly one identifier, named `id`, stored first.
fn place_id_first(model: &mut Model) -> Result<()> {
    if let Some(field) = model
        .fields
        .iter()
        .find(|field| field.primary_key && field.name != "id")
    {
        return Err(Error::invalid_schema(format!(
            "identifier of model `{}` must be named `id`, found `{}`",
            model.name, field.name
        )));
    }

    let id = match model.fields.iter().position(|field| field.name == "id") {
        Some(position) => {
            let declared = model.fields.remove(position);
            Field {
                required: true,
                unique: true,
                primary_key: true,
                input: false,
                references: None,
                ..declared
            }
        }
        None => Field::id(),
    };

    model.fields.insert(0, id);
    Ok(())
}
