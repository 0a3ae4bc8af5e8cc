pub mod app;
use app::{Field, Model};

mod builder;
pub use builder::Builder;

pub mod db;

mod name;

mod verify;

use crate::{Error, Result};

use indexmap::IndexMap;
use std::collections::HashMap;

/// The logical schema: every model the adapter knows about.
///
/// Built once and immutable afterwards. All lookups are map indexing; a name
/// that does not resolve is a configuration error carrying the offending
/// name.
#[derive(Debug)]
pub struct Schema {
    /// Models keyed by canonical name, in declaration order
    models: IndexMap<String, Model>,

    /// Physical table name to canonical model key
    tables: HashMap<String, String>,

    /// Table names are pluralized and plural model names are accepted.
    use_plural: bool,
}

impl Schema {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn models(&self) -> impl ExactSizeIterator<Item = &Model> + '_ {
        self.models.values()
    }

    pub fn use_plural(&self) -> bool {
        self.use_plural
    }

    /// Returns the model with the given canonical key.
    pub fn model(&self, key: &str) -> Result<&Model> {
        self.models
            .get(key)
            .ok_or_else(|| Error::invalid_schema(format!("model `{key}` not found")))
    }

    /// Resolves a model addressed by canonical key or physical table name.
    ///
    /// In plural mode a name ending in `s` is first tried as its singular.
    pub fn resolve_model(&self, name: &str) -> Result<&Model> {
        if self.use_plural && name.ends_with('s') {
            for singular in name::singular_candidates(name) {
                if let Some(model) = self.models.get(&singular) {
                    return Ok(model);
                }
            }
        }

        if let Some(model) = self.models.get(name) {
            return Ok(model);
        }

        if let Some(key) = self.tables.get(name) {
            return self.model(key);
        }

        Err(Error::invalid_schema(format!("model `{name}` not found")))
    }

    /// Resolves a field of `model` addressed by logical name or column name.
    pub fn resolve_field(&self, model: &str, name: &str) -> Result<&Field> {
        let model = self.resolve_model(model)?;
        model
            .field_named(name)
            .or_else(|| model.field_by_column(name))
            .ok_or_else(|| {
                Error::invalid_schema(format!(
                    "field `{name}` not found on model `{}`",
                    model.name
                ))
            })
    }

    pub fn physical_model_name(&self, model: &str) -> Result<&str> {
        Ok(self.resolve_model(model)?.table())
    }

    pub fn physical_field_name(&self, model: &str, field: &str) -> Result<&str> {
        Ok(self.resolve_field(model, field)?.column())
    }

    /// Models sorted by migration order, ties broken by declaration order.
    pub fn ordered_models(&self) -> Vec<&Model> {
        let mut models: Vec<_> = self.models.values().collect();
        // Stable, so equal orders keep declaration order
        models.sort_by_key(|model| model.effective_order());
        models
    }
}
