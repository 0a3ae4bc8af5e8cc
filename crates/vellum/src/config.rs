//! File-based configuration.
//!
//! ```toml
//! [adapter]
//! use_plural = true
//! debug_logs = ["create"]
//!
//! [models.user]
//! order = 1
//!
//! [models.user.fields.email]
//! type = "string"
//! required = true
//! unique = true
//! ```

use crate::{db::Builder, DebugLogs, IdStrategy};

use indexmap::IndexMap;
use serde::Deserialize;
use vellum_core::{
    schema::app::{DefaultValue, Field, FieldType, Model, Reference},
    stmt::Value,
    Result, Schema,
};

use std::path::Path;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub adapter: AdapterConfig,

    /// Models keyed by canonical name, in declaration order
    #[serde(default)]
    pub models: IndexMap<String, ModelConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AdapterConfig {
    pub use_plural: bool,
    pub use_number_id: bool,
    pub default_find_many_limit: usize,
    pub debug_logs: DebugLogs,
    pub disable_id_generation: bool,
    pub id_strategy: IdStrategy,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelConfig {
    /// Physical table name
    pub table: Option<String>,
    pub order: Option<i64>,
    pub fields: IndexMap<String, FieldConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldConfig {
    #[serde(rename = "type")]
    pub ty: FieldType,

    #[serde(default)]
    pub required: bool,

    #[serde(default)]
    pub unique: bool,

    #[serde(default)]
    pub sortable: bool,

    #[serde(default)]
    pub bigint: bool,

    /// Physical column name
    pub column: Option<String>,

    pub references: Option<Reference>,

    /// Constant default. The string `"now"` on a date field means the
    /// time of creation.
    pub default: Option<serde_json::Value>,

    #[serde(default = "default_true")]
    pub input: bool,

    #[serde(default = "default_true")]
    pub returned: bool,
}

fn default_true() -> bool {
    true
}

impl Config {
    pub fn from_toml(src: &str) -> Result<Config> {
        Ok(toml::from_str(src).map_err(anyhow::Error::from)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        let src = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
        Self::from_toml(&src)
    }

    /// Builds the logical schema described by `[models]`.
    pub fn schema(&self) -> Result<Schema> {
        Schema::builder()
            .use_plural(self.adapter.use_plural)
            .models(self.models.iter().map(|(name, model)| model.to_model(name)))
            .build()
    }

    /// Applies the adapter options and schema to a [`Builder`].
    pub fn apply(&self, builder: &mut Builder) -> Result<()> {
        builder
            .adapter_config(&self.adapter)
            .schema(self.schema()?);
        Ok(())
    }
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            use_plural: false,
            use_number_id: false,
            default_find_many_limit: 100,
            debug_logs: DebugLogs::None,
            disable_id_generation: false,
            id_strategy: IdStrategy::Random,
        }
    }
}

impl ModelConfig {
    fn to_model(&self, name: &str) -> Model {
        let mut model = Model::new(name);
        model.table_name = self.table.clone();
        model.order = self.order;
        model.fields = self
            .fields
            .iter()
            .map(|(name, field)| field.to_field(name))
            .collect();
        model
    }
}

impl FieldConfig {
    fn to_field(&self, name: &str) -> Field {
        let mut field = Field::new(name, self.ty);
        field.column_name = self.column.clone();
        field.required = self.required;
        field.unique = self.unique;
        field.sortable = self.sortable;
        field.bigint = self.bigint;
        field.references = self.references.clone();
        field.input = self.input;
        field.returned = self.returned;
        field.default = self.default.clone().map(|value| match value {
            serde_json::Value::String(s) if s == "now" && self.ty == FieldType::Date => {
                DefaultValue::Now
            }
            value => DefaultValue::Value(Value::from_json(value)),
        });
        field
    }
}
