use super::FieldType;
use crate::stmt::Value;

use serde::Deserialize;

use std::{fmt, sync::Arc};

/// A value transform applied to a single field.
pub type TransformFn = Arc<dyn Fn(Value) -> Value + Send + Sync>;

/// A logical field of a model.
#[derive(Debug, Clone)]
pub struct Field {
    /// Logical name, the key callers address the field by
    pub name: String,

    /// Physical column name, when it differs from the logical name
    pub column_name: Option<String>,

    pub ty: FieldType,

    /// Whether the field must hold a value. Required columns are `NOT NULL`.
    pub required: bool,

    pub unique: bool,

    /// The field is used for ordering, which needs an indexable column type
    /// on some backends.
    pub sortable: bool,

    /// Numbers are stored as 8-byte integers.
    pub bigint: bool,

    /// Foreign key to another model's field
    pub references: Option<Reference>,

    /// Value applied on create when the caller supplies none
    pub default: Option<DefaultValue>,

    pub transform: FieldTransform,

    /// Callers may supply a value for the field.
    pub input: bool,

    /// The field is included in records returned to callers.
    pub returned: bool,

    /// The field is the model's identifier.
    pub primary_key: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Reference {
    /// Target model key
    pub model: String,

    /// Target field name
    pub field: String,

    #[serde(default)]
    pub on_delete: OnDelete,
}

/// Action taken on referencing rows when the referenced row is deleted.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnDelete {
    #[default]
    Cascade,
    Restrict,
    SetNull,
    NoAction,
}

#[derive(Clone)]
pub enum DefaultValue {
    /// A constant
    Value(Value),

    /// Computed each time a record is created
    Generate(Arc<dyn Fn() -> Value + Send + Sync>),

    /// The current time
    Now,
}

/// Per-field transforms applied before coercion on write and after reading
/// on output.
#[derive(Clone, Default)]
pub struct FieldTransform {
    pub input: Option<TransformFn>,
    pub output: Option<TransformFn>,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: FieldType) -> Self {
        Self {
            name: name.into(),
            column_name: None,
            ty,
            required: false,
            unique: false,
            sortable: false,
            bigint: false,
            references: None,
            default: None,
            transform: FieldTransform::default(),
            input: true,
            returned: true,
            primary_key: false,
        }
    }

    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::String)
    }

    pub fn number(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Number)
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Boolean)
    }

    pub fn date(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Date)
    }

    /// The identifier field every model carries.
    pub fn id() -> Self {
        Self {
            required: true,
            unique: true,
            primary_key: true,
            input: false,
            ..Self::string("id")
        }
    }

    /// Physical column name.
    pub fn column(&self) -> &str {
        self.column_name.as_deref().unwrap_or(&self.name)
    }

    /// True for the identifier field and for foreign keys that target an
    /// identifier. These are always exposed to callers as strings.
    pub fn is_id_like(&self) -> bool {
        self.primary_key
            || self
                .references
                .as_ref()
                .is_some_and(|reference| reference.field == "id")
    }

    pub fn column_name(mut self, column: impl Into<String>) -> Self {
        self.column_name = Some(column.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn bigint(mut self) -> Self {
        self.bigint = true;
        self
    }

    pub fn references(mut self, model: impl Into<String>, field: impl Into<String>) -> Self {
        self.references = Some(Reference {
            model: model.into(),
            field: field.into(),
            on_delete: OnDelete::default(),
        });
        self
    }

    pub fn on_delete(mut self, on_delete: OnDelete) -> Self {
        if let Some(reference) = &mut self.references {
            reference.on_delete = on_delete;
        }
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(DefaultValue::Value(value.into()));
        self
    }

    pub fn default_with(mut self, f: impl Fn() -> Value + Send + Sync + 'static) -> Self {
        self.default = Some(DefaultValue::Generate(Arc::new(f)));
        self
    }

    pub fn default_now(mut self) -> Self {
        self.default = Some(DefaultValue::Now);
        self
    }

    pub fn transform_input(mut self, f: impl Fn(Value) -> Value + Send + Sync + 'static) -> Self {
        self.transform.input = Some(Arc::new(f));
        self
    }

    pub fn transform_output(mut self, f: impl Fn(Value) -> Value + Send + Sync + 'static) -> Self {
        self.transform.output = Some(Arc::new(f));
        self
    }

    /// Callers cannot supply the field; only defaults populate it.
    pub fn no_input(mut self) -> Self {
        self.input = false;
        self
    }

    /// The field is stored but never returned to callers.
    pub fn hidden(mut self) -> Self {
        self.returned = false;
        self
    }
}

impl DefaultValue {
    /// Produces the value to store.
    pub fn resolve(&self) -> Value {
        match self {
            DefaultValue::Value(value) => value.clone(),
            DefaultValue::Generate(f) => f(),
            DefaultValue::Now => Value::Timestamp(jiff::Timestamp::now()),
        }
    }
}

impl OnDelete {
    pub fn as_sql(self) -> &'static str {
        match self {
            OnDelete::Cascade => "CASCADE",
            OnDelete::Restrict => "RESTRICT",
            OnDelete::SetNull => "SET NULL",
            OnDelete::NoAction => "NO ACTION",
        }
    }
}

impl fmt::Debug for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultValue::Value(value) => f.debug_tuple("Value").field(value).finish(),
            DefaultValue::Generate(_) => f.write_str("Generate(..)"),
            DefaultValue::Now => f.write_str("Now"),
        }
    }
}

impl fmt::Debug for FieldTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldTransform")
            .field("input", &self.input.is_some())
            .field("output", &self.output.is_some())
            .finish()
    }
}
