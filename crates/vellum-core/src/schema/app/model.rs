use super::Field;

/// A logical model: a named set of fields stored in one table.
#[derive(Debug, Clone)]
pub struct Model {
    /// Canonical key of the model
    pub name: String,

    /// Configured physical table name
    pub table_name: Option<String>,

    /// Fields in declaration order. Once the schema is built, the identifier
    /// field comes first.
    pub fields: Vec<Field>,

    /// Migration emission order. Defaults to the declaration position.
    pub order: Option<i64>,

    /// Resolved physical table name, set when the schema is built
    pub(crate) table: String,

    /// Declaration position, set when the schema is built
    pub(crate) index: usize,
}

impl Model {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table_name: None,
            fields: vec![],
            order: None,
            table: String::new(),
            index: 0,
        }
    }

    pub fn table_name(mut self, table: impl Into<String>) -> Self {
        self.table_name = Some(table.into());
        self
    }

    pub fn order(mut self, order: i64) -> Self {
        self.order = Some(order);
        self
    }

    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Physical table name.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// The identifier field.
    pub fn id(&self) -> &Field {
        &self.fields[0]
    }

    /// Finds a field by logical name.
    pub fn field_named(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Finds a field by physical column name.
    pub fn field_by_column(&self, column: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.column() == column)
    }

    /// Effective migration order.
    pub fn effective_order(&self) -> i64 {
        self.order.unwrap_or(self.index as i64)
    }
}
