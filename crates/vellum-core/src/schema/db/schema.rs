use super::Table;

/// Physical tables present in a store, as reported by introspection.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Schema {
    pub tables: Vec<Table>,
}

impl Schema {
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|table| table.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
