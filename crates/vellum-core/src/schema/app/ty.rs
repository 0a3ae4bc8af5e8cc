use serde::Deserialize;

use std::fmt;

/// Logical type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum FieldType {
    #[serde(rename = "string")]
    String,

    #[serde(rename = "number")]
    Number,

    #[serde(rename = "boolean")]
    Boolean,

    #[serde(rename = "date")]
    Date,

    #[serde(rename = "string[]")]
    StringArray,

    #[serde(rename = "number[]")]
    NumberArray,
}

impl FieldType {
    /// Arrays are stored as JSON.
    pub fn is_array(self) -> bool {
        matches!(self, FieldType::StringArray | FieldType::NumberArray)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
            FieldType::Date => "date",
            FieldType::StringArray => "string[]",
            FieldType::NumberArray => "number[]",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
