mod field;
pub use field::{DefaultValue, Field, FieldTransform, OnDelete, Reference, TransformFn};

mod model;
pub use model::Model;

mod ty;
pub use ty::FieldType;
