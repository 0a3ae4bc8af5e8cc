//! Models shared by the integration scenarios.

use vellum::{db::Builder, Db, Field, FieldType, Model};

pub fn user() -> Model {
    Model::new("user")
        .field(Field::string("name").required().sortable())
        .field(Field::string("email").column_name("email_address").unique())
        .field(Field::boolean("email_verified").default_value(false))
        .field(Field::date("created_at").default_now())
        .field(Field::new("tags", FieldType::StringArray))
        .field(Field::number("age"))
}

pub fn session() -> Model {
    Model::new("session")
        .field(
            Field::string("user_id")
                .required()
                .references("user", "id"),
        )
        .field(Field::string("token").required().unique())
        .field(Field::date("expires_at"))
}

pub fn account() -> Model {
    Model::new("account")
        .field(Field::string("user_id").references("user", "id"))
        .field(Field::string("provider").required())
        .field(Field::string("password").hidden())
}

pub fn models() -> Vec<Model> {
    vec![user(), session(), account()]
}

/// A builder over [`models`].
pub fn builder() -> Builder {
    let mut builder = Db::builder();
    builder.models(models());
    builder
}
