use tests::*;

use pretty_assertions::assert_eq;

use vellum::{
    record, Field, Filter, Model, Query, SortBy, TransformContext, Value, ValueTransform,
};

async fn booleans_round_trip(s: impl Setup) {
    let db = s.setup(fixture::builder()).await;

    let user = db
        .create("user", record! { "name" => "a", "email_verified" => true })
        .await
        .unwrap();
    assert_eq!(user.get("email_verified"), Some(&Value::Bool(true)));

    let raw = raw_row(&db, "user", "name", Value::from("a")).await;
    let expected = if s.capability().booleans {
        Value::Bool(true)
    } else {
        Value::I64(1)
    };
    assert_eq!(raw.get("email_verified"), Some(&expected));
}

async fn dates_round_trip(s: impl Setup) {
    let db = s.setup(fixture::builder()).await;

    let expires: jiff::Timestamp = "2030-01-02T03:04:05.678Z".parse().unwrap();
    db.create("user", record! { "name" => "a" }).await.unwrap();
    let user = db
        .find_one("user", &[Filter::eq("name", "a")])
        .await
        .unwrap()
        .unwrap();

    let session = db
        .create(
            "session",
            record! {
                "user_id" => user.get("id").unwrap().clone(),
                "token" => "t",
                "expires_at" => expires,
            },
        )
        .await
        .unwrap();
    assert_eq!(session.get("expires_at"), Some(&Value::Timestamp(expires)));

    let raw = raw_row(&db, "session", "token", Value::from("t")).await;
    if s.capability().dates {
        assert_eq!(raw.get("expires_at"), Some(&Value::Timestamp(expires)));
    } else {
        assert_eq!(
            raw.get("expires_at"),
            Some(&Value::from("2030-01-02T03:04:05.678Z"))
        );
    }

    // String input is parsed, and date filters compare as dates
    let later = db
        .count(
            "session",
            &[Filter::gt("expires_at", "2029-12-31T00:00:00Z")],
        )
        .await
        .unwrap();
    assert_eq!(later, 1);
}

async fn arrays_round_trip(s: impl Setup) {
    let db = s.setup(fixture::builder()).await;

    let tags = Value::from(vec!["admin", "beta"]);
    let user = db
        .create("user", record! { "name" => "a", "tags" => tags.clone() })
        .await
        .unwrap();
    assert_eq!(user.get("tags"), Some(&tags));

    let raw = raw_row(&db, "user", "name", Value::from("a")).await;
    if s.capability().json {
        assert_eq!(raw.get("tags"), Some(&tags));
    } else {
        assert_eq!(raw.get("tags"), Some(&Value::from(r#"["admin","beta"]"#)));
    }
}

async fn invalid_dates_are_rejected(s: impl Setup) {
    let db = s.setup(fixture::builder()).await;

    let err = db
        .create(
            "session",
            record! { "user_id" => "u", "token" => "t", "expires_at" => "soon" },
        )
        .await
        .unwrap_err();
    assert!(err.is_type_conversion());
    assert_eq!(db.count("session", &[]).await.unwrap(), 0);
}

async fn field_transforms_wrap_coercion(s: impl Setup) {
    let model = Model::new("tag").field(
        Field::string("label")
            .transform_input(|value| match value {
                Value::String(label) => Value::String(label.to_lowercase()),
                other => other,
            })
            .transform_output(|value| match value {
                Value::String(label) => Value::String(format!("#{label}")),
                other => other,
            }),
    );

    let mut builder = vellum::Db::builder();
    builder.model(model);
    let db = s.setup(builder).await;

    let tag = db
        .create("tag", record! { "label" => "Rust" })
        .await
        .unwrap();
    assert_eq!(tag.get_str("label"), Some("#rust"));

    let raw = raw_row(&db, "tag", "id", tag.get("id").unwrap().clone()).await;
    assert_eq!(raw.get_str("label"), Some("rust"));
}

struct Trim;

impl ValueTransform for Trim {
    fn input(&self, cx: &TransformContext<'_>, value: Value) -> vellum::Result<Value> {
        Ok(match value {
            Value::String(text) if cx.field.name == "name" => Value::String(text.trim().into()),
            other => other,
        })
    }

    fn output(&self, cx: &TransformContext<'_>, value: Value) -> vellum::Result<Value> {
        Ok(match value {
            Value::I64(age) if cx.field.name == "age" => Value::I64(age * 10),
            other => other,
        })
    }
}

async fn custom_transform_runs_last(s: impl Setup) {
    let mut builder = fixture::builder();
    builder.value_transform(Trim);
    let db = s.setup(builder).await;

    let user = db
        .create("user", record! { "name" => "  a  ", "age" => 4 })
        .await
        .unwrap();
    assert_eq!(user.get_str("name"), Some("a"));
    assert_eq!(user.get("age"), Some(&Value::I64(40)));

    let users = db
        .find_many("user", Query::new().sort_by(SortBy::asc("age")))
        .await
        .unwrap();
    assert_eq!(users[0].get("age"), Some(&Value::I64(40)));
}

tests!(
    booleans_round_trip,
    dates_round_trip,
    arrays_round_trip,
    invalid_dates_are_rejected,
    field_transforms_wrap_coercion,
    custom_transform_runs_last
);
