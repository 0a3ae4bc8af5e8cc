use tests::*;

use pretty_assertions::assert_eq;

use vellum::{record, Field, Filter, Model, Query, SortBy, Value};

async fn create_find_update_count(s: impl Setup) {
    let db = s.setup(fixture::builder()).await;

    let b = db
        .create("user", record! { "name" => "b", "email" => "b@x.com" })
        .await
        .unwrap();
    let a = db
        .create("user", record! { "name" => "a", "email" => "a@x.com" })
        .await
        .unwrap();

    assert!(matches!(a.get("id"), Some(Value::String(id)) if !id.is_empty()));
    assert_eq!(a.get_str("name"), Some("a"));
    assert_ne!(a.get("id"), b.get("id"));

    let users = db
        .find_many("user", Query::new().sort_by(SortBy::desc("name")))
        .await
        .unwrap();
    let names: Vec<_> = users.iter().map(|user| user.get_str("name")).collect();
    assert_eq!(names, [Some("b"), Some("a")]);

    assert_eq!(db.count("user", &[]).await.unwrap(), 2);

    let updated = db
        .update(
            "user",
            &[Filter::eq("email", "a@x.com")],
            record! { "name" => "a2" },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.get_str("name"), Some("a2"));
    assert_eq!(updated.get("id"), a.get("id"));

    let found = db
        .find_one("user", &[Filter::eq("email", "a@x.com")])
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.get_str("name"), Some("a2"));
    assert_eq!(found.get_str("email"), Some("a@x.com"));
}

async fn defaults_apply_on_create_only(s: impl Setup) {
    let db = s.setup(fixture::builder()).await;

    let user = db
        .create("user", record! { "name" => "a" })
        .await
        .unwrap();
    assert_eq!(user.get("email_verified"), Some(&Value::Bool(false)));
    assert!(matches!(user.get("created_at"), Some(Value::Timestamp(_))));

    db.update(
        "user",
        &[Filter::eq("name", "a")],
        record! { "email_verified" => true },
    )
    .await
    .unwrap();

    let user = db
        .find_one("user", &[Filter::eq("name", "a")])
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.get("email_verified"), Some(&Value::Bool(true)));

    // Never-written fields read as null on every store
    assert_eq!(user.get("age"), Some(&Value::Null));
}

async fn missing_records_are_not_errors(s: impl Setup) {
    let db = s.setup(fixture::builder()).await;

    let filter = [Filter::eq("email", "nobody@x.com")];

    assert_eq!(db.find_one("user", &filter).await.unwrap(), None);
    assert_eq!(
        db.update("user", &filter, record! { "name" => "x" })
            .await
            .unwrap(),
        None
    );
    db.delete("user", &filter).await.unwrap();
    assert_eq!(db.delete_many("user", &filter).await.unwrap(), 0);
    assert_eq!(db.count("user", &filter).await.unwrap(), 0);
}

async fn update_many_and_delete_many(s: impl Setup) {
    let db = s.setup(fixture::builder()).await;

    for (name, age) in [("a", 20), ("b", 30), ("c", 40)] {
        db.create("user", record! { "name" => name, "age" => age })
            .await
            .unwrap();
    }

    let affected = db
        .update_many(
            "user",
            &[Filter::gte("age", 30)],
            record! { "email_verified" => true },
        )
        .await
        .unwrap();
    assert_eq!(affected, 2);
    assert_eq!(
        db.count("user", &[Filter::eq("email_verified", true)])
            .await
            .unwrap(),
        2
    );

    db.delete("user", &[Filter::eq("name", "a")]).await.unwrap();
    assert_eq!(db.count("user", &[]).await.unwrap(), 2);

    let deleted = db
        .delete_many("user", &[Filter::eq("email_verified", true)])
        .await
        .unwrap();
    assert_eq!(deleted, 2);
    assert_eq!(db.count("user", &[]).await.unwrap(), 0);
}

async fn select_projects_fields_and_keeps_id(s: impl Setup) {
    let db = s.setup(fixture::builder()).await;

    let created = db
        .create_select(
            "user",
            record! { "name" => "a", "email" => "a@x.com", "age" => 30 },
            &["name"],
        )
        .await
        .unwrap();
    assert_eq!(created.keys().collect::<Vec<_>>(), ["id", "name"]);

    let found = db
        .find_one_select("user", &[Filter::eq("name", "a")], &["email"])
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.keys().collect::<Vec<_>>(), ["id", "email"]);
    assert_eq!(found.get_str("email"), Some("a@x.com"));

    let many = db
        .find_many("user", Query::new().select(["age"]))
        .await
        .unwrap();
    assert_eq!(many.len(), 1);
    assert_eq!(many[0].get("age"), Some(&Value::I64(30)));
    assert!(many[0].get("name").is_none());
}

async fn hidden_fields_are_stored_but_not_returned(s: impl Setup) {
    let db = s.setup(fixture::builder()).await;

    let account = db
        .create(
            "account",
            record! { "provider" => "github", "password" => "hunter2" },
        )
        .await
        .unwrap();
    assert_eq!(account.get_str("provider"), Some("github"));
    assert!(account.get("password").is_none());

    // Still usable in filters
    assert_eq!(
        db.count("account", &[Filter::eq("password", "hunter2")])
            .await
            .unwrap(),
        1
    );
}

async fn unknown_names_fail_fast(s: impl Setup) {
    let db = s.setup(fixture::builder()).await;

    let err = db.create("widget", record! { "name" => "a" }).await.unwrap_err();
    assert!(err.is_invalid_schema());
    assert!(err.to_string().contains("widget"));

    let err = db
        .find_one("user", &[Filter::eq("nickname", "a")])
        .await
        .unwrap_err();
    assert!(err.is_invalid_schema());
    assert!(err.to_string().contains("nickname"));
}

async fn update_leaves_unsupplied_fields_alone(s: impl Setup) {
    let model = Model::new("page")
        .field(Field::string("title"))
        .field(
            Field::string("slug")
                .default_value("untitled")
                .transform_input(|value| match value {
                    Value::String(slug) => Value::String(slug.to_lowercase()),
                    other => other,
                }),
        );

    let mut builder = vellum::Db::builder();
    builder.model(model);
    let db = s.setup(builder).await;

    db.create("page", record! { "title" => "t", "slug" => "Hello" })
        .await
        .unwrap();

    let page = db
        .update("page", &[Filter::eq("title", "t")], record! { "title" => "t2" })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(page.get_str("title"), Some("t2"));
    assert_eq!(page.get_str("slug"), Some("hello"));

    let page = db
        .find_one("page", &[Filter::eq("title", "t2")])
        .await
        .unwrap()
        .unwrap();
    assert_eq!(page.get_str("slug"), Some("hello"));
}

tests!(
    create_find_update_count,
    defaults_apply_on_create_only,
    missing_records_are_not_errors,
    update_many_and_delete_many,
    select_projects_fields_and_keeps_id,
    hidden_fields_are_stored_but_not_returned,
    unknown_names_fail_fast,
    update_leaves_unsupplied_fields_alone
);
