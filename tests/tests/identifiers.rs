use tests::*;

use vellum::{record, Filter, IdStrategy, Value};

use std::collections::HashSet;

async fn explicit_id_is_ignored_on_create(s: impl Setup) {
    let db = s.setup(fixture::builder()).await;

    let user = db
        .create("user", record! { "id" => "chosen", "name" => "a" })
        .await
        .unwrap();

    let id = user.get_str("id").unwrap();
    assert!(!id.is_empty());
    assert_ne!(id, "chosen");
}

async fn concurrent_creates_get_distinct_ids(s: impl Setup) {
    let db = s.setup(fixture::builder()).await;

    let (a, b, c, d, e) = tokio::join!(
        db.create("user", record! { "name" => "a" }),
        db.create("user", record! { "name" => "b" }),
        db.create("user", record! { "name" => "c" }),
        db.create("user", record! { "name" => "d" }),
        db.create("user", record! { "name" => "e" }),
    );

    let ids: HashSet<String> = [a, b, c, d, e]
        .into_iter()
        .map(|user| user.unwrap().get_str("id").unwrap().to_string())
        .collect();
    assert_eq!(ids.len(), 5);
}

async fn update_never_rewrites_the_id(s: impl Setup) {
    let db = s.setup(fixture::builder()).await;

    let user = db
        .create("user", record! { "name" => "a" })
        .await
        .unwrap();

    let updated = db
        .update(
            "user",
            &[Filter::eq("id", user.get("id").unwrap().clone())],
            record! { "id" => "other", "name" => "b" },
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.get("id"), user.get("id"));
    assert_eq!(updated.get_str("name"), Some("b"));
}

async fn uuid_strategy(s: impl Setup) {
    let mut builder = fixture::builder();
    builder.id_strategy(IdStrategy::Uuid);
    let db = s.setup(builder).await;

    let user = db
        .create("user", record! { "name" => "a" })
        .await
        .unwrap();

    let id = user.get_str("id").unwrap();
    assert_eq!(id.len(), 36);
    assert_eq!(id.matches('-').count(), 4);
}

async fn custom_generator(s: impl Setup) {
    let mut builder = fixture::builder();
    builder.id_generator(|model: &str| format!("{model}-fixed"));
    let db = s.setup(builder).await;

    let user = db
        .create("user", record! { "name" => "a" })
        .await
        .unwrap();
    assert_eq!(user.get_str("id"), Some("user-fixed"));
}

async fn caller_ids_when_generation_is_disabled(s: impl Setup) {
    let mut builder = fixture::builder();
    builder.disable_id_generation(true);
    let db = s.setup(builder).await;

    let user = db
        .create("user", record! { "id" => "u1", "name" => "a" })
        .await
        .unwrap();
    assert_eq!(user.get_str("id"), Some("u1"));
}

async fn numeric_ids_read_back_as_strings(s: impl Setup) {
    let mut builder = fixture::builder();
    builder.use_number_id(true);
    let db = s.setup(builder).await;

    let first = db
        .create("user", record! { "name" => "a" })
        .await
        .unwrap();
    let second = db
        .create("user", record! { "name" => "b" })
        .await
        .unwrap();

    assert_eq!(first.get_str("id"), Some("1"));
    assert_eq!(second.get_str("id"), Some("2"));

    // References to an identifier follow the same mode
    let session = db
        .create(
            "session",
            record! { "user_id" => "2", "token" => "t" },
        )
        .await
        .unwrap();
    assert_eq!(session.get("user_id"), Some(&Value::from("2")));

    let raw = raw_row(&db, "session", "token", Value::from("t")).await;
    assert_eq!(raw.get("user_id"), Some(&Value::I64(2)));

    let found = db
        .find_one("user", &[Filter::eq("id", "2")])
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.get_str("name"), Some("b"));

    let sessions = db
        .count("session", &[Filter::in_list("user_id", vec!["1", "2"])])
        .await
        .unwrap();
    assert_eq!(sessions, 1);
}

tests!(
    explicit_id_is_ignored_on_create,
    concurrent_creates_get_distinct_ids,
    update_never_rewrites_the_id,
    uuid_strategy,
    custom_generator,
    caller_ids_when_generation_is_disabled,
    numeric_ids_read_back_as_strings
);
