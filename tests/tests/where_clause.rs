use tests::*;

use pretty_assertions::assert_eq;

use vellum::{record, Db, Filter, Query, SortBy};

async fn seed(db: &Db) {
    for (name, age, verified) in [
        ("alice", 20, true),
        ("bob", 30, false),
        ("carol", 30, true),
        ("dave", 40, false),
    ] {
        db.create(
            "user",
            record! {
                "name" => name,
                "email" => format!("{name}@example.com"),
                "age" => age,
                "email_verified" => verified,
            },
        )
        .await
        .unwrap();
    }
}

async fn names(db: &Db, filter: Vec<Filter>) -> Vec<String> {
    db.find_many(
        "user",
        Query::from(filter).sort_by(SortBy::asc("name")),
    )
    .await
    .unwrap()
    .into_iter()
    .map(|user| user.get_str("name").unwrap().to_string())
    .collect()
}

async fn implicit_and_is_intersection(s: impl Setup) {
    let db = s.setup(fixture::builder()).await;
    seed(&db).await;

    assert_eq!(
        names(
            &db,
            vec![Filter::eq("age", 30), Filter::eq("email_verified", true)]
        )
        .await,
        ["carol"]
    );
}

async fn or_group_is_a_union(s: impl Setup) {
    let db = s.setup(fixture::builder()).await;
    seed(&db).await;

    assert_eq!(
        names(
            &db,
            vec![Filter::eq("name", "alice").or(), Filter::eq("name", "dave").or()]
        )
        .await,
        ["alice", "dave"]
    );
}

async fn and_group_constrains_or_group(s: impl Setup) {
    let db = s.setup(fixture::builder()).await;
    seed(&db).await;

    // age = 30 AND (name = alice OR name = bob)
    assert_eq!(
        names(
            &db,
            vec![
                Filter::eq("age", 30),
                Filter::eq("name", "alice").or(),
                Filter::eq("name", "bob").or(),
            ]
        )
        .await,
        ["bob"]
    );
}

async fn comparison_operators(s: impl Setup) {
    let db = s.setup(fixture::builder()).await;
    seed(&db).await;

    assert_eq!(names(&db, vec![Filter::gt("age", 30)]).await, ["dave"]);
    assert_eq!(
        names(&db, vec![Filter::gte("age", 30)]).await,
        ["bob", "carol", "dave"]
    );
    assert_eq!(names(&db, vec![Filter::lt("age", 30)]).await, ["alice"]);
    assert_eq!(
        names(&db, vec![Filter::lte("age", 30)]).await,
        ["alice", "bob", "carol"]
    );
    assert_eq!(
        names(&db, vec![Filter::ne("name", "bob")]).await,
        ["alice", "carol", "dave"]
    );
    assert_eq!(
        names(&db, vec![Filter::in_list("name", vec!["bob", "dave", "zed"])]).await,
        ["bob", "dave"]
    );
}

async fn pattern_operators(s: impl Setup) {
    let db = s.setup(fixture::builder()).await;
    seed(&db).await;

    assert_eq!(
        names(&db, vec![Filter::contains("name", "ar")]).await,
        ["carol"]
    );
    assert_eq!(
        names(&db, vec![Filter::starts_with("name", "da")]).await,
        ["dave"]
    );
    assert_eq!(
        names(&db, vec![Filter::ends_with("email", "@example.com")]).await,
        ["alice", "bob", "carol", "dave"]
    );
}

async fn patterns_reject_non_text_values(s: impl Setup) {
    let db = s.setup(fixture::builder()).await;
    seed(&db).await;

    let err = db
        .delete_many("user", &[Filter::contains("age", 3)])
        .await
        .unwrap_err();
    assert!(err.is_type_conversion());

    let err = db
        .find_many("user", Query::from(vec![Filter::starts_with("name", 1)]))
        .await
        .unwrap_err();
    assert!(err.is_type_conversion());

    assert_eq!(db.count("user", &[]).await.unwrap(), 4);
}

async fn filters_use_logical_names(s: impl Setup) {
    let db = s.setup(fixture::builder()).await;
    seed(&db).await;

    // `email` is stored as `email_address`; either name resolves
    assert_eq!(
        names(&db, vec![Filter::eq("email", "bob@example.com")]).await,
        ["bob"]
    );
    assert_eq!(
        names(&db, vec![Filter::eq("email_address", "bob@example.com")]).await,
        ["bob"]
    );
}

async fn boolean_filters_are_coerced(s: impl Setup) {
    let db = s.setup(fixture::builder()).await;
    seed(&db).await;

    assert_eq!(
        names(&db, vec![Filter::eq("email_verified", false)]).await,
        ["bob", "dave"]
    );
}

tests!(
    implicit_and_is_intersection,
    or_group_is_a_union,
    and_group_constrains_or_group,
    comparison_operators,
    pattern_operators,
    patterns_reject_non_text_values,
    filters_use_logical_names,
    boolean_filters_are_coerced
);
