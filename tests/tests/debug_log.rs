use tests::*;

use vellum::{record, Category, DebugLogs, Filter, LogContext, Query, Stage};

use std::sync::Arc;

async fn disabled_by_default(s: impl Setup) {
    let db = s.setup(fixture::builder()).await;

    db.create("user", record! { "name" => "a" }).await.unwrap();
    db.count("user", &[]).await.unwrap();

    assert!(db.log().entries().is_empty());
}

async fn four_stages_per_call(s: impl Setup) {
    let mut builder = fixture::builder();
    builder.debug_logs(true);
    let db = s.setup(builder).await;
    db.log().reset();

    db.create("user", record! { "name" => "a" }).await.unwrap();
    db.find_many("user", Query::new()).await.unwrap();

    let entries = db.log().entries();
    let stages: Vec<_> = entries.iter().map(|entry| entry.stage).collect();
    assert_eq!(
        stages,
        [
            Stage::UnsafeInput,
            Stage::ParsedInput,
            Stage::BackendResult,
            Stage::ParsedResult,
        ]
        .repeat(2)
    );

    let (create, find) = entries.split_at(4);
    assert!(create.iter().all(|entry| entry.operation == Category::Create));
    assert!(find.iter().all(|entry| entry.operation == Category::FindMany));
    assert!(create.iter().all(|entry| entry.model == "user"));

    // One id per call, increasing
    assert!(create.iter().all(|entry| entry.tx_id == create[0].tx_id));
    assert!(find.iter().all(|entry| entry.tx_id == find[0].tx_id));
    assert!(find[0].tx_id > create[0].tx_id);

    // Unsafe input is the caller's payload, parsed input the physical one
    assert!(create[0].data.contains("\"name\""));
    assert!(!create[0].data.contains("created_at"));
    assert!(create[1].data.contains("created_at"));
}

async fn only_selected_categories(s: impl Setup) {
    let mut builder = fixture::builder();
    builder.debug_logs(DebugLogs::only([Category::Update, Category::Count]));
    let db = s.setup(builder).await;
    db.log().reset();

    db.create("user", record! { "name" => "a" }).await.unwrap();
    db.update("user", &[Filter::eq("name", "a")], record! { "age" => 1 })
        .await
        .unwrap();
    db.count("user", &[]).await.unwrap();

    let operations: Vec<_> = db
        .log()
        .entries()
        .into_iter()
        .map(|entry| entry.operation)
        .collect();
    assert_eq!(operations.len(), 8);
    assert!(operations[..4].iter().all(|op| *op == Category::Update));
    assert!(operations[4..].iter().all(|op| *op == Category::Count));
}

async fn shared_context_is_isolated_per_instance(s: impl Setup) {
    let log = Arc::new(LogContext::new(DebugLogs::All));

    let mut builder = fixture::builder();
    builder.log_context(log.clone());
    let db = s.setup(builder).await;
    log.reset();

    db.count("user", &[]).await.unwrap();
    assert_eq!(log.entries().len(), 4);

    // A second instance with its own context sees none of it
    let mut builder = fixture::builder();
    builder.debug_logs(true);
    let other = s.setup(builder).await;
    assert!(other.log().entries().is_empty());
}

async fn empty_update_is_one_call(s: impl Setup) {
    let mut builder = fixture::builder();
    builder.debug_logs(true);
    let db = s.setup(builder).await;

    db.create("user", record! { "name" => "a" }).await.unwrap();
    db.log().reset();

    let user = db
        .update("user", &[Filter::eq("name", "a")], record! {})
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.get_str("name"), Some("a"));

    let entries = db.log().entries();
    let stages: Vec<_> = entries.iter().map(|entry| entry.stage).collect();
    assert_eq!(
        stages,
        [
            Stage::UnsafeInput,
            Stage::ParsedInput,
            Stage::BackendResult,
            Stage::ParsedResult,
        ]
    );
    assert!(entries.iter().all(|entry| entry.operation == Category::Update));
    assert!(entries.iter().all(|entry| entry.tx_id == entries[0].tx_id));
}

tests!(
    disabled_by_default,
    four_stages_per_call,
    only_selected_categories,
    shared_context_is_isolated_per_instance,
    empty_update_is_one_call
);
