use tests::*;

use vellum::{record, Db, Query, SortBy};

async fn seed(db: &Db, count: usize) {
    for i in 0..count {
        db.create("user", record! { "name" => format!("user-{i:02}") })
            .await
            .unwrap();
    }
}

fn names(records: &[vellum::Record]) -> Vec<&str> {
    records
        .iter()
        .map(|record| record.get_str("name").unwrap())
        .collect()
}

async fn consecutive_pages_do_not_overlap(s: impl Setup) {
    let db = s.setup(fixture::builder()).await;
    seed(&db, 5).await;

    let page = |offset| {
        Query::new()
            .limit(1)
            .offset(offset)
            .sort_by(SortBy::asc("name"))
    };

    let third = db.find_many("user", page(2)).await.unwrap();
    let fourth = db.find_many("user", page(3)).await.unwrap();

    assert_eq!(names(&third), ["user-02"]);
    assert_eq!(names(&fourth), ["user-03"]);
}

async fn offset_without_sort_is_stable(s: impl Setup) {
    let db = s.setup(fixture::builder()).await;
    seed(&db, 6).await;

    let mut seen = vec![];
    for offset in (0..6).step_by(2) {
        let page = db
            .find_many("user", Query::new().limit(2).offset(offset))
            .await
            .unwrap();
        assert_eq!(page.len(), 2);
        seen.extend(page.into_iter().map(|user| user.get_str("id").unwrap().to_string()));
    }

    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), 6);
}

async fn default_limit_caps_unbounded_scans(s: impl Setup) {
    let mut builder = fixture::builder();
    builder.default_find_many_limit(3);
    let db = s.setup(builder).await;
    seed(&db, 5).await;

    assert_eq!(db.find_many("user", Query::new()).await.unwrap().len(), 3);

    // Explicit limits are honored, even above the cap
    assert_eq!(
        db.find_many("user", Query::new().limit(5)).await.unwrap().len(),
        5
    );
    assert_eq!(
        db.find_many("user", Query::new().limit(10)).await.unwrap().len(),
        5
    );
    assert_eq!(
        db.find_many("user", Query::new().limit(2)).await.unwrap().len(),
        2
    );
}

async fn offset_past_the_end_is_empty(s: impl Setup) {
    let db = s.setup(fixture::builder()).await;
    seed(&db, 2).await;

    let records = db
        .find_many(
            "user",
            Query::new().offset(5).sort_by(SortBy::desc("name")),
        )
        .await
        .unwrap();
    assert!(records.is_empty());
}

tests!(
    consecutive_pages_do_not_overlap,
    offset_without_sort_is_stable,
    default_limit_caps_unbounded_scans,
    offset_past_the_end_is_empty
);
