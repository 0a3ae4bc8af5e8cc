use tests::*;

use vellum::{
    hooks::HookContext, record, Filter, Hook, HookResult, Hooked, Hooks, Outcome, Phase, Record,
    Result, Value,
};

use std::sync::{Arc, Mutex};

fn stamp_slug(mut data: Record, _cx: &HookContext<'_>) -> Result<HookResult> {
    if let Some(name) = data.get_str("name") {
        let email = format!("{}@hooks.test", name.to_lowercase());
        data.insert("email", email);
    }
    Ok(HookResult::Proceed(data))
}

fn reject_banned(data: Record, _cx: &HookContext<'_>) -> Result<HookResult> {
    if data.get_str("name") == Some("banned") {
        return Ok(HookResult::Abort);
    }
    Ok(HookResult::Proceed(data))
}

#[derive(Clone, Default)]
struct Audit {
    seen: Arc<Mutex<Vec<String>>>,
}

impl Hook for Audit {
    fn after(&self, result: &Record, cx: &HookContext<'_>) -> Result<()> {
        self.seen.lock().unwrap().push(format!(
            "{:?} {} {}",
            cx.phase,
            cx.model,
            result.get_str("name").unwrap_or_default()
        ));
        Ok(())
    }
}

async fn before_hooks_rewrite_the_payload(s: impl Setup) {
    let db = s.setup(fixture::builder()).await;

    let mut hooks = Hooks::new();
    hooks.register("user", Phase::Create, stamp_slug);
    let hooked = Hooked::new(&db, &hooks);

    let Outcome::Done(user) = hooked
        .create("user", record! { "name" => "Ada" })
        .await
        .unwrap()
    else {
        panic!("create was skipped");
    };
    assert_eq!(user.get_str("email"), Some("ada@hooks.test"));
}

async fn abort_skips_the_write(s: impl Setup) {
    let db = s.setup(fixture::builder()).await;

    let audit = Audit::default();
    let mut hooks = Hooks::new();
    hooks
        .register("user", Phase::Create, reject_banned)
        .register("user", Phase::Create, audit.clone())
        .register("user", Phase::Update, reject_banned);
    let hooked = Hooked::new(&db, &hooks);

    let outcome = hooked
        .create("user", record! { "name" => "banned" })
        .await
        .unwrap();
    assert!(outcome.is_skipped());
    assert_eq!(db.count("user", &[]).await.unwrap(), 0);
    assert!(audit.seen.lock().unwrap().is_empty());

    hooked
        .create("user", record! { "name" => "ok" })
        .await
        .unwrap()
        .into_option()
        .unwrap();

    let outcome = hooked
        .update(
            "user",
            &[Filter::eq("name", "ok")],
            record! { "name" => "banned" },
        )
        .await
        .unwrap();
    assert_eq!(outcome, Outcome::Skipped);

    let outcome = hooked
        .update_many("user", &[], record! { "name" => "banned" })
        .await
        .unwrap();
    assert!(outcome.is_skipped());

    let user = db
        .find_one("user", &[])
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.get_str("name"), Some("ok"));
    assert_eq!(*audit.seen.lock().unwrap(), ["Create user ok"]);
}

async fn after_hooks_see_stored_records(s: impl Setup) {
    let db = s.setup(fixture::builder()).await;

    let audit = Audit::default();
    let mut hooks = Hooks::new();
    hooks
        .register("user", Phase::Create, audit.clone())
        .register("user", Phase::Update, audit.clone());
    let hooked = Hooked::new(&db, &hooks);

    hooked
        .create("user", record! { "name" => "a" })
        .await
        .unwrap();
    hooked
        .update(
            "user",
            &[Filter::eq("name", "a")],
            record! { "name" => "b" },
        )
        .await
        .unwrap();

    // No after-hook when nothing matched
    let outcome = hooked
        .update(
            "user",
            &[Filter::eq("name", "zzz")],
            record! { "name" => "c" },
        )
        .await
        .unwrap();
    assert_eq!(outcome, Outcome::Done(None));

    assert_eq!(
        *audit.seen.lock().unwrap(),
        ["Create user a", "Update user b"]
    );
}

async fn hooks_are_scoped_to_their_model(s: impl Setup) {
    let db = s.setup(fixture::builder()).await;

    let mut hooks = Hooks::new();
    hooks.register("user", Phase::Create, reject_banned);
    let hooked = Hooked::new(&db, &hooks);

    let account = hooked
        .create(
            "account",
            record! { "provider" => "banned" },
        )
        .await
        .unwrap()
        .into_option()
        .unwrap();
    assert_eq!(account.get("provider"), Some(&Value::from("banned")));
}

async fn hooks_follow_model_aliases(s: impl Setup) {
    let mut builder = fixture::builder();
    builder.use_plural(true);
    let db = s.setup(builder).await;

    let audit = Audit::default();
    let mut hooks = Hooks::new();
    hooks
        .register("user", Phase::Create, reject_banned)
        .register("user", Phase::Create, audit.clone());
    let hooked = Hooked::new(&db, &hooks);

    let outcome = hooked
        .create("users", record! { "name" => "banned" })
        .await
        .unwrap();
    assert!(outcome.is_skipped());
    assert_eq!(db.count("user", &[]).await.unwrap(), 0);

    hooked
        .create("users", record! { "name" => "ok" })
        .await
        .unwrap()
        .into_option()
        .unwrap();
    assert_eq!(*audit.seen.lock().unwrap(), ["Create user ok"]);
}

tests!(
    before_hooks_rewrite_the_payload,
    abort_skips_the_write,
    after_hooks_see_stored_records,
    hooks_are_scoped_to_their_model,
    hooks_follow_model_aliases
);
