use tests::*;

use pretty_assertions::assert_eq;

use vellum::{
    record,
    schema::db::PlanStep,
    Db, Field, Model,
};

fn author_and_book() -> Vec<Model> {
    // Declared dependent-first; `order` puts the referenced table first
    vec![
        Model::new("book")
            .order(2)
            .field(Field::string("title").required())
            .field(Field::string("author_id").references("author", "id")),
        Model::new("author")
            .order(1)
            .field(Field::string("name").required()),
    ]
}

async fn plan_creates_referenced_tables_first(s: impl Setup) {
    let mut builder = Db::builder();
    builder.models(author_and_book());
    let db = s.connect(builder).await.unwrap();

    let plan = match db.migrator().plan().await {
        Ok(plan) => plan,
        Err(err) => {
            // Stores without a schema language cannot be planned
            assert!(s.capability().dialect.is_none());
            assert!(err.is_invalid_driver_configuration());
            return;
        }
    };

    let tables: Vec<_> = plan
        .created_tables()
        .map(|table| table.name.as_str())
        .collect();
    assert_eq!(tables, ["author", "book"]);
    assert!(plan.drift.is_empty());

    let script = db.migrator().compile(&plan).unwrap();
    let author = script.find("CREATE TABLE \"author\"").unwrap();
    let book = script.find("CREATE TABLE \"book\"").unwrap();
    assert!(author < book);
    assert!(script.contains("REFERENCES \"author\""));
}

async fn migration_is_idempotent(s: impl Setup) {
    let mut builder = Db::builder();
    builder.models(author_and_book());
    let db = s.connect(builder).await.unwrap();

    if s.capability().dialect.is_none() {
        return;
    }

    let applied = db.migrator().run().await.unwrap();
    assert_eq!(applied.steps.len(), 2);

    let again = db.migrator().plan().await.unwrap();
    assert!(again.is_empty(), "{again}");

    let author = db
        .create("author", record! { "name" => "Le Guin" })
        .await
        .unwrap();
    db.create(
        "book",
        record! { "title" => "The Dispossessed", "author_id" => author.get("id").unwrap().clone() },
    )
    .await
    .unwrap();
    assert_eq!(db.count("book", &[]).await.unwrap(), 1);
}

tests!(plan_creates_referenced_tables_first, migration_is_idempotent);

#[cfg(feature = "sqlite")]
mod sqlite_file {
    use super::*;
    use pretty_assertions::assert_eq;

    fn connect(path: &std::path::Path, models: Vec<Model>) -> Db {
        let mut builder = Db::builder();
        builder.models(models);
        builder
            .connect(&format!("sqlite:{}", path.display()))
            .unwrap()
    }

    fn user_v1() -> Model {
        Model::new("user")
            .field(Field::string("name").required())
            .field(Field::number("age"))
    }

    #[tokio::test]
    async fn new_fields_become_added_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.db");

        let db = connect(&path, vec![user_v1()]);
        db.migrator().run().await.unwrap();
        db.create("user", record! { "name" => "a", "age" => 3 })
            .await
            .unwrap();
        drop(db);

        let v2 = user_v1().field(Field::string("nickname"));
        let db = connect(&path, vec![v2]);

        let plan = db.migrator().plan().await.unwrap();
        assert_eq!(plan.steps.len(), 1);
        assert!(matches!(
            &plan.steps[0],
            PlanStep::AddColumn { table, column } if table == "user" && column.name == "nickname"
        ));
        assert!(plan.created_tables().next().is_none());

        db.migrator().execute(&plan).await.unwrap();

        let user = db
            .update(
                "user",
                &[vellum::Filter::eq("name", "a")],
                record! { "nickname" => "ace" },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.get_str("nickname"), Some("ace"));
        assert_eq!(user.get("age"), Some(&vellum::Value::I64(3)));
    }

    #[tokio::test]
    async fn type_mismatch_is_reported_as_drift() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.db");

        let db = connect(&path, vec![user_v1()]);
        db.migrator().run().await.unwrap();
        drop(db);

        let changed = Model::new("user")
            .field(Field::string("name").required())
            .field(Field::string("age"))
            .field(Field::boolean("admin"));
        let db = connect(&path, vec![changed]);

        let plan = db.migrator().plan().await.unwrap();

        // Drift is reported, the missing column is still planned
        assert_eq!(plan.drift.len(), 1);
        assert_eq!(plan.drift[0].table, "user");
        assert_eq!(plan.drift[0].column, "age");
        assert_eq!(plan.steps.len(), 1);

        db.migrator().execute(&plan).await.unwrap();
        let again = db.migrator().plan().await.unwrap();
        assert!(again.is_empty());
        assert_eq!(again.drift.len(), 1);
    }
}
