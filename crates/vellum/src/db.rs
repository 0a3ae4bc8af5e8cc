mod builder;
pub use builder::Builder;

mod connect;
pub use connect::connect;

mod query;
pub use query::Query;

use crate::{
    filter,
    log::{Category, LogContext, Stage},
    migrate::Migrator,
    transform::{Action, Ids, Transform},
    Coercion, IdGenerator, ValueTransform,
};

use vellum_core::{
    driver::{operation, Capability, Driver},
    schema::app::Model,
    stmt::{Condition, Filter, Record, SortBy, Value},
    Error, Result, Schema,
};

use std::sync::Arc;

/// Shared state between all `Db` clones.
pub(crate) struct Shared {
    pub(crate) schema: Arc<Schema>,
    pub(crate) driver: Arc<dyn Driver>,
    pub(crate) log: Arc<LogContext>,
    pub(crate) id_generator: Box<dyn IdGenerator>,
    pub(crate) value_transform: Option<Box<dyn ValueTransform>>,
    pub(crate) options: Options,
}

#[derive(Debug, Clone)]
pub(crate) struct Options {
    pub(crate) use_number_id: bool,
    pub(crate) disable_id_generation: bool,
    pub(crate) default_find_many_limit: usize,
}

/// Handle to a configured store.
///
/// All operations address models and fields by logical name. Cloning is
/// cheap; clones share the schema, driver and log context.
#[derive(Clone)]
pub struct Db {
    shared: Arc<Shared>,
}

impl Db {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.shared.schema
    }

    pub fn driver(&self) -> &Arc<dyn Driver> {
        &self.shared.driver
    }

    pub fn capability(&self) -> &Capability {
        self.shared.driver.capability()
    }

    /// Transaction counter and debug trace of this handle.
    pub fn log(&self) -> &LogContext {
        &self.shared.log
    }

    pub fn migrator(&self) -> Migrator<'_> {
        Migrator::new(
            &self.shared.schema,
            &*self.shared.driver,
            self.shared.options.use_number_id,
        )
    }

    /// Inserts a record and returns it as stored.
    ///
    /// The returned record always carries a string identifier. An identifier
    /// in `data` is ignored unless id generation is disabled.
    pub async fn create(&self, model: &str, data: Record) -> Result<Record> {
        self.create_select(model, data, &[]).await
    }

    /// Like [`Db::create`], returning only the `select`ed fields (and the
    /// identifier). An empty `select` returns every field.
    pub async fn create_select(&self, model: &str, data: Record, select: &[&str]) -> Result<Record> {
        let model = self.shared.schema.resolve_model(model)?;
        let select = self.select(model, select)?;
        let cx = self.begin(model, Category::Create);
        cx.trace(Stage::UnsafeInput, || format!("{data:?}"));

        let row = self.transform().input(model, data, Action::Create)?;
        cx.trace(Stage::ParsedInput, || format!("{row:?}"));

        let id = model.id();
        let auto_increment = self.numeric_ids().then(|| id.column().to_string());
        let id_value = row.get(id.column()).cloned();

        let op = operation::Create {
            table: model.table().to_string(),
            row,
            auto_increment,
        };

        let row = if self.capability().returning {
            let response = self.shared.driver.exec(op.into()).await?;
            cx.trace(Stage::BackendResult, || format!("{response:?}"));
            response.into_first()?
        } else {
            // Without `RETURNING` the row is read back by its identifier
            let Some(id_value) = id_value else {
                return Err(Error::unsupported_feature(
                    "backend-generated identifiers on a backend without `RETURNING`",
                ));
            };
            let response = self.shared.driver.exec(op.into()).await?;
            cx.trace(Stage::BackendResult, || format!("{response:?}"));
            self.fetch(model, Condition::eq(id.column(), id_value)).await?
        };

        let row = row.ok_or_else(|| {
            Error::invalid_result(format!("create on `{}` returned no row", model.name))
        })?;

        let record = self.transform().output(model, row, select.as_deref())?;

        if !matches!(record.get(&id.name), Some(Value::String(id)) if !id.is_empty()) {
            return Err(Error::invalid_result(format!(
                "create on `{}` returned a record without an identifier",
                model.name
            )));
        }

        cx.trace(Stage::ParsedResult, || format!("{record:?}"));
        Ok(record)
    }

    /// Returns the first record matching `filter`, or `None`.
    pub async fn find_one(&self, model: &str, filter: &[Filter]) -> Result<Option<Record>> {
        self.find_one_select(model, filter, &[]).await
    }

    pub async fn find_one_select(
        &self,
        model: &str,
        filter: &[Filter],
        select: &[&str],
    ) -> Result<Option<Record>> {
        let model = self.shared.schema.resolve_model(model)?;
        let select = self.select(model, select)?;
        let cx = self.begin(model, Category::FindOne);
        cx.trace(Stage::UnsafeInput, || format!("{filter:?} select={select:?}"));

        let condition = self.condition(model, filter)?;
        cx.trace(Stage::ParsedInput, || format!("{condition:?}"));

        let response = self
            .shared
            .driver
            .exec(
                operation::FindOne {
                    table: model.table().to_string(),
                    filter: condition,
                    select: self.projection(model, select.as_deref()),
                }
                .into(),
            )
            .await?;
        cx.trace(Stage::BackendResult, || format!("{response:?}"));

        let record = response
            .into_first()?
            .map(|row| self.transform().output(model, row, select.as_deref()))
            .transpose()?;

        cx.trace(Stage::ParsedResult, || format!("{record:?}"));
        Ok(record)
    }

    /// Returns matching records.
    ///
    /// Without an explicit limit at most `default_find_many_limit` records
    /// are returned. An explicit limit is honored as given. Paging with an
    /// offset but no sort orders by identifier so pages do not overlap.
    pub async fn find_many(&self, model: &str, query: Query) -> Result<Vec<Record>> {
        let model = self.shared.schema.resolve_model(model)?;
        let select = self.select_owned(model, query.select.as_deref())?;
        let cx = self.begin(model, Category::FindMany);
        cx.trace(Stage::UnsafeInput, || format!("{query:?}"));

        let condition = self.condition(model, &query.filter)?;

        let cap = self.shared.options.default_find_many_limit;
        // The cap only bounds unbounded scans
        let limit = query.limit.unwrap_or(cap);

        let sort = match (&query.sort_by, query.offset) {
            (Some(sort), _) => Some(SortBy {
                field: self
                    .shared
                    .schema
                    .resolve_field(&model.name, &sort.field)?
                    .column()
                    .to_string(),
                direction: sort.direction,
            }),
            (None, Some(_)) => Some(SortBy::asc(model.id().column())),
            (None, None) => None,
        };

        let op = operation::FindMany {
            table: model.table().to_string(),
            filter: condition,
            limit: Some(limit),
            offset: query.offset,
            sort,
            select: self.projection(model, select.as_deref()),
        };
        cx.trace(Stage::ParsedInput, || format!("{op:?}"));

        let response = self.shared.driver.exec(op.into()).await?;
        cx.trace(Stage::BackendResult, || format!("{response:?}"));

        let transform = self.transform();
        let records = response
            .into_values()?
            .into_iter()
            .map(|row| transform.output(model, row, select.as_deref()))
            .collect::<Result<Vec<_>>>()?;

        cx.trace(Stage::ParsedResult, || format!("{records:?}"));
        Ok(records)
    }

    /// Updates the first record matching `filter` and returns it, or `None`
    /// when nothing matched. Only fields present in `data` are written.
    pub async fn update(
        &self,
        model: &str,
        filter: &[Filter],
        data: Record,
    ) -> Result<Option<Record>> {
        let model = self.shared.schema.resolve_model(model)?;
        let cx = self.begin(model, Category::Update);
        cx.trace(Stage::UnsafeInput, || format!("{filter:?} {data:?}"));

        let condition = self.condition(model, filter)?;
        let values = self.transform().input(model, data, Action::Update)?;
        cx.trace(Stage::ParsedInput, || format!("{condition:?} {values:?}"));

        let key = model.id().column().to_string();

        let row = if values.is_empty() {
            // Nothing to write; read the current row under this call's trace
            let row = self.fetch(model, condition).await?;
            cx.trace(Stage::BackendResult, || format!("{row:?}"));
            row
        } else if self.capability().returning {
            let response = self
                .shared
                .driver
                .exec(
                    operation::Update {
                        table: model.table().to_string(),
                        key,
                        filter: condition,
                        values,
                    }
                    .into(),
                )
                .await?;
            cx.trace(Stage::BackendResult, || format!("{response:?}"));
            response.into_first()?
        } else {
            // Without `RETURNING` the row is pinned by identifier first, since
            // the update may change the columns the filter matched on
            let Some(current) = self.fetch(model, condition).await? else {
                cx.trace(Stage::ParsedResult, || "None".to_string());
                return Ok(None);
            };
            let Some(id_value) = current.get(&key).cloned() else {
                return Err(Error::invalid_result(format!(
                    "row of `{}` has no `{key}` column",
                    model.name
                )));
            };
            let pinned = Condition::eq(&key, id_value);

            let response = self
                .shared
                .driver
                .exec(
                    operation::Update {
                        table: model.table().to_string(),
                        key,
                        filter: pinned.clone(),
                        values,
                    }
                    .into(),
                )
                .await?;
            cx.trace(Stage::BackendResult, || format!("{response:?}"));
            self.fetch(model, pinned).await?
        };

        let record = row
            .map(|row| self.transform().output(model, row, None))
            .transpose()?;

        cx.trace(Stage::ParsedResult, || format!("{record:?}"));
        Ok(record)
    }

    /// Updates every record matching `filter` and returns how many changed.
    pub async fn update_many(&self, model: &str, filter: &[Filter], data: Record) -> Result<u64> {
        let model = self.shared.schema.resolve_model(model)?;
        let cx = self.begin(model, Category::UpdateMany);
        cx.trace(Stage::UnsafeInput, || format!("{filter:?} {data:?}"));

        let condition = self.condition(model, filter)?;
        let values = self.transform().input(model, data, Action::Update)?;
        cx.trace(Stage::ParsedInput, || format!("{condition:?} {values:?}"));

        if values.is_empty() {
            cx.trace(Stage::ParsedResult, || "0".to_string());
            return Ok(0);
        }

        let response = self
            .shared
            .driver
            .exec(
                operation::UpdateMany {
                    table: model.table().to_string(),
                    filter: condition,
                    values,
                }
                .into(),
            )
            .await?;
        cx.trace(Stage::BackendResult, || format!("{response:?}"));

        let count = response.into_count()?;
        cx.trace(Stage::ParsedResult, || count.to_string());
        Ok(count)
    }

    /// Deletes the first record matching `filter`. Matching nothing is not an
    /// error.
    pub async fn delete(&self, model: &str, filter: &[Filter]) -> Result<()> {
        let model = self.shared.schema.resolve_model(model)?;
        let cx = self.begin(model, Category::Delete);
        cx.trace(Stage::UnsafeInput, || format!("{filter:?}"));

        let condition = self.condition(model, filter)?;
        cx.trace(Stage::ParsedInput, || format!("{condition:?}"));

        let response = self
            .shared
            .driver
            .exec(
                operation::Delete {
                    table: model.table().to_string(),
                    key: model.id().column().to_string(),
                    filter: condition,
                }
                .into(),
            )
            .await?;
        cx.trace(Stage::BackendResult, || format!("{response:?}"));

        let count = response.into_count()?;
        cx.trace(Stage::ParsedResult, || count.to_string());
        Ok(())
    }

    /// Deletes every record matching `filter` and returns how many were
    /// removed.
    pub async fn delete_many(&self, model: &str, filter: &[Filter]) -> Result<u64> {
        let model = self.shared.schema.resolve_model(model)?;
        let cx = self.begin(model, Category::DeleteMany);
        cx.trace(Stage::UnsafeInput, || format!("{filter:?}"));

        let condition = self.condition(model, filter)?;
        cx.trace(Stage::ParsedInput, || format!("{condition:?}"));

        let response = self
            .shared
            .driver
            .exec(
                operation::DeleteMany {
                    table: model.table().to_string(),
                    filter: condition,
                }
                .into(),
            )
            .await?;
        cx.trace(Stage::BackendResult, || format!("{response:?}"));

        let count = response.into_count()?;
        cx.trace(Stage::ParsedResult, || count.to_string());
        Ok(count)
    }

    pub async fn count(&self, model: &str, filter: &[Filter]) -> Result<u64> {
        let model = self.shared.schema.resolve_model(model)?;
        let cx = self.begin(model, Category::Count);
        cx.trace(Stage::UnsafeInput, || format!("{filter:?}"));

        let condition = self.condition(model, filter)?;
        cx.trace(Stage::ParsedInput, || format!("{condition:?}"));

        let response = self
            .shared
            .driver
            .exec(
                operation::Count {
                    table: model.table().to_string(),
                    filter: condition,
                }
                .into(),
            )
            .await?;
        cx.trace(Stage::BackendResult, || format!("{response:?}"));

        let count = response.into_count()?;
        cx.trace(Stage::ParsedResult, || count.to_string());
        Ok(count)
    }

    fn numeric_ids(&self) -> bool {
        self.shared.options.use_number_id
    }

    fn coercion(&self) -> Coercion<'_> {
        Coercion::new(self.capability(), self.numeric_ids())
    }

    fn transform(&self) -> Transform<'_> {
        let ids = if self.shared.options.disable_id_generation {
            Ids::Caller
        } else if self.numeric_ids() {
            Ids::Backend
        } else {
            Ids::Generate(&*self.shared.id_generator)
        };

        Transform {
            capability: self.capability(),
            coercion: self.coercion(),
            custom: self.shared.value_transform.as_deref(),
            ids,
        }
    }

    fn condition(&self, model: &Model, filter: &[Filter]) -> Result<Condition> {
        filter::normalize(
            &self.shared.schema,
            model,
            filter,
            self.capability(),
            self.coercion(),
        )
    }

    /// Validates a projection of logical field names.
    fn select(&self, model: &Model, select: &[&str]) -> Result<Option<Vec<String>>> {
        if select.is_empty() {
            return Ok(None);
        }

        select
            .iter()
            .map(|name| {
                self.shared
                    .schema
                    .resolve_field(&model.name, name)
                    .map(|field| field.name.clone())
            })
            .collect::<Result<Vec<_>>>()
            .map(Some)
    }

    fn select_owned(&self, model: &Model, select: Option<&[String]>) -> Result<Option<Vec<String>>> {
        let select: Vec<&str> = select
            .unwrap_or_default()
            .iter()
            .map(String::as_str)
            .collect();
        self.select(model, &select)
    }

    /// Physical columns to read for a projection. The identifier is always
    /// read.
    fn projection(&self, model: &Model, select: Option<&[String]>) -> Option<Vec<String>> {
        let select = select?;

        let columns = model
            .fields
            .iter()
            .filter(|field| field.primary_key || select.contains(&field.name))
            .map(|field| field.column().to_string())
            .collect();

        Some(columns)
    }

    async fn fetch(&self, model: &Model, filter: Condition) -> Result<Option<Record>> {
        self.shared
            .driver
            .exec(
                operation::FindOne {
                    table: model.table().to_string(),
                    filter,
                    select: None,
                }
                .into(),
            )
            .await?
            .into_first()
    }

    fn begin<'a>(&'a self, model: &'a Model, operation: Category) -> Call<'a> {
        Call {
            log: &self.shared.log,
            tx_id: self.shared.log.next_tx_id(),
            model: &model.name,
            operation,
        }
    }
}

/// One façade call, as seen by the debug trace.
struct Call<'a> {
    log: &'a LogContext,
    tx_id: u64,
    model: &'a str,
    operation: Category,
}

impl Call<'_> {
    fn trace(&self, stage: Stage, data: impl FnOnce() -> String) {
        self.log
            .record(self.tx_id, self.model, self.operation, stage, data);
    }
}

impl std::fmt::Debug for Db {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Db")
            .field("driver", &self.shared.driver)
            .field("models", &self.shared.schema.models().len())
            .finish()
    }
}
