use super::{Db, Options, Shared};
use crate::{
    config::AdapterConfig, DebugLogs, IdGenerator, IdStrategy, LogContext, ValueTransform,
};

use vellum_core::{
    driver::Driver,
    schema::{self, app::Model},
    Error, Result, Schema,
};

use std::sync::Arc;

/// Upper bound on `find_many` results unless configured otherwise.
const DEFAULT_FIND_MANY_LIMIT: usize = 100;

#[derive(Default)]
pub struct Builder {
    /// Schema builder, used when no prebuilt schema is given
    core: schema::Builder,

    schema: Option<Arc<Schema>>,

    driver: Option<Arc<dyn Driver>>,

    use_number_id: bool,

    disable_id_generation: bool,

    default_find_many_limit: Option<usize>,

    id_generator: Option<Box<dyn IdGenerator>>,

    value_transform: Option<Box<dyn ValueTransform>>,

    debug_logs: DebugLogs,

    log: Option<Arc<LogContext>>,
}

impl Builder {
    /// Use an already built schema instead of registering models.
    pub fn schema(&mut self, schema: impl Into<Arc<Schema>>) -> &mut Self {
        self.schema = Some(schema.into());
        self
    }

    pub fn model(&mut self, model: Model) -> &mut Self {
        self.core.model(model);
        self
    }

    pub fn models(&mut self, models: impl IntoIterator<Item = Model>) -> &mut Self {
        self.core.models(models);
        self
    }

    /// Pluralize default table names and accept plural model names.
    pub fn use_plural(&mut self, use_plural: bool) -> &mut Self {
        self.core.use_plural(use_plural);
        self
    }

    /// Let the backend assign integer identifiers.
    pub fn use_number_id(&mut self, use_number_id: bool) -> &mut Self {
        self.use_number_id = use_number_id;
        self
    }

    /// Store identifiers supplied by callers instead of generating them.
    pub fn disable_id_generation(&mut self, disable: bool) -> &mut Self {
        self.disable_id_generation = disable;
        self
    }

    pub fn default_find_many_limit(&mut self, limit: usize) -> &mut Self {
        self.default_find_many_limit = Some(limit);
        self
    }

    pub fn id_generator(&mut self, generator: impl IdGenerator) -> &mut Self {
        self.id_generator = Some(Box::new(generator));
        self
    }

    pub fn id_strategy(&mut self, strategy: IdStrategy) -> &mut Self {
        self.id_generator = Some(strategy.generator());
        self
    }

    pub fn value_transform(&mut self, transform: impl ValueTransform) -> &mut Self {
        self.value_transform = Some(Box::new(transform));
        self
    }

    pub fn debug_logs(&mut self, debug_logs: impl Into<DebugLogs>) -> &mut Self {
        self.debug_logs = debug_logs.into();
        self
    }

    /// Share a log context instead of creating one. Its own debug flags
    /// apply; [`Builder::debug_logs`] is ignored.
    pub fn log_context(&mut self, log: Arc<LogContext>) -> &mut Self {
        self.log = Some(log);
        self
    }

    /// Apply the `[adapter]` section of a configuration file.
    pub fn adapter_config(&mut self, config: &AdapterConfig) -> &mut Self {
        self.use_plural(config.use_plural)
            .use_number_id(config.use_number_id)
            .disable_id_generation(config.disable_id_generation)
            .default_find_many_limit(config.default_find_many_limit)
            .id_strategy(config.id_strategy)
            .debug_logs(config.debug_logs.clone())
    }

    pub fn driver(&mut self, driver: impl Driver) -> &mut Self {
        self.driver = Some(Arc::new(driver));
        self
    }

    /// Opens a built-in driver from a URL and builds the handle.
    pub fn connect(&mut self, url: &str) -> Result<Db> {
        self.driver = Some(Arc::from(super::connect(url)?));
        self.build()
    }

    pub fn build(&mut self) -> Result<Db> {
        let Some(driver) = self.driver.take() else {
            return Err(Error::invalid_driver_configuration("no driver configured"));
        };

        if self.use_number_id && !driver.capability().numeric_ids {
            return Err(Error::unsupported_feature(
                "numeric identifiers on a backend without auto-increment",
            ));
        }

        let schema = match self.schema.take() {
            Some(schema) => schema,
            None => Arc::new(self.core.build()?),
        };

        let log = self
            .log
            .take()
            .unwrap_or_else(|| Arc::new(LogContext::new(self.debug_logs.clone())));

        let id_generator = self
            .id_generator
            .take()
            .unwrap_or_else(|| IdStrategy::default().generator());

        tracing::debug!(
            driver = ?driver,
            models = schema.models().len(),
            use_number_id = self.use_number_id,
            "adapter ready"
        );

        Ok(Db {
            shared: Arc::new(Shared {
                schema,
                driver,
                log,
                id_generator,
                value_transform: self.value_transform.take(),
                options: Options {
                    use_number_id: self.use_number_id,
                    disable_id_generation: self.disable_id_generation,
                    default_find_many_limit: self
                        .default_find_many_limit
                        .unwrap_or(DEFAULT_FIND_MANY_LIMIT),
                },
            }),
        })
    }
}
