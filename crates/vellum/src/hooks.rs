//! Write hooks for the layer that calls the adapter.
//!
//! [`Db`] never runs hooks itself. Callers that want before/after behavior
//! register [`Hook`]s in a [`Hooks`] set and write through [`Hooked`].

use crate::{Db, Filter, Record, Result};

use std::{collections::HashMap, sync::Arc};

/// Decision returned by a before-hook.
#[derive(Debug, Clone, PartialEq)]
pub enum HookResult {
    /// Continue with this (possibly rewritten) payload.
    Proceed(Record),

    /// Cancel the write. Nothing is sent to the store.
    Abort,
}

/// Write phase a hook is registered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Create,
    Update,
}

#[derive(Debug, Clone, Copy)]
pub struct HookContext<'a> {
    /// Declared model name, after alias resolution
    pub model: &'a str,
    pub phase: Phase,
}

pub trait Hook: Send + Sync + 'static {
    fn before(&self, data: Record, cx: &HookContext<'_>) -> Result<HookResult> {
        let _ = cx;
        Ok(HookResult::Proceed(data))
    }

    fn after(&self, result: &Record, cx: &HookContext<'_>) -> Result<()> {
        let _ = (result, cx);
        Ok(())
    }
}

/// Hooks keyed by model and phase, run in registration order.
#[derive(Default, Clone)]
pub struct Hooks {
    hooks: HashMap<(String, Phase), Vec<Arc<dyn Hook>>>,
}

/// Result of a hooked write.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Done(T),

    /// A before-hook aborted the write.
    Skipped,
}

/// A [`Db`] handle that runs hooks around writes.
#[derive(Clone, Copy)]
pub struct Hooked<'a> {
    db: &'a Db,
    hooks: &'a Hooks,
}

impl Hooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        model: impl Into<String>,
        phase: Phase,
        hook: impl Hook,
    ) -> &mut Self {
        self.hooks
            .entry((model.into(), phase))
            .or_default()
            .push(Arc::new(hook));
        self
    }

    fn get(&self, model: &str, phase: Phase) -> &[Arc<dyn Hook>] {
        self.hooks
            .get(&(model.to_string(), phase))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Runs before-hooks in order, threading the payload through each.
    fn before(&self, model: &str, phase: Phase, mut data: Record) -> Result<Option<Record>> {
        let cx = HookContext { model, phase };

        for hook in self.get(model, phase) {
            match hook.before(data, &cx)? {
                HookResult::Proceed(next) => data = next,
                HookResult::Abort => {
                    tracing::debug!(model, ?phase, "write aborted by hook");
                    return Ok(None);
                }
            }
        }

        Ok(Some(data))
    }

    fn after(&self, model: &str, phase: Phase, result: &Record) -> Result<()> {
        let cx = HookContext { model, phase };

        for hook in self.get(model, phase) {
            hook.after(result, &cx)?;
        }

        Ok(())
    }
}

impl<'a> Hooked<'a> {
    pub fn new(db: &'a Db, hooks: &'a Hooks) -> Self {
        Self { db, hooks }
    }

    pub async fn create(&self, model: &str, data: Record) -> Result<Outcome<Record>> {
        let model = self.canonical(model)?;
        let Some(data) = self.hooks.before(model, Phase::Create, data)? else {
            return Ok(Outcome::Skipped);
        };

        let created = self.db.create(model, data).await?;
        self.hooks.after(model, Phase::Create, &created)?;
        Ok(Outcome::Done(created))
    }

    pub async fn update(
        &self,
        model: &str,
        filter: &[Filter],
        data: Record,
    ) -> Result<Outcome<Option<Record>>> {
        let model = self.canonical(model)?;
        let Some(data) = self.hooks.before(model, Phase::Update, data)? else {
            return Ok(Outcome::Skipped);
        };

        let updated = self.db.update(model, filter, data).await?;
        if let Some(record) = &updated {
            self.hooks.after(model, Phase::Update, record)?;
        }
        Ok(Outcome::Done(updated))
    }

    /// Before-hooks see the shared payload once. After-hooks do not run,
    /// since no records are returned.
    pub async fn update_many(
        &self,
        model: &str,
        filter: &[Filter],
        data: Record,
    ) -> Result<Outcome<u64>> {
        let model = self.canonical(model)?;
        let Some(data) = self.hooks.before(model, Phase::Update, data)? else {
            return Ok(Outcome::Skipped);
        };

        Ok(Outcome::Done(self.db.update_many(model, filter, data).await?))
    }

    /// Hooks are registered under the declared model name; callers may use
    /// any alias the schema accepts.
    fn canonical(&self, model: &str) -> Result<&'a str> {
        let db: &'a Db = self.db;
        Ok(&db.schema().resolve_model(model)?.name)
    }
}

impl<T> Outcome<T> {
    pub fn is_skipped(&self) -> bool {
        matches!(self, Outcome::Skipped)
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Outcome::Done(value) => Some(value),
            Outcome::Skipped => None,
        }
    }
}

impl<F> Hook for F
where
    F: Fn(Record, &HookContext<'_>) -> Result<HookResult> + Send + Sync + 'static,
{
    fn before(&self, data: Record, cx: &HookContext<'_>) -> Result<HookResult> {
        self(data, cx)
    }
}
