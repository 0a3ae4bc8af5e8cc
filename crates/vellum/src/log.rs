use serde::Deserialize;

use std::{
    collections::{HashSet, VecDeque},
    fmt,
    sync::{
        atomic::{AtomicU64, Ordering},
        Mutex, MutexGuard, PoisonError,
    },
};

/// Entries kept by a [`LogContext`] before the oldest are dropped.
const DEFAULT_CAPACITY: usize = 1024;

/// Façade operation a trace belongs to. Debug logging is enabled per
/// category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Create,
    FindOne,
    FindMany,
    Update,
    UpdateMany,
    Delete,
    DeleteMany,
    Count,
}

/// Point in a façade call at which a trace entry is recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Arguments as the caller supplied them
    UnsafeInput,

    /// Arguments after name resolution and coercion
    ParsedInput,

    /// Raw driver response
    BackendResult,

    /// Result handed back to the caller
    ParsedResult,
}

/// Which categories emit debug traces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "RawDebugLogs")]
pub enum DebugLogs {
    All,
    #[default]
    None,
    Only(HashSet<Category>),
}

/// Accepts `true`/`false` or a list of categories.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawDebugLogs {
    Flag(bool),
    Categories(Vec<Category>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub tx_id: u64,
    pub model: String,
    pub operation: Category,
    pub stage: Stage,
    pub data: String,
}

/// Transaction counter and debug trace buffer for one [`crate::Db`].
///
/// Both are safe to share across tasks. The buffer is bounded; once full the
/// oldest entry is dropped for every new one.
#[derive(Debug)]
pub struct LogContext {
    next_tx_id: AtomicU64,
    entries: Mutex<VecDeque<LogEntry>>,
    capacity: usize,
    debug: DebugLogs,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Create => "create",
            Category::FindOne => "find_one",
            Category::FindMany => "find_many",
            Category::Update => "update",
            Category::UpdateMany => "update_many",
            Category::Delete => "delete",
            Category::DeleteMany => "delete_many",
            Category::Count => "count",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::UnsafeInput => "unsafe_input",
            Stage::ParsedInput => "parsed_input",
            Stage::BackendResult => "backend_result",
            Stage::ParsedResult => "parsed_result",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl DebugLogs {
    pub fn only(categories: impl IntoIterator<Item = Category>) -> Self {
        DebugLogs::Only(categories.into_iter().collect())
    }

    pub fn is_enabled(&self, category: Category) -> bool {
        match self {
            DebugLogs::All => true,
            DebugLogs::None => false,
            DebugLogs::Only(categories) => categories.contains(&category),
        }
    }
}

impl From<RawDebugLogs> for DebugLogs {
    fn from(raw: RawDebugLogs) -> Self {
        match raw {
            RawDebugLogs::Flag(true) => DebugLogs::All,
            RawDebugLogs::Flag(false) => DebugLogs::None,
            RawDebugLogs::Categories(categories) => DebugLogs::only(categories),
        }
    }
}

impl From<bool> for DebugLogs {
    fn from(enabled: bool) -> Self {
        RawDebugLogs::Flag(enabled).into()
    }
}

impl LogContext {
    pub fn new(debug: DebugLogs) -> Self {
        Self::with_capacity(debug, DEFAULT_CAPACITY)
    }

    pub fn with_capacity(debug: DebugLogs, capacity: usize) -> Self {
        Self {
            next_tx_id: AtomicU64::new(1),
            entries: Mutex::new(VecDeque::new()),
            capacity,
            debug,
        }
    }

    /// Allocates the id of a new façade call. Ids start at 1 and increase
    /// monotonically.
    pub fn next_tx_id(&self) -> u64 {
        self.next_tx_id.fetch_add(1, Ordering::Relaxed)
    }

    pub fn is_enabled(&self, category: Category) -> bool {
        self.debug.is_enabled(category)
    }

    /// Records one trace entry. `data` is only evaluated when `category` is
    /// enabled.
    pub fn record(
        &self,
        tx_id: u64,
        model: &str,
        operation: Category,
        stage: Stage,
        data: impl FnOnce() -> String,
    ) {
        if !self.is_enabled(operation) {
            return;
        }

        let data = data();

        tracing::debug!(
            tx_id,
            model,
            operation = %operation,
            stage = %stage,
            data = %data,
            "adapter trace"
        );

        if self.capacity == 0 {
            return;
        }

        let mut entries = self.lock();
        if entries.len() == self.capacity {
            entries.pop_front();
        }
        entries.push_back(LogEntry {
            tx_id,
            model: model.to_string(),
            operation,
            stage,
            data,
        });
    }

    /// Snapshot of the buffered entries, oldest first.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.lock().iter().cloned().collect()
    }

    /// Drops all buffered entries. The transaction counter keeps counting.
    pub fn reset(&self) {
        self.lock().clear();
    }

    // A panic while holding the lock cannot leave the buffer half-written.
    fn lock(&self) -> MutexGuard<'_, VecDeque<LogEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for LogContext {
    fn default() -> Self {
        Self::new(DebugLogs::None)
    }
}
