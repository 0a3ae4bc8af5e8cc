mod coerce;
use coerce::Coercion;

pub mod config;
pub use config::Config;

pub mod db;
pub use db::{Db, Query};

mod filter;

pub mod hooks;
pub use hooks::{Hook, HookResult, Hooked, Hooks, Outcome, Phase};

pub mod id;
pub use id::{IdGenerator, IdStrategy};

pub mod log;
pub use log::{Category, DebugLogs, LogContext, LogEntry, Stage};

mod macros;

pub mod migrate;
pub use migrate::Migrator;

mod transform;
pub use transform::{Action, TransformContext, ValueTransform};

pub use vellum_core::{
    driver::{self, Capability, Driver},
    schema::{
        self,
        app::{DefaultValue, Field, FieldType, Model, OnDelete},
        Schema,
    },
    stmt::{Connector, Direction, Filter, Op, Record, SortBy, Value},
    Error, Result,
};

