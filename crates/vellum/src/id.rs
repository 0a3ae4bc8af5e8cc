use rand::{distributions::Alphanumeric, Rng};
use serde::Deserialize;

/// Produces identifiers for newly created records.
///
/// Implementations are called concurrently and must never hand out the same
/// value twice. Not used when identifiers are numeric, since the backend
/// assigns them.
pub trait IdGenerator: Send + Sync + 'static {
    fn generate(&self, model: &str) -> String;
}

/// Built-in generators, selectable from configuration.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdStrategy {
    #[default]
    Random,
    Uuid,
}

/// Random alphanumeric strings. The default generator.
#[derive(Debug, Clone, Copy)]
pub struct RandomId {
    len: usize,
}

/// Random (v4) UUIDs in hyphenated form.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidV4;

impl RandomId {
    pub fn new(len: usize) -> Self {
        Self { len }
    }
}

impl Default for RandomId {
    fn default() -> Self {
        Self::new(32)
    }
}

impl IdGenerator for RandomId {
    fn generate(&self, _model: &str) -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(self.len)
            .map(char::from)
            .collect()
    }
}

impl IdGenerator for UuidV4 {
    fn generate(&self, _model: &str) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

impl<F> IdGenerator for F
where
    F: Fn(&str) -> String + Send + Sync + 'static,
{
    fn generate(&self, model: &str) -> String {
        self(model)
    }
}

impl IdStrategy {
    pub fn generator(self) -> Box<dyn IdGenerator> {
        match self {
            IdStrategy::Random => Box::new(RandomId::default()),
            IdStrategy::Uuid => Box::new(UuidV4),
        }
    }
}
