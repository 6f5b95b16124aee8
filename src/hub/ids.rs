use std::fmt::Debug;

use uuid::Uuid;

/// Which [`IdGenerator`] a hub hands to its collections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum IdScheme {
    #[default]
    Sequential,
    Uuid,
}

/// Source of candidate identifiers. Collections keep drawing until the
/// candidate is not already in use, so a generator only has to avoid
/// repeating itself.
pub trait IdGenerator: Debug {
    fn next_id(&mut self) -> String;
}

/// Monotonic counter, optionally prefixed: `1`, `2`, ... or `PROJ1`, `PROJ2`, ...
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::with_prefix("")
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        SequentialIds {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> String {
        let id = format!("{}{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}
