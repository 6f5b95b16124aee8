pub mod collection;
pub mod commands;
pub mod ids;
pub mod seed;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;

pub use collection::{Collection, Record};
pub use ids::{IdGenerator, IdScheme, SequentialIds, UuidIds};
pub use seed::SeedData;
pub use state::ResourceHub;
pub use types::*;
