pub mod config;
pub mod dashboard;
pub mod error;
pub mod hub;
pub mod schedule;
pub mod tracing_config;

pub use dashboard::{Dashboard, View};
pub use error::{Error, Result};
pub use hub::ResourceHub;
