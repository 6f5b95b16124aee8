use thiserror::Error;

use crate::hub::types::{DepartmentId, ResourceId, TimeOfDay};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Invalid color '{0}', expected #RRGGBB")]
    InvalidColor(String),

    #[error("Invalid time '{0}', expected HH:MM")]
    InvalidTime(String),

    #[error("Availability must start before it ends ({start} - {end})")]
    InvalidAvailability { start: TimeOfDay, end: TimeOfDay },

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid budget '{0}', expected a number")]
    InvalidBudget(String),

    #[error("Budget cannot be negative")]
    NegativeBudget,

    #[error("End date must not be before the start date")]
    EndBeforeStart,

    #[error("{0} is outside the resource's availability")]
    OutsideAvailability(TimeOfDay),

    #[error("End time must be after {0}")]
    EndNotAfterStart(TimeOfDay),

    #[error("No end time is available in this resource's availability window")]
    NoEndTimeAvailable,

    #[error("No resource found with the id '{0}'")]
    UnknownResource(ResourceId),

    #[error("No department found with the id '{0}'")]
    UnknownDepartment(DepartmentId),

    #[error("Cannot delete department with assigned resources ('{name}' has {members})")]
    DepartmentInUse { name: String, members: usize },

    #[error("New password cannot be empty")]
    EmptyPassword,

    #[error("New password and confirmation do not match")]
    PasswordMismatch,

    #[error("No more commands to undo")]
    NothingToUndo,

    #[error("No more commands to redo")]
    NothingToRedo,

    #[error("Failed to read seed data: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse seed data: {0}")]
    Seed(#[from] serde_yaml::Error),

    #[error("Failed to install the log subscriber: {0}")]
    Logging(String),
}
