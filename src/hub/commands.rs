use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::types::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    Department,
    Resource,
    Booking,
    Project,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AnyRecord {
    Department(Department),
    Resource(Resource),
    Booking(Booking),
    Project(Project),
}

impl AnyRecord {
    pub fn kind(&self) -> RecordKind {
        match self {
            AnyRecord::Department(_) => RecordKind::Department,
            AnyRecord::Resource(_) => RecordKind::Resource,
            AnyRecord::Booking(_) => RecordKind::Booking,
            AnyRecord::Project(_) => RecordKind::Project,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            AnyRecord::Department(department) => &department.id,
            AnyRecord::Resource(resource) => &resource.id,
            AnyRecord::Booking(booking) => &booking.id,
            AnyRecord::Project(project) => &project.id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Command {
    pub timestamp: DateTime<Utc>,
    pub details: CommandDetails,
}

impl Command {
    pub fn now(details: CommandDetails) -> Self {
        Command {
            timestamp: Utc::now(),
            details,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CommandDetails {
    NoOp,
    Insert {
        index: usize,
        record: AnyRecord,
    },
    Replace {
        record: AnyRecord,
    },
    Remove {
        kind: RecordKind,
        id: String,
    },
    SetProfile {
        user: User,
    },
}

#[derive(Debug, Clone)]
pub(crate) struct CommandRecord {
    pub(crate) undo_command: Command,
    pub(crate) redo_command: Command,
}
