use tracing::{debug, info, warn};

use super::collection::{Collection, Record};
use super::commands::*;
use super::ids::{IdGenerator, IdScheme, SequentialIds, UuidIds};
use super::seed::SeedData;
use super::types::*;
use crate::error::{Error, Result};

/// All dashboard state: one collection per record kind, the signed-in
/// user, and the undo/redo history of every mutation.
#[derive(Debug)]
pub struct ResourceHub {
    departments: Collection<Department>,
    resources: Collection<Resource>,
    bookings: Collection<Booking>,
    projects: Collection<Project>,
    user: User,

    command_history: Vec<CommandRecord>,
    num_commands_applied: usize,
}

impl ResourceHub {
    pub fn new(seed: SeedData, scheme: IdScheme) -> Self {
        let ids = |prefix: &str| -> Box<dyn IdGenerator> {
            match scheme {
                IdScheme::Sequential => Box::new(SequentialIds::with_prefix(prefix)),
                IdScheme::Uuid => Box::new(UuidIds),
            }
        };

        ResourceHub {
            departments: Collection::with_items(seed.departments, ids("dept-")),
            resources: Collection::with_items(seed.resources, ids("")),
            bookings: Collection::with_items(seed.bookings, ids("")),
            projects: Collection::with_items(seed.projects, ids("PROJ")),
            user: seed.user,

            command_history: Vec::new(),
            num_commands_applied: 0,
        }
    }

    pub fn with_sample_data() -> Result<Self> {
        Ok(Self::new(SeedData::sample()?, IdScheme::Sequential))
    }

    pub fn departments(&self) -> &Collection<Department> {
        &self.departments
    }

    pub fn resources(&self) -> &Collection<Resource> {
        &self.resources
    }

    pub fn bookings(&self) -> &Collection<Booking> {
        &self.bookings
    }

    pub fn projects(&self) -> &Collection<Project> {
        &self.projects
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    // Department operations
    pub fn add_department(&mut self, draft: DepartmentDraft) -> DepartmentId {
        let department = Department::from_draft(self.departments.next_id(), draft);
        let id = department.id.clone();
        info!(id = %id, name = %department.name, "Adding department");
        self.append_record(department.into_any());
        id
    }

    pub fn update_department(&mut self, id: &str, patch: DepartmentPatch) -> Option<&Department> {
        let mut department = self.departments.get(id).cloned().or_else(|| {
            debug!(id, "Ignoring update of unknown department");
            None
        })?;
        department.apply(patch);
        info!(id, name = %department.name, "Updating department");
        self.invoke(CommandDetails::Replace {
            record: department.into_any(),
        });
        self.departments.get(id)
    }

    pub fn department_member_count(&self, id: &str) -> usize {
        self.resources
            .iter()
            .filter(|resource| resource.department_id == id)
            .count()
    }

    pub fn department_in_use(&self, id: &str) -> bool {
        self.department_member_count(id) > 0
    }

    /// Refuses while any resource still belongs to the department.
    pub fn delete_department(&mut self, id: &str) -> Result<Option<Department>> {
        let Some(department) = self.departments.get(id).cloned() else {
            debug!(id, "Ignoring delete of unknown department");
            return Ok(None);
        };

        let members = self.department_member_count(id);
        if members > 0 {
            warn!(id, members, "Refusing to delete department with assigned resources");
            return Err(Error::DepartmentInUse {
                name: department.name,
                members,
            });
        }

        info!(id, name = %department.name, "Deleting department");
        self.remove_record(RecordKind::Department, id);
        Ok(Some(department))
    }

    // Resource operations
    pub fn add_resource(&mut self, draft: ResourceDraft) -> Result<ResourceId> {
        self.ensure_department(&draft.department_id)?;

        let resource = Resource::from_draft(self.resources.next_id(), draft);
        let id = resource.id.clone();
        info!(id = %id, name = %resource.name, department = %resource.department_id, "Adding resource");
        self.append_record(resource.into_any());
        Ok(id)
    }

    pub fn update_resource(&mut self, id: &str, patch: ResourcePatch) -> Result<Option<&Resource>> {
        let Some(mut resource) = self.resources.get(id).cloned() else {
            debug!(id, "Ignoring update of unknown resource");
            return Ok(None);
        };
        if let Some(department_id) = &patch.department_id {
            self.ensure_department(department_id)?;
        }
        if let Some(availability) = &patch.availability {
            Availability::new(availability.start, availability.end)?;
        }

        resource.apply(patch);
        info!(id, name = %resource.name, "Updating resource");
        self.invoke(CommandDetails::Replace {
            record: resource.into_any(),
        });
        Ok(self.resources.get(id))
    }

    /// Bookings of the resource stay in place; views only show bookings of
    /// listed resources.
    pub fn delete_resource(&mut self, id: &str) -> Option<Resource> {
        let resource = self.resources.get(id).cloned().or_else(|| {
            debug!(id, "Ignoring delete of unknown resource");
            None
        })?;
        info!(id, name = %resource.name, "Deleting resource");
        self.remove_record(RecordKind::Resource, id);
        Some(resource)
    }

    // Booking operations
    pub fn add_booking(&mut self, draft: BookingDraft) -> Result<BookingId> {
        if !self.resources.contains(&draft.resource_id) {
            warn!(resource = %draft.resource_id, "Rejecting booking for unknown resource");
            return Err(Error::UnknownResource(draft.resource_id));
        }

        let booking = Booking::from_draft(self.bookings.next_id(), draft);
        let id = booking.id.clone();
        info!(
            id = %id,
            resource = %booking.resource_id,
            project = %booking.project_name,
            start = %booking.start_date,
            end = %booking.end_date,
            "Adding booking"
        );
        self.append_record(booking.into_any());
        Ok(id)
    }

    pub fn update_booking(&mut self, id: &str, patch: BookingPatch) -> Result<Option<&Booking>> {
        let Some(mut booking) = self.bookings.get(id).cloned() else {
            debug!(id, "Ignoring update of unknown booking");
            return Ok(None);
        };
        if let Some(resource_id) = &patch.resource_id {
            if !self.resources.contains(resource_id) {
                warn!(id, resource = %resource_id, "Rejecting booking update for unknown resource");
                return Err(Error::UnknownResource(resource_id.clone()));
            }
        }

        booking.apply(patch);
        if booking.end_date < booking.start_date {
            return Err(Error::EndBeforeStart);
        }
        if booking.end_time <= booking.start_time {
            return Err(Error::EndNotAfterStart(booking.start_time));
        }

        info!(id, project = %booking.project_name, "Updating booking");
        self.invoke(CommandDetails::Replace {
            record: booking.into_any(),
        });
        Ok(self.bookings.get(id))
    }

    pub fn delete_booking(&mut self, id: &str) -> Option<Booking> {
        let booking = self.bookings.get(id).cloned().or_else(|| {
            debug!(id, "Ignoring delete of unknown booking");
            None
        })?;
        info!(id, project = %booking.project_name, "Deleting booking");
        self.remove_record(RecordKind::Booking, id);
        Some(booking)
    }

    // Project operations
    pub fn add_project(&mut self, draft: ProjectDraft) -> ProjectId {
        let project = Project::from_draft(self.projects.next_id(), draft);
        let id = project.id.clone();
        info!(id = %id, name = %project.name, client = %project.client_name, "Adding project");
        self.append_record(project.into_any());
        id
    }

    pub fn update_project(&mut self, id: &str, patch: ProjectPatch) -> Option<&Project> {
        let mut project = self.projects.get(id).cloned().or_else(|| {
            debug!(id, "Ignoring update of unknown project");
            None
        })?;
        project.apply(patch);
        info!(id, name = %project.name, status = ?project.status, "Updating project");
        self.invoke(CommandDetails::Replace {
            record: project.into_any(),
        });
        self.projects.get(id)
    }

    pub fn delete_project(&mut self, id: &str) -> Option<Project> {
        let project = self.projects.get(id).cloned().or_else(|| {
            debug!(id, "Ignoring delete of unknown project");
            None
        })?;
        info!(id, name = %project.name, "Deleting project");
        self.remove_record(RecordKind::Project, id);
        Some(project)
    }

    // User operations
    pub fn update_profile(&mut self, patch: UserPatch) -> &User {
        let mut user = self.user.clone();
        if let Some(name) = patch.name {
            user.name = name;
        }
        if let Some(email) = patch.email {
            user.email = email;
        }
        if user != self.user {
            info!(name = %user.name, email = %user.email, "Updating profile");
            self.invoke(CommandDetails::SetProfile { user });
        }
        &self.user
    }

    /// Nothing is stored: the change is checked like the settings form does
    /// and then only logged.
    pub fn change_password(&mut self, change: PasswordChange) -> Result<()> {
        if change.new.is_empty() {
            return Err(Error::EmptyPassword);
        }
        if change.new != change.confirm {
            warn!(user = %self.user.email, "Password confirmation does not match");
            return Err(Error::PasswordMismatch);
        }
        info!(user = %self.user.email, "Password changed");
        Ok(())
    }

    // Command operations
    pub fn can_undo(&self) -> bool {
        self.num_commands_applied > 0
    }

    pub fn can_redo(&self) -> bool {
        self.num_commands_applied < self.command_history.len()
    }

    pub fn undo(&mut self) -> Result<()> {
        if !self.can_undo() {
            return Err(Error::NothingToUndo);
        }
        let command = self.command_history[self.num_commands_applied - 1].undo_command.clone();
        debug!(?command, "Undoing");
        self.execute_command_and_generate_inverse(command);
        self.num_commands_applied -= 1;
        Ok(())
    }

    pub fn redo(&mut self) -> Result<()> {
        if !self.can_redo() {
            return Err(Error::NothingToRedo);
        }
        let command = self.command_history[self.num_commands_applied].redo_command.clone();
        debug!(?command, "Redoing");
        self.execute_command_and_generate_inverse(command);
        self.num_commands_applied += 1;
        Ok(())
    }

    fn ensure_department(&self, id: &str) -> Result<()> {
        if self.departments.contains(id) {
            Ok(())
        } else {
            warn!(department = id, "Unknown department");
            Err(Error::UnknownDepartment(id.to_string()))
        }
    }

    fn append_record(&mut self, record: AnyRecord) {
        let index = match record.kind() {
            RecordKind::Department => self.departments.len(),
            RecordKind::Resource => self.resources.len(),
            RecordKind::Booking => self.bookings.len(),
            RecordKind::Project => self.projects.len(),
        };
        self.invoke(CommandDetails::Insert { index, record });
    }

    fn remove_record(&mut self, kind: RecordKind, id: &str) {
        self.invoke(CommandDetails::Remove {
            kind,
            id: id.to_string(),
        });
    }

    fn invoke(&mut self, details: CommandDetails) {
        let command = Command::now(details);
        let undo_command = self.execute_command_and_generate_inverse(command.clone());
        if matches!(undo_command.details, CommandDetails::NoOp) {
            return;
        }
        self.append_to_command_history(CommandRecord {
            undo_command,
            redo_command: command,
        });
    }

    fn append_to_command_history(&mut self, command_record: CommandRecord) {
        if self.num_commands_applied < self.command_history.len() {
            self.command_history.truncate(self.num_commands_applied);
        }
        self.command_history.push(command_record);
        self.num_commands_applied = self.command_history.len();
    }

    fn execute_command_and_generate_inverse(&mut self, command: Command) -> Command {
        let timestamp = command.timestamp;
        let details = match command.details {
            CommandDetails::NoOp => CommandDetails::NoOp,
            CommandDetails::Insert { index, record } => {
                let kind = record.kind();
                let id = record.id().to_string();
                match record {
                    AnyRecord::Department(department) => self.departments.insert_at(index, department),
                    AnyRecord::Resource(resource) => self.resources.insert_at(index, resource),
                    AnyRecord::Booking(booking) => self.bookings.insert_at(index, booking),
                    AnyRecord::Project(project) => self.projects.insert_at(index, project),
                }
                CommandDetails::Remove { kind, id }
            }
            CommandDetails::Replace { record } => {
                let previous = match record {
                    AnyRecord::Department(department) => self.departments.replace(department).map(Record::into_any),
                    AnyRecord::Resource(resource) => self.resources.replace(resource).map(Record::into_any),
                    AnyRecord::Booking(booking) => self.bookings.replace(booking).map(Record::into_any),
                    AnyRecord::Project(project) => self.projects.replace(project).map(Record::into_any),
                };
                previous
                    .map(|record| CommandDetails::Replace { record })
                    .unwrap_or(CommandDetails::NoOp)
            }
            CommandDetails::Remove { kind, id } => {
                let removed = match kind {
                    RecordKind::Department => take_record(&mut self.departments, &id),
                    RecordKind::Resource => take_record(&mut self.resources, &id),
                    RecordKind::Booking => take_record(&mut self.bookings, &id),
                    RecordKind::Project => take_record(&mut self.projects, &id),
                };
                removed
                    .map(|(index, record)| CommandDetails::Insert { index, record })
                    .unwrap_or(CommandDetails::NoOp)
            }
            CommandDetails::SetProfile { user } => {
                let previous = std::mem::replace(&mut self.user, user);
                CommandDetails::SetProfile { user: previous }
            }
        };
        Command { timestamp, details }
    }
}

fn take_record<T: Record>(collection: &mut Collection<T>, id: &str) -> Option<(usize, AnyRecord)> {
    let index = collection.position(id)?;
    collection.delete(id).map(|record| (index, record.into_any()))
}
