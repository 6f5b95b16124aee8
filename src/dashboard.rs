use std::collections::HashSet;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::hub::types::{Department, DepartmentId, Resource};
use crate::hub::ResourceHub;
use crate::schedule::calendar::{format_date_range, shift_anchor, CalendarWindow, Direction, ScheduleView};

pub const DEPARTMENT_IN_USE_MESSAGE: &str = "Cannot delete department with assigned resources";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum View {
    #[default]
    Schedule,
    Resources,
    Projects,
    Settings,
}

impl View {
    pub const ALL: [View; 4] = [View::Schedule, View::Resources, View::Projects, View::Settings];

    pub fn label(&self) -> &'static str {
        match self {
            View::Schedule => "Schedule",
            View::Resources => "Resources",
            View::Projects => "Projects",
            View::Settings => "Settings",
        }
    }
}

/// A delete waiting for the user to confirm it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingDelete {
    Department { id: String, name: String },
    Resource { id: String, name: String },
    Project { id: String, name: String },
}

impl PendingDelete {
    pub fn title(&self) -> &'static str {
        match self {
            PendingDelete::Department { .. } => "Delete Department",
            PendingDelete::Resource { .. } => "Delete Resource",
            PendingDelete::Project { .. } => "Delete Project",
        }
    }

    pub fn message(&self) -> String {
        let name = match self {
            PendingDelete::Department { name, .. }
            | PendingDelete::Resource { name, .. }
            | PendingDelete::Project { name, .. } => name,
        };
        format!("Are you sure you want to delete \"{name}\"? This action cannot be undone.")
    }
}

/// A department and its members, as listed in the schedule sidebar.
#[derive(Debug, Clone, PartialEq)]
pub struct DepartmentGroup<'a> {
    pub department: &'a Department,
    pub resources: Vec<&'a Resource>,
    pub expanded: bool,
}

/// Which page is shown and the transient UI state around it.
#[derive(Debug, Clone)]
pub struct Dashboard {
    view: View,
    anchor: NaiveDate,
    schedule_view: ScheduleView,
    collapsed_departments: HashSet<DepartmentId>,
    pending_delete: Option<PendingDelete>,
    notification: Option<String>,
}

impl Dashboard {
    pub fn new(anchor: NaiveDate, view: View, schedule_view: ScheduleView) -> Self {
        Dashboard {
            view,
            anchor,
            schedule_view,
            collapsed_departments: HashSet::new(),
            pending_delete: None,
            notification: None,
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn switch_to(&mut self, view: View) {
        if self.view != view {
            debug!(from = ?self.view, to = ?view, "Switching view");
            self.view = view;
        }
    }

    // Schedule
    pub fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    pub fn schedule_view(&self) -> ScheduleView {
        self.schedule_view
    }

    pub fn set_schedule_view(&mut self, schedule_view: ScheduleView) {
        self.schedule_view = schedule_view;
    }

    pub fn previous(&mut self) {
        self.anchor = shift_anchor(self.anchor, self.schedule_view, Direction::Previous);
        debug!(anchor = %self.anchor, "Moved schedule back");
    }

    pub fn next(&mut self) {
        self.anchor = shift_anchor(self.anchor, self.schedule_view, Direction::Next);
        debug!(anchor = %self.anchor, "Moved schedule forward");
    }

    pub fn date_range_label(&self) -> String {
        format_date_range(self.anchor, self.schedule_view)
    }

    pub fn calendar_window(&self) -> CalendarWindow {
        CalendarWindow::new(self.anchor, self.schedule_view)
    }

    // Sidebar
    pub fn is_expanded(&self, department_id: &str) -> bool {
        !self.collapsed_departments.contains(department_id)
    }

    pub fn toggle_department(&mut self, department_id: &str) {
        if !self.collapsed_departments.remove(department_id) {
            self.collapsed_departments.insert(department_id.to_string());
        }
    }

    pub fn resources_by_department<'a>(&self, hub: &'a ResourceHub) -> Vec<DepartmentGroup<'a>> {
        hub.departments()
            .iter()
            .map(|department| DepartmentGroup {
                department,
                resources: hub
                    .resources()
                    .iter()
                    .filter(|resource| resource.department_id == department.id)
                    .collect(),
                expanded: self.is_expanded(&department.id),
            })
            .collect()
    }

    // Deletes
    pub fn request_delete_department(&mut self, hub: &ResourceHub, id: &str) {
        let Some(department) = hub.departments().get(id) else {
            return;
        };
        if hub.department_in_use(id) {
            warn!(id, "Blocked delete of department with assigned resources");
            self.notify(DEPARTMENT_IN_USE_MESSAGE);
            return;
        }
        self.pending_delete = Some(PendingDelete::Department {
            id: department.id.clone(),
            name: department.name.clone(),
        });
    }

    pub fn request_delete_resource(&mut self, hub: &ResourceHub, id: &str) {
        if let Some(resource) = hub.resources().get(id) {
            self.pending_delete = Some(PendingDelete::Resource {
                id: resource.id.clone(),
                name: resource.name.clone(),
            });
        }
    }

    pub fn request_delete_project(&mut self, hub: &ResourceHub, id: &str) {
        if let Some(project) = hub.projects().get(id) {
            self.pending_delete = Some(PendingDelete::Project {
                id: project.id.clone(),
                name: project.name.clone(),
            });
        }
    }

    pub fn pending_delete(&self) -> Option<&PendingDelete> {
        self.pending_delete.as_ref()
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Carries out the staged delete. A refusal from the hub becomes the
    /// notification as well as the returned error.
    pub fn confirm_delete(&mut self, hub: &mut ResourceHub) -> Result<()> {
        let Some(pending) = self.pending_delete.take() else {
            return Ok(());
        };
        info!(?pending, "Confirmed delete");
        match pending {
            PendingDelete::Department { id, .. } => {
                if let Err(err) = hub.delete_department(&id) {
                    self.notify(err.to_string());
                    return Err(err);
                }
                self.collapsed_departments.remove(&id);
            }
            PendingDelete::Resource { id, .. } => {
                hub.delete_resource(&id);
            }
            PendingDelete::Project { id, .. } => {
                hub.delete_project(&id);
            }
        }
        Ok(())
    }

    // Notifications
    pub fn notify(&mut self, message: impl Into<String>) {
        self.notification = Some(message.into());
    }

    pub fn notification(&self) -> Option<&str> {
        self.notification.as_deref()
    }

    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(text: &str) -> NaiveDate {
        NaiveDate::parse_from_str(text, "%Y-%m-%d").unwrap()
    }

    fn setup() -> (Dashboard, ResourceHub) {
        let dashboard = Dashboard::new(date("2024-03-18"), View::Schedule, ScheduleView::Week);
        let hub = ResourceHub::with_sample_data().unwrap();
        (dashboard, hub)
    }

    #[test]
    fn test_switch_view() {
        let (mut dashboard, _) = setup();
        assert_eq!(dashboard.view(), View::Schedule);
        dashboard.switch_to(View::Projects);
        assert_eq!(dashboard.view(), View::Projects);
    }

    #[test]
    fn test_navigation_follows_schedule_view() {
        let (mut dashboard, _) = setup();
        assert_eq!(dashboard.date_range_label(), "18 - 24 March 2024");

        dashboard.next();
        assert_eq!(dashboard.anchor(), date("2024-03-25"));
        assert_eq!(dashboard.date_range_label(), "25 - 31 March 2024");

        dashboard.set_schedule_view(ScheduleView::Day);
        dashboard.previous();
        assert_eq!(dashboard.anchor(), date("2024-03-24"));
        assert_eq!(dashboard.date_range_label(), "Sunday, March 24, 2024");
        assert_eq!(dashboard.calendar_window().num_days, 1);
    }

    #[test]
    fn test_resources_grouped_by_department() {
        let (mut dashboard, hub) = setup();
        let groups = dashboard.resources_by_department(&hub);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].department.id, "dev");
        let names: Vec<&str> = groups[0].resources.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["John Doe", "Mike Johnson"]);
        assert!(groups.iter().all(|group| group.expanded));

        dashboard.toggle_department("dev");
        assert!(!dashboard.resources_by_department(&hub)[0].expanded);
        dashboard.toggle_department("dev");
        assert!(dashboard.is_expanded("dev"));
    }

    #[test]
    fn test_department_in_use_is_blocked() {
        let (mut dashboard, hub) = setup();
        dashboard.request_delete_department(&hub, "dev");

        assert_eq!(dashboard.notification(), Some(DEPARTMENT_IN_USE_MESSAGE));
        assert!(dashboard.pending_delete().is_none());
        assert!(hub.departments().contains("dev"));

        dashboard.dismiss_notification();
        assert!(dashboard.notification().is_none());
    }

    #[test]
    fn test_department_delete_after_reassigning_members() {
        let (mut dashboard, mut hub) = setup();
        for id in ["1", "3"] {
            hub.delete_resource(id);
        }

        dashboard.request_delete_department(&hub, "dev");
        let pending = dashboard.pending_delete().cloned().unwrap();
        assert_eq!(pending.title(), "Delete Department");
        assert_eq!(
            pending.message(),
            "Are you sure you want to delete \"Development\"? This action cannot be undone."
        );

        dashboard.confirm_delete(&mut hub).unwrap();
        assert!(!hub.departments().contains("dev"));
        assert!(dashboard.pending_delete().is_none());
    }

    #[test]
    fn test_cancel_delete_keeps_record() {
        let (mut dashboard, mut hub) = setup();
        dashboard.request_delete_project(&hub, "PROJ1");
        dashboard.cancel_delete();
        dashboard.confirm_delete(&mut hub).unwrap();
        assert!(hub.projects().contains("PROJ1"));

        dashboard.request_delete_resource(&hub, "2");
        dashboard.confirm_delete(&mut hub).unwrap();
        assert!(!hub.resources().contains("2"));
    }
}
