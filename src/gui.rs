use chrono::{Local, NaiveDate};
use imgui::{Condition, TableBgTarget, TableColumnFlags, TableColumnSetup, TableFlags, Ui};

use resourcehub::hub::{
    parse_budget, parse_date, parse_optional_date, BookingDraft, DepartmentDraft, DepartmentPatch, HexColor,
    PasswordChange, ProjectDraft, ProjectPatch, ProjectStatus, Resource, ResourceDraft, TimeOfDay, UserPatch,
    DATE_FORMAT,
};
use resourcehub::schedule::{
    bookings_on, format_time, generate_color, generate_time_slots, BookingForm, ScheduleView,
};
use resourcehub::{Dashboard, ResourceHub, Result, View};

use crate::support;

const BOOKING_POPUP: &str = "New Booking";
const DEPARTMENT_POPUP: &str = "Department";
const RESOURCE_POPUP: &str = "New Resource";
const PROJECT_POPUP: &str = "Project";
const CONFIRM_POPUP: &str = "Confirm";
const NOTICE_POPUP: &str = "Notice";

const DAY_COLUMN_WIDTH: f32 = 150.0;

struct BookingModal {
    form: BookingForm,
    start_date: String,
    end_date: String,
}

impl BookingModal {
    fn new(hub: &ResourceHub, today: NaiveDate) -> Self {
        BookingModal {
            form: BookingForm::new(hub.resources().items(), today),
            start_date: today.format(DATE_FORMAT).to_string(),
            end_date: today.format(DATE_FORMAT).to_string(),
        }
    }

    /// The dates are read from the text fields only now, so the booking
    /// carries exactly what the user sees.
    fn submit(&mut self, resource: Option<&Resource>) -> Result<BookingDraft> {
        self.form.start_date = parse_date(&self.start_date)?;
        self.form.end_date = parse_date(&self.end_date)?;
        self.form.submit(resource, generate_color())
    }
}

#[derive(Default)]
struct DepartmentModal {
    editing: Option<String>,
    name: String,
    color: String,
    description: String,
}

impl DepartmentModal {
    fn create() -> Self {
        DepartmentModal {
            color: generate_color().as_str().to_string(),
            ..Default::default()
        }
    }

    fn draft(&self) -> Result<DepartmentDraft> {
        DepartmentDraft::new(self.name.trim(), self.color.trim(), Some(self.description.clone()))
    }
}

struct ResourceModal {
    name: String,
    role: String,
    department: usize,
    avatar: String,
    start: usize,
    end: usize,
}

impl ResourceModal {
    fn new(slots: &[TimeOfDay]) -> Self {
        let index_of = |hour| {
            slots
                .iter()
                .position(|slot| slot.hour() == hour && slot.minute() == 0)
                .unwrap_or(0)
        };
        ResourceModal {
            name: String::new(),
            role: String::new(),
            department: 0,
            avatar: String::new(),
            start: index_of(9),
            end: index_of(17),
        }
    }
}

#[derive(Default)]
struct ProjectModal {
    editing: Option<String>,
    name: String,
    color: String,
    client_name: String,
    start_date: String,
    end_date: String,
    billable: bool,
    activity_types: String,
    description: String,
    budget: String,
    status: usize,
}

impl ProjectModal {
    fn create() -> Self {
        ProjectModal {
            color: generate_color().as_str().to_string(),
            billable: true,
            ..Default::default()
        }
    }

    fn draft(&self) -> Result<ProjectDraft> {
        let start_date = parse_optional_date(&self.start_date)?;
        let end_date = parse_optional_date(&self.end_date)?;
        let budget = parse_budget(&self.budget)?;
        Ok(ProjectDraft::new(self.name.trim(), self.color.trim(), self.client_name.trim())?
            .dates(start_date, end_date)?
            .budget(budget)?
            .billable(self.billable)
            .activity_types(self.activity_types.split(',').map(str::trim))
            .description(Some(self.description.clone()))
            .status(ProjectStatus::ALL[self.status.min(ProjectStatus::ALL.len() - 1)]))
    }
}

#[derive(Default)]
struct SettingsForm {
    name: String,
    email: String,
    password: PasswordChange,
}

pub struct Gui {
    hub: ResourceHub,
    dashboard: Dashboard,
    slots: Vec<TimeOfDay>,
    booking_modal: Option<BookingModal>,
    department_modal: Option<DepartmentModal>,
    resource_modal: Option<ResourceModal>,
    project_modal: Option<ProjectModal>,
    settings: SettingsForm,
}

impl Gui {
    pub fn new(hub: ResourceHub, dashboard: Dashboard) -> Self {
        let settings = SettingsForm {
            name: hub.user().name.clone(),
            email: hub.user().email.clone(),
            password: PasswordChange::default(),
        };
        Gui {
            hub,
            dashboard,
            slots: generate_time_slots(),
            booking_modal: None,
            department_modal: None,
            resource_modal: None,
            project_modal: None,
            settings,
        }
    }

    pub fn run(mut self) -> std::result::Result<(), Box<dyn std::error::Error>> {
        support::simple_init(file!(), move |_, ui| {
            unsafe {
                imgui::sys::igStyleColorsLight(std::ptr::null_mut());
            }

            let display_size = ui.io().display_size;

            if let Some(window) = ui
                .window("ResourceHub")
                .position([0.0, 0.0], Condition::Always)
                .size(display_size, Condition::Always)
                .title_bar(false)
                .resizable(false)
                .movable(false)
                .scroll_bar(false)
                .collapsible(false)
                .bring_to_front_on_focus(false)
                .menu_bar(true)
                .begin()
            {
                self.draw(ui);
                window.end();
            }
        })
    }

    fn draw(&mut self, ui: &Ui) {
        self.draw_menu_bar(ui);
        self.draw_sidebar(ui);
        ui.same_line();
        ui.child_window("##content").build(|| match self.dashboard.view() {
            View::Schedule => self.draw_schedule(ui),
            View::Resources => self.draw_resources(ui),
            View::Projects => self.draw_projects(ui),
            View::Settings => self.draw_settings(ui),
        });

        self.draw_booking_modal(ui);
        self.draw_department_modal(ui);
        self.draw_resource_modal(ui);
        self.draw_project_modal(ui);
        self.draw_confirm_modal(ui);
        self.draw_notice_modal(ui);
    }

    fn draw_menu_bar(&mut self, ui: &Ui) {
        ui.menu_bar(|| {
            ui.menu("Edit", || {
                if ui.menu_item_config("Undo").enabled(self.hub.can_undo()).build() {
                    if let Err(err) = self.hub.undo() {
                        self.dashboard.notify(err.to_string());
                    }
                }
                if ui.menu_item_config("Redo").enabled(self.hub.can_redo()).build() {
                    if let Err(err) = self.hub.redo() {
                        self.dashboard.notify(err.to_string());
                    }
                }
            });
            ui.menu("View", || {
                for view in View::ALL {
                    if ui.menu_item_config(view.label()).selected(self.dashboard.view() == view).build() {
                        self.dashboard.switch_to(view);
                    }
                }
            });
        });
    }

    fn draw_sidebar(&mut self, ui: &Ui) {
        ui.child_window("##sidebar").size([160.0, 0.0]).border(true).build(|| {
            ui.text("ResourceHub");
            ui.separator();
            for view in View::ALL {
                if ui
                    .selectable_config(view.label())
                    .selected(self.dashboard.view() == view)
                    .build()
                {
                    self.dashboard.switch_to(view);
                }
            }
            ui.separator();
            ui.text_disabled(&self.hub.user().name);
            ui.text_disabled(&self.hub.user().email);
        });
    }

    // Schedule

    fn draw_schedule(&mut self, ui: &Ui) {
        if ui.arrow_button("##previous", imgui::Direction::Left) {
            self.dashboard.previous();
        }
        ui.same_line();
        if ui.arrow_button("##next", imgui::Direction::Right) {
            self.dashboard.next();
        }
        ui.same_line();
        ui.text(self.dashboard.date_range_label());
        ui.same_line();
        for view in [ScheduleView::Week, ScheduleView::Day] {
            if ui.radio_button_bool(view.label(), self.dashboard.schedule_view() == view) {
                self.dashboard.set_schedule_view(view);
            }
            ui.same_line();
        }
        if ui.button("Add Booking") {
            self.booking_modal = Some(BookingModal::new(&self.hub, Local::now().date_naive()));
        }
        ui.separator();
        self.draw_timeline(ui);
    }

    fn draw_timeline(&mut self, ui: &Ui) {
        let window = self.dashboard.calendar_window();
        let flags = TableFlags::BORDERS
            | TableFlags::ROW_BG
            | TableFlags::SIZING_FIXED_FIT
            | TableFlags::SCROLL_X
            | TableFlags::SCROLL_Y;

        let mut toggled = None;
        let mut removed = None;

        if let Some(_table) = ui.begin_table_with_flags("##timeline", window.num_days + 1, flags) {
            let mut first = TableColumnSetup::new("Resources");
            first.flags = TableColumnFlags::NO_HIDE | TableColumnFlags::NO_REORDER;
            ui.table_setup_column_with(first);
            for day in window.days() {
                let mut column = TableColumnSetup::new(day.format("%a %m/%d").to_string());
                column.flags = TableColumnFlags::WIDTH_FIXED;
                column.init_width_or_weight = DAY_COLUMN_WIDTH;
                ui.table_setup_column_with(column);
            }
            ui.table_setup_scroll_freeze(1, 1);
            ui.table_headers_row();

            let today = Local::now().date_naive();
            let bookings = self.hub.bookings().items();
            for group in self.dashboard.resources_by_department(&self.hub) {
                ui.table_next_row();
                ui.table_next_column();
                let arrow = if group.expanded { "v" } else { ">" };
                let header = format!(
                    "{arrow} {} ({})##{}",
                    group.department.name,
                    group.resources.len(),
                    group.department.id
                );
                ui.table_set_bg_color(TableBgTarget::CELL_BG, rgba(&group.department.color, 0.25));
                if ui.selectable(header) {
                    toggled = Some(group.department.id.clone());
                }
                if !group.expanded {
                    continue;
                }

                for resource in group.resources {
                    ui.table_next_row();
                    ui.table_next_column();
                    ui.text(format!("{}  {}", resource.initial(), resource.name));
                    ui.text_disabled(&resource.role);

                    for (offset, day) in window.days().enumerate() {
                        ui.table_next_column();
                        if day == today {
                            ui.table_set_bg_color_with_column(TableBgTarget::CELL_BG, [1.0, 0.75, 0.8, 0.4], offset + 1);
                        }
                        for booking in bookings_on(bookings, &resource.id, day) {
                            let _id = ui.push_id(format!("{}-{}", booking.id, offset));
                            ui.text_colored(rgba(&booking.color, 1.0), &booking.project_name);
                            ui.text_disabled(format!(
                                "{} - {}",
                                booking.start_time.to_12_hour(),
                                booking.end_time.to_12_hour()
                            ));
                            ui.same_line();
                            if ui.small_button("x") {
                                removed = Some(booking.id.clone());
                            }
                        }
                    }
                }
            }
        }

        if let Some(id) = toggled {
            self.dashboard.toggle_department(&id);
        }
        if let Some(id) = removed {
            self.hub.delete_booking(&id);
        }
    }

    fn draw_booking_modal(&mut self, ui: &Ui) {
        if self.booking_modal.is_none() {
            return;
        }
        ui.open_popup(BOOKING_POPUP);

        let mut submitted = None;
        let mut cancelled = false;
        ui.modal_popup(BOOKING_POPUP, || {
            let Some(modal) = self.booking_modal.as_mut() else {
                return;
            };
            let resources = self.hub.resources().items();

            let labels: Vec<String> = resources
                .iter()
                .map(|resource| format!("{} ({})", resource.name, resource.role))
                .collect();
            let mut selected = resources
                .iter()
                .position(|resource| resource.id == modal.form.resource_id)
                .unwrap_or(0);
            if !labels.is_empty() && ui.combo_simple_string("Resource", &mut selected, &labels) {
                modal.form.select_resource(&resources[selected]);
            }
            let resource = resources.iter().find(|resource| resource.id == modal.form.resource_id);

            ui.input_text("Project Name", &mut modal.form.project_name).build();

            ui.input_text("Start Date", &mut modal.start_date).hint("YYYY-MM-DD").build();
            ui.input_text("End Date", &mut modal.end_date).hint("YYYY-MM-DD").build();

            let starts = modal.form.start_options(resource);
            if let Some(mut index) = time_combo(ui, "Start Time", &starts, modal.form.start_time) {
                index = index.min(starts.len() - 1);
                modal.form.set_start_time(starts[index], resource);
            }
            let ends = modal.form.end_options(resource);
            if ends.is_empty() {
                ui.text_disabled("No end time available for this start time");
            } else if let Some(index) = time_combo(ui, "End Time", &ends, modal.form.end_time) {
                modal.form.end_time = ends[index.min(ends.len() - 1)];
            }

            ui.separator();
            let can_submit = modal.form.can_submit(resource);
            ui.disabled(!can_submit, || {
                if ui.button("Create Booking") {
                    submitted = Some(modal.submit(resource));
                    ui.close_current_popup();
                }
            });
            ui.same_line();
            if ui.button("Cancel") {
                cancelled = true;
                ui.close_current_popup();
            }
        });

        if let Some(result) = submitted {
            self.booking_modal = None;
            if let Err(err) = result.and_then(|draft| self.hub.add_booking(draft)) {
                self.dashboard.notify(err.to_string());
            }
        } else if cancelled {
            self.booking_modal = None;
        }
    }

    // Resources

    fn draw_resources(&mut self, ui: &Ui) {
        ui.text("Departments");
        ui.same_line();
        if ui.button("Add Department") {
            self.department_modal = Some(DepartmentModal::create());
        }

        let mut edit = None;
        let mut delete = None;
        if let Some(_table) = ui.begin_table_with_flags("##departments", 4, TableFlags::BORDERS | TableFlags::ROW_BG) {
            ui.table_setup_column("Name");
            ui.table_setup_column("Description");
            ui.table_setup_column("Members");
            ui.table_setup_column("##actions");
            ui.table_headers_row();

            for department in self.hub.departments() {
                let _id = ui.push_id(department.id.as_str());
                ui.table_next_row();
                ui.table_next_column();
                ui.color_button("##swatch", rgba(&department.color, 1.0));
                ui.same_line();
                ui.text(&department.name);
                ui.table_next_column();
                ui.text_wrapped(department.description.as_deref().unwrap_or(""));
                ui.table_next_column();
                ui.text(self.hub.department_member_count(&department.id).to_string());
                ui.table_next_column();
                if ui.small_button("Edit") {
                    edit = Some(DepartmentModal {
                        editing: Some(department.id.clone()),
                        name: department.name.clone(),
                        color: department.color.as_str().to_string(),
                        description: department.description.clone().unwrap_or_default(),
                    });
                }
                ui.same_line();
                if ui.small_button("Delete") {
                    delete = Some(department.id.clone());
                }
            }
        }
        if edit.is_some() {
            self.department_modal = edit;
        }
        if let Some(id) = delete {
            self.dashboard.request_delete_department(&self.hub, &id);
        }

        ui.spacing();
        ui.separator();
        ui.text("Resources");
        ui.same_line();
        ui.disabled(self.hub.departments().is_empty(), || {
            if ui.button("Add Resource") {
                self.resource_modal = Some(ResourceModal::new(&self.slots));
            }
        });

        let mut delete = None;
        if let Some(_table) = ui.begin_table_with_flags("##resources", 5, TableFlags::BORDERS | TableFlags::ROW_BG) {
            ui.table_setup_column("Name");
            ui.table_setup_column("Role");
            ui.table_setup_column("Department");
            ui.table_setup_column("Availability");
            ui.table_setup_column("##actions");
            ui.table_headers_row();

            for resource in self.hub.resources() {
                let _id = ui.push_id(resource.id.as_str());
                ui.table_next_row();
                ui.table_next_column();
                ui.text(format!("{}  {}", resource.initial(), resource.name));
                ui.table_next_column();
                ui.text(&resource.role);
                ui.table_next_column();
                match self.hub.departments().get(&resource.department_id) {
                    Some(department) => ui.text_colored(rgba(&department.color, 1.0), &department.name),
                    None => ui.text_disabled(&resource.department_id),
                }
                ui.table_next_column();
                ui.text(format!(
                    "{} - {}",
                    format_time(&resource.availability.start.to_string()),
                    format_time(&resource.availability.end.to_string())
                ));
                ui.table_next_column();
                if ui.small_button("Delete") {
                    delete = Some(resource.id.clone());
                }
            }
        }
        if let Some(id) = delete {
            self.dashboard.request_delete_resource(&self.hub, &id);
        }
    }

    fn draw_department_modal(&mut self, ui: &Ui) {
        if self.department_modal.is_none() {
            return;
        }
        ui.open_popup(DEPARTMENT_POPUP);

        let mut saved = None;
        let mut cancelled = false;
        ui.modal_popup(DEPARTMENT_POPUP, || {
            let Some(modal) = self.department_modal.as_mut() else {
                return;
            };
            ui.input_text("Name", &mut modal.name).build();
            ui.input_text("Color", &mut modal.color).hint("#818cf8").build();
            if let Ok(color) = HexColor::parse(modal.color.trim()) {
                ui.same_line();
                ui.color_button("##preview", rgba(&color, 1.0));
            }
            ui.input_text_multiline("Description", &mut modal.description, [320.0, 60.0])
                .build();

            ui.separator();
            let label = if modal.editing.is_some() { "Save Changes" } else { "Add Department" };
            ui.disabled(modal.name.trim().is_empty(), || {
                if ui.button(label) {
                    saved = Some((modal.editing.clone(), modal.draft()));
                    ui.close_current_popup();
                }
            });
            ui.same_line();
            if ui.button("Cancel") {
                cancelled = true;
                ui.close_current_popup();
            }
        });

        if let Some((editing, draft)) = saved {
            self.department_modal = None;
            match (editing, draft) {
                (_, Err(err)) => self.dashboard.notify(err.to_string()),
                (Some(id), Ok(draft)) => {
                    self.hub.update_department(&id, DepartmentPatch::from(draft));
                }
                (None, Ok(draft)) => {
                    self.hub.add_department(draft);
                }
            }
        } else if cancelled {
            self.department_modal = None;
        }
    }

    fn draw_resource_modal(&mut self, ui: &Ui) {
        if self.resource_modal.is_none() {
            return;
        }
        ui.open_popup(RESOURCE_POPUP);

        let mut saved = None;
        let mut cancelled = false;
        ui.modal_popup(RESOURCE_POPUP, || {
            let Some(modal) = self.resource_modal.as_mut() else {
                return;
            };
            let departments = self.hub.departments().items();

            ui.input_text("Name", &mut modal.name).build();
            ui.input_text("Role", &mut modal.role).build();
            let names: Vec<&str> = departments.iter().map(|department| department.name.as_str()).collect();
            if !names.is_empty() {
                ui.combo_simple_string("Department", &mut modal.department, &names);
            }
            ui.input_text("Avatar URL", &mut modal.avatar).build();

            let labels: Vec<String> = self.slots.iter().map(|slot| format_time(&slot.to_string())).collect();
            ui.combo_simple_string("Available From", &mut modal.start, &labels);
            ui.combo_simple_string("Available Until", &mut modal.end, &labels);

            ui.separator();
            let incomplete = modal.name.trim().is_empty() || modal.role.trim().is_empty();
            ui.disabled(incomplete, || {
                if ui.button("Add Resource") {
                    let department_id = departments
                        .get(modal.department)
                        .map(|department| department.id.clone())
                        .unwrap_or_default();
                    let start = self.slots[modal.start.min(self.slots.len() - 1)];
                    let end = self.slots[modal.end.min(self.slots.len() - 1)];
                    saved = Some(
                        ResourceDraft::new(modal.name.trim(), modal.role.trim(), department_id, start, end)
                            .map(|draft| draft.with_avatar(modal.avatar.trim())),
                    );
                    ui.close_current_popup();
                }
            });
            ui.same_line();
            if ui.button("Cancel") {
                cancelled = true;
                ui.close_current_popup();
            }
        });

        if let Some(draft) = saved {
            self.resource_modal = None;
            if let Err(err) = draft.and_then(|draft| self.hub.add_resource(draft)) {
                self.dashboard.notify(err.to_string());
            }
        } else if cancelled {
            self.resource_modal = None;
        }
    }

    // Projects

    fn draw_projects(&mut self, ui: &Ui) {
        ui.text("Projects");
        ui.same_line();
        if ui.button("Add Project") {
            self.project_modal = Some(ProjectModal::create());
        }

        let mut edit = None;
        let mut delete = None;
        if let Some(_table) = ui.begin_table_with_flags("##projects", 7, TableFlags::BORDERS | TableFlags::ROW_BG) {
            for column in ["Name", "Client", "Status", "Dates", "Budget", "Billable", "##actions"] {
                ui.table_setup_column(column);
            }
            ui.table_headers_row();

            for project in self.hub.projects() {
                let _id = ui.push_id(project.id.as_str());
                ui.table_next_row();
                ui.table_next_column();
                ui.text_colored(rgba(&project.color, 1.0), &project.name);
                if !project.activity_types.is_empty() {
                    ui.text_disabled(project.activity_types.join(", "));
                }
                ui.table_next_column();
                ui.text(&project.client_name);
                ui.table_next_column();
                ui.text(project.status.label());
                ui.table_next_column();
                let format_date = |date: Option<NaiveDate>| {
                    date.map(|date| date.format("%b %-d, %Y").to_string()).unwrap_or_else(|| "-".to_string())
                };
                ui.text(format!("{} - {}", format_date(project.start_date), format_date(project.end_date)));
                ui.table_next_column();
                ui.text(project.budget.map(|budget| format!("${budget:.0}")).unwrap_or_default());
                ui.table_next_column();
                ui.text(if project.billable { "Yes" } else { "No" });
                ui.table_next_column();
                if ui.small_button("Edit") {
                    edit = Some(ProjectModal {
                        editing: Some(project.id.clone()),
                        name: project.name.clone(),
                        color: project.color.as_str().to_string(),
                        client_name: project.client_name.clone(),
                        start_date: project.start_date.map(|d| d.format(DATE_FORMAT).to_string()).unwrap_or_default(),
                        end_date: project.end_date.map(|d| d.format(DATE_FORMAT).to_string()).unwrap_or_default(),
                        billable: project.billable,
                        activity_types: project.activity_types.join(", "),
                        description: project.description.clone().unwrap_or_default(),
                        budget: project.budget.map(|budget| budget.to_string()).unwrap_or_default(),
                        status: ProjectStatus::ALL
                            .iter()
                            .position(|status| *status == project.status)
                            .unwrap_or(0),
                    });
                }
                ui.same_line();
                if ui.small_button("Delete") {
                    delete = Some(project.id.clone());
                }
            }
        }
        if edit.is_some() {
            self.project_modal = edit;
        }
        if let Some(id) = delete {
            self.dashboard.request_delete_project(&self.hub, &id);
        }
    }

    fn draw_project_modal(&mut self, ui: &Ui) {
        if self.project_modal.is_none() {
            return;
        }
        ui.open_popup(PROJECT_POPUP);

        let mut saved = None;
        let mut cancelled = false;
        ui.modal_popup(PROJECT_POPUP, || {
            let Some(modal) = self.project_modal.as_mut() else {
                return;
            };
            ui.input_text("Name", &mut modal.name).build();
            ui.input_text("Client", &mut modal.client_name).build();
            ui.input_text("Color", &mut modal.color).hint("#818cf8").build();
            ui.input_text("Start Date", &mut modal.start_date).hint("YYYY-MM-DD").build();
            ui.input_text("End Date", &mut modal.end_date).hint("YYYY-MM-DD").build();
            let statuses: Vec<&str> = ProjectStatus::ALL.iter().map(|status| status.label()).collect();
            ui.combo_simple_string("Status", &mut modal.status, &statuses);
            ui.checkbox("Billable", &mut modal.billable);
            ui.input_text("Activity Types", &mut modal.activity_types)
                .hint("Development, Design")
                .build();
            ui.input_text("Budget", &mut modal.budget).build();
            ui.input_text_multiline("Description", &mut modal.description, [320.0, 60.0])
                .build();

            ui.separator();
            let label = if modal.editing.is_some() { "Save Changes" } else { "Add Project" };
            let incomplete = modal.name.trim().is_empty() || modal.client_name.trim().is_empty();
            ui.disabled(incomplete, || {
                if ui.button(label) {
                    saved = Some((modal.editing.clone(), modal.draft()));
                    ui.close_current_popup();
                }
            });
            ui.same_line();
            if ui.button("Cancel") {
                cancelled = true;
                ui.close_current_popup();
            }
        });

        if let Some((editing, draft)) = saved {
            self.project_modal = None;
            match (editing, draft) {
                (_, Err(err)) => self.dashboard.notify(err.to_string()),
                (Some(id), Ok(draft)) => {
                    self.hub.update_project(&id, ProjectPatch::from(draft));
                }
                (None, Ok(draft)) => {
                    self.hub.add_project(draft);
                }
            }
        } else if cancelled {
            self.project_modal = None;
        }
    }

    // Settings

    fn draw_settings(&mut self, ui: &Ui) {
        ui.text("Profile");
        ui.input_text("Name", &mut self.settings.name).build();
        ui.input_text("Email", &mut self.settings.email).build();
        if ui.button("Save Profile") {
            let patch = UserPatch {
                name: Some(self.settings.name.trim().to_string()),
                email: Some(self.settings.email.trim().to_string()),
            };
            self.hub.update_profile(patch);
            self.dashboard.notify("Profile updated");
        }

        ui.spacing();
        ui.separator();
        ui.text("Password");
        let password = &mut self.settings.password;
        ui.input_text("Current Password", &mut password.current).password(true).build();
        ui.input_text("New Password", &mut password.new).password(true).build();
        ui.input_text("Confirm Password", &mut password.confirm).password(true).build();
        if ui.button("Update Password") {
            let change = std::mem::take(&mut self.settings.password);
            match self.hub.change_password(change) {
                Ok(()) => self.dashboard.notify("Password updated"),
                Err(err) => self.dashboard.notify(err.to_string()),
            }
        }
    }

    // Dialogs

    fn draw_confirm_modal(&mut self, ui: &Ui) {
        let Some(pending) = self.dashboard.pending_delete().cloned() else {
            return;
        };
        ui.open_popup(CONFIRM_POPUP);

        let mut confirmed = false;
        let mut cancelled = false;
        ui.modal_popup(CONFIRM_POPUP, || {
            ui.text(pending.title());
            ui.text_wrapped(pending.message());
            ui.separator();
            if ui.button("Delete") {
                confirmed = true;
                ui.close_current_popup();
            }
            ui.same_line();
            if ui.button("Cancel") {
                cancelled = true;
                ui.close_current_popup();
            }
        });

        if confirmed {
            // A refusal is already surfaced as a notification.
            let _ = self.dashboard.confirm_delete(&mut self.hub);
        } else if cancelled {
            self.dashboard.cancel_delete();
        }
    }

    fn draw_notice_modal(&mut self, ui: &Ui) {
        let Some(message) = self.dashboard.notification().map(str::to_string) else {
            return;
        };
        ui.open_popup(NOTICE_POPUP);

        let mut dismissed = false;
        ui.modal_popup(NOTICE_POPUP, || {
            ui.text_wrapped(&message);
            if ui.button("OK") {
                dismissed = true;
                ui.close_current_popup();
            }
        });
        if dismissed {
            self.dashboard.dismiss_notification();
        }
    }
}

/// Combo over `options` labelled in 12-hour time. Returns the picked index.
fn time_combo(ui: &Ui, label: &str, options: &[TimeOfDay], current: TimeOfDay) -> Option<usize> {
    if options.is_empty() {
        return None;
    }
    let labels: Vec<String> = options.iter().map(|slot| format_time(&slot.to_string())).collect();
    let mut index = options.iter().position(|slot| *slot == current).unwrap_or(0);
    ui.combo_simple_string(label, &mut index, &labels).then_some(index)
}

fn rgba(color: &HexColor, alpha: f32) -> [f32; 4] {
    let [r, g, b] = color.rgb();
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, alpha]
}
