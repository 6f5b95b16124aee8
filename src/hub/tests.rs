use chrono::NaiveDate;

use super::*;
use crate::error::Error;
use crate::schedule::BookingForm;

fn t(text: &str) -> TimeOfDay {
    TimeOfDay::parse(text).unwrap()
}

fn date(text: &str) -> NaiveDate {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").unwrap()
}

fn sample_hub() -> ResourceHub {
    ResourceHub::with_sample_data().unwrap()
}

fn booking_draft(hub: &ResourceHub, resource_id: &str, project_name: &str) -> BookingDraft {
    let resource = hub.resources().get(resource_id);
    let mut form = BookingForm::new(hub.resources().items(), date("2024-03-18"));
    if let Some(resource) = resource {
        form.select_resource(resource);
    }
    form.project_name = project_name.to_string();
    form.submit(resource, HexColor::parse("#fbbf24").unwrap()).unwrap()
}

#[test]
fn test_sample_data_seeds_every_collection() {
    let hub = sample_hub();

    assert_eq!(hub.departments().len(), 2);
    assert_eq!(hub.resources().len(), 3);
    assert_eq!(hub.bookings().len(), 2);
    assert_eq!(hub.projects().len(), 2);
    assert_eq!(hub.user().email, "john@example.com");

    let jane = hub.resources().get("2").unwrap();
    assert_eq!(jane.department_id, "design");
    assert_eq!(jane.availability.start, t("09:00"));

    let booking = hub.bookings().get("2").unwrap();
    assert_eq!(booking.start_date, date("2024-03-21"));
    assert_eq!(booking.start_time, t("10:00"));

    let project = hub.projects().get("PROJ2").unwrap();
    assert_eq!(project.status, ProjectStatus::Completed);
    assert_eq!(project.budget, Some(25000.0));
    assert_eq!(project.activity_types, vec!["Design".to_string()]);
    assert!(!hub.can_undo());
}

#[test]
fn test_seed_rejects_malformed_yaml() {
    let yaml = "user: { name: Ann, email: ann@example.com }\ndepartments:\n  - { id: qa, name: QA, color: blue }\n";
    assert!(matches!(SeedData::from_yaml(yaml), Err(Error::Seed(_))));

    let inverted = "user: { name: Ann, email: ann@example.com }\nresources:\n  - id: \"1\"\n    name: Ann\n    role: QA\n    departmentId: qa\n    availability: { start: \"17:00\", end: \"09:00\" }\n";
    assert!(matches!(SeedData::from_yaml(inverted), Err(Error::Seed(_))));

    let missing = std::path::Path::new("definitely/not/here.yaml");
    assert!(matches!(SeedData::load(missing), Err(Error::Io(_))));
}

#[test]
fn test_add_department_assigns_fresh_id() {
    let mut hub = sample_hub();
    let draft = DepartmentDraft::new("Quality", "#f87171", Some("Testing".to_string())).unwrap();

    let id = hub.add_department(draft);
    assert_eq!(id, "dept-1");
    assert_eq!(hub.departments().len(), 3);
    assert_eq!(hub.departments().items().last().unwrap().name, "Quality");
}

#[test]
fn test_generated_ids_skip_seeded_ones() {
    let mut hub = sample_hub();

    let resource = ResourceDraft::new("Ann Lee", "QA Engineer", "dev", t("08:00"), t("16:00")).unwrap();
    assert_eq!(hub.add_resource(resource).unwrap(), "4");

    let project = ProjectDraft::new("Intranet", "#60a5fa", "Acme Corp").unwrap();
    assert_eq!(hub.add_project(project), "PROJ3");

    let draft = booking_draft(&hub, "4", "Intranet");
    assert_eq!(hub.add_booking(draft).unwrap(), "3");
}

#[test]
fn test_uuid_ids() {
    let mut hub = ResourceHub::new(SeedData::sample().unwrap(), IdScheme::Uuid);
    let draft = DepartmentDraft::new("Quality", "#f87171", None).unwrap();
    let id = hub.add_department(draft);
    assert_eq!(id.len(), 36);
    assert!(hub.departments().contains(&id));
}

#[test]
fn test_add_resource_requires_known_department() {
    let mut hub = sample_hub();
    let draft = ResourceDraft::new("Ann Lee", "QA Engineer", "qa", t("08:00"), t("16:00")).unwrap();

    assert!(matches!(hub.add_resource(draft), Err(Error::UnknownDepartment(_))));
    assert_eq!(hub.resources().len(), 3);
    assert!(!hub.can_undo());
}

#[test]
fn test_add_booking_requires_known_resource() {
    let mut hub = sample_hub();
    let draft = booking_draft(&hub, "1", "Website Redesign");
    hub.delete_resource("1");

    assert!(matches!(hub.add_booking(draft), Err(Error::UnknownResource(_))));
    assert_eq!(hub.bookings().len(), 2);
}

#[test]
fn test_update_merges_and_keeps_position() {
    let mut hub = sample_hub();
    let patch = ResourcePatch {
        role: Some("Staff Engineer".to_string()),
        ..Default::default()
    };

    let updated = hub.update_resource("1", patch).unwrap().cloned().unwrap();
    assert_eq!(updated.role, "Staff Engineer");
    assert_eq!(updated.name, "John Doe");
    assert_eq!(hub.resources().position("1"), Some(0));
}

#[test]
fn test_update_validates_references_and_windows() {
    let mut hub = sample_hub();

    let to_unknown = ResourcePatch {
        department_id: Some("qa".to_string()),
        ..Default::default()
    };
    assert!(matches!(hub.update_resource("1", to_unknown), Err(Error::UnknownDepartment(_))));

    let backwards = ResourcePatch {
        availability: Some(Availability {
            start: t("17:00"),
            end: t("09:00"),
        }),
        ..Default::default()
    };
    assert!(matches!(
        hub.update_resource("1", backwards),
        Err(Error::InvalidAvailability { .. })
    ));

    let inverted = BookingPatch {
        end_time: Some(t("08:00")),
        ..Default::default()
    };
    assert!(matches!(hub.update_booking("1", inverted), Err(Error::EndNotAfterStart(_))));

    let early_end = BookingPatch {
        end_date: Some(date("2024-03-01")),
        ..Default::default()
    };
    assert!(matches!(hub.update_booking("1", early_end), Err(Error::EndBeforeStart)));
    assert_eq!(hub.bookings().get("1").unwrap().end_date, date("2024-03-22"));
}

#[test]
fn test_unknown_ids_are_noops() {
    let mut hub = sample_hub();

    assert!(hub.update_department("missing", DepartmentPatch::default()).is_none());
    assert!(hub.update_resource("missing", ResourcePatch::default()).unwrap().is_none());
    assert!(hub.update_booking("missing", BookingPatch::default()).unwrap().is_none());
    assert!(hub.update_project("missing", ProjectPatch::default()).is_none());
    let to_unknown_department = ResourcePatch {
        department_id: Some("nope".to_string()),
        ..Default::default()
    };
    assert!(hub.update_resource("missing", to_unknown_department).unwrap().is_none());
    let to_unknown_resource = BookingPatch {
        resource_id: Some("nope".to_string()),
        ..Default::default()
    };
    assert!(hub.update_booking("missing", to_unknown_resource).unwrap().is_none());
    assert!(hub.delete_department("missing").unwrap().is_none());
    assert!(hub.delete_resource("missing").is_none());
    assert!(hub.delete_booking("missing").is_none());
    assert!(hub.delete_project("missing").is_none());

    assert_eq!(hub.departments().len(), 2);
    assert_eq!(hub.resources().len(), 3);
    assert_eq!(hub.bookings().len(), 2);
    assert_eq!(hub.projects().len(), 2);
    assert!(!hub.can_undo());
}

#[test]
fn test_department_with_members_cannot_be_deleted() {
    let mut hub = sample_hub();

    match hub.delete_department("dev") {
        Err(Error::DepartmentInUse { name, members }) => {
            assert_eq!(name, "Development");
            assert_eq!(members, 2);
        }
        other => panic!("expected DepartmentInUse, got {other:?}"),
    }
    assert!(hub.departments().contains("dev"));

    let move_to_design = ResourcePatch {
        department_id: Some("design".to_string()),
        ..Default::default()
    };
    hub.update_resource("1", move_to_design).unwrap();
    hub.delete_resource("3");
    assert!(!hub.department_in_use("dev"));

    let removed = hub.delete_department("dev").unwrap().unwrap();
    assert_eq!(removed.name, "Development");
    assert!(!hub.departments().contains("dev"));
    assert_eq!(hub.department_member_count("design"), 2);
}

#[test]
fn test_create_delete_undo_undo_redo_redo() {
    let mut hub = sample_hub();
    let draft = ProjectDraft::new("Intranet", "#60a5fa", "Acme Corp")
        .unwrap()
        .activity_types(["Development", "", "QA"])
        .budget(Some(1200.0))
        .unwrap();

    let id = hub.add_project(draft);
    assert_eq!(hub.projects().get(&id).unwrap().activity_types, vec!["Development", "QA"]);
    assert!(hub.delete_project(&id).is_some());
    assert_eq!(hub.projects().len(), 2);

    assert!(hub.undo().is_ok());
    assert_eq!(hub.projects().len(), 3);
    assert_eq!(hub.projects().position(&id), Some(2));

    assert!(hub.undo().is_ok());
    assert_eq!(hub.projects().len(), 2);
    assert!(!hub.projects().contains(&id));

    assert!(matches!(hub.undo(), Err(Error::NothingToUndo)));

    assert!(hub.redo().is_ok());
    assert!(hub.projects().contains(&id));

    assert!(hub.redo().is_ok());
    assert!(!hub.projects().contains(&id));

    assert!(matches!(hub.redo(), Err(Error::NothingToRedo)));
}

#[test]
fn test_undo_delete_restores_original_position() {
    let mut hub = sample_hub();
    hub.delete_resource("2");
    assert_eq!(hub.resources().position("3"), Some(1));

    hub.undo().unwrap();
    assert_eq!(hub.resources().position("2"), Some(1));
    assert_eq!(hub.resources().get("2").unwrap().name, "Jane Smith");
}

#[test]
fn test_undo_update_restores_previous_fields() {
    let mut hub = sample_hub();
    let patch = DepartmentPatch {
        name: Some("Engineering".to_string()),
        color: Some(HexColor::parse("#000000").unwrap()),
        description: Some(None),
    };
    hub.update_department("dev", patch);
    assert_eq!(hub.departments().get("dev").unwrap().description, None);

    hub.undo().unwrap();
    let dev = hub.departments().get("dev").unwrap();
    assert_eq!(dev.name, "Development");
    assert_eq!(dev.color.as_str(), "#818cf8");
    assert_eq!(dev.description.as_deref(), Some("Software Development Team"));

    hub.redo().unwrap();
    assert_eq!(hub.departments().get("dev").unwrap().name, "Engineering");
}

#[test]
fn test_new_command_discards_redo_tail() {
    let mut hub = sample_hub();
    hub.delete_booking("1");
    hub.undo().unwrap();
    assert!(hub.can_redo());

    hub.delete_booking("2");
    assert!(!hub.can_redo());
    assert!(hub.bookings().contains("1"));
}

#[test]
fn test_profile_update_and_undo() {
    let mut hub = sample_hub();
    let patch = UserPatch {
        email: Some("john.doe@example.com".to_string()),
        ..Default::default()
    };

    assert_eq!(hub.update_profile(patch).email, "john.doe@example.com");
    assert_eq!(hub.user().name, "John Doe");

    hub.update_profile(UserPatch::default());
    hub.undo().unwrap();
    assert_eq!(hub.user().email, "john@example.com");
    assert!(!hub.can_undo());
}

#[test]
fn test_change_password() {
    let mut hub = sample_hub();

    let empty = PasswordChange::default();
    assert!(matches!(hub.change_password(empty), Err(Error::EmptyPassword)));

    let mismatch = PasswordChange {
        current: "old".to_string(),
        new: "correct horse".to_string(),
        confirm: "correct house".to_string(),
    };
    assert!(matches!(hub.change_password(mismatch), Err(Error::PasswordMismatch)));

    let ok = PasswordChange {
        current: "old".to_string(),
        new: "correct horse".to_string(),
        confirm: "correct horse".to_string(),
    };
    assert!(hub.change_password(ok).is_ok());
    assert!(!hub.can_undo());
}

#[test]
fn test_overlapping_bookings_are_allowed() {
    let mut hub = sample_hub();
    let first = booking_draft(&hub, "1", "Website Redesign");
    let second = booking_draft(&hub, "1", "Mobile App UI");

    hub.add_booking(first).unwrap();
    hub.add_booking(second).unwrap();
    assert_eq!(
        hub.bookings()
            .iter()
            .filter(|booking| booking.resource_id == "1" && booking.covers(date("2024-03-18")))
            .count(),
        2
    );
}
