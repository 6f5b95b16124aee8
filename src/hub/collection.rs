use std::fmt::Debug;

use super::commands::{AnyRecord, RecordKind};
use super::ids::IdGenerator;
use super::types::*;

/// An entity kept in a [`Collection`].
pub trait Record: Clone + Debug {
    type Draft;
    type Patch;

    const KIND: RecordKind;

    fn id(&self) -> &str;
    fn from_draft(id: String, draft: Self::Draft) -> Self;
    fn apply(&mut self, patch: Self::Patch);
    fn into_any(self) -> AnyRecord;
}

/// Ordered, in-memory list of one kind of record. Every operation is total:
/// unknown identifiers leave the list as it was.
#[derive(Debug)]
pub struct Collection<T: Record> {
    items: Vec<T>,
    ids: Box<dyn IdGenerator>,
}

impl<T: Record> Collection<T> {
    pub fn new(ids: Box<dyn IdGenerator>) -> Self {
        Self::with_items(Vec::new(), ids)
    }

    pub fn with_items(items: Vec<T>, ids: Box<dyn IdGenerator>) -> Self {
        Collection { items, ids }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    /// Draws identifiers until one is not taken.
    pub fn next_id(&mut self) -> String {
        loop {
            let candidate = self.ids.next_id();
            if !self.contains(&candidate) {
                return candidate;
            }
        }
    }

    /// Direct, unrecorded add. `ResourceHub` builds the same record from
    /// `next_id` and `Record::from_draft` so it can log an undoable insert;
    /// use this for collections kept outside a hub.
    pub fn add(&mut self, draft: T::Draft) -> &T {
        let id = self.next_id();
        let index = self.items.len();
        self.items.push(T::from_draft(id, draft));
        &self.items[index]
    }

    /// Direct, unrecorded merge; the hub goes through `replace` instead so
    /// the previous record is kept for undo.
    pub fn update(&mut self, id: &str, patch: T::Patch) -> Option<&T> {
        let index = self.position(id)?;
        self.items[index].apply(patch);
        Some(&self.items[index])
    }

    pub fn delete(&mut self, id: &str) -> Option<T> {
        let index = self.position(id)?;
        Some(self.items.remove(index))
    }

    /// Inserts at `index`, clamped to the end of the list.
    pub fn insert_at(&mut self, index: usize, item: T) {
        let index = index.min(self.items.len());
        self.items.insert(index, item);
    }

    /// Swaps in `item` for the record with the same id, returning the old one.
    pub fn replace(&mut self, item: T) -> Option<T> {
        let index = self.position(item.id())?;
        Some(std::mem::replace(&mut self.items[index], item))
    }
}

impl<'a, T: Record> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl Record for Department {
    type Draft = DepartmentDraft;
    type Patch = DepartmentPatch;

    const KIND: RecordKind = RecordKind::Department;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(id: String, draft: DepartmentDraft) -> Self {
        Department {
            id,
            name: draft.name,
            color: draft.color,
            description: draft.description,
        }
    }

    fn apply(&mut self, patch: DepartmentPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
    }

    fn into_any(self) -> AnyRecord {
        AnyRecord::Department(self)
    }
}

impl Record for Resource {
    type Draft = ResourceDraft;
    type Patch = ResourcePatch;

    const KIND: RecordKind = RecordKind::Resource;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(id: String, draft: ResourceDraft) -> Self {
        Resource {
            id,
            name: draft.name,
            role: draft.role,
            department_id: draft.department_id,
            avatar: draft.avatar,
            availability: draft.availability,
        }
    }

    fn apply(&mut self, patch: ResourcePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(role) = patch.role {
            self.role = role;
        }
        if let Some(department_id) = patch.department_id {
            self.department_id = department_id;
        }
        if let Some(avatar) = patch.avatar {
            self.avatar = avatar;
        }
        if let Some(availability) = patch.availability {
            self.availability = availability;
        }
    }

    fn into_any(self) -> AnyRecord {
        AnyRecord::Resource(self)
    }
}

impl Record for Booking {
    type Draft = BookingDraft;
    type Patch = BookingPatch;

    const KIND: RecordKind = RecordKind::Booking;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(id: String, draft: BookingDraft) -> Self {
        Booking {
            id,
            resource_id: draft.resource_id,
            project_name: draft.project_name,
            start_date: draft.start_date,
            end_date: draft.end_date,
            start_time: draft.start_time,
            end_time: draft.end_time,
            color: draft.color,
        }
    }

    fn apply(&mut self, patch: BookingPatch) {
        if let Some(resource_id) = patch.resource_id {
            self.resource_id = resource_id;
        }
        if let Some(project_name) = patch.project_name {
            self.project_name = project_name;
        }
        if let Some(start_date) = patch.start_date {
            self.start_date = start_date;
        }
        if let Some(end_date) = patch.end_date {
            self.end_date = end_date;
        }
        if let Some(start_time) = patch.start_time {
            self.start_time = start_time;
        }
        if let Some(end_time) = patch.end_time {
            self.end_time = end_time;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
    }

    fn into_any(self) -> AnyRecord {
        AnyRecord::Booking(self)
    }
}

impl Record for Project {
    type Draft = ProjectDraft;
    type Patch = ProjectPatch;

    const KIND: RecordKind = RecordKind::Project;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(id: String, draft: ProjectDraft) -> Self {
        Project {
            id,
            name: draft.name,
            color: draft.color,
            client_name: draft.client_name,
            start_date: draft.start_date,
            end_date: draft.end_date,
            billable: draft.billable,
            activity_types: draft.activity_types,
            description: draft.description,
            budget: draft.budget,
            status: draft.status,
        }
    }

    fn apply(&mut self, patch: ProjectPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
        if let Some(client_name) = patch.client_name {
            self.client_name = client_name;
        }
        if let Some(start_date) = patch.start_date {
            self.start_date = start_date;
        }
        if let Some(end_date) = patch.end_date {
            self.end_date = end_date;
        }
        if let Some(billable) = patch.billable {
            self.billable = billable;
        }
        if let Some(activity_types) = patch.activity_types {
            self.activity_types = activity_types;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(budget) = patch.budget {
            self.budget = budget;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }

    fn into_any(self) -> AnyRecord {
        AnyRecord::Project(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hub::ids::SequentialIds;

    fn department(id: &str, name: &str) -> Department {
        Department {
            id: id.to_string(),
            name: name.to_string(),
            color: HexColor::parse("#818cf8").unwrap(),
            description: None,
        }
    }

    fn seeded() -> Collection<Department> {
        Collection::with_items(
            vec![department("1", "Development"), department("2", "Design")],
            Box::new(SequentialIds::new()),
        )
    }

    #[test]
    fn test_add_assigns_unused_id_and_appends() {
        let mut departments = seeded();
        let draft = DepartmentDraft::new("QA", "#f87171", None).unwrap();

        let added = departments.add(draft).clone();
        assert_eq!(added.id, "3");
        assert_eq!(added.name, "QA");
        assert_eq!(departments.len(), 3);
        assert_eq!(departments.items().last(), Some(&added));
    }

    #[test]
    fn test_update_merges_in_place() {
        let mut departments = seeded();
        let patch = DepartmentPatch {
            name: Some("Engineering".to_string()),
            ..Default::default()
        };

        let updated = departments.update("1", patch).cloned().unwrap();
        assert_eq!(updated.name, "Engineering");
        assert_eq!(updated.color.as_str(), "#818cf8");
        assert_eq!(departments.position("1"), Some(0));
    }

    #[test]
    fn test_unknown_id_is_a_noop() {
        let mut departments = seeded();
        let before = departments.items().to_vec();

        assert!(departments.update("missing", DepartmentPatch::default()).is_none());
        assert!(departments.delete("missing").is_none());
        assert_eq!(departments.items(), before.as_slice());
    }

    #[test]
    fn test_delete_removes_only_target() {
        let mut departments = seeded();
        let removed = departments.delete("1").unwrap();
        assert_eq!(removed.name, "Development");
        assert_eq!(departments.len(), 1);
        assert!(!departments.contains("1"));
        assert!(departments.contains("2"));
    }

    #[test]
    fn test_insert_at_and_replace() {
        let mut departments = seeded();
        let removed = departments.delete("1").unwrap();
        departments.insert_at(0, removed);
        assert_eq!(departments.position("1"), Some(0));

        departments.insert_at(99, department("9", "Ops"));
        assert_eq!(departments.position("9"), Some(2));

        let old = departments.replace(department("2", "Product")).unwrap();
        assert_eq!(old.name, "Design");
        assert_eq!(departments.get("2").unwrap().name, "Product");
        assert!(departments.replace(department("missing", "Nope")).is_none());
    }
}
