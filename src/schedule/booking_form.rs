use chrono::NaiveDate;

use super::time_slots::generate_time_slots;
use crate::error::{Error, Result};
use crate::hub::types::{Availability, BookingDraft, HexColor, Resource, ResourceId, TimeOfDay};

/// Slots inside the availability window, both ends included. `HH:MM` is
/// fixed width so ordering matches the textual order of the labels.
pub fn available_slots(slots: &[TimeOfDay], availability: &Availability) -> Vec<TimeOfDay> {
    slots
        .iter()
        .copied()
        .filter(|slot| availability.contains(*slot))
        .collect()
}

/// Available slots strictly after `start`.
pub fn end_slots(slots: &[TimeOfDay], availability: &Availability, start: TimeOfDay) -> Vec<TimeOfDay> {
    available_slots(slots, availability)
        .into_iter()
        .filter(|slot| *slot > start)
        .collect()
}

/// A booking being composed. Overlap with existing bookings of the same
/// resource is not checked.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingForm {
    pub resource_id: ResourceId,
    pub project_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    slots: Vec<TimeOfDay>,
}

impl BookingForm {
    pub fn new(resources: &[Resource], today: NaiveDate) -> Self {
        let slots = generate_time_slots();
        let mut form = BookingForm {
            resource_id: resources.first().map(|resource| resource.id.clone()).unwrap_or_default(),
            project_name: String::new(),
            start_date: today,
            end_date: today,
            start_time: TimeOfDay::from_hm(9, 0).unwrap_or(slots[0]),
            end_time: TimeOfDay::from_hm(17, 0).unwrap_or(slots[0]),
            slots,
        };
        if let Some(resource) = resources.first() {
            form.select_resource(resource);
        }
        form
    }

    /// Picks the resource and pulls the chosen times back inside its window.
    pub fn select_resource(&mut self, resource: &Resource) {
        self.resource_id = resource.id.clone();

        let starts = self.start_options(Some(resource));
        if !starts.contains(&self.start_time) {
            if let Some(first) = starts.first() {
                self.start_time = *first;
            }
        }
        self.fix_end_time(resource);
    }

    pub fn set_start_time(&mut self, start_time: TimeOfDay, resource: Option<&Resource>) {
        self.start_time = start_time;
        if let Some(resource) = resource {
            self.fix_end_time(resource);
        }
    }

    /// Every slot when no resource is selected.
    pub fn start_options(&self, resource: Option<&Resource>) -> Vec<TimeOfDay> {
        match resource {
            Some(resource) => available_slots(&self.slots, &resource.availability),
            None => self.slots.clone(),
        }
    }

    pub fn end_options(&self, resource: Option<&Resource>) -> Vec<TimeOfDay> {
        self.start_options(resource)
            .into_iter()
            .filter(|slot| *slot > self.start_time)
            .collect()
    }

    /// Submission stays disabled while the project name is blank or the
    /// resource's window leaves no end time after the chosen start.
    pub fn can_submit(&self, resource: Option<&Resource>) -> bool {
        resource.is_some()
            && !self.project_name.trim().is_empty()
            && !self.end_options(resource).is_empty()
    }

    pub fn submit(&self, resource: Option<&Resource>, color: HexColor) -> Result<BookingDraft> {
        let resource = resource.ok_or(Error::MissingField("Resource"))?;
        if self.project_name.trim().is_empty() {
            return Err(Error::MissingField("Project name"));
        }
        if self.end_date < self.start_date {
            return Err(Error::EndBeforeStart);
        }

        let ends = self.end_options(Some(resource));
        if ends.is_empty() {
            return Err(Error::NoEndTimeAvailable);
        }
        if !self.start_options(Some(resource)).contains(&self.start_time) {
            return Err(Error::OutsideAvailability(self.start_time));
        }
        if self.end_time <= self.start_time {
            return Err(Error::EndNotAfterStart(self.start_time));
        }
        if !ends.contains(&self.end_time) {
            return Err(Error::OutsideAvailability(self.end_time));
        }

        Ok(BookingDraft {
            resource_id: resource.id.clone(),
            project_name: self.project_name.trim().to_string(),
            start_date: self.start_date,
            end_date: self.end_date,
            start_time: self.start_time,
            end_time: self.end_time,
            color,
        })
    }

    fn fix_end_time(&mut self, resource: &Resource) {
        let ends = self.end_options(Some(resource));
        if !ends.contains(&self.end_time) {
            if let Some(last) = ends.last() {
                self.end_time = *last;
            }
        }
    }
}
