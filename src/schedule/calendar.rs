use chrono::{Datelike, Duration, NaiveDate};

use crate::hub::types::Booking;

pub const DAYS_PER_WEEK: i64 = 7;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum ScheduleView {
    #[default]
    Week,
    Day,
}

impl ScheduleView {
    pub fn label(&self) -> &'static str {
        match self {
            ScheduleView::Week => "Week",
            ScheduleView::Day => "Day",
        }
    }

    pub fn step(&self) -> Duration {
        match self {
            ScheduleView::Week => Duration::days(DAYS_PER_WEEK),
            ScheduleView::Day => Duration::days(1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// Header label for the schedule.
///
/// * day: `Monday, March 18, 2024`
/// * week inside one month: `18 - 24 March 2024`
/// * week across months: `Mar 30 - Apr 5, 2024`
/// * week across years: `Dec 30, 2024 - Jan 5, 2025`
pub fn format_date_range(anchor: NaiveDate, view: ScheduleView) -> String {
    if view == ScheduleView::Day {
        return anchor.format("%A, %B %-d, %Y").to_string();
    }

    let start = anchor;
    let end = week_end(anchor);
    if start.month() == end.month() {
        format!("{} - {} {}", start.day(), end.day(), start.format("%B %Y"))
    } else if start.year() == end.year() {
        format!("{} - {}", start.format("%b %-d"), end.format("%b %-d, %Y"))
    } else {
        format!("{} - {}", start.format("%b %-d, %Y"), end.format("%b %-d, %Y"))
    }
}

/// Last day of the week shown from `anchor`.
pub fn week_end(anchor: NaiveDate) -> NaiveDate {
    anchor + Duration::days(DAYS_PER_WEEK - 1)
}

pub fn shift_anchor(anchor: NaiveDate, view: ScheduleView, direction: Direction) -> NaiveDate {
    match direction {
        Direction::Previous => anchor - view.step(),
        Direction::Next => anchor + view.step(),
    }
}

/// Days drawn as timeline columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarWindow {
    pub start_date: NaiveDate,
    pub num_days: usize,
}

impl CalendarWindow {
    pub fn new(anchor: NaiveDate, view: ScheduleView) -> Self {
        let num_days = match view {
            ScheduleView::Week => DAYS_PER_WEEK as usize,
            ScheduleView::Day => 1,
        };
        CalendarWindow {
            start_date: anchor,
            num_days,
        }
    }

    pub fn day(&self, offset: usize) -> NaiveDate {
        self.start_date + Duration::days(offset as i64)
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (0..self.num_days).map(|offset| self.day(offset))
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.days().any(|day| day == date)
    }
}

/// Bookings of one resource that cover `date`, earliest start first.
pub fn bookings_on<'a>(bookings: &'a [Booking], resource_id: &str, date: NaiveDate) -> Vec<&'a Booking> {
    let mut found: Vec<&Booking> = bookings
        .iter()
        .filter(|booking| booking.resource_id == resource_id && booking.covers(date))
        .collect();
    found.sort_by_key(|booking| booking.start_time);
    found
}
