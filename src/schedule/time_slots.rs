use crate::hub::types::TimeOfDay;

pub const FIRST_SLOT_MINUTES: u32 = 0;
pub const LAST_SLOT_MINUTES: u32 = 23 * 60 + 30;
pub const SLOT_INTERVAL_MINUTES: u32 = 30;

/// Every selectable time of day, `00:00` through `23:30` in half hours.
pub fn generate_time_slots() -> Vec<TimeOfDay> {
    (FIRST_SLOT_MINUTES..=LAST_SLOT_MINUTES)
        .step_by(SLOT_INTERVAL_MINUTES as usize)
        .filter_map(|minutes| TimeOfDay::from_hm(minutes / 60, minutes % 60))
        .collect()
}

/// Turns `HH:MM` into a 12-hour label such as `9:00 AM`. Anything that is
/// not a valid `HH:MM` string is handed back unchanged.
pub fn format_time(hhmm: &str) -> String {
    TimeOfDay::parse(hhmm)
        .map(|time| time.to_12_hour())
        .unwrap_or_else(|_| hhmm.to_string())
}
