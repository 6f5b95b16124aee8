pub mod booking_form;
pub mod calendar;
pub mod color;
pub mod time_slots;

pub use booking_form::{available_slots, end_slots, BookingForm};
pub use calendar::{bookings_on, format_date_range, shift_anchor, CalendarWindow, Direction, ScheduleView};
pub use color::generate_color;
pub use time_slots::{format_time, generate_time_slots};
