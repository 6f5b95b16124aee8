use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime, Timelike};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub type DepartmentId = String;
pub type ResourceId = String;
pub type BookingId = String;
pub type ProjectId = String;

static HEX_COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("hex color pattern is valid"));

/// A time of day with minute precision, written as zero-padded `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(TimeOfDay)
    }

    pub fn parse(text: &str) -> Result<Self> {
        // chrono accepts "9:00" and " 9:00"; labels must stay fixed-width to order textually.
        let bytes = text.as_bytes();
        let fixed_width = bytes.len() == 5
            && bytes[2] == b':'
            && [0, 1, 3, 4].iter().all(|&i| bytes[i].is_ascii_digit());
        if !fixed_width {
            return Err(Error::InvalidTime(text.to_string()));
        }
        NaiveTime::parse_from_str(text, "%H:%M")
            .map(TimeOfDay)
            .map_err(|_| Error::InvalidTime(text.to_string()))
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    pub fn minutes_since_midnight(&self) -> u32 {
        self.hour() * 60 + self.minute()
    }

    /// `09:00` becomes `9:00 AM`, `17:30` becomes `5:30 PM`.
    pub fn to_12_hour(&self) -> String {
        self.0.format("%-I:%M %p").to_string()
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

impl FromStr for TimeOfDay {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        TimeOfDay::parse(s)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        TimeOfDay::parse(&value)
    }
}

impl From<TimeOfDay> for String {
    fn from(time: TimeOfDay) -> Self {
        time.to_string()
    }
}

/// A `#RRGGBB` display color.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

impl HexColor {
    pub fn parse(text: &str) -> Result<Self> {
        if HEX_COLOR.is_match(text) {
            Ok(HexColor(text.to_string()))
        } else {
            Err(Error::InvalidColor(text.to_string()))
        }
    }

    pub fn from_rgb(rgb: [u8; 3]) -> Self {
        HexColor(format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2]))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn rgb(&self) -> [u8; 3] {
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&self.0[range], 16).unwrap_or_default()
        };
        [channel(1..3), channel(3..5), channel(5..7)]
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for HexColor {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        HexColor::parse(&value)
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.0
    }
}

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a `YYYY-MM-DD` form field.
pub fn parse_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).map_err(|_| Error::InvalidDate(text.to_string()))
}

/// Blank means no date; anything else must parse.
pub fn parse_optional_date(text: &str) -> Result<Option<NaiveDate>> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    parse_date(text).map(Some)
}

/// Blank means no budget; anything else must be a number.
pub fn parse_budget(text: &str) -> Result<Option<f64>> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    match text.parse::<f64>() {
        Ok(budget) if budget.is_finite() => Ok(Some(budget)),
        _ => Err(Error::InvalidBudget(text.to_string())),
    }
}

fn required(field: &'static str, value: impl Into<String>) -> Result<String> {
    let value = value.into();
    if value.trim().is_empty() {
        Err(Error::MissingField(field))
    } else {
        Ok(value)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AvailabilityWindow")]
pub struct Availability {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

/// Unchecked shape of an availability window as it appears in seed files.
#[derive(Deserialize)]
struct AvailabilityWindow {
    start: TimeOfDay,
    end: TimeOfDay,
}

impl TryFrom<AvailabilityWindow> for Availability {
    type Error = Error;

    fn try_from(window: AvailabilityWindow) -> Result<Self> {
        Availability::new(window.start, window.end)
    }
}

impl Availability {
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Result<Self> {
        if start < end {
            Ok(Availability { start, end })
        } else {
            Err(Error::InvalidAvailability { start, end })
        }
    }

    pub fn contains(&self, time: TimeOfDay) -> bool {
        self.start <= time && time <= self.end
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: DepartmentId,
    pub name: String,
    pub color: HexColor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DepartmentDraft {
    pub(crate) name: String,
    pub(crate) color: HexColor,
    pub(crate) description: Option<String>,
}

impl DepartmentDraft {
    pub fn new(name: impl Into<String>, color: &str, description: Option<String>) -> Result<Self> {
        Ok(DepartmentDraft {
            name: required("Department name", name)?,
            color: HexColor::parse(color)?,
            description: non_blank(description),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DepartmentPatch {
    pub name: Option<String>,
    pub color: Option<HexColor>,
    pub description: Option<Option<String>>,
}

impl From<DepartmentDraft> for DepartmentPatch {
    fn from(draft: DepartmentDraft) -> Self {
        DepartmentPatch {
            name: Some(draft.name),
            color: Some(draft.color),
            description: Some(draft.description),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: ResourceId,
    pub name: String,
    pub role: String,
    pub department_id: DepartmentId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub availability: Availability,
}

impl Resource {
    /// First letter of the name, shown when there is no avatar.
    pub fn initial(&self) -> char {
        self.name.chars().next().unwrap_or('?')
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResourceDraft {
    pub(crate) name: String,
    pub(crate) role: String,
    pub(crate) department_id: DepartmentId,
    pub(crate) avatar: Option<String>,
    pub(crate) availability: Availability,
}

impl ResourceDraft {
    pub fn new(
        name: impl Into<String>,
        role: impl Into<String>,
        department_id: impl Into<DepartmentId>,
        start: TimeOfDay,
        end: TimeOfDay,
    ) -> Result<Self> {
        Ok(ResourceDraft {
            name: required("Name", name)?,
            role: required("Role", role)?,
            department_id: required("Department", department_id)?,
            avatar: None,
            availability: Availability::new(start, end)?,
        })
    }

    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = non_blank(Some(avatar.into()));
        self
    }

    pub fn department_id(&self) -> &str {
        &self.department_id
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourcePatch {
    pub name: Option<String>,
    pub role: Option<String>,
    pub department_id: Option<DepartmentId>,
    pub avatar: Option<Option<String>>,
    pub availability: Option<Availability>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: BookingId,
    pub resource_id: ResourceId,
    pub project_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub color: HexColor,
}

impl Booking {
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

/// A booking that passed the booking form's checks. Built by
/// [`crate::schedule::booking_form::BookingForm::submit`].
#[derive(Debug, Clone, PartialEq)]
pub struct BookingDraft {
    pub(crate) resource_id: ResourceId,
    pub(crate) project_name: String,
    pub(crate) start_date: NaiveDate,
    pub(crate) end_date: NaiveDate,
    pub(crate) start_time: TimeOfDay,
    pub(crate) end_time: TimeOfDay,
    pub(crate) color: HexColor,
}

impl BookingDraft {
    pub fn resource_id(&self) -> &str {
        &self.resource_id
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn dates(&self) -> (NaiveDate, NaiveDate) {
        (self.start_date, self.end_date)
    }

    pub fn times(&self) -> (TimeOfDay, TimeOfDay) {
        (self.start_time, self.end_time)
    }

    pub fn color(&self) -> &HexColor {
        &self.color
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingPatch {
    pub resource_id: Option<ResourceId>,
    pub project_name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub start_time: Option<TimeOfDay>,
    pub end_time: Option<TimeOfDay>,
    pub color: Option<HexColor>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    #[default]
    Active,
    Completed,
    OnHold,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 3] = [ProjectStatus::Active, ProjectStatus::Completed, ProjectStatus::OnHold];

    pub fn label(&self) -> &'static str {
        match self {
            ProjectStatus::Active => "Active",
            ProjectStatus::Completed => "Completed",
            ProjectStatus::OnHold => "On Hold",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub color: HexColor,
    pub client_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub billable: bool,
    #[serde(default)]
    pub activity_types: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    pub status: ProjectStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectDraft {
    pub(crate) name: String,
    pub(crate) color: HexColor,
    pub(crate) client_name: String,
    pub(crate) start_date: Option<NaiveDate>,
    pub(crate) end_date: Option<NaiveDate>,
    pub(crate) billable: bool,
    pub(crate) activity_types: Vec<String>,
    pub(crate) description: Option<String>,
    pub(crate) budget: Option<f64>,
    pub(crate) status: ProjectStatus,
}

impl ProjectDraft {
    pub fn new(name: impl Into<String>, color: &str, client_name: impl Into<String>) -> Result<Self> {
        Ok(ProjectDraft {
            name: required("Project name", name)?,
            color: HexColor::parse(color)?,
            client_name: required("Client name", client_name)?,
            start_date: None,
            end_date: None,
            billable: true,
            activity_types: Vec::new(),
            description: None,
            budget: None,
            status: ProjectStatus::Active,
        })
    }

    pub fn dates(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<Self> {
        if let (Some(start), Some(end)) = (start, end) {
            if end < start {
                return Err(Error::EndBeforeStart);
            }
        }
        self.start_date = start;
        self.end_date = end;
        Ok(self)
    }

    pub fn budget(mut self, budget: Option<f64>) -> Result<Self> {
        if budget.is_some_and(|amount| amount < 0.0) {
            return Err(Error::NegativeBudget);
        }
        self.budget = budget;
        Ok(self)
    }

    pub fn billable(mut self, billable: bool) -> Self {
        self.billable = billable;
        self
    }

    pub fn activity_types<I, S>(mut self, activity_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.activity_types = activity_types
            .into_iter()
            .map(Into::into)
            .filter(|activity: &String| !activity.trim().is_empty())
            .collect();
        self
    }

    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = non_blank(description);
        self
    }

    pub fn status(mut self, status: ProjectStatus) -> Self {
        self.status = status;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub color: Option<HexColor>,
    pub client_name: Option<String>,
    pub start_date: Option<Option<NaiveDate>>,
    pub end_date: Option<Option<NaiveDate>>,
    pub billable: Option<bool>,
    pub activity_types: Option<Vec<String>>,
    pub description: Option<Option<String>>,
    pub budget: Option<Option<f64>>,
    pub status: Option<ProjectStatus>,
}

impl From<ProjectDraft> for ProjectPatch {
    fn from(draft: ProjectDraft) -> Self {
        ProjectPatch {
            name: Some(draft.name),
            color: Some(draft.color),
            client_name: Some(draft.client_name),
            start_date: Some(draft.start_date),
            end_date: Some(draft.end_date),
            billable: Some(draft.billable),
            activity_types: Some(draft.activity_types),
            description: Some(draft.description),
            budget: Some(draft.budget),
            status: Some(draft.status),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasswordChange {
    pub current: String,
    pub new: String,
    pub confirm: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(text: &str) -> TimeOfDay {
        TimeOfDay::parse(text).unwrap()
    }

    #[test]
    fn test_time_of_day_parse_and_display() {
        assert_eq!(t("09:00").to_string(), "09:00");
        assert_eq!(t("23:30").minutes_since_midnight(), 23 * 60 + 30);
        assert!(TimeOfDay::parse("9:00").is_err());
        assert!(TimeOfDay::parse("24:00").is_err());
        assert!(TimeOfDay::parse("noon").is_err());
        assert!(TimeOfDay::parse(" 9:00").is_err());
        assert!(TimeOfDay::parse("09 00").is_err());
        assert!(TimeOfDay::parse("+9:00").is_err());
        assert!(t("09:30") < t("10:00"));
    }

    #[test]
    fn test_time_of_day_12_hour() {
        assert_eq!(t("09:00").to_12_hour(), "9:00 AM");
        assert_eq!(t("17:00").to_12_hour(), "5:00 PM");
        assert_eq!(t("00:30").to_12_hour(), "12:30 AM");
        assert_eq!(t("12:00").to_12_hour(), "12:00 PM");
    }

    #[test]
    fn test_hex_color() {
        assert!(HexColor::parse("#818cf8").is_ok());
        assert!(HexColor::parse("#ABCDEF").is_ok());
        assert!(HexColor::parse("818cf8").is_err());
        assert!(HexColor::parse("#81cf8").is_err());
        assert!(HexColor::parse("#81cf8g").is_err());
        assert_eq!(HexColor::parse("#ff8000").unwrap().rgb(), [255, 128, 0]);
        assert_eq!(HexColor::from_rgb([52, 211, 153]).as_str(), "#34d399");
    }

    #[test]
    fn test_availability_must_be_ordered() {
        assert!(Availability::new(t("09:00"), t("17:00")).is_ok());
        assert!(Availability::new(t("17:00"), t("09:00")).is_err());
        assert!(Availability::new(t("09:00"), t("09:00")).is_err());

        let backwards: std::result::Result<Availability, _> =
            serde_yaml::from_str("{ start: \"17:00\", end: \"09:00\" }");
        assert!(backwards.is_err());
        let loaded: Availability = serde_yaml::from_str("{ start: \"09:00\", end: \"17:00\" }").unwrap();
        assert_eq!(loaded.end, t("17:00"));

        let availability = Availability::new(t("09:00"), t("17:00")).unwrap();
        assert!(availability.contains(t("09:00")));
        assert!(availability.contains(t("17:00")));
        assert!(!availability.contains(t("17:30")));
    }

    #[test]
    fn test_drafts_reject_missing_fields() {
        assert!(matches!(
            DepartmentDraft::new("  ", "#818cf8", None),
            Err(Error::MissingField(_))
        ));
        assert!(matches!(
            DepartmentDraft::new("QA", "blue", None),
            Err(Error::InvalidColor(_))
        ));
        assert!(matches!(
            ResourceDraft::new("Ann", "", "dev", t("09:00"), t("17:00")),
            Err(Error::MissingField("Role"))
        ));
        assert!(matches!(
            ProjectDraft::new("Site", "#818cf8", "Acme").unwrap().budget(Some(-1.0)),
            Err(Error::NegativeBudget)
        ));
    }

    #[test]
    fn test_form_fields_reject_typos() {
        assert_eq!(parse_date("2024-03-18").unwrap(), NaiveDate::from_ymd_opt(2024, 3, 18).unwrap());
        assert!(matches!(parse_date("2024-13-01"), Err(Error::InvalidDate(_))));
        assert!(matches!(parse_date(""), Err(Error::InvalidDate(_))));

        assert_eq!(parse_optional_date("  ").unwrap(), None);
        assert!(matches!(parse_optional_date("March 18"), Err(Error::InvalidDate(_))));

        assert_eq!(parse_budget("").unwrap(), None);
        assert_eq!(parse_budget(" 5000 ").unwrap(), Some(5000.0));
        assert!(matches!(parse_budget("5000o"), Err(Error::InvalidBudget(_))));
        assert!(matches!(parse_budget("NaN"), Err(Error::InvalidBudget(_))));
    }

    #[test]
    fn test_project_status_serde() {
        let yaml = serde_yaml::to_string(&ProjectStatus::OnHold).unwrap();
        assert_eq!(yaml.trim(), "on-hold");
        let status: ProjectStatus = serde_yaml::from_str("completed").unwrap();
        assert_eq!(status, ProjectStatus::Completed);
    }
}
