use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;

use crate::dashboard::View;
use crate::error::Result;
use crate::hub::{IdScheme, SeedData};
use crate::schedule::ScheduleView;
use crate::tracing_config::LogFormat;

#[derive(Debug, Clone, Parser)]
#[clap(name = "resourcehub", about = "Book staff by department onto projects")]
pub struct Config {
    /// YAML file with departments, resources, bookings, projects and the user.
    /// The bundled sample data is used when omitted.
    #[clap(long, env = "RESOURCEHUB_SEED")]
    pub seed: Option<PathBuf>,

    /// First day shown on the schedule (YYYY-MM-DD). Defaults to today.
    #[clap(long)]
    pub date: Option<NaiveDate>,

    #[clap(long, value_enum, default_value_t = View::Schedule)]
    pub view: View,

    #[clap(long, value_enum, default_value_t = ScheduleView::Week)]
    pub schedule: ScheduleView,

    #[clap(long, value_enum, default_value_t = IdScheme::Sequential)]
    pub ids: IdScheme,

    #[clap(long, env = "RESOURCEHUB_LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

impl Config {
    pub fn load_seed(&self) -> Result<SeedData> {
        match &self.seed {
            Some(path) => SeedData::load(path),
            None => SeedData::sample(),
        }
    }

    pub fn anchor_or(&self, today: NaiveDate) -> NaiveDate {
        self.date.unwrap_or(today)
    }
}
