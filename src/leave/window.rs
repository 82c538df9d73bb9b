//! Report date window.

use chrono::{Days, Months, NaiveDate};
use std::fmt;

use crate::constants::leave::{FILE_STAMP_FORMAT, FORM_DATE_FORMAT};
use crate::types::{FlowError, Result};

/// Inclusive start/end dates of one leave report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ReportWindow {
    /// Window starting `lead_days` after `today` and running `months` calendar
    /// months. Month ends clamp (31 Jan + 1 month = 28/29 Feb).
    pub fn from_today(today: NaiveDate, lead_days: i64, months: u32) -> Result<Self> {
        let start = if lead_days >= 0 {
            today.checked_add_days(Days::new(lead_days.unsigned_abs()))
        } else {
            today.checked_sub_days(Days::new(lead_days.unsigned_abs()))
        }
        .ok_or_else(|| FlowError::Config(format!("lead_days {} is out of range", lead_days)))?;

        let end = start
            .checked_add_months(Months::new(months))
            .ok_or_else(|| FlowError::Config(format!("window_months {} is out of range", months)))?;

        Ok(Self { start, end })
    }

    /// Start date as typed into the portal form
    pub fn form_start(&self) -> String {
        self.start.format(FORM_DATE_FORMAT).to_string()
    }

    /// End date as typed into the portal form
    pub fn form_end(&self) -> String {
        self.end.format(FORM_DATE_FORMAT).to_string()
    }

    /// Start date stamp used in the renamed file
    pub fn stamp(&self) -> String {
        self.start.format(FILE_STAMP_FORMAT).to_string()
    }

    /// `<prefix>_<stamp>.xlsx`
    pub fn report_file_name(&self, prefix: &str) -> String {
        format!("{}_{}.xlsx", prefix, self.stamp())
    }
}

impl fmt::Display for ReportWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.form_start(), self.form_end())
    }
}
