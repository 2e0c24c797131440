//! Activity summary data models
//!
//! These structures represent daily activity summaries as returned by the
//! health gateway, plus the flat export record derived from them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Energy units the gateway may report quantities in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnergyUnit {
    #[serde(rename = "kcal")]
    Kilocalories,
    #[serde(rename = "kJ")]
    Kilojoules,
    #[serde(rename = "cal")]
    Calories,
}

/// Duration units the gateway may report quantities in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DurationUnit {
    #[serde(rename = "min")]
    Minutes,
    #[serde(rename = "sec")]
    Seconds,
    #[serde(rename = "hr")]
    Hours,
}

/// Unit for dimensionless counts (stand hours)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CountUnit {
    #[serde(rename = "count")]
    Count,
}

/// A numeric value tagged with its unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quantity<U> {
    pub value: f64,
    pub unit: U,
}

impl Quantity<EnergyUnit> {
    /// Value expressed in kilocalories. 1 kcal = 4.184 kJ = 1000 cal.
    pub fn in_kilocalories(&self) -> f64 {
        match self.unit {
            EnergyUnit::Kilocalories => self.value,
            EnergyUnit::Kilojoules => self.value / 4.184,
            EnergyUnit::Calories => self.value / 1000.0,
        }
    }
}

impl Quantity<DurationUnit> {
    /// Value expressed in minutes
    pub fn in_minutes(&self) -> f64 {
        match self.unit {
            DurationUnit::Minutes => self.value,
            DurationUnit::Seconds => self.value / 60.0,
            DurationUnit::Hours => self.value * 60.0,
        }
    }
}

impl Quantity<CountUnit> {
    /// Value as a unitless count
    pub fn in_count(&self) -> f64 {
        self.value
    }
}

/// Calendar-component date representation used by the gateway.
///
/// The gateway keys summaries by explicit components under a named calendar
/// rather than a timestamp, so the calendar tag travels with the components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateComponents {
    /// Era (1 = CE under the gregorian calendar)
    pub era: i32,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    /// Calendar system the components are expressed in
    pub calendar: String,
}

impl DateComponents {
    /// Build gregorian components from a calendar date
    pub fn from_date(date: NaiveDate) -> Self {
        use chrono::Datelike;
        Self {
            era: 1,
            year: date.year(),
            month: date.month(),
            day: date.day(),
            calendar: "gregorian".to_string(),
        }
    }

    /// Resolve the components to a calendar date.
    ///
    /// Returns `None` for a non-gregorian calendar tag or components that do
    /// not name a valid day (e.g. month 13).
    pub fn resolve(&self) -> Option<NaiveDate> {
        if self.calendar != "gregorian" || self.era != 1 {
            return None;
        }
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

/// One raw daily summary as returned by the gateway's range query.
///
/// Each metric is paired with the personal goal in effect on that day. The
/// date components are optional on the wire; records without them are handled
/// by the transformer's fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDailySummary {
    /// Active energy burned
    pub active_energy_burned: Quantity<EnergyUnit>,

    /// Active energy goal
    pub active_energy_burned_goal: Quantity<EnergyUnit>,

    /// Exercise time
    pub exercise_time: Quantity<DurationUnit>,

    /// Exercise time goal
    pub exercise_time_goal: Quantity<DurationUnit>,

    /// Stand hours achieved
    pub stand_hours: Quantity<CountUnit>,

    /// Stand hours goal
    pub stand_hours_goal: Quantity<CountUnit>,

    /// Calendar components for the summary's day
    #[serde(default)]
    pub date_components: Option<DateComponents>,
}

/// Flat export record: one per day, six unit-normalized metrics plus the
/// formatted date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivitySummaryRecord {
    /// Active energy burned in kilocalories
    #[serde(rename = "move")]
    pub move_value: f64,

    /// Active energy goal in kilocalories
    pub move_goal: f64,

    /// Exercise time in minutes
    pub exercise: f64,

    /// Exercise time goal in minutes
    pub exercise_goal: f64,

    /// Stand hours achieved
    pub stand: f64,

    /// Stand hours goal
    pub stand_goal: f64,

    /// Calendar date formatted as YYYY-MM-DD
    pub date: String,
}
