//! Conversion options
//!
//! Grid shape, day labels and output chrome are carried by one options
//! struct handed to the converter, instead of module-level constants.

use crate::data::constants::{
    DEFAULT_DAYS, DEFAULT_DAY_ABBREVIATIONS, DEFAULT_HOURS, DEFAULT_ROOM_PREFIXES,
    DEFAULT_START_HOUR, DEFAULT_STYLESHEET, DEFAULT_WEEKDAY_NAMES,
};
use crate::utils::error::{ConversionError, ConversionResult};

/// Options for timetable conversion
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config-file", derive(serde::Deserialize))]
#[cfg_attr(feature = "config-file", serde(default, deny_unknown_fields))]
pub struct TimetableOptions {
    /// Number of day columns
    pub days: usize,
    /// Number of hour slots per day
    pub hours: usize,
    /// Clock hour of the first slot
    pub start_hour: usize,
    /// Names printed above the day columns
    pub weekday_names: Vec<String>,
    /// Day tokens accepted by move directives, in day order
    pub day_abbreviations: Vec<String>,
    /// Whether to print day names and the corner cell
    pub show_day_names: bool,
    /// Whether to merge consecutive identical courses into spans
    pub merge_consecutive: bool,
    /// Prefixes that start a room code
    pub room_prefixes: Vec<String>,
    /// Stylesheet href linked from the output head
    pub stylesheet: String,
    /// Filter script src; enables the filter bar when set
    pub script: Option<String>,
}

impl Default for TimetableOptions {
    fn default() -> Self {
        Self {
            days: DEFAULT_DAYS,
            hours: DEFAULT_HOURS,
            start_hour: DEFAULT_START_HOUR,
            weekday_names: DEFAULT_WEEKDAY_NAMES.iter().map(|s| s.to_string()).collect(),
            day_abbreviations: DEFAULT_DAY_ABBREVIATIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            show_day_names: true,
            merge_consecutive: true,
            room_prefixes: DEFAULT_ROOM_PREFIXES.iter().map(|s| s.to_string()).collect(),
            stylesheet: DEFAULT_STYLESHEET.to_string(),
            script: None,
        }
    }
}

impl TimetableOptions {
    /// Grid without the day-name header row
    pub fn compact() -> Self {
        Self {
            show_day_names: false,
            ..Default::default()
        }
    }

    /// Grid with every slot rendered as parsed (no merging)
    pub fn raw() -> Self {
        Self {
            merge_consecutive: false,
            ..Default::default()
        }
    }

    /// Clock hour of the slot at `index`
    pub fn clock_hour(&self, index: usize) -> usize {
        self.start_hour + index
    }

    /// Slot index of a clock hour, if it lies inside the grid
    pub fn slot_of(&self, clock_hour: usize) -> Option<usize> {
        clock_hour
            .checked_sub(self.start_hour)
            .filter(|&slot| slot < self.hours)
    }

    /// Check that the options describe a usable grid
    pub fn validate(&self) -> ConversionResult<()> {
        if self.days == 0 || self.hours == 0 {
            return Err(ConversionError::invalid(format!(
                "grid must have at least one day and one hour (got {} x {})",
                self.days, self.hours
            )));
        }
        if self.start_hour + self.hours > 24 {
            return Err(ConversionError::invalid(format!(
                "{} slots starting at {}:00 run past midnight",
                self.hours, self.start_hour
            )));
        }
        if self.show_day_names && self.weekday_names.len() < self.days {
            return Err(ConversionError::invalid(format!(
                "{} weekday names given for {} days",
                self.weekday_names.len(),
                self.days
            )));
        }
        if self.day_abbreviations.len() < self.days {
            return Err(ConversionError::invalid(format!(
                "{} day abbreviations given for {} days",
                self.day_abbreviations.len(),
                self.days
            )));
        }
        if self.room_prefixes.iter().all(|p| p.trim().is_empty()) {
            return Err(ConversionError::invalid("no room prefixes configured"));
        }
        Ok(())
    }

    /// Parse options from a TOML settings file body.
    ///
    /// Missing keys keep their default values.
    #[cfg(feature = "config-file")]
    pub fn from_toml_str(input: &str) -> ConversionResult<Self> {
        let options: Self = toml::from_str(input)
            .map_err(|e| ConversionError::invalid(format!("settings file: {}", e)))?;
        options.validate()?;
        Ok(options)
    }

    /// Read options from a TOML settings file
    #[cfg(feature = "config-file")]
    pub fn from_toml_file(path: impl AsRef<std::path::Path>) -> ConversionResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}
