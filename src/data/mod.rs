//! Data layer - Static mappings and constants
//!
//! - Grid defaults and day labels
//! - Session tag to category mapping

pub mod constants;
pub mod session_types;

pub use constants::{
    DEFAULT_DAYS, DEFAULT_DAY_ABBREVIATIONS, DEFAULT_HOURS, DEFAULT_START_HOUR,
    DEFAULT_WEEKDAY_NAMES, MOVE_SEARCH_SPAN,
};
pub use session_types::{SessionType, SESSION_TAGS};
