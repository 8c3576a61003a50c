//! Default timetable settings
//!
//! These values describe the SIS export the converter was built for:
//! five teaching days, slots from 7:00, Polish day names and room codes
//! prefixed with the building name.

/// Number of day columns in the grid
pub const DEFAULT_DAYS: usize = 5;

/// Number of hour slots in the grid
pub const DEFAULT_HOURS: usize = 14;

/// Clock hour of the first slot
pub const DEFAULT_START_HOUR: usize = 7;

/// Number of consecutive slots searched by a move directive.
///
/// A merged block is at most three slots long in practice.
pub const MOVE_SEARCH_SPAN: usize = 3;

/// Weekday names shown above each day column
pub const DEFAULT_WEEKDAY_NAMES: [&str; DEFAULT_DAYS] =
    ["Poniedziałek", "Wtorek", "Środa", "Czwartek", "Piątek"];

/// Day tokens accepted in move directives, in day order
pub const DEFAULT_DAY_ABBREVIATIONS: [&str; DEFAULT_DAYS] = ["pn", "wt", "sr", "czw", "pt"];

/// Prefixes that start a room code (`NE 101`, `EA 33`, `AUD 1`)
pub const DEFAULT_ROOM_PREFIXES: [&str; 3] = ["EA", "NE", "AUD"];

/// Stylesheet linked from the output head
pub const DEFAULT_STYLESHEET: &str = "stylesheet.css";

/// CLI default input path
pub const DEFAULT_INPUT: &str = "SIS.html";

/// CLI default output path
pub const DEFAULT_OUTPUT: &str = "SIS_out.html";
