//! Session type tags
//!
//! SIS marks every course with a short bracketed tag. Each tag maps to a
//! category class used by the stylesheet and the client-side filter.

use phf::phf_map;
use std::fmt;

/// Kind of teaching session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionType {
    Lecture,
    Project,
    Laboratory,
    Exercise,
    Seminar,
}

/// Short tag to session type
pub static SESSION_TAGS: phf::Map<&'static str, SessionType> = phf_map! {
    "[W]" => SessionType::Lecture,
    "[P]" => SessionType::Project,
    "[L]" => SessionType::Laboratory,
    "[C]" => SessionType::Exercise,
    "[S]" => SessionType::Seminar,
};

impl SessionType {
    /// All session types in filter-bar order
    pub const ALL: [SessionType; 5] = [
        SessionType::Lecture,
        SessionType::Project,
        SessionType::Laboratory,
        SessionType::Exercise,
        SessionType::Seminar,
    ];

    /// Look up a short tag such as `[W]`
    pub fn from_tag(tag: &str) -> Option<Self> {
        SESSION_TAGS.get(tag.trim()).copied()
    }

    /// The short tag as printed by SIS
    pub fn tag(&self) -> &'static str {
        match self {
            SessionType::Lecture => "[W]",
            SessionType::Project => "[P]",
            SessionType::Laboratory => "[L]",
            SessionType::Exercise => "[C]",
            SessionType::Seminar => "[S]",
        }
    }

    /// CSS category class
    pub fn css_class(&self) -> &'static str {
        match self {
            SessionType::Lecture => "lecture",
            SessionType::Project => "project",
            SessionType::Laboratory => "laboratory",
            SessionType::Exercise => "exercise",
            SessionType::Seminar => "seminar",
        }
    }
}

impl fmt::Display for SessionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_class())
    }
}
