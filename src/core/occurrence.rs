//! Course records
//!
//! A `CourseDetails` is the frozen content of one course as read from a
//! cell. A `CourseOccurrence` places those details in one grid slot and
//! carries the bookkeeping the merge pass writes.

use crate::data::session_types::SessionType;

/// Content of one course entry
///
/// Built once by the tokenizer and never changed afterwards. Equality of
/// details is what makes two occurrences equivalent.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CourseDetails {
    room: Option<String>,
    tag: String,
    name: String,
    teacher: String,
    note: Option<String>,
}

impl CourseDetails {
    pub fn new(
        room: Option<String>,
        tag: impl Into<String>,
        name: impl Into<String>,
        teacher: impl Into<String>,
        note: Option<String>,
    ) -> Self {
        CourseDetails {
            room,
            tag: tag.into(),
            name: name.into(),
            teacher: teacher.into(),
            note,
        }
    }

    pub fn room(&self) -> Option<&str> {
        self.room.as_deref()
    }

    /// Raw session tag, e.g. `[W]`
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn teacher(&self) -> &str {
        &self.teacher
    }

    /// Supplementary text such as a date range
    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    /// Session type for the tag, if it is a known one
    pub fn session_type(&self) -> Option<SessionType> {
        SessionType::from_tag(&self.tag)
    }
}

/// One course scheduled in one grid slot
#[derive(Debug, Clone, PartialEq)]
pub struct CourseOccurrence {
    /// `None` for the placeholder of an empty cell
    details: Option<CourseDetails>,
    /// Number of consecutive slots this occurrence covers
    pub span_hours: usize,
    /// Folded into an earlier occurrence by the merge pass
    pub absorbed: bool,
    /// Later duplicate of an earlier occurrence; rendered suppressed
    pub marked_for_removal: bool,
}

impl CourseOccurrence {
    pub fn new(details: CourseDetails) -> Self {
        CourseOccurrence {
            details: Some(details),
            span_hours: 1,
            absorbed: false,
            marked_for_removal: false,
        }
    }

    /// Placeholder standing for an empty cell
    pub fn placeholder() -> Self {
        CourseOccurrence {
            details: None,
            span_hours: 1,
            absorbed: false,
            marked_for_removal: false,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.details.is_none()
    }

    pub fn details(&self) -> Option<&CourseDetails> {
        self.details.as_ref()
    }

    pub fn room(&self) -> Option<&str> {
        self.details.as_ref().and_then(|d| d.room())
    }

    /// Whether later slots were folded into this one
    pub fn is_merged(&self) -> bool {
        self.span_hours > 1
    }

    /// Same room, tag, name, teacher and note.
    ///
    /// Span and merge flags are not compared.
    pub fn is_equivalent(&self, other: &CourseOccurrence) -> bool {
        self.details == other.details
    }
}
