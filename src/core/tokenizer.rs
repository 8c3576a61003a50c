//! Cell tokenizer
//!
//! Decodes the loose child-node sequence of one timetable cell into course
//! records. Each record is read by a small state machine:
//!
//! ```text
//! Room -> Type -> Name -> Teacher -> Other
//!   ^                                 |
//!   +---- note consumed, or a room ---+
//! ```
//!
//! Line breaks and whitespace-only text nodes separate fields and never
//! move the machine.

use lazy_static::lazy_static;
use regex::Regex;

use super::occurrence::{CourseDetails, CourseOccurrence};
use super::options::TimetableOptions;
use super::room::RoomPattern;
use crate::utils::error::ConversionResult;

lazy_static! {
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}

/// One child node of a table cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellNode {
    /// A bare text node
    Text(String),
    /// Any inline element, reduced to its text content
    Inline(String),
    /// A `<br>` element
    LineBreak,
}

impl CellNode {
    pub fn text(s: impl Into<String>) -> Self {
        CellNode::Text(s.into())
    }

    pub fn inline(s: impl Into<String>) -> Self {
        CellNode::Inline(s.into())
    }

    /// Text content with whitespace runs collapsed and trimmed
    pub fn content(&self) -> Option<String> {
        let raw = match self {
            CellNode::Text(s) | CellNode::Inline(s) => s,
            CellNode::LineBreak => return None,
        };
        let normalized = WHITESPACE_RUN.replace_all(raw, " ");
        let normalized = normalized.trim();
        if normalized.is_empty() {
            None
        } else {
            Some(normalized.to_string())
        }
    }
}

/// Field the machine expects next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldState {
    Room,
    Type,
    Name,
    Teacher,
    Other,
}

/// What to do with the current node after a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// Node consumed; move on to the next one
    Advance,
    /// Feed the same node again in the new state
    Reprocess,
}

/// Fields collected for the course being read
#[derive(Debug, Default)]
struct PartialCourse {
    room: Option<String>,
    tag: Option<String>,
    name: Option<String>,
    teacher: Option<String>,
}

impl PartialCourse {
    fn finish(self, note: Option<String>) -> CourseDetails {
        CourseDetails::new(
            self.room,
            self.tag.unwrap_or_default(),
            self.name.unwrap_or_default(),
            self.teacher.unwrap_or_default(),
            note,
        )
    }

    fn describe(&self) -> String {
        [&self.room, &self.tag, &self.name, &self.teacher]
            .iter()
            .filter_map(|f| f.as_deref())
            .map(|f| format!("'{}'", f))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Result of tokenizing one cell
#[derive(Debug, Clone, PartialEq)]
pub struct CellTokens {
    /// Courses in source order; a lone placeholder for an empty cell
    pub occurrences: Vec<CourseOccurrence>,
    /// Fields of a trailing record that never reached its teacher
    pub dropped: Option<String>,
}

/// Per-cell extraction state
struct CellMachine<'a> {
    rooms: &'a RoomPattern,
    state: FieldState,
    current: PartialCourse,
    finished: Vec<CourseOccurrence>,
}

impl<'a> CellMachine<'a> {
    fn new(rooms: &'a RoomPattern) -> Self {
        CellMachine {
            rooms,
            state: FieldState::Room,
            current: PartialCourse::default(),
            finished: Vec::new(),
        }
    }

    fn feed(&mut self, text: &str) -> Step {
        match self.state {
            FieldState::Room => self.on_room(text),
            FieldState::Type => self.on_type(text),
            FieldState::Name => self.on_name(text),
            FieldState::Teacher => self.on_teacher(text),
            FieldState::Other => self.on_other(text),
        }
    }

    fn on_room(&mut self, text: &str) -> Step {
        self.current.room = Some(text.to_string());
        self.state = FieldState::Type;
        Step::Advance
    }

    fn on_type(&mut self, text: &str) -> Step {
        self.current.tag = Some(text.to_string());
        self.state = FieldState::Name;
        Step::Advance
    }

    fn on_name(&mut self, text: &str) -> Step {
        self.current.name = Some(text.to_string());
        self.state = FieldState::Teacher;
        Step::Advance
    }

    fn on_teacher(&mut self, text: &str) -> Step {
        self.current.teacher = Some(text.to_string());
        self.state = FieldState::Other;
        Step::Advance
    }

    fn on_other(&mut self, text: &str) -> Step {
        if self.rooms.matches(text) {
            // A second course in the same cell starts without a note
            self.complete(None);
            return Step::Reprocess;
        }
        self.complete(Some(text.to_string()));
        Step::Advance
    }

    fn complete(&mut self, note: Option<String>) {
        let partial = std::mem::take(&mut self.current);
        self.finished.push(CourseOccurrence::new(partial.finish(note)));
        self.state = FieldState::Room;
    }

    fn finish(mut self) -> CellTokens {
        let dropped = match self.state {
            FieldState::Other => {
                self.complete(None);
                None
            }
            FieldState::Room => None,
            FieldState::Type | FieldState::Name | FieldState::Teacher => {
                Some(self.current.describe())
            }
        };
        CellTokens {
            occurrences: self.finished,
            dropped,
        }
    }
}

/// Turns cell node sequences into course occurrences
#[derive(Debug, Clone)]
pub struct CellTokenizer {
    rooms: RoomPattern,
}

impl CellTokenizer {
    pub fn new(rooms: RoomPattern) -> Self {
        CellTokenizer { rooms }
    }

    pub fn from_options(options: &TimetableOptions) -> ConversionResult<Self> {
        Ok(CellTokenizer::new(RoomPattern::from_prefixes(
            &options.room_prefixes,
        )?))
    }

    pub fn rooms(&self) -> &RoomPattern {
        &self.rooms
    }

    /// Tokenize one cell.
    ///
    /// A cell without any content yields a single placeholder. A record cut
    /// short before its teacher is dropped and described in `dropped`.
    pub fn tokenize(&self, nodes: &[CellNode]) -> CellTokens {
        let contents: Vec<String> = nodes.iter().filter_map(CellNode::content).collect();
        if contents.is_empty() {
            return CellTokens {
                occurrences: vec![CourseOccurrence::placeholder()],
                dropped: None,
            };
        }

        let mut machine = CellMachine::new(&self.rooms);
        for text in &contents {
            while machine.feed(text) == Step::Reprocess {}
        }
        machine.finish()
    }
}
