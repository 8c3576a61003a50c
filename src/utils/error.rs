//! Error handling for sisplan conversions
//!
//! This module provides a unified error type and result type for all
//! conversion operations, plus the non-fatal warning type that the
//! pipeline collects while it works.

use std::fmt;

/// A cell position in the timetable grid
///
/// `day` is a 0-based day index; `hour` is the clock hour of the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellLocation {
    pub day: usize,
    pub hour: usize,
}

impl CellLocation {
    pub fn new(day: usize, hour: usize) -> Self {
        Self { day, hour }
    }
}

impl fmt::Display for CellLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "day {}, {}:00", self.day + 1, self.hour)
    }
}

/// Conversion error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// The source document does not have the expected table/row/cell shape
    StructureError { message: String },
    /// A course carries a session tag with no category mapping
    UnknownSessionType {
        tag: String,
        location: Option<CellLocation>,
    },
    /// Invalid input (options, settings file)
    InvalidInput { message: String },
    /// IO error (for file operations)
    IoError { message: String },
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionError::StructureError { message } => {
                write!(f, "Structure error: {}", message)
            }
            ConversionError::UnknownSessionType { tag, location } => {
                if let Some(loc) = location {
                    write!(f, "Unknown session type '{}' at {}", tag, loc)
                } else {
                    write!(f, "Unknown session type '{}'", tag)
                }
            }
            ConversionError::InvalidInput { message } => {
                write!(f, "Invalid input: {}", message)
            }
            ConversionError::IoError { message } => {
                write!(f, "IO error: {}", message)
            }
        }
    }
}

impl std::error::Error for ConversionError {}

impl From<std::io::Error> for ConversionError {
    fn from(err: std::io::Error) -> Self {
        ConversionError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type for conversion operations
pub type ConversionResult<T> = Result<T, ConversionError>;

// Convenience constructors for errors
impl ConversionError {
    pub fn structure(message: impl Into<String>) -> Self {
        ConversionError::StructureError {
            message: message.into(),
        }
    }

    pub fn unknown_session_type(tag: impl Into<String>, location: Option<CellLocation>) -> Self {
        ConversionError::UnknownSessionType {
            tag: tag.into(),
            location,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        ConversionError::InvalidInput {
            message: message.into(),
        }
    }
}

/// Kind of non-fatal issue found during conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// Cell content ended before a course record was complete
    MalformedCell,
    /// A move directive could not be parsed or points outside the grid
    InvalidMove,
    /// A move directive matched no course
    UnmatchedMove,
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WarningKind::MalformedCell => write!(f, "malformed cell"),
            WarningKind::InvalidMove => write!(f, "invalid move"),
            WarningKind::UnmatchedMove => write!(f, "unmatched move"),
        }
    }
}

/// Conversion warnings (non-fatal issues)
#[derive(Debug, Clone)]
pub struct ConversionWarning {
    pub kind: WarningKind,
    pub message: String,
    pub location: Option<CellLocation>,
}

impl ConversionWarning {
    pub fn new(kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            location: None,
        }
    }

    pub fn at(kind: WarningKind, message: impl Into<String>, location: CellLocation) -> Self {
        Self {
            kind,
            message: message.into(),
            location: Some(location),
        }
    }

    /// ANSI color used when printing to a terminal
    pub fn color_code(&self) -> &'static str {
        match self.kind {
            WarningKind::MalformedCell => "\x1b[33m",
            WarningKind::InvalidMove => "\x1b[31m",
            WarningKind::UnmatchedMove => "\x1b[36m",
        }
    }
}

impl fmt::Display for ConversionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(loc) = self.location {
            write!(f, "[{}] {}: {}", self.kind, loc, self.message)
        } else {
            write!(f, "[{}] {}", self.kind, self.message)
        }
    }
}

/// Conversion output with optional warnings
#[derive(Debug, Clone)]
pub struct ConversionOutput {
    /// The rendered document
    pub content: String,
    /// Any warnings generated during conversion
    pub warnings: Vec<ConversionWarning>,
}

impl ConversionOutput {
    pub fn new(content: String) -> Self {
        Self {
            content,
            warnings: Vec::new(),
        }
    }

    pub fn with_warnings(content: String, warnings: Vec<ConversionWarning>) -> Self {
        Self { content, warnings }
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
