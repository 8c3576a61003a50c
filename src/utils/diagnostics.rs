//! Timetable diagnostics
//!
//! Checks a SIS page without producing output. It reports:
//!
//! - Structural problems (missing table, grid too small)
//! - Cells whose last course record is incomplete
//! - Session tags with no category
//!
//! ## Example
//!
//! ```rust
//! use sisplan::diagnostics::check_timetable;
//! use sisplan::TimetableOptions;
//!
//! let result = check_timetable("<p>no table</p>", &TimetableOptions::default());
//! assert!(result.has_errors());
//! ```

use std::fmt;

use fxhash::FxHashMap;

use crate::core::converter::TimetableConverter;
use crate::core::options::TimetableOptions;
use crate::data::session_types::SessionType;
use crate::utils::error::{CellLocation, ConversionWarning, WarningKind};

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DiagnosticLevel {
    /// Informational note
    Info,
    /// Warning - the output will be missing something
    Warning,
    /// Error - conversion will fail
    Error,
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticLevel::Info => write!(f, "info"),
            DiagnosticLevel::Warning => write!(f, "warning"),
            DiagnosticLevel::Error => write!(f, "error"),
        }
    }
}

/// A single diagnostic message
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Severity level
    pub level: DiagnosticLevel,
    /// Human-readable message
    pub message: String,
    /// Grid cell the message is about
    pub location: Option<CellLocation>,
    /// Relevant source text
    pub source_text: Option<String>,
    /// Suggested fix
    pub suggestion: Option<String>,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(level: DiagnosticLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            location: None,
            source_text: None,
            suggestion: None,
        }
    }

    /// Add location information
    pub fn with_location(mut self, location: CellLocation) -> Self {
        self.location = Some(location);
        self
    }

    /// Add source text
    pub fn with_source(mut self, text: impl Into<String>) -> Self {
        self.source_text = Some(text.into());
        self
    }

    /// Add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl From<&ConversionWarning> for Diagnostic {
    fn from(warning: &ConversionWarning) -> Self {
        let diag = Diagnostic::new(
            DiagnosticLevel::Warning,
            format!("{}: {}", warning.kind, warning.message),
        );
        match warning.location {
            Some(location) => diag.with_location(location),
            None => diag,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: level: message
        //         --> day 2, 9:00
        //         |
        //         | source text
        //         = help: suggestion

        write!(f, "{}: {}", self.level, self.message)?;

        if let Some(location) = self.location {
            write!(f, "\n  --> {}", location)?;
        }

        if let Some(ref source) = self.source_text {
            write!(f, "\n  |\n  | {}", source)?;
        }

        if let Some(ref suggestion) = self.suggestion {
            write!(f, "\n  = help: {}", suggestion)?;
        }

        Ok(())
    }
}

/// Check result with summary
#[derive(Debug, Default)]
pub struct CheckResult {
    /// All diagnostics
    pub diagnostics: Vec<Diagnostic>,
    /// Number of errors
    pub errors: usize,
    /// Number of warnings
    pub warnings: usize,
    /// Number of info messages
    pub infos: usize,
}

impl CheckResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic
    pub fn add(&mut self, diag: Diagnostic) {
        match diag.level {
            DiagnosticLevel::Error => self.errors += 1,
            DiagnosticLevel::Warning => self.warnings += 1,
            DiagnosticLevel::Info => self.infos += 1,
        }
        self.diagnostics.push(diag);
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }

    /// Check if there are any issues at all
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Get summary string
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if self.errors > 0 {
            parts.push(plural(self.errors, "error"));
        }
        if self.warnings > 0 {
            parts.push(plural(self.warnings, "warning"));
        }
        if self.infos > 0 {
            parts.push(plural(self.infos, "note"));
        }
        if parts.is_empty() {
            "no issues found".to_string()
        } else {
            parts.join(", ")
        }
    }
}

fn plural(count: usize, noun: &str) -> String {
    format!("{} {}{}", count, noun, if count == 1 { "" } else { "s" })
}

/// Check a SIS page for issues
pub fn check_timetable(html: &str, options: &TimetableOptions) -> CheckResult {
    let mut result = CheckResult::new();

    let converter = match TimetableConverter::new(options.clone()) {
        Ok(converter) => converter,
        Err(e) => {
            result.add(Diagnostic::new(DiagnosticLevel::Error, e.to_string()));
            return result;
        }
    };

    let (grid, warnings) = match converter.extract_grid(html) {
        Ok(extracted) => extracted,
        Err(e) => {
            result.add(
                Diagnostic::new(DiagnosticLevel::Error, e.to_string())
                    .with_suggestion("save the SIS timetable page as HTML and pass that file"),
            );
            return result;
        }
    };

    for warning in &warnings {
        let diag = Diagnostic::from(warning);
        let diag = if warning.kind == WarningKind::MalformedCell {
            diag.with_suggestion("every course needs room, type, name and teacher lines")
        } else {
            diag
        };
        result.add(diag);
    }

    // First location and count per unknown tag
    let mut unknown: FxHashMap<&str, (CellLocation, usize)> = FxHashMap::default();
    let mut courses = 0;
    for (day, hour, occurrence) in grid.occurrences() {
        courses += 1;
        let Some(details) = occurrence.details() else {
            continue;
        };
        if details.session_type().is_some() {
            continue;
        }
        unknown
            .entry(details.tag())
            .or_insert((CellLocation::new(day, options.clock_hour(hour)), 0))
            .1 += 1;
    }

    let mut unknown: Vec<_> = unknown.into_iter().collect();
    unknown.sort_by_key(|(_, (location, _))| (location.day, location.hour));
    let known = SessionType::ALL
        .iter()
        .map(|ty| ty.tag())
        .collect::<Vec<_>>()
        .join(" ");
    for (tag, (location, count)) in unknown {
        result.add(
            Diagnostic::new(
                DiagnosticLevel::Error,
                format!(
                    "unknown session type '{}' ({} occurrence{})",
                    tag,
                    count,
                    if count == 1 { "" } else { "s" }
                ),
            )
            .with_location(location)
            .with_source(tag)
            .with_suggestion(format!("known types are {}", known)),
        );
    }

    result.add(Diagnostic::new(
        DiagnosticLevel::Info,
        format!(
            "{} found in a {}x{} grid",
            plural(courses, "course"),
            grid.days(),
            grid.hours()
        ),
    ));

    result
}

/// Format diagnostics for terminal output
pub fn format_diagnostics(result: &CheckResult, use_color: bool) -> String {
    let mut output = String::new();

    for diag in &result.diagnostics {
        if use_color {
            let color = match diag.level {
                DiagnosticLevel::Error => "\x1b[31m",   // Red
                DiagnosticLevel::Warning => "\x1b[33m", // Yellow
                DiagnosticLevel::Info => "\x1b[34m",    // Blue
            };
            output.push_str(color);
            output.push_str(&format!("{}", diag));
            output.push_str("\x1b[0m\n\n");
        } else {
            output.push_str(&format!("{}\n\n", diag));
        }
    }

    if use_color {
        if result.has_errors() {
            output.push_str("\x1b[31m");
        } else if result.warnings > 0 {
            output.push_str("\x1b[33m");
        } else {
            output.push_str("\x1b[32m");
        }
    }

    output.push_str(&format!("Summary: {}", result.summary()));

    if use_color {
        output.push_str("\x1b[0m");
    }

    output
}
