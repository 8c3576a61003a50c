//! # sisplan
//!
//! Restructures a university SIS timetable page into a day/hour grid.
//!
//! ## Features
//!
//! - **Cell Tokenizer**: Splits each table cell into room, type, name, teacher and note
//! - **Moves**: Relocates courses with `room,day,hour -> day,hour` directives
//! - **Merging**: Folds consecutive slots of one course into a multi-hour block
//! - **Rendering**: Emits a class-annotated HTML grid for an external stylesheet
//! - **Diagnostics**: Checks a page for incomplete cells and unknown session types
//!
//! ## Usage Examples
//!
//! ```rust
//! use sisplan::convert_timetable;
//!
//! let page = r#"
//!     <table>
//!       <tr><td></td><td>pn</td></tr>
//!       <tr><td>7</td><td>NE 101<br>[W]<br>Algorithms<br>dr Smith</td></tr>
//!       <tr><td>8</td><td>NE 101<br>[W]<br>Algorithms<br>dr Smith</td></tr>
//!     </table>
//! "#;
//!
//! let html = convert_timetable(page).unwrap();
//! assert!(html.contains("lecture course course-left double"));
//! ```
//!
//! ### Moving courses
//!
//! ```rust
//! use sisplan::{convert_timetable_with_options, TimetableOptions};
//!
//! let page = r#"
//!     <table>
//!       <tr><td></td><td>pn</td><td>wt</td></tr>
//!       <tr><td>7</td><td>NE 101<br>[L]<br>Physics<br>dr Jones</td><td></td></tr>
//!     </table>
//! "#;
//!
//! let output =
//!     convert_timetable_with_options(page, &TimetableOptions::default(), "pn,7 -> wt,9").unwrap();
//! assert!(!output.has_warnings());
//! ```

/// Core conversion modules
pub mod core;

/// Data layer - static mappings and constants
pub mod data;

/// Utility modules
pub mod utils;

// Re-export core conversion types
pub use core::converter::TimetableConverter;
pub use core::grid::Grid;
pub use core::merge::{merge_consecutive, MergeSummary};
pub use core::moves::{apply_moves, MoveDirective};
pub use core::occurrence::{CourseDetails, CourseOccurrence};
pub use core::options::TimetableOptions;
pub use core::render::GridRenderer;
pub use core::tokenizer::{CellNode, CellTokenizer};

// Re-export data modules
pub use data::constants;
pub use data::session_types::SessionType;

// Re-export utilities
pub use utils::diagnostics;
pub use utils::error::{
    CellLocation, ConversionError, ConversionOutput, ConversionResult, ConversionWarning,
    WarningKind,
};

/// Convert a SIS page with default options and no moves
///
/// # Arguments
/// * `html` - The saved SIS timetable page
///
/// # Returns
/// The restructured HTML document
pub fn convert_timetable(html: &str) -> ConversionResult<String> {
    let converter = TimetableConverter::new(TimetableOptions::default())?;
    Ok(converter.convert(html, &[])?.content)
}

/// Convert a SIS page with custom options and a move list
///
/// Move directives that cannot be parsed are reported as warnings in the
/// output next to warnings from the conversion itself.
pub fn convert_timetable_with_options(
    html: &str,
    options: &TimetableOptions,
    moves: &str,
) -> ConversionResult<ConversionOutput> {
    let converter = TimetableConverter::new(options.clone())?;
    let (directives, mut warnings) = converter.parse_moves(moves);
    let output = converter.convert(html, &directives)?;
    warnings.extend(output.warnings);
    Ok(ConversionOutput::with_warnings(output.content, warnings))
}
