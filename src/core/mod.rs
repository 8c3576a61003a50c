//! Core conversion modules
//!
//! The pipeline runs in this order:
//! - `source`: reads the SIS table out of the page
//! - `tokenizer`: splits each cell into course occurrences
//! - `moves`: relocates courses on request
//! - `merge`: folds consecutive slots into multi-hour blocks
//! - `render`: writes the restructured grid as HTML
//!
//! `converter` wires the stages together.

pub mod converter;
pub mod grid;
pub mod merge;
pub mod moves;
pub mod occurrence;
pub mod options;
pub mod render;
pub mod room;
pub mod source;
pub mod tokenizer;

pub use converter::TimetableConverter;
pub use grid::Grid;
pub use merge::{merge_consecutive, MergeSummary};
pub use moves::{apply_moves, MoveDirective, MoveSource, MoveTarget};
pub use occurrence::{CourseDetails, CourseOccurrence};
pub use options::TimetableOptions;
pub use render::{escape_html, ClassList, GridRenderer};
pub use room::RoomPattern;
pub use source::{read_table, SourceTable};
pub use tokenizer::{CellNode, CellTokenizer, CellTokens};
