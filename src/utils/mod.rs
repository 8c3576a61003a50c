//! Utility modules
//!
//! This module contains utilities and helpers:
//! - Diagnostics and error reporting
//! - Error types and result types

pub mod diagnostics;
pub mod error;

// Re-export commonly used items
pub use diagnostics::{check_timetable, format_diagnostics, Diagnostic, DiagnosticLevel};
pub use error::{
    CellLocation, ConversionError, ConversionOutput, ConversionResult, ConversionWarning,
    WarningKind,
};
