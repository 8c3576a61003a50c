//! Conversion pipeline
//!
//! Read the source table, tokenize every cell into the grid, apply move
//! directives, merge consecutive slots and render.

use super::grid::Grid;
use super::merge::merge_consecutive;
use super::moves::{apply_moves, MoveDirective};
use super::options::TimetableOptions;
use super::render::GridRenderer;
use super::source::{read_table, SourceTable};
use super::tokenizer::CellTokenizer;
use crate::utils::error::{
    CellLocation, ConversionError, ConversionOutput, ConversionResult, ConversionWarning,
    WarningKind,
};

/// Timetable converter
///
/// Holds validated options and the compiled room pattern, so one converter
/// can process many documents.
#[derive(Debug, Clone)]
pub struct TimetableConverter {
    options: TimetableOptions,
    tokenizer: CellTokenizer,
}

impl TimetableConverter {
    pub fn new(options: TimetableOptions) -> ConversionResult<Self> {
        options.validate()?;
        let tokenizer = CellTokenizer::from_options(&options)?;
        Ok(TimetableConverter { options, tokenizer })
    }

    /// Parse a `;`-separated move list against this converter's day tokens
    /// and room prefixes
    pub fn parse_moves(&self, input: &str) -> (Vec<MoveDirective>, Vec<ConversionWarning>) {
        MoveDirective::parse_list(input, self.tokenizer.rooms(), &self.options)
    }

    /// Build the grid from a source document.
    ///
    /// Returns the grid with one warning per cell whose trailing record was
    /// dropped.
    pub fn extract_grid(&self, html: &str) -> ConversionResult<(Grid, Vec<ConversionWarning>)> {
        let table = read_table(html)?;
        self.check_shape(&table)?;

        let mut grid = Grid::new(self.options.days, self.options.hours);
        let mut warnings = Vec::new();

        for (hour, row) in table.rows.iter().enumerate() {
            for (day, nodes) in row.iter().enumerate() {
                let tokens = self.tokenizer.tokenize(nodes);
                if let Some(dropped) = tokens.dropped {
                    warnings.push(ConversionWarning::at(
                        WarningKind::MalformedCell,
                        format!("incomplete course dropped: {}", dropped),
                        CellLocation::new(day, self.options.clock_hour(hour)),
                    ));
                }
                grid.extend(day, hour, tokens.occurrences);
            }
        }

        Ok((grid, warnings))
    }

    fn check_shape(&self, table: &SourceTable) -> ConversionResult<()> {
        if table.row_count() > self.options.hours {
            return Err(ConversionError::structure(format!(
                "table has {} hour rows, timetable holds {}",
                table.row_count(),
                self.options.hours
            )));
        }
        if table.column_count() > self.options.days {
            return Err(ConversionError::structure(format!(
                "table has {} day columns, timetable holds {}",
                table.column_count(),
                self.options.days
            )));
        }
        Ok(())
    }

    /// Run the full pipeline on one document
    pub fn convert(
        &self,
        html: &str,
        moves: &[MoveDirective],
    ) -> ConversionResult<ConversionOutput> {
        let (mut grid, mut warnings) = self.extract_grid(html)?;

        warnings.extend(apply_moves(&mut grid, moves, &self.options));
        if self.options.merge_consecutive {
            merge_consecutive(&mut grid);
        }

        let content = GridRenderer::new(&self.options).render(&grid)?;
        Ok(ConversionOutput::with_warnings(content, warnings))
    }
}
