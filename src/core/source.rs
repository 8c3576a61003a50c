//! Source document reader
//!
//! Pulls the timetable table out of the SIS page. The first row is the
//! header with day names and is skipped; in every other row the first cell
//! holds the hour label and is skipped as well. What remains is one node
//! sequence per day and hour.

use scraper::{ElementRef, Html, Node, Selector};

use super::tokenizer::CellNode;
use crate::utils::error::{ConversionError, ConversionResult};

/// Cell contents of the source table, `rows[hour][day]`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceTable {
    pub rows: Vec<Vec<Vec<CellNode>>>,
}

impl SourceTable {
    /// Number of hour rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Widest row, in day cells
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}

fn selector(css: &str) -> ConversionResult<Selector> {
    Selector::parse(css)
        .map_err(|e| ConversionError::structure(format!("selector '{}': {:?}", css, e)))
}

/// Read the first `<table>` of an HTML document
pub fn read_table(html: &str) -> ConversionResult<SourceTable> {
    let document = Html::parse_document(html);
    let table_selector = selector("table")?;

    let table = document
        .select(&table_selector)
        .next()
        .ok_or_else(|| ConversionError::structure("no <table> element found"))?;

    let rows: Vec<Vec<Vec<CellNode>>> = table_rows(table)
        .into_iter()
        .skip(1)
        .map(|row| {
            row.children()
                .filter_map(ElementRef::wrap)
                .filter(|cell| matches!(cell.value().name(), "td" | "th"))
                .skip(1)
                .map(cell_nodes)
                .collect()
        })
        .collect();

    if rows.is_empty() {
        return Err(ConversionError::structure(
            "the table has no rows below its header",
        ));
    }

    Ok(SourceTable { rows })
}

/// Rows owned by `table` itself, directly or through its row groups.
/// Rows of tables nested inside cells are not included.
fn table_rows(table: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    let mut rows = Vec::new();
    for child in table.children().filter_map(ElementRef::wrap) {
        match child.value().name() {
            "tr" => rows.push(child),
            "thead" | "tbody" | "tfoot" => rows.extend(
                child
                    .children()
                    .filter_map(ElementRef::wrap)
                    .filter(|row| row.value().name() == "tr"),
            ),
            _ => {}
        }
    }
    rows
}

/// Child nodes of one cell
fn cell_nodes(cell: ElementRef<'_>) -> Vec<CellNode> {
    cell.children()
        .filter_map(|node| match node.value() {
            Node::Text(text) => Some(CellNode::text(&**text)),
            Node::Element(element) if element.name() == "br" => Some(CellNode::LineBreak),
            Node::Element(_) => {
                ElementRef::wrap(node).map(|el| CellNode::inline(el.text().collect::<String>()))
            }
            _ => None,
        })
        .collect()
}
