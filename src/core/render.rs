//! Grid renderer
//!
//! Writes the merged grid as a standalone HTML page. Layout is driven
//! entirely by CSS classes:
//!
//! ```text
//! timetable-container
//! ├── (hour column)  cell empty-in-corner, cell hour × N
//! └── day × D        day-name, cell course-container × N
//!                                └── course block × 0..k
//! ```

use std::borrow::Cow;
use std::fmt::{self, Write};

use indexmap::IndexSet;

use super::grid::Grid;
use super::occurrence::{CourseDetails, CourseOccurrence};
use super::options::TimetableOptions;
use crate::data::session_types::SessionType;
use crate::utils::error::{CellLocation, ConversionError, ConversionResult};

/// Ordered, de-duplicated list of CSS classes
#[derive(Debug, Clone, Default)]
pub struct ClassList(IndexSet<Cow<'static, str>>);

impl ClassList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, class: impl Into<Cow<'static, str>>) -> Self {
        self.push(class);
        self
    }

    pub fn push(&mut self, class: impl Into<Cow<'static, str>>) {
        self.0.insert(class.into());
    }
}

impl fmt::Display for ClassList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, class) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_char(' ')?;
            }
            f.write_str(class)?;
        }
        Ok(())
    }
}

/// Escape text for HTML element content and attribute values
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 8);
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}

/// Class marking how many slots a block covers, if more than one
pub fn span_class(span_hours: usize) -> Option<Cow<'static, str>> {
    match span_hours {
        0 | 1 => None,
        2 => Some(Cow::Borrowed("double")),
        3 => Some(Cow::Borrowed("triple")),
        n => Some(Cow::Owned(format!("span-{}", n))),
    }
}

/// Renders a grid to HTML
pub struct GridRenderer<'a> {
    options: &'a TimetableOptions,
}

impl<'a> GridRenderer<'a> {
    pub fn new(options: &'a TimetableOptions) -> Self {
        GridRenderer { options }
    }

    /// Render the full document.
    ///
    /// Fails on the first course whose session tag has no category.
    pub fn render(&self, grid: &Grid) -> ConversionResult<String> {
        let mut out = String::new();
        self.write_document(&mut out, grid)?;
        Ok(out)
    }

    fn write_document(&self, out: &mut String, grid: &Grid) -> ConversionResult<()> {
        let _ = writeln!(out, "<!DOCTYPE html>");
        let _ = writeln!(out, "<html>");
        let _ = writeln!(out, "<head>");
        let _ = writeln!(out, "<meta charset=\"utf-8\">");
        let _ = writeln!(
            out,
            "<link rel=\"stylesheet\" href=\"{}\" type=\"text/css\">",
            escape_html(&self.options.stylesheet)
        );
        if let Some(script) = &self.options.script {
            let _ = writeln!(out, "<script src=\"{}\"></script>", escape_html(script));
        }
        let _ = writeln!(out, "</head>");

        if self.options.script.is_some() {
            let _ = writeln!(out, "<body onload=\"enable_all()\">");
            self.write_filter_bar(out);
        } else {
            let _ = writeln!(out, "<body>");
        }

        let _ = writeln!(out, "<div class=\"timetable-container\">");
        self.write_hour_column(out, grid.hours());
        for day in 0..grid.days() {
            self.write_day(out, grid, day)?;
        }
        let _ = writeln!(out, "</div>");
        let _ = writeln!(out, "</body>");
        let _ = writeln!(out, "</html>");
        Ok(())
    }

    fn write_filter_bar(&self, out: &mut String) {
        let _ = writeln!(out, "<div class=\"filter-bar\">");
        for ty in SessionType::ALL {
            let _ = writeln!(
                out,
                "<button class=\"toggle_button\" id=\"{}\">{} {}</button>",
                ty.css_class(),
                ty.tag(),
                ty.css_class()
            );
        }
        let _ = writeln!(out, "</div>");
    }

    fn write_hour_column(&self, out: &mut String, hours: usize) {
        let _ = writeln!(out, "<div>");
        if self.options.show_day_names {
            let _ = writeln!(out, "<div class=\"cell empty-in-corner\"></div>");
        }
        for slot in 0..hours {
            let _ = writeln!(
                out,
                "<div class=\"cell hour\">{}:00</div>",
                self.options.clock_hour(slot)
            );
        }
        let _ = writeln!(out, "</div>");
    }

    fn write_day(&self, out: &mut String, grid: &Grid, day: usize) -> ConversionResult<()> {
        let _ = writeln!(out, "<div class=\"day\">");
        if self.options.show_day_names {
            let name = self
                .options
                .weekday_names
                .get(day)
                .map(String::as_str)
                .unwrap_or_default();
            let _ = writeln!(out, "<div class=\"day-name\">{}</div>", escape_html(name));
        }
        for (slot, cell) in grid.day(day).iter().enumerate() {
            let location = CellLocation::new(day, self.options.clock_hour(slot));
            self.write_cell(out, cell, location)?;
        }
        let _ = writeln!(out, "</div>");
        Ok(())
    }

    fn write_cell(
        &self,
        out: &mut String,
        cell: &[CourseOccurrence],
        location: CellLocation,
    ) -> ConversionResult<()> {
        let visible: Vec<&CourseOccurrence> =
            cell.iter().filter(|c| !c.is_placeholder()).collect();

        let mut classes = ClassList::new().with("cell").with("course-container");
        if visible.is_empty() {
            classes.push("empty");
        } else if self.options.merge_consecutive && visible.iter().all(|c| c.marked_for_removal) {
            classes.push("deleted");
        }

        let _ = writeln!(out, "<div class=\"{}\">", classes);
        for (index, occurrence) in visible.iter().enumerate() {
            if let Some(details) = occurrence.details() {
                let classes = self.course_classes(occurrence, details, index, visible.len(), location)?;
                write_course(out, details, &classes);
            }
        }
        let _ = writeln!(out, "</div>");
        Ok(())
    }

    /// Classes of one course block
    fn course_classes(
        &self,
        occurrence: &CourseOccurrence,
        details: &CourseDetails,
        index: usize,
        count: usize,
        location: CellLocation,
    ) -> ConversionResult<ClassList> {
        let session = details
            .session_type()
            .ok_or_else(|| ConversionError::unknown_session_type(details.tag(), Some(location)))?;

        let mut classes = ClassList::new().with(session.css_class()).with("course");
        if count > 1 {
            classes.push("half");
        }
        classes.push(if index == 0 { "course-left" } else { "course-right" });

        if self.options.merge_consecutive {
            if occurrence.is_merged() {
                if let Some(span) = span_class(occurrence.span_hours) {
                    classes.push(span);
                }
            }
            if occurrence.marked_for_removal {
                classes.push("deleted");
            }
        }
        Ok(classes)
    }
}

fn write_course(out: &mut String, details: &CourseDetails, classes: &ClassList) {
    let _ = writeln!(out, "<div class=\"{}\">", classes);
    let _ = writeln!(
        out,
        "<div class=\"room\">{}</div>",
        escape_html(details.room().unwrap_or_default())
    );
    let _ = writeln!(
        out,
        "<div class=\"name-type-container\"><span class=\"type\">{}</span><span class=\"name\">{}</span></div>",
        escape_html(details.tag()),
        escape_html(details.name())
    );
    let _ = writeln!(
        out,
        "<div class=\"teacher\">{}</div>",
        escape_html(details.teacher())
    );
    if let Some(note) = details.note() {
        let _ = writeln!(out, "<div class=\"other\">{}</div>", escape_html(note));
    }
    let _ = writeln!(out, "</div>");
}
