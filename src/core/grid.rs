//! Day x hour schedule grid

use super::occurrence::CourseOccurrence;

/// Fixed-size schedule indexed by day and hour slot
///
/// Each slot holds its occurrences in source order; the order decides
/// left/right placement when the grid is rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    days: usize,
    hours: usize,
    /// `cells[day][hour]`
    cells: Vec<Vec<Vec<CourseOccurrence>>>,
}

impl Grid {
    /// Create an empty grid
    pub fn new(days: usize, hours: usize) -> Self {
        Grid {
            days,
            hours,
            cells: vec![vec![Vec::new(); hours]; days],
        }
    }

    pub fn days(&self) -> usize {
        self.days
    }

    pub fn hours(&self) -> usize {
        self.hours
    }

    pub fn contains(&self, day: usize, hour: usize) -> bool {
        day < self.days && hour < self.hours
    }

    /// Occurrences in one slot (empty slice when out of range)
    pub fn cell(&self, day: usize, hour: usize) -> &[CourseOccurrence] {
        self.cells
            .get(day)
            .and_then(|d| d.get(hour))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn cell_mut(&mut self, day: usize, hour: usize) -> Option<&mut Vec<CourseOccurrence>> {
        self.cells.get_mut(day).and_then(|d| d.get_mut(hour))
    }

    /// All hour slots of one day
    pub fn day(&self, day: usize) -> &[Vec<CourseOccurrence>] {
        self.cells.get(day).map(Vec::as_slice).unwrap_or(&[])
    }

    pub(crate) fn day_mut(&mut self, day: usize) -> Option<&mut Vec<Vec<CourseOccurrence>>> {
        self.cells.get_mut(day)
    }

    /// Append an occurrence to a slot. Returns false when out of range.
    pub fn push(&mut self, day: usize, hour: usize, occurrence: CourseOccurrence) -> bool {
        match self.cell_mut(day, hour) {
            Some(cell) => {
                cell.push(occurrence);
                true
            }
            None => false,
        }
    }

    /// Append several occurrences to a slot, keeping their order
    pub fn extend(
        &mut self,
        day: usize,
        hour: usize,
        occurrences: impl IntoIterator<Item = CourseOccurrence>,
    ) -> bool {
        match self.cell_mut(day, hour) {
            Some(cell) => {
                cell.extend(occurrences);
                true
            }
            None => false,
        }
    }

    /// Remove and return the occurrence at `index` in a slot
    pub fn take(&mut self, day: usize, hour: usize, index: usize) -> Option<CourseOccurrence> {
        let cell = self.cell_mut(day, hour)?;
        if index < cell.len() {
            Some(cell.remove(index))
        } else {
            None
        }
    }

    /// Iterate over every real (non-placeholder) occurrence with its position
    pub fn occurrences(&self) -> impl Iterator<Item = (usize, usize, &CourseOccurrence)> {
        self.cells.iter().enumerate().flat_map(|(day, hours)| {
            hours.iter().enumerate().flat_map(move |(hour, cell)| {
                cell.iter()
                    .filter(|c| !c.is_placeholder())
                    .map(move |c| (day, hour, c))
            })
        })
    }
}
