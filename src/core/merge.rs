//! Merge pass
//!
//! Folds runs of the same course in consecutive hour slots of one day into
//! a single multi-hour block. The first occurrence of a run keeps the span;
//! the later ones stay in their slots marked for removal, so the renderer can
//! still lay out the column.

use super::grid::Grid;
use super::occurrence::{CourseDetails, CourseOccurrence};

/// What a merge pass changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeSummary {
    /// Occurrences whose span grew
    pub extended: usize,
    /// Occurrences newly marked for removal
    pub removed: usize,
}

impl MergeSummary {
    /// True when the pass changed nothing
    pub fn is_empty(&self) -> bool {
        self.extended == 0 && self.removed == 0
    }
}

/// Merge consecutive equivalent occurrences in every day column.
///
/// A following slot continues the run only when it holds exactly one
/// equivalent occurrence that no other run has claimed yet; zero or several
/// matches end the run. Running the pass again on a merged grid is a no-op.
pub fn merge_consecutive(grid: &mut Grid) -> MergeSummary {
    let mut summary = MergeSummary::default();
    for day in 0..grid.days() {
        if let Some(column) = grid.day_mut(day) {
            merge_day(column, &mut summary);
        }
    }
    summary
}

fn merge_day(column: &mut [Vec<CourseOccurrence>], summary: &mut MergeSummary) {
    for hour in 0..column.len() {
        for index in 0..column[hour].len() {
            let occurrence = &mut column[hour][index];
            if occurrence.is_placeholder() {
                continue;
            }
            if occurrence.absorbed {
                if !occurrence.marked_for_removal {
                    occurrence.marked_for_removal = true;
                    summary.removed += 1;
                }
                continue;
            }
            let Some(details) = occurrence.details().cloned() else {
                continue;
            };

            let claimed = claim_run(&mut column[hour + 1..], &details);
            if claimed > 0 {
                column[hour][index].span_hours += claimed;
                summary.extended += 1;
            }
        }
    }
}

/// Walk forward from the slot after a run's head, absorbing one
/// continuation per slot. Returns the number of slots claimed.
fn claim_run(following: &mut [Vec<CourseOccurrence>], details: &CourseDetails) -> usize {
    let mut claimed = 0;
    for slot in following.iter_mut() {
        let mut matches = slot.iter_mut().filter(|c| c.details() == Some(details));
        match (matches.next(), matches.next()) {
            (Some(next), None) if !next.absorbed => {
                next.absorbed = true;
                claimed += 1;
            }
            _ => break,
        }
    }
    claimed
}
