//! Manual move directives
//!
//! SIS sometimes lists a course in the wrong slot. A move directive names
//! the course by room and position and relocates it, along with up to two
//! continuation slots, to another day/hour.
//!
//! Directive syntax: `source -> destination`, several joined with `;`.
//! Each side is a comma-separated token list in any order:
//!
//! ```text
//! NE 101,pn,8 -> sr,10
//! ```
//!
//! A destination without a day or hour keeps the source's value.

use fxhash::FxHashMap;

use super::grid::Grid;
use super::occurrence::CourseOccurrence;
use super::options::TimetableOptions;
use super::room::RoomPattern;
use crate::data::constants::MOVE_SEARCH_SPAN;
use crate::utils::error::{CellLocation, ConversionWarning, WarningKind};

/// Where a moved course currently is
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveSource {
    pub room: Option<String>,
    /// 1-based day number
    pub day: usize,
    /// Clock hour
    pub hour: usize,
}

/// Where a moved course should go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveTarget {
    /// 1-based day number
    pub day: usize,
    /// Clock hour
    pub hour: usize,
}

/// One relocation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveDirective {
    pub source: MoveSource,
    pub target: MoveTarget,
}

/// Tokens found on one side of a directive
#[derive(Debug, Default)]
struct SideTokens {
    room: Option<String>,
    day: Option<usize>,
    hour: Option<usize>,
    unknown: Vec<String>,
}

/// Classifies directive tokens
struct TokenReader<'a> {
    rooms: &'a RoomPattern,
    days: FxHashMap<String, usize>,
}

impl<'a> TokenReader<'a> {
    fn new(rooms: &'a RoomPattern, options: &TimetableOptions) -> Self {
        let days = options
            .day_abbreviations
            .iter()
            .take(options.days)
            .enumerate()
            .map(|(i, abbr)| (abbr.trim().to_ascii_lowercase(), i + 1))
            .collect();
        TokenReader { rooms, days }
    }

    fn read(&self, side: &str) -> SideTokens {
        let mut tokens = SideTokens::default();
        for token in side.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            if let Ok(hour) = token.parse::<usize>() {
                tokens.hour.get_or_insert(hour);
            } else if let Some(&day) = self.days.get(&token.to_ascii_lowercase()) {
                tokens.day.get_or_insert(day);
            } else if self.rooms.matches(token) {
                tokens.room.get_or_insert_with(|| token.to_string());
            } else {
                tokens.unknown.push(token.to_string());
            }
        }
        tokens
    }
}

impl MoveDirective {
    pub fn new(room: Option<&str>, day: usize, hour: usize, to_day: usize, to_hour: usize) -> Self {
        MoveDirective {
            source: MoveSource {
                room: room.map(String::from),
                day,
                hour,
            },
            target: MoveTarget {
                day: to_day,
                hour: to_hour,
            },
        }
    }

    /// Parse a `;`-separated directive list.
    ///
    /// Directives that cannot be understood are skipped with a warning; the
    /// rest are returned in input order.
    pub fn parse_list(
        input: &str,
        rooms: &RoomPattern,
        options: &TimetableOptions,
    ) -> (Vec<MoveDirective>, Vec<ConversionWarning>) {
        let reader = TokenReader::new(rooms, options);
        let mut directives = Vec::new();
        let mut warnings = Vec::new();

        for raw in input.split(';').map(str::trim).filter(|d| !d.is_empty()) {
            let sides: Vec<&str> = raw.split("->").collect();
            let [from, to] = sides.as_slice() else {
                warnings.push(ConversionWarning::new(
                    WarningKind::InvalidMove,
                    format!("'{}': expected exactly one '->'", raw),
                ));
                continue;
            };

            let from = reader.read(from);
            let to = reader.read(to);
            for token in from.unknown.iter().chain(&to.unknown) {
                warnings.push(ConversionWarning::new(
                    WarningKind::InvalidMove,
                    format!("'{}': ignoring unrecognized token '{}'", raw, token),
                ));
            }

            let (Some(day), Some(hour)) = (from.day, from.hour) else {
                warnings.push(ConversionWarning::new(
                    WarningKind::InvalidMove,
                    format!("'{}': source needs both a day and an hour", raw),
                ));
                continue;
            };

            directives.push(MoveDirective {
                source: MoveSource {
                    room: from.room,
                    day,
                    hour,
                },
                target: MoveTarget {
                    day: to.day.unwrap_or(day),
                    hour: to.hour.unwrap_or(hour),
                },
            });
        }

        (directives, warnings)
    }

    fn describe(&self) -> String {
        let room = self.source.room.as_deref().unwrap_or("any room");
        format!(
            "{} at day {} {}:00 -> day {} {}:00",
            room, self.source.day, self.source.hour, self.target.day, self.target.hour
        )
    }

    fn accepts(&self, occurrence: &CourseOccurrence, anchor: Option<&CourseOccurrence>) -> bool {
        if occurrence.is_placeholder() {
            return false;
        }
        if let Some(room) = self.source.room.as_deref() {
            if occurrence.room() != Some(room) {
                return false;
            }
        }
        anchor.map_or(true, |a| a.is_equivalent(occurrence))
    }
}

/// Apply directives in order, each seeing the grid left by the previous ones.
///
/// For every offset `i` in the search window the first matching occurrence
/// at the source hour + `i` is moved to the target hour + `i`. The first
/// course moved becomes the anchor; later offsets only move courses
/// equivalent to it. Returns warnings for directives that moved nothing or
/// point outside the grid.
pub fn apply_moves(
    grid: &mut Grid,
    directives: &[MoveDirective],
    options: &TimetableOptions,
) -> Vec<ConversionWarning> {
    let mut warnings = Vec::new();

    for directive in directives {
        let coordinates = (
            directive.source.day.checked_sub(1).filter(|&d| d < grid.days()),
            options.slot_of(directive.source.hour),
            directive.target.day.checked_sub(1).filter(|&d| d < grid.days()),
            options.slot_of(directive.target.hour),
        );
        let (Some(from_day), Some(from_hour), Some(to_day), Some(to_hour)) = coordinates else {
            warnings.push(ConversionWarning::new(
                WarningKind::InvalidMove,
                format!("{}: position outside the timetable", directive.describe()),
            ));
            continue;
        };

        let moved = relocate(grid, directive, (from_day, from_hour), (to_day, to_hour));
        if moved == 0 {
            warnings.push(ConversionWarning::at(
                WarningKind::UnmatchedMove,
                format!("{}: no matching course", directive.describe()),
                CellLocation::new(from_day, directive.source.hour),
            ));
        }
    }

    warnings
}

/// Take every match out of the source window first, then place them, so a
/// window that overlaps its own destination never sees a moved course again.
fn relocate(
    grid: &mut Grid,
    directive: &MoveDirective,
    (from_day, from_hour): (usize, usize),
    (to_day, to_hour): (usize, usize),
) -> usize {
    let mut anchor: Option<CourseOccurrence> = None;
    let mut taken: Vec<(usize, CourseOccurrence)> = Vec::new();

    for offset in 0..MOVE_SEARCH_SPAN {
        let (src, dst) = (from_hour + offset, to_hour + offset);
        if !grid.contains(from_day, src) || !grid.contains(to_day, dst) {
            break;
        }
        let found = grid
            .cell(from_day, src)
            .iter()
            .position(|c| directive.accepts(c, anchor.as_ref()));
        let Some(index) = found else {
            continue;
        };
        if let Some(occurrence) = grid.take(from_day, src, index) {
            if anchor.is_none() {
                anchor = Some(occurrence.clone());
            }
            taken.push((offset, occurrence));
        }
    }

    let moved = taken.len();
    for (offset, occurrence) in taken {
        grid.push(to_day, to_hour + offset, occurrence);
    }
    moved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::merge::merge_consecutive;
    use crate::core::occurrence::CourseDetails;
    use pretty_assertions::assert_eq;

    fn options() -> TimetableOptions {
        TimetableOptions::default()
    }

    fn rooms() -> RoomPattern {
        RoomPattern::from_prefixes(&options().room_prefixes).unwrap()
    }

    fn course(room: &str, name: &str) -> CourseOccurrence {
        CourseOccurrence::new(CourseDetails::new(
            Some(room.into()),
            "[W]",
            name,
            "dr inż. Smith",
            None,
        ))
    }

    fn parse(input: &str) -> (Vec<MoveDirective>, Vec<ConversionWarning>) {
        MoveDirective::parse_list(input, &rooms(), &options())
    }

    #[test]
    fn test_parse_full_directive() {
        let (directives, warnings) = parse("NE 101,pn,8 -> sr,10");
        assert!(warnings.is_empty());
        assert_eq!(
            directives,
            vec![MoveDirective::new(Some("NE 101"), 1, 8, 3, 10)]
        );
    }

    #[test]
    fn test_parse_target_falls_back_to_source() {
        let (directives, _) = parse("pn,8,EA 33 -> czw; NE 12,wt,9 -> 11");
        assert_eq!(
            directives,
            vec![
                MoveDirective::new(Some("EA 33"), 1, 8, 4, 8),
                MoveDirective::new(Some("NE 12"), 2, 9, 2, 11),
            ]
        );
    }

    #[test]
    fn test_parse_without_room() {
        let (directives, warnings) = parse("PT,12->pn");
        assert!(warnings.is_empty());
        assert_eq!(directives, vec![MoveDirective::new(None, 5, 12, 1, 12)]);
    }

    #[test]
    fn test_parse_skips_bad_directives() {
        let (directives, warnings) = parse("pn,8 sr,10; NE 1,pn -> sr; wt,9 -> sr,x; ;");
        assert_eq!(directives, vec![MoveDirective::new(None, 2, 9, 3, 9)]);
        assert_eq!(warnings.len(), 3);
        assert!(warnings.iter().all(|w| w.kind == WarningKind::InvalidMove));
        assert!(warnings[2].message.contains("'x'"));
    }

    #[test]
    fn test_empty_input() {
        let (directives, warnings) = parse("   ");
        assert!(directives.is_empty());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_move_single_course() {
        let opts = options();
        let mut grid = Grid::new(5, 14);
        grid.push(0, 1, course("NE 101", "Algorithms"));

        let warnings = apply_moves(
            &mut grid,
            &[MoveDirective::new(Some("NE 101"), 1, 8, 3, 10)],
            &opts,
        );
        assert!(warnings.is_empty());
        assert!(grid.cell(0, 1).is_empty());
        assert_eq!(grid.cell(2, 3)[0].room(), Some("NE 101"));
    }

    #[test]
    fn test_move_carries_continuation_and_keeps_span() {
        let opts = options();
        let mut grid = Grid::new(5, 14);
        for hour in 1..=3 {
            grid.push(0, hour, course("NE 101", "Algorithms"));
        }
        grid.push(0, 2, course("EA 33", "Physics"));

        let (directives, _) = parse("NE 101,pn,8 -> sr,10");
        apply_moves(&mut grid, &directives, &opts);

        for hour in 1..=3 {
            assert!(grid.cell(0, hour).iter().all(|c| c.room() != Some("NE 101")));
        }
        assert_eq!(grid.cell(0, 2)[0].room(), Some("EA 33"));
        for hour in 3..=5 {
            assert_eq!(grid.cell(2, hour).len(), 1);
        }

        merge_consecutive(&mut grid);
        assert_eq!(grid.cell(2, 3)[0].span_hours, 3);
    }

    #[test]
    fn test_continuation_must_be_equivalent() {
        let opts = options();
        let mut grid = Grid::new(5, 14);
        grid.push(0, 1, course("NE 101", "Algorithms"));
        grid.push(0, 2, course("NE 101", "Databases"));

        apply_moves(
            &mut grid,
            &[MoveDirective::new(Some("NE 101"), 1, 8, 2, 8)],
            &opts,
        );
        assert!(grid.cell(0, 1).is_empty());
        assert_eq!(grid.cell(0, 2).len(), 1);
        assert_eq!(grid.cell(1, 1).len(), 1);
        assert!(grid.cell(1, 2).is_empty());
    }

    #[test]
    fn test_moved_course_appends_after_existing() {
        let opts = options();
        let mut grid = Grid::new(5, 14);
        grid.push(0, 1, course("NE 101", "Algorithms"));
        grid.push(2, 3, course("EA 33", "Physics"));

        apply_moves(
            &mut grid,
            &[MoveDirective::new(Some("NE 101"), 1, 8, 3, 10)],
            &opts,
        );
        let rooms: Vec<_> = grid.cell(2, 3).iter().map(|c| c.room()).collect();
        assert_eq!(rooms, vec![Some("EA 33"), Some("NE 101")]);
    }

    #[test]
    fn test_without_room_takes_first_course() {
        let opts = options();
        let mut grid = Grid::new(5, 14);
        grid.extend(
            1,
            2,
            vec![
                CourseOccurrence::placeholder(),
                course("NE 1", "A"),
                course("NE 2", "B"),
            ],
        );

        apply_moves(&mut grid, &[MoveDirective::new(None, 2, 9, 2, 12)], &opts);
        assert_eq!(grid.cell(1, 5)[0].room(), Some("NE 1"));
        assert_eq!(grid.cell(1, 2).len(), 2);
    }

    #[test]
    fn test_directives_apply_in_order() {
        let opts = options();
        let mut grid = Grid::new(5, 14);
        grid.push(0, 0, course("NE 101", "Algorithms"));

        let (directives, _) = parse("NE 101,pn,7 -> wt; NE 101,wt,7 -> pt,15");
        let warnings = apply_moves(&mut grid, &directives, &opts);
        assert!(warnings.is_empty());
        assert_eq!(grid.cell(4, 8).len(), 1);
        assert!(grid.cell(1, 0).is_empty());
    }

    #[test]
    fn test_unmatched_and_out_of_range() {
        let opts = options();
        let mut grid = Grid::new(5, 14);
        grid.push(0, 1, course("NE 101", "Algorithms"));

        let warnings = apply_moves(
            &mut grid,
            &[
                MoveDirective::new(Some("EA 33"), 1, 8, 3, 10),
                MoveDirective::new(Some("NE 101"), 1, 6, 3, 10),
                MoveDirective::new(Some("NE 101"), 7, 8, 3, 10),
            ],
            &opts,
        );
        let kinds: Vec<_> = warnings.iter().map(|w| w.kind).collect();
        assert_eq!(
            kinds,
            vec![
                WarningKind::UnmatchedMove,
                WarningKind::InvalidMove,
                WarningKind::InvalidMove
            ]
        );
        assert_eq!(grid.cell(0, 1).len(), 1);
    }

    #[test]
    fn test_window_is_clipped_at_last_hour() {
        let opts = options();
        let mut grid = Grid::new(5, 14);
        grid.push(0, 12, course("NE 101", "Late"));
        grid.push(0, 13, course("NE 101", "Late"));

        apply_moves(
            &mut grid,
            &[MoveDirective::new(Some("NE 101"), 1, 19, 2, 19)],
            &opts,
        );
        assert_eq!(grid.cell(1, 12).len(), 1);
        assert_eq!(grid.cell(1, 13).len(), 1);
        assert!(grid.cell(0, 13).is_empty());
    }

    fn positions(grid: &Grid) -> Vec<(usize, usize)> {
        grid.occurrences().map(|(day, hour, _)| (day, hour)).collect()
    }

    #[test]
    fn test_shift_one_hour_later_on_same_day() {
        let opts = options();
        let mut grid = Grid::new(5, 14);
        grid.push(0, 1, course("NE 101", "Algorithms"));

        let warnings = apply_moves(
            &mut grid,
            &[MoveDirective::new(Some("NE 101"), 1, 8, 1, 9)],
            &opts,
        );
        assert!(warnings.is_empty());
        assert_eq!(positions(&grid), vec![(0, 2)]);
    }

    #[test]
    fn test_shifted_block_keeps_its_length() {
        let opts = options();
        let mut grid = Grid::new(5, 14);
        grid.push(0, 1, course("NE 101", "Algorithms"));
        grid.push(0, 2, course("NE 101", "Algorithms"));

        apply_moves(
            &mut grid,
            &[MoveDirective::new(Some("NE 101"), 1, 8, 1, 9)],
            &opts,
        );
        assert_eq!(positions(&grid), vec![(0, 2), (0, 3)]);

        merge_consecutive(&mut grid);
        assert_eq!(grid.cell(0, 2)[0].span_hours, 2);
        assert!(grid.cell(0, 3)[0].marked_for_removal);
    }

    #[test]
    fn test_shift_earlier_into_own_window() {
        let opts = options();
        let mut grid = Grid::new(5, 14);
        for hour in 2..5 {
            grid.push(0, hour, course("NE 101", "Algorithms"));
        }

        apply_moves(
            &mut grid,
            &[MoveDirective::new(Some("NE 101"), 1, 9, 1, 8)],
            &opts,
        );
        assert_eq!(positions(&grid), vec![(0, 1), (0, 2), (0, 3)]);
    }
}
