//! Integration tests for sisplan full page conversion

use sisplan::{
    convert_timetable, convert_timetable_with_options, diagnostics::check_timetable,
    CellLocation, ConversionError, TimetableConverter, TimetableOptions, WarningKind,
};

/// A saved SIS page: header row, hour label column, 7:00 to 10:00
const SIS_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Plan zajęć</title></head>
<body>
<h1>Plan zajęć</h1>
<table class="plan" border="1">
  <tr>
    <th>godz.</th><th>Poniedziałek</th><th>Wtorek</th><th>Środa</th><th>Czwartek</th><th>Piątek</th>
  </tr>
  <tr>
    <td>7</td>
    <td></td>
    <td>EA 33<br>[L]<br>Physics<br>dr Jones<br>EA 34<br>[L]<br>Chemistry<br>dr Lee</td>
    <td></td>
    <td>NE 5<br>[P]<br>Project</td>
    <td></td>
  </tr>
  <tr>
    <td>8</td>
    <td><b>NE 101</b><br>[W]<br>Algorithms<br>dr inż. Smith</td>
    <td></td><td></td><td></td><td></td>
  </tr>
  <tr>
    <td>9</td>
    <td><b>NE 101</b><br>[W]<br>Algorithms<br>dr inż. Smith</td>
    <td></td>
    <td>AUD 1<br>[S]<br>Seminar<br>dr Kim<br>co 2 tyg.</td>
    <td></td><td></td>
  </tr>
  <tr>
    <td>10</td>
    <td><b>NE 101</b><br>[W]<br>Algorithms<br>dr inż. Smith</td>
    <td></td><td></td><td></td><td></td>
  </tr>
</table>
</body>
</html>"#;

fn convert(options: &TimetableOptions, moves: &str) -> sisplan::ConversionOutput {
    convert_timetable_with_options(SIS_PAGE, options, moves).unwrap()
}

// ============================================================================
// Full pipeline
// ============================================================================

mod pipeline {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_conversion() {
        let output = convert(&TimetableOptions::default(), "");

        assert!(output.content.starts_with("<!DOCTYPE html>"));
        assert!(output.content.contains("<div class=\"day-name\">Środa</div>"));
        assert!(output
            .content
            .contains("<div class=\"lecture course course-left triple\">"));
        assert_eq!(
            output.content.matches("course-container deleted").count(),
            2
        );
        assert!(output
            .content
            .contains("<div class=\"laboratory course half course-left\">"));
        assert!(output
            .content
            .contains("<div class=\"laboratory course half course-right\">"));
        assert!(output.content.contains("<div class=\"other\">co 2 tyg.</div>"));
        assert!(output.content.contains("<div class=\"teacher\">dr inż. Smith</div>"));
    }

    #[test]
    fn test_truncated_cell_is_reported() {
        let output = convert(&TimetableOptions::default(), "");
        assert_eq!(output.warnings.len(), 1);
        let warning = &output.warnings[0];
        assert_eq!(warning.kind, WarningKind::MalformedCell);
        assert_eq!(warning.location, Some(CellLocation::new(3, 7)));
        assert!(!output.content.contains("project course"));
    }

    #[test]
    fn test_convert_timetable_matches_default_options() {
        let plain = convert_timetable(SIS_PAGE).unwrap();
        assert_eq!(plain, convert(&TimetableOptions::default(), "").content);
    }

    #[test]
    fn test_conversion_is_deterministic() {
        let converter = TimetableConverter::new(TimetableOptions::default()).unwrap();
        let first = converter.convert(SIS_PAGE, &[]).unwrap();
        let second = converter.convert(SIS_PAGE, &[]).unwrap();
        assert_eq!(first.content, second.content);
    }

    #[test]
    fn test_raw_preset_keeps_hours_apart() {
        let output = convert(&TimetableOptions::raw(), "");
        assert_eq!(
            output
                .content
                .matches("<div class=\"lecture course course-left\">")
                .count(),
            3
        );
        assert!(!output.content.contains("triple"));
        assert!(!output.content.contains("deleted"));
    }

    #[test]
    fn test_compact_preset_drops_day_names() {
        let output = convert(&TimetableOptions::compact(), "");
        assert!(!output.content.contains("day-name"));
        assert!(!output.content.contains("empty-in-corner"));
        assert!(output.content.contains("<div class=\"cell hour\">7:00</div>"));
    }

    #[test]
    fn test_filter_bar() {
        let options = TimetableOptions {
            script: Some("scripts.js".into()),
            ..Default::default()
        };
        let output = convert(&options, "");
        assert!(output.content.contains("<div class=\"filter-bar\">"));
        assert_eq!(output.content.matches("class=\"toggle_button\"").count(), 5);
    }
}

// ============================================================================
// Move directives
// ============================================================================

mod moves {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_move_whole_block() {
        let output = convert(&TimetableOptions::default(), "NE 101,pn,8 -> pt,8");
        assert_eq!(output.warnings.len(), 1, "only the truncated cell warns");

        let friday = output
            .content
            .split("<div class=\"day-name\">Piątek</div>")
            .nth(1)
            .unwrap();
        assert!(friday.contains("lecture course course-left triple"));

        let monday = output
            .content
            .split("<div class=\"day-name\">Poniedziałek</div>")
            .nth(1)
            .and_then(|rest| rest.split("<div class=\"day-name\">").next())
            .unwrap();
        assert!(!monday.contains("lecture"));
    }

    #[test]
    fn test_move_one_of_two_half_slots() {
        let output = convert(&TimetableOptions::default(), "EA 34, wt, 7 -> sr, 7");
        assert_eq!(output.warnings.len(), 1);
        assert!(!output.content.contains(" half "));
        assert_eq!(
            output
                .content
                .matches("<div class=\"laboratory course course-left\">")
                .count(),
            2
        );
    }

    #[test]
    fn test_bad_directives_warn_and_conversion_continues() {
        let output = convert(
            &TimetableOptions::default(),
            "pn,8 sr,10; pt,13 -> pn,13; nd,8 -> pn,9",
        );
        let kinds: Vec<WarningKind> = output.warnings.iter().map(|w| w.kind).collect();
        assert!(kinds.contains(&WarningKind::InvalidMove));
        assert!(kinds.contains(&WarningKind::UnmatchedMove));
        assert!(kinds.contains(&WarningKind::MalformedCell));
        assert!(output.content.contains("triple"));
    }

    #[test]
    fn test_shift_block_one_hour_later() {
        let output = convert(&TimetableOptions::default(), "NE 101,pn,8 -> pn,9");
        assert_eq!(output.warnings.len(), 1);

        let monday = output
            .content
            .split("<div class=\"day-name\">Poniedziałek</div>")
            .nth(1)
            .and_then(|rest| rest.split("<div class=\"day-name\">").next())
            .unwrap();
        let slots: Vec<&str> = monday.split("<div class=\"cell course-container").skip(1).collect();
        assert!(slots[1].starts_with(" empty\""));
        assert!(slots[2].contains("lecture course course-left triple"));
        assert!(slots[3].starts_with(" deleted\""));
        assert!(slots[4].starts_with(" deleted\""));
        assert!(slots[5].starts_with(" empty\""));
    }

    #[test]
    fn test_move_outside_grid() {
        let output = convert(&TimetableOptions::default(), "pn,8 -> pn,23");
        assert!(output
            .warnings
            .iter()
            .any(|w| w.kind == WarningKind::InvalidMove));
        assert!(output.content.contains("triple"));
    }
}

// ============================================================================
// Failures
// ============================================================================

mod errors {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_unknown_session_type() {
        let page = SIS_PAGE.replace("[S]", "[Q]");
        let err = convert_timetable(&page).unwrap_err();
        assert_eq!(
            err,
            ConversionError::UnknownSessionType {
                tag: "[Q]".into(),
                location: Some(CellLocation::new(2, 9)),
            }
        );
    }

    #[test]
    fn test_page_without_table() {
        let err = convert_timetable("<html><body>Sesja wygasła</body></html>").unwrap_err();
        assert!(matches!(err, ConversionError::StructureError { .. }));
    }

    #[test]
    fn test_grid_too_small() {
        let options = TimetableOptions {
            hours: 3,
            ..Default::default()
        };
        let err = convert_timetable_with_options(SIS_PAGE, &options, "").unwrap_err();
        assert!(err.to_string().contains("4 hour rows"));
    }
}

// ============================================================================
// Diagnostics and settings
// ============================================================================

mod check {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_check_sample_page() {
        let result = check_timetable(SIS_PAGE, &TimetableOptions::default());
        assert_eq!(result.errors, 0);
        assert_eq!(result.warnings, 1);
        assert_eq!(result.infos, 1);
        assert!(result
            .diagnostics
            .iter()
            .any(|d| d.message.contains("6 courses found")));
    }

    #[test]
    fn test_check_unknown_tag() {
        let page = SIS_PAGE.replace("[W]", "[X]");
        let result = check_timetable(&page, &TimetableOptions::default());
        assert_eq!(result.errors, 1);
        assert!(result.summary().starts_with("1 error"));
    }
}

#[cfg(feature = "config-file")]
mod settings {
    use super::*;

    #[test]
    fn test_settings_file_options() {
        let options = TimetableOptions::from_toml_str(
            r#"
merge_consecutive = false
stylesheet = "plan.css"
"#,
        )
        .unwrap();
        let output = convert(&options, "");
        assert!(output.content.contains("href=\"plan.css\""));
        assert!(!output.content.contains("triple"));
    }

    #[test]
    fn test_settings_file_rejects_unknown_keys() {
        assert!(TimetableOptions::from_toml_str("colour = true").is_err());
    }
}
