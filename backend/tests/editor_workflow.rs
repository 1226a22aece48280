//! End-to-end editing workflow: load a schedule file, edit it through the
//! undo history, and write it back.

mod support;

use atsched::astro::compute_default_window;
use atsched::error::EditError;
use atsched::models::{load_schedule_file, save_schedule_file};
use atsched::services::editor::{add_slot, assign_slot, remove_slots, set_group_size, update_group};
use atsched::services::{group_slots, summarize_groups, ScheduleHistory};

const IDENT: &str = "C3132";

#[test]
fn test_file_round_trip_preserves_groups() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("2025OCT.json");

    let schedule = support::sample_schedule("2025OCT");
    save_schedule_file(&schedule, &path).unwrap();
    let loaded = load_schedule_file(&path).unwrap();
    assert_eq!(loaded, schedule);

    let summary = summarize_groups(&loaded.project(IDENT).unwrap().slots);
    assert_eq!(summary.len(), 2);
    assert_eq!(summary[0].indices, vec![0, 2]);
    assert_eq!(summary[1].count, 1);
}

#[test]
fn test_added_slots_get_default_window() {
    let schedule = support::sample_schedule("2025OCT");
    let site = schedule.observatory();
    let request = support::request("1934-638", "19:39:25.03", "-63:42:45.6");

    let history = ScheduleHistory::new(schedule);
    let (history, added) = history
        .apply(|s| add_slot(s, IDENT, &request, &site, 2))
        .unwrap();
    assert_eq!(added, vec![3, 4]);

    let expected = compute_default_window(&request.ra, &request.dec, &site).unwrap();
    let slots = &history.current().project(IDENT).unwrap().slots;
    assert_eq!(slots[3].lst_start, expected.lst_start);
    assert_eq!(slots[3].lst_end, expected.lst_end);
    assert_eq!(group_slots(slots).len(), 3);
}

#[test]
fn test_resize_assign_and_undo() {
    let history = ScheduleHistory::new(support::sample_schedule("2025OCT"));

    // Grow the J0437 group from 2 to 4 members
    let (history, ()) = history
        .apply(|s| set_group_size(s, IDENT, &[0, 2], 4))
        .unwrap();
    let groups = group_slots(&history.current().project(IDENT).unwrap().slots);
    assert_eq!(groups[0].indices, vec![0, 2, 3, 4]);

    let (history, ()) = history
        .apply(|s| assign_slot(s, IDENT, 0, 1_759_300_000, 4.0))
        .unwrap();

    // Shrinking to one keeps the scheduled member
    let (history, ()) = history
        .apply(|s| set_group_size(s, IDENT, &[0, 2, 3, 4], 1))
        .unwrap();
    let slots = &history.current().project(IDENT).unwrap().slots;
    assert_eq!(slots.len(), 2);
    assert!(slots[0].scheduled);

    // Undo brings back the four-member group
    let undone = history.undo().unwrap();
    let slots = &undone.current().project(IDENT).unwrap().slots;
    assert_eq!(slots.len(), 5);
    assert!(slots[0].scheduled);
    assert!(!undone.can_undo());
}

#[test]
fn test_failed_edit_keeps_undo_target() {
    let history = ScheduleHistory::new(support::sample_schedule("2025OCT"));
    let (history, removed) = history.apply(|s| remove_slots(s, IDENT, &[1])).unwrap();
    assert_eq!(removed[0].source, "J1939+2134");

    let site = history.current().observatory();
    let mut bad = support::request("x", "04:37:15.8", "-47:15:09");
    bad.lst_end = "06:00".to_string();
    let err = history
        .apply(|s| update_group(s, IDENT, &[0, 1], &bad, &site))
        .unwrap_err();
    assert!(matches!(err, EditError::IncompleteLstWindow { .. }));

    // The failed edit did not replace the pending undo
    let undone = history.undo().unwrap();
    assert_eq!(undone.current().project(IDENT).unwrap().slots.len(), 3);
}

#[test]
fn test_scheduled_flag_written_as_integer() {
    let history = ScheduleHistory::new(support::sample_schedule("2025OCT"));
    let (history, ()) = history
        .apply(|s| assign_slot(s, IDENT, 1, 1_759_300_000, 2.0))
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("edited.json");
    save_schedule_file(history.current(), &path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    let slots = &value["projects"][0]["slots"];
    assert_eq!(slots[0]["scheduled"], 0);
    assert_eq!(slots[1]["scheduled"], 1);

    let reloaded = load_schedule_file(&path).unwrap();
    assert_eq!(&reloaded, history.current());
}
