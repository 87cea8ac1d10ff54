use std::time::{Duration, SystemTime};

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tempfile::tempdir;

use keytally::app::App;
use keytally::audio::NullSound;
use keytally::store::{FileRecordStore, RecordStore};
use keytally::tracker::Tracker;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn at(secs: u64) -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(secs)
}

fn app_on(path: &std::path::Path, today: NaiveDate) -> App {
    let tracker = Tracker::with_start(
        Some(Box::new(FileRecordStore::with_path(path))),
        Box::new(NullSound),
        at(0),
        today,
    );
    App::from_tracker(tracker)
}

fn press(app: &mut App, c: char) {
    app.on_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
}

// Full round trip through the app layer: presses made in one run are
// visible after a same-day restart.
#[test]
fn same_day_restart_restores_counters() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("state.json");

    let mut app = app_on(&path, day(2024, 1, 1));
    press(&mut app, 'x');
    press(&mut app, 'y');
    press(&mut app, 'z');
    drop(app);

    let reloaded = app_on(&path, day(2024, 1, 1));
    assert_eq!(reloaded.tracker.current_count, 3);
    assert_eq!(reloaded.tracker.total_presses, 3);
    assert_eq!(reloaded.tracker.today_count, 3);
}

#[test]
fn next_day_restart_resets_daily_count_only() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("state.json");

    let mut app = app_on(&path, day(2024, 1, 1));
    press(&mut app, 'x');
    press(&mut app, 'y');
    drop(app);

    let reloaded = app_on(&path, day(2024, 1, 2));
    assert_eq!(reloaded.tracker.current_count, 2);
    assert_eq!(reloaded.tracker.total_presses, 2);
    assert_eq!(reloaded.tracker.today_count, 0);

    // The new visit date is stamped as part of the rollover.
    let stored = FileRecordStore::with_path(&path).load().unwrap();
    assert_eq!(stored.last_visit_date, Some(day(2024, 1, 2)));
}

// Reset persists write-through: a restart right after a reset sees the
// zeroed session counter but the untouched totals.
#[test]
fn reset_survives_restart() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("state.json");

    let mut app = app_on(&path, day(2024, 1, 1));
    press(&mut app, 'x');
    press(&mut app, 'y');
    app.on_key(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL));
    drop(app);

    let reloaded = app_on(&path, day(2024, 1, 1));
    assert_eq!(reloaded.tracker.current_count, 0);
    assert_eq!(reloaded.tracker.total_presses, 2);
    assert_eq!(reloaded.tracker.today_count, 2);
}
