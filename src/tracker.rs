use chrono::{Local, NaiveDate};
use std::time::{Duration, SystemTime};
use tracing::{debug, warn};

use crate::audio::SoundPlayer;
use crate::store::{PersistedRecord, RecordStore};

/// Trailing window the press rate is computed over.
pub const RATE_WINDOW: Duration = Duration::from_secs(60);

/// Label displayed for synthetic auto-press input.
pub const AUTO_KEY_LABEL: &str = "Auto";

/// Label displayed before any key has been pressed (and after a reset).
pub const NO_KEY_LABEL: &str = "None";

/// Distinguishes real keyboard input from the auto-press ticker. Only
/// affects how the press is labeled and logged, never the counting logic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum_macros::Display)]
pub enum KeySource {
    Human,
    Auto,
}

/// Owns every counter and timestamp of one tracking session.
///
/// All mutation goes through the operations below; the event loop is the
/// only caller, so each operation runs to completion before the next.
pub struct Tracker {
    pub current_count: u64,
    pub total_presses: u64,
    pub today_count: u64,
    pub last_key: String,
    pub sound_enabled: bool,
    pub session_start: SystemTime,
    pub press_rate: u64,
    last_visit_date: NaiveDate,
    press_log: Vec<SystemTime>,
    store: Option<Box<dyn RecordStore>>,
    sound: Box<dyn SoundPlayer>,
}

impl Tracker {
    pub fn new(store: Option<Box<dyn RecordStore>>, sound: Box<dyn SoundPlayer>) -> Self {
        Self::with_start(store, sound, SystemTime::now(), Local::now().date_naive())
    }

    /// Construction with an explicit clock, used by tests and by `new`.
    pub fn with_start(
        store: Option<Box<dyn RecordStore>>,
        sound: Box<dyn SoundPlayer>,
        session_start: SystemTime,
        today: NaiveDate,
    ) -> Self {
        let mut tracker = Self {
            current_count: 0,
            total_presses: 0,
            today_count: 0,
            last_key: NO_KEY_LABEL.to_string(),
            sound_enabled: true,
            session_start,
            press_rate: 0,
            last_visit_date: today,
            press_log: Vec::new(),
            store,
            sound,
        };
        tracker.hydrate(today);
        tracker.refresh_press_rate(session_start);
        tracker
    }

    /// Restore durable counters. A stored visit date equal to `today`
    /// carries the daily count over; any other date (or first run)
    /// starts the day at zero and stamps the new date.
    fn hydrate(&mut self, today: NaiveDate) {
        let record = self.store.as_ref().and_then(|s| s.load());
        let mut rolled_over = true;
        if let Some(record) = record {
            self.current_count = record.counter_value;
            self.total_presses = record.total_presses;
            if record.last_visit_date == Some(today) {
                self.today_count = record.today_count;
                rolled_over = false;
            }
        }
        self.last_visit_date = today;
        if rolled_over {
            self.persist();
        }
    }

    pub fn register_key_press(&mut self, key: &str, source: KeySource) {
        self.register_key_press_at(key, source, SystemTime::now());
    }

    pub fn register_key_press_at(&mut self, key: &str, source: KeySource, now: SystemTime) {
        self.current_count += 1;
        self.total_presses += 1;
        self.today_count += 1;
        self.last_key = key.to_string();
        self.press_log.push(now);
        self.refresh_press_rate(now);
        debug!(key, %source, total = self.total_presses, "key press registered");

        if self.sound_enabled {
            if let Err(err) = self.sound.play() {
                // Blocked audio must never disrupt counting.
                warn!("sound cue failed: {err}");
            }
        }

        self.persist();
    }

    /// Zeroes the session counter and the last-key label. Cumulative and
    /// daily totals are untouched. Idempotent.
    pub fn reset(&mut self) {
        self.current_count = 0;
        self.last_key = NO_KEY_LABEL.to_string();
        self.persist();
    }

    pub fn toggle_sound(&mut self) -> bool {
        self.sound_enabled = !self.sound_enabled;
        self.sound_enabled
    }

    /// Prunes the press log to the trailing window and recomputes the
    /// per-minute rate. A press aged exactly the window length still
    /// counts; anything older falls out.
    pub fn refresh_press_rate(&mut self, now: SystemTime) {
        self.press_log.retain(|t| within_window(*t, now));
        self.press_rate = self.press_log.len() as u64;
    }

    /// Whole seconds elapsed since the tracker initialized.
    pub fn session_seconds(&self, now: SystemTime) -> u64 {
        now.duration_since(self.session_start)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }

    pub fn to_record(&self) -> PersistedRecord {
        PersistedRecord {
            counter_value: self.current_count,
            total_presses: self.total_presses,
            today_count: self.today_count,
            last_visit_date: Some(self.last_visit_date),
        }
    }

    fn persist(&mut self) {
        let record = self.to_record();
        if let Some(store) = &self.store {
            if let Err(err) = store.save(&record) {
                warn!("failed to persist counters: {err}");
            }
        }
    }

    #[cfg(test)]
    fn press_log_len(&self) -> usize {
        self.press_log.len()
    }
}

fn within_window(t: SystemTime, now: SystemTime) -> bool {
    match now.duration_since(t) {
        Ok(age) => age <= RATE_WINDOW,
        // A timestamp "after" now only happens under clock skew; keep it.
        Err(_) => true,
    }
}
