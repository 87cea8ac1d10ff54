use crossterm::event::KeyEvent;
use tracing::info;

use crate::audio::SoundPlayer;
use crate::keymap::{self, Command, AUTO_TOGGLE_KEY};
use crate::runtime::{IntervalTimer, TrackerEvent};
use crate::store::RecordStore;
use crate::tracker::{KeySource, Tracker, AUTO_KEY_LABEL};

/// Session-duration refresh cadence, in base ticks (1 s).
pub const SESSION_REFRESH_TICKS: u32 = 10;
/// Press-rate refresh cadence, in base ticks (5 s).
pub const RATE_REFRESH_TICKS: u32 = 50;
/// Auto-press cadence, in base ticks (100 ms).
pub const AUTO_PRESS_TICKS: u32 = 1;
/// How long the reset control shows its confirmation label (1 s).
pub const RESET_FLASH_TICKS: u32 = 10;

/// Binds the tracker to the event loop: dispatches commands, filters
/// keyboard input, and drives the periodic timers.
pub struct App {
    pub tracker: Tracker,
    pub should_quit: bool,
    auto_press: Option<IntervalTimer>,
    session_timer: IntervalTimer,
    rate_timer: IntervalTimer,
    reset_flash: u32,
}

impl App {
    pub fn new(store: Option<Box<dyn RecordStore>>, sound: Box<dyn SoundPlayer>) -> Self {
        Self {
            tracker: Tracker::new(store, sound),
            should_quit: false,
            auto_press: None,
            session_timer: IntervalTimer::new(SESSION_REFRESH_TICKS),
            rate_timer: IntervalTimer::new(RATE_REFRESH_TICKS),
            reset_flash: 0,
        }
    }

    pub fn from_tracker(tracker: Tracker) -> Self {
        Self {
            tracker,
            should_quit: false,
            auto_press: None,
            session_timer: IntervalTimer::new(SESSION_REFRESH_TICKS),
            rate_timer: IntervalTimer::new(RATE_REFRESH_TICKS),
            reset_flash: 0,
        }
    }

    pub fn auto_press_active(&self) -> bool {
        self.auto_press.is_some()
    }

    /// True while the reset control shows its confirmation label.
    pub fn reset_flash_active(&self) -> bool {
        self.reset_flash > 0
    }

    /// Handle one loop event; returns true when the screen needs a redraw.
    pub fn handle_event(&mut self, event: TrackerEvent) -> bool {
        match event {
            TrackerEvent::Tick => self.on_tick(),
            TrackerEvent::Resize => true,
            TrackerEvent::Key(key) => self.on_key(key),
        }
    }

    /// Keyboard path. Commands dispatch first; everything else is a
    /// candidate press run through the modifier filter.
    pub fn on_key(&mut self, key: KeyEvent) -> bool {
        if let Some(cmd) = keymap::command_for(&key) {
            self.apply(cmd);
            return true;
        }

        let Some(label) = keymap::key_label(key.code) else {
            return false;
        };

        // While auto-press runs, its toggle key is swallowed entirely so
        // the (ignored) toggle attempt is not counted as a press.
        if self.auto_press_active() && label == AUTO_TOGGLE_KEY {
            return false;
        }

        self.tracker.register_key_press(&label, KeySource::Human);

        // The activating press itself counts and then starts the ticker;
        // the key path never stops an active auto-press.
        if !self.auto_press_active() && label.eq_ignore_ascii_case(AUTO_TOGGLE_KEY) {
            self.toggle_auto_press();
        }

        true
    }

    pub fn apply(&mut self, cmd: Command) {
        match cmd {
            Command::Reset => {
                self.tracker.reset();
                self.reset_flash = RESET_FLASH_TICKS;
            }
            Command::ToggleAutoPress => self.toggle_auto_press(),
            Command::ToggleSound => {
                self.tracker.toggle_sound();
            }
            Command::Quit => self.should_quit = true,
        }
    }

    /// INACTIVE -> ACTIVE starts the owned ticker; ACTIVE -> INACTIVE
    /// drops it, which is the cancellation.
    pub fn toggle_auto_press(&mut self) {
        if self.auto_press.take().is_none() {
            self.auto_press = Some(IntervalTimer::new(AUTO_PRESS_TICKS));
            info!("auto-press started");
        } else {
            info!("auto-press stopped");
        }
    }

    /// One base tick: fire whichever cadences are due.
    pub fn on_tick(&mut self) -> bool {
        let mut redraw = false;

        if let Some(timer) = self.auto_press.as_mut() {
            if timer.on_tick() {
                self.tracker.register_key_press(AUTO_KEY_LABEL, KeySource::Auto);
                redraw = true;
            }
        }

        if self.session_timer.on_tick() {
            redraw = true;
        }

        if self.rate_timer.on_tick() {
            self.tracker.refresh_press_rate(std::time::SystemTime::now());
            redraw = true;
        }

        if self.reset_flash > 0 {
            self.reset_flash -= 1;
            if self.reset_flash == 0 {
                redraw = true;
            }
        }

        redraw
    }
}
