// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod app;
pub mod app_dirs;
pub mod audio;
pub mod keymap;
pub mod runtime;
pub mod store;
pub mod tracker;
pub mod ui;
pub mod util;

/// Base cadence of the event loop; every other timer is a divider of this.
pub const TICK_RATE_MS: u64 = 100;
