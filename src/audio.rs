use std::io::{self, Write};

/// Short audible cue played on every qualifying press.
///
/// Playback failure must never block counting; callers swallow and log
/// the error.
pub trait SoundPlayer {
    fn play(&mut self) -> io::Result<()>;
}

/// Rings the terminal bell by writing BEL to stdout.
pub struct TerminalBell;

impl SoundPlayer for TerminalBell {
    fn play(&mut self) -> io::Result<()> {
        let mut out = io::stdout();
        out.write_all(b"\x07")?;
        out.flush()
    }
}

/// Silent player for headless runs and tests.
#[derive(Debug, Default)]
pub struct NullSound;

impl SoundPlayer for NullSound {
    fn play(&mut self) -> io::Result<()> {
        Ok(())
    }
}
