use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Real key that activates auto-press mode (never deactivates it).
pub const AUTO_TOGGLE_KEY: &str = "a";

/// Explicit user commands, dispatched before any press counting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Reset,
    ToggleAutoPress,
    ToggleSound,
    Quit,
}

/// Maps a key event to a command, if it is one. Ctrl chords and Esc are
/// command input; everything else falls through to press counting.
pub fn command_for(key: &KeyEvent) -> Option<Command> {
    if key.code == KeyCode::Esc {
        return Some(Command::Quit);
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Command::Quit),
            KeyCode::Char('r') => Some(Command::Reset),
            KeyCode::Char('p') => Some(Command::ToggleAutoPress),
            KeyCode::Char('s') => Some(Command::ToggleSound),
            _ => None,
        };
    }
    None
}

/// Display label for a counted key, or None for modifier-only keys
/// (Shift/Control/Alt/Meta via `Modifier`, plus CapsLock and Tab) that
/// never change any counter.
pub fn key_label(code: KeyCode) -> Option<String> {
    match code {
        KeyCode::Tab | KeyCode::BackTab | KeyCode::CapsLock | KeyCode::Modifier(_) => None,
        // Esc is reserved for quitting and never counts.
        KeyCode::Esc => None,
        KeyCode::Char(' ') => Some("Space".into()),
        KeyCode::Char(c) => Some(c.to_string()),
        KeyCode::Enter => Some("Enter".into()),
        KeyCode::Backspace => Some("Backspace".into()),
        KeyCode::Delete => Some("Delete".into()),
        KeyCode::Insert => Some("Insert".into()),
        KeyCode::Home => Some("Home".into()),
        KeyCode::End => Some("End".into()),
        KeyCode::PageUp => Some("PageUp".into()),
        KeyCode::PageDown => Some("PageDown".into()),
        KeyCode::Up => Some("Up".into()),
        KeyCode::Down => Some("Down".into()),
        KeyCode::Left => Some("Left".into()),
        KeyCode::Right => Some("Right".into()),
        KeyCode::F(n) => Some(format!("F{n}")),
        other => Some(format!("{other:?}")),
    }
}
