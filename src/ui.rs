use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::time::SystemTime;

use crate::app::App;
use crate::util::{format_press_rate, format_session_time};

const HORIZONTAL_MARGIN: u16 = 2;
const VERTICAL_MARGIN: u16 = 1;

pub fn render(app: &App, f: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(3), // title
            Constraint::Length(5), // counter
            Constraint::Length(3), // metrics row
            Constraint::Length(3), // controls row
            Constraint::Min(0),    // footer
        ])
        .split(f.area());

    render_title(f, chunks[0]);
    render_counter(app, f, chunks[1]);
    render_metrics(app, f, chunks[2]);
    render_controls(app, f, chunks[3]);
    render_footer(f, chunks[4]);
}

fn render_title(f: &mut Frame, area: Rect) {
    let title = Paragraph::new("Keyboard Counter")
        .block(Block::default().borders(Borders::ALL))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center);
    f.render_widget(title, area);
}

fn render_counter(app: &App, f: &mut Frame, area: Rect) {
    let counter = Paragraph::new(vec![
        Line::from(Span::styled(
            app.tracker.current_count.to_string(),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("last key: {}", app.tracker.last_key),
            Style::default().fg(Color::Magenta),
        )),
    ])
    .block(Block::default().borders(Borders::ALL).title("Presses"))
    .alignment(Alignment::Center);
    f.render_widget(counter, area);
}

fn render_metrics(app: &App, f: &mut Frame, area: Rect) {
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
        ])
        .split(area);

    let session_secs = app.tracker.session_seconds(SystemTime::now());
    stat_cell(f, cells[0], "Total", &app.tracker.total_presses.to_string());
    stat_cell(f, cells[1], "Today", &app.tracker.today_count.to_string());
    stat_cell(f, cells[2], "Rate", &format_press_rate(app.tracker.press_rate));
    stat_cell(f, cells[3], "Session", &format_session_time(session_secs));
}

fn stat_cell(f: &mut Frame, area: Rect, label: &str, value: &str) {
    let cell = Paragraph::new(Span::styled(
        value.to_string(),
        Style::default().add_modifier(Modifier::BOLD),
    ))
    .block(Block::default().borders(Borders::ALL).title(label))
    .alignment(Alignment::Center);
    f.render_widget(cell, area);
}

fn render_controls(app: &App, f: &mut Frame, area: Rect) {
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let (reset_label, reset_style) = if app.reset_flash_active() {
        (
            "Reset!",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        ("Reset counter", Style::default().fg(Color::Gray))
    };

    let auto_label = if app.auto_press_active() {
        "Stop auto-press"
    } else {
        "Auto-press (press 'a')"
    };

    let sound_label = if app.tracker.sound_enabled {
        "Sound on"
    } else {
        "Sound off"
    };

    control_cell(f, cells[0], "ctrl+r", reset_label, reset_style);
    control_cell(
        f,
        cells[1],
        "ctrl+p",
        auto_label,
        Style::default().fg(Color::Gray),
    );
    control_cell(
        f,
        cells[2],
        "ctrl+s",
        sound_label,
        Style::default().fg(Color::Gray),
    );
}

fn control_cell(f: &mut Frame, area: Rect, binding: &str, label: &str, style: Style) {
    let cell = Paragraph::new(Span::styled(label.to_string(), style))
        .block(Block::default().borders(Borders::ALL).title(binding))
        .alignment(Alignment::Center);
    f.render_widget(cell, area);
}

fn render_footer(f: &mut Frame, area: Rect) {
    let footer = Paragraph::new(
        "Press any key to count it. Modifier keys are ignored. (esc) quits.",
    )
    .style(
        Style::default()
            .fg(Color::Gray)
            .add_modifier(Modifier::ITALIC),
    )
    .alignment(Alignment::Center);
    f.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::NullSound;
    use crate::keymap::Command;
    use crate::tracker::KeySource;
    use ratatui::{backend::TestBackend, Terminal};

    fn headless_app() -> App {
        App::new(None, Box::new(NullSound))
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn renders_all_stat_panels() {
        let mut app = headless_app();
        app.tracker.register_key_press("q", KeySource::Human);

        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| render(&app, f)).unwrap();

        let content = buffer_text(&terminal);
        assert!(content.contains("Keyboard Counter"));
        assert!(content.contains("last key: q"));
        assert!(content.contains("Total"));
        assert!(content.contains("Today"));
        assert!(content.contains("/min"));
        assert!(content.contains("Sound on"));
    }

    #[test]
    fn reset_flash_changes_the_control_label() {
        let mut app = headless_app();
        app.apply(Command::Reset);

        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| render(&app, f)).unwrap();
        assert!(buffer_text(&terminal).contains("Reset!"));
    }

    #[test]
    fn auto_press_label_reflects_state() {
        let mut app = headless_app();

        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| render(&app, f)).unwrap();
        assert!(buffer_text(&terminal).contains("Auto-press"));

        app.apply(Command::ToggleAutoPress);
        terminal.draw(|f| render(&app, f)).unwrap();
        assert!(buffer_text(&terminal).contains("Stop auto-press"));
    }
}
