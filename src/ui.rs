//! `ratatui` front-end: display panel, clickable keypad, and status bar.

use crate::calc::ERROR_TEXT;
use crate::input::CalcInput;
use crate::keypad::{self, ButtonKind};
use crate::log_debug;
use crate::terminal_restore::TerminalRestoreGuard;
use crate::utf8_safe::fit_columns;
use crate::CalcApp;
use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Terminal,
};
use std::io;
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(100);
const DISPLAY_HEIGHT: u16 = 3;
const STATUS_HEIGHT: u16 = 2;
const MIN_SCREEN_HEIGHT: u16 = DISPLAY_HEIGHT + keypad::MIN_KEYPAD_HEIGHT + STATUS_HEIGHT;

/// What a terminal event asks the loop to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventAction {
    Input(CalcInput),
    Redraw,
    Quit,
    Ignore,
}

/// Screen regions, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub display: Rect,
    pub keypad: Rect,
    pub status: Rect,
}

pub fn screen_layout(area: Rect) -> ScreenLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(DISPLAY_HEIGHT),
            Constraint::Min(keypad::MIN_KEYPAD_HEIGHT),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(area);
    ScreenLayout {
        display: chunks[0],
        keypad: chunks[1],
        status: chunks[2],
    }
}

/// True when the keypad can be drawn with a bordered cell per button.
pub fn screen_fits(area: Rect) -> bool {
    area.width >= keypad::MIN_KEYPAD_WIDTH && area.height >= MIN_SCREEN_HEIGHT
}

/// Configure the terminal, run the drawing loop, and tear everything down.
pub fn run_app(app: &mut CalcApp) -> Result<()> {
    let mut stdout = io::stdout();
    let terminal_guard = TerminalRestoreGuard::enter(&mut stdout, !app.config().no_mouse)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = app_loop(&mut terminal, app);

    drop(terminal);
    terminal_guard.restore();

    result
}

/// Core event/render loop: one event is handled to completion before the next.
fn app_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut CalcApp) -> Result<()> {
    loop {
        if app.take_redraw_request() {
            terminal.draw(|frame| draw(frame, app))?;
        }

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        let area = terminal.size()?;
        match translate_event(event::read()?, area) {
            EventAction::Input(input) => {
                app.handle_input(input);
            }
            EventAction::Redraw => app.request_redraw(),
            EventAction::Quit => break,
            EventAction::Ignore => {}
        }
    }
    Ok(())
}

/// Map a crossterm event to a loop action given the current terminal area.
pub fn translate_event(event: Event, area: Rect) -> EventAction {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => translate_key(key),
        Event::Mouse(mouse) => translate_mouse(mouse, area),
        Event::Resize(_, _) => EventAction::Redraw,
        _ => EventAction::Ignore,
    }
}

/// Keyboard mirror of the keypad. Ctrl+C and Ctrl+Q quit.
pub fn translate_key(key: KeyEvent) -> EventAction {
    log_debug(&format!(
        "Key event: {:?} with modifiers: {:?}",
        key.code, key.modifiers
    ));

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => EventAction::Quit,
            _ => EventAction::Ignore,
        };
    }

    let input = match key.code {
        KeyCode::Enter => Some(CalcInput::Evaluate),
        KeyCode::Backspace => Some(CalcInput::Backspace),
        KeyCode::Esc => Some(CalcInput::Clear),
        KeyCode::Char(c) => CalcInput::from_char(c),
        _ => None,
    };
    input.map_or(EventAction::Ignore, EventAction::Input)
}

/// Left-button presses on a keypad cell act like the matching key.
pub fn translate_mouse(mouse: MouseEvent, area: Rect) -> EventAction {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) || !screen_fits(area) {
        return EventAction::Ignore;
    }
    let layout = screen_layout(area);
    match keypad::button_at(layout.keypad, mouse.column, mouse.row) {
        Some(button) => {
            log_debug(&format!("Keypad click: {}", button.label));
            button
                .to_input()
                .map_or(EventAction::Ignore, EventAction::Input)
        }
        None => EventAction::Ignore,
    }
}

/// Render display, keypad, and status bar.
pub fn draw(frame: &mut ratatui::Frame<'_>, app: &CalcApp) {
    let area = frame.size();
    let palette = app.palette();
    if !screen_fits(area) {
        // Keyboard input still works; only the keypad is hidden.
        let notice = Paragraph::new(vec![
            Line::from(Span::styled(
                fit_columns(&app.display_text(), area.width as usize).to_string(),
                Style::default().fg(palette.display),
            )),
            Line::from(Span::styled(
                format!("need {}x{}", keypad::MIN_KEYPAD_WIDTH, MIN_SCREEN_HEIGHT),
                Style::default().fg(palette.status),
            )),
        ]);
        frame.render_widget(notice, area);
        return;
    }
    let layout = screen_layout(area);

    let display_text = app.display_text();
    let display_color = if app.controller().buffer() == ERROR_TEXT {
        palette.error
    } else {
        palette.display
    };
    let inner_width = layout.display.width.saturating_sub(2) as usize;
    let display = Paragraph::new(fit_columns(&display_text, inner_width).to_string())
        .alignment(Alignment::Right)
        .style(
            Style::default()
                .fg(display_color)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(palette.border))
                .title(Span::styled(" calcterm ", palette.title_style())),
        );
    frame.render_widget(display, layout.display);

    for (cell, button) in keypad::button_cells(layout.keypad) {
        let pressed = button.to_input().is_some() && button.to_input() == app.last_press();
        let label_color = match button.kind() {
            ButtonKind::Digit => palette.digit_key,
            ButtonKind::Operator => palette.operator_key,
            ButtonKind::Action => palette.action_key,
        };
        let border_color = if pressed {
            palette.border
        } else {
            palette.dim
        };
        let mut label_style = Style::default().fg(label_color);
        if pressed {
            label_style = label_style.add_modifier(Modifier::BOLD);
        }
        let key = Paragraph::new(Span::styled(button.label, label_style))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(border_color)),
            );
        frame.render_widget(key, cell);
    }

    let status_style = Style::default().fg(palette.status);
    let hint_style = Style::default()
        .fg(palette.operator_key)
        .add_modifier(Modifier::BOLD);
    let status = Paragraph::new(Line::from(vec![
        Span::styled(format!(" {} ", app.status_text()), status_style),
        Span::styled(" Enter", hint_style),
        Span::styled(" =  ", status_style),
        Span::styled("Esc", hint_style),
        Span::styled(" clear  ", status_style),
        Span::styled("Ctrl+C", hint_style),
        Span::styled(" quit", status_style),
    ]))
    .block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(palette.dim)),
    );
    frame.render_widget(status, layout.status);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use clap::Parser;
    use crossterm::event::KeyEventState;
    use ratatui::backend::TestBackend;

    fn test_app() -> CalcApp {
        CalcApp::new(AppConfig::parse_from(["test-app"]))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn click(column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::empty(),
        })
    }

    fn render(app: &CalcApp, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("terminal");
        terminal.draw(|frame| draw(frame, app)).expect("draw");
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer.get(x, y).symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn keys_map_to_calculator_inputs() {
        assert_eq!(
            translate_key(key(KeyCode::Char('7'))),
            EventAction::Input(CalcInput::Digit('7'))
        );
        assert_eq!(
            translate_key(key(KeyCode::Enter)),
            EventAction::Input(CalcInput::Evaluate)
        );
        assert_eq!(
            translate_key(key(KeyCode::Char('='))),
            EventAction::Input(CalcInput::Evaluate)
        );
        assert_eq!(
            translate_key(key(KeyCode::Backspace)),
            EventAction::Input(CalcInput::Backspace)
        );
        assert_eq!(
            translate_key(key(KeyCode::Esc)),
            EventAction::Input(CalcInput::Clear)
        );
        assert_eq!(
            translate_key(key(KeyCode::Char('%'))),
            EventAction::Input(CalcInput::Percent)
        );
        assert_eq!(translate_key(key(KeyCode::Char('x'))), EventAction::Ignore);
        assert_eq!(translate_key(key(KeyCode::Tab)), EventAction::Ignore);
    }

    #[test]
    fn shifted_symbols_still_map() {
        let plus = KeyEvent::new(KeyCode::Char('+'), KeyModifiers::SHIFT);
        assert_eq!(
            translate_key(plus),
            EventAction::Input(CalcInput::Operator('+'))
        );
    }

    #[test]
    fn control_c_quits() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(translate_key(ctrl_c), EventAction::Quit);
        let ctrl_q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert_eq!(translate_key(ctrl_q), EventAction::Quit);
        let ctrl_r = KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL);
        assert_eq!(translate_key(ctrl_r), EventAction::Ignore);
    }

    #[test]
    fn key_releases_are_ignored() {
        let mut release = key(KeyCode::Char('1'));
        release.kind = KeyEventKind::Release;
        release.state = KeyEventState::NONE;
        let area = Rect::new(0, 0, 40, 24);
        assert_eq!(translate_event(Event::Key(release), area), EventAction::Ignore);
    }

    #[test]
    fn clicks_on_keypad_map_to_buttons() {
        let area = Rect::new(0, 0, 40, 24);
        let layout = screen_layout(area);
        let cells = keypad::button_cells(layout.keypad);
        let (cell, button) = cells
            .iter()
            .find(|(_, button)| button.label == "7")
            .expect("seven cell");
        assert_eq!(
            translate_event(click(cell.x + 1, cell.y + 1), area),
            EventAction::Input(button.to_input().expect("input"))
        );
        // Clicks on the display panel do nothing.
        assert_eq!(translate_event(click(2, 1), area), EventAction::Ignore);
    }

    #[test]
    fn right_clicks_are_ignored() {
        let area = Rect::new(0, 0, 40, 24);
        let event = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Right),
            column: 5,
            row: 10,
            modifiers: KeyModifiers::empty(),
        });
        assert_eq!(translate_event(event, area), EventAction::Ignore);
    }

    #[test]
    fn clicks_are_ignored_when_keypad_does_not_fit() {
        let area = Rect::new(0, 0, 16, 24);
        assert!(!screen_fits(area));
        assert_eq!(translate_event(click(2, 10), area), EventAction::Ignore);
        assert!(screen_fits(Rect::new(0, 0, 20, 23)));
    }

    #[test]
    fn small_screen_shows_size_notice_instead_of_keypad() {
        let mut app = test_app();
        for ch in "42".chars() {
            app.handle_input(CalcInput::from_char(ch).expect("key"));
        }
        let screen = render(&app, 16, 10);
        assert!(screen.contains("42"));
        assert!(screen.contains("need 20x23"));
        assert!(!screen.contains("÷"));
    }

    #[test]
    fn resize_requests_redraw() {
        let area = Rect::new(0, 0, 40, 24);
        assert_eq!(translate_event(Event::Resize(80, 30), area), EventAction::Redraw);
    }

    #[test]
    fn draw_shows_display_and_keypad() {
        let mut app = test_app();
        for ch in "12*3".chars() {
            app.handle_input(CalcInput::from_char(ch).expect("key"));
        }
        let screen = render(&app, 40, 24);
        assert!(screen.contains("12*3"));
        assert!(screen.contains("calcterm"));
        for label in ["7", "÷", "×", "C", "=", "%"] {
            assert!(screen.contains(label), "missing {label}");
        }
        assert!(screen.contains("Editing"));
    }

    #[test]
    fn draw_shows_error_and_truncation() {
        let mut app = test_app();
        for ch in "5/0=".chars() {
            app.handle_input(CalcInput::from_char(ch).expect("key"));
        }
        assert!(render(&app, 40, 24).contains("Error"));

        let mut app = test_app();
        for ch in "1234567890123456789012".chars() {
            app.handle_input(CalcInput::from_char(ch).expect("key"));
        }
        let screen = render(&app, 40, 24);
        assert!(screen.contains("12345678901234567890…"));
    }
}
