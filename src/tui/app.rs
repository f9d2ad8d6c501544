//! TUI Application - event loops and terminal management
//!
//! This module contains:
//! - Terminal setup and restoration
//! - The item browser loop (default command)
//! - The scan selector loop (interactive `scan`)
//!
//! Both loops are synchronous: poll for a key, apply it to the view state,
//! redraw.

use std::io::{self, stdout};
use std::time::Duration;

use crossterm::{
    ExecutableCommand,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use super::views::{BrowserView, SelectorOutcome, SelectorView};
use crate::Result;
use crate::commands::Manager;
use crate::models::ScanResult;
use crate::storage::StorageBackend;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

type Term = Terminal<CrosstermBackend<io::Stdout>>;

/// Browser application state
struct BrowserApp<'a, B: StorageBackend> {
    manager: &'a mut Manager<B>,
    view: BrowserView,
    should_quit: bool,
    /// Last key pressed (for gg detection)
    last_key: Option<KeyCode>,
}

impl<'a, B: StorageBackend> BrowserApp<'a, B> {
    fn new(manager: &'a mut Manager<B>) -> Result<Self> {
        let items = manager.list()?;
        Ok(Self {
            manager,
            view: BrowserView::new(items),
            should_quit: false,
            last_key: None,
        })
    }

    /// Handle keyboard events
    fn handle_key(&mut self, key: KeyEvent) {
        if is_interrupt(&key) {
            self.should_quit = true;
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('j') | KeyCode::Down => self.view.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.view.select_previous(),
            KeyCode::Char('g') => {
                // Check for gg sequence
                if self.last_key == Some(KeyCode::Char('g')) {
                    self.view.select_first();
                    self.last_key = None;
                    return;
                }
            }
            KeyCode::Home => self.view.select_first(),
            KeyCode::Char('G') | KeyCode::End => self.view.select_last(),
            KeyCode::Enter | KeyCode::Char(' ') => self.view.toggle_selected(self.manager),
            _ => {}
        }
        self.last_key = Some(key.code);
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title bar
                Constraint::Min(5),    // Item list
                Constraint::Length(3), // Status bar
            ])
            .split(frame.area());

        let title = Paragraph::new(Line::from(vec![
            Span::styled(
                " Rusky - Technical Debt",
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(
                    "  {} open / {} completed",
                    self.view.open_count(),
                    self.view.completed_count()
                ),
                Style::default().fg(Color::DarkGray),
            ),
        ]))
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        self.view.render(frame, chunks[1]);

        let status = match &self.view.error {
            Some(err) => Paragraph::new(format!(" {}", err)).style(Style::default().fg(Color::Red)),
            None => Paragraph::new(
                " j/k:Navigate  gg/G:Top/Bottom  Enter/Space:Toggle  q:Quit",
            )
            .style(Style::default().fg(Color::DarkGray)),
        };
        frame.render_widget(status.block(Block::default().borders(Borders::ALL)), chunks[2]);
    }
}

/// Ctrl-C arrives as a key event in raw mode.
fn is_interrupt(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}

/// Setup the terminal for TUI mode
fn setup_terminal() -> io::Result<Term> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout());
    Terminal::new(backend)
}

/// Restore the terminal to normal mode
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Next key press, if one arrives within the poll interval.
fn next_key() -> io::Result<Option<KeyEvent>> {
    if event::poll(POLL_INTERVAL)? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(Some(key));
            }
        }
    }
    Ok(None)
}

/// Run `body` inside the alternate screen, restoring the terminal even when
/// the body fails.
fn with_terminal<T>(body: impl FnOnce(&mut Term) -> Result<T>) -> Result<T> {
    let mut terminal = setup_terminal()?;
    let result = body(&mut terminal);
    restore_terminal()?;
    result
}

/// Run the interactive item browser until the user quits.
pub fn run_browser<B: StorageBackend>(manager: &mut Manager<B>) -> Result<()> {
    let mut app = BrowserApp::new(manager)?;
    tracing::info!(items = app.view.items.len(), "browser started");

    with_terminal(|terminal| {
        while !app.should_quit {
            terminal.draw(|f| app.render(f))?;
            if let Some(key) = next_key()? {
                app.handle_key(key);
            }
        }
        Ok(())
    })?;

    if app.view.dirty {
        tracing::warn!("browser closed with unsaved changes");
    }
    Ok(())
}

/// Run the scan selector over `results` until the user confirms or cancels.
pub fn run_selector<B: StorageBackend>(
    manager: &mut Manager<B>,
    results: Vec<ScanResult>,
) -> Result<SelectorOutcome> {
    let mut view = SelectorView::new(results);

    with_terminal(|terminal| {
        while !view.is_done() {
            terminal.draw(|f| {
                let area = f.area();
                view.render(f, area);
            })?;

            let Some(key) = next_key()? else {
                continue;
            };
            if is_interrupt(&key) {
                view.cancel();
                continue;
            }
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => view.cancel(),
                KeyCode::Char('k') | KeyCode::Up => view.select_previous(),
                KeyCode::Char('j') | KeyCode::Down => view.select_next(),
                KeyCode::Char(' ') => view.toggle_current(),
                KeyCode::Char('a') => view.select_all(),
                KeyCode::Char('n') => view.deselect_all(),
                KeyCode::Enter => view.confirm(manager),
                _ => {}
            }
        }
        Ok(())
    })?;

    Ok(view.outcome().unwrap_or(SelectorOutcome::Cancelled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::JsonFileBackend;
    use crate::test_utils::TestEnv;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn seed(manager: &mut Manager<JsonFileBackend>) {
        manager.add("one").unwrap();
        manager.add("two").unwrap();
    }

    #[test]
    fn test_browser_keys() {
        let env = TestEnv::new();
        let mut manager = env.manager();
        seed(&mut manager);

        let mut app = BrowserApp::new(&mut manager).unwrap();
        app.handle_key(press(KeyCode::Char('G')));
        assert_eq!(app.view.selected, 1);
        app.handle_key(press(KeyCode::Char('g')));
        app.handle_key(press(KeyCode::Char('g')));
        assert_eq!(app.view.selected, 0);

        app.handle_key(press(KeyCode::Enter));
        assert_eq!(app.view.completed_count(), 1);
        assert!(!app.should_quit);

        app.handle_key(press(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn test_ctrl_c_quits_browser() {
        let env = TestEnv::new();
        let mut manager = env.manager();
        let mut app = BrowserApp::new(&mut manager).unwrap();

        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }
}
