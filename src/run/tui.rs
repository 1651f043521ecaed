use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;

use crate::ui::app::{App, InputMode, PendingAction, Screen};
use crate::ui::commands::{self, Session};
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

pub(crate) fn as_tui(session: &mut Session, export_path: PathBuf) -> Result<()> {
    let mut app = App::new(export_path);
    app.refresh(session);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, session);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        tracing::error!(error = %format!("{e:#}"), "dashboard stopped");
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    session: &mut Session,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            // tab bar, status bar, command bar, table borders and header
            let content_height = f.area().height.saturating_sub(6) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app);
        })?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                handle_key(key, app, session)?;
            }
        }
    }
    Ok(())
}

pub(crate) fn handle_key(key: KeyEvent, app: &mut App, session: &mut Session) -> Result<()> {
    if app.show_help {
        app.show_help = false;
        return Ok(());
    }
    match app.input_mode {
        InputMode::Normal => handle_normal_input(key, app, session),
        InputMode::Command => handle_command_input(key, app, session),
        InputMode::Editing => handle_editing_input(key, app, session),
        InputMode::Confirm => handle_confirm_input(key, app, session),
    }
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: KeyEvent, app: &mut App, session: &mut Session) -> Result<()> {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('q') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            scroll_down(&mut app.entry_index, &mut app.entry_scroll, app.rows.len(), app.visible_rows);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            scroll_up(&mut app.entry_index, &mut app.entry_scroll);
        }
        KeyCode::Char('g') => scroll_to_top(&mut app.entry_index, &mut app.entry_scroll),
        KeyCode::Char('G') => {
            scroll_to_bottom(&mut app.entry_index, &mut app.entry_scroll, app.rows.len(), app.visible_rows);
        }
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..app.visible_rows / 2 {
                scroll_down(&mut app.entry_index, &mut app.entry_scroll, app.rows.len(), app.visible_rows);
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..app.visible_rows / 2 {
                scroll_up(&mut app.entry_index, &mut app.entry_scroll);
            }
        }
        KeyCode::Char('1') => switch_screen(app, session, Screen::Dashboard),
        KeyCode::Char('2') => switch_screen(app, session, Screen::Entries),
        KeyCode::Tab | KeyCode::BackTab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let next = if key.code == KeyCode::Tab {
                (idx + 1) % screens.len()
            } else {
                (idx + screens.len() - 1) % screens.len()
            };
            switch_screen(app, session, screens[next]);
        }
        KeyCode::Enter => match app.screen {
            Screen::Dashboard => switch_screen(app, session, Screen::Entries),
            Screen::Entries => {
                if app.selected_row().is_some() {
                    app.command_input.clear();
                    app.input_mode = InputMode::Editing;
                }
            }
        },
        KeyCode::Esc => app.status_message.clear(),
        KeyCode::Char('?') => app.show_help = true,
        _ => {}
    }
    Ok(())
}

fn handle_command_input(key: KeyEvent, app: &mut App, session: &mut Session) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app, session)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => app.command_input.push(c),
        _ => {}
    }
    Ok(())
}

fn handle_editing_input(key: KeyEvent, app: &mut App, session: &mut Session) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let raw = std::mem::take(&mut app.command_input);
            app.input_mode = InputMode::Normal;
            if let Some(name) = app.selected_row().map(|r| r.name.clone()) {
                commands::submit_amount(&name, &raw, app, session)?;
            }
        }
        KeyCode::Esc => {
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Backspace => {
            app.command_input.pop();
        }
        KeyCode::Char(c) => app.command_input.push(c),
        _ => {}
    }
    Ok(())
}

fn handle_confirm_input(key: KeyEvent, app: &mut App, session: &mut Session) -> Result<()> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            if let Some(PendingAction::Clear) = app.pending_action.take() {
                session.clear()?;
                app.refresh(session);
                app.set_status("All amounts reset to zero");
            }
        }
        _ => {
            app.pending_action = None;
            app.set_status("Cancelled");
        }
    }
    app.input_mode = InputMode::Normal;
    app.confirm_message.clear();
    Ok(())
}

fn switch_screen(app: &mut App, session: &Session, screen: Screen) {
    app.screen = screen;
    app.refresh(session);
}

#[cfg(test)]
#[path = "tui_tests.rs"]
mod tests;
