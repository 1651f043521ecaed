use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::app::{App, InputMode, Screen};
use super::commands::COMMANDS;
use super::theme;
use super::util::format_amount;

/// Key bindings listed at the top of the help overlay.
const KEY_HELP: &[(&str, &str)] = &[
    ("1 2 Tab", "Switch between Dashboard and Entries"),
    ("j k Up Down", "Move through subcategories"),
    ("g G Ctrl-d Ctrl-u", "Jump to top, bottom, page"),
    ("Enter", "Add an amount; a leading - subtracts"),
    (":", "Command mode"),
    ("Esc", "Cancel"),
    ("Ctrl-q", "Quit"),
];

pub(crate) fn render(f: &mut Frame, app: &App) {
    let [header, body, status, command] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(5),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(f.area());

    render_header(f, header, app);
    match app.screen {
        Screen::Dashboard => super::screens::dashboard::render(f, body, app),
        Screen::Entries => super::screens::entries::render(f, body, app),
    }
    render_status_bar(f, status, app);
    render_command_bar(f, command, app);

    if app.show_help {
        render_help(f, f.area());
    }
}

/// App name, one label per screen, and the grand total on the right.
fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::styled(" fintrack ", theme::header_style())];
    for (i, screen) in Screen::all().iter().enumerate() {
        let style = if *screen == app.screen {
            Style::default().fg(theme::ACCENT).add_modifier(Modifier::BOLD)
        } else {
            theme::dim_style()
        };
        spans.push(Span::styled(format!(" {}:{screen} ", i + 1), style));
    }

    let total = format!(" {} ", format_amount(app.grand_total));
    let used: usize = spans.iter().map(|s| s.width()).sum::<usize>() + total.len();
    spans.push(Span::raw(" ".repeat((area.width as usize).saturating_sub(used))));
    spans.push(Span::styled(total, theme::amount_style()));

    let bar = Paragraph::new(Line::from(spans)).style(Style::default().bg(theme::HEADER_BG));
    f.render_widget(bar, area);
}

fn mode_color(mode: InputMode) -> Color {
    match mode {
        InputMode::Normal => theme::ACCENT,
        InputMode::Command | InputMode::Editing => theme::GREEN,
        InputMode::Confirm => theme::RED,
    }
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let badge = Span::styled(
        format!(" {} ", app.input_mode),
        Style::default()
            .fg(theme::HEADER_BG)
            .bg(mode_color(app.input_mode))
            .add_modifier(Modifier::BOLD),
    );
    let hints = match app.screen {
        Screen::Dashboard => "Enter entries  :export  ? help",
        Screen::Entries => "j/k move  Enter add amount  ? help",
    };
    let info = format!(" import: {}  |  {hints}", app.mode);

    let bar = Paragraph::new(Line::from(vec![badge, Span::raw(info)]))
        .style(theme::status_bar_style());
    f.render_widget(bar, area);
}

fn render_command_bar(f: &mut Frame, area: Rect, app: &App) {
    let prompt = match app.input_mode {
        InputMode::Command => Some((":".to_string(), theme::ACCENT)),
        InputMode::Editing => Some((
            format!(
                "{} amount> ",
                app.selected_row().map_or("", |r| r.name.as_str())
            ),
            theme::GREEN,
        )),
        InputMode::Normal | InputMode::Confirm => None,
    };

    let line = match (&prompt, app.input_mode) {
        (Some((text, color)), _) => Line::from(vec![
            Span::styled(text.as_str(), Style::default().fg(*color)),
            Span::styled(app.command_input.as_str(), theme::command_bar_style()),
        ]),
        (None, InputMode::Confirm) => Line::from(vec![
            Span::styled(app.confirm_message.as_str(), Style::default().fg(theme::YELLOW)),
            Span::styled(" [y/N] ", Style::default().fg(theme::RED)),
        ]),
        (None, _) if app.status_message.is_empty() => Line::from(Span::styled(
            " : command   Enter on an entry to add an amount   ? help",
            theme::dim_style(),
        )),
        (None, _) => Line::from(Span::styled(
            app.status_message.as_str(),
            theme::command_bar_style(),
        )),
    };

    f.render_widget(
        Paragraph::new(line).style(Style::default().bg(theme::COMMAND_BG)),
        area,
    );

    if let Some((text, _)) = prompt {
        let offset = (text.chars().count() + app.command_input.chars().count()) as u16;
        f.set_cursor_position((area.x + offset, area.y));
    }
}

/// Key bindings, then every `:` command by its full name.
fn render_help(f: &mut Frame, area: Rect) {
    let heading = |text: &'static str| {
        Line::from(Span::styled(
            text,
            Style::default().fg(theme::YELLOW).add_modifier(Modifier::BOLD),
        ))
    };

    let mut lines = vec![heading(" Keys")];
    lines.extend(KEY_HELP.iter().map(|(keys, what)| {
        Line::from(Span::styled(format!("  {keys:<20} {what}"), theme::normal_style()))
    }));
    lines.push(Line::from(""));
    lines.push(heading(" Commands"));

    // single-letter aliases share a description with their long name
    let mut commands: Vec<(&str, &str)> = COMMANDS
        .iter()
        .filter(|(name, _)| name.len() > 1)
        .map(|(&name, cmd)| (name, cmd.description))
        .collect();
    commands.sort_unstable();
    lines.extend(commands.iter().map(|(name, desc)| {
        Line::from(Span::styled(format!("  :{name:<19} {desc}"), theme::normal_style()))
    }));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(" any key closes", theme::dim_style())));

    let height = (lines.len() as u16 + 2).min(area.height.saturating_sub(2));
    let width = 72.min(area.width.saturating_sub(4));
    let popup = Rect::new(
        area.x + area.width.saturating_sub(width) / 2,
        area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    );

    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .title(Span::styled(" fintrack help ", theme::title_style()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::ACCENT))
                .style(Style::default().bg(theme::HEADER_BG)),
        ),
        popup,
    );
}
