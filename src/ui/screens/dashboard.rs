use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use rust_decimal::Decimal;

use crate::rollup::{ChartData, Series};
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, segment_widths, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Summary cards
            Constraint::Length(6), // Rings
            Constraint::Min(6),    // Legend
        ])
        .split(area);

    render_summary_cards(f, chunks[0], app);
    render_rings(f, chunks[1], app);
    render_legend(f, chunks[2], app);
}

fn render_summary_cards(f: &mut Frame, area: Rect, app: &App) {
    let count = app.shares.len() as u32 + 1;
    let constraints: Vec<Constraint> = (0..count).map(|_| Constraint::Ratio(1, count)).collect();
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    render_card(f, cards[0], "Total", app.grand_total, theme::ACCENT, None);
    for (i, (share, color)) in app.shares.iter().zip(&app.category_colors).enumerate() {
        render_card(
            f,
            cards[i + 1],
            &share.category,
            share.total,
            theme::palette(*color),
            Some(format!("{:.2}%", share.percentage)),
        );
    }
}

fn render_card(
    f: &mut Frame,
    area: Rect,
    title: &str,
    amount: Decimal,
    color: ratatui::style::Color,
    subtitle: Option<String>,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(format!(" {title} "), theme::title_style()));

    let text = Paragraph::new(vec![
        Line::from(Span::styled(
            format_amount(amount),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(subtitle.unwrap_or_default(), theme::dim_style())),
    ])
    .centered()
    .block(block);

    f.render_widget(text, area);
}

/// The two rings of the chart, unrolled into stacked bars.
fn render_rings(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(" Breakdown ", theme::title_style()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let width = inner.width.saturating_sub(16) as usize;
    let lines = match &app.chart {
        ChartData::Placeholder(series) => vec![
            Line::from(""),
            bar_line(series, width),
            Line::from(""),
            Line::from(Span::styled(
                "  Nothing entered yet. Select a subcategory on Entries (2) and press Enter",
                theme::dim_style(),
            )),
        ],
        ChartData::Breakdown(series) => vec![
            Line::from(""),
            bar_line(&series.categories, width),
            Line::from(""),
            bar_line(&series.subcategories, width),
        ],
    };
    f.render_widget(Paragraph::new(lines), inner);
}

fn bar_line(series: &Series, width: usize) -> Line<'_> {
    let widths = segment_widths(&series.values, width);
    let mut spans = vec![Span::styled(
        format!(" {:<14}", truncate(series.label, 14)),
        theme::dim_style(),
    )];
    for ((_, _, color), cells) in series.segments().zip(widths) {
        if cells > 0 {
            spans.push(Span::styled(
                "█".repeat(cells),
                Style::default().fg(theme::palette(color)),
            ));
        }
    }
    Line::from(spans)
}

fn render_legend(f: &mut Frame, area: Rect, app: &App) {
    let columns = app.shares.len().max(1) as u32;
    let constraints: Vec<Constraint> =
        (0..columns).map(|_| Constraint::Ratio(1, columns)).collect();
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (i, share) in app.shares.iter().enumerate() {
        let mut lines = Vec::new();
        for row in app.rows.iter().filter(|r| r.category == share.category) {
            lines.push(Line::from(vec![
                Span::styled(" ■ ", Style::default().fg(theme::palette(row.color))),
                Span::styled(format!("{:<14}", truncate(&row.name, 14)), theme::normal_style()),
                Span::styled(format_amount(row.amount), amount_style(row.amount)),
            ]));
        }

        let legend = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::OVERLAY))
                .title(Span::styled(format!(" {} ", share.category), theme::title_style())),
        );
        f.render_widget(legend, cols[i]);
    }
}

fn amount_style(amount: Decimal) -> Style {
    if amount.is_zero() {
        theme::dim_style()
    } else {
        theme::amount_style()
    }
}
