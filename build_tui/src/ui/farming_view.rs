//! Farming tab view - projected kill time and hourly yield per monster

use crate::app::App;
use build_core::farming::{SortColumn, SortDirection};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(0)])
        .split(area);

    draw_filters(f, app, chunks[0]);
    draw_table(f, app, chunks[1]);
}

fn draw_filters(f: &mut Frame, app: &App, area: Rect) {
    let direction = match app.sort_direction {
        SortDirection::Ascending => "▲",
        SortDirection::Descending => "▼",
    };

    let excluded = if app.excluded.is_empty() {
        "none".to_string()
    } else {
        let mut names: Vec<&str> = app.excluded.iter().map(String::as_str).collect();
        names.sort();
        names.join(", ")
    };

    let lines = vec![
        Line::from(vec![
            Span::styled("  DPS ", Style::default().fg(Color::Gray)),
            Span::styled(format!("{:.2}", app.stats.dps), Style::default().fg(Color::Yellow)),
            Span::styled("   Levels ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{}-{}", app.farm_min_level, app.farm_max_level),
                Style::default().fg(Color::White),
            ),
            Span::styled("   Sort ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{} {}", app.sort_column.name(), direction),
                Style::default().fg(Color::White),
            ),
        ]),
        Line::from(vec![
            Span::styled("  Excluded: ", Style::default().fg(Color::Gray)),
            Span::styled(excluded, Style::default().fg(Color::DarkGray)),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Filters "));
    f.render_widget(paragraph, area);
}

fn column_header(column: SortColumn, active: SortColumn, width: usize) -> Span<'static> {
    let style = if column == active {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan)
    };
    Span::styled(format!("{:>width$}", column.name(), width = width), style)
}

fn draw_table(f: &mut Frame, app: &App, area: Rect) {
    let active = app.sort_column;
    let mut lines = vec![Line::from(vec![
        Span::raw("  "),
        {
            let style = if active == SortColumn::Name {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Cyan)
            };
            Span::styled(format!("{:<24}", SortColumn::Name.name()), style)
        },
        column_header(SortColumn::Level, active, 6),
        column_header(SortColumn::TimeToKill, active, 14),
        column_header(SortColumn::GoldPerHour, active, 12),
        column_header(SortColumn::XpPerHour, active, 12),
    ])];

    if app.rows.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "  No monsters to project (no damage, or everything filtered out)",
            Style::default().fg(Color::DarkGray),
        )));
    }

    // Keep the selected row visible
    let visible = area.height.saturating_sub(3) as usize;
    let offset = if visible > 0 && app.selected_monster >= visible {
        app.selected_monster + 1 - visible
    } else {
        0
    };

    for (i, row) in app.rows.iter().enumerate().skip(offset) {
        let is_selected = i == app.selected_monster;
        let style = if is_selected {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::REVERSED)
        } else {
            Style::default().fg(Color::White)
        };

        lines.push(Line::from(vec![
            Span::styled(if is_selected { "> " } else { "  " }, Style::default().fg(Color::Yellow)),
            Span::styled(
                format!(
                    "{:<24}{:>6}{:>14}{:>12}{:>12}",
                    truncate(&row.monster_name, 23),
                    row.level,
                    format!("{:.1}s", row.time_to_kill_seconds),
                    format!("{:.0}", row.gold_per_hour),
                    format!("{:.0}", row.xp_per_hour),
                ),
                style,
            ),
        ]));
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Projection ({} monsters) ", app.rows.len())),
    );
    f.render_widget(paragraph, area);
}

fn truncate(name: &str, max: usize) -> String {
    if name.chars().count() <= max {
        name.to_string()
    } else {
        let mut short: String = name.chars().take(max.saturating_sub(1)).collect();
        short.push('…');
        short
    }
}
