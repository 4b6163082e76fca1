//! UI rendering

mod buffs_view;
mod build_view;
mod farming_view;
mod gear_view;
mod help_view;

use crate::app::{App, GearFocus, Tab};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status line
            Constraint::Length(3), // Keybindings footer
        ])
        .split(f.area());

    draw_tabs(f, app, chunks[0]);

    match app.current_tab {
        Tab::Build => build_view::draw(f, app, chunks[1]),
        Tab::Gear => gear_view::draw(f, app, chunks[1]),
        Tab::Buffs => buffs_view::draw(f, app, chunks[1]),
        Tab::Farming => farming_view::draw(f, app, chunks[1]),
        Tab::Help => help_view::draw(f, app, chunks[1]),
    }

    draw_status(f, app, chunks[2]);
    draw_keybindings(f, app, chunks[3]);
}

fn draw_status(f: &mut Frame, app: &App, area: Rect) {
    let text = app.status.as_deref().unwrap_or("");
    let paragraph = Paragraph::new(Line::from(Span::styled(
        format!(" {}", text),
        Style::default().fg(Color::LightMagenta),
    )));
    f.render_widget(paragraph, area);
}

fn draw_keybindings(f: &mut Frame, app: &App, area: Rect) {
    let common_keys = vec![("Tab", "Next tab"), ("q", "Quit")];

    let tab_keys: Vec<(&str, &str)> = match app.current_tab {
        Tab::Build => vec![
            ("↑/↓", "Select"),
            ("←/→", "-1/+1"),
            ("-/+", "-10/+10"),
            ("Enter", "Rebirth"),
            ("r", "Reset points"),
        ],
        Tab::Gear => match app.gear_focus {
            GearFocus::Slots => vec![("↑/↓", "Slot"), ("→", "Items"), ("Enter/u", "Unequip")],
            GearFocus::Items => vec![("↑/↓", "Item"), ("←", "Slots"), ("Enter", "Equip")],
        },
        Tab::Buffs => vec![("↑/↓", "Select"), ("Enter", "Toggle"), ("r", "Clear all")],
        Tab::Farming => vec![
            ("s", "Sort column"),
            ("d", "Direction"),
            ("[/]", "Min level"),
            ("{/}", "Max level"),
            ("x/X", "Exclude/restore"),
        ],
        Tab::Help => vec![],
    };

    let mut spans: Vec<Span> = Vec::new();

    for (i, (key, desc)) in tab_keys.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  │  ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(
            format!("[{}]", key),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(format!(" {}", desc), Style::default().fg(Color::White)));
    }

    if !tab_keys.is_empty() {
        spans.push(Span::styled("  │  ", Style::default().fg(Color::DarkGray)));
    }

    for (i, (key, desc)) in common_keys.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  │  ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(format!("[{}]", key), Style::default().fg(Color::Cyan)));
        spans.push(Span::styled(format!(" {}", desc), Style::default().fg(Color::Gray)));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title(" Keys "))
        .alignment(Alignment::Center);

    f.render_widget(paragraph, area);
}

fn draw_tabs(f: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = Tab::all()
        .iter()
        .map(|t| {
            let style = if *t == app.current_tab {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::from(Span::styled(t.name(), style))
        })
        .collect();

    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL).title(" Build Planner "))
        .highlight_style(Style::default().fg(Color::Yellow))
        .divider("|");

    f.render_widget(tabs, area);
}

/// Section header line
pub fn header(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("═══ {} ═══", title),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ))
}

pub fn stat_line(name: &str, value: f64) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:20}", name), Style::default().fg(Color::Gray)),
        Span::styled(format!("{:.2}", value), Style::default().fg(Color::White)),
    ])
}

/// Attribute line showing the allocated value and, when different, the final one
pub fn attribute_line(name: &str, allocated: i32, total: i32) -> Line<'static> {
    if allocated == total {
        return Line::from(vec![
            Span::styled(format!("{:20}", name), Style::default().fg(Color::Gray)),
            Span::styled(total.to_string(), Style::default().fg(Color::White)),
        ]);
    }

    let color = if total > allocated { Color::Green } else { Color::Red };
    Line::from(vec![
        Span::styled(format!("{:20}", name), Style::default().fg(Color::Gray)),
        Span::styled(total.to_string(), Style::default().fg(color)),
        Span::styled(
            format!(" (allocated: {})", allocated),
            Style::default().fg(Color::DarkGray),
        ),
    ])
}

/// Before/after line for an equip preview
pub fn diff_line(name: &str, before: f64, after: f64, higher_is_better: bool) -> Line<'static> {
    let delta = after - before;
    let color = if (delta >= 0.0) == higher_is_better {
        Color::Green
    } else {
        Color::Red
    };
    Line::from(vec![
        Span::styled(format!("  {:14}", name), Style::default().fg(Color::Gray)),
        Span::styled(format!("{:.2} → ", before), Style::default().fg(Color::DarkGray)),
        Span::styled(format!("{:.2}", after), Style::default().fg(color)),
        Span::styled(format!(" ({:+.2})", delta), Style::default().fg(color)),
    ])
}
