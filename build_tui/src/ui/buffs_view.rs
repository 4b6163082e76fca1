//! Buffs tab view - catalog with active markers

use super::stat_line;
use crate::app::App;
use build_core::types::{Buff, BuffCategory};
use build_core::MAX_ACTIVE_BUFFS;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    draw_catalog(f, app, chunks[0]);
    draw_details(f, app, chunks[1]);
}

fn draw_catalog(f: &mut Frame, app: &App, area: Rect) {
    let active_count = app.build.active_buffs().len();
    let count_color = if active_count >= MAX_ACTIVE_BUFFS {
        Color::Red
    } else {
        Color::Green
    };

    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(
            format!("  Active: {}/{}", active_count, MAX_ACTIVE_BUFFS),
            Style::default().fg(count_color),
        )),
        Line::from(""),
    ];

    for (i, buff) in app.buffs().iter().enumerate() {
        let is_selected = i == app.selected_buff;
        let is_active = app.build.is_buff_active(&buff.name);

        let style = if is_selected {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else if is_active {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::White)
        };

        let category = match buff.category {
            BuffCategory::Buff => "",
            BuffCategory::Morph => " (morph)",
        };

        lines.push(Line::from(vec![
            Span::styled(if is_selected { "> " } else { "  " }, style),
            Span::styled(if is_active { "[x] " } else { "[ ] " }, style),
            Span::styled(buff.name.clone(), style),
            Span::styled(category, Style::default().fg(Color::DarkGray)),
        ]));
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Buffs "),
    );

    f.render_widget(paragraph, area);
}

fn draw_details(f: &mut Frame, app: &App, area: Rect) {
    let buffs = app.buffs();
    let Some(buff) = buffs.get(app.selected_buff) else {
        f.render_widget(
            Paragraph::new("").block(Block::default().borders(Borders::ALL).title(" Effects ")),
            area,
        );
        return;
    };

    let mut lines = vec![
        Line::from(Span::styled(
            buff.name.clone(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    lines.extend(effect_lines(buff));

    // Only the first active attack speed buff counts
    if buff.modifies_attack_speed() {
        let first = app
            .build
            .active_buffs()
            .iter()
            .find(|b| b.modifies_attack_speed());
        if let Some(first) = first.filter(|b| b.name != buff.name) {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("  Attack speed overridden by {}", first.name),
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Effects "));

    f.render_widget(paragraph, area);
}

fn effect_lines(buff: &Buff) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    let attributes = buff.attributes();
    for attribute in build_core::types::Attribute::all() {
        let value = attributes.get(*attribute);
        if value != 0 {
            lines.push(stat_line(attribute.short_name(), value as f64));
        }
    }

    let effects = [
        ("Attack Power", buff.attack_power),
        ("Crit %", buff.critical),
        ("Attack Speed (ms)", buff.attack_speed),
        ("Armor", buff.armor),
        ("HP / sec", buff.health_regen),
        ("Energy / sec", buff.energy_regen),
    ];
    for (name, value) in effects {
        if value != 0.0 {
            lines.push(stat_line(name, value));
        }
    }

    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "  No effects",
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines
}
