//! Build tab view - level, rebirth, attributes and derived stats

use super::{attribute_line, header, stat_line};
use crate::app::{App, BuildRow};
use build_core::curves::constants::ATTRIBUTE_FLOOR;
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
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    draw_editor(f, app, chunks[0]);
    draw_stats(f, app, chunks[1]);
}

fn draw_editor(f: &mut Frame, app: &App, area: Rect) {
    let build = &app.build;
    let mut lines: Vec<Line> = vec![header("Character"), Line::from("")];

    for (i, row) in BuildRow::all().into_iter().enumerate() {
        let is_selected = i == app.selected_row;
        let (prefix, style) = if is_selected {
            ("> ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        } else {
            ("  ", Style::default().fg(Color::White))
        };

        let (label, value) = match row {
            BuildRow::Level => (
                "Level".to_string(),
                format!("{} / {}", build.level(), build.max_level()),
            ),
            BuildRow::Rebirth => (
                "Rebirth".to_string(),
                if build.rebirth() { "yes" } else { "no" }.to_string(),
            ),
            BuildRow::Attribute(attribute) => {
                (attribute.to_string(), build.allocated().get(attribute).to_string())
            }
        };

        lines.push(Line::from(vec![
            Span::styled(prefix, style),
            Span::styled(format!("{:14}", label), style),
            Span::styled(value, Style::default().fg(Color::Green)),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!(
            "  Points above floor ({}): {}",
            ATTRIBUTE_FLOOR,
            build.points_allocated()
        ),
        Style::default().fg(Color::DarkGray),
    )));

    lines.push(Line::from(""));
    lines.push(header("Final Attributes"));
    let allocated = build.allocated();
    let total = &app.stats.final_attributes;
    for attribute in build_core::types::Attribute::all() {
        lines.push(attribute_line(
            attribute.short_name(),
            allocated.get(*attribute),
            total.get(*attribute),
        ));
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Build "),
    );

    f.render_widget(paragraph, area);
}

fn draw_stats(f: &mut Frame, app: &App, area: Rect) {
    let stats = &app.stats;

    let mut lines = vec![
        header("Defense"),
        stat_line("HP", stats.hp),
        stat_line("Armor", stats.armor),
        stat_line("Mitigation %", stats.mitigation_percent),
        stat_line("Dodge %", stats.dodge_percent),
        Line::from(""),
        header("Offense"),
        stat_line("Attack Power", stats.attack_power),
        stat_line("Attack Speed (ms)", stats.attack_speed_ms),
        stat_line("Crit %", stats.crit_percent),
        stat_line("Min Damage", stats.min_damage),
        stat_line("Max Damage", stats.max_damage),
        Line::from(vec![
            Span::styled(format!("{:20}", "DPS"), Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{:.2}", stats.dps),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        header("Resources"),
        stat_line("Energy", stats.energy),
        stat_line("HP / sec", stats.hp_regen_per_sec),
        stat_line("Energy / sec", stats.energy_regen_per_sec),
    ];

    let active = app.build.active_buffs();
    if !active.is_empty() {
        lines.push(Line::from(""));
        lines.push(header("Active Buffs"));
        for buff in active {
            lines.push(Line::from(Span::styled(
                format!("  {}", buff.name),
                Style::default().fg(Color::Magenta),
            )));
        }
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Derived Stats "));

    f.render_widget(paragraph, area);
}
