//! Gear tab view - slots, items for the selected slot, equip preview

use super::diff_line;
use crate::app::{App, GearFocus};
use build_core::build::UnmetRequirement;
use build_core::types::{EquipmentItem, EquipmentSlot};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    // Split into three columns: slots, items, preview
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Percentage(35),
            Constraint::Percentage(35),
        ])
        .split(area);

    draw_slots(f, app, chunks[0]);
    draw_items(f, app, chunks[1]);
    draw_preview(f, app, chunks[2]);
}

fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::White)
    }
}

fn draw_slots(f: &mut Frame, app: &App, area: Rect) {
    let is_focused = app.gear_focus == GearFocus::Slots;
    let mut lines: Vec<Line> = vec![];

    for (i, slot) in EquipmentSlot::all().iter().enumerate() {
        let is_selected = i == app.selected_slot;
        let (prefix, style) = if is_selected {
            ("> ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        } else {
            ("  ", Style::default().fg(Color::White))
        };

        let item_span = match app.build.equipped(*slot) {
            Some(item) => Span::styled(item.name.clone(), requirement_style(app, item)),
            None => Span::styled("(empty)", Style::default().fg(Color::DarkGray)),
        };

        lines.push(Line::from(vec![
            Span::styled(prefix, style),
            Span::styled(format!("{:9}", slot.name()), style),
            item_span,
        ]));
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style(is_focused))
            .title(" Equipped "),
    );

    f.render_widget(paragraph, area);
}

/// Red when the build does not meet the item's requirements
fn requirement_style(app: &App, item: &EquipmentItem) -> Style {
    if app.unmet_requirements(item).is_empty() {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::Red)
    }
}

fn draw_items(f: &mut Frame, app: &App, area: Rect) {
    let is_focused = app.gear_focus == GearFocus::Items;
    let items = app.slot_items();
    let mut lines: Vec<Line> = vec![Line::from(Span::styled(
        format!("  Items for: {}", app.current_slot().name()),
        Style::default().fg(Color::Cyan),
    ))];
    lines.push(Line::from(""));

    if items.is_empty() {
        lines.push(Line::from(Span::styled(
            "  No items available for this slot",
            Style::default().fg(Color::DarkGray),
        )));
    }

    for (i, item) in items.iter().enumerate() {
        let is_selected = is_focused && i == app.selected_item;
        let mut style = requirement_style(app, item);
        if is_selected {
            style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
        }
        let equipped = app
            .build
            .equipped(item.slot)
            .is_some_and(|current| current.id == item.id);

        lines.push(Line::from(vec![
            Span::styled(if is_selected { "> " } else { "  " }, Style::default().fg(Color::Yellow)),
            Span::styled(format!("L{:<3}", item.level), Style::default().fg(Color::DarkGray)),
            Span::styled(item.name.clone(), style),
            Span::styled(if equipped { " [E]" } else { "" }, Style::default().fg(Color::Cyan)),
        ]));
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style(is_focused))
            .title(" Catalog "),
    );

    f.render_widget(paragraph, area);
}

fn draw_preview(f: &mut Frame, app: &App, area: Rect) {
    let item = match app.gear_focus {
        GearFocus::Items => app.selected_slot_item(),
        GearFocus::Slots => app.build.equipped(app.current_slot()),
    };

    let Some(item) = item else {
        let paragraph = Paragraph::new("  Nothing selected")
            .block(Block::default().borders(Borders::ALL).title(" Item "));
        f.render_widget(paragraph, area);
        return;
    };

    let mut lines = vec![
        Line::from(Span::styled(
            item.name.clone(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("{} {} · level {}", item.subtype, item.slot.name(), item.level),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
    ];

    let attributes = item.attributes();
    for attribute in build_core::types::Attribute::all() {
        let value = attributes.get(*attribute);
        if value != 0 {
            lines.push(Line::from(format!("  {:+} {}", value, attribute.short_name())));
        }
    }
    if item.armor != 0.0 {
        lines.push(Line::from(format!("  {:+} Armor", item.armor)));
    }
    if item.attack_power != 0.0 {
        lines.push(Line::from(format!("  {:+} Attack Power", item.attack_power)));
    }
    if item.slot == EquipmentSlot::Weapon {
        lines.push(Line::from(format!(
            "  {}-{} damage",
            item.damage_min, item.damage_max
        )));
        match item.attack_speed {
            Some(speed) => lines.push(Line::from(format!("  {} ms per attack", speed))),
            None => lines.push(Line::from(Span::styled(
                "  default attack speed",
                Style::default().fg(Color::DarkGray),
            ))),
        }
    }

    let unmet = app.unmet_requirements(item);
    if !unmet.is_empty() {
        lines.push(Line::from(""));
        for requirement in unmet {
            let text = match requirement {
                UnmetRequirement::Level { required, actual } => {
                    format!("  Requires level {} (have {})", required, actual)
                }
                UnmetRequirement::Attribute {
                    attribute,
                    required,
                    actual,
                } => format!("  Requires {} {} (have {})", required, attribute, actual),
            };
            lines.push(Line::from(Span::styled(text, Style::default().fg(Color::Red))));
        }
    }

    if app.gear_focus == GearFocus::Items {
        let diff = app.preview_equip_diff(item);
        lines.push(Line::from(""));
        if diff.is_empty() {
            lines.push(Line::from(Span::styled(
                "  No stat changes",
                Style::default().fg(Color::DarkGray),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "If equipped:",
                Style::default().fg(Color::Cyan),
            )));
            for (name, before, after) in diff {
                let higher_is_better = name != "Attack Speed";
                lines.push(diff_line(&name, before, after, higher_is_better));
            }
        }
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Item "));

    f.render_widget(paragraph, area);
}
