//! Help tab view

use super::header;
use crate::app::App;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, _app: &App, area: Rect) {
    let lines = vec![
        header("Navigation"),
        key_line("1-5", "Jump to tab (Build/Gear/Buffs/Farming/Help)"),
        key_line("Tab / Shift+Tab", "Next/previous tab"),
        key_line("↑/k  ↓/j", "Navigate lists"),
        key_line("q / Ctrl+C", "Quit"),
        key_line("?", "Show this help"),
        Line::from(""),
        header("Build"),
        key_line("←/h  →/l", "Lower/raise selected value by 1"),
        key_line("- / +", "Lower/raise selected value by 10"),
        key_line("Enter", "Toggle rebirth (max level 60 → 80)"),
        key_line("r", "Reset attributes to 20"),
        Line::from(""),
        header("Gear & Buffs"),
        key_line("←/→", "Switch between slots and catalog"),
        key_line("Enter", "Equip item / unequip slot / toggle buff"),
        key_line("u", "Unequip selected slot"),
        key_line("r", "Remove all gear / clear all buffs"),
        Line::from(""),
        header("Farming"),
        key_line("s / d", "Next sort column / flip direction"),
        key_line("[ ]  { }", "Lower/raise min and max monster level"),
        key_line("x / X", "Exclude selected monster / restore all"),
        key_line("r", "Reset filters"),
        Line::from(""),
        header("Formulas"),
        Line::from("  Attributes start at 20; only points above 20 count"),
        Line::from("  HP = round(18 × level) + 20 × STA above 20"),
        Line::from("  Energy = round(20 × level) + 15 × INT above 20"),
        Line::from("  Armor = 5 × STR above 20 + gear + buffs"),
        Line::from("  Attack power: highest attribute gives 2/pt (STR 3/pt, wins ties)"),
        Line::from("  Crit: +1/14% per AGI/INT point, halved above 80%"),
        Line::from("  Dodge: 0.25% per AGI for 160, then halves each tier"),
        Line::from("  Damage = weapon + floor(AP × seconds per attack / 14)"),
        Line::from("  Only the first active attack speed buff applies (min 100 ms)"),
    ];

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Help & Formulas "));

    f.render_widget(paragraph, area);
}

fn key_line(key: &str, desc: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:20}", key), Style::default().fg(Color::Yellow)),
        Span::styled(desc.to_string(), Style::default().fg(Color::White)),
    ])
}
