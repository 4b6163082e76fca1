//! Application state

use build_core::{
    build::{BuildError, CharacterBuildState, UnmetRequirement},
    config::{BaseConfig, GameData},
    curves::constants::ATTRIBUTE_FLOOR,
    farming::{project, sort_rows, PerformanceRow, SortColumn, SortDirection},
    stat_block::DerivedStats,
    types::{Attribute, Buff, EquipmentItem, EquipmentSlot},
};
use std::collections::HashSet;

/// Lowest monster level the farming filter accepts
const FARM_LEVEL_MIN: i32 = 1;
/// Highest monster level the farming filter accepts
const FARM_LEVEL_MAX: i32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Build,
    Gear,
    Buffs,
    Farming,
    Help,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[Tab::Build, Tab::Gear, Tab::Buffs, Tab::Farming, Tab::Help]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Tab::Build => "Build",
            Tab::Gear => "Gear",
            Tab::Buffs => "Buffs",
            Tab::Farming => "Farming",
            Tab::Help => "Help",
        }
    }
}

/// Editable row on the Build tab
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildRow {
    Level,
    Rebirth,
    Attribute(Attribute),
}

impl BuildRow {
    pub fn all() -> Vec<BuildRow> {
        let mut rows = vec![BuildRow::Level, BuildRow::Rebirth];
        rows.extend(Attribute::all().iter().map(|a| BuildRow::Attribute(*a)));
        rows
    }
}

/// Gear panel focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GearFocus {
    Slots,
    Items,
}

pub struct App {
    pub current_tab: Tab,
    pub data: GameData,
    pub config: BaseConfig,
    pub build: CharacterBuildState,
    pub stats: DerivedStats,
    pub rows: Vec<PerformanceRow>,
    pub status: Option<String>,
    // Build tab
    pub selected_row: usize,
    // Gear tab
    pub gear_focus: GearFocus,
    pub selected_slot: usize,
    pub selected_item: usize,
    // Buffs tab
    pub selected_buff: usize,
    // Farming tab
    pub farm_min_level: i32,
    pub farm_max_level: i32,
    pub excluded: HashSet<String>,
    pub sort_column: SortColumn,
    pub sort_direction: SortDirection,
    pub selected_monster: usize,
}

impl App {
    pub fn new(data: GameData, config: BaseConfig) -> Self {
        let build = CharacterBuildState::new();
        let stats = build.compute(&config);
        let mut app = App {
            current_tab: Tab::Build,
            data,
            config,
            build,
            stats,
            rows: Vec::new(),
            status: None,
            selected_row: 0,
            gear_focus: GearFocus::Slots,
            selected_slot: 0,
            selected_item: 0,
            selected_buff: 0,
            farm_min_level: FARM_LEVEL_MIN,
            farm_max_level: FARM_LEVEL_MAX,
            excluded: HashSet::new(),
            sort_column: SortColumn::default(),
            sort_direction: SortDirection::default(),
            selected_monster: 0,
        };
        app.refresh();
        app
    }

    /// Recompute stats, then the farming table, from the current build
    pub fn refresh(&mut self) {
        self.stats = self.build.compute(&self.config);

        let mut rows = project(
            self.stats.dps,
            self.data.monsters(),
            self.farm_min_level,
            self.farm_max_level,
            &self.excluded,
        );
        sort_rows(&mut rows, self.sort_column, self.sort_direction);
        self.rows = rows;

        if self.selected_monster >= self.rows.len() {
            self.selected_monster = self.rows.len().saturating_sub(1);
        }

        tracing::trace!(dps = self.stats.dps, rows = self.rows.len(), "recomputed");
    }

    /// Show the outcome of an edit and recompute on success
    fn apply(&mut self, result: Result<(), BuildError>) {
        match result {
            Ok(()) => self.refresh(),
            Err(e) => {
                tracing::warn!(error = %e, "build edit rejected");
                self.status = Some(e.to_string());
            }
        }
    }

    fn set_status(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!("{}", message);
        self.status = Some(message);
    }

    // === Tabs ===

    pub fn next_tab(&mut self) {
        let tabs = Tab::all();
        let current_idx = tabs.iter().position(|t| *t == self.current_tab).unwrap_or(0);
        let next_idx = (current_idx + 1) % tabs.len();
        self.current_tab = tabs[next_idx];
    }

    pub fn prev_tab(&mut self) {
        let tabs = Tab::all();
        let current_idx = tabs.iter().position(|t| *t == self.current_tab).unwrap_or(0);
        let prev_idx = if current_idx == 0 {
            tabs.len() - 1
        } else {
            current_idx - 1
        };
        self.current_tab = tabs[prev_idx];
    }

    pub fn set_tab(&mut self, index: usize) {
        let tabs = Tab::all();
        if index < tabs.len() {
            self.current_tab = tabs[index];
        }
    }

    // === Navigation ===

    pub fn on_up(&mut self) {
        match self.current_tab {
            Tab::Build => {
                self.selected_row = self.selected_row.saturating_sub(1);
            }
            Tab::Gear => match self.gear_focus {
                GearFocus::Slots => {
                    if self.selected_slot > 0 {
                        self.selected_slot -= 1;
                        self.selected_item = 0;
                    }
                }
                GearFocus::Items => {
                    self.selected_item = self.selected_item.saturating_sub(1);
                }
            },
            Tab::Buffs => {
                self.selected_buff = self.selected_buff.saturating_sub(1);
            }
            Tab::Farming => {
                self.selected_monster = self.selected_monster.saturating_sub(1);
            }
            Tab::Help => {}
        }
    }

    pub fn on_down(&mut self) {
        match self.current_tab {
            Tab::Build => {
                if self.selected_row < BuildRow::all().len() - 1 {
                    self.selected_row += 1;
                }
            }
            Tab::Gear => match self.gear_focus {
                GearFocus::Slots => {
                    if self.selected_slot < EquipmentSlot::all().len() - 1 {
                        self.selected_slot += 1;
                        self.selected_item = 0;
                    }
                }
                GearFocus::Items => {
                    if self.selected_item < self.slot_items().len().saturating_sub(1) {
                        self.selected_item += 1;
                    }
                }
            },
            Tab::Buffs => {
                if self.selected_buff < self.buffs().len().saturating_sub(1) {
                    self.selected_buff += 1;
                }
            }
            Tab::Farming => {
                if self.selected_monster < self.rows.len().saturating_sub(1) {
                    self.selected_monster += 1;
                }
            }
            Tab::Help => {}
        }
    }

    pub fn on_left(&mut self) {
        match self.current_tab {
            Tab::Build => self.adjust_selected(-1),
            Tab::Gear => self.gear_focus = GearFocus::Slots,
            _ => {}
        }
    }

    pub fn on_right(&mut self) {
        match self.current_tab {
            Tab::Build => self.adjust_selected(1),
            Tab::Gear => {
                self.gear_focus = GearFocus::Items;
                self.selected_item = 0;
            }
            _ => {}
        }
    }

    pub fn on_enter(&mut self) {
        match self.current_tab {
            Tab::Build => {
                if self.current_row() == BuildRow::Rebirth {
                    self.toggle_rebirth();
                }
            }
            Tab::Gear => match self.gear_focus {
                GearFocus::Slots => self.unequip_current_slot(),
                GearFocus::Items => self.equip_selected(),
            },
            Tab::Buffs => self.toggle_selected_buff(),
            Tab::Farming => self.exclude_selected(),
            Tab::Help => {}
        }
    }

    // === Build ===

    pub fn current_row(&self) -> BuildRow {
        let rows = BuildRow::all();
        rows[self.selected_row.min(rows.len() - 1)]
    }

    /// Change the selected Build row by `amount`
    ///
    /// Steps that would cross a bound are clamped to it instead of rejected.
    pub fn adjust_selected(&mut self, amount: i32) {
        if self.current_tab != Tab::Build {
            return;
        }
        self.status = None;

        match self.current_row() {
            BuildRow::Level => {
                let target = (self.build.level() as i64 + amount as i64)
                    .clamp(1, self.build.max_level() as i64) as u32;
                let result = self.build.set_level(target);
                self.apply(result);
            }
            BuildRow::Rebirth => self.toggle_rebirth(),
            BuildRow::Attribute(attribute) => {
                let current = self.build.allocated().get(attribute);
                let target = current.saturating_add(amount).max(ATTRIBUTE_FLOOR);
                if target != current {
                    let result = self.build.set_attribute(attribute, target);
                    self.apply(result);
                }
            }
        }
    }

    pub fn toggle_rebirth(&mut self) {
        let rebirth = !self.build.rebirth();
        self.build.set_rebirth(rebirth);
        self.set_status(format!(
            "Rebirth {} (max level {})",
            if rebirth { "on" } else { "off" },
            self.build.max_level()
        ));
        self.refresh();
    }

    /// Reset whatever the current tab edits
    pub fn reset(&mut self) {
        match self.current_tab {
            Tab::Build => {
                self.build.reset_attributes();
                self.set_status("Attributes reset");
            }
            Tab::Gear => {
                for slot in EquipmentSlot::all() {
                    self.build.unequip(*slot);
                }
                self.set_status("All gear removed");
            }
            Tab::Buffs => {
                self.build.clear_buffs();
                self.set_status("All buffs cleared");
            }
            Tab::Farming => {
                self.farm_min_level = FARM_LEVEL_MIN;
                self.farm_max_level = FARM_LEVEL_MAX;
                self.excluded.clear();
                self.sort_column = SortColumn::default();
                self.sort_direction = SortDirection::default();
                self.set_status("Farming filters reset");
            }
            Tab::Help => return,
        }
        self.refresh();
    }

    // === Gear ===

    pub fn current_slot(&self) -> EquipmentSlot {
        let slots = EquipmentSlot::all();
        slots[self.selected_slot.min(slots.len() - 1)]
    }

    /// Catalog items that fit the selected slot
    pub fn slot_items(&self) -> Vec<&EquipmentItem> {
        self.data.items_for_slot(self.current_slot())
    }

    pub fn selected_slot_item(&self) -> Option<&EquipmentItem> {
        self.slot_items().get(self.selected_item).copied()
    }

    pub fn equip_selected(&mut self) {
        let slot = self.current_slot();
        let Some(item) = self.selected_slot_item().cloned() else {
            return;
        };

        let name = item.name.clone();
        match self.build.equip(slot, item) {
            Ok(previous) => {
                let message = match previous {
                    Some(old) => format!("Equipped {} (replaced {})", name, old.name),
                    None => format!("Equipped {}", name),
                };
                self.set_status(message);
                self.refresh();
            }
            Err(e) => self.apply(Err(e)),
        }
    }

    pub fn unequip_current_slot(&mut self) {
        if self.current_tab != Tab::Gear {
            return;
        }
        let slot = self.current_slot();
        if let Some(item) = self.build.unequip(slot) {
            self.set_status(format!("Unequipped {}", item.name));
            self.refresh();
        }
    }

    pub fn unmet_requirements(&self, item: &EquipmentItem) -> Vec<UnmetRequirement> {
        self.build.unmet_requirements(item)
    }

    /// Stat changes from swapping `item` into its slot: (name, current, preview)
    pub fn preview_equip_diff(&self, item: &EquipmentItem) -> Vec<(String, f64, f64)> {
        let mut preview = self.build.clone();
        if preview.equip(item.slot, item.clone()).is_err() {
            return Vec::new();
        }
        let after = preview.compute(&self.config);
        let before = &self.stats;

        let pairs = [
            ("HP", before.hp, after.hp),
            ("Energy", before.energy, after.energy),
            ("Armor", before.armor, after.armor),
            ("Attack Power", before.attack_power, after.attack_power),
            ("Attack Speed", before.attack_speed_ms, after.attack_speed_ms),
            ("Crit %", before.crit_percent, after.crit_percent),
            ("Dodge %", before.dodge_percent, after.dodge_percent),
            ("DPS", before.dps, after.dps),
        ];

        pairs
            .into_iter()
            .filter(|(_, old, new)| (old - new).abs() > 0.005)
            .map(|(name, old, new)| (name.to_string(), old, new))
            .collect()
    }

    // === Buffs ===

    pub fn buffs(&self) -> Vec<&Buff> {
        self.data.buffs().collect()
    }

    pub fn toggle_selected_buff(&mut self) {
        let Some(buff) = self.buffs().get(self.selected_buff).map(|b| (*b).clone()) else {
            return;
        };

        match self.build.toggle_buff(&buff) {
            Ok(true) => {
                self.set_status(format!("{} activated", buff.name));
                self.refresh();
            }
            Ok(false) => {
                self.set_status(format!("{} deactivated", buff.name));
                self.refresh();
            }
            Err(e) => self.apply(Err(e)),
        }
    }

    // === Farming ===

    pub fn cycle_sort_column(&mut self) {
        if self.current_tab != Tab::Farming {
            return;
        }
        self.sort_column = self.sort_column.next();
        self.refresh();
    }

    pub fn toggle_sort_direction(&mut self) {
        if self.current_tab != Tab::Farming {
            return;
        }
        self.sort_direction = self.sort_direction.toggled();
        self.refresh();
    }

    pub fn shift_min_level(&mut self, amount: i32) {
        if self.current_tab != Tab::Farming {
            return;
        }
        self.farm_min_level = (self.farm_min_level + amount).clamp(FARM_LEVEL_MIN, self.farm_max_level);
        self.refresh();
    }

    pub fn shift_max_level(&mut self, amount: i32) {
        if self.current_tab != Tab::Farming {
            return;
        }
        self.farm_max_level = (self.farm_max_level + amount).clamp(self.farm_min_level, FARM_LEVEL_MAX);
        self.refresh();
    }

    /// Exclude the selected monster from the projection
    pub fn exclude_selected(&mut self) {
        if self.current_tab != Tab::Farming {
            return;
        }
        let Some(row) = self.rows.get(self.selected_monster) else {
            return;
        };
        let name = row.monster_name.clone();
        if self.excluded.insert(name.clone()) {
            self.set_status(format!("Excluded {}", name));
        }
        self.refresh();
    }

    pub fn clear_exclusions(&mut self) {
        if self.current_tab != Tab::Farming || self.excluded.is_empty() {
            return;
        }
        self.excluded.clear();
        self.set_status("Exclusions cleared");
        self.refresh();
    }
}
