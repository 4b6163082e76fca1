//! Farming projection - Time-to-kill and hourly yield per monster

use crate::types::MonsterRecord;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Projected performance against one monster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceRow {
    pub monster_name: String,
    pub level: i32,
    pub time_to_kill_seconds: f64,
    pub gold_per_hour: f64,
    pub xp_per_hour: f64,
}

/// Column a performance table is ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortColumn {
    Name,
    #[default]
    Level,
    TimeToKill,
    GoldPerHour,
    XpPerHour,
}

impl SortColumn {
    pub fn all() -> &'static [SortColumn] {
        &[
            SortColumn::Name,
            SortColumn::Level,
            SortColumn::TimeToKill,
            SortColumn::GoldPerHour,
            SortColumn::XpPerHour,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            SortColumn::Name => "Monster",
            SortColumn::Level => "Level",
            SortColumn::TimeToKill => "Time to kill",
            SortColumn::GoldPerHour => "Gold/h",
            SortColumn::XpPerHour => "XP/h",
        }
    }

    /// The column after this one, wrapping around
    pub fn next(&self) -> SortColumn {
        let all = Self::all();
        let index = all.iter().position(|c| c == self).unwrap_or(0);
        all[(index + 1) % all.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(&self) -> SortDirection {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Project kill time and hourly gold/XP for every monster in range
///
/// Empty when `dps <= 0`. Monsters outside `[min_level, max_level]`, with a
/// name in `excluded`, or with no health are left out. Rows follow the order
/// of `monsters`.
pub fn project(
    dps: f64,
    monsters: &[MonsterRecord],
    min_level: i32,
    max_level: i32,
    excluded: &HashSet<String>,
) -> Vec<PerformanceRow> {
    if dps.is_nan() || dps <= 0.0 || monsters.is_empty() {
        return Vec::new();
    }

    monsters
        .iter()
        .filter(|m| m.level >= min_level && m.level <= max_level)
        .filter(|m| !excluded.contains(&m.name))
        .filter_map(|monster| {
            if monster.health.is_nan() || monster.health <= 0.0 {
                tracing::debug!(monster = %monster.name, "skipping monster without health");
                return None;
            }

            let time_to_kill = monster.health / dps;
            let kills_per_hour = SECONDS_PER_HOUR / time_to_kill;

            Some(PerformanceRow {
                monster_name: monster.name.clone(),
                level: monster.level,
                time_to_kill_seconds: finite_or_zero(time_to_kill),
                gold_per_hour: finite_or_zero(kills_per_hour * monster.average_gold_per_kill),
                xp_per_hour: finite_or_zero(kills_per_hour * monster.xp_per_kill),
            })
        })
        .collect()
}

/// Case-insensitive name order, falling back to exact order
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

fn compare_rows(a: &PerformanceRow, b: &PerformanceRow, column: SortColumn) -> Ordering {
    match column {
        SortColumn::Name => compare_names(&a.monster_name, &b.monster_name),
        SortColumn::Level => a.level.cmp(&b.level),
        SortColumn::TimeToKill => a.time_to_kill_seconds.total_cmp(&b.time_to_kill_seconds),
        SortColumn::GoldPerHour => a.gold_per_hour.total_cmp(&b.gold_per_hour),
        SortColumn::XpPerHour => a.xp_per_hour.total_cmp(&b.xp_per_hour),
    }
}

/// Order rows by a column; ties keep their current relative order
pub fn sort_rows(rows: &mut [PerformanceRow], column: SortColumn, direction: SortDirection) {
    rows.sort_by(|a, b| {
        let ordering = compare_rows(a, b, column);
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}
