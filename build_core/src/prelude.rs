//! Prelude module for convenient imports
//!
//! ```rust
//! use build_core::prelude::*;
//! ```

// Core types
pub use crate::types::{Attribute, AttributeSet, Buff, BuffCategory, Equipment, EquipmentItem, EquipmentSlot, MonsterRecord};

// Calculation
pub use crate::stat_block::{compute_stats, DerivedStats};
pub use crate::build::{BuildError, CharacterBuildState};

// Farming
pub use crate::farming::{project, sort_rows, PerformanceRow, SortColumn, SortDirection};

// Config
pub use crate::config::{default_game_data, BaseConfig, GameData};
