//! Configuration data structures.

use serde::{Deserialize, Serialize};

/// Health-bar overlay settings persisted as `<mod-id>.json`.
///
/// Every field falls back to its default when missing from the file, and keys
/// the struct does not know are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderlyConfig {
    /// Master switch for drawing health bars.
    pub draw: bool,

    /// Maximum distance in blocks at which bars are drawn.
    pub max_distance: u32,

    /// Keep drawing while the HUD is hidden (F1).
    pub render_in_f1: bool,

    /// Vertical offset of the plate above the entity's head.
    pub height_above: f64,

    /// Draw a translucent background behind the plate.
    pub draw_background: bool,
    pub background_padding: u32,
    pub background_height: u32,

    pub bar_height: u32,

    /// Plate width for regular entities.
    pub plate_size: u32,

    /// Plate width for boss entities.
    pub plate_size_boss: u32,

    /// Show attribute icons (undead, arthropod, ...).
    pub show_attributes: bool,
    pub show_armor: bool,

    /// Collapse armor icons into one icon with a multiplier.
    pub group_armor: bool,

    /// Color the bar by entity type instead of by remaining health.
    pub color_by_type: bool,
    pub hp_text_height: u32,
    pub show_max_hp: bool,
    pub show_current_hp: bool,
    pub show_percentage: bool,
    pub show_on_players: bool,
    pub show_on_bosses: bool,

    /// Only draw the bar of the entity under the crosshair.
    pub show_only_focused: bool,

    /// Draw bars for entities at full health.
    pub show_full_health: bool,
    pub enable_debug_info: bool,

    /// Entity ids that never get a health bar.
    pub blacklist: Vec<String>,
}

fn default_blacklist() -> Vec<String> {
    [
        "minecraft:shulker",
        "minecraft:armor_stand",
        "minecraft:cod",
        "minecraft:salmon",
        "minecraft:pufferfish",
        "minecraft:tropical_fish",
    ]
    .iter()
    .map(|id| id.to_string())
    .collect()
}

impl Default for OrderlyConfig {
    fn default() -> Self {
        Self {
            draw: true,
            max_distance: 24,
            render_in_f1: false,
            height_above: 0.6,
            draw_background: true,
            background_padding: 2,
            background_height: 6,
            bar_height: 4,
            plate_size: 25,
            plate_size_boss: 50,
            show_attributes: true,
            show_armor: true,
            group_armor: true,
            color_by_type: false,
            hp_text_height: 14,
            show_max_hp: true,
            show_current_hp: true,
            show_percentage: true,
            show_on_players: true,
            show_on_bosses: true,
            show_only_focused: false,
            show_full_health: true,
            enable_debug_info: true,
            blacklist: default_blacklist(),
        }
    }
}
