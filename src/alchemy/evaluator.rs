//! Potion evaluation: shared-effect matching and level/perk scaling.
//!
//! An effect becomes active only when two or more of the selected ingredients
//! carry it. Value and magnitude are then scaled by a single multiplier
//! derived from the player's alchemy level and perk count.

use serde::{Deserialize, Serialize};

use crate::alchemy::selection::SelectionSet;
use crate::data::ingredient::Ingredient;

/// Magnitude of every active effect before skill scaling.
pub const BASE_MAGNITUDE: f64 = 15.0;
/// Level contribution to the multiplier: +150% at level 100.
pub const LEVEL_SCALE: f64 = 1.5;
/// Multiplier bonus per alchemist perk: +20% each.
pub const PERK_BONUS: f64 = 0.2;
/// Ingredients that must share an effect for it to become active.
pub const MATCH_THRESHOLD: usize = 2;

pub const MIN_LEVEL: u32 = 1;
pub const MAX_LEVEL: u32 = 100;
pub const MAX_PERKS: u32 = 5;

/// Effect-name substrings that classify a result as a poison.
const POISON_MARKERS: [&str; 3] = ["damage", "ravage", "weakness"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerParams {
    pub level: u32,
    pub perks: u32,
}

impl Default for PlayerParams {
    /// The calculator's fallback inputs: level 15, no perks.
    fn default() -> Self {
        Self {
            level: 15,
            perks: 0,
        }
    }
}

impl PlayerParams {
    pub fn new(level: u32, perks: u32) -> Self {
        Self { level, perks }
    }

    /// Clamp into the supported ranges. Out-of-range input must never reach
    /// the scaling formula.
    pub fn clamped(self) -> Self {
        Self {
            level: self.level.clamp(MIN_LEVEL, MAX_LEVEL),
            perks: self.perks.min(MAX_PERKS),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PotionKind {
    /// Fewer than two ingredients selected. The resting state, not an error.
    NoPotion,
    /// Two or more ingredients with no effect in common.
    Failed,
    Success,
}

impl PotionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NoPotion => "no_potion",
            Self::Failed => "failed",
            Self::Success => "success",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PotionEffect {
    pub name: String,
    pub magnitude: i64,
}

/// One evaluation's output. Recomputed from scratch on every call; never
/// stored between calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PotionResult {
    pub kind: PotionKind,
    pub display_name: String,
    pub is_poison: bool,
    /// Active effects in first-encounter order over the slots.
    pub effects: Vec<PotionEffect>,
    /// Full-precision skill multiplier. Round only for display.
    pub multiplier: f64,
    /// Scaled value in septims.
    pub value: i64,
}

impl PotionResult {
    fn no_potion() -> Self {
        Self {
            kind: PotionKind::NoPotion,
            display_name: "Unknown Potion".to_string(),
            is_poison: false,
            effects: Vec::new(),
            multiplier: 1.0,
            value: 0,
        }
    }

    fn failed() -> Self {
        Self {
            kind: PotionKind::Failed,
            display_name: "Failed Potion".to_string(),
            is_poison: false,
            effects: Vec::new(),
            multiplier: 1.0,
            value: 0,
        }
    }

    /// Multiplier the way the calculator shows it, e.g. "1.23x".
    pub fn multiplier_display(&self) -> String {
        format!("{:.2}x", self.multiplier)
    }
}

/// Skill multiplier from player level and perk count. Inputs are clamped.
pub fn skill_multiplier(params: PlayerParams) -> f64 {
    let params = params.clamped();
    (1.0 + (params.level as f64 / 100.0) * LEVEL_SCALE) * (1.0 + params.perks as f64 * PERK_BONUS)
}

fn is_poison_effect(name: &str) -> bool {
    let lower = name.to_lowercase();
    POISON_MARKERS.iter().any(|marker| lower.contains(marker))
}

/// Count, per effect name, the distinct active ingredients carrying it.
/// An ingredient listing the same name twice counts once. First-encounter
/// order over the slots is preserved for display.
fn count_effects<'a>(active: &[&'a Ingredient]) -> Vec<(&'a str, usize)> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for ingredient in active {
        let mut counted: Vec<&str> = Vec::new();
        for effect in &ingredient.effects {
            if counted.contains(&effect.as_str()) {
                continue;
            }
            counted.push(effect.as_str());
            match counts.iter_mut().find(|(name, _)| *name == effect.as_str()) {
                Some((_, count)) => *count += 1,
                None => counts.push((effect.as_str(), 1)),
            }
        }
    }
    counts
}

/// Evaluate the current selection under the given player parameters.
/// Pure: identical inputs produce identical results.
pub fn evaluate(selection: &SelectionSet, params: PlayerParams) -> PotionResult {
    let active = selection.active_ingredients();
    if active.len() < MATCH_THRESHOLD {
        return PotionResult::no_potion();
    }

    let matched: Vec<&str> = count_effects(&active)
        .into_iter()
        .filter(|(_, count)| *count >= MATCH_THRESHOLD)
        .map(|(name, _)| name)
        .collect();

    if matched.is_empty() {
        return PotionResult::failed();
    }

    let multiplier = skill_multiplier(params);
    let is_poison = matched.iter().copied().any(is_poison_effect);
    let prefix = if is_poison { "Poison of " } else { "Potion of " };
    let display_name = format!("{prefix}{}", matched.join(" & "));

    let total_value: f64 = active.iter().map(|ingredient| ingredient.value).sum();
    let value = (total_value * matched.len() as f64 * multiplier).round() as i64;
    let magnitude = (BASE_MAGNITUDE * multiplier).round() as i64;

    let effects = matched
        .into_iter()
        .map(|name| PotionEffect {
            name: name.to_string(),
            magnitude,
        })
        .collect();

    PotionResult {
        kind: PotionKind::Success,
        display_name,
        is_poison,
        effects,
        multiplier,
        value,
    }
}
