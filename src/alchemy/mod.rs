pub mod evaluator;
pub mod rank;
pub mod selection;

pub use evaluator::{
    evaluate, skill_multiplier, PlayerParams, PotionEffect, PotionKind, PotionResult,
    BASE_MAGNITUDE, LEVEL_SCALE, MATCH_THRESHOLD, MAX_LEVEL, MAX_PERKS, MIN_LEVEL, PERK_BONUS,
};
pub use rank::AlchemyRank;
pub use selection::{SelectionError, SelectionSet, SLOT_COUNT};
