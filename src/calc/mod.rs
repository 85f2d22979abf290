//! Combat math: type chart, stat formulas, battle entities and damage rolls

pub mod entity;
pub mod formula;
pub mod stats;
pub mod types;

pub use entity::{
    BattleMove, BattlePokemon, CalcSettings, Generation, HeldItem, MoveCategory, PokemonSet,
    SpeciesData,
};
pub use formula::{CalcResult, DamageCalculator, StandardCalculator};
pub use stats::{BoostTable, Nature, Stat, StatSpread};
pub use types::PokemonType;
