//! Damage calculation
//!
//! `DamageCalculator` is the seam the session talks to. `StandardCalculator`
//! implements the generation 6+ single-target formula without critical hits,
//! abilities, weather or field effects.

use crate::calc::entity::{BattleMove, BattlePokemon, Generation, HeldItem, MoveCategory};
use crate::calc::stats::{apply_modifier, Stat};
use crate::calc::types::PokemonType;
use crate::core::error::{CalcError, Result};
use serde::Serialize;

/// 1.5x as a 4096-based modifier
const MOD_ONE_AND_HALF: u32 = 6144;
/// Lowest random roll, in percent
const MIN_ROLL: u32 = 85;
const ROLL_COUNT: u32 = 16;

/// Outcome of one calculation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalcResult {
    pub attacker: String,
    pub defender: String,
    pub move_name: String,
    /// Possible damage amounts, ascending
    pub damage: Vec<u16>,
    /// The defender's HP when the calculation ran
    pub defender_hp: u16,
    pub effectiveness: f32,
}

impl CalcResult {
    pub fn min_damage(&self) -> Option<u16> {
        self.damage.first().copied()
    }

    pub fn max_damage(&self) -> Option<u16> {
        self.damage.last().copied()
    }
}

pub trait DamageCalculator: Send + Sync {
    fn calculate(
        &self,
        generation: Generation,
        attacker: &BattlePokemon,
        defender: &BattlePokemon,
        move_: &BattleMove,
    ) -> Result<CalcResult>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StandardCalculator;

impl StandardCalculator {
    pub const MIN_GENERATION: u8 = 6;

    pub fn new() -> Self {
        Self
    }

    fn attacking_stat(attacker: &BattlePokemon, category: MoveCategory) -> u32 {
        let (stat, boosting_item) = match category {
            MoveCategory::Physical => (Stat::Attack, HeldItem::ChoiceBand),
            _ => (Stat::SpecialAttack, HeldItem::ChoiceSpecs),
        };
        let value = attacker.boosted(stat) as u32;
        if attacker.set.item == boosting_item {
            apply_modifier(value, MOD_ONE_AND_HALF)
        } else {
            value
        }
    }

    fn defending_stat(defender: &BattlePokemon, category: MoveCategory) -> u32 {
        let stat = match category {
            MoveCategory::Physical => Stat::Defense,
            _ => Stat::SpecialDefense,
        };
        let value = defender.boosted(stat) as u32;
        if defender.set.item == HeldItem::Eviolite && defender.can_evolve {
            apply_modifier(value, MOD_ONE_AND_HALF)
        } else {
            value
        }
    }

    fn base_damage(level: u8, power: u16, attack: u32, defense: u32) -> u32 {
        let level_factor = 2 * level as u32 / 5 + 2;
        level_factor * power as u32 * attack / defense.max(1) / 50 + 2
    }
}

impl DamageCalculator for StandardCalculator {
    fn calculate(
        &self,
        generation: Generation,
        attacker: &BattlePokemon,
        defender: &BattlePokemon,
        move_: &BattleMove,
    ) -> Result<CalcResult> {
        if generation.num() < Self::MIN_GENERATION {
            return Err(CalcError::UnsupportedGeneration(generation.num()));
        }
        if !move_.is_damaging() {
            return Err(CalcError::NoDamage(format!(
                "{} does not deal direct damage",
                move_.name
            )));
        }

        let effectiveness = PokemonType::effectiveness_against(move_.move_type, &defender.types);
        if effectiveness == 0.0 {
            return Err(CalcError::NoDamage(format!(
                "{} is immune to {}",
                defender.name, move_.name
            )));
        }

        let attack = Self::attacking_stat(attacker, move_.category);
        let defense = Self::defending_stat(defender, move_.category);
        let base = Self::base_damage(attacker.level, move_.power, attack, defense);
        let stab = attacker.has_type(move_.move_type);

        let damage: Vec<u16> = (0..ROLL_COUNT)
            .map(|i| {
                let mut roll = base * (MIN_ROLL + i) / 100;
                if stab {
                    roll = apply_modifier(roll, MOD_ONE_AND_HALF);
                }
                let roll = (roll as f32 * effectiveness).floor() as u32;
                roll.max(1).min(u16::MAX as u32) as u16
            })
            .collect();

        tracing::debug!(
            attacker = %attacker.name,
            defender = %defender.name,
            move_name = %move_.name,
            attack,
            defense,
            base,
            effectiveness,
            "Computed damage rolls"
        );

        Ok(CalcResult {
            attacker: attacker.name.clone(),
            defender: defender.name.clone(),
            move_name: move_.name.clone(),
            damage,
            defender_hp: defender.cur_hp,
            effectiveness,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::entity::{PokemonSet, SpeciesData, DEFAULT_LEVEL};
    use crate::calc::stats::StatSpread;

    fn mouse() -> BattlePokemon {
        let species = SpeciesData {
            types: vec![PokemonType::Electric],
            base: StatSpread {
                hp: 35,
                atk: 55,
                def: 40,
                spa: 50,
                spd: 50,
                spe: 90,
            },
            can_evolve: true,
        };
        BattlePokemon::new(
            Generation::LATEST,
            "Pikachu",
            species,
            PokemonSet::attacker_default(),
            DEFAULT_LEVEL,
        )
        .unwrap()
    }

    fn water_wall(set: PokemonSet, can_evolve: bool) -> BattlePokemon {
        let species = SpeciesData {
            types: vec![PokemonType::Water],
            base: StatSpread {
                hp: 80,
                atk: 50,
                def: 90,
                spa: 60,
                spd: 100,
                spe: 40,
            },
            can_evolve,
        };
        BattlePokemon::new(Generation::LATEST, "Vaporwall", species, set, DEFAULT_LEVEL).unwrap()
    }

    fn thunderbolt() -> BattleMove {
        BattleMove {
            name: "thunderbolt".into(),
            move_type: PokemonType::Electric,
            category: MoveCategory::Special,
            power: 90,
        }
    }

    fn no_item_calm() -> PokemonSet {
        PokemonSet {
            item: HeldItem::None,
            ..PokemonSet::defender_default()
        }
    }

    #[test]
    fn test_hand_computed_rolls() {
        // SpA 199 -> +1 = 298 -> Specs = 447; SpD 328; base damage 105
        let result = StandardCalculator
            .calculate(
                Generation::LATEST,
                &mouse(),
                &water_wall(no_item_calm(), false),
                &thunderbolt(),
            )
            .unwrap();

        assert_eq!(result.damage.len(), 16);
        assert_eq!(result.min_damage(), Some(266));
        assert_eq!(result.max_damage(), Some(314));
        assert_eq!(result.defender_hp, 364);
        assert_eq!(result.effectiveness, 2.0);
    }

    #[test]
    fn test_rolls_are_ascending() {
        let result = StandardCalculator
            .calculate(
                Generation::LATEST,
                &mouse(),
                &water_wall(no_item_calm(), false),
                &thunderbolt(),
            )
            .unwrap();
        assert!(result.damage.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_eviolite_only_when_not_fully_evolved() {
        let fully_evolved = StandardCalculator
            .calculate(
                Generation::LATEST,
                &mouse(),
                &water_wall(PokemonSet::defender_default(), false),
                &thunderbolt(),
            )
            .unwrap();
        let can_evolve = StandardCalculator
            .calculate(
                Generation::LATEST,
                &mouse(),
                &water_wall(PokemonSet::defender_default(), true),
                &thunderbolt(),
            )
            .unwrap();
        assert!(can_evolve.max_damage() < fully_evolved.max_damage());
    }

    #[test]
    fn test_immunity_has_no_damage() {
        let mut defender = water_wall(no_item_calm(), false);
        defender.types = vec![PokemonType::Ground];

        let result = StandardCalculator.calculate(
            Generation::LATEST,
            &mouse(),
            &defender,
            &thunderbolt(),
        );
        assert!(matches!(result, Err(CalcError::NoDamage(_))));
    }

    #[test]
    fn test_status_move_has_no_damage() {
        let growl = BattleMove {
            name: "growl".into(),
            move_type: PokemonType::Normal,
            category: MoveCategory::Status,
            power: 0,
        };
        let result = StandardCalculator.calculate(
            Generation::LATEST,
            &mouse(),
            &water_wall(no_item_calm(), false),
            &growl,
        );
        assert!(matches!(result, Err(CalcError::NoDamage(_))));
    }

    #[test]
    fn test_old_generations_rejected() {
        let result = StandardCalculator.calculate(
            Generation::new(3).unwrap(),
            &mouse(),
            &water_wall(no_item_calm(), false),
            &thunderbolt(),
        );
        assert!(matches!(result, Err(CalcError::UnsupportedGeneration(3))));
    }
}
