//! Battle-model objects built from looked-up data and a configured set
//!
//! A `BattlePokemon` is derived from a name's species data plus a
//! `PokemonSet` (held item, nature, EVs, boosts). Computed stats are fixed at
//! construction; the calculator never recomputes them.

use crate::api::records::{MoveRecord, PokemonRecord};
use crate::calc::stats::{
    apply_boost, calc_hp, calc_stat, BoostTable, Nature, Stat, StatSpread,
};
use crate::calc::types::PokemonType;
use crate::core::error::{CalcError, Result};
use crate::core::types::Role;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_LEVEL: u8 = 100;

/// Ruleset/data-version identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u8);

impl Generation {
    pub const LATEST: Generation = Generation(9);

    pub fn new(num: u8) -> Result<Self> {
        if (1..=Self::LATEST.0).contains(&num) {
            Ok(Self(num))
        } else {
            Err(CalcError::UnsupportedGeneration(num))
        }
    }

    pub fn num(&self) -> u8 {
        self.0
    }
}

impl Default for Generation {
    fn default() -> Self {
        Self::LATEST
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Gen {}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum HeldItem {
    None,
    ChoiceBand,
    ChoiceSpecs,
    Eviolite,
}

impl HeldItem {
    pub fn display_name(&self) -> &'static str {
        match self {
            HeldItem::None => "None",
            HeldItem::ChoiceBand => "Choice Band",
            HeldItem::ChoiceSpecs => "Choice Specs",
            HeldItem::Eviolite => "Eviolite",
        }
    }
}

impl fmt::Display for HeldItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for HeldItem {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "" | "none" => Ok(HeldItem::None),
            "choiceband" => Ok(HeldItem::ChoiceBand),
            "choicespecs" => Ok(HeldItem::ChoiceSpecs),
            "eviolite" => Ok(HeldItem::Eviolite),
            _ => Err(format!("Unsupported item: {}", s)),
        }
    }
}

impl TryFrom<String> for HeldItem {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HeldItem> for String {
    fn from(item: HeldItem) -> Self {
        item.display_name().to_string()
    }
}

/// Configuration applied to a creature when it is modeled for battle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PokemonSet {
    #[serde(default = "default_item")]
    pub item: HeldItem,
    #[serde(default = "default_nature")]
    pub nature: Nature,
    #[serde(default)]
    pub evs: StatSpread,
    #[serde(default)]
    pub boosts: BoostTable,
}

fn default_item() -> HeldItem {
    HeldItem::None
}

fn default_nature() -> Nature {
    Nature::Serious
}

impl PokemonSet {
    /// Specially offensive preset: Choice Specs, Timid, 252 SpA, +1 SpA
    pub fn attacker_default() -> Self {
        Self {
            item: HeldItem::ChoiceSpecs,
            nature: Nature::Timid,
            evs: StatSpread {
                spa: 252,
                ..Default::default()
            },
            boosts: BoostTable {
                spa: 1,
                ..Default::default()
            },
        }
    }

    /// Specially defensive preset: Eviolite, Calm, 252 HP / 252 SpD
    pub fn defender_default() -> Self {
        Self {
            item: HeldItem::Eviolite,
            nature: Nature::Calm,
            evs: StatSpread {
                hp: 252,
                spd: 252,
                ..Default::default()
            },
            boosts: BoostTable::default(),
        }
    }

    pub fn default_for(role: Role) -> Self {
        match role {
            Role::Attacker => Self::attacker_default(),
            Role::Defender => Self::defender_default(),
        }
    }

    pub fn validate(&self) -> std::result::Result<(), String> {
        self.evs.validate_as_evs()?;
        self.boosts.validate()
    }
}

/// Everything the calculation step needs besides the names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalcSettings {
    pub generation: Generation,
    pub level: u8,
    pub attacker: PokemonSet,
    pub defender: PokemonSet,
}

impl Default for CalcSettings {
    fn default() -> Self {
        Self {
            generation: Generation::LATEST,
            level: DEFAULT_LEVEL,
            attacker: PokemonSet::attacker_default(),
            defender: PokemonSet::defender_default(),
        }
    }
}

impl CalcSettings {
    pub fn set_for(&self, role: Role) -> &PokemonSet {
        match role {
            Role::Attacker => &self.attacker,
            Role::Defender => &self.defender,
        }
    }
}

/// Species-level data extracted from a creature record
#[derive(Debug, Clone, PartialEq)]
pub struct SpeciesData {
    pub types: Vec<PokemonType>,
    pub base: StatSpread,
    pub can_evolve: bool,
}

impl SpeciesData {
    pub fn from_record(record: &PokemonRecord, can_evolve: bool) -> Result<Self> {
        let mut types = Vec::with_capacity(record.types.len());
        let mut slots: Vec<_> = record.types.iter().collect();
        slots.sort_by_key(|slot| slot.slot);
        for slot in slots {
            let parsed = slot
                .type_
                .name
                .parse::<PokemonType>()
                .map_err(CalcError::MalformedRecord)?;
            types.push(parsed);
        }

        let mut base = StatSpread::default();
        for stat in Stat::ALL {
            let entry = record
                .stats
                .iter()
                .find(|s| s.stat.name == stat.api_name())
                .ok_or_else(|| {
                    CalcError::MalformedRecord(format!(
                        "{} has no {} stat",
                        record.name,
                        stat.api_name()
                    ))
                })?;
            base.set(stat, entry.base_stat);
        }

        Ok(Self {
            types,
            base,
            can_evolve,
        })
    }
}

/// A creature modeled for battle
#[derive(Debug, Clone, PartialEq)]
pub struct BattlePokemon {
    pub name: String,
    pub generation: Generation,
    pub level: u8,
    pub types: Vec<PokemonType>,
    pub set: PokemonSet,
    pub can_evolve: bool,
    /// Computed stats before boosts
    pub stats: StatSpread,
    pub cur_hp: u16,
}

impl BattlePokemon {
    pub fn new(
        generation: Generation,
        name: &str,
        species: SpeciesData,
        set: PokemonSet,
        level: u8,
    ) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CalcError::EntityConstruction("empty name".into()));
        }
        if species.types.is_empty() {
            return Err(CalcError::EntityConstruction(format!("{} has no types", name)));
        }
        if !(1..=100).contains(&level) {
            return Err(CalcError::EntityConstruction(format!(
                "level {} outside 1..=100",
                level
            )));
        }
        set.validate().map_err(CalcError::EntityConstruction)?;

        let mut stats = StatSpread::default();
        for stat in Stat::ALL {
            let base = species.base.get(stat);
            let ev = set.evs.get(stat);
            let value = match stat {
                Stat::Hp => calc_hp(base, ev, level),
                _ => calc_stat(base, ev, level, set.nature.percent_for(stat)),
            };
            stats.set(stat, value);
        }

        Ok(Self {
            name: name.to_string(),
            generation,
            level,
            types: species.types,
            set,
            can_evolve: species.can_evolve,
            cur_hp: stats.hp,
            stats,
        })
    }

    /// Stat after the set's stage boost
    pub fn boosted(&self, stat: Stat) -> u16 {
        apply_boost(self.stats.get(stat), self.set.boosts.get(stat))
    }

    pub fn has_type(&self, t: PokemonType) -> bool {
        self.types.contains(&t)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveCategory {
    Physical,
    Special,
    Status,
}

impl FromStr for MoveCategory {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "physical" => Ok(MoveCategory::Physical),
            "special" => Ok(MoveCategory::Special),
            "status" => Ok(MoveCategory::Status),
            other => Err(format!("Unknown damage class: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BattleMove {
    pub name: String,
    pub move_type: PokemonType,
    pub category: MoveCategory,
    /// Zero for moves without a base power
    pub power: u16,
}

impl BattleMove {
    pub fn from_record(record: &MoveRecord) -> Result<Self> {
        let move_type = record
            .type_
            .name
            .parse::<PokemonType>()
            .map_err(CalcError::MalformedRecord)?;
        let category = match &record.damage_class {
            Some(class) => class
                .name
                .parse::<MoveCategory>()
                .map_err(CalcError::MalformedRecord)?,
            None => MoveCategory::Status,
        };

        Ok(Self {
            name: record.name.clone(),
            move_type,
            category,
            power: record.power.unwrap_or(0),
        })
    }

    pub fn is_damaging(&self) -> bool {
        self.category != MoveCategory::Status && self.power > 0
    }
}
