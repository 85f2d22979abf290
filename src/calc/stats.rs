//! Stat formulas, natures, effort values and stage boosts

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Individual values are not configurable; every set is assumed perfect.
pub const MAX_IV: u16 = 31;
pub const MAX_EV_PER_STAT: u16 = 252;
pub const MAX_EV_TOTAL: u16 = 510;
pub const MAX_BOOST: i8 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stat {
    Hp,
    Attack,
    Defense,
    SpecialAttack,
    SpecialDefense,
    Speed,
}

impl Stat {
    pub const ALL: [Stat; 6] = [
        Stat::Hp,
        Stat::Attack,
        Stat::Defense,
        Stat::SpecialAttack,
        Stat::SpecialDefense,
        Stat::Speed,
    ];

    /// Name used by the remote API's stat list
    pub fn api_name(&self) -> &'static str {
        match self {
            Stat::Hp => "hp",
            Stat::Attack => "attack",
            Stat::Defense => "defense",
            Stat::SpecialAttack => "special-attack",
            Stat::SpecialDefense => "special-defense",
            Stat::Speed => "speed",
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.api_name())
    }
}

/// Six values, one per stat. Used for base stats, EVs and computed stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StatSpread {
    pub hp: u16,
    pub atk: u16,
    pub def: u16,
    pub spa: u16,
    pub spd: u16,
    pub spe: u16,
}

impl StatSpread {
    pub fn get(&self, stat: Stat) -> u16 {
        match stat {
            Stat::Hp => self.hp,
            Stat::Attack => self.atk,
            Stat::Defense => self.def,
            Stat::SpecialAttack => self.spa,
            Stat::SpecialDefense => self.spd,
            Stat::Speed => self.spe,
        }
    }

    pub fn set(&mut self, stat: Stat, value: u16) {
        match stat {
            Stat::Hp => self.hp = value,
            Stat::Attack => self.atk = value,
            Stat::Defense => self.def = value,
            Stat::SpecialAttack => self.spa = value,
            Stat::SpecialDefense => self.spd = value,
            Stat::Speed => self.spe = value,
        }
    }

    pub fn total(&self) -> u32 {
        Stat::ALL.iter().map(|&s| self.get(s) as u32).sum()
    }

    /// Check the spread is a legal EV allocation
    pub fn validate_as_evs(&self) -> Result<(), String> {
        for stat in Stat::ALL {
            if self.get(stat) > MAX_EV_PER_STAT {
                return Err(format!(
                    "{} EVs ({}) exceed {}",
                    stat,
                    self.get(stat),
                    MAX_EV_PER_STAT
                ));
            }
        }
        if self.total() > MAX_EV_TOTAL as u32 {
            return Err(format!(
                "EV total ({}) exceeds {}",
                self.total(),
                MAX_EV_TOTAL
            ));
        }
        Ok(())
    }
}

/// Stat stages. HP cannot be boosted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BoostTable {
    pub atk: i8,
    pub def: i8,
    pub spa: i8,
    pub spd: i8,
    pub spe: i8,
}

impl BoostTable {
    pub fn get(&self, stat: Stat) -> i8 {
        match stat {
            Stat::Hp => 0,
            Stat::Attack => self.atk,
            Stat::Defense => self.def,
            Stat::SpecialAttack => self.spa,
            Stat::SpecialDefense => self.spd,
            Stat::Speed => self.spe,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        for stat in Stat::ALL {
            let stage = self.get(stat);
            if !(-MAX_BOOST..=MAX_BOOST).contains(&stage) {
                return Err(format!("{} boost {} outside -6..=6", stat, stage));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Nature {
    Hardy,
    Lonely,
    Brave,
    Adamant,
    Naughty,
    Bold,
    Docile,
    Relaxed,
    Impish,
    Lax,
    Timid,
    Hasty,
    Serious,
    Jolly,
    Naive,
    Modest,
    Mild,
    Quiet,
    Bashful,
    Rash,
    Calm,
    Gentle,
    Sassy,
    Careful,
    Quirky,
}

impl Nature {
    /// (raised, lowered) stat, or None for the five neutral natures
    pub fn modifiers(&self) -> Option<(Stat, Stat)> {
        use Nature::*;
        use Stat::*;

        match self {
            Hardy | Docile | Serious | Bashful | Quirky => None,
            Lonely => Some((Attack, Defense)),
            Brave => Some((Attack, Speed)),
            Adamant => Some((Attack, SpecialAttack)),
            Naughty => Some((Attack, SpecialDefense)),
            Bold => Some((Defense, Attack)),
            Relaxed => Some((Defense, Speed)),
            Impish => Some((Defense, SpecialAttack)),
            Lax => Some((Defense, SpecialDefense)),
            Timid => Some((Speed, Attack)),
            Hasty => Some((Speed, Defense)),
            Jolly => Some((Speed, SpecialAttack)),
            Naive => Some((Speed, SpecialDefense)),
            Modest => Some((SpecialAttack, Attack)),
            Mild => Some((SpecialAttack, Defense)),
            Quiet => Some((SpecialAttack, Speed)),
            Rash => Some((SpecialAttack, SpecialDefense)),
            Calm => Some((SpecialDefense, Attack)),
            Gentle => Some((SpecialDefense, Defense)),
            Sassy => Some((SpecialDefense, Speed)),
            Careful => Some((SpecialDefense, SpecialAttack)),
        }
    }

    /// Multiplier in percent (110, 100 or 90)
    pub fn percent_for(&self, stat: Stat) -> u32 {
        match self.modifiers() {
            Some((up, _)) if up == stat => 110,
            Some((_, down)) if down == stat => 90,
            _ => 100,
        }
    }
}

impl fmt::Display for Nature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl FromStr for Nature {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use Nature::*;

        let nature = match s.trim().to_ascii_lowercase().as_str() {
            "hardy" => Hardy,
            "lonely" => Lonely,
            "brave" => Brave,
            "adamant" => Adamant,
            "naughty" => Naughty,
            "bold" => Bold,
            "docile" => Docile,
            "relaxed" => Relaxed,
            "impish" => Impish,
            "lax" => Lax,
            "timid" => Timid,
            "hasty" => Hasty,
            "serious" => Serious,
            "jolly" => Jolly,
            "naive" => Naive,
            "modest" => Modest,
            "mild" => Mild,
            "quiet" => Quiet,
            "bashful" => Bashful,
            "rash" => Rash,
            "calm" => Calm,
            "gentle" => Gentle,
            "sassy" => Sassy,
            "careful" => Careful,
            "quirky" => Quirky,
            other => return Err(format!("Unknown nature: {}", other)),
        };
        Ok(nature)
    }
}

impl TryFrom<String> for Nature {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Nature> for String {
    fn from(nature: Nature) -> Self {
        nature.to_string()
    }
}

/// HP at the given level
pub fn calc_hp(base: u16, ev: u16, level: u8) -> u16 {
    let level = level as u32;
    let core = (2 * base as u32 + MAX_IV as u32 + ev as u32 / 4) * level / 100;
    (core + level + 10) as u16
}

/// Any non-HP stat at the given level
pub fn calc_stat(base: u16, ev: u16, level: u8, nature_percent: u32) -> u16 {
    let level = level as u32;
    let core = (2 * base as u32 + MAX_IV as u32 + ev as u32 / 4) * level / 100 + 5;
    (core * nature_percent / 100) as u16
}

/// Apply a stat stage to an already computed stat
pub fn apply_boost(stat: u16, stage: i8) -> u16 {
    let stat = stat as u32;
    let boosted = if stage >= 0 {
        stat * (2 + stage as u32) / 2
    } else {
        stat * 2 / (2 + stage.unsigned_abs() as u32)
    };
    boosted as u16
}

/// Multiply by a 4096-based modifier, rounding .5 down
pub fn apply_modifier(value: u32, modifier: u32) -> u32 {
    let product = value * modifier;
    let quotient = product / 4096;
    if product % 4096 > 2048 {
        quotient + 1
    } else {
        quotient
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_known_level_100_stats() {
        // Pikachu: 35 HP with no investment, 50 SpA with full investment
        assert_eq!(calc_hp(35, 0, 100), 211);
        assert_eq!(calc_stat(50, 252, 100, 100), 199);
        // Base 100 SpD, full investment, Calm
        assert_eq!(calc_stat(100, 252, 100, 110), 328);
    }

    #[test]
    fn test_boost_stages() {
        assert_eq!(apply_boost(100, 0), 100);
        assert_eq!(apply_boost(100, 1), 150);
        assert_eq!(apply_boost(100, 6), 400);
        assert_eq!(apply_boost(100, -1), 66);
        assert_eq!(apply_boost(100, -6), 25);
    }

    #[test]
    fn test_modifier_rounds_half_down() {
        // 89 * 1.5 = 133.5
        assert_eq!(apply_modifier(89, 6144), 133);
        // 91 * 1.5 = 136.5
        assert_eq!(apply_modifier(91, 6144), 136);
        assert_eq!(apply_modifier(100, 4096), 100);
    }

    #[test]
    fn test_nature_percentages() {
        assert_eq!(Nature::Timid.percent_for(Stat::Speed), 110);
        assert_eq!(Nature::Timid.percent_for(Stat::Attack), 90);
        assert_eq!(Nature::Timid.percent_for(Stat::SpecialAttack), 100);
        assert_eq!(Nature::Serious.percent_for(Stat::Speed), 100);
    }

    #[test]
    fn test_nature_parse() {
        assert_eq!("Calm".parse::<Nature>(), Ok(Nature::Calm));
        assert!("Grumpy".parse::<Nature>().is_err());
    }

    #[test]
    fn test_ev_validation() {
        let legal = StatSpread {
            hp: 252,
            spd: 252,
            def: 4,
            ..Default::default()
        };
        assert!(legal.validate_as_evs().is_ok());

        let too_many = StatSpread {
            hp: 252,
            spd: 252,
            spe: 252,
            ..Default::default()
        };
        assert!(too_many.validate_as_evs().is_err());

        let over_cap = StatSpread {
            spa: 300,
            ..Default::default()
        };
        assert!(over_cap.validate_as_evs().is_err());
    }

    #[test]
    fn test_boost_validation() {
        let boosts = BoostTable {
            spa: 7,
            ..Default::default()
        };
        assert!(boosts.validate().is_err());
    }

    proptest! {
        #[test]
        fn prop_more_evs_never_lower_a_stat(base in 1u16..=255, ev in 0u16..=248, level in 1u8..=100) {
            prop_assert!(calc_stat(base, ev + 4, level, 100) >= calc_stat(base, ev, level, 100));
            prop_assert!(calc_hp(base, ev + 4, level) >= calc_hp(base, ev, level));
        }

        #[test]
        fn prop_positive_boost_never_lowers(stat in 1u16..=999, stage in 0i8..=6) {
            prop_assert!(apply_boost(stat, stage) >= stat);
            prop_assert!(apply_boost(stat, -stage) <= stat);
        }
    }
}
