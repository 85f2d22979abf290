//! Application configuration with documented defaults
//!
//! Values come from, in increasing precedence: built-in defaults, an optional
//! TOML file, and `DEXCALC_*` environment variables.

use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::calc::entity::{CalcSettings, Generation, PokemonSet, DEFAULT_LEVEL};
use crate::core::error::{CalcError, Result};

/// Configuration for lookups, debouncing and calculation presets
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CalcConfig {
    // === REMOTE API ===
    /// Base URL of the creature-data API, without trailing slash
    pub api_base_url: String,

    /// Per-request timeout in seconds
    ///
    /// A lookup that times out is reported like any other transport failure.
    pub request_timeout_secs: u64,

    // === INPUT ===
    /// Quiet interval before a name typed into an input triggers a lookup (ms)
    ///
    /// At 300ms, a normal typing burst produces one request for the final
    /// name instead of one per keystroke.
    pub debounce_ms: u64,

    // === CALCULATION ===
    /// Ruleset identifier handed to the calculator
    pub generation: u8,

    /// Level both creatures are modeled at
    pub level: u8,

    /// Set applied to the attacking creature
    pub attacker: PokemonSet,

    /// Set applied to the defending creature
    pub defender: PokemonSet,

    // === LOGGING ===
    /// Where the terminal UI writes its log (stderr would corrupt the screen)
    pub log_file: PathBuf,
}

impl Default for CalcConfig {
    fn default() -> Self {
        Self {
            api_base_url: crate::api::client::DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: 10,
            debounce_ms: 300,
            generation: Generation::LATEST.num(),
            level: DEFAULT_LEVEL,
            attacker: PokemonSet::attacker_default(),
            defender: PokemonSet::defender_default(),
            log_file: PathBuf::from("dexcalc.log"),
        }
    }
}

impl CalcConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config from a TOML file
    pub fn load_from_toml(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    /// Parse a config from a TOML string. Missing keys keep their defaults.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: CalcConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Load from an optional file, apply environment overrides, validate
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load_from_toml(path)?,
            None => Self::default(),
        };
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides
    ///
    /// - `DEXCALC_API_URL` - API base URL
    /// - `DEXCALC_DEBOUNCE_MS` - debounce interval in milliseconds
    /// - `DEXCALC_GENERATION` - generation number
    pub fn apply_env(&mut self) {
        if let Ok(url) = env::var("DEXCALC_API_URL") {
            self.api_base_url = url;
        }
        if let Some(ms) = read_env::<u64>("DEXCALC_DEBOUNCE_MS") {
            self.debounce_ms = ms;
        }
        if let Some(generation) = read_env::<u8>("DEXCALC_GENERATION") {
            self.generation = generation;
        }
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.api_base_url.trim().is_empty() {
            return Err(CalcError::Config("api_base_url must not be empty".into()));
        }

        if self.request_timeout_secs == 0 {
            return Err(CalcError::Config(
                "request_timeout_secs must be positive".into(),
            ));
        }

        Generation::new(self.generation)?;

        if !(1..=100).contains(&self.level) {
            return Err(CalcError::Config(format!(
                "level ({}) should be within 1..=100",
                self.level
            )));
        }

        self.attacker
            .validate()
            .map_err(|e| CalcError::Config(format!("attacker: {}", e)))?;
        self.defender
            .validate()
            .map_err(|e| CalcError::Config(format!("defender: {}", e)))?;

        Ok(())
    }

    pub fn debounce_interval(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Settings for the calculation step
    pub fn calc_settings(&self) -> Result<CalcSettings> {
        Ok(CalcSettings {
            generation: Generation::new(self.generation)?,
            level: self.level,
            attacker: self.attacker.clone(),
            defender: self.defender.clone(),
        })
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::entity::HeldItem;
    use crate::calc::stats::Nature;

    #[test]
    fn test_defaults_are_valid() {
        let config = CalcConfig::new();
        assert!(config.validate().is_ok());
        assert_eq!(config.debounce_interval(), Duration::from_millis(300));
        assert_eq!(config.attacker.item, HeldItem::ChoiceSpecs);
        assert_eq!(config.defender.nature, Nature::Calm);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = CalcConfig::parse_toml(
            r#"
            debounce_ms = 150

            [defender]
            item = "None"
            nature = "Bold"
            evs = { hp = 252, def = 252 }
            "#,
        )
        .unwrap();

        assert_eq!(config.debounce_ms, 150);
        assert_eq!(config.generation, 9);
        assert_eq!(config.defender.item, HeldItem::None);
        assert_eq!(config.defender.nature, Nature::Bold);
        assert_eq!(config.defender.evs.def, 252);
        assert_eq!(config.attacker, PokemonSet::attacker_default());
    }

    #[test]
    fn test_unknown_nature_rejected_at_parse() {
        let result = CalcConfig::parse_toml(
            r#"
            [attacker]
            nature = "Grumpy"
            "#,
        );
        assert!(matches!(result, Err(CalcError::TomlError(_))));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result = CalcConfig::parse_toml("debounce = 10");
        assert!(result.is_err());
    }

    #[test]
    fn test_illegal_evs_fail_validation() {
        let config = CalcConfig::parse_toml(
            r#"
            [attacker]
            evs = { spa = 252, spe = 252, hp = 252 }
            "#,
        )
        .unwrap();
        assert!(matches!(config.validate(), Err(CalcError::Config(_))));
    }

    #[test]
    fn test_generation_validation() {
        let config = CalcConfig {
            generation: 12,
            ..CalcConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(CalcError::UnsupportedGeneration(12))
        ));
    }

    #[test]
    fn test_calc_settings_carry_presets() {
        let settings = CalcConfig::default().calc_settings().unwrap();
        assert_eq!(settings.generation.num(), 9);
        assert_eq!(settings.level, 100);
        assert_eq!(settings.defender, PokemonSet::defender_default());
    }
}
