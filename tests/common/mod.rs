//! In-memory creature source and fixtures shared by the integration tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use dexcalc::api::records::{
    EvolutionChainRecord, MoveRecord, MoveSlot, NamedResource, PokemonRecord, Sprites, StatSlot,
    TypeSlot,
};
use dexcalc::api::source::CreatureSource;
use dexcalc::calc::entity::{BattleMove, BattlePokemon, Generation};
use dexcalc::calc::formula::{CalcResult, DamageCalculator};
use dexcalc::core::error::{CalcError, Result};

/// Serves fixed records; counts requests and can delay individual names
#[derive(Default)]
pub struct FakeSource {
    pokemon: HashMap<String, PokemonRecord>,
    moves: HashMap<String, MoveRecord>,
    chains: HashMap<String, EvolutionChainRecord>,
    delays: HashMap<String, Duration>,
    requests: AtomicUsize,
    requested: Mutex<Vec<String>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pokemon(mut self, record: PokemonRecord) -> Self {
        self.pokemon.insert(record.name.clone(), record);
        self
    }

    pub fn with_move(mut self, record: MoveRecord) -> Self {
        self.moves.insert(record.name.clone(), record);
        self
    }

    pub fn with_chain(mut self, species: &str, chain: EvolutionChainRecord) -> Self {
        self.chains.insert(species.to_string(), chain);
        self
    }

    /// Hold the response for `name` back by `delay`
    pub fn with_delay(mut self, name: &str, delay: Duration) -> Self {
        self.delays.insert(name.to_string(), delay);
        self
    }

    /// Number of creature lookups issued so far
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    pub fn requested_names(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }

    async fn wait_for(&self, name: &str) {
        if let Some(delay) = self.delays.get(name) {
            tokio::time::sleep(*delay).await;
        }
    }
}

#[async_trait]
impl CreatureSource for FakeSource {
    async fn fetch_pokemon(&self, name: &str) -> Result<PokemonRecord> {
        let key = name.trim().to_lowercase();
        self.requests.fetch_add(1, Ordering::SeqCst);
        self.requested.lock().unwrap().push(key.clone());
        self.wait_for(&key).await;

        self.pokemon
            .get(&key)
            .cloned()
            .ok_or_else(|| CalcError::NotFound(name.to_string()))
    }

    async fn fetch_move(&self, name: &str) -> Result<MoveRecord> {
        self.moves
            .get(name)
            .cloned()
            .ok_or_else(|| CalcError::MoveNotFound(name.to_string()))
    }

    async fn fetch_evolution_chain(&self, species: &str) -> Result<EvolutionChainRecord> {
        Ok(self
            .chains
            .get(species)
            .cloned()
            .unwrap_or_else(|| EvolutionChainRecord::single(species)))
    }
}

/// Always returns the same rolls and HP
pub struct FixedCalculator {
    pub damage: Vec<u16>,
    pub defender_hp: u16,
}

impl DamageCalculator for FixedCalculator {
    fn calculate(
        &self,
        _generation: Generation,
        attacker: &BattlePokemon,
        defender: &BattlePokemon,
        move_: &BattleMove,
    ) -> Result<CalcResult> {
        Ok(CalcResult {
            attacker: attacker.name.clone(),
            defender: defender.name.clone(),
            move_name: move_.name.clone(),
            damage: self.damage.clone(),
            defender_hp: self.defender_hp,
            effectiveness: 1.0,
        })
    }
}

/// Build a creature record from base stats in hp/atk/def/spa/spd/spe order
pub fn pokemon(id: u32, name: &str, types: &[&str], base: [u16; 6], moves: &[&str]) -> PokemonRecord {
    let stat_names = [
        "hp",
        "attack",
        "defense",
        "special-attack",
        "special-defense",
        "speed",
    ];

    PokemonRecord {
        id,
        name: name.to_string(),
        sprites: Sprites {
            front_default: Some(format!("https://img.example/{}.png", id)),
        },
        species: Some(NamedResource::new(name)),
        types: types
            .iter()
            .enumerate()
            .map(|(i, t)| TypeSlot {
                slot: i as u8 + 1,
                type_: NamedResource::new(*t),
            })
            .collect(),
        stats: stat_names
            .iter()
            .zip(base)
            .map(|(stat, base_stat)| StatSlot {
                base_stat,
                effort: 0,
                stat: NamedResource::new(*stat),
            })
            .collect(),
        moves: moves
            .iter()
            .map(|m| MoveSlot {
                move_: NamedResource::new(*m),
            })
            .collect(),
    }
}

pub fn damaging_move(name: &str, move_type: &str, class: &str, power: u16) -> MoveRecord {
    MoveRecord {
        name: name.to_string(),
        power: Some(power),
        type_: NamedResource::new(move_type),
        damage_class: Some(NamedResource::new(class)),
    }
}

pub fn pikachu() -> PokemonRecord {
    pokemon(
        25,
        "pikachu",
        &["electric"],
        [35, 55, 40, 50, 50, 90],
        &["thunderbolt", "growl", "quick-attack"],
    )
}

pub fn vaporwall() -> PokemonRecord {
    pokemon(
        900,
        "vaporwall",
        &["water"],
        [80, 50, 90, 60, 100, 40],
        &["surf"],
    )
}

pub fn thunderbolt() -> MoveRecord {
    damaging_move("thunderbolt", "electric", "special", 90)
}

pub fn growl() -> MoveRecord {
    MoveRecord {
        name: "growl".to_string(),
        power: None,
        type_: NamedResource::new("normal"),
        damage_class: Some(NamedResource::new("status")),
    }
}

/// Source preloaded with the standard fixtures
pub fn standard_source() -> FakeSource {
    FakeSource::new()
        .with_pokemon(pikachu())
        .with_pokemon(vaporwall())
        .with_move(thunderbolt())
        .with_move(growl())
}
