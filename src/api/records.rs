//! Typed records for the remote creature API
//!
//! Only the fields this crate reads are modeled. Required fields are enforced
//! by serde when the body is decoded, so a record that made it this far is
//! structurally complete. Unknown fields are ignored.

use serde::{Deserialize, Serialize};

/// `{ "name": ..., "url": ... }` reference used throughout the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

impl NamedResource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiLink {
    pub url: String,
}

// =========================================================================
//  /pokemon/{name}
// =========================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonRecord {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub sprites: Sprites,
    /// Absent on some hand-built fixtures; falls back to the record name
    #[serde(default)]
    pub species: Option<NamedResource>,
    pub types: Vec<TypeSlot>,
    pub stats: Vec<StatSlot>,
    pub moves: Vec<MoveSlot>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprites {
    #[serde(default)]
    pub front_default: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSlot {
    pub slot: u8,
    #[serde(rename = "type")]
    pub type_: NamedResource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatSlot {
    pub base_stat: u16,
    #[serde(default)]
    pub effort: u16,
    pub stat: NamedResource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveSlot {
    #[serde(rename = "move")]
    pub move_: NamedResource,
}

impl PokemonRecord {
    pub fn type_names(&self) -> Vec<&str> {
        let mut slots: Vec<_> = self.types.iter().collect();
        slots.sort_by_key(|slot| slot.slot);
        slots.into_iter().map(|slot| slot.type_.name.as_str()).collect()
    }

    pub fn move_names(&self) -> Vec<String> {
        self.moves.iter().map(|m| m.move_.name.clone()).collect()
    }

    pub fn species_name(&self) -> &str {
        self.species
            .as_ref()
            .map(|s| s.name.as_str())
            .unwrap_or(&self.name)
    }
}

// =========================================================================
//  /move/{name}
// =========================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub name: String,
    /// Null for status moves and variable-power moves
    pub power: Option<u16>,
    #[serde(rename = "type")]
    pub type_: NamedResource,
    #[serde(default)]
    pub damage_class: Option<NamedResource>,
}

// =========================================================================
//  /pokemon-species/{name} and its evolution chain
// =========================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesRecord {
    pub name: String,
    #[serde(default)]
    pub evolution_chain: Option<ApiLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionChainRecord {
    pub chain: ChainLink,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainLink {
    pub species: NamedResource,
    #[serde(default)]
    pub evolves_to: Vec<ChainLink>,
}

impl EvolutionChainRecord {
    /// Chain containing only the given species
    pub fn single(species: &str) -> Self {
        Self {
            chain: ChainLink {
                species: NamedResource::new(species),
                evolves_to: Vec::new(),
            },
        }
    }

    /// Whether `species` appears in the chain with a further stage after it
    pub fn can_evolve(&self, species: &str) -> bool {
        self.chain
            .find(species)
            .map(|link| !link.evolves_to.is_empty())
            .unwrap_or(false)
    }
}

impl ChainLink {
    fn find(&self, species: &str) -> Option<&ChainLink> {
        if self.species.name == species {
            return Some(self);
        }
        self.evolves_to.iter().find_map(|next| next.find(species))
    }
}
