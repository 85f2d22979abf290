//! Remote creature-data collaborator

pub mod client;
pub mod records;
pub mod source;

pub use client::PokeApiClient;
pub use records::{EvolutionChainRecord, MoveRecord, PokemonRecord};
pub use source::CreatureSource;
