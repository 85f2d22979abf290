//! Asynchronous abstraction for sourcing creature and move data.
//!
//! The session and calculation flows only ever talk to a [`CreatureSource`],
//! so they run the same against the live HTTP client or an in-memory fixture.
use std::sync::Arc;

use async_trait::async_trait;

use crate::api::records::{EvolutionChainRecord, MoveRecord, PokemonRecord};
use crate::core::error::Result;

#[async_trait]
pub trait CreatureSource: Send + Sync {
    /// Fetch a creature by name (case-insensitive)
    ///
    /// # Returns
    /// The typed record, `CalcError::NotFound` for an unknown name
    async fn fetch_pokemon(&self, name: &str) -> Result<PokemonRecord>;

    /// Fetch a move by its API identifier
    async fn fetch_move(&self, name: &str) -> Result<MoveRecord>;

    /// Fetch the evolution chain that contains `species`
    async fn fetch_evolution_chain(&self, species: &str) -> Result<EvolutionChainRecord>;
}

/// Share one source between a controller and its caller
#[async_trait]
impl<T> CreatureSource for Arc<T>
where
    T: CreatureSource + ?Sized,
{
    async fn fetch_pokemon(&self, name: &str) -> Result<PokemonRecord> {
        (**self).fetch_pokemon(name).await
    }

    async fn fetch_move(&self, name: &str) -> Result<MoveRecord> {
        (**self).fetch_move(name).await
    }

    async fn fetch_evolution_chain(&self, species: &str) -> Result<EvolutionChainRecord> {
        (**self).fetch_evolution_chain(species).await
    }
}
