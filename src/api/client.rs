//! Async HTTP client for the public creature-data API
//!
//! Read-only. Every record is addressed by lowercase name. A non-success
//! status is reported as "not found" for the requested name; transport
//! failures and undecodable bodies get their own error kinds.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::api::records::{EvolutionChainRecord, MoveRecord, PokemonRecord, SpeciesRecord};
use crate::api::source::CreatureSource;
use crate::core::config::CalcConfig;
use crate::core::error::{CalcError, Result};

pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Async client for making API calls
pub struct PokeApiClient {
    client: Client,
    base_url: String,
}

impl PokeApiClient {
    /// Create a new client against the given base URL
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CalcError::Http(e.to_string()))?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &CalcConfig) -> Result<Self> {
        Self::new(
            config.api_base_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL for a named resource, e.g. `pokemon` + `Pikachu`
    pub fn resource_url(&self, resource: &str, name: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base_url,
            resource,
            name.trim().to_lowercase()
        )
    }

    /// GET a JSON document. `not_found` builds the error for non-success statuses.
    async fn get_json<T, F>(&self, url: &str, not_found: F) -> Result<T>
    where
        T: DeserializeOwned,
        F: FnOnce() -> CalcError,
    {
        tracing::debug!(url, "GET");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| CalcError::Http(e.to_string()))?;

        if !response.status().is_success() {
            tracing::warn!(url, status = %response.status(), "Non-success response");
            return Err(not_found());
        }

        let body = response
            .text()
            .await
            .map_err(|e| CalcError::Http(e.to_string()))?;

        serde_json::from_str(&body)
            .map_err(|e| CalcError::MalformedRecord(format!("{}: {}", url, e)))
    }
}

#[async_trait]
impl CreatureSource for PokeApiClient {
    async fn fetch_pokemon(&self, name: &str) -> Result<PokemonRecord> {
        let url = self.resource_url("pokemon", name);
        self.get_json(&url, || CalcError::NotFound(name.to_string()))
            .await
    }

    async fn fetch_move(&self, name: &str) -> Result<MoveRecord> {
        let url = self.resource_url("move", name);
        self.get_json(&url, || CalcError::MoveNotFound(name.to_string()))
            .await
    }

    async fn fetch_evolution_chain(&self, species: &str) -> Result<EvolutionChainRecord> {
        let url = self.resource_url("pokemon-species", species);
        let record: SpeciesRecord = self
            .get_json(&url, || CalcError::NotFound(species.to_string()))
            .await?;

        match record.evolution_chain {
            Some(link) => {
                self.get_json(&link.url, || {
                    CalcError::MalformedRecord(format!("evolution chain for {} missing", species))
                })
                .await
            }
            None => Ok(EvolutionChainRecord::single(&record.name)),
        }
    }
}
