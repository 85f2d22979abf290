//! Request/parse flows: creature lookup and damage calculation
//!
//! Neither flow touches the session; the controller applies their outcomes.

use crate::api::source::CreatureSource;
use crate::calc::entity::{BattleMove, BattlePokemon, CalcSettings, HeldItem, SpeciesData};
use crate::calc::formula::DamageCalculator;
use crate::core::error::{CalcError, Result};
use crate::core::types::Role;
use crate::render::text::DamageReport;
use crate::session::state::CreatureSummary;

/// Look up one creature for display
///
/// An empty or whitespace-only name fails before any request is issued.
pub async fn lookup_creature<S>(source: &S, role: Role, name: &str) -> Result<CreatureSummary>
where
    S: CreatureSource + ?Sized,
{
    let name = name.trim();
    if name.is_empty() {
        return Err(CalcError::EmptyName);
    }

    tracing::info!(name, "Fetching {}", role);
    let record = source.fetch_pokemon(name).await?;
    Ok(CreatureSummary::from_record(record))
}

/// Model a creature for battle from its name and the role's preset
pub async fn build_battle_pokemon<S>(
    source: &S,
    settings: &CalcSettings,
    role: Role,
    name: &str,
) -> Result<BattlePokemon>
where
    S: CreatureSource + ?Sized,
{
    let record = source.fetch_pokemon(name).await?;
    let set = settings.set_for(role).clone();

    // Evolution data only matters to Eviolite; skip the two extra requests otherwise
    let can_evolve = if set.item == HeldItem::Eviolite {
        let species = record.species_name().to_string();
        source
            .fetch_evolution_chain(&species)
            .await?
            .can_evolve(&species)
    } else {
        false
    };

    let species = SpeciesData::from_record(&record, can_evolve)?;
    BattlePokemon::new(settings.generation, name, species, set, settings.level)
}

/// Run a full calculation from the three selected names
pub async fn run_calculation<S, C>(
    source: &S,
    calculator: &C,
    settings: &CalcSettings,
    attacker: &str,
    defender: &str,
    move_name: &str,
) -> Result<DamageReport>
where
    S: CreatureSource + ?Sized,
    C: DamageCalculator + ?Sized,
{
    if attacker.trim().is_empty() || defender.trim().is_empty() || move_name.trim().is_empty() {
        return Err(CalcError::MissingSelection);
    }

    tracing::info!(attacker, defender, move_name, "Calculating damage");

    let attacker = build_battle_pokemon(source, settings, Role::Attacker, attacker).await?;
    let defender = build_battle_pokemon(source, settings, Role::Defender, defender).await?;
    let move_record = source.fetch_move(move_name).await?;
    let battle_move = BattleMove::from_record(&move_record)?;

    let result = calculator.calculate(settings.generation, &attacker, &defender, &battle_move)?;
    tracing::info!(
        min = ?result.min_damage(),
        max = ?result.max_damage(),
        defender_hp = result.defender_hp,
        "Calculation result"
    );

    DamageReport::from_result(result)
}
