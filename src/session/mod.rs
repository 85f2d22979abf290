//! Calculator session: selection state, lookup flow and coordinating controller

pub mod controller;
pub mod lookup;
pub mod state;

pub use controller::Controller;
pub use lookup::{build_battle_pokemon, lookup_creature, run_calculation};
pub use state::{CreatureSummary, RegionView, Session, StatLine};
