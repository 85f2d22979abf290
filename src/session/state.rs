//! Selection state for one calculator session
//!
//! Owned by the controller and mutated only through `apply_*`, which reject
//! responses carrying a request token older than the latest one issued.

use std::collections::HashMap;

use serde::Serialize;

use crate::api::records::PokemonRecord;
use crate::core::error::Result;
use crate::core::types::{RequestToken, Role};
use crate::render::text::{DamageReport, MOVE_PLACEHOLDER};

/// One base stat as shown in the details region
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatLine {
    pub name: String,
    pub base: u16,
}

/// Display data derived from one lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatureSummary {
    /// First letter upper-case, the rest lower-case
    pub name: String,
    pub image: Option<String>,
    pub types: Vec<String>,
    pub id: u32,
    pub stats: Vec<StatLine>,
    pub moves: Vec<String>,
}

impl CreatureSummary {
    pub fn from_record(record: PokemonRecord) -> Self {
        let types = record.type_names().into_iter().map(String::from).collect();
        let moves = record.move_names();
        let stats = record
            .stats
            .iter()
            .map(|s| StatLine {
                name: s.stat.name.clone(),
                base: s.base_stat,
            })
            .collect();

        Self {
            name: display_name(&record.name),
            image: record.sprites.front_default,
            types,
            id: record.id,
            stats,
            moves,
        }
    }

    /// Comma-joined type names, "Unknown" when the record listed none
    pub fn type_label(&self) -> String {
        if self.types.is_empty() {
            "Unknown".to_string()
        } else {
            self.types.join(", ")
        }
    }
}

/// Upper-case the first character and lower-case the rest
pub fn display_name(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// What a role's details region currently shows
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub enum RegionView {
    #[default]
    Empty,
    Details(CreatureSummary),
    Error(String),
}

/// Process-wide selection state, scoped to one controller
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub attacker: Option<String>,
    pub defender: Option<String>,
    /// Alphabetical, from the last successful attacker lookup
    pub moves: Vec<String>,
    pub selected_move: Option<String>,
    pub attacker_view: RegionView,
    pub defender_view: RegionView,
    pub damage_line: Option<String>,
    pub roll_line: Option<String>,
    /// Blocking message for calculation failures
    pub alert: Option<String>,
    latest_lookup: HashMap<Role, RequestToken>,
    latest_calculation: RequestToken,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self, role: Role) -> Option<&str> {
        match role {
            Role::Attacker => self.attacker.as_deref(),
            Role::Defender => self.defender.as_deref(),
        }
    }

    pub fn view(&self, role: Role) -> &RegionView {
        match role {
            Role::Attacker => &self.attacker_view,
            Role::Defender => &self.defender_view,
        }
    }

    fn view_mut(&mut self, role: Role) -> &mut RegionView {
        match role {
            Role::Attacker => &mut self.attacker_view,
            Role::Defender => &mut self.defender_view,
        }
    }

    /// Issue a token for a new lookup; older tokens for the role become stale
    pub fn begin_lookup(&mut self, role: Role) -> RequestToken {
        let token = self.latest_lookup.get(&role).copied().unwrap_or_default().next();
        self.latest_lookup.insert(role, token);
        token
    }

    pub fn is_latest_lookup(&self, role: Role, token: RequestToken) -> bool {
        self.latest_lookup.get(&role) == Some(&token)
    }

    /// Apply a lookup outcome. Returns false if the token was stale.
    pub fn apply_lookup(
        &mut self,
        role: Role,
        token: RequestToken,
        outcome: &Result<CreatureSummary>,
    ) -> bool {
        if !self.is_latest_lookup(role, token) {
            return false;
        }

        match outcome {
            Ok(summary) => {
                let name = summary.name.clone();
                match role {
                    Role::Attacker => {
                        self.set_moves(summary.moves.clone());
                        self.attacker = Some(name);
                    }
                    Role::Defender => self.defender = Some(name),
                }
                *self.view_mut(role) = RegionView::Details(summary.clone());
            }
            Err(err) => {
                *self.view_mut(role) = RegionView::Error(err.to_string());
            }
        }
        true
    }

    /// Replace the move list (sorted) and reset the selection
    pub fn set_moves(&mut self, mut moves: Vec<String>) {
        moves.sort();
        self.moves = moves;
        self.selected_move = None;
    }

    /// Dropdown entries: the placeholder followed by every move
    pub fn move_options(&self) -> Vec<String> {
        std::iter::once(MOVE_PLACEHOLDER.to_string())
            .chain(self.moves.iter().cloned())
            .collect()
    }

    /// Record a dropdown choice. Unknown moves and the placeholder clear it.
    pub fn select_move(&mut self, move_name: Option<&str>) {
        self.selected_move = move_name
            .filter(|m| self.moves.iter().any(|known| known == m))
            .map(String::from);
    }

    /// Names needed for a calculation, if all three are present
    pub fn selection(&self) -> Option<(String, String, String)> {
        Some((
            self.attacker.clone()?,
            self.defender.clone()?,
            self.selected_move.clone()?,
        ))
    }

    pub fn begin_calculation(&mut self) -> RequestToken {
        self.latest_calculation = self.latest_calculation.next();
        self.latest_calculation
    }

    /// Apply a calculation outcome. Returns false if the token was stale.
    pub fn apply_calculation(&mut self, token: RequestToken, outcome: &Result<DamageReport>) -> bool {
        if token != self.latest_calculation {
            return false;
        }

        match outcome {
            Ok(report) => {
                self.damage_line = Some(report.damage_line.clone());
                self.roll_line = Some(report.roll_line.clone());
            }
            Err(err) => self.alert = Some(err.to_string()),
        }
        true
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }
}
