//! Coordinating controller for one calculator session
//!
//! Owns the selection state, one debounced input per role and the in-flight
//! lookup task per role. The page surface only ever calls into here.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::api::source::CreatureSource;
use crate::calc::entity::CalcSettings;
use crate::calc::formula::DamageCalculator;
use crate::core::error::{CalcError, Result};
use crate::core::types::{RequestToken, Role};
use crate::debounce::{debounce, Debounced};
use crate::render::text::DamageReport;
use crate::session::lookup::{lookup_creature, run_calculation};
use crate::session::state::{CreatureSummary, Session};

struct Shared<S, C> {
    source: S,
    calculator: C,
    settings: CalcSettings,
    session: Mutex<Session>,
    lookups: Mutex<HashMap<Role, JoinHandle<()>>>,
}

impl<S, C> Shared<S, C>
where
    S: CreatureSource + 'static,
    C: DamageCalculator + 'static,
{
    fn session(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lookup_tasks(&self) -> MutexGuard<'_, HashMap<Role, JoinHandle<()>>> {
        self.lookups.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Abort the role's in-flight lookup task, if any
    fn abort_lookup(&self, role: Role) {
        if let Some(previous) = self.lookup_tasks().remove(&role) {
            previous.abort();
        }
    }

    async fn run_lookup(
        &self,
        role: Role,
        token: RequestToken,
        name: &str,
    ) -> Result<CreatureSummary> {
        let outcome = lookup_creature(&self.source, role, name).await;

        match &outcome {
            Err(err) if err.is_remote() => {
                tracing::warn!(%role, name, error = %err, "Lookup failed")
            }
            Err(err) => tracing::info!(%role, name, error = %err, "Lookup rejected"),
            Ok(_) => {}
        }
        if !self.session().apply_lookup(role, token, &outcome) {
            tracing::debug!(%role, name, token = token.0, "Discarding stale lookup response");
        }
        outcome
    }

    fn spawn_lookup(self: &Arc<Self>, role: Role, name: String) {
        let token = self.session().begin_lookup(role);
        self.abort_lookup(role);

        let shared = Arc::clone(self);
        let handle = tokio::spawn(async move {
            let _ = shared.run_lookup(role, token, &name).await;
        });
        self.lookup_tasks().insert(role, handle);
    }

    async fn calculate(&self) -> Result<DamageReport> {
        let (token, selection) = {
            let mut session = self.session();
            (session.begin_calculation(), session.selection())
        };

        let outcome = match selection {
            Some((attacker, defender, move_name)) => {
                run_calculation(
                    &self.source,
                    &self.calculator,
                    &self.settings,
                    &attacker,
                    &defender,
                    &move_name,
                )
                .await
            }
            None => Err(CalcError::MissingSelection),
        };

        if let Err(err) = &outcome {
            tracing::error!(error = %err, "Calculation failed");
        }
        if !self.session().apply_calculation(token, &outcome) {
            tracing::debug!(token = token.0, "Discarding stale calculation");
        }
        outcome
    }
}

pub struct Controller<S, C> {
    shared: Arc<Shared<S, C>>,
    inputs: HashMap<Role, Debounced<String>>,
}

impl<S, C> Controller<S, C>
where
    S: CreatureSource + 'static,
    C: DamageCalculator + 'static,
{
    /// Create a controller; `interval` is the quiet period for typed names
    pub fn new(source: S, calculator: C, settings: CalcSettings, interval: Duration) -> Self {
        let shared = Arc::new(Shared {
            source,
            calculator,
            settings,
            session: Mutex::new(Session::new()),
            lookups: Mutex::new(HashMap::new()),
        });

        let inputs = Role::ALL
            .into_iter()
            .map(|role| {
                let shared = Arc::clone(&shared);
                let trigger = debounce(
                    move |name: String| {
                        // A cleared input keeps whatever the region shows
                        if name.trim().is_empty() {
                            tracing::debug!(%role, "Input cleared, no lookup");
                            return;
                        }
                        tracing::debug!(%role, name = %name, "Input settled");
                        shared.spawn_lookup(role, name);
                    },
                    interval,
                );
                (role, trigger)
            })
            .collect();

        Self { shared, inputs }
    }

    /// Text in a role's input changed; looks it up once typing settles
    ///
    /// A blank value is ignored when it settles, so clearing the input leaves
    /// the region and any in-flight lookup alone.
    pub fn on_input(&self, role: Role, text: &str) {
        if let Some(trigger) = self.inputs.get(&role) {
            trigger.call(text.to_string());
        }
    }

    /// Look a name up now, bypassing the debounce
    ///
    /// The outcome is applied to the session unless a newer lookup for the
    /// same role was issued meanwhile; it is returned either way.
    pub async fn lookup(&self, role: Role, name: &str) -> Result<CreatureSummary> {
        let token = self.shared.session().begin_lookup(role);
        self.shared.abort_lookup(role);
        self.shared.run_lookup(role, token, name).await
    }

    /// Dropdown changed; `None` is the placeholder. Starts a calculation.
    pub fn select_move(&self, move_name: Option<&str>) {
        self.shared.session().select_move(move_name);

        let shared = Arc::clone(&self.shared);
        tokio::spawn(async move {
            let _ = shared.calculate().await;
        });
    }

    /// Calculate with the current selection and wait for the result
    pub async fn calculate(&self) -> Result<DamageReport> {
        self.shared.calculate().await
    }

    /// Copy of the current session state for rendering
    pub fn snapshot(&self) -> Session {
        self.shared.session().clone()
    }

    pub fn dismiss_alert(&self) {
        self.shared.session().dismiss_alert();
    }

    pub fn settings(&self) -> &CalcSettings {
        &self.shared.settings
    }

    /// Drop pending debounced inputs and abort in-flight lookups
    pub fn shutdown(&self) {
        for trigger in self.inputs.values() {
            trigger.cancel();
        }
        for role in Role::ALL {
            self.shared.abort_lookup(role);
        }
    }
}
