//! Client-side tracker view: local copies of both collections, form state, and the
//! mutations that keep them in sync with the backend.
//!
//! Mutations update local state only after the backend accepted them, and never re-fetch.
//! A failed call leaves the view untouched; the failure is logged and otherwise ignored.

pub mod api;
pub mod form;
#[cfg(feature = "http-client")]
pub mod http;
pub mod ids;
pub mod render;

use indexmap::IndexMap;
use time::Date;
use tracing::{debug, warn};

use crate::{
    dto::{game::GameSession, player::Player},
    services::totals::compute_totals,
};

use self::{api::TrackerApi, form::GameForm};

/// Lifecycle of the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewPhase {
    /// Not mounted yet.
    Idle,
    /// Initial fetch in flight, or it failed.
    Loading,
    /// Sessions loaded; mutations allowed.
    Ready,
}

/// State behind the tracker page.
pub struct TrackerView<A> {
    api: A,
    phase: ViewPhase,
    players: Vec<Player>,
    sessions: Vec<GameSession>,
    form: GameForm,
}

impl<A: TrackerApi> TrackerView<A> {
    /// New idle view showing `roster` until players are fetched, with `today` preselected.
    pub fn new(api: A, roster: Vec<Player>, today: Date) -> Self {
        Self {
            api,
            phase: ViewPhase::Idle,
            players: roster,
            sessions: Vec::new(),
            form: GameForm::new(Some(today)),
        }
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> ViewPhase {
        self.phase
    }

    /// Players as currently displayed.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Sessions as currently displayed.
    pub fn sessions(&self) -> &[GameSession] {
        &self.sessions
    }

    /// Add-game form inputs.
    pub fn form(&self) -> &GameForm {
        &self.form
    }

    /// Mutable access to the add-game form inputs.
    pub fn form_mut(&mut self) -> &mut GameForm {
        &mut self.form
    }

    /// Fetch sessions, then players.
    ///
    /// Reaches [`ViewPhase::Ready`] once sessions are loaded. A failed session fetch leaves the
    /// view in [`ViewPhase::Loading`] with no sessions; a failed player fetch keeps the roster.
    pub async fn mount(&mut self) {
        self.phase = ViewPhase::Loading;

        match self.api.list_games().await {
            Ok(sessions) => {
                self.sessions = sessions;
                self.phase = ViewPhase::Ready;
            }
            Err(err) => {
                warn!(error = %err, "failed to fetch sessions");
                return;
            }
        }

        match self.api.list_players().await {
            Ok(players) => self.players = players,
            Err(err) => warn!(error = %err, "failed to fetch players; keeping roster"),
        }
    }

    /// Submit the form as a new session.
    ///
    /// Returns `false` without any request when the form is incomplete, or when the request
    /// failed. On success the participant selection and amount are cleared; the date is kept.
    pub async fn add_game(&mut self) -> bool {
        let Some(session) = self.form.submission() else {
            debug!("add game ignored: incomplete form");
            return false;
        };

        match self.api.add_game(session.clone()).await {
            Ok(_) => {
                self.sessions.push(session);
                self.form.clear_after_submit();
                self.phase = ViewPhase::Ready;
                true
            }
            Err(err) => {
                warn!(error = %err, "failed to add session");
                false
            }
        }
    }

    /// Create a player with a fresh id and an `A<n>` display name.
    pub async fn add_player(&mut self) -> bool {
        let player = Player {
            id: ids::new_player_id(),
            name: ids::default_player_name(self.players.len()),
        };

        match self.api.add_player(player.clone()).await {
            Ok(_) => {
                self.players.push(player);
                self.phase = ViewPhase::Ready;
                true
            }
            Err(err) => {
                warn!(error = %err, "failed to add player");
                false
            }
        }
    }

    /// Remove a player and strip it from every local session.
    ///
    /// Only the player removal is sent; the session scrub stays local.
    pub async fn remove_player(&mut self, id: &str) -> bool {
        match self.api.remove_player(id.to_owned()).await {
            Ok(_) => {
                self.players.retain(|player| player.id != id);
                for session in &mut self.sessions {
                    session.participants.retain(|participant| participant != id);
                }
                self.form.forget_player(id);
                self.phase = ViewPhase::Ready;
                true
            }
            Err(err) => {
                warn!(error = %err, player_id = id, "failed to remove player");
                false
            }
        }
    }

    /// Totals computed from the local sessions.
    pub fn totals(&self) -> IndexMap<String, f64> {
        compute_totals(&self.sessions)
    }

    /// Render both tables as a standalone HTML page.
    pub fn render_html(&self) -> Result<String, minijinja::Error> {
        render::page(&self.players, &self.sessions)
    }
}
