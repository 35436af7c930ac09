use std::fmt;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::config::{GameConfig, league_label};
use crate::evaluate::{self, GuessEvaluation, Verdict};
use crate::player::{self, Player};
use crate::search::SearchIndex;
use crate::select::SelectionStrategy;
use crate::stats::GameResult;
use crate::store::KvStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Roster fetch and target selection in flight; guesses rejected.
    Loading,
    /// Accepting guesses.
    Ready,
    /// Terminal; the countdown to the next day runs from here.
    Over,
}

/// One submitted guess with its scored verdicts, stored chronologically.
/// Display order (most recent first) is the presentation layer's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuessEntry {
    pub player: Player,
    pub evaluation: GuessEvaluation,
}

/// The mutable play state for one (game, league, day). Serialized into the
/// key-value store after every mutation so a reload resumes mid-game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub date: NaiveDate,
    pub league_id: String,
    pub target: Player,
    pub guesses: Vec<GuessEntry>,
    pub attempts_used: usize,
    pub is_over: bool,
}

/// User-facing validation failures; the session stays in its current phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessError {
    NotFound,
    Duplicate(String),
    OutOfScope { league_id: String },
    NotReady,
    AlreadyOver,
}

impl fmt::Display for GuessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuessError::NotFound => write!(f, "Player not found. Try another name."),
            GuessError::Duplicate(name) => write!(f, "{name} has already been guessed."),
            GuessError::OutOfScope { league_id } => write!(
                f,
                "You can only guess players from {} in this mode.",
                league_label(league_id)
            ),
            GuessError::NotReady => write!(f, "Players are still loading."),
            GuessError::AlreadyOver => write!(f, "The game is over. Come back tomorrow."),
        }
    }
}

impl std::error::Error for GuessError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    Continue,
    Won,
    Lost,
}

/// Orchestrates one day's game for one league scope: roster intake, guess
/// validation and scoring, terminal detection, persistence. Time is always
/// passed in, never read from a clock, so transitions stay testable.
pub struct GameSession {
    pub config: GameConfig,
    pub phase: Phase,
    pub roster: Vec<Player>,
    pub index: SearchIndex,
    pub state: Option<SessionState>,
    /// True when the roster came from the built-in fixture data.
    pub fallback_data: bool,
    store: Arc<dyn KvStore>,
    strategy: Box<dyn SelectionStrategy>,
    notices: Vec<String>,
}

impl GameSession {
    pub fn new(
        config: GameConfig,
        store: Arc<dyn KvStore>,
        strategy: Box<dyn SelectionStrategy>,
    ) -> Self {
        Self {
            config,
            phase: Phase::Loading,
            roster: Vec::new(),
            index: SearchIndex::build(&[]),
            state: None,
            fallback_data: false,
            store,
            strategy,
            notices: Vec::new(),
        }
    }

    /// Non-fatal warnings (persistence failures) accumulated since the last
    /// drain; the front end forwards them to its console.
    pub fn drain_notices(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notices)
    }

    /// Roster intake: dedup, rebuild the search index, then either restore
    /// the persisted session for (today, league) or select a fresh target.
    /// An empty filtered pool is a recoverable "no data today" error.
    pub fn roster_loaded(
        &mut self,
        players: Vec<Player>,
        today: NaiveDate,
        fallback: bool,
    ) -> Result<()> {
        self.roster = player::dedup_roster(players);
        self.index = SearchIndex::build(&self.roster);
        self.fallback_data = fallback;

        if let Some(stored) = self.restore(today) {
            self.phase = if stored.is_over { Phase::Over } else { Phase::Ready };
            self.state = Some(stored);
            return Ok(());
        }

        let target = self
            .strategy
            .select(&self.roster, today)
            .cloned()
            .ok_or_else(|| {
                anyhow!(
                    "no players available for league scope {}",
                    self.config.league_id
                )
            })?;

        self.state = Some(SessionState {
            date: today,
            league_id: self.config.league_id.clone(),
            target,
            guesses: Vec::new(),
            attempts_used: 0,
            is_over: false,
        });
        self.phase = Phase::Ready;
        self.persist();
        Ok(())
    }

    pub fn target(&self) -> Option<&Player> {
        self.state.as_ref().map(|state| &state.target)
    }

    /// Swap in the enriched target record (same id, fuller fields). Must run
    /// before guesses are scored or the country/age columns stay unknown.
    pub fn set_target(&mut self, enriched: Player) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        if state.target.id != enriched.id {
            return;
        }
        state.target = enriched;
        self.persist();
    }

    pub fn guessed_ids(&self) -> Vec<String> {
        self.state
            .as_ref()
            .map(|state| {
                state
                    .guesses
                    .iter()
                    .map(|entry| entry.player.id.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Autocomplete candidates, skipping already-guessed players and, in a
    /// scoped mode, players from other leagues.
    pub fn suggestions(&self, term: &str, limit: usize) -> Vec<String> {
        let mut exclude = self.guessed_ids();
        if self.config.is_scoped() {
            exclude.extend(
                self.roster
                    .iter()
                    .filter(|player| {
                        !self
                            .config
                            .league_filter
                            .iter()
                            .any(|league| league == &player.league)
                    })
                    .map(|player| player.id.clone()),
            );
        }
        self.index.suggest(term, limit, &exclude)
    }

    /// Validate free-text input into a roster player without mutating
    /// anything. The caller enriches the returned player, then feeds it to
    /// `accept_guess`; input stays disabled in between so guesses land in
    /// submission order.
    pub fn resolve_guess(&self, term: &str) -> Result<Player, GuessError> {
        match self.phase {
            Phase::Loading => return Err(GuessError::NotReady),
            Phase::Over => return Err(GuessError::AlreadyOver),
            Phase::Ready => {}
        }
        let Some(player) = self.index.find_exact(term) else {
            return Err(GuessError::NotFound);
        };
        let state = self.state.as_ref().ok_or(GuessError::NotReady)?;
        if state
            .guesses
            .iter()
            .any(|entry| entry.player.id == player.id)
        {
            return Err(GuessError::Duplicate(player.name.clone()));
        }
        if self.config.is_scoped()
            && !self
                .config
                .league_filter
                .iter()
                .any(|league| league == &player.league)
        {
            return Err(GuessError::OutOfScope {
                league_id: self.config.league_id.clone(),
            });
        }
        Ok(player.clone())
    }

    /// Append an accepted guess, score it, and perform at most one terminal
    /// transition. Calls after `Over` are no-ops (`AlreadyOver`).
    pub fn accept_guess(&mut self, player: Player) -> Result<GuessOutcome, GuessError> {
        match self.phase {
            Phase::Loading => return Err(GuessError::NotReady),
            Phase::Over => return Err(GuessError::AlreadyOver),
            Phase::Ready => {}
        }
        let max_attempts = self.config.max_attempts;
        let roster = &self.roster;
        let state = self.state.as_mut().ok_or(GuessError::NotReady)?;
        if state
            .guesses
            .iter()
            .any(|entry| entry.player.id == player.id)
        {
            return Err(GuessError::Duplicate(player.name.clone()));
        }

        let evaluation = evaluate::evaluate(&player, &state.target, roster);
        let won = player.id == state.target.id;
        state.guesses.push(GuessEntry { player, evaluation });
        state.attempts_used += 1;

        let outcome = if won {
            state.is_over = true;
            self.phase = Phase::Over;
            GuessOutcome::Won
        } else if state.attempts_used >= max_attempts {
            state.is_over = true;
            self.phase = Phase::Over;
            GuessOutcome::Lost
        } else {
            GuessOutcome::Continue
        };

        self.persist();
        Ok(outcome)
    }

    /// Terminal snapshot for the stats ledger; `None` until the session is
    /// over.
    pub fn game_result(&self) -> Option<GameResult> {
        let state = self.state.as_ref()?;
        if !state.is_over {
            return None;
        }
        let won = state
            .guesses
            .iter()
            .any(|entry| entry.player.id == state.target.id);
        let guess_verdicts: Vec<Verdict> = state
            .guesses
            .iter()
            .map(|entry| entry.evaluation.overall)
            .collect();
        Some(GameResult {
            won,
            attempts_used: state.attempts_used,
            guess_verdicts,
            league_id: state.league_id.clone(),
            date: state.date,
            target_name: state.target.name.clone(),
        })
    }

    /// True once the viewer's calendar date has moved past the session's
    /// day. The caller discards this session and rebuilds from Loading; the
    /// old persisted snapshot is left behind under its date-scoped key.
    pub fn is_superseded(&self, today: NaiveDate) -> bool {
        self.state
            .as_ref()
            .is_some_and(|state| state.date != today)
    }

    fn restore(&self, today: NaiveDate) -> Option<SessionState> {
        let raw = self.store.get(&self.session_key(today))?;
        let stored = serde_json::from_str::<SessionState>(&raw).ok()?;
        if stored.date != today || stored.league_id != self.config.league_id {
            return None;
        }
        Some(stored)
    }

    fn persist(&mut self) {
        let Some(state) = self.state.as_ref() else {
            return;
        };
        let key = self.session_key(state.date);
        let result = serde_json::to_string(state)
            .context("serialize session")
            .and_then(|json| self.store.set(&key, &json));
        if let Err(err) = result {
            // Keep playing in memory; durability is best-effort.
            self.notices
                .push(format!("[WARN] Session not saved: {err:#}"));
        }
    }

    fn session_key(&self, date: NaiveDate) -> String {
        format!(
            "game_session_{}_{}_{}",
            self.config.game_id,
            self.config.league_id,
            date.format("%Y-%m-%d")
        )
    }
}

/// Time left until the next local midnight, when a fresh target becomes
/// available.
pub fn time_until_next_game(now: NaiveDateTime) -> Duration {
    match now.date().succ_opt() {
        Some(next_day) => next_day.and_time(NaiveTime::MIN) - now,
        None => Duration::zero(),
    }
}
