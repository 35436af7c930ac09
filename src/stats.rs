use std::collections::BTreeSet;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::evaluate::Verdict;
use crate::store::KvStore;

/// Terminal snapshot of one finished session. Written into the ledger once
/// per (date, league); re-recording the same day is a no-op.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameResult {
    pub won: bool,
    pub attempts_used: usize,
    /// Overall verdict of each guess, in chronological order.
    pub guess_verdicts: Vec<Verdict>,
    pub league_id: String,
    pub date: NaiveDate,
    pub target_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameStats {
    pub games_played: u32,
    pub games_won: u32,
    pub current_streak: u32,
    pub max_streak: u32,
    /// Wins per attempt count, index 0 = won on the first guess.
    pub guess_distribution: Vec<u32>,
    #[serde(default)]
    pub last_played: Option<NaiveDate>,
    /// Most-recent-first, bounded by the ledger's history limit.
    #[serde(default)]
    pub history: Vec<GameResult>,
}

impl GameStats {
    pub fn empty(max_attempts: usize) -> Self {
        Self {
            games_played: 0,
            games_won: 0,
            current_streak: 0,
            max_streak: 0,
            guess_distribution: vec![0; max_attempts],
            last_played: None,
            history: Vec::new(),
        }
    }

    /// Percentage of games won, rounded; 0 before the first game.
    pub fn win_rate(&self) -> u32 {
        if self.games_played == 0 {
            return 0;
        }
        (100.0 * f64::from(self.games_won) / f64::from(self.games_played)).round() as u32
    }

    /// Largest distribution bucket, floored at 1 so proportional bars never
    /// divide by zero.
    pub fn max_distribution_value(&self) -> u32 {
        self.guess_distribution
            .iter()
            .copied()
            .max()
            .unwrap_or(0)
            .max(1)
    }
}

/// Durable per-league aggregates, keyed by (game id, league id) in the
/// key-value store. The "all" scope is a derived read over the per-league
/// histories, never a second write path.
pub struct StatsLedger {
    game_id: String,
    max_attempts: usize,
    history_limit: usize,
    store: Arc<dyn KvStore>,
}

impl StatsLedger {
    pub fn new(
        game_id: &str,
        max_attempts: usize,
        history_limit: usize,
        store: Arc<dyn KvStore>,
    ) -> Self {
        Self {
            game_id: game_id.to_string(),
            max_attempts,
            history_limit,
            store,
        }
    }

    pub fn stats_for(&self, league_id: &str) -> GameStats {
        if league_id == "all" {
            return self.global_stats();
        }
        self.load(league_id)
    }

    /// Idempotent per calendar day: a history entry for the result's date
    /// already present under this league means the call does nothing.
    pub fn record_result(&self, result: &GameResult) -> Result<()> {
        let mut stats = self.load(&result.league_id);
        if stats.history.iter().any(|entry| entry.date == result.date) {
            return Ok(());
        }

        stats.games_played += 1;
        stats.last_played = Some(result.date);
        if result.won {
            stats.games_won += 1;
            stats.current_streak += 1;
            stats.max_streak = stats.max_streak.max(stats.current_streak);
            let bucket = result.attempts_used.wrapping_sub(1);
            if bucket < stats.guess_distribution.len() {
                stats.guess_distribution[bucket] += 1;
            }
        } else {
            stats.current_streak = 0;
        }

        stats.history.insert(0, result.clone());
        stats.history.truncate(self.history_limit);

        self.save(&result.league_id, &stats)?;
        self.remember_league(&result.league_id)?;
        Ok(())
    }

    pub fn has_played_today(&self, league_id: &str, today: NaiveDate) -> bool {
        self.load(league_id)
            .history
            .iter()
            .any(|entry| entry.date == today)
    }

    fn load(&self, league_id: &str) -> GameStats {
        let Some(raw) = self.store.get(&self.stats_key(league_id)) else {
            return GameStats::empty(self.max_attempts);
        };
        let Ok(mut stats) = serde_json::from_str::<GameStats>(&raw) else {
            return GameStats::empty(self.max_attempts);
        };
        // Older snapshots may predate a larger attempt budget.
        if stats.guess_distribution.len() < self.max_attempts {
            stats.guess_distribution.resize(self.max_attempts, 0);
        }
        stats
    }

    fn save(&self, league_id: &str, stats: &GameStats) -> Result<()> {
        let json = serde_json::to_string(stats).context("serialize stats")?;
        self.store.set(&self.stats_key(league_id), &json)
    }

    /// Cross-league view: merge every recorded league's history and replay
    /// it chronologically, so the global counters can never drift from the
    /// per-league ones.
    fn global_stats(&self) -> GameStats {
        let mut merged: Vec<GameResult> = Vec::new();
        for league_id in self.leagues() {
            merged.extend(self.load(&league_id).history);
        }
        merged.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.league_id.cmp(&b.league_id)));

        let mut stats = GameStats::empty(self.max_attempts);
        for result in &merged {
            stats.games_played += 1;
            stats.last_played = Some(result.date);
            if result.won {
                stats.games_won += 1;
                stats.current_streak += 1;
                stats.max_streak = stats.max_streak.max(stats.current_streak);
                let bucket = result.attempts_used.wrapping_sub(1);
                if bucket < stats.guess_distribution.len() {
                    stats.guess_distribution[bucket] += 1;
                }
            } else {
                stats.current_streak = 0;
            }
        }

        merged.reverse();
        merged.truncate(self.history_limit);
        stats.history = merged;
        stats
    }

    fn leagues(&self) -> Vec<String> {
        let Some(raw) = self.store.get(&self.index_key()) else {
            return Vec::new();
        };
        serde_json::from_str::<Vec<String>>(&raw).unwrap_or_default()
    }

    fn remember_league(&self, league_id: &str) -> Result<()> {
        let mut leagues: BTreeSet<String> = self.leagues().into_iter().collect();
        if !leagues.insert(league_id.to_string()) {
            return Ok(());
        }
        let leagues: Vec<String> = leagues.into_iter().collect();
        let json = serde_json::to_string(&leagues).context("serialize league index")?;
        self.store.set(&self.index_key(), &json)
    }

    fn stats_key(&self, league_id: &str) -> String {
        format!("game_stats_{}_{league_id}", self.game_id)
    }

    fn index_key(&self) -> String {
        format!("game_stats_{}_index", self.game_id)
    }
}
