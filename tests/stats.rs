use std::sync::Arc;

use chrono::NaiveDate;

use leaguele_terminal::evaluate::Verdict;
use leaguele_terminal::stats::{GameResult, GameStats, StatsLedger};
use leaguele_terminal::store::{KvStore, MemoryStore};

fn ledger(store: &Arc<dyn KvStore>) -> StatsLedger {
    StatsLedger::new("lol", 8, 100, Arc::clone(store))
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn result(league_id: &str, day: NaiveDate, won: bool, attempts: usize) -> GameResult {
    let mut verdicts = vec![Verdict::Miss; attempts.saturating_sub(1)];
    verdicts.push(if won { Verdict::Exact } else { Verdict::Miss });
    GameResult {
        won,
        attempts_used: attempts,
        guess_verdicts: verdicts,
        league_id: league_id.to_string(),
        date: day,
        target_name: "Faker".to_string(),
    }
}

#[test]
fn recording_is_idempotent_per_day() {
    let store: Arc<dyn KvStore> = Arc::new(MemoryStore::new());
    let ledger = ledger(&store);
    let today = date(2026, 8, 6);

    ledger
        .record_result(&result("lck", today, true, 3))
        .expect("recorded");
    ledger
        .record_result(&result("lck", today, true, 3))
        .expect("recorded");
    // Even a different outcome for the same day is ignored.
    ledger
        .record_result(&result("lck", today, false, 8))
        .expect("recorded");

    let stats = ledger.stats_for("lck");
    assert_eq!(stats.games_played, 1);
    assert_eq!(stats.games_won, 1);
    assert_eq!(stats.history.len(), 1);
}

#[test]
fn streaks_follow_wins_and_losses() {
    let store: Arc<dyn KvStore> = Arc::new(MemoryStore::new());
    let ledger = ledger(&store);

    let days = [
        (date(2026, 8, 1), true),
        (date(2026, 8, 2), true),
        (date(2026, 8, 3), false),
        (date(2026, 8, 4), true),
    ];
    for (day, won) in days {
        ledger
            .record_result(&result("lck", day, won, 4))
            .expect("recorded");
    }

    let stats = ledger.stats_for("lck");
    assert_eq!(stats.games_played, 4);
    assert_eq!(stats.games_won, 3);
    assert_eq!(stats.current_streak, 1);
    assert_eq!(stats.max_streak, 2);
}

#[test]
fn win_rate_is_zero_before_any_game() {
    let stats = GameStats::empty(8);
    assert_eq!(stats.win_rate(), 0);
}

#[test]
fn win_rate_rounds_to_whole_percent() {
    let store: Arc<dyn KvStore> = Arc::new(MemoryStore::new());
    let ledger = ledger(&store);
    ledger
        .record_result(&result("lck", date(2026, 8, 1), true, 2))
        .expect("recorded");
    ledger
        .record_result(&result("lck", date(2026, 8, 2), true, 3))
        .expect("recorded");
    ledger
        .record_result(&result("lck", date(2026, 8, 3), false, 8))
        .expect("recorded");
    assert_eq!(ledger.stats_for("lck").win_rate(), 67);
}

#[test]
fn distribution_floor_avoids_division_by_zero() {
    let stats = GameStats::empty(8);
    assert_eq!(stats.max_distribution_value(), 1);
}

#[test]
fn only_wins_enter_the_distribution() {
    let store: Arc<dyn KvStore> = Arc::new(MemoryStore::new());
    let ledger = ledger(&store);
    ledger
        .record_result(&result("lck", date(2026, 8, 1), true, 3))
        .expect("recorded");
    ledger
        .record_result(&result("lck", date(2026, 8, 2), false, 8))
        .expect("recorded");

    let stats = ledger.stats_for("lck");
    assert_eq!(stats.guess_distribution[2], 1);
    assert_eq!(stats.guess_distribution.iter().sum::<u32>(), 1);
    assert_eq!(stats.max_distribution_value(), 1);
}

#[test]
fn history_is_bounded_and_most_recent_first() {
    let store: Arc<dyn KvStore> = Arc::new(MemoryStore::new());
    let ledger = StatsLedger::new("lol", 8, 3, Arc::clone(&store));

    for day in 1..=5 {
        ledger
            .record_result(&result("lck", date(2026, 8, day), true, 2))
            .expect("recorded");
    }

    let stats = ledger.stats_for("lck");
    // Counters keep the full tally even after old entries fall off.
    assert_eq!(stats.games_played, 5);
    assert_eq!(stats.history.len(), 3);
    assert_eq!(stats.history[0].date, date(2026, 8, 5));
    assert_eq!(stats.history[2].date, date(2026, 8, 3));
}

#[test]
fn global_view_is_derived_from_league_histories() {
    let store: Arc<dyn KvStore> = Arc::new(MemoryStore::new());
    let ledger = ledger(&store);

    ledger
        .record_result(&result("lck", date(2026, 8, 1), true, 2))
        .expect("recorded");
    ledger
        .record_result(&result("lec", date(2026, 8, 2), false, 8))
        .expect("recorded");
    ledger
        .record_result(&result("lck", date(2026, 8, 3), true, 5))
        .expect("recorded");

    let global = ledger.stats_for("all");
    assert_eq!(global.games_played, 3);
    assert_eq!(global.games_won, 2);
    // Chronological replay: win, loss, win.
    assert_eq!(global.current_streak, 1);
    assert_eq!(global.max_streak, 1);
    assert_eq!(global.guess_distribution[1], 1);
    assert_eq!(global.guess_distribution[4], 1);
    assert_eq!(global.history[0].date, date(2026, 8, 3));

    // Per-league views stay independent.
    assert_eq!(ledger.stats_for("lck").games_played, 2);
    assert_eq!(ledger.stats_for("lec").games_played, 1);
}

#[test]
fn has_played_today_checks_the_league_history() {
    let store: Arc<dyn KvStore> = Arc::new(MemoryStore::new());
    let ledger = ledger(&store);
    let today = date(2026, 8, 6);

    assert!(!ledger.has_played_today("lck", today));
    ledger
        .record_result(&result("lck", today, true, 1))
        .expect("recorded");
    assert!(ledger.has_played_today("lck", today));
    assert!(!ledger.has_played_today("lec", today));
}

#[test]
fn missing_keys_read_as_fresh_stats() {
    let store: Arc<dyn KvStore> = Arc::new(MemoryStore::new());
    let ledger = ledger(&store);
    let stats = ledger.stats_for("lck");
    assert_eq!(stats.games_played, 0);
    assert_eq!(stats.guess_distribution.len(), 8);
    assert!(stats.history.is_empty());
    assert!(stats.last_played.is_none());
}
