use chrono::NaiveDate;
use rand::Rng;

use crate::config::GameConfig;
use crate::player::Player;

/// Seed for a (date, league) pair: the local calendar date as YYYYMMDD
/// concatenated with the league id, folded into 32 bits. Varying the league
/// id changes the seed input, so scopes get independent targets on the same
/// day.
pub fn daily_seed(date: NaiveDate, league_id: &str) -> u32 {
    let tag = format!("{}{league_id}", date.format("%Y%m%d"));
    let mut hash: i32 = 0;
    for byte in tag.bytes() {
        hash = hash
            .wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(byte));
    }
    hash.unsigned_abs()
}

/// How the target of the day is picked. Injected into the session so tests
/// and the dev mode can swap the deterministic pick for a random one.
pub trait SelectionStrategy: Send {
    fn select<'a>(&self, roster: &'a [Player], date: NaiveDate) -> Option<&'a Player>;
}

/// Production strategy: seed modulo the size of the filtered roster. The
/// roster order must be stable (source feed order) for this to stay
/// deterministic across reloads.
pub struct DailyStrategy {
    league_id: String,
    league_filter: Vec<String>,
}

impl DailyStrategy {
    pub fn new(league_id: &str, league_filter: &[String]) -> Self {
        Self {
            league_id: league_id.to_string(),
            league_filter: league_filter.to_vec(),
        }
    }
}

impl SelectionStrategy for DailyStrategy {
    fn select<'a>(&self, roster: &'a [Player], date: NaiveDate) -> Option<&'a Player> {
        let filtered = filter_by_leagues(roster, &self.league_filter);
        if filtered.is_empty() {
            return None;
        }
        let index = daily_seed(date, &self.league_id) as usize % filtered.len();
        Some(filtered[index])
    }
}

/// Dev/testing strategy: uniform pick from the filtered roster.
pub struct RandomStrategy {
    league_filter: Vec<String>,
}

impl RandomStrategy {
    pub fn new(league_filter: &[String]) -> Self {
        Self {
            league_filter: league_filter.to_vec(),
        }
    }
}

impl SelectionStrategy for RandomStrategy {
    fn select<'a>(&self, roster: &'a [Player], _date: NaiveDate) -> Option<&'a Player> {
        let filtered = filter_by_leagues(roster, &self.league_filter);
        if filtered.is_empty() {
            return None;
        }
        let index = rand::thread_rng().gen_range(0..filtered.len());
        Some(filtered[index])
    }
}

/// RANDOM_TARGET=1 switches to the random strategy for local testing.
pub fn strategy_from_env(config: &GameConfig) -> Box<dyn SelectionStrategy> {
    let random = std::env::var("RANDOM_TARGET")
        .ok()
        .is_some_and(|val| val == "1" || val.eq_ignore_ascii_case("true"));
    if random {
        Box::new(RandomStrategy::new(&config.league_filter))
    } else {
        Box::new(DailyStrategy::new(&config.league_id, &config.league_filter))
    }
}

fn filter_by_leagues<'a>(roster: &'a [Player], allow: &[String]) -> Vec<&'a Player> {
    if allow.is_empty() {
        return roster.iter().collect();
    }
    roster
        .iter()
        .filter(|player| allow.iter().any(|league| league == &player.league))
        .collect()
}
