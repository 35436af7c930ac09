use std::env;

pub const GAME_ID: &str = "lol";

/// Only these leagues feed the daily pool; feeder and academy rosters from
/// the same feed are excluded.
pub const MAJOR_LEAGUES: &[&str] = &["LEC", "LCK", "LCS", "LPL", "LTA North", "LTA South"];

/// League scopes the UI can cycle through.
pub const LEAGUE_CHOICES: &[&str] = &["all", "lec", "lck", "lcs", "lpl", "lta-north", "lta-south"];

const DEFAULT_MAX_ATTEMPTS: usize = 8;
const DEFAULT_HISTORY_LIMIT: usize = 100;

#[derive(Debug, Clone)]
pub struct GameConfig {
    pub game_id: String,
    /// Logical scope id ("all", "lec", "lta-north", ...).
    pub league_id: String,
    /// Raw league names from the feed that belong to this scope.
    pub league_filter: Vec<String>,
    pub max_attempts: usize,
    pub history_limit: usize,
}

impl GameConfig {
    pub fn for_league(league_id: &str) -> Self {
        let league_id = league_id.trim().to_lowercase();
        let max_attempts = env::var("MAX_ATTEMPTS")
            .ok()
            .and_then(|val| val.parse::<usize>().ok())
            .unwrap_or(DEFAULT_MAX_ATTEMPTS)
            .clamp(1, 12);
        let history_limit = env::var("HISTORY_LIMIT")
            .ok()
            .and_then(|val| val.parse::<usize>().ok())
            .unwrap_or(DEFAULT_HISTORY_LIMIT)
            .clamp(1, 1000);
        Self {
            game_id: GAME_ID.to_string(),
            league_filter: league_allow_list(&league_id),
            league_id,
            max_attempts,
            history_limit,
        }
    }

    /// Scoped modes only accept guesses from their own leagues; "all" takes
    /// any player the roster knows.
    pub fn is_scoped(&self) -> bool {
        self.league_id != "all"
    }
}

/// Resolve a logical league id to the raw league names it covers.
pub fn league_allow_list(league_id: &str) -> Vec<String> {
    match league_id.trim().to_lowercase().as_str() {
        "all" => MAJOR_LEAGUES.iter().map(|name| name.to_string()).collect(),
        "lta" => vec!["LTA North".to_string(), "LTA South".to_string()],
        "lta-north" => vec!["LTA North".to_string()],
        "lta-south" => vec!["LTA South".to_string()],
        other => vec![other.to_uppercase()],
    }
}

pub fn league_label(league_id: &str) -> String {
    match league_id.trim().to_lowercase().as_str() {
        "all" => "All leagues".to_string(),
        "lta" => "LTA".to_string(),
        "lta-north" => "LTA North".to_string(),
        "lta-south" => "LTA South".to_string(),
        other => other.to_uppercase(),
    }
}
