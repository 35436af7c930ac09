use chrono::Local;

use leaguele_terminal::config::{GameConfig, LEAGUE_CHOICES, league_label};
use leaguele_terminal::fake_roster::fixture_roster;
use leaguele_terminal::roster_fetch;
use leaguele_terminal::select::{DailyStrategy, SelectionStrategy, daily_seed};

// Prints the selected daily target per league scope without starting the UI.
// Useful for checking what the live feed resolves to on a given day.
fn main() {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let today = Local::now().date_naive();
    let scopes: Vec<String> = {
        let args: Vec<String> = std::env::args().skip(1).collect();
        if args.is_empty() {
            LEAGUE_CHOICES.iter().map(|id| id.to_string()).collect()
        } else {
            args
        }
    };

    let roster = match roster_fetch::fetch_roster(&[]) {
        Ok(players) if !players.is_empty() => players,
        Ok(_) => {
            eprintln!("roster feed returned no players; using fixture roster");
            fixture_roster()
        }
        Err(err) => {
            eprintln!("roster fetch failed ({err:#}); using fixture roster");
            fixture_roster()
        }
    };

    println!("date: {}  roster: {} players", today.format("%Y-%m-%d"), roster.len());
    for scope in scopes {
        let config = GameConfig::for_league(&scope);
        let strategy = DailyStrategy::new(&config.league_id, &config.league_filter);
        let seed = daily_seed(today, &config.league_id);
        match strategy.select(&roster, today) {
            Some(target) => println!(
                "{:<12} seed={seed:<10} {} ({} / {} / {})",
                league_label(&config.league_id),
                target.name,
                target.team,
                target.league,
                target.role.to_uppercase()
            ),
            None => println!(
                "{:<12} seed={seed:<10} no players in scope",
                league_label(&config.league_id)
            ),
        }
    }
}
