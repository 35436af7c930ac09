use crate::player::{Enrichment, Player};

/// Built-in roster used when the live feed is unreachable. Small but spread
/// across every major league so each scope still selects a target, with
/// enough pre-filled enrichment that the country and age columns stay
/// meaningful offline.
pub fn fixture_roster() -> Vec<Player> {
    vec![
        // LCK
        fixture("Faker", "T1", "LCK", "mid", Some("South Korea"), Some("29")),
        fixture("Zeus", "T1", "LCK", "top", Some("South Korea"), Some("22")),
        fixture("Oner", "T1", "LCK", "jungle", Some("South Korea"), Some("23")),
        fixture("Gumayusi", "T1", "LCK", "bottom", Some("South Korea"), Some("24")),
        fixture("Keria", "T1", "LCK", "support", Some("South Korea"), Some("23")),
        fixture("Chovy", "Gen.G", "LCK", "mid", Some("South Korea"), Some("25")),
        fixture("Kiin", "Gen.G", "LCK", "top", Some("South Korea"), Some("26")),
        fixture("Canyon", "Gen.G", "LCK", "jungle", Some("South Korea"), Some("24")),
        fixture("Peyz", "Gen.G", "LCK", "bottom", Some("South Korea"), Some("19")),
        fixture("ShowMaker", "Dplus KIA", "LCK", "mid", Some("South Korea"), Some("25")),
        // LEC
        fixture("Caps", "G2 Esports", "LEC", "mid", Some("Denmark"), Some("26")),
        fixture("BrokenBlade", "G2 Esports", "LEC", "top", Some("Germany"), Some("26")),
        fixture("Mikyx", "G2 Esports", "LEC", "support", Some("Slovenia"), Some("27")),
        fixture("Razork", "Fnatic", "LEC", "jungle", Some("Spain"), Some("25")),
        fixture("Humanoid", "Fnatic", "LEC", "mid", Some("Czech Republic"), Some("26")),
        fixture("Upset", "Fnatic", "LEC", "bottom", Some("Germany"), Some("26")),
        // LPL
        fixture("Knight", "Bilibili Gaming", "LPL", "mid", Some("China"), Some("25")),
        fixture("Bin", "Bilibili Gaming", "LPL", "top", Some("China"), Some("23")),
        fixture("Elk", "Bilibili Gaming", "LPL", "bottom", Some("China"), Some("24")),
        fixture("Xun", "Bilibili Gaming", "LPL", "jungle", Some("China"), Some("23")),
        fixture("Gala", "Royal Never Give Up", "LPL", "bottom", Some("China"), Some("24")),
        // LCS
        fixture("Jojopyun", "Cloud9", "LCS", "mid", Some("Canada"), Some("21")),
        fixture("Blaber", "Cloud9", "LCS", "jungle", Some("United States"), Some("26")),
        fixture("Berserker", "Cloud9", "LCS", "bottom", Some("South Korea"), Some("22")),
        // LTA North
        fixture("APA", "Team Liquid", "LTA North", "mid", Some("United States"), Some("22")),
        fixture("Impact", "Team Liquid", "LTA North", "top", Some("South Korea"), Some("30")),
        fixture("CoreJJ", "Team Liquid", "LTA North", "support", Some("South Korea"), Some("31")),
        fixture("Inspired", "FlyQuest", "LTA North", "jungle", Some("Poland"), Some("24")),
        fixture("Bwipo", "FlyQuest", "LTA North", "top", Some("Belgium"), Some("27")),
        // LTA South
        fixture("Tinowns", "paiN Gaming", "LTA South", "mid", Some("Brazil"), Some("27")),
        fixture("Route", "paiN Gaming", "LTA South", "bottom", Some("South Korea"), Some("25")),
        fixture("Brance", "LOUD", "LTA South", "bottom", Some("Brazil"), Some("22")),
    ]
}

fn fixture(
    name: &str,
    team: &str,
    league: &str,
    role: &str,
    country: Option<&str>,
    age: Option<&str>,
) -> Player {
    Player {
        id: name.to_string(),
        name: name.to_string(),
        team: team.to_string(),
        league: league.to_string(),
        role: role.to_string(),
        image: None,
        enrichment: Some(Enrichment {
            country: country.map(str::to_string),
            country_code: None,
            age: age.map(str::to_string),
            ..Enrichment::default()
        }),
    }
}
