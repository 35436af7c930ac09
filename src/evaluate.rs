use serde::{Deserialize, Serialize};

use crate::player::Player;

/// Per-attribute (and overall) classification of a guess against the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Exact,
    Close,
    Miss,
}

/// Table columns in display order. Name is the row label and never carries a
/// verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Name,
    Team,
    League,
    Role,
    Country,
    Age,
}

impl Column {
    pub fn title(self) -> &'static str {
        match self {
            Column::Name => "NAME",
            Column::Team => "TEAM",
            Column::League => "LEAGUE",
            Column::Role => "POS",
            Column::Country => "COUNTRY",
            Column::Age => "AGE",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuessEvaluation {
    pub team: Verdict,
    pub league: Verdict,
    pub role: Verdict,
    pub country: Verdict,
    pub age: Verdict,
    pub overall: Verdict,
}

impl GuessEvaluation {
    pub fn column(&self, column: Column) -> Option<Verdict> {
        match column {
            Column::Name => None,
            Column::Team => Some(self.team),
            Column::League => Some(self.league),
            Column::Role => Some(self.role),
            Column::Country => Some(self.country),
            Column::Age => Some(self.age),
        }
    }
}

/// Score one guess. The roster is needed for the team column: a wrong team
/// in the target's league still counts as a near miss.
pub fn evaluate(guess: &Player, target: &Player, roster: &[Player]) -> GuessEvaluation {
    let team = team_verdict(guess, target, roster);
    let league = equality_verdict(&guess.league, &target.league);
    let role = equality_verdict(&guess.role, &target.role);
    let country = country_verdict(guess, target);
    let age = age_verdict(guess, target);

    // The win condition is identity, not attribute agreement: a player can
    // match every visible column and still be the wrong answer.
    let overall = if guess.id == target.id {
        Verdict::Exact
    } else if [team, league, role, country].contains(&Verdict::Exact) {
        Verdict::Close
    } else {
        Verdict::Miss
    };

    GuessEvaluation {
        team,
        league,
        role,
        country,
        age,
        overall,
    }
}

fn equality_verdict(guess: &str, target: &str) -> Verdict {
    if guess == target {
        Verdict::Exact
    } else {
        Verdict::Miss
    }
}

fn country_verdict(guess: &Player, target: &Player) -> Verdict {
    let Some(target_country) = target.country() else {
        // An unknown target nationality cannot be compared.
        return Verdict::Miss;
    };
    let Some(guess_country) = guess.country() else {
        return Verdict::Miss;
    };
    if guess_country.trim().to_lowercase() == target_country.trim().to_lowercase() {
        Verdict::Exact
    } else {
        Verdict::Miss
    }
}

fn age_verdict(guess: &Player, target: &Player) -> Verdict {
    let Some(target_age) = target.age().and_then(parse_age) else {
        return Verdict::Miss;
    };
    let Some(guess_age) = guess.age().and_then(parse_age) else {
        return Verdict::Miss;
    };
    let diff = (guess_age - target_age).abs();
    if diff == 0 {
        Verdict::Exact
    } else if diff <= 3 {
        Verdict::Close
    } else {
        Verdict::Miss
    }
}

fn team_verdict(guess: &Player, target: &Player, roster: &[Player]) -> Verdict {
    if guess.team == target.team {
        return Verdict::Exact;
    }
    let guess_league = roster
        .iter()
        .find(|player| player.team == guess.team)
        .map(|player| player.league.as_str());
    let target_league = roster
        .iter()
        .find(|player| player.team == target.team)
        .map(|player| player.league.as_str());
    match (guess_league, target_league) {
        (Some(a), Some(b)) if a == b => Verdict::Close,
        _ => Verdict::Miss,
    }
}

/// Integer age out of a free-form string ("27", "27 years"). Unparsable
/// values degrade to no verdict.
fn parse_age(raw: &str) -> Option<i64> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse::<i64>().ok()
}
