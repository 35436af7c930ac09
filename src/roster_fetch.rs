use std::collections::HashSet;
use std::env;

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;

use crate::http_client::http_client;
use crate::player::Player;

const DEFAULT_ROSTER_URL: &str =
    "https://esports-api.lolesports.com/persisted/gw/getTeams?hl=en-US";
// Public key shipped with the lolesports web client.
const DEFAULT_API_KEY: &str = "0TvQnueqKa5mxJntVWt0w4LpLfEkrV1Ta8rQBb9Z";

/// Fetch the full team listing and flatten it to a roster for the given
/// league allow-list. Network and HTTP-status failures bubble up; the caller
/// decides whether to fall back to fixture data.
pub fn fetch_roster(allow: &[String]) -> Result<Vec<Player>> {
    let client = http_client()?;
    let url = env::var("ROSTER_URL").unwrap_or_else(|_| DEFAULT_ROSTER_URL.to_string());
    let api_key = env::var("ESPORTS_API_KEY").unwrap_or_else(|_| DEFAULT_API_KEY.to_string());

    let resp = client
        .get(&url)
        .header("x-api-key", api_key)
        .send()
        .context("roster request failed")?;
    let status = resp.status();
    let body = resp.text().context("failed reading roster body")?;
    if !status.is_success() {
        return Err(anyhow!("http {status}: {body}"));
    }
    parse_roster_json(&body, allow)
}

#[derive(Debug, Default, Deserialize)]
struct TeamsResponse {
    #[serde(default)]
    data: TeamsData,
}

#[derive(Debug, Default, Deserialize)]
struct TeamsData {
    #[serde(default)]
    teams: Vec<TeamEntry>,
}

#[derive(Debug, Deserialize)]
struct TeamEntry {
    name: String,
    #[serde(rename = "homeLeague")]
    home_league: Option<HomeLeague>,
    #[serde(default)]
    players: Vec<RosterEntry>,
}

#[derive(Debug, Deserialize)]
struct HomeLeague {
    name: String,
}

#[derive(Debug, Deserialize)]
struct RosterEntry {
    #[serde(rename = "summonerName")]
    summoner_name: String,
    #[serde(default)]
    role: String,
    #[serde(default)]
    image: Option<String>,
}

/// Flatten the teams payload into players, keeping only teams whose home
/// league is in the allow-list (an empty list keeps everything) and
/// deduplicating by summoner name in feed order.
pub fn parse_roster_json(raw: &str, allow: &[String]) -> Result<Vec<Player>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    let response: TeamsResponse =
        serde_json::from_str(trimmed).context("invalid teams json")?;

    let mut seen: HashSet<String> = HashSet::new();
    let mut players = Vec::new();
    for team in response.data.teams {
        let Some(league) = team.home_league.as_ref().map(|l| l.name.as_str()) else {
            continue;
        };
        if !allow.is_empty() && !allow.iter().any(|name| name == league) {
            continue;
        }
        for entry in team.players {
            if entry.summoner_name.trim().is_empty() {
                continue;
            }
            if !seen.insert(entry.summoner_name.clone()) {
                continue;
            }
            players.push(Player {
                id: entry.summoner_name.clone(),
                name: entry.summoner_name,
                team: team.name.clone(),
                league: league.to_string(),
                role: entry.role,
                image: entry.image.filter(|url| !url.trim().is_empty()),
                enrichment: None,
            });
        }
    }
    Ok(players)
}
