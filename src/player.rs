use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// One roster entry. The core fields always come from the roster feed; the
/// enrichment block is filled in lazily from the details endpoint and stays
/// `None` until a lookup has been attempted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Summoner name, unique within a roster and stable for the session.
    pub id: String,
    pub name: String,
    pub team: String,
    pub league: String,
    pub role: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub enrichment: Option<Enrichment>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Enrichment {
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub age: Option<String>,
    #[serde(default)]
    pub social: SocialLinks,
    #[serde(default)]
    pub signature_champions: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialLinks {
    #[serde(default)]
    pub twitter: Option<String>,
    #[serde(default)]
    pub facebook: Option<String>,
    #[serde(default)]
    pub instagram: Option<String>,
    #[serde(default)]
    pub twitch: Option<String>,
    #[serde(default)]
    pub tiktok: Option<String>,
    #[serde(default)]
    pub discord: Option<String>,
}

impl Player {
    pub fn country(&self) -> Option<&str> {
        self.enrichment.as_ref()?.country.as_deref()
    }

    pub fn age(&self) -> Option<&str> {
        self.enrichment.as_ref()?.age.as_deref()
    }

    /// "N/A" placeholders belong to the display layer only.
    pub fn display_country(&self) -> &str {
        self.country().unwrap_or("N/A")
    }

    pub fn display_age(&self) -> &str {
        self.age().unwrap_or("N/A")
    }

    /// Whether a details lookup has already been attempted for this player.
    pub fn is_enriched(&self) -> bool {
        self.enrichment.is_some()
    }

    pub fn with_enrichment(mut self, enrichment: Enrichment) -> Self {
        self.enrichment = Some(enrichment);
        self
    }
}

/// Deduplicate a roster by player id, keeping the first occurrence so the
/// source ordering stays stable for the daily selector.
pub fn dedup_roster(players: Vec<Player>) -> Vec<Player> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::with_capacity(players.len());
    for player in players {
        if seen.insert(player.id.clone()) {
            out.push(player);
        }
    }
    out
}
