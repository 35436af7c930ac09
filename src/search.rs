use std::collections::{HashMap, HashSet};

use crate::player::Player;

const MIN_SUGGEST_LEN: usize = 2;

/// In-memory lookup over one roster. Rebuilt from scratch whenever the
/// roster changes; enrichment-only updates do not touch the indexed fields,
/// so a slightly stale index is fine.
pub struct SearchIndex {
    players: Vec<Player>,
    exact: HashMap<String, usize>,
}

impl SearchIndex {
    pub fn build(players: &[Player]) -> Self {
        let mut exact = HashMap::new();
        for (pos, player) in players.iter().enumerate() {
            exact.insert(player.name.to_lowercase(), pos);

            if let Some(alias) = alias_of(&player.name) {
                exact.insert(alias.to_lowercase(), pos);
            }

            // Name tokens, skipping short particles like "de" or "of".
            for token in player.name.replace(['"', '(', ')'], " ").split_whitespace() {
                if token.len() > 2 {
                    exact.insert(token.to_lowercase(), pos);
                }
            }
        }
        Self {
            players: players.to_vec(),
            exact,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Case-insensitive exact match against a full name, an alias, or a name
    /// token.
    pub fn find_exact(&self, term: &str) -> Option<&Player> {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return None;
        }
        self.exact.get(&term).map(|pos| &self.players[*pos])
    }

    /// Ranked autocomplete candidates, best first. Ties keep roster order.
    pub fn suggest(&self, term: &str, limit: usize, exclude_ids: &[String]) -> Vec<String> {
        let term = term.trim().to_lowercase();
        if term.len() < MIN_SUGGEST_LEN {
            return Vec::new();
        }

        let mut matches: Vec<(usize, u32)> = Vec::new();
        for (pos, player) in self.players.iter().enumerate() {
            if exclude_ids.iter().any(|id| id == &player.id) {
                continue;
            }
            if let Some(relevance) = relevance_of(&player.name, &term) {
                matches.push((pos, relevance));
            }
        }

        // Stable sort: equal relevance keeps roster order.
        matches.sort_by(|a, b| b.1.cmp(&a.1));

        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for (pos, _) in matches {
            let name = &self.players[pos].name;
            if seen.insert(name.clone()) {
                out.push(name.clone());
            }
            if out.len() >= limit {
                break;
            }
        }
        out
    }
}

/// Relevance tiers, highest first: exact name, exact alias, prefix, separate
/// word, substring, term-contains-name, token prefix overlap.
fn relevance_of(name: &str, term: &str) -> Option<u32> {
    let name = name.to_lowercase();
    if name == term {
        return Some(100);
    }
    if alias_of(&name).is_some_and(|alias| alias == term) {
        return Some(90);
    }
    if name.starts_with(term) {
        return Some(80);
    }
    if name.contains(&format!(" {term} ")) {
        return Some(70);
    }
    if name.contains(term) {
        return Some(60);
    }
    if term.contains(&name) {
        return Some(50);
    }
    for token in name.split_whitespace() {
        if token.starts_with(term) || term.starts_with(token) {
            return Some(40);
        }
    }
    None
}

/// Alias embedded in a full name, either quoted (`Lee "Faker" Sang-hyeok`) or
/// parenthesized (`Lee (Faker) Sang-hyeok`).
fn alias_of(name: &str) -> Option<&str> {
    if let Some(start) = name.find('"') {
        let rest = &name[start + 1..];
        if let Some(end) = rest.find('"') {
            let alias = &rest[..end];
            if !alias.is_empty() {
                return Some(alias);
            }
        }
    }
    if let Some(start) = name.find('(') {
        let rest = &name[start + 1..];
        if let Some(end) = rest.find(')') {
            let alias = &rest[..end];
            if !alias.is_empty() {
                return Some(alias);
            }
        }
    }
    None
}
