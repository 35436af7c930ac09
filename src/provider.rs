use std::sync::mpsc::{Receiver, Sender};
use std::thread;

use crate::config::league_allow_list;
use crate::enrich_fetch;
use crate::fake_roster::fixture_roster;
use crate::player::{Enrichment, Player};
use crate::roster_fetch;

/// Requests from the front end to the blocking-I/O thread.
pub enum ProviderCommand {
    FetchRoster { league_id: String },
    EnrichPlayer { player: Player, purpose: EnrichPurpose },
}

/// Why a details lookup was requested, echoed back so the session knows
/// whether the enriched record is the target or a pending guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrichPurpose {
    Target,
    Guess,
}

/// Responses streamed back to the front end.
pub enum Delta {
    Roster {
        league_id: String,
        players: Vec<Player>,
        fallback: bool,
    },
    Enriched {
        player: Player,
        purpose: EnrichPurpose,
    },
    Log(String),
}

/// One worker thread owns all network I/O; commands are processed strictly
/// in order, which keeps guess enrichments serialized. A send failure means
/// the front end is gone and the thread exits.
pub fn spawn_provider(tx: Sender<Delta>, cmd_rx: Receiver<ProviderCommand>) {
    thread::spawn(move || {
        while let Ok(cmd) = cmd_rx.recv() {
            let alive = match cmd {
                ProviderCommand::FetchRoster { league_id } => handle_fetch_roster(&tx, &league_id),
                ProviderCommand::EnrichPlayer { player, purpose } => {
                    handle_enrich(&tx, player, purpose)
                }
            };
            if !alive {
                return;
            }
        }
    });
}

/// The roster is always fetched for every major league; the session's
/// selector narrows to the active scope and out-of-scope guesses are
/// rejected with a message rather than hidden.
fn handle_fetch_roster(tx: &Sender<Delta>, league_id: &str) -> bool {
    let allow = league_allow_list("all");
    match roster_fetch::fetch_roster(&allow) {
        Ok(players) if !players.is_empty() => tx
            .send(Delta::Roster {
                league_id: league_id.to_string(),
                players,
                fallback: false,
            })
            .is_ok(),
        Ok(_) => fallback_roster(tx, league_id, &allow, "roster feed returned no players"),
        Err(err) => fallback_roster(tx, league_id, &allow, &format!("{err:#}")),
    }
}

/// Degraded mode: the live feed is down or empty, so serve the built-in
/// fixture roster instead.
fn fallback_roster(tx: &Sender<Delta>, league_id: &str, allow: &[String], reason: &str) -> bool {
    if tx
        .send(Delta::Log(format!(
            "[WARN] Roster fetch failed ({reason}); using fixture roster"
        )))
        .is_err()
    {
        return false;
    }
    let players: Vec<Player> = fixture_roster()
        .into_iter()
        .filter(|player| allow.is_empty() || allow.iter().any(|league| league == &player.league))
        .collect();
    tx.send(Delta::Roster {
        league_id: league_id.to_string(),
        players,
        fallback: true,
    })
    .is_ok()
}

fn handle_enrich(tx: &Sender<Delta>, player: Player, purpose: EnrichPurpose) -> bool {
    let enriched = match enrich_fetch::fetch_player_details(&player) {
        Ok(enrichment) => player.with_enrichment(enrichment),
        Err(err) => {
            if tx
                .send(Delta::Log(format!(
                    "[WARN] Details lookup failed for {}: {err:#}",
                    player.name
                )))
                .is_err()
            {
                return false;
            }
            // Mark the lookup as attempted so the session stops retrying;
            // the optional fields stay unknown for this player only.
            player.with_enrichment(Enrichment::default())
        }
    };
    tx.send(Delta::Enriched {
        player: enriched,
        purpose,
    })
    .is_ok()
}
