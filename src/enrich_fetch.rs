use std::env;

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;

use crate::http_client::http_client;
use crate::player::{Enrichment, Player, SocialLinks};

// Companion backend proxying the Leaguepedia cargo tables.
const DEFAULT_DETAILS_URL: &str = "http://localhost:5000/api/cargo";

/// Look up biographical details for one player. Missing optional fields in
/// the response degrade to `None`; only transport and malformed-JSON
/// failures are errors, and the caller recovers those per player.
pub fn fetch_player_details(player: &Player) -> Result<Enrichment> {
    let client = http_client()?;
    let url = env::var("DETAILS_URL").unwrap_or_else(|_| DEFAULT_DETAILS_URL.to_string());

    let resp = client
        .get(&url)
        .query(&[
            ("playerName", player.name.as_str()),
            ("team", player.team.as_str()),
            ("league", player.league.as_str()),
            ("role", player.role.as_str()),
        ])
        .send()
        .context("details request failed")?;
    let status = resp.status();
    let body = resp.text().context("failed reading details body")?;
    if !status.is_success() {
        return Err(anyhow!("http {status}: {body}"));
    }
    parse_player_details_json(&body)
}

#[derive(Debug, Default, Deserialize)]
struct DetailsResponse {
    #[serde(default)]
    country: Option<String>,
    #[serde(default, rename = "countryCode")]
    country_code: Option<String>,
    #[serde(default)]
    age: Option<String>,
    #[serde(default, rename = "socialMedia")]
    social_media: Option<SocialMediaResponse>,
    #[serde(default, rename = "signatureChampions")]
    signature_champions: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct SocialMediaResponse {
    #[serde(default)]
    twitter: Option<String>,
    #[serde(default)]
    facebook: Option<String>,
    #[serde(default)]
    instagram: Option<String>,
    #[serde(default)]
    twitch: Option<String>,
    #[serde(default)]
    tiktok: Option<String>,
    #[serde(default)]
    discord: Option<String>,
}

pub fn parse_player_details_json(raw: &str) -> Result<Enrichment> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Enrichment::default());
    }
    let details: DetailsResponse =
        serde_json::from_str(trimmed).context("invalid details json")?;

    let social = details
        .social_media
        .map(|links| SocialLinks {
            twitter: normalize(links.twitter),
            facebook: normalize(links.facebook),
            instagram: normalize(links.instagram),
            twitch: normalize(links.twitch),
            tiktok: normalize(links.tiktok),
            discord: normalize(links.discord),
        })
        .unwrap_or_default();

    Ok(Enrichment {
        country: normalize(details.country),
        country_code: normalize(details.country_code),
        age: normalize(details.age),
        social,
        signature_champions: details
            .signature_champions
            .into_iter()
            .filter(|name| !name.trim().is_empty())
            .collect(),
    })
}

/// The upstream uses "N/A"-style sentinels for unknown values; fold them
/// into `None` so the rest of the engine never sees placeholder strings.
fn normalize(value: Option<String>) -> Option<String> {
    let value = value?;
    let trimmed = value.trim();
    if trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case("n/a")
        || trimmed.eq_ignore_ascii_case("unknown")
    {
        return None;
    }
    Some(trimmed.to_string())
}
