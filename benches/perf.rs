use std::hint::black_box;

use chrono::NaiveDate;
use criterion::{Criterion, criterion_group, criterion_main};

use leaguele_terminal::evaluate::evaluate;
use leaguele_terminal::player::{Enrichment, Player};
use leaguele_terminal::roster_fetch::parse_roster_json;
use leaguele_terminal::search::SearchIndex;
use leaguele_terminal::select::{DailyStrategy, SelectionStrategy};

const TEAMS_JSON: &str = include_str!("../tests/fixtures/teams.json");

fn synthetic_roster(size: usize) -> Vec<Player> {
    const LEAGUES: &[&str] = &["LCK", "LEC", "LCS", "LPL"];
    const ROLES: &[&str] = &["top", "jungle", "mid", "bottom", "support"];
    (0..size)
        .map(|i| Player {
            id: format!("Player{i}"),
            name: format!("Player{i}"),
            team: format!("Team {}", i / 5),
            league: LEAGUES[i % LEAGUES.len()].to_string(),
            role: ROLES[i % ROLES.len()].to_string(),
            image: None,
            enrichment: Some(Enrichment {
                country: Some("South Korea".to_string()),
                age: Some(format!("{}", 18 + (i % 14))),
                ..Enrichment::default()
            }),
        })
        .collect()
}

fn bench_suggest(c: &mut Criterion) {
    let roster = synthetic_roster(400);
    let index = SearchIndex::build(&roster);
    c.bench_function("search_suggest", |b| {
        b.iter(|| {
            let suggestions = index.suggest(black_box("player1"), 5, &[]);
            black_box(suggestions.len());
        })
    });
}

fn bench_evaluate(c: &mut Criterion) {
    let roster = synthetic_roster(400);
    let target = roster[37].clone();
    let guess = roster[371].clone();
    c.bench_function("evaluate_guess", |b| {
        b.iter(|| {
            let eval = evaluate(black_box(&guess), black_box(&target), &roster);
            black_box(eval.overall);
        })
    });
}

fn bench_select(c: &mut Criterion) {
    let roster = synthetic_roster(400);
    let filter = vec!["LCK".to_string()];
    let strategy = DailyStrategy::new("lck", &filter);
    let date = NaiveDate::from_ymd_opt(2026, 8, 6).expect("valid date");
    c.bench_function("daily_select", |b| {
        b.iter(|| {
            let target = strategy.select(black_box(&roster), date);
            black_box(target.map(|p| p.id.as_str()));
        })
    });
}

fn bench_roster_parse(c: &mut Criterion) {
    let allow = vec!["LCK".to_string(), "LEC".to_string()];
    c.bench_function("roster_parse", |b| {
        b.iter(|| {
            let players = parse_roster_json(black_box(TEAMS_JSON), &allow).unwrap();
            black_box(players.len());
        })
    });
}

criterion_group!(
    benches,
    bench_suggest,
    bench_evaluate,
    bench_select,
    bench_roster_parse
);
criterion_main!(benches);
