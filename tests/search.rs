use leaguele_terminal::player::Player;
use leaguele_terminal::search::SearchIndex;

fn player(id: &str, name: &str) -> Player {
    Player {
        id: id.to_string(),
        name: name.to_string(),
        team: "T1".to_string(),
        league: "LCK".to_string(),
        role: "mid".to_string(),
        image: None,
        enrichment: None,
    }
}

#[test]
fn find_exact_is_case_insensitive() {
    let roster = vec![player("Faker", "Faker"), player("Caps", "Caps")];
    let index = SearchIndex::build(&roster);
    assert_eq!(index.find_exact("FAKER").map(|p| p.id.as_str()), Some("Faker"));
    assert_eq!(index.find_exact("  caps ").map(|p| p.id.as_str()), Some("Caps"));
    assert!(index.find_exact("Uzi").is_none());
}

#[test]
fn find_exact_matches_alias_and_name_tokens() {
    let roster = vec![player("Faker", "Lee \"Faker\" Sang-hyeok")];
    let index = SearchIndex::build(&roster);
    assert!(index.find_exact("faker").is_some());
    assert!(index.find_exact("sang-hyeok").is_some());
    assert!(index.find_exact("lee").is_some());
    // Exact lookup only; partial fragments go through suggest().
    assert!(index.find_exact("sang").is_none());
}

#[test]
fn find_exact_ignores_empty_terms() {
    let roster = vec![player("Faker", "Faker")];
    let index = SearchIndex::build(&roster);
    assert!(index.find_exact("").is_none());
    assert!(index.find_exact("   ").is_none());
}

#[test]
fn suggest_ranks_prefix_before_substring() {
    let roster = vec![
        player("Faker", "Faker"),
        player("Caps", "Caps"),
        player("Chovy", "Chovy"),
    ];
    let index = SearchIndex::build(&roster);
    let suggestions = index.suggest("ca", 5, &[]);
    assert_eq!(suggestions.first().map(String::as_str), Some("Caps"));
}

#[test]
fn suggest_prefers_exact_name_over_prefix() {
    let roster = vec![player("Caps", "Capsule"), player("Caps2", "Caps")];
    let index = SearchIndex::build(&roster);
    let suggestions = index.suggest("caps", 5, &[]);
    assert_eq!(suggestions[0], "Caps");
    assert_eq!(suggestions[1], "Capsule");
}

#[test]
fn suggest_breaks_ties_by_roster_order() {
    let roster = vec![
        player("Kanavi", "Kanavi"),
        player("Karsa", "Karsa"),
        player("Kael", "Kael"),
    ];
    let index = SearchIndex::build(&roster);
    let suggestions = index.suggest("ka", 5, &[]);
    assert_eq!(suggestions, vec!["Kanavi", "Karsa", "Kael"]);
}

#[test]
fn suggest_excludes_already_guessed_ids() {
    let roster = vec![player("Caps", "Caps"), player("Canyon", "Canyon")];
    let index = SearchIndex::build(&roster);
    let suggestions = index.suggest("ca", 5, &["Caps".to_string()]);
    assert_eq!(suggestions, vec!["Canyon"]);
}

#[test]
fn suggest_truncates_to_limit() {
    let roster = vec![
        player("Caps", "Caps"),
        player("Canyon", "Canyon"),
        player("Carzzy", "Carzzy"),
    ];
    let index = SearchIndex::build(&roster);
    assert_eq!(index.suggest("ca", 2, &[]).len(), 2);
}

#[test]
fn short_terms_return_nothing() {
    let roster = vec![player("Caps", "Caps")];
    let index = SearchIndex::build(&roster);
    assert!(index.suggest("c", 5, &[]).is_empty());
    assert!(index.suggest(" ", 5, &[]).is_empty());
}
