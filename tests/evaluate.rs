use leaguele_terminal::evaluate::{Verdict, evaluate};
use leaguele_terminal::player::{Enrichment, Player};

fn player(
    id: &str,
    team: &str,
    league: &str,
    role: &str,
    country: Option<&str>,
    age: Option<&str>,
) -> Player {
    Player {
        id: id.to_string(),
        name: id.to_string(),
        team: team.to_string(),
        league: league.to_string(),
        role: role.to_string(),
        image: None,
        enrichment: Some(Enrichment {
            country: country.map(str::to_string),
            age: age.map(str::to_string),
            ..Enrichment::default()
        }),
    }
}

#[test]
fn scores_same_league_guess_across_all_columns() {
    let target = player("Faker", "T1", "LCK", "MID", Some("South Korea"), Some("27"));
    let guess = player("Chovy", "Gen.G", "LCK", "MID", Some("South Korea"), Some("24"));
    let roster = vec![target.clone(), guess.clone()];

    let eval = evaluate(&guess, &target, &roster);
    assert_eq!(eval.role, Verdict::Exact);
    assert_eq!(eval.league, Verdict::Exact);
    assert_eq!(eval.age, Verdict::Close);
    assert_eq!(eval.country, Verdict::Exact);
    // Wrong team, but Gen.G and T1 share a league.
    assert_eq!(eval.team, Verdict::Close);
    assert_eq!(eval.overall, Verdict::Close);
}

#[test]
fn identity_match_wins_regardless_of_columns() {
    let target = player("Faker", "T1", "LCK", "MID", Some("South Korea"), Some("27"));
    let roster = vec![target.clone()];
    let eval = evaluate(&target, &target, &roster);
    assert_eq!(eval.overall, Verdict::Exact);
}

#[test]
fn matching_columns_do_not_imply_a_win() {
    // Same team, league, role, country, age — still the wrong player.
    let target = player("Zeus", "T1", "LCK", "TOP", Some("South Korea"), Some("22"));
    let mut guess = player("Doran", "T1", "LCK", "TOP", Some("South Korea"), Some("22"));
    guess.name = "Doran".to_string();
    let roster = vec![target.clone(), guess.clone()];

    let eval = evaluate(&guess, &target, &roster);
    assert_eq!(eval.team, Verdict::Exact);
    assert_eq!(eval.age, Verdict::Exact);
    assert_eq!(eval.overall, Verdict::Close);
}

#[test]
fn unknown_target_country_is_never_comparable() {
    let target = player("Faker", "T1", "LCK", "MID", None, Some("27"));
    let guess = player("Chovy", "Gen.G", "LCK", "MID", Some("South Korea"), Some("27"));
    let roster = vec![target.clone(), guess.clone()];
    let eval = evaluate(&guess, &target, &roster);
    assert_eq!(eval.country, Verdict::Miss);
}

#[test]
fn country_comparison_normalizes_case_and_whitespace() {
    let target = player("Faker", "T1", "LCK", "MID", Some(" south korea "), Some("27"));
    let guess = player("Chovy", "Gen.G", "LCK", "MID", Some("South Korea"), Some("27"));
    let roster = vec![target.clone(), guess.clone()];
    let eval = evaluate(&guess, &target, &roster);
    assert_eq!(eval.country, Verdict::Exact);
}

#[test]
fn age_tiers_follow_the_three_year_window() {
    let target = player("Faker", "T1", "LCK", "MID", None, Some("27"));
    let roster = |guess: &Player| vec![target.clone(), guess.clone()];

    let same = player("A", "X", "LCK", "MID", None, Some("27 years"));
    assert_eq!(evaluate(&same, &target, &roster(&same)).age, Verdict::Exact);

    let near = player("B", "X", "LCK", "MID", None, Some("30"));
    assert_eq!(evaluate(&near, &target, &roster(&near)).age, Verdict::Close);

    let far = player("C", "X", "LCK", "MID", None, Some("31"));
    assert_eq!(evaluate(&far, &target, &roster(&far)).age, Verdict::Miss);

    let unparsable = player("D", "X", "LCK", "MID", None, Some("unknown"));
    assert_eq!(
        evaluate(&unparsable, &target, &roster(&unparsable)).age,
        Verdict::Miss
    );
}

#[test]
fn unknown_target_age_is_a_miss() {
    let target = player("Faker", "T1", "LCK", "MID", None, None);
    let guess = player("Chovy", "Gen.G", "LCK", "MID", None, Some("24"));
    let roster = vec![target.clone(), guess.clone()];
    assert_eq!(evaluate(&guess, &target, &roster).age, Verdict::Miss);
}

#[test]
fn team_from_another_league_is_a_miss() {
    let target = player("Faker", "T1", "LCK", "MID", None, None);
    let guess = player("Caps", "G2 Esports", "LEC", "MID", None, None);
    let roster = vec![target.clone(), guess.clone()];
    let eval = evaluate(&guess, &target, &roster);
    assert_eq!(eval.team, Verdict::Miss);
    assert_eq!(eval.league, Verdict::Miss);
    // Role still matches, so the guess is an overall near miss.
    assert_eq!(eval.overall, Verdict::Close);
}

#[test]
fn nothing_in_common_is_an_overall_miss() {
    let target = player("Faker", "T1", "LCK", "MID", Some("South Korea"), Some("27"));
    let guess = player("Bwipo", "FlyQuest", "LTA North", "TOP", Some("Belgium"), Some("27"));
    let roster = vec![target.clone(), guess.clone()];
    let eval = evaluate(&guess, &target, &roster);
    // The age column never feeds the overall verdict.
    assert_eq!(eval.age, Verdict::Exact);
    assert_eq!(eval.overall, Verdict::Miss);
}
