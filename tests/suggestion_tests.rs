use deckforge::catalog::Catalog;
use deckforge::config::Config;
use deckforge::optimizer::{CancelToken, SuggestionRecord};

mod common;
use common::{
    deck_from_ids, deck_without_win, engine, engine_with_limit, reference_cards,
    reference_catalog_with_filler, CardBuilder,
};

fn ranked(records: &[SuggestionRecord]) -> Vec<(usize, &str, i32, u8)> {
    records
        .iter()
        .map(|r| {
            (
                r.slot_index,
                r.candidate_card_id.as_str(),
                r.score_delta,
                r.new_score,
            )
        })
        .collect()
}

#[test]
fn restores_missing_win_condition_first() {
    let catalog = reference_catalog_with_filler();
    let deck = deck_without_win(&catalog);
    let engine = engine(&Config::default());

    let found = engine.suggest(&deck, &catalog);
    let records: Vec<SuggestionRecord> = found.iter().map(SuggestionRecord::from).collect();

    // Slots 5 and 7 tie at +26; slot order breaks the tie.
    assert_eq!(
        ranked(&records),
        vec![(1, "b", 30, 89), (6, "b", 27, 86), (5, "b", 26, 85)]
    );
    assert_eq!(records[0].replaced_card_id, "x");
}

#[test]
fn full_ranking_is_stable_on_ties() {
    let catalog = reference_catalog_with_filler();
    let deck = deck_without_win(&catalog);

    let found = engine_with_limit(usize::MAX, false).suggest(&deck, &catalog);
    let slots: Vec<usize> = found.iter().map(|s| s.slot_index).collect();
    assert_eq!(slots, vec![1, 6, 5, 7, 2, 3, 0, 4]);
    assert!(found.windows(2).all(|w| w[0].score_delta >= w[1].score_delta));
}

#[test]
fn parallel_and_sequential_agree() {
    let catalog = reference_catalog_with_filler();
    let deck = deck_without_win(&catalog);

    let par = engine_with_limit(usize::MAX, true).suggest(&deck, &catalog);
    let seq = engine_with_limit(usize::MAX, false).suggest(&deck, &catalog);
    assert_eq!(par, seq);
}

#[test]
fn no_candidates_outside_deck_means_no_suggestions() {
    let catalog = Catalog::new(reference_cards());
    let deck = deck_from_ids(&catalog, &["a", "b", "c", "d", "e", "f", "g", "h"]);
    assert!(engine(&Config::default()).suggest(&deck, &catalog).is_empty());
}

#[test]
fn small_gains_are_not_suggested() {
    let mut cards = reference_cards();
    cards.push(CardBuilder::new("w1").cost(4.0).tags(&["win"]).build());
    cards.push(CardBuilder::new("s1").cost(2.0).tags(&["spell"]).build());
    cards.push(CardBuilder::new("z").cost(1.0).build());
    let catalog = Catalog::new(cards);
    let deck = deck_from_ids(&catalog, &["a", "b", "c", "d", "e", "f", "g", "h"]);

    assert!(engine(&Config::default()).suggest(&deck, &catalog).is_empty());
}

#[test]
fn threshold_is_configurable() {
    let catalog = reference_catalog_with_filler();
    let deck = deck_without_win(&catalog);

    let mut config = Config::default();
    config.engine.suggestion_threshold = 27;
    config.engine.max_suggestions = 10;
    let found = engine(&config).suggest(&deck, &catalog);
    assert_eq!(found.len(), 2);
    assert!(found.iter().all(|s| s.score_delta >= 27));
}

#[test]
fn incomplete_deck_gets_no_suggestions() {
    let catalog = reference_catalog_with_filler();
    let deck = deck_from_ids(&catalog, &["a", "x", "c", "d", "e", "f", "g"]);
    assert!(engine(&Config::default()).suggest(&deck, &catalog).is_empty());
}

#[test]
fn cancelled_search_returns_none() {
    let catalog = reference_catalog_with_filler();
    let deck = deck_without_win(&catalog);
    let token = CancelToken::new();
    token.cancel();

    let engine = engine(&Config::default());
    assert!(engine.suggest_with_cancel(&deck, &catalog, &token).is_none());
    assert!(engine
        .suggest_with_cancel(&deck, &catalog, &CancelToken::new())
        .is_some());
}
