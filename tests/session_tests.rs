use deckforge::config::Config;
use deckforge::deck::Deck;
use deckforge::session::DeckSession;
use std::sync::Arc;

mod common;
use common::{deck_without_win, engine, reference_catalog_with_filler};

fn session() -> DeckSession {
    let catalog = Arc::new(reference_catalog_with_filler());
    DeckSession::new(catalog, engine(&Config::default()))
}

fn fill(session: &mut DeckSession, ids: &[&str]) {
    for (i, id) in ids.iter().enumerate() {
        assert!(session.set_slot_by_id(i, Some(id)), "slot {} <- {}", i, id);
    }
}

#[test]
fn publishes_only_for_complete_decks() {
    let mut s = session();
    fill(&mut s, &["a", "b", "c", "d", "e", "f", "g"]);
    assert_eq!(s.score(), None);
    assert!(s.suggestions().is_empty());
    assert!(s.summary().metrics.is_none());

    assert!(s.set_slot_by_id(7, Some("h")));
    assert_eq!(s.score(), Some(89));
    assert!(s.summary().metrics.is_some());

    // Emptying a slot withdraws the score.
    assert!(s.set_slot(3, None));
    assert_eq!(s.score(), None);
}

#[test]
fn duplicate_and_out_of_range_writes_are_no_ops() {
    let mut s = session();
    fill(&mut s, &["a", "b", "c", "d", "e", "f", "g", "h"]);
    let before = s.revision();
    let deck_before = s.deck().clone();

    assert!(!s.set_slot_by_id(0, Some("h")));
    assert!(!s.set_slot_by_id(8, Some("x")));
    assert!(!s.set_slot_by_id(2, Some("nope")));

    assert_eq!(s.revision(), before);
    assert_eq!(s.deck(), &deck_before);
    assert_eq!(s.score(), Some(89));
}

#[test]
fn clear_resets_to_no_score() {
    let mut s = session();
    fill(&mut s, &["a", "b", "c", "d", "e", "f", "g", "h"]);
    s.clear();
    assert_eq!(s.deck().filled(), 0);
    assert_eq!(s.score(), None);
    assert_eq!(s.summary().deck, "");
}

#[test]
fn applying_a_suggestion_touches_one_slot() {
    let mut s = session();
    let deck = deck_without_win(s.catalog());
    s.load_deck(deck);
    assert_eq!(s.score(), Some(59));

    let best = s.suggestions()[0].clone();
    let before = s.deck().clone();
    assert!(s.apply_suggestion(&best));

    for i in 0..8 {
        if i == best.slot_index {
            assert_eq!(s.deck().slot(i).unwrap().id, best.candidate_card.id);
        } else {
            assert_eq!(s.deck().slot(i), before.slot(i));
        }
    }
    assert_eq!(s.score(), Some(best.new_score));

    // Same suggestion again is stale now.
    assert!(!s.apply_suggestion(&best));
}

#[test]
fn re_evaluation_is_idempotent() {
    let mut s = session();
    let deck = deck_without_win(s.catalog());
    s.load_deck(deck.clone());
    let first = s.published().cloned();
    s.load_deck(deck);
    assert_eq!(s.published().cloned(), first);
}

#[test]
fn deferred_session_publishes_matching_revision_only() {
    let catalog = Arc::new(reference_catalog_with_filler());
    let mut s = DeckSession::new(catalog, engine(&Config::default())).with_deferred_suggestions();
    let deck = deck_without_win(s.catalog());
    s.load_deck(deck);
    assert_eq!(s.score(), Some(59));
    assert!(s.suggestions().is_empty());

    let job = s.spawn_suggestions().expect("complete deck");
    let revision = job.revision();
    let found = job.wait().expect("not superseded");
    assert!(s.publish_suggestions(revision, found));
    assert_eq!(s.suggestions().len(), 3);
    assert_eq!(s.suggestions()[0].score_delta, 30);
}

#[test]
fn mutation_supersedes_inflight_search() {
    let catalog = Arc::new(reference_catalog_with_filler());
    let mut s = DeckSession::new(catalog, engine(&Config::default())).with_deferred_suggestions();
    let deck = deck_without_win(s.catalog());
    s.load_deck(deck);

    let job = s.spawn_suggestions().unwrap();
    let stale_revision = job.revision();
    assert!(s.set_slot_by_id(1, Some("b")));
    assert!(job.is_cancelled());

    // Whatever the worker managed to produce, it belongs to an old deck.
    let result = job.wait().unwrap_or_default();
    assert!(!s.publish_suggestions(stale_revision, result));
    assert!(s.suggestions().is_empty());
}

#[test]
fn incomplete_deck_spawns_nothing() {
    let mut s = session();
    s.load_deck(Deck::new());
    assert!(s.spawn_suggestions().is_none());
}
