#![allow(dead_code)]

use deckforge::api::build_engine;
use deckforge::catalog::{Card, CardKind, CardRef, Catalog};
use deckforge::config::Config;
use deckforge::deck::Deck;
use deckforge::optimizer::SuggestionEngine;
use std::sync::Arc;

/// Builder for Card to keep fixtures short.
pub struct CardBuilder {
    card: Card,
}

impl CardBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            card: Card::new(id, id, 3.0, CardKind::Troop, &[]),
        }
    }

    pub fn cost(mut self, cost: f32) -> Self {
        self.card.elixir_cost = cost;
        self
    }

    pub fn kind(mut self, kind: CardKind) -> Self {
        self.card.kind = kind;
        self
    }

    pub fn tags(mut self, tags: &[&str]) -> Self {
        self.card.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn build(self) -> Card {
        self.card
    }
}

/// The eight-card reference deck: a2 swarm, b8 win, c4/d4 spell, e3 air,
/// f2 untagged, g5 building, h3 support.
pub fn reference_cards() -> Vec<Card> {
    vec![
        CardBuilder::new("a").cost(2.0).tags(&["swarm"]).build(),
        CardBuilder::new("b").cost(8.0).tags(&["win"]).build(),
        CardBuilder::new("c").cost(4.0).tags(&["spell"]).build(),
        CardBuilder::new("d").cost(4.0).tags(&["spell"]).build(),
        CardBuilder::new("e").cost(3.0).tags(&["air"]).build(),
        CardBuilder::new("f").cost(2.0).build(),
        CardBuilder::new("g").cost(5.0).tags(&["building"]).build(),
        CardBuilder::new("h").cost(3.0).tags(&["support"]).build(),
    ]
}

/// Reference cards plus `x`, an untagged 8-cost card.
pub fn reference_catalog_with_filler() -> Catalog {
    let mut cards = reference_cards();
    cards.push(CardBuilder::new("x").cost(8.0).build());
    Catalog::new(cards)
}

/// Reference deck with the win condition `b` swapped for filler `x` (scores 59).
pub fn deck_without_win(catalog: &Catalog) -> Deck {
    deck_from_ids(catalog, &["a", "x", "c", "d", "e", "f", "g", "h"])
}

pub fn deck_from_ids(catalog: &Catalog, ids: &[&str]) -> Deck {
    let code = ids.join(",");
    Deck::from_share_code(&code, catalog).expect("fixture ids must resolve")
}

pub fn card_refs(catalog: &Catalog) -> Vec<CardRef> {
    catalog.cards().to_vec()
}

pub fn engine(config: &Config) -> Arc<SuggestionEngine> {
    Arc::new(build_engine(config))
}

pub fn engine_with_limit(max_suggestions: usize, parallel: bool) -> Arc<SuggestionEngine> {
    let mut config = Config::default();
    config.engine.max_suggestions = max_suggestions;
    config.engine.parallel_search = parallel;
    engine(&config)
}
