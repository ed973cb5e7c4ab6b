use crate::catalog::{CardRef, Catalog};
use crate::config::ScoringPreset;
use crate::deck::{Deck, SlotRejection};
use crate::optimizer::{CancelToken, Suggestion, SuggestionEngine, SuggestionRecord};
use crate::scorer::{Evaluation, MetricsReport};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, warn};

/// Everything published for a complete deck.
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    pub evaluation: Evaluation,
    pub suggestions: Vec<Suggestion>,
}

impl Assessment {
    pub fn score(&self) -> u8 {
        self.evaluation.score
    }

    pub fn report(&self) -> MetricsReport {
        self.evaluation.metrics.report()
    }

    pub fn summary(&self, deck: &Deck) -> AssessmentSummary {
        AssessmentSummary {
            deck: deck.to_share_code(),
            score: Some(self.score()),
            preset: self.evaluation.preset,
            metrics: Some(self.report()),
            suggestions: self.suggestions.iter().map(SuggestionRecord::from).collect(),
        }
    }
}

/// Serializable snapshot of a session. `score` and `metrics` are `None`
/// while the deck is incomplete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentSummary {
    pub deck: String,
    pub score: Option<u8>,
    pub preset: ScoringPreset,
    pub metrics: Option<MetricsReport>,
    pub suggestions: Vec<SuggestionRecord>,
}

/// A suggestion search running on its own thread.
pub struct SuggestionJob {
    revision: u64,
    token: CancelToken,
    handle: JoinHandle<Option<Vec<Suggestion>>>,
}

impl SuggestionJob {
    /// Deck revision the search was started for.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Blocks until the search ends. `None` if it was superseded.
    pub fn wait(self) -> Option<Vec<Suggestion>> {
        match self.handle.join() {
            Ok(result) => result,
            Err(_) => {
                warn!("Suggestion worker panicked");
                None
            }
        }
    }
}

/// Owns one 8-slot deck and republishes its assessment after every mutation.
///
/// Complete decks get a fresh evaluation (and, in eager mode, suggestions);
/// incomplete decks publish nothing. Rejected writes change nothing and
/// publish nothing.
pub struct DeckSession {
    catalog: Arc<Catalog>,
    engine: Arc<SuggestionEngine>,
    deck: Deck,
    published: Option<Assessment>,
    revision: u64,
    eager_suggestions: bool,
    inflight: Option<CancelToken>,
}

impl DeckSession {
    pub fn new(catalog: Arc<Catalog>, engine: Arc<SuggestionEngine>) -> Self {
        Self {
            catalog,
            engine,
            deck: Deck::new(),
            published: None,
            revision: 0,
            eager_suggestions: true,
            inflight: None,
        }
    }

    /// Publish score and metrics only; suggestions arrive through
    /// [`spawn_suggestions`](Self::spawn_suggestions) and
    /// [`publish_suggestions`](Self::publish_suggestions).
    pub fn with_deferred_suggestions(mut self) -> Self {
        self.eager_suggestions = false;
        self
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn published(&self) -> Option<&Assessment> {
        self.published.as_ref()
    }

    pub fn score(&self) -> Option<u8> {
        self.published.as_ref().map(Assessment::score)
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        self.published
            .as_ref()
            .map(|a| a.suggestions.as_slice())
            .unwrap_or(&[])
    }

    /// Bumped on every accepted mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn summary(&self) -> AssessmentSummary {
        match &self.published {
            Some(a) => a.summary(&self.deck),
            None => AssessmentSummary {
                deck: self.deck.to_share_code(),
                score: None,
                preset: self.engine.scorer().weights.preset,
                metrics: None,
                suggestions: Vec::new(),
            },
        }
    }

    /// Places `card` (or empties the slot). Returns `false` if rejected.
    pub fn set_slot(&mut self, index: usize, card: Option<CardRef>) -> bool {
        match self.deck.set_slot(index, card) {
            Ok(()) => {
                self.on_mutation();
                true
            }
            Err(SlotRejection::IndexOutOfRange) => {
                debug!("Rejected write to slot {}: out of range", index);
                false
            }
            Err(SlotRejection::DuplicateCard { occupied_slot }) => {
                debug!(
                    "Rejected write to slot {}: card already in slot {}",
                    index, occupied_slot
                );
                false
            }
        }
    }

    /// As [`set_slot`](Self::set_slot), resolving `id` against the catalog.
    /// Unknown ids are rejected.
    pub fn set_slot_by_id(&mut self, index: usize, id: Option<&str>) -> bool {
        let card = match id {
            Some(id) => match self.catalog.get(id) {
                Some(card) => Some(card.clone()),
                None => {
                    debug!("Rejected write to slot {}: unknown card '{}'", index, id);
                    return false;
                }
            },
            None => None,
        };
        self.set_slot(index, card)
    }

    pub fn clear(&mut self) {
        self.deck.clear();
        self.on_mutation();
    }

    /// Replaces the whole deck in one mutation (e.g. a decoded share code).
    pub fn load_deck(&mut self, deck: Deck) {
        self.deck = deck;
        self.on_mutation();
    }

    /// Applies a suggestion if the deck still matches it. Only the suggested
    /// slot changes.
    pub fn apply_suggestion(&mut self, suggestion: &Suggestion) -> bool {
        let still_current = self
            .deck
            .slot(suggestion.slot_index)
            .is_some_and(|c| c.id == suggestion.replaced_card.id);
        if !still_current {
            debug!("Stale suggestion for slot {} ignored", suggestion.slot_index);
            return false;
        }
        self.set_slot(
            suggestion.slot_index,
            Some(suggestion.candidate_card.clone()),
        )
    }

    /// Starts a background search for the current deck, superseding any
    /// search already in flight. `None` while the deck is incomplete.
    pub fn spawn_suggestions(&mut self) -> Option<SuggestionJob> {
        if !self.deck.is_complete() {
            return None;
        }
        self.cancel_inflight();

        let token = CancelToken::new();
        self.inflight = Some(token.clone());

        let deck = self.deck.clone();
        let catalog = Arc::clone(&self.catalog);
        let engine = Arc::clone(&self.engine);
        let worker_token = token.clone();
        let handle =
            thread::spawn(move || engine.suggest_with_cancel(&deck, &catalog, &worker_token));

        Some(SuggestionJob {
            revision: self.revision,
            token,
            handle,
        })
    }

    /// Publishes background results if they belong to the current revision.
    pub fn publish_suggestions(&mut self, revision: u64, suggestions: Vec<Suggestion>) -> bool {
        if revision != self.revision {
            debug!(
                "Dropping suggestions for revision {} (current {})",
                revision, self.revision
            );
            return false;
        }
        match self.published.as_mut() {
            Some(assessment) => {
                assessment.suggestions = suggestions;
                self.inflight = None;
                true
            }
            None => false,
        }
    }

    fn cancel_inflight(&mut self) {
        if let Some(token) = self.inflight.take() {
            token.cancel();
        }
    }

    fn on_mutation(&mut self) {
        self.revision += 1;
        self.cancel_inflight();

        self.published = self.engine.scorer().evaluate_deck(&self.deck).map(|evaluation| {
            let suggestions = if self.eager_suggestions {
                self.engine.suggest(&self.deck, &self.catalog)
            } else {
                Vec::new()
            };
            Assessment {
                evaluation,
                suggestions,
            }
        });

        match &self.published {
            Some(a) => debug!(
                "Deck r{} complete: score {} ({} suggestions)",
                self.revision,
                a.score(),
                a.suggestions.len()
            ),
            None => debug!(
                "Deck r{} incomplete ({}/8)",
                self.revision,
                self.deck.filled()
            ),
        }
    }
}
