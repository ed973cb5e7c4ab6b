pub mod cancel;

pub use self::cancel::CancelToken;

use crate::catalog::{Card, CardRef, Catalog};
use crate::config::Config;
use crate::consts::{DECK_SIZE, DEFAULT_MAX_SUGGESTIONS, DEFAULT_SUGGESTION_THRESHOLD};
use crate::deck::Deck;
use crate::scorer::Scorer;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct SuggestionOptions {
    /// Minimum score gain for a swap to qualify.
    pub threshold: i32,
    pub max_suggestions: usize,
    /// Scan slots on the rayon pool. Result order is identical either way.
    pub parallel: bool,
}

impl Default for SuggestionOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_SUGGESTION_THRESHOLD,
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
            parallel: true,
        }
    }
}

impl From<&Config> for SuggestionOptions {
    fn from(cfg: &Config) -> Self {
        Self {
            threshold: cfg.engine.suggestion_threshold,
            max_suggestions: cfg.engine.max_suggestions,
            parallel: cfg.engine.parallel_search,
        }
    }
}

/// A single-slot swap that raises the composite score.
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    pub slot_index: usize,
    pub replaced_card: CardRef,
    pub candidate_card: CardRef,
    pub score_delta: i32,
    pub new_score: u8,
}

/// Id-only form of [`Suggestion`] for hosts and JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionRecord {
    pub slot_index: usize,
    pub replaced_card_id: String,
    pub candidate_card_id: String,
    pub score_delta: i32,
    pub new_score: u8,
}

impl From<&Suggestion> for SuggestionRecord {
    fn from(s: &Suggestion) -> Self {
        Self {
            slot_index: s.slot_index,
            replaced_card_id: s.replaced_card.id.clone(),
            candidate_card_id: s.candidate_card.id.clone(),
            score_delta: s.score_delta,
            new_score: s.new_score,
        }
    }
}

/// Brute-force search over the single-swap neighborhood of a deck.
///
/// Every (slot, candidate) pair is scored with the full pipeline; candidates
/// are catalog cards not already in the deck, visited in catalog order.
pub struct SuggestionEngine {
    scorer: Arc<Scorer>,
    options: SuggestionOptions,
}

impl SuggestionEngine {
    pub fn new(scorer: Arc<Scorer>, options: SuggestionOptions) -> Self {
        Self { scorer, options }
    }

    pub fn scorer(&self) -> &Arc<Scorer> {
        &self.scorer
    }

    pub fn options(&self) -> &SuggestionOptions {
        &self.options
    }

    /// Ranked suggestions for `deck`. Empty for incomplete decks.
    pub fn suggest(&self, deck: &Deck, catalog: &Catalog) -> Vec<Suggestion> {
        self.suggest_with_cancel(deck, catalog, &CancelToken::new())
            .unwrap_or_default()
    }

    /// As [`suggest`](Self::suggest), but returns `None` once `token` is cancelled.
    pub fn suggest_with_cancel(
        &self,
        deck: &Deck,
        catalog: &Catalog,
        token: &CancelToken,
    ) -> Option<Vec<Suggestion>> {
        let Some(cards) = deck.complete_cards() else {
            return Some(Vec::new());
        };
        let base = self.scorer.score_complete(&cards);

        let candidates: Vec<&CardRef> = catalog.iter().filter(|c| !deck.contains(&c.id)).collect();
        if candidates.is_empty() {
            debug!("No swap candidates outside the deck");
            return Some(Vec::new());
        }

        let scan = |slot: usize| self.scan_slot(deck, &cards, slot, &candidates, base, token);
        let per_slot: Option<Vec<Vec<Suggestion>>> = if self.options.parallel {
            (0..DECK_SIZE).into_par_iter().map(scan).collect()
        } else {
            (0..DECK_SIZE).map(scan).collect()
        };

        let Some(per_slot) = per_slot else {
            debug!("Suggestion search cancelled");
            return None;
        };

        // Stable: equal deltas keep slot-major, catalog-minor order.
        let mut found: Vec<Suggestion> = per_slot.into_iter().flatten().collect();
        found.sort_by(|a, b| b.score_delta.cmp(&a.score_delta));

        debug!(
            "Suggestion search: base {} | {} trials | {} above threshold",
            base,
            DECK_SIZE * candidates.len(),
            found.len()
        );

        found.truncate(self.options.max_suggestions);
        Some(found)
    }

    fn scan_slot(
        &self,
        deck: &Deck,
        cards: &[&Card; DECK_SIZE],
        slot: usize,
        candidates: &[&CardRef],
        base: u8,
        token: &CancelToken,
    ) -> Option<Vec<Suggestion>> {
        let replaced = deck.slot(slot)?;
        let mut trial = *cards;
        let mut hits = Vec::new();

        for &candidate in candidates {
            if token.is_cancelled() {
                return None;
            }
            trial[slot] = candidate.as_ref();
            let trial_score = self.scorer.score_complete(&trial);
            let delta = trial_score as i32 - base as i32;
            if delta >= self.options.threshold {
                hits.push(Suggestion {
                    slot_index: slot,
                    replaced_card: replaced.clone(),
                    candidate_card: candidate.clone(),
                    score_delta: delta,
                    new_score: trial_score,
                });
            }
        }
        Some(hits)
    }
}
