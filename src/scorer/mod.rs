pub mod combat;
pub mod composite;
pub mod metrics;
pub mod synergy;
pub mod types;

pub use self::types::{Evaluation, Metrics, MetricsReport};
use crate::catalog::Card;
use crate::config::{Config, ScoringWeights, SynergyRules};
use crate::consts::DECK_SIZE;
use crate::deck::Deck;

/// Stateless evaluation pipeline: metrics, then composite score.
///
/// Every method is a pure function of the cards passed in, so one `Scorer`
/// can be shared across threads and sessions.
#[derive(Debug, Clone, Default)]
pub struct Scorer {
    pub weights: ScoringWeights,
    pub synergy: SynergyRules,
}

impl Scorer {
    pub fn new(weights: ScoringWeights, synergy: SynergyRules) -> Self {
        Self { weights, synergy }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.weights.clone(), config.synergy.clone())
    }

    /// Computes every metric over `cards`. Defined for any slice; the
    /// composite score only uses it on complete decks.
    pub fn metrics(&self, cards: &[&Card]) -> Metrics {
        let elixir = metrics::elixir_stats(cards);
        let roles = metrics::role_counts(cards);
        let combat = combat::offense_defense(cards);

        Metrics {
            elixir,
            roles,
            coverage: metrics::role_coverage(&roles),
            synergy: synergy::pairwise_synergy(cards, &self.synergy),
            elixir_fitness: metrics::elixir_fitness(elixir.average, self.weights.target_elixir),
            balance_fitness: metrics::balance_fitness(
                elixir.sigma,
                self.weights.balance_sigma_scale,
            ),
            offense: combat.offense,
            defense: combat.defense,
            cycle_speed: metrics::cycle_speed(&elixir),
        }
    }

    /// Full pass over a complete deck. `None` unless exactly eight cards.
    pub fn evaluate(&self, cards: &[&Card]) -> Option<Evaluation> {
        if cards.len() != DECK_SIZE {
            return None;
        }
        let metrics = self.metrics(cards);
        Some(Evaluation {
            score: composite::composite_score(&metrics, &self.weights),
            metrics,
            preset: self.weights.preset,
        })
    }

    /// Composite score only. `None` is the "no score" marker.
    #[inline]
    pub fn score(&self, cards: &[&Card]) -> Option<u8> {
        if cards.len() != DECK_SIZE {
            return None;
        }
        Some(composite::composite_score(&self.metrics(cards), &self.weights))
    }

    /// Hot-path score for a known-complete deck.
    #[inline]
    pub fn score_complete(&self, cards: &[&Card; DECK_SIZE]) -> u8 {
        composite::composite_score(&self.metrics(cards), &self.weights)
    }

    pub fn evaluate_deck(&self, deck: &Deck) -> Option<Evaluation> {
        let cards = deck.complete_cards()?;
        self.evaluate(&cards)
    }
}
