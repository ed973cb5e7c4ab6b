use super::types::{ElixirStats, RoleCounts, RoleCoverage};
use crate::catalog::Card;
use crate::consts::{TAG_AIR, TAG_BUILDING, TAG_SPELL, TAG_SUPPORT, TAG_SWARM, TAG_WIN};

/// Cycle speed reaches zero at this average cost.
const CYCLE_ELIXIR_CEILING: f32 = 4.5;
/// Elixir span over which cycle speed ramps from 0 to 1.
const CYCLE_ELIXIR_SPAN: f32 = 2.0;
/// Sigma at which the cycle steadiness factor reaches zero.
const CYCLE_SIGMA_SCALE: f32 = 2.5;

/// Spells needed for full spell coverage.
const SPELLS_FOR_COVERAGE: f32 = 2.0;

#[inline(always)]
fn clamp01(x: f32) -> f32 {
    x.clamp(0.0, 1.0)
}

/// Arithmetic mean of elixir cost. Zero for an empty slice.
pub fn average_elixir(cards: &[&Card]) -> f32 {
    if cards.is_empty() {
        return 0.0;
    }
    let total: f32 = cards.iter().map(|c| c.elixir_cost).sum();
    total / cards.len() as f32
}

/// Mean and population standard deviation of elixir cost.
pub fn elixir_stats(cards: &[&Card]) -> ElixirStats {
    if cards.is_empty() {
        return ElixirStats::default();
    }
    let average = average_elixir(cards);
    let variance = cards
        .iter()
        .map(|c| {
            let d = c.elixir_cost - average;
            d * d
        })
        .sum::<f32>()
        / cards.len() as f32;

    ElixirStats {
        average,
        sigma: variance.max(0.0).sqrt(),
    }
}

pub fn role_counts(cards: &[&Card]) -> RoleCounts {
    let mut counts = RoleCounts::default();
    for card in cards {
        counts.win += card.has_tag(TAG_WIN) as usize;
        counts.spell += card.has_tag(TAG_SPELL) as usize;
        counts.air += card.has_tag(TAG_AIR) as usize;
        counts.swarm += card.has_tag(TAG_SWARM) as usize;
        counts.support += card.has_tag(TAG_SUPPORT) as usize;
        counts.building += card.has_tag(TAG_BUILDING) as usize;
    }
    counts
}

pub fn role_coverage(counts: &RoleCounts) -> RoleCoverage {
    RoleCoverage {
        win_present: if counts.win > 0 { 1.0 } else { 0.0 },
        spell_coverage: (counts.spell as f32 / SPELLS_FOR_COVERAGE).min(1.0),
        air_coverage: (counts.air as f32).min(1.0),
        swarm_coverage: (counts.swarm as f32).min(1.0),
    }
}

/// 1 at `target`, falling linearly to 0 at distance `target`.
pub fn elixir_fitness(average: f32, target: f32) -> f32 {
    if target <= 0.0 {
        return 0.0;
    }
    clamp01(1.0 - (average - target).abs() / target)
}

/// 1 for a flat curve, 0 once sigma reaches `sigma_scale`.
pub fn balance_fitness(sigma: f32, sigma_scale: f32) -> f32 {
    if sigma_scale <= 0.0 {
        return 0.0;
    }
    1.0 - clamp01(sigma / sigma_scale)
}

/// Cheap, steady decks cycle fastest. Fraction in [0,1].
pub fn cycle_speed(stats: &ElixirStats) -> f32 {
    let cheapness = clamp01((CYCLE_ELIXIR_CEILING - stats.average) / CYCLE_ELIXIR_SPAN);
    let steadiness = clamp01(1.0 - stats.sigma / CYCLE_SIGMA_SCALE);
    cheapness * steadiness
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CardKind;

    #[test]
    fn flat_curve_has_zero_sigma() {
        let card = Card::new("x", "x", 3.0, CardKind::Troop, &[]);
        let cards = vec![&card; 8];
        let stats = elixir_stats(&cards);
        assert_eq!(stats.average, 3.0);
        assert_eq!(stats.sigma, 0.0);
    }

    #[test]
    fn empty_input_is_zero() {
        assert_eq!(average_elixir(&[]), 0.0);
        assert_eq!(elixir_stats(&[]), ElixirStats::default());
    }

    #[test]
    fn cycle_speed_bounds() {
        let fast = ElixirStats { average: 2.5, sigma: 0.0 };
        let slow = ElixirStats { average: 4.5, sigma: 0.0 };
        assert_eq!(cycle_speed(&fast), 1.0);
        assert_eq!(cycle_speed(&slow), 0.0);
    }
}
