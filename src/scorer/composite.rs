use super::types::Metrics;
use crate::config::{ScoringPreset, ScoringWeights};

/// Baseline synergy term: raw synergy mapped through `(raw + 1) / 2`.
#[inline]
pub fn synergy_fraction(raw_synergy: f32) -> f32 {
    ((raw_synergy + 1.0) / 2.0).clamp(0.0, 1.0)
}

#[inline]
fn finish(points: f64) -> u8 {
    if !points.is_finite() {
        return 0;
    }
    points.round().clamp(0.0, 100.0) as u8
}

/// Weighted sum accumulated in f64 so half-point totals round consistently.
#[inline]
fn weighted_sum(terms: &[(f32, f32)]) -> f64 {
    terms
        .iter()
        .map(|&(weight, value)| f64::from(weight) * f64::from(value))
        .sum()
}

/// Role coverage, curve fitness and synergy, weighted in points.
pub fn baseline_score(m: &Metrics, w: &ScoringWeights) -> u8 {
    let points = weighted_sum(&[
        (w.weight_win, m.coverage.win_present),
        (w.weight_spell, m.coverage.spell_coverage),
        (w.weight_air, m.coverage.air_coverage),
        (w.weight_swarm, m.coverage.swarm_coverage),
        (w.weight_elixir, m.elixir_fitness),
        (w.weight_balance, m.balance_fitness),
        (w.weight_synergy, synergy_fraction(m.synergy)),
    ]);
    finish(points)
}

/// Offense, defense, synergy, cycle and win condition, weighted as fractions.
pub fn blended_score(m: &Metrics, w: &ScoringWeights) -> u8 {
    let fraction = weighted_sum(&[
        (w.blend_offense, m.offense),
        (w.blend_defense, m.defense),
        (w.blend_synergy, m.synergy),
        (w.blend_cycle, m.cycle_speed),
        (w.blend_win, m.coverage.win_present),
    ]);
    finish(fraction * 100.0)
}

pub fn composite_score(m: &Metrics, w: &ScoringWeights) -> u8 {
    match w.preset {
        ScoringPreset::Baseline => baseline_score(m, w),
        ScoringPreset::Blended => blended_score(m, w),
    }
}
