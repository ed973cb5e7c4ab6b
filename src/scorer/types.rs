use crate::config::ScoringPreset;
use serde::{Deserialize, Serialize};

/// Mean and population standard deviation of elixir cost.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElixirStats {
    pub average: f32,
    pub sigma: f32,
}

/// How many cards carry each role tag.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleCounts {
    pub win: usize,
    pub spell: usize,
    pub air: usize,
    pub swarm: usize,
    pub support: usize,
    pub building: usize,
}

/// Normalized role sub-scores, each in [0,1].
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoleCoverage {
    pub win_present: f32,
    pub spell_coverage: f32,
    pub air_coverage: f32,
    pub swarm_coverage: f32,
}

/// Unrounded metric bundle for one complete deck. Fractions are in [0,1].
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Metrics {
    pub elixir: ElixirStats,
    pub roles: RoleCounts,
    pub coverage: RoleCoverage,
    pub synergy: f32,
    pub elixir_fitness: f32,
    pub balance_fitness: f32,
    pub offense: f32,
    pub defense: f32,
    pub cycle_speed: f32,
}

/// Public, rounded form of [`Metrics`]: elixir figures to two decimals,
/// everything else as an integer percentage.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsReport {
    pub average_elixir: f32,
    pub sigma: f32,
    pub synergy: u8,
    pub win_present: u8,
    pub spell_coverage: u8,
    pub air_coverage: u8,
    pub swarm_coverage: u8,
    pub elixir_fitness: u8,
    pub balance_fitness: u8,
    pub offense: u8,
    pub defense: u8,
    pub cycle: u8,
    pub roles: RoleCounts,
}

#[inline]
pub fn to_percent(fraction: f32) -> u8 {
    (fraction.clamp(0.0, 1.0) * 100.0).round() as u8
}

#[inline]
pub fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

impl Metrics {
    pub fn report(&self) -> MetricsReport {
        MetricsReport {
            average_elixir: round2(self.elixir.average),
            sigma: round2(self.elixir.sigma),
            synergy: to_percent(self.synergy),
            win_present: to_percent(self.coverage.win_present),
            spell_coverage: to_percent(self.coverage.spell_coverage),
            air_coverage: to_percent(self.coverage.air_coverage),
            swarm_coverage: to_percent(self.coverage.swarm_coverage),
            elixir_fitness: to_percent(self.elixir_fitness),
            balance_fitness: to_percent(self.balance_fitness),
            offense: to_percent(self.offense),
            defense: to_percent(self.defense),
            cycle: to_percent(self.cycle_speed),
            roles: self.roles,
        }
    }
}

/// Result of one evaluation pass over a complete deck.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub metrics: Metrics,
    pub score: u8,
    pub preset: ScoringPreset,
}
