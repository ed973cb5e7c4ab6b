use crate::consts::{DEFAULT_MAX_SUGGESTIONS, DEFAULT_SUGGESTION_THRESHOLD, DEFAULT_TARGET_ELIXIR};
use crate::error::{DeckForgeError, DfResult};
use clap::{parser::ValueSource, ArgMatches, Args, ValueEnum};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use strum_macros::{Display, EnumIter, EnumString};

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    #[command(flatten)]
    pub engine: EngineParams,
    #[command(flatten)]
    pub weights: ScoringWeights,
    #[command(flatten)]
    pub synergy: SynergyRules,
}

/// Which composite formula turns metrics into the 0..=100 score.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    ValueEnum,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ScoringPreset {
    /// Role coverage + elixir curve + synergy (weights sum to 100).
    #[default]
    Baseline,
    /// Offense/defense/synergy/cycle/win-condition blend.
    Blended,
}

/// How the three pair-synergy rules combine for one pair of cards.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    ValueEnum,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SynergyMode {
    /// Evolution, then hero, then shared tags. First matching rule wins.
    #[default]
    FirstMatch,
    /// Every matching rule contributes.
    Additive,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineParams {
    #[arg(long, default_value_t = DEFAULT_SUGGESTION_THRESHOLD)]
    pub suggestion_threshold: i32,
    #[arg(long, default_value_t = DEFAULT_MAX_SUGGESTIONS)]
    pub max_suggestions: usize,
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub parallel_search: bool,
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            suggestion_threshold: DEFAULT_SUGGESTION_THRESHOLD,
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
            parallel_search: true,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    #[arg(long, value_enum, default_value_t = ScoringPreset::Baseline)]
    pub preset: ScoringPreset,

    // === BASELINE (points, sum to 100) ===
    #[arg(long, default_value_t = 30.0)]
    pub weight_win: f32,
    #[arg(long, default_value_t = 15.0)]
    pub weight_spell: f32,
    #[arg(long, default_value_t = 10.0)]
    pub weight_air: f32,
    #[arg(long, default_value_t = 10.0)]
    pub weight_swarm: f32,
    #[arg(long, default_value_t = 15.0)]
    pub weight_elixir: f32,
    #[arg(long, default_value_t = 10.0)]
    pub weight_balance: f32,
    #[arg(long, default_value_t = 10.0)]
    pub weight_synergy: f32,

    // === CURVE ===
    #[arg(long, default_value_t = DEFAULT_TARGET_ELIXIR)]
    pub target_elixir: f32,
    #[arg(long, default_value_t = 3.0)]
    pub balance_sigma_scale: f32,

    // === BLENDED (fractions, sum to 1) ===
    #[arg(long, default_value_t = 0.25)]
    pub blend_offense: f32,
    #[arg(long, default_value_t = 0.25)]
    pub blend_defense: f32,
    #[arg(long, default_value_t = 0.20)]
    pub blend_synergy: f32,
    #[arg(long, default_value_t = 0.15)]
    pub blend_cycle: f32,
    #[arg(long, default_value_t = 0.15)]
    pub blend_win: f32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            preset: ScoringPreset::Baseline,
            weight_win: 30.0,
            weight_spell: 15.0,
            weight_air: 10.0,
            weight_swarm: 10.0,
            weight_elixir: 15.0,
            weight_balance: 10.0,
            weight_synergy: 10.0,
            target_elixir: DEFAULT_TARGET_ELIXIR,
            balance_sigma_scale: 3.0,
            blend_offense: 0.25,
            blend_defense: 0.25,
            blend_synergy: 0.20,
            blend_cycle: 0.15,
            blend_win: 0.15,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SynergyRules {
    #[arg(long = "synergy-mode", value_enum, default_value_t = SynergyMode::FirstMatch)]
    pub mode: SynergyMode,
    #[arg(long, default_value_t = 0.18)]
    pub bonus_evolution: f32,
    #[arg(long, default_value_t = 0.22)]
    pub bonus_hero: f32,
    #[arg(long, default_value_t = 0.12)]
    pub bonus_shared_tag: f32,
    #[arg(long, default_value_t = 0.35)]
    pub max_shared_tag_bonus: f32,
}

impl Default for SynergyRules {
    fn default() -> Self {
        Self {
            mode: SynergyMode::FirstMatch,
            bonus_evolution: 0.18,
            bonus_hero: 0.22,
            bonus_shared_tag: 0.12,
            max_shared_tag_bonus: 0.35,
        }
    }
}

impl ScoringWeights {
    pub fn baseline_total(&self) -> f32 {
        self.weight_win
            + self.weight_spell
            + self.weight_air
            + self.weight_swarm
            + self.weight_elixir
            + self.weight_balance
            + self.weight_synergy
    }

    pub fn blend_total(&self) -> f32 {
        self.blend_offense + self.blend_defense + self.blend_synergy + self.blend_cycle + self.blend_win
    }
}

impl Config {
    /// Reads a JSON config. Missing sections and fields keep their defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> DfResult<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> DfResult<()> {
        if self.weights.target_elixir <= 0.0 {
            return Err(DeckForgeError::Config(format!(
                "target_elixir must be positive, got {}",
                self.weights.target_elixir
            )));
        }
        if self.weights.balance_sigma_scale <= 0.0 {
            return Err(DeckForgeError::Config(format!(
                "balance_sigma_scale must be positive, got {}",
                self.weights.balance_sigma_scale
            )));
        }
        if self.engine.suggestion_threshold < 1 {
            return Err(DeckForgeError::Config(
                "suggestion_threshold must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Overlays values the user typed on the command line onto `self`,
    /// leaving file-provided values alone where the CLI only had defaults.
    pub fn merge_from_cli(&mut self, cli: &Config, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($section:ident . $field:ident, $arg_name:expr) => {
                if matches.value_source($arg_name) == Some(ValueSource::CommandLine) {
                    self.$section.$field = cli.$section.$field.clone();
                }
            };
        }

        update_if_present!(engine.suggestion_threshold, "suggestion_threshold");
        update_if_present!(engine.max_suggestions, "max_suggestions");
        update_if_present!(engine.parallel_search, "parallel_search");

        update_if_present!(weights.preset, "preset");
        update_if_present!(weights.weight_win, "weight_win");
        update_if_present!(weights.weight_spell, "weight_spell");
        update_if_present!(weights.weight_air, "weight_air");
        update_if_present!(weights.weight_swarm, "weight_swarm");
        update_if_present!(weights.weight_elixir, "weight_elixir");
        update_if_present!(weights.weight_balance, "weight_balance");
        update_if_present!(weights.weight_synergy, "weight_synergy");
        update_if_present!(weights.target_elixir, "target_elixir");
        update_if_present!(weights.balance_sigma_scale, "balance_sigma_scale");
        update_if_present!(weights.blend_offense, "blend_offense");
        update_if_present!(weights.blend_defense, "blend_defense");
        update_if_present!(weights.blend_synergy, "blend_synergy");
        update_if_present!(weights.blend_cycle, "blend_cycle");
        update_if_present!(weights.blend_win, "blend_win");

        update_if_present!(synergy.mode, "mode");
        update_if_present!(synergy.bonus_evolution, "bonus_evolution");
        update_if_present!(synergy.bonus_hero, "bonus_hero");
        update_if_present!(synergy.bonus_shared_tag, "bonus_shared_tag");
        update_if_present!(synergy.max_shared_tag_bonus, "max_shared_tag_bonus");
    }
}
