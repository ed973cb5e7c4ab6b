use super::DeckSource;
use crate::reports;
use clap::Args;
use deckforge::api::build_engine;
use deckforge::catalog::Catalog;
use deckforge::config::Config;
use deckforge::error::DfResult;
use deckforge::optimizer::SuggestionRecord;
use deckforge::session::DeckSession;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct SuggestArgs {
    #[command(flatten)]
    pub config: Config,

    #[command(flatten)]
    pub source: DeckSource,

    /// Apply the best suggestion up to this many times (hill climb).
    #[arg(short, long, default_value_t = 0)]
    pub rounds: usize,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ClimbStep {
    round: usize,
    applied: SuggestionRecord,
    deck: String,
}

pub fn run(args: SuggestArgs, config: Config, catalog: Arc<Catalog>) -> DfResult<()> {
    let deck = args.source.resolve(&catalog)?;
    let engine = Arc::new(build_engine(&config));

    let mut session = DeckSession::new(catalog, engine);
    session.load_deck(deck);
    let start_score = session.score();

    let mut steps = Vec::new();
    for round in 1..=args.rounds {
        let Some(best) = session.suggestions().first().cloned() else {
            info!("No improving swap left after {} round(s)", round - 1);
            break;
        };
        if !session.apply_suggestion(&best) {
            break;
        }
        steps.push(ClimbStep {
            round,
            applied: SuggestionRecord::from(&best),
            deck: session.deck().to_share_code(),
        });
    }

    if args.json {
        let out = serde_json::json!({
            "startScore": start_score,
            "steps": steps,
            "final": session.summary(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if session.score().is_none() {
        println!(
            "\nNo suggestions: deck has {}/8 cards.",
            session.deck().filled()
        );
        return Ok(());
    }

    for step in &steps {
        println!(
            "Round {}: slot {} {} → {} (+{})",
            step.round,
            step.applied.slot_index + 1,
            step.applied.replaced_card_id,
            step.applied.candidate_card_id,
            step.applied.score_delta
        );
    }
    if let (Some(start), Some(end)) = (start_score, session.score()) {
        if !steps.is_empty() {
            println!("Score: {} → {}", start, end);
        }
    }

    reports::print_deck(session.deck());
    if let Some(assessment) = session.published() {
        reports::print_metrics(&assessment.report(), assessment.score(), config.weights.preset);
    }
    reports::print_suggestions(session.suggestions());
    Ok(())
}
