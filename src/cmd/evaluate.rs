use super::DeckSource;
use crate::reports;
use clap::Args;
use deckforge::api::build_engine;
use deckforge::catalog::Catalog;
use deckforge::config::Config;
use deckforge::error::DfResult;
use deckforge::session::DeckSession;
use std::sync::Arc;

#[derive(Args, Debug, Clone)]
pub struct EvaluateArgs {
    #[command(flatten)]
    pub config: Config,

    #[command(flatten)]
    pub source: DeckSource,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: EvaluateArgs, config: Config, catalog: Arc<Catalog>) -> DfResult<()> {
    let deck = args.source.resolve(&catalog)?;
    let engine = Arc::new(build_engine(&config));

    let mut session = DeckSession::new(catalog, engine);
    session.load_deck(deck);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&session.summary())?);
        return Ok(());
    }

    reports::print_deck(session.deck());
    match session.published() {
        Some(assessment) => {
            reports::print_metrics(&assessment.report(), assessment.score(), config.weights.preset);
            reports::print_suggestions(&assessment.suggestions);
        }
        None => println!(
            "\nNo score: deck has {}/8 cards.",
            session.deck().filled()
        ),
    }
    Ok(())
}
