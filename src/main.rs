use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use deckforge::catalog::Catalog;
use deckforge::config::Config;
use std::path::Path;
use std::process;
use std::sync::Arc;
use tracing::{error, info, warn, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(global = true, short, long, default_value = "data/cards.json")]
    catalog: String,

    /// JSON config; flags typed on the command line override it.
    #[arg(global = true, long)]
    config_file: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Evaluate(cmd::evaluate::EvaluateArgs),
    Suggest(cmd::suggest::SuggestArgs),
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    tracing_subscriber::fmt()
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::INFO })
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    info!("📂 Loading Catalog: {}", cli.catalog);
    let catalog = Catalog::load_from_file(&cli.catalog).unwrap_or_else(|e| {
        error!("{}", e);
        process::exit(1);
    });
    if catalog.is_empty() {
        warn!("⚠️  Catalog '{}' is empty.", cli.catalog);
    }
    let catalog = Arc::new(catalog);

    let (cli_config, sub_matches) = match &cli.command {
        Commands::Evaluate(args) => (&args.config, matches.subcommand_matches("evaluate")),
        Commands::Suggest(args) => (&args.config, matches.subcommand_matches("suggest")),
    };

    let config = match &cli.config_file {
        Some(path) if Path::new(path).exists() => {
            info!("⚖️  Loading Config from: {}", path);
            let mut file_config = Config::load_from_file(path).unwrap_or_else(|e| {
                error!("{}", e);
                process::exit(1);
            });
            if let Some(sub) = sub_matches {
                file_config.merge_from_cli(cli_config, sub);
            }
            file_config
        }
        Some(path) => {
            error!("❌ Config file '{}' not found.", path);
            process::exit(1);
        }
        None => cli_config.clone(),
    };

    if let Err(e) = config.validate() {
        error!("{}", e);
        process::exit(1);
    }
    info!("🎯 Scoring preset: {}", config.weights.preset);

    let result = match cli.command {
        Commands::Evaluate(args) => cmd::evaluate::run(args, config, catalog),
        Commands::Suggest(args) => cmd::suggest::run(args, config, catalog),
    };

    if let Err(e) = result {
        error!("❌ {}", e);
        process::exit(1);
    }
}
