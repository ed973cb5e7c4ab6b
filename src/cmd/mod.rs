pub mod evaluate;
pub mod suggest;

use clap::Args;
use deckforge::catalog::Catalog;
use deckforge::deck::Deck;
use deckforge::error::{DeckForgeError, DfResult};
use tracing::info;

/// Where the deck under test comes from.
#[derive(Args, Debug, Clone)]
pub struct DeckSource {
    /// Share code: comma-separated card ids in slot order.
    #[arg(short, long)]
    pub deck: Option<String>,

    /// Draw eight random cards from the catalog instead.
    #[arg(long, default_value_t = false)]
    pub random: bool,

    #[arg(short = 'S', long)]
    pub seed: Option<u64>,
}

impl DeckSource {
    pub fn resolve(&self, catalog: &Catalog) -> DfResult<Deck> {
        if let Some(code) = &self.deck {
            return Deck::from_share_code(code, catalog);
        }
        if self.random {
            let mut rng = match self.seed {
                Some(s) => fastrand::Rng::with_seed(s),
                None => fastrand::Rng::new(),
            };
            let deck = Deck::random(catalog, &mut rng);
            info!("🎲 Random deck: {}", deck.to_share_code());
            return Ok(deck);
        }
        Err(DeckForgeError::Config(
            "Provide --deck <ids> or --random".to_string(),
        ))
    }
}
