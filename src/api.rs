use crate::catalog::Catalog;
use crate::config::Config;
use crate::deck::Deck;
use crate::optimizer::{SuggestionEngine, SuggestionOptions};
use crate::scorer::Scorer;
use crate::session::{AssessmentSummary, DeckSession};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, RwLock};
use tracing::info;

/// Named, independent deck sessions sharing one catalog and engine.
pub struct DeckForgeState {
    pub catalog: RwLock<Arc<Catalog>>,
    pub engine: RwLock<Arc<SuggestionEngine>>,
    pub sessions: RwLock<HashMap<String, DeckSession>>,
}

impl Default for DeckForgeState {
    fn default() -> Self {
        Self::new(Catalog::default(), &Config::default())
    }
}

impl DeckForgeState {
    pub fn new(catalog: Catalog, config: &Config) -> Self {
        Self {
            catalog: RwLock::new(Arc::new(catalog)),
            engine: RwLock::new(Arc::new(build_engine(config))),
            sessions: RwLock::new(HashMap::new()),
        }
    }
}

pub fn build_engine(config: &Config) -> SuggestionEngine {
    SuggestionEngine::new(
        Arc::new(Scorer::from_config(config)),
        SuggestionOptions::from(config),
    )
}

/// Service: swap in a catalog from disk. Existing sessions keep the catalog
/// they were opened with.
pub fn load_catalog(state: &DeckForgeState, catalog_path: &str) -> Result<usize, String> {
    let catalog = Catalog::load_from_file(Path::new(catalog_path)).map_err(|e| e.to_string())?;
    let count = catalog.len();
    let mut guard = state.catalog.write().map_err(|e| e.to_string())?;
    *guard = Arc::new(catalog);
    info!("API: catalog '{}' loaded ({} cards)", catalog_path, count);
    Ok(count)
}

/// Service: replace scoring/search settings for sessions opened afterwards.
pub fn configure(state: &DeckForgeState, config: &Config) -> Result<(), String> {
    config.validate().map_err(|e| e.to_string())?;
    let mut guard = state.engine.write().map_err(|e| e.to_string())?;
    *guard = Arc::new(build_engine(config));
    Ok(())
}

/// Service: open (or reset) a session, optionally seeded from a share code.
pub fn open_session(
    state: &DeckForgeState,
    session_id: &str,
    share_code: Option<&str>,
) -> Result<AssessmentSummary, String> {
    let catalog = state.catalog.read().map_err(|e| e.to_string())?.clone();
    let engine = state.engine.read().map_err(|e| e.to_string())?.clone();

    let mut session = DeckSession::new(catalog, engine);
    if let Some(code) = share_code {
        let deck = Deck::from_share_code(code, session.catalog()).map_err(|e| e.to_string())?;
        session.load_deck(deck);
    }
    let summary = session.summary();

    let mut sessions = state.sessions.write().map_err(|e| e.to_string())?;
    sessions.insert(session_id.to_string(), session);
    Ok(summary)
}

pub fn close_session(state: &DeckForgeState, session_id: &str) -> Result<bool, String> {
    let mut sessions = state.sessions.write().map_err(|e| e.to_string())?;
    Ok(sessions.remove(session_id).is_some())
}

fn with_session<T>(
    state: &DeckForgeState,
    session_id: &str,
    f: impl FnOnce(&mut DeckSession) -> T,
) -> Result<T, String> {
    let mut sessions = state.sessions.write().map_err(|e| e.to_string())?;
    let session = sessions
        .get_mut(session_id)
        .ok_or_else(|| format!("Session '{}' not found. Open it first.", session_id))?;
    Ok(f(session))
}

/// Service: write one slot by card id (`None` empties it). Rejected writes
/// return the unchanged summary.
pub fn set_slot(
    state: &DeckForgeState,
    session_id: &str,
    index: usize,
    card_id: Option<&str>,
) -> Result<AssessmentSummary, String> {
    with_session(state, session_id, |s| {
        s.set_slot_by_id(index, card_id);
        s.summary()
    })
}

pub fn clear_deck(state: &DeckForgeState, session_id: &str) -> Result<AssessmentSummary, String> {
    with_session(state, session_id, |s| {
        s.clear();
        s.summary()
    })
}

/// Service: apply the n-th published suggestion.
pub fn apply_suggestion(
    state: &DeckForgeState,
    session_id: &str,
    rank: usize,
) -> Result<AssessmentSummary, String> {
    with_session(state, session_id, |s| {
        let picked = s.suggestions().get(rank).cloned();
        match picked {
            Some(suggestion) => {
                s.apply_suggestion(&suggestion);
                Ok(s.summary())
            }
            None => Err(format!("No suggestion #{} for session '{}'", rank, session_id)),
        }
    })?
}

pub fn assess(state: &DeckForgeState, session_id: &str) -> Result<AssessmentSummary, String> {
    with_session(state, session_id, |s| s.summary())
}
