use crate::consts::CSV_TAG_SEPARATOR;
use crate::error::{DeckForgeError, DfResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use strum_macros::{Display, EnumIter, EnumString};
use tracing::{debug, info, warn};

/// Shared handle to an immutable catalog card.
pub type CardRef = Arc<Card>;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, EnumIter,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum CardKind {
    #[default]
    Troop,
    Spell,
    Building,
    Hero,
    Unknown,
}

impl From<String> for CardKind {
    fn from(raw: String) -> Self {
        raw.trim().parse().unwrap_or(CardKind::Unknown)
    }
}

impl From<CardKind> for String {
    fn from(kind: CardKind) -> Self {
        kind.to_string()
    }
}

// Unrecognised type strings degrade to `Unknown` instead of failing the load.
impl Serialize for CardKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for CardKind {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Null => CardKind::default(),
            Value::String(raw) => CardKind::from(raw),
            _ => CardKind::Unknown,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    #[serde(default, deserialize_with = "lenient_text")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(default, alias = "elixir", deserialize_with = "lenient_cost")]
    pub elixir_cost: f32,
    #[serde(default, rename = "type")]
    pub kind: CardKind,
    #[serde(default, deserialize_with = "lenient_tags")]
    pub tags: BTreeSet<String>,
}

/// Costs are finite and non-negative; anything else counts as 0.
pub fn sanitize_cost(raw: f32) -> f32 {
    if raw.is_finite() {
        raw.max(0.0)
    } else {
        0.0
    }
}

fn normalize_tag(raw: &str) -> Option<String> {
    let tag = raw.trim().to_ascii_lowercase();
    (!tag.is_empty()).then_some(tag)
}

// Card fields accept any JSON shape: numbers and numeric strings are
// interchangeable, and whatever cannot be read falls back to the default.

fn lenient_text<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

fn lenient_cost<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<f32, D::Error> {
    let raw = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64().map(|c| c as f32),
        Value::String(s) => s.trim().parse::<f32>().ok(),
        _ => None,
    };
    Ok(raw.map(sanitize_cost).unwrap_or(0.0))
}

fn lenient_tags<'de, D: serde::Deserializer<'de>>(
    deserializer: D,
) -> Result<BTreeSet<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .filter_map(normalize_tag)
            .collect(),
        Value::String(s) => s
            .split(CSV_TAG_SEPARATOR)
            .filter_map(normalize_tag)
            .collect(),
        _ => BTreeSet::new(),
    })
}

impl Card {
    pub fn new(id: &str, name: &str, elixir_cost: f32, kind: CardKind, tags: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            elixir_cost,
            kind,
            tags: tags.iter().map(|t| t.to_ascii_lowercase()).collect(),
        }
    }

    #[inline]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    #[inline]
    pub fn shared_tag_count(&self, other: &Card) -> usize {
        self.tags.intersection(&other.tags).count()
    }

    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

/// Ordered, immutable card collection. Iteration order is load order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    cards: Vec<CardRef>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Builds a catalog, keeping the first card for each id.
    pub fn new(cards: Vec<Card>) -> Self {
        let mut catalog = Catalog::default();
        for card in cards {
            if card.id.trim().is_empty() {
                warn!("Skipping card with empty id ({:?})", card.name);
                continue;
            }
            if catalog.index.contains_key(&card.id) {
                warn!("Duplicate card id '{}' skipped", card.id);
                continue;
            }
            catalog.index.insert(card.id.clone(), catalog.cards.len());
            catalog.cards.push(Arc::new(card));
        }
        catalog
    }

    /// Loads a catalog, choosing the format from the file extension.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> DfResult<Self> {
        let path = path.as_ref();
        let is_csv = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("csv"));

        let file = File::open(path).map_err(|e| {
            DeckForgeError::Config(format!(
                "Could not open catalog at '{}': {}",
                path.display(),
                e
            ))
        })?;

        let catalog = if is_csv {
            Self::from_csv_reader(file)?
        } else {
            Self::from_json_reader(file)?
        };

        info!(
            "Loaded {} cards from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    pub fn from_json_reader<R: Read>(reader: R) -> DfResult<Self> {
        let cards: Vec<Card> = serde_json::from_reader(reader)?;
        Ok(Self::new(cards))
    }

    /// CSV layout: `id,name,elixir,type,tags` with `;`-separated tags.
    /// Short rows are padded with defaults; unparsable costs become 0.
    pub fn from_csv_reader<R: Read>(reader: R) -> DfResult<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut cards = Vec::new();
        let mut defaulted = 0;

        for (row_idx, result) in rdr.records().enumerate() {
            let rec = result?;
            let id = rec.get(0).unwrap_or_default();
            if id.is_empty() {
                debug!("[Row {}] missing id, skipped", row_idx + 1);
                continue;
            }

            let elixir_cost = match rec.get(2).map(str::parse::<f32>) {
                Some(Ok(c)) if c.is_finite() => sanitize_cost(c),
                _ => {
                    defaulted += 1;
                    0.0
                }
            };

            let tags = rec
                .get(4)
                .unwrap_or_default()
                .split(CSV_TAG_SEPARATOR)
                .filter_map(normalize_tag)
                .collect();

            cards.push(Card {
                id: id.to_string(),
                name: rec.get(1).unwrap_or_default().to_string(),
                elixir_cost,
                kind: CardKind::from(rec.get(3).unwrap_or_default().to_string()),
                tags,
            });
        }

        if defaulted > 0 {
            warn!("{} catalog rows had no usable elixir cost; using 0", defaulted);
        }

        Ok(Self::new(cards))
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&CardRef> {
        self.index.get(id).map(|&i| &self.cards[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CardRef> {
        self.cards.iter()
    }

    pub fn cards(&self) -> &[CardRef] {
        &self.cards
    }
}
