use crate::catalog::{Card, CardRef, Catalog};
use crate::consts::{DECK_SIZE, SHARE_CODE_SEPARATOR};
use crate::error::{DeckForgeError, DfResult};

/// Eight ordered slots, each empty or holding a distinct catalog card.
///
/// The distinct-id invariant is upheld by every constructor and by
/// [`Deck::set_slot`]; callers cannot reach the slots mutably.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Deck {
    slots: [Option<CardRef>; DECK_SIZE],
}

/// Why a slot write was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotRejection {
    IndexOutOfRange,
    DuplicateCard { occupied_slot: usize },
}

impl Deck {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a deck from up to eight cards, in order. Duplicates are dropped.
    pub fn from_cards<I: IntoIterator<Item = CardRef>>(cards: I) -> Self {
        let mut deck = Self::new();
        for (i, card) in cards.into_iter().take(DECK_SIZE).enumerate() {
            let _ = deck.set_slot(i, Some(card));
        }
        deck
    }

    pub fn slot(&self, index: usize) -> Option<&CardRef> {
        self.slots.get(index).and_then(|s| s.as_ref())
    }

    pub fn slots(&self) -> &[Option<CardRef>; DECK_SIZE] {
        &self.slots
    }

    /// Slot holding the card with `id`, if any.
    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.slots
            .iter()
            .position(|s| s.as_ref().is_some_and(|c| c.id == id))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position_of(id).is_some()
    }

    pub fn filled(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.filled() == DECK_SIZE
    }

    /// Writes one slot. Placing a card already held by another slot, or
    /// writing outside `0..8`, leaves the deck untouched.
    pub fn set_slot(&mut self, index: usize, card: Option<CardRef>) -> Result<(), SlotRejection> {
        if index >= DECK_SIZE {
            return Err(SlotRejection::IndexOutOfRange);
        }
        if let Some(c) = &card {
            if let Some(occupied_slot) = self.position_of(&c.id) {
                if occupied_slot != index {
                    return Err(SlotRejection::DuplicateCard { occupied_slot });
                }
            }
        }
        self.slots[index] = card;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.slots = Default::default();
    }

    /// Borrowed view of all eight cards, or `None` while any slot is empty.
    pub fn complete_cards(&self) -> Option<[&Card; DECK_SIZE]> {
        if !self.is_complete() {
            return None;
        }
        let mut out: [&Card; DECK_SIZE] = [self.slots[0].as_deref()?; DECK_SIZE];
        for (dst, slot) in out.iter_mut().zip(self.slots.iter()) {
            *dst = slot.as_deref()?;
        }
        Some(out)
    }

    pub fn ids(&self) -> Vec<Option<&str>> {
        self.slots
            .iter()
            .map(|s| s.as_ref().map(|c| c.id.as_str()))
            .collect()
    }

    /// Comma-joined card ids in slot order; empty slots become empty fields.
    pub fn to_share_code(&self) -> String {
        let ids: Vec<&str> = self
            .slots
            .iter()
            .map(|s| s.as_ref().map_or("", |c| c.id.as_str()))
            .collect();
        let mut code = ids.join(&SHARE_CODE_SEPARATOR.to_string());
        while code.ends_with(SHARE_CODE_SEPARATOR) {
            code.pop();
        }
        code
    }

    /// Resolves a share code against `catalog`.
    pub fn from_share_code(code: &str, catalog: &Catalog) -> DfResult<Self> {
        let code = code.trim();
        let mut deck = Self::new();
        if code.is_empty() {
            return Ok(deck);
        }

        let fields: Vec<&str> = code.split(SHARE_CODE_SEPARATOR).map(str::trim).collect();
        if fields.len() > DECK_SIZE {
            return Err(DeckForgeError::ShareCode(format!(
                "{} cards listed; a deck holds {}",
                fields.len(),
                DECK_SIZE
            )));
        }

        for (i, id) in fields.iter().enumerate() {
            if id.is_empty() {
                continue;
            }
            let card = catalog
                .get(id)
                .ok_or_else(|| DeckForgeError::UnknownCard(id.to_string()))?;
            deck.set_slot(i, Some(card.clone())).map_err(|_| {
                DeckForgeError::ShareCode(format!("card '{}' appears more than once", id))
            })?;
        }
        Ok(deck)
    }

    /// Draws eight distinct cards. Returns a partial deck if the catalog is smaller.
    pub fn random(catalog: &Catalog, rng: &mut fastrand::Rng) -> Self {
        let mut pool: Vec<CardRef> = catalog.cards().to_vec();
        rng.shuffle(&mut pool);
        Self::from_cards(pool)
    }
}
