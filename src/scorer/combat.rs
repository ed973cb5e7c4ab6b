use crate::catalog::{Card, CardKind};
use crate::consts::{
    COMBAT_NORMALIZER, TAG_AIR, TAG_BUILDING, TAG_CONTROL, TAG_HEAVY, TAG_SPELL, TAG_STUN,
    TAG_SUPPORT, TAG_SWARM, TAG_TANK, TAG_WIN,
};

// Elixir above this adds no further weight.
const COST_CAP: f32 = 10.0;

/// Offense and defense pressure a single card brings, before normalization.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct CombatWeight {
    pub offense: f32,
    pub defense: f32,
}

pub fn card_weight(card: &Card) -> CombatWeight {
    let cost = card.elixir_cost.clamp(0.0, COST_CAP);

    // Heavier cards hit harder; cheap cards still defend.
    let mut offense = cost / COST_CAP;
    let mut defense = cost / (2.0 * COST_CAP) + 0.1;

    match card.kind {
        CardKind::Troop => {
            offense += 0.2;
            defense += 0.2;
        }
        CardKind::Spell => {
            offense += 0.3;
            defense += 0.1;
        }
        CardKind::Building => defense += 0.5,
        CardKind::Hero => {
            offense += 0.4;
            defense += 0.3;
        }
        CardKind::Unknown => {}
    }

    if card.has_tag(TAG_WIN) {
        offense += 0.5;
    }
    if card.has_tag(TAG_TANK) || card.has_tag(TAG_HEAVY) {
        offense += 0.3;
        defense += 0.2;
    }
    if card.has_tag(TAG_SUPPORT) {
        offense += 0.1;
        defense += 0.3;
    }
    if card.has_tag(TAG_CONTROL) || card.has_tag(TAG_STUN) {
        defense += 0.4;
    }
    if card.has_tag(TAG_SWARM) {
        offense += 0.2;
        defense += 0.3;
    }
    if card.has_tag(TAG_AIR) {
        offense += 0.2;
        defense += 0.2;
    }
    if card.has_tag(TAG_BUILDING) {
        defense += 0.3;
    }
    if card.has_tag(TAG_SPELL) {
        offense += 0.2;
    }

    CombatWeight { offense, defense }
}

/// Deck-level offense and defense as fractions in [0,1].
pub fn offense_defense(cards: &[&Card]) -> CombatWeight {
    if cards.is_empty() {
        return CombatWeight::default();
    }
    let total = cards.iter().fold(CombatWeight::default(), |acc, c| {
        let w = card_weight(c);
        CombatWeight {
            offense: acc.offense + w.offense,
            defense: acc.defense + w.defense,
        }
    });
    let norm = cards.len() as f32 * COMBAT_NORMALIZER;
    CombatWeight {
        offense: (total.offense / norm).clamp(0.0, 1.0),
        defense: (total.defense / norm).clamp(0.0, 1.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buildings_lean_defensive() {
        let tower = Card::new("t", "t", 4.0, CardKind::Building, &["building"]);
        let w = card_weight(&tower);
        assert!(w.defense > w.offense);
    }

    #[test]
    fn win_conditions_lean_offensive() {
        let hog = Card::new("h", "h", 4.0, CardKind::Troop, &["win"]);
        let w = card_weight(&hog);
        assert!(w.offense > w.defense);
    }
}
