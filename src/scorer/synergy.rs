use crate::catalog::{Card, CardKind};
use crate::config::{SynergyMode, SynergyRules};
use crate::consts::TAG_EVOLUTION;

/// Compatibility of two cards, in [0,1].
///
/// In `FirstMatch` mode the evolution bonus shadows the hero bonus, which in
/// turn shadows the shared-tag bonus. `Additive` sums whichever apply.
#[inline]
pub fn pair_synergy(a: &Card, b: &Card, rules: &SynergyRules) -> f32 {
    let evolution = a.has_tag(TAG_EVOLUTION) || b.has_tag(TAG_EVOLUTION);
    let hero = a.kind == CardKind::Hero || b.kind == CardKind::Hero;
    let shared = || {
        (rules.bonus_shared_tag * a.shared_tag_count(b) as f32).min(rules.max_shared_tag_bonus)
    };

    let value = match rules.mode {
        SynergyMode::FirstMatch => {
            if evolution {
                rules.bonus_evolution
            } else if hero {
                rules.bonus_hero
            } else {
                shared()
            }
        }
        SynergyMode::Additive => {
            let mut sum = shared();
            if evolution {
                sum += rules.bonus_evolution;
            }
            if hero {
                sum += rules.bonus_hero;
            }
            sum
        }
    };
    value.clamp(0.0, 1.0)
}

/// Mean pair synergy over every unordered pair of distinct slots, in [0,1].
/// Fewer than two cards have no pairs and score 0.
pub fn pairwise_synergy(cards: &[&Card], rules: &SynergyRules) -> f32 {
    let mut total = 0.0;
    let mut pairs = 0usize;
    for (i, a) in cards.iter().enumerate() {
        for b in &cards[i + 1..] {
            total += pair_synergy(a, b, rules);
            pairs += 1;
        }
    }
    if pairs == 0 {
        return 0.0;
    }
    (total / pairs as f32).clamp(0.0, 1.0)
}
