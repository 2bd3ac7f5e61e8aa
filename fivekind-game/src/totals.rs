//! Derived per-player totals. Never stored; recomputed from a sheet on demand.
use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::constants::{BONUS_EVENT_VALUE, UPPER_BONUS_THRESHOLD, UPPER_BONUS_VALUE};
use crate::sheet::CategoryScores;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerTotals {
    pub upper_subtotal: u32,
    pub upper_bonus: u32,
    pub upper_total: u32,
    pub lower_total: u32,
    pub bonus_total: u32,
    pub grand_total: u32,
}

fn section_sum(scores: &CategoryScores, categories: &[Category]) -> u32 {
    categories
        .iter()
        .map(|category| u32::from(scores.get(*category).unwrap_or(0)))
        .sum()
}

/// Compute subtotal, bonus and grand totals. Open boxes count as zero.
#[must_use]
pub fn compute_totals(scores: &CategoryScores, bonus_event_count: u32) -> PlayerTotals {
    let upper_subtotal = section_sum(scores, &Category::UPPER);
    let upper_bonus = if upper_subtotal >= u32::from(UPPER_BONUS_THRESHOLD) {
        u32::from(UPPER_BONUS_VALUE)
    } else {
        0
    };
    let upper_total = upper_subtotal + upper_bonus;
    let lower_total = section_sum(scores, &Category::LOWER);
    let bonus_total = bonus_event_count.saturating_mul(u32::from(BONUS_EVENT_VALUE));
    PlayerTotals {
        upper_subtotal,
        upper_bonus,
        upper_total,
        lower_total,
        bonus_total,
        grand_total: upper_total + lower_total + bonus_total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(entries: &[(Category, u16)]) -> CategoryScores {
        entries.iter().copied().collect()
    }

    #[test]
    fn empty_card_totals_zero() {
        assert_eq!(
            compute_totals(&CategoryScores::empty(), 0),
            PlayerTotals::default()
        );
    }

    #[test]
    fn upper_bonus_threshold_is_inclusive() {
        // 3 + 6 + 9 + 12 + 15 + 18 = 63
        let at_threshold = card(&[
            (Category::Ones, 3),
            (Category::Twos, 6),
            (Category::Threes, 9),
            (Category::Fours, 12),
            (Category::Fives, 15),
            (Category::Sixes, 18),
        ]);
        let totals = compute_totals(&at_threshold, 0);
        assert_eq!(totals.upper_subtotal, 63);
        assert_eq!(totals.upper_bonus, 35);
        assert_eq!(totals.upper_total, 98);

        // 2 + 6 + 9 + 12 + 15 + 18 = 62
        let below = card(&[
            (Category::Ones, 2),
            (Category::Twos, 6),
            (Category::Threes, 9),
            (Category::Fours, 12),
            (Category::Fives, 15),
            (Category::Sixes, 18),
        ]);
        let totals = compute_totals(&below, 0);
        assert_eq!(totals.upper_subtotal, 62);
        assert_eq!(totals.upper_bonus, 0);
    }

    #[test]
    fn grand_total_adds_sections_and_bonus_events() {
        let scores = card(&[
            (Category::Sixes, 24),
            (Category::FullHouse, 25),
            (Category::FiveOfAKind, 50),
            (Category::Chance, 17),
        ]);
        let totals = compute_totals(&scores, 2);
        assert_eq!(totals.upper_total, 24);
        assert_eq!(totals.lower_total, 92);
        assert_eq!(totals.bonus_total, 200);
        assert_eq!(totals.grand_total, 316);
        assert_eq!(
            totals.grand_total,
            totals.upper_total + totals.lower_total + totals.bonus_total
        );
        assert_eq!(compute_totals(&scores, 2), totals);
    }
}
