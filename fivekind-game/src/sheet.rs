//! Per-player score sheets.
use serde::{Deserialize, Serialize};
use std::ops::Index;

use crate::category::{CATEGORY_COUNT, Category};
use crate::state::PlayerId;

/// One slot per category; `None` means the box is still open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CategoryScores([Option<u16>; CATEGORY_COUNT]);

impl CategoryScores {
    /// A card with every box open.
    #[must_use]
    pub const fn empty() -> Self {
        Self([None; CATEGORY_COUNT])
    }

    #[must_use]
    pub const fn get(&self, category: Category) -> Option<u16> {
        self.0[category.index()]
    }

    #[must_use]
    pub const fn is_filled(&self, category: Category) -> bool {
        self.get(category).is_some()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.0.iter().all(Option::is_some)
    }

    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.0.iter().filter(|slot| slot.is_some()).count()
    }

    /// Open categories in scorecard order.
    pub fn open_categories(&self) -> impl Iterator<Item = Category> + '_ {
        Category::ALL
            .into_iter()
            .filter(|category| !self.is_filled(*category))
    }

    /// Iterate `(category, slot)` pairs in scorecard order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, Option<u16>)> + '_ {
        Category::ALL.into_iter().zip(self.0.iter().copied())
    }

    /// Write a box only if it is still open. Returns whether the write landed.
    pub fn fill(&mut self, category: Category, value: u16) -> bool {
        let slot = &mut self.0[category.index()];
        if slot.is_some() {
            return false;
        }
        *slot = Some(value);
        true
    }
}

impl Index<Category> for CategoryScores {
    type Output = Option<u16>;

    fn index(&self, category: Category) -> &Self::Output {
        &self.0[category.index()]
    }
}

impl FromIterator<(Category, u16)> for CategoryScores {
    fn from_iter<T: IntoIterator<Item = (Category, u16)>>(iter: T) -> Self {
        let mut scores = Self::empty();
        for (category, value) in iter {
            scores.fill(category, value);
        }
        scores
    }
}

/// A player's card plus the number of bonus events they have earned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerScoreSheet {
    pub player_id: PlayerId,
    pub categories: CategoryScores,
    #[serde(default)]
    pub bonus_count: u32,
}

impl PlayerScoreSheet {
    #[must_use]
    pub fn new(player_id: PlayerId) -> Self {
        Self {
            player_id,
            categories: CategoryScores::empty(),
            bonus_count: 0,
        }
    }

    /// Bonus events only count once five of a kind holds its maximum score.
    #[must_use]
    pub fn qualifies_for_bonus(&self) -> bool {
        let qualifier = Category::BONUS_QUALIFIER;
        self.categories.get(qualifier) == Some(qualifier.max_score())
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.categories.is_complete()
    }

    #[must_use]
    pub fn totals(&self) -> crate::PlayerTotals {
        crate::compute_totals(&self.categories, self.bonus_count)
    }
}
