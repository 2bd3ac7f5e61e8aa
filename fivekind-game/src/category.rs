//! Category catalog: the thirteen scoring boxes of the card.
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

use crate::constants::{
    FIVE_OF_A_KIND_SCORE, FULL_HOUSE_SCORE, LARGE_STRAIGHT_SCORE, MAX_DICE_SUM, MIN_DICE_SUM,
    SMALL_STRAIGHT_SCORE,
};
use crate::error::ParseCategoryError;

pub const CATEGORY_COUNT: usize = 13;

/// Legal score values for one category. Sum categories hold 27 entries.
pub type LegalValues = SmallVec<[u16; 32]>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Upper,
    Lower,
}

impl Section {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Upper => "upper",
            Self::Lower => "lower",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How an entry widget should collect a score for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntryKind {
    /// Pick any value from the legal set.
    Picker,
    /// Binary yes/no: zero or the fixed score.
    YesNo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Ones,
    Twos,
    Threes,
    Fours,
    Fives,
    Sixes,
    ThreeOfAKind,
    FourOfAKind,
    FullHouse,
    SmallStraight,
    LargeStraight,
    FiveOfAKind,
    Chance,
}

impl Category {
    /// Every category in scorecard order.
    pub const ALL: [Self; CATEGORY_COUNT] = [
        Self::Ones,
        Self::Twos,
        Self::Threes,
        Self::Fours,
        Self::Fives,
        Self::Sixes,
        Self::ThreeOfAKind,
        Self::FourOfAKind,
        Self::FullHouse,
        Self::SmallStraight,
        Self::LargeStraight,
        Self::FiveOfAKind,
        Self::Chance,
    ];

    pub const UPPER: [Self; 6] = [
        Self::Ones,
        Self::Twos,
        Self::Threes,
        Self::Fours,
        Self::Fives,
        Self::Sixes,
    ];

    pub const LOWER: [Self; 7] = [
        Self::ThreeOfAKind,
        Self::FourOfAKind,
        Self::FullHouse,
        Self::SmallStraight,
        Self::LargeStraight,
        Self::FiveOfAKind,
        Self::Chance,
    ];

    /// The category whose repeat earns bonus events.
    pub const BONUS_QUALIFIER: Self = Self::FiveOfAKind;

    /// Position of this category in [`Category::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ones => "ones",
            Self::Twos => "twos",
            Self::Threes => "threes",
            Self::Fours => "fours",
            Self::Fives => "fives",
            Self::Sixes => "sixes",
            Self::ThreeOfAKind => "threeOfAKind",
            Self::FourOfAKind => "fourOfAKind",
            Self::FullHouse => "fullHouse",
            Self::SmallStraight => "smallStraight",
            Self::LargeStraight => "largeStraight",
            Self::FiveOfAKind => "fiveOfAKind",
            Self::Chance => "chance",
        }
    }

    #[must_use]
    pub const fn section(self) -> Section {
        match self {
            Self::Ones | Self::Twos | Self::Threes | Self::Fours | Self::Fives | Self::Sixes => {
                Section::Upper
            }
            _ => Section::Lower,
        }
    }

    #[must_use]
    pub const fn is_upper(self) -> bool {
        matches!(self.section(), Section::Upper)
    }

    /// Die face counted by an upper category.
    #[must_use]
    pub const fn face(self) -> Option<u16> {
        match self {
            Self::Ones => Some(1),
            Self::Twos => Some(2),
            Self::Threes => Some(3),
            Self::Fours => Some(4),
            Self::Fives => Some(5),
            Self::Sixes => Some(6),
            _ => None,
        }
    }

    /// The single non-zero score of a fixed-score category.
    #[must_use]
    pub const fn fixed_score(self) -> Option<u16> {
        match self {
            Self::FullHouse => Some(FULL_HOUSE_SCORE),
            Self::SmallStraight => Some(SMALL_STRAIGHT_SCORE),
            Self::LargeStraight => Some(LARGE_STRAIGHT_SCORE),
            Self::FiveOfAKind => Some(FIVE_OF_A_KIND_SCORE),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_fixed_score(self) -> bool {
        self.fixed_score().is_some()
    }

    #[must_use]
    pub const fn entry_kind(self) -> EntryKind {
        if self.is_fixed_score() {
            EntryKind::YesNo
        } else {
            EntryKind::Picker
        }
    }

    /// Whether a bonus-event roll may be placed here. Five identical dice
    /// never form a full house or a straight.
    #[must_use]
    pub const fn accepts_bonus_placement(self) -> bool {
        !matches!(
            self,
            Self::FullHouse | Self::SmallStraight | Self::LargeStraight
        )
    }

    #[must_use]
    pub fn meta(self) -> &'static CategoryMeta {
        &CATALOG[self.index()]
    }

    #[must_use]
    pub fn max_score(self) -> u16 {
        self.meta().max_score
    }

    #[must_use]
    pub fn legal_values(self) -> &'static [u16] {
        &self.meta().valid_scores
    }

    /// Membership test against the enumerated legal set; no arithmetic range check.
    #[must_use]
    pub fn is_legal(self, value: u16) -> bool {
        self.legal_values().contains(&value)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}

/// Descriptor rendered by entry widgets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryMeta {
    pub key: Category,
    pub label: &'static str,
    pub short_description: &'static str,
    pub scoring: &'static str,
    pub section: Section,
    pub max_score: u16,
    pub valid_scores: LegalValues,
    pub fixed_score: bool,
}

fn upper_scores(face: u16) -> LegalValues {
    (0..=5).map(|count| face * count).collect()
}

fn sum_scores() -> LegalValues {
    std::iter::once(0)
        .chain(MIN_DICE_SUM..=MAX_DICE_SUM)
        .collect()
}

fn fixed_scores(value: u16) -> LegalValues {
    smallvec::smallvec![0, value]
}

fn describe(
    key: Category,
    label: &'static str,
    short_description: &'static str,
    scoring: &'static str,
) -> CategoryMeta {
    let valid_scores = match (key.face(), key.fixed_score()) {
        (Some(face), _) => upper_scores(face),
        (None, Some(fixed)) => fixed_scores(fixed),
        (None, None) => sum_scores(),
    };
    let max_score = valid_scores.iter().copied().max().unwrap_or(0);
    CategoryMeta {
        key,
        label,
        short_description,
        scoring,
        section: key.section(),
        max_score,
        valid_scores,
        fixed_score: key.is_fixed_score(),
    }
}

static CATALOG: Lazy<[CategoryMeta; CATEGORY_COUNT]> = Lazy::new(|| {
    [
        describe(Category::Ones, "Ones", "Sum of all 1s", "Count and add only Ones."),
        describe(Category::Twos, "Twos", "Sum of all 2s", "Count and add only Twos."),
        describe(Category::Threes, "Threes", "Sum of all 3s", "Count and add only Threes."),
        describe(Category::Fours, "Fours", "Sum of all 4s", "Count and add only Fours."),
        describe(Category::Fives, "Fives", "Sum of all 5s", "Count and add only Fives."),
        describe(Category::Sixes, "Sixes", "Sum of all 6s", "Count and add only Sixes."),
        describe(
            Category::ThreeOfAKind,
            "Three of a Kind",
            "3 of the same",
            "At least three dice the same. Score the sum of all dice.",
        ),
        describe(
            Category::FourOfAKind,
            "Four of a Kind",
            "4 of the same",
            "At least four dice the same. Score the sum of all dice.",
        ),
        describe(
            Category::FullHouse,
            "Full House",
            "3 + 2 of a kind",
            "Three of one number and two of another. Scores 25 points.",
        ),
        describe(
            Category::SmallStraight,
            "Small Straight",
            "4 in a row",
            "Four sequential dice (e.g. 1-2-3-4). Scores 30 points.",
        ),
        describe(
            Category::LargeStraight,
            "Large Straight",
            "5 in a row",
            "Five sequential dice (e.g. 1-2-3-4-5). Scores 40 points.",
        ),
        describe(
            Category::FiveOfAKind,
            "Five of a Kind",
            "5 of a kind",
            "All five dice the same. Scores 50 points.",
        ),
        describe(
            Category::Chance,
            "Chance",
            "Any combination",
            "Any combination. Score the sum of all dice.",
        ),
    ]
});

/// The full catalog in scorecard order.
#[must_use]
pub fn catalog() -> &'static [CategoryMeta] {
    CATALOG.as_slice()
}

/// Catalog entries belonging to one section, in scorecard order.
pub fn by_section(section: Section) -> impl Iterator<Item = &'static CategoryMeta> {
    catalog().iter().filter(move |meta| meta.section == section)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_ordered_and_keyed() {
        assert_eq!(catalog().len(), CATEGORY_COUNT);
        for (idx, meta) in catalog().iter().enumerate() {
            assert_eq!(meta.key.index(), idx);
            assert_eq!(meta.key, Category::ALL[idx]);
        }
        assert_eq!(by_section(Section::Upper).count(), 6);
        assert_eq!(by_section(Section::Lower).count(), 7);
    }

    #[test]
    fn upper_values_are_face_multiples() {
        assert_eq!(Category::Fours.legal_values(), &[0, 4, 8, 12, 16, 20]);
        assert_eq!(Category::Sixes.max_score(), 30);
        assert!(Category::Threes.is_legal(9));
        assert!(!Category::Threes.is_legal(10));
    }

    #[test]
    fn sum_categories_span_five_to_thirty() {
        for category in [Category::ThreeOfAKind, Category::FourOfAKind, Category::Chance] {
            let values = category.legal_values();
            assert_eq!(values.len(), 27);
            assert!(category.is_legal(0));
            assert!(!category.is_legal(4));
            assert!(category.is_legal(5));
            assert!(category.is_legal(30));
            assert!(!category.is_legal(31));
            assert_eq!(category.entry_kind(), EntryKind::Picker);
        }
    }

    #[test]
    fn fixed_categories_are_binary() {
        let expected = [
            (Category::FullHouse, 25),
            (Category::SmallStraight, 30),
            (Category::LargeStraight, 40),
            (Category::FiveOfAKind, 50),
        ];
        for (category, fixed) in expected {
            assert_eq!(category.legal_values(), &[0, fixed]);
            assert_eq!(category.max_score(), fixed);
            assert!(category.meta().fixed_score);
            assert_eq!(category.entry_kind(), EntryKind::YesNo);
        }
    }

    #[test]
    fn bonus_placement_excludes_runs_and_full_house() {
        let blocked: Vec<_> = Category::ALL
            .into_iter()
            .filter(|c| !c.accepts_bonus_placement())
            .collect();
        assert_eq!(
            blocked,
            vec![
                Category::FullHouse,
                Category::SmallStraight,
                Category::LargeStraight
            ]
        );
    }

    #[test]
    fn keys_parse_and_serialize_as_camel_case() {
        assert_eq!("threeOfAKind".parse::<Category>(), Ok(Category::ThreeOfAKind));
        assert!("yahtzee".parse::<Category>().is_err());
        let json = serde_json::to_string(&Category::SmallStraight).unwrap();
        assert_eq!(json, "\"smallStraight\"");
    }
}
