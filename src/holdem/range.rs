use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::core::{
    card_pairs, classify, Board, Card, CardBitSet, Hand, HandCategory, OddsError, Suit, Value,
};

use super::{flush_draw_cards, straight_draw_cards};

/// The kinds of one card draw a range can be filtered on.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawKind {
    Straight,
    Flush,
}

/// A set of concrete two card hands an opponent might hold.
///
/// Every member is one specific combo, so `AKs` in shorthand is four
/// members here. Ranges are plain sets: union, difference and intersection
/// build new ranges and never change the inputs.
///
/// # Examples
///
/// ```
/// use flop_odds::core::{Board, Hand};
/// use flop_odds::holdem::Range;
///
/// let range: Range = "AsKs,AhKh,QdQc".parse().unwrap();
/// assert_eq!(3, range.len());
///
/// let flop: Board = "AhKh2c".parse().unwrap();
/// let hero: Hand = "AsKs".parse().unwrap();
/// assert_eq!(1, range.without_conflicts(&flop, hero).len());
/// ```
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Range {
    hands: BTreeSet<Hand>,
}

impl Range {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every one of the 1326 two card hands.
    pub fn all() -> Self {
        card_pairs(CardBitSet::default())
            .filter_map(|(a, b)| Hand::new(a, b).ok())
            .collect()
    }

    /// Pocket pairs of `min` or higher.
    pub fn pocket_pairs(min: Value) -> Self {
        Self::all().filter(|h| h.is_pocket_pair() && h.high().value >= min)
    }

    /// The six combos of one pocket pair.
    pub fn pocket_pair(value: Value) -> Self {
        Self::all().filter(|h| h.is_pocket_pair() && h.high().value == value)
    }

    /// Both cards of `suit`.
    pub fn suited(suit: Suit) -> Self {
        Self::all().filter(|h| h.suited() == Some(suit))
    }

    pub fn containing_card(card: Card) -> Self {
        Self::all().filter(|h| h.contains(card))
    }

    /// Hands with exactly one card of `value`; the pocket pair is left out.
    pub fn containing_value(value: Value) -> Self {
        Self::all().filter(|h| h.contains_value(value) && !h.is_pocket_pair())
    }

    /// Hands that make exactly `category` on `board`. Hands using a board
    /// card are left out.
    pub fn making(board: &Board, category: HandCategory) -> Self {
        Self::all()
            .remove_cards(board.bits())
            .filter(|h| classify(*h, board).category == category)
    }

    /// Hands with at least one card that completes the draw on a flop.
    ///
    /// Made flushes are not flush draws. A straight draw is read off the
    /// values alone, so a hand that already holds a straight still counts
    /// when another card would make a five value run.
    pub fn drawing(board: &Board, kind: DrawKind) -> Result<Self, OddsError> {
        if !board.is_flop() {
            return Err(OddsError::FlopRequired(board.len()));
        }
        let range = Self::all().remove_cards(board.bits()).filter(|h| {
            let known = CardBitSet::from(*h) | board.bits();
            match kind {
                DrawKind::Straight => !straight_draw_cards(known, !known).is_empty(),
                DrawKind::Flush => {
                    classify(*h, board).category < HandCategory::Flush
                        && !flush_draw_cards(known, !known).is_empty()
                }
            }
        });
        Ok(range)
    }

    pub fn len(&self) -> usize {
        self.hands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hands.is_empty()
    }

    pub fn contains(&self, hand: &Hand) -> bool {
        self.hands.contains(hand)
    }

    /// Add a hand. Returns true if it wasn't already in the range.
    pub fn insert(&mut self, hand: Hand) -> bool {
        self.hands.insert(hand)
    }

    pub fn iter(&self) -> impl Iterator<Item = Hand> + '_ {
        self.hands.iter().copied()
    }

    pub fn union(&self, other: &Range) -> Range {
        self.hands.union(&other.hands).copied().collect()
    }

    pub fn difference(&self, other: &Range) -> Range {
        self.hands.difference(&other.hands).copied().collect()
    }

    pub fn intersection(&self, other: &Range) -> Range {
        self.hands.intersection(&other.hands).copied().collect()
    }

    /// The hands that use none of `cards`.
    pub fn remove_cards(&self, cards: CardBitSet) -> Range {
        self.filter(|h| !h.conflicts(cards))
    }

    /// The hands that can be held alongside `board` and `hero`.
    pub fn without_conflicts(&self, board: &Board, hero: Hand) -> Range {
        self.remove_cards(board.bits() | CardBitSet::from(hero))
    }

    fn filter(&self, pred: impl Fn(&Hand) -> bool) -> Range {
        self.hands.iter().filter(|h| pred(h)).copied().collect()
    }
}

impl FromIterator<Hand> for Range {
    fn from_iter<T: IntoIterator<Item = Hand>>(iter: T) -> Self {
        Self {
            hands: iter.into_iter().collect(),
        }
    }
}

impl Extend<Hand> for Range {
    fn extend<T: IntoIterator<Item = Hand>>(&mut self, iter: T) {
        self.hands.extend(iter);
    }
}

impl<'a> IntoIterator for &'a Range {
    type Item = &'a Hand;
    type IntoIter = std::collections::btree_set::Iter<'a, Hand>;

    fn into_iter(self) -> Self::IntoIter {
        self.hands.iter()
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, hand) in self.hands.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{hand}")?;
        }
        Ok(())
    }
}

impl FromStr for Range {
    type Err = OddsError;

    /// Parse concrete combos separated by commas or whitespace, e.g.
    /// `AsKs,AhKh`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(|c: char| c == ',' || c.is_whitespace())
            .filter(|combo| !combo.is_empty())
            .map(str::parse::<Hand>)
            .collect()
    }
}

/// Something that can expand a range expression (`QQ+,AKs` and the like)
/// into concrete hands.
///
/// The shorthand grammar lives outside this crate. Any
/// `Fn(&str) -> Result<Range, OddsError>` is a `RangeNotation`, and
/// [`ComboNotation`] handles lists of concrete combos.
pub trait RangeNotation {
    fn expand(&self, expression: &str) -> Result<Range, OddsError>;
}

impl<F> RangeNotation for F
where
    F: Fn(&str) -> Result<Range, OddsError>,
{
    fn expand(&self, expression: &str) -> Result<Range, OddsError> {
        self(expression)
    }
}

/// Expressions that are just concrete combos: `AsKs,AhKh`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComboNotation;

impl RangeNotation for ComboNotation {
    fn expand(&self, expression: &str) -> Result<Range, OddsError> {
        expression
            .parse()
            .map_err(|e: OddsError| OddsError::RangeExpression {
                expression: expression.to_string(),
                reason: e.to_string(),
            })
    }
}
