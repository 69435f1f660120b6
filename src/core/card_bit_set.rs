use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, Not, Sub};

use super::Card;

/// Mask with one bit for every card in the 52 card universe.
const FULL_DECK: u64 = (1 << 52) - 1;

/// A set of cards stored as a 64 bit mask, one bit per card.
///
/// `CardBitSet::new()` is empty while `CardBitSet::default()` is the full
/// 52 card deck, so the cards that are still live are
/// `CardBitSet::default() ^ used`.
///
/// # Examples
///
/// ```
/// use flop_odds::core::{Card, CardBitSet, Suit, Value};
///
/// let mut used = CardBitSet::new();
/// used.insert(Card::new(Value::Ace, Suit::Spade));
///
/// let live = CardBitSet::default() ^ used;
/// assert_eq!(51, live.count());
/// assert!(!live.contains(Card::new(Value::Ace, Suit::Spade)));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardBitSet {
    cards: u64,
}

impl CardBitSet {
    /// Create an empty set.
    pub const fn new() -> Self {
        Self { cards: 0 }
    }

    /// Add a card. Returns true if the card was not already present.
    pub fn insert(&mut self, card: Card) -> bool {
        let bit = 1u64 << card.index();
        let added = self.cards & bit == 0;
        self.cards |= bit;
        added
    }

    /// Remove a card. Returns true if the card was present.
    pub fn remove(&mut self, card: Card) -> bool {
        let bit = 1u64 << card.index();
        let removed = self.cards & bit != 0;
        self.cards &= !bit;
        removed
    }

    /// Is this card in the set?
    pub fn contains(&self, card: Card) -> bool {
        self.cards & (1u64 << card.index()) != 0
    }

    /// How many cards are in the set.
    pub fn count(&self) -> usize {
        self.cards.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.cards == 0
    }

    /// Do the two sets share any card?
    pub fn intersects(&self, other: CardBitSet) -> bool {
        self.cards & other.cards != 0
    }

    /// Iterate the cards, lowest index first.
    pub fn iter(&self) -> CardBitSetIter {
        CardBitSetIter { cards: self.cards }
    }
}

impl Default for CardBitSet {
    /// The full 52 card deck.
    fn default() -> Self {
        Self { cards: FULL_DECK }
    }
}

impl fmt::Debug for CardBitSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter().map(|c| c.to_string())).finish()
    }
}

impl BitOr for CardBitSet {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self {
            cards: self.cards | rhs.cards,
        }
    }
}

impl BitOrAssign for CardBitSet {
    fn bitor_assign(&mut self, rhs: Self) {
        self.cards |= rhs.cards;
    }
}

impl BitAnd for CardBitSet {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        Self {
            cards: self.cards & rhs.cards,
        }
    }
}

impl BitAndAssign for CardBitSet {
    fn bitand_assign(&mut self, rhs: Self) {
        self.cards &= rhs.cards;
    }
}

impl BitXor for CardBitSet {
    type Output = Self;
    fn bitxor(self, rhs: Self) -> Self {
        Self {
            cards: self.cards ^ rhs.cards,
        }
    }
}

/// Set difference.
impl Sub for CardBitSet {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self {
            cards: self.cards & !rhs.cards,
        }
    }
}

/// Complement within the 52 card deck.
impl Not for CardBitSet {
    type Output = Self;
    fn not(self) -> Self {
        Self {
            cards: !self.cards & FULL_DECK,
        }
    }
}

impl From<Card> for CardBitSet {
    fn from(card: Card) -> Self {
        let mut set = Self::new();
        set.insert(card);
        set
    }
}

impl FromIterator<Card> for CardBitSet {
    fn from_iter<T: IntoIterator<Item = Card>>(iter: T) -> Self {
        let mut set = Self::new();
        for card in iter {
            set.insert(card);
        }
        set
    }
}

impl Extend<Card> for CardBitSet {
    fn extend<T: IntoIterator<Item = Card>>(&mut self, iter: T) {
        for card in iter {
            self.insert(card);
        }
    }
}

/// Iterator over the cards of a `CardBitSet`.
#[derive(Debug, Clone)]
pub struct CardBitSetIter {
    cards: u64,
}

impl Iterator for CardBitSetIter {
    type Item = Card;

    fn next(&mut self) -> Option<Card> {
        if self.cards == 0 {
            return None;
        }
        let idx = self.cards.trailing_zeros() as u8;
        // Clear the lowest set bit.
        self.cards &= self.cards - 1;
        Some(Card::from_index(idx))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.cards.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for CardBitSetIter {}

impl IntoIterator for CardBitSet {
    type Item = Card;
    type IntoIter = CardBitSetIter;

    fn into_iter(self) -> CardBitSetIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Suit, Value};

    #[test]
    fn test_new_is_empty_default_is_deck() {
        assert!(CardBitSet::new().is_empty());
        assert_eq!(52, CardBitSet::default().count());
    }

    #[test]
    fn test_insert_remove() {
        let ace = Card::new(Value::Ace, Suit::Spade);
        let mut set = CardBitSet::new();
        assert!(set.insert(ace));
        assert!(!set.insert(ace));
        assert!(set.contains(ace));
        assert_eq!(1, set.count());
        assert!(set.remove(ace));
        assert!(!set.remove(ace));
        assert!(set.is_empty());
    }

    #[test]
    fn test_set_operations() {
        let a: CardBitSet = ["As", "Ks", "Qs"]
            .iter()
            .map(|c| c.parse::<Card>().unwrap())
            .collect();
        let b: CardBitSet = ["Qs", "Js"]
            .iter()
            .map(|c| c.parse::<Card>().unwrap())
            .collect();

        assert_eq!(4, (a | b).count());
        assert_eq!(1, (a & b).count());
        assert_eq!(2, (a - b).count());
        assert_eq!(3, (a ^ b).count());
        assert_eq!(49, (!a).count());
        assert!(a.intersects(b));
        assert!(!(a - b).intersects(b));
    }

    #[test]
    fn test_iter_is_ordered_and_complete() {
        let cards: Vec<Card> = CardBitSet::default().iter().collect();
        assert_eq!(52, cards.len());
        for w in cards.windows(2) {
            assert!(w[0].index() < w[1].index());
        }
    }
}
