use std::fmt;
use std::str::FromStr;

use super::{Card, CardBitSet, OddsError, Suit, Value};

/// Two private (hole) cards.
///
/// A hand is an unordered pair of distinct cards. The cards are stored
/// higher card first, so `AsKs` and `KsAs` are the same hand and compare,
/// hash and print identically.
///
/// # Examples
///
/// ```
/// use flop_odds::core::Hand;
///
/// let a: Hand = "Kd3c".parse().unwrap();
/// let b: Hand = "3cKd".parse().unwrap();
/// assert_eq!(a, b);
/// assert_eq!("Kd3c", a.to_string());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct Hand {
    high: Card,
    low: Card,
}

impl Hand {
    /// Create a hand from two cards, failing if they are the same card.
    pub fn new(first: Card, second: Card) -> Result<Self, OddsError> {
        if first == second {
            return Err(OddsError::DuplicateCard(first));
        }
        let (high, low) = if first > second {
            (first, second)
        } else {
            (second, first)
        };
        Ok(Self { high, low })
    }

    /// The higher of the two cards.
    pub fn high(&self) -> Card {
        self.high
    }

    /// The lower of the two cards.
    pub fn low(&self) -> Card {
        self.low
    }

    pub fn cards(&self) -> [Card; 2] {
        [self.high, self.low]
    }

    pub fn iter(&self) -> impl Iterator<Item = Card> {
        self.cards().into_iter()
    }

    pub fn values(&self) -> [Value; 2] {
        [self.high.value, self.low.value]
    }

    pub fn contains(&self, card: Card) -> bool {
        self.high == card || self.low == card
    }

    pub fn contains_value(&self, value: Value) -> bool {
        self.high.value == value || self.low.value == value
    }

    /// Does this hand share a card with the given set?
    pub fn conflicts(&self, cards: CardBitSet) -> bool {
        cards.contains(self.high) || cards.contains(self.low)
    }

    pub fn is_pocket_pair(&self) -> bool {
        self.high.value == self.low.value
    }

    /// The shared suit when both cards are of one suit.
    pub fn suited(&self) -> Option<Suit> {
        (self.high.suit == self.low.suit).then_some(self.high.suit)
    }
}

impl From<Hand> for CardBitSet {
    fn from(hand: Hand) -> Self {
        hand.iter().collect()
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.high, self.low)
    }
}

impl FromStr for Hand {
    type Err = OddsError;

    /// Parse a four character hand code such as `AsKs`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let first = Card::parse_next(&mut chars)?;
        let second = Card::parse_next(&mut chars)?;
        if chars.next().is_some() {
            return Err(OddsError::UnparsedCharsRemaining);
        }
        Hand::new(first, second)
    }
}

impl TryFrom<String> for Hand {
    type Error = OddsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Hand> for String {
    fn from(hand: Hand) -> Self {
        hand.to_string()
    }
}
