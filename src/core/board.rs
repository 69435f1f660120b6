use std::fmt;
use std::str::FromStr;

use super::{Card, CardBitSet, Hand, OddsError};

/// The community cards: a flop of three, plus the turn and the river as
/// they are dealt.
///
/// The cards keep the order they were dealt in and never repeat.
///
/// # Examples
///
/// ```
/// use flop_odds::core::Board;
///
/// let flop: Board = "Kc7cTs".parse().unwrap();
/// assert!(flop.is_flop());
/// assert_eq!(3, flop.len());
///
/// assert!("Kc7c".parse::<Board>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct Board {
    cards: Vec<Card>,
}

impl Board {
    /// Build a board, checking that it holds 3, 4 or 5 distinct cards.
    pub fn new(cards: Vec<Card>) -> Result<Self, OddsError> {
        if !(3..=5).contains(&cards.len()) {
            return Err(OddsError::InvalidBoardSize(cards.len()));
        }
        let mut seen = CardBitSet::new();
        for &card in &cards {
            if !seen.insert(card) {
                return Err(OddsError::DuplicateCard(card));
            }
        }
        Ok(Self { cards })
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Is this exactly the three card flop?
    pub fn is_flop(&self) -> bool {
        self.cards.len() == 3
    }

    pub fn iter(&self) -> impl Iterator<Item = Card> + '_ {
        self.cards.iter().copied()
    }

    pub fn bits(&self) -> CardBitSet {
        self.iter().collect()
    }

    /// Every card that is known once the given hands are on the table.
    ///
    /// Fails with `DuplicateCard` if a card shows up twice anywhere across
    /// the board and the hands.
    pub fn dead_cards(&self, hands: &[Hand]) -> Result<CardBitSet, OddsError> {
        let mut dead = self.bits();
        for hand in hands {
            for card in hand.iter() {
                if !dead.insert(card) {
                    return Err(OddsError::DuplicateCard(card));
                }
            }
        }
        Ok(dead)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for card in &self.cards {
            write!(f, "{card}")?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = OddsError;

    /// Parse concatenated two character card codes, e.g. `Kc7cTs`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars().peekable();
        let mut cards = Vec::with_capacity(5);
        while chars.peek().is_some() {
            cards.push(Card::parse_next(&mut chars)?);
        }
        Board::new(cards)
    }
}

impl TryFrom<String> for Board {
    type Error = OddsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Board> for String {
    fn from(board: Board) -> Self {
        board.to_string()
    }
}
