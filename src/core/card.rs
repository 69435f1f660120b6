use std::fmt;
use std::str::FromStr;

use super::error::OddsError;

/// Card rank or value.
/// This is basically the face value - 2
///
/// The numeric rank used by hold'em arithmetic (2..=14, Ace = 14) is
/// available through [`Value::rank`].
#[derive(Debug, PartialEq, PartialOrd, Eq, Ord, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Value {
    /// 2
    Two = 0,
    /// 3
    Three = 1,
    /// 4
    Four = 2,
    /// 5
    Five = 3,
    /// 6
    Six = 4,
    /// 7
    Seven = 5,
    /// 8
    Eight = 6,
    /// 9
    Nine = 7,
    /// T
    Ten = 8,
    /// J
    Jack = 9,
    /// Q
    Queen = 10,
    /// K
    King = 11,
    /// A
    Ace = 12,
}

/// Constant of all the values.
/// This is what `Value::values()` returns
const VALUES: [Value; 13] = [
    Value::Two,
    Value::Three,
    Value::Four,
    Value::Five,
    Value::Six,
    Value::Seven,
    Value::Eight,
    Value::Nine,
    Value::Ten,
    Value::Jack,
    Value::Queen,
    Value::King,
    Value::Ace,
];

/// Symbol for each value, indexed by `Value as usize`.
const VALUE_CHARS: [char; 13] = [
    '2', '3', '4', '5', '6', '7', '8', '9', 'T', 'J', 'Q', 'K', 'A',
];

impl Value {
    /// Take a u8 that should be in the range [0, 12]
    /// and turn it into a value.
    ///
    /// Values outside the range are clamped to Ace.
    pub fn from_u8(v: u8) -> Self {
        VALUES[v.min(12) as usize]
    }

    /// Get all of the `Value`'s that are possible, lowest first.
    pub const fn values() -> [Self; 13] {
        VALUES
    }

    /// Convert a hold'em rank (2..=14) into a value.
    ///
    /// # Examples
    ///
    /// ```
    /// use flop_odds::core::Value;
    ///
    /// assert_eq!(Some(Value::Ace), Value::from_rank(14));
    /// assert_eq!(Some(Value::Ten), Value::from_rank(10));
    /// assert_eq!(None, Value::from_rank(1));
    /// ```
    pub fn from_rank(rank: u8) -> Option<Self> {
        match rank {
            2..=14 => Some(VALUES[(rank - 2) as usize]),
            _ => None,
        }
    }

    /// The hold'em rank of this value, 2 through 14 with the ace high.
    ///
    /// ```
    /// use flop_odds::core::Value;
    ///
    /// assert_eq!(14, Value::Ace.rank());
    /// assert_eq!(2, Value::Two.rank());
    /// ```
    pub const fn rank(self) -> u8 {
        self as u8 + 2
    }

    /// Given a character parse that char into a value.
    /// Case is ignored as long as the char is in the ascii range (It should
    /// be). @returns None if there's no value there.
    ///
    /// # Examples
    ///
    /// ```
    /// use flop_odds::core::Value;
    ///
    /// assert_eq!(Value::Ace, Value::from_char('A').unwrap());
    /// ```
    pub fn from_char(c: char) -> Option<Self> {
        let upper = c.to_ascii_uppercase();
        VALUE_CHARS
            .iter()
            .position(|&v| v == upper)
            .map(|idx| VALUES[idx])
    }

    /// Convert this Value to a char.
    pub fn to_char(self) -> char {
        VALUE_CHARS[self as usize]
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Enum for the four different suits.
/// While this has support for ordering it's not
/// sensical. The sorting is only there to allow sorting cards.
#[derive(Debug, PartialEq, PartialOrd, Eq, Ord, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Suit {
    /// Spades
    Spade = 0,
    /// Clubs
    Club = 1,
    /// Hearts
    Heart = 2,
    /// Diamonds
    Diamond = 3,
}

/// All of the `Suit`'s. This is what `Suit::suits()` returns.
const SUITS: [Suit; 4] = [Suit::Spade, Suit::Club, Suit::Heart, Suit::Diamond];

/// Symbol for each suit, indexed by `Suit as usize`.
const SUIT_CHARS: [char; 4] = ['s', 'c', 'h', 'd'];

impl Suit {
    /// Provide all the Suit's that there are.
    pub const fn suits() -> [Self; 4] {
        SUITS
    }

    /// Translate a Suit from a u8. If the u8 is above the expected value
    /// then Diamond will be the result.
    pub fn from_u8(s: u8) -> Self {
        SUITS[s.min(3) as usize]
    }

    /// This Suits a char and if possible turns it into a suit.
    ///
    /// ```
    /// use flop_odds::core::Suit;
    ///
    /// assert_eq!(Some(Suit::Heart), Suit::from_char('h'));
    /// assert_eq!(None, Suit::from_char('x'));
    /// ```
    pub fn from_char(s: char) -> Option<Self> {
        let lower = s.to_ascii_lowercase();
        SUIT_CHARS
            .iter()
            .position(|&c| c == lower)
            .map(|idx| SUITS[idx])
    }

    /// This turns a suit into a char.
    pub fn to_char(self) -> char {
        SUIT_CHARS[self as usize]
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// The main struct of this library.
/// This is a carrier for Suit and Value combined.
#[derive(Debug, PartialEq, PartialOrd, Eq, Ord, Clone, Copy, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct Card {
    /// The face value of this card.
    pub value: Value,
    /// The suit of this card.
    pub suit: Suit,
}

impl Card {
    /// Create a new card
    pub const fn new(value: Value, suit: Suit) -> Self {
        Self { value, suit }
    }

    /// The index of this card in the 52 card universe, 0..52.
    ///
    /// Cards of the same value are adjacent; the suit selects the slot.
    pub const fn index(self) -> u8 {
        self.value as u8 * 4 + self.suit as u8
    }

    /// Inverse of [`Card::index`]. Indexes past 51 clamp to the last card.
    pub fn from_index(idx: u8) -> Self {
        let idx = idx.min(51);
        Self {
            value: Value::from_u8(idx / 4),
            suit: Suit::from_u8(idx % 4),
        }
    }

    /// Parse a card from the first two characters of an iterator.
    ///
    /// This is shared by every type that is parsed from concatenated
    /// two-character card codes.
    pub(crate) fn parse_next(chars: &mut impl Iterator<Item = char>) -> Result<Self, OddsError> {
        let vc = chars.next().ok_or(OddsError::TooFewChars)?;
        let sc = chars.next().ok_or(OddsError::TooFewChars)?;
        let value = Value::from_char(vc).ok_or(OddsError::UnexpectedValueChar(vc))?;
        let suit = Suit::from_char(sc).ok_or(OddsError::UnexpectedSuitChar(sc))?;
        Ok(Self { value, suit })
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value.to_char(), self.suit.to_char())
    }
}

impl FromStr for Card {
    type Err = OddsError;

    /// Parse a two character card code such as `As` or `Td`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let card = Card::parse_next(&mut chars)?;
        if chars.next().is_some() {
            return Err(OddsError::UnparsedCharsRemaining);
        }
        Ok(card)
    }
}

impl TryFrom<String> for Card {
    type Error = OddsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Card> for String {
    fn from(card: Card) -> Self {
        card.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructor() {
        let c = Card {
            value: Value::Three,
            suit: Suit::Spade,
        };
        assert_eq!(Suit::Spade, c.suit);
        assert_eq!(Value::Three, c.value);
    }

    #[test]
    fn test_compare() {
        let c1 = Card::new(Value::Three, Suit::Spade);
        let c2 = Card::new(Value::Four, Suit::Spade);
        let c3 = Card::new(Value::Four, Suit::Club);

        // Make sure that the values are ordered
        assert!(c1 < c2);
        assert!(c2 > c1);
        // Make sure that suit is used.
        assert!(c3 > c2);
    }

    #[test]
    fn test_value_cmp() {
        assert!(Value::Two < Value::Ace);
        assert!(Value::King < Value::Ace);
        assert_eq!(Value::Two, Value::Two);
    }

    #[test]
    fn test_ranks_match_holdem_encoding() {
        for (i, v) in Value::values().iter().enumerate() {
            assert_eq!(i as u8 + 2, v.rank());
            assert_eq!(Some(*v), Value::from_rank(v.rank()));
        }
        assert_eq!(None, Value::from_rank(15));
        assert_eq!(13, Value::King.rank());
        assert_eq!(11, Value::Jack.rank());
    }

    #[test]
    fn test_char_round_trip() {
        for v in Value::values() {
            assert_eq!(Some(v), Value::from_char(v.to_char()));
        }
        for s in Suit::suits() {
            assert_eq!(Some(s), Suit::from_char(s.to_char()));
        }
        assert_eq!(Some(Value::Ten), Value::from_char('t'));
        assert_eq!(None, Value::from_char('1'));
    }

    #[test]
    fn test_index_covers_universe() {
        let mut seen = [false; 52];
        for v in Value::values() {
            for s in Suit::suits() {
                let c = Card::new(v, s);
                assert!(!seen[c.index() as usize]);
                seen[c.index() as usize] = true;
                assert_eq!(c, Card::from_index(c.index()));
            }
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_parse_card() {
        let c: Card = "Kd".parse().unwrap();
        assert_eq!(Card::new(Value::King, Suit::Diamond), c);
        assert_eq!("Kd", c.to_string());
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Err(OddsError::TooFewChars), "K".parse::<Card>());
        assert_eq!(
            Err(OddsError::UnexpectedValueChar('X')),
            "Xd".parse::<Card>()
        );
        assert_eq!(
            Err(OddsError::UnexpectedSuitChar('x')),
            "Kx".parse::<Card>()
        );
        assert_eq!(
            Err(OddsError::UnparsedCharsRemaining),
            "Kdd".parse::<Card>()
        );
    }
}
