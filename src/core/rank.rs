use std::cmp::Ordering;
use std::fmt;

use super::{Board, Card, CardBitSet, Hand, Suit, Value};

/// The nine made-hand categories of hold'em, weakest first.
///
/// The discriminant is the category's ordinal, and ordinal order is
/// strength order.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Copy)]
#[repr(u8)]
pub enum HandCategory {
    /// Nothing made. Only a high card.
    HighCard = 0,
    /// One Card matches another.
    OnePair = 1,
    /// Two different pair of matching cards.
    TwoPair = 2,
    /// Three of the same value.
    ThreeOfAKind = 3,
    /// Five cards in a sequence
    Straight = 4,
    /// Five cards of the same suit
    Flush = 5,
    /// Three of one value and two of another value
    FullHouse = 6,
    /// Four of the same value.
    FourOfAKind = 7,
    /// Five cards in a sequence all for the same suit.
    StraightFlush = 8,
}

impl HandCategory {
    /// How many categories there are.
    pub const COUNT: usize = 9;

    /// Every category, weakest first.
    pub const ALL: [HandCategory; 9] = [
        HandCategory::HighCard,
        HandCategory::OnePair,
        HandCategory::TwoPair,
        HandCategory::ThreeOfAKind,
        HandCategory::Straight,
        HandCategory::Flush,
        HandCategory::FullHouse,
        HandCategory::FourOfAKind,
        HandCategory::StraightFlush,
    ];

    pub const fn ordinal(self) -> usize {
        self as usize
    }

    pub fn from_ordinal(ordinal: usize) -> Option<Self> {
        Self::ALL.get(ordinal).copied()
    }

    /// The next stronger category, if there is one.
    pub fn stronger(self) -> Option<Self> {
        Self::from_ordinal(self.ordinal() + 1)
    }

    /// Every category, strongest first.
    pub fn strongest_first() -> impl Iterator<Item = HandCategory> {
        Self::ALL.into_iter().rev()
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HandCategory::HighCard => "high card",
            HandCategory::OnePair => "one pair",
            HandCategory::TwoPair => "two pair",
            HandCategory::ThreeOfAKind => "three of a kind",
            HandCategory::Straight => "straight",
            HandCategory::Flush => "flush",
            HandCategory::FullHouse => "full house",
            HandCategory::FourOfAKind => "four of a kind",
            HandCategory::StraightFlush => "straight flush",
        };
        write!(f, "{s}")
    }
}

/// The values of a set of cards ordered by how often they occur, then by
/// value, highest first. A pair comes before its kickers, trips before the
/// pair of a full house.
///
/// For example `Kd3cKc7cTs` has the signature `K K T 7 3`.
///
/// Signatures of the same category compare card by card, which is how two
/// pairs or two high card hands are told apart. Only the first five values
/// take part in [`RankSignature::cmp_best_five`], since only five cards play.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RankSignature(Vec<Value>);

impl RankSignature {
    pub fn values(&self) -> &[Value] {
        &self.0
    }

    /// The values as hold'em ranks (2..=14).
    pub fn ranks(&self) -> Vec<u8> {
        self.0.iter().map(|v| v.rank()).collect()
    }

    /// The most frequent (then highest) value.
    pub fn leading(&self) -> Option<Value> {
        self.0.first().copied()
    }

    /// The five values that play.
    pub fn best_five(&self) -> &[Value] {
        &self.0[..self.0.len().min(5)]
    }

    /// Compare only the five values that play.
    pub fn cmp_best_five(&self, other: &RankSignature) -> Ordering {
        self.best_five().cmp(other.best_five())
    }
}

/// The category of some cards plus the signature used to break ties.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Classification {
    pub category: HandCategory,
    pub signature: RankSignature,
}

impl Classification {
    /// Is this strictly ahead of `other`?
    ///
    /// A stronger category is always ahead. Within the same category the
    /// five playing values of the signatures are compared in order. That
    /// settles high card, one pair, trips and quads; it is not a full
    /// showdown evaluator for straights, flushes or three pair boards.
    pub fn beats(&self, other: &Classification) -> bool {
        match self.category.cmp(&other.category) {
            Ordering::Greater => true,
            Ordering::Less => false,
            Ordering::Equal => {
                self.signature.cmp_best_five(&other.signature) == Ordering::Greater
            }
        }
    }
}

/// Value frequencies of a set of cards, grouped by frequency.
///
/// This is the lookup used to find pairs, trips and quads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RankFrequencyMap {
    value_to_count: [u8; 13],
}

impl RankFrequencyMap {
    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        let mut value_to_count = [0u8; 13];
        for c in cards {
            value_to_count[c.value as usize] += 1;
        }
        Self { value_to_count }
    }

    pub fn count(&self, value: Value) -> u8 {
        self.value_to_count[value as usize]
    }

    /// Bit set of the values present, bit `Value as u8` per value.
    pub fn value_set(&self) -> u32 {
        self.values_where(|count| count > 0)
    }

    /// Bit set of the values that occur exactly `freq` times.
    pub fn value_set_with(&self, freq: u8) -> u32 {
        self.values_where(|count| count == freq)
    }

    /// The values that occur exactly `freq` times, highest first.
    pub fn ranks_with(&self, freq: u8) -> Vec<Value> {
        Value::values()
            .into_iter()
            .rev()
            .filter(|&v| self.count(v) == freq)
            .collect()
    }

    /// How many distinct values occur exactly `freq` times.
    pub fn groups_of(&self, freq: u8) -> usize {
        self.value_set_with(freq).count_ones() as usize
    }

    pub fn has(&self, freq: u8) -> bool {
        self.groups_of(freq) > 0
    }

    /// The values ordered by frequency then magnitude.
    pub fn signature(&self) -> RankSignature {
        let mut values = Vec::with_capacity(7);
        for freq in (1..=4).rev() {
            for v in self.ranks_with(freq) {
                values.extend(std::iter::repeat(v).take(freq as usize));
            }
        }
        RankSignature(values)
    }

    fn values_where(&self, pred: impl Fn(u8) -> bool) -> u32 {
        self.value_to_count
            .iter()
            .enumerate()
            .filter(|(_, count)| pred(**count))
            .fold(0, |set, (value, _)| set | (1 << value))
    }
}

/// Suit frequencies of a set of cards, with the values held in each suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SuitFrequencyMap {
    suit_value_sets: [u32; 4],
}

impl SuitFrequencyMap {
    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        let mut suit_value_sets = [0u32; 4];
        for c in cards {
            suit_value_sets[c.suit as usize] |= 1 << (c.value as u32);
        }
        Self { suit_value_sets }
    }

    pub fn count(&self, suit: Suit) -> usize {
        self.suit_value_sets[suit as usize].count_ones() as usize
    }

    /// Bit set of the values held in `suit`.
    pub fn value_set(&self, suit: Suit) -> u32 {
        self.suit_value_sets[suit as usize]
    }

    /// The suits that occur exactly `freq` times.
    pub fn suits_with(&self, freq: usize) -> Vec<Suit> {
        Suit::suits()
            .into_iter()
            .filter(|&s| self.count(s) == freq)
            .collect()
    }

    /// The suit with five or more cards, if any.
    pub fn flush_suit(&self) -> Option<Suit> {
        Suit::suits().into_iter().find(|&s| self.count(s) >= 5)
    }

    /// The one suit that can still become (or already is) a flush on the
    /// turn and river: the suit holding three or more of the known cards.
    ///
    /// This is only defined for five known cards (flop plus two hole
    /// cards), where at most one suit can hold three or more cards.
    pub fn drawing_suit(&self) -> Option<Suit> {
        let total: usize = Suit::suits().iter().map(|&s| self.count(s)).sum();
        let mut drawing = Suit::suits().into_iter().filter(|&s| self.count(s) >= 3);
        let suit = drawing.next();
        assert!(
            total != 5 || drawing.next().is_none(),
            "five known cards can hold at most one suit with three or more cards"
        );
        suit
    }
}

/// Bit mask for the wheel (Ace, two, three, four, five)
const WHEEL: u32 = 0b1_0000_0000_1111;

/// Given a bitset of values, find the top value of the best straight.
///
/// Returns None if the values represented don't hold five in a row. The
/// wheel (A-2-3-4-5) counts as a straight topped by the five.
pub(crate) fn straight_top(value_set: u32) -> Option<Value> {
    // A bit survives only if the four values below it are also set:
    //
    //       0001111100000
    //       0011111000000  << 1
    //       0111110000000  << 2
    //       1111100000000  << 3
    //       1111000000000  << 4 (truncated to 13 bits by the mask below)
    //       -------------
    //       0000000100000  top of the run before shifting back
    let run =
        value_set & (value_set >> 1) & (value_set >> 2) & (value_set >> 3) & (value_set >> 4);
    if run != 0 {
        // The highest surviving bit is the low card of the best run.
        let low = 31 - run.leading_zeros();
        Some(Value::from_u8((low + 4) as u8))
    } else if value_set & WHEEL == WHEEL {
        Some(Value::Five)
    } else {
        None
    }
}

/// Would adding `value` to the value set complete a five value run that
/// uses it? Values already in the set never complete anything new.
pub(crate) fn completes_straight(value_set: u32, value: Value) -> bool {
    let bit = 1u32 << (value as u32);
    if value_set & bit != 0 {
        return false;
    }
    let with = value_set | bit;
    (0..=8)
        .map(|low| 0b1_1111u32 << low)
        .chain(std::iter::once(WHEEL))
        .any(|run| run & bit != 0 && with & run == run)
}

/// Can these cards be classified? There are implementations for slices,
/// `CardBitSet`, `Hand` and `Board`.
pub trait Classifiable {
    fn cards(&self) -> impl Iterator<Item = Card>;

    /// Find the category and rank signature of all the cards together.
    ///
    /// Detection runs strongest pattern first: straight flush, flush,
    /// straight, four of a kind, full house, three of a kind, two pair,
    /// pair. With seven or fewer cards a straight can never coexist with
    /// quads or a full house, and a flush can't coexist with either, so
    /// this order always finds the strongest category.
    ///
    /// # Examples
    /// ```
    /// use flop_odds::core::{Board, Classifiable, HandCategory};
    ///
    /// let board: Board = "Kd3cKc7cTs".parse().unwrap();
    /// let class = board.classify();
    /// assert_eq!(HandCategory::OnePair, class.category);
    /// assert_eq!(vec![13, 13, 10, 7, 3], class.signature.ranks());
    /// ```
    fn classify(&self) -> Classification {
        let ranks = RankFrequencyMap::from_cards(self.cards());
        let suits = SuitFrequencyMap::from_cards(self.cards());
        let category = categorize(&ranks, &suits);
        Classification {
            category,
            signature: ranks.signature(),
        }
    }
}

fn categorize(ranks: &RankFrequencyMap, suits: &SuitFrequencyMap) -> HandCategory {
    if let Some(flush) = suits.flush_suit() {
        if straight_top(suits.value_set(flush)).is_some() {
            return HandCategory::StraightFlush;
        }
        return HandCategory::Flush;
    }
    if straight_top(ranks.value_set()).is_some() {
        return HandCategory::Straight;
    }
    if ranks.has(4) {
        return HandCategory::FourOfAKind;
    }
    let trips = ranks.groups_of(3);
    let pairs = ranks.groups_of(2);
    if trips >= 2 || (trips == 1 && pairs >= 1) {
        HandCategory::FullHouse
    } else if trips == 1 {
        HandCategory::ThreeOfAKind
    } else if pairs >= 2 {
        HandCategory::TwoPair
    } else if pairs == 1 {
        HandCategory::OnePair
    } else {
        HandCategory::HighCard
    }
}

/// Classify hole cards together with the board.
///
/// This is the hand classifier used everywhere a category is needed. It is
/// a pure function of its inputs.
pub fn classify(hole: Hand, board: &Board) -> Classification {
    let cards: CardBitSet = hole.iter().chain(board.iter()).collect();
    cards.classify()
}

impl Classifiable for Vec<Card> {
    fn cards(&self) -> impl Iterator<Item = Card> {
        self.iter().copied()
    }
}

impl Classifiable for [Card] {
    fn cards(&self) -> impl Iterator<Item = Card> {
        self.iter().copied()
    }
}

impl Classifiable for CardBitSet {
    fn cards(&self) -> impl Iterator<Item = Card> {
        self.iter()
    }
}

impl Classifiable for Hand {
    fn cards(&self) -> impl Iterator<Item = Card> {
        self.iter()
    }
}

impl Classifiable for Board {
    fn cards(&self) -> impl Iterator<Item = Card> {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class_of(hole: &str, board: &str) -> Classification {
        classify(hole.parse().unwrap(), &board.parse().unwrap())
    }

    fn cards(s: &str) -> Vec<Card> {
        s.as_bytes()
            .chunks(2)
            .map(|c| std::str::from_utf8(c).unwrap().parse().unwrap())
            .collect()
    }

    #[test]
    fn test_cmp() {
        assert!(HandCategory::HighCard < HandCategory::StraightFlush);
        assert!(HandCategory::HighCard < HandCategory::FourOfAKind);
        assert!(HandCategory::Straight < HandCategory::Flush);
        for (i, c) in HandCategory::ALL.iter().enumerate() {
            assert_eq!(i, c.ordinal());
            assert_eq!(Some(*c), HandCategory::from_ordinal(i));
        }
        assert_eq!(None, HandCategory::StraightFlush.stronger());
        assert_eq!(
            Some(HandCategory::OnePair),
            HandCategory::HighCard.stronger()
        );
    }

    #[test]
    fn test_one_pair_signature() {
        let class = class_of("Kd3c", "Kc7cTs");
        assert_eq!(HandCategory::OnePair, class.category);
        assert_eq!(vec![13, 13, 10, 7, 3], class.signature.ranks());
        assert_eq!(Some(Value::King), class.signature.leading());
    }

    #[test]
    fn test_three_of_a_kind() {
        let class = class_of("4h4s", "4d6s7s");
        assert_eq!(HandCategory::ThreeOfAKind, class.category);
        assert_eq!(vec![4, 4, 4, 7, 6], class.signature.ranks());
    }

    #[test]
    fn test_wheel() {
        let class = class_of("Ah2d", "3c4s5h");
        assert_eq!(HandCategory::Straight, class.category);
        let ranks = RankFrequencyMap::from_cards(cards("Ah2d3c4s5h"));
        assert_eq!(Some(Value::Five), straight_top(ranks.value_set()));
    }

    #[test]
    fn test_almost_wheel_is_nothing() {
        let class = class_of("Ah2d", "3c4s6h");
        assert_eq!(HandCategory::HighCard, class.category);
        assert_eq!(vec![14, 6, 4, 3, 2], class.signature.ranks());
    }

    #[test]
    fn test_broadway_and_steel_wheel() {
        assert_eq!(
            HandCategory::Straight,
            class_of("AhKd", "QcJsTh").category
        );
        assert_eq!(
            HandCategory::StraightFlush,
            class_of("Ah2h", "3h4h5h").category
        );
        assert_eq!(
            HandCategory::StraightFlush,
            class_of("9s8s", "7s6s5s").category
        );
    }

    #[test]
    fn test_straight_top() {
        assert_eq!(None, straight_top(0));
        assert_eq!(Some(Value::Ace), straight_top(0b1_1111_0000_0000));
        assert_eq!(Some(Value::Six), straight_top(0b1_0000_0001_1111));
        assert_eq!(Some(Value::Nine), straight_top(0b0_0000_1111_1110));
        assert_eq!(None, straight_top(0b0_0000_1110_1111));
    }

    #[test]
    fn test_completes_straight() {
        // 6 7 8 9 needs a five or a ten.
        let open_ended = 0b0_0000_1111_0000;
        assert!(completes_straight(open_ended, Value::Five));
        assert!(completes_straight(open_ended, Value::Ten));
        assert!(!completes_straight(open_ended, Value::Jack));
        assert!(!completes_straight(open_ended, Value::Nine));
        // A 2 3 4 needs the five for the wheel.
        let wheel_draw = 0b1_0000_0000_0111;
        assert!(completes_straight(wheel_draw, Value::Five));
        assert!(!completes_straight(wheel_draw, Value::Six));
    }

    #[test]
    fn test_flush_and_made_categories() {
        assert_eq!(HandCategory::Flush, class_of("Ad8d", "9dTd5d").category);
        assert_eq!(
            HandCategory::FullHouse,
            class_of("AdAc", "9d9c9s").category
        );
        assert_eq!(
            HandCategory::FourOfAKind,
            class_of("AdAc", "AsAhTs").category
        );
        assert_eq!(HandCategory::TwoPair, class_of("AdAc", "9d9cTs").category);
        assert_eq!(HandCategory::HighCard, class_of("Ad8h", "9cTc5c").category);
    }

    #[test]
    fn test_board_trips() {
        let class = class_of("AsKd", "9h9c9d");
        assert_eq!(HandCategory::ThreeOfAKind, class.category);
        assert_eq!(vec![9, 9, 9, 14, 13], class.signature.ranks());
    }

    #[test]
    fn test_seven_cards() {
        // Straight flush inside the flush suit only, not just flush + straight.
        let c = cards("9h8h7h6h2hTs");
        assert_eq!(HandCategory::Flush, c.classify().category);
        let c = cards("9h8h7h6h5hTs2c");
        assert_eq!(HandCategory::StraightFlush, c.classify().category);
        // Two sets are a full house.
        let c = cards("9h9c9s7h7d7c2s");
        assert_eq!(HandCategory::FullHouse, c.classify().category);
        // Three pairs are two pair.
        let c = cards("9h9c7s7h2d2c");
        assert_eq!(HandCategory::TwoPair, c.classify().category);
        assert_eq!(vec![9, 9, 7, 7, 2, 2], c.classify().signature.ranks());
    }

    #[test]
    fn test_beats_uses_five_cards() {
        let a = cards("KdKc9s7h5d3c").classify();
        let b = cards("KhKs9d7c5s2c").classify();
        // Both play K K 9 7 5.
        assert!(!a.beats(&b));
        assert!(!b.beats(&a));
        let c = cards("KhKs9d8c5s").classify();
        assert!(c.beats(&a));
        let d = cards("2h2s3d").classify();
        assert!(!d.beats(&a));
        let e = cards("2h2s2d").classify();
        assert!(e.beats(&a));
    }

    #[test]
    fn test_frequency_maps() {
        let ranks = RankFrequencyMap::from_cards(cards("Kd3cKc7cTs"));
        assert_eq!(vec![Value::King], ranks.ranks_with(2));
        assert_eq!(
            vec![Value::Ten, Value::Seven, Value::Three],
            ranks.ranks_with(1)
        );
        assert!(!ranks.has(3));

        let suits = SuitFrequencyMap::from_cards(cards("Kd3cKc7cTs"));
        assert_eq!(vec![Suit::Club], suits.suits_with(3));
        assert_eq!(Some(Suit::Club), suits.drawing_suit());
        assert_eq!(None, suits.flush_suit());
    }
}
