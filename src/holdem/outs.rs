use std::collections::BTreeMap;
use std::fmt;

use tracing::trace;

use crate::core::{
    card_pairs, completes_straight, Board, Card, CardBitSet, Classifiable, Classification, Hand,
    HandCategory, OddsError, RankFrequencyMap, SuitFrequencyMap, Value,
};

use super::StreetVector;

/// Cards the turn is dealt from once the flop and both hands are known.
pub const TURN_UNSEEN: usize = 45;
/// Cards the river is dealt from once the turn is out.
pub const RIVER_UNSEEN: usize = 44;
/// Ordered (turn, river) deals after the flop.
const ORDERED_RUNOUTS: usize = TURN_UNSEEN * RIVER_UNSEEN;

/// A set of concrete unseen cards, each of which gets a hand somewhere on
/// its own when dealt next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutsSet {
    cards: CardBitSet,
}

impl Default for OutsSet {
    /// No outs. `CardBitSet::default()` is the full deck, so this is not
    /// derived.
    fn default() -> Self {
        Self::new(CardBitSet::new())
    }
}

impl OutsSet {
    pub fn new(cards: CardBitSet) -> Self {
        Self { cards }
    }

    pub fn cards(&self) -> CardBitSet {
        self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.count()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(card)
    }

    pub fn iter(&self) -> impl Iterator<Item = Card> {
        self.cards.iter()
    }

    /// The distinct values of the outs, highest first.
    pub fn values(&self) -> Vec<Value> {
        let freq = RankFrequencyMap::from_cards(self.iter());
        Value::values()
            .into_iter()
            .rev()
            .filter(|&v| freq.count(v) > 0)
            .collect()
    }

    pub fn union(&self, other: &OutsSet) -> OutsSet {
        OutsSet::new(self.cards | other.cards)
    }

    pub fn difference(&self, other: &OutsSet) -> OutsSet {
        OutsSet::new(self.cards - other.cards)
    }
}

impl FromIterator<Card> for OutsSet {
    fn from_iter<T: IntoIterator<Item = Card>>(iter: T) -> Self {
        OutsSet::new(iter.into_iter().collect())
    }
}

/// Probability that the turn is one of the outs: `|outs| / 45`.
pub fn turn_probability(outs: &OutsSet) -> f64 {
    outs.len() as f64 / TURN_UNSEEN as f64
}

/// Probability that the turn or the river is one of the outs, when no other
/// out set interacts: `turn + (1 - turn) * |outs| / 44`.
pub fn river_probability(outs: &OutsSet) -> f64 {
    let turn = turn_probability(outs);
    turn + (1.0 - turn) * outs.len() as f64 / RIVER_UNSEEN as f64
}

/// River only probability of an out set: the turn misses every listed set
/// (this one included) and the river is one of `outs`.
///
/// Summing this over disjoint out sets credits each river card once, even
/// when the sets are listed together in `others`.
pub fn add_to_river(outs: &OutsSet, others: &[&OutsSet], unseen: CardBitSet) -> f64 {
    let covered = others
        .iter()
        .fold(outs.cards(), |covered, other| covered | other.cards());
    let misses = (unseen - covered).count();
    (misses as f64 / TURN_UNSEEN as f64) * (outs.len() as f64 / RIVER_UNSEEN as f64)
}

/// Probability of catching one of `n1` cards and one of `n2` cards of a
/// different value on the turn and river, in either order.
pub fn two_card_probability(n1: usize, n2: usize) -> f64 {
    (2 * n1 * n2) as f64 / ORDERED_RUNOUTS as f64
}

/// Probability of catching two of the `n` remaining cards of one value.
pub fn same_rank_probability(n: usize) -> f64 {
    (n * n.saturating_sub(1)) as f64 / ORDERED_RUNOUTS as f64
}

/// How many values have no card at all among `visible`. Each of them can
/// still come as a fresh pair on the turn and river.
pub fn fresh_pocket_pairs(visible: CardBitSet) -> usize {
    let seen = RankFrequencyMap::from_cards(visible.iter()).value_set();
    13 - seen.count_ones() as usize
}

/// An unordered pair of values, higher value first. Both values are the
/// same for a runner-runner pair.
///
/// This is a pair of ranks, not of cards: every concrete card pair of these
/// values belongs to it.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RankPair {
    high: Value,
    low: Value,
}

impl RankPair {
    pub fn new(a: Value, b: Value) -> Self {
        let (high, low) = if a >= b { (a, b) } else { (b, a) };
        Self { high, low }
    }

    pub fn high(&self) -> Value {
        self.high
    }

    pub fn low(&self) -> Value {
        self.low
    }

    pub fn is_pair(&self) -> bool {
        self.high == self.low
    }
}

impl fmt::Display for RankPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.high, self.low)
    }
}

/// A runner-runner draw: the turn and river together land on `ranks` while
/// neither card would have done it alone.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawPair {
    ranks: RankPair,
    /// Unordered card pairs of these values that complete the draw.
    combos: usize,
    /// Unseen cards of the high and the low value.
    available: (usize, usize),
}

impl DrawPair {
    pub fn ranks(&self) -> RankPair {
        self.ranks
    }

    pub fn combos(&self) -> usize {
        self.combos
    }

    pub fn available(&self) -> (usize, usize) {
        self.available
    }

    /// Unordered card pairs of these values left in the unseen cards.
    pub fn possible(&self) -> usize {
        let (n1, n2) = self.available;
        if self.ranks.is_pair() {
            n1 * n1.saturating_sub(1) / 2
        } else {
            n1 * n2
        }
    }

    /// Does every remaining card pair of these values complete the draw?
    pub fn is_complete(&self) -> bool {
        self.combos == self.possible()
    }

    /// Probability of the turn and river being one of the combos, in
    /// either order. For a complete draw this is
    /// [`two_card_probability`] (or [`same_rank_probability`] for a pair)
    /// of the available counts.
    pub fn probability(&self) -> f64 {
        (2 * self.combos) as f64 / ORDERED_RUNOUTS as f64
    }
}

/// Outs and runner-runner draws for one hand on a flop, with the other
/// hand's cards removed from the deck.
///
/// Every turn card and every unordered turn and river pair is classified
/// once up front. Out sets are then read off those classifications:
///
/// - [`OutsEngine::outs`] holds the cards that make exactly a category.
///   A card lands in the strongest category it makes, so a card that
///   completes a flush is never also a straight out, and a card that makes
///   quads is never also a full house out.
/// - [`OutsEngine::outs_at_least`] is the union of those sets from a
///   category upward.
/// - [`OutsEngine::draws`] groups the card pairs that get there only by
///   using both cards.
///
/// # Examples
///
/// ```
/// use flop_odds::core::{Board, Hand, HandCategory, Value};
/// use flop_odds::holdem::OutsEngine;
///
/// let hand: Hand = "4h4s".parse().unwrap();
/// let flop: Board = "4d6s7s".parse().unwrap();
/// let opponent: Hand = "AdKc".parse().unwrap();
///
/// let engine = OutsEngine::new(hand, &flop, opponent).unwrap();
/// assert_eq!(HandCategory::ThreeOfAKind, engine.current().category);
///
/// let full_house = engine.outs(HandCategory::FullHouse).values();
/// assert_eq!(vec![Value::Seven, Value::Six], full_house);
/// ```
#[derive(Debug, Clone)]
pub struct OutsEngine {
    hand: Hand,
    /// Hole cards plus the flop.
    known: CardBitSet,
    unseen: CardBitSet,
    current: Classification,
    turns: Vec<(Card, Classification)>,
    runouts: Vec<(Card, Card, Classification)>,
}

impl OutsEngine {
    /// Build the engine for `hand` on `flop`, with `opponent` holding two
    /// more of the known cards.
    ///
    /// Fails with `FlopRequired` unless the board is exactly three cards,
    /// and with `DuplicateCard` if any card is used twice.
    pub fn new(hand: Hand, flop: &Board, opponent: Hand) -> Result<Self, OddsError> {
        if !flop.is_flop() {
            return Err(OddsError::FlopRequired(flop.len()));
        }
        let dead = flop.dead_cards(&[hand, opponent])?;
        let known = CardBitSet::from(hand) | flop.bits();
        let unseen = !dead;
        debug_assert_eq!(TURN_UNSEEN, unseen.count());

        let with = |extra: &[Card]| {
            let mut cards = known;
            cards.extend(extra.iter().copied());
            cards.classify()
        };
        let current = known.classify();
        let turns: Vec<_> = unseen.iter().map(|c| (c, with(&[c]))).collect();
        let runouts: Vec<_> = card_pairs(unseen)
            .map(|(a, b)| (a, b, with(&[a, b])))
            .collect();

        trace!(
            %hand,
            %opponent,
            category = %current.category,
            runouts = runouts.len(),
            "classified runouts"
        );
        Ok(Self {
            hand,
            known,
            unseen,
            current,
            turns,
            runouts,
        })
    }

    pub fn hand(&self) -> Hand {
        self.hand
    }

    /// What the hand makes on the flop.
    pub fn current(&self) -> &Classification {
        &self.current
    }

    /// The cards the turn and river come from.
    pub fn unseen(&self) -> CardBitSet {
        self.unseen
    }

    /// Unseen cards that satisfy `pred` once added as the turn.
    pub fn outs_where(&self, pred: impl Fn(&Classification) -> bool) -> OutsSet {
        self.turns
            .iter()
            .filter(|(_, class)| pred(class))
            .map(|(card, _)| *card)
            .collect()
    }

    /// Cards that make exactly `category` on the turn. Empty for the
    /// current category and everything below it, since those are already
    /// guaranteed.
    pub fn outs(&self, category: HandCategory) -> OutsSet {
        if category <= self.current.category {
            return OutsSet::default();
        }
        self.outs_where(|class| class.category == category)
    }

    /// Cards that make `category` or better on the turn.
    pub fn outs_at_least(&self, category: HandCategory) -> OutsSet {
        self.outs_where(|class| class.category >= category)
    }

    /// Card pairs satisfying `pred` where neither card does on its own,
    /// grouped by their values, strongest values first.
    pub fn draws_where(&self, pred: impl Fn(&Classification) -> bool) -> Vec<DrawPair> {
        let outs = self.outs_where(&pred).cards();
        let mut combos: BTreeMap<RankPair, usize> = BTreeMap::new();
        for (a, b, class) in &self.runouts {
            if outs.contains(*a) || outs.contains(*b) || !pred(class) {
                continue;
            }
            *combos.entry(RankPair::new(a.value, b.value)).or_default() += 1;
        }

        let remaining = RankFrequencyMap::from_cards(self.unseen.iter());
        combos
            .into_iter()
            .rev()
            .map(|(ranks, combos)| DrawPair {
                ranks,
                combos,
                available: (
                    remaining.count(ranks.high()) as usize,
                    remaining.count(ranks.low()) as usize,
                ),
            })
            .collect()
    }

    /// Runner-runner draws to `category` or better.
    pub fn draws(&self, category: HandCategory) -> Vec<DrawPair> {
        self.draws_where(|class| class.category >= category)
    }

    /// Probability that `pred` holds now, after the turn and after the
    /// river.
    ///
    /// The predicate has to stay true once it is true, as "`category` or
    /// better" does. The turn is `|outs| / 45`. For the river every ordered
    /// (turn, river) deal is counted: a turn out with any river, a missed
    /// turn followed by a river out, or one of the draw combos in either
    /// order. That is the sum of [`turn_probability`], [`add_to_river`] and
    /// the [`DrawPair::probability`] of every draw, in whole numbers of
    /// deals.
    pub fn hit_where(&self, pred: impl Fn(&Classification) -> bool) -> StreetVector {
        let flop = if pred(&self.current) { 1.0 } else { 0.0 };
        let outs = self.outs_where(&pred).len();
        let draw_combos: usize = self.draws_where(&pred).iter().map(DrawPair::combos).sum();

        let deals = outs * RIVER_UNSEEN + (TURN_UNSEEN - outs) * outs + 2 * draw_combos;
        StreetVector::new(
            flop,
            outs as f64 / TURN_UNSEEN as f64,
            deals as f64 / ORDERED_RUNOUTS as f64,
        )
    }

    /// Probability of holding `category` or better on each street.
    pub fn hit(&self, category: HandCategory) -> StreetVector {
        self.hit_where(|class| class.category >= category)
    }

    /// Unseen cards that complete a five value run using the card itself,
    /// whether or not the hand already holds a straight or better.
    pub fn straight_draw_outs(&self) -> OutsSet {
        straight_draw_cards(self.known, self.unseen)
    }

    /// Unseen cards of a suit that already holds four or more of the known
    /// cards.
    pub fn flush_draw_outs(&self) -> OutsSet {
        flush_draw_cards(self.known, self.unseen)
    }
}

/// Cards from `unseen` whose value completes a straight pattern with the
/// values of `known`.
pub fn straight_draw_cards(known: CardBitSet, unseen: CardBitSet) -> OutsSet {
    let values = RankFrequencyMap::from_cards(known.iter()).value_set();
    unseen
        .iter()
        .filter(|c| completes_straight(values, c.value))
        .collect()
}

/// Cards from `unseen` in the one suit of the five `known` cards that holds
/// four or more of them.
pub fn flush_draw_cards(known: CardBitSet, unseen: CardBitSet) -> OutsSet {
    let suits = SuitFrequencyMap::from_cards(known.iter());
    match suits.drawing_suit() {
        Some(suit) if suits.count(suit) >= 4 => {
            unseen.iter().filter(|c| c.suit == suit).collect()
        }
        _ => OutsSet::default(),
    }
}
