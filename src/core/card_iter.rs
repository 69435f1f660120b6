use super::{Card, CardBitSet};

/// Walks every k-card subset of a set of cards.
///
/// This is how future streets are enumerated: every two card subset of the
/// unseen cards is one unordered turn+river runout.
#[derive(Debug)]
pub struct CardIter {
    /// The cards subsets are drawn from.
    possible_cards: Vec<Card>,
    /// Offsets into `possible_cards` of the subset that comes next.
    idx: Vec<usize>,
    /// Set once every subset has been produced.
    done: bool,
}

impl CardIter {
    /// Create a new `CardIter` from a slice of cards.
    /// `num_cards` is the size of every subset produced.
    pub fn new(possible_cards: &[Card], num_cards: usize) -> CardIter {
        CardIter {
            possible_cards: possible_cards.to_vec(),
            idx: (0..num_cards).collect(),
            done: num_cards == 0 || num_cards > possible_cards.len(),
        }
    }

    /// Move the offsets on to the next subset in lexicographic order.
    fn advance(&mut self) {
        let n = self.possible_cards.len();
        let k = self.idx.len();
        // Find the right-most offset that still has room to move.
        let Some(level) = (0..k).rev().find(|&i| self.idx[i] < n - k + i) else {
            self.done = true;
            return;
        };
        self.idx[level] += 1;
        // Everything to the right restarts just after it.
        for i in level + 1..k {
            self.idx[i] = self.idx[i - 1] + 1;
        }
    }
}

impl Iterator for CardIter {
    type Item = CardBitSet;

    fn next(&mut self) -> Option<CardBitSet> {
        if self.done {
            return None;
        }
        let result = self.idx.iter().map(|&i| self.possible_cards[i]).collect();
        self.advance();
        Some(result)
    }
}

/// Every unordered pair of distinct cards from the set, as card tuples.
///
/// The lower-indexed card comes first.
pub fn card_pairs(cards: CardBitSet) -> impl Iterator<Item = (Card, Card)> {
    let cards: Vec<Card> = cards.iter().collect();
    CardIter::new(&cards, 2).filter_map(|pair| {
        let mut iter = pair.iter();
        Some((iter.next()?, iter.next()?))
    })
}
