//! This is the core module. It exports the non-holdem
//! related code: cards, sets of cards, hands, boards and the hand
//! classifier.

/// card.rs has value and suit.
mod card;
/// Re-export Card, Value, and Suit
pub use self::card::{Card, Suit, Value};

/// The crate error type.
mod error;
/// Export `OddsError`
pub use self::error::OddsError;

/// A set of cards as a bit mask over the 52 card deck.
mod card_bit_set;
/// Export `CardBitSet` and its iterator.
pub use self::card_bit_set::{CardBitSet, CardBitSetIter};

/// Two hole cards.
mod hand;
/// Export `Hand`
pub use self::hand::Hand;

/// The community cards.
mod board;
/// Export `Board`
pub use self::board::Board;

/// We want to be able to iterate over future runouts.
mod card_iter;
/// Make that functionality public.
pub use self::card_iter::{card_pairs, CardIter};

/// Hand classification code.
mod rank;
/// Export the trait and the results.
pub use self::rank::{
    classify, Classifiable, Classification, HandCategory, RankFrequencyMap, RankSignature,
    SuitFrequencyMap,
};
pub(crate) use self::rank::completes_straight;
