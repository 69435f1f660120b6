//! Hold'em specific code: outs on the flop, per street category
//! distributions and averaging over an opponent range.

/// Flop, turn and river.
mod street;
/// Export `Street` and `StreetVector`
pub use self::street::{Street, StreetVector};

/// Module for finding the outs and runner-runner draws of a hand on the
/// flop.
mod outs;
/// Export the engine and the closed form helpers
pub use self::outs::{
    add_to_river, flush_draw_cards, fresh_pocket_pairs, river_probability, same_rank_probability,
    straight_draw_cards, turn_probability, two_card_probability, DrawPair, OutsEngine, OutsSet,
    RankPair, RIVER_UNSEEN, TURN_UNSEEN,
};

/// Module that turns outs into mutually exclusive category probabilities.
mod distribution;
/// Export `Distribution` and the table types
pub use self::distribution::{
    Distribution, DistributionBuilder, DrawIndicators, ProbabilityRow, ProbabilityTable,
    ROW_TOLERANCE,
};

/// Sets of concrete hands.
mod range;
/// Export `Range` and the notation seam
pub use self::range::{ComboNotation, DrawKind, Range, RangeNotation};

/// Module for averaging distributions over a range.
mod aggregate;
/// Export `RangeAggregator` and its results
pub use self::aggregate::{
    AggregatorConfig, DrawFrequencies, RangeAggregator, RangeOutcome, RangeReport,
};
