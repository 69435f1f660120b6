//! Exact hold'em odds from the flop.
//!
//! Given a hand, a flop and an opponent hand (or a range of them), this
//! crate works out the probability of every made-hand category right now,
//! after the turn and after the river. The numbers come from counting
//! cards, not from simulation.
//!
//! ```
//! use flop_odds::core::{Board, Hand, HandCategory, Value};
//! use flop_odds::holdem::{Distribution, Range, RangeAggregator, Street};
//!
//! let flop: Board = "Kc7cTs".parse().unwrap();
//! let hero: Hand = "Kd3c".parse().unwrap();
//! let villain: Hand = "AcQc".parse().unwrap();
//!
//! // The villain's flush draw, seen from the villain's side.
//! let dist = Distribution::new(villain, &flop, hero).unwrap();
//! assert_eq!(HandCategory::HighCard, dist.category);
//! assert!(dist.draws.flush);
//! assert!(dist.table[Street::River][HandCategory::Flush] > 0.25);
//!
//! // Against every pocket pair at once.
//! let range = Range::pocket_pairs(Value::Two);
//! let outcome = RangeAggregator::default()
//!     .aggregate(&range, &flop, hero)
//!     .unwrap();
//! let report = outcome.report().unwrap();
//! assert_eq!(HandCategory::OnePair, report.hero_category);
//! assert!(report.opponent_beats_hero[Street::Flop] > 0.0);
//! ```

/// Cards, hands, boards and hand classification.
pub mod core;
/// Outs, distributions and ranges for Texas hold'em.
pub mod holdem;
