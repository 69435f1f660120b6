use std::ops::{AddAssign, Div, Index};

use approx::relative_eq;
use tracing::{error, trace};

use crate::core::{classify, Board, Classification, Hand, HandCategory, OddsError};

use super::{OutsEngine, Street, StreetVector};

/// Default relative tolerance for a row summing to one.
pub const ROW_TOLERANCE: f64 = 1e-9;

/// Probability of each category being the final one on a street.
///
/// Indexed by [`HandCategory`]. The buckets are mutually exclusive, so a
/// row built by [`ProbabilityRow::from_cumulative`] sums to one.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProbabilityRow([f64; HandCategory::COUNT]);

impl ProbabilityRow {
    /// All the mass on one category.
    pub fn one_hot(category: HandCategory) -> Self {
        Self::default().with(category, 1.0)
    }

    /// A copy of the row with one bucket replaced.
    pub fn with(mut self, category: HandCategory, p: f64) -> Self {
        self.0[category.ordinal()] = p;
        self
    }

    /// Turn "`category` or better" probabilities into exclusive buckets.
    ///
    /// This is a fold from straight flush down to high card. Each bucket is
    /// the cumulative probability of its category minus the cumulative
    /// probability of the category above, so the mass already handed to
    /// stronger categories is never counted again.
    pub fn from_cumulative(at_least: impl Fn(HandCategory) -> f64) -> Self {
        let (row, _) = HandCategory::strongest_first().fold(
            (ProbabilityRow::default(), 0.0),
            |(row, above), category| {
                let cumulative = at_least(category);
                (row.with(category, cumulative - above), cumulative)
            },
        );
        row
    }

    pub fn get(&self, category: HandCategory) -> f64 {
        self.0[category.ordinal()]
    }

    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Probability of `category` or better.
    pub fn at_least(&self, category: HandCategory) -> f64 {
        self.0[category.ordinal()..].iter().sum()
    }

    /// Probability of a category strictly stronger than `category`.
    pub fn above(&self, category: HandCategory) -> f64 {
        self.0[category.ordinal() + 1..].iter().sum()
    }

    pub fn as_array(&self) -> [f64; HandCategory::COUNT] {
        self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = (HandCategory, f64)> + '_ {
        HandCategory::ALL.into_iter().zip(self.0.iter().copied())
    }

    /// Fail with `RowNotStochastic` if the row doesn't sum to one within
    /// `tolerance`.
    pub fn check(&self, street: Street, tolerance: f64) -> Result<(), OddsError> {
        let sum = self.sum();
        if relative_eq!(sum, 1.0, max_relative = tolerance) {
            Ok(())
        } else {
            error!(%street, sum, "probability row does not sum to one");
            Err(OddsError::RowNotStochastic {
                street: street.name(),
                sum,
            })
        }
    }
}

impl Index<HandCategory> for ProbabilityRow {
    type Output = f64;

    fn index(&self, category: HandCategory) -> &f64 {
        &self.0[category.ordinal()]
    }
}

impl AddAssign for ProbabilityRow {
    fn add_assign(&mut self, rhs: Self) {
        for (a, b) in self.0.iter_mut().zip(rhs.0) {
            *a += b;
        }
    }
}

impl Div<f64> for ProbabilityRow {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        Self(self.0.map(|p| p / rhs))
    }
}

/// One [`ProbabilityRow`] per street: flop (now), turn and river.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProbabilityTable {
    rows: [ProbabilityRow; 3],
}

impl ProbabilityTable {
    pub fn from_fn(f: impl FnMut(Street) -> ProbabilityRow) -> Self {
        Self {
            rows: Street::ALL.map(f),
        }
    }

    pub fn row(&self, street: Street) -> &ProbabilityRow {
        &self.rows[street.index()]
    }

    pub fn rows(&self) -> &[ProbabilityRow; 3] {
        &self.rows
    }

    /// Check every row, flop first.
    pub fn check(&self, tolerance: f64) -> Result<(), OddsError> {
        Street::ALL
            .into_iter()
            .try_for_each(|street| self.row(street).check(street, tolerance))
    }
}

impl Index<Street> for ProbabilityTable {
    type Output = ProbabilityRow;

    fn index(&self, street: Street) -> &ProbabilityRow {
        self.row(street)
    }
}

impl AddAssign for ProbabilityTable {
    fn add_assign(&mut self, rhs: Self) {
        for (a, b) in self.rows.iter_mut().zip(rhs.rows) {
            *a += b;
        }
    }
}

impl Div<f64> for ProbabilityTable {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        Self {
            rows: self.rows.map(|row| row / rhs),
        }
    }
}

/// Does a single card complete a straight or a flush pattern?
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DrawIndicators {
    pub straight: bool,
    pub flush: bool,
}

/// Everything known about one hand on a flop against one rival hand.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution {
    pub hand: Hand,
    /// The category made on the flop.
    pub category: HandCategory,
    pub table: ProbabilityTable,
    /// Probability of finishing strictly ahead of what the rival holds on
    /// the flop.
    pub beats_rival: StreetVector,
    pub draws: DrawIndicators,
}

impl Distribution {
    /// Build with the default row tolerance.
    pub fn new(hand: Hand, flop: &Board, rival: Hand) -> Result<Self, OddsError> {
        DistributionBuilder::default().build(hand, flop, rival)
    }
}

/// Builds a [`Distribution`] for a hand on a flop, with a rival hand taking
/// two cards out of the deck.
///
/// # Examples
///
/// ```
/// use flop_odds::core::{Board, Hand, HandCategory};
/// use flop_odds::holdem::{DistributionBuilder, Street};
///
/// let hand: Hand = "Kd3c".parse().unwrap();
/// let flop: Board = "Kc7cTs".parse().unwrap();
/// let rival: Hand = "Ah2h".parse().unwrap();
///
/// let dist = DistributionBuilder::default().build(hand, &flop, rival).unwrap();
/// assert_eq!(HandCategory::OnePair, dist.category);
/// assert_eq!(1.0, dist.table[Street::Flop][HandCategory::OnePair]);
/// assert!(dist.table[Street::River][HandCategory::TwoPair] > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistributionBuilder {
    tolerance: f64,
}

impl Default for DistributionBuilder {
    fn default() -> Self {
        Self {
            tolerance: ROW_TOLERANCE,
        }
    }
}

impl DistributionBuilder {
    /// Relative tolerance for every row summing to one.
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn build(&self, hand: Hand, flop: &Board, rival: Hand) -> Result<Distribution, OddsError> {
        let engine = OutsEngine::new(hand, flop, rival)?;
        let category = engine.current().category;

        let hits = HandCategory::ALL.map(|c| {
            if c <= category {
                StreetVector::splat(1.0)
            } else {
                engine.hit(c)
            }
        });
        let table = ProbabilityTable::from_fn(|street| {
            ProbabilityRow::from_cumulative(|c| hits[c.ordinal()][street])
        });
        table.check(self.tolerance)?;

        let rival_now = classify(rival, flop);
        let beats_rival = beats(&engine, &table, &rival_now);
        let draws = DrawIndicators {
            straight: !engine.straight_draw_outs().is_empty(),
            flush: !engine.flush_draw_outs().is_empty(),
        };

        trace!(
            %hand,
            %rival,
            %category,
            river_beats = beats_rival[Street::River],
            "built distribution"
        );
        Ok(Distribution {
            hand,
            category,
            table,
            beats_rival,
            draws,
        })
    }
}

/// Probability of finishing ahead of `rival` on each street: every category
/// above the rival's, plus for a high card or one pair rival the hands of
/// the same category with a better signature.
fn beats(engine: &OutsEngine, table: &ProbabilityTable, rival: &Classification) -> StreetVector {
    let above = StreetVector::from_fn(|street| table[street].above(rival.category));
    if rival.category > HandCategory::OnePair {
        return above;
    }
    let ahead = engine.hit_where(|class| class.beats(rival));
    let stronger = engine.hit_where(|class| class.category > rival.category);
    above + (ahead - stronger)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    use super::*;
    use crate::core::{card_pairs, Card, CardBitSet, Classifiable};

    fn dist(hand: &str, flop: &str, rival: &str) -> Distribution {
        Distribution::new(
            hand.parse().unwrap(),
            &flop.parse().unwrap(),
            rival.parse().unwrap(),
        )
        .unwrap()
    }

    fn deal(rng: &mut StdRng) -> (Hand, Board, Hand) {
        let mut deck: Vec<Card> = CardBitSet::default().iter().collect();
        deck.shuffle(rng);
        let hand = Hand::new(deck[0], deck[1]).unwrap();
        let rival = Hand::new(deck[2], deck[3]).unwrap();
        let flop = Board::new(deck[4..7].to_vec()).unwrap();
        (hand, flop, rival)
    }

    #[test]
    fn test_from_cumulative_per_category() {
        // Straight or better 0.25, flush or better 0.1, full house or better 0.
        let cumulative = |c: HandCategory| match c {
            HandCategory::StraightFlush
            | HandCategory::FourOfAKind
            | HandCategory::FullHouse => 0.0,
            HandCategory::Flush => 0.1,
            HandCategory::Straight => 0.25,
            _ => 1.0,
        };
        let row = ProbabilityRow::from_cumulative(cumulative);
        assert_eq!(0.0, row[HandCategory::StraightFlush]);
        assert_eq!(0.0, row[HandCategory::FourOfAKind]);
        assert_eq!(0.0, row[HandCategory::FullHouse]);
        assert_eq!(0.1, row[HandCategory::Flush]);
        assert_relative_eq!(0.15, row[HandCategory::Straight], max_relative = 1e-12);
        assert_eq!(0.75, row[HandCategory::ThreeOfAKind]);
        assert_eq!(0.0, row[HandCategory::TwoPair]);
        assert_eq!(0.0, row[HandCategory::HighCard]);
        assert_relative_eq!(1.0, row.sum(), max_relative = 1e-12);
        assert_relative_eq!(0.25, row.at_least(HandCategory::Straight), max_relative = 1e-12);
        assert_relative_eq!(0.1, row.above(HandCategory::Straight), max_relative = 1e-12);
    }

    #[test]
    fn test_check_rejects_bad_rows() {
        let row = ProbabilityRow::one_hot(HandCategory::Flush);
        assert!(row.check(Street::Turn, ROW_TOLERANCE).is_ok());

        let bad = row.with(HandCategory::Straight, 0.01);
        assert!(matches!(
            bad.check(Street::Turn, ROW_TOLERANCE),
            Err(OddsError::RowNotStochastic { street: "turn", .. })
        ));
        assert!(bad.check(Street::Turn, 0.1).is_ok());
    }

    #[test_log::test]
    fn test_pair_of_kings() {
        let d = dist("Kd3c", "Kc7cTs", "Ah2h");
        assert_eq!(HandCategory::OnePair, d.category);
        assert_eq!(
            ProbabilityRow::one_hot(HandCategory::OnePair),
            d.table[Street::Flop]
        );
        // Never worse than a pair later on.
        assert_eq!(0.0, d.table[Street::Turn][HandCategory::HighCard]);
        assert_eq!(0.0, d.table[Street::River][HandCategory::HighCard]);
        // Three kings, threes, sevens or tens on the turn.
        assert_relative_eq!(
            2.0 / 45.0,
            d.table[Street::Turn][HandCategory::ThreeOfAKind],
            max_relative = 1e-12
        );
        assert_relative_eq!(
            9.0 / 45.0,
            d.table[Street::Turn][HandCategory::TwoPair],
            max_relative = 1e-12
        );
        assert!(!d.draws.straight);
        assert!(!d.draws.flush);
    }

    #[test]
    fn test_flop_row_is_one_hot() {
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..25 {
            let (hand, flop, rival) = deal(&mut rng);
            let d = Distribution::new(hand, &flop, rival).unwrap();
            let expected = classify(hand, &flop).category;
            assert_eq!(expected, d.category);
            assert_eq!(ProbabilityRow::one_hot(expected), d.table[Street::Flop]);
        }
    }

    #[test]
    fn test_rows_are_stochastic_and_monotone() {
        let mut rng = StdRng::seed_from_u64(2024);
        for _ in 0..25 {
            let (hand, flop, rival) = deal(&mut rng);
            let d = Distribution::new(hand, &flop, rival).unwrap();
            for street in Street::ALL {
                let row = d.table[street];
                assert_relative_eq!(1.0, row.sum(), max_relative = 1e-9);
                for (_, p) in row.iter() {
                    assert!(p >= 0.0, "{row:?}");
                }
            }
            for category in HandCategory::ALL {
                let flop_p = d.table[Street::Flop].at_least(category);
                let turn = d.table[Street::Turn].at_least(category);
                let river = d.table[Street::River].at_least(category);
                assert!(flop_p <= turn + 1e-12);
                assert!(turn <= river + 1e-12);
            }
        }
    }

    #[test]
    fn test_river_row_matches_brute_force() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..8 {
            let (hand, flop, rival) = deal(&mut rng);
            let d = Distribution::new(hand, &flop, rival).unwrap();
            let dead = flop.dead_cards(&[hand, rival]).unwrap();
            let known = CardBitSet::from(hand) | flop.bits();

            let mut counts = [0usize; HandCategory::COUNT];
            for (a, b) in card_pairs(!dead) {
                let mut cards = known;
                cards.insert(a);
                cards.insert(b);
                counts[cards.classify().category.ordinal()] += 1;
            }
            for category in HandCategory::ALL {
                assert_relative_eq!(
                    counts[category.ordinal()] as f64 / 990.0,
                    d.table[Street::River][category],
                    epsilon = 1e-12
                );
            }
        }
    }

    #[test]
    fn test_beats_rival_made_hands() {
        // Two pair against an overpair.
        let ak = dist("AsKs", "AhKh2c", "QdQc");
        assert_eq!(1.0, ak.beats_rival[Street::Flop]);
        assert_relative_eq!(1.0, ak.beats_rival[Street::River], max_relative = 1e-12);

        let qq = dist("QdQc", "AhKh2c", "AsKs");
        assert_eq!(0.0, qq.beats_rival[Street::Flop]);
        // Only a queen (or runner-runner help) gets there.
        assert_relative_eq!(2.0 / 45.0, qq.beats_rival[Street::Turn], max_relative = 1e-12);
    }

    #[test]
    fn test_beats_rival_same_pair() {
        // Kings with a three kicker beat kings with a two kicker.
        let hero = dist("Kd3c", "Kc7cTs", "Kh2d");
        assert_eq!(1.0, hero.beats_rival[Street::Flop]);
        let villain = dist("Kh2d", "Kc7cTs", "Kd3c");
        assert_eq!(0.0, villain.beats_rival[Street::Flop]);
        assert!(villain.beats_rival[Street::River] > 0.0);
    }

    #[test]
    fn test_beats_rival_matches_brute_force() {
        let mut rng = StdRng::seed_from_u64(31);
        for _ in 0..10 {
            let (hand, flop, rival) = deal(&mut rng);
            let d = Distribution::new(hand, &flop, rival).unwrap();
            let rival_now = classify(rival, &flop);
            let dead = flop.dead_cards(&[hand, rival]).unwrap();
            let known = CardBitSet::from(hand) | flop.bits();

            let ahead = card_pairs(!dead)
                .filter(|&(a, b)| {
                    let mut cards = known;
                    cards.insert(a);
                    cards.insert(b);
                    let class = cards.classify();
                    if rival_now.category > HandCategory::OnePair {
                        class.category > rival_now.category
                    } else {
                        class.beats(&rival_now)
                    }
                })
                .count();
            assert_relative_eq!(
                ahead as f64 / 990.0,
                d.beats_rival[Street::River],
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn test_draw_indicators() {
        let d = dist("9h8h", "7h6hKc", "AsAd");
        assert!(d.draws.straight);
        assert!(d.draws.flush);
        let d = dist("Ah2d", "7h8hKc", "QdQc");
        assert_eq!(DrawIndicators::default(), d.draws);
    }

    #[test]
    fn test_rejects_turn_board() {
        let hand: Hand = "AsKs".parse().unwrap();
        let rival: Hand = "QdQc".parse().unwrap();
        let board: Board = "AhKh2c3d".parse().unwrap();
        assert_eq!(
            Err(OddsError::FlopRequired(4)),
            Distribution::new(hand, &board, rival)
        );
    }
}
