use tracing::{debug, instrument};

use crate::core::{classify, Board, Hand, HandCategory, OddsError};

use super::{
    Distribution, DistributionBuilder, ProbabilityTable, Range, RangeNotation, StreetVector,
    ROW_TOLERANCE,
};

/// Configuration for averaging over a range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregatorConfig {
    /// Evaluate hands on the rayon pool. Needs the `parallel` feature.
    pub parallel: bool,
    /// Relative tolerance for every probability row summing to one.
    pub tolerance: f64,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            parallel: false,
            tolerance: ROW_TOLERANCE,
        }
    }
}

impl AggregatorConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), OddsError> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(OddsError::InvalidConfig(format!(
                "tolerance must be a positive number, found {}",
                self.tolerance
            )));
        }

        if self.parallel && !cfg!(feature = "parallel") {
            return Err(OddsError::InvalidConfig(
                "parallel evaluation needs the `parallel` feature".to_string(),
            ));
        }

        Ok(())
    }
}

/// Share of a range holding a one card straight or flush draw.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DrawFrequencies {
    pub straight: f64,
    pub flush: f64,
}

/// Averages over every live combo of an opponent range.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct RangeReport {
    pub hero: Hand,
    /// What the hero makes on the flop.
    pub hero_category: HandCategory,
    /// Combos left after removing those that use a known card.
    pub combos: usize,
    /// Mean table of the opponent's hand.
    pub opponent: ProbabilityTable,
    /// Mean table of the hero's hand, with each opponent combo in turn
    /// taken out of the deck.
    pub hero_table: ProbabilityTable,
    /// Mean probability of the opponent finishing ahead of the hero's flop
    /// hand.
    pub opponent_beats_hero: StreetVector,
    pub opponent_draws: DrawFrequencies,
}

/// The result of averaging over a range.
///
/// A range can lose every combo to card conflicts with the board and the
/// hero's hand. That is an expected answer, not an error.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum RangeOutcome {
    /// No combo of the range can be held alongside the known cards.
    EmptyRange,
    Evaluated(RangeReport),
}

impl RangeOutcome {
    pub fn is_empty_range(&self) -> bool {
        matches!(self, RangeOutcome::EmptyRange)
    }

    pub fn report(&self) -> Option<&RangeReport> {
        match self {
            RangeOutcome::EmptyRange => None,
            RangeOutcome::Evaluated(report) => Some(report),
        }
    }

    pub fn into_report(self) -> Option<RangeReport> {
        match self {
            RangeOutcome::EmptyRange => None,
            RangeOutcome::Evaluated(report) => Some(report),
        }
    }

    /// Pretty printed JSON for display layers.
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Running sums over the evaluated combos.
#[derive(Debug, Default)]
struct Totals {
    opponent: ProbabilityTable,
    hero: ProbabilityTable,
    beats_hero: StreetVector,
    straight_draws: usize,
    flush_draws: usize,
}

impl Totals {
    fn add(mut self, (opponent, hero): &(Distribution, Distribution)) -> Self {
        self.opponent += opponent.table;
        self.hero += hero.table;
        self.beats_hero += opponent.beats_rival;
        self.straight_draws += usize::from(opponent.draws.straight);
        self.flush_draws += usize::from(opponent.draws.flush);
        self
    }

    fn mean(self, hero: Hand, hero_category: HandCategory, combos: usize) -> RangeReport {
        let n = combos as f64;
        RangeReport {
            hero,
            hero_category,
            combos,
            opponent: self.opponent / n,
            hero_table: self.hero / n,
            opponent_beats_hero: self.beats_hero / n,
            opponent_draws: DrawFrequencies {
                straight: self.straight_draws as f64 / n,
                flush: self.flush_draws as f64 / n,
            },
        }
    }
}

/// Averages distributions over an opponent range.
///
/// Each live combo is built twice: as the opponent against the hero's hand,
/// and the hero's hand against that combo. The sums are taken in range
/// order and divided by the number of combos, with every combo weighted
/// the same.
///
/// # Examples
///
/// ```
/// use flop_odds::core::{Board, Hand};
/// use flop_odds::holdem::{Range, RangeAggregator, RangeOutcome};
///
/// let flop: Board = "AhKh2c".parse().unwrap();
/// let hero: Hand = "AsKs".parse().unwrap();
/// let aggregator = RangeAggregator::default();
///
/// // Every combo uses a known card.
/// let range: Range = "AsKs,AhKh".parse().unwrap();
/// let outcome = aggregator.aggregate(&range, &flop, hero).unwrap();
/// assert_eq!(RangeOutcome::EmptyRange, outcome);
///
/// let range: Range = "QdQc,JhTh".parse().unwrap();
/// let outcome = aggregator.aggregate(&range, &flop, hero).unwrap();
/// assert_eq!(2, outcome.report().unwrap().combos);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RangeAggregator {
    config: AggregatorConfig,
}

impl RangeAggregator {
    pub fn new(config: AggregatorConfig) -> Result<Self, OddsError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.config.parallel = parallel;
        self
    }

    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.config.tolerance = tolerance;
        self
    }

    pub fn config(&self) -> &AggregatorConfig {
        &self.config
    }

    /// Average over every combo of `range` that doesn't use a card of
    /// `flop` or `hero`.
    #[instrument(level = "debug", skip(self, range), fields(combos = range.len()))]
    pub fn aggregate(
        &self,
        range: &Range,
        flop: &Board,
        hero: Hand,
    ) -> Result<RangeOutcome, OddsError> {
        self.config.validate()?;
        if !flop.is_flop() {
            return Err(OddsError::FlopRequired(flop.len()));
        }
        flop.dead_cards(&[hero])?;

        let hero_category = classify(hero, flop).category;
        debug!(%hero_category, "classified hero");

        let live = range.without_conflicts(flop, hero);
        debug!(before = range.len(), after = live.len(), "filtered range");
        if live.is_empty() {
            return Ok(RangeOutcome::EmptyRange);
        }

        let views = self.evaluate(&live, flop, hero)?;
        let totals = views.iter().fold(Totals::default(), Totals::add);
        Ok(RangeOutcome::Evaluated(totals.mean(
            hero,
            hero_category,
            live.len(),
        )))
    }

    /// Expand `expression` with `notation`, then [`aggregate`] it.
    ///
    /// [`aggregate`]: RangeAggregator::aggregate
    pub fn aggregate_expression(
        &self,
        notation: &impl RangeNotation,
        expression: &str,
        flop: &Board,
        hero: Hand,
    ) -> Result<RangeOutcome, OddsError> {
        let range = notation.expand(expression)?;
        self.aggregate(&range, flop, hero)
    }

    /// Both views of every live combo, in range order.
    fn evaluate(
        &self,
        live: &Range,
        flop: &Board,
        hero: Hand,
    ) -> Result<Vec<(Distribution, Distribution)>, OddsError> {
        let builder = DistributionBuilder::default().tolerance(self.config.tolerance);
        let both = |opponent: &Hand| -> Result<(Distribution, Distribution), OddsError> {
            Ok((
                builder.build(*opponent, flop, hero)?,
                builder.build(hero, flop, *opponent)?,
            ))
        };
        let hands: Vec<Hand> = live.iter().collect();

        #[cfg(feature = "parallel")]
        if self.config.parallel {
            use rayon::prelude::*;
            return hands.par_iter().map(both).collect();
        }

        hands.iter().map(both).collect()
    }
}
