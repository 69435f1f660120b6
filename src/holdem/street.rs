use std::fmt;
use std::ops::{Add, AddAssign, Div, Index, Sub};

/// The three points at which a distribution is reported.
///
/// `Flop` is the situation right now, `Turn` after one more card and
/// `River` after two more cards.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Street {
    Flop = 0,
    Turn = 1,
    River = 2,
}

impl Street {
    pub const ALL: [Street; 3] = [Street::Flop, Street::Turn, Street::River];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            Street::Flop => "flop",
            Street::Turn => "turn",
            Street::River => "river",
        }
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One probability per street.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StreetVector([f64; 3]);

impl StreetVector {
    pub const fn new(flop: f64, turn: f64, river: f64) -> Self {
        Self([flop, turn, river])
    }

    /// The same value on every street.
    pub const fn splat(p: f64) -> Self {
        Self([p, p, p])
    }

    pub fn from_fn(f: impl FnMut(Street) -> f64) -> Self {
        Self(Street::ALL.map(f))
    }

    pub fn get(&self, street: Street) -> f64 {
        self.0[street.index()]
    }

    pub fn as_array(&self) -> [f64; 3] {
        self.0
    }
}

impl Index<Street> for StreetVector {
    type Output = f64;

    fn index(&self, street: Street) -> &f64 {
        &self.0[street.index()]
    }
}

impl Add for StreetVector {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::from_fn(|s| self[s] + rhs[s])
    }
}

impl Sub for StreetVector {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::from_fn(|s| self[s] - rhs[s])
    }
}

impl AddAssign for StreetVector {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Div<f64> for StreetVector {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        Self::from_fn(|s| self[s] / rhs)
    }
}
