//! Dice-style random quantities.
//!
//! A [`Roll`] is an immutable `NdS+M` descriptor: `count` dice with `sides`
//! faces each, plus a flat `modifier`. Evaluating it draws fresh numbers
//! from the caller's RNG.

use std::fmt;
use std::str::FromStr;

use rand::{Rng, RngExt};

/// A dice descriptor: `count` × d`sides` + `modifier`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Roll {
    pub count: i32,
    pub sides: i32,
    pub modifier: i32,
}

impl Roll {
    /// The zero-variance roll `1d1`, always 1.
    pub const FIXED_ONE: Roll = Roll::new(1, 1, 0);

    /// Create a new roll descriptor. A roll with fewer than one side has
    /// no dice to throw and always yields `modifier`.
    pub const fn new(count: i32, sides: i32, modifier: i32) -> Self {
        Self {
            count,
            sides,
            modifier,
        }
    }

    /// Evaluate the roll: sum of `count` uniform draws in `[1, sides]`,
    /// plus `modifier`.
    pub fn roll<R: Rng + ?Sized>(&self, rng: &mut R) -> i32 {
        let mut total = self.modifier;
        if self.sides < 1 {
            return total;
        }
        for _ in 0..self.count {
            total += rng.random_range(1..=self.sides);
        }
        total
    }

    /// Smallest possible result.
    pub const fn min(&self) -> i32 {
        if self.sides < 1 {
            return self.modifier;
        }
        self.count + self.modifier
    }

    /// Largest possible result.
    pub const fn max(&self) -> i32 {
        if self.sides < 1 {
            return self.modifier;
        }
        self.count * self.sides + self.modifier
    }
}

impl fmt::Display for Roll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)?;
        match self.modifier {
            0 => Ok(()),
            m if m > 0 => write!(f, "+{m}"),
            m => write!(f, "{m}"),
        }
    }
}

/// Errors from parsing a roll such as `"2d6+1"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RollError {
    /// The text is not of the form `NdS`, `NdS+M` or `NdS-M`.
    Malformed(String),
    /// A number is missing, out of range, or has an invalid value
    /// (dice need at least one side; counts cannot be negative).
    InvalidNumber(String),
}

impl fmt::Display for RollError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed(s) => write!(f, "roll: malformed dice expression \u{201c}{s}\u{201d}"),
            Self::InvalidNumber(s) => write!(f, "roll: invalid number in \u{201c}{s}\u{201d}"),
        }
    }
}

impl std::error::Error for RollError {}

impl FromStr for Roll {
    type Err = RollError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let (count, rest) = text
            .split_once(['d', 'D'])
            .ok_or_else(|| RollError::Malformed(text.to_string()))?;
        let (sides, modifier) = match rest.find(['+', '-']) {
            Some(i) => (&rest[..i], &rest[i..]),
            None => (rest, "0"),
        };
        let number = |part: &str| -> Result<i32, RollError> {
            part.parse::<i32>()
                .map_err(|_| RollError::InvalidNumber(text.to_string()))
        };
        let roll = Roll::new(number(count)?, number(sides)?, number(modifier)?);
        if roll.count < 0 || roll.sides < 1 {
            return Err(RollError::InvalidNumber(text.to_string()));
        }
        Ok(roll)
    }
}
