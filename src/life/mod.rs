//! Sparse Life engine
//!
//! This module owns the board representation and the rules applied to it:
//! - [`LiveSet`]: the set of live cells on an unbounded grid
//! - [`Rule`]: a Life-like birth/survival rule in B/S notation
//! - [`fingerprint`]: canonical, order-independent board encoding
//! - [`stepper`]: the pure next-generation function
//!
//! # Sparse Representation
//!
//! Only live cells are stored. A board with two gliders a billion cells apart
//! costs the same as one with the gliders side by side.

pub mod fingerprint;
pub mod stepper;

pub use fingerprint::{canonicalize, parse, Fingerprint};
pub use stepper::{step, step_with};

use crate::errors::LifeError;
use crate::geometry::{corners_of, Coordinate, Region};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// The live cells of a board
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LiveSet {
    cells: FxHashSet<Coordinate>,
}

impl LiveSet {
    pub fn new() -> Self {
        LiveSet::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        LiveSet {
            cells: FxHashSet::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Mark a cell alive. Returns false if it already was.
    pub fn insert(&mut self, cell: Coordinate) -> bool {
        self.cells.insert(cell)
    }

    /// Mark a cell dead. Returns false if it already was.
    pub fn remove(&mut self, cell: Coordinate) -> bool {
        self.cells.remove(&cell)
    }

    /// Flip a cell, returning its new state
    pub fn toggle(&mut self, cell: Coordinate) -> bool {
        if self.cells.remove(&cell) {
            false
        } else {
            self.cells.insert(cell);
            true
        }
    }

    pub fn contains(&self, cell: Coordinate) -> bool {
        self.cells.contains(&cell)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Iterate live cells in no particular order
    pub fn iter(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.cells.iter().copied()
    }

    /// Live cells in row-major order
    pub fn sorted(&self) -> Vec<Coordinate> {
        let mut cells: Vec<Coordinate> = self.cells.iter().copied().collect();
        cells.sort_unstable();
        cells
    }

    /// Smallest region holding every live cell, `None` for an empty board
    pub fn bounds(&self) -> Option<Region> {
        let cells: Vec<Coordinate> = self.cells.iter().copied().collect();
        corners_of(&cells).ok()
    }

    pub fn fingerprint(&self) -> Fingerprint {
        canonicalize(self)
    }
}

impl FromIterator<Coordinate> for LiveSet {
    fn from_iter<I: IntoIterator<Item = Coordinate>>(iter: I) -> Self {
        LiveSet {
            cells: iter.into_iter().collect(),
        }
    }
}

impl Extend<Coordinate> for LiveSet {
    fn extend<I: IntoIterator<Item = Coordinate>>(&mut self, iter: I) {
        self.cells.extend(iter);
    }
}

impl<'a> IntoIterator for &'a LiveSet {
    type Item = &'a Coordinate;
    type IntoIter = std::collections::hash_set::Iter<'a, Coordinate>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

/// A Life-like rule: neighbour counts that give birth and that let a cell survive
///
/// Bit `n` of each mask is set when a count of `n` applies. Serialized as its
/// B/S string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rule {
    birth: u16,
    survival: u16,
}

impl Rule {
    /// B3/S23
    pub const CONWAY: Rule = Rule {
        birth: 1 << 3,
        survival: (1 << 2) | (1 << 3),
    };

    pub fn births_on(&self, neighbors: u8) -> bool {
        neighbors <= 8 && self.birth & (1 << neighbors) != 0
    }

    pub fn survives_on(&self, neighbors: u8) -> bool {
        neighbors <= 8 && self.survival & (1 << neighbors) != 0
    }

    /// Parse `B3/S23` style notation (case-insensitive, either order)
    pub fn parse(text: &str) -> Result<Rule, LifeError> {
        let invalid = || LifeError::InvalidRule {
            rule: text.to_string(),
        };

        let mut birth = None;
        let mut survival = None;
        for part in text.trim().split('/') {
            let mut chars = part.chars();
            let target = match chars.next().map(|c| c.to_ascii_uppercase()) {
                Some('B') => &mut birth,
                Some('S') => &mut survival,
                _ => return Err(invalid()),
            };
            if target.is_some() {
                return Err(invalid());
            }

            let mut mask = 0u16;
            for c in chars {
                match c.to_digit(10) {
                    Some(n) if n <= 8 => mask |= 1 << n,
                    _ => return Err(invalid()),
                }
            }
            *target = Some(mask);
        }

        match (birth, survival) {
            // B0 would light up every empty cell of the unbounded plane
            (Some(birth), Some(_)) if birth & 1 != 0 => Err(invalid()),
            (Some(birth), Some(survival)) => Ok(Rule { birth, survival }),
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for Rule {
    type Error = LifeError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        Rule::parse(&text)
    }
}

impl From<Rule> for String {
    fn from(rule: Rule) -> Self {
        rule.to_string()
    }
}

impl Default for Rule {
    fn default() -> Self {
        Rule::CONWAY
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "B")?;
        for n in 0..=8u8 {
            if self.births_on(n) {
                write!(f, "{}", n)?;
            }
        }
        write!(f, "/S")?;
        for n in 0..=8u8 {
            if self.survives_on(n) {
                write!(f, "{}", n)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_and_contains() {
        let mut live = LiveSet::new();
        let cell = Coordinate::new(3, -4);
        assert!(live.toggle(cell));
        assert!(live.contains(cell));
        assert!(!live.toggle(cell));
        assert!(live.is_empty());
    }

    #[test]
    fn test_bounds() {
        assert_eq!(LiveSet::new().bounds(), None);
        let live: LiveSet = [Coordinate::new(0, 0), Coordinate::new(2, 5)]
            .into_iter()
            .collect();
        assert_eq!(live.bounds(), Some(Region::new(0, 0, 6, 3)));
    }

    #[test]
    fn test_rule_parse_and_display() {
        assert_eq!(Rule::parse("B3/S23").unwrap(), Rule::CONWAY);
        assert_eq!(Rule::parse("s23/b3").unwrap(), Rule::CONWAY);

        let highlife = Rule::parse("B36/S23").unwrap();
        assert!(highlife.births_on(6));
        assert_eq!(highlife.to_string(), "B36/S23");

        let seeds = Rule::parse("B2/S").unwrap();
        assert!(!seeds.survives_on(2));
    }

    #[test]
    fn test_rule_serializes_as_notation() {
        let highlife = Rule::parse("B36/S23").unwrap();
        assert_eq!(serde_json::to_string(&highlife).unwrap(), r#""B36/S23""#);
        let back: Rule = serde_json::from_str(r#""b36/s23""#).unwrap();
        assert_eq!(back, highlife);
        assert!(serde_json::from_str::<Rule>(r#""B0/S23""#).is_err());
    }

    #[test]
    fn test_rule_parse_rejects_garbage() {
        assert!(Rule::parse("").is_err());
        assert!(Rule::parse("B3").is_err());
        assert!(Rule::parse("B9/S23").is_err());
        assert!(Rule::parse("B3/B3").is_err());
        assert!(Rule::parse("23/3").is_err());
        assert!(Rule::parse("B0/S23").is_err());
        assert!(Rule::parse("B03/S").is_err());
        // S0 is fine: it only concerns cells that are already alive
        assert!(Rule::parse("B3/S0").is_ok());
    }
}
