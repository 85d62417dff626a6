//! Canonical board fingerprints
//!
//! A [`Fingerprint`] is the cache key for a board state. Two live sets holding
//! the same cells always produce the same fingerprint, regardless of the order
//! the cells were inserted in or the hash seed of the set.
//!
//! # Encoding
//!
//! Cells are sorted row-major and written as decimal `row,col` pairs joined by
//! `;`. The empty board is the empty string.
//! ```text
//! {(0,2), (0,0), (0,1)}  →  "0,0;0,1;0,2"
//! ```

use super::LiveSet;
use crate::errors::LifeError;
use crate::geometry::Coordinate;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};

/// Canonical encoding of a [`LiveSet`]
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Wrap a string from storage. It is validated when parsed.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Fingerprint(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The fingerprint of the empty board
    pub fn empty() -> Self {
        Fingerprint(String::new())
    }

    /// True for the empty board
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of cells encoded, without decoding them
    pub fn cell_count(&self) -> usize {
        if self.0.is_empty() {
            0
        } else {
            self.0.split(';').count()
        }
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Encode a live set canonically
pub fn canonicalize(live: &LiveSet) -> Fingerprint {
    let cells = live.sorted();
    let mut encoded = String::with_capacity(cells.len() * 8);
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            encoded.push(';');
        }
        // Writing into a String cannot fail
        let _ = write!(encoded, "{},{}", cell.row, cell.col);
    }
    Fingerprint(encoded)
}

/// Decode a fingerprint back into the live set it was made from
pub fn parse(fingerprint: &Fingerprint) -> Result<LiveSet, LifeError> {
    let raw = fingerprint.as_str();
    if raw.is_empty() {
        return Ok(LiveSet::new());
    }

    let malformed = |reason: String| LifeError::MalformedFingerprint {
        fingerprint: raw.to_string(),
        reason,
    };

    let mut live = LiveSet::with_capacity(fingerprint.cell_count());
    for (i, pair) in raw.split(';').enumerate() {
        let (row, col) = pair
            .split_once(',')
            .ok_or_else(|| malformed(format!("cell {} is missing a ','", i)))?;
        let row = parse_component(row).ok_or_else(|| malformed(format!("bad row in cell {}", i)))?;
        let col = parse_component(col).ok_or_else(|| malformed(format!("bad column in cell {}", i)))?;
        live.insert(Coordinate::new(row, col));
    }

    Ok(live)
}

/// Strict decimal integer: optional leading '-', digits only
fn parse_component(text: &str) -> Option<i32> {
    let digits = text.strip_prefix('-').unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}
