//! Integer coordinates and axis-aligned regions
//!
//! This module provides the plane primitives shared by the simulation and the
//! host:
//! - [`Coordinate`]: a `(row, col)` cell position
//! - [`Region`]: an axis-aligned rectangle with derived edges
//! - [`corners_of`]: the bounding region of a list of points
//! - [`shapes`]: line, box and flood-fill geometry used by drawing tools
//!
//! # Edges
//!
//! Region edges are computed in `i64` so that a region anchored near the end
//! of the `i32` range still has well-defined sides:
//! ```text
//! right_side  = col + width  - 1
//! bottom_side = row + height - 1
//! ```

pub mod shapes;

use crate::errors::LifeError;
use serde::{Deserialize, Serialize};

/// A cell position on the unbounded grid
///
/// Ordering is row-major, which is the order fingerprints are written in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Coordinate {
    pub row: i32,
    pub col: i32,
}

/// Offsets of the 8 Moore neighbours
const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

impl Coordinate {
    pub const fn new(row: i32, col: i32) -> Self {
        Coordinate { row, col }
    }

    /// Offset this coordinate, or `None` if it would leave the `i32` plane
    pub fn offset(self, d_row: i32, d_col: i32) -> Option<Self> {
        Some(Coordinate {
            row: self.row.checked_add(d_row)?,
            col: self.col.checked_add(d_col)?,
        })
    }

    /// The 8 surrounding cells, skipping any past the edge of the `i32` plane
    pub fn neighbors(self) -> impl Iterator<Item = Coordinate> {
        NEIGHBOR_OFFSETS
            .iter()
            .filter_map(move |&(dr, dc)| self.offset(dr, dc))
    }

    /// The 4 orthogonal neighbours
    pub fn orthogonal_neighbors(self) -> impl Iterator<Item = Coordinate> {
        [(-1, 0), (0, -1), (0, 1), (1, 0)]
            .into_iter()
            .filter_map(move |(dr, dc)| self.offset(dr, dc))
    }
}

impl From<(i32, i32)> for Coordinate {
    fn from((row, col): (i32, i32)) -> Self {
        Coordinate { row, col }
    }
}

/// An axis-aligned rectangle of cells
///
/// A region with zero width or height is empty and intersects nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Region {
    pub row: i32,
    pub col: i32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub const fn new(row: i32, col: i32, width: u32, height: u32) -> Self {
        Region {
            row,
            col,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn right_side(&self) -> i64 {
        self.col as i64 + self.width as i64 - 1
    }

    pub fn bottom_side(&self) -> i64 {
        self.row as i64 + self.height as i64 - 1
    }

    pub fn contains(&self, coordinate: Coordinate) -> bool {
        if self.is_empty() {
            return false;
        }
        let (row, col) = (coordinate.row as i64, coordinate.col as i64);
        row >= self.row as i64
            && row <= self.bottom_side()
            && col >= self.col as i64
            && col <= self.right_side()
    }

    /// True if the two rectangles share at least one cell
    ///
    /// Containment of one region by the other is a special case of overlap.
    pub fn intersects_or_contains(&self, other: &Region) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        (self.col as i64) <= other.right_side()
            && (other.col as i64) <= self.right_side()
            && (self.row as i64) <= other.bottom_side()
            && (other.row as i64) <= self.bottom_side()
    }

    /// True if the coordinate lies on the outer boundary ring
    pub fn is_on_edge(&self, coordinate: Coordinate) -> bool {
        if !self.contains(coordinate) {
            return false;
        }
        let (row, col) = (coordinate.row as i64, coordinate.col as i64);
        row == self.row as i64
            || row == self.bottom_side()
            || col == self.col as i64
            || col == self.right_side()
    }

    /// Grow the region by `margin` cells on every side, clamped to the `i32` plane
    pub fn expanded(&self, margin: u32) -> Region {
        let row = (self.row as i64 - margin as i64).max(i32::MIN as i64);
        let col = (self.col as i64 - margin as i64).max(i32::MIN as i64);
        let bottom = (self.bottom_side() + margin as i64).min(i32::MAX as i64);
        let right = (self.right_side() + margin as i64).min(i32::MAX as i64);
        Region {
            row: row as i32,
            col: col as i32,
            width: (right - col + 1).clamp(0, u32::MAX as i64) as u32,
            height: (bottom - row + 1).clamp(0, u32::MAX as i64) as u32,
        }
    }
}

/// Minimal bounding region of a non-empty list of points
///
/// A span of the whole `i32` axis has 2^32 cells, one more than `u32` can
/// hold, so it saturates to `u32::MAX`.
pub fn corners_of(points: &[Coordinate]) -> Result<Region, LifeError> {
    let first = points.first().ok_or(LifeError::EmptyPointList)?;

    let (mut top, mut left, mut bottom, mut right) = (first.row, first.col, first.row, first.col);
    for point in &points[1..] {
        top = top.min(point.row);
        bottom = bottom.max(point.row);
        left = left.min(point.col);
        right = right.max(point.col);
    }

    Ok(Region {
        row: top,
        col: left,
        width: span(left, right),
        height: span(top, bottom),
    })
}

fn span(low: i32, high: i32) -> u32 {
    (high as i64 - low as i64 + 1).min(u32::MAX as i64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_sides() {
        let region = Region::new(2, 3, 4, 5);
        assert_eq!(region.right_side(), 6);
        assert_eq!(region.bottom_side(), 6);
        assert!(!region.is_empty());
        assert!(Region::new(0, 0, 0, 3).is_empty());
        assert!(Region::new(0, 0, 3, 0).is_empty());
    }

    #[test]
    fn test_intersects_overlap_and_containment() {
        let outer = Region::new(0, 0, 10, 10);
        let inner = Region::new(2, 2, 3, 3);
        let touching = Region::new(9, 9, 5, 5);
        let apart = Region::new(10, 0, 2, 2);

        assert!(outer.intersects_or_contains(&inner));
        assert!(inner.intersects_or_contains(&outer));
        assert!(outer.intersects_or_contains(&touching));
        assert!(!outer.intersects_or_contains(&apart));
    }

    #[test]
    fn test_empty_region_never_intersects() {
        let outer = Region::new(0, 0, 10, 10);
        let empty = Region::new(5, 5, 0, 4);
        assert!(!outer.intersects_or_contains(&empty));
        assert!(!empty.intersects_or_contains(&outer));
        assert!(!empty.contains(Coordinate::new(5, 5)));
    }

    #[test]
    fn test_is_on_edge() {
        let region = Region::new(0, 0, 3, 3);
        assert!(region.is_on_edge(Coordinate::new(0, 0)));
        assert!(region.is_on_edge(Coordinate::new(2, 1)));
        assert!(region.is_on_edge(Coordinate::new(1, 2)));
        assert!(!region.is_on_edge(Coordinate::new(1, 1)));
        assert!(!region.is_on_edge(Coordinate::new(3, 0)));
    }

    #[test]
    fn test_corners_of() {
        let single = corners_of(&[Coordinate::new(4, -2)]).unwrap();
        assert_eq!(single, Region::new(4, -2, 1, 1));

        let spread = corners_of(&[
            Coordinate::new(1, 5),
            Coordinate::new(-3, 2),
            Coordinate::new(0, 7),
        ])
        .unwrap();
        assert_eq!(spread, Region::new(-3, 2, 6, 5));

        assert!(matches!(corners_of(&[]), Err(LifeError::EmptyPointList)));
    }

    #[test]
    fn test_corners_of_full_axis_saturates() {
        let wide = corners_of(&[Coordinate::new(0, i32::MIN), Coordinate::new(0, i32::MAX)]).unwrap();
        assert!(!wide.is_empty());
        assert_eq!(wide.col, i32::MIN);
        assert_eq!(wide.width, u32::MAX);
        assert_eq!(wide.height, 1);
        assert!(wide.contains(Coordinate::new(0, i32::MIN)));
        assert!(wide.contains(Coordinate::new(0, 0)));
    }

    #[test]
    fn test_neighbors_skip_overflow() {
        assert_eq!(Coordinate::new(0, 0).neighbors().count(), 8);
        assert_eq!(Coordinate::new(i32::MAX, 0).neighbors().count(), 5);
        assert_eq!(Coordinate::new(i32::MIN, i32::MIN).neighbors().count(), 3);
    }

    #[test]
    fn test_expanded() {
        let region = Region::new(0, 0, 2, 2).expanded(3);
        assert_eq!(region, Region::new(-3, -3, 8, 8));
    }
}
