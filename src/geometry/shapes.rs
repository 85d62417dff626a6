//! Shape geometry used by the drawing tools
//!
//! Pure functions only. The brushes that call them live in the host.

use super::{Coordinate, Region};
use crate::errors::LifeError;
use rustc_hash::FxHashSet;

/// Cells on the straight line between two points, both ends included
pub fn line(from: Coordinate, to: Coordinate) -> Vec<Coordinate> {
    // Bresenham over i64 so the error term cannot overflow
    let (mut row, mut col) = (from.row as i64, from.col as i64);
    let (end_row, end_col) = (to.row as i64, to.col as i64);
    let d_col = (end_col - col).abs();
    let d_row = -(end_row - row).abs();
    let step_col = if col < end_col { 1 } else { -1 };
    let step_row = if row < end_row { 1 } else { -1 };
    let mut error = d_col + d_row;

    let mut cells = Vec::with_capacity((d_col.max(-d_row) + 1) as usize);
    loop {
        cells.push(Coordinate::new(row as i32, col as i32));
        if row == end_row && col == end_col {
            break;
        }
        let doubled = 2 * error;
        if doubled >= d_row {
            error += d_row;
            col += step_col;
        }
        if doubled <= d_col {
            error += d_col;
            row += step_row;
        }
    }
    cells
}

/// Every cell on the boundary ring of a region, in row-major order
pub fn box_outline(region: &Region) -> Vec<Coordinate> {
    if region.is_empty() {
        return Vec::new();
    }

    let mut cells = Vec::new();
    for row in region.row as i64..=region.bottom_side() {
        let on_horizontal_edge = row == region.row as i64 || row == region.bottom_side();
        if on_horizontal_edge {
            for col in region.col as i64..=region.right_side() {
                cells.push(Coordinate::new(row as i32, col as i32));
            }
        } else {
            cells.push(Coordinate::new(row as i32, region.col));
            if region.width > 1 {
                cells.push(Coordinate::new(row as i32, region.right_side() as i32));
            }
        }
    }
    cells
}

/// 4-connected fill from `start` over cells for which `is_open` holds
///
/// The fill never leaves `bounds`. If more than `limit` cells would be filled
/// the fill is abandoned and nothing is returned.
pub fn flood_fill<F>(
    start: Coordinate,
    bounds: &Region,
    is_open: F,
    limit: usize,
) -> Result<Vec<Coordinate>, LifeError>
where
    F: Fn(Coordinate) -> bool,
{
    if !bounds.contains(start) || !is_open(start) {
        return Ok(Vec::new());
    }

    let mut visited = FxHashSet::default();
    let mut worklist = vec![start];
    let mut filled = Vec::new();
    visited.insert(start);

    while let Some(cell) = worklist.pop() {
        filled.push(cell);
        if filled.len() > limit {
            return Err(LifeError::FillLimitExceeded { limit });
        }

        for next in cell.orthogonal_neighbors() {
            if bounds.contains(next) && is_open(next) && visited.insert(next) {
                worklist.push(next);
            }
        }
    }

    filled.sort();
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_horizontal_and_diagonal() {
        let horizontal = line(Coordinate::new(0, 0), Coordinate::new(0, 3));
        assert_eq!(
            horizontal,
            vec![
                Coordinate::new(0, 0),
                Coordinate::new(0, 1),
                Coordinate::new(0, 2),
                Coordinate::new(0, 3)
            ]
        );

        let diagonal = line(Coordinate::new(2, 2), Coordinate::new(0, 0));
        assert_eq!(
            diagonal,
            vec![
                Coordinate::new(2, 2),
                Coordinate::new(1, 1),
                Coordinate::new(0, 0)
            ]
        );
    }

    #[test]
    fn test_line_single_point() {
        let point = Coordinate::new(-5, 9);
        assert_eq!(line(point, point), vec![point]);
    }

    #[test]
    fn test_box_outline() {
        let outline = box_outline(&Region::new(0, 0, 3, 3));
        assert_eq!(outline.len(), 8);
        assert!(!outline.contains(&Coordinate::new(1, 1)));

        assert_eq!(box_outline(&Region::new(0, 0, 1, 3)).len(), 3);
        assert!(box_outline(&Region::new(0, 0, 0, 3)).is_empty());
    }

    #[test]
    fn test_flood_fill_stops_at_walls() {
        // A 5x5 area with a vertical wall at col 2
        let bounds = Region::new(0, 0, 5, 5);
        let filled = flood_fill(Coordinate::new(0, 0), &bounds, |c| c.col != 2, 100).unwrap();
        assert_eq!(filled.len(), 10);
        assert!(filled.iter().all(|c| c.col < 2));
    }

    #[test]
    fn test_flood_fill_limit() {
        let bounds = Region::new(0, 0, 10, 10);
        let result = flood_fill(Coordinate::new(5, 5), &bounds, |_| true, 20);
        assert!(matches!(
            result,
            Err(LifeError::FillLimitExceeded { limit: 20 })
        ));
    }

    #[test]
    fn test_flood_fill_closed_start() {
        let bounds = Region::new(0, 0, 3, 3);
        let filled = flood_fill(Coordinate::new(1, 1), &bounds, |_| false, 10).unwrap();
        assert!(filled.is_empty());
    }
}
