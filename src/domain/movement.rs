/// Movement resolver.
///
/// Pure function: given a position and a direction, compute where a sprite
/// ends up. Each axis wraps around independently; a wall at the candidate
/// cell cancels the move.
///
/// ## Wrap table
/// ┌───────┬──────────────────────────────┐
/// │ Dir   │ Candidate                     │
/// ├───────┼──────────────────────────────┤
/// │ Up    │ row-1, below 0 → rows-1        │
/// │ Down  │ row+1, reaching rows-1 → 0     │
/// │ Right │ col+1, reaching cols → 0       │
/// │ Left  │ col-1, below 0 → cols-1        │
/// └───────┴──────────────────────────────┘
///
/// The Down wrap fires one row early: the bottom row is only reachable by
/// wrapping upward from row 0. Moving Down from the bottom row targets a
/// cell outside the grid, which reads as wall, so the sprite stays put.

use super::entity::{Direction, Position};
use super::grid::Grid;

pub fn make_move(grid: &Grid, from: Position, dir: Direction) -> Position {
    let rows = grid.rows();
    let cols = grid.cols();
    if rows == 0 || cols == 0 {
        return from;
    }

    let mut to = from;
    match dir {
        Direction::Up => {
            to.row = if from.row == 0 { rows - 1 } else { from.row - 1 };
        }
        Direction::Down => {
            to.row = from.row + 1;
            if to.row == rows - 1 {
                to.row = 0;
            }
        }
        Direction::Right => {
            to.col = from.col + 1;
            if to.col == cols {
                to.col = 0;
            }
        }
        Direction::Left => {
            to.col = if from.col == 0 { cols - 1 } else { from.col - 1 };
        }
    }

    if grid.is_wall(to) {
        from
    } else {
        to
    }
}
