//! Placement search for a single unit.
//!
//! - Targets: candidate placements come from dropping the unit's pivot on
//!   each board cell, last cell first.
//! - Spawn: units enter centered on the top row.
//! - Path: a greedy walk toward the target pivot picks the first acceptable
//!   move from a fixed priority table and never backtracks. It can miss paths
//!   that a full search would find; callers fall through to the next target.

use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::grid::Board;
use crate::pieces::{Cell, Move, PlacementKey, Unit};

/// Why no command sequence was produced for a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PathError {
    /// The walk got stuck before it reached the target placement.
    #[error("target is not reachable from the spawn location")]
    Unreachable,
    /// The target pivot was reached but the target can still move in every
    /// lockable direction, so it is not a resting position.
    #[error("target is not a resting position")]
    NotResting,
}

/// Moves tried to lock a unit in place, in order.
const LOCK_ORDER: [Move; 4] = [Move::SouthEast, Move::SouthWest, Move::East, Move::West];

/// Every legal placement of `unit` with its pivot on a board cell.
///
/// Cells are visited in row-major order and the result is reversed, so the
/// placement with the bottom-right-most pivot comes first. The move search
/// tries targets in this order, which makes it the placement heuristic.
pub fn enumerate_targets(board: &Board, unit: &Unit) -> Vec<Unit> {
    let mut targets = Vec::new();
    for y in 0..board.height() as i32 {
        for x in 0..board.width() as i32 {
            let placed = unit.move_to(Cell::new(x, y), unit.pivot);
            if placed.is_valid(board) {
                targets.push(placed);
            }
        }
    }
    targets.reverse();
    targets
}

/// Places `unit` at its spawn location.
///
/// The leftmost member lands on column `(board width - unit width) / 2`, then
/// the topmost member is lifted or dropped onto row 0. The result may be
/// invalid; the caller decides what a blocked spawn means.
pub fn start_location(board: &Board, unit: &Unit) -> Unit {
    let offset = (board.width() as i32 - unit.width()) / 2;

    let Some(leftmost) = unit.min_x_cell() else {
        return unit.clone();
    };
    let centered = unit.move_to(Cell::new(offset, leftmost.y), leftmost);

    let Some(topmost) = centered.min_y_cell() else {
        return centered;
    };
    centered.move_to(Cell::new(topmost.x, 0), topmost)
}

/// Moves worth trying when the target pivot lies `(xd, yd)` away.
///
/// Nothing is ever tried upward, and once the pivot shares the target's row
/// only sideways moves remain.
fn candidate_moves(xd: i32, yd: i32) -> &'static [Move] {
    use crate::pieces::Move::*;

    match (xd.signum(), yd.signum()) {
        (-1, 1) => &[
            West,
            SouthWest,
            SouthEast,
            East,
            RotateClockwise,
            RotateCounterClockwise,
        ],
        (0, 1) => &[
            SouthEast,
            SouthWest,
            East,
            West,
            RotateClockwise,
            RotateCounterClockwise,
        ],
        (1, 1) => &[East, SouthEast, SouthWest, West],
        (-1, 0) => &[West],
        (1, 0) => &[East],
        _ => &[],
    }
}

/// The first move in lock order that would push `target` off the board or
/// into an occupied cell.
pub fn locking_move(board: &Board, target: &Unit) -> Option<Move> {
    LOCK_ORDER
        .into_iter()
        .find(|&command| !target.step(command).is_valid(board))
}

/// Finds a command sequence that walks `start` to `target` and locks it.
///
/// The walk keeps every placement it has occupied and refuses to revisit any
/// of them, and never immediately reverses an east/west step. Success means
/// the walk ended on the target placement itself, pivot and members; the
/// returned sequence then ends with exactly one locking move.
pub fn find_moves(board: &Board, start: &Unit, target: &Unit) -> Result<Vec<Move>, PathError> {
    let mut current = start.clone();
    let mut moves: Vec<Move> = Vec::new();
    let mut visited: FxHashSet<PlacementKey> = FxHashSet::default();
    visited.insert(start.placement_key());

    'walk: loop {
        let xd = target.pivot.x - current.pivot.x;
        let yd = target.pivot.y - current.pivot.y;

        for &command in candidate_moves(xd, yd) {
            if moves.last().is_some_and(|&previous| command.undoes(previous)) {
                continue;
            }

            let next = current.step(command);
            let key = next.placement_key();
            if visited.contains(&key) {
                continue;
            }

            if next.is_valid(board) {
                visited.insert(key);
                current = next;
                moves.push(command);
                continue 'walk;
            }
        }

        // no candidate was acceptable
        break;
    }

    // a walk that turned on the way can reach the pivot in another shape
    if current != *target {
        return Err(PathError::Unreachable);
    }

    let lock = locking_move(board, target).ok_or(PathError::NotResting)?;
    moves.push(lock);
    Ok(moves)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::Move::*;

    fn cells(coords: &[(i32, i32)]) -> Vec<Cell> {
        coords.iter().map(|&(x, y)| Cell::new(x, y)).collect()
    }

    fn atom(x: i32, y: i32) -> Unit {
        Unit::new(vec![Cell::new(x, y)], Cell::new(x, y))
    }

    #[test]
    fn test_move_to_lower_right() {
        let board = Board::new(2, 3, &[]);
        let moves = find_moves(&board, &atom(1, 0), &atom(2, 1));
        assert_eq!(moves, Ok(vec![East, SouthEast, SouthEast]));
    }

    #[test]
    fn test_move_to_lower_right_with_obstacle() {
        let board = Board::new(2, 3, &cells(&[(2, 0)]));
        let moves = find_moves(&board, &atom(1, 0), &atom(2, 1));
        assert_eq!(moves, Ok(vec![SouthEast, East, SouthEast]));
    }

    #[test]
    fn test_move_to_lower_left() {
        let board = Board::new(2, 3, &[]);
        let moves = find_moves(&board, &atom(1, 0), &atom(0, 1));
        assert_eq!(moves, Ok(vec![West, SouthEast, SouthEast]));
    }

    #[test]
    fn test_move_further_to_lower_left() {
        let board = Board::new(5, 3, &[]);
        let moves = find_moves(&board, &atom(1, 0), &atom(0, 4));
        assert_eq!(
            moves,
            Ok(vec![West, SouthEast, SouthEast, West, SouthEast, SouthEast, West, SouthEast])
        );
    }

    #[test]
    fn test_move_through_rotation() {
        let board = Board::new(3, 3, &cells(&[(0, 1), (2, 1)]));
        let bar = Unit::new(cells(&[(0, 0), (1, 0)]), Cell::new(0, 0));
        let start = start_location(&board, &bar);
        let turned = Unit::new(cells(&[(1, 1), (2, 2)]), Cell::new(1, 1));

        let moves = find_moves(&board, &start, &turned);
        assert_eq!(moves, Ok(vec![East, RotateClockwise, SouthEast, SouthEast]));
    }

    #[test]
    fn test_turned_walk_does_not_reach_target() {
        let board = Board::new(8, 7, &cells(&[(3, 4), (4, 4), (1, 6), (5, 2), (6, 6)]));
        let bar = Unit::new(cells(&[(0, 0), (1, 0)]), Cell::new(0, 0));
        let start = start_location(&board, &bar);
        let target = Unit::new(cells(&[(4, 6), (5, 6)]), Cell::new(4, 6));

        // the walk turns and arrives at (4, 6) covering (4, 6) and (4, 7)
        assert_eq!(find_moves(&board, &start, &target), Err(PathError::Unreachable));
    }

    #[test]
    fn test_no_sequence_possible() {
        let board = Board::new(3, 2, &cells(&[(0, 1), (1, 1)]));
        let moves = find_moves(&board, &atom(0, 0), &atom(0, 2));
        assert_eq!(moves, Err(PathError::Unreachable));
    }

    #[test]
    fn test_start_equals_target_only_locks() {
        let board = Board::new(2, 3, &[]);
        let moves = find_moves(&board, &atom(1, 1), &atom(1, 1));
        assert_eq!(moves, Ok(vec![SouthEast]));
    }

    #[test]
    fn test_floating_target_is_not_resting() {
        let board = Board::new(3, 3, &[]);
        let moves = find_moves(&board, &atom(1, 0), &atom(1, 0));
        assert_eq!(moves, Err(PathError::NotResting));
    }

    #[test]
    fn test_locking_move_order() {
        // below is blocked on both sides, east is free: south-east locks first
        let board = Board::new(2, 3, &cells(&[(0, 1), (1, 1)]));
        assert_eq!(locking_move(&board, &atom(1, 0)), Some(SouthEast));
        // south-east free, south-west off the board
        let board = Board::new(3, 3, &[]);
        assert_eq!(locking_move(&board, &atom(0, 0)), Some(SouthWest));
        assert_eq!(locking_move(&board, &atom(1, 0)), None);
    }

    #[test]
    fn test_candidate_table() {
        assert_eq!(candidate_moves(-2, 3)[0], West);
        assert_eq!(candidate_moves(0, 1)[0], SouthEast);
        assert_eq!(candidate_moves(4, 1), &[East, SouthEast, SouthWest, West]);
        assert_eq!(candidate_moves(-1, 0), &[West]);
        assert_eq!(candidate_moves(3, 0), &[East]);
        assert!(candidate_moves(0, 0).is_empty());
        assert!(candidate_moves(2, -1).is_empty());
        assert!(candidate_moves(0, -1).is_empty());
    }

    #[test]
    fn test_moves_never_reverse_sideways() {
        let board = Board::new(8, 7, &cells(&[(3, 4), (4, 4), (1, 6), (5, 2), (6, 6)]));
        let bar = Unit::new(cells(&[(0, 0), (1, 0)]), Cell::new(0, 0));
        let start = start_location(&board, &bar);
        for target in enumerate_targets(&board, &bar) {
            if let Ok(moves) = find_moves(&board, &start, &target) {
                assert!(
                    !moves.windows(2).any(|pair| pair[1].undoes(pair[0])),
                    "sideways reversal in {moves:?}"
                );
            }
        }
    }

    #[test]
    fn test_targets_newest_first() {
        let board = Board::new(2, 2, &cells(&[(1, 0)]));
        let targets = enumerate_targets(&board, &atom(0, 0));
        assert_eq!(targets, vec![atom(1, 1), atom(0, 1), atom(0, 0)]);
    }

    #[test]
    fn test_targets_respect_shape() {
        let board = Board::new(2, 3, &[]);
        let bar = Unit::new(cells(&[(0, 0), (1, 0)]), Cell::new(0, 0));
        let pivots: Vec<Cell> = enumerate_targets(&board, &bar)
            .iter()
            .map(|target| target.pivot)
            .collect();
        assert_eq!(pivots, cells(&[(1, 1), (0, 1), (1, 0), (0, 0)]));
    }

    #[test]
    fn test_start_location_centers() {
        let board = Board::new(2, 3, &[]);
        assert_eq!(start_location(&board, &atom(0, 0)).pivot, Cell::new(1, 0));

        let board = Board::new(2, 2, &[]);
        assert_eq!(start_location(&board, &atom(0, 0)), atom(0, 0));
    }

    #[test]
    fn test_start_location_lifts_to_top_row() {
        let board = Board::new(2, 5, &[]);
        let unit = Unit::new(cells(&[(0, 1), (1, 1)]), Cell::new(0, 0));
        let start = start_location(&board, &unit);
        assert_eq!(start.members, cells(&[(1, 0), (2, 0)]));
        assert_eq!(start.pivot, Cell::new(0, -1));
    }
}
