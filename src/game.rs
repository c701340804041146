//! Game loop and scoring.
//!
//! A game draws units from a seeded source, walks each one to the first
//! reachable target, locks it, clears full rows and scores the placement.
//! It ends when the source runs out, a unit cannot spawn, or no target is
//! reachable.

use crate::grid::Board;
use crate::persistence::Program;
use crate::pieces::{Move, Unit};
use crate::random::{calc_random, calc_unit_indexes};
use crate::solver::{enumerate_targets, find_moves, start_location, PathError};

/// Why a game stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEnd {
    /// Every unit from the source was placed.
    SourceExhausted,
    /// The next unit overlaps occupied cells at its spawn location.
    SpawnBlocked,
    /// No target of the next unit could be reached.
    NoReachableTarget,
}

/// One locked unit.
#[derive(Clone, Debug)]
pub struct Placement {
    pub unit_index: usize,
    pub target: Unit,
    /// Commands from spawn to lock, lock move included.
    pub moves: Vec<Move>,
    pub cleared: usize,
    /// Points for this placement, line bonus included.
    pub points: u64,
}

/// Result of one finished game.
#[derive(Clone, Debug)]
pub struct GameOutcome {
    pub seed: u32,
    pub moves: Vec<Move>,
    pub score: u64,
    pub units_placed: usize,
    pub end: GameEnd,
    pub board: Board,
}

/// Points for locking a unit of `size` cells that cleared `cleared` rows.
///
/// Clearing more than one row with the previous unit adds a bonus of
/// `(previous_cleared - 1) / 10` of the base points.
pub fn score_move(size: usize, cleared: usize, previous_cleared: usize) -> u64 {
    let size = size as u64;
    let cleared = cleared as u64;
    let points = size + 100 * (1 + cleared) * cleared / 2;
    let line_bonus = if previous_cleared > 1 {
        (previous_cleared as u64 - 1) * points / 10
    } else {
        0
    };
    points + line_bonus
}

/// A game in progress.
pub struct Game<'a> {
    seed: u32,
    catalog: &'a [Unit],
    source: std::vec::IntoIter<usize>,
    board: Board,
    moves: Vec<Move>,
    score: u64,
    previous_cleared: usize,
    units_placed: usize,
    end: Option<GameEnd>,
}

impl<'a> Game<'a> {
    /// Starts a game that draws `catalog[i]` for each `i` in `source`.
    ///
    /// Every index in `source` must be within the catalog.
    pub fn new(seed: u32, board: Board, catalog: &'a [Unit], source: Vec<usize>) -> Self {
        Self {
            seed,
            catalog,
            source: source.into_iter(),
            board,
            moves: Vec::new(),
            score: 0,
            previous_cleared: 0,
            units_placed: 0,
            end: None,
        }
    }

    /// Starts the game `program` defines for `seed`.
    pub fn for_seed(program: &'a Program, seed: u32) -> Self {
        let randoms = calc_random(seed, program.source_length);
        let source = calc_unit_indexes(&randoms, program.units.len());
        Self::new(seed, program.initial_board(), &program.units, source)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn end(&self) -> Option<GameEnd> {
        self.end
    }

    /// Places the next unit, or returns `None` once the game has ended.
    pub fn place_next(&mut self) -> Option<Placement> {
        if self.end.is_some() {
            return None;
        }

        let Some(unit_index) = self.source.next() else {
            self.end = Some(GameEnd::SourceExhausted);
            return None;
        };
        let catalog = self.catalog;
        let unit = &catalog[unit_index];

        let start = start_location(&self.board, unit);
        if !start.is_valid(&self.board) {
            self.end = Some(GameEnd::SpawnBlocked);
            return None;
        }

        let Some((target, moves)) = choose_target(&self.board, &start, unit) else {
            self.end = Some(GameEnd::NoReachableTarget);
            return None;
        };

        let (board, cleared) = self.board.fill_cells(&target.members).clear_full_rows();
        self.board = board;

        let points = score_move(unit.members.len(), cleared, self.previous_cleared);
        self.previous_cleared = cleared;
        self.score += points;
        self.units_placed += 1;
        self.moves.extend_from_slice(&moves);

        tracing::debug!(
            seed = self.seed,
            unit = unit_index,
            pivot = ?target.pivot,
            moves = moves.len(),
            cleared,
            points,
            "unit locked"
        );

        Some(Placement {
            unit_index,
            target,
            moves,
            cleared,
            points,
        })
    }

    /// Consumes the game. Call after [`Game::place_next`] has returned `None`.
    pub fn finish(self) -> GameOutcome {
        GameOutcome {
            seed: self.seed,
            moves: self.moves,
            score: self.score,
            units_placed: self.units_placed,
            end: self.end.unwrap_or(GameEnd::SourceExhausted),
            board: self.board,
        }
    }

    /// Plays until the game ends.
    pub fn play(mut self) -> GameOutcome {
        while self.place_next().is_some() {}
        self.finish()
    }
}

/// Tries the unit's targets in order and returns the first one with a path.
fn choose_target(board: &Board, start: &Unit, unit: &Unit) -> Option<(Unit, Vec<Move>)> {
    for target in enumerate_targets(board, unit) {
        match find_moves(board, start, &target) {
            Ok(moves) => return Some((target, moves)),
            Err(PathError::Unreachable) => {}
            Err(PathError::NotResting) => {
                tracing::warn!(pivot = ?target.pivot, "reached a target that is not resting, skipping it");
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::encode;
    use crate::pieces::Cell;

    fn atom() -> Unit {
        Unit::new(vec![Cell::new(0, 0)], Cell::new(0, 0))
    }

    #[test]
    fn test_score_move() {
        assert_eq!(score_move(1, 0, 0), 1);
        assert_eq!(score_move(1, 1, 0), 101);
        assert_eq!(score_move(4, 2, 0), 304);
        assert_eq!(score_move(4, 0, 2), 4);
        assert_eq!(score_move(10, 1, 3), 132);
        assert_eq!(score_move(10, 1, 1), 110);
    }

    #[test]
    fn test_small_game_fills_bottom_row() {
        let catalog = [atom()];
        let game = Game::new(17, Board::new(2, 3, &[]), &catalog, vec![0, 0, 0]);
        let outcome = game.play();

        assert_eq!(encode(&outcome.moves), "bllllpll");
        assert_eq!(outcome.score, 103);
        assert_eq!(outcome.units_placed, 3);
        assert_eq!(outcome.end, GameEnd::SourceExhausted);
        assert_eq!(outcome.board, Board::new(2, 3, &[]));
    }

    #[test]
    fn test_placements_report_each_lock() {
        let catalog = [atom()];
        let mut game = Game::new(0, Board::new(2, 3, &[]), &catalog, vec![0, 0, 0]);

        let first = game.place_next().unwrap();
        assert_eq!(first.target.pivot, Cell::new(2, 1));
        assert_eq!(first.moves, vec![Move::East, Move::SouthEast, Move::SouthEast]);
        assert_eq!(first.cleared, 0);
        assert!(game.board().is_cell_full(Cell::new(2, 1)));

        let second = game.place_next().unwrap();
        assert_eq!(second.target.pivot, Cell::new(1, 1));

        let third = game.place_next().unwrap();
        assert_eq!(third.cleared, 1);
        assert_eq!(third.points, 101);

        assert!(game.place_next().is_none());
        assert_eq!(game.end(), Some(GameEnd::SourceExhausted));
        assert_eq!(game.score(), 103);
    }

    #[test]
    fn test_single_cell_board_clears_every_unit() {
        let catalog = [atom()];
        let outcome = Game::new(3, Board::new(1, 1, &[]), &catalog, vec![0; 5]).play();
        assert_eq!(encode(&outcome.moves), "lllll");
        assert_eq!(outcome.score, 505);
    }

    #[test]
    fn test_blocked_spawn_ends_game() {
        let catalog = [atom()];
        let board = Board::new(2, 2, &[Cell::new(0, 0)]);
        let outcome = Game::new(1, board, &catalog, vec![0, 0]).play();
        assert!(outcome.moves.is_empty());
        assert_eq!(outcome.units_placed, 0);
        assert_eq!(outcome.end, GameEnd::SpawnBlocked);
    }

    #[test]
    fn test_unreachable_targets_keep_earlier_moves() {
        // the second unit's only member sits east of its pivot; both cells it
        // could rest on are taken by then
        let offset = Unit::new(vec![Cell::new(1, 0)], Cell::new(0, 0));
        let catalog = [atom(), offset];
        let board = Board::new(2, 2, &[Cell::new(1, 0)]);
        let outcome = Game::new(5, board, &catalog, vec![0, 1]).play();

        assert_eq!(outcome.end, GameEnd::NoReachableTarget);
        assert_eq!(outcome.units_placed, 1);
        assert_eq!(outcome.moves, vec![Move::SouthEast, Move::East, Move::SouthEast]);
        assert_eq!(outcome.score, 1);
        assert_eq!(
            outcome.board,
            Board::new(2, 2, &[Cell::new(1, 0), Cell::new(1, 1)])
        );
    }

    #[test]
    fn test_line_bonus_carries_between_units() {
        let column = Unit::new(vec![Cell::new(0, 0), Cell::new(0, 1)], Cell::new(0, 0));
        let catalog = [column];
        let mut game = Game::new(9, Board::new(2, 1, &[]), &catalog, vec![0; 3]);

        let points: Vec<u64> = std::iter::from_fn(|| game.place_next())
            .map(|placement| {
                assert_eq!(placement.cleared, 2);
                placement.points
            })
            .collect();
        assert_eq!(points, vec![302, 332, 332]);
        assert_eq!(game.score(), 966);
    }

    #[test]
    fn test_for_seed_uses_catalog_order() {
        let program = Program {
            id: 1,
            units: vec![atom()],
            width: 3,
            height: 2,
            filled: vec![],
            source_length: 3,
            source_seeds: vec![17],
        };
        let outcome = Game::for_seed(&program, 17).play();
        assert_eq!(outcome.seed, 17);
        assert_eq!(outcome.units_placed, 3);
        assert_eq!(outcome.score, 103);
    }
}
