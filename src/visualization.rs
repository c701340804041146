//! Text rendering of games for the `--debug` and `--board-only` flags.
//!
//! Everything is written to stderr so stdout stays a clean JSON array.

use hexfall::commands::encode;
use hexfall::game::{GameOutcome, Placement};
use hexfall::grid::{format_board, Board};
use hexfall::GameObserver;

/// Prints boards as games progress.
pub struct TextTrace {
    /// Also print every placement, not just the first and last board.
    placements: bool,
}

impl TextTrace {
    pub fn new(placements: bool) -> Self {
        Self { placements }
    }
}

impl GameObserver for TextTrace {
    fn game_started(&mut self, seed: u32, board: &Board) {
        eprintln!("seed {seed}: starting board");
        eprintln!("{board}");
        eprintln!();
    }

    fn unit_locked(&mut self, before: &Board, placement: &Placement) {
        if !self.placements {
            return;
        }
        eprintln!(
            "unit {} -> pivot ({}, {}) via \"{}\", cleared {}, +{}",
            placement.unit_index,
            placement.target.pivot.x,
            placement.target.pivot.y,
            encode(&placement.moves),
            placement.cleared,
            placement.points
        );
        eprintln!("{}", format_board(before, &placement.target.members));
        eprintln!();
    }

    fn game_finished(&mut self, outcome: &GameOutcome) {
        eprintln!(
            "seed {}: {:?} after {} units, score {}",
            outcome.seed, outcome.end, outcome.units_placed, outcome.score
        );
        eprintln!("{}", outcome.board);
        eprintln!();
    }
}
