//! Hex Placement Engine
//!
//! Plays a falling-piece puzzle on a hexagonal board: every unit is walked
//! from its spawn location to a resting place with a greedy move search, full
//! rows are cleared and scored, and the commands of each game are emitted as
//! one solution record per seed.

pub mod commands;
pub mod game;
pub mod geometry;
pub mod grid;
pub mod persistence;
pub mod pieces;
pub mod random;
pub mod solver;

use game::{Game, GameOutcome, Placement};
use grid::Board;
use persistence::{OutputRecord, Program};

/// Tag attached to every record unless overridden.
pub const DEFAULT_TAG: &str = "hippo rules.";

/// Phrase of power used by the command line unless overridden.
pub const DEFAULT_PHRASE: &str = "Ei!";

/// How solutions are written out.
#[derive(Debug, Clone)]
pub struct SolveOptions {
    /// Phrase spelled into the solution wherever its moves occur.
    pub phrase: Option<String>,
    pub tag: String,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            phrase: None,
            tag: DEFAULT_TAG.to_string(),
        }
    }
}

/// Hooks called while games are played.
///
/// Every method defaults to doing nothing, so `()` observes nothing.
pub trait GameObserver {
    fn game_started(&mut self, _seed: u32, _board: &Board) {}
    /// Called after a unit locked; `before` is the board it was placed on.
    fn unit_locked(&mut self, _before: &Board, _placement: &Placement) {}
    fn game_finished(&mut self, _outcome: &GameOutcome) {}
}

impl GameObserver for () {}

/// Builds the output record for a finished game.
pub fn solution_record(
    program: &Program,
    outcome: &GameOutcome,
    options: &SolveOptions,
) -> OutputRecord {
    let solution = match &options.phrase {
        Some(phrase) => commands::insert_phrase(&outcome.moves, phrase),
        None => commands::encode(&outcome.moves),
    };
    OutputRecord {
        problem_id: program.id,
        seed: outcome.seed,
        tag: options.tag.clone(),
        solution,
    }
}

/// Plays one game per seed, in input order, and returns their records.
pub fn solve_program(program: &Program, options: &SolveOptions) -> Vec<OutputRecord> {
    solve_program_with(program, options, &mut ())
}

/// Like [`solve_program`], reporting progress to `observer`.
pub fn solve_program_with(
    program: &Program,
    options: &SolveOptions,
    observer: &mut impl GameObserver,
) -> Vec<OutputRecord> {
    program
        .source_seeds
        .iter()
        .map(|&seed| {
            let outcome = play_observed(program, seed, observer);
            tracing::info!(
                problem = program.id,
                seed,
                score = outcome.score,
                units = outcome.units_placed,
                end = ?outcome.end,
                "game finished"
            );
            solution_record(program, &outcome, options)
        })
        .collect()
}

fn play_observed(program: &Program, seed: u32, observer: &mut impl GameObserver) -> GameOutcome {
    let mut game = Game::for_seed(program, seed);
    observer.game_started(seed, game.board());

    loop {
        let before = game.board().clone();
        match game.place_next() {
            Some(placement) => observer.unit_locked(&before, &placement),
            None => break,
        }
    }

    let outcome = game.finish();
    observer.game_finished(&outcome);
    outcome
}
