//! Reading puzzle definitions and writing solution records.
//!
//! Input is a single JSON object:
//! `{id, units: [{members: [{x, y}], pivot: {x, y}}], width, height,
//! filled: [{x, y}], sourceLength, sourceSeeds: [int]}`.
//!
//! Output is a JSON array with one `{problemId, seed, tag, solution}` record
//! per seed.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::grid::Board;
use crate::pieces::{Cell, Unit};

/// Largest board accepted, in cells. Also keeps both dimensions within `i32`.
pub const MAX_BOARD_CELLS: usize = 1 << 24;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse program: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid program: {0}")]
    Invalid(String),
}

/// A puzzle definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    pub id: u32,
    pub units: Vec<Unit>,
    pub width: usize,
    pub height: usize,
    pub filled: Vec<Cell>,
    pub source_length: usize,
    pub source_seeds: Vec<u32>,
}

impl Program {
    /// Checks the invariants the engine relies on.
    pub fn validate(&self) -> Result<(), LoadError> {
        if self.width == 0 || self.height == 0 {
            return Err(LoadError::Invalid(format!(
                "board must not be empty, got {}x{}",
                self.width, self.height
            )));
        }
        match self.width.checked_mul(self.height) {
            Some(cells) if cells <= MAX_BOARD_CELLS => {}
            _ => {
                return Err(LoadError::Invalid(format!(
                    "board {}x{} exceeds {MAX_BOARD_CELLS} cells",
                    self.width, self.height
                )))
            }
        }
        if self.units.is_empty() {
            return Err(LoadError::Invalid("unit catalog is empty".into()));
        }
        if let Some(index) = self.units.iter().position(|unit| unit.members.is_empty()) {
            return Err(LoadError::Invalid(format!("unit {index} has no members")));
        }
        let on_board = |cell: &Cell| {
            cell.x >= 0
                && cell.y >= 0
                && (cell.x as usize) < self.width
                && (cell.y as usize) < self.height
        };
        if let Some(cell) = self.filled.iter().find(|cell| !on_board(*cell)) {
            return Err(LoadError::Invalid(format!(
                "filled cell ({}, {}) is outside the {}x{} board",
                cell.x, cell.y, self.width, self.height
            )));
        }
        Ok(())
    }

    /// The board every game of this program starts from.
    pub fn initial_board(&self) -> Board {
        Board::new(self.height, self.width, &self.filled)
    }
}

/// One solved seed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputRecord {
    pub problem_id: u32,
    pub seed: u32,
    pub tag: String,
    pub solution: String,
}

/// Parses and validates a program from JSON text.
pub fn parse_program(text: &str) -> Result<Program, LoadError> {
    let program: Program = serde_json::from_str(text)?;
    program.validate()?;
    Ok(program)
}

/// Reads, parses and validates a program file.
pub fn load_program(path: &Path) -> Result<Program, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_program(&text)
}

/// Serializes records as a compact JSON array.
pub fn to_json(records: &[OutputRecord]) -> serde_json::Result<String> {
    serde_json::to_string(records)
}

/// Writes records as a JSON array followed by a newline.
pub fn write_records(mut writer: impl Write, records: &[OutputRecord]) -> std::io::Result<()> {
    serde_json::to_writer(&mut writer, records)?;
    writeln!(writer)?;
    Ok(())
}
