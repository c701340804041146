//! Command characters and phrase insertion.
//!
//! Every move can be written with any of six interchangeable characters.
//! Plain encoding uses the first one; a phrase of power replaces matching
//! runs of moves with its own spelling, which decodes to the same moves.

use crate::pieces::Move;

/// The six characters accepted for a move, preferred one first.
pub const fn characters(command: Move) -> &'static [char; 6] {
    match command {
        Move::East => &['b', 'c', 'e', 'f', 'y', '2'],
        Move::West => &['p', '\'', '!', '.', '0', '3'],
        Move::SouthEast => &['l', 'm', 'n', 'o', ' ', '5'],
        Move::SouthWest => &['a', 'g', 'h', 'i', 'j', '4'],
        Move::RotateClockwise => &['d', 'q', 'r', 'v', 'z', '1'],
        Move::RotateCounterClockwise => &['k', 's', 't', 'u', 'w', 'x'],
    }
}

/// Preferred character for a move.
#[inline]
pub const fn to_char(command: Move) -> char {
    characters(command)[0]
}

/// Decodes one command character. Letters are case-insensitive.
pub fn parse_command(c: char) -> Option<Move> {
    let c = c.to_ascii_lowercase();
    Move::ALL
        .into_iter()
        .find(|&command| characters(command).contains(&c))
}

/// Decodes a command string, or `None` if any character is not a command.
pub fn parse_commands(text: &str) -> Option<Vec<Move>> {
    text.chars().map(parse_command).collect()
}

/// Encodes moves with each move's preferred character.
pub fn encode(moves: &[Move]) -> String {
    moves.iter().map(|&command| to_char(command)).collect()
}

/// Encodes moves, spelling every non-overlapping run equal to `phrase` as the phrase.
///
/// An empty phrase or one with non-command characters leaves the plain encoding.
pub fn insert_phrase(moves: &[Move], phrase: &str) -> String {
    let pattern = match parse_commands(phrase) {
        Some(pattern) if !pattern.is_empty() => pattern,
        _ => return encode(moves),
    };

    let mut output = String::with_capacity(moves.len());
    let mut index = 0;
    while index < moves.len() {
        if moves[index..].starts_with(&pattern) {
            output.push_str(phrase);
            index += pattern.len();
        } else {
            output.push(to_char(moves[index]));
            index += 1;
        }
    }
    output
}
