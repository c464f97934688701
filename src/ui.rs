//! Terminal front end.
//!
//! Squares are written as two digits, row then column (`31` is row 3,
//! column 1). A lane is named by the square above it.

use std::io::{self, BufRead, Write};

use log::debug;
use thiserror::Error;

use crate::chess_move::PlatformAction;
use crate::game::{Game, GameState};
use crate::platforms::MAX_PLATFORMS;
use crate::position::{PieceType, Square};
use crate::utils::{extract_squares, format_bitboard};

const HELP: &str = "\
Commands:
  move <from> <to>     move a piece, e.g. `move 31 33`
  moves <square>       list legal moves of a piece
  place <lane>         place a platform under a square
  shift <from> <to>    move an active platform
  remove <lane>        remove an active platform
  promote q|r|b|n      choose a promotion piece
  board, new, help, quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Square, Square),
    Moves(Square),
    Platform(PlatformAction),
    Promote(PieceType),
    Board,
    New,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}'")]
    Unknown(String),
    #[error("'{0}' needs more arguments")]
    MissingArgument(String),
    #[error("'{0}' is not a square, expected two digits 0-7 such as 31")]
    BadSquare(String),
    #[error("'{0}' is not a promotion piece, expected q, r, b or n")]
    BadPiece(String),
}

fn parse_square(token: &str) -> Result<Square, CommandError> {
    let digits: Vec<u32> = token
        .chars()
        .filter(|c| *c != ',')
        .map(|c| c.to_digit(10).filter(|d| *d < 8))
        .collect::<Option<_>>()
        .ok_or_else(|| CommandError::BadSquare(token.to_string()))?;
    match digits[..] {
        [row, col] => Ok(Square::new(row as i32, col as i32)),
        _ => Err(CommandError::BadSquare(token.to_string())),
    }
}

/// Parses one line of input.
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let line = line.trim().to_lowercase();
    let mut tokens = line.split_whitespace();
    let name = tokens.next().ok_or(CommandError::Empty)?;
    let mut arg = || tokens.next().ok_or_else(|| CommandError::MissingArgument(name.to_string()));

    let command = match name {
        "move" | "m" => Command::Move(parse_square(arg()?)?, parse_square(arg()?)?),
        "moves" => Command::Moves(parse_square(arg()?)?),
        "place" => Command::Platform(PlatformAction::Place(parse_square(arg()?)?)),
        "shift" => {
            let from = parse_square(arg()?)?;
            let to = parse_square(arg()?)?;
            Command::Platform(PlatformAction::Move { from, to })
        }
        "remove" => Command::Platform(PlatformAction::Remove(parse_square(arg()?)?)),
        "promote" => {
            let token = arg()?;
            let piece_type = match token.chars().collect::<Vec<_>>()[..] {
                [letter] => PieceType::from_letter(letter),
                _ => None,
            };
            match piece_type {
                Some(piece_type) => Command::Promote(piece_type),
                None => return Err(CommandError::BadPiece(token.to_string())),
            }
        }
        "board" => Command::Board,
        "new" => Command::New,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(command)
}

/// Renders the board with a lane line under every row but the floor.
///
/// Lanes: `.` free, `=` active, `#` locked, `~` cooling down.
pub fn render_text(state: &GameState) -> String {
    let mut out = String::from("    0 1 2 3 4 5 6 7\n");
    for row in 0..8 {
        out.push_str(&format!(" {}  ", row));
        let cells: Vec<String> = (0..8)
            .map(|col| {
                state
                    .board
                    .get(Square::new(row, col))
                    .map_or('.', |piece| piece.to_char())
                    .to_string()
            })
            .collect();
        out.push_str(&cells.join(" "));
        out.push('\n');

        if row < 7 {
            let lanes: Vec<&str> = (0..8)
                .map(|col| match state.platforms.get(Square::new(row, col)) {
                    0 => " ",
                    1 => "=",
                    v if v > 1 => "#",
                    _ => "~",
                })
                .collect();
            out.push_str("    ");
            out.push_str(lanes.join(" ").trim_end());
            out.push('\n');
        }
    }
    out
}

fn status_line(game: &Game) -> String {
    let state = game.state();
    if let Some(text) = state.end_state.message(state.turn) {
        return text;
    }
    if let Some(square) = state.promotion_pending {
        return format!("{}: promote the pawn on {}", state.turn, square);
    }
    let mut line = format!("{} to move, platforms {}/{}", state.turn, state.active_platforms(), MAX_PLATFORMS);
    if game.is_in_check(state.turn) {
        line.push_str(", check!");
    }
    line
}

/// Runs the command loop until `quit` or end of input.
pub fn run<R: BufRead, W: Write>(game: &mut Game, input: R, mut out: W) -> io::Result<()> {
    writeln!(out, "Welcome to Gravity Chess! Type 'help' for commands.\n")?;
    writeln!(out, "{}{}", render_text(game.state()), status_line(game))?;

    for line in input.lines() {
        let line = line?;
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(CommandError::Empty) => continue,
            Err(e) => {
                writeln!(out, "{}", e)?;
                continue;
            }
        };
        debug!("command: {:?}", command);

        let result = match command {
            Command::Quit => break,
            Command::Help => {
                writeln!(out, "{}", HELP)?;
                continue;
            }
            Command::Moves(square) => {
                let legal = game.legal_moves(square);
                let moves: Vec<String> = extract_squares(legal).iter().map(|s| s.to_string()).collect();
                writeln!(out, "{}: {}", square, if moves.is_empty() { "none".to_string() } else { moves.join(" ") })?;
                write!(out, "{}", format_bitboard(legal))?;
                continue;
            }
            Command::Board => Ok(()),
            Command::New => {
                game.reset();
                Ok(())
            }
            Command::Move(from, to) => game.apply_move(from, to),
            Command::Platform(action) => game.platform_action(action),
            Command::Promote(piece_type) => game.resolve_promotion(piece_type),
        };

        match result {
            Ok(()) => writeln!(out, "{}{}", render_text(game.state()), status_line(game))?,
            Err(rejection) => writeln!(out, "Rejected: {}", rejection)?,
        }
    }
    Ok(())
}

pub fn play_game(mut game: Game) -> io::Result<()> {
    let stdin = io::stdin();
    run(&mut game, stdin.lock(), io::stdout())
}
