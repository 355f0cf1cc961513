//! UCI command parser.

use std::str::FromStr;

use super::SearchParams;
use crate::types::Depth;

/// Parsed UCI command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UciCommand {
    /// "uci" - Initialize UCI mode
    Uci,
    /// "debug on/off"
    Debug(bool),
    /// "isready" - Synchronization
    IsReady,
    /// "setoption name X value Y"
    SetOption { name: String, value: Option<String> },
    /// "ucinewgame" - New game starting
    UciNewGame,
    /// "position startpos/fen [moves ...]"
    Position { fen: Option<String>, moves: Vec<String> },
    /// "go ..." - Start searching
    Go(SearchParams),
    /// "stop" - Searches are synchronous, nothing to interrupt
    Stop,
    /// "hint" - Recommend a move for the side to move without playing it
    Hint,
    /// "quit" - Exit the engine
    Quit,
    /// "d" - Debug: display board and evaluation terms
    Display,
    /// Unknown command
    Unknown(String),
}

/// Parse a UCI command string into a UciCommand
pub fn parse_command(input: &str) -> UciCommand {
    let input = input.trim();
    let mut parts = input.split_whitespace();

    match parts.next() {
        Some("uci") => UciCommand::Uci,
        Some("debug") => {
            let on = parts.next() == Some("on");
            UciCommand::Debug(on)
        }
        Some("isready") => UciCommand::IsReady,
        Some("setoption") => parse_setoption(&mut parts),
        Some("ucinewgame") => UciCommand::UciNewGame,
        Some("position") => parse_position(&mut parts),
        Some("go") => parse_go(&mut parts),
        Some("stop") => UciCommand::Stop,
        Some("hint") => UciCommand::Hint,
        Some("quit") => UciCommand::Quit,
        Some("d") => UciCommand::Display,
        _ => UciCommand::Unknown(input.to_string()),
    }
}

/// "setoption name <id> [value <x>]". Both parts may contain spaces.
fn parse_setoption<'a>(parts: &mut impl Iterator<Item = &'a str>) -> UciCommand {
    let tokens: Vec<&str> = parts.collect();
    let value_at = tokens.iter().position(|&t| t == "value");
    let (name_tokens, value_tokens) = match value_at {
        Some(i) => (&tokens[..i], Some(&tokens[i + 1..])),
        None => (&tokens[..], None),
    };

    let name = match name_tokens.split_first() {
        Some((&"name", rest)) => rest.join(" "),
        _ => name_tokens.join(" "),
    };
    let value = value_tokens
        .filter(|v| !v.is_empty())
        .map(|v| v.join(" "));

    UciCommand::SetOption { name, value }
}

/// "position (startpos | fen <fields>) [moves <m1> ...]"
fn parse_position<'a>(parts: &mut impl Iterator<Item = &'a str>) -> UciCommand {
    let tokens: Vec<&str> = parts.collect();
    let moves_at = tokens.iter().position(|&t| t == "moves");
    let (setup, moves) = match moves_at {
        Some(i) => (&tokens[..i], &tokens[i + 1..]),
        None => (&tokens[..], &[][..]),
    };

    let fen = match setup.split_first() {
        Some((&"fen", fields)) if !fields.is_empty() => Some(fields.join(" ")),
        _ => None,
    };

    UciCommand::Position {
        fen,
        moves: moves.iter().map(|m| m.to_string()).collect(),
    }
}

fn parse_go<'a>(parts: &mut impl Iterator<Item = &'a str>) -> UciCommand {
    let mut params = SearchParams::new();

    while let Some(token) = parts.next() {
        match token {
            "depth" => params.depth = next_value::<i32>(parts).map(Depth::new),
            "movetime" => params.movetime = next_value(parts),
            "wtime" => params.wtime = next_value(parts),
            "btime" => params.btime = next_value(parts),
            "movestogo" => params.movestogo = next_value(parts),
            // Increments, node limits and the like take one argument we ignore
            "winc" | "binc" | "nodes" | "mate" => {
                parts.next();
            }
            _ => {}
        }
    }

    UciCommand::Go(params)
}

fn next_value<'a, T: FromStr>(parts: &mut impl Iterator<Item = &'a str>) -> Option<T> {
    parts.next().and_then(|v| v.parse().ok())
}
