//! UCI command handler and main loop.

use std::io::{self, BufRead, Write};
use std::time::Duration;

use log::{debug, warn};

use super::parser::{parse_command, UciCommand};
use super::{SearchParams, ENGINE_AUTHOR, ENGINE_NAME};
use crate::config::EngineConfig;
use crate::eval;
use crate::rules::{Game, RulesAuthority};
use crate::search::{SearchResult, Searcher};
use crate::types::Depth;

/// Largest accepted MoveTime option, in milliseconds
const MAX_MOVE_TIME_MS: u64 = 60_000;

/// UCI protocol handler
pub struct UciHandler<W: Write = io::Stdout> {
    /// Current game, including the moves that led to it
    game: Game,
    searcher: Searcher,
    config: EngineConfig,
    /// Canonical name of the selected difficulty tier
    difficulty: String,
    /// Where replies go
    out: W,
    debug: bool,
    quit: bool,
}

impl Default for UciHandler {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl UciHandler {
    pub fn new(config: EngineConfig) -> Self {
        Self::with_output(config, io::stdout())
    }
}

impl<W: Write> UciHandler<W> {
    pub fn with_output(config: EngineConfig, out: W) -> Self {
        Self {
            game: Game::new(),
            searcher: Searcher::new(&config),
            difficulty: config.default_difficulty.clone(),
            config,
            out,
            debug: false,
            quit: false,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn difficulty(&self) -> &str {
        &self.difficulty
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Run the UCI main loop (blocking)
    pub fn run(&mut self) {
        let stdin = io::stdin();
        let reader = stdin.lock();

        for line in reader.lines() {
            match line {
                Ok(input) => {
                    if self.debug {
                        debug!("< {}", input);
                    }
                    self.handle_input(&input);
                    if self.quit {
                        break;
                    }
                }
                Err(e) => {
                    warn!("stdin closed: {}", e);
                    break;
                }
            }
        }
    }

    /// Handle a single UCI command
    pub fn handle_input(&mut self, input: &str) {
        let cmd = parse_command(input);
        self.handle_command(cmd);
    }

    fn handle_command(&mut self, cmd: UciCommand) {
        match cmd {
            UciCommand::Uci => self.cmd_uci(),
            UciCommand::Debug(on) => self.debug = on,
            UciCommand::IsReady => self.send("readyok"),
            UciCommand::SetOption { name, value } => self.cmd_setoption(&name, value.as_deref()),
            UciCommand::UciNewGame => self.game = Game::new(),
            UciCommand::Position { fen, moves } => self.cmd_position(fen.as_deref(), &moves),
            UciCommand::Go(params) => self.cmd_go(&params),
            UciCommand::Stop => {}
            UciCommand::Hint => self.cmd_hint(),
            UciCommand::Quit => self.quit = true,
            UciCommand::Display => self.cmd_display(),
            UciCommand::Unknown(s) => {
                if !s.is_empty() {
                    debug!("unknown command: {}", s);
                }
            }
        }
    }

    /// Send output to GUI
    fn send(&mut self, msg: &str) {
        if let Err(e) = writeln!(self.out, "{}", msg).and_then(|_| self.out.flush()) {
            warn!("failed to write reply: {}", e);
        }
    }

    // === UCI Commands ===

    fn cmd_uci(&mut self) {
        self.send(&format!("id name {}", ENGINE_NAME));
        self.send(&format!("id author {}", ENGINE_AUTHOR));

        let vars: String = self
            .config
            .difficulty_names()
            .map(|name| format!(" var {}", name))
            .collect();
        let difficulty = format!(
            "option name Difficulty type combo default {}{}",
            self.difficulty, vars
        );
        let move_time = format!(
            "option name MoveTime type spin default {} min 1 max {}",
            self.searcher.move_time().as_millis(),
            MAX_MOVE_TIME_MS
        );
        self.send(&difficulty);
        self.send(&move_time);

        self.send("uciok");
    }

    fn cmd_setoption(&mut self, name: &str, value: Option<&str>) {
        match name.to_lowercase().as_str() {
            "difficulty" => {
                let Some(v) = value else { return };
                // Unknown tiers still take effect; they map to the fallback depth
                self.difficulty = match self.config.difficulty_name(v) {
                    Some(canonical) => canonical.to_string(),
                    None => {
                        warn!(
                            "unknown difficulty {:?}, searching at depth {}",
                            v, self.config.fallback_depth
                        );
                        v.to_string()
                    }
                };
            }
            "movetime" => match value.and_then(|v| v.parse::<u64>().ok()) {
                Some(ms) if ms > 0 => {
                    let ms = ms.min(MAX_MOVE_TIME_MS);
                    self.searcher = Searcher::with_move_time(Duration::from_millis(ms));
                }
                _ => warn!("ignoring MoveTime {:?}", value),
            },
            _ => debug!("unknown option: {}", name),
        }
    }

    fn cmd_position(&mut self, fen: Option<&str>, moves: &[String]) {
        let game = match fen {
            Some(f) => Game::from_fen(f),
            None => Ok(Game::new()),
        };
        self.game = match game {
            Ok(g) => g,
            Err(e) => {
                warn!("{}, using the start position", e);
                Game::new()
            }
        };

        for move_str in moves {
            if let Err(e) = self.game.apply_uci(move_str) {
                warn!("{}, ignoring the remaining moves", e);
                break;
            }
        }
    }

    fn current_depth(&self) -> Depth {
        self.config.depth_for(&self.difficulty)
    }

    fn cmd_go(&mut self, params: &SearchParams) {
        let limits = params.to_limits(self.current_depth());
        let result = self.searcher.search(&mut self.game, &limits);
        self.send_info(&result);

        match result.best_move {
            Some(m) => self.send(&format!("bestmove {}", m)),
            None => self.send("bestmove 0000"),
        }
    }

    /// Non-standard: suggest a move for whoever is to move.
    fn cmd_hint(&mut self) {
        let depth = self.current_depth();
        let suggestion = self.searcher.select_move(&mut self.game, depth);
        match suggestion {
            Some(m) => self.send(&format!("info string hint {}", m)),
            None => self.send("info string hint none"),
        }
    }

    fn send_info(&mut self, result: &SearchResult) {
        let stats = &result.stats;
        let mut info = format!(
            "info depth {} score cp {} nodes {} nps {} time {}",
            stats.depth.raw(),
            result.score.uci_cp(),
            stats.nodes,
            stats.nps(),
            stats.time_ms
        );
        if let Some(m) = result.best_move {
            info.push_str(&format!(" pv {}", m));
        }
        self.send(&info);
    }

    fn cmd_display(&mut self) {
        // Non-standard debug command to display the board
        let terms = eval::breakdown(&self.game);
        let moves: Vec<String> = self.game.moves_played().map(|m| m.uci()).collect();
        let text = format!(
            "{}\nMoves: {}\nSide to move: {:?}\nEval: material {} mobility {} pawns {} king {} total {}",
            self.game,
            moves.join(" "),
            self.game.side_to_move(),
            terms.material,
            terms.mobility,
            terms.pawn_structure,
            terms.king_safety,
            terms.total()
        );
        for line in text.lines() {
            self.send(line);
        }
    }
}
