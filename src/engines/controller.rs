//! Deadline owner for one game.
//!
//! The controller hands its `SearchEngine` to a scoped worker thread, waits on
//! a channel for at most the move budget, then raises the stop flag and blocks
//! until the worker reports. `choose_move` takes `&mut self` and joins the
//! worker before returning, so a second search can never overlap the first and
//! nothing touches the board while the worker owns it.

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use chrono::{DateTime, Local};
use rand::prelude::IndexedRandom;
use rand::rng;
use tracing::{debug, info, warn};

use crate::config::SearchConfig;
use crate::errors::EngineResult;
use crate::game_state::board_state::BoardState;
use crate::game_state::board_types::Color;
use crate::game_state::connectivity::winner;
use crate::game_state::line_move::Move;
use crate::move_generation::line_move_generator::generate_moves;
use crate::search::alpha_beta::{SearchEngine, SearchOutcome, SearchReport};
use crate::search::search_control::StopSignal;
use crate::utils::board_text::render_board;

#[derive(Debug)]
pub struct Controller {
    engine: SearchEngine,
    stop: StopSignal,
    move_time: Duration,
    last_refresh: Option<DateTime<Local>>,
}

impl Controller {
    pub fn new(board: BoardState, color: Color, config: SearchConfig, move_time: Duration) -> Self {
        Self {
            engine: SearchEngine::new(board, color, config),
            stop: StopSignal::new(),
            move_time,
            last_refresh: None,
        }
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.engine.color()
    }

    #[inline]
    pub fn board(&self) -> &BoardState {
        self.engine.board()
    }

    #[inline]
    pub fn last_refresh(&self) -> Option<DateTime<Local>> {
        self.last_refresh
    }

    /// Searches the current position for at most the move budget. A forced
    /// win returns as soon as it is found. The board is left unchanged; call
    /// [`Self::commit_own_move`] to play the result.
    pub fn choose_move(&mut self) -> SearchReport {
        let started_at = Local::now();
        if let Some(previous) = self.last_refresh {
            debug!(
                since_last_ms = (started_at - previous).num_milliseconds(),
                "search requested"
            );
        }
        self.last_refresh = Some(started_at);

        self.stop.reset();
        let stop = &self.stop;
        let engine = &mut self.engine;
        let budget = self.move_time;

        let report = thread::scope(|scope| {
            let (sender, receiver) = mpsc::channel();
            let worker = scope.spawn(move || {
                let report = engine.search(stop);
                // The receiver outlives the worker inside this scope.
                let _ = sender.send(report);
            });

            let report = match receiver.recv_timeout(budget) {
                Ok(report) => Some(report),
                Err(mpsc::RecvTimeoutError::Timeout) => {
                    stop.request_stop();
                    receiver.recv().ok()
                }
                Err(mpsc::RecvTimeoutError::Disconnected) => None,
            };
            if worker.join().is_err() {
                warn!("search worker panicked");
            }
            report
        });

        self.engine.acknowledge();
        let report = report.unwrap_or_else(|| self.fallback_report());

        match report.best_move {
            Some(mv) => info!(
                color = %self.color(),
                depth = report.completed_depth,
                value = report.value,
                nodes = report.nodes,
                elapsed_ms = report.elapsed.as_millis() as u64,
                outcome = ?report.outcome,
                "chose {mv}"
            ),
            None => warn!(color = %self.color(), "no legal move"),
        }
        report
    }

    /// Plays a move the engine chose.
    pub fn commit_own_move(&mut self, mv: Move) -> EngineResult<Move> {
        let applied = self.engine.board_mut().apply_checked(mv)?;
        debug!("board after {applied}:\n{}", render_board(self.board()));
        Ok(applied)
    }

    /// Plays a move received from the opponent after validating it.
    pub fn apply_opponent_move(&mut self, mv: Move) -> EngineResult<Move> {
        let applied = self.engine.board_mut().apply_checked(mv)?;
        debug!("board after opponent {applied}:\n{}", render_board(self.board()));
        Ok(applied)
    }

    /// Takes back a move previously returned by `commit_own_move` or
    /// `apply_opponent_move`; it must be the most recent one.
    pub fn undo_move(&mut self, mv: &Move) {
        self.engine.board_mut().undo(mv);
    }

    /// Uniformly random legal move for the engine's color.
    pub fn random_legal_move(&self) -> Option<Move> {
        let moves = generate_moves(self.board(), self.color());
        moves.as_slice().choose(&mut rng()).copied()
    }

    #[inline]
    pub fn winner(&self) -> Option<Color> {
        winner(self.board())
    }

    fn fallback_report(&self) -> SearchReport {
        let first = generate_moves(self.board(), self.color()).first().copied();
        SearchReport {
            best_move: first,
            value: 0.0,
            completed_depth: 0,
            nodes: 0,
            elapsed: Duration::ZERO,
            outcome: if first.is_some() {
                SearchOutcome::Stopped
            } else {
                SearchOutcome::NoMoves
            },
        }
    }
}
