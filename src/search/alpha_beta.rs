//! Iterative-deepening minimax search with killer-move ordering.
//!
//! The engine owns its board for the whole game and walks the tree with
//! in-place `apply`/`undo`. One pass per depth limit starting at 1; a pass
//! interrupted by the stop flag is thrown away and the answer of the last
//! completed pass stands.
//!
//! Pruning differs from textbook alpha-beta. A maximizing node returns the
//! first child value that beats the bound inherited from its parent, without
//! looking at the remaining siblings; a minimizing node does the same with the
//! first child under its bound. The bound a node hands to its children is its
//! own best value so far, starting from an infinite sentinel, and children
//! that report that sentinel back (they expanded nothing) never update it.
//! Move choices depend on this exact behavior, so it must not be "fixed".
//!
//! Root selection, applied once a pass completes:
//!
//! 1. If any root move starts on the outer ring, the last such move in
//!    generation order is the answer, whatever its value.
//! 2. Otherwise the highest-valued move wins; on equal values the later move
//!    replaces the earlier one only when it leaves the engine strictly more
//!    legal replies.
//!
//! A root move whose value is the win sentinel is returned at once, ending the
//! search before any further root move or depth is tried.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::config::SearchConfig;
use crate::game_state::board_state::BoardState;
use crate::game_state::board_types::Color;
use crate::game_state::line_move::Move;
use crate::move_generation::line_move_generator::{count_moves, generate_moves};
use crate::search::evaluation::{evaluate, is_decided, WIN_SCORE};
use crate::search::move_orderer::MoveOrderer;
use crate::search::search_control::{SearchPhase, StopSignal};

/// Why a search returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A root move wins outright.
    WinFound,
    /// The stop flag was raised.
    Stopped,
    /// Every depth up to the configured limit completed.
    DepthLimit,
    /// The engine's color has no legal move.
    NoMoves,
}

#[derive(Debug, Clone, Copy)]
pub struct SearchReport {
    pub best_move: Option<Move>,
    /// Search value of `best_move` at `completed_depth`; zero when no pass
    /// completed.
    pub value: f64,
    /// Deepest pass that ran to completion.
    pub completed_depth: usize,
    pub nodes: u64,
    pub elapsed: Duration,
    pub outcome: SearchOutcome,
}

/// Result of one root pass at a fixed depth limit.
enum RootPass {
    Completed { best: Move, value: f64 },
    Win(Move),
    Interrupted,
}

#[derive(Debug, Clone)]
pub struct SearchEngine {
    board: BoardState,
    color: Color,
    orderer: MoveOrderer,
    config: SearchConfig,
    phase: SearchPhase,
    nodes: u64,
    current_max_depth: usize,
}

impl SearchEngine {
    pub fn new(board: BoardState, color: Color, config: SearchConfig) -> Self {
        Self {
            board,
            color,
            orderer: MoveOrderer::new(),
            config,
            phase: SearchPhase::Idle,
            nodes: 0,
            current_max_depth: 0,
        }
    }

    #[inline]
    pub fn board(&self) -> &BoardState {
        &self.board
    }

    /// Mutable board access for moves played outside the search.
    #[inline]
    pub fn board_mut(&mut self) -> &mut BoardState {
        &mut self.board
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    #[inline]
    pub fn orderer(&self) -> &MoveOrderer {
        &self.orderer
    }

    /// Returns a finished engine to `Idle` once its result has been read.
    pub fn acknowledge(&mut self) {
        if self.phase.is_finished() {
            self.phase = SearchPhase::Idle;
        }
    }

    /// Runs iterative deepening until a win is found, `stop` is raised or the
    /// depth limit is reached.
    pub fn search(&mut self, stop: &StopSignal) -> SearchReport {
        debug_assert_ne!(self.phase, SearchPhase::Running, "search re-entered");
        let started = Instant::now();
        self.phase = SearchPhase::Running;
        self.nodes = 0;
        self.orderer.reset();

        let root_moves = generate_moves(&self.board, self.color);
        let Some(&first_legal) = root_moves.first() else {
            self.phase = SearchPhase::Stopped;
            return self.report(None, 0.0, 0, started, SearchOutcome::NoMoves);
        };

        let mut answer: Option<(Move, f64)> = None;
        let mut completed_depth = 0;

        for depth in 1..=self.config.max_depth {
            if stop.should_stop() {
                break;
            }
            self.current_max_depth = depth;

            match self.search_root(&root_moves, stop) {
                RootPass::Win(mv) => {
                    debug!(depth, nodes = self.nodes, "winning move {mv}");
                    self.phase = SearchPhase::WinFound;
                    return self.report(
                        Some(mv),
                        WIN_SCORE,
                        completed_depth,
                        started,
                        SearchOutcome::WinFound,
                    );
                }
                RootPass::Completed { best, value } => {
                    debug!(depth, value, nodes = self.nodes, "depth complete, best {best}");
                    answer = Some((best, value));
                    completed_depth = depth;
                }
                RootPass::Interrupted => break,
            }
        }

        self.phase = SearchPhase::Stopped;
        let outcome = if completed_depth == self.config.max_depth {
            SearchOutcome::DepthLimit
        } else {
            SearchOutcome::Stopped
        };
        match answer {
            Some((best, value)) => {
                self.report(Some(best), value, completed_depth, started, outcome)
            }
            None => self.report(Some(first_legal), 0.0, 0, started, outcome),
        }
    }

    fn search_root(&mut self, root_moves: &[Move], stop: &StopSignal) -> RootPass {
        let mut best_value = f64::NEG_INFINITY;
        let mut best_index = 0;
        let mut best_reply_count = 0;
        let mut border_pick: Option<(Move, f64)> = None;

        for (index, &candidate) in root_moves.iter().enumerate() {
            if stop.should_stop() {
                return RootPass::Interrupted;
            }

            let mut mv = candidate;
            self.board.apply(&mut mv);
            let value = self.minimum(best_value, 1, stop);
            let reply_count = count_moves(&self.board, self.color);
            self.board.undo(&mv);

            if value == WIN_SCORE {
                return RootPass::Win(mv);
            }

            if mv.from.is_on_outer_ring() {
                border_pick = Some((mv, value));
            }

            if value > best_value || (value == best_value && reply_count > best_reply_count) {
                best_value = value;
                best_index = index;
                best_reply_count = reply_count;
            }
        }

        // Children stop expanding as soon as the flag is raised, so a pass that
        // reached the end may still hold truncated values.
        if stop.should_stop() {
            return RootPass::Interrupted;
        }

        let (best, value) =
            border_pick.unwrap_or((root_moves[best_index], best_value));
        RootPass::Completed { best, value }
    }

    /// Engine to move. `alpha` is the parent's best value so far.
    fn maximum(&mut self, alpha: f64, depth: usize, stop: &StopSignal) -> f64 {
        self.nodes += 1;
        let value = evaluate(&self.board, self.color);
        if depth == self.current_max_depth || is_decided(value) {
            return value;
        }

        let mut moves = generate_moves(&self.board, self.color);
        self.orderer.order(&mut moves, depth);

        let mut best = f64::NEG_INFINITY;
        for mut mv in moves {
            if stop.should_stop() {
                break;
            }
            self.board.apply(&mut mv);
            let child = self.minimum(best, depth + 1, stop);
            self.board.undo(&mv);

            if child > alpha {
                self.orderer.signal_cutoff(&mv, depth);
                return child;
            }
            if child > best && child != f64::INFINITY {
                best = child;
            }
        }
        best
    }

    /// Opponent to move. `beta` is the parent's best value so far.
    fn minimum(&mut self, beta: f64, depth: usize, stop: &StopSignal) -> f64 {
        self.nodes += 1;
        let value = evaluate(&self.board, self.color);
        if depth == self.current_max_depth || is_decided(value) {
            return value;
        }

        let mut moves = generate_moves(&self.board, self.color.opposite());
        self.orderer.order(&mut moves, depth);

        let mut best = f64::INFINITY;
        for mut mv in moves {
            if stop.should_stop() {
                break;
            }
            self.board.apply(&mut mv);
            let child = self.maximum(best, depth + 1, stop);
            self.board.undo(&mv);

            if child < beta {
                self.orderer.signal_cutoff(&mv, depth);
                return child;
            }
            if child < best && child != f64::NEG_INFINITY {
                best = child;
            }
        }
        best
    }

    fn report(
        &self,
        best_move: Option<Move>,
        value: f64,
        completed_depth: usize,
        started: Instant,
        outcome: SearchOutcome,
    ) -> SearchReport {
        SearchReport {
            best_move,
            value,
            completed_depth,
            nodes: self.nodes,
            elapsed: started.elapsed(),
            outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::board_types::Coord;

    fn board_of(pawns: &[(u8, u8, u8)]) -> BoardState {
        let mut rows = [[0u8; 8]; 8];
        for &(row, col, code) in pawns {
            rows[row as usize][col as usize] = code;
        }
        BoardState::from_codes(&rows).expect("valid codes")
    }

    fn engine(board: BoardState, color: Color, max_depth: usize) -> SearchEngine {
        SearchEngine::new(board, color, SearchConfig::new(max_depth))
    }

    #[test]
    fn single_winning_move_is_returned_immediately() {
        let board = board_of(&[
            (1, 3, 2),
            (2, 3, 2),
            (2, 5, 2),
            (4, 3, 2),
            (6, 1, 2),
            (1, 5, 4),
            (4, 2, 4),
            (6, 5, 4),
            (7, 2, 4),
        ]);
        let mut engine = engine(board, Color::Black, 6);

        let report = engine.search(&StopSignal::new());

        // B7E4 joins the last black pawn to the group.
        assert_eq!(
            report.best_move,
            Some(Move::new(Coord::new(6, 1), Coord::new(3, 4)))
        );
        assert_eq!(report.outcome, SearchOutcome::WinFound);
        assert_eq!(report.completed_depth, 0);
        assert_eq!(engine.phase(), SearchPhase::WinFound);

        engine.acknowledge();
        assert_eq!(engine.phase(), SearchPhase::Idle);
    }

    #[test]
    fn no_pawns_means_no_move() {
        let board = board_of(&[(0, 0, 4), (7, 7, 4)]);
        let mut engine = engine(board, Color::Black, 3);

        let report = engine.search(&StopSignal::new());

        assert_eq!(report.best_move, None);
        assert_eq!(report.outcome, SearchOutcome::NoMoves);
    }

    #[test]
    fn stop_before_first_pass_falls_back_to_first_legal_move() {
        let board = BoardState::standard();
        let first = generate_moves(&board, Color::Black)[0];
        let mut engine = engine(board, Color::Black, 6);
        let stop = StopSignal::new();
        stop.request_stop();

        let report = engine.search(&stop);

        assert_eq!(report.best_move, Some(first));
        assert_eq!(report.outcome, SearchOutcome::Stopped);
        assert_eq!(report.completed_depth, 0);
    }

    #[test]
    fn last_outer_ring_move_overrides_value() {
        // Every black pawn starts on the ring, so the last generated move wins.
        let board = BoardState::standard();
        let last = *generate_moves(&board, Color::Black)
            .last()
            .expect("start position has moves");
        let mut engine = engine(board, Color::Black, 1);

        let report = engine.search(&StopSignal::new());

        assert_eq!(report.best_move, Some(last));
        assert_eq!(report.outcome, SearchOutcome::DepthLimit);
        assert_eq!(report.completed_depth, 1);
    }

    #[test]
    fn interior_moves_prefer_value_then_reply_count() {
        let mut board = board_of(&[
            (2, 2, 2),
            (2, 5, 2),
            (5, 2, 2),
            (5, 5, 2),
            (0, 0, 4),
            (3, 6, 4),
            (7, 7, 4),
        ]);

        let mut expected: Option<(Move, f64, usize)> = None;
        for mut mv in generate_moves(&board, Color::Black) {
            board.apply(&mut mv);
            let value = evaluate(&board, Color::Black);
            let replies = count_moves(&board, Color::Black);
            board.undo(&mv);

            let better = match expected {
                None => true,
                Some((_, best, best_replies)) => {
                    value > best || (value == best && replies > best_replies)
                }
            };
            if better {
                expected = Some((mv, value, replies));
            }
        }
        let (expected_move, expected_value, _) = expected.expect("black has moves");

        let mut engine = engine(board, Color::Black, 1);
        let report = engine.search(&StopSignal::new());

        assert_eq!(report.best_move, Some(expected_move));
        assert_eq!(report.value, expected_value);
        assert!(!expected_move.from.is_on_outer_ring());
    }

    #[test]
    fn later_tie_with_more_replies_replaces_earlier() {
        let mut board = board_of(&[
            (1, 3, 2),
            (6, 1, 2),
            (3, 4, 2),
            (5, 2, 2),
            (5, 6, 4),
            (1, 4, 4),
            (3, 0, 4),
            (4, 6, 4),
        ]);
        let earlier = Move::new(Coord::new(1, 3), Coord::new(2, 3));
        let later = Move::new(Coord::new(1, 3), Coord::new(3, 5));

        let mut replies = Vec::new();
        for candidate in [earlier, later] {
            let mut mv = candidate;
            board.apply(&mut mv);
            assert_eq!(evaluate(&board, Color::Black), 6.0);
            replies.push(count_moves(&board, Color::Black));
            board.undo(&mv);
        }
        assert_eq!(replies, [25, 26]);

        let mut engine = engine(board, Color::Black, 1);
        let report = engine.search(&StopSignal::new());

        assert_eq!(report.best_move, Some(later));
        assert_eq!(report.value, 6.0);
    }

    #[test]
    fn later_tie_with_equal_replies_keeps_earlier() {
        let mut board = board_of(&[
            (2, 2, 2),
            (5, 6, 2),
            (3, 6, 2),
            (2, 1, 2),
            (0, 2, 4),
            (7, 0, 4),
            (2, 4, 4),
            (0, 0, 4),
        ]);
        let earlier = Move::new(Coord::new(3, 6), Coord::new(4, 5));
        let later = Move::new(Coord::new(5, 6), Coord::new(4, 5));

        let mut replies = Vec::new();
        for candidate in [earlier, later] {
            let mut mv = candidate;
            board.apply(&mut mv);
            assert_eq!(evaluate(&board, Color::Black), 6.0);
            replies.push(count_moves(&board, Color::Black));
            board.undo(&mv);
        }
        assert_eq!(replies, [28, 28]);

        let mut engine = engine(board, Color::Black, 1);
        let report = engine.search(&StopSignal::new());

        assert_eq!(report.best_move, Some(earlier));
        assert_eq!(report.value, 6.0);
    }

    #[test]
    fn outer_ring_move_beats_a_stronger_interior_move() {
        let mut board = board_of(&[
            (2, 5, 2),
            (6, 6, 2),
            (2, 6, 2),
            (3, 4, 2),
            (0, 7, 2),
            (0, 1, 4),
            (1, 4, 4),
            (2, 7, 4),
            (1, 1, 4),
        ]);
        let interior = Move::new(Coord::new(6, 6), Coord::new(4, 4));
        let mut mv = interior;
        board.apply(&mut mv);
        assert_eq!(evaluate(&board, Color::Black), 8.0);
        board.undo(&mv);

        let mut engine = engine(board, Color::Black, 1);
        let report = engine.search(&StopSignal::new());

        // H1H3 captures and is the last move leaving the ring.
        assert_eq!(
            report.best_move,
            Some(Move::new(Coord::new(0, 7), Coord::new(2, 7)))
        );
        assert_eq!(report.value, 5.0);
        assert_eq!(report.outcome, SearchOutcome::DepthLimit);
    }

    #[test]
    fn minimum_returns_the_first_child_under_its_bound() {
        let stop = StopSignal::new();

        // White's first reply scores 0.0; a later one scores -1.0.
        let mut cut = engine(BoardState::standard(), Color::Black, 2);
        cut.current_max_depth = 2;
        assert_eq!(cut.minimum(0.5, 1, &stop), 0.0);
        assert_eq!(cut.nodes, 2);

        // Equal values do not cut.
        let mut full = engine(BoardState::standard(), Color::Black, 2);
        full.current_max_depth = 2;
        assert_eq!(full.minimum(0.0, 1, &stop), -1.0);
        assert_eq!(full.nodes, 4);
    }

    #[test]
    fn maximum_returns_the_first_child_over_its_bound() {
        let mut engine = engine(BoardState::standard(), Color::Black, 2);
        engine.current_max_depth = 2;

        // The third black move is the first to score above zero.
        assert_eq!(engine.maximum(0.0, 1, &StopSignal::new()), 1.0);
        assert_eq!(engine.nodes, 4);
    }

    #[test]
    fn sentinel_children_never_become_the_best_value() {
        // White has no pawns, so every black move leads to an empty minimum.
        let corners = || board_of(&[(0, 0, 2), (0, 7, 2), (7, 0, 2), (7, 7, 2)]);
        let stop = StopSignal::new();

        let mut unbounded = engine(corners(), Color::Black, 3);
        unbounded.current_max_depth = 3;
        assert_eq!(unbounded.maximum(f64::INFINITY, 1, &stop), f64::NEG_INFINITY);

        let mut bounded = engine(corners(), Color::Black, 3);
        bounded.current_max_depth = 3;
        assert_eq!(bounded.maximum(0.0, 1, &stop), f64::INFINITY);
        assert_eq!(bounded.nodes, 2);
    }

    #[test]
    fn search_leaves_the_board_untouched() {
        let board = BoardState::standard();
        let mut engine = engine(board.clone(), Color::White, 3);

        let report = engine.search(&StopSignal::new());

        assert_eq!(engine.board(), &board);
        assert_eq!(report.completed_depth, 3);
        assert!(report.nodes > 0);
        assert_eq!(engine.phase(), SearchPhase::Stopped);
    }

    #[test]
    fn cutoffs_feed_the_killer_table() {
        let mut engine = engine(BoardState::standard(), Color::Black, 2);
        engine.search(&StopSignal::new());

        assert!(engine.orderer().killers(1).iter().any(Option::is_some));
    }
}
