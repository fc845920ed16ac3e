//! Game session driven by server messages.

use std::io::{Read, Write};

use tracing::{info, warn};

use crate::config::EngineConfig;
use crate::engines::controller::Controller;
use crate::errors::{EngineError, EngineResult};
use crate::game_state::board_state::BoardState;
use crate::game_state::board_types::Color;
use crate::game_state::line_move::Move;
use crate::protocol::messages::ServerMessage;
use crate::utils::move_text::move_to_text;

const READ_BUFFER_LEN: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Continue,
    GameOver,
}

#[derive(Debug)]
pub struct Session {
    config: EngineConfig,
    controller: Option<Controller>,
    last_own_move: Option<Move>,
}

impl Session {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            controller: None,
            last_own_move: None,
        }
    }

    #[inline]
    pub fn controller(&self) -> Option<&Controller> {
        self.controller.as_ref()
    }

    /// Reacts to one server message, writing any reply to `out`.
    pub fn handle(
        &mut self,
        message: ServerMessage,
        out: &mut impl Write,
    ) -> EngineResult<SessionStatus> {
        match message {
            ServerMessage::StartAsWhite(board) => {
                self.start(board, Color::White);
                self.play_searched_move(out)
            }
            ServerMessage::StartAsBlack(board) => {
                self.start(board, Color::Black);
                Ok(SessionStatus::Continue)
            }
            ServerMessage::OpponentMove(mv) => {
                let controller = self.controller.as_mut().ok_or(EngineError::NoGameInProgress)?;
                let applied = controller.apply_opponent_move(mv)?;
                // Our previous move is no longer the last one on the board.
                self.last_own_move = None;
                info!(color = %controller.color().opposite(), "opponent played {applied}");
                if self.is_over() {
                    return Ok(SessionStatus::GameOver);
                }
                self.play_searched_move(out)
            }
            ServerMessage::InvalidMove => self.replace_rejected_move(out),
        }
    }

    fn start(&mut self, board: BoardState, color: Color) {
        info!(%color, "new game");
        self.controller = Some(Controller::new(
            board,
            color,
            self.config.search(),
            self.config.move_time(),
        ));
        self.last_own_move = None;
    }

    fn play_searched_move(&mut self, out: &mut impl Write) -> EngineResult<SessionStatus> {
        let controller = self.controller.as_mut().ok_or(EngineError::NoGameInProgress)?;
        let mv = controller
            .choose_move()
            .best_move
            .ok_or(EngineError::NoLegalMoves)?;
        self.send_own_move(mv, out)
    }

    /// Takes back the rejected move and answers with a random legal one.
    fn replace_rejected_move(&mut self, out: &mut impl Write) -> EngineResult<SessionStatus> {
        let controller = self.controller.as_mut().ok_or(EngineError::NoGameInProgress)?;
        match self.last_own_move.take() {
            Some(rejected) => {
                warn!("server rejected {rejected}");
                controller.undo_move(&rejected);
            }
            None => warn!("invalid move notice without a pending move"),
        }

        let mv = controller
            .random_legal_move()
            .ok_or(EngineError::NoLegalMoves)?;
        self.send_own_move(mv, out)
    }

    fn send_own_move(&mut self, mv: Move, out: &mut impl Write) -> EngineResult<SessionStatus> {
        let controller = self.controller.as_mut().ok_or(EngineError::NoGameInProgress)?;
        let applied = controller.commit_own_move(mv)?;
        out.write_all(move_to_text(&applied).as_bytes())?;
        out.flush()?;
        self.last_own_move = Some(applied);

        if self.is_over() {
            Ok(SessionStatus::GameOver)
        } else {
            Ok(SessionStatus::Continue)
        }
    }

    fn is_over(&self) -> bool {
        match self.controller.as_ref().and_then(Controller::winner) {
            Some(color) => {
                info!(winner = %color, "game over");
                true
            }
            None => false,
        }
    }
}

/// Reads server messages from `stream` until the game ends or the server
/// closes the connection. Malformed or rejected messages are logged and
/// skipped; I/O failures end the session.
pub fn run_session<C: Read + Write>(stream: &mut C, config: EngineConfig) -> EngineResult<()> {
    let mut session = Session::new(config);
    let mut buffer = [0u8; READ_BUFFER_LEN];

    loop {
        let read = stream.read(&mut buffer)?;
        if read == 0 {
            info!("server closed the connection");
            return Ok(());
        }

        let message = match ServerMessage::decode(&buffer[..read]) {
            Ok(message) => message,
            Err(err) => {
                warn!("ignoring message: {err}");
                continue;
            }
        };

        match session.handle(message, &mut *stream) {
            Ok(SessionStatus::Continue) => {}
            Ok(SessionStatus::GameOver) => return Ok(()),
            Err(EngineError::Io(err)) => return Err(EngineError::Io(err)),
            Err(err) => warn!("message not handled: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::board_types::Coord;
    use crate::move_generation::line_move_generator::generate_moves;
    use crate::utils::move_text::parse_move;
    use std::io::Cursor;

    fn quick_config() -> EngineConfig {
        EngineConfig {
            max_depth: 1,
            move_time_ms: 2000,
            ..EngineConfig::default()
        }
    }

    /// White to move with exactly one connecting move, B7E4.
    fn white_wins_in_one() -> BoardState {
        let mut rows = [[0u8; 8]; 8];
        for (row, col) in [(1, 3), (2, 3), (2, 5), (4, 3), (6, 1)] {
            rows[row][col] = 4;
        }
        for (row, col) in [(1, 5), (4, 2), (6, 5), (7, 2)] {
            rows[row][col] = 2;
        }
        BoardState::from_codes(&rows).expect("valid codes")
    }

    #[test]
    fn starting_as_black_waits_for_white() {
        let mut session = Session::new(quick_config());
        let mut out = Vec::new();

        let status = session
            .handle(ServerMessage::StartAsBlack(BoardState::standard()), &mut out)
            .expect("handled");

        assert_eq!(status, SessionStatus::Continue);
        assert!(out.is_empty());
        assert_eq!(session.controller().map(Controller::color), Some(Color::Black));
    }

    #[test]
    fn moves_before_a_game_are_rejected() {
        let mut session = Session::new(quick_config());
        let mut out = Vec::new();
        let mv = Move::new(Coord::new(1, 0), Coord::new(1, 2));

        assert!(matches!(
            session.handle(ServerMessage::OpponentMove(mv), &mut out),
            Err(EngineError::NoGameInProgress)
        ));
        assert!(matches!(
            session.handle(ServerMessage::InvalidMove, &mut out),
            Err(EngineError::NoGameInProgress)
        ));
    }

    #[test]
    fn starting_as_white_plays_immediately() {
        let mut session = Session::new(quick_config());
        let mut out = Vec::new();
        let expected = *generate_moves(&BoardState::standard(), Color::White)
            .last()
            .expect("white has moves");

        let status = session
            .handle(ServerMessage::StartAsWhite(BoardState::standard()), &mut out)
            .expect("handled");

        assert_eq!(status, SessionStatus::Continue);
        assert_eq!(String::from_utf8(out).expect("ascii"), move_to_text(&expected));
    }

    #[test]
    fn opponent_move_is_applied_and_answered() {
        let mut session = Session::new(quick_config());
        let mut out = Vec::new();
        session
            .handle(ServerMessage::StartAsBlack(BoardState::standard()), &mut out)
            .expect("handled");

        let opponent = parse_move("A2 - C2").expect("valid text");
        let status = session
            .handle(ServerMessage::OpponentMove(opponent), &mut out)
            .expect("handled");

        assert_eq!(status, SessionStatus::Continue);
        let reply = parse_move(std::str::from_utf8(&out).expect("ascii")).expect("reply parses");

        let mut expected = BoardState::standard();
        expected.apply_checked(opponent).expect("legal");
        expected.apply_checked(reply).expect("legal");
        assert_eq!(session.controller().map(Controller::board), Some(&expected));
    }

    #[test]
    fn rejected_move_is_replaced_by_a_random_legal_move() {
        let mut session = Session::new(quick_config());
        let mut first = Vec::new();
        session
            .handle(ServerMessage::StartAsWhite(BoardState::standard()), &mut first)
            .expect("handled");

        let mut second = Vec::new();
        let status = session
            .handle(ServerMessage::InvalidMove, &mut second)
            .expect("handled");

        assert_eq!(status, SessionStatus::Continue);
        let replacement =
            parse_move(std::str::from_utf8(&second).expect("ascii")).expect("reply parses");

        // Only the replacement is on the board.
        let mut expected = BoardState::standard();
        expected.apply_checked(replacement).expect("legal for white");
        assert_eq!(session.controller().map(Controller::board), Some(&expected));
    }

    #[test]
    fn winning_move_ends_the_game() {
        let mut session = Session::new(quick_config());
        let mut out = Vec::new();

        let status = session
            .handle(ServerMessage::StartAsWhite(white_wins_in_one()), &mut out)
            .expect("handled");

        assert_eq!(status, SessionStatus::GameOver);
        assert_eq!(out, b"B7E4");
        assert_eq!(
            session.controller().and_then(Controller::winner),
            Some(Color::White)
        );
    }

    #[test]
    fn invalid_notice_after_an_opponent_move_keeps_that_move() {
        // Black engine; white's second move walls both black pawns into corners.
        let mut rows = [[0u8; 8]; 8];
        for (row, col) in [(0, 0), (7, 6)] {
            rows[row][col] = 2;
        }
        for (row, col) in [(0, 1), (1, 0), (1, 1), (6, 7), (6, 6), (2, 1)] {
            rows[row][col] = 4;
        }
        let start = BoardState::from_codes(&rows).expect("valid codes");

        let mut session = Session::new(quick_config());
        let mut out = Vec::new();
        session
            .handle(ServerMessage::StartAsBlack(start.clone()), &mut out)
            .expect("handled");

        let first = parse_move("B3 - E6").expect("valid text");
        session
            .handle(ServerMessage::OpponentMove(first), &mut out)
            .expect("handled");
        assert_eq!(out, b"G8H8");

        let second = parse_move("E6 - G8").expect("valid text");
        assert!(matches!(
            session.handle(ServerMessage::OpponentMove(second), &mut out),
            Err(EngineError::NoLegalMoves)
        ));

        let mut expected = start;
        for mv in [first, parse_move("G8H8").expect("valid text"), second] {
            expected.apply_checked(mv).expect("legal");
        }
        assert_eq!(session.controller().map(Controller::board), Some(&expected));

        // G8H8 is no longer the latest move, so nothing may be taken back.
        assert!(matches!(
            session.handle(ServerMessage::InvalidMove, &mut out),
            Err(EngineError::NoLegalMoves)
        ));
        assert_eq!(session.controller().map(Controller::board), Some(&expected));
        assert_eq!(out, b"G8H8");
    }

    /// In-memory duplex stream: reads from a script, records writes.
    struct ScriptedStream {
        input: Cursor<Vec<u8>>,
        output: Vec<u8>,
    }

    impl Read for ScriptedStream {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            self.input.read(buf)
        }
    }

    impl Write for ScriptedStream {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.output.write(buf)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn run_session_stops_when_the_stream_closes() {
        let text = crate::utils::board_text::board_to_text(&BoardState::standard());
        let mut stream = ScriptedStream {
            input: Cursor::new(format!("2{text}").into_bytes()),
            output: Vec::new(),
        };

        run_session(&mut stream, quick_config()).expect("clean shutdown");
        assert!(stream.output.is_empty());
    }
}
