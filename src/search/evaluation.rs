//! Static evaluation used at search cutoff nodes.

use crate::game_state::board_state::BoardState;
use crate::game_state::board_types::Color;
use crate::game_state::connectivity::winner;

/// Score of a position the engine's color has won.
pub const WIN_SCORE: f64 = 1.0e9;
/// Score of a position the opponent has won.
pub const LOSS_SCORE: f64 = -WIN_SCORE;

/// Score from `perspective`'s point of view: fewer own groups and more
/// central pawns are better. Decided games return the win/loss sentinels.
pub fn evaluate(board: &BoardState, perspective: Color) -> f64 {
    if let Some(won) = winner(board) {
        return if won == perspective {
            WIN_SCORE
        } else {
            LOSS_SCORE
        };
    }

    let opponent = perspective.opposite();
    let grouping = board.grouping();
    let centralization = board.centralization();

    grouping.value(opponent) - grouping.value(perspective)
        + f64::from(centralization.value(perspective))
        - f64::from(centralization.value(opponent))
}

#[inline]
pub fn is_decided(score: f64) -> bool {
    score == WIN_SCORE || score == LOSS_SCORE
}
