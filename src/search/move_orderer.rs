//! Killer-move ordering.
//!
//! Each search depth remembers the two most recent moves that produced a
//! cutoff there. Killers are matched by origin and destination only and are
//! indexed by depth alone, not by side to move.

use crate::game_state::line_move::Move;

/// Depths covered by the killer table.
pub const KILLER_DEPTHS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOrderer {
    // [older, newer]
    killers: [[Option<Move>; 2]; KILLER_DEPTHS],
}

impl Default for MoveOrderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveOrderer {
    pub fn new() -> Self {
        Self {
            killers: [[None; 2]; KILLER_DEPTHS],
        }
    }

    /// Forgets every killer. Called once per top-level search.
    pub fn reset(&mut self) {
        self.killers = [[None; 2]; KILLER_DEPTHS];
    }

    /// The killers recorded at `depth`, older first.
    pub fn killers(&self, depth: usize) -> [Option<Move>; 2] {
        self.killers.get(depth).copied().unwrap_or([None; 2])
    }

    #[inline]
    pub fn is_killer(&self, mv: &Move, depth: usize) -> bool {
        self.killers(depth)
            .iter()
            .flatten()
            .any(|killer| killer.same_squares(mv))
    }

    /// Moves killers recorded at `depth` to the front, keeping the relative
    /// order of both the killers and the remaining moves.
    pub fn order(&self, moves: &mut [Move], depth: usize) {
        if self.killers(depth).iter().all(Option::is_none) {
            return;
        }
        // Stable sort on a boolean key is a stable partition.
        moves.sort_by_key(|mv| !self.is_killer(mv, depth));
    }

    /// Records `mv` as the newest killer at `depth` unless it already is one.
    pub fn signal_cutoff(&mut self, mv: &Move, depth: usize) {
        if self.is_killer(mv, depth) {
            return;
        }
        if let Some(slot) = self.killers.get_mut(depth) {
            slot[0] = slot[1];
            slot[1] = Some(*mv);
        }
    }
}
