//! Per-game move history with an undo/redo cursor.
//!
//! `moves[..cursor]` is the active history; `moves[cursor..]` is the redo
//! tail. Recording a new move always discards the redo tail first.

use serde::{Deserialize, Serialize};

use crate::domain::state::Seat;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MoveAction {
    /// A regular move; the payload is only interpreted by the rules.
    Play { payload: String },
    /// The acting seat gave up.
    GiveUp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    /// 1-based position in the history; always `index + 1`.
    pub seq: u64,
    pub seat: Seat,
    pub action: MoveAction,
    /// Board as produced by the rules after this move.
    pub board_after: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveLog {
    /// Board at the moment the game became Active; replay starts here.
    pub initial_board: String,
    moves: Vec<Move>,
    cursor: usize,
}

impl MoveLog {
    pub fn new(initial_board: String) -> Self {
        Self {
            initial_board,
            moves: Vec::new(),
            cursor: 0,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Total recorded moves, including the redo tail.
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn active(&self) -> &[Move] {
        &self.moves[..self.cursor]
    }

    pub fn redo_tail(&self) -> &[Move] {
        &self.moves[self.cursor..]
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor < self.moves.len()
    }

    /// Last active move, if any.
    pub fn last_active(&self) -> Option<&Move> {
        self.active().last()
    }

    /// Truncate the redo tail and append a new move at the cursor.
    pub fn record(&mut self, seat: Seat, action: MoveAction, board_after: String) -> &Move {
        self.moves.truncate(self.cursor);
        self.moves.push(Move {
            seq: self.cursor as u64 + 1,
            seat,
            action,
            board_after,
        });
        self.cursor += 1;
        &self.moves[self.cursor - 1]
    }

    /// Move the cursor back by one, returning the move that left the
    /// active history.
    pub fn step_back(&mut self) -> Option<&Move> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        self.moves.get(self.cursor)
    }

    /// Move the cursor forward by one, returning the move that rejoined the
    /// active history.
    pub fn step_forward(&mut self) -> Option<&Move> {
        if self.cursor >= self.moves.len() {
            return None;
        }
        self.cursor += 1;
        self.moves.get(self.cursor - 1)
    }

    /// Structural checks applied after loading from storage.
    pub fn check_consistency(&self) -> Result<(), String> {
        if self.cursor > self.moves.len() {
            return Err(format!(
                "cursor {} beyond history length {}",
                self.cursor,
                self.moves.len()
            ));
        }
        for (idx, mv) in self.moves.iter().enumerate() {
            if mv.seq != idx as u64 + 1 {
                return Err(format!("move at index {idx} has seq {}", mv.seq));
            }
        }
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn from_parts(initial_board: String, moves: Vec<Move>, cursor: usize) -> Self {
        Self {
            initial_board,
            moves,
            cursor,
        }
    }
}
