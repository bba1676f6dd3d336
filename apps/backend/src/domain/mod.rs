//! Domain layer: game lifecycle, move history and rules, free of I/O.

pub mod game_transition;
pub mod ids;
pub mod move_log;
pub mod rules;
pub mod session;
pub mod state;


// Re-exports for ergonomics
pub use move_log::{Move, MoveAction, MoveLog};
pub use rules::{FreeformRules, GameRules, Outcome, RuleViolation, Verdict};
pub use session::GameSession;
pub use state::{GameState, GameStatus, Player, Role, Seat, DEFAULT_SEATS, MAX_SEATS};
