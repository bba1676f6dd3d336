//! Wire types for the `/` endpoint.

pub mod game_state;
pub mod request;

pub use game_state::{GameSummary, GameView, PlayerView};
pub use request::{Command, GameCommand, KubixForm, KubixRequest, Verb};
