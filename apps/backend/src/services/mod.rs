pub mod clients;
pub mod game_flow;

pub use clients::ClientService;
pub use game_flow::SessionCoordinator;
