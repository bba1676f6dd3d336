//! Storage backends for the `repos` traits.

pub mod clients_fs;
pub mod clients_mem;
pub mod data_dir_lock;
pub mod fs_json;
pub mod games_fs;
pub mod games_mem;

pub use clients_fs::FileClientDirectory;
pub use clients_mem::InMemoryClientDirectory;
pub use data_dir_lock::DataDirLock;
pub use games_fs::FileGameStore;
pub use games_mem::InMemoryGameStore;
