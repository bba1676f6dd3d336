//! File-backed game store: one JSON document per game under `<data_dir>/games/`.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::adapters::fs_json::{blocking, ensure_dir, io_error, read_json, write_json_atomic};
use crate::domain::ids;
use crate::domain::session::GameSession;
use crate::errors::domain::DomainError;
use crate::repos::games::GameStore;

const FORMAT_VERSION: u32 = 1;
const EXTENSION: &str = "json";

#[derive(Serialize)]
struct StoredGameRef<'a> {
    format: u32,
    session: &'a GameSession,
}

#[derive(Deserialize)]
struct StoredGame {
    format: u32,
    session: GameSession,
}

#[derive(Debug, Clone)]
pub struct FileGameStore {
    games_dir: PathBuf,
}

impl FileGameStore {
    /// Open (creating if needed) the `games/` directory under `data_dir`.
    pub fn open(data_dir: &Path) -> Result<Self, DomainError> {
        let games_dir = data_dir.join("games");
        ensure_dir(&games_dir)?;
        debug!(dir = %games_dir.display(), "File game store opened");
        Ok(Self { games_dir })
    }

    pub fn games_dir(&self) -> &Path {
        &self.games_dir
    }

    fn path_for(&self, game_id: &str) -> Result<PathBuf, DomainError> {
        // Only validated ids may become file names.
        ids::require_game_id(game_id)?;
        Ok(self.games_dir.join(format!("{game_id}.{EXTENSION}")))
    }
}

fn decode(game_id: &str, stored: StoredGame) -> Result<GameSession, DomainError> {
    if stored.format != FORMAT_VERSION {
        return Err(DomainError::corruption(format!(
            "game {game_id}: unsupported format version {}",
            stored.format
        )));
    }
    let session = stored.session;
    if session.game_id() != game_id {
        return Err(DomainError::corruption(format!(
            "file for game {game_id} holds game {}",
            session.game_id()
        )));
    }
    session
        .check_invariants()
        .map_err(|detail| DomainError::corruption(format!("game {game_id}: {detail}")))?;
    Ok(session)
}

#[async_trait]
impl GameStore for FileGameStore {
    fn backend(&self) -> &'static str {
        "file"
    }

    async fn load(&self, game_id: &str) -> Result<GameSession, DomainError> {
        let path = self.path_for(game_id)?;
        let stored = blocking(move || read_json::<StoredGame>(&path)).await?;
        match stored {
            Some(stored) => decode(game_id, stored).inspect_err(|e| {
                warn!(game_id, error = %e, "Stored game failed validation");
            }),
            None => Err(DomainError::game_not_found(game_id)),
        }
    }

    async fn save(&self, session: &GameSession) -> Result<(), DomainError> {
        let path = self.path_for(session.game_id())?;
        let session = session.clone();
        blocking(move || {
            write_json_atomic(
                &path,
                &StoredGameRef {
                    format: FORMAT_VERSION,
                    session: &session,
                },
            )
        })
        .await
    }

    async fn exists(&self, game_id: &str) -> Result<bool, DomainError> {
        let path = self.path_for(game_id)?;
        blocking(move || path.try_exists().map_err(|e| io_error("stat", &path, e))).await
    }

    async fn list_ids(&self) -> Result<Vec<String>, DomainError> {
        let dir = self.games_dir.clone();
        blocking(move || {
            let entries = std::fs::read_dir(&dir).map_err(|e| io_error("list", &dir, e))?;
            let mut ids = Vec::new();
            for entry in entries {
                let path = entry.map_err(|e| io_error("list", &dir, e))?.path();
                if path.extension().and_then(|ext| ext.to_str()) != Some(EXTENSION) {
                    continue;
                }
                // Temp files and stray names never match the id pattern.
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    if ids::is_valid_id(stem) {
                        ids.push(stem.to_string());
                    }
                }
            }
            ids.sort();
            Ok(ids)
        })
        .await
    }
}
