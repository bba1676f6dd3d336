//! Form/query fields parsed once into an explicit request.
//!
//! Exactly one command field must be present. `move` carries the move
//! payload; the other command fields are boolean flags.

use serde::Deserialize;

use crate::domain::ids;
use crate::errors::domain::{DomainError, ValidationKind};

/// Raw fields as they arrive in a form body or query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KubixForm {
    pub client_id: Option<String>,
    pub client_pw: Option<String>,
    pub new_client: Option<String>,
    pub game_id: Option<String>,
    pub game_pw: Option<String>,
    pub new_game: Option<String>,
    pub join: Option<String>,
    #[serde(rename = "move")]
    pub move_: Option<String>,
    pub give_up: Option<String>,
    pub undo: Option<String>,
    pub redo: Option<String>,
    pub update: Option<String>,
    pub game_list: Option<String>,
}

/// HTTP method the form arrived with; each accepts a different command set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Post,
    Get,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Registration is the only command that skips authentication.
    Register,
    Authenticated(GameCommand),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameCommand {
    /// `game_id: None` means the creator's client id.
    CreateGame {
        game_id: Option<String>,
        game_pw: String,
    },
    Join {
        game_id: String,
        game_pw: String,
    },
    Move {
        game_id: String,
        payload: String,
    },
    GiveUp {
        game_id: String,
    },
    Undo {
        game_id: String,
    },
    Redo {
        game_id: String,
    },
    View {
        game_id: String,
    },
    ListGames,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Register => "new_client",
            Command::Authenticated(command) => command.name(),
        }
    }
}

impl GameCommand {
    pub fn name(&self) -> &'static str {
        match self {
            GameCommand::CreateGame { .. } => "new_game",
            GameCommand::Join { .. } => "join",
            GameCommand::Move { .. } => "move",
            GameCommand::GiveUp { .. } => "give_up",
            GameCommand::Undo { .. } => "undo",
            GameCommand::Redo { .. } => "redo",
            GameCommand::View { .. } => "update",
            GameCommand::ListGames => "game_list",
        }
    }
}

/// A validated request. Passwords are kept only for the duration of the
/// request and never logged.
#[derive(Clone, PartialEq, Eq)]
pub struct KubixRequest {
    pub client_id: String,
    pub client_pw: String,
    pub command: Command,
}

impl std::fmt::Debug for KubixRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KubixRequest")
            .field("client_id", &self.client_id)
            .field("command", &self.command.name())
            .finish_non_exhaustive()
    }
}

impl KubixRequest {
    pub fn parse(form: KubixForm, verb: Verb) -> Result<Self, DomainError> {
        let client_id = form
            .client_id
            .clone()
            .ok_or_else(|| bad_request("client_id is required"))?;
        ids::require_client_id(&client_id)?;
        let client_pw = form
            .client_pw
            .clone()
            .ok_or_else(|| bad_request("client_pw is required"))?;

        let mut selected: Vec<&'static str> = Vec::new();
        let flags = [
            ("new_client", &form.new_client),
            ("new_game", &form.new_game),
            ("join", &form.join),
            ("give_up", &form.give_up),
            ("undo", &form.undo),
            ("redo", &form.redo),
            ("update", &form.update),
            ("game_list", &form.game_list),
        ];
        for (name, value) in flags {
            if flag(name, value.as_deref())? {
                selected.push(name);
            }
        }
        if form.move_.is_some() {
            selected.push("move");
        }

        let name = match selected.as_slice() {
            [one] => *one,
            [] => return Err(bad_request("no command given")),
            many => {
                return Err(bad_request(format!(
                    "exactly one command is allowed, got {}",
                    many.join(", ")
                )))
            }
        };

        let allowed = match verb {
            Verb::Post => !matches!(name, "update" | "game_list"),
            Verb::Get => matches!(name, "update" | "game_list"),
        };
        if !allowed {
            return Err(bad_request(format!("{name} is not accepted with {verb:?}")));
        }

        if name == "new_client" {
            return Ok(Self {
                client_id,
                client_pw,
                command: Command::Register,
            });
        }

        let game_pw = form.game_pw.clone().unwrap_or_default();
        let game_id = form.game_id.as_deref();
        let command = match name {
            "new_game" => GameCommand::CreateGame {
                game_id: optional_game_id(game_id)?,
                game_pw,
            },
            "join" => GameCommand::Join {
                game_id: required_game_id(game_id)?,
                game_pw,
            },
            "move" => GameCommand::Move {
                game_id: required_game_id(game_id)?,
                payload: form.move_.clone().unwrap_or_default(),
            },
            "give_up" => GameCommand::GiveUp {
                game_id: required_game_id(game_id)?,
            },
            "undo" => GameCommand::Undo {
                game_id: required_game_id(game_id)?,
            },
            "redo" => GameCommand::Redo {
                game_id: required_game_id(game_id)?,
            },
            "update" => GameCommand::View {
                game_id: required_game_id(game_id)?,
            },
            _ => GameCommand::ListGames,
        };

        Ok(Self {
            client_id,
            client_pw,
            command: Command::Authenticated(command),
        })
    }
}

fn bad_request(detail: impl Into<String>) -> DomainError {
    DomainError::validation(ValidationKind::BadRequest, detail)
}

fn flag(name: &str, value: Option<&str>) -> Result<bool, DomainError> {
    match value.map(|v| v.trim().to_ascii_lowercase()) {
        None => Ok(false),
        Some(v) => match v.as_str() {
            "" | "true" | "1" | "on" | "yes" => Ok(true),
            "false" | "0" | "off" | "no" => Ok(false),
            _ => Err(bad_request(format!("{name} must be a boolean"))),
        },
    }
}

fn required_game_id(game_id: Option<&str>) -> Result<String, DomainError> {
    match game_id {
        None | Some("") => Err(bad_request("game_id is required")),
        Some(id) => {
            ids::require_game_id(id)?;
            Ok(id.to_string())
        }
    }
}

fn optional_game_id(game_id: Option<&str>) -> Result<Option<String>, DomainError> {
    match game_id {
        None | Some("") => Ok(None),
        Some(id) => {
            ids::require_game_id(id)?;
            Ok(Some(id.to_string()))
        }
    }
}
