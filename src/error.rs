use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type GameResult<T> = Result<T, GameError>;

/// Failures that escape a single turn: world loading and save-file I/O.
///
/// Everything a player can get wrong is reported through `Output` instead.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid TOML world: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid world: {0}")]
    InvalidWorld(String),
}

impl GameError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        GameError::Io {
            path: path.into(),
            source,
        }
    }

    /// True when the underlying cause is a file that does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, GameError::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_detected() {
        let err = GameError::io("missing.json", io::Error::from(io::ErrorKind::NotFound));
        assert!(err.is_not_found());
        assert!(err.to_string().contains("missing.json"));
    }

    #[test]
    fn other_errors_are_not_not_found() {
        let err = GameError::InvalidWorld("start_room may not be empty".into());
        assert!(!err.is_not_found());
        assert_eq!(
            err.to_string(),
            "invalid world: start_room may not be empty"
        );
    }
}
