use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading a package schema.
#[derive(Debug, Error)]
pub enum ConfigError {
  /// The schema file could not be read.
  #[error("failed to read package schema '{}': {source}", path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// The schema file is not a valid package definition.
  #[error("failed to parse package schema: {0}")]
  Parse(#[from] serde_json::Error),
}
