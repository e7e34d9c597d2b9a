//! Overlay error types.

use std::path::PathBuf;

use super::CommandCategory;
use crate::network::GraphError;

/// Errors raised while mutating the overlay.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OverlayError {
    #[error("bicycle duration scale {0} is outside [0.25, 2.0]")]
    ScaleOutOfRange(f64),

    #[error("nothing to undo for {0} changes")]
    NothingToUndo(CommandCategory),

    /// The command named a stop or route the map does not contain
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Errors from explicit overlay save/load.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("overlay file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed overlay file: {0}")]
    Json(#[from] serde_json::Error),
}
