//! Error types for the player core

use thiserror::Error;

/// Player errors
#[derive(Debug, Error)]
pub enum PlayerError {
    /// The playlist must contain at least one track so the cursor stays valid
    #[error("playlist is empty")]
    EmptyPlaylist,

    /// The targeted track has never been played, so no backend handle exists
    #[error("no backend handle for track {index}")]
    NoHandle {
        /// Playlist index of the track without a handle
        index: usize,
    },

    /// Playlist index out of range
    #[error("index out of bounds: {0}")]
    IndexOutOfBounds(usize),
}

/// Result type for player operations
pub type Result<T> = std::result::Result<T, PlayerError>;
