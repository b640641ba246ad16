//! Core types for the playlist player

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::backend::BackendHandle;

/// One playlist entry
///
/// Owns the lazily-created backend handle for its URL. The handle slot is
/// populated on first play and never reassigned afterwards; repeated plays
/// reuse the cached handle.
pub struct Track {
    /// Streaming source URL, supplied fully formed by the caller
    pub url: String,

    /// Cached backend handle, `None` until first play
    pub(crate) handle: Option<Box<dyn BackendHandle>>,
}

impl Track {
    /// Create a playlist entry for `url`
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            handle: None,
        }
    }

    /// Whether a backend handle has been created for this track
    pub fn has_handle(&self) -> bool {
        self.handle.is_some()
    }
}

impl fmt::Debug for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Track")
            .field("url", &self.url)
            .field("handle", &self.handle.is_some())
            .finish()
    }
}

/// Direction for cursor-relative skips
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipDirection {
    /// Move the cursor forward, wrapping past the last track
    Next,

    /// Move the cursor backward, wrapping past the first track
    Prev,
}

/// Configuration for the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Interval between progress samples (default: 200 ms)
    pub step_interval: Duration,

    /// Log every emitted event through `tracing` (default: false)
    pub debug: bool,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            step_interval: Duration::from_millis(200),
            debug: false,
        }
    }
}
