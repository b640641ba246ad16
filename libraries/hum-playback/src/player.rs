//! Player orchestration
//!
//! Owns the playlist and the cursor, coordinates backend handle creation,
//! transport controls and the progress poller. This is the sole public
//! entry point; everything below it (bus, adapter, poller) is reached
//! through the player.

use std::rc::Rc;
use tracing::debug;

use crate::backend::{self, AudioBackend, BackendHandle};
use crate::error::{PlayerError, Result};
use crate::events::{Event, EventBus, EventKind, Listener};
use crate::poller::{self, ProgressPoller};
use crate::timer::{TimerDriver, TimerId};
use crate::types::{PlayerConfig, SkipDirection, Track};

/// Playlist-aware player over an external audio backend
///
/// State machine over the cursor and per-track handle presence:
/// - exactly one track is current at any time;
/// - a track's backend handle is created on its first play and reused,
///   never replaced;
/// - progress polling is (re)started by the native `play`/`seek` hooks and
///   keeps running until replaced — pausing does not stop it.
pub struct Player {
    playlist: Vec<Track>,
    index: usize,
    bus: EventBus,
    backend: Box<dyn AudioBackend>,
    poller: ProgressPoller,
}

impl Player {
    /// Create a player over a fixed, non-empty playlist
    ///
    /// `backend` and `timer` are the host-supplied capabilities; `config`
    /// carries the step interval and the debug flag. An empty playlist is
    /// rejected so the cursor invariant holds from the start.
    pub fn new(
        playlist: Vec<Track>,
        backend: Box<dyn AudioBackend>,
        timer: Box<dyn TimerDriver>,
        config: PlayerConfig,
    ) -> Result<Self> {
        if playlist.is_empty() {
            return Err(PlayerError::EmptyPlaylist);
        }

        let bus = EventBus::new();
        if config.debug {
            let log: Listener = Rc::new(|event: &Event| debug!(?event, "event"));
            for kind in EventKind::ALL {
                bus.on(kind, Rc::clone(&log));
            }
        }

        Ok(Self {
            playlist,
            index: 0,
            bus,
            backend,
            poller: ProgressPoller::new(timer, config.step_interval),
        })
    }

    // ===== Transport =====

    /// Play the track at `index`, or the current track when `None`
    ///
    /// Creates and caches the track's backend handle on first use, starts
    /// playback only if the handle does not already report playing (calling
    /// again on an already-playing current track is a no-op), and moves the
    /// cursor to the resolved index.
    pub fn play(&mut self, index: Option<usize>) -> Result<()> {
        let index = match index {
            Some(index) if index >= self.playlist.len() => {
                return Err(PlayerError::IndexOutOfBounds(index));
            }
            Some(index) => index,
            None => self.index,
        };

        debug!(index, "play");
        let handle = backend::ensure_handle(
            &mut self.playlist[index],
            self.backend.as_mut(),
            &self.bus,
            &self.poller,
        );
        if !handle.playing() {
            handle.play();
        }
        self.index = index;
        Ok(())
    }

    /// Pause the current track
    ///
    /// Fails with [`PlayerError::NoHandle`] if the current track has never
    /// been played. The progress poller is left running.
    pub fn pause(&mut self) -> Result<()> {
        let index = self.index;
        match self.playlist[index].handle.as_deref_mut() {
            Some(handle) => {
                handle.pause();
                Ok(())
            }
            None => Err(PlayerError::NoHandle { index }),
        }
    }

    /// Skip to the neighbouring track, wrapping at both playlist ends
    pub fn skip(&mut self, direction: SkipDirection) -> Result<()> {
        let len = self.playlist.len();
        let next = match direction {
            SkipDirection::Next => (self.index + 1) % len,
            SkipDirection::Prev => (self.index + len - 1) % len,
        };
        self.skip_to(next)
    }

    /// Stop the current track (if it has a handle) and play `index`
    ///
    /// Tolerates a current track that was never played: no stop call is
    /// issued and no error is raised.
    pub fn skip_to(&mut self, index: usize) -> Result<()> {
        if index >= self.playlist.len() {
            return Err(PlayerError::IndexOutOfBounds(index));
        }

        debug!(from = self.index, to = index, "skip");
        if let Some(handle) = self.playlist[self.index].handle.as_deref_mut() {
            handle.stop();
        }
        self.play(Some(index))
    }

    /// Set the global volume, clamped to `[0, 1]`
    ///
    /// Applies to every backend handle at once; the core keeps no per-track
    /// volume state.
    pub fn volume(&mut self, level: f64) {
        self.backend.set_global_volume(level.clamp(0.0, 1.0));
    }

    /// Seek the current track to `fraction * duration`
    ///
    /// `fraction` is expected in `[0, 1]`. Silently ignored when the current
    /// track has no handle or is not playing.
    pub fn seek(&mut self, fraction: f64) {
        if let Some(handle) = self.playlist[self.index].handle.as_deref_mut() {
            if handle.playing() {
                let duration = handle.duration();
                handle.seek(Some(fraction * duration));
            }
        }
    }

    // ===== Events =====

    /// Register a listener for `kind`
    pub fn on(&self, kind: EventKind, callback: Listener) {
        self.bus.on(kind, callback);
    }

    /// Register a one-shot listener for `kind`
    pub fn once(&self, kind: EventKind, callback: Listener) {
        self.bus.once(kind, callback);
    }

    /// Remove every registration of `callback` under `kind`
    pub fn off(&self, kind: EventKind, callback: &Listener) {
        self.bus.off(kind, callback);
    }

    /// Host-driven poller tick
    ///
    /// Called by the host on every fire of a scheduled timer. Ticks for a
    /// timer that is no longer active are ignored; an active tick samples
    /// the current track and emits `step`.
    pub fn tick(&mut self, id: TimerId) {
        if !self.poller.is_active(id) {
            return;
        }
        let step = poller::sample(self.playlist[self.index].handle.as_deref_mut());
        self.bus.emit(&Event::Step(step));
    }

    // ===== Accessors =====

    /// The current track's backend handle
    ///
    /// Fails with [`PlayerError::NoHandle`] if the current track has never
    /// been played.
    pub fn current_handle(&mut self) -> Result<&mut (dyn BackendHandle + 'static)> {
        let index = self.index;
        self.playlist[index]
            .handle
            .as_deref_mut()
            .ok_or(PlayerError::NoHandle { index })
    }

    /// Playlist index of the current track
    pub fn current_index(&self) -> usize {
        self.index
    }

    /// Number of tracks in the playlist
    pub fn len(&self) -> usize {
        self.playlist.len()
    }

    /// Always false: construction rejects empty playlists
    pub fn is_empty(&self) -> bool {
        self.playlist.is_empty()
    }

    /// URL of the track at `index`, if in range
    pub fn track_url(&self, index: usize) -> Option<&str> {
        self.playlist.get(index).map(|track| track.url.as_str())
    }
}
