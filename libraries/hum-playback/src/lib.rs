//! Hum Player - Playback Orchestration
//!
//! Playlist-aware playback orchestration over a pluggable audio backend.
//!
//! This crate provides:
//! - An ordered playlist with a "current track" cursor
//! - Lazy, cached per-track backend handles (one per track, created on
//!   first play and reused)
//! - A typed event bus re-publishing the backend's native callbacks
//!   (`load`, `loaderror`, `playerror`, `play`, `end`, `pause`, `stop`,
//!   `mute`, `volume`, `rate`, `seek`, `fade`, `unlock`) plus a synthetic
//!   periodic `step` progress event
//! - Transport controls (play, pause, skip, seek, global volume) operating
//!   on whichever track is current
//!
//! # Architecture
//!
//! `hum-playback` is completely platform-agnostic and single-threaded:
//! - No audio decoding, no network handling, no clock of its own
//! - The backend enters through the [`AudioBackend`] / [`BackendHandle`]
//!   traits; the repeating timer enters through [`TimerDriver`]
//! - All operations run synchronously in the caller's context; the only
//!   asynchronously-invoked path is the host delivering timer ticks via
//!   [`Player::tick`]
//!
//! # Example: wiring a backend
//!
//! ```rust
//! use hum_playback::{
//!     AudioBackend, BackendHandle, Event, EventKind, NativeCallback, Player,
//!     PlayerConfig, TimerDriver, TimerId, Track,
//! };
//! use std::time::Duration;
//!
//! struct NullHandle {
//!     playing: bool,
//!     position: f64,
//! }
//!
//! impl BackendHandle for NullHandle {
//!     fn play(&mut self) {
//!         self.playing = true;
//!     }
//!     fn pause(&mut self) {
//!         self.playing = false;
//!     }
//!     fn stop(&mut self) {
//!         self.playing = false;
//!         self.position = 0.0;
//!     }
//!     fn seek(&mut self, position: Option<f64>) -> f64 {
//!         if let Some(position) = position {
//!             self.position = position;
//!         }
//!         self.position
//!     }
//!     fn duration(&self) -> f64 {
//!         180.0
//!     }
//!     fn playing(&self) -> bool {
//!         self.playing
//!     }
//!     fn on(&mut self, _kind: EventKind, _callback: NativeCallback) {}
//! }
//!
//! struct NullBackend;
//!
//! impl AudioBackend for NullBackend {
//!     fn create(&mut self, _url: &str) -> Box<dyn BackendHandle> {
//!         Box::new(NullHandle {
//!             playing: false,
//!             position: 0.0,
//!         })
//!     }
//!     fn set_global_volume(&mut self, _level: f64) {}
//! }
//!
//! struct NullTimer(TimerId);
//!
//! impl TimerDriver for NullTimer {
//!     fn schedule(&mut self, _interval: Duration) -> TimerId {
//!         self.0 += 1;
//!         self.0
//!     }
//!     fn cancel(&mut self, _id: TimerId) {}
//! }
//!
//! let playlist = vec![
//!     Track::new("https://example.com/intro.mp3"),
//!     Track::new("https://example.com/outro.mp3"),
//! ];
//! let mut player = Player::new(
//!     playlist,
//!     Box::new(NullBackend),
//!     Box::new(NullTimer(0)),
//!     PlayerConfig::default(),
//! )?;
//!
//! player.on(
//!     EventKind::Step,
//!     std::rc::Rc::new(|event: &Event| println!("{event:?}")),
//! );
//!
//! player.volume(0.8);
//! player.play(None)?;
//! player.seek(0.5);
//! assert_eq!(player.current_index(), 0);
//! # Ok::<(), hum_playback::PlayerError>(())
//! ```

mod backend;
mod error;
mod events;
mod player;
mod poller;
mod timer;
mod types;

// Public exports
pub use backend::{AudioBackend, BackendHandle, NativeCallback};
pub use error::{PlayerError, Result};
pub use events::{Event, EventBus, EventKind, Listener, SoundId, StepInfo};
pub use player::Player;
pub use poller::ProgressPoller;
pub use timer::{TimerDriver, TimerId};
pub use types::{PlayerConfig, SkipDirection, Track};
