//! Backend capability traits and the per-track handle adapter
//!
//! The decoding/playback backend is opaque to the core: it produces one
//! handle per source URL and reports its lifecycle through the fixed native
//! event set. This module owns the lazy get-or-create path for a track's
//! handle and wires each new handle's native callbacks into the event bus
//! exactly once, so repeated plays of the same track never duplicate event
//! delivery.

use crate::events::{Event, EventBus, EventKind};
use crate::poller::ProgressPoller;
use crate::types::Track;

/// Callback registered on a backend handle for one native event kind
///
/// The backend invokes it with the event payload for that kind; payloads
/// are relayed through the bus unchanged.
pub type NativeCallback = Box<dyn FnMut(&Event)>;

/// One playback handle produced by the backend for a single source URL
///
/// Mirrors the external library's per-track surface. Positions and
/// durations are in seconds.
pub trait BackendHandle {
    /// Begin or resume playback
    fn play(&mut self);

    /// Pause playback, keeping the current position
    fn pause(&mut self);

    /// Stop playback and rewind to the start
    fn stop(&mut self);

    /// With `Some(pos)` move to `pos`; with `None` report the current position
    fn seek(&mut self, position: Option<f64>) -> f64;

    /// Total track duration, 0 while still unknown
    fn duration(&self) -> f64;

    /// Whether the handle is actively playing
    fn playing(&self) -> bool;

    /// Subscribe a callback to one native event kind
    fn on(&mut self, kind: EventKind, callback: NativeCallback);
}

/// Factory for backend handles plus the backend-global controls
pub trait AudioBackend {
    /// Create a streaming playback handle for `url`
    fn create(&mut self, url: &str) -> Box<dyn BackendHandle>;

    /// Set the volume applied to every handle at once, `level` in `[0, 1]`
    fn set_global_volume(&mut self, level: f64);
}

/// Get-or-create the backend handle for `track`
///
/// The first call creates the handle and registers one forwarding callback
/// per native event kind; the `play` and `seek` hooks additionally restart
/// the progress poller. Later calls return the cached handle untouched.
pub(crate) fn ensure_handle<'a>(
    track: &'a mut Track,
    backend: &mut dyn AudioBackend,
    bus: &EventBus,
    poller: &ProgressPoller,
) -> &'a mut dyn BackendHandle {
    let Track { url, handle } = track;
    handle
        .get_or_insert_with(|| {
            let mut handle = backend.create(url);
            for kind in EventKind::NATIVE {
                let bus = bus.clone();
                let poller = poller.clone();
                handle.on(
                    kind,
                    Box::new(move |event| {
                        if matches!(kind, EventKind::Play | EventKind::Seek) {
                            poller.restart();
                        }
                        bus.emit(event);
                    }),
                );
            }
            handle
        })
        .as_mut()
}
