//! Typed event bus
//!
//! Event-based communication between the backend adapter, the progress
//! poller and application code. The event set is closed: the thirteen
//! backend-native kinds plus the synthetic `Step` progress event.
//!
//! Dispatch is synchronous and runs in the caller's context, most recently
//! added listener first. The registry is snapshotted at emit-start, so
//! listeners may register or remove other listeners mid-dispatch without
//! corrupting the list. A panicking listener unwinds out of [`EventBus::emit`]
//! and aborts the remaining listeners of that dispatch; this is a documented
//! limitation, not a contract.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Backend sound identifier carried by native event payloads
pub type SoundId = u64;

/// Closed set of event names observable on the bus
///
/// All kinds except [`EventKind::Step`] originate from the backend and are
/// forwarded verbatim; `Step` is produced by the progress poller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// Track finished loading
    Load,
    /// Track failed to load
    LoadError,
    /// Playback could not start
    PlayError,
    /// Playback started or resumed
    Play,
    /// Track reached its end
    End,
    /// Playback paused
    Pause,
    /// Playback stopped
    Stop,
    /// Mute state changed
    Mute,
    /// Per-handle volume changed
    Volume,
    /// Playback rate changed
    Rate,
    /// Position changed via seek
    Seek,
    /// A fade completed
    Fade,
    /// Audio was unlocked by a user gesture
    Unlock,
    /// Synthetic periodic progress sample
    Step,
}

impl EventKind {
    /// The backend-native kinds, in their fixed forwarding order
    pub const NATIVE: [EventKind; 13] = [
        EventKind::Load,
        EventKind::LoadError,
        EventKind::PlayError,
        EventKind::Play,
        EventKind::End,
        EventKind::Pause,
        EventKind::Stop,
        EventKind::Mute,
        EventKind::Volume,
        EventKind::Rate,
        EventKind::Seek,
        EventKind::Fade,
        EventKind::Unlock,
    ];

    /// Every kind the bus can carry
    pub const ALL: [EventKind; 14] = [
        EventKind::Load,
        EventKind::LoadError,
        EventKind::PlayError,
        EventKind::Play,
        EventKind::End,
        EventKind::Pause,
        EventKind::Stop,
        EventKind::Mute,
        EventKind::Volume,
        EventKind::Rate,
        EventKind::Seek,
        EventKind::Fade,
        EventKind::Unlock,
        EventKind::Step,
    ];

    /// Whether this kind originates from the backend
    pub fn is_native(self) -> bool {
        self != EventKind::Step
    }
}

/// Progress sample carried by [`Event::Step`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepInfo {
    /// Current position in seconds
    pub seek: f64,

    /// Position as a percentage of the duration (0 when duration is unknown)
    pub percent: f64,

    /// Whether the current handle reports itself as playing
    pub playing: bool,
}

/// Event payloads, mirroring the backend's native callback signatures
///
/// Error events carry the offending sound id and the backend's message;
/// most lifecycle events carry only the sound id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// Track finished loading
    Load {
        /// Backend sound id
        id: SoundId,
    },

    /// Track failed to load
    LoadError {
        /// Backend sound id
        id: SoundId,
        /// Backend-supplied error description
        message: String,
    },

    /// Playback could not start
    PlayError {
        /// Backend sound id
        id: SoundId,
        /// Backend-supplied error description
        message: String,
    },

    /// Playback started or resumed
    Play {
        /// Backend sound id
        id: SoundId,
    },

    /// Track reached its end
    End {
        /// Backend sound id
        id: SoundId,
    },

    /// Playback paused
    Pause {
        /// Backend sound id
        id: SoundId,
    },

    /// Playback stopped
    Stop {
        /// Backend sound id
        id: SoundId,
    },

    /// Mute state changed
    Mute {
        /// Backend sound id
        id: SoundId,
        /// New mute state
        muted: bool,
    },

    /// Per-handle volume changed
    Volume {
        /// Backend sound id
        id: SoundId,
        /// New volume level in `[0, 1]`
        level: f64,
    },

    /// Playback rate changed
    Rate {
        /// Backend sound id
        id: SoundId,
        /// New playback rate
        rate: f64,
    },

    /// Position changed via seek
    Seek {
        /// Backend sound id
        id: SoundId,
    },

    /// A fade completed
    Fade {
        /// Backend sound id
        id: SoundId,
    },

    /// Audio was unlocked by a user gesture
    Unlock,

    /// Synthetic periodic progress sample
    Step(StepInfo),
}

impl Event {
    /// The kind this payload dispatches under
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Load { .. } => EventKind::Load,
            Event::LoadError { .. } => EventKind::LoadError,
            Event::PlayError { .. } => EventKind::PlayError,
            Event::Play { .. } => EventKind::Play,
            Event::End { .. } => EventKind::End,
            Event::Pause { .. } => EventKind::Pause,
            Event::Stop { .. } => EventKind::Stop,
            Event::Mute { .. } => EventKind::Mute,
            Event::Volume { .. } => EventKind::Volume,
            Event::Rate { .. } => EventKind::Rate,
            Event::Seek { .. } => EventKind::Seek,
            Event::Fade { .. } => EventKind::Fade,
            Event::Unlock => EventKind::Unlock,
            Event::Step(_) => EventKind::Step,
        }
    }
}

/// Listener callback
///
/// The `Rc` identity doubles as the removal key for [`EventBus::off`]: two
/// clones of the same `Rc` are "the same callback", two separate `Rc`s
/// wrapping identical closures are not.
pub type Listener = Rc<dyn Fn(&Event)>;

struct Registration {
    callback: Listener,
    once: bool,
}

/// Typed publish/subscribe registry
///
/// Cheaply cloneable handle over shared single-threaded state. [`emit`]
/// never holds the registry borrow while invoking a listener, so listeners
/// may re-enter the bus (including from backend callbacks).
///
/// [`emit`]: EventBus::emit
#[derive(Clone)]
pub struct EventBus {
    registry: Rc<RefCell<HashMap<EventKind, Vec<Registration>>>>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    /// Create a bus with an empty listener list for every kind
    pub fn new() -> Self {
        let mut registry = HashMap::with_capacity(EventKind::ALL.len());
        for kind in EventKind::ALL {
            registry.insert(kind, Vec::new());
        }
        Self {
            registry: Rc::new(RefCell::new(registry)),
        }
    }

    /// Register a listener for `kind`
    ///
    /// Duplicate registrations are allowed; each call appends a new entry.
    pub fn on(&self, kind: EventKind, callback: Listener) {
        self.register(kind, callback, false);
    }

    /// Register a one-shot listener for `kind`
    ///
    /// The registration is removed on its first invocation.
    pub fn once(&self, kind: EventKind, callback: Listener) {
        self.register(kind, callback, true);
    }

    fn register(&self, kind: EventKind, callback: Listener, once: bool) {
        let mut registry = self.registry.borrow_mut();
        if let Some(list) = registry.get_mut(&kind) {
            list.push(Registration { callback, once });
        }
    }

    /// Remove every registration under `kind` whose callback is `callback`
    ///
    /// Matches by `Rc` pointer identity. Registrations for other kinds are
    /// untouched; no-op when nothing matches.
    pub fn off(&self, kind: EventKind, callback: &Listener) {
        let mut registry = self.registry.borrow_mut();
        if let Some(list) = registry.get_mut(&kind) {
            list.retain(|reg| !Rc::ptr_eq(&reg.callback, callback));
        }
    }

    /// Number of live registrations for `kind`
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.registry
            .borrow()
            .get(&kind)
            .map_or(0, |list| list.len())
    }

    /// Dispatch `event` to every listener registered for its kind
    ///
    /// Listeners run synchronously, most recently added first. One-shot
    /// registrations are removed from the live list before their callback
    /// runs, so they are gone even if that callback panics.
    pub fn emit(&self, event: &Event) {
        let kind = event.kind();

        // Snapshot so listeners can mutate the registry mid-dispatch.
        let snapshot: Vec<(Listener, bool)> = {
            let registry = self.registry.borrow();
            registry.get(&kind).map_or_else(Vec::new, |list| {
                list.iter()
                    .map(|reg| (Rc::clone(&reg.callback), reg.once))
                    .collect()
            })
        };

        for (callback, once) in snapshot.into_iter().rev() {
            if once {
                let mut registry = self.registry.borrow_mut();
                if let Some(list) = registry.get_mut(&kind) {
                    if let Some(pos) = list
                        .iter()
                        .position(|reg| reg.once && Rc::ptr_eq(&reg.callback, &callback))
                    {
                        list.remove(pos);
                    }
                }
            }
            callback(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_starts_empty() {
        let bus = EventBus::new();
        for kind in EventKind::ALL {
            assert_eq!(bus.listener_count(kind), 0);
        }
    }

    #[test]
    fn event_kind_mapping() {
        assert_eq!(Event::Load { id: 1 }.kind(), EventKind::Load);
        assert_eq!(
            Event::LoadError {
                id: 1,
                message: "404".to_string()
            }
            .kind(),
            EventKind::LoadError
        );
        assert_eq!(Event::Unlock.kind(), EventKind::Unlock);
        assert_eq!(
            Event::Step(StepInfo {
                seek: 0.0,
                percent: 0.0,
                playing: false
            })
            .kind(),
            EventKind::Step
        );
    }

    #[test]
    fn native_excludes_step() {
        assert!(!EventKind::NATIVE.contains(&EventKind::Step));
        assert!(EventKind::ALL.contains(&EventKind::Step));
        assert!(EventKind::Play.is_native());
        assert!(!EventKind::Step.is_native());
    }

    #[test]
    fn off_only_touches_matching_kind() {
        let bus = EventBus::new();
        let cb: Listener = Rc::new(|_| {});
        bus.on(EventKind::Play, Rc::clone(&cb));
        bus.on(EventKind::Pause, Rc::clone(&cb));

        bus.off(EventKind::Play, &cb);

        assert_eq!(bus.listener_count(EventKind::Play), 0);
        assert_eq!(bus.listener_count(EventKind::Pause), 1);
    }
}
