//! Host timer primitive
//!
//! The core never owns a clock; the host supplies a repeating-timer
//! capability and delivers ticks back through [`Player::tick`].
//!
//! [`Player::tick`]: crate::Player::tick

use std::time::Duration;

/// Identifier for a scheduled repeating timer
pub type TimerId = u64;

/// Repeating-timer capability supplied by the host environment
///
/// [`schedule`] starts a repeating timer; on every fire the host calls
/// [`Player::tick`](crate::Player::tick) with the returned id. Ticks
/// carrying an id that is no longer active are ignored, so hosts that
/// cannot cancel an in-flight timer precisely still get replacement
/// semantics.
///
/// [`schedule`]: TimerDriver::schedule
pub trait TimerDriver {
    /// Start a repeating timer firing every `interval`, returning its id
    fn schedule(&mut self, interval: Duration) -> TimerId;

    /// Cancel a previously scheduled timer
    ///
    /// Must tolerate ids that already expired or were never issued.
    fn cancel(&mut self, id: TimerId);
}
