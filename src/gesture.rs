//! Double-tap gesture recognition.
//!
//! Interprets timestamped taps on the left/right halves of the reading
//! surface into reveal/unreveal commands. Tracking is strictly per side: a
//! tap pairs only with the previous tap on the *same* side, and any two
//! same-side taps within the window count — there is no upper bound
//! distinguishing a double tap from a burst.
//!
//! The tracker is clock-free; callers supply millisecond timestamps.

/// Default pairing window in milliseconds.
pub const DEFAULT_TAP_WINDOW_MS: i64 = 320;

/// Which half of the reading surface was tapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Command produced by a recognized gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureCommand {
    Reveal,
    Unreveal,
}

/// Maps a side to its command: right advances, left retreats.
///
/// Also the path for pointer double-clicks, which arrive pre-paired and
/// bypass the timestamp window.
pub fn command_for(side: Side) -> GestureCommand {
    match side {
        Side::Right => GestureCommand::Reveal,
        Side::Left => GestureCommand::Unreveal,
    }
}

/// Per-side last-tap timestamps, threaded explicitly rather than held as
/// ambient view state.
#[derive(Debug, Clone, Copy)]
pub struct TapTracker {
    window_ms: i64,
    last_left: Option<i64>,
    last_right: Option<i64>,
}

impl TapTracker {
    pub fn new(window_ms: i64) -> Self {
        TapTracker {
            window_ms,
            last_left: None,
            last_right: None,
        }
    }

    /// Record a tap on `side` at `at_ms`.
    ///
    /// Emits the side's command when the previous tap on the same side fell
    /// within the window. The timestamp is recorded unconditionally, so the
    /// window re-arms on every tap: a fast burst fires on every other tap.
    pub fn on_tap(&mut self, side: Side, at_ms: i64) -> Option<GestureCommand> {
        let last = match side {
            Side::Left => self.last_left.replace(at_ms),
            Side::Right => self.last_right.replace(at_ms),
        };
        match last {
            Some(prev) if at_ms - prev <= self.window_ms => {
                // Consume the pair so a third tap starts a fresh one.
                match side {
                    Side::Left => self.last_left = None,
                    Side::Right => self.last_right = None,
                }
                Some(command_for(side))
            }
            _ => None,
        }
    }
}

impl Default for TapTracker {
    fn default() -> Self {
        TapTracker::new(DEFAULT_TAP_WINDOW_MS)
    }
}
