//! Caret blink task for text entry.
//!
//! The host loop drives the task by calling the editor's `tick` with the
//! current time. A task is a plain value: cancelling it is dropping it, so the
//! editor holding an `Option<CaretBlink>` can never run two at once.

use kurbo::Point;
use std::time::Duration;

#[cfg(target_arch = "wasm32")]
pub use web_time::Instant;
#[cfg(not(target_arch = "wasm32"))]
pub use std::time::Instant;

/// Default toggle interval.
pub const DEFAULT_BLINK_INTERVAL: Duration = Duration::from_millis(400);

/// Glyph painted as the caret.
pub const CARET_GLYPH: &str = "I";

/// Where and how the caret is painted.
#[derive(Debug, Clone, PartialEq)]
pub struct Caret {
    pub position: Point,
    pub font_size: u32,
    pub font_family: String,
    pub color: String,
}

/// What the editor must do for a due tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlinkPhase {
    /// Paint the caret glyph.
    Show,
    /// Redraw the surface to hide it.
    Hide,
}

/// A scheduled, repeating caret toggle.
#[derive(Debug, Clone)]
pub struct CaretBlink {
    caret: Caret,
    interval: Duration,
    next_tick: Instant,
    shown: bool,
}

impl CaretBlink {
    /// Schedule the first toggle one interval after `now`. The caret starts hidden.
    pub fn start(caret: Caret, interval: Duration, now: Instant) -> Self {
        Self {
            caret,
            interval,
            next_tick: now + interval,
            shown: false,
        }
    }

    /// Fire the toggle if it is due at `now`.
    ///
    /// Missed ticks collapse into one; the next tick is rescheduled from `now`.
    pub fn poll(&mut self, now: Instant) -> Option<BlinkPhase> {
        if now < self.next_tick {
            return None;
        }
        self.next_tick = now + self.interval;
        self.shown = !self.shown;
        Some(if self.shown {
            BlinkPhase::Show
        } else {
            BlinkPhase::Hide
        })
    }

    pub fn caret(&self) -> &Caret {
        &self.caret
    }

    pub fn is_shown(&self) -> bool {
        self.shown
    }

    pub fn next_tick(&self) -> Instant {
        self.next_tick
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caret() -> Caret {
        Caret {
            position: Point::new(10.0, 10.0),
            font_size: 30,
            font_family: "Arial".to_string(),
            color: "#000000".to_string(),
        }
    }

    #[test]
    fn test_not_due_before_interval() {
        let now = Instant::now();
        let mut blink = CaretBlink::start(caret(), DEFAULT_BLINK_INTERVAL, now);
        assert_eq!(blink.poll(now + Duration::from_millis(399)), None);
        assert!(!blink.is_shown());
    }

    #[test]
    fn test_alternates_show_and_hide() {
        let now = Instant::now();
        let mut blink = CaretBlink::start(caret(), DEFAULT_BLINK_INTERVAL, now);
        let t1 = now + DEFAULT_BLINK_INTERVAL;
        assert_eq!(blink.poll(t1), Some(BlinkPhase::Show));
        assert_eq!(blink.poll(t1), None);
        let t2 = t1 + DEFAULT_BLINK_INTERVAL;
        assert_eq!(blink.poll(t2), Some(BlinkPhase::Hide));
    }

    #[test]
    fn test_missed_ticks_collapse() {
        let now = Instant::now();
        let mut blink = CaretBlink::start(caret(), DEFAULT_BLINK_INTERVAL, now);
        let late = now + Duration::from_secs(5);
        assert_eq!(blink.poll(late), Some(BlinkPhase::Show));
        assert_eq!(blink.next_tick(), late + DEFAULT_BLINK_INTERVAL);
    }
}
