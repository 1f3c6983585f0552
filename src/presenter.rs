//! Status presenter — composes the two-line display surface.
//!
//! Pure functions from `(mode, cycle, temperature, phase)` to a
//! [`DisplayFrame`].  Rendering to the actual character LCD is the
//! job of [`drivers::lcd`](crate::drivers::lcd); nothing in here
//! touches hardware, so every frame is host-testable.
//!
//! While running the frame carries the countdown as `MM:SS` on line 1
//! and the temperature to one decimal on line 2.  Paused and locked-out
//! modes alternate between two fixed banners at the slow banner cadence.

use core::fmt::Write;

use crate::fsm::StateId;

/// One physical display line (16-column character LCD).
pub type Line = heapless::String<16>;

/// A complete two-line frame for the status display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayFrame {
    pub line1: Line,
    pub line2: Line,
}

impl DisplayFrame {
    fn new(line1: &str, line2: &str) -> Self {
        Self {
            line1: truncate(line1),
            line2: truncate(line2),
        }
    }
}

/// Inputs the presenter needs for one frame.
#[derive(Debug, Clone, Copy)]
pub struct StatusView {
    pub mode: StateId,
    pub remaining_seconds: u32,
    pub temperature_f: f32,
    /// Set on the tick the countdown reached zero (renders `00:00`).
    pub just_completed: bool,
    /// True once a cycle has completed (selects the idle banner text).
    pub cycle_has_run: bool,
    /// Alternation phase for the paused/locked banners.
    pub banner_alt: bool,
}

/// Compose the frame for the current tick.
pub fn compose(view: &StatusView) -> DisplayFrame {
    if view.just_completed {
        return DisplayFrame {
            line1: countdown_line(0),
            line2: temp_line(view.temperature_f),
        };
    }

    match view.mode {
        StateId::Running => DisplayFrame {
            line1: countdown_line(view.remaining_seconds),
            line2: temp_line(view.temperature_f),
        },
        StateId::Idle => {
            if view.cycle_has_run {
                DisplayFrame::new("Press START to", "start agn")
            } else {
                DisplayFrame::new("Press START!", "")
            }
        }
        StateId::Paused => {
            if view.banner_alt {
                DisplayFrame::new("Press START or", "RESET")
            } else {
                DisplayFrame::new("Countdown", "stopped!")
            }
        }
        StateId::LockedOut => {
            if view.banner_alt {
                DisplayFrame::new("Press START to", "start over")
            } else {
                DisplayFrame::new("Countdown reset!", "")
            }
        }
    }
}

/// Acknowledgement banner shown for the settle window after a mode
/// transition.
pub fn transition_banner(from: StateId, to: StateId) -> DisplayFrame {
    match (from, to) {
        (StateId::LockedOut, StateId::Idle) => DisplayFrame::new("Restarting", "countdown soon"),
        (_, StateId::Running) => DisplayFrame::new("START btn", "pressed"),
        (_, StateId::Paused) => DisplayFrame::new("STOP btn", "pressed"),
        (_, StateId::LockedOut) => DisplayFrame::new("RESET btn", "pressed"),
        _ => DisplayFrame::new("", ""),
    }
}

// ── Line formatting ───────────────────────────────────────────

/// `Countdown: MM:SS` with zero padding.  A full one-hour cycle renders
/// `60:00` on its first frame.
fn countdown_line(secs: u32) -> Line {
    let mut line = Line::new();
    let minutes = secs / 60;
    let seconds = secs % 60;
    // 16 columns hold "Countdown: 60:00" exactly; overflow is truncated.
    let _ = write!(line, "Countdown: {minutes:02}:{seconds:02}");
    line
}

/// `Temp: 72.5 F` — one decimal place, as the monitor reports it.
fn temp_line(temp_f: f32) -> Line {
    let mut line = Line::new();
    let _ = write!(line, "Temp: {temp_f:.1} F");
    line
}

fn truncate(s: &str) -> Line {
    let mut line = Line::new();
    let _ = line.push_str(&s[..s.len().min(16)]);
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(mode: StateId, remaining: u32) -> StatusView {
        StatusView {
            mode,
            remaining_seconds: remaining,
            temperature_f: 72.5,
            just_completed: false,
            cycle_has_run: false,
            banner_alt: false,
        }
    }

    #[test]
    fn running_frame_formats_mm_ss() {
        let f = compose(&view(StateId::Running, 244));
        assert_eq!(f.line1.as_str(), "Countdown: 04:04");
        assert_eq!(f.line2.as_str(), "Temp: 72.5 F");
    }

    #[test]
    fn full_hour_renders_sixty_minutes() {
        let f = compose(&view(StateId::Running, 3600));
        assert_eq!(f.line1.as_str(), "Countdown: 60:00");
    }

    #[test]
    fn completion_frame_shows_zero() {
        let mut v = view(StateId::Idle, 3600);
        v.just_completed = true;
        let f = compose(&v);
        assert_eq!(f.line1.as_str(), "Countdown: 00:00");
    }

    #[test]
    fn idle_banner_depends_on_history() {
        let fresh = compose(&view(StateId::Idle, 3600));
        assert_eq!(fresh.line1.as_str(), "Press START!");

        let mut v = view(StateId::Idle, 3600);
        v.cycle_has_run = true;
        let rerun = compose(&v);
        assert_eq!(rerun.line1.as_str(), "Press START to");
        assert_eq!(rerun.line2.as_str(), "start agn");
    }

    #[test]
    fn paused_banners_alternate() {
        let mut v = view(StateId::Paused, 10);
        let a = compose(&v);
        v.banner_alt = true;
        let b = compose(&v);
        assert_eq!(a.line1.as_str(), "Countdown");
        assert_eq!(a.line2.as_str(), "stopped!");
        assert_eq!(b.line1.as_str(), "Press START or");
        assert_eq!(b.line2.as_str(), "RESET");
    }

    #[test]
    fn locked_banners_alternate() {
        let mut v = view(StateId::LockedOut, 0);
        let a = compose(&v);
        v.banner_alt = true;
        let b = compose(&v);
        assert_eq!(a.line1.as_str(), "Countdown reset!");
        assert_eq!(b.line2.as_str(), "start over");
    }

    #[test]
    fn temperature_rounds_to_one_decimal() {
        let mut v = view(StateId::Running, 59);
        v.temperature_f = 80.04;
        let f = compose(&v);
        assert_eq!(f.line2.as_str(), "Temp: 80.0 F");
    }

    #[test]
    fn banners_cover_every_transition() {
        let b = transition_banner(StateId::Running, StateId::Paused);
        assert_eq!(b.line1.as_str(), "STOP btn");
        let b = transition_banner(StateId::Paused, StateId::LockedOut);
        assert_eq!(b.line1.as_str(), "RESET btn");
        let b = transition_banner(StateId::LockedOut, StateId::Idle);
        assert_eq!(b.line1.as_str(), "Restarting");
        let b = transition_banner(StateId::Idle, StateId::Running);
        assert_eq!(b.line1.as_str(), "START btn");
        // Completion is not operator-driven and gets no banner.
        let b = transition_banner(StateId::Running, StateId::Idle);
        assert!(b.line1.is_empty() && b.line2.is_empty());
    }
}
