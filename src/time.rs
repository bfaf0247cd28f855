//! Virtual time: a frame clock plus the interval/timeout primitives every
//! timed behaviour in the game is built from.
//!
//! `draw_web()` calls at ~60fps with a variable delta. `FrameClock` turns
//! wall-clock timestamps into elapsed milliseconds, and the timers below
//! consume those milliseconds deterministically, so game logic never looks
//! at the real clock and is fully testable.

/// Longest gap a single frame may report (tab backgrounded, debugger pause).
pub const MAX_FRAME_MS: f64 = 500.0;

pub struct FrameClock {
    /// Sub-millisecond remainder not yet handed out
    carry: f64,
    /// Total virtual milliseconds since creation
    pub now_ms: u64,
    last_timestamp: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            carry: 0.0,
            now_ms: 0,
            last_timestamp: None,
        }
    }

    /// Feed a wall-clock timestamp (from `performance.now()`).
    /// Returns the whole milliseconds elapsed since the previous frame.
    pub fn update(&mut self, now_ms: f64) -> u64 {
        let delta = match self.last_timestamp {
            Some(prev) => (now_ms - prev).clamp(0.0, MAX_FRAME_MS),
            None => 0.0,
        };
        self.last_timestamp = Some(now_ms);

        self.carry += delta;
        let whole = self.carry.floor();
        self.carry -= whole;
        let elapsed = whole as u64;
        self.now_ms += elapsed;
        elapsed
    }
}

/// A repeating timer. Fires once per `period_ms` of virtual time.
#[derive(Debug, Clone)]
pub struct Interval {
    period_ms: u64,
    elapsed_ms: u64,
}

impl Interval {
    pub fn new(period_ms: u64) -> Self {
        Self {
            period_ms: period_ms.max(1),
            elapsed_ms: 0,
        }
    }

    /// Advance by `ms` and return how many times the interval fired.
    pub fn advance(&mut self, ms: u64) -> u32 {
        self.elapsed_ms += ms;
        let fires = self.elapsed_ms / self.period_ms;
        self.elapsed_ms %= self.period_ms;
        fires as u32
    }

    /// Milliseconds until the next fire.
    pub fn remaining_ms(&self) -> u64 {
        self.period_ms - self.elapsed_ms
    }

    pub fn period_ms(&self) -> u64 {
        self.period_ms
    }
}

/// A one-shot deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeout {
    remaining_ms: u64,
}

impl Timeout {
    pub fn new(ms: u64) -> Self {
        Self { remaining_ms: ms }
    }

    /// Advance by `ms`; returns true once the deadline has been reached.
    pub fn advance(&mut self, ms: u64) -> bool {
        self.remaining_ms = self.remaining_ms.saturating_sub(ms);
        self.remaining_ms == 0
    }

    pub fn remaining_ms(&self) -> u64 {
        self.remaining_ms
    }
}
