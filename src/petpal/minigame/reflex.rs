//! Reflex Tap: a paw lights up on one of nine pads; hit it before it
//! vanishes. The window shrinks with every hit.

use crate::petpal::rng::SimRng;
use crate::time::Timeout;

pub const TOTAL_ROUNDS: u32 = 15;
pub const PADS: usize = 9;
pub const BASE_WINDOW_MS: u64 = 1_400;
pub const MIN_WINDOW_MS: u64 = 500;
const WINDOW_STEP_MS: u64 = 60;
const FIRST_DELAY_MS: u64 = 800;
const BETWEEN_MS: u64 = 600;

/// (minimum hits, payout), best first
pub const PAYOUTS: [(u32, i64); 4] = [(13, 80), (9, 55), (5, 30), (1, 10)];

pub fn payout(hits: u32) -> i64 {
    PAYOUTS
        .iter()
        .find(|(min, _)| hits >= *min)
        .map(|(_, pay)| *pay)
        .unwrap_or(0)
}

pub fn window_ms(hits: u32) -> u64 {
    BASE_WINDOW_MS
        .saturating_sub(hits as u64 * WINDOW_STEP_MS)
        .max(MIN_WINDOW_MS)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Feedback {
    Hit,
    Miss,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ReflexPhase {
    Ready,
    /// Gap before the next paw; carries the last round's outcome.
    Waiting {
        timer: Timeout,
        last: Option<Feedback>,
    },
    Lit { pad: usize, timer: Timeout },
    Done,
}

pub struct ReflexTap {
    pub round: u32,
    pub hits: u32,
    pub phase: ReflexPhase,
    rng: SimRng,
}

impl ReflexTap {
    pub fn new(rng: SimRng) -> Self {
        Self {
            round: 0,
            hits: 0,
            phase: ReflexPhase::Ready,
            rng,
        }
    }

    pub fn start(&mut self) {
        if self.phase == ReflexPhase::Ready {
            self.phase = ReflexPhase::Waiting {
                timer: Timeout::new(FIRST_DELAY_MS),
                last: None,
            };
        }
    }

    pub fn lit_pad(&self) -> Option<usize> {
        match self.phase {
            ReflexPhase::Lit { pad, .. } => Some(pad),
            _ => None,
        }
    }

    pub fn current_window_ms(&self) -> u64 {
        window_ms(self.hits)
    }

    fn spawn(&mut self) {
        if self.round >= TOTAL_ROUNDS {
            self.phase = ReflexPhase::Done;
            return;
        }
        let pad = self.rng.below(PADS as u64) as usize;
        self.phase = ReflexPhase::Lit {
            pad,
            timer: Timeout::new(window_ms(self.hits)),
        };
    }

    fn end_round(&mut self, outcome: Feedback) {
        self.round += 1;
        self.phase = ReflexPhase::Waiting {
            timer: Timeout::new(BETWEEN_MS),
            last: Some(outcome),
        };
    }

    pub fn advance(&mut self, ms: u64) {
        match &mut self.phase {
            ReflexPhase::Waiting { timer, .. } => {
                if timer.advance(ms) {
                    self.spawn();
                }
            }
            ReflexPhase::Lit { timer, .. } => {
                if timer.advance(ms) {
                    self.end_round(Feedback::Miss);
                }
            }
            ReflexPhase::Ready | ReflexPhase::Done => {}
        }
    }

    /// Press pad `pad`. Only the lit pad counts; anything else is ignored.
    pub fn press(&mut self, pad: usize) {
        if self.lit_pad() == Some(pad) {
            self.hits += 1;
            self.end_round(Feedback::Hit);
        }
    }

    pub fn is_done(&self) -> bool {
        self.phase == ReflexPhase::Done
    }

    pub fn earnings(&self) -> i64 {
        payout(self.hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started() -> ReflexTap {
        let mut g = ReflexTap::new(SimRng::new(6));
        g.start();
        g
    }

    #[test]
    fn payout_tiers() {
        assert_eq!(payout(0), 0);
        assert_eq!(payout(1), 10);
        assert_eq!(payout(4), 10);
        assert_eq!(payout(5), 30);
        assert_eq!(payout(9), 55);
        assert_eq!(payout(13), 80);
        assert_eq!(payout(15), 80);
    }

    #[test]
    fn window_shrinks_to_floor() {
        assert_eq!(window_ms(0), 1_400);
        assert_eq!(window_ms(5), 1_100);
        assert_eq!(window_ms(15), 500);
        assert_eq!(window_ms(100), 500);
    }

    #[test]
    fn paw_appears_after_first_delay() {
        let mut g = started();
        g.advance(FIRST_DELAY_MS - 1);
        assert_eq!(g.lit_pad(), None);
        g.advance(1);
        assert!(g.lit_pad().is_some());
    }

    #[test]
    fn only_lit_pad_counts() {
        let mut g = started();
        g.advance(FIRST_DELAY_MS);
        let pad = g.lit_pad().unwrap();
        g.press((pad + 1) % PADS);
        assert_eq!(g.hits, 0);
        assert_eq!(g.lit_pad(), Some(pad));
        g.press(pad);
        assert_eq!(g.hits, 1);
        assert_eq!(g.round, 1);
        // pressing again during the gap does nothing
        g.press(pad);
        assert_eq!(g.hits, 1);
    }

    #[test]
    fn perfect_game_pays_eighty() {
        let mut g = started();
        g.advance(FIRST_DELAY_MS);
        while !g.is_done() {
            if let Some(pad) = g.lit_pad() {
                g.press(pad);
            }
            g.advance(BETWEEN_MS);
        }
        assert_eq!(g.hits, TOTAL_ROUNDS);
        assert_eq!(g.earnings(), 80);
    }

    #[test]
    fn idle_player_misses_every_round() {
        let mut g = started();
        // 800 lead-in, then 15 x (1400 window + 600 gap)
        for _ in 0..400 {
            g.advance(100);
        }
        assert!(g.is_done());
        assert_eq!(g.round, TOTAL_ROUNDS);
        assert_eq!(g.earnings(), 0);
    }
}
