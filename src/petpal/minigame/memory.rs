//! Memory Match: sixteen face-down cards hide eight care pairs. Turn two at
//! a time; a pair stays up, a miss flips back after a short hold.

use crate::petpal::rng::SimRng;
use crate::time::Timeout;

pub const PAIRS: usize = 8;
pub const CARDS: usize = PAIRS * 2;
pub const GRID_COLS: usize = 4;
pub const TIME_LIMIT_MS: u64 = 60_000;
pub const FLIP_BACK_MS: u64 = 900;
pub const PAY_PER_PAIR: i64 = 10;

/// (emoji, label) per pair.
pub const FACES: [(&str, &str); PAIRS] = [
    ("🍎", "Apple"),
    ("🥣", "Kibble"),
    ("💉", "Vaccine"),
    ("🩺", "Stethoscope"),
    ("🛁", "Bath"),
    ("🧶", "Yarn Ball"),
    ("🧩", "Puzzle"),
    ("❤️", "Love"),
];

pub fn payout(pairs: usize) -> i64 {
    (pairs as i64 * PAY_PER_PAIR).min(PAIRS as i64 * PAY_PER_PAIR)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Card {
    /// Index into `FACES`.
    pub face: usize,
    pub matched: bool,
}

impl Card {
    pub fn emoji(&self) -> &'static str {
        FACES[self.face].0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum MemoryPhase {
    Ready,
    Playing {
        clock: Timeout,
        turned: Option<usize>,
    },
    /// Two different faces are showing; input is locked until `hold` ends.
    Mismatch {
        clock: Timeout,
        first: usize,
        second: usize,
        hold: Timeout,
    },
    Done,
}

pub struct MemoryMatch {
    pub cards: [Card; CARDS],
    pub pairs_found: usize,
    pub flips: u32,
    pub phase: MemoryPhase,
}

impl MemoryMatch {
    pub fn new(mut rng: SimRng) -> Self {
        let mut cards = [Card {
            face: 0,
            matched: false,
        }; CARDS];
        for (i, card) in cards.iter_mut().enumerate() {
            card.face = i / 2;
        }
        rng.shuffle(&mut cards);
        Self {
            cards,
            pairs_found: 0,
            flips: 0,
            phase: MemoryPhase::Ready,
        }
    }

    pub fn start(&mut self) {
        if self.phase == MemoryPhase::Ready {
            self.phase = MemoryPhase::Playing {
                clock: Timeout::new(TIME_LIMIT_MS),
                turned: None,
            };
        }
    }

    pub fn remaining_ms(&self) -> u64 {
        match &self.phase {
            MemoryPhase::Ready => TIME_LIMIT_MS,
            MemoryPhase::Playing { clock, .. } | MemoryPhase::Mismatch { clock, .. } => {
                clock.remaining_ms()
            }
            MemoryPhase::Done => 0,
        }
    }

    /// Whether card `idx` is currently showing its face.
    pub fn is_face_up(&self, idx: usize) -> bool {
        let Some(card) = self.cards.get(idx) else {
            return false;
        };
        if card.matched {
            return true;
        }
        match self.phase {
            MemoryPhase::Playing { turned, .. } => turned == Some(idx),
            MemoryPhase::Mismatch { first, second, .. } => idx == first || idx == second,
            _ => false,
        }
    }

    pub fn advance(&mut self, ms: u64) {
        match &mut self.phase {
            MemoryPhase::Playing { clock, .. } => {
                if clock.advance(ms) {
                    self.phase = MemoryPhase::Done;
                }
            }
            MemoryPhase::Mismatch { clock, hold, .. } => {
                if clock.advance(ms) {
                    self.phase = MemoryPhase::Done;
                } else if hold.advance(ms) {
                    let clock = *clock;
                    self.phase = MemoryPhase::Playing {
                        clock,
                        turned: None,
                    };
                }
            }
            MemoryPhase::Ready | MemoryPhase::Done => {}
        }
    }

    /// Turn card `idx`. Matched cards, the card already showing and any
    /// press during a mismatch hold are ignored.
    pub fn press(&mut self, idx: usize) {
        let MemoryPhase::Playing { clock, turned } = self.phase else {
            return;
        };
        match self.cards.get(idx) {
            Some(card) if !card.matched => {}
            _ => return,
        }
        if turned == Some(idx) {
            return;
        }
        self.flips += 1;

        let Some(first) = turned else {
            self.phase = MemoryPhase::Playing {
                clock,
                turned: Some(idx),
            };
            return;
        };

        if self.cards[first].face == self.cards[idx].face {
            self.cards[first].matched = true;
            self.cards[idx].matched = true;
            self.pairs_found += 1;
            self.phase = if self.pairs_found == PAIRS {
                MemoryPhase::Done
            } else {
                MemoryPhase::Playing {
                    clock,
                    turned: None,
                }
            };
        } else {
            self.phase = MemoryPhase::Mismatch {
                clock,
                first,
                second: idx,
                hold: Timeout::new(FLIP_BACK_MS),
            };
        }
    }

    pub fn is_done(&self) -> bool {
        self.phase == MemoryPhase::Done
    }

    pub fn all_matched(&self) -> bool {
        self.pairs_found == PAIRS
    }

    pub fn earnings(&self) -> i64 {
        payout(self.pairs_found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started() -> MemoryMatch {
        let mut g = MemoryMatch::new(SimRng::new(11));
        g.start();
        g
    }

    /// Indices of both cards showing `face`.
    fn pair_of(g: &MemoryMatch, face: usize) -> (usize, usize) {
        let mut found = g
            .cards
            .iter()
            .enumerate()
            .filter(|(_, c)| c.face == face)
            .map(|(i, _)| i);
        (found.next().unwrap(), found.next().unwrap())
    }

    fn mismatched(g: &MemoryMatch) -> (usize, usize) {
        let (a, _) = pair_of(g, 0);
        let (b, _) = pair_of(g, 1);
        (a, b)
    }

    #[test]
    fn deck_holds_each_face_twice() {
        let g = MemoryMatch::new(SimRng::new(3));
        for face in 0..PAIRS {
            assert_eq!(g.cards.iter().filter(|c| c.face == face).count(), 2);
        }
        assert!(g.cards.iter().all(|c| !c.matched));
    }

    #[test]
    fn presses_before_start_do_nothing() {
        let mut g = MemoryMatch::new(SimRng::new(3));
        g.press(0);
        assert_eq!(g.flips, 0);
        assert!(!g.is_face_up(0));
        g.advance(TIME_LIMIT_MS);
        assert_eq!(g.phase, MemoryPhase::Ready);
    }

    #[test]
    fn matching_pair_stays_up() {
        let mut g = started();
        let (a, b) = pair_of(&g, 4);
        g.press(a);
        assert!(g.is_face_up(a));
        g.press(b);
        assert_eq!(g.pairs_found, 1);
        assert!(g.cards[a].matched && g.cards[b].matched);
        assert!(g.is_face_up(a) && g.is_face_up(b));
        assert_eq!(g.flips, 2);
        // a matched card can't be turned again
        g.press(a);
        assert_eq!(g.flips, 2);
    }

    #[test]
    fn turning_the_same_card_twice_is_ignored() {
        let mut g = started();
        let (a, _) = pair_of(&g, 2);
        g.press(a);
        g.press(a);
        assert_eq!(g.flips, 1);
        assert!(matches!(g.phase, MemoryPhase::Playing { turned: Some(t), .. } if t == a));
    }

    #[test]
    fn mismatch_flips_back_after_hold() {
        let mut g = started();
        let (a, b) = mismatched(&g);
        g.press(a);
        g.press(b);
        assert!(g.is_face_up(a) && g.is_face_up(b));
        assert_eq!(g.pairs_found, 0);

        // board is locked while both show
        let (c, _) = pair_of(&g, 5);
        g.press(c);
        assert_eq!(g.flips, 2);

        g.advance(FLIP_BACK_MS - 1);
        assert!(g.is_face_up(a));
        g.advance(1);
        assert!(!g.is_face_up(a) && !g.is_face_up(b));
        assert!(matches!(g.phase, MemoryPhase::Playing { turned: None, .. }));
    }

    #[test]
    fn clock_runs_through_the_hold() {
        let mut g = started();
        let (a, b) = mismatched(&g);
        g.press(a);
        g.press(b);
        g.advance(FLIP_BACK_MS);
        assert_eq!(g.remaining_ms(), TIME_LIMIT_MS - FLIP_BACK_MS);
    }

    #[test]
    fn clock_expiry_ends_the_game() {
        let mut g = started();
        let (a, b) = pair_of(&g, 0);
        g.press(a);
        g.press(b);
        g.advance(TIME_LIMIT_MS - 1);
        assert!(!g.is_done());
        g.advance(1);
        assert!(g.is_done());
        assert_eq!(g.remaining_ms(), 0);
        assert_eq!(g.earnings(), PAY_PER_PAIR);
        let (c, d) = pair_of(&g, 1);
        g.press(c);
        g.press(d);
        assert_eq!(g.pairs_found, 1);
    }

    #[test]
    fn expiry_during_mismatch_hold_ends_the_game() {
        let mut g = started();
        g.advance(TIME_LIMIT_MS - 100);
        let (a, b) = mismatched(&g);
        g.press(a);
        g.press(b);
        g.advance(100);
        assert!(g.is_done());
    }

    #[test]
    fn clearing_the_board_pays_in_full() {
        let mut g = started();
        for face in 0..PAIRS {
            let (a, b) = pair_of(&g, face);
            g.press(a);
            g.press(b);
        }
        assert!(g.is_done());
        assert!(g.all_matched());
        assert_eq!(g.earnings(), 80);
        assert_eq!(g.remaining_ms(), 0);
    }

    #[test]
    fn payout_scales_with_pairs() {
        assert_eq!(payout(0), 0);
        assert_eq!(payout(3), 30);
        assert_eq!(payout(PAIRS), 80);
        assert_eq!(payout(20), 80);
    }
}
