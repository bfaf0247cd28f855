//! Minigame hub. Games pay into the wallet when the player collects.

pub mod blitz;
pub mod memory;
pub mod reflex;
pub mod sequence;

use super::rng::SimRng;
use blitz::BudgetBlitz;
use memory::MemoryMatch;
use reflex::ReflexTap;
use sequence::{CareSequence, CARE_STEPS};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MinigameKind {
    BudgetBlitz,
    CareSequence,
    ReflexTap,
    MemoryMatch,
}

pub const ALL_MINIGAMES: [MinigameKind; 4] = [
    MinigameKind::BudgetBlitz,
    MinigameKind::CareSequence,
    MinigameKind::ReflexTap,
    MinigameKind::MemoryMatch,
];

pub struct MinigameInfo {
    pub name: &'static str,
    pub emoji: &'static str,
    pub description: &'static str,
    pub difficulty: &'static str,
    pub max_earnings: i64,
}

pub fn minigame_info(kind: MinigameKind) -> MinigameInfo {
    match kind {
        MinigameKind::BudgetBlitz => MinigameInfo {
            name: "Budget Blitz",
            emoji: "🧮",
            description: "Answer pet budgeting math questions quickly. 8 seconds per question!",
            difficulty: "Medium",
            max_earnings: blitz::TOTAL_QUESTIONS as i64 * blitz::PAY_PER_CORRECT,
        },
        MinigameKind::CareSequence => MinigameInfo {
            name: "Care Sequence",
            emoji: "🎯",
            description: "Memorize and repeat the pet care routine. Each round gets longer!",
            difficulty: "Hard",
            max_earnings: sequence::TOTAL_ROUNDS as i64 * sequence::PAY_PER_ROUND,
        },
        MinigameKind::ReflexTap => MinigameInfo {
            name: "Reflex Tap",
            emoji: "🐾",
            description: "Hit the glowing paw before it disappears! Gets faster each hit.",
            difficulty: "Hard",
            max_earnings: reflex::payout(reflex::TOTAL_ROUNDS),
        },
        MinigameKind::MemoryMatch => MinigameInfo {
            name: "Memory Match",
            emoji: "🃏",
            description: "Flip cards to find matching pet care pairs. Race against the 60-second clock!",
            difficulty: "Hard",
            max_earnings: memory::payout(memory::PAIRS),
        },
    }
}

pub enum ActiveGame {
    Blitz(BudgetBlitz),
    Sequence(CareSequence),
    Reflex(ReflexTap),
    Memory(MemoryMatch),
}

/// What a finished game hands back to the session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MinigameResult {
    pub kind: MinigameKind,
    pub amount: i64,
    pub source: &'static str,
}

impl ActiveGame {
    pub fn new(kind: MinigameKind, mut rng: SimRng) -> Self {
        match kind {
            MinigameKind::BudgetBlitz => ActiveGame::Blitz(BudgetBlitz::new(&mut rng)),
            MinigameKind::CareSequence => ActiveGame::Sequence(CareSequence::new(rng)),
            MinigameKind::ReflexTap => ActiveGame::Reflex(ReflexTap::new(rng)),
            MinigameKind::MemoryMatch => ActiveGame::Memory(MemoryMatch::new(rng)),
        }
    }

    pub fn kind(&self) -> MinigameKind {
        match self {
            ActiveGame::Blitz(_) => MinigameKind::BudgetBlitz,
            ActiveGame::Sequence(_) => MinigameKind::CareSequence,
            ActiveGame::Reflex(_) => MinigameKind::ReflexTap,
            ActiveGame::Memory(_) => MinigameKind::MemoryMatch,
        }
    }

    pub fn start(&mut self) {
        match self {
            ActiveGame::Blitz(g) => g.start(),
            ActiveGame::Sequence(g) => g.start(),
            ActiveGame::Reflex(g) => g.start(),
            ActiveGame::Memory(g) => g.start(),
        }
    }

    pub fn advance(&mut self, ms: u64) {
        match self {
            ActiveGame::Blitz(g) => g.advance(ms),
            ActiveGame::Sequence(g) => g.advance(ms),
            ActiveGame::Reflex(g) => g.advance(ms),
            ActiveGame::Memory(g) => g.advance(ms),
        }
    }

    /// Numbered input: answer option, care step, pad or card, 0-based.
    pub fn press(&mut self, n: usize) {
        match self {
            ActiveGame::Blitz(g) => g.answer(n),
            ActiveGame::Sequence(g) => {
                if let Some(step) = CARE_STEPS.get(n) {
                    g.press(*step);
                }
            }
            ActiveGame::Reflex(g) => g.press(n),
            ActiveGame::Memory(g) => g.press(n),
        }
    }

    pub fn is_done(&self) -> bool {
        match self {
            ActiveGame::Blitz(g) => g.is_done(),
            ActiveGame::Sequence(g) => g.is_done(),
            ActiveGame::Reflex(g) => g.is_done(),
            ActiveGame::Memory(g) => g.is_done(),
        }
    }

    pub fn earnings(&self) -> i64 {
        match self {
            ActiveGame::Blitz(g) => g.earnings(),
            ActiveGame::Sequence(g) => g.earnings(),
            ActiveGame::Reflex(g) => g.earnings(),
            ActiveGame::Memory(g) => g.earnings(),
        }
    }

    /// Result to pay out, available once the game has ended.
    pub fn collect(&self) -> Option<MinigameResult> {
        if !self.is_done() {
            return None;
        }
        let kind = self.kind();
        Some(MinigameResult {
            kind,
            amount: self.earnings(),
            source: minigame_info(kind).name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hub_lists_payouts_from_the_games() {
        assert_eq!(minigame_info(MinigameKind::BudgetBlitz).max_earnings, 100);
        assert_eq!(minigame_info(MinigameKind::CareSequence).max_earnings, 15);
        assert_eq!(minigame_info(MinigameKind::ReflexTap).max_earnings, 80);
        assert_eq!(minigame_info(MinigameKind::MemoryMatch).max_earnings, 80);
    }

    #[test]
    fn collect_only_after_done() {
        let mut g = ActiveGame::new(MinigameKind::ReflexTap, SimRng::new(2));
        assert_eq!(g.collect(), None);
        g.start();
        for _ in 0..400 {
            g.advance(100);
        }
        assert_eq!(
            g.collect(),
            Some(MinigameResult {
                kind: MinigameKind::ReflexTap,
                amount: 0,
                source: "Reflex Tap",
            })
        );
    }

    #[test]
    fn press_routes_to_the_game() {
        let mut g = ActiveGame::new(MinigameKind::BudgetBlitz, SimRng::new(5));
        g.start();
        let ActiveGame::Blitz(inner) = &g else {
            panic!("wrong game");
        };
        let idx = inner.question().unwrap().answer_index();
        g.press(idx);
        let ActiveGame::Blitz(inner) = &g else {
            panic!("wrong game");
        };
        assert_eq!(inner.correct, 1);
    }

    #[test]
    fn out_of_range_press_is_ignored() {
        let mut g = ActiveGame::new(MinigameKind::CareSequence, SimRng::new(5));
        g.start();
        g.press(42);
        assert!(!g.is_done());
    }

    #[test]
    fn memory_match_pays_per_pair_on_timeout() {
        let mut g = ActiveGame::new(MinigameKind::MemoryMatch, SimRng::new(8));
        g.start();
        let ActiveGame::Memory(inner) = &g else {
            panic!("wrong game");
        };
        let face = inner.cards[0].face;
        let twin = (1..memory::CARDS)
            .find(|&i| inner.cards[i].face == face)
            .unwrap();
        g.press(0);
        g.press(twin);
        g.advance(memory::TIME_LIMIT_MS);
        assert_eq!(
            g.collect(),
            Some(MinigameResult {
                kind: MinigameKind::MemoryMatch,
                amount: memory::PAY_PER_PAIR,
                source: "Memory Match",
            })
        );
    }
}
