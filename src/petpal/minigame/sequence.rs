//! Care Sequence: watch a routine of care actions light up, then repeat it.
//! Five rounds, starting at three actions and growing by one each round.

use crate::petpal::rng::SimRng;
use crate::time::Timeout;

pub const TOTAL_ROUNDS: u32 = 5;
pub const START_LENGTH: usize = 3;
pub const PAY_PER_ROUND: i64 = 3;

const LEAD_IN_MS: u64 = 800;
const SHOW_MS: u64 = 550;
const GAP_MS: u64 = 200;
const INPUT_AFTER_LAST_MS: u64 = 200;
const NEXT_ROUND_MS: u64 = 1_000;
const FAIL_HOLD_MS: u64 = 1_500;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CareStep {
    Feed,
    Play,
    Clean,
    Rest,
    Vet,
}

pub const CARE_STEPS: [CareStep; 5] = [
    CareStep::Feed,
    CareStep::Play,
    CareStep::Clean,
    CareStep::Rest,
    CareStep::Vet,
];

impl CareStep {
    pub fn label(self) -> &'static str {
        match self {
            CareStep::Feed => "Feed",
            CareStep::Play => "Play",
            CareStep::Clean => "Clean",
            CareStep::Rest => "Rest",
            CareStep::Vet => "Vet",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            CareStep::Feed => "🍽️",
            CareStep::Play => "🎮",
            CareStep::Clean => "🛁",
            CareStep::Rest => "😴",
            CareStep::Vet => "🩺",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum SequencePhase {
    Ready,
    /// Waiting before the sequence starts playing.
    LeadIn(Timeout),
    /// `elapsed_ms` since the first step lit up.
    Showing { elapsed_ms: u64 },
    Input,
    /// Round cleared; the next one starts when the timer runs out.
    Cleared(Timeout),
    Failed { at: usize, timer: Timeout },
    Done,
}

pub struct CareSequence {
    pub sequence: Vec<CareStep>,
    /// 0-based index of the round being played
    pub round: u32,
    pub rounds_completed: u32,
    pub progress: usize,
    pub phase: SequencePhase,
    rng: SimRng,
}

impl CareSequence {
    pub fn new(rng: SimRng) -> Self {
        Self {
            sequence: Vec::new(),
            round: 0,
            rounds_completed: 0,
            progress: 0,
            phase: SequencePhase::Ready,
            rng,
        }
    }

    pub fn start(&mut self) {
        if self.phase == SequencePhase::Ready {
            self.start_round(0);
        }
    }

    fn start_round(&mut self, round: u32) {
        let len = START_LENGTH + round as usize;
        self.sequence = (0..len)
            .map(|_| CARE_STEPS[self.rng.below(CARE_STEPS.len() as u64) as usize])
            .collect();
        self.round = round;
        self.progress = 0;
        self.phase = SequencePhase::LeadIn(Timeout::new(LEAD_IN_MS));
    }

    fn show_duration(&self) -> u64 {
        self.sequence.len() as u64 * (SHOW_MS + GAP_MS) + INPUT_AFTER_LAST_MS
    }

    /// The step currently lit while the sequence plays, if any.
    pub fn highlighted(&self) -> Option<CareStep> {
        let SequencePhase::Showing { elapsed_ms } = self.phase else {
            return None;
        };
        let slot = SHOW_MS + GAP_MS;
        let idx = (elapsed_ms / slot) as usize;
        if elapsed_ms % slot < SHOW_MS {
            self.sequence.get(idx).copied()
        } else {
            None
        }
    }

    pub fn advance(&mut self, ms: u64) {
        let show_total = self.show_duration();
        match &mut self.phase {
            SequencePhase::LeadIn(timer) => {
                if timer.advance(ms) {
                    self.phase = SequencePhase::Showing { elapsed_ms: 0 };
                }
            }
            SequencePhase::Showing { elapsed_ms } => {
                *elapsed_ms += ms;
                if *elapsed_ms >= show_total {
                    self.phase = SequencePhase::Input;
                }
            }
            SequencePhase::Cleared(timer) => {
                if timer.advance(ms) {
                    let next = self.round + 1;
                    self.start_round(next);
                }
            }
            SequencePhase::Failed { timer, .. } => {
                if timer.advance(ms) {
                    self.phase = SequencePhase::Done;
                }
            }
            SequencePhase::Ready | SequencePhase::Input | SequencePhase::Done => {}
        }
    }

    /// Repeat one step. Only counts during the input phase.
    pub fn press(&mut self, step: CareStep) {
        if self.phase != SequencePhase::Input {
            return;
        }
        if self.sequence.get(self.progress) != Some(&step) {
            self.phase = SequencePhase::Failed {
                at: self.progress,
                timer: Timeout::new(FAIL_HOLD_MS),
            };
            return;
        }
        self.progress += 1;
        if self.progress == self.sequence.len() {
            self.rounds_completed += 1;
            self.phase = if self.rounds_completed >= TOTAL_ROUNDS {
                SequencePhase::Done
            } else {
                SequencePhase::Cleared(Timeout::new(NEXT_ROUND_MS))
            };
        }
    }

    pub fn is_done(&self) -> bool {
        self.phase == SequencePhase::Done
    }

    pub fn earnings(&self) -> i64 {
        self.rounds_completed as i64 * PAY_PER_ROUND
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started() -> CareSequence {
        let mut g = CareSequence::new(SimRng::new(4));
        g.start();
        g
    }

    fn to_input(g: &mut CareSequence) {
        g.advance(LEAD_IN_MS);
        let show = g.show_duration();
        g.advance(show);
        assert_eq!(g.phase, SequencePhase::Input);
    }

    fn play_round(g: &mut CareSequence) {
        to_input(g);
        for step in g.sequence.clone() {
            g.press(step);
        }
    }

    #[test]
    fn first_round_has_three_steps() {
        let g = started();
        assert_eq!(g.sequence.len(), 3);
        assert!(matches!(g.phase, SequencePhase::LeadIn(_)));
    }

    #[test]
    fn highlight_follows_the_timeline() {
        let mut g = started();
        g.advance(LEAD_IN_MS);
        assert_eq!(g.highlighted(), Some(g.sequence[0]));
        g.advance(SHOW_MS);
        assert_eq!(g.highlighted(), None);
        g.advance(GAP_MS);
        assert_eq!(g.highlighted(), Some(g.sequence[1]));
    }

    #[test]
    fn input_waits_for_the_whole_show() {
        let mut g = started();
        g.advance(LEAD_IN_MS);
        g.advance(3 * 750 + 199);
        assert!(matches!(g.phase, SequencePhase::Showing { .. }));
        g.press(g.sequence[0]);
        assert_eq!(g.progress, 0);
        g.advance(1);
        assert_eq!(g.phase, SequencePhase::Input);
    }

    #[test]
    fn perfect_game_pays_fifteen() {
        let mut g = started();
        for round in 0..TOTAL_ROUNDS {
            assert_eq!(g.sequence.len(), START_LENGTH + round as usize);
            play_round(&mut g);
            if round + 1 < TOTAL_ROUNDS {
                g.advance(NEXT_ROUND_MS);
            }
        }
        assert!(g.is_done());
        assert_eq!(g.earnings(), 15);
    }

    #[test]
    fn wrong_step_fails_then_ends() {
        let mut g = started();
        play_round(&mut g);
        g.advance(NEXT_ROUND_MS);
        to_input(&mut g);
        let first = g.sequence[0];
        let wrong = CARE_STEPS.iter().copied().find(|s| *s != first).unwrap();
        g.press(wrong);
        assert!(matches!(g.phase, SequencePhase::Failed { at: 0, .. }));
        g.advance(FAIL_HOLD_MS - 1);
        assert!(!g.is_done());
        g.advance(1);
        assert!(g.is_done());
        assert_eq!(g.earnings(), 3);
    }
}
