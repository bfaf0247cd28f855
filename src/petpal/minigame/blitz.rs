//! Budget Blitz: ten quick budgeting questions, eight seconds each.

use crate::petpal::rng::SimRng;
use crate::time::Timeout;

pub const TOTAL_QUESTIONS: usize = 10;
pub const TIME_PER_QUESTION_MS: u64 = 8_000;
pub const PAY_PER_CORRECT: i64 = 10;
/// Pause showing the right answer after the player picks one.
const REVEAL_AFTER_ANSWER_MS: u64 = 700;
/// Shorter pause after running out of time.
const REVEAL_AFTER_TIMEOUT_MS: u64 = 600;

#[derive(Clone, Debug, PartialEq)]
pub struct Question {
    pub text: String,
    pub answer: i64,
    pub options: [i64; 4],
}

impl Question {
    /// Builds four distinct options from the answer and some plausible
    /// wrong values, topping up with nearby numbers if candidates collide.
    fn new(text: String, answer: i64, wrong: [i64; 3], rng: &mut SimRng) -> Self {
        // negative answers (a losing salary tier) keep negative distractors
        let allowed = |v: i64| answer <= 0 || v > 0;
        let mut opts = vec![answer];
        for w in wrong {
            if allowed(w) && !opts.contains(&w) {
                opts.push(w);
            }
        }
        let mut bump = 1;
        while opts.len() < 4 {
            let candidate = answer + bump;
            if allowed(candidate) && !opts.contains(&candidate) {
                opts.push(candidate);
            }
            bump = if bump > 0 { -bump } else { -bump + 1 };
        }
        rng.shuffle(&mut opts);
        Self {
            text,
            answer,
            options: [opts[0], opts[1], opts[2], opts[3]],
        }
    }

    pub fn answer_index(&self) -> usize {
        self.options
            .iter()
            .position(|o| *o == self.answer)
            .unwrap_or(0)
    }
}

fn pick(rng: &mut SimRng, values: &[i64]) -> i64 {
    rng.pick(values).copied().unwrap_or(values[0])
}

type Generator = fn(&mut SimRng) -> Question;

const GENERATORS: [Generator; 10] = [
    |rng| {
        let vet = pick(rng, &[10, 15, 25]);
        let wallet = vet + rng.below(30) as i64 + 5;
        let ans = wallet - vet;
        Question::new(
            format!("Vet visit costs ${vet}. You have ${wallet}. How much is left?"),
            ans,
            [ans + 5, ans - 5, ans + 10],
            rng,
        )
    },
    |rng| {
        let salary = pick(rng, &[15, 30]);
        let weeks = pick(rng, &[2, 3, 4]);
        let net = (salary - 20) * weeks;
        Question::new(
            format!("Salary ${salary}/wk, bills $20/wk. Net change after {weeks} weeks?"),
            net,
            [net + salary, net - 20, net + 10],
            rng,
        )
    },
    |rng| {
        let meal = pick(rng, &[2, 6, 12]);
        let qty = pick(rng, &[2, 3, 4]);
        let ans = meal * qty;
        Question::new(
            format!("One meal costs ${meal}. How much for {qty} meals?"),
            ans,
            [ans + meal, ans - meal, ans + 2],
            rng,
        )
    },
    |rng| {
        let start = pick(rng, &[100, 150, 200]);
        let vet = pick(rng, &[10, 15, 25]);
        let food = pick(rng, &[3, 6, 8]);
        let earned = pick(rng, &[5, 10, 15]);
        let ans = start - vet - food + earned;
        Question::new(
            format!(
                "Start: ${start}. Spent ${vet} on vet + ${food} on food. Earned ${earned} from minigame. Balance?"
            ),
            ans,
            [ans + vet, ans - earned, ans + 5],
            rng,
        )
    },
    |rng| {
        let toy = pick(rng, &[3, 8, 15]);
        let food = pick(rng, &[2, 6, 12]);
        let ans = toy + food;
        Question::new(
            format!("Toy costs ${toy} and food costs ${food}. Total cost?"),
            ans,
            [ans + toy, ans - food, ans + 3],
            rng,
        )
    },
    |rng| {
        let ans = 200 + (30 - 20) * 12;
        Question::new(
            "Start: $200. $30 salary - $20 bills/wk for 12 weeks. Final wallet (no spending)?"
                .to_string(),
            ans,
            [ans - 50, ans + 50, ans - 20 * 12],
            rng,
        )
    },
    |rng| {
        let budget = pick(rng, &[200, 150, 100]);
        let spent = budget * 2 / 5;
        let pct = 40;
        Question::new(
            format!("Budget: ${budget}. Spent: ${spent}. What % of budget did you spend?"),
            pct,
            [pct + 10, pct - 10, pct + 20],
            rng,
        )
    },
    |rng| {
        let per_day = pick(rng, &[2, 3, 4]);
        let days = pick(rng, &[7, 14, 30]);
        let ans = per_day * days;
        Question::new(
            format!("Pet food costs ${per_day}/day. How much for {days} days?"),
            ans,
            [ans + per_day * 2, ans - per_day, ans + 10],
            rng,
        )
    },
    |rng| {
        let goal = pick(rng, &[50, 75, 100]);
        let current = goal * 3 / 5;
        let ans = goal - current;
        Question::new(
            format!("Savings goal: ${goal}. Current savings: ${current}. How much more needed?"),
            ans,
            [ans + 10, ans + 20, current],
            rng,
        )
    },
    |rng| {
        let income = pick(rng, &[5, 10, 15]);
        let plays = pick(rng, &[2, 3, 4]);
        let ans = income * plays;
        Question::new(
            format!("Each minigame earns ${income}. Total from {plays} games?"),
            ans,
            [ans + income, ans - income, ans * 2],
            rng,
        )
    },
];

pub fn generate_questions(rng: &mut SimRng) -> Vec<Question> {
    let mut order: Vec<usize> = (0..GENERATORS.len()).collect();
    rng.shuffle(&mut order);
    order
        .into_iter()
        .take(TOTAL_QUESTIONS)
        .map(|i| GENERATORS[i](rng))
        .collect()
}

#[derive(Clone, Debug, PartialEq)]
pub enum BlitzPhase {
    Ready,
    Asking(Timeout),
    /// `chosen` is `None` when time ran out.
    Reveal {
        chosen: Option<usize>,
        timer: Timeout,
    },
    Done,
}

pub struct BudgetBlitz {
    pub questions: Vec<Question>,
    pub current: usize,
    pub correct: u32,
    pub phase: BlitzPhase,
}

impl BudgetBlitz {
    pub fn new(rng: &mut SimRng) -> Self {
        Self {
            questions: generate_questions(rng),
            current: 0,
            correct: 0,
            phase: BlitzPhase::Ready,
        }
    }

    pub fn start(&mut self) {
        if self.phase == BlitzPhase::Ready {
            self.phase = BlitzPhase::Asking(Timeout::new(TIME_PER_QUESTION_MS));
        }
    }

    pub fn question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    /// Whole seconds left on the current question.
    pub fn seconds_left(&self) -> u64 {
        match &self.phase {
            BlitzPhase::Asking(t) => t.remaining_ms().div_ceil(1_000),
            _ => 0,
        }
    }

    /// Answer with option `index` (0..4). Ignored outside the asking phase.
    pub fn answer(&mut self, index: usize) {
        if !matches!(self.phase, BlitzPhase::Asking(_)) || index >= 4 {
            return;
        }
        let Some(q) = self.question() else {
            return;
        };
        if q.options[index] == q.answer {
            self.correct += 1;
        }
        self.phase = BlitzPhase::Reveal {
            chosen: Some(index),
            timer: Timeout::new(REVEAL_AFTER_ANSWER_MS),
        };
    }

    pub fn advance(&mut self, ms: u64) {
        match &mut self.phase {
            BlitzPhase::Asking(timer) => {
                if timer.advance(ms) {
                    self.phase = BlitzPhase::Reveal {
                        chosen: None,
                        timer: Timeout::new(REVEAL_AFTER_TIMEOUT_MS),
                    };
                }
            }
            BlitzPhase::Reveal { timer, .. } => {
                if timer.advance(ms) {
                    self.next_question();
                }
            }
            BlitzPhase::Ready | BlitzPhase::Done => {}
        }
    }

    fn next_question(&mut self) {
        self.current += 1;
        self.phase = if self.current >= self.questions.len() {
            BlitzPhase::Done
        } else {
            BlitzPhase::Asking(Timeout::new(TIME_PER_QUESTION_MS))
        };
    }

    pub fn is_done(&self) -> bool {
        self.phase == BlitzPhase::Done
    }

    pub fn earnings(&self) -> i64 {
        self.correct as i64 * PAY_PER_CORRECT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game() -> BudgetBlitz {
        let mut g = BudgetBlitz::new(&mut SimRng::new(8));
        g.start();
        g
    }

    #[test]
    fn ten_questions_with_four_distinct_options() {
        let g = game();
        assert_eq!(g.questions.len(), TOTAL_QUESTIONS);
        for q in &g.questions {
            let mut opts = q.options.to_vec();
            opts.sort();
            opts.dedup();
            assert_eq!(opts.len(), 4, "{}", q.text);
            assert!(q.options.contains(&q.answer));
        }
    }

    #[test]
    fn every_generator_answers_correctly() {
        let mut rng = SimRng::new(21);
        for _ in 0..20 {
            for q in generate_questions(&mut rng) {
                assert_eq!(q.options[q.answer_index()], q.answer);
            }
        }
    }

    #[test]
    fn perfect_run_pays_hundred() {
        let mut g = game();
        while !g.is_done() {
            let idx = g.question().map(|q| q.answer_index()).unwrap();
            g.answer(idx);
            g.advance(REVEAL_AFTER_ANSWER_MS);
        }
        assert_eq!(g.correct, 10);
        assert_eq!(g.earnings(), 100);
    }

    #[test]
    fn timeouts_score_nothing() {
        let mut g = game();
        for _ in 0..TOTAL_QUESTIONS {
            g.advance(TIME_PER_QUESTION_MS);
            g.advance(REVEAL_AFTER_TIMEOUT_MS);
        }
        assert!(g.is_done());
        assert_eq!(g.earnings(), 0);
    }

    #[test]
    fn wrong_answer_moves_on_without_credit() {
        let mut g = game();
        let q = g.question().unwrap().clone();
        let wrong = (q.answer_index() + 1) % 4;
        g.answer(wrong);
        // second press during reveal is ignored
        g.answer(q.answer_index());
        g.advance(REVEAL_AFTER_ANSWER_MS);
        assert_eq!(g.correct, 0);
        assert_eq!(g.current, 1);
    }

    #[test]
    fn countdown_in_whole_seconds() {
        let mut g = game();
        assert_eq!(g.seconds_left(), 8);
        g.advance(1);
        assert_eq!(g.seconds_left(), 8);
        g.advance(999);
        assert_eq!(g.seconds_left(), 7);
    }

    #[test]
    fn nothing_happens_before_start() {
        let mut g = BudgetBlitz::new(&mut SimRng::new(1));
        g.answer(0);
        g.advance(100_000);
        assert_eq!(g.phase, BlitzPhase::Ready);
    }
}
