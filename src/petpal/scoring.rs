//! End-of-session scoring: the headline score and care grade, the
//! four-part responsibility score, and the report analytics.

use super::finance::{Category, Expense, Finance};
use super::pet::{ActionKind, Mood, PetState, StatSnapshot};

// ── Headline score ─────────────────────────────────────────────

/// Wallet (never below zero) plus twice the rounded stat average.
pub fn final_score(stats: &StatSnapshot, wallet: i64) -> i64 {
    wallet.max(0) + stats.rounded_average() as i64 * 2
}

pub struct ScoreTier {
    pub min: i64,
    pub label: &'static str,
}

pub const SCORE_TIERS: [ScoreTier; 5] = [
    ScoreTier { min: 400, label: "Legendary Owner" },
    ScoreTier { min: 300, label: "Expert Owner" },
    ScoreTier { min: 200, label: "Good Owner" },
    ScoreTier { min: 100, label: "Learning Owner" },
    ScoreTier { min: i64::MIN, label: "Struggling Owner" },
];

pub fn score_tier(score: i64) -> &'static ScoreTier {
    SCORE_TIERS
        .iter()
        .find(|t| score >= t.min)
        .unwrap_or(&SCORE_TIERS[SCORE_TIERS.len() - 1])
}

/// Letter grade from the unrounded stat average.
pub fn care_grade(stats: &StatSnapshot) -> char {
    let avg = stats.average();
    if avg >= 90.0 {
        'A'
    } else if avg >= 75.0 {
        'B'
    } else if avg >= 60.0 {
        'C'
    } else if avg >= 45.0 {
        'D'
    } else {
        'F'
    }
}

// ── Responsibility score ───────────────────────────────────────

/// Per-week wellbeing inputs, recorded when each week closes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WeekSnapshot {
    pub happiness: i32,
    pub health: i32,
    pub energy: i32,
}

impl From<StatSnapshot> for WeekSnapshot {
    fn from(s: StatSnapshot) -> Self {
        Self {
            happiness: s.happiness,
            health: s.health,
            energy: s.energy,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OwnerClass {
    Elite,
    Responsible,
    Learning,
    Struggling,
    Neglectful,
}

impl OwnerClass {
    pub fn from_score(score: i64) -> Self {
        if score >= 90 {
            OwnerClass::Elite
        } else if score >= 75 {
            OwnerClass::Responsible
        } else if score >= 60 {
            OwnerClass::Learning
        } else if score >= 40 {
            OwnerClass::Struggling
        } else {
            OwnerClass::Neglectful
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OwnerClass::Elite => "Elite Owner",
            OwnerClass::Responsible => "Responsible Owner",
            OwnerClass::Learning => "Learning Owner",
            OwnerClass::Struggling => "Struggling Owner",
            OwnerClass::Neglectful => "Neglectful Owner",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Responsibility {
    pub wellbeing: i64,
    pub financial: i64,
    pub consistency: i64,
    pub volatility: i64,
    pub final_score: i64,
    pub class: OwnerClass,
}

fn clamp_pct(v: f64) -> f64 {
    v.clamp(0.0, 100.0)
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation; zero for fewer than two samples.
fn stddev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// 0.4 wellbeing + 0.3 financial + 0.2 consistency − 0.1 volatility.
pub struct ScoringEngine<'a> {
    pub snapshots: &'a [WeekSnapshot],
    pub weekly_spending: &'a [i64],
    pub preventive: i64,
    pub emergency: i64,
}

impl<'a> ScoringEngine<'a> {
    pub fn new(snapshots: &'a [WeekSnapshot], finance: &'a Finance) -> Self {
        Self {
            snapshots,
            weekly_spending: &finance.weekly_spending,
            preventive: finance.preventive_spending,
            emergency: finance.emergency_spending,
        }
    }

    /// Mean of (happiness + health + energy) / 3 over the weeks; 50 with no data.
    pub fn wellbeing(&self) -> f64 {
        if self.snapshots.is_empty() {
            return 50.0;
        }
        let weekly: Vec<f64> = self
            .snapshots
            .iter()
            .map(|s| (s.happiness + s.health + s.energy) as f64 / 3.0)
            .collect();
        clamp_pct(mean(&weekly))
    }

    /// Share of spending that was preventive; 50 when nothing was spent.
    pub fn financial(&self) -> f64 {
        let total = self.preventive + self.emergency;
        if total == 0 {
            return 50.0;
        }
        clamp_pct(self.preventive as f64 / total as f64 * 100.0)
    }

    /// 100 minus the average week-to-week swing, scaled so that all three
    /// stats moving by 100 scores 0.
    pub fn consistency(&self) -> f64 {
        if self.snapshots.len() < 2 {
            return 100.0;
        }
        let scores: Vec<f64> = self
            .snapshots
            .windows(2)
            .map(|w| {
                let (prev, cur) = (w[0], w[1]);
                let instability = (cur.happiness - prev.happiness).abs()
                    + (cur.health - prev.health).abs()
                    + (cur.energy - prev.energy).abs();
                clamp_pct(100.0 - instability as f64 / 300.0 * 100.0)
            })
            .collect();
        clamp_pct(mean(&scores))
    }

    /// Coefficient of variation of weekly spending, as a percentage.
    pub fn volatility(&self) -> f64 {
        if self.weekly_spending.is_empty() {
            return 0.0;
        }
        let values: Vec<f64> = self.weekly_spending.iter().map(|v| *v as f64).collect();
        let m = mean(&values);
        if m == 0.0 {
            return 0.0;
        }
        clamp_pct(stddev(&values) / m * 100.0)
    }

    pub fn calculate(&self) -> Responsibility {
        let w = self.wellbeing();
        let f = self.financial();
        let c = self.consistency();
        let v = self.volatility();
        let raw = 0.4 * w + 0.3 * f + 0.2 * c - 0.1 * v;
        let final_score = (raw.round() as i64).clamp(0, 100);
        Responsibility {
            wellbeing: w.round() as i64,
            financial: f.round() as i64,
            consistency: c.round() as i64,
            volatility: v.round() as i64,
            final_score,
            class: OwnerClass::from_score(final_score),
        }
    }
}

// ── Report analytics ───────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct CategoryShare {
    pub category: Category,
    pub amount: i64,
    pub percent: i64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ReportAnalytics {
    /// (label, count) in a fixed display order.
    pub action_counts: Vec<(&'static str, usize)>,
    pub biggest_expense: Option<Expense>,
    pub total_bills: i64,
    pub total_income: i64,
    /// Positive spending per category, in order of first appearance.
    pub breakdown: Vec<CategoryShare>,
    pub spending_total: i64,
    pub savings_status: Option<String>,
    pub insights: Vec<String>,
}

impl ReportAnalytics {
    pub fn build(pet: &PetState, finance: &Finance) -> Self {
        let count = |kind: ActionKind| pet.action_log.iter().filter(|e| e.kind == kind).count();
        let action_counts = vec![
            ("Feed", count(ActionKind::Feed)),
            ("Play", count(ActionKind::Play)),
            ("Rest", count(ActionKind::Rest)),
            ("Clean", count(ActionKind::Clean)),
            ("Health Check", count(ActionKind::Vet)),
            ("Teach Trick", count(ActionKind::Trick)),
        ];

        // First of equal maxima wins
        let biggest_expense = finance
            .expenses
            .iter()
            .filter(|e| e.amount > 0)
            .fold(None::<&Expense>, |best, e| match best {
                Some(b) if b.amount >= e.amount => Some(b),
                _ => Some(e),
            })
            .cloned();

        let mut breakdown: Vec<CategoryShare> = Vec::new();
        for e in finance.expenses.iter().filter(|e| e.amount > 0) {
            match breakdown.iter_mut().find(|s| s.category == e.category) {
                Some(s) => s.amount += e.amount,
                None => breakdown.push(CategoryShare {
                    category: e.category,
                    amount: e.amount,
                    percent: 0,
                }),
            }
        }
        let spending_total: i64 = breakdown.iter().map(|s| s.amount).sum();
        if spending_total > 0 {
            for s in &mut breakdown {
                s.percent = (s.amount as f64 / spending_total as f64 * 100.0).round() as i64;
            }
        }

        let savings_status = finance.savings_goal.map(|goal| {
            if finance.wallet >= goal {
                format!("Goal met: ${}", goal)
            } else {
                format!("${} short", goal - finance.wallet)
            }
        });

        let mut insights = Vec::new();
        if count(ActionKind::Vet) == 0 {
            insights.push(
                "No health checks were recorded. Vet visits usually protect salary income."
                    .to_string(),
            );
        }
        if count(ActionKind::Clean) < 2 {
            insights.push(
                "Cleaning was used rarely. Low hygiene can reduce health over time.".to_string(),
            );
        }
        if finance.wallet < 0 {
            insights.push(
                "The session ended in debt. Spending pace exceeded salary and minigame income."
                    .to_string(),
            );
        }
        if finance.savings_goal_met() == Some(true) {
            insights.push("Savings goal was achieved while completing pet care.".to_string());
        }
        let mood = pet.mood();
        if matches!(mood, Mood::Happy | Mood::Energetic) && pet.stats.health >= 70 {
            insights.push(format!(
                "Final pet reaction was {} with healthy stats, showing strong care balance.",
                mood.label()
            ));
        }
        if insights.is_empty() {
            insights.push(
                "Care and spending stayed balanced overall, with no major risk pattern detected."
                    .to_string(),
            );
        }

        Self {
            action_counts,
            biggest_expense,
            total_bills: finance.total_bills(),
            total_income: finance.total_income(),
            breakdown,
            spending_total,
            savings_status,
            insights,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PetSection;
    use crate::petpal::catalog::{FOODS, VET_OPTIONS};
    use crate::petpal::pet::PetProfile;
    use crate::petpal::rng::SimRng;

    fn snap(h: i32, he: i32, e: i32) -> WeekSnapshot {
        WeekSnapshot {
            happiness: h,
            health: he,
            energy: e,
        }
    }

    #[test]
    fn headline_score_and_tiers() {
        let stats = StatSnapshot::uniform(76);
        assert_eq!(final_score(&stats, 205), 357);
        assert_eq!(final_score(&stats, -40), 152);
        assert_eq!(score_tier(357).label, "Expert Owner");
        assert_eq!(score_tier(400).label, "Legendary Owner");
        assert_eq!(score_tier(99).label, "Struggling Owner");
        assert_eq!(score_tier(-5).label, "Struggling Owner");
    }

    #[test]
    fn grade_uses_unrounded_average() {
        let mut s = StatSnapshot::uniform(90);
        assert_eq!(care_grade(&s), 'A');
        s.hygiene = 89; // 89.8
        assert_eq!(care_grade(&s), 'B');
        assert_eq!(care_grade(&StatSnapshot::uniform(60)), 'C');
        assert_eq!(care_grade(&StatSnapshot::uniform(45)), 'D');
        assert_eq!(care_grade(&StatSnapshot::uniform(44)), 'F');
    }

    #[test]
    fn neutral_defaults_without_data() {
        let engine = ScoringEngine {
            snapshots: &[],
            weekly_spending: &[],
            preventive: 0,
            emergency: 0,
        };
        assert_eq!(engine.wellbeing(), 50.0);
        assert_eq!(engine.financial(), 50.0);
        assert_eq!(engine.consistency(), 100.0);
        assert_eq!(engine.volatility(), 0.0);
        // 20 + 15 + 20 - 0
        let r = engine.calculate();
        assert_eq!(r.final_score, 55);
        assert_eq!(r.class, OwnerClass::Struggling);
    }

    #[test]
    fn components_follow_formulas() {
        let snaps = [snap(90, 90, 90), snap(60, 90, 90)];
        let spending = [10, 30];
        let engine = ScoringEngine {
            snapshots: &snaps,
            weekly_spending: &spending,
            preventive: 40,
            emergency: 10,
        };
        assert!((engine.wellbeing() - 85.0).abs() < 1e-9);
        assert!((engine.financial() - 80.0).abs() < 1e-9);
        assert!((engine.consistency() - 90.0).abs() < 1e-9);
        // mean 20, population sd 10
        assert!((engine.volatility() - 50.0).abs() < 1e-9);
        let r = engine.calculate();
        // 34 + 24 + 18 - 5
        assert_eq!(r.final_score, 71);
        assert_eq!(r.class, OwnerClass::Learning);
    }

    #[test]
    fn zero_mean_spending_has_no_penalty() {
        let engine = ScoringEngine {
            snapshots: &[],
            weekly_spending: &[0, 0, 0],
            preventive: 0,
            emergency: 0,
        };
        assert_eq!(engine.volatility(), 0.0);
    }

    #[test]
    fn owner_class_thresholds() {
        assert_eq!(OwnerClass::from_score(90), OwnerClass::Elite);
        assert_eq!(OwnerClass::from_score(75), OwnerClass::Responsible);
        assert_eq!(OwnerClass::from_score(60), OwnerClass::Learning);
        assert_eq!(OwnerClass::from_score(40), OwnerClass::Struggling);
        assert_eq!(OwnerClass::from_score(39), OwnerClass::Neglectful);
    }

    #[test]
    fn analytics_summarise_session() {
        let mut pet = PetState::new(PetProfile::default(), &PetSection::default(), SimRng::new(1));
        let mut fin = Finance::new(200);
        let r = pet.feed(&FOODS[0], fin.wallet).unwrap();
        fin.spend(r.cost, Category::Food, &r.item, true).unwrap();
        let r = pet.health_check(&VET_OPTIONS[1], fin.wallet).unwrap();
        fin.spend(r.cost, Category::Vet, &r.item, false).unwrap();
        fin.charge_bill(15, "Rent");
        fin.charge_bill(5, "Utilities");
        fin.earn(25, "Weekly salary");
        fin.set_savings_goal("100").unwrap();

        let a = ReportAnalytics::build(&pet, &fin);
        assert_eq!(a.action_counts[0], ("Feed", 1));
        assert_eq!(a.action_counts[4], ("Health Check", 1));
        assert_eq!(a.biggest_expense.as_ref().map(|e| e.label.as_str()), Some("Full Treatment"));
        assert_eq!(a.total_bills, 20);
        assert_eq!(a.total_income, 25);
        assert_eq!(a.spending_total, 47);
        let shares: Vec<i64> = a.breakdown.iter().map(|s| s.percent).collect();
        // 2/47, 25/47, 20/47
        assert_eq!(shares, vec![4, 53, 43]);
        assert_eq!(a.savings_status.as_deref(), Some("Goal met: $100"));
        assert!(a.insights.iter().any(|i| i.starts_with("Cleaning was used rarely")));
        assert!(a.insights.iter().any(|i| i.starts_with("Savings goal was achieved")));
    }

    #[test]
    fn quiet_session_gets_balanced_insight() {
        let mut pet = PetState::new(PetProfile::default(), &PetSection::default(), SimRng::new(1));
        let mut fin = Finance::new(200);
        pet.stats = StatSnapshot::uniform(50);
        pet.health_check(&VET_OPTIONS[0], 200).unwrap();
        pet.clean(200).unwrap();
        pet.stats.hygiene = 50;
        pet.clean(200).unwrap();
        fin.wallet = 10;
        let a = ReportAnalytics::build(&pet, &fin);
        assert_eq!(a.insights.len(), 1);
        assert!(a.insights[0].starts_with("Care and spending stayed balanced"));
        assert_eq!(a.biggest_expense, None);
    }
}
