//! Weekly payday: bills, salary and the week counter.
//!
//! The ticker holds shared handles to the pet, the ledger and the toast
//! queue and borrows them only while a week is being processed, so every
//! fire sees the pet as it is right now.

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::{BillSpec, SalaryTierSpec, SimConfig, CRITICAL_LABEL};
use crate::time::Interval;

use super::finance::{format_money, format_signed_money};
use super::pet::StatSnapshot;
use super::toast::{ToastQueue, ToastTone};

/// Read side of the pet, as seen by the ticker.
pub trait StatSource {
    fn stat_snapshot(&self) -> StatSnapshot;
}

/// Write side of the wallet, as seen by the ticker.
pub trait Ledger {
    fn charge_bill(&mut self, amount: i64, label: &str);
    fn earn(&mut self, amount: i64, label: &str);
}

pub const SALARY_LABEL: &str = "Weekly salary";

#[derive(Clone, Debug, PartialEq)]
pub struct SalaryTier {
    pub salary: i64,
    pub label: String,
}

/// First tier whose threshold `avg` reaches, highest first. Below every
/// threshold the pet earns nothing.
pub fn classify(avg: f64, tiers: &[SalaryTierSpec]) -> SalaryTier {
    tiers
        .iter()
        .find(|t| avg >= t.min_average)
        .map(|t| SalaryTier {
            salary: t.salary,
            label: t.label.clone(),
        })
        .unwrap_or_else(|| SalaryTier {
            salary: 0,
            label: CRITICAL_LABEL.to_string(),
        })
}

/// Toast text and tone for one week's outcome.
pub fn payday_message(bill_total: i64, tier: &SalaryTier) -> (String, ToastTone) {
    let bills = format!("Bills {}", format_money(-bill_total));
    if tier.salary > 0 {
        let net = tier.salary - bill_total;
        let tone = if net >= 0 {
            ToastTone::Success
        } else {
            ToastTone::Info
        };
        (
            format!(
                "{} · Salary {} ({}) · Net {}",
                bills,
                format_signed_money(tier.salary),
                tier.label,
                format_signed_money(net)
            ),
            tone,
        )
    } else {
        (
            format!("{} · No salary — pet needs attention!", bills),
            ToastTone::Error,
        )
    }
}

/// What happened in one completed week.
#[derive(Clone, Debug, PartialEq)]
pub struct WeekSummary {
    /// 1-based number of the week that just ended.
    pub week: u32,
    pub average: f64,
    pub tier: SalaryTier,
    pub bills: i64,
    pub net: i64,
    pub is_final: bool,
}

#[derive(Debug, Clone)]
pub enum TickerState {
    Inactive,
    /// The running timer lives here, so leaving this state drops it.
    Active(Interval),
}

pub struct WeeklyTicker<P: StatSource, L: Ledger> {
    pet: Rc<RefCell<P>>,
    ledger: Rc<RefCell<L>>,
    toasts: Rc<RefCell<ToastQueue>>,
    bills: Vec<BillSpec>,
    tiers: Vec<SalaryTierSpec>,
    interval_ms: u64,
    total_weeks: u32,
    week: u32,
    state: TickerState,
}

impl<P: StatSource, L: Ledger> WeeklyTicker<P, L> {
    pub fn new(
        config: &SimConfig,
        pet: Rc<RefCell<P>>,
        ledger: Rc<RefCell<L>>,
        toasts: Rc<RefCell<ToastQueue>>,
    ) -> Self {
        Self {
            pet,
            ledger,
            toasts,
            bills: config.bills.clone(),
            tiers: config.salary_tiers.clone(),
            interval_ms: config.session.week_interval_ms,
            total_weeks: config.session.total_weeks,
            week: 0,
            state: TickerState::Inactive,
        }
    }

    /// Weeks completed so far.
    pub fn week(&self) -> u32 {
        self.week
    }

    pub fn total_weeks(&self) -> u32 {
        self.total_weeks
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, TickerState::Active(_))
    }

    pub fn is_finished(&self) -> bool {
        self.week >= self.total_weeks
    }

    pub fn bill_total(&self) -> i64 {
        self.bills.iter().map(|b| b.amount).sum()
    }

    /// Milliseconds until the next payday, when running.
    pub fn remaining_ms(&self) -> Option<u64> {
        match &self.state {
            TickerState::Active(interval) => Some(interval.remaining_ms()),
            TickerState::Inactive => None,
        }
    }

    /// Start a fresh interval. No-op when already running or finished.
    pub fn activate(&mut self) {
        if self.is_active() || self.is_finished() {
            return;
        }
        self.state = TickerState::Active(Interval::new(self.interval_ms));
    }

    pub fn deactivate(&mut self) {
        self.state = TickerState::Inactive;
    }

    /// Back to week 0, stopped.
    pub fn reset(&mut self) {
        self.week = 0;
        self.state = TickerState::Inactive;
    }

    /// Advance virtual time. Each elapsed period runs one payday to
    /// completion before the next; the ticker stops itself on the final week.
    pub fn advance(&mut self, ms: u64, now_ms: u64) -> Vec<WeekSummary> {
        let fires = match &mut self.state {
            TickerState::Active(interval) => interval.advance(ms),
            TickerState::Inactive => return Vec::new(),
        };

        let mut summaries = Vec::new();
        for _ in 0..fires {
            let summary = self.fire(now_ms);
            let done = summary.is_final;
            summaries.push(summary);
            if done {
                self.deactivate();
                break;
            }
        }
        summaries
    }

    fn fire(&mut self, now_ms: u64) -> WeekSummary {
        let stats = self.pet.borrow().stat_snapshot();
        let average = stats.average();
        let tier = classify(average, &self.tiers);

        {
            let mut ledger = self.ledger.borrow_mut();
            for bill in &self.bills {
                ledger.charge_bill(bill.amount, &bill.label);
            }
            if tier.salary > 0 {
                ledger.earn(tier.salary, SALARY_LABEL);
            }
        }

        let bills = self.bill_total();
        let (message, tone) = payday_message(bills, &tier);
        self.toasts.borrow_mut().push(message, tone, now_ms);
        self.week += 1;

        log::info!(
            "week {} closed: avg {:.1}, {} salary ${}, net {}",
            self.week,
            average,
            tier.label,
            tier.salary,
            tier.salary - bills
        );

        WeekSummary {
            week: self.week,
            average,
            net: tier.salary - bills,
            tier,
            bills,
            is_final: self.week >= self.total_weeks,
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_classify_matches_bands(avg in 0.0f64..=100.0) {
            let tier = classify(avg, &SimConfig::default().salary_tiers);
            let expected = if avg >= 75.0 {
                25
            } else if avg >= 50.0 {
                15
            } else if avg >= 25.0 {
                5
            } else {
                0
            };
            prop_assert_eq!(tier.salary, expected);
        }

        #[test]
        fn prop_salary_monotonic(a in 0.0f64..=100.0, b in 0.0f64..=100.0) {
            let tiers = SimConfig::default().salary_tiers;
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(classify(lo, &tiers).salary <= classify(hi, &tiers).salary);
        }

        #[test]
        fn prop_toast_tone_follows_net(salary in 0i64..60) {
            let tier = SalaryTier { salary, label: "x".into() };
            let (_, tone) = payday_message(20, &tier);
            let expected = if salary == 0 {
                ToastTone::Error
            } else if salary >= 20 {
                ToastTone::Success
            } else {
                ToastTone::Info
            };
            prop_assert_eq!(tone, expected);
        }
    }
}
