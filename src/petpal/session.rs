//! One play-through: owns the pet, the wallet and the toast list behind
//! shared handles, and hands those handles to the weekly ticker.

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::SimConfig;

use super::badges::{unlock_message, BadgeTracker};
use super::catalog::{FoodItem, ToyItem, VetOption};
use super::finance::{format_money, Category, Finance};
use super::minigame::MinigameResult;
use super::pet::{ActionKind, CareError, CareReceipt, PetProfile, PetState};
use super::rng::SimRng;
use super::scoring::WeekSnapshot;
use super::validate::ValidationError;
use super::toast::{ToastQueue, ToastTone};
use super::weekly::{WeekSummary, WeeklyTicker};

pub struct Session {
    pub pet: Rc<RefCell<PetState>>,
    pub finance: Rc<RefCell<Finance>>,
    pub toasts: Rc<RefCell<ToastQueue>>,
    pub ticker: WeeklyTicker<PetState, Finance>,
    pub badges: BadgeTracker,
    /// One entry per completed week, taken right after payday.
    pub snapshots: Vec<WeekSnapshot>,
    pub paused: bool,
    pub finished: bool,
    now_ms: u64,
    rng: SimRng,
}

fn category_for(kind: ActionKind) -> Option<Category> {
    match kind {
        ActionKind::Feed => Some(Category::Food),
        ActionKind::Play => Some(Category::Toys),
        ActionKind::Clean => Some(Category::Cleaning),
        ActionKind::Vet => Some(Category::Vet),
        ActionKind::Trick => Some(Category::Tricks),
        ActionKind::Rest => None,
    }
}

fn care_message(pet_name: &str, receipt: &CareReceipt) -> (String, ToastTone) {
    let item = &receipt.item;
    match receipt.kind {
        ActionKind::Feed => (format!("Fed {pet_name} a {item}!"), ToastTone::Success),
        ActionKind::Play => (
            format!("Played with {pet_name} using {item}!"),
            ToastTone::Success,
        ),
        ActionKind::Rest => (
            format!("{pet_name} is resting. Energy recovering!"),
            ToastTone::Info,
        ),
        ActionKind::Clean => (format!("{pet_name} is squeaky clean!"), ToastTone::Success),
        ActionKind::Vet => (
            format!("{pet_name} visited the vet for {item}!"),
            ToastTone::Success,
        ),
        ActionKind::Trick => (format!("{pet_name} learned \"{item}\"!"), ToastTone::Success),
    }
}

impl Session {
    pub fn new(config: &SimConfig, profile: PetProfile, budget: i64, mut rng: SimRng) -> Self {
        let pet = Rc::new(RefCell::new(PetState::new(
            profile,
            &config.pet,
            SimRng::new(rng.next_u64()),
        )));
        let finance = Rc::new(RefCell::new(Finance::new(budget)));
        let toasts = Rc::new(RefCell::new(ToastQueue::new(
            config.toast.ttl_ms,
            SimRng::new(rng.next_u64()),
        )));
        let ticker = WeeklyTicker::new(
            config,
            Rc::clone(&pet),
            Rc::clone(&finance),
            Rc::clone(&toasts),
        );
        Self {
            pet,
            finance,
            toasts,
            ticker,
            badges: BadgeTracker::new(),
            snapshots: Vec::new(),
            paused: false,
            finished: false,
            now_ms: 0,
            rng,
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Completed weeks, capped at the session length.
    pub fn weeks_played(&self) -> u32 {
        self.ticker.week().min(self.ticker.total_weeks())
    }

    pub fn toast(&self, message: impl Into<String>, tone: ToastTone) {
        self.toasts.borrow_mut().push(message, tone, self.now_ms);
    }

    // ── Lifecycle ──────────────────────────────────────────────────

    /// Let the weekly timer run (game view visible and not paused).
    pub fn resume(&mut self) {
        if !self.paused && !self.finished {
            self.ticker.activate();
        }
    }

    /// Stop the weekly timer without touching anything else.
    pub fn suspend(&mut self) {
        self.ticker.deactivate();
    }

    /// Returns the new paused state.
    pub fn toggle_pause(&mut self) -> bool {
        if self.finished {
            return self.paused;
        }
        self.paused = !self.paused;
        if self.paused {
            self.suspend();
        } else {
            self.resume();
        }
        log::debug!("paused: {}", self.paused);
        self.paused
    }

    /// Same pet and owner, back to week zero with a fresh wallet.
    pub fn restart(&mut self, budget: i64) -> Result<(), ValidationError> {
        self.finance.borrow_mut().reset(budget)?;
        self.pet.borrow_mut().reset();
        self.ticker.reset();
        self.badges.reset();
        self.snapshots.clear();
        self.toasts.borrow_mut().clear();
        self.paused = false;
        self.finished = false;
        log::info!("session restarted with ${budget}");
        Ok(())
    }

    /// Advance virtual time by `ms`. Returns the paydays that fired.
    pub fn tick(&mut self, ms: u64) -> Vec<WeekSummary> {
        self.now_ms += ms;
        self.finance.borrow_mut().set_clock(self.now_ms);

        if !self.paused && !self.finished {
            self.pet.borrow_mut().advance(ms);
        }

        let summaries = self.ticker.advance(ms, self.now_ms);
        for summary in &summaries {
            self.finance.borrow_mut().record_week_end();
            let stats = self.pet.borrow().stats;
            self.snapshots.push(WeekSnapshot::from(stats));
            if summary.is_final {
                self.finished = true;
                log::info!(
                    "session over after {} weeks, wallet ${}",
                    summary.week,
                    self.finance.borrow().wallet
                );
            }
        }

        self.check_badges();
        self.toasts.borrow_mut().expire(self.now_ms);
        summaries
    }

    fn check_badges(&mut self) {
        let fresh = {
            let pet = self.pet.borrow();
            let finance = self.finance.borrow();
            self.badges.evaluate(&pet, &finance)
        };
        for badge in fresh {
            log::info!("badge earned: {}", badge.name);
            self.toast(unlock_message(badge), ToastTone::Badge);
        }
    }

    // ── Care actions ───────────────────────────────────────────────

    /// Run one care action against the pet, then charge the wallet and
    /// announce the outcome. A refused charge undoes the action. Failures
    /// become error toasts.
    fn care<F>(&mut self, action: F) -> Result<CareReceipt, CareError>
    where
        F: FnOnce(&mut PetState, i64) -> Result<CareReceipt, CareError>,
    {
        let wallet = self.finance.borrow().wallet;
        let checkpoint = self.pet.borrow().checkpoint();
        let mut outcome = action(&mut self.pet.borrow_mut(), wallet);

        if let Ok(receipt) = &outcome {
            if let Some(category) = category_for(receipt.kind).filter(|_| receipt.cost > 0) {
                let charged = self.finance.borrow_mut().spend(
                    receipt.cost,
                    category,
                    &receipt.item,
                    receipt.preventive,
                );
                if let Err(e) = charged {
                    log::warn!("care charge for {} refused, undoing: {e}", receipt.item);
                    self.pet.borrow_mut().rollback(checkpoint);
                    outcome = Err(e.into());
                }
            }
        }

        match &outcome {
            Ok(receipt) => {
                let name = self.pet.borrow().profile.name.clone();
                let (message, tone) = care_message(&name, receipt);
                self.toast(message, tone);
                self.check_badges();
            }
            Err(e) => self.toast(e.to_string(), ToastTone::Error),
        }
        outcome
    }

    pub fn feed(&mut self, food: &FoodItem) -> Result<CareReceipt, CareError> {
        self.care(|pet, wallet| pet.feed(food, wallet))
    }

    pub fn play(&mut self, toy: &ToyItem) -> Result<CareReceipt, CareError> {
        self.care(|pet, wallet| pet.play(toy, wallet))
    }

    pub fn rest(&mut self) -> Result<CareReceipt, CareError> {
        self.care(|pet, _| pet.rest())
    }

    pub fn clean(&mut self) -> Result<CareReceipt, CareError> {
        self.care(|pet, wallet| pet.clean(wallet))
    }

    pub fn health_check(&mut self, option: &VetOption) -> Result<CareReceipt, CareError> {
        self.care(|pet, wallet| pet.health_check(option, wallet))
    }

    pub fn learn_trick(&mut self, name: &str) -> Result<CareReceipt, CareError> {
        self.care(|pet, wallet| pet.learn_trick(name, wallet))
    }

    // ── Money outside care ─────────────────────────────────────────

    /// Returns true when the goal was accepted.
    pub fn set_savings_goal(&mut self, input: &str) -> bool {
        let result = self.finance.borrow_mut().set_savings_goal(input);
        match result {
            Ok(goal) => {
                self.toast(
                    format!("Savings goal set to {}!", format_money(goal)),
                    ToastTone::Success,
                );
                true
            }
            Err(e) => {
                self.toast(e.to_string(), ToastTone::Error);
                false
            }
        }
    }

    /// Fresh generator for a minigame round.
    pub fn minigame_rng(&mut self) -> SimRng {
        SimRng::new(self.rng.next_u64())
    }

    /// Pay out a finished minigame and count the play.
    pub fn finish_minigame(&mut self, result: &MinigameResult) {
        if result.amount > 0 {
            self.finance.borrow_mut().earn(result.amount, result.source);
            self.toast(
                format!("Earned {} from minigame!", format_money(result.amount)),
                ToastTone::Success,
            );
        }
        self.pet.borrow_mut().record_minigame();
        log::info!("{} paid ${}", result.source, result.amount);
        self.check_badges();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::petpal::badges::BadgeId;
    use crate::petpal::catalog::{FOODS, VET_OPTIONS};
    use crate::petpal::minigame::MinigameKind;
    use crate::petpal::pet::StatSnapshot;

    fn session() -> Session {
        let profile = PetProfile {
            name: "Mochi".into(),
            owner: "Ana".into(),
            ..PetProfile::default()
        };
        let mut s = Session::new(&SimConfig::default(), profile, 200, SimRng::new(17));
        s.resume();
        s
    }

    fn messages(s: &Session) -> Vec<String> {
        s.toasts.borrow().toasts.iter().map(|t| t.message.clone()).collect()
    }

    #[test]
    fn feeding_charges_wallet_and_toasts() {
        let mut s = session();
        let receipt = s.feed(&FOODS[0]).unwrap();
        assert_eq!(receipt.cost, 2);
        let f = s.finance.borrow();
        assert_eq!(f.wallet, 198);
        assert_eq!(f.expenses.last().map(|e| e.category), Some(Category::Food));
        drop(f);
        assert!(messages(&s).contains(&"Fed Mochi a Basic Kibble!".to_string()));
    }

    #[test]
    fn refused_charge_undoes_the_action() {
        let mut s = session();
        s.finance.borrow_mut().wallet = 1;
        let before = s.pet.borrow().stats;
        // the pet sees a bigger wallet than the ledger will honour
        let outcome = s.care(|pet, _| pet.feed(&FOODS[0], 10_000));
        assert!(matches!(outcome, Err(CareError::Invalid(_))));
        let pet = s.pet.borrow();
        assert_eq!(pet.stats, before);
        assert!(pet.action_log.is_empty());
        drop(pet);
        let f = s.finance.borrow();
        assert_eq!(f.wallet, 1);
        assert!(f.expenses.is_empty());
        drop(f);
        assert!(!messages(&s).iter().any(|m| m.starts_with("Fed Mochi")));
    }

    #[test]
    fn refused_trick_charge_forgets_the_trick() {
        let mut s = session();
        s.finance.borrow_mut().wallet = 0;
        let outcome = s.care(|pet, _| pet.learn_trick("Roll over", 10_000));
        assert!(outcome.is_err());
        assert!(s.pet.borrow().tricks.is_empty());
    }

    #[test]
    fn rest_is_free_and_info_toned() {
        let mut s = session();
        s.rest().unwrap();
        assert_eq!(s.finance.borrow().wallet, 200);
        assert!(s.finance.borrow().expenses.is_empty());
        let toasts = s.toasts.borrow();
        let t = toasts
            .toasts
            .iter()
            .find(|t| t.message == "Mochi is resting. Energy recovering!")
            .unwrap();
        assert_eq!(t.tone, ToastTone::Info);
    }

    #[test]
    fn refused_action_raises_error_toast() {
        let mut s = session();
        s.pet.borrow_mut().stats.energy = 100;
        assert_eq!(s.rest(), Err(CareError::EnergyMaxed));
        let toasts = s.toasts.borrow();
        let t = toasts.latest().unwrap();
        assert_eq!(t.tone, ToastTone::Error);
        assert_eq!(t.message, "Energy is already maxed out.");
    }

    #[test]
    fn unaffordable_leaves_everything_untouched() {
        let mut s = session();
        s.finance.borrow_mut().wallet = 5;
        let before = s.pet.borrow().stats;
        assert!(s.health_check(&VET_OPTIONS[1]).is_err());
        assert_eq!(s.pet.borrow().stats, before);
        assert_eq!(s.finance.borrow().wallet, 5);
    }

    #[test]
    fn full_treatment_counts_as_emergency() {
        let mut s = session();
        s.pet.borrow_mut().stats.health = 40;
        s.health_check(&VET_OPTIONS[1]).unwrap();
        let f = s.finance.borrow();
        assert_eq!(f.emergency_spending, 25);
        assert_eq!(f.preventive_spending, 0);
    }

    #[test]
    fn trick_toast_quotes_the_name() {
        let mut s = session();
        s.learn_trick("  Roll over ").unwrap();
        assert!(messages(&s).contains(&"Mochi learned \"Roll over\"!".to_string()));
        assert_eq!(s.finance.borrow().wallet, 190);
    }

    #[test]
    fn payday_records_week_and_snapshot() {
        let mut s = session();
        let summaries = s.tick(20_000);
        assert_eq!(summaries.len(), 1);
        assert_eq!(s.ticker.week(), 1);
        assert_eq!(s.snapshots.len(), 1);
        assert_eq!(s.finance.borrow().weekly_spending.len(), 1);
    }

    #[test]
    fn twelve_weeks_finish_the_session() {
        let mut s = session();
        for _ in 0..(12 * 40 + 10) {
            s.tick(500);
        }
        assert!(s.finished);
        assert!(!s.ticker.is_active());
        assert_eq!(s.ticker.week(), 12);
        assert_eq!(s.weeks_played(), 12);
        assert_eq!(s.snapshots.len(), 12);
    }

    #[test]
    fn suspended_session_does_not_pay() {
        let mut s = session();
        s.tick(10_000);
        s.suspend();
        s.tick(60_000);
        assert_eq!(s.ticker.week(), 0);
        s.resume();
        s.tick(19_999);
        assert_eq!(s.ticker.week(), 0);
        s.tick(1);
        assert_eq!(s.ticker.week(), 1);
    }

    #[test]
    fn pause_freezes_decay_and_paydays() {
        let mut s = session();
        assert!(s.toggle_pause());
        let before = s.pet.borrow().stats;
        s.tick(100_000);
        assert_eq!(s.pet.borrow().stats, before);
        assert_eq!(s.ticker.week(), 0);
        assert!(!s.toggle_pause());
        assert!(s.ticker.is_active());
    }

    #[test]
    fn payday_sees_care_done_after_start() {
        let mut s = session();
        s.pet.borrow_mut().stats = StatSnapshot::uniform(10);
        s.tick(19_000);
        // stats changed through the shared handle before payday
        s.pet.borrow_mut().stats = StatSnapshot::uniform(90);
        let summary = s.tick(1_000).remove(0);
        assert_eq!(summary.tier.salary, 25);
    }

    #[test]
    fn minigame_earnings_and_play_count() {
        let mut s = session();
        s.finish_minigame(&MinigameResult {
            kind: MinigameKind::BudgetBlitz,
            amount: 40,
            source: "Budget Blitz",
        });
        assert_eq!(s.finance.borrow().wallet, 240);
        assert_eq!(s.pet.borrow().minigames_played, 1);
        assert!(messages(&s).contains(&"Earned $40 from minigame!".to_string()));

        s.finish_minigame(&MinigameResult {
            kind: MinigameKind::ReflexTap,
            amount: 0,
            source: "Reflex Tap",
        });
        assert_eq!(s.finance.borrow().wallet, 240);
        assert_eq!(s.pet.borrow().minigames_played, 2);
    }

    #[test]
    fn badge_toast_fires_once() {
        let mut s = session();
        s.feed(&FOODS[0]).unwrap();
        s.feed(&FOODS[0]).unwrap();
        assert!(s.badges.is_earned(BadgeId::FirstMeal));
        let count = messages(&s)
            .iter()
            .filter(|m| m.starts_with("Badge unlocked: First Meal"))
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn toasts_expire_with_virtual_time() {
        let mut s = session();
        s.feed(&FOODS[0]).unwrap();
        assert!(!s.toasts.borrow().is_empty());
        s.tick(3_000);
        assert!(s.toasts.borrow().is_empty());
    }

    #[test]
    fn restart_keeps_profile_and_clears_progress() {
        let mut s = session();
        s.feed(&FOODS[2]).unwrap();
        s.tick(20_000);
        s.restart(150).unwrap();
        assert_eq!(s.pet.borrow().profile.name, "Mochi");
        assert!(s.pet.borrow().action_log.is_empty());
        assert_eq!(s.finance.borrow().wallet, 150);
        assert_eq!(s.ticker.week(), 0);
        assert!(s.snapshots.is_empty());
        assert!(s.badges.earned.is_empty());
        assert!(s.restart(55).is_err());
    }

    #[test]
    fn savings_goal_feedback() {
        let mut s = session();
        assert!(!s.set_savings_goal("0"));
        assert!(s.set_savings_goal("120"));
        assert_eq!(s.finance.borrow().savings_goal, Some(120));
        assert!(messages(&s).contains(&"Savings goal set to $120!".to_string()));
    }
}
