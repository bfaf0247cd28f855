//! Pet state: stats, growth, care actions and passive decay.

use thiserror::Error;

use crate::config::PetSection;
use crate::time::Interval;

use super::catalog::{
    FoodItem, FoodKind, Species, ToyItem, VetKind, VetOption, CLEAN_COST, CLEAN_HYGIENE_BOOST,
    FULL_TREATMENT_BONUS, MYSTERY_SNACK_ROLLS, REST_ENERGY_BOOST, TRICK_COST,
};
use super::rng::SimRng;
use super::validate::{validate_item_cost, validate_trick_name, ValidationError};
use super::weekly::StatSource;

pub const STAT_MIN: i32 = 0;
pub const STAT_MAX: i32 = 100;

/// Health below this marks the session as having bottomed out.
pub const CRITICAL_HEALTH: i32 = 20;

pub const BASE_STATS: StatSnapshot = StatSnapshot {
    hunger: 80,
    happiness: 70,
    energy: 80,
    health: 80,
    hygiene: 70,
};

pub fn clamp_stat(value: i32) -> i32 {
    value.clamp(STAT_MIN, STAT_MAX)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stat {
    Hunger,
    Happiness,
    Energy,
    Health,
    Hygiene,
}

pub const ALL_STATS: [Stat; 5] = [
    Stat::Hunger,
    Stat::Happiness,
    Stat::Energy,
    Stat::Health,
    Stat::Hygiene,
];

impl Stat {
    pub fn label(self) -> &'static str {
        match self {
            Stat::Hunger => "Hunger",
            Stat::Happiness => "Happiness",
            Stat::Energy => "Energy",
            Stat::Health => "Health",
            Stat::Hygiene => "Hygiene",
        }
    }
}

/// The five stats at one moment. Copied out of the pet whenever someone
/// else (weekly ticker, scoring) needs to look at them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatSnapshot {
    pub hunger: i32,
    pub happiness: i32,
    pub energy: i32,
    pub health: i32,
    pub hygiene: i32,
}

impl StatSnapshot {
    pub fn uniform(value: i32) -> Self {
        Self {
            hunger: value,
            happiness: value,
            energy: value,
            health: value,
            hygiene: value,
        }
    }

    pub fn get(&self, stat: Stat) -> i32 {
        match stat {
            Stat::Hunger => self.hunger,
            Stat::Happiness => self.happiness,
            Stat::Energy => self.energy,
            Stat::Health => self.health,
            Stat::Hygiene => self.hygiene,
        }
    }

    fn slot(&mut self, stat: Stat) -> &mut i32 {
        match stat {
            Stat::Hunger => &mut self.hunger,
            Stat::Happiness => &mut self.happiness,
            Stat::Energy => &mut self.energy,
            Stat::Health => &mut self.health,
            Stat::Hygiene => &mut self.hygiene,
        }
    }

    /// Add `delta` with clamping; returns the change actually applied.
    pub fn apply(&mut self, stat: Stat, delta: i32) -> i32 {
        let slot = self.slot(stat);
        let before = *slot;
        *slot = clamp_stat(before + delta);
        *slot - before
    }

    pub fn values(&self) -> [i32; 5] {
        [
            self.hunger,
            self.happiness,
            self.energy,
            self.health,
            self.hygiene,
        ]
    }

    /// Unrounded mean of the five stats.
    pub fn average(&self) -> f64 {
        self.values().iter().sum::<i32>() as f64 / 5.0
    }

    /// Mean rounded half away from zero, as shown to the player.
    pub fn rounded_average(&self) -> i32 {
        self.average().round() as i32
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mood {
    Sick,
    Tired,
    Energetic,
    Happy,
    Sad,
    Content,
}

impl Mood {
    pub fn derive(stats: &StatSnapshot) -> Mood {
        let weighted = stats.hunger as f64 * 0.3
            + stats.happiness as f64 * 0.3
            + stats.health as f64 * 0.25
            + stats.energy as f64 * 0.1
            + stats.hygiene as f64 * 0.05;

        if stats.health < 30 {
            Mood::Sick
        } else if stats.energy < 25 {
            Mood::Tired
        } else if stats.energy > 85 {
            Mood::Energetic
        } else if weighted > 75.0 {
            Mood::Happy
        } else if weighted < 40.0 {
            Mood::Sad
        } else {
            Mood::Content
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mood::Sick => "sick",
            Mood::Tired => "tired",
            Mood::Energetic => "energetic",
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Content => "content",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Mood::Sick => "🤒",
            Mood::Tired => "😴",
            Mood::Energetic => "⚡",
            Mood::Happy => "😄",
            Mood::Sad => "😢",
            Mood::Content => "🙂",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Baby,
    Teen,
    Adult,
}

impl Stage {
    pub fn from_age(age: u32) -> Stage {
        if age < 5 {
            Stage::Baby
        } else if age < 10 {
            Stage::Teen
        } else {
            Stage::Adult
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Stage::Baby => "baby",
            Stage::Teen => "teen",
            Stage::Adult => "adult",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionKind {
    Feed,
    Play,
    Rest,
    Clean,
    Vet,
    Trick,
}

impl ActionKind {
    pub fn label(self) -> &'static str {
        match self {
            ActionKind::Feed => "feed",
            ActionKind::Play => "play",
            ActionKind::Rest => "rest",
            ActionKind::Clean => "clean",
            ActionKind::Vet => "vet",
            ActionKind::Trick => "trick",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ActionLogEntry {
    pub kind: ActionKind,
    pub cost: i64,
    pub note: String,
    pub at_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CareError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("Energy is already maxed out.")]
    EnergyMaxed,
    #[error("Hygiene is already at the maximum.")]
    HygieneMaxed,
    #[error("Health is already at the maximum.")]
    HealthMaxed,
}

/// What a successful care action did. The session turns this into a
/// wallet charge and a toast.
#[derive(Clone, Debug, PartialEq)]
pub struct CareReceipt {
    pub kind: ActionKind,
    pub item: String,
    pub cost: i64,
    /// Applied (post-clamp) changes, zero entries omitted.
    pub deltas: Vec<(Stat, i32)>,
    /// False only for reactive spending (full treatment).
    pub preventive: bool,
}

impl CareReceipt {
    fn new(kind: ActionKind, item: impl Into<String>, cost: i64) -> Self {
        Self {
            kind,
            item: item.into(),
            cost,
            deltas: Vec::new(),
            preventive: true,
        }
    }

    fn record(&mut self, stat: Stat, applied: i32) {
        if applied != 0 {
            self.deltas.push((stat, applied));
        }
    }

    pub fn delta(&self, stat: Stat) -> i32 {
        self.deltas
            .iter()
            .find(|(s, _)| *s == stat)
            .map(|(_, d)| *d)
            .unwrap_or(0)
    }

    /// "Hunger +15, Happiness +5"
    pub fn describe_deltas(&self) -> String {
        self.deltas
            .iter()
            .map(|(stat, d)| format!("{} {:+}", stat.label(), d))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PetProfile {
    pub name: String,
    pub owner: String,
    pub species: Species,
    pub color: usize,
    pub accessory: Option<usize>,
}

impl Default for PetProfile {
    fn default() -> Self {
        Self {
            name: "Pet".into(),
            owner: String::new(),
            species: Species::Dog,
            color: 0,
            accessory: None,
        }
    }
}

/// Counts of timer fires from one `advance` call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PetTimers {
    pub decays: u32,
    pub birthdays: u32,
}

/// What a care action may touch, captured so an uncharged action can be
/// undone.
#[derive(Clone, Copy, Debug)]
pub struct CareCheckpoint {
    stats: StatSnapshot,
    tricks: usize,
    log_len: usize,
    health_bottomed_out: bool,
}

pub struct PetState {
    pub profile: PetProfile,
    pub stats: StatSnapshot,
    pub age: u32,
    pub tricks: Vec<String>,
    pub minigames_played: u32,
    pub health_bottomed_out: bool,
    /// Chronological; newest last.
    pub action_log: Vec<ActionLogEntry>,
    decay_timer: Interval,
    age_timer: Interval,
    elapsed_ms: u64,
    rng: SimRng,
}

impl PetState {
    pub fn new(profile: PetProfile, timing: &PetSection, rng: SimRng) -> Self {
        Self {
            profile,
            stats: BASE_STATS,
            age: 0,
            tricks: Vec::new(),
            minigames_played: 0,
            health_bottomed_out: false,
            action_log: Vec::new(),
            decay_timer: Interval::new(timing.decay_interval_ms),
            age_timer: Interval::new(timing.age_interval_ms),
            elapsed_ms: 0,
            rng,
        }
    }

    pub fn mood(&self) -> Mood {
        Mood::derive(&self.stats)
    }

    pub fn stage(&self) -> Stage {
        Stage::from_age(self.age)
    }

    pub fn has_done(&self, kind: ActionKind) -> bool {
        self.action_log.iter().any(|e| e.kind == kind)
    }

    fn log(&mut self, kind: ActionKind, cost: i64, note: String) {
        self.action_log.push(ActionLogEntry {
            kind,
            cost,
            note,
            at_ms: self.elapsed_ms,
        });
    }

    fn check_health_floor(&mut self) {
        if self.stats.health < CRITICAL_HEALTH {
            self.health_bottomed_out = true;
        }
    }

    // ── Care actions ────────────────────────────────────────────────

    pub fn feed(&mut self, food: &FoodItem, wallet: i64) -> Result<CareReceipt, CareError> {
        validate_item_cost(food.cost, wallet)?;

        let hunger_boost = if food.kind == FoodKind::MysterySnack {
            if self.rng.chance_half() {
                MYSTERY_SNACK_ROLLS.0
            } else {
                MYSTERY_SNACK_ROLLS.1
            }
        } else {
            food.hunger_restore
        };

        let mut receipt = CareReceipt::new(ActionKind::Feed, food.name, food.cost);
        receipt.record(Stat::Hunger, self.stats.apply(Stat::Hunger, hunger_boost));
        receipt.record(
            Stat::Happiness,
            self.stats.apply(Stat::Happiness, food.happiness_bonus),
        );
        self.check_health_floor();

        let note = format!("Fed {} a {}.", self.profile.name, food.name);
        self.log(ActionKind::Feed, food.cost, note);
        Ok(receipt)
    }

    pub fn play(&mut self, toy: &ToyItem, wallet: i64) -> Result<CareReceipt, CareError> {
        validate_item_cost(toy.cost, wallet)?;

        let mut receipt = CareReceipt::new(ActionKind::Play, toy.name, toy.cost);
        receipt.record(
            Stat::Happiness,
            self.stats.apply(Stat::Happiness, toy.happiness_restore),
        );
        receipt.record(Stat::Energy, self.stats.apply(Stat::Energy, -toy.energy_cost));
        self.check_health_floor();

        let note = format!("Played with {} using {}.", self.profile.name, toy.name);
        self.log(ActionKind::Play, toy.cost, note);
        Ok(receipt)
    }

    /// Free. Refused when energy is already full.
    pub fn rest(&mut self) -> Result<CareReceipt, CareError> {
        if self.stats.energy >= STAT_MAX {
            return Err(CareError::EnergyMaxed);
        }
        let mut receipt = CareReceipt::new(ActionKind::Rest, "Power nap", 0);
        receipt.record(Stat::Energy, self.stats.apply(Stat::Energy, REST_ENERGY_BOOST));

        let note = format!("{} took a power nap.", self.profile.name);
        self.log(ActionKind::Rest, 0, note);
        Ok(receipt)
    }

    pub fn clean(&mut self, wallet: i64) -> Result<CareReceipt, CareError> {
        validate_item_cost(CLEAN_COST, wallet)?;
        if self.stats.hygiene >= STAT_MAX {
            return Err(CareError::HygieneMaxed);
        }
        let mut receipt = CareReceipt::new(ActionKind::Clean, "Bath time", CLEAN_COST);
        receipt.record(
            Stat::Hygiene,
            self.stats.apply(Stat::Hygiene, CLEAN_HYGIENE_BOOST),
        );

        let note = format!("{} got a fresh clean.", self.profile.name);
        self.log(ActionKind::Clean, CLEAN_COST, note);
        Ok(receipt)
    }

    pub fn health_check(
        &mut self,
        option: &VetOption,
        wallet: i64,
    ) -> Result<CareReceipt, CareError> {
        validate_item_cost(option.cost, wallet)?;
        if self.stats.health >= STAT_MAX {
            return Err(CareError::HealthMaxed);
        }

        let mut receipt = CareReceipt::new(ActionKind::Vet, option.name, option.cost);
        receipt.preventive = option.is_preventive();
        receipt.record(
            Stat::Health,
            self.stats.apply(Stat::Health, option.health_restore),
        );
        if option.kind == VetKind::FullTreatment {
            for stat in ALL_STATS.into_iter().filter(|s| *s != Stat::Health) {
                receipt.record(stat, self.stats.apply(stat, FULL_TREATMENT_BONUS));
            }
        }
        self.check_health_floor();

        let note = format!("{} received {}.", self.profile.name, option.name);
        self.log(ActionKind::Vet, option.cost, note);
        Ok(receipt)
    }

    pub fn learn_trick(&mut self, name: &str, wallet: i64) -> Result<CareReceipt, CareError> {
        validate_item_cost(TRICK_COST, wallet)?;
        let trick = validate_trick_name(name, &self.tricks)?;

        let receipt = CareReceipt::new(ActionKind::Trick, trick.clone(), TRICK_COST);
        let note = format!("{} learned {}.", self.profile.name, trick);
        self.tricks.push(trick);
        self.log(ActionKind::Trick, TRICK_COST, note);
        Ok(receipt)
    }

    pub fn record_minigame(&mut self) {
        self.minigames_played += 1;
    }

    pub fn checkpoint(&self) -> CareCheckpoint {
        CareCheckpoint {
            stats: self.stats,
            tricks: self.tricks.len(),
            log_len: self.action_log.len(),
            health_bottomed_out: self.health_bottomed_out,
        }
    }

    /// Undo every care action applied since `cp` was taken.
    pub fn rollback(&mut self, cp: CareCheckpoint) {
        self.stats = cp.stats;
        self.tricks.truncate(cp.tricks);
        self.action_log.truncate(cp.log_len);
        self.health_bottomed_out = cp.health_bottomed_out;
    }

    /// Back to a newborn with the same profile.
    pub fn reset(&mut self) {
        self.stats = BASE_STATS;
        self.age = 0;
        self.tricks.clear();
        self.minigames_played = 0;
        self.health_bottomed_out = false;
        self.action_log.clear();
        self.decay_timer = Interval::new(self.decay_timer.period_ms());
        self.age_timer = Interval::new(self.age_timer.period_ms());
        self.elapsed_ms = 0;
    }

    // ── Passive change ──────────────────────────────────────────────

    /// One decay step. Health penalties look at hunger and hygiene as they
    /// were before this step.
    pub fn decay(&mut self) {
        let hunger_penalty = if self.stats.hunger < 30 {
            2
        } else if self.stats.hunger < 50 {
            1
        } else {
            0
        };
        let hygiene_penalty = if self.stats.hygiene < 30 { 1 } else { 0 };

        self.stats.apply(Stat::Hunger, -3);
        self.stats.apply(Stat::Happiness, -2);
        self.stats.apply(Stat::Energy, -1);
        self.stats.apply(Stat::Hygiene, -1);
        self.stats.apply(Stat::Health, -(hunger_penalty + hygiene_penalty));
        self.check_health_floor();
    }

    pub fn age_one_step(&mut self) {
        self.age += 1;
    }

    /// Run the decay and aging timers forward by `ms` of virtual time.
    pub fn advance(&mut self, ms: u64) -> PetTimers {
        self.elapsed_ms += ms;
        let decays = self.decay_timer.advance(ms);
        for _ in 0..decays {
            self.decay();
        }
        let birthdays = self.age_timer.advance(ms);
        for _ in 0..birthdays {
            self.age_one_step();
        }
        PetTimers { decays, birthdays }
    }
}

impl StatSource for PetState {
    fn stat_snapshot(&self) -> StatSnapshot {
        self.stats
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::petpal::catalog::{FOODS, TOYS, VET_OPTIONS};
    use proptest::prelude::*;

    fn in_range(s: &StatSnapshot) -> bool {
        s.values().iter().all(|v| (STAT_MIN..=STAT_MAX).contains(v))
    }

    proptest! {
        #[test]
        fn prop_stats_stay_in_range(
            start in 0i32..=100,
            ops in proptest::collection::vec(0u8..9, 0..80),
        ) {
            let mut p = PetState::new(PetProfile::default(), &PetSection::default(), SimRng::new(5));
            p.stats = StatSnapshot::uniform(start);
            for op in ops {
                let _ = match op {
                    0 => p.feed(&FOODS[(start as usize) % 4], 1_000).map(|_| ()),
                    1 => p.play(&TOYS[2], 1_000).map(|_| ()),
                    2 => p.rest().map(|_| ()),
                    3 => p.clean(1_000).map(|_| ()),
                    4 => p.health_check(&VET_OPTIONS[1], 1_000).map(|_| ()),
                    5 => p.health_check(&VET_OPTIONS[0], 1_000).map(|_| ()),
                    6 => { p.decay(); Ok(()) }
                    7 => { p.advance(4_000); Ok(()) }
                    _ => p.play(&TOYS[0], 1_000).map(|_| ()),
                };
                prop_assert!(in_range(&p.stats), "out of range: {:?}", p.stats);
            }
        }

        #[test]
        fn prop_apply_reports_actual_change(start in 0i32..=100, delta in -300i32..300) {
            let mut s = StatSnapshot::uniform(start);
            let applied = s.apply(Stat::Energy, delta);
            prop_assert_eq!(s.energy, clamp_stat(start + delta));
            prop_assert_eq!(start + applied, s.energy);
        }

        #[test]
        fn prop_average_within_bounds(
            a in 0i32..=100, b in 0i32..=100, c in 0i32..=100, d in 0i32..=100, e in 0i32..=100,
        ) {
            let s = StatSnapshot { hunger: a, happiness: b, energy: c, health: d, hygiene: e };
            let avg = s.average();
            prop_assert!((0.0..=100.0).contains(&avg));
        }
    }
}
