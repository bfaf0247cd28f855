//! Simulation tuning: session length, timer intervals, bills, and salary tiers.
//!
//! Values come from `config/petpal.toml`, which is compiled into the binary.
//! Missing keys fall back to the defaults below; an unparsable or
//! inconsistent file is rejected as a whole and the defaults are used.

use serde::Deserialize;
use thiserror::Error;

const EMBEDDED_CONFIG: &str = include_str!("../config/petpal.toml");

/// Label used for the implicit bottom salary band.
pub const CRITICAL_LABEL: &str = "critical";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("week interval must be positive")]
    ZeroInterval,
    #[error("pet decay interval must be positive")]
    ZeroDecayInterval,
    #[error("pet age interval must be positive")]
    ZeroAgeInterval,
    #[error("toast lifetime must be positive")]
    ZeroToastTtl,
    #[error("session must last at least one week")]
    ZeroWeeks,
    #[error("salary tiers must be listed from highest to lowest threshold")]
    UnsortedTiers,
    #[error("bill `{0}` has a non-positive amount")]
    BadBill(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SessionSection {
    pub total_weeks: u32,
    pub week_interval_ms: u64,
    pub starting_budget: i64,
}

impl Default for SessionSection {
    fn default() -> Self {
        Self {
            total_weeks: 12,
            week_interval_ms: 20_000,
            starting_budget: 200,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PetSection {
    pub decay_interval_ms: u64,
    pub age_interval_ms: u64,
}

impl Default for PetSection {
    fn default() -> Self {
        Self {
            decay_interval_ms: 4_000,
            age_interval_ms: 60_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ToastSection {
    pub ttl_ms: u64,
}

impl Default for ToastSection {
    fn default() -> Self {
        Self { ttl_ms: 3_000 }
    }
}

/// One fixed recurring charge applied every week.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BillSpec {
    pub label: String,
    pub amount: i64,
}

/// A salary band: averages at or above `min_average` earn `salary`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SalaryTierSpec {
    pub min_average: f64,
    pub salary: i64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub session: SessionSection,
    pub pet: PetSection,
    pub toast: ToastSection,
    pub bills: Vec<BillSpec>,
    pub salary_tiers: Vec<SalaryTierSpec>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            session: SessionSection::default(),
            pet: PetSection::default(),
            toast: ToastSection::default(),
            bills: vec![
                BillSpec { label: "Rent".into(), amount: 15 },
                BillSpec { label: "Utilities".into(), amount: 5 },
            ],
            salary_tiers: vec![
                SalaryTierSpec { min_average: 75.0, salary: 25, label: "thriving".into() },
                SalaryTierSpec { min_average: 50.0, salary: 15, label: "doing OK".into() },
                SalaryTierSpec { min_average: 25.0, salary: 5, label: "struggling".into() },
            ],
        }
    }
}

impl SimConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the embedded configuration, falling back to defaults on error.
    pub fn load() -> Self {
        match Self::from_toml(EMBEDDED_CONFIG) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("embedded config rejected ({e}); using defaults");
                Self::default()
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.session.week_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        if self.session.total_weeks == 0 {
            return Err(ConfigError::ZeroWeeks);
        }
        if self.pet.decay_interval_ms == 0 {
            return Err(ConfigError::ZeroDecayInterval);
        }
        if self.pet.age_interval_ms == 0 {
            return Err(ConfigError::ZeroAgeInterval);
        }
        if self.toast.ttl_ms == 0 {
            return Err(ConfigError::ZeroToastTtl);
        }
        if self
            .salary_tiers
            .windows(2)
            .any(|w| w[0].min_average <= w[1].min_average)
        {
            return Err(ConfigError::UnsortedTiers);
        }
        if let Some(bill) = self.bills.iter().find(|b| b.amount <= 0) {
            return Err(ConfigError::BadBill(bill.label.clone()));
        }
        Ok(())
    }
}
