//! Finished sessions for this page load, best score first.

use super::catalog::{species_info, Species};
use super::finance::Finance;
use super::pet::PetState;
use super::scoring::{care_grade, final_score};

#[derive(Clone, Debug, PartialEq)]
pub struct LeaderboardEntry {
    pub owner: String,
    pub pet: String,
    pub species: Species,
    pub grade: char,
    pub score: i64,
    pub average: i32,
    pub wallet: i64,
    pub total_spent: i64,
    pub weeks: u32,
    pub stage: &'static str,
}

impl LeaderboardEntry {
    pub fn from_session(pet: &PetState, finance: &Finance, weeks: u32) -> Self {
        Self {
            owner: pet.profile.owner.clone(),
            pet: pet.profile.name.clone(),
            species: pet.profile.species,
            grade: care_grade(&pet.stats),
            score: final_score(&pet.stats, finance.wallet),
            average: pet.stats.rounded_average(),
            wallet: finance.wallet,
            total_spent: finance.total_spent,
            weeks,
            stage: pet.stage().label(),
        }
    }

    pub fn species_name(&self) -> &'static str {
        species_info(self.species).name
    }
}

#[derive(Default)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
    confirm_clear: bool,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    /// Insert keeping score order; ties keep the earlier entry first.
    /// Returns the 1-based rank.
    pub fn add(&mut self, entry: LeaderboardEntry) -> usize {
        let pos = self
            .entries
            .iter()
            .position(|e| e.score < entry.score)
            .unwrap_or(self.entries.len());
        log::info!("leaderboard: {} with {} at rank {}", entry.pet, entry.score, pos + 1);
        self.entries.insert(pos, entry);
        self.confirm_clear = false;
        pos + 1
    }

    pub fn is_confirming_clear(&self) -> bool {
        self.confirm_clear
    }

    /// First press arms, second press wipes. Returns true when cleared.
    pub fn request_clear(&mut self) -> bool {
        if self.entries.is_empty() {
            return false;
        }
        if self.confirm_clear {
            self.entries.clear();
            self.confirm_clear = false;
            true
        } else {
            self.confirm_clear = true;
            false
        }
    }

    pub fn cancel_clear(&mut self) {
        self.confirm_clear = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(pet: &str, score: i64) -> LeaderboardEntry {
        LeaderboardEntry {
            owner: "Sam".into(),
            pet: pet.into(),
            species: Species::Cat,
            grade: 'B',
            score,
            average: 70,
            wallet: 100,
            total_spent: 80,
            weeks: 12,
            stage: "adult",
        }
    }

    #[test]
    fn sorted_by_score_descending() {
        let mut lb = Leaderboard::new();
        assert_eq!(lb.add(entry("a", 200)), 1);
        assert_eq!(lb.add(entry("b", 300)), 1);
        assert_eq!(lb.add(entry("c", 250)), 2);
        assert_eq!(lb.add(entry("d", 200)), 4);
        let pets: Vec<&str> = lb.entries().iter().map(|e| e.pet.as_str()).collect();
        assert_eq!(pets, vec!["b", "c", "a", "d"]);
    }

    #[test]
    fn clear_needs_two_presses() {
        let mut lb = Leaderboard::new();
        lb.add(entry("a", 10));
        assert!(!lb.request_clear());
        assert!(lb.is_confirming_clear());
        assert_eq!(lb.entries().len(), 1);
        assert!(lb.request_clear());
        assert!(lb.entries().is_empty());
        assert!(!lb.is_confirming_clear());
    }

    #[test]
    fn cancel_disarms_clear() {
        let mut lb = Leaderboard::new();
        lb.add(entry("a", 10));
        lb.request_clear();
        lb.cancel_clear();
        assert!(!lb.request_clear());
        assert_eq!(lb.entries().len(), 1);
    }

    #[test]
    fn clearing_empty_board_does_nothing() {
        let mut lb = Leaderboard::new();
        assert!(!lb.request_clear());
        assert!(!lb.is_confirming_clear());
    }

    #[test]
    fn entry_from_session() {
        use crate::config::PetSection;
        use crate::petpal::pet::{PetProfile, StatSnapshot};
        use crate::petpal::rng::SimRng;

        let mut pet = PetState::new(PetProfile::default(), &PetSection::default(), SimRng::new(1));
        pet.stats = StatSnapshot::uniform(80);
        pet.age = 10;
        let mut finance = Finance::new(200);
        finance.charge_bill(50, "Rent");
        let e = LeaderboardEntry::from_session(&pet, &finance, 12);
        assert_eq!(e.score, 150 + 160);
        assert_eq!(e.grade, 'B');
        assert_eq!(e.stage, "adult");
        assert_eq!(e.total_spent, 50);
    }
}
