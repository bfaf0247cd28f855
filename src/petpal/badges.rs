//! Achievement badges. Each unlocks at most once per session.

use super::finance::Finance;
use super::pet::{ActionKind, PetState, Stage};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BadgeId {
    FirstMeal,
    DoctorsOrders,
    JoyMaximizer,
    GlowUp,
    FullGrown,
    PennyPincher,
    MinigameMaster,
    PeakPerformance,
    TrickMaster,
    ResponsibleOwner,
}

pub struct Badge {
    pub id: BadgeId,
    pub name: &'static str,
    pub emoji: &'static str,
    pub description: &'static str,
    pub condition: fn(&PetState, &Finance) -> bool,
}

pub const BADGES: [Badge; 10] = [
    Badge {
        id: BadgeId::FirstMeal,
        name: "First Meal",
        emoji: "🍽️",
        description: "Fed your pet for the first time.",
        condition: |pet, _| pet.has_done(ActionKind::Feed),
    },
    Badge {
        id: BadgeId::DoctorsOrders,
        name: "Doctor's Orders",
        emoji: "🩺",
        description: "Booked the first vet visit.",
        condition: |pet, _| pet.has_done(ActionKind::Vet),
    },
    Badge {
        id: BadgeId::JoyMaximizer,
        name: "Joy Maximizer",
        emoji: "🎉",
        description: "Reached maximum happiness.",
        condition: |pet, _| pet.stats.happiness >= 100,
    },
    Badge {
        id: BadgeId::GlowUp,
        name: "Glow Up",
        emoji: "✨",
        description: "Grew out of the baby stage.",
        condition: |pet, _| pet.stage() != Stage::Baby,
    },
    Badge {
        id: BadgeId::FullGrown,
        name: "Full Grown",
        emoji: "🏆",
        description: "Reached adulthood.",
        condition: |pet, _| pet.stage() == Stage::Adult,
    },
    Badge {
        id: BadgeId::PennyPincher,
        name: "Penny Pincher",
        emoji: "💰",
        description: "Saved at least $50 beyond spending.",
        condition: |_, finance| finance.wallet - finance.total_spent >= 50,
    },
    Badge {
        id: BadgeId::MinigameMaster,
        name: "Minigame Master",
        emoji: "🎮",
        description: "Played minigames five times.",
        condition: |pet, _| pet.minigames_played >= 5,
    },
    Badge {
        id: BadgeId::PeakPerformance,
        name: "Peak Performance",
        emoji: "🚀",
        description: "All stats above 80 at once.",
        condition: |pet, _| pet.stats.values().iter().all(|v| *v > 80),
    },
    Badge {
        id: BadgeId::TrickMaster,
        name: "Trick Master",
        emoji: "🎯",
        description: "Learned three tricks.",
        condition: |pet, _| pet.tricks.len() >= 3,
    },
    Badge {
        id: BadgeId::ResponsibleOwner,
        name: "Responsible Owner",
        emoji: "🫶",
        description: "Raised an adult without health ever hitting bottom.",
        condition: |pet, _| !pet.health_bottomed_out && pet.stage() == Stage::Adult,
    },
];

pub fn badge(id: BadgeId) -> Option<&'static Badge> {
    BADGES.iter().find(|b| b.id == id)
}

pub fn unlock_message(b: &Badge) -> String {
    format!("Badge unlocked: {} {}", b.name, b.emoji)
}

/// Remembers which badges have fired so each toast is raised once.
#[derive(Default)]
pub struct BadgeTracker {
    pub earned: Vec<BadgeId>,
}

impl BadgeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_earned(&self, id: BadgeId) -> bool {
        self.earned.contains(&id)
    }

    /// Check every badge; returns the ones unlocked by this call.
    pub fn evaluate(&mut self, pet: &PetState, finance: &Finance) -> Vec<&'static Badge> {
        let mut fresh = Vec::new();
        for b in BADGES.iter() {
            if !self.is_earned(b.id) && (b.condition)(pet, finance) {
                self.earned.push(b.id);
                fresh.push(b);
            }
        }
        fresh
    }

    pub fn reset(&mut self) {
        self.earned.clear();
    }
}
