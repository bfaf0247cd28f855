//! Static game data: species, shop items, vet options, and cosmetics.

/// Pet species offered on the setup screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Species {
    Dog,
    Cat,
    Rabbit,
    Hamster,
    Dragon,
    Axolotl,
}

pub const ALL_SPECIES: [Species; 6] = [
    Species::Dog,
    Species::Cat,
    Species::Rabbit,
    Species::Hamster,
    Species::Dragon,
    Species::Axolotl,
];

pub struct SpeciesInfo {
    pub name: &'static str,
    pub emoji_baby: &'static str,
    pub emoji_teen: &'static str,
    pub emoji_adult: &'static str,
    pub description: &'static str,
}

pub fn species_info(species: Species) -> SpeciesInfo {
    match species {
        Species::Dog => SpeciesInfo {
            name: "Dog",
            emoji_baby: "🐶",
            emoji_teen: "🐕",
            emoji_adult: "🦮",
            description: "Loyal and eager to learn, always ready for a new trick.",
        },
        Species::Cat => SpeciesInfo {
            name: "Cat",
            emoji_baby: "🐱",
            emoji_teen: "🐈",
            emoji_adult: "🐈",
            description: "Independent and clever, a master of relaxed confidence.",
        },
        Species::Rabbit => SpeciesInfo {
            name: "Rabbit",
            emoji_baby: "🐰",
            emoji_teen: "🐇",
            emoji_adult: "🐇",
            description: "Quick, curious, and surprisingly bold for a small friend.",
        },
        Species::Hamster => SpeciesInfo {
            name: "Hamster",
            emoji_baby: "🐹",
            emoji_teen: "🐹",
            emoji_adult: "🐿",
            description: "Tiny entrepreneur with big energy and endless hustle.",
        },
        Species::Dragon => SpeciesInfo {
            name: "Dragon",
            emoji_baby: "🐣",
            emoji_teen: "🐲",
            emoji_adult: "🐉",
            description: "A legendary companion that rewards smart long-term planning.",
        },
        Species::Axolotl => SpeciesInfo {
            name: "Axolotl",
            emoji_baby: "🫧",
            emoji_teen: "🦎",
            emoji_adult: "🐊",
            description: "Chill, resilient, and a reminder to pace yourself.",
        },
    }
}

// ── Shop ─────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FoodKind {
    BasicKibble,
    PremiumMeal,
    GourmetFeast,
    MysterySnack,
}

pub struct FoodItem {
    pub kind: FoodKind,
    pub name: &'static str,
    pub cost: i64,
    pub hunger_restore: i32,
    pub happiness_bonus: i32,
}

pub const FOODS: [FoodItem; 4] = [
    FoodItem {
        kind: FoodKind::BasicKibble,
        name: "Basic Kibble",
        cost: 2,
        hunger_restore: 15,
        happiness_bonus: 0,
    },
    FoodItem {
        kind: FoodKind::PremiumMeal,
        name: "Premium Meal",
        cost: 6,
        hunger_restore: 30,
        happiness_bonus: 5,
    },
    FoodItem {
        kind: FoodKind::GourmetFeast,
        name: "Gourmet Feast",
        cost: 12,
        hunger_restore: 50,
        happiness_bonus: 15,
    },
    FoodItem {
        kind: FoodKind::MysterySnack,
        name: "Mystery Snack",
        cost: 1,
        hunger_restore: 5,
        happiness_bonus: 0,
    },
];

/// Mystery Snack rolls one of these hunger values at 50/50.
pub const MYSTERY_SNACK_ROLLS: (i32, i32) = (5, 25);

pub struct ToyItem {
    pub name: &'static str,
    pub cost: i64,
    pub happiness_restore: i32,
    pub energy_cost: i32,
}

pub const TOYS: [ToyItem; 3] = [
    ToyItem {
        name: "Yarn Ball",
        cost: 3,
        happiness_restore: 20,
        energy_cost: 10,
    },
    ToyItem {
        name: "Puzzle Toy",
        cost: 8,
        happiness_restore: 35,
        energy_cost: 15,
    },
    ToyItem {
        name: "Luxury Playset",
        cost: 15,
        happiness_restore: 50,
        energy_cost: 20,
    },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VetKind {
    Checkup,
    FullTreatment,
}

pub struct VetOption {
    pub kind: VetKind,
    pub name: &'static str,
    pub cost: i64,
    pub health_restore: i32,
}

pub const VET_OPTIONS: [VetOption; 2] = [
    VetOption {
        kind: VetKind::Checkup,
        name: "Checkup",
        cost: 10,
        health_restore: 20,
    },
    VetOption {
        kind: VetKind::FullTreatment,
        name: "Full Treatment",
        cost: 25,
        health_restore: 50,
    },
];

impl VetOption {
    /// Full treatment is reactive care; everything else counts as preventive.
    pub fn is_preventive(&self) -> bool {
        self.kind != VetKind::FullTreatment
    }
}

// ── Care constants ───────────────────────────────────────────────────

pub const REST_ENERGY_BOOST: i32 = 20;
pub const CLEAN_COST: i64 = 2;
pub const CLEAN_HYGIENE_BOOST: i32 = 30;
pub const TRICK_COST: i64 = 10;
pub const FULL_TREATMENT_BONUS: i32 = 10;

// ── Cosmetics ────────────────────────────────────────────────────────

pub struct ColorOption {
    pub label: &'static str,
    pub hex: &'static str,
}

pub const ANIMAL_COLORS: [ColorOption; 6] = [
    ColorOption { label: "Golden", hex: "#f5a623" },
    ColorOption { label: "Snow", hex: "#e8eaf6" },
    ColorOption { label: "Midnight", hex: "#3a3adb" },
    ColorOption { label: "Crimson", hex: "#e03131" },
    ColorOption { label: "Jade", hex: "#2f9e44" },
    ColorOption { label: "Violet", hex: "#9c36b5" },
];

pub struct AccessoryOption {
    pub label: &'static str,
    pub emoji: &'static str,
}

pub const ACCESSORIES: [AccessoryOption; 4] = [
    AccessoryOption { label: "Bandana", emoji: "🧣" },
    AccessoryOption { label: "Bow", emoji: "🎀" },
    AccessoryOption { label: "Glasses", emoji: "🕶️" },
    AccessoryOption { label: "Crown", emoji: "👑" },
];

/// Parse a `#rrggbb` hex string into RGB components.
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
    let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
    let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
    Some((r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_shop_item_costs_something() {
        assert!(FOODS.iter().all(|f| f.cost > 0));
        assert!(TOYS.iter().all(|t| t.cost > 0));
        assert!(VET_OPTIONS.iter().all(|v| v.cost > 0));
    }

    #[test]
    fn only_full_treatment_is_reactive() {
        assert!(VET_OPTIONS[0].is_preventive());
        assert!(!VET_OPTIONS[1].is_preventive());
    }

    #[test]
    fn color_hex_parses() {
        assert_eq!(hex_to_rgb("#f5a623"), Some((0xf5, 0xa6, 0x23)));
        assert!(ANIMAL_COLORS.iter().all(|c| hex_to_rgb(c.hex).is_some()));
        assert_eq!(hex_to_rgb("f5a623"), None);
        assert_eq!(hex_to_rgb("#zzzzzz"), None);
    }

    #[test]
    fn species_names_are_distinct() {
        let mut names: Vec<&str> = ALL_SPECIES.iter().map(|s| species_info(*s).name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), ALL_SPECIES.len());
    }
}
