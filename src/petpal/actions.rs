//! Semantic action IDs for PetPal click targets.

// ── View tabs ──────────────────────────────────────────────────
pub const TAB_CARE: u16 = 1;
pub const TAB_MINIGAMES: u16 = 2;
pub const TAB_REPORT: u16 = 3;
pub const TAB_LEADERBOARD: u16 = 4;

// ── Setup form ─────────────────────────────────────────────────
/// Focus a form field: +index into `SETUP_FIELDS`.
pub const SETUP_FIELD_BASE: u16 = 10;
pub const SETUP_PREV: u16 = 20;
pub const SETUP_NEXT: u16 = 21;
pub const SETUP_START: u16 = 22;

// ── Care menu ──────────────────────────────────────────────────
pub const OPEN_FEED: u16 = 30;
pub const OPEN_PLAY: u16 = 31;
pub const DO_REST: u16 = 32;
pub const DO_CLEAN: u16 = 33;
pub const OPEN_VET: u16 = 34;
pub const OPEN_TRICK: u16 = 35;
pub const OPEN_GOAL: u16 = 36;
pub const TOGGLE_PAUSE: u16 = 37;
pub const OPEN_HELP: u16 = 38;

/// +index into `FOODS`
pub const FOOD_BASE: u16 = 50;
/// +index into `TOYS`
pub const TOY_BASE: u16 = 60;
/// +index into `VET_OPTIONS`
pub const VET_BASE: u16 = 70;
pub const BACK_TO_CARE: u16 = 79;

// ── Overlays ───────────────────────────────────────────────────
pub const CLOSE_OVERLAY: u16 = 100;
pub const PROMPT_SUBMIT: u16 = 101;

// ── Minigames ──────────────────────────────────────────────────
/// +index into `ALL_MINIGAMES`
pub const MINIGAME_BASE: u16 = 110;
pub const MINIGAME_START: u16 = 120;
/// Answer / step / pad / card: +index (0-based)
pub const MINIGAME_PRESS_BASE: u16 = 125;
pub const MINIGAME_PRESS_SLOTS: u16 = 16;
pub const MINIGAME_COLLECT: u16 = 145;
pub const MINIGAME_BACK: u16 = 146;

// ── Report ─────────────────────────────────────────────────────
pub const SAVE_SCORE: u16 = 150;
pub const PLAY_AGAIN: u16 = 151;
pub const REPLAY_SAME_PET: u16 = 152;
pub const REPORT_BACK: u16 = 153;

// ── Leaderboard ────────────────────────────────────────────────
pub const CLEAR_BOARD: u16 = 160;
pub const LEADERBOARD_BACK: u16 = 161;
