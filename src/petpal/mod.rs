//! PetPal Weeks: raise a virtual pet on a weekly budget.

pub mod actions;
pub mod badges;
pub mod catalog;
pub mod finance;
pub mod leaderboard;
pub mod minigame;
pub mod pet;
pub mod render;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod toast;
pub mod validate;
pub mod weekly;

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::config::SimConfig;
use crate::input::{ClickState, InputEvent};

use actions::*;
use catalog::{species_info, ACCESSORIES, ALL_SPECIES, ANIMAL_COLORS, FOODS, TOYS, VET_OPTIONS};
use leaderboard::{Leaderboard, LeaderboardEntry};
use minigame::{ActiveGame, ALL_MINIGAMES};
use pet::PetProfile;
use rng::SimRng;
use session::Session;
use toast::ToastTone;
use validate::{parse_budget, validate_owner_name, validate_pet_name, BUDGET_MAX, BUDGET_MIN, BUDGET_STEP};
use weekly::WeekSummary;

/// Longest text accepted in a prompt or form field. Validation enforces
/// the real limits; this only stops runaway typing.
const TEXT_INPUT_CAP: usize = 32;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    Setup,
    Game,
    Minigame,
    Report,
    Leaderboard,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CareMenu {
    Main,
    Food,
    Toys,
    Vet,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PromptKind {
    Trick,
    SavingsGoal,
}

impl PromptKind {
    pub fn title(self) -> &'static str {
        match self {
            PromptKind::Trick => "Teach a trick ($10)",
            PromptKind::SavingsGoal => "Set a savings goal",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Overlay {
    Help,
    Weekly(WeekSummary),
    Prompt { kind: PromptKind, text: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SetupField {
    Owner,
    PetName,
    Species,
    Color,
    Accessory,
    Budget,
}

pub const SETUP_FIELDS: [SetupField; 6] = [
    SetupField::Owner,
    SetupField::PetName,
    SetupField::Species,
    SetupField::Color,
    SetupField::Accessory,
    SetupField::Budget,
];

impl SetupField {
    pub fn label(self) -> &'static str {
        match self {
            SetupField::Owner => "Owner",
            SetupField::PetName => "Pet name",
            SetupField::Species => "Species",
            SetupField::Color => "Color",
            SetupField::Accessory => "Accessory",
            SetupField::Budget => "Budget",
        }
    }

    pub fn is_text(self) -> bool {
        matches!(self, SetupField::Owner | SetupField::PetName | SetupField::Budget)
    }
}

pub struct SetupForm {
    pub owner: String,
    pub pet_name: String,
    pub species: usize,
    pub color: usize,
    /// 0 = none, otherwise `ACCESSORIES[accessory - 1]`
    pub accessory: usize,
    pub budget: String,
    pub focus: SetupField,
    pub error: Option<String>,
}

impl SetupForm {
    pub fn new(starting_budget: i64) -> Self {
        Self {
            owner: String::new(),
            pet_name: String::new(),
            species: 0,
            color: 0,
            accessory: 0,
            budget: starting_budget.to_string(),
            focus: SetupField::Owner,
            error: None,
        }
    }

    fn focus_index(&self) -> usize {
        SETUP_FIELDS
            .iter()
            .position(|f| *f == self.focus)
            .unwrap_or(0)
    }

    fn next_field(&mut self) {
        self.focus = SETUP_FIELDS[(self.focus_index() + 1) % SETUP_FIELDS.len()];
    }

    fn text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            SetupField::Owner => Some(&mut self.owner),
            SetupField::PetName => Some(&mut self.pet_name),
            SetupField::Budget => Some(&mut self.budget),
            _ => None,
        }
    }

    fn type_char(&mut self, c: char) {
        let budget = self.focus == SetupField::Budget;
        if let Some(text) = self.text_mut() {
            if budget && !c.is_ascii_digit() {
                return;
            }
            if text.chars().count() < TEXT_INPUT_CAP {
                text.push(c);
            }
        }
    }

    fn erase(&mut self) {
        if let Some(text) = self.text_mut() {
            text.pop();
        }
    }

    /// Step the focused choice field (or the budget) by `dir` (±1).
    fn cycle(&mut self, dir: i64) {
        fn wrap(i: usize, len: usize, dir: i64) -> usize {
            (i as i64 + dir).rem_euclid(len as i64) as usize
        }
        match self.focus {
            SetupField::Species => self.species = wrap(self.species, ALL_SPECIES.len(), dir),
            SetupField::Color => self.color = wrap(self.color, ANIMAL_COLORS.len(), dir),
            SetupField::Accessory => {
                self.accessory = wrap(self.accessory, ACCESSORIES.len() + 1, dir)
            }
            SetupField::Budget => {
                let current: i64 = self.budget.parse().unwrap_or(BUDGET_MIN);
                let snapped = current - current.rem_euclid(BUDGET_STEP);
                let next = (snapped + dir * BUDGET_STEP).clamp(BUDGET_MIN, BUDGET_MAX);
                self.budget = next.to_string();
            }
            SetupField::Owner | SetupField::PetName => {}
        }
    }

    /// Validate everything; the first failure is reported.
    pub fn submit(&self) -> Result<(PetProfile, i64), validate::ValidationError> {
        let owner = validate_owner_name(&self.owner)?;
        let name = validate_pet_name(&self.pet_name)?;
        let budget = parse_budget(&self.budget)?;
        let profile = PetProfile {
            name,
            owner,
            species: ALL_SPECIES[self.species],
            color: self.color,
            accessory: self.accessory.checked_sub(1),
        };
        Ok((profile, budget))
    }
}

pub struct PetPalGame {
    pub config: SimConfig,
    pub view: View,
    pub overlay: Option<Overlay>,
    pub form: SetupForm,
    pub session: Option<Session>,
    pub care_menu: CareMenu,
    pub minigame: Option<ActiveGame>,
    pub leaderboard: Leaderboard,
    /// Whether the current session's result is already on the board.
    pub saved: bool,
    leaderboard_return: View,
    rng: SimRng,
}

impl PetPalGame {
    pub fn new(config: SimConfig, rng: SimRng) -> Self {
        let form = SetupForm::new(config.session.starting_budget);
        Self {
            config,
            view: View::Setup,
            overlay: None,
            form,
            session: None,
            care_menu: CareMenu::Main,
            minigame: None,
            leaderboard: Leaderboard::new(),
            saved: false,
            leaderboard_return: View::Game,
            rng,
        }
    }

    fn is_finished(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.finished)
    }

    /// Switch views. The weekly timer only runs while the game view shows.
    fn set_view(&mut self, view: View) {
        if view == View::Leaderboard && self.view != View::Leaderboard {
            self.leaderboard_return = self.view;
        }
        self.view = view;
        self.care_menu = CareMenu::Main;
        if let Some(session) = self.session.as_mut() {
            if view == View::Game {
                session.resume();
            } else {
                session.suspend();
            }
        }
    }

    fn start_session(&mut self) -> bool {
        match self.form.submit() {
            Ok((profile, budget)) => {
                log::info!(
                    "session start: {} the {} (owner {}), budget ${}",
                    profile.name,
                    species_info(profile.species).name,
                    profile.owner,
                    budget
                );
                let rng = SimRng::new(self.rng.next_u64());
                self.session = Some(Session::new(&self.config, profile, budget, rng));
                self.form.error = None;
                self.saved = false;
                self.overlay = None;
                self.minigame = None;
                self.set_view(View::Game);
            }
            Err(e) => self.form.error = Some(e.to_string()),
        }
        true
    }

    fn save_score(&mut self) -> bool {
        if self.saved {
            return false;
        }
        let Some(session) = self.session.as_ref() else {
            return false;
        };
        let entry = LeaderboardEntry::from_session(
            &session.pet.borrow(),
            &session.finance.borrow(),
            session.weeks_played(),
        );
        let rank = self.leaderboard.add(entry);
        session.toast(format!("Saved to the leaderboard at #{rank}!"), ToastTone::Success);
        self.saved = true;
        true
    }

    fn play_again(&mut self) -> bool {
        self.session = None;
        self.minigame = None;
        self.overlay = None;
        self.saved = false;
        self.form.error = None;
        self.set_view(View::Setup);
        true
    }

    fn replay_same_pet(&mut self) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        let budget = session.finance.borrow().budget;
        if let Err(e) = session.restart(budget) {
            session.toast(e.to_string(), ToastTone::Error);
            return true;
        }
        self.saved = false;
        self.overlay = None;
        self.set_view(View::Game);
        true
    }

    // ── Overlays ───────────────────────────────────────────────────

    fn open_prompt(&mut self, kind: PromptKind) -> bool {
        if self.is_finished() {
            return false;
        }
        self.overlay = Some(Overlay::Prompt {
            kind,
            text: String::new(),
        });
        true
    }

    fn close_overlay(&mut self) -> bool {
        let was_final = matches!(&self.overlay, Some(Overlay::Weekly(s)) if s.is_final);
        self.overlay = None;
        if was_final {
            self.set_view(View::Report);
        }
        true
    }

    fn submit_prompt(&mut self) -> bool {
        let Some(Overlay::Prompt { kind, text }) = self.overlay.clone() else {
            return false;
        };
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        let accepted = match kind {
            PromptKind::Trick => session.learn_trick(&text).is_ok(),
            PromptKind::SavingsGoal => session.set_savings_goal(&text),
        };
        if accepted {
            self.overlay = None;
        }
        true
    }

    fn handle_overlay(&mut self, event: &InputEvent) -> bool {
        match self.overlay.as_mut() {
            Some(Overlay::Prompt { text, .. }) => match event {
                InputEvent::Key(c) => {
                    if text.chars().count() < TEXT_INPUT_CAP {
                        text.push(*c);
                    }
                    true
                }
                InputEvent::Erase => {
                    text.pop();
                    true
                }
                InputEvent::Submit | InputEvent::Click(PROMPT_SUBMIT) => self.submit_prompt(),
                InputEvent::Back | InputEvent::Click(CLOSE_OVERLAY) => self.close_overlay(),
                _ => true,
            },
            Some(Overlay::Help) | Some(Overlay::Weekly(_)) => match event {
                InputEvent::Key(_)
                | InputEvent::Submit
                | InputEvent::Back
                | InputEvent::Click(CLOSE_OVERLAY) => self.close_overlay(),
                _ => true,
            },
            None => false,
        }
    }

    // ── Per-view input ─────────────────────────────────────────────

    fn handle_setup(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::Key(c) => {
                if self.form.focus.is_text() {
                    self.form.type_char(*c);
                    true
                } else {
                    false
                }
            }
            InputEvent::Erase => {
                self.form.erase();
                true
            }
            InputEvent::NextField => {
                self.form.next_field();
                true
            }
            InputEvent::Left | InputEvent::Click(SETUP_PREV) => {
                self.form.cycle(-1);
                true
            }
            InputEvent::Right | InputEvent::Click(SETUP_NEXT) => {
                self.form.cycle(1);
                true
            }
            InputEvent::Submit | InputEvent::Click(SETUP_START) => self.start_session(),
            InputEvent::Click(TAB_LEADERBOARD) => {
                self.set_view(View::Leaderboard);
                true
            }
            InputEvent::Click(id)
                if (SETUP_FIELD_BASE..SETUP_FIELD_BASE + SETUP_FIELDS.len() as u16)
                    .contains(id) =>
            {
                self.form.focus = SETUP_FIELDS[(id - SETUP_FIELD_BASE) as usize];
                true
            }
            _ => false,
        }
    }

    fn handle_tab(&mut self, id: u16) -> bool {
        let view = match id {
            TAB_CARE => View::Game,
            TAB_MINIGAMES => View::Minigame,
            TAB_REPORT => View::Report,
            TAB_LEADERBOARD => View::Leaderboard,
            _ => return false,
        };
        if self.session.is_none() || (view == View::Minigame && self.is_finished()) {
            return false;
        }
        if self.view == View::Minigame {
            self.minigame = None;
        }
        self.set_view(view);
        true
    }

    fn care_action(&mut self, id: u16) -> bool {
        let finished = self.is_finished();
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        match id {
            OPEN_FEED if !finished => self.care_menu = CareMenu::Food,
            OPEN_PLAY if !finished => self.care_menu = CareMenu::Toys,
            OPEN_VET if !finished => self.care_menu = CareMenu::Vet,
            BACK_TO_CARE => self.care_menu = CareMenu::Main,
            DO_REST if !finished => {
                let _ = session.rest();
            }
            DO_CLEAN if !finished => {
                let _ = session.clean();
            }
            id if (FOOD_BASE..FOOD_BASE + FOODS.len() as u16).contains(&id) && !finished => {
                let _ = session.feed(&FOODS[(id - FOOD_BASE) as usize]);
                self.care_menu = CareMenu::Main;
            }
            id if (TOY_BASE..TOY_BASE + TOYS.len() as u16).contains(&id) && !finished => {
                let _ = session.play(&TOYS[(id - TOY_BASE) as usize]);
                self.care_menu = CareMenu::Main;
            }
            id if (VET_BASE..VET_BASE + VET_OPTIONS.len() as u16).contains(&id) && !finished => {
                let _ = session.health_check(&VET_OPTIONS[(id - VET_BASE) as usize]);
                self.care_menu = CareMenu::Main;
            }
            TOGGLE_PAUSE if !finished => {
                let paused = session.toggle_pause();
                let msg = if paused { "Paused" } else { "Resumed" };
                session.toast(msg, ToastTone::Info);
            }
            OPEN_TRICK => return self.open_prompt(PromptKind::Trick),
            OPEN_GOAL => return self.open_prompt(PromptKind::SavingsGoal),
            OPEN_HELP => self.overlay = Some(Overlay::Help),
            _ => return false,
        }
        true
    }

    fn handle_game_key(&mut self, c: char) -> bool {
        let c = c.to_ascii_lowercase();
        let id = match (self.care_menu, c) {
            (_, 'm') => return self.handle_tab(TAB_MINIGAMES),
            (_, 'r') => return self.handle_tab(TAB_REPORT),
            (_, 'l') => return self.handle_tab(TAB_LEADERBOARD),
            (_, 'p') => TOGGLE_PAUSE,
            (_, 'h') | (_, '?') => OPEN_HELP,
            (CareMenu::Main, '1') => OPEN_FEED,
            (CareMenu::Main, '2') => OPEN_PLAY,
            (CareMenu::Main, '3') => DO_REST,
            (CareMenu::Main, '4') => DO_CLEAN,
            (CareMenu::Main, '5') => OPEN_VET,
            (CareMenu::Main, '6') => OPEN_TRICK,
            (CareMenu::Main, '7') => OPEN_GOAL,
            (_, '-') => BACK_TO_CARE,
            (menu, d) if d.is_ascii_digit() && d != '0' => {
                let base = match menu {
                    CareMenu::Food => FOOD_BASE,
                    CareMenu::Toys => TOY_BASE,
                    CareMenu::Vet => VET_BASE,
                    CareMenu::Main => return false,
                };
                base + (d as u16 - '1' as u16)
            }
            _ => return false,
        };
        self.care_action(id)
    }

    fn handle_game(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::Key(c) => self.handle_game_key(*c),
            InputEvent::Back => self.care_action(BACK_TO_CARE),
            InputEvent::Click(id) => self.care_action(*id),
            _ => false,
        }
    }

    fn handle_minigame(&mut self, event: &InputEvent) -> bool {
        let action = match event {
            InputEvent::Click(id) => *id,
            InputEvent::Back => MINIGAME_BACK,
            InputEvent::Submit => {
                if self.minigame.as_ref().is_some_and(|g| g.is_done()) {
                    MINIGAME_COLLECT
                } else {
                    MINIGAME_START
                }
            }
            InputEvent::Key(c) => match c.to_ascii_lowercase() {
                '-' => MINIGAME_BACK,
                's' => MINIGAME_START,
                'c' => MINIGAME_COLLECT,
                d @ '1'..='9' => {
                    let n = d as u16 - '1' as u16;
                    if self.minigame.is_some() {
                        MINIGAME_PRESS_BASE + n
                    } else {
                        MINIGAME_BASE + n
                    }
                }
                _ => return false,
            },
            _ => return false,
        };

        match action {
            id if (MINIGAME_BASE..MINIGAME_BASE + ALL_MINIGAMES.len() as u16).contains(&id) => {
                if self.minigame.is_some() {
                    return false;
                }
                let Some(session) = self.session.as_mut() else {
                    return false;
                };
                let kind = ALL_MINIGAMES[(id - MINIGAME_BASE) as usize];
                self.minigame = Some(ActiveGame::new(kind, session.minigame_rng()));
                true
            }
            MINIGAME_START => match self.minigame.as_mut() {
                Some(game) => {
                    game.start();
                    true
                }
                None => false,
            },
            id if (MINIGAME_PRESS_BASE..MINIGAME_PRESS_BASE + MINIGAME_PRESS_SLOTS)
                .contains(&id) =>
            {
                match self.minigame.as_mut() {
                    Some(game) => {
                        game.press((id - MINIGAME_PRESS_BASE) as usize);
                        true
                    }
                    None => false,
                }
            }
            MINIGAME_COLLECT => {
                let Some(result) = self.minigame.as_ref().and_then(|g| g.collect()) else {
                    return false;
                };
                if let Some(session) = self.session.as_mut() {
                    session.finish_minigame(&result);
                }
                self.minigame = None;
                true
            }
            MINIGAME_BACK => {
                if self.minigame.take().is_none() {
                    self.set_view(View::Game);
                }
                true
            }
            id => self.handle_tab(id),
        }
    }

    fn handle_report(&mut self, event: &InputEvent) -> bool {
        let action = match event {
            InputEvent::Click(id) => *id,
            InputEvent::Back => REPORT_BACK,
            InputEvent::Key(c) => match c.to_ascii_lowercase() {
                's' => SAVE_SCORE,
                'n' => PLAY_AGAIN,
                'a' => REPLAY_SAME_PET,
                'l' => TAB_LEADERBOARD,
                '-' => REPORT_BACK,
                _ => return false,
            },
            _ => return false,
        };
        let finished = self.is_finished();
        match action {
            SAVE_SCORE if finished => self.save_score(),
            PLAY_AGAIN => self.play_again(),
            REPLAY_SAME_PET => self.replay_same_pet(),
            REPORT_BACK if !finished => {
                self.set_view(View::Game);
                true
            }
            id => self.handle_tab(id),
        }
    }

    fn handle_leaderboard(&mut self, event: &InputEvent) -> bool {
        let action = match event {
            InputEvent::Click(id) => *id,
            InputEvent::Back => LEADERBOARD_BACK,
            InputEvent::Key(c) => match c.to_ascii_lowercase() {
                'c' => CLEAR_BOARD,
                '-' => LEADERBOARD_BACK,
                _ => return false,
            },
            _ => return false,
        };
        match action {
            CLEAR_BOARD => {
                if self.leaderboard.request_clear() {
                    log::info!("leaderboard cleared");
                }
                true
            }
            LEADERBOARD_BACK => {
                self.leaderboard.cancel_clear();
                let back = match (self.session.is_some(), self.leaderboard_return) {
                    (false, _) => View::Setup,
                    (true, View::Leaderboard) => View::Game,
                    (true, v) => v,
                };
                self.set_view(back);
                true
            }
            id => {
                self.leaderboard.cancel_clear();
                self.handle_tab(id)
            }
        }
    }

    // ── Frame entry points ─────────────────────────────────────────

    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        if self.overlay.is_some() {
            return self.handle_overlay(event);
        }
        if let InputEvent::Click(id) = event {
            if (TAB_CARE..=TAB_LEADERBOARD).contains(id) && self.session.is_some() {
                return self.handle_tab(*id);
            }
        }
        match self.view {
            View::Setup => self.handle_setup(event),
            View::Game => self.handle_game(event),
            View::Minigame => self.handle_minigame(event),
            View::Report => self.handle_report(event),
            View::Leaderboard => self.handle_leaderboard(event),
        }
    }

    /// Advance virtual time by `ms`.
    pub fn tick(&mut self, ms: u64) {
        if self.view == View::Minigame {
            if let Some(game) = self.minigame.as_mut() {
                game.advance(ms);
            }
        }
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let summaries = session.tick(ms);
        if let Some(last) = summaries.into_iter().last() {
            // a payday replaces help, but never eats a half-typed prompt
            if !matches!(self.overlay, Some(Overlay::Prompt { .. })) || last.is_final {
                self.overlay = Some(Overlay::Weekly(last));
            }
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        render::render(self, f, area, click_state);
    }
}
