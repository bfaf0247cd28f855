//! PetPal rendering (read-only from state).
//!
//! Layout: tab strip (once a session exists) + the active view.
//! Overlays (help, weekly update, text prompts) are full-screen replacements.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::input::{is_narrow_layout, ClickState};
use crate::widgets::{stat_gauge, ClickableList, TabBar};

use super::actions::*;
use super::badges::BADGES;
use super::catalog::{
    hex_to_rgb, species_info, ACCESSORIES, ALL_SPECIES, ANIMAL_COLORS, CLEAN_COST, FOODS,
    REST_ENERGY_BOOST, TOYS, TRICK_COST, VET_OPTIONS,
};
use super::finance::{format_money, format_signed_money, Category};
use super::leaderboard::LeaderboardEntry;
use super::minigame::blitz::{BlitzPhase, BudgetBlitz, TOTAL_QUESTIONS};
use super::minigame::memory::{MemoryMatch, MemoryPhase, CARDS, GRID_COLS, PAIRS};
use super::minigame::reflex::{Feedback, ReflexPhase, ReflexTap, PADS};
use super::minigame::sequence::{CareSequence, SequencePhase, CARE_STEPS};
use super::minigame::{self, minigame_info, ActiveGame, ALL_MINIGAMES};
use super::pet::{PetState, Stage, ALL_STATS};
use super::scoring::{care_grade, final_score, score_tier, ReportAnalytics, ScoringEngine};
use super::session::Session;
use super::toast::ToastTone;
use super::weekly::WeekSummary;
use super::{CareMenu, Overlay, PetPalGame, PromptKind, SetupField, View, SETUP_FIELDS};

pub fn render(
    game: &PetPalGame,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    if let Some(overlay) = &game.overlay {
        match overlay {
            Overlay::Help => render_help(f, area, click_state),
            Overlay::Weekly(summary) => render_weekly(game, summary, f, area, click_state),
            Overlay::Prompt { kind, text } => {
                render_prompt(game, *kind, text, f, area, click_state)
            }
        }
        return;
    }

    let Some(session) = game.session.as_ref().filter(|_| game.view != View::Setup) else {
        match game.view {
            View::Leaderboard => render_leaderboard(game, f, area, click_state),
            _ => render_setup(game, f, area, click_state),
        }
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(10)])
        .split(area);

    render_tabs(game, f, chunks[0], click_state);
    match game.view {
        View::Game => render_game(game, session, f, chunks[1], click_state),
        View::Minigame => render_minigame(game, f, chunks[1], click_state),
        View::Report => render_report(game, session, f, chunks[1], click_state),
        View::Leaderboard => render_leaderboard(game, f, chunks[1], click_state),
        View::Setup => {}
    }
}

// ── Helpers ─────────────────────────────────────────────────

fn borders_for(width: u16) -> Borders {
    if is_narrow_layout(width) {
        Borders::TOP | Borders::BOTTOM
    } else {
        Borders::ALL
    }
}

fn titled_block(title: impl Into<String>, color: Color, width: u16) -> Block<'static> {
    Block::default()
        .borders(borders_for(width))
        .border_style(Style::default().fg(color))
        .title(Span::styled(
            title.into(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
}

/// Register the list's buttons against `block`, then draw it.
fn draw_list(
    f: &mut Frame,
    area: Rect,
    block: Block<'static>,
    cl: ClickableList<'static>,
    click_state: &Rc<RefCell<ClickState>>,
    wrap: bool,
) {
    let inner_width = if wrap { block.inner(area).width } else { 0 };
    cl.register_targets(area, &mut click_state.borrow_mut(), 1, 1, inner_width);
    let paragraph = Paragraph::new(cl.into_lines()).block(block);
    let paragraph = if wrap {
        paragraph.wrap(Wrap { trim: false })
    } else {
        paragraph
    };
    f.render_widget(paragraph, area);
}

/// ` [k] label  detail`, dimmed when unavailable.
fn push_option(
    cl: &mut ClickableList<'static>,
    key: &str,
    label: impl Into<String>,
    detail: impl Into<String>,
    enabled: bool,
    action_id: u16,
) {
    let (key_color, label_color) = if enabled {
        (Color::Yellow, Color::White)
    } else {
        (Color::DarkGray, Color::DarkGray)
    };
    cl.push_clickable(
        Line::from(vec![
            Span::styled(
                format!(" [{}] ", key),
                Style::default().fg(key_color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(label.into(), Style::default().fg(label_color)),
            Span::styled(
                format!("  {}", detail.into()),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        action_id,
    );
}

fn text_line(text: impl Into<String>, color: Color) -> Line<'static> {
    Line::from(Span::styled(text.into(), Style::default().fg(color)))
}

fn label_value(label: &str, value: impl Into<String>, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!(" {}: ", label), Style::default().fg(Color::Gray)),
        Span::styled(
            value.into(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
    ])
}

fn tone_color(tone: ToastTone) -> Color {
    match tone {
        ToastTone::Info => Color::Cyan,
        ToastTone::Success => Color::Green,
        ToastTone::Error => Color::Red,
        ToastTone::Badge => Color::Magenta,
    }
}

fn money_color(amount: i64) -> Color {
    if amount < 0 {
        Color::Red
    } else {
        Color::Yellow
    }
}

/// `m:ss`, rounding partial seconds up.
pub fn format_countdown(ms: u64) -> String {
    let secs = ms.div_ceil(1_000);
    format!("{}:{:02}", secs / 60, secs % 60)
}

fn pet_emoji(pet: &PetState) -> &'static str {
    let info = species_info(pet.profile.species);
    match pet.stage() {
        Stage::Baby => info.emoji_baby,
        Stage::Teen => info.emoji_teen,
        Stage::Adult => info.emoji_adult,
    }
}

fn pet_color(index: usize) -> Color {
    ANIMAL_COLORS
        .get(index)
        .and_then(|c| hex_to_rgb(c.hex))
        .map(|(r, g, b)| Color::Rgb(r, g, b))
        .unwrap_or(Color::White)
}

fn accessory_label(index: Option<usize>) -> String {
    match index.and_then(|i| ACCESSORIES.get(i)) {
        Some(a) => format!("{} {}", a.emoji, a.label),
        None => "None".to_string(),
    }
}

// ── Tabs ────────────────────────────────────────────────────

fn render_tabs(
    game: &PetPalGame,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let style_for = |view: View| {
        if game.view == view {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        }
    };
    let narrow = is_narrow_layout(area.width);
    let label = |wide: &'static str, short: &'static str| if narrow { short } else { wide };

    TabBar::new(" │ ")
        .tab(label("🐾 Care", "Care"), style_for(View::Game), TAB_CARE)
        .tab(label("🎮 Minigames", "Games"), style_for(View::Minigame), TAB_MINIGAMES)
        .tab(label("📊 Report", "Report"), style_for(View::Report), TAB_REPORT)
        .tab(label("🏆 Leaderboard", "Board"), style_for(View::Leaderboard), TAB_LEADERBOARD)
        .block(
            Block::default()
                .borders(borders_for(area.width))
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .render(f, area, &mut click_state.borrow_mut());
}

// ── Setup ───────────────────────────────────────────────────

fn render_setup(
    game: &PetPalGame,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let form = &game.form;
    let mut cl = ClickableList::new();

    cl.push(text_line(
        " Raise a pet for 12 weeks on a budget. Every week brings bills and a salary",
        Color::Gray,
    ));
    cl.push(text_line(
        " that depends on how well your pet is doing.",
        Color::Gray,
    ));
    cl.push(Line::from(""));

    for (i, field) in SETUP_FIELDS.iter().enumerate() {
        let focused = form.focus == *field;
        let marker = if focused { "▶" } else { " " };
        let cursor = if focused && field.is_text() { "_" } else { "" };
        let (value, color) = match field {
            SetupField::Owner => (format!("{}{}", form.owner, cursor), Color::White),
            SetupField::PetName => (format!("{}{}", form.pet_name, cursor), Color::White),
            SetupField::Species => {
                let info = species_info(ALL_SPECIES[form.species]);
                (format!("◀ {} {} ▶", info.emoji_baby, info.name), Color::Cyan)
            }
            SetupField::Color => (
                format!("◀ ■ {} ▶", ANIMAL_COLORS[form.color].label),
                pet_color(form.color),
            ),
            SetupField::Accessory => (
                format!("◀ {} ▶", accessory_label(form.accessory.checked_sub(1))),
                Color::Magenta,
            ),
            SetupField::Budget => (format!("${}{}", form.budget, cursor), Color::Yellow),
        };
        let label_style = if focused {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        cl.push_clickable(
            Line::from(vec![
                Span::styled(format!(" {} ", marker), Style::default().fg(Color::Yellow)),
                Span::styled(format!("{:<10}", field.label()), label_style),
                Span::styled(value, Style::default().fg(color)),
            ]),
            SETUP_FIELD_BASE + i as u16,
        );
    }

    let info = species_info(ALL_SPECIES[form.species]);
    cl.push(text_line(format!("   {}", info.description), Color::DarkGray));
    cl.push(Line::from(""));

    cl.push_clickable(text_line("   ◀ previous choice / -$10", Color::Cyan), SETUP_PREV);
    cl.push_clickable(text_line("   ▶ next choice / +$10", Color::Cyan), SETUP_NEXT);
    cl.push(Line::from(""));
    cl.push_clickable(
        Line::from(Span::styled(
            " [Enter] Adopt and start week 1",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        SETUP_START,
    );

    if let Some(err) = &form.error {
        cl.push(Line::from(""));
        cl.push(text_line(format!(" ✗ {}", err), Color::Red));
    }

    cl.push(Line::from(""));
    cl.push(text_line(
        " Tab: next field   ←/→: change   Enter: start",
        Color::DarkGray,
    ));

    if !game.leaderboard.entries().is_empty() {
        cl.push_clickable(
            text_line(
                format!(" 🏆 Leaderboard ({} saved)", game.leaderboard.entries().len()),
                Color::Magenta,
            ),
            TAB_LEADERBOARD,
        );
    }

    let block = titled_block(" 🐾 PetPal Weeks: adopt a pet ", Color::Cyan, area.width);
    draw_list(f, area, block, cl, click_state, true);
}

// ── Game ────────────────────────────────────────────────────

fn render_game(
    game: &PetPalGame,
    session: &Session,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let is_narrow = is_narrow_layout(area.width);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Header
            Constraint::Length(7), // Stats
            Constraint::Min(8),    // Care menu
            Constraint::Length(if is_narrow { 5 } else { 7 }), // Toasts + ledger
        ])
        .split(area);

    render_header(session, f, chunks[0]);
    render_stats(session, f, chunks[1]);
    render_care_menu(game, session, f, chunks[2], click_state);
    render_feed(session, f, chunks[3], is_narrow);
}

fn render_header(session: &Session, f: &mut Frame, area: Rect) {
    let pet = session.pet.borrow();
    let finance = session.finance.borrow();
    let mood = pet.mood();
    let ticker = &session.ticker;

    let clock = if session.finished {
        "season over".to_string()
    } else if session.paused {
        "⏸ paused".to_string()
    } else {
        match ticker.remaining_ms() {
            Some(ms) => format!("next payday in {}", format_countdown(ms)),
            None => "clock stopped".to_string(),
        }
    };

    let mut name_spans = vec![
        Span::styled(
            format!(" {} {}", pet_emoji(&pet), pet.profile.name),
            Style::default()
                .fg(pet_color(pet.profile.color))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(
                "  {} {} · age {}",
                pet.stage().label(),
                species_info(pet.profile.species).name,
                pet.age
            ),
            Style::default().fg(Color::Gray),
        ),
    ];
    if pet.profile.accessory.is_some() {
        name_spans.push(Span::styled(
            format!("  {}", accessory_label(pet.profile.accessory)),
            Style::default().fg(Color::Magenta),
        ));
    }

    let goal = match (finance.savings_goal, finance.savings_goal_met()) {
        (Some(goal), Some(true)) => format!("  goal {} ✓", format_money(goal)),
        (Some(goal), _) => format!("  goal {}", format_money(goal)),
        (None, _) => String::new(),
    };

    let lines = vec![
        Line::from(name_spans),
        Line::from(vec![
            Span::styled(" Week ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{}/{}", (ticker.week() + 1).min(ticker.total_weeks()), ticker.total_weeks()),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  {}", clock), Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(vec![
            Span::styled(" Wallet ", Style::default().fg(Color::Gray)),
            Span::styled(
                format_money(finance.wallet),
                Style::default()
                    .fg(money_color(finance.wallet))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(goal, Style::default().fg(Color::Cyan)),
            Span::styled(
                format!("  mood {} {}", mood.emoji(), mood.label()),
                Style::default().fg(Color::Gray),
            ),
        ]),
    ];

    let block = titled_block(
        format!(" {}'s pet ", pet.profile.owner),
        Color::Cyan,
        area.width,
    );
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_stats(session: &Session, f: &mut Frame, area: Rect) {
    let pet = session.pet.borrow();
    let bar_width = (area.width as usize).saturating_sub(18).clamp(5, 30);
    let lines: Vec<Line> = ALL_STATS
        .iter()
        .map(|s| stat_gauge(s.label(), pet.stats.get(*s), bar_width))
        .collect();
    let block = titled_block(" Stats ", Color::Green, area.width);
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_care_menu(
    game: &PetPalGame,
    session: &Session,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let wallet = session.finance.borrow().wallet;
    let open = !session.finished;
    let mut cl = ClickableList::new();

    let title = match game.care_menu {
        CareMenu::Main => {
            push_option(&mut cl, "1", "Feed", "food menu", open, OPEN_FEED);
            push_option(&mut cl, "2", "Play", "toy menu", open, OPEN_PLAY);
            push_option(
                &mut cl,
                "3",
                "Rest",
                format!("free · Energy +{}", REST_ENERGY_BOOST),
                open,
                DO_REST,
            );
            push_option(
                &mut cl,
                "4",
                "Clean",
                format_money(CLEAN_COST),
                open && wallet >= CLEAN_COST,
                DO_CLEAN,
            );
            push_option(&mut cl, "5", "Vet", "checkup or treatment", open, OPEN_VET);
            push_option(
                &mut cl,
                "6",
                "Teach a trick",
                format_money(TRICK_COST),
                open && wallet >= TRICK_COST,
                OPEN_TRICK,
            );
            push_option(&mut cl, "7", "Savings goal", "", open, OPEN_GOAL);
            let pause = if session.paused { "Resume" } else { "Pause" };
            push_option(&mut cl, "P", pause, "", open, TOGGLE_PAUSE);
            push_option(&mut cl, "H", "Help", "", true, OPEN_HELP);

            let tricks = session.pet.borrow().tricks.join(", ");
            if !tricks.is_empty() {
                cl.push(text_line(format!(" Tricks: {}", tricks), Color::Magenta));
            }
            " Care "
        }
        CareMenu::Food => {
            for (i, food) in FOODS.iter().enumerate() {
                push_option(
                    &mut cl,
                    &(i + 1).to_string(),
                    format!("{} {}", food.name, format_money(food.cost)),
                    format!("Hunger +{} Happiness +{}", food.hunger_restore, food.happiness_bonus),
                    open && wallet >= food.cost,
                    FOOD_BASE + i as u16,
                );
            }
            push_option(&mut cl, "-", "Back", "", true, BACK_TO_CARE);
            " Feed "
        }
        CareMenu::Toys => {
            for (i, toy) in TOYS.iter().enumerate() {
                push_option(
                    &mut cl,
                    &(i + 1).to_string(),
                    format!("{} {}", toy.name, format_money(toy.cost)),
                    format!("Happiness +{} Energy -{}", toy.happiness_restore, toy.energy_cost),
                    open && wallet >= toy.cost,
                    TOY_BASE + i as u16,
                );
            }
            push_option(&mut cl, "-", "Back", "", true, BACK_TO_CARE);
            " Play "
        }
        CareMenu::Vet => {
            for (i, option) in VET_OPTIONS.iter().enumerate() {
                let kind = if option.is_preventive() { "preventive" } else { "treatment" };
                push_option(
                    &mut cl,
                    &(i + 1).to_string(),
                    format!("{} {}", option.name, format_money(option.cost)),
                    format!("Health +{} · {}", option.health_restore, kind),
                    open && wallet >= option.cost,
                    VET_BASE + i as u16,
                );
            }
            push_option(&mut cl, "-", "Back", "", true, BACK_TO_CARE);
            " Vet "
        }
    };

    let block = titled_block(title, Color::Yellow, area.width);
    draw_list(f, area, block, cl, click_state, false);
}

fn render_feed(session: &Session, f: &mut Frame, area: Rect, is_narrow: bool) {
    let rows = area.height.saturating_sub(2) as usize;

    let toasts = session.toasts.borrow();
    let toast_lines: Vec<Line> = if toasts.is_empty() {
        vec![text_line(" No news.", Color::DarkGray)]
    } else {
        toasts
            .toasts
            .iter()
            .rev()
            .take(rows)
            .map(|t| text_line(format!(" • {}", t.message), tone_color(t.tone)))
            .collect()
    };
    let toast_block = titled_block(" News ", Color::Magenta, area.width);

    if is_narrow {
        f.render_widget(
            Paragraph::new(toast_lines)
                .block(toast_block)
                .wrap(Wrap { trim: false }),
            area,
        );
        return;
    }

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    f.render_widget(
        Paragraph::new(toast_lines)
            .block(toast_block)
            .wrap(Wrap { trim: false }),
        cols[0],
    );

    let finance = session.finance.borrow();
    let ledger: Vec<Line> = finance
        .recent(rows)
        .map(|e| {
            // income is stored negative
            let color = if e.category == Category::Income {
                Color::Green
            } else {
                Color::Gray
            };
            Line::from(vec![
                Span::styled(
                    format!(" {:>6} ", format_signed_money(-e.amount)),
                    Style::default().fg(color),
                ),
                Span::styled(e.label.clone(), Style::default().fg(Color::DarkGray)),
            ])
        })
        .collect();
    let ledger_block = titled_block(" Ledger ", Color::DarkGray, cols[1].width);
    f.render_widget(Paragraph::new(ledger).block(ledger_block), cols[1]);
}

// ── Minigames ───────────────────────────────────────────────

fn render_minigame(
    game: &PetPalGame,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    match &game.minigame {
        None => render_hub(f, area, click_state),
        Some(active) => {
            let info = minigame_info(active.kind());
            let title = format!(" {} {} ", info.emoji, info.name);
            match active {
                ActiveGame::Blitz(g) => render_blitz(g, title, f, area, click_state),
                ActiveGame::Sequence(g) => render_sequence(g, title, f, area, click_state),
                ActiveGame::Reflex(g) => render_reflex(g, title, f, area, click_state),
                ActiveGame::Memory(g) => render_memory(g, title, f, area, click_state),
            }
        }
    }
}

fn render_hub(f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let mut cl = ClickableList::new();
    cl.push(text_line(
        " Earn money for pet care. The weekly clock waits while you play.",
        Color::Gray,
    ));
    cl.push(Line::from(""));
    for (i, kind) in ALL_MINIGAMES.iter().enumerate() {
        let info = minigame_info(*kind);
        push_option(
            &mut cl,
            &(i + 1).to_string(),
            format!("{} {}", info.emoji, info.name),
            format!("{} · up to {}", info.difficulty, format_money(info.max_earnings)),
            true,
            MINIGAME_BASE + i as u16,
        );
        cl.push(text_line(format!("       {}", info.description), Color::DarkGray));
    }
    cl.push(Line::from(""));
    push_option(&mut cl, "-", "Back to care", "", true, MINIGAME_BACK);

    let block = titled_block(" 🎮 Minigames ", Color::Cyan, area.width);
    draw_list(f, area, block, cl, click_state, true);
}

/// Start / collect / quit rows shared by every game.
fn push_game_controls(cl: &mut ClickableList<'static>, ready: bool, done: bool, earnings: i64) {
    cl.push(Line::from(""));
    if ready {
        push_option(cl, "S", "Start", "", true, MINIGAME_START);
    }
    if done {
        cl.push(text_line(
            format!(" Earned {}", format_money(earnings)),
            Color::Green,
        ));
        push_option(cl, "C", "Collect", "", true, MINIGAME_COLLECT);
    }
    push_option(cl, "-", "Quit", "nothing is paid", !done, MINIGAME_BACK);
}

fn render_blitz(
    game: &BudgetBlitz,
    title: String,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let mut cl = ClickableList::new();
    let number = (game.current + 1).min(TOTAL_QUESTIONS);
    cl.push(Line::from(vec![
        Span::styled(
            format!(" Question {}/{}", number, TOTAL_QUESTIONS),
            Style::default().fg(Color::Gray),
        ),
        Span::styled(
            format!("  correct {}", game.correct),
            Style::default().fg(Color::Green),
        ),
        Span::styled(
            format!("  ⏱ {}s", game.seconds_left()),
            Style::default().fg(Color::Yellow),
        ),
    ]));
    cl.push(Line::from(""));

    let reveal = match &game.phase {
        BlitzPhase::Reveal { chosen, .. } => Some(*chosen),
        _ => None,
    };
    match (&game.phase, game.question()) {
        (BlitzPhase::Ready, _) => {
            cl.push(text_line(
                " 10 budgeting questions, 8 seconds each, $10 per right answer.",
                Color::White,
            ));
        }
        (BlitzPhase::Done, _) => {
            cl.push(text_line(
                format!(" Finished: {}/{} correct.", game.correct, TOTAL_QUESTIONS),
                Color::White,
            ));
        }
        (_, Some(q)) => {
            cl.push(Line::from(Span::styled(
                format!(" {}", q.text),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )));
            cl.push(Line::from(""));
            for (i, option) in q.options.iter().enumerate() {
                let detail = match reveal {
                    Some(_) if i == q.answer_index() => "✓",
                    Some(Some(c)) if c == i => "✗",
                    _ => "",
                };
                push_option(
                    &mut cl,
                    &(i + 1).to_string(),
                    format_money(*option),
                    detail,
                    reveal.is_none(),
                    MINIGAME_PRESS_BASE + i as u16,
                );
            }
            if reveal == Some(None) {
                cl.push(text_line(" Time's up!", Color::Red));
            }
        }
        (_, None) => {}
    }

    push_game_controls(
        &mut cl,
        game.phase == BlitzPhase::Ready,
        game.is_done(),
        game.earnings(),
    );
    let block = titled_block(title, Color::Yellow, area.width);
    draw_list(f, area, block, cl, click_state, true);
}

fn render_sequence(
    game: &CareSequence,
    title: String,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let mut cl = ClickableList::new();
    cl.push(Line::from(vec![
        Span::styled(
            format!(
                " Round {}/{}",
                (game.round + 1).min(minigame::sequence::TOTAL_ROUNDS),
                minigame::sequence::TOTAL_ROUNDS
            ),
            Style::default().fg(Color::Gray),
        ),
        Span::styled(
            format!("  cleared {}", game.rounds_completed),
            Style::default().fg(Color::Green),
        ),
    ]));
    cl.push(Line::from(""));

    let (status, color) = match &game.phase {
        SequencePhase::Ready => (
            " Watch the care routine, then repeat it. $3 per round.".to_string(),
            Color::White,
        ),
        SequencePhase::LeadIn(_) => (" Get ready…".to_string(), Color::Yellow),
        SequencePhase::Showing { .. } => match game.highlighted() {
            Some(step) => (format!(" ▶ {} {}", step.emoji(), step.label()), Color::Cyan),
            None => (" ·".to_string(), Color::DarkGray),
        },
        SequencePhase::Input => (
            format!(" Your turn: {}/{}", game.progress, game.sequence.len()),
            Color::Yellow,
        ),
        SequencePhase::Cleared(_) => (" Round cleared!".to_string(), Color::Green),
        SequencePhase::Failed { at, .. } => match game.sequence.get(*at) {
            Some(step) => (
                format!(" Wrong step. It was {} {}.", step.emoji(), step.label()),
                Color::Red,
            ),
            None => (" Wrong step.".to_string(), Color::Red),
        },
        SequencePhase::Done => (
            format!(" Routine over: {} rounds cleared.", game.rounds_completed),
            Color::White,
        ),
    };
    cl.push(Line::from(Span::styled(
        status,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )));
    cl.push(Line::from(""));

    let accepting = game.phase == SequencePhase::Input;
    for (i, step) in CARE_STEPS.iter().enumerate() {
        push_option(
            &mut cl,
            &(i + 1).to_string(),
            format!("{} {}", step.emoji(), step.label()),
            "",
            accepting,
            MINIGAME_PRESS_BASE + i as u16,
        );
    }

    push_game_controls(
        &mut cl,
        game.phase == SequencePhase::Ready,
        game.is_done(),
        game.earnings(),
    );
    let block = titled_block(title, Color::Yellow, area.width);
    draw_list(f, area, block, cl, click_state, false);
}

fn render_reflex(
    game: &ReflexTap,
    title: String,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(9), Constraint::Length(8)])
        .split(area);

    let grid_block = titled_block(title, Color::Yellow, area.width);
    let grid_area = grid_block.inner(chunks[0]);
    f.render_widget(grid_block, chunks[0]);

    let side = (PADS as f64).sqrt() as usize;
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, side as u32); side])
        .split(grid_area);
    let lit = game.lit_pad();
    {
        let mut cs = click_state.borrow_mut();
        for (r, row) in rows.iter().enumerate() {
            let cells = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![Constraint::Ratio(1, side as u32); side])
                .split(*row);
            for (c, cell) in cells.iter().enumerate() {
                let pad = r * side + c;
                let (text, style) = if lit == Some(pad) {
                    (
                        format!("🐾 {}", pad + 1),
                        Style::default()
                            .fg(Color::Black)
                            .bg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    (format!("{}", pad + 1), Style::default().fg(Color::DarkGray))
                };
                let widget = Paragraph::new(text)
                    .style(style)
                    .block(Block::default().borders(Borders::ALL).border_style(style));
                f.render_widget(widget, *cell);
                cs.add_click_target(*cell, MINIGAME_PRESS_BASE + pad as u16);
            }
        }
    }

    let mut cl = ClickableList::new();
    cl.push(Line::from(vec![
        Span::styled(
            format!(
                " Round {}/{}",
                (game.round + 1).min(minigame::reflex::TOTAL_ROUNDS),
                minigame::reflex::TOTAL_ROUNDS
            ),
            Style::default().fg(Color::Gray),
        ),
        Span::styled(format!("  hits {}", game.hits), Style::default().fg(Color::Green)),
        Span::styled(
            format!("  window {}ms", game.current_window_ms()),
            Style::default().fg(Color::DarkGray),
        ),
    ]));
    let (status, color) = match &game.phase {
        ReflexPhase::Ready => (" Tap the glowing paw before it fades.", Color::White),
        ReflexPhase::Waiting { last: Some(Feedback::Hit), .. } => (" Nice!", Color::Green),
        ReflexPhase::Waiting { last: Some(Feedback::Miss), .. } => (" Missed!", Color::Red),
        ReflexPhase::Waiting { last: None, .. } => (" Get ready…", Color::Yellow),
        ReflexPhase::Lit { .. } => (" Tap it!", Color::Yellow),
        ReflexPhase::Done => (" Time's up.", Color::White),
    };
    cl.push(text_line(status, color));
    push_game_controls(
        &mut cl,
        game.phase == ReflexPhase::Ready,
        game.is_done(),
        game.earnings(),
    );
    let block = titled_block(" Controls ", Color::DarkGray, area.width);
    draw_list(f, chunks[1], block, cl, click_state, false);
}

fn render_memory(
    game: &MemoryMatch,
    title: String,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(12), Constraint::Length(8)])
        .split(area);

    let grid_block = titled_block(title, Color::Magenta, area.width);
    let grid_area = grid_block.inner(chunks[0]);
    f.render_widget(grid_block, chunks[0]);

    let grid_rows = CARDS / GRID_COLS;
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, grid_rows as u32); grid_rows])
        .split(grid_area);
    // cards stay unclickable until the clock starts
    let live = matches!(
        game.phase,
        MemoryPhase::Playing { .. } | MemoryPhase::Mismatch { .. }
    );
    {
        let mut cs = click_state.borrow_mut();
        for (r, row) in rows.iter().enumerate() {
            let cells = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![Constraint::Ratio(1, GRID_COLS as u32); GRID_COLS])
                .split(*row);
            for (c, cell) in cells.iter().enumerate() {
                let idx = r * GRID_COLS + c;
                let card = game.cards[idx];
                let (text, style) = if card.matched {
                    (
                        card.emoji().to_string(),
                        Style::default().fg(Color::Green),
                    )
                } else if game.is_face_up(idx) {
                    (
                        card.emoji().to_string(),
                        Style::default()
                            .fg(Color::White)
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    ("?".to_string(), Style::default().fg(Color::DarkGray))
                };
                let border = if matches!(game.phase, MemoryPhase::Mismatch { .. })
                    && game.is_face_up(idx)
                    && !card.matched
                {
                    Style::default().fg(Color::Red)
                } else {
                    style
                };
                let widget = Paragraph::new(text)
                    .style(style)
                    .block(Block::default().borders(Borders::ALL).border_style(border));
                f.render_widget(widget, *cell);
                if live && !card.matched {
                    cs.add_click_target(*cell, MINIGAME_PRESS_BASE + idx as u16);
                }
            }
        }
    }

    let secs = game.remaining_ms().div_ceil(1_000);
    let clock_color = match secs {
        21.. => Color::Green,
        11..=20 => Color::Yellow,
        _ => Color::Red,
    };
    let mut cl = ClickableList::new();
    cl.push(Line::from(vec![
        Span::styled(format!(" Time {secs}s"), Style::default().fg(clock_color)),
        Span::styled(
            format!("  pairs {}/{}", game.pairs_found, PAIRS),
            Style::default().fg(Color::Gray),
        ),
        Span::styled(format!("  flips {}", game.flips), Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("  earning {}", format_money(game.earnings())),
            Style::default().fg(Color::Green),
        ),
    ]));
    let (status, color) = match &game.phase {
        MemoryPhase::Ready => (" Find all 8 care pairs in 60 seconds.", Color::White),
        MemoryPhase::Playing { turned: None, .. } => (" Pick a card.", Color::Gray),
        MemoryPhase::Playing { turned: Some(_), .. } => (" Now find its twin.", Color::Yellow),
        MemoryPhase::Mismatch { .. } => (" No match.", Color::Red),
        MemoryPhase::Done if game.all_matched() => (" Perfect! All matched!", Color::Green),
        MemoryPhase::Done => (" Time's up.", Color::White),
    };
    cl.push(text_line(status, color));
    push_game_controls(
        &mut cl,
        game.phase == MemoryPhase::Ready,
        game.is_done(),
        game.earnings(),
    );
    let block = titled_block(" Controls ", Color::DarkGray, area.width);
    draw_list(f, chunks[1], block, cl, click_state, false);
}

// ── Report ──────────────────────────────────────────────────

fn render_report(
    game: &PetPalGame,
    session: &Session,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let is_narrow = is_narrow_layout(area.width);
    let pet = session.pet.borrow();
    let finance = session.finance.borrow();

    let score = final_score(&pet.stats, finance.wallet);
    let tier = score_tier(score);
    let responsibility = ScoringEngine::new(&session.snapshots, &finance).calculate();
    let analytics = ReportAnalytics::build(&pet, &finance);

    // ── Summary + actions ──
    let mut cl = ClickableList::new();
    cl.push(Line::from(vec![
        Span::styled(" Score ", Style::default().fg(Color::Gray)),
        Span::styled(
            score.to_string(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  {}", tier.label), Style::default().fg(Color::Cyan)),
        Span::styled(
            format!("  grade {}", care_grade(&pet.stats)),
            Style::default().fg(Color::Magenta),
        ),
    ]));
    cl.push(text_line(
        " Score = wallet + average pet stats x 2",
        Color::DarkGray,
    ));
    cl.push(label_value(
        "Responsibility",
        format!(
            "{} ({})",
            responsibility.final_score,
            responsibility.class.label()
        ),
        Color::Green,
    ));
    cl.push(text_line(
        format!(
            "   wellbeing {} · financial {} · consistency {} · volatility {}",
            responsibility.wellbeing,
            responsibility.financial,
            responsibility.consistency,
            responsibility.volatility
        ),
        Color::DarkGray,
    ));
    cl.push(Line::from(""));

    if session.finished {
        if game.saved {
            cl.push(text_line(" ✓ Saved to the leaderboard", Color::Green));
        } else {
            push_option(&mut cl, "S", "Save to leaderboard", "", true, SAVE_SCORE);
        }
    } else {
        push_option(&mut cl, "-", "Back to care", "", true, REPORT_BACK);
    }
    push_option(&mut cl, "A", "Play again with this pet", "", true, REPLAY_SAME_PET);
    push_option(&mut cl, "N", "New pet", "", true, PLAY_AGAIN);
    push_option(&mut cl, "L", "Leaderboard", "", true, TAB_LEADERBOARD);

    let heading = if session.finished {
        format!(" 📊 Final report: {} ", pet.profile.name)
    } else {
        format!(
            " 📊 Progress: week {} of {} ",
            session.weeks_played(),
            session.ticker.total_weeks()
        )
    };

    let summary_height = (cl.len() as u16 + 2).min(area.height);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(summary_height), Constraint::Min(4)])
        .split(area);
    let block = titled_block(heading, Color::Yellow, area.width);
    draw_list(f, chunks[0], block, cl, click_state, false);

    // ── Analytics ──
    let mut money: Vec<Line> = vec![
        label_value("Wallet", format_money(finance.wallet), money_color(finance.wallet)),
        label_value("Spent", format_money(analytics.spending_total), Color::White),
        label_value("Bills", format_money(analytics.total_bills), Color::White),
        label_value("Income", format_money(analytics.total_income), Color::Green),
    ];
    if let Some(e) = &analytics.biggest_expense {
        money.push(label_value(
            "Biggest",
            format!("{} {}", e.label, format_money(e.amount)),
            Color::White,
        ));
    }
    if let Some(status) = &analytics.savings_status {
        money.push(text_line(format!(" {}", status), Color::Cyan));
    }
    money.push(Line::from(""));
    for share in &analytics.breakdown {
        let bar = "█".repeat((share.percent as usize).div_ceil(10));
        money.push(Line::from(vec![
            Span::styled(
                format!(" {:<9}", share.category.label()),
                Style::default().fg(Color::Gray),
            ),
            Span::styled(format!("{:<10}", bar), Style::default().fg(Color::Yellow)),
            Span::styled(
                format!(" {} ({}%)", format_money(share.amount), share.percent),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
    }

    let mut care: Vec<Line> = Vec::new();
    let counts: Vec<String> = analytics
        .action_counts
        .iter()
        .map(|(label, n)| format!("{} {}", label, n))
        .collect();
    care.push(text_line(format!(" Actions: {}", counts.join(" · ")), Color::Gray));
    care.push(text_line(
        format!(
            " Average stats {} · minigames {} · tricks {}",
            pet.stats.rounded_average(),
            pet.minigames_played,
            pet.tricks.len()
        ),
        Color::Gray,
    ));
    for insight in &analytics.insights {
        care.push(text_line(format!(" 💡 {}", insight), Color::White));
    }
    care.push(Line::from(""));
    for badge in BADGES.iter() {
        let earned = session.badges.is_earned(badge.id);
        let (mark, color) = if earned {
            (badge.emoji, Color::Magenta)
        } else {
            ("·", Color::DarkGray)
        };
        care.push(text_line(format!(" {} {}", mark, badge.name), color));
    }

    let money_block = titled_block(" Money ", Color::Green, area.width);
    let care_block = titled_block(" Care & badges ", Color::Magenta, area.width);
    if is_narrow {
        money.push(Line::from(""));
        money.extend(care);
        f.render_widget(
            Paragraph::new(money)
                .block(money_block)
                .wrap(Wrap { trim: false }),
            chunks[1],
        );
    } else {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[1]);
        f.render_widget(
            Paragraph::new(money)
                .block(money_block)
                .wrap(Wrap { trim: false }),
            cols[0],
        );
        f.render_widget(
            Paragraph::new(care)
                .block(care_block)
                .wrap(Wrap { trim: false }),
            cols[1],
        );
    }
}

// ── Leaderboard ─────────────────────────────────────────────

fn leaderboard_row(rank: usize, e: &LeaderboardEntry, narrow: bool) -> Line<'static> {
    let medal = match rank {
        1 => "🥇",
        2 => "🥈",
        3 => "🥉",
        _ => "  ",
    };
    let detail = if narrow {
        format!("  {} · {}", e.grade, e.owner)
    } else {
        format!(
            "  {} {} · grade {} · avg {} · {} · {} spent · {}w · {}",
            e.species_name(),
            e.owner,
            e.grade,
            e.average,
            format_money(e.wallet),
            format_money(e.total_spent),
            e.weeks,
            e.stage
        )
    };
    Line::from(vec![
        Span::styled(
            format!(" {} {:>2}. ", medal, rank),
            Style::default().fg(Color::Gray),
        ),
        Span::styled(
            format!("{:>4} ", e.score),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::styled(e.pet.clone(), Style::default().fg(Color::White)),
        Span::styled(detail, Style::default().fg(Color::DarkGray)),
    ])
}

fn render_leaderboard(
    game: &PetPalGame,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let narrow = is_narrow_layout(area.width);
    let board = &game.leaderboard;
    let mut cl = ClickableList::new();

    if board.entries().is_empty() {
        cl.push(text_line(
            " No scores yet. Finish a season and save it from the report.",
            Color::DarkGray,
        ));
    } else {
        let max_rows = (area.height as usize).saturating_sub(7);
        for (i, e) in board.entries().iter().take(max_rows).enumerate() {
            cl.push(leaderboard_row(i + 1, e, narrow));
        }
    }
    cl.push(Line::from(""));

    if !board.entries().is_empty() {
        if board.is_confirming_clear() {
            push_option(&mut cl, "C", "Press again to clear every score", "", true, CLEAR_BOARD);
        } else {
            push_option(&mut cl, "C", "Clear leaderboard", "", true, CLEAR_BOARD);
        }
    }
    push_option(&mut cl, "-", "Back", "", true, LEADERBOARD_BACK);

    let block = titled_block(" 🏆 Leaderboard ", Color::Magenta, area.width);
    draw_list(f, area, block, cl, click_state, false);
}

// ── Overlays ────────────────────────────────────────────────

fn render_help(f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let mut cl = ClickableList::new();
    let rows = [
        ("How it works", Color::Yellow),
        ("  Every 20 seconds a week passes. Bills of $20 are charged and you", Color::Gray),
        ("  earn a salary based on your pet's average stats:", Color::Gray),
        ("    75+ thriving $25 · 50+ doing OK $15 · 25+ struggling $5", Color::Gray),
        ("    below 25 critical: no salary", Color::Gray),
        ("  Stats decay over time. Your pet grows up as it ages.", Color::Gray),
        ("", Color::Gray),
        ("Keys", Color::Yellow),
        ("  1-7 care actions · m minigames · r report · l leaderboard", Color::Gray),
        ("  p pause · h help · - or Esc back", Color::Gray),
        ("", Color::Gray),
        ("Scoring", Color::Yellow),
        ("  Score = wallet + average pet stats x 2", Color::Gray),
        ("  The season ends after 12 weeks.", Color::Gray),
        ("", Color::Gray),
    ];
    for (text, color) in rows {
        cl.push(text_line(format!(" {}", text), color));
    }
    push_option(&mut cl, "-", "Close", "", true, CLOSE_OVERLAY);

    let block = titled_block(" ❓ Help ", Color::Cyan, area.width);
    draw_list(f, area, block, cl, click_state, true);
}

fn render_weekly(
    game: &PetPalGame,
    summary: &WeekSummary,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let wallet = game
        .session
        .as_ref()
        .map(|s| s.finance.borrow().wallet)
        .unwrap_or_default();
    let tier_color = if summary.tier.salary > 0 {
        Color::Green
    } else {
        Color::Red
    };

    let mut cl = ClickableList::new();
    cl.push(label_value("Average stats", format!("{:.0}", summary.average), Color::White));
    cl.push(label_value(
        "Salary",
        format!("{} ({})", format_signed_money(summary.tier.salary), summary.tier.label),
        tier_color,
    ));
    cl.push(label_value("Bills", format_signed_money(-summary.bills), Color::Red));
    cl.push(label_value(
        "Net",
        format_signed_money(summary.net),
        money_color(summary.net),
    ));
    cl.push(label_value("Wallet", format_money(wallet), money_color(wallet)));
    cl.push(Line::from(""));
    if summary.is_final {
        cl.push(text_line(
            " That was the last week. Time to see how you did!",
            Color::Yellow,
        ));
        push_option(&mut cl, "Enter", "See the report", "", true, CLOSE_OVERLAY);
    } else {
        push_option(&mut cl, "Enter", "Continue", "", true, CLOSE_OVERLAY);
    }

    let block = titled_block(
        format!(" 📅 Week {} complete ", summary.week),
        Color::Yellow,
        area.width,
    );
    draw_list(f, area, block, cl, click_state, false);
}

fn render_prompt(
    game: &PetPalGame,
    kind: PromptKind,
    text: &str,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let mut cl = ClickableList::new();
    let hint = match (kind, game.session.as_ref()) {
        (PromptKind::Trick, Some(s)) => {
            let known = s.pet.borrow().tricks.join(", ");
            if known.is_empty() {
                "Up to 20 letters, digits or spaces.".to_string()
            } else {
                format!("Already knows: {}", known)
            }
        }
        (PromptKind::SavingsGoal, Some(s)) => format!(
            "A whole amount between $1 and {}.",
            format_money(s.finance.borrow().budget)
        ),
        (_, None) => String::new(),
    };
    cl.push(text_line(format!(" {}", hint), Color::DarkGray));
    cl.push(Line::from(""));
    cl.push(Line::from(vec![
        Span::styled(" > ", Style::default().fg(Color::Yellow)),
        Span::styled(
            format!("{}_", text),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
    ]));

    // most recent error from the last attempt
    if let Some(toast) = game
        .session
        .as_ref()
        .and_then(|s| s.toasts.borrow().latest().cloned())
        .filter(|t| t.tone == ToastTone::Error)
    {
        cl.push(text_line(format!(" ✗ {}", toast.message), Color::Red));
    }
    cl.push(Line::from(""));
    push_option(&mut cl, "Enter", "Confirm", "", true, PROMPT_SUBMIT);
    push_option(&mut cl, "Esc", "Cancel", "", true, CLOSE_OVERLAY);

    let block = titled_block(format!(" {} ", kind.title()), Color::Cyan, area.width);
    draw_list(f, area, block, cl, click_state, false);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn countdown_rounds_up() {
        assert_eq!(format_countdown(20_000), "0:20");
        assert_eq!(format_countdown(19_001), "0:20");
        assert_eq!(format_countdown(65_000), "1:05");
        assert_eq!(format_countdown(0), "0:00");
    }

    #[test]
    fn narrow_panels_drop_side_borders() {
        assert_eq!(borders_for(40), Borders::TOP | Borders::BOTTOM);
        assert_eq!(borders_for(100), Borders::ALL);
    }

    #[test]
    fn unknown_color_index_falls_back() {
        assert_eq!(pet_color(99), Color::White);
        assert_ne!(pet_color(0), Color::White);
    }
}
