//! Reusable UI pieces that render and register their own click targets.
//!
//! - [`TabBar`]: the Care / Shop / Money / Badges strip on the game view.
//! - [`ClickableList`]: vertical menus where some lines are buttons.
//! - [`stat_gauge`]: one labelled `█░` bar for a 0–100 pet stat.

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Paragraph};
use ratzilla::ratatui::Frame;

use crate::input::ClickState;

// ── TabBar ─────────────────────────────────────────────────────

/// A single-row tab strip whose click targets follow the rendered label
/// widths, so emoji and long labels still line up with their hit boxes.
pub struct TabBar<'a> {
    tabs: Vec<(String, Style, u16)>,
    separator: &'a str,
    block: Option<Block<'a>>,
}

impl<'a> TabBar<'a> {
    pub fn new(separator: &'a str) -> Self {
        Self {
            tabs: Vec::new(),
            separator,
            block: None,
        }
    }

    pub fn tab(mut self, label: impl Into<String>, style: Style, action_id: u16) -> Self {
        self.tabs.push((label.into(), style, action_id));
        self
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    /// Padded label widths paired with their action IDs.
    fn tab_widths(&self) -> Vec<(u16, u16)> {
        self.tabs
            .iter()
            .map(|(label, _, id)| (Line::from(format!(" {} ", label)).width() as u16, *id))
            .collect()
    }

    pub fn render(self, f: &mut Frame, area: Rect, cs: &mut ClickState) {
        let sep_width = Line::from(self.separator).width() as u16;
        let tab_widths = self.tab_widths();

        let mut spans: Vec<Span> = Vec::new();
        for (i, (label, style, _)) in self.tabs.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(
                    self.separator,
                    Style::default().fg(Color::DarkGray),
                ));
            }
            spans.push(Span::styled(format!(" {} ", label), *style));
        }

        let inner = match &self.block {
            Some(block) => block.inner(area),
            None => area,
        };

        let line = Line::from(spans);
        let paragraph = match self.block {
            Some(block) => Paragraph::new(line).block(block),
            None => Paragraph::new(line),
        };
        f.render_widget(paragraph, area);

        // Inner x/width for column accuracy, outer y/height for tap tolerance
        cs.register_tab_targets(
            &tab_widths,
            sep_width,
            inner.x,
            area.y,
            inner.width,
            area.height.max(1),
        );
    }
}

// ── ClickableList ──────────────────────────────────────────────

/// Lines paired with optional click actions. Targets are registered by
/// line index, so inserting a line above a button moves its hit row too.
pub struct ClickableList<'a> {
    lines: Vec<Line<'a>>,
    /// `(line_index, action_id)`
    actions: Vec<(u16, u16)>,
}

impl<'a> ClickableList<'a> {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            actions: Vec::new(),
        }
    }

    pub fn push(&mut self, line: Line<'a>) {
        self.lines.push(line);
    }

    pub fn push_clickable(&mut self, line: Line<'a>, action_id: u16) {
        let idx = self.lines.len() as u16;
        self.actions.push((idx, action_id));
        self.lines.push(line);
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn into_lines(self) -> Vec<Line<'a>> {
        self.lines
    }

    /// Register a row target for every clickable line.
    ///
    /// `top_offset`/`bottom_offset` are the border rows of `area`. When
    /// `inner_width` is non-zero, lines wider than it are assumed to wrap and
    /// push later targets down; pass 0 for unwrapped paragraphs.
    pub fn register_targets(
        &self,
        area: Rect,
        cs: &mut ClickState,
        top_offset: u16,
        bottom_offset: u16,
        inner_width: u16,
    ) {
        let content_y = area.y + top_offset;
        let content_end = area.y + area.height.saturating_sub(bottom_offset);

        let mut visual_starts: Vec<u16> = Vec::with_capacity(self.lines.len());
        let mut visual_heights: Vec<u16> = Vec::with_capacity(self.lines.len());
        let mut cumulative: u16 = 0;
        for line in &self.lines {
            visual_starts.push(cumulative);
            let h = if inner_width == 0 {
                1
            } else {
                let w = inner_width as usize;
                let lw = line.width().max(1);
                lw.div_ceil(w) as u16
            };
            visual_heights.push(h);
            cumulative += h;
        }

        for &(line_idx, action_id) in &self.actions {
            let li = line_idx as usize;
            let (Some(&start), Some(&height)) = (visual_starts.get(li), visual_heights.get(li))
            else {
                continue;
            };
            for r in 0..height {
                let row = content_y + start + r;
                if row >= content_end {
                    break;
                }
                cs.add_row_target(area, row, action_id);
            }
        }
    }
}

// ── Stat gauge ─────────────────────────────────────────────────

/// Colour for a 0–100 stat: green when healthy, yellow when slipping,
/// red when the pet needs help.
pub fn stat_color(value: i32) -> Color {
    if value >= 60 {
        Color::Green
    } else if value >= 30 {
        Color::Yellow
    } else {
        Color::Red
    }
}

/// ` Hunger   ████████░░░░  67`
pub fn stat_gauge(label: &str, value: i32, bar_width: usize) -> Line<'static> {
    let clamped = value.clamp(0, 100) as usize;
    let filled = (clamped * bar_width + 50) / 100;
    let empty = bar_width.saturating_sub(filled);
    let color = stat_color(value);

    Line::from(vec![
        Span::styled(format!(" {:<9}", label), Style::default().fg(Color::Gray)),
        Span::styled("█".repeat(filled), Style::default().fg(color)),
        Span::styled("░".repeat(empty), Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!(" {:>3}", value),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_bar_widths_follow_labels() {
        let bar = TabBar::new(" │ ")
            .tab("Care", Style::default(), 1)
            .tab("Badges", Style::default(), 2);
        assert_eq!(bar.tab_widths(), vec![(6, 1), (8, 2)]);
    }

    #[test]
    fn clickable_list_skips_plain_lines() {
        let mut cl = ClickableList::new();
        cl.push(Line::from("Food"));
        cl.push_clickable(Line::from(" [1] Basic Kibble"), 10);
        cl.push_clickable(Line::from(" [2] Premium Meal"), 11);
        cl.push(Line::from(""));
        assert_eq!(cl.len(), 4);

        let area = Rect::new(0, 5, 80, 10);
        let mut cs = ClickState::new();
        cl.register_targets(area, &mut cs, 1, 1, 0);

        assert_eq!(cs.targets.len(), 2);
        assert_eq!(cs.hit_test(10, 6), None);
        assert_eq!(cs.hit_test(10, 7), Some(10));
        assert_eq!(cs.hit_test(10, 8), Some(11));
        assert_eq!(cs.hit_test(10, 9), None);
    }

    #[test]
    fn clickable_list_clipped_by_border() {
        let mut cl = ClickableList::new();
        for i in 0..20 {
            cl.push_clickable(Line::from(format!("row {}", i)), 50 + i as u16);
        }
        let area = Rect::new(0, 0, 80, 5);
        let mut cs = ClickState::new();
        cl.register_targets(area, &mut cs, 1, 1, 0);

        assert_eq!(cs.targets.len(), 3);
        assert_eq!(cs.hit_test(10, 3), Some(52));
        assert_eq!(cs.hit_test(10, 4), None);
    }

    #[test]
    fn wrapped_line_pushes_next_target_down() {
        let mut cl = ClickableList::new();
        cl.push(Line::from("12345678901234567890"));
        cl.push_clickable(Line::from("go"), 10);

        let area = Rect::new(0, 0, 12, 10);
        let mut cs = ClickState::new();
        cl.register_targets(area, &mut cs, 0, 0, 10);

        assert_eq!(cs.hit_test(5, 1), None);
        assert_eq!(cs.hit_test(5, 2), Some(10));
    }

    #[test]
    fn wrapped_button_clickable_on_every_row() {
        let mut cl = ClickableList::new();
        cl.push_clickable(Line::from("123456789012345678901234567890"), 42);

        let area = Rect::new(0, 0, 12, 10);
        let mut cs = ClickState::new();
        cl.register_targets(area, &mut cs, 0, 0, 10);

        for row in 0..3 {
            assert_eq!(cs.hit_test(5, row), Some(42));
        }
        assert_eq!(cs.hit_test(5, 3), None);
    }

    #[test]
    fn gauge_fill_matches_value() {
        let line = stat_gauge("Hunger", 50, 10);
        assert_eq!(line.spans[1].content, "█████");
        assert_eq!(line.spans[2].content, "░░░░░");

        let full = stat_gauge("Health", 100, 10);
        assert_eq!(full.spans[1].content.chars().count(), 10);
        assert_eq!(full.spans[2].content, "");
    }

    #[test]
    fn stat_colors_band() {
        assert_eq!(stat_color(80), Color::Green);
        assert_eq!(stat_color(45), Color::Yellow);
        assert_eq!(stat_color(10), Color::Red);
    }
}
