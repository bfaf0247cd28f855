//! Input plumbing shared by every PetPal view: event types, click targets,
//! and pixel → cell conversion for mouse and touch.

use ratzilla::ratatui::layout::Rect;

/// Keyboard, mouse and touch input normalised into one event stream.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A printable key.
    Key(char),
    /// A click/tap on a registered target, identified by an action ID
    /// from `petpal::actions`.
    Click(u16),
    /// Enter.
    Submit,
    /// Backspace.
    Erase,
    /// Tab: move to the next setup field.
    NextField,
    /// Esc: close an overlay or step back one view.
    Back,
    Left,
    Right,
}

/// A region on screen that can be tapped/clicked to trigger an action.
#[derive(Debug, Clone)]
pub struct ClickTarget {
    /// Hit region in terminal cell coordinates.
    pub rect: Rect,
    pub action_id: u16,
}

/// Click targets registered during the last frame, plus terminal size.
pub struct ClickState {
    pub targets: Vec<ClickTarget>,
    pub terminal_cols: u16,
    pub terminal_rows: u16,
}

impl ClickState {
    pub fn new() -> Self {
        Self {
            targets: Vec::new(),
            terminal_cols: 0,
            terminal_rows: 0,
        }
    }

    pub fn clear_targets(&mut self) {
        self.targets.clear();
    }

    pub fn add_click_target(&mut self, rect: Rect, action_id: u16) {
        self.targets.push(ClickTarget { rect, action_id });
    }

    /// Register a full-width target for one row of `area`. Rows outside the
    /// area are ignored.
    pub fn add_row_target(&mut self, area: Rect, row: u16, action_id: u16) {
        if row >= area.y && row < area.y + area.height {
            self.targets.push(ClickTarget {
                rect: Rect::new(area.x, row, area.width, 1),
                action_id,
            });
        }
    }

    /// Register targets for a horizontal tab strip.
    ///
    /// `tab_widths` holds `(display_width, action_id)` for each padded label.
    /// Each target covers its label plus half of the neighbouring separators;
    /// the first and last tabs stretch to the edges of the strip.
    pub fn register_tab_targets(
        &mut self,
        tab_widths: &[(u16, u16)],
        separator_width: u16,
        x: u16,
        y: u16,
        total_width: u16,
        height: u16,
    ) {
        let n = tab_widths.len();
        if n == 0 || total_width == 0 {
            return;
        }

        let mut starts: Vec<u16> = Vec::with_capacity(n);
        let mut cursor: u16 = 0;
        for (i, &(w, _)) in tab_widths.iter().enumerate() {
            if i > 0 {
                cursor += separator_width;
            }
            starts.push(cursor);
            cursor += w;
        }

        for (i, &(width, action_id)) in tab_widths.iter().enumerate() {
            let left = if i == 0 {
                0
            } else {
                let prev_end = starts[i - 1] + tab_widths[i - 1].0;
                prev_end + (starts[i] - prev_end) / 2
            };
            let right = if i == n - 1 {
                total_width
            } else {
                let cur_end = starts[i] + width;
                cur_end + (starts[i + 1] - cur_end) / 2
            };

            let w = right.saturating_sub(left);
            if w > 0 {
                self.add_click_target(Rect::new(x + left, y, w, height), action_id);
            }
        }
    }

    /// Action ID under a cell. Later registrations sit on top, so overlays
    /// registered after the base view win.
    pub fn hit_test(&self, col: u16, row: u16) -> Option<u16> {
        self.targets.iter().rev().find_map(|t| {
            let r = &t.rect;
            if col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height {
                Some(t.action_id)
            } else {
                None
            }
        })
    }
}

/// Phones and split panes get the stacked single-column layout.
pub fn is_narrow_layout(width: u16) -> bool {
    width < 60
}

/// Convert a pixel Y offset inside the grid container to a terminal row.
pub fn pixel_y_to_row(click_y: f64, grid_height: f64, terminal_rows: u16) -> Option<u16> {
    if grid_height <= 0.0 || terminal_rows == 0 || click_y < 0.0 {
        return None;
    }
    let cell_height = grid_height / terminal_rows as f64;
    let row = (click_y / cell_height) as u16;
    if row >= terminal_rows {
        None
    } else {
        Some(row)
    }
}

/// Convert a pixel X offset inside the grid container to a terminal column.
pub fn pixel_x_to_col(click_x: f64, grid_width: f64, terminal_cols: u16) -> Option<u16> {
    if grid_width <= 0.0 || terminal_cols == 0 || click_x < 0.0 {
        return None;
    }
    let cell_width = grid_width / terminal_cols as f64;
    let col = (click_x / cell_width) as u16;
    if col >= terminal_cols {
        None
    } else {
        Some(col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── hit_test ───────────────────────────────────────────────────

    #[test]
    fn hit_test_picks_row() {
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(0, 10, 80, 1), 1);
        cs.add_click_target(Rect::new(0, 11, 80, 1), 2);

        assert_eq!(cs.hit_test(5, 10), Some(1));
        assert_eq!(cs.hit_test(5, 11), Some(2));
        assert_eq!(cs.hit_test(5, 12), None);
    }

    #[test]
    fn hit_test_side_by_side_cells() {
        // Reflex Tap grid: three cells on one row
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(0, 5, 8, 3), 1);
        cs.add_click_target(Rect::new(8, 5, 8, 3), 2);
        cs.add_click_target(Rect::new(16, 5, 8, 3), 3);

        assert_eq!(cs.hit_test(7, 6), Some(1));
        assert_eq!(cs.hit_test(8, 6), Some(2));
        assert_eq!(cs.hit_test(23, 7), Some(3));
        assert_eq!(cs.hit_test(24, 7), None);
        assert_eq!(cs.hit_test(3, 8), None);
    }

    #[test]
    fn overlay_registered_later_wins() {
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(0, 5, 80, 1), 1);
        cs.add_click_target(Rect::new(20, 3, 40, 6), 2);

        assert_eq!(cs.hit_test(25, 5), Some(2));
        assert_eq!(cs.hit_test(5, 5), Some(1));
    }

    #[test]
    fn empty_state_hits_nothing() {
        let cs = ClickState::new();
        assert_eq!(cs.hit_test(0, 0), None);
    }

    #[test]
    fn row_target_outside_area_ignored() {
        let mut cs = ClickState::new();
        let area = Rect::new(5, 10, 30, 5);
        cs.add_row_target(area, 9, 99);
        cs.add_row_target(area, 15, 98);
        assert!(cs.targets.is_empty());

        cs.add_row_target(area, 12, 97);
        assert_eq!(cs.hit_test(15, 12), Some(97));
        assert_eq!(cs.hit_test(4, 12), None);
    }

    #[test]
    fn clear_drops_everything() {
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(0, 1, 80, 1), 1);
        cs.clear_targets();
        assert_eq!(cs.hit_test(0, 1), None);
    }

    // ── tab strip ──────────────────────────────────────────────────

    #[test]
    fn tab_targets_cover_whole_strip() {
        // " Care " | " Shop " | " Money " with " │ " separators
        let mut cs = ClickState::new();
        cs.register_tab_targets(&[(6, 10), (6, 11), (7, 12)], 3, 0, 2, 60, 1);

        assert_eq!(cs.targets.len(), 3);
        assert_eq!(cs.hit_test(0, 2), Some(10));
        assert_eq!(cs.hit_test(6, 2), Some(10));
        assert_eq!(cs.hit_test(7, 2), Some(11));
        assert_eq!(cs.hit_test(15, 2), Some(11));
        assert_eq!(cs.hit_test(16, 2), Some(12));
        assert_eq!(cs.hit_test(59, 2), Some(12));
        assert_eq!(cs.hit_test(60, 2), None);
    }

    #[test]
    fn tab_targets_empty_input() {
        let mut cs = ClickState::new();
        cs.register_tab_targets(&[], 3, 0, 0, 80, 1);
        cs.register_tab_targets(&[(6, 1)], 3, 0, 0, 0, 1);
        assert!(cs.targets.is_empty());
    }

    // ── layout & pixel conversion ─────────────────────────────────

    #[test]
    fn narrow_layout_threshold() {
        assert!(is_narrow_layout(59));
        assert!(!is_narrow_layout(60));
    }

    #[test]
    fn pixel_to_row() {
        assert_eq!(pixel_y_to_row(0.0, 450.0, 30), Some(0));
        assert_eq!(pixel_y_to_row(15.0, 450.0, 30), Some(1));
        assert_eq!(pixel_y_to_row(449.0, 450.0, 30), Some(29));
        assert_eq!(pixel_y_to_row(450.0, 450.0, 30), None);
        assert_eq!(pixel_y_to_row(-1.0, 450.0, 30), None);
        assert_eq!(pixel_y_to_row(10.0, 0.0, 30), None);
        assert_eq!(pixel_y_to_row(10.0, 450.0, 0), None);
    }

    #[test]
    fn pixel_to_col() {
        assert_eq!(pixel_x_to_col(0.0, 800.0, 80), Some(0));
        assert_eq!(pixel_x_to_col(10.0, 800.0, 80), Some(1));
        assert_eq!(pixel_x_to_col(799.0, 800.0, 80), Some(79));
        assert_eq!(pixel_x_to_col(800.0, 800.0, 80), None);
        assert_eq!(pixel_x_to_col(-1.0, 800.0, 80), None);
    }

    #[test]
    fn pixel_click_reaches_target() {
        let mut cs = ClickState::new();
        cs.terminal_cols = 80;
        cs.terminal_rows = 30;
        cs.add_click_target(Rect::new(0, 11, 80, 1), 7);

        let cell_height = 450.0 / 30.0;
        let row = pixel_y_to_row(11.0 * cell_height + 7.0, 450.0, cs.terminal_rows).unwrap();
        let col = pixel_x_to_col(400.0, 800.0, cs.terminal_cols).unwrap();
        assert_eq!(cs.hit_test(col, row), Some(7));
    }
}
