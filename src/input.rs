//! Input plumbing: normalized events, click targets and pixel-to-cell mapping.

use ratzilla::ratatui::layout::Rect;

/// Keyboard and pointer input after normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key(char),
    /// A tap/click that landed on a registered target.
    Click(u16),
}

/// Screen region that dispatches an action when tapped.
#[derive(Debug, Clone)]
pub struct ClickTarget {
    pub rect: Rect,
    pub action_id: u16,
}

/// Click targets registered by the last rendered frame, plus the terminal
/// size they were laid out against.
#[derive(Default)]
pub struct ClickState {
    pub targets: Vec<ClickTarget>,
    pub terminal_cols: u16,
    pub terminal_rows: u16,
}

impl ClickState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new frame: remember its size and drop the old targets.
    pub fn begin_frame(&mut self, area: Rect) {
        self.terminal_cols = area.width;
        self.terminal_rows = area.height;
        self.targets.clear();
    }

    pub fn add_click_target(&mut self, rect: Rect, action_id: u16) {
        self.targets.push(ClickTarget { rect, action_id });
    }

    /// Register `row` of `area` as a full-width target. Rows outside the
    /// area are ignored.
    pub fn add_row_target(&mut self, area: Rect, row: u16, action_id: u16) {
        if row >= area.y && row < area.y + area.height {
            self.add_click_target(Rect::new(area.x, row, area.width, 1), action_id);
        }
    }

    /// Targets for a one-line tab bar.
    ///
    /// `tab_widths` holds `(display_width, action_id)` of each padded label.
    /// Every target stretches halfway into the neighbouring separators; the
    /// first one reaches the left edge and the last one the right edge.
    pub fn register_tab_targets(
        &mut self,
        tab_widths: &[(u16, u16)],
        separator_width: u16,
        x: u16,
        y: u16,
        total_width: u16,
        height: u16,
    ) {
        if tab_widths.is_empty() || total_width == 0 {
            return;
        }

        let mut spans: Vec<(u16, u16)> = Vec::with_capacity(tab_widths.len());
        let mut cursor = 0u16;
        for &(w, _) in tab_widths {
            spans.push((cursor, cursor + w));
            cursor += w + separator_width;
        }

        let last = tab_widths.len() - 1;
        for (i, &(_, action_id)) in tab_widths.iter().enumerate() {
            let left = if i == 0 {
                0
            } else {
                let gap_start = spans[i - 1].1;
                gap_start + (spans[i].0 - gap_start) / 2
            };
            let right = if i == last {
                total_width
            } else {
                let gap_start = spans[i].1;
                gap_start + (spans[i + 1].0 - gap_start) / 2
            };
            let w = right.saturating_sub(left);
            if w > 0 {
                self.add_click_target(Rect::new(x + left, y, w, height), action_id);
            }
        }
    }

    /// Action under a terminal cell. Later targets sit on top of earlier ones.
    pub fn hit_test(&self, col: u16, row: u16) -> Option<u16> {
        self.targets.iter().rev().find_map(|t| {
            let r = &t.rect;
            let inside = col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height;
            inside.then_some(t.action_id)
        })
    }

    /// Hit test a pointer position given in pixels relative to the grid's
    /// top-left corner.
    pub fn hit_test_pixels(&self, x: f64, y: f64, grid_width: f64, grid_height: f64) -> Option<u16> {
        let col = pixel_x_to_col(x, grid_width, self.terminal_cols)?;
        let row = pixel_y_to_row(y, grid_height, self.terminal_rows)?;
        self.hit_test(col, row)
    }
}

/// Below this many columns the UI drops descriptions to fit phones.
pub fn is_narrow_layout(width: u16) -> bool {
    width < 60
}

/// Pixel Y (relative to the grid top) to a terminal row.
pub fn pixel_y_to_row(click_y: f64, grid_height: f64, terminal_rows: u16) -> Option<u16> {
    pixel_to_cell(click_y, grid_height, terminal_rows)
}

/// Pixel X (relative to the grid left edge) to a terminal column.
pub fn pixel_x_to_col(click_x: f64, grid_width: f64, terminal_cols: u16) -> Option<u16> {
    pixel_to_cell(click_x, grid_width, terminal_cols)
}

fn pixel_to_cell(offset: f64, extent: f64, cells: u16) -> Option<u16> {
    if extent <= 0.0 || cells == 0 || offset < 0.0 {
        return None;
    }
    let cell = (offset / (extent / cells as f64)) as u16;
    (cell < cells).then_some(cell)
}
