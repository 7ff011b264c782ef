//! Widgets that render and register their own click targets.
//!
//! - [`TabBar`]: one-line tab strip.
//! - [`ClickableList`]: lines where some rows dispatch an action.

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::style::{Color, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Paragraph};
use ratzilla::ratatui::Frame;

use crate::input::ClickState;

// ── TabBar ─────────────────────────────────────────────────────

/// Horizontal tabs separated by a dim separator string. Click targets are
/// derived from the rendered label widths, so emoji and dynamic counters
/// in labels stay hit-testable.
///
/// ```ignore
/// TabBar::new(" │ ")
///     .tab("Upgrades", active, TAB_UPGRADES)
///     .tab("Stats", inactive, TAB_STATS)
///     .render(f, area, &mut cs);
/// ```
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

    /// Wrap the bar in a block; targets follow the block's inner area.
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    /// `(display_width, action_id)` of each padded label.
    fn label_widths(&self) -> Vec<(u16, u16)> {
        self.tabs
            .iter()
            .map(|(label, _, id)| (Line::from(padded(label)).width() as u16, *id))
            .collect()
    }

    pub fn render(self, f: &mut Frame, area: Rect, cs: &mut ClickState) {
        let widths = self.label_widths();
        let sep_width = Line::from(self.separator).width() as u16;
        let inner = self.block.as_ref().map_or(area, |b| b.inner(area));

        let mut spans: Vec<Span> = Vec::with_capacity(self.tabs.len() * 2);
        for (i, (label, style, _)) in self.tabs.into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(self.separator, Style::default().fg(Color::DarkGray)));
            }
            spans.push(Span::styled(padded(&label), style));
        }

        let mut paragraph = Paragraph::new(Line::from(spans));
        if let Some(block) = self.block {
            paragraph = paragraph.block(block);
        }
        f.render_widget(paragraph, area);

        // Full outer height keeps the whole bar tappable.
        cs.register_tab_targets(&widths, sep_width, inner.x, area.y, inner.width, area.height.max(1));
    }
}

fn padded(label: &str) -> String {
    format!(" {} ", label)
}

// ── ClickableList ──────────────────────────────────────────────

/// Lines for a `Paragraph`, some bound to actions. Row positions are worked
/// out from line order at registration time, so inserting a line shifts the
/// targets below it automatically.
///
/// ```ignore
/// let mut cl = ClickableList::new();
/// cl.push(Line::from("Passive income"));
/// cl.push_clickable(Line::from("[4] Hello World"), buy_upgrade_action(3));
/// cl.register_targets(area, &mut cs, 1, 1, 0, 0);
/// f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
/// ```
#[derive(Default)]
pub struct ClickableList<'a> {
    lines: Vec<Line<'a>>,
    /// `(line_index, action_id)`
    actions: Vec<(usize, u16)>,
}

impl<'a> ClickableList<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: Line<'a>) {
        self.lines.push(line);
    }

    pub fn push_clickable(&mut self, line: Line<'a>, action_id: u16) {
        self.actions.push((self.lines.len(), action_id));
        self.lines.push(line);
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn into_lines(self) -> Vec<Line<'a>> {
        self.lines
    }

    /// Register every clickable line against `area`.
    ///
    /// `top_offset`/`bottom_offset` are border rows, `scroll` is the
    /// paragraph's vertical scroll in visual rows. With `inner_width == 0`
    /// each line is one row; otherwise lines wider than `inner_width` are
    /// assumed to wrap and every wrapped row is registered.
    pub fn register_targets(
        &self,
        area: Rect,
        cs: &mut ClickState,
        top_offset: u16,
        bottom_offset: u16,
        scroll: u16,
        inner_width: u16,
    ) {
        let content_top = area.y + top_offset;
        let content_end = area.y + area.height.saturating_sub(bottom_offset);

        // Visual start row and height of every logical line.
        let mut layout: Vec<(u16, u16)> = Vec::with_capacity(self.lines.len());
        let mut row = 0u16;
        for line in &self.lines {
            let height = if inner_width == 0 {
                1
            } else {
                (line.width().max(1)).div_ceil(inner_width as usize) as u16
            };
            layout.push((row, height));
            row += height;
        }

        for &(idx, action_id) in &self.actions {
            let Some(&(start, height)) = layout.get(idx) else {
                continue;
            };
            for visual in start..start + height {
                if visual < scroll {
                    continue;
                }
                let screen_row = content_top + (visual - scroll);
                if screen_row >= content_end {
                    break;
                }
                cs.add_row_target(area, screen_row, action_id);
            }
        }
    }
}
