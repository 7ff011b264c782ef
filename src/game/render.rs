//! Code Clicker rendering: header, tabbed panels and overlays.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::input::{is_narrow_layout, ClickState};
use crate::widgets::{ClickableList, TabBar};

use super::actions::*;
use super::catalog::{self, UpgradeDef};
use super::format::{format_cps, format_number, format_play_time};
use super::logic;
use super::{CodeClicker, Tab};

/// Keyboard spinner shown while passive income is flowing.
const TYPING: &[&str] = &["▌", " ", "▌", "▍"];

const XP_BAR_WIDTH: usize = 12;

pub fn render(game: &CodeClicker, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // header
            Constraint::Length(1), // tabs
            Constraint::Min(5),    // content
            Constraint::Length(1), // footer
        ])
        .split(area);

    render_header(game, f, chunks[0], click_state);
    render_tab_bar(game, f, chunks[1], click_state);
    match game.tab {
        Tab::Upgrades => render_upgrades(game, f, chunks[2], click_state),
        Tab::Achievements => render_achievements(game, f, chunks[2]),
        Tab::Stats => render_stats(game, f, chunks[2], click_state),
    }
    render_footer(game, f, chunks[3], click_state);

    // Overlays last so their click targets win the hit test.
    if !game.toasts.is_empty() {
        render_toasts(game, f, area, click_state);
    }
    if game.show_dev_panel {
        render_dev_panel(f, area, click_state);
    }
    if game.confirm_reset {
        render_reset_prompt(f, area, click_state);
    }
}

fn render_header(
    game: &CodeClicker,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let s = &game.state;
    let typing = if s.commits_per_second > 0.0 {
        TYPING[(game.anim_frame / 3) as usize % TYPING.len()]
    } else {
        " "
    };

    let mut cl = ClickableList::new();
    cl.push(Line::from(vec![
        Span::styled(
            format!(" {} commits", format_number(s.commits.floor())),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::styled(typing, Style::default().fg(Color::Green)),
    ]));
    cl.push(Line::from(vec![
        Span::styled(
            format!(" ⚡ {}/s", format_cps(s.commits_per_second)),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("   👆 +{}/click", format_number(s.commits_per_click)),
            Style::default().fg(Color::Cyan),
        ),
    ]));

    let needed = logic::xp_for_level(s.level);
    let filled = (logic::level_progress(s) * XP_BAR_WIDTH as f64).round() as usize;
    cl.push(Line::from(vec![
        Span::styled(
            format!(" Lv {} ", s.level),
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "█".repeat(filled.min(XP_BAR_WIDTH)),
            Style::default().fg(Color::Magenta),
        ),
        Span::styled(
            "░".repeat(XP_BAR_WIDTH - filled.min(XP_BAR_WIDTH)),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!(" {}/{} XP", format_number(s.experience.floor()), format_number(needed)),
            Style::default().fg(Color::DarkGray),
        ),
    ]));

    let button_style = if game.click_flash > 0 {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    };
    cl.push_clickable(
        Line::from(vec![
            Span::styled(" [C] ", button_style),
            Span::styled(
                format!("git commit -m \"+{}\"", format_number(s.commits_per_click)),
                button_style,
            ),
        ]),
        CLICK_COMMIT,
    );

    let border_color = if game.purchase_flash > 0 {
        Color::White
    } else {
        Color::Green
    };
    let title = if game.purchase_flash > 0 {
        " ✦ Code Clicker ✦ "
    } else {
        " Code Clicker "
    };

    cl.register_targets(area, &mut click_state.borrow_mut(), 1, 1, 0, 0);
    let widget = Paragraph::new(cl.into_lines()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(title),
    );
    f.render_widget(widget, area);
}

fn render_tab_bar(
    game: &CodeClicker,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let tab_style = |tab: Tab, color: Color| -> Style {
        if game.tab == tab {
            Style::default()
                .fg(Color::Black)
                .bg(color)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(color)
        }
    };

    let unlocked = game.state.achievements.len();
    let total = catalog::all_achievements().len();

    TabBar::new(" │ ")
        .tab("Upgrades", tab_style(Tab::Upgrades, Color::Green), TAB_UPGRADES)
        .tab(
            format!("Achievements {}/{}", unlocked, total),
            tab_style(Tab::Achievements, Color::Yellow),
            TAB_ACHIEVEMENTS,
        )
        .tab("Stats", tab_style(Tab::Stats, Color::Cyan), TAB_STATS)
        .render(f, area, &mut click_state.borrow_mut());
}

fn render_upgrades(
    game: &CodeClicker,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let narrow = is_narrow_layout(area.width);
    let mut cl = ClickableList::new();

    cl.push(section_heading("Click power"));
    for (idx, def) in catalog::all_upgrades().iter().enumerate() {
        if def.click_multiplier > 0.0 {
            cl.push_clickable(upgrade_line(game, idx, def, narrow), buy_upgrade_action(idx));
        }
    }
    cl.push(section_heading("Passive income"));
    for (idx, def) in catalog::all_upgrades().iter().enumerate() {
        if def.cps > 0.0 {
            cl.push_clickable(upgrade_line(game, idx, def, narrow), buy_upgrade_action(idx));
        }
    }

    let border_color = if game.purchase_flash > 0 {
        Color::Yellow
    } else {
        Color::Green
    };
    cl.register_targets(area, &mut click_state.borrow_mut(), 1, 1, 0, 0);
    let widget = Paragraph::new(cl.into_lines()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(" Upgrades "),
    );
    f.render_widget(widget, area);
}

fn section_heading(label: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!(" ┄┄ {} ┄┄", label),
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD),
    ))
}

fn upgrade_line(game: &CodeClicker, idx: usize, def: &UpgradeDef, narrow: bool) -> Line<'static> {
    let owned = game.state.owned(def.id);
    let cost = logic::calculate_upgrade_cost(def.base_cost, owned);
    let affordable = game.state.commits >= cost;

    let key_style = if affordable {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let text_style = if affordable {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let effect = if def.click_multiplier > 0.0 {
        format!("+{}/click", format_number(def.click_multiplier))
    } else {
        format!("+{}/s", format_cps(def.cps))
    };
    let key = UPGRADE_KEYS.get(idx).copied().unwrap_or(' ');

    let mut spans = vec![
        Span::styled(format!(" [{}] ", key.to_ascii_uppercase()), key_style),
        Span::styled(format!("{} {:<12}", def.icon, def.name), text_style),
        Span::styled(
            format!("{:>3}x ", owned),
            Style::default().fg(if owned > 0 { Color::Green } else { Color::DarkGray }),
        ),
        Span::styled(format!("${:<7} ", format_number(cost)), text_style),
        Span::styled(effect, Style::default().fg(Color::Cyan)),
    ];
    if !narrow {
        spans.push(Span::styled(
            format!("  {}", def.description),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

fn render_achievements(game: &CodeClicker, f: &mut Frame, area: Rect) {
    let narrow = is_narrow_layout(area.width);
    let lines: Vec<Line> = catalog::all_achievements()
        .iter()
        .map(|a| {
            let unlocked = game.state.has_achievement(a.id);
            let (mark, style) = if unlocked {
                (a.icon, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            } else {
                ("🔒", Style::default().fg(Color::DarkGray))
            };
            let mut spans = vec![
                Span::styled(format!(" {} ", mark), style),
                Span::styled(format!("{:<18}", a.name), style),
            ];
            if !narrow || unlocked {
                spans.push(Span::styled(
                    a.description,
                    Style::default().fg(if unlocked { Color::White } else { Color::DarkGray }),
                ));
            }
            Line::from(spans)
        })
        .collect();

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Achievements "),
    );
    f.render_widget(widget, area);
}

fn render_stats(
    game: &CodeClicker,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let s = &game.state;
    let owned_total: u32 = s.upgrades.values().sum();
    let kinds_owned = s.upgrades.values().filter(|&&c| c > 0).count();

    let row = |label: &str, value: String| -> Line<'static> {
        Line::from(vec![
            Span::styled(format!(" {:<16}", label), Style::default().fg(Color::DarkGray)),
            Span::styled(value, Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
        ])
    };

    let mut cl = ClickableList::new();
    cl.push(row("Total commits", format_number(s.total_commits.floor())));
    cl.push(row("Total clicks", s.total_clicks.to_string()));
    cl.push(row("Play time", format_play_time(s.play_time)));
    cl.push(row("Commits/sec", format_cps(s.commits_per_second)));
    cl.push(row("Click power", format_number(s.commits_per_click)));
    cl.push(row(
        "Upgrades owned",
        format!("{} ({}/{} kinds)", owned_total, kinds_owned, catalog::all_upgrades().len()),
    ));
    cl.push(row(
        "Achievements",
        format!("{}/{}", s.achievements.len(), catalog::all_achievements().len()),
    ));
    cl.push(row(
        "Last saved",
        if s.last_saved.is_some() { "this session".into() } else { "never".into() },
    ));
    cl.push(Line::from(""));
    cl.push_clickable(
        Line::from(Span::styled(
            " [S] Save to server",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        REMOTE_SAVE,
    );
    cl.push_clickable(
        Line::from(Span::styled(
            " [L] Load from server",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        REMOTE_LOAD,
    );
    if let Some(status) = &game.remote_status {
        cl.push(Line::from(Span::styled(
            format!("     {}", status),
            Style::default().fg(Color::DarkGray),
        )));
    }
    cl.push(Line::from(""));
    cl.push_clickable(
        Line::from(Span::styled(
            " [X] Reset all progress",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        RESET_REQUEST,
    );

    cl.register_targets(area, &mut click_state.borrow_mut(), 1, 1, 0, 0);
    let widget = Paragraph::new(cl.into_lines()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Stats "),
    );
    f.render_widget(widget, area);
}

fn render_footer(
    game: &CodeClicker,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let hint = if game.show_dev_panel {
        " [D] Close dev panel"
    } else {
        " [C] commit  [1-0,Q-R] buy  [U/A/S] tabs  [Shift+S/L] server  [X] reset"
    };
    let widget = Paragraph::new(Line::from(Span::styled(
        hint,
        Style::default().fg(Color::DarkGray),
    )));
    f.render_widget(widget, area);

    if game.show_dev_panel {
        click_state.borrow_mut().add_click_target(area, TOGGLE_DEV_PANEL);
    }
}

fn render_toasts(
    game: &CodeClicker,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let width = area.width.min(44);
    let height = game.toasts.len() as u16 + 2;
    let toast_area = Rect::new(area.x + area.width - width, area.y, width, height.min(area.height));

    let lines: Vec<Line> = game
        .toasts
        .iter()
        .map(|t| {
            Line::from(vec![
                Span::styled(
                    format!(" {} {}", t.icon, t.title),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!(": {}", t.description), Style::default().fg(Color::White)),
            ])
        })
        .collect();

    f.render_widget(Clear, toast_area);
    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Achievement unlocked! "),
    );
    f.render_widget(widget, toast_area);
    click_state.borrow_mut().add_click_target(toast_area, DISMISS_TOASTS);
}

fn render_dev_panel(f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let width = area.width.min(30);
    let height = 8u16.min(area.height);
    let panel = Rect::new(
        area.x + area.width - width,
        area.y + area.height - height,
        width,
        height,
    );

    let style = Style::default().fg(Color::Magenta);
    let mut cl = ClickableList::new();
    cl.push_clickable(Line::from(Span::styled(" [K] +1K commits", style)), DEV_ADD_1K_COMMITS);
    cl.push_clickable(Line::from(Span::styled(" [M] +1M commits", style)), DEV_ADD_1M_COMMITS);
    cl.push_clickable(Line::from(Span::styled(" [P] +500 XP", style)), DEV_ADD_XP);
    cl.push_clickable(Line::from(Span::styled(" [L] Set level 10", style)), DEV_SET_LEVEL_10);
    cl.push_clickable(Line::from(Span::styled(" [O] Unlock all upgrades", style)), DEV_UNLOCK_ALL);
    cl.push_clickable(
        Line::from(Span::styled(" [D] Close", Style::default().fg(Color::DarkGray))),
        TOGGLE_DEV_PANEL,
    );

    f.render_widget(Clear, panel);
    cl.register_targets(panel, &mut click_state.borrow_mut(), 1, 1, 0, 0);
    let widget = Paragraph::new(cl.into_lines()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta))
            .title(" 🛠 Dev "),
    );
    f.render_widget(widget, panel);
}

fn render_reset_prompt(f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let popup = centered_rect(34, 8, area);

    let mut cl = ClickableList::new();
    cl.push(Line::from(Span::styled(
        "Erase all progress and start over?",
        Style::default().fg(Color::White),
    )));
    cl.push(Line::from(""));
    cl.push_clickable(
        Line::from(Span::styled(
            "[Y] Yes, reset",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        RESET_CONFIRM,
    );
    cl.push_clickable(
        Line::from(Span::styled("[N] Keep playing", Style::default().fg(Color::Green))),
        RESET_CANCEL,
    );

    f.render_widget(Clear, popup);
    cl.register_targets(popup, &mut click_state.borrow_mut(), 1, 1, 0, popup.width.saturating_sub(2));
    let widget = Paragraph::new(cl.into_lines())
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title(" Reset "),
        );
    f.render_widget(widget, popup);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect::new(
        area.x + (area.width - w) / 2,
        area.y + (area.height - h) / 2,
        w,
        h,
    )
}
