//! Code Clicker: write code, earn commits, buy your way up the tech stack.

pub mod actions;
pub mod catalog;
pub mod format;
pub mod logic;
pub mod remote;
pub mod render;
pub mod save;
pub mod simulator;
pub mod state;

use std::collections::VecDeque;

use tracing::{info, warn};

use crate::input::InputEvent;
use crate::time::{epoch_millis, TICK_SECONDS};

use remote::{RemoteError, RemoteOp};
use state::{GameState, GameStatePatch};

/// How long an achievement toast stays on screen (3 s).
const TOAST_TICKS: u32 = 30;
/// At most this many toasts are queued; older ones are dropped.
const MAX_TOASTS: usize = 3;
const CLICK_FLASH_TICKS: u32 = 2;
const PURCHASE_FLASH_TICKS: u32 = 5;

/// Developer panel amounts.
const DEV_SMALL_COMMITS: f64 = 1_000.0;
const DEV_LARGE_COMMITS: f64 = 1_000_000.0;
const DEV_XP: f64 = 500.0;
const DEV_LEVEL: u32 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tab {
    Upgrades,
    Achievements,
    Stats,
}

/// Achievement unlock notification.
#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub icon: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub ticks_left: u32,
}

/// The running game: engine state plus everything only the screen cares about.
pub struct CodeClicker {
    pub state: GameState,
    pub tab: Tab,
    pub toasts: VecDeque<Toast>,
    pub click_flash: u32,
    pub purchase_flash: u32,
    pub show_dev_panel: bool,
    /// Reset was requested and waits for a confirming input.
    pub confirm_reset: bool,
    /// Frame counter for cosmetic animation.
    pub anim_frame: u32,
    /// Outcome of the last server save/load, shown on the stats tab.
    pub remote_status: Option<String>,
    remote_request: Option<RemoteOp>,
    remote_busy: bool,
    ticks_since_save: u32,
    save_requested: bool,
}

impl CodeClicker {
    pub fn new() -> Self {
        Self::with_state(GameState::new(epoch_millis()))
    }

    pub fn with_state(state: GameState) -> Self {
        Self {
            state,
            tab: Tab::Upgrades,
            toasts: VecDeque::new(),
            click_flash: 0,
            purchase_flash: 0,
            show_dev_panel: false,
            confirm_reset: false,
            anim_frame: 0,
            remote_status: None,
            remote_request: None,
            remote_busy: false,
            ticks_since_save: 0,
            save_requested: false,
        }
    }

    /// Handle an input event. Returns true if the event was consumed.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        if self.confirm_reset {
            return self.handle_reset_prompt(event);
        }
        match event {
            InputEvent::Key(c) => self.handle_key(*c),
            InputEvent::Click(id) => self.handle_action(*id),
        }
    }

    fn handle_reset_prompt(&mut self, event: &InputEvent) -> bool {
        let confirmed = matches!(
            event,
            InputEvent::Key('y') | InputEvent::Key('Y') | InputEvent::Click(actions::RESET_CONFIRM)
        );
        self.confirm_reset = false;
        if confirmed {
            self.reset();
        }
        true
    }

    fn handle_key(&mut self, key: char) -> bool {
        let action = match key {
            'c' | ' ' => actions::CLICK_COMMIT,
            'u' => actions::TAB_UPGRADES,
            'a' => actions::TAB_ACHIEVEMENTS,
            's' => actions::TAB_STATS,
            'x' => actions::RESET_REQUEST,
            'D' => actions::TOGGLE_DEV_PANEL,
            'S' => actions::REMOTE_SAVE,
            'L' => actions::REMOTE_LOAD,
            'k' if self.show_dev_panel => actions::DEV_ADD_1K_COMMITS,
            'm' if self.show_dev_panel => actions::DEV_ADD_1M_COMMITS,
            'p' if self.show_dev_panel => actions::DEV_ADD_XP,
            'l' if self.show_dev_panel => actions::DEV_SET_LEVEL_10,
            'o' if self.show_dev_panel => actions::DEV_UNLOCK_ALL,
            _ => match actions::UPGRADE_KEYS.iter().position(|&k| k == key) {
                Some(idx) => actions::buy_upgrade_action(idx),
                None => return false,
            },
        };
        self.handle_action(action)
    }

    fn handle_action(&mut self, action_id: u16) -> bool {
        match action_id {
            actions::CLICK_COMMIT => {
                logic::click(&mut self.state);
                self.click_flash = CLICK_FLASH_TICKS;
                self.unlock_achievements();
            }
            actions::DISMISS_TOASTS => self.toasts.clear(),
            actions::TAB_UPGRADES => self.tab = Tab::Upgrades,
            actions::TAB_ACHIEVEMENTS => self.tab = Tab::Achievements,
            actions::TAB_STATS => self.tab = Tab::Stats,
            actions::RESET_REQUEST => self.confirm_reset = true,
            actions::RESET_CONFIRM | actions::RESET_CANCEL => return false,
            actions::TOGGLE_DEV_PANEL => self.show_dev_panel = !self.show_dev_panel,
            actions::REMOTE_SAVE => self.request_remote(RemoteOp::Save),
            actions::REMOTE_LOAD => self.request_remote(RemoteOp::Load),
            dev if self.show_dev_panel && is_dev_action(dev) => self.run_dev_action(dev),
            id => {
                let Some(def) = actions::upgrade_index(id)
                    .and_then(|idx| catalog::all_upgrades().get(idx))
                else {
                    return false;
                };
                if logic::buy_upgrade(&mut self.state, def.id) {
                    self.purchase_flash = PURCHASE_FLASH_TICKS;
                    self.save_requested = true;
                    self.unlock_achievements();
                }
            }
        }
        true
    }

    fn run_dev_action(&mut self, action_id: u16) {
        match action_id {
            actions::DEV_ADD_1K_COMMITS => logic::dev_add_commits(&mut self.state, DEV_SMALL_COMMITS),
            actions::DEV_ADD_1M_COMMITS => logic::dev_add_commits(&mut self.state, DEV_LARGE_COMMITS),
            actions::DEV_ADD_XP => logic::dev_add_xp(&mut self.state, DEV_XP),
            actions::DEV_SET_LEVEL_10 => logic::dev_set_level(&mut self.state, DEV_LEVEL),
            actions::DEV_UNLOCK_ALL => {
                logic::dev_unlock_all_upgrades(&mut self.state);
                self.save_requested = true;
            }
            _ => return,
        }
        info!(action = action_id, "dev panel action");
        self.unlock_achievements();
    }

    /// Advance by `delta_ticks` fixed steps of `TICK_SECONDS` each.
    pub fn tick(&mut self, delta_ticks: u32) {
        if delta_ticks == 0 {
            return;
        }
        for _ in 0..delta_ticks {
            logic::tick(&mut self.state, TICK_SECONDS);
        }
        self.unlock_achievements();

        self.anim_frame = self.anim_frame.wrapping_add(delta_ticks);
        self.click_flash = self.click_flash.saturating_sub(delta_ticks);
        self.purchase_flash = self.purchase_flash.saturating_sub(delta_ticks);
        for toast in self.toasts.iter_mut() {
            toast.ticks_left = toast.ticks_left.saturating_sub(delta_ticks);
        }
        self.toasts.retain(|t| t.ticks_left > 0);

        self.ticks_since_save += delta_ticks;
        if self.ticks_since_save >= save::AUTOSAVE_INTERVAL {
            self.ticks_since_save = 0;
            self.save_requested = true;
        }
    }

    fn unlock_achievements(&mut self) {
        for id in logic::check_achievements(&mut self.state) {
            let Some(def) = catalog::find_achievement(id) else {
                continue;
            };
            if self.toasts.len() >= MAX_TOASTS {
                self.toasts.pop_front();
            }
            self.toasts.push_back(Toast {
                icon: def.icon,
                title: def.name,
                description: def.description,
                ticks_left: TOAST_TICKS,
            });
        }
    }

    fn reset(&mut self) {
        logic::reset(&mut self.state, epoch_millis());
        self.toasts.clear();
        self.click_flash = 0;
        self.purchase_flash = 0;
        self.save_requested = true;
    }

    /// Merge a restored save into the running game.
    pub fn load(&mut self, patch: GameStatePatch) {
        logic::load_state(&mut self.state, patch);
        self.ticks_since_save = 0;
        self.save_requested = true;
    }

    fn request_remote(&mut self, op: RemoteOp) {
        if self.remote_busy {
            return;
        }
        self.remote_request = Some(op);
    }

    /// The pending server operation, if any. While it runs, further
    /// requests are ignored until the matching `finish_remote_*` call.
    pub fn take_remote_request(&mut self) -> Option<RemoteOp> {
        let op = self.remote_request.take()?;
        self.remote_busy = true;
        self.remote_status = Some(match op {
            RemoteOp::Save => "Saving to server...".to_owned(),
            RemoteOp::Load => "Loading from server...".to_owned(),
        });
        Some(op)
    }

    pub fn finish_remote_save(&mut self, result: Result<i64, RemoteError>) {
        self.remote_busy = false;
        self.remote_status = Some(match result {
            Ok(_) => "Saved to server".to_owned(),
            Err(e) => {
                warn!(error = %e, "remote save failed");
                format!("Save failed: {e}")
            }
        });
    }

    /// Apply a server load. Derived fields are recomputed by `load`, so
    /// whatever CPS or click power the server sent is ignored.
    pub fn finish_remote_load(&mut self, result: Result<Option<GameStatePatch>, RemoteError>) {
        self.remote_busy = false;
        self.remote_status = Some(match result {
            Ok(Some(patch)) => {
                self.load(patch);
                "Loaded from server".to_owned()
            }
            Ok(None) => "No save on server".to_owned(),
            Err(e) => {
                warn!(error = %e, "remote load failed");
                format!("Load failed: {e}")
            }
        });
    }

    /// True once per pending save; the caller persists `state` and stamps
    /// `last_saved` via [`CodeClicker::mark_saved`].
    pub fn take_save_request(&mut self) -> bool {
        std::mem::take(&mut self.save_requested)
    }

    pub fn mark_saved(&mut self, now_ms: i64) {
        self.state.last_saved = Some(now_ms);
        self.ticks_since_save = 0;
    }
}

impl Default for CodeClicker {
    fn default() -> Self {
        Self::new()
    }
}

fn is_dev_action(action_id: u16) -> bool {
    (actions::DEV_ADD_1K_COMMITS..=actions::DEV_UNLOCK_ALL).contains(&action_id)
}
