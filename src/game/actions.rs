//! Semantic action IDs for Code Clicker click targets.
//!
//! Registered during render and dispatched back through `InputEvent::Click`.

// ── Core ────────────────────────────────────────────────────────
pub const CLICK_COMMIT: u16 = 0;
pub const DISMISS_TOASTS: u16 = 1;

// ── Tab navigation ──────────────────────────────────────────────
pub const TAB_UPGRADES: u16 = 10;
pub const TAB_ACHIEVEMENTS: u16 = 11;
pub const TAB_STATS: u16 = 12;

// ── Upgrade purchase (base + catalog index) ─────────────────────
pub const BUY_UPGRADE_BASE: u16 = 100;

// ── Reset flow ──────────────────────────────────────────────────
pub const RESET_REQUEST: u16 = 500;
pub const RESET_CONFIRM: u16 = 501;
pub const RESET_CANCEL: u16 = 502;

// ── Developer panel ─────────────────────────────────────────────
pub const TOGGLE_DEV_PANEL: u16 = 600;
pub const DEV_ADD_1K_COMMITS: u16 = 601;
pub const DEV_ADD_1M_COMMITS: u16 = 602;
pub const DEV_ADD_XP: u16 = 603;
pub const DEV_SET_LEVEL_10: u16 = 604;
pub const DEV_UNLOCK_ALL: u16 = 605;

// ── Server save slot ────────────────────────────────────────────
pub const REMOTE_SAVE: u16 = 700;
pub const REMOTE_LOAD: u16 = 701;

/// Keyboard shortcut for buying the upgrade at each catalog index.
pub const UPGRADE_KEYS: &[char] = &[
    '1', '2', '3', '4', '5', '6', '7', '8', '9', '0', 'q', 'w', 'e', 'r',
];

/// Action ID for buying the upgrade at `index` in catalog order.
pub fn buy_upgrade_action(index: usize) -> u16 {
    BUY_UPGRADE_BASE + index as u16
}

/// Catalog index encoded in a buy action, if it is one.
pub fn upgrade_index(action_id: u16) -> Option<usize> {
    action_id
        .checked_sub(BUY_UPGRADE_BASE)
        .map(|i| i as usize)
        .filter(|&i| i < UPGRADE_KEYS.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::catalog;

    #[test]
    fn every_upgrade_has_a_key() {
        assert_eq!(UPGRADE_KEYS.len(), catalog::all_upgrades().len());
    }

    #[test]
    fn upgrade_keys_do_not_shadow_commands() {
        for cmd in ['c', ' ', 'u', 'a', 's', 'x', 'y', 'n', 'D'] {
            assert!(!UPGRADE_KEYS.contains(&cmd), "{cmd:?} is also an upgrade key");
        }
    }

    #[test]
    fn buy_action_round_trips_index() {
        for i in 0..UPGRADE_KEYS.len() {
            assert_eq!(upgrade_index(buy_upgrade_action(i)), Some(i));
        }
        assert_eq!(upgrade_index(TAB_STATS), None);
        assert_eq!(upgrade_index(RESET_REQUEST), None);
    }
}
