//! Code Clicker progression rules: pure functions over `GameState`.

use std::collections::BTreeMap;

use tracing::{debug, info};

use super::catalog::{self, AchievementCondition};
use super::state::{GameState, GameStatePatch, BASE_CLICK_POWER};

/// Price growth per owned unit.
pub const COST_GROWTH: f64 = 1.15;

/// Manual click: add click power to the balance.
pub fn click(state: &mut GameState) {
    let power = state.commits_per_click;
    state.commits += power;
    state.total_commits += power;
    state.total_clicks += 1;
}

/// Advance passive income and play time by `delta_seconds`.
///
/// Non-positive or non-finite deltas are ignored entirely, play time included.
pub fn tick(state: &mut GameState, delta_seconds: f64) {
    if !delta_seconds.is_finite() || delta_seconds <= 0.0 {
        return;
    }
    if state.commits_per_second > 0.0 {
        let gained = state.commits_per_second * delta_seconds;
        state.commits += gained;
        state.total_commits += gained;
    }
    state.play_time += delta_seconds;
}

/// `floor(base_cost × 1.15^owned)`.
pub fn calculate_upgrade_cost(base_cost: f64, owned: u32) -> f64 {
    (base_cost * COST_GROWTH.powf(owned as f64)).floor()
}

/// Price of the next unit of `upgrade_id`, or `None` for an unknown id.
pub fn upgrade_cost(state: &GameState, upgrade_id: &str) -> Option<f64> {
    let def = catalog::find_upgrade(upgrade_id)?;
    Some(calculate_upgrade_cost(def.base_cost, state.owned(upgrade_id)))
}

pub fn can_afford(state: &GameState, upgrade_id: &str) -> bool {
    upgrade_cost(state, upgrade_id).is_some_and(|cost| state.commits >= cost)
}

/// Try to buy one unit of an upgrade. Returns true if successful.
///
/// Unknown ids and insufficient funds leave the state untouched.
pub fn buy_upgrade(state: &mut GameState, upgrade_id: &str) -> bool {
    let Some(cost) = upgrade_cost(state, upgrade_id) else {
        return false;
    };
    if state.commits < cost {
        return false;
    }

    state.commits -= cost;
    *state.upgrades.entry(upgrade_id.to_string()).or_insert(0) += 1;
    recompute_derived(state);

    debug!(
        upgrade = upgrade_id,
        owned = state.owned(upgrade_id),
        cost,
        cps = state.commits_per_second,
        "upgrade purchased"
    );
    true
}

/// Total passive income for an ownership map.
pub fn recompute_cps(upgrades: &BTreeMap<String, u32>) -> f64 {
    catalog::all_upgrades()
        .iter()
        .map(|u| u.cps * owned_in(upgrades, u.id) as f64)
        .sum()
}

/// Click power for an ownership map: base 1 plus every click bonus.
pub fn recompute_click_power(upgrades: &BTreeMap<String, u32>) -> f64 {
    let bonus: f64 = catalog::all_upgrades()
        .iter()
        .map(|u| u.click_multiplier * owned_in(upgrades, u.id) as f64)
        .sum();
    BASE_CLICK_POWER + bonus
}

fn owned_in(upgrades: &BTreeMap<String, u32>, id: &str) -> u32 {
    upgrades.get(id).copied().unwrap_or(0)
}

/// Refresh CPS and click power from `upgrades`.
fn recompute_derived(state: &mut GameState) {
    state.commits_per_second = recompute_cps(&state.upgrades);
    state.commits_per_click = recompute_click_power(&state.upgrades);
}

/// Check all locked achievements and unlock the ones whose condition holds.
/// Returns the newly unlocked ids in catalog order.
pub fn check_achievements(state: &mut GameState) -> Vec<&'static str> {
    let newly: Vec<&'static str> = catalog::all_achievements()
        .iter()
        .filter(|a| !state.has_achievement(a.id))
        .filter(|a| condition_met(state, &a.condition))
        .map(|a| a.id)
        .collect();

    for id in &newly {
        info!(achievement = *id, "achievement unlocked");
        state.achievements.push((*id).to_string());
    }
    newly
}

fn condition_met(state: &GameState, condition: &AchievementCondition) -> bool {
    match condition {
        AchievementCondition::TotalClicks(n) => state.total_clicks >= *n,
        AchievementCondition::AnyUpgradeOwned => state.upgrades.values().any(|&c| c > 0),
        AchievementCondition::TotalCommits(n) => state.total_commits >= *n,
        AchievementCondition::OwnsAll(ids) => ids.iter().all(|id| state.owned(id) > 0),
        AchievementCondition::CommitsPerSecond(n) => state.commits_per_second >= *n,
        AchievementCondition::PlayTime(secs) => state.play_time >= *secs,
        AchievementCondition::OwnsEveryUpgrade => catalog::all_upgrades()
            .iter()
            .all(|u| state.owned(u.id) > 0),
    }
}

/// Start over from factory defaults.
pub fn reset(state: &mut GameState, now_ms: i64) {
    *state = GameState::new(now_ms);
    info!(started_at = now_ms, "game reset");
}

/// Merge an external partial state onto the current one.
///
/// CPS and click power are always re-derived from the resulting upgrades;
/// whatever the payload says about them is discarded.
pub fn load_state(state: &mut GameState, patch: GameStatePatch) {
    let GameStatePatch {
        commits,
        total_commits,
        commits_per_click: _,
        commits_per_second: _,
        upgrades,
        achievements,
        total_clicks,
        started_at,
        play_time,
        level,
        experience,
        last_saved,
    } = patch;

    if let Some(v) = commits {
        state.commits = v;
    }
    if let Some(v) = total_commits {
        state.total_commits = v;
    }
    if let Some(v) = upgrades {
        state.upgrades = v;
    }
    if let Some(v) = achievements {
        let mut unique: Vec<String> = Vec::with_capacity(v.len());
        for id in v {
            if !unique.contains(&id) {
                unique.push(id);
            }
        }
        state.achievements = unique;
    }
    if let Some(v) = total_clicks {
        state.total_clicks = v;
    }
    if let Some(v) = started_at {
        state.started_at = v;
    }
    if let Some(v) = play_time {
        state.play_time = v;
    }
    if let Some(v) = level {
        state.level = v;
    }
    if let Some(v) = experience {
        state.experience = v;
    }
    if last_saved.is_some() {
        state.last_saved = last_saved;
    }

    recompute_derived(state);
    info!(
        commits = state.commits,
        cps = state.commits_per_second,
        achievements = state.achievements.len(),
        "state loaded"
    );
}

/// XP needed to finish `level`: `floor(100 × 1.5^(level - 1))`.
pub fn xp_for_level(level: u32) -> f64 {
    (100.0 * 1.5_f64.powf(level as f64 - 1.0)).floor()
}

/// Fraction of the current level completed, for the XP bar.
pub fn level_progress(state: &GameState) -> f64 {
    let needed = xp_for_level(state.level);
    if needed > 0.0 {
        (state.experience / needed).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

// ── Developer panel ─────────────────────────────────────────────

pub fn dev_add_commits(state: &mut GameState, amount: f64) {
    if !amount.is_finite() || amount <= 0.0 {
        return;
    }
    state.commits += amount;
    state.total_commits += amount;
}

/// Add XP, levelling up as many times as the amount covers.
pub fn dev_add_xp(state: &mut GameState, amount: f64) {
    if !amount.is_finite() || amount <= 0.0 {
        return;
    }
    state.experience += amount;
    loop {
        let needed = xp_for_level(state.level);
        if state.experience < needed || state.level == u32::MAX {
            break;
        }
        state.experience -= needed;
        state.level += 1;
        info!(level = state.level, "level up");
    }
}

pub fn dev_set_level(state: &mut GameState, level: u32) {
    state.level = level.max(1);
    state.experience = 0.0;
}

/// Give one of every upgrade not yet owned.
pub fn dev_unlock_all_upgrades(state: &mut GameState) {
    for u in catalog::all_upgrades() {
        let owned = state.upgrades.entry(u.id.to_string()).or_insert(0);
        if *owned == 0 {
            *owned = 1;
        }
    }
    recompute_derived(state);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh() -> GameState {
        GameState::new(0)
    }

    fn with_upgrades(pairs: &[(&str, u32)]) -> GameState {
        let mut state = fresh();
        for (id, count) in pairs {
            state.upgrades.insert((*id).to_string(), *count);
        }
        recompute_derived(&mut state);
        state
    }

    #[test]
    fn click_adds_commits() {
        let mut state = fresh();
        click(&mut state);
        assert_eq!(state.commits, 1.0);
        assert_eq!(state.total_commits, 1.0);
        assert_eq!(state.total_clicks, 1);
    }

    #[test]
    fn click_respects_per_click() {
        let mut state = fresh();
        state.commits_per_click = 5.0;
        click(&mut state);
        assert!((state.commits - 5.0).abs() < 0.001);
    }

    #[test]
    fn tick_accrues_passive_income() {
        let mut state = with_upgrades(&[("hello-world", 1)]);
        tick(&mut state, 10.0);
        assert!((state.commits - 1.0).abs() < 1e-9);
        assert!((state.total_commits - 1.0).abs() < 1e-9);
        assert!((state.play_time - 10.0).abs() < 1e-9);
    }

    #[test]
    fn tick_without_cps_still_counts_play_time() {
        let mut state = fresh();
        tick(&mut state, 0.1);
        assert_eq!(state.commits, 0.0);
        assert!((state.play_time - 0.1).abs() < 1e-12);
    }

    #[test]
    fn tick_ignores_non_positive_delta() {
        let mut state = with_upgrades(&[("html", 2)]);
        let before = state.clone();
        tick(&mut state, 0.0);
        tick(&mut state, -5.0);
        tick(&mut state, f64::NAN);
        assert_eq!(state, before);
    }

    #[test]
    fn cost_matches_floor_of_exponential() {
        let expected = [(0, 15.0), (1, 17.0), (2, 19.0), (5, 30.0), (10, 60.0), (50, 16254.0)];
        for (owned, cost) in expected {
            assert_eq!(calculate_upgrade_cost(15.0, owned), cost, "owned={owned}");
        }
    }

    #[test]
    fn cost_floor_follows_float_product() {
        // 100 × 1.15 is 114.99999999999999 in binary floating point.
        assert_eq!(calculate_upgrade_cost(100.0, 1), 114.0);
    }

    #[test]
    fn upgrade_cost_uses_owned_count() {
        let state = with_upgrades(&[("hello-world", 2)]);
        assert_eq!(upgrade_cost(&state, "hello-world"), Some(19.0));
        assert_eq!(upgrade_cost(&state, "html"), Some(100.0));
    }

    #[test]
    fn unknown_upgrade_is_unreachable() {
        let mut state = fresh();
        state.commits = 1e30;
        assert_eq!(upgrade_cost(&state, "cobol"), None);
        assert!(!can_afford(&state, "cobol"));
        let before = state.clone();
        assert!(!buy_upgrade(&mut state, "cobol"));
        assert_eq!(state, before);
    }

    #[test]
    fn can_afford_at_exact_price() {
        let mut state = fresh();
        state.commits = 15.0;
        assert!(can_afford(&state, "hello-world"));
        state.commits = 14.999;
        assert!(!can_afford(&state, "hello-world"));
    }

    #[test]
    fn first_purchase_scenario() {
        let mut state = fresh();
        click(&mut state);
        assert_eq!(state.commits, 1.0);
        assert_eq!(state.total_commits, 1.0);
        assert_eq!(state.total_clicks, 1);

        let before = state.clone();
        assert!(!buy_upgrade(&mut state, "hello-world"));
        assert_eq!(state, before);

        for _ in 0..15 {
            click(&mut state);
        }
        assert_eq!(state.commits, 16.0);
        assert!(buy_upgrade(&mut state, "hello-world"));
        assert_eq!(state.commits, 1.0);
        assert_eq!(state.owned("hello-world"), 1);
        assert!((state.commits_per_second - 0.1).abs() < 1e-12);
        // spending never touches the lifetime total
        assert_eq!(state.total_commits, 16.0);
    }

    #[test]
    fn buy_increments_cost_for_next_unit() {
        let mut state = fresh();
        state.commits = 1_000.0;
        assert!(buy_upgrade(&mut state, "hello-world"));
        assert_eq!(upgrade_cost(&state, "hello-world"), Some(17.0));
        assert!(buy_upgrade(&mut state, "hello-world"));
        assert_eq!(state.owned("hello-world"), 2);
        assert!((state.commits - (1_000.0 - 15.0 - 17.0)).abs() < 1e-9);
    }

    #[test]
    fn click_upgrade_raises_click_power() {
        let mut state = fresh();
        state.commits = 1_000.0;
        assert!(buy_upgrade(&mut state, "cursor"));
        assert_eq!(state.commits_per_click, 2.0);
        assert!(buy_upgrade(&mut state, "better-cursor"));
        assert_eq!(state.commits_per_click, 5.0);
        assert_eq!(state.commits_per_second, 0.0);
    }

    #[test]
    fn recompute_cps_sums_catalog() {
        let mut upgrades = BTreeMap::new();
        upgrades.insert("hello-world".to_string(), 10);
        upgrades.insert("css".to_string(), 3);
        upgrades.insert("not-in-catalog".to_string(), 99);
        let cps = recompute_cps(&upgrades);
        assert!((cps - (10.0 * 0.1 + 3.0 * 2.0)).abs() < 1e-9);
    }

    #[test]
    fn recompute_cps_is_history_independent() {
        let mut bought = fresh();
        bought.commits = 10_000.0;
        buy_upgrade(&mut bought, "html");
        buy_upgrade(&mut bought, "hello-world");
        buy_upgrade(&mut bought, "html");

        let direct = with_upgrades(&[("html", 2), ("hello-world", 1)]);
        assert_eq!(recompute_cps(&bought.upgrades), recompute_cps(&direct.upgrades));
        assert_eq!(bought.commits_per_second, direct.commits_per_second);
    }

    #[test]
    fn recompute_click_power_defaults_to_base() {
        assert_eq!(recompute_click_power(&BTreeMap::new()), 1.0);
        let state = with_upgrades(&[("auto-clicker", 2), ("html", 5)]);
        assert_eq!(state.commits_per_click, 21.0);
    }

    #[test]
    fn first_commit_unlocks_exactly_once() {
        let mut state = fresh();
        assert!(check_achievements(&mut state).is_empty());
        click(&mut state);
        assert_eq!(check_achievements(&mut state), vec!["first-commit"]);
        assert!(check_achievements(&mut state).is_empty());
        assert_eq!(state.achievements, vec!["first-commit".to_string()]);
    }

    #[test]
    fn achievements_unlock_in_catalog_order() {
        let mut state = with_upgrades(&[("hello-world", 1)]);
        state.total_clicks = 1;
        state.total_commits = 1_500.0;
        let unlocked = check_achievements(&mut state);
        assert_eq!(
            unlocked,
            vec!["first-commit", "hello-world-ach", "100-commits", "1000-commits"]
        );
    }

    #[test]
    fn full_stack_requires_all_seven() {
        let mut pairs: Vec<(&str, u32)> =
            catalog::FULL_STACK_UPGRADES.iter().map(|id| (*id, 1)).collect();
        let last = pairs.pop().unwrap();
        pairs.push(("cursor", 4));
        pairs.push(("docker", 1));

        let mut state = with_upgrades(&pairs);
        check_achievements(&mut state);
        assert!(!state.has_achievement("full-stack"));

        state.upgrades.insert(last.0.to_string(), 1);
        let unlocked = check_achievements(&mut state);
        assert!(unlocked.contains(&"full-stack"));
    }

    #[test]
    fn full_stack_ignores_other_upgrades() {
        let pairs: Vec<(&str, u32)> =
            catalog::FULL_STACK_UPGRADES.iter().map(|id| (*id, 1)).collect();
        let mut state = with_upgrades(&pairs);
        check_achievements(&mut state);
        assert!(state.has_achievement("full-stack"));
        assert!(!state.has_achievement("all-upgrades"));
    }

    #[test]
    fn cps_achievements() {
        let mut state = with_upgrades(&[("npm-install", 1)]);
        check_achievements(&mut state);
        assert!(state.has_achievement("10x-engineer"));
        assert!(!state.has_achievement("100x-engineer"));

        let mut state = with_upgrades(&[("typescript", 1)]);
        check_achievements(&mut state);
        assert!(state.has_achievement("100x-engineer"));
    }

    #[test]
    fn click_addict_and_open_source_hero() {
        let mut state = fresh();
        state.total_clicks = 999;
        state.play_time = 3_599.9;
        check_achievements(&mut state);
        assert!(!state.has_achievement("click-addict"));
        assert!(!state.has_achievement("open-source-hero"));

        state.total_clicks = 1_000;
        tick(&mut state, 0.1);
        check_achievements(&mut state);
        assert!(state.has_achievement("click-addict"));
        assert!(state.has_achievement("open-source-hero"));
    }

    #[test]
    fn all_upgrades_achievement() {
        let mut state = fresh();
        dev_unlock_all_upgrades(&mut state);
        let unlocked = check_achievements(&mut state);
        assert!(unlocked.contains(&"all-upgrades"));
        assert!(unlocked.contains(&"full-stack"));
    }

    #[test]
    fn commit_milestones() {
        let mut state = fresh();
        state.total_commits = 1_000_000.0;
        let unlocked = check_achievements(&mut state);
        for id in [
            "100-commits",
            "1000-commits",
            "10000-commits",
            "100000-commits",
            "million-commits",
        ] {
            assert!(unlocked.contains(&id), "missing {id}");
        }
    }

    #[test]
    fn reset_restores_defaults_with_new_start() {
        let mut state = with_upgrades(&[("react", 3)]);
        state.commits = 500.0;
        state.achievements.push("first-commit".into());
        reset(&mut state, 99);
        assert_eq!(state, GameState::new(99));
    }

    #[test]
    fn load_state_recomputes_cps_from_upgrades() {
        let mut state = fresh();
        let patch = GameStatePatch {
            commits: Some(42.0),
            upgrades: Some(BTreeMap::from([("html".to_string(), 2)])),
            commits_per_second: Some(9_999.0),
            commits_per_click: Some(9_999.0),
            ..GameStatePatch::default()
        };
        load_state(&mut state, patch);
        assert_eq!(state.commits, 42.0);
        assert!((state.commits_per_second - 1.0).abs() < 1e-9);
        assert_eq!(state.commits_per_click, 1.0);
    }

    #[test]
    fn load_state_keeps_missing_fields() {
        let mut state = with_upgrades(&[("css", 1)]);
        state.total_clicks = 50;
        state.play_time = 12.0;
        load_state(
            &mut state,
            GameStatePatch {
                commits: Some(3.0),
                ..GameStatePatch::default()
            },
        );
        assert_eq!(state.total_clicks, 50);
        assert_eq!(state.play_time, 12.0);
        assert_eq!(state.owned("css"), 1);
        assert!((state.commits_per_second - 2.0).abs() < 1e-9);
    }

    #[test]
    fn load_state_drops_duplicate_achievements() {
        let mut state = fresh();
        load_state(
            &mut state,
            GameStatePatch {
                achievements: Some(vec![
                    "first-commit".into(),
                    "100-commits".into(),
                    "first-commit".into(),
                ]),
                ..GameStatePatch::default()
            },
        );
        assert_eq!(state.achievements, vec!["first-commit", "100-commits"]);
    }

    #[test]
    fn load_full_state_round_trips() {
        let mut original = with_upgrades(&[("docker", 2), ("cursor", 1)]);
        original.commits = 123.0;
        original.total_commits = 4_567.0;
        original.total_clicks = 89;
        original.level = 3;
        original.experience = 12.0;
        original.last_saved = Some(1_000);

        let mut restored = fresh();
        load_state(&mut restored, GameStatePatch::from(original.clone()));
        assert_eq!(restored, original);
    }

    #[test]
    fn xp_thresholds() {
        assert_eq!(xp_for_level(1), 100.0);
        assert_eq!(xp_for_level(2), 150.0);
        assert_eq!(xp_for_level(3), 225.0);
        assert_eq!(xp_for_level(4), 337.0);
        assert_eq!(xp_for_level(10), 3_844.0);
    }

    #[test]
    fn level_progress_is_fraction_of_threshold() {
        let mut state = fresh();
        state.experience = 50.0;
        assert!((level_progress(&state) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn dev_add_xp_levels_up_with_carry() {
        let mut state = fresh();
        dev_add_xp(&mut state, 500.0);
        // 500 - 100 - 150 - 225 = 25, short of the 337 needed for level 4
        assert_eq!(state.level, 4);
        assert!((state.experience - 25.0).abs() < 1e-9);
    }

    #[test]
    fn dev_add_commits_counts_toward_total() {
        let mut state = fresh();
        dev_add_commits(&mut state, 1_000.0);
        assert_eq!(state.commits, 1_000.0);
        assert_eq!(state.total_commits, 1_000.0);
        dev_add_commits(&mut state, -5.0);
        assert_eq!(state.commits, 1_000.0);
    }

    #[test]
    fn dev_set_level_clamps_to_one() {
        let mut state = fresh();
        state.experience = 40.0;
        dev_set_level(&mut state, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.experience, 0.0);
        dev_set_level(&mut state, 10);
        assert_eq!(state.level, 10);
    }

    #[test]
    fn dev_unlock_all_keeps_higher_counts() {
        let mut state = with_upgrades(&[("html", 5)]);
        dev_unlock_all_upgrades(&mut state);
        assert_eq!(state.owned("html"), 5);
        assert_eq!(state.owned("ai-copilot"), 1);
        assert_eq!(state.commits_per_click, 1.0 + 1.0 + 3.0 + 10.0);
    }
}
