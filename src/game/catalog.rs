//! Static upgrade and achievement catalogs.
//!
//! Both tables are immutable for the lifetime of the process. Ids are the
//! keys used in `GameState::upgrades` / `GameState::achievements` and in
//! save files, so they must never change once shipped.

/// A purchasable upgrade.
#[derive(Clone, Debug, PartialEq)]
pub struct UpgradeDef {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    /// Price of the first unit.
    pub base_cost: f64,
    /// Passive commits per second contributed per owned unit.
    pub cps: f64,
    /// Click power added per owned unit (0 for pure CPS upgrades).
    pub click_multiplier: f64,
}

/// What has to be true for an achievement to unlock.
#[derive(Clone, Debug, PartialEq)]
pub enum AchievementCondition {
    /// `total_clicks >= n`
    TotalClicks(u64),
    /// At least one unit of any upgrade.
    AnyUpgradeOwned,
    /// `total_commits >= n`
    TotalCommits(f64),
    /// Every listed upgrade owned at least once.
    OwnsAll(&'static [&'static str]),
    /// `commits_per_second >= n`
    CommitsPerSecond(f64),
    /// `play_time >= n` seconds.
    PlayTime(f64),
    /// Every catalog upgrade owned at least once.
    OwnsEveryUpgrade,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AchievementDef {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub condition: AchievementCondition,
}

/// Upgrades required for the "full-stack" achievement.
pub const FULL_STACK_UPGRADES: &[&str] = &[
    "hello-world",
    "html",
    "css",
    "script",
    "jquery",
    "npm-install",
    "react",
];

static UPGRADES: &[UpgradeDef] = &[
    // ── Click power ─────────────────────────────────────────────
    UpgradeDef {
        id: "cursor",
        name: "Cursor",
        description: "Double click power",
        icon: "👆",
        base_cost: 50.0,
        cps: 0.0,
        click_multiplier: 1.0,
    },
    UpgradeDef {
        id: "better-cursor",
        name: "Better Cursor",
        description: "+3 click power",
        icon: "✌️",
        base_cost: 500.0,
        cps: 0.0,
        click_multiplier: 3.0,
    },
    UpgradeDef {
        id: "auto-clicker",
        name: "Auto Clicker",
        description: "+10 click power",
        icon: "🖱️",
        base_cost: 5_000.0,
        cps: 0.0,
        click_multiplier: 10.0,
    },
    // ── Passive income ──────────────────────────────────────────
    UpgradeDef {
        id: "hello-world",
        name: "Hello World",
        description: "console.log(\"Hello World\")",
        icon: "👋",
        base_cost: 15.0,
        cps: 0.1,
        click_multiplier: 0.0,
    },
    UpgradeDef {
        id: "html",
        name: "HTML",
        description: "Static <div> markup",
        icon: "📄",
        base_cost: 100.0,
        cps: 0.5,
        click_multiplier: 0.0,
    },
    UpgradeDef {
        id: "css",
        name: "CSS",
        description: "Styles and beauty",
        icon: "🎨",
        base_cost: 500.0,
        cps: 2.0,
        click_multiplier: 0.0,
    },
    UpgradeDef {
        id: "script",
        name: "<script>",
        description: "Interactive pages",
        icon: "⚡",
        base_cost: 2_000.0,
        cps: 8.0,
        click_multiplier: 0.0,
    },
    UpgradeDef {
        id: "jquery",
        name: "jQuery",
        description: "$(document).ready()",
        icon: "💲",
        base_cost: 10_000.0,
        cps: 30.0,
        click_multiplier: 0.0,
    },
    UpgradeDef {
        id: "npm-install",
        name: "npm install",
        description: "node_modules to infinity",
        icon: "📦",
        base_cost: 50_000.0,
        cps: 100.0,
        click_multiplier: 0.0,
    },
    UpgradeDef {
        id: "react",
        name: "React",
        description: "Components and hooks",
        icon: "⚛️",
        base_cost: 250_000.0,
        cps: 400.0,
        click_multiplier: 0.0,
    },
    UpgradeDef {
        id: "typescript",
        name: "TypeScript",
        description: "Type safety above all",
        icon: "📘",
        base_cost: 1_000_000.0,
        cps: 1_500.0,
        click_multiplier: 0.0,
    },
    UpgradeDef {
        id: "docker",
        name: "Docker",
        description: "Containerize everything",
        icon: "🐳",
        base_cost: 5_000_000.0,
        cps: 5_000.0,
        click_multiplier: 0.0,
    },
    UpgradeDef {
        id: "kubernetes",
        name: "Kubernetes",
        description: "Container orchestration",
        icon: "☸️",
        base_cost: 25_000_000.0,
        cps: 20_000.0,
        click_multiplier: 0.0,
    },
    UpgradeDef {
        id: "ai-copilot",
        name: "AI Copilot",
        description: "The AI writes the code for you",
        icon: "🤖",
        base_cost: 100_000_000.0,
        cps: 100_000.0,
        click_multiplier: 0.0,
    },
];

static ACHIEVEMENTS: &[AchievementDef] = &[
    AchievementDef {
        id: "first-commit",
        name: "First Commit",
        description: "Make your first click",
        icon: "🎉",
        condition: AchievementCondition::TotalClicks(1),
    },
    AchievementDef {
        id: "hello-world-ach",
        name: "Hello World",
        description: "Buy your first upgrade",
        icon: "👋",
        condition: AchievementCondition::AnyUpgradeOwned,
    },
    AchievementDef {
        id: "100-commits",
        name: "100 Commits",
        description: "Earn 100 commits",
        icon: "💯",
        condition: AchievementCondition::TotalCommits(100.0),
    },
    AchievementDef {
        id: "1000-commits",
        name: "1K Commits",
        description: "Earn 1,000 commits",
        icon: "🔥",
        condition: AchievementCondition::TotalCommits(1_000.0),
    },
    AchievementDef {
        id: "10000-commits",
        name: "10K Commits",
        description: "Earn 10,000 commits",
        icon: "💪",
        condition: AchievementCondition::TotalCommits(10_000.0),
    },
    AchievementDef {
        id: "100000-commits",
        name: "100K Commits",
        description: "Earn 100,000 commits",
        icon: "🚀",
        condition: AchievementCondition::TotalCommits(100_000.0),
    },
    AchievementDef {
        id: "million-commits",
        name: "Senior Developer",
        description: "Earn 1,000,000 commits",
        icon: "👨‍💻",
        condition: AchievementCondition::TotalCommits(1_000_000.0),
    },
    AchievementDef {
        id: "full-stack",
        name: "Full Stack",
        description: "Own every upgrade up to React",
        icon: "🏆",
        condition: AchievementCondition::OwnsAll(FULL_STACK_UPGRADES),
    },
    AchievementDef {
        id: "10x-engineer",
        name: "10x Engineer",
        description: "Reach 100 CPS",
        icon: "⚡",
        condition: AchievementCondition::CommitsPerSecond(100.0),
    },
    AchievementDef {
        id: "100x-engineer",
        name: "100x Engineer",
        description: "Reach 1,000 CPS",
        icon: "🌟",
        condition: AchievementCondition::CommitsPerSecond(1_000.0),
    },
    AchievementDef {
        id: "click-addict",
        name: "Click Addict",
        description: "Click 1,000 times",
        icon: "🖱️",
        condition: AchievementCondition::TotalClicks(1_000),
    },
    AchievementDef {
        id: "open-source-hero",
        name: "Open Source Hero",
        description: "Play for one hour",
        icon: "❤️",
        condition: AchievementCondition::PlayTime(3_600.0),
    },
    AchievementDef {
        id: "all-upgrades",
        name: "Tech Lead",
        description: "Own every kind of upgrade",
        icon: "👑",
        condition: AchievementCondition::OwnsEveryUpgrade,
    },
];

/// All upgrades in display order.
pub fn all_upgrades() -> &'static [UpgradeDef] {
    UPGRADES
}

/// All achievements in unlock-check order.
pub fn all_achievements() -> &'static [AchievementDef] {
    ACHIEVEMENTS
}

pub fn find_upgrade(id: &str) -> Option<&'static UpgradeDef> {
    UPGRADES.iter().find(|u| u.id == id)
}

pub fn find_achievement(id: &str) -> Option<&'static AchievementDef> {
    ACHIEVEMENTS.iter().find(|a| a.id == id)
}

/// Upgrades that raise click power, in catalog order.
pub fn click_upgrades() -> impl Iterator<Item = &'static UpgradeDef> {
    UPGRADES.iter().filter(|u| u.click_multiplier > 0.0)
}

/// Upgrades that produce passive income, in catalog order.
pub fn cps_upgrades() -> impl Iterator<Item = &'static UpgradeDef> {
    UPGRADES.iter().filter(|u| u.cps > 0.0)
}
