//! Two-tab static pages: Plan, Design, Code, Test and Settings.

use super::TabSet;
use crate::catalog::ColorTag;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellTab {
    First,
    Second,
}

impl TabSet for ShellTab {
    const ALL: &'static [Self] = &[ShellTab::First, ShellTab::Second];

    // Shell pages supply their own titles.
    fn title(self) -> &'static str {
        match self {
            ShellTab::First => "1",
            ShellTab::Second => "2",
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct ShellItem {
    pub title: &'static str,
    pub detail: &'static str,
    pub tag: &'static str,
    pub color: ColorTag,
}

#[derive(Debug, PartialEq, Eq)]
pub struct ShellPage {
    pub title: &'static str,
    pub icon: &'static str,
    pub accent: ColorTag,
    pub action: Option<&'static str>,
    pub tabs: [&'static str; 2],
    pub items: [&'static [ShellItem]; 2],
}

impl ShellPage {
    pub fn items_for(&self, tab: ShellTab) -> &'static [ShellItem] {
        match tab {
            ShellTab::First => self.items[0],
            ShellTab::Second => self.items[1],
        }
    }
}

const fn item(
    title: &'static str,
    detail: &'static str,
    tag: &'static str,
    color: ColorTag,
) -> ShellItem {
    ShellItem {
        title,
        detail,
        tag,
        color,
    }
}

pub static PLAN: ShellPage = ShellPage {
    title: "Plan",
    icon: "⇄",
    accent: ColorTag::Indigo,
    action: Some("New Story"),
    tabs: ["Backlog", "Sprints"],
    items: [
        &[
            item("PROJ-130 Service catalog search", "8 points · API team", "Ready", ColorTag::Green),
            item("PROJ-131 Template versioning", "5 points · Platform", "Refining", ColorTag::Yellow),
            item("PROJ-132 SSO session refresh", "3 points · Identity", "Ready", ColorTag::Green),
        ],
        &[
            item("Sprint 24", "Mar 11 - Mar 22 · 42 points committed", "Active", ColorTag::Blue),
            item("Sprint 25", "Mar 25 - Apr 5 · planning", "Upcoming", ColorTag::Gray),
        ],
    ],
};

pub static DESIGN: ShellPage = ShellPage {
    title: "Design",
    icon: "✎",
    accent: ColorTag::Pink,
    action: Some("New Diagram"),
    tabs: ["Architecture", "Components"],
    items: [
        &[
            item("Platform context diagram", "Updated by Architecture Review", "Approved", ColorTag::Green),
            item("ETL pipeline topology", "Draft for data team", "Draft", ColorTag::Yellow),
        ],
        &[
            item("Button", "Design system v3", "Stable", ColorTag::Green),
            item("Data table", "Design system v3", "Beta", ColorTag::Orange),
            item("App launcher tile", "Design system v3", "Stable", ColorTag::Green),
        ],
    ],
};

pub static CODE: ShellPage = ShellPage {
    title: "Code",
    icon: "⌘",
    accent: ColorTag::Blue,
    action: Some("New Repository"),
    tabs: ["Repositories", "Pull Requests"],
    items: [
        &[
            item("platform-api", "Rust · main · 2 hours ago", "Passing", ColorTag::Green),
            item("dashboard-web", "TypeScript · main · 1 day ago", "Passing", ColorTag::Green),
            item("etl-jobs", "Python · develop · 3 days ago", "Failing", ColorTag::Red),
        ],
        &[
            item("#482 Add catalog filters", "platform-api · 2 approvals", "Open", ColorTag::Blue),
            item("#479 Fix token refresh", "dashboard-web · merged", "Merged", ColorTag::Purple),
        ],
    ],
};

pub static TEST: ShellPage = ShellPage {
    title: "Test",
    icon: "⚗",
    accent: ColorTag::Green,
    action: Some("Run Suite"),
    tabs: ["Suites", "Recent Runs"],
    items: [
        &[
            item("API contract tests", "214 cases", "Passing", ColorTag::Green),
            item("End-to-end smoke", "38 cases", "Flaky", ColorTag::Yellow),
            item("Load baseline", "6 scenarios", "Passing", ColorTag::Green),
        ],
        &[
            item("Run 1893", "main · 4m 12s", "Passed", ColorTag::Green),
            item("Run 1892", "develop · 6m 40s", "Failed", ColorTag::Red),
        ],
    ],
};

pub static SETTINGS: ShellPage = ShellPage {
    title: "Settings",
    icon: "⚙",
    accent: ColorTag::Gray,
    action: None,
    tabs: ["Profile", "Notifications"],
    items: [
        &[
            item("Display name", "Platform Developer", "Editable", ColorTag::Gray),
            item("Team", "Developer Experience", "Managed", ColorTag::Gray),
            item("Time zone", "System default", "Editable", ColorTag::Gray),
        ],
        &[
            item("Deployment alerts", "Email and in-app", "On", ColorTag::Green),
            item("Weekly digest", "Monday 9:00 AM", "On", ColorTag::Green),
            item("Ticket mentions", "In-app only", "Off", ColorTag::Gray),
        ],
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_pages_have_items_per_tab() {
        for page in [&PLAN, &DESIGN, &CODE, &TEST, &SETTINGS] {
            assert!(!page.items_for(ShellTab::First).is_empty(), "{}", page.title);
            assert!(!page.items_for(ShellTab::Second).is_empty(), "{}", page.title);
        }
    }
}
