//! Static navigation catalogs: header links, slide-in menu, app launcher.

use ratatui::style::{Color, Modifier, Style};

use crate::nav::NavTarget;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorTag {
    Blue,
    Purple,
    Green,
    Yellow,
    Red,
    Indigo,
    Pink,
    Gray,
    Cyan,
    Emerald,
    Orange,
    Sky,
    Violet,
}

impl ColorTag {
    #[cfg(test)]
    pub const ALL: [ColorTag; 13] = [
        ColorTag::Blue,
        ColorTag::Purple,
        ColorTag::Green,
        ColorTag::Yellow,
        ColorTag::Red,
        ColorTag::Indigo,
        ColorTag::Pink,
        ColorTag::Gray,
        ColorTag::Cyan,
        ColorTag::Emerald,
        ColorTag::Orange,
        ColorTag::Sky,
        ColorTag::Violet,
    ];

    pub fn color(self) -> Color {
        match self {
            ColorTag::Blue => Color::Blue,
            ColorTag::Purple => Color::Magenta,
            ColorTag::Green => Color::Green,
            ColorTag::Yellow => Color::Yellow,
            ColorTag::Red => Color::Red,
            ColorTag::Indigo => Color::Rgb(99, 102, 241),
            ColorTag::Pink => Color::Rgb(236, 72, 153),
            ColorTag::Gray => Color::Gray,
            ColorTag::Cyan => Color::Cyan,
            ColorTag::Emerald => Color::Rgb(16, 185, 129),
            ColorTag::Orange => Color::Rgb(249, 115, 22),
            ColorTag::Sky => Color::Rgb(14, 165, 233),
            ColorTag::Violet => Color::Rgb(139, 92, 246),
        }
    }

    /// Icon tile style for launcher entries.
    pub fn tile_style(self) -> Style {
        Style::default()
            .fg(self.color())
            .add_modifier(Modifier::BOLD)
    }
}

/// Static link destination; resolved to a [`NavTarget`] on selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Link {
    Path(&'static str),
    Url(&'static str),
}

impl Link {
    pub fn target(self) -> NavTarget {
        match self {
            Link::Path(path) => NavTarget::internal(path),
            Link::Url(url) => NavTarget::external(url),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MenuEntry {
    pub label: &'static str,
    pub icon: &'static str,
    pub link: Link,
    pub color: ColorTag,
}

const fn entry(label: &'static str, icon: &'static str, link: Link, color: ColorTag) -> MenuEntry {
    MenuEntry {
        label,
        icon,
        link,
        color,
    }
}

/// Top bar quick links, bound to keys 1-4.
pub static QUICK_LINKS: [MenuEntry; 4] = [
    entry("Catalog", "≡", Link::Url("https://google.com"), ColorTag::Gray),
    entry("Templates", "▤", Link::Url("https://google.com"), ColorTag::Gray),
    entry("Documentation", "▤", Link::Url("https://google.com"), ColorTag::Gray),
    entry("Explore", "◎", Link::Url("https://google.com"), ColorTag::Gray),
];

pub static PRIMARY_NAV: [MenuEntry; 6] = [
    entry("Plan", "⇄", Link::Path("/plan"), ColorTag::Indigo),
    entry("Design", "✎", Link::Path("/design"), ColorTag::Pink),
    entry("Code", "⌘", Link::Path("/code"), ColorTag::Blue),
    entry("Test", "⚗", Link::Path("/test"), ColorTag::Green),
    entry("Deploy", "⇪", Link::Path("/deploy"), ColorTag::Orange),
    entry("Monitor", "∿", Link::Path("/monitor"), ColorTag::Cyan),
];

pub static SETTINGS_ENTRY: MenuEntry =
    entry("Settings", "⚙", Link::Path("/settings"), ColorTag::Gray);

pub static INTERNAL_APPS: [MenuEntry; 9] = [
    entry("Dashboard", "▦", Link::Path("/"), ColorTag::Blue),
    entry("Projects", "▣", Link::Path("/projects"), ColorTag::Purple),
    entry("Calendar", "▥", Link::Path("/calendar"), ColorTag::Green),
    entry("Messages", "✉", Link::Path("/messages"), ColorTag::Yellow),
    entry("Documents", "▤", Link::Path("/documents"), ColorTag::Red),
    entry("Analytics", "▮", Link::Path("/analytics"), ColorTag::Indigo),
    entry("Tasks", "☑", Link::Path("/tasks"), ColorTag::Pink),
    entry("Settings", "⚙", Link::Path("/settings"), ColorTag::Gray),
    entry("Help", "?", Link::Path("/help"), ColorTag::Cyan),
];

pub static EXTERNAL_APPS: [MenuEntry; 6] = [
    entry("Cost Point", "◷", Link::Url("https://go.afs.com/time"), ColorTag::Emerald),
    entry(
        "Staffr",
        "☺",
        Link::Url("https://01156-afsdefense.msappproxy.us/staffr/"),
        ColorTag::Orange,
    ),
    entry("SMaRT", "✉", Link::Url("https://outlook.office365.us/mail/"), ColorTag::Sky),
    entry(
        "GenAI Hub",
        "✦",
        Link::Url("https://genaihub.accenturefederaldefense.com/"),
        ColorTag::Violet,
    ),
    entry("Jira", "✱", Link::Url("https://01110-afsdefense.msappproxy.us"), ColorTag::Blue),
    entry(
        "Cayosoft",
        "⛨",
        Link::Url("https://iam-afsdefense.msappproxy.us/cayosoftwebadmin/#!/app/home"),
        ColorTag::Indigo,
    ),
];

/// Columns in the launcher grid.
pub const LAUNCHER_COLUMNS: usize = 4;

/// Launcher entries in cursor order: internal apps first, then external.
pub fn launcher_entry(index: usize) -> Option<&'static MenuEntry> {
    if index < INTERNAL_APPS.len() {
        INTERNAL_APPS.get(index)
    } else {
        EXTERNAL_APPS.get(index - INTERNAL_APPS.len())
    }
}

pub fn launcher_len() -> usize {
    INTERNAL_APPS.len() + EXTERNAL_APPS.len()
}
