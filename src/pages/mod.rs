//! Page shells for the routed content area.
//!
//! Pages hold static data plus the active tab. State is rebuilt with defaults
//! whenever a page is mounted.

pub mod dashboard;
pub mod deploy;
pub mod monitor;
pub mod shell;

use chrono::{DateTime, Local};

use crate::nav::Route;
use deploy::DeployTab;
use monitor::MonitorTab;
use shell::{ShellPage, ShellTab};

pub trait TabSet: Copy + Eq + 'static {
    const ALL: &'static [Self];

    fn title(self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tabs<T: TabSet> {
    active: T,
}

impl<T: TabSet> Tabs<T> {
    pub fn new(active: T) -> Self {
        Self { active }
    }

    pub fn active(&self) -> T {
        self.active
    }

    pub fn index(&self) -> usize {
        T::ALL.iter().position(|t| *t == self.active).unwrap_or(0)
    }

    pub fn select_index(&mut self, index: usize) {
        if let Some(tab) = T::ALL.get(index) {
            self.active = *tab;
        }
    }

    pub fn next(&mut self) {
        let next = (self.index() + 1) % T::ALL.len();
        self.select_index(next);
    }

    pub fn prev(&mut self) {
        let len = T::ALL.len();
        let prev = (self.index() + len - 1) % len;
        self.select_index(prev);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageState {
    Dashboard,
    Deploy(Tabs<DeployTab>),
    Monitor(Tabs<MonitorTab>),
    Shell(&'static ShellPage, Tabs<ShellTab>),
    NotFound(String),
}

impl PageState {
    pub fn for_route(route: &Route) -> Self {
        match route {
            Route::Dashboard => PageState::Dashboard,
            Route::Deploy => PageState::Deploy(Tabs::new(DeployTab::Environments)),
            Route::Monitor => PageState::Monitor(Tabs::new(MonitorTab::Metrics)),
            Route::Plan => Self::shell(&shell::PLAN),
            Route::Design => Self::shell(&shell::DESIGN),
            Route::Code => Self::shell(&shell::CODE),
            Route::Test => Self::shell(&shell::TEST),
            Route::Settings => Self::shell(&shell::SETTINGS),
            Route::NotFound(path) => PageState::NotFound(path.clone()),
        }
    }

    fn shell(page: &'static ShellPage) -> Self {
        PageState::Shell(page, Tabs::new(ShellTab::First))
    }

    /// Tab titles and active index, if the page has tabs.
    pub fn tab_bar(&self) -> Option<(Vec<&'static str>, usize)> {
        match self {
            PageState::Deploy(tabs) => Some((titles::<DeployTab>(), tabs.index())),
            PageState::Monitor(tabs) => Some((titles::<MonitorTab>(), tabs.index())),
            PageState::Shell(page, tabs) => Some((page.tabs.to_vec(), tabs.index())),
            PageState::Dashboard | PageState::NotFound(_) => None,
        }
    }

    pub fn next_tab(&mut self) {
        match self {
            PageState::Deploy(tabs) => tabs.next(),
            PageState::Monitor(tabs) => tabs.next(),
            PageState::Shell(_, tabs) => tabs.next(),
            PageState::Dashboard | PageState::NotFound(_) => {}
        }
    }

    pub fn prev_tab(&mut self) {
        match self {
            PageState::Deploy(tabs) => tabs.prev(),
            PageState::Monitor(tabs) => tabs.prev(),
            PageState::Shell(_, tabs) => tabs.prev(),
            PageState::Dashboard | PageState::NotFound(_) => {}
        }
    }

    pub fn select_tab(&mut self, index: usize) {
        match self {
            PageState::Deploy(tabs) => tabs.select_index(index),
            PageState::Monitor(tabs) => tabs.select_index(index),
            PageState::Shell(_, tabs) => tabs.select_index(index),
            PageState::Dashboard | PageState::NotFound(_) => {}
        }
    }
}

fn titles<T: TabSet>() -> Vec<&'static str> {
    T::ALL.iter().map(|t| t.title()).collect()
}

/// Render an RFC 3339 timestamp in local time; unparseable input is shown as-is.
pub fn format_timestamp(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(ts) => ts
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M")
            .to_string(),
        Err(_) => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tabs_wrap() {
        let mut tabs = Tabs::new(DeployTab::Environments);
        tabs.next();
        assert_eq!(tabs.active(), DeployTab::Deployments);
        tabs.next();
        assert_eq!(tabs.active(), DeployTab::Environments);
        tabs.prev();
        assert_eq!(tabs.active(), DeployTab::Deployments);
        tabs.select_index(9);
        assert_eq!(tabs.active(), DeployTab::Deployments);
    }

    #[test]
    fn test_pages_mount_with_default_tab() {
        assert_eq!(
            PageState::for_route(&Route::Deploy).tab_bar(),
            Some((vec!["Environments", "Deployments"], 0))
        );
        assert_eq!(
            PageState::for_route(&Route::Monitor).tab_bar(),
            Some((vec!["Metrics", "Alerts"], 0))
        );
        assert_eq!(PageState::for_route(&Route::Dashboard).tab_bar(), None);
    }

    #[test]
    fn test_every_route_mounts() {
        let routes = [
            Route::Dashboard,
            Route::Plan,
            Route::Design,
            Route::Code,
            Route::Test,
            Route::Deploy,
            Route::Monitor,
            Route::Settings,
            Route::NotFound("/help".to_string()),
        ];
        for route in &routes {
            let page = PageState::for_route(route);
            if let PageState::Shell(shell, _) = page {
                assert_eq!(shell.title, route.title());
            }
        }
    }

    #[test]
    fn test_timestamp_formatting() {
        let formatted = format_timestamp("2024-03-15T12:00:00Z");
        assert!(formatted.starts_with("2024-03-1"), "{formatted}");
        assert_eq!(formatted.len(), "2024-03-15 12:00".len());
        assert_eq!(format_timestamp("yesterday"), "yesterday");
    }
}
