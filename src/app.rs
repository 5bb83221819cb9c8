use ratatui::layout::Rect;
use tokio::sync::mpsc;

use crate::catalog::{self, LAUNCHER_COLUMNS, PRIMARY_NAV, QUICK_LINKS, SETTINGS_ENTRY};
use crate::chat::{ChatWidget, ReplyId, ReplyScheduler};
use crate::config::Config;
use crate::nav::{NavTarget, Navigator, Route, View};
use crate::pages::PageState;
use crate::search::SearchBar;
use crate::store::LocalStore;
use crate::tui::AppEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

/// Which widget receives typed characters in editing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPane {
    Page,
    Search,
    Chat,
}

/// The surface a navigation action came from; that panel closes with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavSource {
    TopBar,
    Menu,
    Launcher,
}

/// Slide-in menu rows after the primary nav entries.
pub const MENU_SETTINGS_ROW: usize = PRIMARY_NAV.len();
pub const MENU_SIGN_OUT_ROW: usize = PRIMARY_NAV.len() + 1;
pub const MENU_ROWS: usize = PRIMARY_NAV.len() + 2;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PanelState {
    pub open: bool,
    pub selected: usize,
}

/// Layout rectangles from the last frame, used for mouse hit-testing.
#[derive(Debug, Default, Clone)]
pub struct HitAreas {
    pub menu_button: Option<Rect>,
    pub logo: Option<Rect>,
    pub quick_links: Vec<Rect>,
    pub search: Option<Rect>,
    pub search_clear: Option<Rect>,
    pub launcher_button: Option<Rect>,
    pub tabs: Vec<Rect>,
    pub menu_panel: Option<Rect>,
    pub menu_rows: Vec<Rect>,
    pub launcher_panel: Option<Rect>,
    pub launcher_tiles: Vec<Rect>,
    pub chat_button: Option<Rect>,
    pub chat_panel: Option<Rect>,
    pub chat_minimize: Option<Rect>,
    pub chat_close: Option<Rect>,
}

pub struct App {
    // Core state
    pub should_quit: bool,
    pub input_mode: InputMode,
    pub focus: FocusPane,

    // Navigation state
    navigator: Navigator,
    page: Option<(Route, PageState)>,

    // Header panels
    pub menu: PanelState,
    pub launcher: PanelState,
    pub search: SearchBar,

    // Chat state
    pub chat: ChatWidget,
    scheduler: ReplyScheduler,
    pub animation_frame: u8,

    pub areas: HitAreas,
}

impl App {
    pub fn new(config: &Config, store: &mut LocalStore, events: mpsc::UnboundedSender<AppEvent>) -> Self {
        let start = config
            .start_route
            .as_deref()
            .map(Route::from_path)
            .unwrap_or_default();

        let search = SearchBar::new(
            config.search_placeholder.clone(),
            Box::new(|query: &str| tracing::info!(query, "search submitted")),
        );

        let mut chat = ChatWidget::new(config.reply_delay());
        chat.mount(store);

        let mut app = Self {
            should_quit: false,
            input_mode: InputMode::Normal,
            focus: FocusPane::Page,

            navigator: Navigator::new(start),
            page: None,

            menu: PanelState::default(),
            launcher: PanelState::default(),
            search,

            chat,
            scheduler: ReplyScheduler::new(events),
            animation_frame: 0,

            areas: HitAreas::default(),
        };
        app.sync_page();
        app
    }

    pub fn route(&self) -> &Route {
        self.navigator.route()
    }

    pub fn view(&self) -> View<'_> {
        self.navigator.view()
    }

    pub fn external(&self) -> Option<&str> {
        self.navigator.external()
    }

    /// Mounted page, absent while an external target is shown.
    pub fn page(&self) -> Option<&PageState> {
        self.page.as_ref().map(|(_, page)| page)
    }

    pub fn page_mut(&mut self) -> Option<&mut PageState> {
        self.page.as_mut().map(|(_, page)| page)
    }

    /// One update: clear the external target, route or set the new target,
    /// and close the panel that triggered it.
    pub fn navigate(&mut self, target: NavTarget, source: NavSource) {
        tracing::info!(?target, ?source, "navigate");
        self.navigator.apply(target);
        match source {
            NavSource::Menu => self.close_menu(),
            NavSource::Launcher => self.close_launcher(),
            NavSource::TopBar => {}
        }
        self.sync_page();
    }

    /// Keep the mounted page in line with the view. Routed pages survive
    /// re-navigation to the same route; anything else remounts.
    fn sync_page(&mut self) {
        match self.navigator.view() {
            View::External(_) => self.page = None,
            View::Routed(route) => {
                let stale = self
                    .page
                    .as_ref()
                    .map_or(true, |(mounted, _)| mounted != route);
                if stale {
                    tracing::debug!(route = route.path(), "mounting page");
                    self.page = Some((route.clone(), PageState::for_route(route)));
                }
            }
        }
    }

    pub fn go_home(&mut self) {
        self.navigate(NavTarget::Internal(Route::Dashboard), NavSource::TopBar);
    }

    pub fn open_quick_link(&mut self, index: usize) {
        if let Some(link) = QUICK_LINKS.get(index) {
            self.navigate(link.link.target(), NavSource::TopBar);
        }
    }

    // Slide-in menu

    pub fn open_menu(&mut self) {
        self.release_editing();
        self.close_launcher();
        self.menu = PanelState {
            open: true,
            selected: 0,
        };
    }

    pub fn close_menu(&mut self) {
        self.menu.open = false;
    }

    pub fn menu_down(&mut self) {
        self.menu.selected = (self.menu.selected + 1).min(MENU_ROWS - 1);
    }

    pub fn menu_up(&mut self) {
        self.menu.selected = self.menu.selected.saturating_sub(1);
    }

    pub fn menu_activate(&mut self, row: usize) {
        let entry = if row < PRIMARY_NAV.len() {
            &PRIMARY_NAV[row]
        } else if row == MENU_SETTINGS_ROW {
            &SETTINGS_ENTRY
        } else {
            // Sign Out has no behavior.
            tracing::debug!("sign out selected");
            return;
        };
        self.navigate(entry.link.target(), NavSource::Menu);
    }

    /// Panels take the keyboard; text fields give it up.
    fn release_editing(&mut self) {
        if self.focus == FocusPane::Search {
            self.search.blur();
        }
        self.focus = FocusPane::Page;
        self.input_mode = InputMode::Normal;
    }

    // App launcher

    pub fn open_launcher(&mut self) {
        self.release_editing();
        self.close_menu();
        self.launcher = PanelState {
            open: true,
            selected: 0,
        };
    }

    pub fn close_launcher(&mut self) {
        self.launcher.open = false;
    }

    /// Move the launcher cursor across the combined grid, clamped at the ends.
    pub fn launcher_move(&mut self, dx: isize, dy: isize) {
        let last = catalog::launcher_len() as isize - 1;
        let step = dx + dy * LAUNCHER_COLUMNS as isize;
        let next = (self.launcher.selected as isize + step).clamp(0, last);
        self.launcher.selected = next as usize;
    }

    pub fn launcher_activate(&mut self, index: usize) {
        if let Some(entry) = catalog::launcher_entry(index) {
            self.navigate(entry.link.target(), NavSource::Launcher);
        }
    }

    // Search

    pub fn focus_search(&mut self) {
        self.search.focus();
        self.focus = FocusPane::Search;
        self.input_mode = InputMode::Editing;
    }

    pub fn blur_search(&mut self) {
        self.search.blur();
        if self.focus == FocusPane::Search {
            self.focus = FocusPane::Page;
            self.input_mode = InputMode::Normal;
        }
    }

    /// Every mouse press passes through here first, like a document-level
    /// outside-click listener.
    pub fn search_click(&mut self, inside: bool) {
        self.search.click(inside);
        if inside {
            self.focus = FocusPane::Search;
            self.input_mode = InputMode::Editing;
        } else if self.focus == FocusPane::Search {
            self.focus = FocusPane::Page;
            self.input_mode = InputMode::Normal;
        }
    }

    /// The clear button empties the field and keeps it focused.
    pub fn clear_search(&mut self) {
        self.search.clear();
        self.focus = FocusPane::Search;
        self.input_mode = InputMode::Editing;
    }

    // Chat

    pub fn open_chat(&mut self) {
        self.chat.open();
        self.focus = FocusPane::Chat;
        self.input_mode = InputMode::Editing;
    }

    pub fn close_chat(&mut self) {
        self.chat.close();
        if self.focus == FocusPane::Chat {
            self.focus = FocusPane::Page;
            self.input_mode = InputMode::Normal;
        }
    }

    pub fn toggle_chat_minimize(&mut self) {
        self.chat.toggle_minimize();
        if !self.chat.is_expanded() && self.focus == FocusPane::Chat {
            self.focus = FocusPane::Page;
            self.input_mode = InputMode::Normal;
        }
    }

    pub fn submit_chat(&mut self) {
        if let Some(ticket) = self.chat.submit(&mut rand::thread_rng()) {
            self.scheduler.schedule(ticket);
        }
    }

    pub fn on_scripted_reply(&mut self, id: ReplyId) {
        self.scheduler.complete(id);
        if self.chat.deliver(id) {
            tracing::debug!(
                ?id,
                open = self.chat.is_open(),
                pending = self.chat.pending_replies(),
                in_flight = self.scheduler.in_flight(),
                "scripted reply delivered"
            );
        }
    }

    pub fn tick_animation(&mut self) {
        if self.chat.is_composing() {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
    }

    // Page tabs

    pub fn next_tab(&mut self) {
        if let Some(page) = self.page_mut() {
            page.next_tab();
        }
    }

    pub fn prev_tab(&mut self) {
        if let Some(page) = self.page_mut() {
            page.prev_tab();
        }
    }

    pub fn select_tab(&mut self, index: usize) {
        if let Some(page) = self.page_mut() {
            page.select_tab(index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::deploy::{DeployTab, EnvStatus, ENVIRONMENTS};
    use crate::pages::monitor::MonitorTab;
    use crate::pages::{dashboard, Tabs};
    use tempfile::{tempdir, TempDir};

    struct Harness {
        app: App,
        _rx: mpsc::UnboundedReceiver<AppEvent>,
        _dir: TempDir,
    }

    fn harness() -> Harness {
        let dir = tempdir().unwrap();
        let mut store = LocalStore::open(dir.path().join("storage.json")).unwrap();
        let (tx, rx) = mpsc::unbounded_channel();
        let app = App::new(&Config::default(), &mut store, tx);
        Harness {
            app,
            _rx: rx,
            _dir: dir,
        }
    }

    fn menu_row(label: &str) -> usize {
        PRIMARY_NAV.iter().position(|e| e.label == label).unwrap()
    }

    fn launcher_index(label: &str) -> usize {
        (0..catalog::launcher_len())
            .find(|&i| catalog::launcher_entry(i).map(|e| e.label) == Some(label))
            .unwrap()
    }

    #[test]
    fn test_fresh_start_shows_dashboard() {
        let h = harness();
        assert_eq!(h.app.route(), &Route::Dashboard);
        assert_eq!(h.app.page(), Some(&PageState::Dashboard));
        let counts: Vec<usize> = dashboard::SECTIONS.iter().map(|s| s.cards.len()).collect();
        assert_eq!(counts, [3, 2, 2]);
        assert_eq!(h.app.chat.messages().len(), 1);
    }

    #[test]
    fn test_menu_deploy_navigates_and_closes() {
        let mut h = harness();
        h.app.open_menu();
        h.app.menu_activate(menu_row("Deploy"));

        assert!(!h.app.menu.open);
        assert_eq!(h.app.route(), &Route::Deploy);
        assert_eq!(
            h.app.page(),
            Some(&PageState::Deploy(Tabs::new(DeployTab::Environments)))
        );
        assert_eq!(ENVIRONMENTS.len(), 3);
        assert_eq!(ENVIRONMENTS[2].status, EnvStatus::Warning);
    }

    #[test]
    fn test_launcher_external_shows_frame_without_route_change() {
        let mut h = harness();
        h.app.open_menu();
        h.app.menu_activate(menu_row("Monitor"));

        h.app.open_launcher();
        h.app.launcher_activate(launcher_index("SMaRT"));

        assert!(!h.app.launcher.open);
        assert_eq!(h.app.route(), &Route::Monitor);
        assert_eq!(h.app.view(), View::External("https://outlook.office365.us/mail/"));
        assert!(h.app.page().is_none());
    }

    #[test]
    fn test_internal_navigation_clears_external_target() {
        let mut h = harness();
        h.app.open_quick_link(0);
        assert!(h.app.external().is_some());

        h.app.open_launcher();
        h.app.launcher_activate(launcher_index("Projects"));
        assert_eq!(h.app.external(), None);
        assert_eq!(h.app.route(), &Route::NotFound("/projects".to_string()));
        assert!(matches!(h.app.page(), Some(PageState::NotFound(_))));
    }

    #[test]
    fn test_returning_from_external_resets_page_state() {
        let mut h = harness();
        h.app.open_menu();
        h.app.menu_activate(menu_row("Monitor"));
        h.app.next_tab();
        assert_eq!(
            h.app.page(),
            Some(&PageState::Monitor(Tabs::new(MonitorTab::Alerts)))
        );

        h.app.open_quick_link(1);
        h.app.open_menu();
        h.app.menu_activate(menu_row("Monitor"));
        assert_eq!(
            h.app.page(),
            Some(&PageState::Monitor(Tabs::new(MonitorTab::Metrics)))
        );
    }

    #[test]
    fn test_same_route_keeps_tab() {
        let mut h = harness();
        h.app.navigate(NavTarget::Internal(Route::Deploy), NavSource::TopBar);
        h.app.select_tab(1);
        h.app.navigate(NavTarget::Internal(Route::Deploy), NavSource::TopBar);
        assert_eq!(
            h.app.page(),
            Some(&PageState::Deploy(Tabs::new(DeployTab::Deployments)))
        );
    }

    #[test]
    fn test_sign_out_does_nothing() {
        let mut h = harness();
        h.app.open_menu();
        h.app.menu_activate(MENU_SIGN_OUT_ROW);
        assert!(h.app.menu.open);
        assert_eq!(h.app.route(), &Route::Dashboard);

        h.app.menu_activate(MENU_SETTINGS_ROW);
        assert!(!h.app.menu.open);
        assert_eq!(h.app.route(), &Route::Settings);
    }

    #[test]
    fn test_logo_goes_home() {
        let mut h = harness();
        h.app.navigate(NavTarget::Internal(Route::Code), NavSource::TopBar);
        h.app.open_quick_link(3);
        h.app.go_home();
        assert_eq!(h.app.route(), &Route::Dashboard);
        assert_eq!(h.app.external(), None);
    }

    #[test]
    fn test_launcher_cursor_clamps() {
        let mut h = harness();
        h.app.open_launcher();
        h.app.launcher_move(-1, 0);
        assert_eq!(h.app.launcher.selected, 0);
        h.app.launcher_move(0, 1);
        assert_eq!(h.app.launcher.selected, LAUNCHER_COLUMNS);
        h.app.launcher_move(0, 10);
        assert_eq!(h.app.launcher.selected, catalog::launcher_len() - 1);
    }

    #[test]
    fn test_panels_are_exclusive() {
        let mut h = harness();
        h.app.open_menu();
        h.app.open_launcher();
        assert!(!h.app.menu.open);
        assert!(h.app.launcher.open);
        h.app.open_menu();
        assert!(!h.app.launcher.open);
    }

    #[test]
    fn test_start_route_from_config() {
        let dir = tempdir().unwrap();
        let mut store = LocalStore::open(dir.path().join("storage.json")).unwrap();
        let (tx, _rx) = mpsc::unbounded_channel();
        let config = Config {
            start_route: Some("/monitor".to_string()),
            ..Config::default()
        };
        let app = App::new(&config, &mut store, tx);
        assert_eq!(app.route(), &Route::Monitor);
    }

    #[tokio::test(start_paused = true)]
    async fn test_chat_reply_round_trip_through_events() {
        let dir = tempdir().unwrap();
        let mut store = LocalStore::open(dir.path().join("storage.json")).unwrap();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut app = App::new(&Config::default(), &mut store, tx);

        app.open_chat();
        for c in "hello".chars() {
            app.chat.input_mut().insert(c);
        }
        app.submit_chat();
        assert!(app.chat.is_composing());
        assert_eq!(app.chat.messages().len(), 2);

        app.close_chat();
        match rx.recv().await {
            Some(AppEvent::ScriptedReply(id)) => app.on_scripted_reply(id),
            other => panic!("unexpected event: {other:?}"),
        }
        assert!(!app.chat.is_composing());
        assert_eq!(app.chat.messages().len(), 3);
        assert!(!app.chat.is_open());
    }

    #[test]
    fn test_blank_chat_submit_leaves_state() {
        let mut h = harness();
        h.app.open_chat();
        h.app.chat.input_mut().insert(' ');
        h.app.submit_chat();
        assert_eq!(h.app.chat.messages().len(), 1);
        assert!(!h.app.chat.is_composing());
    }
}
