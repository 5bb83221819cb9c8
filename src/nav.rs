//! Route table and the navigation target switch.
//!
//! `Navigator` is owned by the application root. It is the only place that
//! knows whether the main area shows a routed page or an external target.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Route {
    #[default]
    Dashboard,
    Plan,
    Design,
    Code,
    Test,
    Deploy,
    Monitor,
    Settings,
    NotFound(String),
}

impl Route {
    /// Resolve a client-side path. Anything outside the table is `NotFound`.
    pub fn from_path(path: &str) -> Self {
        let trimmed = path.trim();
        let normalized = if trimmed.len() > 1 {
            trimmed.trim_end_matches('/')
        } else {
            trimmed
        };

        match normalized {
            "/" | "" => Route::Dashboard,
            "/plan" => Route::Plan,
            "/design" => Route::Design,
            "/code" => Route::Code,
            "/test" => Route::Test,
            "/deploy" => Route::Deploy,
            "/monitor" => Route::Monitor,
            "/settings" => Route::Settings,
            other => Route::NotFound(other.to_string()),
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Route::Dashboard => "/",
            Route::Plan => "/plan",
            Route::Design => "/design",
            Route::Code => "/code",
            Route::Test => "/test",
            Route::Deploy => "/deploy",
            Route::Monitor => "/monitor",
            Route::Settings => "/settings",
            Route::NotFound(path) => path.as_str(),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Dashboard => "Dashboard",
            Route::Plan => "Plan",
            Route::Design => "Design",
            Route::Code => "Code",
            Route::Test => "Test",
            Route::Deploy => "Deploy",
            Route::Monitor => "Monitor",
            Route::Settings => "Settings",
            Route::NotFound(_) => "Not Found",
        }
    }
}

/// Where a navigation action points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavTarget {
    Internal(Route),
    External(String),
}

impl NavTarget {
    pub fn internal(path: &str) -> Self {
        NavTarget::Internal(Route::from_path(path))
    }

    pub fn external(url: &str) -> Self {
        NavTarget::External(url.to_string())
    }
}

/// What the main content area is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View<'a> {
    Routed(&'a Route),
    External(&'a str),
}

#[derive(Debug, Default)]
pub struct Navigator {
    route: Route,
    external: Option<String>,
}

impl Navigator {
    pub fn new(route: Route) -> Self {
        Self {
            route,
            external: None,
        }
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn external(&self) -> Option<&str> {
        self.external.as_deref()
    }

    pub fn view(&self) -> View<'_> {
        match &self.external {
            Some(url) => View::External(url),
            None => View::Routed(&self.route),
        }
    }

    /// Single writer for the external target. No validation is applied.
    pub fn set_external(&mut self, url: Option<String>) {
        self.external = url;
    }

    /// Clears the external target before any route change so the frame can
    /// never outlive an internal navigation. External targets leave the
    /// route untouched.
    pub fn apply(&mut self, target: NavTarget) {
        self.set_external(None);
        match target {
            NavTarget::Internal(route) => self.route = route,
            NavTarget::External(url) => self.set_external(Some(url)),
        }
    }
}
