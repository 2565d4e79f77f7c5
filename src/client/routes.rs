//! Route surface and per-route access requirements.
//!
//! Access policy is static configuration: each route declares whether it
//! needs an authenticated session (`requires_auth`, authoritative) and
//! whether it is a visitor view (`for_visitors`, best-effort). The guard
//! evaluates these over every matched record of a target location.

/// Path of the login view, also the destination of the 401 hard redirect.
pub const LOGIN_PATH: &str = "/login";

/// Access requirements a route declares.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RouteMeta {
    /// The route needs an authenticated session.
    pub requires_auth: bool,

    /// The route is meant for visitors (login, register, public pages).
    pub for_visitors: bool,
}

/// A named route with its access requirements.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Route {
    pub path: &'static str,
    pub name: &'static str,
    pub meta: RouteMeta,
}

const APP_ROUTES: [Route; 5] = [
    Route {
        path: "/",
        name: "home",
        meta: RouteMeta {
            requires_auth: false,
            for_visitors: true,
        },
    },
    Route {
        path: "/login",
        name: "login",
        meta: RouteMeta {
            requires_auth: false,
            for_visitors: true,
        },
    },
    Route {
        path: "/register",
        name: "register",
        meta: RouteMeta {
            requires_auth: false,
            for_visitors: true,
        },
    },
    Route {
        path: "/about",
        name: "about",
        meta: RouteMeta {
            requires_auth: false,
            for_visitors: true,
        },
    },
    Route {
        path: "/health_form",
        name: "health_form",
        meta: RouteMeta {
            requires_auth: true,
            for_visitors: false,
        },
    },
];

/// The application's route table.
pub fn app_routes() -> &'static [Route] {
    &APP_ROUTES
}

/// A navigation target as the guard sees it.
///
/// `matched` holds the meta of every route record the target matched;
/// requirements are the logical OR over them, so a nested record can
/// tighten but never loosen its parents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteLocation {
    pub name: String,
    /// Full intended path including any query, preserved for post-login
    /// redirects.
    pub full_path: String,
    pub matched: Vec<RouteMeta>,
}

impl RouteLocation {
    /// Builds a location for a route with an explicit full path.
    pub fn new(name: impl Into<String>, full_path: impl Into<String>, matched: Vec<RouteMeta>) -> Self {
        Self {
            name: name.into(),
            full_path: full_path.into(),
            matched,
        }
    }

    /// True if any matched record requires authentication.
    pub fn requires_auth(&self) -> bool {
        self.matched.iter().any(|meta| meta.requires_auth)
    }

    /// True if any matched record is a visitor view.
    pub fn for_visitors(&self) -> bool {
        self.matched.iter().any(|meta| meta.for_visitors)
    }
}

/// Resolves a route name from the application table into a location.
///
/// # Example
///
/// ```
/// # use nutriplan_client::client::routes::resolve;
/// let login = resolve("login").unwrap();
/// assert_eq!(login.full_path, "/login");
/// assert!(!login.requires_auth());
/// ```
pub fn resolve(name: &str) -> Option<RouteLocation> {
    app_routes()
        .iter()
        .find(|route| route.name == name)
        .map(|route| RouteLocation::new(route.name, route.path, vec![route.meta]))
}
