//! Static route table.
//!
//! DESIGN
//! ======
//! Routes name views by identifier only; the host decides how each view
//! renders. Patterns are matched in declaration order, so the catch-all
//! must come last.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use crate::state::role::Role;

pub const ROOT_PATH: &str = "/";
pub const HOME_PATH: &str = "/home";
pub const LOGIN_PATH: &str = "/login";
pub const REGISTER_PATH: &str = "/register";
pub const FORBIDDEN_PATH: &str = "/error/forbidden";
pub const NOT_FOUND_PATH: &str = "/error/not-found";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum View {
    Login,
    Register,
    Home,
    Forbidden,
    NotFound,
}

impl View {
    /// Sign-in screens that a signed-in user should skip.
    #[must_use]
    pub fn is_auth_entry(self) -> bool {
        matches!(self, Self::Login | Self::Register)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathPattern {
    Exact(String),
    CatchAll,
}

impl PathPattern {
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        match self {
            Self::Exact(p) => p == path,
            Self::CatchAll => true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RouteTarget {
    View(View),
    Redirect(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteMeta {
    pub requires_auth: bool,
    pub required_role: Option<Role>,
    pub title: String,
}

impl RouteMeta {
    pub fn public(title: impl Into<String>) -> Self {
        Self { requires_auth: false, required_role: None, title: title.into() }
    }

    pub fn protected(title: impl Into<String>) -> Self {
        Self { requires_auth: true, required_role: None, title: title.into() }
    }

    /// Require at least `role`. Implies authentication.
    #[must_use]
    pub fn with_role(mut self, role: Role) -> Self {
        self.requires_auth = true;
        self.required_role = Some(role);
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteDescriptor {
    pub pattern: PathPattern,
    pub target: RouteTarget,
    pub meta: RouteMeta,
}

impl RouteDescriptor {
    pub fn view(path: &str, view: View, meta: RouteMeta) -> Self {
        Self { pattern: PathPattern::Exact(path.to_owned()), target: RouteTarget::View(view), meta }
    }

    pub fn redirect(path: &str, to: &str, title: impl Into<String>) -> Self {
        Self {
            pattern: PathPattern::Exact(path.to_owned()),
            target: RouteTarget::Redirect(to.to_owned()),
            meta: RouteMeta::public(title),
        }
    }

    pub fn catch_all(to: &str, title: impl Into<String>) -> Self {
        Self {
            pattern: PathPattern::CatchAll,
            target: RouteTarget::Redirect(to.to_owned()),
            meta: RouteMeta::public(title),
        }
    }

    #[must_use]
    pub fn view_id(&self) -> Option<View> {
        match self.target {
            RouteTarget::View(view) => Some(view),
            RouteTarget::Redirect(_) => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteTable {
    routes: Vec<RouteDescriptor>,
}

impl RouteTable {
    pub fn new(routes: Vec<RouteDescriptor>) -> Self {
        Self { routes }
    }

    /// The portal's routes.
    pub fn standard() -> Self {
        Self::new(vec![
            RouteDescriptor::redirect(ROOT_PATH, HOME_PATH, "Home"),
            RouteDescriptor::view(LOGIN_PATH, View::Login, RouteMeta::public("Sign in")),
            RouteDescriptor::view(REGISTER_PATH, View::Register, RouteMeta::public("Register")),
            RouteDescriptor::view(HOME_PATH, View::Home, RouteMeta::protected("Home")),
            RouteDescriptor::view(FORBIDDEN_PATH, View::Forbidden, RouteMeta::public("Forbidden")),
            RouteDescriptor::view(NOT_FOUND_PATH, View::NotFound, RouteMeta::public("Not found")),
            RouteDescriptor::catch_all(NOT_FOUND_PATH, "Not found"),
        ])
    }

    pub fn routes(&self) -> &[RouteDescriptor] {
        &self.routes
    }

    /// First route matching the path portion of `location`.
    #[must_use]
    pub fn resolve(&self, location: &str) -> Option<&RouteDescriptor> {
        let path = normalize_path(location);
        self.routes.iter().find(|route| route.pattern.matches(path))
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Strip query, fragment, and trailing slash from a location.
#[must_use]
pub fn normalize_path(location: &str) -> &str {
    let end = location.find(['?', '#']).unwrap_or(location.len());
    let path = &location[..end];
    if path.is_empty() {
        return ROOT_PATH;
    }
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { ROOT_PATH } else { trimmed }
}
