//! Per-transition access decision.
//!
//! SYSTEM CONTEXT
//! ==============
//! Evaluated once for every in-app route change, before the target view
//! renders. Unauthenticated users are sent to `/login` with the requested
//! location preserved in `?redirect=`, so the login view can resume it
//! through [`resume_target`].

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use super::navigator::Navigator;
use super::routes::{FORBIDDEN_PATH, HOME_PATH, LOGIN_PATH, RouteDescriptor};
use crate::config::ShellConfig;
use crate::state::session::SessionStore;

const REDIRECT_PARAM: &str = "redirect";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Proceed,
    RedirectToLogin { return_to: String },
    RedirectToForbidden,
    RedirectToHome,
}

impl GuardDecision {
    /// Location to navigate to instead of the target, if any.
    #[must_use]
    pub fn redirect_path(&self) -> Option<String> {
        match self {
            Self::Proceed => None,
            Self::RedirectToLogin { return_to } => Some(login_redirect_path(return_to)),
            Self::RedirectToForbidden => Some(FORBIDDEN_PATH.to_owned()),
            Self::RedirectToHome => Some(HOME_PATH.to_owned()),
        }
    }
}

#[derive(Clone)]
pub struct NavigationGuard {
    session: SessionStore,
    config: ShellConfig,
}

impl NavigationGuard {
    pub fn new(session: SessionStore, config: &ShellConfig) -> Self {
        Self { session, config: config.clone() }
    }

    /// Set the page title for `route`, then decide the transition.
    pub fn before_each<N: Navigator>(&self, route: &RouteDescriptor, location: &str, navigator: &N) -> GuardDecision {
        navigator.set_title(&self.config.page_title(&route.meta.title));
        let decision = self.decide(route, location);
        log::debug!("guard {location}: {decision:?}");
        decision
    }

    /// Pure decision for navigating to `location`, which resolved to `route`.
    #[must_use]
    pub fn decide(&self, route: &RouteDescriptor, location: &str) -> GuardDecision {
        let authenticated = self.session.is_authenticated();

        if !route.meta.requires_auth {
            let entry = route.view_id().is_some_and(|v| v.is_auth_entry());
            if authenticated && entry {
                return GuardDecision::RedirectToHome;
            }
            return GuardDecision::Proceed;
        }

        if !authenticated {
            return GuardDecision::RedirectToLogin { return_to: location.to_owned() };
        }
        if let Some(required) = route.meta.required_role {
            if !self.session.has_role(required) {
                return GuardDecision::RedirectToForbidden;
            }
        }
        GuardDecision::Proceed
    }
}

/// `/login?redirect=<encoded location>`.
#[must_use]
pub fn login_redirect_path(return_to: &str) -> String {
    format!("{LOGIN_PATH}?{REDIRECT_PARAM}={}", urlencoding::encode(return_to))
}

/// Where to go after a successful login, given the login page's query string.
///
/// Only same-origin absolute paths are honoured; anything else lands home.
#[must_use]
pub fn resume_target(query: &str) -> String {
    let query = query.strip_prefix('?').unwrap_or(query);
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == REDIRECT_PARAM)
        .and_then(|(_, value)| urlencoding::decode(&value.replace('+', " ")).ok().map(|v| v.into_owned()))
        .filter(|target| is_in_app_path(target))
        .unwrap_or_else(|| HOME_PATH.to_owned())
}

/// Browsers drop tab, CR and LF from URLs, so `/\t/host` would become
/// `//host`. Any control character disqualifies the target.
fn is_in_app_path(target: &str) -> bool {
    target.starts_with('/')
        && !target.starts_with("//")
        && !target.starts_with("/\\")
        && !target.chars().any(|c| c.is_ascii_control())
}
