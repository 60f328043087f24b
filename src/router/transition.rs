//! Route resolution plus guard evaluation for a single transition.
//!
//! `ShellRouter::route` is what the host router calls on each location
//! change. `navigate` follows redirects to a final view for headless
//! callers and tests.

#[cfg(test)]
#[path = "transition_test.rs"]
mod transition_test;

use super::guard::{GuardDecision, NavigationGuard};
use super::navigator::Navigator;
use super::routes::{RouteTable, RouteTarget, View};

pub const MAX_REDIRECTS: usize = 8;

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum RoutingError {
    #[error("no route matches {0}")]
    NoRoute(String),
    #[error("redirect loop while navigating to {0}")]
    RedirectLoop(String),
}

/// Outcome of one transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Routing {
    Render(View),
    Redirect(String),
}

/// Where a multi-hop navigation settled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Landing {
    pub location: String,
    pub view: View,
}

#[derive(Clone)]
pub struct ShellRouter {
    table: RouteTable,
    guard: NavigationGuard,
}

impl ShellRouter {
    pub fn new(table: RouteTable, guard: NavigationGuard) -> Self {
        Self { table, guard }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn guard(&self) -> &NavigationGuard {
        &self.guard
    }

    /// Evaluate one transition to `location`.
    ///
    /// # Errors
    ///
    /// Returns `RoutingError::NoRoute` if nothing in the table matches.
    pub fn route<N: Navigator>(&self, location: &str, navigator: &N) -> Result<Routing, RoutingError> {
        let route = self
            .table
            .resolve(location)
            .ok_or_else(|| RoutingError::NoRoute(location.to_owned()))?;

        let view = match &route.target {
            RouteTarget::Redirect(to) => return Ok(Routing::Redirect(to.clone())),
            RouteTarget::View(view) => *view,
        };

        match self.guard.before_each(route, location, navigator) {
            GuardDecision::Proceed => Ok(Routing::Render(view)),
            decision => Ok(decision
                .redirect_path()
                .map_or(Routing::Render(view), Routing::Redirect)),
        }
    }

    /// Follow redirects from `location` until a view renders.
    ///
    /// # Errors
    ///
    /// Returns an error if a hop has no route or more than
    /// [`MAX_REDIRECTS`] redirects are needed.
    pub fn navigate<N: Navigator>(&self, location: &str, navigator: &N) -> Result<Landing, RoutingError> {
        let mut current = location.to_owned();
        for _ in 0..=MAX_REDIRECTS {
            match self.route(&current, navigator)? {
                Routing::Render(view) => return Ok(Landing { location: current, view }),
                Routing::Redirect(next) => current = next,
            }
        }
        Err(RoutingError::RedirectLoop(location.to_owned()))
    }
}
