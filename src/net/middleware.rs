//! Request/response middleware run by the gateway.
//!
//! DESIGN
//! ======
//! Stages never navigate or write storage themselves. Request stages
//! rewrite the outgoing request from the current session. Response stages
//! inspect the response and may return a `Command`. The gateway executes
//! commands in pipeline order before handing the result to the caller.

#[cfg(test)]
#[path = "middleware_test.rs"]
mod middleware_test;

use super::types::{ApiRequest, ApiResponse};
use crate::router::routes::{FORBIDDEN_PATH, LOGIN_PATH};
use crate::state::session::SessionStore;

/// Side effect requested by a response stage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Clear the session, then navigate.
    SignOut { redirect: String },
    /// Navigate without touching the session.
    Redirect(String),
}

pub trait RequestMiddleware: Send + Sync {
    fn on_request(&self, request: ApiRequest, session: &SessionStore) -> ApiRequest;
}

pub trait ResponseMiddleware: Send + Sync {
    fn on_response(&self, response: &ApiResponse, session: &SessionStore) -> Option<Command>;
}

/// Attaches the bearer token and device marker when signed in.
pub struct AuthHeaders {
    device_type: String,
}

impl AuthHeaders {
    pub fn new(device_type: impl Into<String>) -> Self {
        Self { device_type: device_type.into() }
    }
}

impl RequestMiddleware for AuthHeaders {
    fn on_request(&self, request: ApiRequest, session: &SessionStore) -> ApiRequest {
        match session.token() {
            Some(token) => request
                .with_header("Authorization", format!("Bearer {token}"))
                .with_header("deviceType", self.device_type.clone()),
            None => request,
        }
    }
}

/// 401 anywhere means the token is dead.
pub struct UnauthorizedReset;

impl ResponseMiddleware for UnauthorizedReset {
    fn on_response(&self, response: &ApiResponse, _session: &SessionStore) -> Option<Command> {
        (response.status == 401).then(|| Command::SignOut { redirect: LOGIN_PATH.to_owned() })
    }
}

pub struct ForbiddenRedirect;

impl ResponseMiddleware for ForbiddenRedirect {
    fn on_response(&self, response: &ApiResponse, _session: &SessionStore) -> Option<Command> {
        (response.status == 403).then(|| Command::Redirect(FORBIDDEN_PATH.to_owned()))
    }
}

/// Ordered request and response stages.
#[derive(Default)]
pub struct Pipeline {
    request: Vec<Box<dyn RequestMiddleware>>,
    response: Vec<Box<dyn ResponseMiddleware>>,
}

impl Pipeline {
    /// Token injection plus the global 401/403 handling.
    pub fn standard(device_type: &str) -> Self {
        Self::default()
            .with_request(AuthHeaders::new(device_type))
            .with_response(UnauthorizedReset)
            .with_response(ForbiddenRedirect)
    }

    #[must_use]
    pub fn with_request(mut self, stage: impl RequestMiddleware + 'static) -> Self {
        self.request.push(Box::new(stage));
        self
    }

    #[must_use]
    pub fn with_response(mut self, stage: impl ResponseMiddleware + 'static) -> Self {
        self.response.push(Box::new(stage));
        self
    }

    pub fn prepare(&self, request: ApiRequest, session: &SessionStore) -> ApiRequest {
        self.request
            .iter()
            .fold(request, |req, stage| stage.on_request(req, session))
    }

    pub fn inspect(&self, response: &ApiResponse, session: &SessionStore) -> Vec<Command> {
        self.response
            .iter()
            .filter_map(|stage| stage.on_response(response, session))
            .collect()
    }
}
