//! Session-aware REST gateway.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every backend call from the shell goes through `Gateway::send`:
//!
//! 1. the pipeline's request stages rewrite the request (token injection),
//! 2. the transport performs the exchange,
//! 3. response stages emit commands, which run before the caller resumes.
//!
//! A 401 therefore clears the session and lands on `/login`, whatever
//! request triggered it.
//!
//! ERROR HANDLING
//! ==============
//! Callers get one `ApiError` carrying the backend message or a fallback.
//! Logout never fails: the notification is best-effort and local state is
//! always cleared.

#[cfg(test)]
#[path = "gateway_test.rs"]
mod gateway_test;

use super::error::{ApiError, LOGIN_FAILED, REGISTER_FAILED, REQUEST_FAILED};
use super::middleware::{Command, Pipeline};
use super::transport::{Transport, TransportError};
use super::types::{ApiRequest, ApiResponse, Envelope, LoginData, LoginRequest, RegisterRequest, UserInfo};
use crate::config::ShellConfig;
use crate::router::navigator::Navigator;
use crate::router::routes::LOGIN_PATH;
use crate::state::session::SessionStore;

pub struct Gateway<T, N> {
    transport: T,
    navigator: N,
    session: SessionStore,
    pipeline: Pipeline,
    device_type: String,
}

impl<T: Transport, N: Navigator> Gateway<T, N> {
    /// Gateway with the standard pipeline for `config`.
    pub fn new(config: &ShellConfig, transport: T, navigator: N, session: SessionStore) -> Self {
        Self::with_pipeline(config, transport, navigator, session, Pipeline::standard(&config.device_type))
    }

    pub fn with_pipeline(
        config: &ShellConfig,
        transport: T,
        navigator: N,
        session: SessionStore,
        pipeline: Pipeline,
    ) -> Self {
        Self {
            transport,
            navigator,
            session,
            pipeline,
            device_type: config.device_type.clone(),
        }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// Send a request through the pipeline.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Transport` if the exchange fails, or
    /// `ApiError::Status` for any non-2xx response.
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        self.send_or(request, REQUEST_FAILED).await
    }

    async fn send_or(&self, request: ApiRequest, fallback: &str) -> Result<ApiResponse, ApiError> {
        let prepared = self.pipeline.prepare(request, &self.session);
        let response = self.transport.send(prepared).await?;

        for command in self.pipeline.inspect(&response, &self.session) {
            self.execute(command);
        }

        if response.is_success() {
            Ok(response)
        } else {
            Err(ApiError::from_response(&response, fallback))
        }
    }

    fn execute(&self, command: Command) {
        log::debug!("gateway command: {command:?}");
        match command {
            Command::SignOut { redirect } => {
                self.session.clear();
                self.navigator.navigate(&redirect);
            }
            Command::Redirect(path) => self.navigator.navigate(&path),
        }
    }

    /// Sign in and persist the issued session.
    ///
    /// The session is written before this returns, so a guard evaluated
    /// right after sees the user as authenticated.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails, the backend rejects the
    /// credentials, or the session cannot be stored.
    pub async fn login(&self, email: &str, password: &str) -> Result<UserInfo, ApiError> {
        let body = LoginRequest { email, password, device_type: &self.device_type };
        let request = ApiRequest::post("/login").with_json(encode(&body)?);
        let response = self.send_or(request, LOGIN_FAILED).await?;

        let envelope: Envelope<LoginData> =
            serde_json::from_value(response.body).map_err(|e| ApiError::Decode(e.to_string()))?;
        let accepted = envelope.is_success();
        let message = envelope.message_or(LOGIN_FAILED);
        let Some(data) = envelope.data.filter(|_| accepted) else {
            return Err(ApiError::Rejected { code: envelope.code, message });
        };

        self.session.save(&data.token, &data.profile())?;
        log::info!("signed in as {}", data.user_id);
        Ok(data.into_user_info())
    }

    /// Create an account. Returns the envelope's `data` (`Null` if absent).
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails or the backend rejects the request.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<serde_json::Value, ApiError> {
        let body = RegisterRequest { name, email, password };
        let request = ApiRequest::post("/register").with_json(encode(&body)?);
        let response = self.send_or(request, REGISTER_FAILED).await?;

        let envelope: Envelope<serde_json::Value> =
            serde_json::from_value(response.body).map_err(|e| ApiError::Decode(e.to_string()))?;
        if !envelope.is_success() {
            return Err(ApiError::Rejected {
                code: envelope.code,
                message: envelope.message_or(REGISTER_FAILED),
            });
        }
        Ok(envelope.data.unwrap_or(serde_json::Value::Null))
    }

    /// Sign out locally, notifying the backend on a best-effort basis.
    ///
    /// If the notification itself triggers a sign-out command (a 401), that
    /// command has already cleared and navigated, so nothing is repeated.
    pub async fn logout(&self) {
        if self.session.is_authenticated() {
            if let Err(e) = self.send(ApiRequest::post("/logout")).await {
                log::warn!("logout notification failed: {e}");
            }
            if !self.session.is_authenticated() {
                log::info!("signed out by response pipeline");
                return;
            }
        }
        self.session.clear();
        self.navigator.navigate(LOGIN_PATH);
        log::info!("signed out");
    }
}

fn encode<B: serde::Serialize>(body: &B) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(body).map_err(|e| TransportError::Encode(e.to_string()).into())
}
