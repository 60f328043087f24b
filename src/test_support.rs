//! Shared test doubles for session, transport, and navigation.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::config::StorageKeys;
use crate::net::transport::{Transport, TransportError};
use crate::net::types::{ApiRequest, ApiResponse};
use crate::router::navigator::Navigator;
use crate::state::session::{Profile, SessionStore};
use crate::state::storage::{KeyValueStorage, MemoryStorage, StorageError};

pub fn profile(role: &str) -> Profile {
    Profile {
        user_id: "u-1".to_owned(),
        name: "Alice".to_owned(),
        role: role.to_owned(),
    }
}

pub fn empty_session() -> (Arc<MemoryStorage>, SessionStore) {
    let storage = Arc::new(MemoryStorage::new());
    let session = SessionStore::new(storage.clone(), StorageKeys::default());
    (storage, session)
}

pub fn signed_in(role: &str) -> SessionStore {
    let (_, session) = empty_session();
    session.save("tok-1", &profile(role)).unwrap();
    session
}

/// Storage that refuses writes to one key.
#[derive(Default)]
pub struct RefusingStorage {
    pub inner: MemoryStorage,
    pub refuse_key: String,
}

impl KeyValueStorage for RefusingStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if key == self.refuse_key {
            return Err(StorageError::Write("quota exceeded".to_owned()));
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.inner.remove(key)
    }
}

/// Navigator that records every call.
#[derive(Default)]
pub struct RecordingNavigator {
    pub paths: Mutex<Vec<String>>,
    pub titles: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn paths(&self) -> Vec<String> {
        self.paths.lock().unwrap().clone()
    }

    pub fn titles(&self) -> Vec<String> {
        self.titles.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        self.paths.lock().unwrap().push(path.to_owned());
    }

    fn set_title(&self, title: &str) {
        self.titles.lock().unwrap().push(title.to_owned());
    }
}

/// Transport that replays queued outcomes and records what was sent.
#[derive(Default)]
pub struct ScriptedTransport {
    pub outcomes: Mutex<VecDeque<Result<ApiResponse, TransportError>>>,
    pub sent: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub fn replying(outcomes: Vec<Result<ApiResponse, TransportError>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn sent(&self) -> Vec<ApiRequest> {
        self.sent.lock().unwrap().clone()
    }
}

impl Transport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        self.sent.lock().unwrap().push(request);
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Network("no scripted response".to_owned())))
    }
}
