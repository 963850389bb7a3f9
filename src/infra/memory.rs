//! In-memory gateway and navigator, for tests and offline tooling.

use crate::domain::model::InterfaceRecord;
use crate::domain::port::{GatewayError, InterfaceGateway, Navigator, SavedInterface};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Mutex as StdMutex;
use tokio::sync::Mutex;

/// A gateway call as received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCall {
    Create(InterfaceRecord),
    Update(InterfaceRecord),
}

#[derive(Debug, Default)]
struct MemoryState {
    next_id: u64,
    records: BTreeMap<u64, InterfaceRecord>,
    calls: Vec<GatewayCall>,
    offline: bool,
}

/// Stores records in a map and assigns increasing ids on create.
#[derive(Debug)]
pub struct MemoryGateway {
    state: Mutex<MemoryState>,
    return_ids: bool,
}

impl Default for MemoryGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// Ids handed out by `create` start at `first_id`.
    pub fn starting_at(first_id: u64) -> Self {
        Self {
            state: Mutex::new(MemoryState {
                next_id: first_id.max(1),
                ..MemoryState::default()
            }),
            return_ids: true,
        }
    }

    /// Saves succeed but report no id, like a backend that does not echo the record.
    pub fn without_ids(mut self) -> Self {
        self.return_ids = false;
        self
    }

    /// While offline every call fails with a transport error.
    pub async fn set_offline(&self, offline: bool) {
        self.state.lock().await.offline = offline;
    }

    /// Seeds an existing record.
    pub async fn insert(&self, record: InterfaceRecord) {
        let mut state = self.state.lock().await;
        state.next_id = state.next_id.max(record.id + 1);
        state.records.insert(record.id, record);
    }

    pub async fn get(&self, id: u64) -> Option<InterfaceRecord> {
        self.state.lock().await.records.get(&id).cloned()
    }

    pub async fn calls(&self) -> Vec<GatewayCall> {
        self.state.lock().await.calls.clone()
    }

    fn saved(&self, record: InterfaceRecord) -> SavedInterface {
        if self.return_ids {
            SavedInterface::from_record(record)
        } else {
            SavedInterface {
                id: None,
                record: None,
            }
        }
    }
}

#[async_trait]
impl InterfaceGateway for MemoryGateway {
    async fn create(&self, record: &InterfaceRecord) -> Result<SavedInterface, GatewayError> {
        let mut state = self.state.lock().await;
        state.calls.push(GatewayCall::Create(record.clone()));
        if state.offline {
            return Err(GatewayError::Transport("gateway offline".to_string()));
        }
        let mut stored = record.clone();
        stored.id = state.next_id;
        state.next_id += 1;
        state.records.insert(stored.id, stored.clone());
        Ok(self.saved(stored))
    }

    async fn update(&self, record: &InterfaceRecord) -> Result<SavedInterface, GatewayError> {
        let mut state = self.state.lock().await;
        state.calls.push(GatewayCall::Update(record.clone()));
        if state.offline {
            return Err(GatewayError::Transport("gateway offline".to_string()));
        }
        if !state.records.contains_key(&record.id) {
            return Err(GatewayError::NotFound(record.id));
        }
        state.records.insert(record.id, record.clone());
        Ok(self.saved(record.clone()))
    }
}

/// Navigator that remembers every href it was asked to visit.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    hrefs: StdMutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hrefs(&self) -> Vec<String> {
        self.hrefs.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn last(&self) -> Option<String> {
        self.hrefs().pop()
    }
}

impl Navigator for RecordingNavigator {
    fn push(&self, href: &str) {
        self.hrefs
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(href.to_string());
    }
}
