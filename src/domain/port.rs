//! Seams between the editor and the outside world.

use crate::domain::model::InterfaceRecord;
use async_trait::async_trait;
use thiserror::Error;

/// What a gateway hands back after a successful save.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SavedInterface {
    /// Id of the stored record. Expected on both create and update.
    pub id: Option<u64>,
    /// The stored record, when the backend echoes it.
    pub record: Option<InterfaceRecord>,
}

impl SavedInterface {
    pub fn from_record(record: InterfaceRecord) -> Self {
        Self {
            id: Some(record.id).filter(|id| *id != 0),
            record: Some(record),
        }
    }
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("backend returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("backend rejected the request: {0}")]
    Rejected(String),
    #[error("unexpected backend response: {0}")]
    Decode(String),
    #[error("interface {0} not found")]
    NotFound(u64),
}

/// Persistence boundary for interface records.
#[async_trait]
pub trait InterfaceGateway: Send + Sync {
    /// Stores a new record (`id == 0`).
    async fn create(&self, record: &InterfaceRecord) -> Result<SavedInterface, GatewayError>;

    /// Replaces an existing record (`id != 0`).
    async fn update(&self, record: &InterfaceRecord) -> Result<SavedInterface, GatewayError>;
}

/// Application router.
pub trait Navigator: Send + Sync {
    fn push(&self, href: &str);
}
