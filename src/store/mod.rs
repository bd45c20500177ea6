//! Access to the `habits` and `habit_logs` collections.

pub mod file;
pub mod remote;

use crate::models::{CompletionLog, HabitDraft, HabitId, HabitRecord};
use async_trait::async_trait;

pub use file::FileStore;
pub use remote::RemoteStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("habit {0} not found")]
    NotFound(HabitId),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("backend responded with {status}: {body}")]
    Backend { status: u16, body: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Thin CRUD surface over the backing store. No transactional guarantees
/// beyond what the backend gives natively.
#[async_trait]
pub trait HabitStore: Send + Sync {
    /// All habits, ordered by id ascending.
    async fn list_habits(&self) -> Result<Vec<HabitRecord>, StoreError>;
    async fn insert_habit(&self, draft: &HabitDraft) -> Result<HabitRecord, StoreError>;
    async fn update_habit(&self, id: &HabitId, draft: &HabitDraft) -> Result<HabitRecord, StoreError>;
    /// Removes the habit together with all of its logs.
    async fn delete_habit(&self, id: &HabitId) -> Result<(), StoreError>;
    async fn list_logs(&self) -> Result<Vec<CompletionLog>, StoreError>;
    async fn list_logs_for(&self, id: &HabitId) -> Result<Vec<CompletionLog>, StoreError>;
    /// Fails with `Conflict` when the (habit, date) pair already exists.
    async fn insert_log(&self, log: &CompletionLog) -> Result<(), StoreError>;
    async fn delete_log(&self, log: &CompletionLog) -> Result<(), StoreError>;
}
