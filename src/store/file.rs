use super::{HabitStore, StoreError};
use crate::models::{CompletionLog, HabitDraft, HabitId, HabitRecord};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::error;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Dataset {
    pub habits: Vec<HabitRecord>,
    pub logs: Vec<CompletionLog>,
    pub next_id: u64,
}

/// Keeps the whole dataset in memory and rewrites one JSON file after every
/// mutation.
pub struct FileStore {
    path: PathBuf,
    data: Mutex<Dataset>,
}

impl FileStore {
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        let data = load_dataset(&path).await;
        Ok(Self {
            path,
            data: Mutex::new(data),
        })
    }
}

impl FileStore {
    /// Writes `next` to disk and only then makes it the in-memory state, so a
    /// failed write leaves both untouched.
    async fn commit(&self, data: &mut Dataset, next: Dataset) -> Result<(), StoreError> {
        persist_dataset(&self.path, &next).await?;
        *data = next;
        Ok(())
    }
}

pub async fn load_dataset(path: &Path) -> Dataset {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(data) => data,
            Err(err) => {
                error!("failed to parse data file {}: {err}", path.display());
                Dataset::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Dataset::default(),
        Err(err) => {
            error!("failed to read data file {}: {err}", path.display());
            Dataset::default()
        }
    }
}

async fn persist_dataset(path: &Path, data: &Dataset) -> Result<(), StoreError> {
    let payload = serde_json::to_vec_pretty(data)?;
    fs::write(path, payload).await?;
    Ok(())
}

#[async_trait]
impl HabitStore for FileStore {
    async fn list_habits(&self) -> Result<Vec<HabitRecord>, StoreError> {
        Ok(self.data.lock().await.habits.clone())
    }

    async fn insert_habit(&self, draft: &HabitDraft) -> Result<HabitRecord, StoreError> {
        let mut data = self.data.lock().await;
        let mut next = data.clone();
        next.next_id = next.next_id.saturating_add(1);
        let record = HabitRecord {
            id: HabitId::new(next.next_id.to_string()),
            name: draft.name.clone(),
            icon: Some(draft.icon.clone()),
        };
        next.habits.push(record.clone());

        self.commit(&mut data, next).await?;
        Ok(record)
    }

    async fn update_habit(&self, id: &HabitId, draft: &HabitDraft) -> Result<HabitRecord, StoreError> {
        let mut data = self.data.lock().await;
        let mut next = data.clone();
        let updated = {
            let record = next
                .habits
                .iter_mut()
                .find(|record| &record.id == id)
                .ok_or_else(|| StoreError::NotFound(id.clone()))?;
            record.name = draft.name.clone();
            record.icon = Some(draft.icon.clone());
            record.clone()
        };

        self.commit(&mut data, next).await?;
        Ok(updated)
    }

    async fn delete_habit(&self, id: &HabitId) -> Result<(), StoreError> {
        let mut data = self.data.lock().await;
        if !data.habits.iter().any(|record| &record.id == id) {
            return Err(StoreError::NotFound(id.clone()));
        }
        let mut next = data.clone();
        next.habits.retain(|record| &record.id != id);
        next.logs.retain(|log| &log.habit_id != id);

        self.commit(&mut data, next).await
    }

    async fn list_logs(&self) -> Result<Vec<CompletionLog>, StoreError> {
        Ok(self.data.lock().await.logs.clone())
    }

    async fn list_logs_for(&self, id: &HabitId) -> Result<Vec<CompletionLog>, StoreError> {
        let data = self.data.lock().await;
        Ok(data
            .logs
            .iter()
            .filter(|log| &log.habit_id == id)
            .cloned()
            .collect())
    }

    async fn insert_log(&self, log: &CompletionLog) -> Result<(), StoreError> {
        let mut data = self.data.lock().await;
        if !data.habits.iter().any(|record| record.id == log.habit_id) {
            return Err(StoreError::NotFound(log.habit_id.clone()));
        }
        if data.logs.contains(log) {
            return Err(StoreError::Conflict(format!(
                "habit {} already completed on {}",
                log.habit_id, log.completed_date
            )));
        }
        let mut next = data.clone();
        next.logs.push(log.clone());

        self.commit(&mut data, next).await
    }

    async fn delete_log(&self, log: &CompletionLog) -> Result<(), StoreError> {
        let mut data = self.data.lock().await;
        if !data.logs.contains(log) {
            return Ok(());
        }
        let mut next = data.clone();
        next.logs.retain(|existing| existing != log);

        self.commit(&mut data, next).await
    }
}
