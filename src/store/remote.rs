use super::{HabitStore, StoreError};
use crate::models::{CompletionLog, HabitDraft, HabitId, HabitRecord};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use tracing::debug;

const HABITS: &str = "habits";
const HABIT_LOGS: &str = "habit_logs";

/// Hosted relational backend spoken to through its PostgREST endpoint.
pub struct RemoteStore {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RemoteStore {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}/rest/v1/{table}", self.base_url))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn delete_logs_of(&self, id: &HabitId) -> Result<(), StoreError> {
        let resp = self
            .request(Method::DELETE, HABIT_LOGS)
            .query(&[("habit_id", eq(id.as_str()))])
            .send()
            .await?;
        check(resp).await?;
        Ok(())
    }
}

fn eq(value: &str) -> String {
    format!("eq.{value}")
}

async fn check(resp: Response) -> Result<Response, StoreError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    if status == StatusCode::CONFLICT {
        return Err(StoreError::Conflict(body));
    }
    Err(StoreError::Backend {
        status: status.as_u16(),
        body,
    })
}

fn single(id: &HabitId, mut rows: Vec<HabitRecord>) -> Result<HabitRecord, StoreError> {
    if rows.is_empty() {
        return Err(StoreError::NotFound(id.clone()));
    }
    Ok(rows.swap_remove(0))
}

#[async_trait]
impl HabitStore for RemoteStore {
    async fn list_habits(&self) -> Result<Vec<HabitRecord>, StoreError> {
        let resp = self
            .request(Method::GET, HABITS)
            .query(&[("select", "*"), ("order", "id.asc")])
            .send()
            .await?;
        let rows: Vec<HabitRecord> = check(resp).await?.json().await?;
        debug!("fetched {} habits", rows.len());
        Ok(rows)
    }

    async fn insert_habit(&self, draft: &HabitDraft) -> Result<HabitRecord, StoreError> {
        let resp = self
            .request(Method::POST, HABITS)
            .header("Prefer", "return=representation")
            .json(draft)
            .send()
            .await?;
        let mut rows: Vec<HabitRecord> = check(resp).await?.json().await?;
        rows.pop().ok_or_else(|| StoreError::Backend {
            status: StatusCode::OK.as_u16(),
            body: "insert returned no rows".to_string(),
        })
    }

    async fn update_habit(&self, id: &HabitId, draft: &HabitDraft) -> Result<HabitRecord, StoreError> {
        let resp = self
            .request(Method::PATCH, HABITS)
            .header("Prefer", "return=representation")
            .query(&[("id", eq(id.as_str()))])
            .json(draft)
            .send()
            .await?;
        let rows: Vec<HabitRecord> = check(resp).await?.json().await?;
        single(id, rows)
    }

    async fn delete_habit(&self, id: &HabitId) -> Result<(), StoreError> {
        self.delete_logs_of(id).await?;

        let resp = self
            .request(Method::DELETE, HABITS)
            .header("Prefer", "return=representation")
            .query(&[("id", eq(id.as_str()))])
            .send()
            .await?;
        let rows: Vec<HabitRecord> = check(resp).await?.json().await?;
        single(id, rows).map(|_| ())
    }

    async fn list_logs(&self) -> Result<Vec<CompletionLog>, StoreError> {
        let resp = self
            .request(Method::GET, HABIT_LOGS)
            .query(&[("select", "habit_id,completed_date")])
            .send()
            .await?;
        Ok(check(resp).await?.json().await?)
    }

    async fn list_logs_for(&self, id: &HabitId) -> Result<Vec<CompletionLog>, StoreError> {
        let resp = self
            .request(Method::GET, HABIT_LOGS)
            .query(&[
                ("select", "habit_id,completed_date".to_string()),
                ("habit_id", eq(id.as_str())),
            ])
            .send()
            .await?;
        Ok(check(resp).await?.json().await?)
    }

    async fn insert_log(&self, log: &CompletionLog) -> Result<(), StoreError> {
        let resp = self
            .request(Method::POST, HABIT_LOGS)
            .json(log)
            .send()
            .await?;
        check(resp).await?;
        Ok(())
    }

    async fn delete_log(&self, log: &CompletionLog) -> Result<(), StoreError> {
        let resp = self
            .request(Method::DELETE, HABIT_LOGS)
            .query(&[
                ("habit_id", eq(log.habit_id.as_str())),
                ("completed_date", eq(&log.completed_date.to_string())),
            ])
            .send()
            .await?;
        check(resp).await?;
        Ok(())
    }
}
