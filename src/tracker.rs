//! Cached habit list with optimistic toggles. Every mutation goes to the
//! store; a failed toggle is healed by re-fetching the authoritative state.

use crate::calendar::{MonthCursor, month_view};
use crate::models::{CompletionLog, Habit, HabitDraft, HabitId, HistoryResponse, ToggleResponse};
use crate::state::AppState;
use crate::store::StoreError;
use crate::streak::{self, dates_of, derive_all};
use chrono::NaiveDate;
use tracing::{debug, error, info};

pub async fn refresh(state: &AppState, today: NaiveDate) -> Result<Vec<Habit>, StoreError> {
    let records = state.store.list_habits().await?;
    let logs = state.store.list_logs().await?;
    let habits = derive_all(records, logs, today);
    debug!("refreshed {} habits", habits.len());

    *state.habits.lock().await = habits.clone();
    Ok(habits)
}

pub async fn toggle_today(state: &AppState, id: &HabitId, today: NaiveDate) -> Result<ToggleResponse, StoreError> {
    let (was_completed, optimistic) = match apply_toggle(state, id, today).await {
        Some(toggled) => toggled,
        None => {
            refresh(state, today).await?;
            apply_toggle(state, id, today)
                .await
                .ok_or_else(|| StoreError::NotFound(id.clone()))?
        }
    };

    let log = CompletionLog {
        habit_id: id.clone(),
        completed_date: today,
    };
    let result = if was_completed {
        state.store.delete_log(&log).await
    } else {
        state.store.insert_log(&log).await
    };

    match result {
        Ok(()) => {
            debug!("habit {id} completed={} on {today}", optimistic.completed);
            Ok(ToggleResponse {
                habit: optimistic,
                synced: true,
            })
        }
        Err(err) => {
            error!("failed to toggle habit {id}: {err}; re-fetching");
            let habits = refresh(state, today).await?;
            Ok(ToggleResponse {
                habit: find(habits, id)?,
                synced: false,
            })
        }
    }
}

/// Flips the cached habit and returns its previous completion flag together
/// with the optimistic view.
async fn apply_toggle(state: &AppState, id: &HabitId, today: NaiveDate) -> Option<(bool, Habit)> {
    let mut habits = state.habits.lock().await;
    let habit = habits.iter_mut().find(|habit| &habit.id == id)?;

    // the cache may have been derived on an earlier day
    let progress = streak::summarize(&habit.completed_dates, today);
    habit.completed = progress.completed_today;
    habit.streak = progress.streak;

    let was_completed = habit.completed;
    streak::toggle_today(habit, today);
    Some((was_completed, habit.clone()))
}

pub async fn create(state: &AppState, draft: &HabitDraft, today: NaiveDate) -> Result<Habit, StoreError> {
    let record = state.store.insert_habit(draft).await?;
    info!("created habit {} ({})", record.id, record.name);
    let habits = refresh(state, today).await?;
    find(habits, &record.id)
}

pub async fn update(
    state: &AppState,
    id: &HabitId,
    draft: &HabitDraft,
    today: NaiveDate,
) -> Result<Habit, StoreError> {
    state.store.update_habit(id, draft).await?;
    info!("updated habit {id} ({})", draft.name);
    let habits = refresh(state, today).await?;
    find(habits, id)
}

pub async fn delete(state: &AppState, id: &HabitId) -> Result<(), StoreError> {
    state.store.delete_habit(id).await?;
    info!("deleted habit {id}");
    state.habits.lock().await.retain(|habit| &habit.id != id);
    Ok(())
}

pub async fn history(
    state: &AppState,
    id: &HabitId,
    month: MonthCursor,
    today: NaiveDate,
) -> Result<HistoryResponse, StoreError> {
    let record = state
        .store
        .list_habits()
        .await?
        .into_iter()
        .find(|record| &record.id == id)
        .ok_or_else(|| StoreError::NotFound(id.clone()))?;
    let completed_dates = dates_of(state.store.list_logs_for(id).await?);

    Ok(HistoryResponse {
        calendar: month_view(month, &completed_dates, today),
        habit: Habit::derive(record, completed_dates.clone(), today),
        completed_dates,
    })
}

fn find(habits: Vec<Habit>, id: &HabitId) -> Result<Habit, StoreError> {
    habits
        .into_iter()
        .find(|habit| &habit.id == id)
        .ok_or_else(|| StoreError::NotFound(id.clone()))
}
