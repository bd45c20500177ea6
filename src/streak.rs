use crate::models::{CompletionLog, Habit, HabitId, HabitRecord, icon_or_default};
use chrono::{Duration, NaiveDate};
use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub completed_today: bool,
    pub streak: u32,
}

pub fn completed_on(dates: &BTreeSet<NaiveDate>, day: NaiveDate) -> bool {
    dates.contains(&day)
}

/// Consecutive completed days ending today, or ending yesterday when today
/// is not done yet. Stops at the first gap.
pub fn current_streak(dates: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
    let mut cursor = if completed_on(dates, today) {
        today
    } else {
        today - Duration::days(1)
    };

    let mut streak = 0u32;
    while dates.contains(&cursor) {
        streak = streak.saturating_add(1);
        match cursor.pred_opt() {
            Some(prev) => cursor = prev,
            None => break,
        }
    }
    streak
}

pub fn summarize(dates: &BTreeSet<NaiveDate>, today: NaiveDate) -> Progress {
    Progress {
        completed_today: completed_on(dates, today),
        streak: current_streak(dates, today),
    }
}

impl Habit {
    pub fn derive(record: HabitRecord, completed_dates: BTreeSet<NaiveDate>, today: NaiveDate) -> Self {
        let progress = summarize(&completed_dates, today);
        Habit {
            icon: icon_or_default(record.icon.as_deref()),
            id: record.id,
            name: record.name,
            completed: progress.completed_today,
            streak: progress.streak,
            completed_dates,
        }
    }
}

/// Flips today's completion in place without recomputing the streak: +1 when
/// marking done, -1 (floored at 0) when unmarking. A later refresh replaces
/// the approximation with the real value.
pub fn toggle_today(habit: &mut Habit, today: NaiveDate) {
    if habit.completed {
        habit.completed_dates.remove(&today);
        habit.completed = false;
        habit.streak = habit.streak.saturating_sub(1);
    } else {
        habit.completed_dates.insert(today);
        habit.completed = true;
        habit.streak = habit.streak.saturating_add(1);
    }
}

pub fn derive_all(records: Vec<HabitRecord>, logs: Vec<CompletionLog>, today: NaiveDate) -> Vec<Habit> {
    let mut by_habit: HashMap<HabitId, BTreeSet<NaiveDate>> = HashMap::new();
    for log in logs {
        by_habit
            .entry(log.habit_id)
            .or_default()
            .insert(log.completed_date);
    }

    records
        .into_iter()
        .map(|record| {
            let dates = by_habit.remove(&record.id).unwrap_or_default();
            Habit::derive(record, dates, today)
        })
        .collect()
}

pub fn dates_of(logs: Vec<CompletionLog>) -> BTreeSet<NaiveDate> {
    logs.into_iter().map(|log| log.completed_date).collect()
}
