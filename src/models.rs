use crate::calendar::MonthView;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use std::fmt;

pub const DEFAULT_ICON: &str = "📝";

/// Opaque habit identifier. Backends may hand out numbers or strings; both
/// are carried as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct HabitId(String);

impl HabitId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HabitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for HabitId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(i64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(n) => HabitId(n.to_string()),
            RawId::Text(s) => HabitId(s),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitRecord {
    pub id: HabitId,
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitDraft {
    pub name: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionLog {
    pub habit_id: HabitId,
    pub completed_date: NaiveDate,
}

/// A habit as the page sees it: the stored row plus everything derived from
/// its completion logs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    pub id: HabitId,
    pub name: String,
    pub icon: String,
    pub completed: bool,
    pub streak: u32,
    pub completed_dates: BTreeSet<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct HabitForm {
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
}

impl HabitForm {
    /// Trims the name and falls back to the default icon. `None` when the
    /// name is blank.
    pub fn into_draft(self) -> Option<HabitDraft> {
        let name = self.name.trim();
        if name.is_empty() {
            return None;
        }
        Some(HabitDraft {
            name: name.to_string(),
            icon: icon_or_default(self.icon.as_deref()),
        })
    }
}

pub fn icon_or_default(icon: Option<&str>) -> String {
    match icon.map(str::trim) {
        Some(icon) if !icon.is_empty() => icon.to_string(),
        _ => DEFAULT_ICON.to_string(),
    }
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    #[serde(default)]
    pub month: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ToggleResponse {
    pub habit: Habit,
    pub synced: bool,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub habit: Habit,
    pub completed_dates: BTreeSet<NaiveDate>,
    pub calendar: MonthView,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TodayResponse {
    pub date: String,
}
