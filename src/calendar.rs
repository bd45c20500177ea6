use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DayStatus {
    Success,
    Failure,
    Future,
}

pub fn classify(date: NaiveDate, dates: &BTreeSet<NaiveDate>, today: NaiveDate) -> DayStatus {
    if date > today {
        DayStatus::Future
    } else if dates.contains(&date) {
        DayStatus::Success
    } else {
        DayStatus::Failure
    }
}

/// A calendar month. Navigation is plain arithmetic and never reads data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthCursor {
    year: i32,
    month: u32,
}

impl MonthCursor {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Parses `YYYY-MM`.
    pub fn parse(value: &str) -> Option<Self> {
        let (year, month) = value.trim().split_once('-')?;
        Self::new(year.parse().ok()?, month.parse().ok()?)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Self { year: self.year - 1, month: 12 }
        } else {
            Self { year: self.year, month: self.month - 1 }
        }
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self { year: self.year + 1, month: 1 }
        } else {
            Self { year: self.year, month: self.month + 1 }
        }
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn days_in_month(&self) -> u32 {
        let next = self.next().first_day();
        (next - self.first_day()).num_days() as u32
    }
}

impl fmt::Display for MonthCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub day: u32,
    pub status: DayStatus,
    pub is_today: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthView {
    pub month: String,
    pub year: i32,
    pub month_number: u32,
    /// Empty cells before the 1st in a Sunday-first grid.
    pub leading_blanks: u32,
    pub days: Vec<CalendarDay>,
    pub prev: String,
    pub next: String,
}

pub fn month_view(cursor: MonthCursor, dates: &BTreeSet<NaiveDate>, today: NaiveDate) -> MonthView {
    let first = cursor.first_day();
    let days = first
        .iter_days()
        .take(cursor.days_in_month() as usize)
        .map(|date| CalendarDay {
            date,
            day: date.day(),
            status: classify(date, dates, today),
            is_today: date == today,
        })
        .collect();

    MonthView {
        month: cursor.to_string(),
        year: cursor.year(),
        month_number: cursor.month(),
        leading_blanks: first.weekday().num_days_from_sunday(),
        days,
        prev: cursor.prev().to_string(),
        next: cursor.next().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn empty_history_marks_past_days_failed() {
        let today = day(2026, 1, 15);
        let view = month_view(MonthCursor::containing(today), &BTreeSet::new(), today);

        assert_eq!(view.days.len(), 31);
        for entry in &view.days {
            if entry.day <= 15 {
                assert_eq!(entry.status, DayStatus::Failure, "day {}", entry.day);
            } else {
                assert_eq!(entry.status, DayStatus::Future, "day {}", entry.day);
            }
        }
        assert!(view.days[14].is_today);
        assert_eq!(view.days.iter().filter(|d| d.is_today).count(), 1);
    }

    #[test]
    fn completed_days_are_successes() {
        let today = day(2026, 1, 15);
        let dates: BTreeSet<_> = [day(2026, 1, 3), day(2026, 1, 15), day(2026, 1, 20)]
            .into_iter()
            .collect();
        let view = month_view(MonthCursor::containing(today), &dates, today);

        assert_eq!(view.days[2].status, DayStatus::Success);
        assert_eq!(view.days[3].status, DayStatus::Failure);
        assert_eq!(view.days[14].status, DayStatus::Success);
        // logged but in the future relative to today
        assert_eq!(view.days[19].status, DayStatus::Future);
    }

    #[test]
    fn navigation_crosses_year_boundaries() {
        let january = MonthCursor::new(2026, 1).unwrap();
        assert_eq!(january.prev().to_string(), "2025-12");
        assert_eq!(january.prev().next(), january);

        let december = MonthCursor::new(2025, 12).unwrap();
        assert_eq!(december.next().to_string(), "2026-01");
    }

    #[test]
    fn month_lengths_follow_the_calendar() {
        assert_eq!(MonthCursor::new(2024, 2).unwrap().days_in_month(), 29);
        assert_eq!(MonthCursor::new(2026, 2).unwrap().days_in_month(), 28);
        assert_eq!(MonthCursor::new(2026, 4).unwrap().days_in_month(), 30);
        assert_eq!(MonthCursor::new(2026, 12).unwrap().days_in_month(), 31);
    }

    #[test]
    fn leading_blanks_match_weekday_of_first() {
        // 2026-02-01 is a Sunday, 2026-10-01 a Thursday.
        let feb = month_view(MonthCursor::new(2026, 2).unwrap(), &BTreeSet::new(), day(2026, 2, 1));
        assert_eq!(feb.leading_blanks, 0);
        let oct = month_view(MonthCursor::new(2026, 10).unwrap(), &BTreeSet::new(), day(2026, 2, 1));
        assert_eq!(oct.leading_blanks, 4);
        assert!(oct.days.iter().all(|d| d.status == DayStatus::Future));
    }

    #[test]
    fn parse_rejects_bad_months() {
        assert_eq!(MonthCursor::parse("2026-03"), MonthCursor::new(2026, 3));
        assert!(MonthCursor::parse("2026-13").is_none());
        assert!(MonthCursor::parse("2026").is_none());
        assert!(MonthCursor::parse("march").is_none());
    }
}
