use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::calendar::day_difference;

/// Lifecycle status of a scheduled work item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    #[default]
    Waiting,
    InProgress,
    Done,
    Late,
    Blocked,
}

impl ItemStatus {
    pub const ALL: [ItemStatus; 5] = [
        ItemStatus::Waiting,
        ItemStatus::InProgress,
        ItemStatus::Done,
        ItemStatus::Late,
        ItemStatus::Blocked,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ItemStatus::Waiting => "Waiting",
            ItemStatus::InProgress => "In progress",
            ItemStatus::Done => "Done",
            ItemStatus::Late => "Late",
            ItemStatus::Blocked => "Blocked",
        }
    }

    /// Parse the loose status strings found in imported sheets.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "waiting" | "not started" | "not-started" | "new" | "planned" => {
                Some(ItemStatus::Waiting)
            }
            "in progress" | "in-progress" | "in_progress" | "active" | "started" => {
                Some(ItemStatus::InProgress)
            }
            "done" | "finished" | "complete" | "completed" => Some(ItemStatus::Done),
            "late" | "overdue" => Some(ItemStatus::Late),
            "blocked" | "on hold" => Some(ItemStatus::Blocked),
            _ => None,
        }
    }
}

/// Inclusive calendar span with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateSpan {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateSpan {
    /// Returns `None` when the span would be inverted.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    /// Closed-interval overlap: sharing a boundary day counts.
    pub fn overlaps(&self, other: &DateSpan) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Number of days from start to end (0 for a single-day span).
    pub fn length_days(&self) -> i64 {
        day_difference(self.start, self.end)
    }
}

/// Where an item stands with respect to the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    Scheduled(DateSpan),
    /// Start or end is absent. Rendered through the missing-dates path.
    MissingDates,
    /// Both dates present but `start > end`. Treated like missing dates.
    Inverted { start: NaiveDate, end: NaiveDate },
}

/// A single schedulable unit (position, process or person assignment).
///
/// Owned by whoever supplies the item list; the engine only reads it and
/// requests date changes through a commit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleItem {
    pub id: Uuid,
    pub name: String,
    /// Owning group (position, category) used for row placement.
    pub group: String,
    #[serde(default)]
    pub start: Option<NaiveDate>,
    /// Inclusive end date.
    #[serde(default)]
    pub end: Option<NaiveDate>,
    /// Completion percentage, 0–100.
    #[serde(default)]
    pub progress: Option<u8>,
    /// Resource (person, machine) used for double-booking checks.
    #[serde(default)]
    pub resource: Option<String>,
    #[serde(default)]
    pub status: ItemStatus,
}

impl ScheduleItem {
    /// Create a dated item with sensible defaults.
    pub fn new(
        name: impl Into<String>,
        group: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            ..Self::unscheduled(name, group)
        }
    }

    /// Create an item that has not been placed on the calendar yet.
    pub fn unscheduled(name: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            group: group.into(),
            start: None,
            end: None,
            progress: None,
            resource: None,
            status: ItemStatus::default(),
        }
    }

    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = Some(resource.into());
        self
    }

    pub fn with_progress(mut self, percent: u8) -> Self {
        self.progress = Some(percent.min(100));
        self
    }

    pub fn with_status(mut self, status: ItemStatus) -> Self {
        self.status = status;
        self
    }

    pub fn schedule(&self) -> Schedule {
        match (self.start, self.end) {
            (Some(start), Some(end)) => match DateSpan::new(start, end) {
                Some(span) => Schedule::Scheduled(span),
                None => Schedule::Inverted { start, end },
            },
            _ => Schedule::MissingDates,
        }
    }

    /// The item's span, if it may be placed in pixel space.
    pub fn span(&self) -> Option<DateSpan> {
        match self.schedule() {
            Schedule::Scheduled(span) => Some(span),
            Schedule::MissingDates | Schedule::Inverted { .. } => None,
        }
    }

    pub fn is_scheduled(&self) -> bool {
        self.span().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    #[test]
    fn classification() {
        let ok = ScheduleItem::new("Frame", "P-1", date(10, 10), date(10, 14));
        assert_eq!(
            ok.schedule(),
            Schedule::Scheduled(DateSpan {
                start: date(10, 10),
                end: date(10, 14)
            })
        );

        let mut half = ScheduleItem::unscheduled("Glass", "P-1");
        half.start = Some(date(10, 10));
        assert_eq!(half.schedule(), Schedule::MissingDates);
        assert!(!half.is_scheduled());

        let inverted = ScheduleItem::new("Door", "P-2", date(10, 14), date(10, 10));
        assert!(matches!(inverted.schedule(), Schedule::Inverted { .. }));
        assert_eq!(inverted.span(), None);
    }

    #[test]
    fn single_day_span_is_scheduled() {
        let item = ScheduleItem::new("Handover", "P-1", date(10, 10), date(10, 10));
        assert_eq!(item.span().map(|s| s.length_days()), Some(0));
    }

    #[test]
    fn overlap_is_inclusive() {
        let a = DateSpan::new(date(10, 10), date(10, 14)).unwrap();
        let b = DateSpan::new(date(10, 14), date(10, 18)).unwrap();
        let c = DateSpan::new(date(10, 15), date(10, 18)).unwrap();
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn progress_is_capped() {
        let item = ScheduleItem::unscheduled("Survey", "P-3").with_progress(140);
        assert_eq!(item.progress, Some(100));
    }

    #[test]
    fn status_parsing() {
        assert_eq!(ItemStatus::parse(" Finished "), Some(ItemStatus::Done));
        assert_eq!(ItemStatus::parse("in-progress"), Some(ItemStatus::InProgress));
        assert_eq!(ItemStatus::parse("whatever"), None);
    }

    #[test]
    fn deserializes_without_optional_fields() {
        let json = r#"{
            "id": "7f0e5a43-4a8c-4c4e-9f57-0d7c1c1d2a11",
            "name": "Install",
            "group": "P-7"
        }"#;
        let item: ScheduleItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.schedule(), Schedule::MissingDates);
        assert_eq!(item.status, ItemStatus::Waiting);
    }
}
