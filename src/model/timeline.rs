use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::calendar::{add_days, day_difference, enumerate_days};
use super::item::ScheduleItem;

/// Row key for items without a resource when grouping by resource.
pub const UNASSIGNED: &str = "Unassigned";

/// Horizontal resolution of the chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoomLevel {
    Day,
    #[default]
    Week,
    Month,
}

impl ZoomLevel {
    pub const ALL: [ZoomLevel; 3] = [ZoomLevel::Day, ZoomLevel::Week, ZoomLevel::Month];

    pub fn pixels_per_day(self) -> f32 {
        match self {
            ZoomLevel::Day => 80.0,
            ZoomLevel::Week => 30.0,
            ZoomLevel::Month => 10.0,
        }
    }

    /// Days skipped by one "previous/next period" step.
    pub fn period_days(self) -> i64 {
        match self {
            ZoomLevel::Day => 1,
            ZoomLevel::Week => 7,
            ZoomLevel::Month => 30,
        }
    }

    pub fn zoom_in(self) -> Self {
        match self {
            ZoomLevel::Month => ZoomLevel::Week,
            ZoomLevel::Week | ZoomLevel::Day => ZoomLevel::Day,
        }
    }

    pub fn zoom_out(self) -> Self {
        match self {
            ZoomLevel::Day => ZoomLevel::Week,
            ZoomLevel::Week | ZoomLevel::Month => ZoomLevel::Month,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ZoomLevel::Day => "Day",
            ZoomLevel::Week => "Week",
            ZoomLevel::Month => "Month",
        }
    }
}

/// Which item attribute decides the row an item lands in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupBy {
    /// The owning group (position, category).
    #[default]
    Group,
    /// The assigned resource; unassigned items share one row.
    Resource,
}

impl GroupBy {
    pub fn key(self, item: &ScheduleItem) -> &str {
        match self {
            GroupBy::Group => &item.group,
            GroupBy::Resource => item.resource.as_deref().unwrap_or(UNASSIGNED),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GroupBy::Group => "Groups",
            GroupBy::Resource => "Resources",
        }
    }
}

/// Days added around the scheduled dates. Wider on the right for future work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Padding {
    pub left_days: i64,
    pub right_days: i64,
}

impl Default for Padding {
    fn default() -> Self {
        Self {
            left_days: 60,
            right_days: 120,
        }
    }
}

/// Narrows the items that get rows. The date range ignores the filter so the
/// grid does not jump while typing a search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemFilter {
    /// Case-insensitive substring over name and group.
    pub search: String,
    /// When set, only these group keys are shown.
    pub groups: Option<BTreeSet<String>>,
}

impl ItemFilter {
    pub fn matches(&self, item: &ScheduleItem) -> bool {
        if let Some(groups) = &self.groups {
            if !groups.contains(&item.group) {
                return false;
            }
        }
        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        format!("{} {}", item.group, item.name)
            .to_lowercase()
            .contains(&needle)
    }
}

/// The calendar span covered by the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl TimelineRange {
    /// The range used when nothing is dated: 30 days back, 60 forward.
    pub fn around(today: NaiveDate) -> Self {
        Self {
            start: add_days(today, -30),
            end: add_days(today, 60),
        }
    }

    pub fn total_days(&self) -> i64 {
        day_difference(self.start, self.end)
    }
}

/// A grouping bucket and the items placed in it, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub key: String,
    pub item_ids: Vec<Uuid>,
}

/// One line of the rendered grid: a group header or a single item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlatRow {
    Header { group: usize },
    Item { group: usize, item_id: Uuid },
}

/// Everything the chart needs to lay items out horizontally and vertically.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    pub range: TimelineRange,
    pub zoom: ZoomLevel,
    pub pixels_per_day: f32,
    pub rows: Vec<Row>,
    pub flat_rows: Vec<FlatRow>,
    pub total_width: f32,
}

impl Timeline {
    pub fn total_days(&self) -> i64 {
        self.range.total_days()
    }

    /// Whole days from the range start to `date`.
    pub fn day_offset(&self, date: NaiveDate) -> i64 {
        day_difference(self.range.start, date)
    }

    /// Convert a date to an x-pixel offset from the range start.
    pub fn date_to_x(&self, date: NaiveDate) -> f32 {
        self.day_offset(date) as f32 * self.pixels_per_day
    }

    /// Convert an x-pixel offset back to the nearest date.
    pub fn x_to_date(&self, x: f32) -> NaiveDate {
        let days = (x / self.pixels_per_day).round() as i64;
        add_days(self.range.start, days)
    }

    /// Horizontal scroll that brings `date` into view with a small lead-in.
    pub fn scroll_offset_for_date(&self, date: NaiveDate) -> f32 {
        (self.date_to_x(date) - 100.0).max(0.0)
    }

    /// Pixels moved by one previous/next period step at the current zoom.
    pub fn period_step(&self) -> f32 {
        self.zoom.period_days() as f32 * self.pixels_per_day
    }

    /// Dates for the header strip between two day indices (end exclusive).
    pub fn days_between(&self, day_start: usize, day_end: usize) -> Vec<NaiveDate> {
        if day_end <= day_start {
            return Vec::new();
        }
        enumerate_days(
            add_days(self.range.start, day_start as i64),
            add_days(self.range.start, day_end as i64 - 1),
        )
    }
}

/// Lay out the full, unfiltered item collection.
pub fn compute_timeline(
    items: &[ScheduleItem],
    zoom: ZoomLevel,
    group_by: GroupBy,
    padding: Padding,
    today: NaiveDate,
) -> Timeline {
    compute_filtered_timeline(items, zoom, group_by, padding, &ItemFilter::default(), today)
}

/// Lay out the items that pass `filter`. Pure: equal inputs give equal output.
pub fn compute_filtered_timeline(
    items: &[ScheduleItem],
    zoom: ZoomLevel,
    group_by: GroupBy,
    padding: Padding,
    filter: &ItemFilter,
    today: NaiveDate,
) -> Timeline {
    let range = compute_range(items, padding, today);
    let pixels_per_day = zoom.pixels_per_day();

    let (rows, flat_rows) = build_rows(items, group_by, filter);

    Timeline {
        range,
        zoom,
        pixels_per_day,
        rows,
        flat_rows,
        total_width: range.total_days() as f32 * pixels_per_day,
    }
}

fn compute_range(items: &[ScheduleItem], padding: Padding, today: NaiveDate) -> TimelineRange {
    let spans = items.iter().filter_map(ScheduleItem::span);
    let bounds = spans.fold(None, |acc: Option<(NaiveDate, NaiveDate)>, span| {
        Some(match acc {
            None => (span.start, span.end),
            Some((lo, hi)) => (lo.min(span.start), hi.max(span.end)),
        })
    });

    match bounds {
        Some((min, max)) => TimelineRange {
            start: add_days(min, -padding.left_days),
            end: add_days(max, padding.right_days),
        },
        None => TimelineRange::around(today),
    }
}

fn build_rows(
    items: &[ScheduleItem],
    group_by: GroupBy,
    filter: &ItemFilter,
) -> (Vec<Row>, Vec<FlatRow>) {
    let mut buckets: Vec<(String, Vec<&ScheduleItem>)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for item in items.iter().filter(|i| filter.matches(i)) {
        let key = group_by.key(item);
        let slot = *index.entry(key).or_insert_with(|| {
            buckets.push((key.to_string(), Vec::new()));
            buckets.len() - 1
        });
        buckets[slot].1.push(item);
    }

    let mut rows = Vec::with_capacity(buckets.len());
    let mut flat_rows = Vec::with_capacity(buckets.len() + items.len());
    for (group, (key, mut members)) in buckets.into_iter().enumerate() {
        // Stable: dated items by start, undated ones after them in input order.
        members.sort_by_key(|item| match item.span() {
            Some(span) => (false, Some(span.start)),
            None => (true, None),
        });
        flat_rows.push(FlatRow::Header { group });
        flat_rows.extend(members.iter().map(|item| FlatRow::Item {
            group,
            item_id: item.id,
        }));
        rows.push(Row {
            key,
            item_ids: members.iter().map(|item| item.id).collect(),
        });
    }

    (rows, flat_rows)
}
