//! Windowed rendering support.
//!
//! Only rows and days near the scrolled-to region are handed to the surface.
//! Skipping a bar here is purely visual; no data depends on the window.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{DateSpan, FlatRow, ScheduleItem, Timeline};

/// Narrowest a dated bar is drawn, so single-day items stay grabbable.
pub const MIN_BAR_WIDTH: f32 = 20.0;
/// Vertical gap between a bar and its row edges.
pub const BAR_INSET: f32 = 4.0;
/// Left offset and width of the missing-dates placeholder.
pub const MISSING_DATES_X: f32 = 10.0;
pub const MISSING_DATES_WIDTH: f32 = 220.0;

/// What the scroll container currently shows, in content pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Viewport {
    pub scroll_left: f32,
    pub scroll_top: f32,
    pub width: f32,
    pub height: f32,
}

/// Extra rows/days materialized past each edge to hide pop-in while scrolling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overscan {
    pub rows: usize,
    pub days: usize,
}

impl Default for Overscan {
    fn default() -> Self {
        Self { rows: 10, days: 14 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowParams {
    pub row_height: f32,
    pub pixels_per_day: f32,
    pub total_rows: usize,
    pub total_days: usize,
    pub overscan: Overscan,
}

impl WindowParams {
    pub fn for_timeline(timeline: &Timeline, row_height: f32, overscan: Overscan) -> Self {
        Self {
            row_height,
            pixels_per_day: timeline.pixels_per_day,
            total_rows: timeline.flat_rows.len(),
            total_days: timeline.total_days().max(0) as usize,
            overscan,
        }
    }
}

/// Half-open index ranges of rows and days to materialize.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VisibleWindow {
    pub row_start: usize,
    pub row_end: usize,
    pub day_start: usize,
    pub day_end: usize,
}

impl VisibleWindow {
    /// True when a bar covering day indices `first..=last` touches the window.
    pub fn intersects_days(&self, first: i64, last: i64) -> bool {
        last >= self.day_start as i64 && first <= self.day_end as i64
    }

    pub fn is_empty(&self) -> bool {
        self.row_start == self.row_end || self.day_start == self.day_end
    }
}

/// Visible row/day ranges for a viewport, with overscan, clamped to the grid.
pub fn compute_visible_window(viewport: &Viewport, params: &WindowParams) -> VisibleWindow {
    let (row_start, row_end) = visible_span(
        viewport.scroll_top,
        viewport.height,
        params.row_height,
        params.total_rows,
        params.overscan.rows,
    );
    let (day_start, day_end) = visible_span(
        viewport.scroll_left,
        viewport.width,
        params.pixels_per_day,
        params.total_days,
        params.overscan.days,
    );
    VisibleWindow {
        row_start,
        row_end,
        day_start,
        day_end,
    }
}

fn visible_span(offset: f32, extent: f32, unit: f32, total: usize, overscan: usize) -> (usize, usize) {
    // Also rejects NaN units.
    if !(unit > 0.0) || total == 0 {
        return (0, 0);
    }
    let offset = offset.max(0.0);
    let extent = extent.max(0.0);
    let total = total as i64;
    let overscan = overscan as i64;

    let first = (offset / unit).floor() as i64 - overscan;
    let last = ((offset + extent) / unit).ceil() as i64 + overscan;

    let start = first.clamp(0, total);
    let end = last.clamp(start, total);
    (start as usize, end as usize)
}

/// Pixel placement of a dated bar within the chart content.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarGeometry {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// First and last day index the drawn bar touches.
    pub first_day: i64,
    pub last_day: i64,
}

impl BarGeometry {
    pub fn for_span(timeline: &Timeline, span: DateSpan, row: usize, row_height: f32) -> Self {
        let ppd = timeline.pixels_per_day;
        let start_days = timeline.day_offset(span.start);
        let end_days = timeline.day_offset(span.end);
        let x = start_days as f32 * ppd;
        let width = ((end_days - start_days) as f32 * ppd).max(MIN_BAR_WIDTH);
        Self {
            x,
            y: row as f32 * row_height + BAR_INSET,
            width,
            height: row_height - BAR_INSET * 2.0,
            first_day: (x / ppd).floor() as i64,
            last_day: ((x + width) / ppd).ceil() as i64,
        }
    }

    pub fn missing_dates(row: usize, row_height: f32) -> Self {
        Self {
            x: MISSING_DATES_X,
            y: row as f32 * row_height + BAR_INSET,
            width: MISSING_DATES_WIDTH,
            height: row_height - BAR_INSET * 2.0,
            first_day: 0,
            last_day: 0,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

/// How a materialized item row should be drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BarShape {
    Dated { span: DateSpan, geometry: BarGeometry },
    /// Undated or inverted item: never draggable, drawn as a warning.
    MissingDates { geometry: BarGeometry },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleBar<'a> {
    pub row: usize,
    pub item: &'a ScheduleItem,
    pub shape: BarShape,
}

/// Id lookup over an item slice, for resolving flat rows to items.
pub fn index_items(items: &[ScheduleItem]) -> HashMap<Uuid, &ScheduleItem> {
    items.iter().map(|item| (item.id, item)).collect()
}

/// Bars to hand to the surface for `window`.
///
/// `items` is normally the optimistic view, so bars being dragged show their
/// candidate dates while the row order stays that of the canonical layout.
pub fn visible_bars<'a>(
    timeline: &Timeline,
    items: &HashMap<Uuid, &'a ScheduleItem>,
    window: &VisibleWindow,
    row_height: f32,
) -> Vec<VisibleBar<'a>> {
    let rows = timeline
        .flat_rows
        .get(window.row_start..window.row_end)
        .unwrap_or_default();

    rows.iter()
        .enumerate()
        .filter_map(|(offset, flat)| {
            let FlatRow::Item { item_id, .. } = *flat else {
                return None;
            };
            let item = *items.get(&item_id)?;
            let row = window.row_start + offset;
            let shape = match item.span() {
                Some(span) => {
                    let geometry = BarGeometry::for_span(timeline, span, row, row_height);
                    if !window.intersects_days(geometry.first_day, geometry.last_day) {
                        return None;
                    }
                    BarShape::Dated { span, geometry }
                }
                None => BarShape::MissingDates {
                    geometry: BarGeometry::missing_dates(row, row_height),
                },
            };
            Some(VisibleBar { row, item, shape })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{compute_timeline, GroupBy, Padding, ZoomLevel};
    use chrono::NaiveDate;

    fn params(total_rows: usize, total_days: usize) -> WindowParams {
        WindowParams {
            row_height: 36.0,
            pixels_per_day: 30.0,
            total_rows,
            total_days,
            overscan: Overscan::default(),
        }
    }

    #[test]
    fn window_at_origin() {
        let vp = Viewport {
            scroll_left: 0.0,
            scroll_top: 0.0,
            width: 900.0,
            height: 360.0,
        };
        let w = compute_visible_window(&vp, &params(500, 400));
        assert_eq!(
            w,
            VisibleWindow {
                row_start: 0,
                row_end: 20,
                day_start: 0,
                day_end: 44
            }
        );
    }

    #[test]
    fn window_scrolled_into_middle() {
        let vp = Viewport {
            scroll_left: 3000.0,
            scroll_top: 3600.0,
            width: 600.0,
            height: 400.0,
        };
        let w = compute_visible_window(&vp, &params(500, 400));
        // rows: floor(100) - 10 .. ceil(111.1) + 10
        assert_eq!((w.row_start, w.row_end), (90, 122));
        // days: floor(100) - 14 .. ceil(120) + 14
        assert_eq!((w.day_start, w.day_end), (86, 134));
    }

    #[test]
    fn window_clamps_past_the_end() {
        let vp = Viewport {
            scroll_left: 1.0e6,
            scroll_top: 1.0e6,
            width: 800.0,
            height: 600.0,
        };
        let w = compute_visible_window(&vp, &params(12, 30));
        assert_eq!((w.row_start, w.row_end), (12, 12));
        assert_eq!((w.day_start, w.day_end), (30, 30));
        assert!(w.is_empty());
    }

    #[test]
    fn window_handles_degenerate_input() {
        let vp = Viewport {
            scroll_left: -50.0,
            scroll_top: f32::NAN,
            width: 100.0,
            height: 100.0,
        };
        let mut p = params(10, 10);
        let w = compute_visible_window(&vp, &p);
        assert_eq!(w.row_start, 0);
        assert_eq!(w.day_start, 0);

        p.pixels_per_day = 0.0;
        let w = compute_visible_window(&vp, &p);
        assert_eq!((w.day_start, w.day_end), (0, 0));
    }

    #[test]
    fn geometry_enforces_min_width() {
        let d = NaiveDate::from_ymd_opt(2025, 10, 10).unwrap();
        let items = vec![ScheduleItem::new("Handover", "P-1", d, d)];
        let t = compute_timeline(&items, ZoomLevel::Week, GroupBy::Group, Padding::default(), d);
        let g = BarGeometry::for_span(&t, items[0].span().unwrap(), 1, 36.0);
        assert_eq!(g.x, 60.0 * 30.0);
        assert_eq!(g.width, MIN_BAR_WIDTH);
        assert_eq!(g.y, 40.0);
        assert_eq!(g.height, 28.0);
        assert_eq!((g.first_day, g.last_day), (60, 61));
    }

    #[test]
    fn visible_bars_filters_rows_and_days() {
        let day = |n: u32| NaiveDate::from_ymd_opt(2025, 1, n).unwrap();
        let items = vec![
            ScheduleItem::new("Early", "G", day(1), day(3)),
            ScheduleItem::new("Late", "G", day(28), day(31)),
            ScheduleItem::unscheduled("Undated", "G"),
        ];
        let padding = Padding {
            left_days: 0,
            right_days: 0,
        };
        let t = compute_timeline(&items, ZoomLevel::Day, GroupBy::Group, padding, day(1));
        let lookup = index_items(&items);

        let window = VisibleWindow {
            row_start: 0,
            row_end: t.flat_rows.len(),
            day_start: 0,
            day_end: 10,
        };
        let bars = visible_bars(&t, &lookup, &window, 36.0);
        let names: Vec<_> = bars.iter().map(|b| b.item.name.as_str()).collect();
        assert_eq!(names, ["Early", "Undated"]);
        assert!(matches!(bars[1].shape, BarShape::MissingDates { .. }));
        assert_eq!(bars[1].row, 3);

        let rows_only_header = VisibleWindow {
            row_start: 0,
            row_end: 1,
            ..window
        };
        assert!(visible_bars(&t, &lookup, &rows_only_header, 36.0).is_empty());
    }
}
