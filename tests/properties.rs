use chrono::NaiveDate;
use proptest::prelude::*;

use planner_timeline::engine::{
    compute_visible_window, detect_conflicts, CommitGateway, CommitReply, CommitRequest,
    DragController, DragMode, EndOutcome, Overscan, Viewport, WindowParams,
};
use planner_timeline::model::calendar::add_days;
use planner_timeline::model::{compute_timeline, GroupBy, Padding, ScheduleItem, ZoomLevel};

fn base() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
}

#[derive(Default)]
struct Recorder {
    requests: Vec<CommitRequest>,
    replies: Vec<CommitReply>,
}

impl CommitGateway for Recorder {
    fn submit(&mut self, request: CommitRequest, reply: CommitReply) {
        self.requests.push(request);
        self.replies.push(reply);
    }
}

fn zoom() -> impl Strategy<Value = ZoomLevel> {
    prop::sample::select(ZoomLevel::ALL.to_vec())
}

/// Items on a small set of resources; some undated, some inverted.
fn items() -> impl Strategy<Value = Vec<ScheduleItem>> {
    prop::collection::vec(
        (
            prop::option::of((0i64..120, -3i64..15)),
            0usize..3,
            0usize..4,
        ),
        0..24,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (dates, group, resource))| {
                let group = format!("G{}", group);
                let item = match dates {
                    Some((start, len)) => ScheduleItem::new(
                        format!("item {}", i),
                        group,
                        add_days(base(), start),
                        add_days(base(), start + len),
                    ),
                    None => ScheduleItem::unscheduled(format!("item {}", i), group),
                };
                item.with_resource(format!("R{}", resource))
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn visible_window_stays_in_bounds(
        scroll_left in -500.0f32..50_000.0,
        scroll_top in -500.0f32..50_000.0,
        width in 0.0f32..4_000.0,
        height in 0.0f32..4_000.0,
        row_height in 1.0f32..80.0,
        pixels_per_day in 1.0f32..120.0,
        total_rows in 0usize..5_000,
        total_days in 0usize..2_000,
        overscan_rows in 0usize..30,
        overscan_days in 0usize..30,
    ) {
        let window = compute_visible_window(
            &Viewport { scroll_left, scroll_top, width, height },
            &WindowParams {
                row_height,
                pixels_per_day,
                total_rows,
                total_days,
                overscan: Overscan { rows: overscan_rows, days: overscan_days },
            },
        );
        prop_assert!(window.row_start <= window.row_end);
        prop_assert!(window.row_end <= total_rows);
        prop_assert!(window.day_start <= window.day_end);
        prop_assert!(window.day_end <= total_days);
    }

    #[test]
    fn conflicts_are_reported_once_per_overlapping_pair(items in items()) {
        let report = detect_conflicts(&items);
        prop_assert_eq!(report.count, report.pairs.len());

        let spans: Vec<_> = items.iter().filter_map(|i| i.span()).collect();
        let mut expected = 0;
        for (i, a) in spans.iter().enumerate() {
            for b in &spans[i + 1..] {
                if a.start <= b.end && b.start <= a.end {
                    expected += 1;
                }
            }
        }
        prop_assert_eq!(report.count, expected);

        let reversed: Vec<_> = items.iter().rev().cloned().collect();
        prop_assert_eq!(detect_conflicts(&reversed).count, report.count);

        for (a, b) in &report.pairs {
            prop_assert_ne!(a, b);
            prop_assert!(!report.pairs.contains(&(*b, *a)));
        }
    }

    #[test]
    fn timeline_is_a_pure_function(items in items(), zoom in zoom(), by_resource in any::<bool>()) {
        let group_by = if by_resource { GroupBy::Resource } else { GroupBy::Group };
        let first = compute_timeline(&items, zoom, group_by, Padding::default(), base());
        let second = compute_timeline(&items, zoom, group_by, Padding::default(), base());
        prop_assert_eq!(&first, &second);
        prop_assert!(first.total_width > 0.0);
        let placed: usize = first.rows.iter().map(|r| r.item_ids.len()).sum();
        prop_assert_eq!(placed, items.len());
        prop_assert_eq!(first.flat_rows.len(), items.len() + first.rows.len());
    }

    #[test]
    fn there_and_back_commits_the_original_dates(
        start in 0i64..200,
        len in 0i64..20,
        days in 1i64..40,
        anchor in 0.0f32..2_000.0,
        zoom in zoom(),
    ) {
        let item = ScheduleItem::new(
            "bar",
            "G",
            add_days(base(), start),
            add_days(base(), start + len),
        );
        let timeline = compute_timeline(
            std::slice::from_ref(&item),
            zoom,
            GroupBy::Group,
            Padding::default(),
            base(),
        );
        let ppd = timeline.pixels_per_day;
        let mut ctl = DragController::new();
        let mut gateway = Recorder::default();

        ctl.begin_drag(&item, DragMode::Move, anchor, &timeline).unwrap();
        ctl.update_drag(anchor + days as f32 * ppd);
        ctl.update_drag(anchor);
        let outcome = ctl.end_drag(&mut gateway);

        prop_assert!(matches!(outcome, EndOutcome::Submitted(_)));
        prop_assert_eq!(gateway.requests.len(), 1);
        prop_assert_eq!(Some(gateway.requests[0].start), item.start);
        prop_assert_eq!(Some(gateway.requests[0].end), item.end);
    }

    #[test]
    fn resizing_never_commits_an_inverted_range(
        len in 1i64..10,
        moves in prop::collection::vec(-40.0f32..40.0, 1..12),
        resize_start in any::<bool>(),
    ) {
        let item = ScheduleItem::new("bar", "G", base(), add_days(base(), len));
        let timeline = compute_timeline(
            std::slice::from_ref(&item),
            ZoomLevel::Day,
            GroupBy::Group,
            Padding::default(),
            base(),
        );
        let ppd = timeline.pixels_per_day;
        let mode = if resize_start { DragMode::ResizeStart } else { DragMode::ResizeEnd };
        let mut ctl = DragController::new();
        let mut gateway = Recorder::default();

        ctl.begin_drag(&item, mode, 0.0, &timeline).unwrap();
        for days in moves {
            ctl.update_drag(days * ppd);
            let patch = ctl.overlay().get(item.id).copied().unwrap();
            prop_assert!(patch.start < patch.end);
        }
        if let EndOutcome::Submitted(request) = ctl.end_drag(&mut gateway) {
            prop_assert!(request.start < request.end);
        }
    }
}
