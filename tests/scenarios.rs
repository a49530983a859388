use chrono::NaiveDate;
use planner_timeline::engine::{
    compute_visible_window, detect_conflicts, index_items, visible_bars, BarShape, CommitEvent,
    CommitGateway, CommitReply, CommitRequest, DragController, DragMode, EndOutcome, Overscan,
    Viewport, WindowParams,
};
use planner_timeline::error::CommitError;
use planner_timeline::io::ItemStore;
use planner_timeline::model::{compute_timeline, GroupBy, Padding, ScheduleItem, Timeline, ZoomLevel};

fn date(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, m, d).unwrap()
}

fn layout(items: &[ScheduleItem], zoom: ZoomLevel) -> Timeline {
    compute_timeline(items, zoom, GroupBy::Group, Padding::default(), date(10, 1))
}

/// Records every request and keeps the reply handles alive.
#[derive(Default)]
struct Recorder {
    submitted: Vec<(CommitRequest, CommitReply)>,
}

impl CommitGateway for Recorder {
    fn submit(&mut self, request: CommitRequest, reply: CommitReply) {
        self.submitted.push((request, reply));
    }
}

#[test]
fn move_three_days_patches_then_commits_once() {
    let item = ScheduleItem::new("Frame", "P-1", date(10, 10), date(10, 14));
    let timeline = layout(std::slice::from_ref(&item), ZoomLevel::Week);
    let ppd = timeline.pixels_per_day;
    let mut ctl = DragController::new();
    let mut gateway = Recorder::default();

    ctl.begin_drag(&item, DragMode::Move, 200.0, &timeline).unwrap();
    // Several frames on the way; none of them reach the gateway.
    for step in 1..=3 {
        ctl.update_drag(200.0 + step as f32 * ppd);
    }
    assert!(gateway.submitted.is_empty());

    let view = ctl.optimistic_view(std::slice::from_ref(&item));
    assert_eq!(view[0].start, Some(date(10, 13)));
    assert_eq!(view[0].end, Some(date(10, 17)));

    let outcome = ctl.end_drag(&mut gateway);
    assert_eq!(gateway.submitted.len(), 1);
    let (request, _) = &gateway.submitted[0];
    assert_eq!((request.start, request.end), (date(10, 13), date(10, 17)));
    assert_eq!(outcome, EndOutcome::Submitted(*request));
}

#[test]
fn shared_boundary_day_is_one_conflict() {
    let items = vec![
        ScheduleItem::new("A", "P-1", date(10, 10), date(10, 14)).with_resource("R1"),
        ScheduleItem::new("B", "P-2", date(10, 14), date(10, 18)).with_resource("R1"),
    ];
    let report = detect_conflicts(&items);
    assert_eq!(report.count, 1);
    assert_eq!(report.pairs, vec![(items[0].id, items[1].id)]);
}

#[test]
fn empty_collection_gets_a_default_range() {
    let today = date(10, 1);
    let timeline = compute_timeline(&[], ZoomLevel::Day, GroupBy::Group, Padding::default(), today);
    assert_eq!(timeline.range.start, date(9, 1));
    assert_eq!(timeline.range.end, date(11, 30));
    assert_eq!(timeline.total_days(), 90);
    assert!(timeline.total_width > 0.0);
}

#[test]
fn rejected_commit_restores_pre_drag_dates() {
    let item = ScheduleItem::new("Glass", "P-2", date(10, 10), date(10, 14));
    let timeline = layout(std::slice::from_ref(&item), ZoomLevel::Day);
    let mut store = ItemStore::new("plan", vec![item.clone()]);
    store.reject_commits = true;
    let mut ctl = DragController::new();

    ctl.begin_drag(&item, DragMode::ResizeEnd, 0.0, &timeline).unwrap();
    ctl.update_drag(160.0);
    assert!(matches!(ctl.end_drag(&mut store), EndOutcome::Submitted(_)));

    let events = ctl.poll_commits();
    assert!(matches!(
        &events[..],
        [CommitEvent::RolledBack(failure)]
            if failure.item_id == item.id
                && matches!(failure.error, CommitError::Rejected { .. })
    ));
    assert!(!ctl.overlay().contains(item.id));
    let view = ctl.optimistic_view(store.items());
    assert_eq!((view[0].start, view[0].end), (Some(date(10, 10)), Some(date(10, 14))));
}

#[test]
fn patch_wins_over_refreshed_canonical_data_while_in_flight() {
    let item = ScheduleItem::new("Weld", "P-3", date(10, 10), date(10, 12));
    let timeline = layout(std::slice::from_ref(&item), ZoomLevel::Day);
    let mut ctl = DragController::new();
    let mut gateway = Recorder::default();

    ctl.begin_drag(&item, DragMode::Move, 0.0, &timeline).unwrap();
    ctl.update_drag(160.0);
    ctl.end_drag(&mut gateway);

    // The collaborator refreshes with unrelated data before replying.
    let mut refreshed = item.clone();
    refreshed.name = "Weld frames".into();
    let view = ctl.optimistic_view(std::slice::from_ref(&refreshed));
    assert_eq!(view[0].name, "Weld frames");
    assert_eq!(view[0].start, Some(date(10, 12)));

    let (_, reply) = gateway.submitted.pop().unwrap();
    reply.succeed();
    assert_eq!(ctl.poll_commits().len(), 1);
    let view = ctl.optimistic_view(std::slice::from_ref(&refreshed));
    assert_eq!(view[0].start, Some(date(10, 10)));
}

#[test]
fn slow_store_keeps_two_commits_in_flight() {
    let a = ScheduleItem::new("A", "P-1", date(10, 10), date(10, 12)).with_resource("Ana");
    let b = ScheduleItem::new("B", "P-1", date(10, 20), date(10, 22)).with_resource("Ana");
    let mut store = ItemStore::new("plan", vec![a.clone(), b.clone()]);
    store.latency_frames = 3;
    let timeline = layout(store.items(), ZoomLevel::Day);
    let mut ctl = DragController::new();

    ctl.begin_drag(&a, DragMode::Move, 0.0, &timeline).unwrap();
    ctl.update_drag(80.0);
    ctl.end_drag(&mut store);
    store.tick();

    ctl.begin_drag(&b, DragMode::Move, 0.0, &timeline).unwrap();
    ctl.update_drag(-80.0 * 8.0);
    ctl.end_drag(&mut store);
    assert_eq!(ctl.overlay().committing(), 2);

    // Both now overlap on Ana in the optimistic view only.
    let view = ctl.optimistic_view(store.items());
    assert_eq!(detect_conflicts(&view).count, 1);
    assert_eq!(detect_conflicts(store.items()).count, 0);

    let mut confirmed = Vec::new();
    for _ in 0..4 {
        store.tick();
        confirmed.extend(ctl.poll_commits());
    }
    assert_eq!(confirmed.len(), 2);
    assert!(ctl.overlay().is_empty());
    assert_eq!(store.get(a.id).unwrap().start, Some(date(10, 11)));
    assert_eq!(store.get(b.id).unwrap().start, Some(date(10, 12)));
    assert_eq!(detect_conflicts(store.items()).count, 1);
}

#[test]
fn inverted_and_undated_items_never_become_bars() {
    let items = vec![
        ScheduleItem::new("Ok", "P-1", date(10, 10), date(10, 12)).with_resource("R"),
        ScheduleItem::new("Backwards", "P-1", date(10, 12), date(10, 10)).with_resource("R"),
        ScheduleItem::unscheduled("Later", "P-1").with_resource("R"),
    ];
    let timeline = layout(&items, ZoomLevel::Day);
    let params = WindowParams::for_timeline(&timeline, 36.0, Overscan::default());
    let viewport = Viewport {
        scroll_left: 0.0,
        scroll_top: 0.0,
        width: 1.0e6,
        height: 1.0e6,
    };
    let window = compute_visible_window(&viewport, &params);
    let by_id = index_items(&items);
    let bars = visible_bars(&timeline, &by_id, &window, 36.0);

    assert_eq!(bars.len(), 3);
    let dated: Vec<_> = bars
        .iter()
        .filter(|b| matches!(b.shape, BarShape::Dated { .. }))
        .map(|b| b.item.name.as_str())
        .collect();
    assert_eq!(dated, ["Ok"]);
    assert!(detect_conflicts(&items).is_clear());

    let mut ctl = DragController::new();
    assert!(ctl.begin_drag(&items[1], DragMode::Move, 0.0, &timeline).is_err());
}
