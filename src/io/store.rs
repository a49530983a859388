//! In-memory stand-in for the application that owns the items.
//!
//! Supplies the canonical list and accepts commit requests. Requests can be
//! held for a number of frames, or failed on purpose, to exercise the
//! optimistic path the way a slow or flaky backend would.

use std::collections::VecDeque;

use tracing::{debug, info};

use crate::engine::{CommitGateway, CommitReply, CommitRequest};
use crate::error::CommitError;
use crate::io::file::Snapshot;
use crate::model::ScheduleItem;

#[derive(Debug)]
struct Queued {
    frames_left: u32,
    request: CommitRequest,
    reply: CommitReply,
}

#[derive(Debug, Default)]
pub struct ItemStore {
    name: String,
    items: Vec<ScheduleItem>,
    revision: u64,
    /// Frames a commit waits before it is applied.
    pub latency_frames: u32,
    /// Reject every commit (for trying out rollback).
    pub reject_commits: bool,
    queue: VecDeque<Queued>,
}

impl ItemStore {
    pub fn new(name: impl Into<String>, items: Vec<ScheduleItem>) -> Self {
        Self {
            name: name.into(),
            items,
            ..Default::default()
        }
    }

    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            name: self.name.clone(),
            items: self.items.clone(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current canonical items.
    pub fn items(&self) -> &[ScheduleItem] {
        &self.items
    }

    pub fn get(&self, id: uuid::Uuid) -> Option<&ScheduleItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Bumped on every change, so callers know when to re-layout.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replace the whole collection (load/import).
    pub fn replace(&mut self, name: impl Into<String>, items: Vec<ScheduleItem>) {
        self.name = name.into();
        self.items = items;
        self.revision += 1;
    }

    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// Validate and apply new dates for one item.
    pub fn apply(&mut self, request: &CommitRequest) -> Result<(), CommitError> {
        if self.reject_commits {
            return Err(CommitError::Rejected {
                reason: "store is refusing writes".into(),
            });
        }
        if request.start > request.end {
            return Err(CommitError::InvalidRange {
                start: request.start,
                end: request.end,
            });
        }
        let item = self
            .items
            .iter_mut()
            .find(|i| i.id == request.item_id)
            .ok_or(CommitError::UnknownItem(request.item_id))?;
        item.start = Some(request.start);
        item.end = Some(request.end);
        self.revision += 1;
        info!(item = %request.item_id, revision = self.revision, "item rescheduled");
        Ok(())
    }

    /// Frame boundary: apply commits whose latency has elapsed.
    pub fn tick(&mut self) {
        for queued in &mut self.queue {
            queued.frames_left = queued.frames_left.saturating_sub(1);
        }
        while self.queue.front().is_some_and(|q| q.frames_left == 0) {
            if let Some(Queued { request, reply, .. }) = self.queue.pop_front() {
                let result = self.apply(&request);
                reply.resolve(result);
            }
        }
    }
}

impl CommitGateway for ItemStore {
    fn submit(&mut self, request: CommitRequest, reply: CommitReply) {
        if self.latency_frames == 0 {
            let result = self.apply(&request);
            reply.resolve(result);
            return;
        }
        debug!(item = %request.item_id, frames = self.latency_frames, "commit queued");
        self.queue.push_back(Queued {
            frames_left: self.latency_frames,
            request,
            reply,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{CommitEvent, DragController, DragMode};
    use crate::model::{compute_timeline, GroupBy, Padding, ZoomLevel};
    use chrono::NaiveDate;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, d).unwrap()
    }

    fn drag_one_day(store: &mut ItemStore, ctl: &mut DragController) {
        let item = store.items()[0].clone();
        let timeline = compute_timeline(
            store.items(),
            ZoomLevel::Day,
            GroupBy::Group,
            Padding::default(),
            date(1),
        );
        ctl.begin_drag(&item, DragMode::Move, 0.0, &timeline).unwrap();
        ctl.update_drag(80.0);
        ctl.end_drag(store);
    }

    #[test]
    fn immediate_commit_updates_items() {
        let mut store = ItemStore::new("t", vec![ScheduleItem::new("a", "G", date(10), date(12))]);
        let mut ctl = DragController::new();
        drag_one_day(&mut store, &mut ctl);

        assert_eq!(store.items()[0].start, Some(date(11)));
        assert_eq!(store.revision(), 1);
        assert!(matches!(&ctl.poll_commits()[..], [CommitEvent::Committed { .. }]));
    }

    #[test]
    fn latency_holds_the_overlay() {
        let mut store = ItemStore::new("t", vec![ScheduleItem::new("a", "G", date(10), date(12))]);
        store.latency_frames = 2;
        let mut ctl = DragController::new();
        drag_one_day(&mut store, &mut ctl);

        store.tick();
        assert!(ctl.poll_commits().is_empty());
        let view = ctl.optimistic_view(store.items());
        assert_eq!(view[0].start, Some(date(11)));
        assert_eq!(store.items()[0].start, Some(date(10)));

        store.tick();
        assert_eq!(store.queued(), 0);
        assert_eq!(ctl.poll_commits().len(), 1);
        assert_eq!(store.items()[0].start, Some(date(11)));
    }

    #[test]
    fn rejection_leaves_items_untouched() {
        let mut store = ItemStore::new("t", vec![ScheduleItem::new("a", "G", date(10), date(12))]);
        store.reject_commits = true;
        let mut ctl = DragController::new();
        drag_one_day(&mut store, &mut ctl);

        assert!(matches!(&ctl.poll_commits()[..], [CommitEvent::RolledBack(_)]));
        assert_eq!(store.items()[0].start, Some(date(10)));
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn apply_validates() {
        let mut store = ItemStore::new("t", vec![]);
        let request = CommitRequest {
            ticket: crate::engine::CommitTicket(1),
            item_id: uuid::Uuid::new_v4(),
            start: date(5),
            end: date(4),
        };
        assert!(matches!(store.apply(&request), Err(CommitError::InvalidRange { .. })));
        let request = CommitRequest {
            end: date(6),
            ..request
        };
        assert_eq!(store.apply(&request), Err(CommitError::UnknownItem(request.item_id)));
    }
}
