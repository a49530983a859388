//! Pointer-driven move/resize of a single bar.
//!
//! ```text
//! Idle ──pointer-down──▶ Dragging ──pointer-up──▶ Committing ──ok──▶ Idle
//!                         │  ▲                         │
//!                         └──┘ pointer-move            └──err──▶ RollingBack ──▶ Idle
//! ```
//!
//! Pointer moves only touch the [`OptimisticOverlay`]. The gateway sees one
//! request per drag, issued at release. The controller returns to idle as soon
//! as the request is handed off, so a second bar can be dragged while the
//! first commit is still out; replies are picked up by [`DragController::poll_commits`].

use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, Sender};

use chrono::NaiveDate;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::overlay::{CommitTicket, OptimisticOverlay};
use crate::error::CommitError;
use crate::model::calendar::{add_days, day_difference};
use crate::model::{DateSpan, ScheduleItem, Timeline};

/// Which part of the bar the pointer grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragMode {
    Move,
    ResizeStart,
    ResizeEnd,
}

/// Bookkeeping for the drag in progress. Offsets are whole days from
/// `origin`, the timeline start captured at pointer-down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragState {
    pub item_id: Uuid,
    pub mode: DragMode,
    pub anchor_x: f32,
    pub origin: NaiveDate,
    pub pixels_per_day: f32,
    pub start_days: i64,
    pub end_days: i64,
    /// Set once the pointer has travelled at least one whole day.
    pub moved: bool,
}

impl DragState {
    /// Candidate day offsets for a pointer at `pointer_x`, or `None` when a
    /// resize would leave the bar with `start >= end`.
    fn candidate(&self, pointer_x: f32) -> Option<(i64, i64, i64)> {
        let delta = ((pointer_x - self.anchor_x) / self.pixels_per_day).round() as i64;
        let (start, end) = match self.mode {
            DragMode::Move => (self.start_days + delta, self.end_days + delta),
            DragMode::ResizeStart => {
                let start = self.start_days + delta;
                if start >= self.end_days {
                    return None;
                }
                (start, self.end_days)
            }
            DragMode::ResizeEnd => {
                let end = self.end_days + delta;
                if end <= self.start_days {
                    return None;
                }
                (self.start_days, end)
            }
        };
        Some((delta, start, end))
    }

    fn span_for(&self, start_days: i64, end_days: i64) -> DateSpan {
        DateSpan {
            start: add_days(self.origin, start_days),
            end: add_days(self.origin, end_days),
        }
    }
}

/// Why a pointer-down did not start a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragRefusal {
    /// Another bar is already being dragged.
    AlreadyDragging,
    /// The item has no usable date range.
    MissingDates,
    /// The item's previous commit has not resolved yet.
    CommitPending,
}

/// Where one item stands in the interaction lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemPhase {
    Idle,
    Dragging,
    Committing,
}

/// The single write issued for a finished drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitRequest {
    pub ticket: CommitTicket,
    pub item_id: Uuid,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug)]
struct Resolution {
    ticket: CommitTicket,
    result: Result<(), CommitError>,
}

/// One-shot completion handle for a [`CommitRequest`].
///
/// May be resolved later or from another thread. Dropping it unresolved
/// counts as [`CommitError::Disconnected`], so the overlay entry never leaks.
#[derive(Debug)]
pub struct CommitReply {
    ticket: CommitTicket,
    sender: Option<Sender<Resolution>>,
}

impl CommitReply {
    pub fn ticket(&self) -> CommitTicket {
        self.ticket
    }

    pub fn resolve(mut self, result: Result<(), CommitError>) {
        self.send(result);
    }

    pub fn succeed(self) {
        self.resolve(Ok(()));
    }

    pub fn fail(self, error: CommitError) {
        self.resolve(Err(error));
    }

    fn send(&mut self, result: Result<(), CommitError>) {
        if let Some(sender) = self.sender.take() {
            // The controller may already be gone; nothing left to reconcile then.
            let _ = sender.send(Resolution {
                ticket: self.ticket,
                result,
            });
        }
    }
}

impl Drop for CommitReply {
    fn drop(&mut self) {
        self.send(Err(CommitError::Disconnected));
    }
}

/// The write side of the external collaborator.
pub trait CommitGateway {
    /// Persist new dates for an item and eventually resolve `reply`.
    /// Must not block waiting for storage.
    fn submit(&mut self, request: CommitRequest, reply: CommitReply);
}

/// Result of releasing the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndOutcome {
    NotDragging,
    /// Released without moving a whole day; nothing was sent.
    Cancelled,
    Submitted(CommitRequest),
}

/// A rolled-back commit, for the caller to show as a recoverable error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitFailure {
    pub item_id: Uuid,
    pub attempted: DateSpan,
    pub error: CommitError,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitEvent {
    Committed { item_id: Uuid, span: DateSpan },
    RolledBack(CommitFailure),
}

#[derive(Debug)]
pub struct DragController {
    drag: Option<DragState>,
    overlay: OptimisticOverlay,
    pending: HashMap<CommitTicket, (Uuid, DateSpan)>,
    next_ticket: u64,
    replies_tx: Sender<Resolution>,
    replies_rx: Receiver<Resolution>,
}

impl Default for DragController {
    fn default() -> Self {
        let (replies_tx, replies_rx) = mpsc::channel();
        Self {
            drag: None,
            overlay: OptimisticOverlay::new(),
            pending: HashMap::new(),
            next_ticket: 1,
            replies_tx,
            replies_rx,
        }
    }
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer-down on `item`'s bar.
    pub fn begin_drag(
        &mut self,
        item: &ScheduleItem,
        mode: DragMode,
        pointer_x: f32,
        timeline: &Timeline,
    ) -> Result<(), DragRefusal> {
        if self.drag.is_some() {
            return Err(DragRefusal::AlreadyDragging);
        }
        if self.overlay.contains(item.id) {
            return Err(DragRefusal::CommitPending);
        }
        let span = item.span().ok_or(DragRefusal::MissingDates)?;

        let origin = timeline.range.start;
        self.drag = Some(DragState {
            item_id: item.id,
            mode,
            anchor_x: pointer_x,
            origin,
            pixels_per_day: timeline.pixels_per_day,
            start_days: day_difference(origin, span.start),
            end_days: day_difference(origin, span.end),
            moved: false,
        });
        self.overlay.set(item.id, span.start, span.end);
        debug!(item = %item.id, ?mode, "drag started");
        Ok(())
    }

    /// Pointer-move. Returns `false` when there is no drag or the frame was
    /// rejected as an inverting resize; the last valid candidate is kept.
    pub fn update_drag(&mut self, pointer_x: f32) -> bool {
        let Some(state) = self.drag.as_mut() else {
            return false;
        };
        let Some((delta, start_days, end_days)) = state.candidate(pointer_x) else {
            debug!(item = %state.item_id, "resize would invert the range; ignored");
            return false;
        };
        if delta != 0 {
            state.moved = true;
        }
        let span = state.span_for(start_days, end_days);
        let item_id = state.item_id;
        self.overlay.set(item_id, span.start, span.end);
        true
    }

    /// Pointer-up. Issues the commit for the final candidate.
    pub fn end_drag<G>(&mut self, gateway: &mut G) -> EndOutcome
    where
        G: CommitGateway + ?Sized,
    {
        let Some(state) = self.drag.take() else {
            return EndOutcome::NotDragging;
        };
        if !state.moved {
            self.overlay.remove(state.item_id);
            debug!(item = %state.item_id, "released without moving");
            return EndOutcome::Cancelled;
        }

        let ticket = CommitTicket(self.next_ticket);
        self.next_ticket += 1;

        let Some(patch) = self.overlay.mark_committing(state.item_id, ticket) else {
            return EndOutcome::Cancelled;
        };
        let original = state.span_for(state.start_days, state.end_days);
        let request = CommitRequest {
            ticket,
            item_id: state.item_id,
            start: patch.start.unwrap_or(original.start),
            end: patch.end.unwrap_or(original.end),
        };
        self.pending.insert(
            ticket,
            (
                request.item_id,
                DateSpan {
                    start: request.start,
                    end: request.end,
                },
            ),
        );

        info!(
            item = %request.item_id,
            start = %request.start,
            end = %request.end,
            ticket = ticket.0,
            "committing"
        );
        let reply = CommitReply {
            ticket,
            sender: Some(self.replies_tx.clone()),
        };
        gateway.submit(request, reply);
        EndOutcome::Submitted(request)
    }

    /// Abandon the drag in progress (Escape, focus loss). Nothing is sent.
    pub fn cancel_drag(&mut self) -> bool {
        match self.drag.take() {
            Some(state) => {
                self.overlay.remove(state.item_id);
                debug!(item = %state.item_id, "drag cancelled");
                true
            }
            None => false,
        }
    }

    /// Reconcile every commit reply received so far.
    pub fn poll_commits(&mut self) -> Vec<CommitEvent> {
        let mut events = Vec::new();
        while let Ok(Resolution { ticket, result }) = self.replies_rx.try_recv() {
            let Some((item_id, span)) = self.pending.remove(&ticket) else {
                continue;
            };
            if self.overlay.resolve(item_id, ticket).is_none() {
                debug!(item = %item_id, ticket = ticket.0, "stale commit reply");
                continue;
            }
            match result {
                Ok(()) => {
                    info!(item = %item_id, "commit confirmed");
                    events.push(CommitEvent::Committed { item_id, span });
                }
                Err(error) => {
                    warn!(item = %item_id, %error, "commit failed; rolled back");
                    events.push(CommitEvent::RolledBack(CommitFailure {
                        item_id,
                        attempted: span,
                        error,
                    }));
                }
            }
        }
        events
    }

    /// Canonical items with in-flight candidates merged in, for rendering.
    pub fn optimistic_view(&self, canonical: &[ScheduleItem]) -> Vec<ScheduleItem> {
        self.overlay.optimistic_view(canonical)
    }

    pub fn overlay(&self) -> &OptimisticOverlay {
        &self.overlay
    }

    pub fn drag_state(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn pending_commits(&self) -> usize {
        self.pending.len()
    }

    pub fn item_phase(&self, id: Uuid) -> ItemPhase {
        if self.drag.is_some_and(|d| d.item_id == id) {
            ItemPhase::Dragging
        } else if self.overlay.get(id).is_some_and(|p| p.is_committing()) {
            ItemPhase::Committing
        } else {
            ItemPhase::Idle
        }
    }
}
