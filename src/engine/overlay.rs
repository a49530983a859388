//! Uncommitted date overrides layered over the canonical items.
//!
//! The overlay is render-only: it never writes into the canonical items. An
//! entry lives from drag start until its commit resolves, and while it lives
//! it wins over whatever the collaborator reports for that item, even after a
//! refresh of the canonical list.

use std::collections::HashMap;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::model::ScheduleItem;

/// Identifies one commit request so late replies can be matched to the
/// overlay entry they belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommitTicket(pub u64);

/// Partial date override for one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptimisticPatch {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub in_flight: bool,
    /// Set once the commit for this entry has been issued.
    pub ticket: Option<CommitTicket>,
}

impl OptimisticPatch {
    pub fn dates(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            in_flight: true,
            ticket: None,
        }
    }

    /// Copy of `item` with this patch's dates applied.
    pub fn apply_to(&self, item: &ScheduleItem) -> ScheduleItem {
        let mut patched = item.clone();
        if let Some(start) = self.start {
            patched.start = Some(start);
        }
        if let Some(end) = self.end {
            patched.end = Some(end);
        }
        patched
    }

    pub fn is_committing(&self) -> bool {
        self.ticket.is_some()
    }
}

#[derive(Debug, Clone, Default)]
pub struct OptimisticOverlay {
    patches: HashMap<Uuid, OptimisticPatch>,
}

impl OptimisticOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the candidate dates for `id`.
    pub fn set(&mut self, id: Uuid, start: NaiveDate, end: NaiveDate) {
        let ticket = self.patches.get(&id).and_then(|p| p.ticket);
        self.patches.insert(
            id,
            OptimisticPatch {
                ticket,
                ..OptimisticPatch::dates(start, end)
            },
        );
    }

    /// Tag the entry with the commit that will resolve it.
    pub fn mark_committing(&mut self, id: Uuid, ticket: CommitTicket) -> Option<OptimisticPatch> {
        let patch = self.patches.get_mut(&id)?;
        patch.ticket = Some(ticket);
        Some(*patch)
    }

    /// Drop the entry for `id` if it still belongs to `ticket`.
    pub fn resolve(&mut self, id: Uuid, ticket: CommitTicket) -> Option<OptimisticPatch> {
        match self.patches.get(&id) {
            Some(patch) if patch.ticket == Some(ticket) => self.patches.remove(&id),
            _ => None,
        }
    }

    /// Drop the entry for `id` unconditionally.
    pub fn remove(&mut self, id: Uuid) -> Option<OptimisticPatch> {
        self.patches.remove(&id)
    }

    pub fn get(&self, id: Uuid) -> Option<&OptimisticPatch> {
        self.patches.get(&id)
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.patches.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.patches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }

    /// Number of entries waiting on a commit reply.
    pub fn committing(&self) -> usize {
        self.patches.values().filter(|p| p.is_committing()).count()
    }

    /// Canonical items with every live patch merged in.
    pub fn optimistic_view(&self, canonical: &[ScheduleItem]) -> Vec<ScheduleItem> {
        canonical
            .iter()
            .map(|item| match self.patches.get(&item.id) {
                Some(patch) => patch.apply_to(item),
                None => item.clone(),
            })
            .collect()
    }
}
