//! Double-booking detection.
//!
//! Every unordered pair of a resource's scheduled items is compared with a
//! closed-interval overlap test, so an item ending on the day another starts
//! is a conflict. The pairwise scan is quadratic per resource; resources
//! carry few items compared to the whole schedule. A sweep over items sorted
//! by start date would replace it if that stopped holding.

use std::collections::BTreeMap;

use serde::Serialize;
use uuid::Uuid;

use crate::model::ScheduleItem;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConflictReport {
    /// Each overlapping pair exactly once, in input order (`pairs[k].0` comes
    /// before `pairs[k].1` in the slice that was checked).
    pub pairs: Vec<(Uuid, Uuid)>,
    pub count: usize,
}

impl ConflictReport {
    pub fn is_clear(&self) -> bool {
        self.count == 0
    }

    /// Whether `id` takes part in any reported pair.
    pub fn involves(&self, id: Uuid) -> bool {
        self.pairs.iter().any(|(a, b)| *a == id || *b == id)
    }
}

/// Pairwise overlaps among items that share one resource. Undated and
/// inverted items are skipped.
pub fn detect_conflicts(items_for_resource: &[ScheduleItem]) -> ConflictReport {
    let dated: Vec<_> = items_for_resource
        .iter()
        .filter_map(|item| item.span().map(|span| (item.id, span)))
        .collect();

    let mut pairs = Vec::new();
    for (i, (id_a, span_a)) in dated.iter().enumerate() {
        for (id_b, span_b) in &dated[i + 1..] {
            if span_a.overlaps(span_b) {
                pairs.push((*id_a, *id_b));
            }
        }
    }

    ConflictReport {
        count: pairs.len(),
        pairs,
    }
}

/// Conflict reports for every resource that appears in `items`, keyed by
/// resource id. Items without a resource are never compared.
pub fn conflicts_by_resource(items: &[ScheduleItem]) -> BTreeMap<String, ConflictReport> {
    let mut by_resource: BTreeMap<String, Vec<ScheduleItem>> = BTreeMap::new();
    for item in items.iter().filter(|i| i.is_scheduled()) {
        if let Some(resource) = &item.resource {
            by_resource
                .entry(resource.clone())
                .or_default()
                .push(item.clone());
        }
    }

    by_resource
        .into_iter()
        .map(|(resource, members)| (resource, detect_conflicts(&members)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    fn on_r1(start: NaiveDate, end: NaiveDate) -> ScheduleItem {
        ScheduleItem::new("job", "P-1", start, end).with_resource("R1")
    }

    #[test]
    fn shared_boundary_day_counts() {
        let a = on_r1(date(10, 10), date(10, 14));
        let b = on_r1(date(10, 14), date(10, 18));
        let report = detect_conflicts(&[a.clone(), b.clone()]);
        assert_eq!(report.count, 1);
        assert_eq!(report.pairs, vec![(a.id, b.id)]);
        assert!(report.involves(b.id));
    }

    #[test]
    fn adjacent_days_do_not_conflict() {
        let report = detect_conflicts(&[
            on_r1(date(10, 10), date(10, 14)),
            on_r1(date(10, 15), date(10, 18)),
        ]);
        assert!(report.is_clear());
    }

    #[test]
    fn every_pair_reported_once() {
        let items = vec![
            on_r1(date(10, 1), date(10, 30)),
            on_r1(date(10, 5), date(10, 6)),
            on_r1(date(10, 6), date(10, 9)),
            on_r1(date(11, 1), date(11, 2)),
        ];
        let report = detect_conflicts(&items);
        assert_eq!(
            report.pairs,
            vec![
                (items[0].id, items[1].id),
                (items[0].id, items[2].id),
                (items[1].id, items[2].id),
            ]
        );
        assert_eq!(report.count, 3);
    }

    #[test]
    fn undated_and_inverted_items_are_ignored() {
        let mut undated = ScheduleItem::unscheduled("later", "P-2").with_resource("R1");
        undated.start = Some(date(10, 10));
        let inverted = on_r1(date(10, 20), date(10, 1));
        let report = detect_conflicts(&[on_r1(date(10, 1), date(10, 31)), undated, inverted]);
        assert!(report.is_clear());
    }

    #[test]
    fn grouped_per_resource() {
        let items = vec![
            on_r1(date(10, 10), date(10, 14)),
            on_r1(date(10, 12), date(10, 13)),
            ScheduleItem::new("x", "P-1", date(10, 10), date(10, 14)).with_resource("R2"),
            ScheduleItem::new("y", "P-1", date(10, 10), date(10, 14)),
        ];
        let reports = conflicts_by_resource(&items);
        assert_eq!(reports.len(), 2);
        assert_eq!(reports["R1"].count, 1);
        assert_eq!(reports["R2"].count, 0);
    }
}
