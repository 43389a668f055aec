use std::collections::HashMap;
use std::sync::Arc;

use arc_swap::ArcSwap;
use crossbeam_channel::{Receiver, Sender, unbounded};
use log::debug;

use hestia_core::{Entry, UnitId, ZoneId};

use crate::snapshot::MarketSnapshot;

/// A queued registry mutation, applied at the next day boundary.
#[derive(Debug, Clone)]
enum MutationRequest {
    Add(Entry),
    Update(Entry),
    Remove(UnitId),
}

/// Outcome of one day-boundary batch apply.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ApplyStats {
    pub added: usize,
    pub updated: usize,
    pub removed: usize,
    /// Requests referencing unit ids absent at apply time
    pub dropped: usize,
}

/// The housing-market registry.
///
/// Mutations requested during day D are queued on a multi-producer channel
/// and applied as one single-threaded batch between D and D+1; every read
/// during D observes exactly the snapshot produced by D-1's batch. Reads are
/// lock-free loads of the current snapshot.
pub struct MarketRegistry {
    snapshot: ArcSwap<MarketSnapshot>,
    pending_tx: Sender<MutationRequest>,
    pending_rx: Receiver<MutationRequest>,
}

impl MarketRegistry {
    pub fn new() -> Self {
        let (pending_tx, pending_rx) = unbounded();
        Self {
            snapshot: ArcSwap::from_pointee(MarketSnapshot::default()),
            pending_tx,
            pending_rx,
        }
    }

    /// Queue a new entry.
    ///
    /// **Attention**: the change is not visible after this call; it is
    /// applied at the next day boundary. A later pending add for the same
    /// unit id supersedes this one.
    pub fn add_entry(&self, entry: Entry) {
        let _ = self.pending_tx.send(MutationRequest::Add(entry));
    }

    /// Queue a price mutation for an already-listed unit id.
    ///
    /// **Attention**: the change is not visible after this call; it is
    /// applied at the next day boundary.
    pub fn update_entry(&self, entry: Entry) {
        let _ = self.pending_tx.send(MutationRequest::Update(entry));
    }

    /// Queue removal of the entry with the given unit id.
    ///
    /// **Attention**: the change is not visible after this call; it is
    /// applied at the next day boundary.
    pub fn remove_entry(&self, unit_id: UnitId) {
        let _ = self.pending_tx.send(MutationRequest::Remove(unit_id));
    }

    /// Entries currently available, optionally filtered by zone ids.
    ///
    /// Synchronous read of the applied snapshot; never blocks and never
    /// observes a partially-applied batch. Two calls within the same day
    /// return identical results.
    pub fn available_entries(&self, zone_filter: Option<&[ZoneId]>) -> Vec<Entry> {
        let snapshot = self.snapshot.load();
        match zone_filter {
            Some(zones) => snapshot.entries_in_zones(zones).cloned().collect(),
            None => snapshot.entries().cloned().collect(),
        }
    }

    /// Point lookup against the current snapshot
    pub fn entry_by_id(&self, unit_id: UnitId) -> Option<Entry> {
        self.snapshot.load().entry_by_id(unit_id).cloned()
    }

    /// Number of entries in the current snapshot
    pub fn entry_count(&self) -> usize {
        self.snapshot.load().len()
    }

    /// Apply all queued mutations as one batch and swap in the new snapshot.
    ///
    /// Must be called from a single thread, between days, with no agent
    /// updates in flight. Requests against unit ids absent at apply time are
    /// dropped and logged; the owning seller may have already retired.
    pub fn apply_pending(&self) -> ApplyStats {
        let current: Arc<MarketSnapshot> = self.snapshot.load_full();
        let mut entries: HashMap<UnitId, Entry> = current.as_ref().clone().into_entries();
        let mut stats = ApplyStats::default();

        for request in self.pending_rx.try_iter() {
            match request {
                MutationRequest::Add(entry) => {
                    entries.insert(entry.unit_id, entry);
                    stats.added += 1;
                }
                MutationRequest::Update(entry) => {
                    if let Some(existing) = entries.get_mut(&entry.unit_id) {
                        existing.asking_price = entry.asking_price;
                        existing.hedonic_price = entry.hedonic_price;
                        stats.updated += 1;
                    } else {
                        debug!("dropping update for unlisted unit {}", entry.unit_id);
                        stats.dropped += 1;
                    }
                }
                MutationRequest::Remove(unit_id) => {
                    if entries.remove(&unit_id).is_some() {
                        stats.removed += 1;
                    } else {
                        debug!("dropping removal for unlisted unit {}", unit_id);
                        stats.dropped += 1;
                    }
                }
            }
        }

        self.snapshot
            .store(Arc::new(MarketSnapshot::from_entries(entries)));
        stats
    }
}

impl Default for MarketRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(unit_id: UnitId, zone_id: ZoneId, asking: f64) -> Entry {
        Entry::new(unit_id, 1, zone_id, asking, asking * 0.9)
    }

    #[test]
    fn test_add_is_invisible_until_applied() {
        let registry = MarketRegistry::new();
        registry.add_entry(entry(1, 10, 500.0));

        assert!(registry.entry_by_id(1).is_none());
        assert!(registry.available_entries(None).is_empty());

        registry.apply_pending();

        let listed = registry.entry_by_id(1).unwrap();
        assert_eq!(listed.unit_id, 1);
        assert_eq!(listed.asking_price, 500.0);
        assert_eq!(listed.hedonic_price, 450.0);
    }

    #[test]
    fn test_duplicate_pending_add_is_superseded() {
        let registry = MarketRegistry::new();
        registry.add_entry(entry(1, 10, 500.0));
        registry.add_entry(entry(1, 10, 480.0));
        registry.apply_pending();

        assert_eq!(registry.entry_count(), 1);
        assert_eq!(registry.entry_by_id(1).unwrap().asking_price, 480.0);
    }

    #[test]
    fn test_update_applies_next_day_only() {
        let registry = MarketRegistry::new();
        registry.add_entry(entry(1, 10, 500.0));
        registry.apply_pending();

        registry.update_entry(entry(1, 10, 450.0));
        assert_eq!(registry.entry_by_id(1).unwrap().asking_price, 500.0);

        let stats = registry.apply_pending();
        assert_eq!(stats.updated, 1);
        assert_eq!(registry.entry_by_id(1).unwrap().asking_price, 450.0);
    }

    #[test]
    fn test_stale_update_and_remove_are_dropped() {
        let registry = MarketRegistry::new();
        registry.update_entry(entry(9, 10, 450.0));
        registry.remove_entry(9);

        let stats = registry.apply_pending();
        assert_eq!(stats.dropped, 2);
        assert_eq!(stats.updated, 0);
        assert_eq!(stats.removed, 0);
    }

    #[test]
    fn test_remove_applies_next_day() {
        let registry = MarketRegistry::new();
        registry.add_entry(entry(1, 10, 500.0));
        registry.apply_pending();

        registry.remove_entry(1);
        assert!(registry.entry_by_id(1).is_some());

        registry.apply_pending();
        assert!(registry.entry_by_id(1).is_none());
    }

    #[test]
    fn test_zone_filter() {
        let registry = MarketRegistry::new();
        registry.add_entry(entry(1, 10, 500.0));
        registry.add_entry(entry(2, 10, 510.0));
        registry.add_entry(entry(3, 20, 520.0));
        registry.apply_pending();

        assert_eq!(registry.available_entries(None).len(), 3);
        assert_eq!(registry.available_entries(Some(&[10])).len(), 2);
        assert_eq!(registry.available_entries(Some(&[20])).len(), 1);
        assert_eq!(registry.available_entries(Some(&[30])).len(), 0);
        assert_eq!(registry.available_entries(Some(&[10, 20])).len(), 3);
    }

    #[test]
    fn test_same_day_reads_are_identical() {
        let registry = MarketRegistry::new();
        registry.add_entry(entry(1, 10, 500.0));
        registry.add_entry(entry(2, 20, 510.0));
        registry.apply_pending();

        let first = registry.available_entries(None);
        // queue mutations mid-day; they must not affect reads
        registry.update_entry(entry(1, 10, 100.0));
        registry.remove_entry(2);
        let second = registry.available_entries(None);

        let mut first_ids: Vec<_> = first.iter().map(|e| e.unit_id).collect();
        let mut second_ids: Vec<_> = second.iter().map(|e| e.unit_id).collect();
        first_ids.sort_unstable();
        second_ids.sort_unstable();
        assert_eq!(first_ids, second_ids);
    }

    #[test]
    fn test_concurrent_writers_do_not_disturb_readers() {
        let registry = Arc::new(MarketRegistry::new());
        for unit_id in 0..50 {
            registry.add_entry(entry(unit_id, unit_id % 5, 500.0));
        }
        registry.apply_pending();

        std::thread::scope(|scope| {
            for writer in 0..4 {
                let registry = Arc::clone(&registry);
                scope.spawn(move || {
                    for i in 0..100 {
                        registry.add_entry(entry(1000 + writer * 100 + i, 3, 400.0));
                        registry.update_entry(entry(i % 50, (i % 50) % 5, 300.0));
                    }
                });
            }
            for _ in 0..4 {
                let registry = Arc::clone(&registry);
                scope.spawn(move || {
                    for _ in 0..200 {
                        // the day's snapshot stays stable under queued writes
                        assert_eq!(registry.entry_count(), 50);
                        assert_eq!(registry.entry_by_id(0).unwrap().asking_price, 500.0);
                    }
                });
            }
        });

        registry.apply_pending();
        assert_eq!(registry.entry_count(), 450);
    }
}
