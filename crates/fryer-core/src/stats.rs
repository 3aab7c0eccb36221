//! Statistics collection for the fryer tick

use fryer_simulation::BubbleKind;
use serde::{Deserialize, Serialize};

/// Trait for collecting per-tick simulation events
pub trait SimStats {
    /// Record that a bubble was spawned
    fn record_bubble_spawned(&mut self, kind: BubbleKind);

    /// Record that a bubble reached the surface (counted once per bubble)
    fn record_bubble_surfaced(&mut self, kind: BubbleKind);

    /// Record that a dead bubble was removed from the fryer
    fn record_bubble_reaped(&mut self, kind: BubbleKind);

    /// Record that a spawn was skipped because the bubble cap was reached
    fn record_bubble_skipped(&mut self);

    /// Record that the body entered the oil
    fn record_immersion(&mut self);
}

/// A no-op implementation for when stats collection is not needed
#[derive(Default)]
pub struct NoopStats;

impl SimStats for NoopStats {
    fn record_bubble_spawned(&mut self, _kind: BubbleKind) {}
    fn record_bubble_surfaced(&mut self, _kind: BubbleKind) {}
    fn record_bubble_reaped(&mut self, _kind: BubbleKind) {}
    fn record_bubble_skipped(&mut self) {}
    fn record_immersion(&mut self) {}
}

/// Running totals of bubble events, indexed by [`BubbleKind::index`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BubbleCensus {
    pub spawned: [u64; 3],
    pub surfaced: [u64; 3],
    pub reaped: [u64; 3],
    pub skipped: u64,
    pub immersions: u64,
}

impl BubbleCensus {
    pub fn total_spawned(&self) -> u64 {
        self.spawned.iter().sum()
    }

    pub fn total_surfaced(&self) -> u64 {
        self.surfaced.iter().sum()
    }

    pub fn total_reaped(&self) -> u64 {
        self.reaped.iter().sum()
    }

    pub fn spawned_of(&self, kind: BubbleKind) -> u64 {
        self.spawned[kind.index()]
    }
}

impl SimStats for BubbleCensus {
    fn record_bubble_spawned(&mut self, kind: BubbleKind) {
        self.spawned[kind.index()] += 1;
    }

    fn record_bubble_surfaced(&mut self, kind: BubbleKind) {
        self.surfaced[kind.index()] += 1;
    }

    fn record_bubble_reaped(&mut self, kind: BubbleKind) {
        self.reaped[kind.index()] += 1;
    }

    fn record_bubble_skipped(&mut self) {
        self.skipped += 1;
    }

    fn record_immersion(&mut self) {
        self.immersions += 1;
    }
}
