//! Fixed-capacity position trail

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Bounded FIFO of recent positions
///
/// Storage is allocated once at construction; pushing past capacity evicts
/// the oldest point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trail {
    points: VecDeque<Vec2>,
    capacity: usize,
}

impl Trail {
    pub fn new(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record a point, evicting the oldest entries beyond capacity
    pub fn push(&mut self, point: Vec2) {
        if self.capacity == 0 {
            return;
        }
        while self.points.len() >= self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(point);
    }

    /// Record a point only if it lies more than `min_distance` from the newest one
    pub fn push_if_moved(&mut self, point: Vec2, min_distance: f32) -> bool {
        let moved = match self.points.back() {
            Some(last) => point.distance(*last) > min_distance,
            None => true,
        };
        if moved {
            self.push(point);
        }
        moved
    }

    /// Points from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &Vec2> {
        self.points.iter()
    }

    pub fn latest(&self) -> Option<Vec2> {
        self.points.back().copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
