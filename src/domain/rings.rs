//! Ring allocation for siblings sharing one parent.
//!
//! High fan-out siblings are spread over concentric rings instead of a single
//! radius. Ring 0 is filled first in traversal order.

use crate::domain::DomainError;

/// Siblings per ring unless configured otherwise.
pub const DEFAULT_RING_CAPACITY: usize = 6;

/// Radial step from a parent to children placed at `depth`.
pub fn link_distance(depth: u32) -> f64 {
    match depth {
        0 => 0.0,
        1 => 100.0,
        2 => 130.0,
        d => 130.0 + f64::from(d - 2) * 20.0,
    }
}

/// Spread multiplier for siblings at `depth` occupying `rings` rings.
///
/// Base is 1.3 up to depth 1, 1.5 up to depth 3 and 1.7 beyond; each ring
/// after the first adds 0.08, capped at base + 0.2.
pub fn ring_multiplier(depth: u32, rings: usize) -> f64 {
    let base = match depth {
        0 | 1 => 1.3,
        2 | 3 => 1.5,
        _ => 1.7,
    };
    let extra = rings.saturating_sub(1) as f64 * 0.08;
    (base + extra).min(base + 0.2)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RingAllocator {
    capacity: usize,
}

impl Default for RingAllocator {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_RING_CAPACITY,
        }
    }
}

impl RingAllocator {
    pub fn new(capacity: usize) -> Result<Self, DomainError> {
        if capacity == 0 {
            return Err(DomainError::InvalidLayout(
                "ring capacity must be at least 1".to_string(),
            ));
        }
        Ok(Self { capacity })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Plan the rings for `sibling_count` siblings placed at `depth`.
    pub fn plan(&self, sibling_count: usize, depth: u32) -> RingPlan {
        let ring_count = sibling_count.div_ceil(self.capacity).max(1);
        let base_step = link_distance(depth);
        let multiplier = ring_multiplier(depth, ring_count);
        let extra = base_step * (multiplier - 1.0).max(0.0);
        let ring_spacing = if ring_count > 1 {
            extra / (ring_count - 1) as f64
        } else {
            0.0
        };
        RingPlan {
            ring_count,
            base_step,
            ring_spacing,
            capacity: self.capacity,
        }
    }
}

/// Radial placement for one sibling group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingPlan {
    pub ring_count: usize,
    pub base_step: f64,
    pub ring_spacing: f64,
    pub capacity: usize,
}

impl RingPlan {
    pub fn ring_index(&self, sibling_index: usize) -> usize {
        sibling_index / self.capacity
    }

    pub fn radius(&self, parent_radius: f64, sibling_index: usize) -> f64 {
        parent_radius + self.base_step + self.ring_index(sibling_index) as f64 * self.ring_spacing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const EPS: f64 = 1e-9;

    #[rstest]
    #[case(0, 0.0)]
    #[case(1, 100.0)]
    #[case(2, 130.0)]
    #[case(3, 150.0)]
    #[case(5, 190.0)]
    fn test_link_distance(#[case] depth: u32, #[case] expected: f64) {
        assert!((link_distance(depth) - expected).abs() < EPS);
    }

    #[rstest]
    #[case(1, 1, 1.3)]
    #[case(1, 3, 1.46)]
    #[case(1, 9, 1.5)]
    #[case(3, 2, 1.58)]
    #[case(4, 1, 1.7)]
    #[case(7, 5, 1.9)]
    fn test_ring_multiplier(#[case] depth: u32, #[case] rings: usize, #[case] expected: f64) {
        assert!((ring_multiplier(depth, rings) - expected).abs() < EPS);
    }

    #[test]
    fn given_zero_capacity_when_creating_then_rejects() {
        assert!(RingAllocator::new(0).is_err());
    }

    #[test]
    fn given_few_siblings_when_planning_then_single_ring_without_spacing() {
        let plan = RingAllocator::default().plan(4, 2);
        assert_eq!(plan.ring_count, 1);
        assert_eq!(plan.ring_spacing, 0.0);
        assert!((plan.radius(10.0, 3) - 140.0).abs() < EPS);
    }

    #[test]
    fn given_thirteen_siblings_at_depth_one_when_planning_then_three_rings() {
        let plan = RingAllocator::default().plan(13, 1);
        assert_eq!(plan.ring_count, 3);
        // multiplier 1.46 -> 46 units of extra distance over two gaps
        assert!((plan.ring_spacing - 23.0).abs() < EPS);
        assert_eq!(plan.ring_index(5), 0);
        assert_eq!(plan.ring_index(6), 1);
        assert_eq!(plan.ring_index(12), 2);
        assert!((plan.radius(0.0, 0) - 100.0).abs() < EPS);
        assert!((plan.radius(0.0, 7) - 123.0).abs() < EPS);
        assert!((plan.radius(0.0, 12) - 146.0).abs() < EPS);
    }

    #[test]
    fn given_no_siblings_when_planning_then_still_one_ring() {
        assert_eq!(RingAllocator::default().plan(0, 1).ring_count, 1);
    }

    #[test]
    fn given_custom_capacity_when_planning_then_rings_follow_capacity() {
        let plan = RingAllocator::new(2).unwrap().plan(5, 3);
        assert_eq!(plan.ring_count, 3);
        assert_eq!(plan.ring_index(4), 2);
    }
}
