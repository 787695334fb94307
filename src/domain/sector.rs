//! Angular sectors and their proportional partition among siblings.

use std::f64::consts::TAU;

/// Half-open angular interval in radians, `start..end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sector {
    pub start: f64,
    pub end: f64,
}

impl Sector {
    pub const FULL: Sector = Sector {
        start: 0.0,
        end: TAU,
    };

    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn span(&self) -> f64 {
        self.end - self.start
    }

    /// Angle at which the owner of this sector is placed.
    pub fn mid(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    /// Split this sector left to right, one sub-sector per weight.
    ///
    /// Each share is proportional to `weight / total`. A zero total falls back
    /// to an equal split.
    pub fn partition(&self, weights: &[usize]) -> Vec<Sector> {
        if weights.is_empty() {
            return Vec::new();
        }
        let total: usize = weights.iter().sum();
        let span = self.span();
        let mut cursor = self.start;
        weights
            .iter()
            .map(|&weight| {
                let share = if total > 0 {
                    span * weight as f64 / total as f64
                } else {
                    span / weights.len() as f64
                };
                let sector = Sector::new(cursor, cursor + share);
                cursor += share;
                sector
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn given_weights_when_partitioning_then_sectors_are_contiguous_and_cover_parent() {
        let parent = Sector::new(0.5, 2.0);
        let parts = parent.partition(&[3, 1, 4, 1, 5]);

        assert!((parts[0].start - parent.start).abs() < EPS);
        for pair in parts.windows(2) {
            assert!((pair[0].end - pair[1].start).abs() < EPS);
        }
        assert!((parts.last().unwrap().end - parent.end).abs() < EPS);
        let total: f64 = parts.iter().map(Sector::span).sum();
        assert!((total - parent.span()).abs() < EPS);
    }

    #[test]
    fn given_weights_when_partitioning_then_spans_follow_weight_ratio() {
        let parts = Sector::FULL.partition(&[2, 1]);
        assert!((parts[0].span() / parts[1].span() - 2.0).abs() < EPS);
        assert!((parts[0].span() - TAU * 2.0 / 3.0).abs() < EPS);
    }

    #[test]
    fn given_zero_total_weight_when_partitioning_then_splits_equally() {
        let parts = Sector::new(0.0, 3.0).partition(&[0, 0, 0]);
        for part in &parts {
            assert!((part.span() - 1.0).abs() < EPS);
        }
    }

    #[test]
    fn given_no_weights_when_partitioning_then_empty() {
        assert!(Sector::FULL.partition(&[]).is_empty());
    }

    #[test]
    fn given_sector_when_taking_mid_then_halfway() {
        assert!((Sector::new(1.0, 2.0).mid() - 1.5).abs() < EPS);
    }
}
