//! Cumulative length fractions used for constant-speed evaluation.

use ck_core::Tolerance;

/// One entry of the arc-length map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcLengthEntry {
    /// Fraction of the total length covered up to and including `segment`.
    pub fraction: f64,
    pub segment: usize,
}

/// Sorted map from cumulative length fraction to segment index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArcLengthMap {
    entries: Vec<ArcLengthEntry>,
}

impl ArcLengthMap {
    /// Build from per-segment lengths and their sum.
    ///
    /// A curve with zero total length spreads the fractions evenly.
    pub fn build(segment_lengths: &[f64], total_length: f64) -> Self {
        let count = segment_lengths.len();
        let even = Tolerance::default().is_zero(total_length);
        let mut cumulative = 0.0;
        let mut entries: Vec<ArcLengthEntry> = segment_lengths
            .iter()
            .enumerate()
            .map(|(segment, &length)| {
                cumulative = if even {
                    (segment + 1) as f64 / count as f64
                } else {
                    cumulative + length / total_length
                };
                ArcLengthEntry {
                    fraction: cumulative,
                    segment,
                }
            })
            .collect();

        // absorb accumulated rounding
        if let Some(last) = entries.last_mut() {
            last.fraction = 1.0;
        }
        Self { entries }
    }

    pub fn entries(&self) -> &[ArcLengthEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find the segment containing `t` and the fraction of that segment's
    /// length covered at `t`.
    ///
    /// Intervals are half-open, `[previous, fraction)`, except the last which
    /// also contains `1.0`. `t` is expected in `[0, 1]`.
    pub fn locate(&self, t: f64) -> Option<(usize, f64)> {
        let last = self.entries.len().checked_sub(1)?;
        let index = self.entries.partition_point(|e| e.fraction <= t).min(last);
        let end = self.entries[index].fraction;
        let start = if index == 0 {
            0.0
        } else {
            self.entries[index - 1].fraction
        };
        let span = end - start;
        let local = if span > 0.0 {
            ((t - start) / span).clamp(0.0, 1.0)
        } else {
            0.0
        };
        Some((self.entries[index].segment, local))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fractions_strictly_increase_to_one() {
        let map = ArcLengthMap::build(&[1.0, 3.0, 2.0, 0.5], 6.5);
        assert_eq!(map.len(), 4);
        let fractions: Vec<f64> = map.entries().iter().map(|e| e.fraction).collect();
        assert!(fractions.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(*fractions.last().unwrap(), 1.0);
        assert_relative_eq!(fractions[0], 1.0 / 6.5);
    }

    #[test]
    fn test_locate_half_open_intervals() {
        let map = ArcLengthMap::build(&[1.0, 1.0], 2.0);
        assert_eq!(map.locate(0.0), Some((0, 0.0)));
        let (segment, local) = map.locate(0.25).unwrap();
        assert_eq!(segment, 0);
        assert_relative_eq!(local, 0.5);
        // exactly on a key belongs to the next segment
        assert_eq!(map.locate(0.5), Some((1, 0.0)));
        assert_eq!(map.locate(1.0), Some((1, 1.0)));
    }

    #[test]
    fn test_zero_length_segment_is_skipped() {
        let map = ArcLengthMap::build(&[1.0, 0.0, 1.0], 2.0);
        let (segment, local) = map.locate(0.5).unwrap();
        assert_eq!(segment, 2);
        assert_eq!(local, 0.0);
    }

    #[test]
    fn test_zero_total_spreads_evenly() {
        let map = ArcLengthMap::build(&[0.0, 0.0], 0.0);
        assert_eq!(map.entries()[0].fraction, 0.5);
        assert_eq!(map.entries()[1].fraction, 1.0);
    }

    #[test]
    fn test_empty_map() {
        let map = ArcLengthMap::build(&[], 0.0);
        assert!(map.is_empty());
        assert_eq!(map.locate(0.5), None);
    }
}
