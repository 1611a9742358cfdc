//! Sampled segment lengths.

use ck_math::SplinePoint;
use rayon::prelude::*;

use crate::basis;
use crate::buffer::PointBuffer;

/// Piecewise-linear length estimate of every segment.
///
/// Each segment is sampled at `sample_count` uniform steps of its local
/// parameter. The cumulative chord lengths are kept per segment so a length
/// fraction inside a segment can be mapped back to the cubic parameter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LengthTable {
    segment_lengths: Vec<f64>,
    profiles: Vec<Vec<f64>>,
    total_length: f64,
}

impl LengthTable {
    pub fn build<P: SplinePoint>(
        buffer: &PointBuffer<P>,
        curvature: f64,
        sample_count: usize,
    ) -> Self {
        let sample_count = sample_count.max(1);
        let profiles: Vec<Vec<f64>> = (0..buffer.segment_count())
            .into_par_iter()
            .map(|segment| sample_segment(&buffer.quad(segment + 1), curvature, sample_count))
            .collect();

        let segment_lengths: Vec<f64> = profiles
            .iter()
            .map(|profile| profile.last().copied().unwrap_or(0.0))
            .collect();
        let total_length = segment_lengths.iter().sum();

        Self {
            segment_lengths,
            profiles,
            total_length,
        }
    }

    pub fn segment_lengths(&self) -> &[f64] {
        &self.segment_lengths
    }

    pub fn total_length(&self) -> f64 {
        self.total_length
    }

    pub fn len(&self) -> usize {
        self.segment_lengths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segment_lengths.is_empty()
    }

    /// Local cubic parameter at which `fraction` of the segment's length has
    /// been covered.
    pub fn local_parameter(&self, segment: usize, fraction: f64) -> f64 {
        let Some(profile) = self.profiles.get(segment) else {
            return fraction;
        };
        let (Some(samples), Some(&length)) = (profile.len().checked_sub(1), profile.last()) else {
            return fraction;
        };
        if samples == 0 || length <= 0.0 {
            return fraction;
        }

        let target = fraction.clamp(0.0, 1.0) * length;
        // profile[0] == 0.0 <= target, so upper >= 1
        let upper = profile.partition_point(|&c| c <= target);
        if upper > samples {
            return 1.0;
        }
        let lower = upper - 1;
        let span = profile[upper] - profile[lower];
        let within = if span > 0.0 {
            (target - profile[lower]) / span
        } else {
            0.0
        };
        (lower as f64 + within) / samples as f64
    }
}

fn sample_segment<P: SplinePoint>(quad: &[P; 4], curvature: f64, samples: usize) -> Vec<f64> {
    let mut cumulative = Vec::with_capacity(samples + 1);
    cumulative.push(0.0);
    let mut prev = basis::point(quad, curvature, 0.0);
    let mut acc = 0.0;
    for i in 1..=samples {
        let p = basis::point(quad, curvature, i as f64 / samples as f64);
        acc += prev.distance(p);
        cumulative.push(acc);
        prev = p;
    }
    cumulative
}
