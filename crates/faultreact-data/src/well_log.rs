// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Well-log style extraction along a synthetic vertical path
//!
//! Values that cannot be read directly at a position are taken from a log
//! sampled along a vertical line through it, interpolated linearly between
//! samples and extrapolated linearly beyond the first and last sample.

use nalgebra::Point3;

/// Minimum number of samples along a synthetic path
pub const MIN_SAMPLES: usize = 2;

/// Values sampled along a vertical path, sorted by z
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WellLogExtraction {
    samples: Vec<(f64, f64)>,
}

impl WellLogExtraction {
    /// Build a log from (z, value) pairs; non-finite values are dropped
    pub fn from_samples(samples: impl IntoIterator<Item = (f64, f64)>) -> Self {
        let mut samples: Vec<(f64, f64)> = samples
            .into_iter()
            .filter(|(z, v)| z.is_finite() && v.is_finite())
            .collect();
        samples.sort_by(|a, b| a.0.total_cmp(&b.0));
        samples.dedup_by(|a, b| a.0 == b.0);
        Self { samples }
    }

    /// Sample a vertical line at (x, y) between two z values
    ///
    /// # Arguments
    /// * `x`, `y` - Horizontal position of the path
    /// * `z_min`, `z_max` - Vertical range of the path
    /// * `count` - Number of evenly spaced samples, at least [`MIN_SAMPLES`]
    /// * `sampler` - Value at a point, `None` where the data is undefined
    pub fn sample_vertical<F>(x: f64, y: f64, z_min: f64, z_max: f64, count: usize, sampler: F) -> Self
    where
        F: Fn(&Point3<f64>) -> Option<f64>,
    {
        let count = count.max(MIN_SAMPLES);
        let step = (z_max - z_min) / (count - 1) as f64;
        Self::from_samples((0..count).filter_map(|i| {
            let z = z_min + step * i as f64;
            sampler(&Point3::new(x, y, z)).map(|v| (z, v))
        }))
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Value at a z coordinate
    ///
    /// # Returns
    /// The interpolated or extrapolated value, or `f64::INFINITY` when the
    /// log has fewer than two samples
    pub fn value_at(&self, z: f64) -> f64 {
        let n = self.samples.len();
        if n < MIN_SAMPLES {
            return f64::INFINITY;
        }

        let (lower, upper) = if z <= self.samples[0].0 {
            (0, 1)
        } else if z >= self.samples[n - 1].0 {
            (n - 2, n - 1)
        } else {
            let upper = self.samples.partition_point(|s| s.0 < z);
            (upper - 1, upper)
        };

        let (z0, v0) = self.samples[lower];
        let (z1, v1) = self.samples[upper];
        v0 + (v1 - v0) * (z - z0) / (z1 - z0)
    }
}
