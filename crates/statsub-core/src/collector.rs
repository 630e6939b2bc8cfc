//! Sample collection for producing statistics files
//!
//! A [`StatCollector`] accumulates raw timings of a benchmark run and reduces
//! them to a [`Stat`] of average and standard deviation, both normalized by
//! the number of operations performed per sample.

use crate::mapping::Stat;
use std::ops::Sub;
use thiserror::Error;

/// Result type alias for sample collection
pub type CollectResult<T> = std::result::Result<T, CollectError>;

/// Failures while reducing samples to a [`Stat`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollectError {
    /// A collector was asked for a stat before any sample was added
    #[error("Cannot compute stats with no samples")]
    NoSamples,

    /// A collector was asked to normalize by a zero run size
    #[error("Sample run size must be non-zero")]
    InvalidRunSize,

    /// A named sample of a [`SampleSet`](crate::sample::SampleSet) failed
    #[error("Sample '{name}' failed: {source}")]
    Sample {
        name: String,
        #[source]
        source: Box<CollectError>,
    },
}

#[derive(Debug, Clone, Default)]
pub struct StatCollector {
    samples: Vec<f64>,
}

impl StatCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: Vec::with_capacity(capacity),
        }
    }

    pub fn add_sample(&mut self, value: f64) {
        self.samples.push(value);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Average and population standard deviation per operation
    pub fn stat(&self, sample_run_size: usize) -> CollectResult<Stat> {
        if self.samples.is_empty() {
            return Err(CollectError::NoSamples);
        }
        if sample_run_size == 0 {
            return Err(CollectError::InvalidRunSize);
        }

        let n = self.samples.len() as f64;
        let average = self.samples.iter().sum::<f64>() / n;
        let variation: f64 = self.samples.iter().map(|s| (s - average).powi(2)).sum();
        let deviation = (variation / n).sqrt();

        let run = sample_run_size as f64;
        Ok(Stat::new(average / run, deviation / run))
    }
}

impl Extend<f64> for StatCollector {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        self.samples.extend(iter);
    }
}

/// Subtracting a baseline: averages subtract, deviations add
impl Sub for Stat {
    type Output = Stat;

    fn sub(self, rhs: Stat) -> Stat {
        Stat::new(self.total - rhs.total, self.count + rhs.count)
    }
}
