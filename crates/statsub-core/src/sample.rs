//! Named benchmark samples and the set that turns them into a mapping
//!
//! A [`StatSample`] owns one or two samplers. Each sampler call returns the
//! time taken by `run_size` operations; the sample reduces `sample_count`
//! such calls to a per-operation [`Stat`]. A difference sample measures a
//! second sampler as a baseline and subtracts it from the first.
//!
//! Timed samplers report nanoseconds, matching the default `~ns` unit.

use crate::collector::{CollectError, CollectResult, StatCollector};
use crate::mapping::{Stat, StatisticsMapping};
use std::time::{Duration, Instant};
use tracing::debug;

/// Returns the elapsed time of one run
pub type Sampler = Box<dyn FnMut() -> f64>;

/// Wall-clock timer started on construction
#[derive(Debug, Clone, Copy)]
pub struct Timer {
    start: Instant,
}

impl Timer {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn elapsed_nanos(&self) -> f64 {
        self.elapsed().as_secs_f64() * 1e9
    }
}

/// Time `run_size` calls of `body`, in nanoseconds
pub fn time_run<F: FnMut()>(run_size: usize, body: &mut F) -> f64 {
    let timer = Timer::start();
    for _ in 0..run_size {
        body();
    }
    timer.elapsed_nanos()
}

enum Samplers {
    Plain(Sampler),
    Difference { first: Sampler, second: Sampler },
}

/// A named measurement
pub struct StatSample {
    name: String,
    run_size: usize,
    samplers: Samplers,
}

impl std::fmt::Debug for StatSample {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self.samplers {
            Samplers::Plain(_) => "plain",
            Samplers::Difference { .. } => "difference",
        };
        f.debug_struct("StatSample")
            .field("name", &self.name)
            .field("run_size", &self.run_size)
            .field("kind", &kind)
            .finish()
    }
}

impl StatSample {
    /// A sample whose sampler returns the elapsed time of one run
    pub fn plain<S>(name: impl Into<String>, run_size: usize, sampler: S) -> Self
    where
        S: FnMut() -> f64 + 'static,
    {
        Self {
            name: name.into(),
            run_size,
            samplers: Samplers::Plain(Box::new(sampler)),
        }
    }

    /// A sample measuring `first` against the baseline `second`
    pub fn difference<A, B>(name: impl Into<String>, run_size: usize, first: A, second: B) -> Self
    where
        A: FnMut() -> f64 + 'static,
        B: FnMut() -> f64 + 'static,
    {
        Self {
            name: name.into(),
            run_size,
            samplers: Samplers::Difference {
                first: Box::new(first),
                second: Box::new(second),
            },
        }
    }

    /// A plain sample timing `run_size` calls of `body` per sample
    pub fn timed<F>(name: impl Into<String>, run_size: usize, mut body: F) -> Self
    where
        F: FnMut() + 'static,
    {
        Self::plain(name, run_size, move || time_run(run_size, &mut body))
    }

    /// A difference sample timing `body` against `baseline`
    pub fn timed_difference<F, G>(
        name: impl Into<String>,
        run_size: usize,
        mut body: F,
        mut baseline: G,
    ) -> Self
    where
        F: FnMut() + 'static,
        G: FnMut() + 'static,
    {
        Self::difference(
            name,
            run_size,
            move || time_run(run_size, &mut body),
            move || time_run(run_size, &mut baseline),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn run_size(&self) -> usize {
        self.run_size
    }

    /// Call the samplers `sample_count` times and reduce to a per-operation stat
    pub fn collect(&mut self, sample_count: usize) -> CollectResult<Stat> {
        let run_size = self.run_size;
        match &mut self.samplers {
            Samplers::Plain(sampler) => gather(sampler, sample_count).stat(run_size),
            Samplers::Difference { first, second } => {
                let measured = gather(first, sample_count).stat(run_size)?;
                let baseline = gather(second, sample_count).stat(run_size)?;
                Ok(measured - baseline)
            }
        }
    }
}

fn gather(sampler: &mut Sampler, sample_count: usize) -> StatCollector {
    let mut collector = StatCollector::with_capacity(sample_count);
    for _ in 0..sample_count {
        collector.add_sample(sampler());
    }
    collector
}

/// Registry of samples, collected in registration order
#[derive(Debug, Default)]
pub struct SampleSet {
    samples: Vec<StatSample>,
}

impl SampleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, sample: StatSample) -> &mut Self {
        self.samples.push(sample);
        self
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Collect every sample into a statistics mapping
    ///
    /// A later sample with the same name replaces an earlier one.
    pub fn collect(&mut self, sample_count: usize) -> CollectResult<StatisticsMapping> {
        let mut mapping = StatisticsMapping::new();
        for sample in &mut self.samples {
            let stat = sample
                .collect(sample_count)
                .map_err(|source| CollectError::Sample {
                    name: sample.name.clone(),
                    source: Box::new(source),
                })?;
            debug!(name = %sample.name, total = stat.total, count = stat.count, "Collected sample");
            mapping.insert(sample.name.clone(), stat);
        }
        Ok(mapping)
    }
}
