//! Statsub Core - render named statistics into text templates
//!
//! This crate provides the substitution engine behind the `statsub` CLI:
//! a statistics file maps names to `(total, count)` pairs, and every
//! `%(name)` marker in a template is replaced by a rendered table cell.
//!
//! # Main Components
//!
//! - **Mapping**: [`StatisticsMapping`] and its JSON/YAML/TOML loaders
//! - **Rendering**: [`RenderStyle`], the fixed cell format
//! - **Substitution**: [`Substitutor`], literal marker replacement
//! - **Collection**: [`StatCollector`], reducing raw samples to a [`Stat`]
//! - **Sampling**: [`SampleSet`] of named [`StatSample`]s, producing a mapping
//!
//! # Example
//!
//! ```
//! use statsub_core::{substitute, StatisticsMapping};
//!
//! let stats = StatisticsMapping::from_json_str(r#"{"latency": [150.0, 100.0]}"#).unwrap();
//! let out = substitute(&stats, "lookup: %(latency)").unwrap();
//! assert_eq!(out, r"lookup: 150.0~ns & 150.00\% \");
//! ```

pub mod collector;
pub mod error;
pub mod mapping;
pub mod render;
pub mod sample;
pub mod substitute;

pub use collector::{CollectError, CollectResult, StatCollector};
pub use error::{DataFormat, Error, Result};
pub use mapping::{detect_format, Stat, StatisticsMapping};
pub use render::RenderStyle;
pub use sample::{time_run, SampleSet, StatSample, Timer};
pub use substitute::{marker, substitute, Substitution, Substitutor};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
