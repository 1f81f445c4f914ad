//! # Album Battle Common Library
//!
//! Shared code for the album comparison service:
//! - Dataset loading with load-once memoization
//! - Display name to album id resolution
//! - Welch's t-test and the comparison verdict
//! - Chart series construction and relabeling
//! - Configuration loading

pub mod charts;
pub mod compare;
pub mod config;
pub mod dataset;
pub mod error;
pub mod selection;
pub mod stats;
pub mod time;

pub use compare::{compare, Comparison, Verdict};
pub use dataset::{AlbumId, Datasets};
pub use error::{Error, Result};
pub use selection::{AlbumLookup, Selection};
