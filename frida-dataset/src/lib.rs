//! Tracklet index builder for the FRIDA person re-identification dataset.
//!
//! The crate walks the segment/camera layout of a FRIDA copy, turns the
//! annotation records into person tracklets, and partitions them into
//! train/test and query/gallery subsets.

mod common;
pub mod config;
pub mod dataset;
pub mod error;

pub use config::DatasetConfig;
pub use dataset::FridaDataset;
pub use error::{DatasetError, RecordIssue, Result};
