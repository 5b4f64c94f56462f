#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// camera model contract consumed by the rectification pipeline.
pub mod camera;

/// error types for the rectification module.
pub mod error;

/// utilities for interpolation.
pub mod interpolation;

/// module containing parallelization utilities.
pub mod parallel;

/// remap table construction module.
pub mod remap;

/// image resampling module.
pub mod resample;

/// image undistortion facade module.
pub mod undistort;

pub use crate::camera::{CameraModel, PinholeCamera};
pub use crate::error::RectifyError;
pub use crate::remap::RemapTable;
pub use crate::undistort::{MappedUndistorter, PassthroughUndistorter, Undistorter};
