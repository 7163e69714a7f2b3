// Copyright 2016 spatial-rs Developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Error type shared by tree configuration, geometry construction and splitting

use thiserror::Error;

/// Errors raised when a tree, rectangle or split is requested with invalid input.
///
/// Absent data is never an error: deleting a missing entry or searching an empty
/// tree are normal outcomes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RTreeError {
    #[error("invalid child counts: min({min}) must be at least 1, max({max}) at least 3 and 2 * min <= max + 1")]
    InvalidChildren { min: usize, max: usize },

    #[error("loading factor {0} must be in (0, 1]")]
    InvalidLoadingFactor(f64),

    #[error("invalid rectangle ({x1}, {y1}) - ({x2}, {y2}): bounds must be finite with x1 <= x2 and y1 <= y2")]
    InvalidRect { x1: f64, y1: f64, x2: f64, y2: f64 },

    #[error("cannot split an empty list")]
    EmptySplit,

    #[error("cannot split {count} items into two groups of at least {min}")]
    InsufficientEntries { count: usize, min: usize },
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, RTreeError>;
