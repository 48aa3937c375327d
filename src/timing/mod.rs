// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Timing module.
//!
//! This module provides the periodic ticker that drives the round clock.

pub mod ticker;

pub use ticker::{Ticker, DEFAULT_TICK};
