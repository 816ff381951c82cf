//! Mathematical utilities for the engine

/// RGB color distance metrics
pub mod color;
