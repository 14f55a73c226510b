//! Utility functions for the command line front end.
//!
//! ## Modules
//!
//! - [`input`] - Memory-mapped or inline input text
//! - [`progress`] - Progress bars (no-op without the `progress` feature)
//! - [`random`] - Random text generation for benchmarks

pub mod input;
pub mod progress;
pub mod random;

pub use input::*;
pub use random::*;
