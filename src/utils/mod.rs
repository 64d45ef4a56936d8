//! Utility helpers: math extensions, logging, and step profiling.

pub mod logging;
pub mod math;
pub mod profiling;

pub use math::*;
pub use profiling::{ScopedTimer, StepProfile};
