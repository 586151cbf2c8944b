//! Trait definitions for hardware abstraction.
//!
//! # Hardware Abstraction
//!
//! - [`Gpio`]: Direction, drive and sampling of the clock and data pins
//! - [`Delay`]: Blocking microsecond delay used between bus transitions

pub mod hardware;

pub use hardware::*;
