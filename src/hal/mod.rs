//! Hardware Abstraction Layer implementations.
//!
//! This module contains concrete implementations of the traits
//! defined in [`crate::traits`] for various platforms.
//!
//! # Available Implementations
//!
//! - `mock`: Bus simulator for desktop development and tests
//! - `embedded`: Adapters for any `embedded-hal` 1.0 pins and delay (requires `embedded-hal` feature)
//! - `esp32`: ESP32 open-drain pins through esp-idf-hal (requires `esp32` feature)

pub mod mock;

#[cfg(feature = "embedded-hal")]
pub mod embedded;

#[cfg(feature = "esp32")]
pub mod esp32;

pub use mock::*;

#[cfg(feature = "embedded-hal")]
pub use embedded::*;

#[cfg(feature = "esp32")]
pub use esp32::*;
