//! # tm1637-display
//!
//! Driver for four-digit seven-segment modules built around the TM1637
//! LED controller, talking to it over a bit-banged two-wire bus.
//!
//! ## Features
//!
//! - **Hardware abstraction**: Traits for pin access and microsecond delays
//! - **Protocol transport**: Start/stop framing, LSB-first bytes, acknowledge sampling
//! - **Display operations**: Raw segments, decimal and hex numbers, colon, brightness
//! - **Bus simulator**: Mock pins that decode the waveform like the real controller
//!
//! ## Architecture
//!
//! The crate is structured to allow testing on desktop without hardware:
//!
//! - `traits` - Pin and delay abstractions
//! - `transport` - Bit-level two-wire protocol
//! - `commands` - Controller command bytes and brightness
//! - `segments` - Digit-to-segment encoding and number layout
//! - `display` - The [`Tm1637`] driver that ties everything together
//! - `hal` - Concrete implementations (mock for testing, embedded-hal and esp32 for hardware)
//!
//! ## Example
//!
//! ```rust
//! use tm1637_display::{hal::{MockDelay, MockGpio}, Tm1637};
//!
//! // Clock on pin 4, data on pin 5
//! let gpio = MockGpio::new(4, 5);
//! let mut display = Tm1637::new(gpio, MockDelay::new(), 4, 5).unwrap();
//!
//! // 12:34
//! display.set_brightness(5);
//! display.set_colon(true);
//! display.show_number_dec(1234, false, 4, 0).unwrap();
//!
//! assert_eq!(display.gpio().registers(), [0x06, 0xDB, 0x4F, 0x66]);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

/// Controller command bytes and brightness settings.
pub mod commands;
/// Driver configuration.
pub mod config;
/// High-level display driver.
pub mod display;
/// Error types.
pub mod error;
/// Hardware abstraction layer with mock implementations for testing.
pub mod hal;
/// Seven-segment glyph encoding and number layout.
pub mod segments;
/// Core traits for hardware abstraction.
pub mod traits;
/// Bit-level two-wire protocol.
pub mod transport;

// Re-exports for convenience
pub use commands::Brightness;
pub use config::{AckPolicy, DisplayConfig};
pub use display::Tm1637;
pub use error::Error;
pub use segments::{encode_digit, BLANK, COLON, DIGITS, MINUS};
pub use traits::{Delay, Gpio, PinMode};
pub use transport::{Transport, DEFAULT_BIT_DELAY_US};
