//! Display driver configuration.
//!
//! # Example
//!
//! ```rust
//! use tm1637_display::config::{AckPolicy, DisplayConfig};
//!
//! // Use defaults
//! let config = DisplayConfig::default();
//! assert_eq!(config.bit_delay_us, 100);
//!
//! // Or customize
//! let config = DisplayConfig::default()
//!     .with_bit_delay_us(50)
//!     .with_brightness(3)
//!     .with_ack_policy(AckPolicy::Strict);
//! ```

use crate::commands::{Brightness, LEVEL_MASK};
use crate::transport::DEFAULT_BIT_DELAY_US;

/// What to do when the controller does not acknowledge a byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AckPolicy {
    /// Log the missing acknowledgement and carry on.
    ///
    /// The rest of the command is still sent; the display may end up
    /// showing a partial update.
    #[default]
    Ignore,
    /// Finish the transaction with a stop condition and return
    /// [`Error::Nack`](crate::Error::Nack).
    Strict,
}

/// Driver configuration.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DisplayConfig {
    /// Delay between bus transitions in microseconds
    pub bit_delay_us: u32,
    /// Initial brightness level (0-7)
    pub brightness: u8,
    /// Whether the display starts switched on
    pub display_on: bool,
    /// Reaction to unacknowledged bytes
    pub ack_policy: AckPolicy,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            bit_delay_us: DEFAULT_BIT_DELAY_US,
            brightness: 7,
            display_on: true,
            ack_policy: AckPolicy::Ignore,
        }
    }
}

impl DisplayConfig {
    /// Set the delay between bus transitions
    pub fn with_bit_delay_us(mut self, us: u32) -> Self {
        self.bit_delay_us = us;
        self
    }

    /// Set the initial brightness level (masked to 0-7)
    pub fn with_brightness(mut self, level: u8) -> Self {
        self.brightness = level & LEVEL_MASK;
        self
    }

    /// Set whether the display starts switched on
    pub fn with_display_on(mut self, on: bool) -> Self {
        self.display_on = on;
        self
    }

    /// Set the acknowledgement policy
    pub fn with_ack_policy(mut self, policy: AckPolicy) -> Self {
        self.ack_policy = policy;
        self
    }

    /// Initial brightness as a display control setting
    pub fn initial_brightness(&self) -> Brightness {
        Brightness::new(self.brightness, self.display_on)
    }
}

// ============================================================================
// Tests
// ============================================================================
