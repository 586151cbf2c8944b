//! Controller command bytes and the brightness setting.
//!
//! The TM1637 understands three kinds of command, told apart by the top
//! two bits of the first byte after a start condition:
//!
//! | Command | Byte | Meaning |
//! |---------|------|---------|
//! | Data | `0x40` | Write to display registers, auto-increment address |
//! | Address | `0xC0 \| pos` | First display register for the following data bytes |
//! | Display control | `0x80 \| on \| level` | Bit 3 = display on, bits 0-2 = brightness |
//!
//! # Example
//!
//! ```rust
//! use tm1637_display::commands::{address_command, Brightness};
//!
//! assert_eq!(address_command(2), 0xC2);
//!
//! let brightness = Brightness::new(3, true);
//! assert_eq!(brightness.command(), 0x8B);
//! ```

/// Data command: write to display registers with automatic address increment.
pub const DATA_AUTO_INCREMENT: u8 = 0x40;

/// Base of the address command; the low bits select the start register.
pub const ADDRESS_BASE: u8 = 0xC0;

/// Base of the display control command.
pub const DISPLAY_CONTROL_BASE: u8 = 0x80;

/// Display-on bit within the display control command.
pub const DISPLAY_ON_BIT: u8 = 0x08;

/// Mask of the brightness level bits.
pub const LEVEL_MASK: u8 = 0x07;

/// Build the address command selecting `pos` as the first written register.
///
/// Positions above 3 are clamped to 3.
#[inline]
pub const fn address_command(pos: u8) -> u8 {
    let pos = if pos > 3 { 3 } else { pos };
    ADDRESS_BASE | pos
}

/// Brightness level plus display-on bit, as carried by the display control
/// command.
///
/// Levels outside 0-7 are masked, never rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Brightness {
    level: u8,
    on: bool,
}

impl Brightness {
    /// Display switched off.
    pub const OFF: Self = Self { level: 0, on: false };
    /// Dimmest lit setting.
    pub const LOW: Self = Self { level: 0, on: true };
    /// Middle setting.
    pub const MID: Self = Self { level: 2, on: true };
    /// Brightest setting.
    pub const HIGH: Self = Self { level: 7, on: true };

    /// Create a brightness setting; `level` is masked to 0-7.
    #[inline]
    pub const fn new(level: u8, on: bool) -> Self {
        Self {
            level: level & LEVEL_MASK,
            on,
        }
    }

    /// Brightness level (0-7).
    #[inline]
    pub const fn level(&self) -> u8 {
        self.level
    }

    /// Whether the display is switched on.
    #[inline]
    pub const fn is_on(&self) -> bool {
        self.on
    }

    /// Same level with a different on/off state.
    #[inline]
    pub const fn with_on(self, on: bool) -> Self {
        Self { on, ..self }
    }

    /// The low nibble of the display control command (on bit + level).
    #[inline]
    pub const fn bits(&self) -> u8 {
        let on = if self.on { DISPLAY_ON_BIT } else { 0 };
        on | self.level
    }

    /// The full display control command byte.
    #[inline]
    pub const fn command(&self) -> u8 {
        DISPLAY_CONTROL_BASE | self.bits()
    }
}

impl Default for Brightness {
    fn default() -> Self {
        Self::HIGH
    }
}
