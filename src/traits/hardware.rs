//! Hardware capability traits for pin I/O and blocking delays.
//!
//! The driver never touches registers directly. Everything it needs from
//! the board is expressed through two small traits so the protocol logic
//! can run against real hardware, a simulator, or the mocks in
//! [`crate::hal::mock`].
//!
//! # Key Traits
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | [`Gpio`] | Pin direction, drive and sample for the clock and data lines |
//! | [`Delay`] | Blocking microsecond delay between bus transitions |
//!
//! # Implementation
//!
//! For testing and desktop development, use the mock implementations
//! from [`crate::hal::mock`]. For any embedded-hal 1.0 board use
//! `hal::embedded` (requires `embedded-hal` feature); for ESP32 hardware
//! use `hal::esp32` (requires `esp32` feature).
//!
//! # Example
//!
//! ```rust
//! use tm1637_display::hal::MockGpio;
//! use tm1637_display::traits::Gpio;
//!
//! let mut gpio = MockGpio::new(4, 5);
//! gpio.configure_output(4).unwrap();
//! gpio.set_low(4).unwrap();
//! assert!(!gpio.read(4).unwrap());
//! ```

/// Logical drive mode of a pin.
///
/// The data line of the two-wire bus alternates between driven output
/// and released input (pulled up) while the controller acknowledges.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PinMode {
    /// Pin is driven by the host.
    #[default]
    Output,
    /// Pin is released and held high by a pull-up unless something pulls it low.
    InputPullUp,
}

/// General purpose I/O capability.
///
/// Implement this trait for the board's pin access. Pins are addressed by
/// an implementation-defined identifier so a single capability can serve
/// both bus lines.
///
/// # Implementation Notes
///
/// - `read` must return the electrical level of the line, which for a
///   released pin is decided by the pull-up and whatever else drives it
/// - Open-drain implementations may treat `configure_output` as a no-op
///   and `configure_input_with_pullup` as "drive high"
///
/// # Example Implementation
///
/// ```rust,ignore
/// use tm1637_display::traits::Gpio;
///
/// struct MyBoard { /* register handles */ }
///
/// impl Gpio for MyBoard {
///     type Pin = u8;
///     type Error = ();
///
///     fn configure_output(&mut self, pin: u8) -> Result<(), ()> { Ok(()) }
///     fn configure_input_with_pullup(&mut self, pin: u8) -> Result<(), ()> { Ok(()) }
///     fn set_high(&mut self, pin: u8) -> Result<(), ()> { Ok(()) }
///     fn set_low(&mut self, pin: u8) -> Result<(), ()> { Ok(()) }
///     fn read(&mut self, pin: u8) -> Result<bool, ()> { Ok(true) }
/// }
/// ```
pub trait Gpio {
    /// Pin identifier.
    type Pin: Copy + core::fmt::Debug + PartialEq;

    /// Error type for pin operations.
    type Error: core::fmt::Debug;

    /// Configure `pin` as a driven output.
    fn configure_output(&mut self, pin: Self::Pin) -> Result<(), Self::Error>;

    /// Configure `pin` as an input with the pull-up enabled.
    fn configure_input_with_pullup(&mut self, pin: Self::Pin) -> Result<(), Self::Error>;

    /// Drive `pin` high (logic 1).
    fn set_high(&mut self, pin: Self::Pin) -> Result<(), Self::Error>;

    /// Drive `pin` low (logic 0).
    fn set_low(&mut self, pin: Self::Pin) -> Result<(), Self::Error>;

    /// Sample the level of `pin`. `true` means high.
    fn read(&mut self, pin: Self::Pin) -> Result<bool, Self::Error>;

    /// Drive `pin` to the given level.
    fn set_level(&mut self, pin: Self::Pin, high: bool) -> Result<(), Self::Error> {
        if high {
            self.set_high(pin)
        } else {
            self.set_low(pin)
        }
    }
}

/// Blocking delay capability.
///
/// The bus protocol is timed entirely by the host, so this must block
/// the calling context for at least the requested time. Busy-waiting is
/// the expected implementation.
pub trait Delay {
    /// Block for at least `us` microseconds.
    fn delay_us(&mut self, us: u32);
}
