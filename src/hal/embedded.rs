//! Adapters for `embedded-hal` 1.0 pins and delays.
//!
//! [`TwoWirePins`] bundles a clock output and a data pin that can be both
//! driven and read. The data pin must be open-drain with a pull-up (the
//! TM1637 module boards carry 10k pull-ups on both lines): releasing DIO
//! is done by driving it high, which lets the controller pull it low to
//! acknowledge.
//!
//! # Example
//!
//! ```ignore
//! use tm1637_display::hal::embedded::{HalDelay, Line, TwoWirePins};
//! use tm1637_display::Tm1637;
//!
//! let pins = TwoWirePins::new(clk_pin, dio_pin);
//! let mut display = Tm1637::new(pins, HalDelay::new(delay), Line::Clock, Line::Data)?;
//! display.show_number_dec(42, false, 4, 0)?;
//! ```

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::traits::{Delay, Gpio};

/// Which of the two bus lines a call refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Line {
    /// CLK, always driven by the host.
    Clock,
    /// DIO, open-drain.
    Data,
}

/// Error from one of the two pins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PinError<C, D> {
    /// The clock pin failed.
    Clock(C),
    /// The data pin failed.
    Data(D),
    /// The clock line cannot be read back.
    NotReadable,
}

/// Clock and data pins as a [`Gpio`] capability.
pub struct TwoWirePins<CLK, DIO> {
    clk: CLK,
    dio: DIO,
}

impl<CLK, DIO> TwoWirePins<CLK, DIO>
where
    CLK: OutputPin,
    DIO: InputPin + OutputPin,
{
    /// Bundle the two pins.
    pub fn new(clk: CLK, dio: DIO) -> Self {
        Self { clk, dio }
    }

    /// Give back the pins.
    pub fn release(self) -> (CLK, DIO) {
        (self.clk, self.dio)
    }

    fn drive(&mut self, line: Line, high: bool) -> Result<(), PinError<CLK::Error, DIO::Error>> {
        match (line, high) {
            (Line::Clock, true) => self.clk.set_high().map_err(PinError::Clock),
            (Line::Clock, false) => self.clk.set_low().map_err(PinError::Clock),
            (Line::Data, true) => self.dio.set_high().map_err(PinError::Data),
            (Line::Data, false) => self.dio.set_low().map_err(PinError::Data),
        }
    }
}

impl<CLK, DIO> Gpio for TwoWirePins<CLK, DIO>
where
    CLK: OutputPin,
    DIO: InputPin + OutputPin,
{
    type Pin = Line;
    type Error = PinError<CLK::Error, DIO::Error>;

    fn configure_output(&mut self, _pin: Line) -> Result<(), Self::Error> {
        // Open-drain pins are always outputs
        Ok(())
    }

    fn configure_input_with_pullup(&mut self, pin: Line) -> Result<(), Self::Error> {
        self.drive(pin, true)
    }

    fn set_high(&mut self, pin: Line) -> Result<(), Self::Error> {
        self.drive(pin, true)
    }

    fn set_low(&mut self, pin: Line) -> Result<(), Self::Error> {
        self.drive(pin, false)
    }

    fn read(&mut self, pin: Line) -> Result<bool, Self::Error> {
        match pin {
            Line::Data => self.dio.is_high().map_err(PinError::Data),
            Line::Clock => Err(PinError::NotReadable),
        }
    }
}

/// Any `embedded-hal` delay as a [`Delay`].
pub struct HalDelay<D>(D);

impl<D: DelayNs> HalDelay<D> {
    /// Wrap a delay provider.
    pub fn new(delay: D) -> Self {
        Self(delay)
    }

    /// Give back the delay provider.
    pub fn into_inner(self) -> D {
        self.0
    }
}

impl<D: DelayNs> Delay for HalDelay<D> {
    fn delay_us(&mut self, us: u32) {
        self.0.delay_us(us);
    }
}
