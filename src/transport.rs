//! Bit-level two-wire transport.
//!
//! The TM1637 speaks an I2C-like protocol without device addresses. The
//! host owns the clock (CLK) and drives the data line (DIO) except during
//! the acknowledgement slot, when it releases DIO and the controller pulls
//! it low.
//!
//! # Framing
//!
//! ```text
//!        start        bit 0       bit 7      ack        stop
//! CLK  ‾‾‾‾‾‾‾‾‾\___/‾‾‾\__ ... _/‾‾‾\___/‾‾‾\______/‾‾‾‾‾‾‾‾
//! DIO  ‾‾‾‾\_____X  b0  X__ ... X b7  X   ack  X_______/‾‾‾‾
//! ```
//!
//! - Start: DIO falls while CLK is high
//! - Data: DIO changes while CLK is low and is sampled on the rising edge,
//!   least significant bit first
//! - Acknowledge: ninth clock, DIO released, low means acknowledged
//! - Stop: DIO rises while CLK is high, leaving the bus idle (both high)
//!
//! Each transaction is `start`, one or more `write_byte`, `stop`. Nothing
//! is remembered between transactions.

use log::trace;

use crate::traits::{Delay, Gpio};

/// Default delay between bus transitions in microseconds.
///
/// Well inside the controller's setup/hold limits on long jumper wires.
pub const DEFAULT_BIT_DELAY_US: u32 = 100;

/// Two-wire transport over a [`Gpio`] capability.
///
/// Owns the pin capability, the delay source and the two pin identifiers.
/// All methods take `&mut self`: a transaction must not be interleaved
/// with another one on the same bus.
pub struct Transport<G: Gpio, D: Delay> {
    gpio: G,
    delay: D,
    clk: G::Pin,
    dio: G::Pin,
    bit_delay_us: u32,
}

impl<G: Gpio, D: Delay> Transport<G, D> {
    /// Create a transport on the given clock and data pins.
    ///
    /// Does not touch the pins; call [`idle`](Self::idle) to put the bus
    /// into its resting state.
    pub fn new(gpio: G, delay: D, clk: G::Pin, dio: G::Pin, bit_delay_us: u32) -> Self {
        Self {
            gpio,
            delay,
            clk,
            dio,
            bit_delay_us,
        }
    }

    /// Configure both pins as outputs and drive them high.
    pub fn idle(&mut self) -> Result<(), G::Error> {
        self.gpio.configure_output(self.clk)?;
        self.gpio.configure_output(self.dio)?;
        self.gpio.set_high(self.clk)?;
        self.gpio.set_high(self.dio)
    }

    /// Wait one protocol step.
    #[inline]
    pub fn bit_delay(&mut self) {
        self.delay.delay_us(self.bit_delay_us);
    }

    /// Issue a start condition: DIO falls while CLK is high.
    pub fn start(&mut self) -> Result<(), G::Error> {
        self.gpio.configure_output(self.dio)?;
        self.gpio.set_high(self.dio)?;
        self.gpio.set_high(self.clk)?;
        self.bit_delay();
        self.gpio.set_low(self.dio)?;
        self.bit_delay();
        Ok(())
    }

    /// Issue a stop condition: DIO rises while CLK is high.
    ///
    /// Leaves both lines high.
    pub fn stop(&mut self) -> Result<(), G::Error> {
        self.gpio.configure_output(self.dio)?;
        self.gpio.set_low(self.clk)?;
        self.gpio.set_low(self.dio)?;
        self.bit_delay();
        self.gpio.set_high(self.clk)?;
        self.bit_delay();
        self.gpio.set_high(self.dio)?;
        self.bit_delay();
        Ok(())
    }

    /// Send one byte, least significant bit first, and sample the
    /// acknowledgement.
    ///
    /// Returns `Ok(true)` if the controller pulled DIO low during the ninth
    /// clock. A missing acknowledgement is not an error at this layer.
    pub fn write_byte(&mut self, byte: u8) -> Result<bool, G::Error> {
        self.gpio.configure_output(self.dio)?;

        let mut data = byte;
        for _ in 0..8 {
            self.gpio.set_low(self.clk)?;
            self.gpio.set_level(self.dio, data & 0x01 != 0)?;
            self.bit_delay();
            self.gpio.set_high(self.clk)?;
            self.bit_delay();
            data >>= 1;
        }

        // Ninth clock: release DIO and let the controller answer
        self.gpio.set_low(self.clk)?;
        self.gpio.configure_input_with_pullup(self.dio)?;
        self.bit_delay();
        self.gpio.set_high(self.clk)?;
        self.bit_delay();
        let acked = !self.gpio.read(self.dio)?;
        self.gpio.set_low(self.clk)?;
        self.bit_delay();

        trace!("tm1637 byte {:#04x} ack={}", byte, acked);
        Ok(acked)
    }

    /// Configured delay between transitions in microseconds.
    pub fn bit_delay_us(&self) -> u32 {
        self.bit_delay_us
    }

    /// Change the delay between transitions.
    pub fn set_bit_delay_us(&mut self, us: u32) {
        self.bit_delay_us = us;
    }

    /// Clock pin identifier.
    pub fn clk(&self) -> G::Pin {
        self.clk
    }

    /// Data pin identifier.
    pub fn dio(&self) -> G::Pin {
        self.dio
    }

    /// Shared access to the pin capability.
    pub fn gpio(&self) -> &G {
        &self.gpio
    }

    /// Shared access to the delay source.
    pub fn delay(&self) -> &D {
        &self.delay
    }

    /// Give back the pin capability and delay source.
    pub fn release(self) -> (G, D) {
        (self.gpio, self.delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::{MockDelay, MockGpio};

    const CLK: u8 = 2;
    const DIO: u8 = 3;

    fn transport(gpio: MockGpio) -> Transport<MockGpio, MockDelay> {
        let mut t = Transport::new(gpio, MockDelay::new(), CLK, DIO, 50);
        t.idle().unwrap();
        t
    }

    #[test]
    fn idle_leaves_bus_high() {
        let t = transport(MockGpio::new(CLK, DIO));
        assert!(t.gpio().clk_level());
        assert!(t.gpio().dio_level());
    }

    #[test]
    fn start_then_stop_is_empty_frame() {
        let mut t = transport(MockGpio::new(CLK, DIO));
        t.start().unwrap();
        assert!(t.gpio().clk_level());
        assert!(!t.gpio().dio_level());

        t.stop().unwrap();
        assert!(t.gpio().clk_level());
        assert!(t.gpio().dio_level());

        let frames = t.gpio().frames();
        assert_eq!(frames.len(), 1);
        assert!(frames[0].bytes.is_empty());
        assert!(frames[0].closed);
    }

    #[test]
    fn write_byte_acknowledged() {
        let mut t = transport(MockGpio::new(CLK, DIO));
        t.start().unwrap();
        assert!(t.write_byte(0x40).unwrap());
        t.stop().unwrap();

        let frames = t.gpio().frames();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].bytes, vec![0x40]);
        assert_eq!(frames[0].acks, vec![true]);
    }

    #[test]
    fn write_byte_lsb_first() {
        let mut t = transport(MockGpio::new(CLK, DIO));
        t.start().unwrap();
        t.write_byte(0b1000_0001).unwrap();
        t.stop().unwrap();

        let bits = t.gpio().sampled_bits();
        // 8 data bits then the ack slot
        assert_eq!(&bits[..8], &[true, false, false, false, false, false, false, true]);
        assert!(!bits[8]);
    }

    #[test]
    fn write_byte_not_acknowledged_still_sends_all_bits() {
        let mut gpio = MockGpio::new(CLK, DIO);
        gpio.set_acknowledge(false);
        let mut t = transport(gpio);

        t.start().unwrap();
        assert!(!t.write_byte(0xA5).unwrap());
        t.stop().unwrap();

        let frames = t.gpio().frames();
        assert_eq!(frames[0].bytes, vec![0xA5]);
        assert_eq!(frames[0].acks, vec![false]);
    }

    #[test]
    fn write_byte_releases_dio_for_ack() {
        let mut t = transport(MockGpio::new(CLK, DIO));
        t.start().unwrap();
        t.write_byte(0xFF).unwrap();
        assert_eq!(t.gpio().dio_mode(), crate::traits::PinMode::InputPullUp);

        // Next command drives DIO again
        t.stop().unwrap();
        assert_eq!(t.gpio().dio_mode(), crate::traits::PinMode::Output);
    }

    #[test]
    fn every_transition_is_delayed() {
        let mut t = transport(MockGpio::new(CLK, DIO));
        t.start().unwrap();
        t.write_byte(0x00).unwrap();
        t.stop().unwrap();

        // start: 2, byte: 8 * 2 + 3, stop: 3
        assert_eq!(t.delay().calls, 2 + 19 + 3);
        assert_eq!(t.delay().total_us, 24 * 50);
    }

    #[test]
    fn bit_delay_configurable() {
        let mut t = transport(MockGpio::new(CLK, DIO));
        t.set_bit_delay_us(5);
        assert_eq!(t.bit_delay_us(), 5);
        t.bit_delay();
        assert_eq!(t.delay().total_us, 5);
    }

    #[test]
    fn gpio_error_propagates() {
        let mut gpio = MockGpio::new(CLK, DIO);
        gpio.fail_after(4);
        let mut t = Transport::new(gpio, MockDelay::new(), CLK, DIO, 1);
        assert!(t.idle().is_ok());
        assert!(t.start().is_err());
    }

    #[test]
    fn release_returns_capabilities() {
        let t = transport(MockGpio::new(CLK, DIO));
        assert_eq!(t.clk(), CLK);
        assert_eq!(t.dio(), DIO);
        let (gpio, _delay) = t.release();
        assert!(gpio.clk_level());
    }
}
