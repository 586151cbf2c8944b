//! TM1637 display controller.
//!
//! This module provides [`Tm1637`], which turns display-oriented requests
//! into controller commands sent over the [`Transport`].
//!
//! # Overview
//!
//! Every write to the display is three transactions:
//!
//! 1. Data command `0x40` (write registers, auto-increment address)
//! 2. Address command `0xC0 | pos` followed by the segment bytes
//! 3. Display control command carrying brightness and the on bit
//!
//! Brightness and the colon flag are only stored when set; they reach the
//! controller with the next write.
//!
//! # Example
//!
//! ```rust
//! use tm1637_display::{hal::{MockDelay, MockGpio}, Tm1637};
//!
//! let gpio = MockGpio::new(4, 5);
//! let mut display = Tm1637::new(gpio, MockDelay::new(), 4, 5).unwrap();
//!
//! display.set_brightness(3);
//! display.set_colon(true);
//! display.show_number_dec(1230, true, 4, 0).unwrap();
//!
//! assert_eq!(display.gpio().display_control(), Some(0x8B));
//! ```
//!
//! # Acknowledgements
//!
//! By default a byte the controller does not acknowledge is logged and
//! ignored, so a disconnected module looks exactly like a connected one to
//! the caller. Use [`AckPolicy::Strict`] to get [`Error::Nack`] instead:
//!
//! ```rust
//! use tm1637_display::{hal::{MockDelay, MockGpio}, AckPolicy, DisplayConfig, Error, Tm1637};
//!
//! let mut gpio = MockGpio::new(4, 5);
//! gpio.set_acknowledge(false);
//!
//! let config = DisplayConfig::default().with_ack_policy(AckPolicy::Strict);
//! let mut display = Tm1637::with_config(gpio, MockDelay::new(), 4, 5, &config).unwrap();
//!
//! assert_eq!(display.clear(), Err(Error::Nack { byte: 0x40 }));
//! ```

use log::{debug, warn};

use crate::commands::{address_command, Brightness, DATA_AUTO_INCREMENT};
use crate::config::{AckPolicy, DisplayConfig};
use crate::error::Error;
use crate::segments::{self, apply_colon, decimal_segments, hex_segments, BLANK, DIGITS};
use crate::traits::{Delay, Gpio};
use crate::transport::Transport;

/// Highest valid start position.
const LAST_POSITION: u8 = (DIGITS - 1) as u8;

/// Four-digit TM1637 display.
///
/// # Type Parameters
///
/// - `G`: Pin access ([`Gpio`] trait)
/// - `D`: Blocking delay ([`Delay`] trait)
///
/// # Thread Safety
///
/// Every operation takes `&mut self` and runs a complete start/stop
/// bracket before returning. The driver is not `Clone`; to use it from
/// several threads or tasks wrap it in a mutex so one operation runs at a
/// time.
///
/// # Out-of-range Arguments
///
/// Nothing panics on bad input:
/// - brightness levels are masked to 0-7
/// - start positions above 3 are clamped to 3
/// - segment bytes that would run past the last digit are dropped
/// - digit values use only their low nibble
pub struct Tm1637<G: Gpio, D: Delay> {
    transport: Transport<G, D>,
    brightness: Brightness,
    colon: bool,
    ack_policy: AckPolicy,
}

impl<G: Gpio, D: Delay> Tm1637<G, D> {
    /// Create a driver with the default configuration and put the bus in
    /// its idle state.
    pub fn new(gpio: G, delay: D, clk: G::Pin, dio: G::Pin) -> Result<Self, Error<G::Error>> {
        Self::with_config(gpio, delay, clk, dio, &DisplayConfig::default())
    }

    /// Create a driver from a [`DisplayConfig`] and put the bus in its idle
    /// state.
    pub fn with_config(
        gpio: G,
        delay: D,
        clk: G::Pin,
        dio: G::Pin,
        config: &DisplayConfig,
    ) -> Result<Self, Error<G::Error>> {
        let mut transport = Transport::new(gpio, delay, clk, dio, config.bit_delay_us);
        transport.idle()?;
        debug!(
            "tm1637 on clk={:?} dio={:?}, bit delay {}us",
            clk, dio, config.bit_delay_us
        );

        Ok(Self {
            transport,
            brightness: config.initial_brightness(),
            colon: false,
            ack_policy: config.ack_policy,
        })
    }

    // ========================================================================
    // State
    // ========================================================================

    /// Set the brightness level (0-7) and switch the display on.
    ///
    /// Takes effect with the next write.
    pub fn set_brightness(&mut self, level: u8) {
        self.brightness = Brightness::new(level, true);
    }

    /// Set the brightness level (0-7) and the on/off state.
    ///
    /// Takes effect with the next write.
    pub fn set_brightness_with_state(&mut self, level: u8, on: bool) {
        self.brightness = Brightness::new(level, on);
    }

    /// Switch the display on or off, keeping the level.
    ///
    /// Takes effect with the next write.
    pub fn set_display_on(&mut self, on: bool) {
        self.brightness = self.brightness.with_on(on);
    }

    /// Light the colon on the next decimal write.
    pub fn set_colon(&mut self, on: bool) {
        self.colon = on;
    }

    /// Current brightness setting.
    pub fn brightness(&self) -> Brightness {
        self.brightness
    }

    /// Whether the display is set to be on.
    pub fn is_display_on(&self) -> bool {
        self.brightness.is_on()
    }

    /// Current colon flag.
    pub fn colon(&self) -> bool {
        self.colon
    }

    /// Current acknowledgement policy.
    pub fn ack_policy(&self) -> AckPolicy {
        self.ack_policy
    }

    /// Change the acknowledgement policy.
    pub fn set_ack_policy(&mut self, policy: AckPolicy) {
        self.ack_policy = policy;
    }

    /// Translate a digit (0-15) into its segment pattern.
    pub fn encode_digit(&self, digit: u8) -> u8 {
        segments::encode_digit(digit)
    }

    // ========================================================================
    // Display Writes
    // ========================================================================

    /// Write raw segment bytes starting at digit `pos` (0 = leftmost).
    ///
    /// Only `segments.len()` digits are touched; the others keep whatever
    /// they showed. The stored brightness is sent along.
    pub fn set_segments(&mut self, segments: &[u8], pos: u8) -> Result<(), Error<G::Error>> {
        let pos = pos.min(LAST_POSITION);
        let room = DIGITS - pos as usize;
        let segments = &segments[..segments.len().min(room)];
        debug!("tm1637 write {:02x?} at {}", segments, pos);

        self.transaction(DATA_AUTO_INCREMENT, &[])?;
        self.transaction(address_command(pos), segments)?;
        self.transaction(self.brightness.command(), &[])
    }

    /// Write all four digits.
    pub fn set_all(&mut self, segments: &[u8; DIGITS]) -> Result<(), Error<G::Error>> {
        self.set_segments(segments, 0)
    }

    /// Show `num` in decimal on `length` digits starting at `pos`.
    ///
    /// The least significant digit lands on `pos + length - 1`. Leading
    /// places are blank unless `leading_zero` is set; digits that do not fit
    /// are dropped. If the colon flag is set, the colon bit is added to the
    /// digit written at position 1.
    ///
    /// See [`segments::decimal_segments`] for the exact placement rules.
    pub fn show_number_dec(
        &mut self,
        num: i32,
        leading_zero: bool,
        length: u8,
        pos: u8,
    ) -> Result<(), Error<G::Error>> {
        let mut digits = decimal_segments(num, leading_zero, length);
        if self.colon {
            apply_colon(&mut digits, pos.min(LAST_POSITION));
        }
        self.set_segments(&digits, pos)
    }

    /// Show `num` in hexadecimal on `length` digits starting at `pos`.
    pub fn show_number_hex(
        &mut self,
        num: u16,
        leading_zero: bool,
        length: u8,
        pos: u8,
    ) -> Result<(), Error<G::Error>> {
        let digits = hex_segments(num, leading_zero, length);
        self.set_segments(&digits, pos)
    }

    /// Blank all four digits. Brightness is left as it is.
    pub fn clear(&mut self) -> Result<(), Error<G::Error>> {
        self.set_segments(&[BLANK; DIGITS], 0)
    }

    /// Send only the display control command (brightness and on bit).
    pub fn refresh_brightness(&mut self) -> Result<(), Error<G::Error>> {
        self.transaction(self.brightness.command(), &[])
    }

    // ========================================================================
    // Access
    // ========================================================================

    /// Shared access to the pin capability.
    pub fn gpio(&self) -> &G {
        self.transport.gpio()
    }

    /// Shared access to the delay source.
    pub fn delay(&self) -> &D {
        self.transport.delay()
    }

    /// Mutable access to the underlying transport.
    pub fn transport_mut(&mut self) -> &mut Transport<G, D> {
        &mut self.transport
    }

    /// Give back the pin capability and delay source.
    pub fn release(self) -> (G, D) {
        self.transport.release()
    }

    /// One start ... stop bracket: `command` followed by `data`.
    fn transaction(&mut self, command: u8, data: &[u8]) -> Result<(), Error<G::Error>> {
        self.transport.start()?;

        let mut nack = None;
        for &byte in core::iter::once(&command).chain(data) {
            if self.transport.write_byte(byte)? {
                continue;
            }
            warn!("tm1637 did not acknowledge {:#04x}", byte);
            if self.ack_policy == AckPolicy::Strict {
                nack = Some(byte);
                break;
            }
        }

        self.transport.stop()?;
        match nack {
            Some(byte) => Err(Error::Nack { byte }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::{MockDelay, MockGpio, MockGpioError};
    use crate::segments::{encode_digit, COLON, MINUS};

    const CLK: u8 = 4;
    const DIO: u8 = 5;

    fn display() -> Tm1637<MockGpio, MockDelay> {
        Tm1637::new(MockGpio::new(CLK, DIO), MockDelay::new(), CLK, DIO).unwrap()
    }

    /// The segment bytes of the address frame of the last write.
    fn written(display: &Tm1637<MockGpio, MockDelay>) -> Vec<u8> {
        let frames = display.gpio().frames();
        let address = &frames[frames.len() - 2];
        address.bytes[1..].to_vec()
    }

    #[test]
    fn new_does_not_send_commands() {
        let d = display();
        assert!(d.gpio().frames().is_empty());
        assert!(d.gpio().clk_level());
        assert!(d.gpio().dio_level());
    }

    #[test]
    fn set_segments_sends_three_transactions() {
        let mut d = display();
        d.set_segments(&[0x3F, 0x06], 1).unwrap();

        assert_eq!(
            d.gpio().frame_bytes(),
            vec![vec![0x40], vec![0xC1, 0x3F, 0x06], vec![0x8F]]
        );
        assert!(d.gpio().frames().iter().all(|f| f.closed));
    }

    #[test]
    fn set_segments_leaves_other_digits() {
        let mut d = display();
        d.set_all(&[1, 2, 3, 4]).unwrap();
        d.set_segments(&[9], 2).unwrap();
        assert_eq!(d.gpio().registers(), [1, 2, 9, 4]);
    }

    #[test]
    fn set_segments_empty_still_brackets() {
        let mut d = display();
        d.set_segments(&[], 0).unwrap();
        assert_eq!(
            d.gpio().frame_bytes(),
            vec![vec![0x40], vec![0xC0], vec![0x8F]]
        );
    }

    #[test]
    fn set_segments_truncates_past_last_digit() {
        let mut d = display();
        d.set_segments(&[1, 2, 3, 4], 2).unwrap();
        assert_eq!(written(&d), vec![1, 2]);

        d.set_segments(&[7, 8], 9).unwrap();
        assert_eq!(d.gpio().frames()[4].bytes, vec![0xC3, 7]);
    }

    #[test]
    fn brightness_resent_with_every_write() {
        let mut d = display();
        d.set_brightness(2);
        // Nothing sent until the next write
        assert!(d.gpio().frames().is_empty());

        d.clear().unwrap();
        assert_eq!(d.gpio().display_control(), Some(0x8A));

        d.set_display_on(false);
        d.clear().unwrap();
        assert_eq!(d.gpio().display_control(), Some(0x82));
        assert!(!d.is_display_on());
    }

    #[test]
    fn brightness_with_state() {
        let mut d = display();
        d.set_brightness_with_state(0x0D, false);
        assert_eq!(d.brightness().level(), 5);
        d.refresh_brightness().unwrap();
        assert_eq!(d.gpio().frame_bytes(), vec![vec![0x85]]);
    }

    #[test]
    fn show_number_dec_blank_leading() {
        let mut d = display();
        d.show_number_dec(42, false, 4, 0).unwrap();
        assert_eq!(written(&d), vec![0, 0, encode_digit(4), encode_digit(2)]);
    }

    #[test]
    fn show_number_dec_leading_zero() {
        let mut d = display();
        d.show_number_dec(42, true, 4, 0).unwrap();
        assert_eq!(
            written(&d),
            vec![encode_digit(0), encode_digit(0), encode_digit(4), encode_digit(2)]
        );
    }

    #[test]
    fn show_number_dec_colon_at_position_one() {
        let mut d = display();
        d.set_colon(true);
        d.show_number_dec(5, true, 1, 1).unwrap();
        assert_eq!(d.gpio().frames()[1].bytes, vec![0xC1, encode_digit(5) | COLON]);
    }

    #[test]
    fn colon_only_on_position_one() {
        let mut d = display();
        d.set_colon(true);
        d.show_number_dec(1234, false, 4, 0).unwrap();
        assert_eq!(
            written(&d),
            vec![
                encode_digit(1),
                encode_digit(2) | COLON,
                encode_digit(3),
                encode_digit(4)
            ]
        );
    }

    #[test]
    fn colon_not_applied_to_raw_segments() {
        let mut d = display();
        d.set_colon(true);
        d.show_number_dec(12, true, 2, 0).unwrap();
        d.set_segments(&[0x06, 0x5B], 0).unwrap();
        assert_eq!(written(&d), vec![0x06, 0x5B]);
        assert!(d.colon());
    }

    #[test]
    fn colon_skipped_when_position_one_not_written() {
        let mut d = display();
        d.set_colon(true);
        d.show_number_dec(7, false, 2, 2).unwrap();
        assert_eq!(written(&d), vec![0, encode_digit(7)]);
    }

    #[test]
    fn show_number_dec_negative() {
        let mut d = display();
        d.show_number_dec(-12, false, 4, 0).unwrap();
        assert_eq!(
            d.gpio().registers(),
            [0, MINUS, encode_digit(1), encode_digit(2)]
        );
    }

    #[test]
    fn show_number_hex_digits() {
        let mut d = display();
        d.show_number_hex(0xC0DE, false, 4, 0).unwrap();
        assert_eq!(d.gpio().registers(), [0x39, 0x3F, 0x5E, 0x79]);
    }

    #[test]
    fn clear_blanks_and_keeps_brightness() {
        let mut d = display();
        d.set_brightness(1);
        d.show_number_dec(8888, false, 4, 0).unwrap();
        d.clear().unwrap();

        assert_eq!(written(&d), vec![0, 0, 0, 0]);
        assert_eq!(d.gpio().registers(), [0, 0, 0, 0]);
        assert_eq!(d.brightness(), Brightness::new(1, true));
        assert_eq!(d.gpio().display_control(), Some(0x89));
    }

    #[test]
    fn nack_ignored_by_default() {
        let mut gpio = MockGpio::new(CLK, DIO);
        gpio.set_acknowledge(false);
        let mut d = Tm1637::new(gpio, MockDelay::new(), CLK, DIO).unwrap();

        assert!(d.show_number_dec(1, false, 4, 0).is_ok());
        // All three transactions went out in full
        assert_eq!(d.gpio().frames().len(), 3);
        assert_eq!(d.gpio().frames()[1].bytes.len(), 5);
    }

    #[test]
    fn strict_policy_reports_nack_and_closes_frame() {
        let mut gpio = MockGpio::new(CLK, DIO);
        gpio.set_acknowledge(false);
        let mut d = Tm1637::new(gpio, MockDelay::new(), CLK, DIO).unwrap();
        d.set_ack_policy(AckPolicy::Strict);

        assert_eq!(d.clear(), Err(Error::Nack { byte: 0x40 }));
        assert_eq!(d.gpio().frames().len(), 1);
        assert!(d.gpio().frames()[0].closed);
        assert!(d.gpio().clk_level());
        assert!(d.gpio().dio_level());
    }

    #[test]
    fn gpio_error_surfaces() {
        let (mut gpio, delay) = display().release();
        gpio.fail_after(0);
        let result = Tm1637::new(gpio, delay, CLK, DIO);
        assert!(matches!(result, Err(Error::Gpio(MockGpioError::Injected))));
    }

    #[test]
    fn with_config_applies_settings() {
        let config = DisplayConfig::default()
            .with_bit_delay_us(10)
            .with_brightness(4)
            .with_display_on(false);
        let mut d =
            Tm1637::with_config(MockGpio::new(CLK, DIO), MockDelay::new(), CLK, DIO, &config)
                .unwrap();

        d.clear().unwrap();
        assert_eq!(d.gpio().display_control(), Some(0x84));
        assert_eq!(d.delay().last_us, Some(10));
    }

    #[test]
    fn encode_digit_matches_table() {
        let d = display();
        for digit in 0..16 {
            assert_eq!(d.encode_digit(digit), encode_digit(digit));
        }
    }
}
