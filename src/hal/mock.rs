//! Mock implementations for testing without hardware.
//!
//! This module provides test doubles for the hardware traits, enabling
//! development and testing on desktop without a display module.
//!
//! # Available Mocks
//!
//! | Mock | Trait | Purpose |
//! |------|-------|---------|
//! | [`MockGpio`] | [`Gpio`] | Simulated two-wire bus with a TM1637 on the far end |
//! | [`MockDelay`] | [`Delay`] | Counts and sums requested delays |
//!
//! `MockGpio` does more than record pin writes: it resolves the electrical
//! level of both lines (pull-ups, released pins, the controller pulling DIO
//! low to acknowledge) and decodes the waveform the way the controller
//! would. Tests can inspect the decoded [`Frame`]s or the simulated display
//! registers.
//!
//! # Example
//!
//! ```rust
//! use tm1637_display::hal::{MockDelay, MockGpio};
//! use tm1637_display::Tm1637;
//!
//! let gpio = MockGpio::new(4, 5);
//! let mut display = Tm1637::new(gpio, MockDelay::new(), 4, 5).unwrap();
//! display.show_number_dec(42, false, 4, 0).unwrap();
//!
//! let gpio = display.gpio();
//! assert_eq!(gpio.frames().len(), 3);
//! assert_eq!(gpio.registers(), [0x00, 0x00, 0x66, 0x5B]);
//! ```
//!
//! [`Gpio`]: crate::traits::Gpio
//! [`Delay`]: crate::traits::Delay

extern crate alloc;
use alloc::vec::Vec;

use crate::traits::{Delay, Gpio, PinMode};

/// Number of display registers the simulated controller holds.
pub const MOCK_REGISTERS: usize = 6;

// ============================================================================
// Bus Simulation
// ============================================================================

/// One decoded bus transaction (start ... stop).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Frame {
    /// Bytes received, in order.
    pub bytes: Vec<u8>,
    /// Acknowledge level seen for each byte (`true` = acknowledged).
    pub acks: Vec<bool>,
    /// Whether the frame was terminated by a stop condition.
    pub closed: bool,
}

/// Electrical level of both lines after a change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BusLevel {
    /// Clock line level.
    pub clk: bool,
    /// Data line level.
    pub dio: bool,
}

/// Errors produced by [`MockGpio`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MockGpioError {
    /// The pin is neither the clock nor the data pin of this bus.
    UnknownPin(u8),
    /// Failure injected with [`MockGpio::fail_after`].
    Injected,
}

#[derive(Clone, Copy, Debug)]
struct Line {
    mode: PinMode,
    latch: bool,
}

impl Line {
    // Power-on: released, output latch high
    const RELEASED: Self = Self {
        mode: PinMode::InputPullUp,
        latch: true,
    };
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Receiver {
    Idle,
    Receiving { bits: u8, count: u8 },
}

/// Simulated two-wire bus with a TM1637 attached.
///
/// Pins are plain `u8` identifiers; only the clock and data pins given at
/// construction are accepted.
///
/// # Example
///
/// ```rust
/// use tm1637_display::hal::MockGpio;
/// use tm1637_display::traits::Gpio;
///
/// let mut gpio = MockGpio::new(2, 3);
/// assert!(gpio.read(3).unwrap()); // pulled up at power-on
/// assert!(gpio.set_high(9).is_err());
/// ```
#[derive(Clone, Debug)]
pub struct MockGpio {
    clk_pin: u8,
    dio_pin: u8,
    clk: Line,
    dio: Line,
    level: BusLevel,
    acknowledge: bool,
    receiver: Receiver,
    ack_hold: bool,
    frames: Vec<Frame>,
    sampled: Vec<bool>,
    trace: Vec<BusLevel>,
    registers: [u8; MOCK_REGISTERS],
    display_control: Option<u8>,
    auto_increment: bool,
    ops: usize,
    fail_after: Option<usize>,
}

impl MockGpio {
    /// Creates a bus on the given clock and data pins with an acknowledging
    /// controller.
    pub fn new(clk_pin: u8, dio_pin: u8) -> Self {
        let level = BusLevel {
            clk: true,
            dio: true,
        };
        let mut trace = Vec::new();
        trace.push(level);
        Self {
            clk_pin,
            dio_pin,
            clk: Line::RELEASED,
            dio: Line::RELEASED,
            level,
            acknowledge: true,
            receiver: Receiver::Idle,
            ack_hold: false,
            frames: Vec::new(),
            sampled: Vec::new(),
            trace,
            registers: [0; MOCK_REGISTERS],
            display_control: None,
            auto_increment: true,
            ops: 0,
            fail_after: None,
        }
    }

    /// Whether the simulated controller acknowledges bytes.
    ///
    /// A controller that does not acknowledge also ignores what it hears,
    /// so frames received meanwhile do not update [`registers`](Self::registers).
    pub fn set_acknowledge(&mut self, acknowledge: bool) {
        self.acknowledge = acknowledge;
    }

    /// Let the next `ops` pin operations succeed and fail every one after.
    pub fn fail_after(&mut self, ops: usize) {
        self.fail_after = Some(ops.saturating_add(self.ops));
    }

    /// Decoded transactions so far.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Bytes of every frame, in order.
    pub fn frame_bytes(&self) -> Vec<Vec<u8>> {
        self.frames.iter().map(|f| f.bytes.clone()).collect()
    }

    /// DIO level sampled at every CLK rising edge.
    pub fn sampled_bits(&self) -> &[bool] {
        &self.sampled
    }

    /// Every distinct bus level, starting with the power-on state.
    pub fn trace(&self) -> &[BusLevel] {
        &self.trace
    }

    /// Forget decoded frames, samples and trace, keeping register contents.
    pub fn clear_history(&mut self) {
        self.frames.clear();
        self.sampled.clear();
        self.trace.clear();
        self.trace.push(self.level);
    }

    /// The four digit registers as the simulated controller holds them.
    pub fn registers(&self) -> [u8; 4] {
        [
            self.registers[0],
            self.registers[1],
            self.registers[2],
            self.registers[3],
        ]
    }

    /// Last display control command accepted, if any.
    pub fn display_control(&self) -> Option<u8> {
        self.display_control
    }

    /// Current clock line level.
    pub fn clk_level(&self) -> bool {
        self.level.clk
    }

    /// Current data line level.
    pub fn dio_level(&self) -> bool {
        self.level.dio
    }

    /// Current drive mode of the data pin.
    pub fn dio_mode(&self) -> PinMode {
        self.dio.mode
    }

    /// Number of pin operations performed.
    pub fn op_count(&self) -> usize {
        self.ops
    }

    fn tick(&mut self) -> Result<(), MockGpioError> {
        if let Some(limit) = self.fail_after {
            if self.ops >= limit {
                return Err(MockGpioError::Injected);
            }
        }
        self.ops += 1;
        Ok(())
    }

    fn line_mut(&mut self, pin: u8) -> Result<&mut Line, MockGpioError> {
        if pin == self.clk_pin {
            Ok(&mut self.clk)
        } else if pin == self.dio_pin {
            Ok(&mut self.dio)
        } else {
            Err(MockGpioError::UnknownPin(pin))
        }
    }

    fn controller_pulls_dio(&self) -> bool {
        let ack_slot = matches!(self.receiver, Receiver::Receiving { count: 8, .. });
        self.acknowledge && (ack_slot || self.ack_hold)
    }

    fn resolve(&self) -> BusLevel {
        let clk = match self.clk.mode {
            PinMode::Output => self.clk.latch,
            PinMode::InputPullUp => true,
        };
        let dio = match self.dio.mode {
            PinMode::Output => self.dio.latch,
            PinMode::InputPullUp => !self.controller_pulls_dio(),
        };
        BusLevel { clk, dio }
    }

    /// Propagate pin changes, one line at a time, through the decoder.
    fn settle(&mut self) {
        loop {
            let target = self.resolve();
            if target == self.level {
                break;
            }
            let next = if target.clk != self.level.clk {
                BusLevel {
                    clk: target.clk,
                    dio: self.level.dio,
                }
            } else {
                target
            };
            let prev = self.level;
            self.level = next;
            self.trace.push(next);
            self.on_transition(prev, next);
        }
    }

    fn on_transition(&mut self, prev: BusLevel, next: BusLevel) {
        if prev.clk && next.clk {
            if prev.dio && !next.dio {
                self.on_start();
            } else if !prev.dio && next.dio {
                self.on_stop();
            }
        } else if !prev.clk && next.clk {
            self.on_clock_rise(next.dio);
        } else if prev.clk && !next.clk {
            self.ack_hold = false;
        }
    }

    fn on_start(&mut self) {
        self.frames.push(Frame::default());
        self.receiver = Receiver::Receiving { bits: 0, count: 0 };
    }

    fn on_stop(&mut self) {
        self.receiver = Receiver::Idle;
        let finished = match self.frames.last_mut() {
            Some(frame) if !frame.closed => {
                frame.closed = true;
                Some(frame.clone())
            }
            _ => None,
        };
        if let Some(frame) = finished {
            self.execute(&frame);
        }
    }

    fn on_clock_rise(&mut self, dio: bool) {
        self.sampled.push(dio);
        if let Receiver::Receiving { bits, count } = self.receiver {
            if count < 8 {
                let bits = bits | (u8::from(dio) << count);
                self.receiver = Receiver::Receiving {
                    bits,
                    count: count + 1,
                };
            } else {
                if let Some(frame) = self.frames.last_mut() {
                    frame.bytes.push(bits);
                    frame.acks.push(!dio);
                }
                self.ack_hold = self.acknowledge;
                self.receiver = Receiver::Receiving { bits: 0, count: 0 };
            }
        }
    }

    /// Apply a completed frame to the simulated controller.
    fn execute(&mut self, frame: &Frame) {
        if !self.acknowledge {
            return;
        }
        let Some((&command, data)) = frame.bytes.split_first() else {
            return;
        };
        match command & 0xC0 {
            0x40 => self.auto_increment = command & 0x04 == 0,
            0x80 => self.display_control = Some(command),
            0xC0 => {
                let mut addr = (command & 0x07) as usize;
                for &byte in data {
                    if let Some(reg) = self.registers.get_mut(addr) {
                        *reg = byte;
                    }
                    if self.auto_increment {
                        addr += 1;
                    }
                }
            }
            _ => {}
        }
    }
}

impl Gpio for MockGpio {
    type Pin = u8;
    type Error = MockGpioError;

    fn configure_output(&mut self, pin: u8) -> Result<(), MockGpioError> {
        self.tick()?;
        self.line_mut(pin)?.mode = PinMode::Output;
        self.settle();
        Ok(())
    }

    fn configure_input_with_pullup(&mut self, pin: u8) -> Result<(), MockGpioError> {
        self.tick()?;
        self.line_mut(pin)?.mode = PinMode::InputPullUp;
        self.settle();
        Ok(())
    }

    fn set_high(&mut self, pin: u8) -> Result<(), MockGpioError> {
        self.tick()?;
        self.line_mut(pin)?.latch = true;
        self.settle();
        Ok(())
    }

    fn set_low(&mut self, pin: u8) -> Result<(), MockGpioError> {
        self.tick()?;
        self.line_mut(pin)?.latch = false;
        self.settle();
        Ok(())
    }

    fn read(&mut self, pin: u8) -> Result<bool, MockGpioError> {
        self.tick()?;
        if pin == self.clk_pin {
            Ok(self.level.clk)
        } else if pin == self.dio_pin {
            Ok(self.level.dio)
        } else {
            Err(MockGpioError::UnknownPin(pin))
        }
    }
}

// ============================================================================
// Delay Mock
// ============================================================================

/// Mock delay that only counts.
///
/// # Example
///
/// ```rust
/// use tm1637_display::hal::MockDelay;
/// use tm1637_display::traits::Delay;
///
/// let mut delay = MockDelay::new();
/// delay.delay_us(100);
/// delay.delay_us(50);
/// assert_eq!(delay.calls, 2);
/// assert_eq!(delay.total_us, 150);
/// ```
#[derive(Debug, Default, Clone)]
pub struct MockDelay {
    /// Number of delay calls.
    pub calls: usize,
    /// Sum of all requested delays in microseconds.
    pub total_us: u64,
    /// Most recent requested delay.
    pub last_us: Option<u32>,
}

impl MockDelay {
    /// Creates a new mock delay with zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Delay for MockDelay {
    fn delay_us(&mut self, us: u32) {
        self.calls += 1;
        self.total_us += u64::from(us);
        self.last_us = Some(us);
    }
}
