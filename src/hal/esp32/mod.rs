//! ESP32 hardware abstraction layer for TM1637 display modules.
//!
//! Both bus lines run as open-drain GPIOs with the internal pull-ups
//! enabled, so DIO can be released for the acknowledgement slot without
//! switching pin direction. The module boards also carry external pull-ups.
//!
//! # Wiring
//!
//! - CLK → GPIO6
//! - DIO → GPIO7
//! - VCC → 3.3V or 5V
//! - GND → GND
//!
//! # Example
//!
//! ```ignore
//! use esp_idf_hal::peripherals::Peripherals;
//! use tm1637_display::hal::esp32::{esp32_bus, Esp32Delay};
//! use tm1637_display::hal::embedded::Line;
//! use tm1637_display::Tm1637;
//!
//! let peripherals = Peripherals::take()?;
//! let bus = esp32_bus(peripherals.pins.gpio6, peripherals.pins.gpio7)?;
//! let mut display = Tm1637::new(bus, Esp32Delay, Line::Clock, Line::Data)?;
//! display.show_number_dec(1234, false, 4, 0)?;
//! ```

use esp_idf_hal::delay::Ets;
use esp_idf_hal::gpio::{InputOutput, InputPin, OutputPin, PinDriver, Pull};
use esp_idf_hal::peripheral::Peripheral;

use crate::hal::embedded::TwoWirePins;
use crate::traits::Delay;

/// Two open-drain ESP32 pins acting as the display bus.
pub type Esp32Bus<'d, CLK, DIO> =
    TwoWirePins<PinDriver<'d, CLK, InputOutput>, PinDriver<'d, DIO, InputOutput>>;

/// Set up `clk` and `dio` as open-drain pins with pull-ups, both released.
///
/// # Errors
///
/// Returns an error if GPIO initialization fails.
pub fn esp32_bus<'d, CLK, DIO>(
    clk: impl Peripheral<P = CLK> + 'd,
    dio: impl Peripheral<P = DIO> + 'd,
) -> Result<Esp32Bus<'d, CLK, DIO>, esp_idf_hal::sys::EspError>
where
    CLK: InputPin + OutputPin,
    DIO: InputPin + OutputPin,
{
    let mut clk = PinDriver::input_output_od(clk)?;
    let mut dio = PinDriver::input_output_od(dio)?;

    clk.set_pull(Pull::Up)?;
    dio.set_pull(Pull::Up)?;
    clk.set_high()?;
    dio.set_high()?;

    Ok(TwoWirePins::new(clk, dio))
}

/// Busy-wait delay using the ROM `ets_delay_us` routine.
///
/// Does not yield to the scheduler; bus delays are a few hundred
/// microseconds at most.
#[derive(Clone, Copy, Debug, Default)]
pub struct Esp32Delay;

impl Delay for Esp32Delay {
    #[inline]
    fn delay_us(&mut self, us: u32) {
        Ets::delay_us(us);
    }
}
