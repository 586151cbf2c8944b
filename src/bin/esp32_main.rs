//! ESP32 TM1637 clock demo.
//!
//! Counts minutes and seconds since boot on a four-digit module, blinking
//! the colon once per second and stepping through the brightness levels
//! every minute.
//!
//! # Hardware Setup
//!
//! - CLK → GPIO6
//! - DIO → GPIO7
//!
//! # Build
//!
//! ```bash
//! cargo build --release --features esp32 --bin esp32_main
//! ```

use esp_idf_hal::peripherals::Peripherals;
use log::{info, warn};
use std::thread;
use std::time::Duration;
use tm1637_display::hal::embedded::Line;
use tm1637_display::hal::esp32::{esp32_bus, Esp32Delay};
use tm1637_display::{AckPolicy, DisplayConfig, Tm1637};

/// Half of the colon blink period
const TICK_MS: u64 = 500;

fn main() -> anyhow::Result<()> {
    // Initialize ESP-IDF
    esp_idf_hal::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();

    info!("tm1637 clock demo");

    let peripherals = Peripherals::take()?;

    // =========================================================================
    // Initialize Display (TM1637 on GPIO6/7)
    // =========================================================================
    let bus = esp32_bus(peripherals.pins.gpio6, peripherals.pins.gpio7)?;
    let config = DisplayConfig::default()
        .with_bit_delay_us(50)
        .with_brightness(2)
        .with_ack_policy(AckPolicy::Strict);

    let mut display = Tm1637::with_config(bus, Esp32Delay, Line::Clock, Line::Data, &config)
        .map_err(|e| anyhow::anyhow!("display init failed: {:?}", e))?;

    // Probe once; a missing module shows up as an unacknowledged data command
    match display.clear() {
        Ok(()) => info!("display found on GPIO6/7"),
        Err(e) => {
            warn!("display did not answer ({}), continuing without acks", e);
            display.set_ack_policy(AckPolicy::Ignore);
        }
    }

    // =========================================================================
    // Main Loop (2Hz)
    // =========================================================================
    let mut ticks: u32 = 0;
    loop {
        let seconds = ticks / 2;
        let minutes = (seconds / 60) % 100;

        if seconds % 60 == 0 && ticks % 2 == 0 {
            let level = (minutes % 8) as u8;
            display.set_brightness(level);
            info!("{:02} min, brightness {}", minutes, level);
        }

        display.set_colon(ticks % 2 == 0);
        let value = (minutes * 100 + seconds % 60) as i32;
        if let Err(e) = display.show_number_dec(value, true, 4, 0) {
            warn!("display write failed: {}", e);
        }

        ticks = ticks.wrapping_add(1);
        thread::sleep(Duration::from_millis(TICK_MS));
    }
}
