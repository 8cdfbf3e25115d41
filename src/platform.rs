use std::collections::BTreeMap;

use esp_idf_hal::{
    delay::{Delay, FreeRtos},
    gpio::{AnyOutputPin, Output, OutputPin, Pin, PinDriver},
    peripherals::Peripherals,
    spi::{config::Config as SpiConfig, SpiBusDriver, SpiDriver, SpiDriverConfig},
    units::Hertz,
};
use esp_idf_sys::EspError;
use log::*;
use stmpe811_esp32_rs::{SelectLine, SpiMode, Stmpe811, TouchPoint, Transport};

use super::config::Config;

#[derive(Debug)]
pub enum TransportError {
    Esp(EspError),
    UnknownSelect(SelectLine),
}

impl From<EspError> for TransportError {
    fn from(e: EspError) -> Self {
        TransportError::Esp(e)
    }
}

/// SPI host shared by devices with their own chip select GPIOs.
///
/// The bus is reconfigured for every transaction since the SPI mode is only
/// known once the driver has probed the chip.
pub struct EspTransport<'d> {
    driver: SpiDriver<'d>,
    selects: BTreeMap<SelectLine, PinDriver<'d, AnyOutputPin, Output>>,
    baudrate: Hertz,
}

impl<'d> EspTransport<'d> {
    pub fn new(driver: SpiDriver<'d>, baudrate: Hertz) -> Self {
        EspTransport {
            driver,
            selects: BTreeMap::new(),
            baudrate,
        }
    }

    /// Register a chip select pin; it is addressed by its GPIO number.
    pub fn add_select(&mut self, pin: AnyOutputPin) -> Result<SelectLine, EspError> {
        let line = SelectLine(pin.pin() as u8);
        let mut cs = PinDriver::output(pin)?;
        cs.set_high()?;
        self.selects.insert(line, cs);
        Ok(line)
    }
}

impl Transport for EspTransport<'_> {
    type Error = TransportError;

    fn transaction(&mut self, select: SelectLine, mode: SpiMode, frame: &mut [u8]) -> Result<(), TransportError> {
        let cs = self
            .selects
            .get_mut(&select)
            .ok_or(TransportError::UnknownSelect(select))?;
        let config = SpiConfig::new().baudrate(self.baudrate).data_mode(mode.into());
        let mut bus = SpiBusDriver::new(&mut self.driver, &config)?;

        cs.set_low()?;
        let transferred = bus.transfer_in_place(frame).and_then(|_| bus.flush());
        cs.set_high()?;
        transferred.map_err(TransportError::Esp)
    }
}

pub fn run(config: &Config) -> anyhow::Result<()> {
    let peripherals = Peripherals::take()?;
    info!("Peripherals taken");

    let spi_driver = SpiDriver::new(
        peripherals.spi2,
        peripherals.pins.gpio14, // SCK
        peripherals.pins.gpio13, // MOSI
        Some(peripherals.pins.gpio12), // MISO
        &SpiDriverConfig::new(),
    )?;
    info!("SPI driver initialized");

    let mut transport = EspTransport::new(spi_driver, Hertz(config.spi_baudrate.to_Hz()));
    let touch_cs = transport.add_select(peripherals.pins.gpio5.downgrade_output())?;

    let mut touch = Stmpe811::new(transport, touch_cs);
    let mut delay = Delay::new_default();
    touch.init(&mut delay)?;
    info!(
        "STMPE811 version 0x{:04X} revision {} in SPI {:?}",
        touch.version()?,
        touch.revision()?,
        touch.signaling_mode()
    );

    let mut last_touch: Option<TouchPoint> = None;
    loop {
        if touch.is_touched()? {
            let point = touch.touch_point()?;
            match last_touch.replace(point) {
                Some(previous) if previous != point => info!("Touch moved: ({}, {})", point.x, point.y),
                Some(_) => {}
                None => info!("Touch pressed: ({}, {})", point.x, point.y),
            }
        } else if let Some(point) = last_touch.take() {
            info!("Touch released: ({}, {})", point.x, point.y);
        }
        FreeRtos::delay_ms(config.poll_interval.to_millis());
    }
}
