use fugit::{HertzU32, MillisDurationU32};

pub struct Config {
    pub spi_baudrate: HertzU32,
    pub poll_interval: MillisDurationU32,
}

impl Config {
    pub const fn new() -> Self {
        Config {
            spi_baudrate: HertzU32::MHz(1),
            poll_interval: MillisDurationU32::millis(20),
        }
    }
}
