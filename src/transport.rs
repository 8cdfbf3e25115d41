//! Bus transport seam and SPI framing for register access.
//!
//! The STMPE811 SPI protocol is byte oriented. A register read sends the
//! address with bit 7 set, a dummy byte, and clocks the value out on the third
//! byte. A register write sends the address with bit 7 clear followed by the
//! data byte.

use core::fmt::Debug;
use embedded_hal::spi;

/// Chip select line that addresses one device on a shared bus
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SelectLine(pub u8);

/// The four clock polarity/phase combinations of SPI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpiMode {
    #[default]
    Mode0,
    Mode1,
    Mode2,
    Mode3,
}

impl SpiMode {
    /// Probe order used during init; lowest index wins.
    pub const ALL: [SpiMode; 4] = [SpiMode::Mode0, SpiMode::Mode1, SpiMode::Mode2, SpiMode::Mode3];

    pub fn index(self) -> u8 {
        self as u8
    }
}

impl From<SpiMode> for spi::Mode {
    fn from(mode: SpiMode) -> Self {
        match mode {
            SpiMode::Mode0 => spi::MODE_0,
            SpiMode::Mode1 => spi::MODE_1,
            SpiMode::Mode2 => spi::MODE_2,
            SpiMode::Mode3 => spi::MODE_3,
        }
    }
}

/// A bus able to run one framed transaction against a selected device.
///
/// Implementations configure the bus for `mode`, assert `select`, exchange
/// `frame` in place (full duplex) and release `select` again, whether or not
/// the transfer succeeded.
pub trait Transport {
    type Error: Debug;

    fn transaction(&mut self, select: SelectLine, mode: SpiMode, frame: &mut [u8]) -> Result<(), Self::Error>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    type Error = T::Error;

    fn transaction(&mut self, select: SelectLine, mode: SpiMode, frame: &mut [u8]) -> Result<(), Self::Error> {
        T::transaction(self, select, mode, frame)
    }
}

const READ_FLAG: u8 = 0x80;

/// Length of a register read frame
pub const READ_FRAME_LEN: usize = 3;
/// Length of a register write frame
pub const WRITE_FRAME_LEN: usize = 2;

pub fn read_frame(address: u8) -> [u8; READ_FRAME_LEN] {
    [address | READ_FLAG, 0x00, 0x00]
}

pub fn write_frame(address: u8, data: u8) -> [u8; WRITE_FRAME_LEN] {
    [address & !READ_FLAG, data]
}

/// Byte holding the register value after a read frame was exchanged
pub fn read_result(frame: &[u8; READ_FRAME_LEN]) -> u8 {
    frame[READ_FRAME_LEN - 1]
}
