use embedded_hal::delay::DelayNs;
use log::{debug, info, trace, warn};

use crate::registers::*;
use crate::transport::{read_frame, read_result, write_frame, SelectLine, SpiMode, Transport};

/// A decoded touchscreen sample, 12 bits per axis
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TouchPoint {
    pub x: i16,
    pub y: i16,
}

/// Unpack one FIFO sample.
///
/// Byte 0 holds X[11:4], the high nibble of byte 1 holds X[3:0], the low
/// nibble holds Y[11:8] and byte 2 holds Y[7:0].
pub fn decode_sample(raw: [u8; SAMPLE_LEN]) -> TouchPoint {
    let x = (u16::from(raw[0]) << 4) | (u16::from(raw[1]) >> 4);
    let y = (u16::from(raw[1] & 0x0F) << 8) | u16::from(raw[2]);
    TouchPoint { x: x as i16, y: y as i16 }
}

/// STMPE811 touchscreen controller on an SPI bus, polled.
pub struct Stmpe811<T> {
    transport: T,
    select: SelectLine,
    mode: SpiMode,
    last: TouchPoint,
}

impl<T: Transport> Stmpe811<T> {
    pub fn new(transport: T, select: SelectLine) -> Self {
        Self {
            transport,
            select,
            mode: SpiMode::default(),
            last: TouchPoint::default(),
        }
    }

    /// Find the SPI mode the chip answers in, then configure it for polled
    /// X/Y acquisition.
    ///
    /// The mode select pins may float on some boards, so every mode is tried
    /// in order until the identification register reads [`CHIP_ID`]. If none
    /// does, [`Error::ChipNotFound`] is returned and nothing is configured.
    pub fn init(&mut self, delay: &mut impl DelayNs) -> Result<(), Error<T::Error>> {
        let mut id = 0;
        let mut found = false;
        for mode in SpiMode::ALL {
            self.mode = mode;
            self.write_register(Register::SysCtrl1, SOFT_RESET)?;
            self.write_register(Register::SysCtrl2, probing_clock_gates().as_repr())?;
            id = self.version()?;
            debug!("{:?}: probe {:?} read id 0x{:04X}", self.select, mode, id);
            if id == CHIP_ID {
                found = true;
                break;
            }
        }

        if !found {
            warn!("{:?}: no STMPE811 found in any SPI mode, last id 0x{:04X}", self.select, id);
            return Err(Error::ChipNotFound(id));
        }
        info!("{:?}: STMPE811 answering in SPI {:?}", self.select, self.mode);

        self.write_register(Register::AdcCtrl1, ADC_CTRL1_VALUE)?;
        delay.delay_ms(ADC_SETTLE_MS);
        self.write_register(Register::AdcCtrl2, ADC_CTRL2_VALUE)?;
        self.write_register(Register::GpioAltFunct, GPIO_ALT_FUNCT_NONE)?;

        self.write_register(Register::TscCfg, TSC_CFG_VALUE)?;
        self.write_register(Register::TscCtrl, TSC_CTRL_VALUE)?;
        self.write_register(Register::TscIDrive, TSC_I_DRIVE_VALUE)?;
        self.write_register(Register::TscFractZ, TSC_FRACT_Z_VALUE)?;

        self.write_register(Register::IntEn, INT_EN_NONE)?;
        self.reset_fifo()?;
        debug!("{:?}: touchscreen controller configured", self.select);
        Ok(())
    }

    /// Drains the FIFO, then reports the touch status bit of TSC_CTRL.
    pub fn is_touched(&mut self) -> Result<bool, Error<T::Error>> {
        self.read_fifo()?;
        Ok(self.read_register(Register::TscCtrl)? & TSC_STA_MASK != 0)
    }

    /// Last known X after draining the FIFO.
    ///
    /// `x()` followed by `y()` drains twice, so the two values can belong to
    /// different samples. Use [`Self::touch_point`] for a consistent pair.
    pub fn x(&mut self) -> Result<i16, Error<T::Error>> {
        self.read_fifo()?;
        Ok(self.last.x)
    }

    /// Last known Y after draining the FIFO.
    pub fn y(&mut self) -> Result<i16, Error<T::Error>> {
        self.read_fifo()?;
        Ok(self.last.y)
    }

    /// Last known position after a single FIFO drain
    pub fn touch_point(&mut self) -> Result<TouchPoint, Error<T::Error>> {
        self.read_fifo()?;
        Ok(self.last)
    }

    /// Identification register pair, big endian. Reads 0x0811 on a working chip.
    pub fn version(&mut self) -> Result<u16, Error<T::Error>> {
        let high = self.read_register(Register::ChipId)?;
        let low = self.read_register(Register::ChipIdLow)?;
        Ok(u16::from_be_bytes([high, low]))
    }

    pub fn revision(&mut self) -> Result<u8, Error<T::Error>> {
        self.read_register(Register::IdVer)
    }

    pub fn signaling_mode(&self) -> SpiMode {
        self.mode
    }

    pub fn select_line(&self) -> SelectLine {
        self.select
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Give the bus back
    pub fn release(self) -> T {
        self.transport
    }

    /// Keep only the newest queued sample, then restart the FIFO.
    fn read_fifo(&mut self) -> Result<(), Error<T::Error>> {
        let level = self.read_register(Register::FifoSize)?;
        if level > 1 {
            trace!("{:?}: dropping {} stale samples", self.select, level - 1);
            for _ in 0..usize::from(level - 1) * SAMPLE_LEN {
                self.read_register(Register::TscData)?;
            }
        }

        if level >= 1 {
            let mut raw = [0u8; SAMPLE_LEN];
            for byte in raw.iter_mut() {
                *byte = self.read_register(Register::TscData)?;
            }
            self.last = decode_sample(raw);
            trace!("{:?}: sample {:?}", self.select, self.last);
        }

        // The FIFO stalls unless it is pulsed through reset after each drain
        self.reset_fifo()
    }

    fn reset_fifo(&mut self) -> Result<(), Error<T::Error>> {
        self.write_register(Register::FifoCtrlSta, FIFO_RESET)?;
        self.write_register(Register::FifoCtrlSta, FIFO_OPERATE)
    }

    fn read_register(&mut self, register: Register) -> Result<u8, Error<T::Error>> {
        let mut frame = read_frame(register.into());
        self.transport
            .transaction(self.select, self.mode, &mut frame)
            .map_err(Error::Transport)?;
        let value = read_result(&frame);
        trace!("read {:?} = 0x{:02X}", register, value);
        Ok(value)
    }

    fn write_register(&mut self, register: Register, data: u8) -> Result<(), Error<T::Error>> {
        trace!("write {:?} = 0x{:02X}", register, data);
        let mut frame = write_frame(register.into(), data);
        self.transport
            .transaction(self.select, self.mode, &mut frame)
            .map_err(Error::Transport)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum Error<TransferE> {
    /// The bus reported a failed transfer
    Transport(TransferE),
    /// No SPI mode produced the expected identification; holds the last value read
    ChipNotFound(u16),
}

impl<E: core::fmt::Debug> core::fmt::Display for Error<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Transport(e) => write!(f, "SPI transport error: {:?}", e),
            Error::ChipNotFound(id) => write!(f, "STMPE811 not found (id 0x{:04X})", id),
        }
    }
}

impl<E: core::fmt::Debug> core::error::Error for Error<E> {}
