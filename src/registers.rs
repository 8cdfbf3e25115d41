//! STMPE811 register map and the values this driver programs into it.
//!
//! Only the system, interrupt, ADC and touchscreen registers are listed; the
//! GPIO block and temperature sensor are left untouched apart from the
//! alternate function register, which is cleared during init.

use enumset::{EnumSet, EnumSetType};

/// Register addresses on the STMPE811
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Register {
    /// Device identification, two bytes, reads 0x0811
    ChipId = 0x00,
    /// Second byte of the identification pair
    ChipIdLow = 0x01,
    /// Revision number
    IdVer = 0x02,
    /// Reset control
    SysCtrl1 = 0x03,
    /// Clock control
    SysCtrl2 = 0x04,
    /// Interrupt enable
    IntEn = 0x0A,
    /// GPIO alternate function
    GpioAltFunct = 0x17,
    /// ADC sample time, resolution and reference
    AdcCtrl1 = 0x20,
    /// ADC clock speed
    AdcCtrl2 = 0x21,
    /// Touchscreen controller setup and status
    TscCtrl = 0x40,
    /// Touchscreen averaging, touch detect delay and settling time
    TscCfg = 0x41,
    /// FIFO control and status
    FifoCtrlSta = 0x4B,
    /// Number of samples queued in the FIFO
    FifoSize = 0x4C,
    /// Pressure measurement fraction/whole split
    TscFractZ = 0x56,
    /// FIFO data port, three bytes per XY sample
    TscData = 0x57,
    /// Touchscreen drive current
    TscIDrive = 0x58,
}

impl From<Register> for u8 {
    fn from(reg: Register) -> Self {
        reg as u8
    }
}

/// Identification value reported by every STMPE811
pub const CHIP_ID: u16 = 0x0811;

/// SYS_CTRL1: soft reset
pub const SOFT_RESET: u8 = 0b0000_0010;

/// ADC_CTRL1: 80 clock conversion time, 12 bit, internal reference
pub const ADC_CTRL1_VALUE: u8 = 0b0100_1000;
/// ADC_CTRL2: 3.25 MHz ADC clock
pub const ADC_CTRL2_VALUE: u8 = 0b0000_0001;
/// ADC needs this long after ADC_CTRL1 before ADC_CTRL2 may be written (AN2807)
pub const ADC_SETTLE_MS: u32 = 2;

/// GPIO_ALT_FUNCT: every pin left to its default function
pub const GPIO_ALT_FUNCT_NONE: u8 = 0;

/// TSC_CFG: 4 sample average, 5 ms touch detect delay, 5 ms settling
pub const TSC_CFG_VALUE: u8 = 0b1010_1100;
/// TSC_CTRL: no window tracking, X/Y acquisition, controller enabled
pub const TSC_CTRL_VALUE: u8 = 0b0000_0011;
/// TSC_CTRL status bit, set while the panel is touched
pub const TSC_STA_MASK: u8 = 0x80;
/// TSC_I_DRIVE: 50 mA typical, 80 mA max
pub const TSC_I_DRIVE_VALUE: u8 = 0b0000_0001;
/// TSC_FRACT_Z: 7 fractional bits, 1 whole bit
pub const TSC_FRACT_Z_VALUE: u8 = 0x07;

/// INT_EN: everything masked, the driver only polls
pub const INT_EN_NONE: u8 = 0;

/// FIFO_CTRL_STA: hold the FIFO in reset
pub const FIFO_RESET: u8 = 0b0000_0001;
/// FIFO_CTRL_STA: FIFO back in operation
pub const FIFO_OPERATE: u8 = 0x00;

/// Bytes per XY sample in the FIFO data port
pub const SAMPLE_LEN: usize = 3;

/// Clock gates in SYS_CTRL2; a set bit switches the block's clock off
#[derive(EnumSetType, Debug)]
#[enumset(repr = "u8")]
pub enum ClockGate {
    Adc,
    Tsc,
    Gpio,
    TempSensor,
}

/// Blocks gated off during probing. GPIO is the only one not needed.
pub fn probing_clock_gates() -> EnumSet<ClockGate> {
    EnumSet::only(ClockGate::Gpio)
}
