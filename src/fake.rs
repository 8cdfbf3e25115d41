//! Scripted STMPE811 stand-in used by the unit tests.

use std::collections::VecDeque;

use embedded_hal::delay::DelayNs;

use crate::registers::{Register, SAMPLE_LEN};
use crate::transport::{SelectLine, SpiMode, Transport};

/// One exchanged frame as seen on the wire
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    pub select: SelectLine,
    pub mode: SpiMode,
    pub tx: Vec<u8>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct BusFault;

/// Register file behind a bus that only answers in one SPI mode.
///
/// Reads in any other mode return 0xFF and writes are dropped. Reads from the
/// FIFO data port pop bytes from `fifo`; FIFO_SIZE reports whole samples left.
pub struct FakeChip {
    pub answers_in: Option<SpiMode>,
    pub registers: [u8; 256],
    pub fifo: VecDeque<u8>,
    pub log: Vec<Exchange>,
    pub fail_after: Option<usize>,
    /// Samples pushed into the FIFO after the given number of transactions
    pub pending: Vec<(usize, [u8; SAMPLE_LEN])>,
}

impl FakeChip {
    pub fn new(answers_in: Option<SpiMode>) -> Self {
        let mut registers = [0u8; 256];
        registers[Register::ChipId as usize] = 0x08;
        registers[Register::ChipIdLow as usize] = 0x11;
        registers[Register::IdVer as usize] = 0x03;
        Self {
            answers_in,
            registers,
            fifo: VecDeque::new(),
            log: Vec::new(),
            fail_after: None,
            pending: Vec::new(),
        }
    }

    pub fn push_sample(&mut self, sample: [u8; SAMPLE_LEN]) {
        self.fifo.extend(sample);
    }

    pub fn writes(&self) -> Vec<(u8, u8)> {
        self.log
            .iter()
            .filter(|e| e.tx.len() == 2)
            .map(|e| (e.tx[0], e.tx[1]))
            .collect()
    }

    pub fn reads(&self) -> Vec<u8> {
        self.log.iter().filter(|e| e.tx.len() == 3).map(|e| e.tx[0] & 0x7F).collect()
    }

    fn register(&mut self, address: u8) -> u8 {
        match address {
            a if a == Register::FifoSize as u8 => (self.fifo.len() / SAMPLE_LEN) as u8,
            a if a == Register::TscData as u8 => self.fifo.pop_front().unwrap_or(0),
            a => self.registers[a as usize],
        }
    }
}

impl Transport for FakeChip {
    type Error = BusFault;

    fn transaction(&mut self, select: SelectLine, mode: SpiMode, frame: &mut [u8]) -> Result<(), BusFault> {
        if self.fail_after.is_some_and(|n| self.log.len() >= n) {
            return Err(BusFault);
        }
        self.log.push(Exchange { select, mode, tx: frame.to_vec() });

        let count = self.log.len();
        let due: Vec<_> = self.pending.iter().filter(|(at, _)| *at == count).map(|(_, s)| *s).collect();
        for sample in due {
            self.push_sample(sample);
        }

        let listening = self.answers_in == Some(mode);
        match frame.len() {
            3 => {
                let value = if listening { self.register(frame[0] & 0x7F) } else { 0xFF };
                frame[1] = 0;
                frame[2] = value;
            }
            2 if listening => self.registers[frame[0] as usize] = frame[1],
            _ => {}
        }
        Ok(())
    }
}

/// Delay that only adds up what was requested
#[derive(Default)]
pub struct FakeDelay {
    pub total_ns: u64,
}

impl DelayNs for FakeDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }
}
