//! STMPE811 touchscreen controller driver over SPI
//!
//! The driver is polled: it never enables the chip's interrupts. Each call to
//! [`Stmpe811::is_touched`], [`Stmpe811::x`], [`Stmpe811::y`] or
//! [`Stmpe811::touch_point`] drains the sample FIFO, keeps the newest sample
//! and pulses the FIFO back into operation.
//!
//! ### Usage
//! 1. implement [`Transport`] for your SPI bus and chip select lines
//! 1. create the driver with [`Stmpe811::new`] and run [`Stmpe811::init`],
//!    which also finds the SPI mode the chip was strapped to
//! 1. poll [`Stmpe811::is_touched`] and [`Stmpe811::touch_point`]
#![cfg_attr(not(test), no_std)]

pub mod registers;
pub mod touch;
pub mod transport;

#[cfg(test)]
mod fake;

pub use touch::{decode_sample, Error, Stmpe811, TouchPoint};
pub use transport::{SelectLine, SpiMode, Transport};
