//! Si4703 FM radio receiver driver.
//!
//! The Si4703 keeps its whole state in 16 registers that can only be
//! transferred as a block: reads start at STATUSRSSI and wrap around, writes
//! start at POWERCFG and stop after TEST1. The driver keeps a shadow copy of
//! the registers, and every operation reads the block, changes the bits it
//! owns and writes the control registers back.
//!
//! # Examples
//!
//! Typical session:
//! Method            Bus                          Description
//! init()            RST low/low/high             Select 2-wire mode
//!                   R32, W12 (TEST1=8100)        Start oscillator, wait 500 ms
//!                   R32, W12 (POWERCFG=4001)     Power up, wait 110 ms
//!
//! set_channel(987)  R32, W12 (CHANNEL=8070)      Set TUNE
//!                   R32...                       Poll until STC (or wait for GPIO2)
//!                   R32, W12 (CHANNEL=0070)      Clear TUNE
//!
//! process_rds()     R32                          Decode RDSB..RDSD if RDSR is set

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

mod codec;
mod config;
mod driver;
mod error;
mod power;
pub mod rds;
pub mod regs;
mod shadow;
mod status;
mod tune;
mod volume;

#[cfg(test)]
mod testing;

/// Frequency in units of 100 kHz, e.g. `987` for 98.7 MHz.
pub type Frequency = u16;

pub use self::{
    codec::{command_byte, decode_block, encode_block, READ_BLOCK_LEN, WRITE_BLOCK_LEN},
    config::{Config, DEFAULT_ADDRESS, DEFAULT_STC_TIMEOUT_MS},
    driver::{Completion, Driver, NoIrq},
    error::DriverError,
    power::{OSCILLATOR_SETTLE_MS, POWER_UP_MS, RESET_PHASE_MS},
    rds::{RdsDecoder, RdsGroup},
    shadow::RegisterFile,
    status::StatusRssi,
    tune::{channel_code, frequency_of, SeekDirection, BAND_BOTTOM},
    volume::clamp_volume,
};
