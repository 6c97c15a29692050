//! Tune and seek.
//!
//! Both follow the same cycle: read the registers, set the request bit,
//! write, wait for STC, read again, clear the request bit and write. The
//! device keeps STC set until the host clears TUNE or SEEK.

use core::pin::pin;

use embedded_hal::digital::OutputPin;
use embedded_hal_async::{delay::DelayNs, digital::Wait, i2c::I2c};
use futures::future::{self, Either};

use crate::{
    driver::Completion,
    regs::{channel, powercfg, readchan, statusrssi, BitField},
    Driver, DriverError, Frequency,
};

/// Lowest frequency of the band in units of 100 kHz (87.5 MHz).
pub const BAND_BOTTOM: Frequency = 875;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SeekDirection {
    Up,
    Down,
}

/// Channel code for a frequency in units of 100 kHz, with 100 kHz spacing.
///
/// Truncates like the application note formula `(f * 10 - 8750) / 10`.
/// Frequencies below the band map to the bottom channel.
pub fn channel_code(frequency: Frequency) -> u16 {
    let code = (frequency as i32 * 10 - 8750) / 10;
    code.clamp(0, channel::CHAN.mask() as i32) as u16
}

/// Inverse of [`channel_code`].
pub fn frequency_of(code: u16) -> Frequency {
    (code & readchan::READCHAN.mask()) + BAND_BOTTOM
}

impl<Bus, E, ResetPin, IrqPin, Delay> Driver<Bus, ResetPin, IrqPin, Delay>
where
    Bus: I2c<Error = E>,
    ResetPin: OutputPin,
    IrqPin: Wait,
    Delay: DelayNs,
{
    /// Tune to `frequency`, e.g. `987` for 98.7 MHz.
    pub async fn set_channel(&mut self, frequency: Frequency) -> Result<(), DriverError<E>> {
        let code = channel_code(frequency);
        debug!("tune to {=u16} (channel {=u16})", frequency, code);

        self.read_all().await?;
        self.shadow.set_field(channel::CHAN, code);
        self.shadow.set_flag(channel::TUNE, true);
        self.write_all().await?;

        self.await_completion().await?;
        self.end_request(channel::TUNE).await?;
        Ok(())
    }

    /// The currently tuned frequency, e.g. `987` for 98.7 MHz.
    pub async fn channel(&mut self) -> Result<Frequency, DriverError<E>> {
        self.read_all().await?;
        Ok(frequency_of(self.shadow.get_field(readchan::READCHAN)))
    }

    pub async fn seek_up(&mut self) -> Result<Option<Frequency>, DriverError<E>> {
        self.seek(SeekDirection::Up).await
    }

    pub async fn seek_down(&mut self) -> Result<Option<Frequency>, DriverError<E>> {
        self.seek(SeekDirection::Down).await
    }

    /// Seek to the next station in `direction`, wrapping at the band edges.
    ///
    /// Returns the frequency where the seek stopped, or `None` if the device
    /// reported a seek failure.
    pub async fn seek(
        &mut self,
        direction: SeekDirection,
    ) -> Result<Option<Frequency>, DriverError<E>> {
        debug!("seek {}", direction);

        self.read_all().await?;
        self.shadow.set_flag(powercfg::SKMODE, true);
        self.shadow
            .set_flag(powercfg::SEEKUP, direction == SeekDirection::Up);
        self.shadow.set_flag(powercfg::SEEK, true);
        self.write_all().await?;

        self.await_completion().await?;
        let failed = self.end_request(powercfg::SEEK).await?;

        if failed {
            warn!("seek failed");
            Ok(None)
        } else {
            Ok(Some(frequency_of(self.shadow.get_field(readchan::READCHAN))))
        }
    }

    /// Clear both TUNE and SEEK.
    ///
    /// Needed after a [`DriverError::Timeout`] to return the device to idle.
    pub async fn clear_tune_request(&mut self) -> Result<(), DriverError<E>> {
        self.read_all().await?;
        self.shadow.set_flag(channel::TUNE, false);
        self.shadow.set_flag(powercfg::SEEK, false);
        self.write_all().await
    }

    /// Wait until the current seek or tune has completed.
    async fn await_completion(&mut self) -> Result<(), DriverError<E>> {
        if let Completion::Interrupt { pin: irq, timeout_ms } = &mut self.completion {
            let edge = pin!(irq.wait_for_falling_edge());
            let timeout = pin!(self.delay.delay_ms(*timeout_ms));
            return match future::select(edge, timeout).await {
                Either::Left((result, _)) => result.map_err(|_| DriverError::Pin),
                Either::Right(_) => {
                    warn!("no stc interrupt within {=u32} ms", *timeout_ms);
                    Err(DriverError::Timeout)
                }
            };
        }

        loop {
            self.read_all().await?;
            if self.shadow.is_set(statusrssi::STC) {
                return Ok(());
            }
        }
    }

    /// Read back the registers and de-assert `request`.
    /// Returns the seek fail/band limit flag as it was before the clear.
    async fn end_request(&mut self, request: BitField) -> Result<bool, DriverError<E>> {
        self.read_all().await?;
        let failed = self.shadow.is_set(statusrssi::SFBL);
        self.shadow.set_flag(request, false);
        self.write_all().await?;
        Ok(failed)
    }
}
