use bitfield::bitfield;
use embedded_hal::digital::OutputPin;
use embedded_hal_async::{delay::DelayNs, digital::Wait, i2c::I2c};

use crate::{regs::Register, Driver, DriverError};

bitfield! {
    /// Typed view of the STATUSRSSI register.
    #[derive(Clone, Copy, PartialEq, Eq)]
    #[cfg_attr(feature = "defmt", derive(defmt::Format))]
    pub struct StatusRssi(u16);
    impl Debug;
    /// New RDS group available in RDSA..RDSD.
    pub rdsr, _: 15;
    /// Seek/tune complete.
    pub stc, _: 14;
    /// Seek failed or hit the band limit.
    pub sfbl, _: 13;
    /// AFC rail.
    pub afcrl, _: 12;
    /// RDS decoder synchronized.
    pub rdss, _: 11;
    /// Block A errors.
    pub u8, blera, _: 10, 9;
    /// Stereo indicator.
    pub st, _: 8;
    /// Received signal strength in dBuV.
    pub u8, rssi, _: 7, 0;
}

impl StatusRssi {
    pub fn is_stereo(&self) -> bool {
        self.st()
    }

    pub fn seek_failed(&self) -> bool {
        self.sfbl()
    }
}

impl<Bus, E, ResetPin, IrqPin, Delay> Driver<Bus, ResetPin, IrqPin, Delay>
where
    Bus: I2c<Error = E>,
    ResetPin: OutputPin,
    IrqPin: Wait,
    Delay: DelayNs,
{
    /// Read the current signal status.
    pub async fn status(&mut self) -> Result<StatusRssi, DriverError<E>> {
        self.read_all().await?;
        Ok(StatusRssi(self.shadow.word(Register::StatusRssi)))
    }
}
