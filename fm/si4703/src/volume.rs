use embedded_hal::digital::OutputPin;
use embedded_hal_async::{delay::DelayNs, digital::Wait, i2c::I2c};

use crate::{
    regs::{powercfg, sysconfig2},
    Driver, DriverError,
};

/// Clamp a requested volume to the 4 bit range of the device.
pub fn clamp_volume(volume: i32) -> u8 {
    volume.clamp(0, sysconfig2::VOLUME_MAX as i32) as u8
}

impl<Bus, E, ResetPin, IrqPin, Delay> Driver<Bus, ResetPin, IrqPin, Delay>
where
    Bus: I2c<Error = E>,
    ResetPin: OutputPin,
    IrqPin: Wait,
    Delay: DelayNs,
{
    /// Set the volume, 0 (mute) to 15.
    /// Values outside that range are clamped, not rejected.
    pub async fn set_volume(&mut self, volume: i32) -> Result<(), DriverError<E>> {
        let volume = clamp_volume(volume);
        trace!("volume {=u8}", volume);

        self.read_all().await?;
        self.shadow.set_field(sysconfig2::VOLUME, volume as u16);
        self.write_all().await
    }

    pub async fn volume(&mut self) -> Result<u8, DriverError<E>> {
        self.read_all().await?;
        Ok(self.shadow.get_field(sysconfig2::VOLUME) as u8)
    }

    /// Mute or unmute the audio output.
    pub async fn set_mute(&mut self, mute: bool) -> Result<(), DriverError<E>> {
        self.read_all().await?;
        self.shadow.set_flag(powercfg::DMUTE, !mute);
        self.write_all().await
    }
}
