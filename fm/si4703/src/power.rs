//! Power up and power down sequences from AN230.

use embedded_hal::digital::OutputPin;
use embedded_hal_async::{delay::DelayNs, digital::Wait, i2c::I2c};

use crate::{
    regs::{powercfg, sysconfig1, sysconfig2, sysconfig3, test1, Register},
    Driver, DriverError,
};

/// Settle time of each phase of the reset sequence.
pub const RESET_PHASE_MS: u32 = 100;
/// Crystal oscillator settle time after XOSCEN.
pub const OSCILLATOR_SETTLE_MS: u32 = 500;
/// Maximum power up time.
pub const POWER_UP_MS: u32 = 110;

const INITIAL_VOLUME: u16 = 1;

impl<Bus, E, ResetPin, IrqPin, Delay> Driver<Bus, ResetPin, IrqPin, Delay>
where
    Bus: I2c<Error = E>,
    ResetPin: OutputPin,
    IrqPin: Wait,
    Delay: DelayNs,
{
    /// Reset the device into 2-wire mode, start the oscillator and power up
    /// with RDS enabled, 50 us de-emphasis and 100 kHz spacing.
    pub async fn init(&mut self) -> Result<(), DriverError<E>> {
        debug!("reset");
        // SDIO must be low on the rising edge of RST to select the 2-wire bus.
        self.reset.set_low().map_err(|_| DriverError::Pin)?;
        self.delay.delay_ms(RESET_PHASE_MS).await;
        self.reset.set_low().map_err(|_| DriverError::Pin)?;
        self.delay.delay_ms(RESET_PHASE_MS).await;
        self.reset.set_high().map_err(|_| DriverError::Pin)?;
        self.delay.delay_ms(RESET_PHASE_MS).await;

        debug!("enable oscillator");
        self.read_all().await?;
        self.shadow
            .set_word(Register::Test1, test1::OSCILLATOR_ENABLE);
        self.write_all().await?;
        self.delay.delay_ms(OSCILLATOR_SETTLE_MS).await;

        debug!("power up");
        self.read_all().await?;
        self.shadow.set_word(Register::PowerCfg, powercfg::POWER_UP);

        self.shadow.set_flag(sysconfig1::RDS, true);
        self.shadow.set_flag(sysconfig1::DE, true);
        self.shadow
            .or_field(sysconfig1::GPIO2, sysconfig1::GPIO2_INTERRUPT);
        if self.uses_interrupt() {
            self.shadow.set_flag(sysconfig1::STCIEN, true);
        }

        self.shadow
            .or_field(sysconfig2::SEEKTH, sysconfig2::SEEKTH_RECOMMENDED);
        self.shadow
            .or_field(sysconfig2::SPACE, sysconfig2::SPACE_100KHZ);
        self.shadow.or_field(sysconfig2::VOLUME, INITIAL_VOLUME);

        self.shadow
            .or_field(sysconfig3::SKSNR, sysconfig3::SKSNR_RECOMMENDED);
        self.shadow
            .or_field(sysconfig3::SKCNT, sysconfig3::SKCNT_RECOMMENDED);

        self.write_all().await?;
        self.delay.delay_ms(POWER_UP_MS).await;

        Ok(())
    }

    /// Power down the device. Register contents are lost.
    pub async fn shutdown(&mut self) -> Result<(), DriverError<E>> {
        debug!("power down");
        self.read_all().await?;
        self.shadow.set_word(Register::Test1, test1::POWER_DOWN);
        self.shadow.set_word(Register::PowerCfg, powercfg::POWER_DOWN);
        self.shadow
            .set_word(Register::SysConfig1, sysconfig1::POWER_DOWN);
        self.write_all().await
    }
}
