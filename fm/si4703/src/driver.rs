use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin};
use embedded_hal_async::{delay::DelayNs, digital::Wait, i2c::I2c};

use crate::{
    codec::{self, READ_BLOCK_LEN},
    rds::{RdsDecoder, RdsGroup},
    regs::{statusrssi, Register},
    shadow::RegisterFile,
    Config, DriverError,
};

/// How the end of a seek or tune is detected.
pub enum Completion<IrqPin> {
    /// Wait for GPIO2 to fall, bounded by `timeout_ms`.
    Interrupt { pin: IrqPin, timeout_ms: u32 },
    /// Read the registers back to back until STC is set.
    ///
    /// There is no bound on the number of reads. If the device never raises
    /// STC the operation does not complete.
    Polled,
}

/// Interrupt pin placeholder for a driver running in polled mode.
pub struct NoIrq;

impl ErrorType for NoIrq {
    type Error = Infallible;
}

impl Wait for NoIrq {
    async fn wait_for_high(&mut self) -> Result<(), Infallible> {
        Ok(())
    }

    async fn wait_for_low(&mut self) -> Result<(), Infallible> {
        Ok(())
    }

    async fn wait_for_rising_edge(&mut self) -> Result<(), Infallible> {
        Ok(())
    }

    async fn wait_for_falling_edge(&mut self) -> Result<(), Infallible> {
        Ok(())
    }

    async fn wait_for_any_edge(&mut self) -> Result<(), Infallible> {
        Ok(())
    }
}

pub struct Driver<Bus, ResetPin, IrqPin, Delay> {
    pub(crate) i2c: Bus,
    pub(crate) reset: ResetPin,
    pub(crate) completion: Completion<IrqPin>,
    pub(crate) delay: Delay,
    pub(crate) address: u8,
    pub(crate) shadow: RegisterFile,
    /// The register values the device is known to hold.
    committed: RegisterFile,
    pub(crate) rds: RdsDecoder,
}

impl<Bus, ResetPin, Delay> Driver<Bus, ResetPin, NoIrq, Delay> {
    /// Create a driver that polls STC to detect seek/tune completion.
    pub fn new(i2c: Bus, reset: ResetPin, delay: Delay, config: Config) -> Self {
        Self::with_completion(i2c, reset, Completion::Polled, delay, config)
    }
}

impl<Bus, ResetPin, IrqPin, Delay> Driver<Bus, ResetPin, IrqPin, Delay> {
    /// Create a driver that waits for the STC interrupt on GPIO2.
    ///
    /// `irq` must already be configured as an input with pull-up, GPIO2 is
    /// an open drain output on the device.
    pub fn new_with_interrupt(
        i2c: Bus,
        reset: ResetPin,
        irq: IrqPin,
        delay: Delay,
        config: Config,
    ) -> Self {
        let completion = Completion::Interrupt {
            pin: irq,
            timeout_ms: config.stc_timeout_ms,
        };
        Self::with_completion(i2c, reset, completion, delay, config)
    }

    fn with_completion(
        i2c: Bus,
        reset: ResetPin,
        completion: Completion<IrqPin>,
        delay: Delay,
        config: Config,
    ) -> Self {
        Self {
            i2c,
            reset,
            completion,
            delay,
            address: config.address,
            shadow: RegisterFile::new(),
            committed: RegisterFile::new(),
            rds: RdsDecoder::new(),
        }
    }

    pub fn uses_interrupt(&self) -> bool {
        matches!(self.completion, Completion::Interrupt { .. })
    }

    /// The register values as of the last read, including unwritten changes.
    pub fn registers(&self) -> &RegisterFile {
        &self.shadow
    }

    /// The RDS buffers.
    pub fn rds(&self) -> &RdsDecoder {
        &self.rds
    }

    /// Zero the RDS buffers. The registers are not touched.
    pub fn clear_rds_buffers(&mut self) {
        self.rds.clear();
    }

    /// Give back the peripherals.
    pub fn release(self) -> (Bus, ResetPin, Completion<IrqPin>, Delay) {
        (self.i2c, self.reset, self.completion, self.delay)
    }
}

impl<Bus, E, ResetPin, IrqPin, Delay> Driver<Bus, ResetPin, IrqPin, Delay>
where
    Bus: I2c<Error = E>,
    ResetPin: OutputPin,
    IrqPin: Wait,
    Delay: DelayNs,
{
    /// Refresh the whole register file from the device.
    ///
    /// Any pending RDS group is decoded as a side effect. On failure the
    /// register file is left as it was.
    pub(crate) async fn read_all(&mut self) -> Result<(), DriverError<E>> {
        // The device stores the command byte in the upper half of POWERCFG.
        let command = [codec::command_byte(&self.committed)];
        let mut raw = [0; READ_BLOCK_LEN];
        self.i2c
            .write_read(self.address, &command, &mut raw)
            .await
            .map_err(DriverError::I2c)?;

        self.shadow = codec::decode_block(&raw, Register::READ_START);
        self.committed = self.shadow;

        if self.shadow.is_set(statusrssi::RDSR) {
            let group = RdsGroup::from_registers(&self.shadow);
            let decoded = self.rds.decode(&group);
            trace!("rds group {=u8}: {}", group.group_type(), decoded);
        }

        Ok(())
    }

    /// Push the control registers 0x02..=0x07 to the device.
    ///
    /// On failure the pending changes are dropped and the register file
    /// returns to the values last read from or written to the device.
    pub(crate) async fn write_all(&mut self) -> Result<(), DriverError<E>> {
        let raw = codec::encode_block(&self.shadow);
        match self.i2c.write(self.address, &raw).await {
            Ok(()) => {
                self.committed = self.shadow;
                Ok(())
            }
            Err(e) => {
                warn!("block write failed, discarding changes");
                self.shadow = self.committed;
                Err(DriverError::I2c(e))
            }
        }
    }

    /// Read the device and decode a pending RDS group, if any.
    pub async fn process_rds(&mut self) -> Result<(), DriverError<E>> {
        self.read_all().await
    }
}
