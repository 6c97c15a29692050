//! Si4703 register map.
//!
//! See the Si4702/03-C19 datasheet and application note AN230 for the
//! meaning of the individual fields.

/// Number of 16 bit registers in the device.
pub const REGISTER_COUNT: usize = 16;

#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Register {
    DeviceId = 0x00,
    ChipId = 0x01,
    PowerCfg = 0x02,
    Channel = 0x03,
    SysConfig1 = 0x04,
    SysConfig2 = 0x05,
    SysConfig3 = 0x06,
    Test1 = 0x07,
    /// Reserved, must be read before being written.
    Test2 = 0x08,
    /// Reserved, must be read before being written.
    BootConfig = 0x09,
    StatusRssi = 0x0A,
    ReadChan = 0x0B,
    RdsA = 0x0C,
    RdsB = 0x0D,
    RdsC = 0x0E,
    RdsD = 0x0F,
}

impl Register {
    /// The register at which every block read starts.
    pub const READ_START: Register = Register::StatusRssi;
    /// The register at which every block write starts.
    pub const WRITE_START: Register = Register::PowerCfg;
    /// The last register included in a block write.
    pub const WRITE_END: Register = Register::Test1;

    pub const fn idx(self) -> usize {
        self as usize
    }
}

/// Location of a named value inside the register file.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BitField {
    pub register: Register,
    pub offset: u8,
    pub width: u8,
}

impl BitField {
    pub const fn new(register: Register, offset: u8, width: u8) -> Self {
        assert!(width > 0 && offset + width <= 16);
        Self {
            register,
            offset,
            width,
        }
    }

    pub const fn flag(register: Register, offset: u8) -> Self {
        Self::new(register, offset, 1)
    }

    /// The field mask, not shifted into position.
    pub const fn mask(&self) -> u16 {
        if self.width == 16 {
            0xFFFF
        } else {
            (1 << self.width) - 1
        }
    }

    pub const fn extract(&self, word: u16) -> u16 {
        (word >> self.offset) & self.mask()
    }

    pub const fn insert(&self, word: u16, value: u16) -> u16 {
        let mask = self.mask() << self.offset;
        (word & !mask) | ((value << self.offset) & mask)
    }
}

pub mod powercfg {
    use super::{BitField, Register::PowerCfg};

    /// Softmute disable
    pub const DSMUTE: BitField = BitField::flag(PowerCfg, 15);
    /// Mute disable
    pub const DMUTE: BitField = BitField::flag(PowerCfg, 14);
    /// Stereo/mono select
    pub const MONO: BitField = BitField::flag(PowerCfg, 13);
    /// Seek mode.
    pub const SKMODE: BitField = BitField::flag(PowerCfg, 10);
    /// Seek direction. 0 is down, 1 is up.
    pub const SEEKUP: BitField = BitField::flag(PowerCfg, 9);
    /// Start seek. Must be cleared by the host after STC is set.
    pub const SEEK: BitField = BitField::flag(PowerCfg, 8);
    pub const DISABLE: BitField = BitField::flag(PowerCfg, 6);
    pub const ENABLE: BitField = BitField::flag(PowerCfg, 0);

    /// Power up pattern: DMUTE | ENABLE.
    pub const POWER_UP: u16 = 0x4001;
    /// Power down pattern: DISABLE | ENABLE | reserved bits from AN230.
    pub const POWER_DOWN: u16 = 0x002A;
}

pub mod channel {
    use super::{BitField, Register::Channel};

    /// Start tune. Must be cleared by the host after STC is set.
    pub const TUNE: BitField = BitField::flag(Channel, 15);
    pub const CHAN: BitField = BitField::new(Channel, 0, 10);
}

pub mod sysconfig1 {
    use super::{BitField, Register::SysConfig1};

    /// RDS interrupt enable
    pub const RDSIEN: BitField = BitField::flag(SysConfig1, 15);
    /// Seek/tune complete interrupt enable
    pub const STCIEN: BitField = BitField::flag(SysConfig1, 14);
    pub const RDS: BitField = BitField::flag(SysConfig1, 12);
    /// De-emphasis. 0 is 75 us (USA), 1 is 50 us (Europe, Australia, Japan).
    pub const DE: BitField = BitField::flag(SysConfig1, 11);
    pub const AGCD: BitField = BitField::flag(SysConfig1, 10);
    pub const BLNDADJ: BitField = BitField::new(SysConfig1, 6, 2);
    pub const GPIO3: BitField = BitField::new(SysConfig1, 4, 2);
    /// 0b01 routes STC/RDS interrupts to GPIO2.
    pub const GPIO2: BitField = BitField::new(SysConfig1, 2, 2);
    pub const GPIO1: BitField = BitField::new(SysConfig1, 0, 2);

    pub const GPIO2_INTERRUPT: u16 = 0b01;

    pub const POWER_DOWN: u16 = 0x0041;
}

pub mod sysconfig2 {
    use super::{BitField, Register::SysConfig2};

    /// RSSI seek threshold
    pub const SEEKTH: BitField = BitField::new(SysConfig2, 8, 8);
    pub const BAND: BitField = BitField::new(SysConfig2, 6, 2);
    /// Channel spacing. 0b00 is 200 kHz, 0b01 is 100 kHz, 0b10 is 50 kHz.
    pub const SPACE: BitField = BitField::new(SysConfig2, 4, 2);
    pub const VOLUME: BitField = BitField::new(SysConfig2, 0, 4);

    /// Recommended seek threshold from AN230.
    pub const SEEKTH_RECOMMENDED: u16 = 0x19;
    pub const SPACE_100KHZ: u16 = 0b01;
    pub const VOLUME_MAX: u16 = 15;
}

pub mod sysconfig3 {
    use super::{BitField, Register::SysConfig3};

    pub const SMUTER: BitField = BitField::new(SysConfig3, 14, 2);
    pub const SMUTEA: BitField = BitField::new(SysConfig3, 12, 2);
    pub const VOLEXT: BitField = BitField::flag(SysConfig3, 8);
    /// Seek SNR threshold
    pub const SKSNR: BitField = BitField::new(SysConfig3, 4, 4);
    /// Seek FM impulse detection threshold
    pub const SKCNT: BitField = BitField::new(SysConfig3, 0, 4);

    pub const SKSNR_RECOMMENDED: u16 = 0x4;
    pub const SKCNT_RECOMMENDED: u16 = 0x8;
}

pub mod test1 {
    use super::{BitField, Register::Test1};

    /// Crystal oscillator enable
    pub const XOSCEN: BitField = BitField::flag(Test1, 15);
    /// Audio high-Z enable
    pub const AHIZEN: BitField = BitField::flag(Test1, 14);

    /// Oscillator enable pattern from AN230.
    pub const OSCILLATOR_ENABLE: u16 = 0x8100;
    /// Power down pattern from AN230.
    pub const POWER_DOWN: u16 = 0x7C04;
}

pub mod statusrssi {
    use super::{BitField, Register::StatusRssi};

    /// RDS ready
    pub const RDSR: BitField = BitField::flag(StatusRssi, 15);
    /// Seek/tune complete
    pub const STC: BitField = BitField::flag(StatusRssi, 14);
    /// Seek fail/band limit
    pub const SFBL: BitField = BitField::flag(StatusRssi, 13);
    /// AFC rail
    pub const AFCRL: BitField = BitField::flag(StatusRssi, 12);
    /// RDS synchronized
    pub const RDSS: BitField = BitField::flag(StatusRssi, 11);
    pub const BLERA: BitField = BitField::new(StatusRssi, 9, 2);
    pub const ST: BitField = BitField::flag(StatusRssi, 8);
    pub const RSSI: BitField = BitField::new(StatusRssi, 0, 8);
}

pub mod readchan {
    use super::{BitField, Register::ReadChan};

    pub const READCHAN: BitField = BitField::new(ReadChan, 0, 10);
}
