//! Incremental RDS decoding of the Program Service name (group 0) and
//! Radio Text (group 2A).
//!
//! Each group carries a small fragment and an index into the target buffer.
//! The buffers fill up over many groups and are never flagged as complete,
//! deciding when a name or text is usable is up to the caller.

use bitfield::bitfield;

use crate::regs::Register;
use crate::shadow::RegisterFile;

pub const PS_LEN: usize = 8;
pub const RT_LEN: usize = 64;

const PS_CHARS_PER_GROUP: usize = 2;
const RT_CHARS_PER_GROUP: usize = 4;

const GROUP_PROGRAM_SERVICE: u8 = 0;
const GROUP_RADIO_TEXT: u8 = 2;

bitfield! {
    /// RDS block B as found in the RDSB register.
    #[derive(Clone, Copy, PartialEq, Eq)]
    #[cfg_attr(feature = "defmt", derive(defmt::Format))]
    pub struct BlockB(u16);
    impl Debug;
    /// Group type code and version flag, `type << 1 | B0`.
    pub u8, group_type, _: 15, 11;
    pub u8, group_number, _: 15, 12;
    /// false for version A, true for version B.
    pub version_b, _: 11;
    pub traffic_program, _: 10;
    pub u8, program_type, _: 9, 5;
    /// Segment address of a group 0.
    pub u8, ps_segment, _: 1, 0;
    /// Segment address of a group 2.
    pub u8, rt_segment, _: 3, 0;
}

/// One RDS group as latched in RDSB..RDSD.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RdsGroup {
    pub block_b: BlockB,
    pub block_c: u16,
    pub block_d: u16,
}

impl RdsGroup {
    pub fn from_registers(file: &RegisterFile) -> Self {
        Self {
            block_b: BlockB(file.word(Register::RdsB)),
            block_c: file.word(Register::RdsC),
            block_d: file.word(Register::RdsD),
        }
    }

    pub fn group_type(&self) -> u8 {
        self.block_b.group_type()
    }
}

/// What a decoded group contributed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Decoded {
    /// Two characters written at `segment * 2` of the station name.
    ProgramService { segment: u8 },
    /// Four characters written at `segment * 4` of the radio text.
    RadioText { segment: u8 },
    Ignored,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RdsDecoder {
    ps: [u8; PS_LEN],
    rt: [u8; RT_LEN],
}

impl RdsDecoder {
    pub const fn new() -> Self {
        Self {
            ps: [0; PS_LEN],
            rt: [0; RT_LEN],
        }
    }

    /// The Program Service name as received so far.
    pub fn program_service(&self) -> &[u8; PS_LEN] {
        &self.ps
    }

    /// The Radio Text as received so far.
    pub fn radio_text(&self) -> &[u8; RT_LEN] {
        &self.rt
    }

    pub fn clear(&mut self) {
        self.ps = [0; PS_LEN];
        self.rt = [0; RT_LEN];
    }

    pub fn decode(&mut self, group: &RdsGroup) -> Decoded {
        let block_b = group.block_b;
        match (block_b.group_number(), block_b.version_b()) {
            (GROUP_PROGRAM_SERVICE, _) => {
                let segment = block_b.ps_segment();
                let offset = segment as usize * PS_CHARS_PER_GROUP;
                self.ps[offset..offset + PS_CHARS_PER_GROUP]
                    .copy_from_slice(&group.block_d.to_be_bytes());
                Decoded::ProgramService { segment }
            }
            (GROUP_RADIO_TEXT, false) => {
                let segment = block_b.rt_segment();
                let offset = segment as usize * RT_CHARS_PER_GROUP;
                let text = &mut self.rt[offset..offset + RT_CHARS_PER_GROUP];
                text[..2].copy_from_slice(&group.block_c.to_be_bytes());
                text[2..].copy_from_slice(&group.block_d.to_be_bytes());
                Decoded::RadioText { segment }
            }
            // Radio Text version B is not decoded.
            _ => Decoded::Ignored,
        }
    }
}

impl Default for RdsDecoder {
    fn default() -> Self {
        Self::new()
    }
}
