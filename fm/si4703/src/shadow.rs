use crate::regs::{BitField, Register, REGISTER_COUNT};

/// Local mirror of all 16 device registers.
///
/// Field accessors only touch the in-memory copy. The driver refreshes the
/// whole file from the device before every mutation and pushes the control
/// registers back afterwards, so bits the driver does not own are carried
/// over unchanged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegisterFile {
    words: [u16; REGISTER_COUNT],
}

impl RegisterFile {
    pub const fn new() -> Self {
        Self {
            words: [0; REGISTER_COUNT],
        }
    }

    pub const fn from_words(words: [u16; REGISTER_COUNT]) -> Self {
        Self { words }
    }

    pub const fn words(&self) -> &[u16; REGISTER_COUNT] {
        &self.words
    }

    pub const fn word(&self, register: Register) -> u16 {
        self.words[register.idx()]
    }

    pub fn set_word(&mut self, register: Register, value: u16) {
        self.words[register.idx()] = value;
    }

    pub const fn get_field(&self, field: BitField) -> u16 {
        field.extract(self.word(field.register))
    }

    /// Replace a field. Bits of `value` beyond the field width are dropped.
    pub fn set_field(&mut self, field: BitField, value: u16) {
        let word = self.word(field.register);
        self.set_word(field.register, field.insert(word, value));
    }

    /// Set the bits of `value` in a field, keeping the bits already set.
    pub fn or_field(&mut self, field: BitField, value: u16) {
        let word = self.word(field.register);
        let bits = field.insert(0, value);
        self.set_word(field.register, word | bits);
    }

    pub const fn is_set(&self, flag: BitField) -> bool {
        self.get_field(flag) != 0
    }

    pub fn set_flag(&mut self, flag: BitField, value: bool) {
        self.set_field(flag, value as u16);
    }
}

#[cfg(test)]
mod tests {
    use crate::regs::{channel, powercfg, sysconfig2};

    use super::*;

    #[test]
    fn set_field_keeps_neighbours() {
        // Given
        let mut file = RegisterFile::new();
        file.set_word(Register::Channel, 0x8000 | 0x03FF);

        // When
        file.set_field(channel::CHAN, 0x0062);

        // Then
        assert_eq!(0x8062, file.word(Register::Channel));
        assert!(file.is_set(channel::TUNE));
    }

    #[test]
    fn flags() {
        let mut file = RegisterFile::new();

        file.set_flag(powercfg::SEEK, true);
        file.set_flag(powercfg::SEEKUP, true);
        assert_eq!(0x0300, file.word(Register::PowerCfg));

        file.set_flag(powercfg::SEEKUP, false);
        assert_eq!(0x0100, file.word(Register::PowerCfg));
        assert!(!file.is_set(powercfg::SEEKUP));
    }

    #[test]
    fn or_field_keeps_existing_bits() {
        // Given
        let mut file = RegisterFile::new();
        file.set_word(Register::SysConfig2, 0x0C20);

        // When
        file.or_field(sysconfig2::SEEKTH, 0x19);
        file.or_field(sysconfig2::SPACE, 0b01);

        // Then
        assert_eq!(0x1D30, file.word(Register::SysConfig2));
    }

    #[test]
    fn fields_are_independent_of_other_registers() {
        let mut file = RegisterFile::from_words([0xFFFF; REGISTER_COUNT]);

        file.set_field(sysconfig2::VOLUME, 0);

        assert_eq!(0xFFF0, file.word(Register::SysConfig2));
        assert_eq!(0xFFFF, file.word(Register::SysConfig1));
        assert_eq!(0xFFFF, file.word(Register::SysConfig3));
    }
}
