/// Default 7-bit bus address of the Si4703.
pub const DEFAULT_ADDRESS: u8 = 0x10;

/// How long to wait for the seek/tune complete interrupt.
pub const DEFAULT_STC_TIMEOUT_MS: u32 = 5_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    pub address: u8,
    /// Only used when the driver was created with an interrupt pin.
    pub stc_timeout_ms: u32,
}

impl Config {
    pub const fn new(address: u8) -> Self {
        Self {
            address,
            stc_timeout_ms: DEFAULT_STC_TIMEOUT_MS,
        }
    }

    pub const fn with_stc_timeout_ms(self, stc_timeout_ms: u32) -> Self {
        Self {
            stc_timeout_ms,
            ..self
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_ADDRESS)
    }
}
