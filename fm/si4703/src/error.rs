#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriverError<E> {
    /// The block read or write failed on the bus.
    I2c(E),
    /// The reset line could not be driven.
    Pin,
    /// The seek/tune complete interrupt did not arrive in time.
    /// The start bit is still asserted on the device.
    Timeout,
}

