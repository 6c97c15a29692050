use embedded_hal_async::i2c;
use mockall::mock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct I2cError;

impl i2c::Error for I2cError {
    fn kind(&self) -> i2c::ErrorKind {
        i2c::ErrorKind::Other
    }
}

mock! {
    #[derive(Debug)]
    pub I2c {}

    impl i2c::ErrorType for I2c {
        type Error = I2cError;
    }

    impl i2c::I2c<i2c::SevenBitAddress> for I2c {
        async fn transaction<'a>(&mut self, address: u8, operations: &mut [i2c::Operation<'a>]) -> Result<(), I2cError>;
    }
}
