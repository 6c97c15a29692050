//! mockall mocks of the `embedded-hal` and `embedded-hal-async` traits used by
//! the drivers in this workspace.

pub mod delay;
pub mod digital;
pub mod i2c;
