//! In-memory Si4703 for driver tests.

use core::convert::Infallible;
use std::{cell::RefCell, collections::VecDeque, rc::Rc};

use embedded_hal::digital::{ErrorType, OutputPin};
use embedded_hal_async::{
    delay::DelayNs,
    digital::Wait,
    i2c::{self, Operation},
};
use embedded_hal_async_mocks::i2c::I2cError;

use crate::{
    codec::{READ_BLOCK_LEN, WRITE_BLOCK_LEN, WRITE_REGISTER_COUNT},
    regs::{channel, powercfg, readchan, statusrssi, Register, REGISTER_COUNT},
    RegisterFile, DEFAULT_ADDRESS,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Read { command: u8 },
    Write([u16; WRITE_REGISTER_COUNT]),
    Reset { high: bool },
    Delay { ms: u32 },
}

#[derive(Clone, Default)]
pub struct Log(Rc<RefCell<Vec<Event>>>);

impl Log {
    pub fn push(&self, event: Event) {
        self.0.borrow_mut().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.borrow().clone()
    }

    pub fn writes(&self) -> Vec<[u16; WRITE_REGISTER_COUNT]> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Write(words) => Some(words),
                _ => None,
            })
            .collect()
    }

    /// Number of reads between the `nth` and the following write.
    pub fn reads_after_write(&self, nth: usize) -> usize {
        self.events()
            .into_iter()
            .skip_while({
                let mut writes = 0;
                move |event| {
                    if let Event::Write(_) = event {
                        writes += 1;
                    }
                    writes <= nth
                }
            })
            .skip(1)
            .take_while(|event| !matches!(event, Event::Write(_)))
            .filter(|event| matches!(event, Event::Read { .. }))
            .count()
    }
}

/// Behaves like the device as far as the block transfers are concerned.
pub struct FakeSi4703 {
    pub file: RegisterFile,
    pub log: Log,
    /// Reads that still report STC=0 after a TUNE or SEEK request.
    pub stc_after_reads: usize,
    /// Channel code a seek ends on, `None` reports a seek failure.
    pub seek_result: Option<u16>,
    pub rds_groups: VecDeque<[u16; 3]>,
    pub fail_writes: bool,
    pending: Option<usize>,
}

impl FakeSi4703 {
    pub fn new(log: Log) -> Self {
        Self {
            file: RegisterFile::new(),
            log,
            stc_after_reads: 0,
            seek_result: Some(0),
            rds_groups: VecDeque::new(),
            fail_writes: false,
            pending: None,
        }
    }

    fn read(&mut self, command: u8, buffer: &mut [u8]) -> Result<(), I2cError> {
        assert_eq!(READ_BLOCK_LEN, buffer.len());
        self.log.push(Event::Read { command });

        match self.pending {
            Some(0) => {
                self.file.set_flag(statusrssi::STC, true);
                self.pending = None;
            }
            Some(remaining) => self.pending = Some(remaining - 1),
            None => {}
        }

        if let Some([block_b, block_c, block_d]) = self.rds_groups.pop_front() {
            self.file.set_flag(statusrssi::RDSR, true);
            self.file.set_word(Register::RdsB, block_b);
            self.file.set_word(Register::RdsC, block_c);
            self.file.set_word(Register::RdsD, block_d);
        } else {
            self.file.set_flag(statusrssi::RDSR, false);
        }

        for (i, pair) in buffer.chunks_exact_mut(2).enumerate() {
            let index = (Register::READ_START.idx() + i) % REGISTER_COUNT;
            pair.copy_from_slice(&self.file.words()[index].to_be_bytes());
        }

        Ok(())
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), I2cError> {
        assert_eq!(WRITE_BLOCK_LEN, bytes.len());
        if self.fail_writes {
            return Err(I2cError);
        }

        let was_tuning = self.file.is_set(channel::TUNE);
        let was_seeking = self.file.is_set(powercfg::SEEK);

        let mut words = [0; WRITE_REGISTER_COUNT];
        for (word, pair) in words.iter_mut().zip(bytes.chunks_exact(2)) {
            *word = u16::from_be_bytes([pair[0], pair[1]]);
        }
        let mut all = *self.file.words();
        all[Register::WRITE_START.idx()..=Register::WRITE_END.idx()].copy_from_slice(&words);
        self.file = RegisterFile::from_words(all);
        self.log.push(Event::Write(words));

        let tuning = self.file.is_set(channel::TUNE);
        let seeking = self.file.is_set(powercfg::SEEK);

        if tuning && !was_tuning {
            let code = self.file.get_field(channel::CHAN);
            self.file.set_field(readchan::READCHAN, code);
            self.pending = Some(self.stc_after_reads);
        }

        if seeking && !was_seeking {
            match self.seek_result {
                Some(code) => self.file.set_field(readchan::READCHAN, code),
                None => self.file.set_flag(statusrssi::SFBL, true),
            }
            self.pending = Some(self.stc_after_reads);
        }

        if !tuning && !seeking {
            self.file.set_flag(statusrssi::STC, false);
            self.file.set_flag(statusrssi::SFBL, false);
            self.pending = None;
        }

        Ok(())
    }
}

impl i2c::ErrorType for FakeSi4703 {
    type Error = I2cError;
}

impl i2c::I2c for FakeSi4703 {
    async fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), I2cError> {
        assert_eq!(DEFAULT_ADDRESS, address);
        // Let timers in the test run even when the driver never stops polling.
        tokio::task::yield_now().await;
        match operations {
            [Operation::Write(command), Operation::Read(buffer)] => {
                assert_eq!(1, command.len());
                self.read(command[0], buffer)
            }
            [Operation::Write(bytes)] => self.write(bytes),
            _ => panic!("unexpected transaction"),
        }
    }
}

pub struct RecordingDelay(pub Log);

impl DelayNs for RecordingDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.0.push(Event::Delay { ms: ns / 1_000_000 });
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.0.push(Event::Delay { ms });
    }
}

pub struct RecordingPin(pub Log);

impl ErrorType for RecordingPin {
    type Error = Infallible;
}

impl OutputPin for RecordingPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.0.push(Event::Reset { high: false });
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.0.push(Event::Reset { high: true });
        Ok(())
    }
}

/// An interrupt line that never fires.
pub struct SilentIrq;

impl ErrorType for SilentIrq {
    type Error = Infallible;
}

impl Wait for SilentIrq {
    async fn wait_for_high(&mut self) -> Result<(), Infallible> {
        core::future::pending().await
    }

    async fn wait_for_low(&mut self) -> Result<(), Infallible> {
        core::future::pending().await
    }

    async fn wait_for_rising_edge(&mut self) -> Result<(), Infallible> {
        core::future::pending().await
    }

    async fn wait_for_falling_edge(&mut self) -> Result<(), Infallible> {
        core::future::pending().await
    }

    async fn wait_for_any_edge(&mut self) -> Result<(), Infallible> {
        core::future::pending().await
    }
}

pub fn polled(log: &Log) -> crate::Driver<FakeSi4703, RecordingPin, crate::NoIrq, RecordingDelay> {
    crate::Driver::new(
        FakeSi4703::new(log.clone()),
        RecordingPin(log.clone()),
        RecordingDelay(log.clone()),
        crate::Config::default(),
    )
}
