//! Platform-agnostic access to BCD date/time and alarm registers of I2C
//! real-time clocks.
//!
//! Many RTC chips keep the calendar in a block of consecutive registers, one
//! binary coded decimal byte per field. This crate provides the two common
//! register blocks on top of the [`embedded-hal`](embedded_hal) I2C traits:
//!
//! - [`DateTimeRegister`]: second, minute, hour, weekday, day, month and
//!   year (2000-2099), read and written as a [`DateTime`].
//! - [`AlarmRegister`]: minute, hour, day and weekday, each of which can be
//!   a wildcard, written as an [`Alarm`] and read back as an optional
//!   [`DateTime`].
//!
//! The register types own their transfer buffer; the bus and device address
//! live in a [`Device`] passed to each call.
//!
//! # Features
//!
//! - `async`: async register access in [`asynch`] using `embedded-hal-async`
//! - `log`: debug logging through the `log` crate
//! - `defmt`: debug logging and `defmt::Format` implementations
//!
//! # Example
//!
//! ```rust,ignore
//! use bcd_rtc::{Alarm, DateTime, DateTimeRegister, AlarmRegister, Device};
//!
//! let mut rtc = Device::new(i2c, 0x68);
//! let mut clock = DateTimeRegister::new(0x00);
//! let mut alarm = AlarmRegister::new(0x07);
//!
//! clock.write(&mut rtc, &DateTime::new(2024, 3, 15).with_time(13, 45, 30))?;
//! let now = clock.read(&mut rtc)?;
//!
//! alarm.write(&mut rtc, &Alarm::default().with_hour(6).with_minute(30))?;
//! if let Some(at) = alarm.read(&mut rtc)? {
//!     // alarm enabled
//! }
//! ```
//!
//! # Errors
//!
//! Bus errors are returned unchanged inside [`RegisterError::I2c`]. Field
//! values are never range checked: out of range values encode to wrapped
//! bytes and unexpected register contents decode without error.
#![no_std]

cfg_if::cfg_if! {
    if #[cfg(feature = "defmt")] {
        macro_rules! debug {
            ($($arg:tt)*) => { defmt::debug!($($arg)*) };
        }
    } else if #[cfg(feature = "log")] {
        macro_rules! debug {
            ($($arg:tt)*) => { log::debug!($($arg)*) };
        }
    } else {
        macro_rules! debug {
            ($fmt:literal $(, $arg:expr)* $(,)?) => {{ $( let _ = &$arg; )* }};
        }
    }
}

pub mod alarm;
#[cfg(feature = "async")]
pub mod asynch;
pub mod bcd;
pub mod datetime;
pub mod registers;

use embedded_hal::i2c::I2c;

pub use crate::alarm::{Alarm, AlarmField};
pub use crate::datetime::{DateTime, DateTimeError};
pub use crate::registers::{AlarmByte, AlarmRegister, DateTimeRegister};

/// Errors returned by register operations.
#[derive(Debug)]
pub enum RegisterError<I2CE> {
    /// The bus transaction failed
    I2c(I2CE),
}

impl<I2CE> From<I2CE> for RegisterError<I2CE> {
    fn from(e: I2CE) -> Self {
        RegisterError::I2c(e)
    }
}

/// An I2C bus handle together with the address of the RTC on it.
pub struct Device<I2C> {
    pub(crate) i2c: I2C,
    pub(crate) address: u8,
}

impl<I2C> Device<I2C> {
    /// Creates a device.
    ///
    /// # Arguments
    /// * `i2c` - The I2C bus implementation
    /// * `address` - The 7-bit I2C address of the RTC
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    /// Gives back the bus.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl DateTimeRegister {
    /// Reads the date and time.
    ///
    /// Writes the register address without a stop condition, then reads the
    /// seven payload bytes. The returned millisecond is always 0.
    ///
    /// # Errors
    /// Returns `RegisterError::I2c` if the bus transaction fails.
    pub fn read<I2C: I2c>(
        &mut self,
        device: &mut Device<I2C>,
    ) -> Result<DateTime, RegisterError<I2C::Error>> {
        let (register, payload) = self.split();
        device.i2c.write_read(device.address, register, payload)?;
        debug!("datetime read: {:?}", self.buffer());
        Ok(self.decode())
    }

    /// Writes the date and time in one transaction.
    ///
    /// Only years 2000-2099 are representable; other years are written
    /// wrapped.
    ///
    /// # Errors
    /// Returns `RegisterError::I2c` if the bus transaction fails.
    pub fn write<I2C: I2c>(
        &mut self,
        device: &mut Device<I2C>,
        datetime: &DateTime,
    ) -> Result<(), RegisterError<I2C::Error>> {
        let data = self.encode(datetime);
        debug!("datetime write: {:?}", data);
        device.i2c.write(device.address, data)?;
        Ok(())
    }
}

impl AlarmRegister {
    /// Reads the alarm.
    ///
    /// Returns `Ok(None)` when the alarm is disabled. Otherwise only minute,
    /// hour, day and weekday of the returned value are meaningful.
    ///
    /// # Errors
    /// Returns `RegisterError::I2c` if the bus transaction fails.
    pub fn read<I2C: I2c>(
        &mut self,
        device: &mut Device<I2C>,
    ) -> Result<Option<DateTime>, RegisterError<I2C::Error>> {
        let (register, payload) = self.split();
        device.i2c.write_read(device.address, register, payload)?;
        debug!("alarm read: {:?}", self.buffer());
        Ok(self.decode())
    }

    /// Writes the alarm in one transaction.
    ///
    /// An armed weekday also enables the alarm.
    ///
    /// # Errors
    /// Returns `RegisterError::I2c` if the bus transaction fails.
    pub fn write<I2C: I2c>(
        &mut self,
        device: &mut Device<I2C>,
        alarm: &Alarm,
    ) -> Result<(), RegisterError<I2C::Error>> {
        let data = self.encode(alarm);
        debug!("alarm write: {:?}", data);
        device.i2c.write(device.address, data)?;
        Ok(())
    }
}
