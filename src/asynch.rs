//! Async register access.
//!
//! This module provides the same register types as the crate root using
//! `embedded-hal-async` traits. It is only available when the `async`
//! feature is enabled.
//!
//! # Example
//!
//! ```rust,ignore
//! use bcd_rtc::asynch::DateTimeRegister;
//! use bcd_rtc::Device;
//!
//! let mut rtc = Device::new(i2c, 0x68);
//! let mut clock = DateTimeRegister::new(0x00);
//!
//! // Get current date/time asynchronously
//! let now = clock.read(&mut rtc).await?;
//! ```

use embedded_hal_async::i2c::I2c;

use crate::registers::{self, ALARM_LEN, DATETIME_LEN};
use crate::{Alarm, DateTime, Device, RegisterError};

/// Async 7-byte BCD date/time register block.
///
/// See [`crate::DateTimeRegister`] for the layout.
#[derive(Debug, Clone, PartialEq)]
pub struct DateTimeRegister {
    inner: registers::DateTimeRegister,
}

impl DateTimeRegister {
    /// Creates a register block starting at `register_address`.
    pub const fn new(register_address: u8) -> Self {
        Self {
            inner: registers::DateTimeRegister::new(register_address),
        }
    }

    pub const fn register_address(&self) -> u8 {
        self.inner.register_address()
    }

    pub const fn buffer(&self) -> &[u8; 1 + DATETIME_LEN] {
        self.inner.buffer()
    }

    /// Reads the date and time.
    ///
    /// # Returns
    /// * `Ok(DateTime)` - The decoded date and time, millisecond always 0
    /// * `Err(RegisterError)` on bus error
    pub async fn read<I2C: I2c>(
        &mut self,
        device: &mut Device<I2C>,
    ) -> Result<DateTime, RegisterError<I2C::Error>> {
        let (register, payload) = self.inner.split();
        device
            .i2c
            .write_read(device.address, register, payload)
            .await?;
        debug!("datetime read: {:?}", self.inner.buffer());
        Ok(self.inner.decode())
    }

    /// Writes the date and time in one transaction.
    ///
    /// # Returns
    /// * `Ok(())` on success
    /// * `Err(RegisterError)` on bus error
    pub async fn write<I2C: I2c>(
        &mut self,
        device: &mut Device<I2C>,
        datetime: &DateTime,
    ) -> Result<(), RegisterError<I2C::Error>> {
        let data = self.inner.encode(datetime);
        debug!("datetime write: {:?}", data);
        device.i2c.write(device.address, data).await?;
        Ok(())
    }
}

/// Async 4-byte BCD alarm register block.
///
/// See [`crate::AlarmRegister`] for the layout.
#[derive(Debug, Clone, PartialEq)]
pub struct AlarmRegister {
    inner: registers::AlarmRegister,
}

impl AlarmRegister {
    /// Creates a register block starting at `register_address`.
    pub const fn new(register_address: u8) -> Self {
        Self {
            inner: registers::AlarmRegister::new(register_address),
        }
    }

    pub const fn register_address(&self) -> u8 {
        self.inner.register_address()
    }

    pub const fn buffer(&self) -> &[u8; 1 + ALARM_LEN] {
        self.inner.buffer()
    }

    /// Reads the alarm.
    ///
    /// # Returns
    /// * `Ok(Some(DateTime))` - Minute, hour, day and weekday of an enabled alarm
    /// * `Ok(None)` - The alarm is disabled
    /// * `Err(RegisterError)` on bus error
    pub async fn read<I2C: I2c>(
        &mut self,
        device: &mut Device<I2C>,
    ) -> Result<Option<DateTime>, RegisterError<I2C::Error>> {
        let (register, payload) = self.inner.split();
        device
            .i2c
            .write_read(device.address, register, payload)
            .await?;
        debug!("alarm read: {:?}", self.inner.buffer());
        Ok(self.inner.decode())
    }

    /// Writes the alarm in one transaction. An armed weekday also enables
    /// the alarm.
    pub async fn write<I2C: I2c>(
        &mut self,
        device: &mut Device<I2C>,
        alarm: &Alarm,
    ) -> Result<(), RegisterError<I2C::Error>> {
        let data = self.inner.encode(alarm);
        debug!("alarm write: {:?}", data);
        device.i2c.write(device.address, data).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    extern crate alloc;
    use super::*;
    use alloc::vec;
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTrans};

    const DEVICE_ADDRESS: u8 = 0x68;
    const DATETIME_REGISTER: u8 = 0x00;
    const ALARM_REGISTER: u8 = 0x0B;

    async fn setup_mock(expectations: &[I2cTrans]) -> Device<I2cMock> {
        Device::new(I2cMock::new(expectations), DEVICE_ADDRESS)
    }

    #[tokio::test]
    async fn test_async_read_datetime() {
        // 2024-03-14 15:30:00
        let datetime_registers = [
            0x00, // second
            0x30, // minute
            0x15, // hour
            0x03, // weekday
            0x14, // day
            0x03, // month
            0x24, // year
        ];
        let mut dev = setup_mock(&[I2cTrans::write_read(
            DEVICE_ADDRESS,
            vec![DATETIME_REGISTER],
            datetime_registers.to_vec(),
        )])
        .await;
        let mut reg = DateTimeRegister::new(DATETIME_REGISTER);

        let dt = reg.read(&mut dev).await.unwrap();
        assert_eq!(dt.hour, 15);
        assert_eq!(dt.minute, 30);
        assert_eq!(dt.second, 0);
        assert_eq!(dt.weekday, 3);
        assert_eq!(dt.day, 14);
        assert_eq!(dt.month, 3);
        assert_eq!(dt.year, 2024);
        assert_eq!(dt.millisecond, 0);
        dev.release().done();
    }

    #[tokio::test]
    async fn test_async_write_datetime() {
        let dt = DateTime::new(2024, 3, 15)
            .with_weekday(5)
            .with_time(13, 45, 30);
        let mut dev = setup_mock(&[I2cTrans::write(
            DEVICE_ADDRESS,
            vec![
                DATETIME_REGISTER,
                0x30, // second
                0x45, // minute
                0x13, // hour
                0x05, // weekday
                0x15, // day
                0x03, // month
                0x24, // year
            ],
        )])
        .await;
        let mut reg = DateTimeRegister::new(DATETIME_REGISTER);

        reg.write(&mut dev, &dt).await.unwrap();
        assert_eq!(reg.register_address(), DATETIME_REGISTER);
        assert_eq!(reg.buffer()[0], DATETIME_REGISTER);
        dev.release().done();
    }

    #[tokio::test]
    async fn test_async_read_datetime_bus_error() {
        let mut dev = setup_mock(&[I2cTrans::write_read(
            DEVICE_ADDRESS,
            vec![DATETIME_REGISTER],
            vec![0; DATETIME_LEN],
        )
        .with_error(ErrorKind::Bus)])
        .await;
        let mut reg = DateTimeRegister::new(DATETIME_REGISTER);

        assert!(matches!(
            reg.read(&mut dev).await,
            Err(RegisterError::I2c(ErrorKind::Bus))
        ));
        dev.release().done();
    }

    #[tokio::test]
    async fn test_async_read_alarm() {
        let mut dev = setup_mock(&[
            I2cTrans::write_read(
                DEVICE_ADDRESS,
                vec![ALARM_REGISTER],
                vec![0x15, 0x86, 0x80, 0x80],
            ),
            I2cTrans::write_read(
                DEVICE_ADDRESS,
                vec![ALARM_REGISTER],
                vec![0x95, 0x86, 0x80, 0x80],
            ),
        ])
        .await;
        let mut reg = AlarmRegister::new(ALARM_REGISTER);

        assert_eq!(reg.read(&mut dev).await.unwrap(), None);
        let alarm = reg.read(&mut dev).await.unwrap().unwrap();
        assert_eq!(alarm.minute, 15);
        assert_eq!(alarm.hour, 6);
        assert_eq!(alarm.day, 0);
        assert_eq!(alarm.weekday, 0);
        dev.release().done();
    }

    #[tokio::test]
    async fn test_async_write_alarm() {
        let mut dev = setup_mock(&[
            I2cTrans::write(
                DEVICE_ADDRESS,
                vec![ALARM_REGISTER, 0x30, 0x80, 0x80, 0x80],
            ),
            I2cTrans::write(
                DEVICE_ADDRESS,
                vec![ALARM_REGISTER, 0x80, 0x80, 0x80, 0x43],
            ),
        ])
        .await;
        let mut reg = AlarmRegister::new(ALARM_REGISTER);

        reg.write(&mut dev, &Alarm::default().with_minute(30))
            .await
            .unwrap();
        reg.write(&mut dev, &Alarm::default().with_weekday(3))
            .await
            .unwrap();
        assert_eq!(reg.buffer(), &[ALARM_REGISTER, 0x80, 0x80, 0x80, 0x43]);
        dev.release().done();
    }
}
