//! Calendar date and time value exchanged with RTC registers.
//!
//! [`DateTime`] is a plain aggregate of the fields an RTC keeps. It performs
//! no calendar validation: the register protocols store whatever they are
//! given. Use the [`chrono`] conversions when a checked calendar value is
//! needed.
//!
//! # Conventions
//!
//! - `year` is the full year (e.g. 2024). Only the register layer applies the
//!   offset from 2000.
//! - `weekday` is 0-6 with no fixed mapping at this level. The chrono
//!   conversion uses 0 = Monday.
//! - `millisecond` is never read from or written to hardware.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

/// A calendar date and time as stored by an RTC.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DateTime {
    /// Full year, e.g. 2024
    pub year: u16,
    /// Month (1-12)
    pub month: u8,
    /// Day of month (1-31)
    pub day: u8,
    /// Day of week (0-6)
    pub weekday: u8,
    /// Hour (0-23)
    pub hour: u8,
    /// Minute (0-59)
    pub minute: u8,
    /// Second (0-59)
    pub second: u8,
    /// Not supported by the registers, carried as supplied
    pub millisecond: u16,
}

impl DateTime {
    /// Creates a date at midnight with weekday and millisecond set to 0.
    pub const fn new(year: u16, month: u8, day: u8) -> Self {
        Self {
            year,
            month,
            day,
            weekday: 0,
            hour: 0,
            minute: 0,
            second: 0,
            millisecond: 0,
        }
    }

    /// Returns a copy with the day of week replaced.
    #[must_use]
    pub const fn with_weekday(mut self, weekday: u8) -> Self {
        self.weekday = weekday;
        self
    }

    /// Returns a copy with hour, minute and second replaced.
    #[must_use]
    pub const fn with_time(mut self, hour: u8, minute: u8, second: u8) -> Self {
        self.hour = hour;
        self.minute = minute;
        self.second = second;
        self
    }

    #[must_use]
    pub const fn with_millisecond(mut self, millisecond: u16) -> Self {
        self.millisecond = millisecond;
        self
    }
}

/// Errors converting between [`DateTime`] and chrono types.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DateTimeError {
    /// The fields do not form a valid calendar date and time, or the year
    /// does not fit.
    InvalidDateTime,
}

impl TryFrom<DateTime> for NaiveDateTime {
    type Error = DateTimeError;

    /// Builds a chrono value, validating the calendar fields.
    ///
    /// `weekday` is ignored; chrono derives it from the date.
    fn try_from(dt: DateTime) -> Result<Self, Self::Error> {
        NaiveDate::from_ymd_opt(i32::from(dt.year), u32::from(dt.month), u32::from(dt.day))
            .and_then(|d| {
                d.and_hms_milli_opt(
                    u32::from(dt.hour),
                    u32::from(dt.minute),
                    u32::from(dt.second),
                    u32::from(dt.millisecond),
                )
            })
            .ok_or(DateTimeError::InvalidDateTime)
    }
}

impl TryFrom<NaiveDateTime> for DateTime {
    type Error = DateTimeError;

    fn try_from(ndt: NaiveDateTime) -> Result<Self, Self::Error> {
        let year = u16::try_from(ndt.year()).map_err(|_| DateTimeError::InvalidDateTime)?;
        let field = |v: u32| u8::try_from(v).map_err(|_| DateTimeError::InvalidDateTime);
        let millisecond = u16::try_from(ndt.nanosecond() / 1_000_000)
            .map_err(|_| DateTimeError::InvalidDateTime)?;
        Ok(DateTime {
            year,
            month: field(ndt.month())?,
            day: field(ndt.day())?,
            weekday: field(ndt.weekday().num_days_from_monday())?,
            hour: field(ndt.hour())?,
            minute: field(ndt.minute())?,
            second: field(ndt.second())?,
            millisecond,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_defaults() {
        let dt = DateTime::new(2024, 3, 15);
        assert_eq!(dt.year, 2024);
        assert_eq!(dt.month, 3);
        assert_eq!(dt.day, 15);
        assert_eq!(dt.weekday, 0);
        assert_eq!(dt.hour, 0);
        assert_eq!(dt.minute, 0);
        assert_eq!(dt.second, 0);
        assert_eq!(dt.millisecond, 0);
    }

    #[test]
    fn test_builders_leave_other_fields() {
        let dt = DateTime::new(2024, 3, 15)
            .with_weekday(5)
            .with_time(13, 45, 30)
            .with_millisecond(250);
        assert_eq!(
            dt,
            DateTime {
                year: 2024,
                month: 3,
                day: 15,
                weekday: 5,
                hour: 13,
                minute: 45,
                second: 30,
                millisecond: 250,
            }
        );
    }

    #[test]
    fn test_no_range_checking() {
        // Out of range fields are the caller's business
        let dt = DateTime::new(1999, 13, 40).with_time(25, 61, 99);
        assert_eq!(dt.month, 13);
        assert_eq!(dt.hour, 25);
    }

    #[test]
    fn test_into_naive_datetime() {
        let dt = DateTime::new(2024, 3, 14)
            .with_weekday(3)
            .with_time(15, 30, 0)
            .with_millisecond(125);
        let ndt = NaiveDateTime::try_from(dt).unwrap();
        let expected = NaiveDate::from_ymd_opt(2024, 3, 14)
            .unwrap()
            .and_hms_milli_opt(15, 30, 0, 125)
            .unwrap();
        assert_eq!(ndt, expected);
    }

    #[test]
    fn test_into_naive_datetime_invalid() {
        // February 30th
        let dt = DateTime::new(2024, 2, 30);
        assert_eq!(
            NaiveDateTime::try_from(dt),
            Err(DateTimeError::InvalidDateTime)
        );

        let dt = DateTime::new(2024, 1, 1).with_time(24, 0, 0);
        assert_eq!(
            NaiveDateTime::try_from(dt),
            Err(DateTimeError::InvalidDateTime)
        );
    }

    #[test]
    fn test_from_naive_datetime() {
        // 2024-03-14 is a Thursday
        let ndt = NaiveDate::from_ymd_opt(2024, 3, 14)
            .unwrap()
            .and_hms_milli_opt(15, 30, 59, 999)
            .unwrap();
        let dt = DateTime::try_from(ndt).unwrap();
        assert_eq!(
            dt,
            DateTime::new(2024, 3, 14)
                .with_weekday(3)
                .with_time(15, 30, 59)
                .with_millisecond(999)
        );
    }

    #[test]
    fn test_from_naive_datetime_negative_year() {
        let ndt = NaiveDate::from_ymd_opt(-1, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(
            DateTime::try_from(ndt),
            Err(DateTimeError::InvalidDateTime)
        );
    }

    #[test]
    fn test_chrono_round_trip() {
        let ndt = NaiveDate::from_ymd_opt(2099, 12, 31)
            .unwrap()
            .and_hms_opt(23, 59, 59)
            .unwrap();
        let dt = DateTime::try_from(ndt).unwrap();
        assert_eq!(NaiveDateTime::try_from(dt).unwrap(), ndt);
    }
}
