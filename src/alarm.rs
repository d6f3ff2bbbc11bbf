//! Alarm values for the BCD alarm register.
//!
//! An alarm matches on up to four fields: minute, hour, day and weekday. Each
//! field is either armed with a value or left as a wildcard that the RTC
//! ignores when matching.
//!
//! # Example
//!
//! ```
//! use bcd_rtc::{Alarm, AlarmField};
//!
//! // Every day at 06:30
//! let alarm = Alarm::default().with_hour(6).with_minute(30);
//! assert_eq!(alarm.day, AlarmField::Wildcard);
//! ```

use crate::DateTime;

/// A single alarm match field.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlarmField {
    /// The field takes part in the match with this value
    Armed(u8),
    /// The field is ignored when matching
    #[default]
    Wildcard,
}

impl AlarmField {
    /// Returns the armed value, or `None` for a wildcard.
    pub const fn value(self) -> Option<u8> {
        match self {
            AlarmField::Armed(v) => Some(v),
            AlarmField::Wildcard => None,
        }
    }

    pub const fn is_wildcard(self) -> bool {
        matches!(self, AlarmField::Wildcard)
    }
}

impl From<Option<u8>> for AlarmField {
    fn from(v: Option<u8>) -> Self {
        match v {
            Some(v) => AlarmField::Armed(v),
            None => AlarmField::Wildcard,
        }
    }
}

impl From<AlarmField> for Option<u8> {
    fn from(v: AlarmField) -> Self {
        v.value()
    }
}

/// Alarm settings written to the alarm register.
///
/// The default alarm has every field set to [`AlarmField::Wildcard`].
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Alarm {
    /// Minute (0-59)
    pub minute: AlarmField,
    /// Hour (0-23)
    pub hour: AlarmField,
    /// Day of month (1-31)
    pub day: AlarmField,
    /// Day of week (0-6). Arming the weekday also sets the register's
    /// global enable bit.
    pub weekday: AlarmField,
}

impl Alarm {
    #[must_use]
    pub const fn with_minute(mut self, minute: u8) -> Self {
        self.minute = AlarmField::Armed(minute);
        self
    }

    #[must_use]
    pub const fn with_hour(mut self, hour: u8) -> Self {
        self.hour = AlarmField::Armed(hour);
        self
    }

    #[must_use]
    pub const fn with_day(mut self, day: u8) -> Self {
        self.day = AlarmField::Armed(day);
        self
    }

    #[must_use]
    pub const fn with_weekday(mut self, weekday: u8) -> Self {
        self.weekday = AlarmField::Armed(weekday);
        self
    }
}

impl From<DateTime> for Alarm {
    /// Arms minute, hour, day and weekday from the date/time. Year, month
    /// and second have no alarm counterpart and are dropped.
    fn from(dt: DateTime) -> Self {
        Alarm {
            minute: AlarmField::Armed(dt.minute),
            hour: AlarmField::Armed(dt.hour),
            day: AlarmField::Armed(dt.day),
            weekday: AlarmField::Armed(dt.weekday),
        }
    }
}
