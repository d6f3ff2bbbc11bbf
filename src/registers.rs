//! Register buffers and byte layouts for BCD date/time and alarm registers.
//!
//! Each register type owns one fixed-size buffer: byte 0 is the register
//! address written before every transfer, the remaining bytes are the field
//! payload. The address is set once at construction and never rewritten, so
//! a write can send the whole buffer as a single transaction and a read can
//! hand the bus the address and payload as two disjoint slices.
//!
//! # Date/time layout
//!
//! | payload byte | field                |
//! |--------------|----------------------|
//! | 0            | second               |
//! | 1            | minute               |
//! | 2            | hour                 |
//! | 3            | weekday              |
//! | 4            | day                  |
//! | 5            | month                |
//! | 6            | year - 2000          |
//!
//! # Alarm layout
//!
//! | payload byte | field   |
//! |--------------|---------|
//! | 0            | minute  |
//! | 1            | hour    |
//! | 2            | day     |
//! | 3            | weekday |
//!
//! Bit 7 of every alarm byte is a field flag (see [`AlarmByte`]). A read
//! treats the alarm as disabled when bit 7 of the minute byte is clear. A
//! write marks wildcard fields with bit 7 alone and arms the alarm globally
//! by setting bit 6 of the weekday byte. The read and write use different
//! bits; this matches the hardware contract these registers were written
//! against and must stay as is.

use bitfield::bitfield;

use crate::{bcd, Alarm, AlarmField, DateTime};

/// Number of payload bytes in the date/time register.
pub const DATETIME_LEN: usize = 7;
/// Number of payload bytes in the alarm register.
pub const ALARM_LEN: usize = 4;

const YEAR_BASE: u16 = 2000;

/// Payload offsets of the date/time register.
#[derive(Copy, Clone, Debug, PartialEq)]
enum DateTimeOffset {
    Second = 0,
    Minute = 1,
    Hour = 2,
    Weekday = 3,
    Day = 4,
    Month = 5,
    Year = 6,
}

/// Payload offsets of the alarm register.
#[derive(Copy, Clone, Debug, PartialEq)]
enum AlarmOffset {
    Minute = 0,
    Hour = 1,
    Day = 2,
    Weekday = 3,
}

// This macro generates the From<u8> and Into<u8> implementations for the
// register type
macro_rules! from_register_u8 {
    ($typ:ty) => {
        impl From<u8> for $typ {
            fn from(v: u8) -> Self {
                paste::paste!([< $typ >](v))
            }
        }
        impl From<$typ> for u8 {
            fn from(v: $typ) -> Self {
                v.0
            }
        }
    };
}

bitfield! {
    /// One alarm payload byte.
    ///
    /// `bcd` overlaps `enabled`: only bit 7 is masked off when decoding, so a
    /// weekday byte read back with the enable bit set decodes to a different
    /// value than was written.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct AlarmByte(u8);
    impl Debug;
    /// Field flag (bit 7)
    pub armed, set_armed: 7;
    /// Global alarm enable, written on the weekday byte only (bit 6)
    pub enabled, set_enabled: 6;
    /// BCD value below the field flag
    pub bcd, set_bcd: 6, 0;
}
from_register_u8!(AlarmByte);

impl AlarmByte {
    /// The byte written for a wildcard field.
    pub const WILDCARD: AlarmByte = AlarmByte(0x80);

    fn from_field(field: AlarmField) -> Self {
        match field {
            AlarmField::Armed(value) => AlarmByte(bcd::encode(value)),
            AlarmField::Wildcard => Self::WILDCARD,
        }
    }

    fn value(self) -> u8 {
        bcd::decode(self.bcd())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for AlarmByte {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "AlarmByte({}", self.value());
        if self.armed() {
            defmt::write!(f, ", armed");
        }
        defmt::write!(f, ")");
    }
}

/// A 7-byte BCD date/time register block.
///
/// Reads and writes go through the blocking implementation in the crate root
/// or [`crate::asynch::DateTimeRegister`].
#[derive(Debug, Clone, PartialEq)]
pub struct DateTimeRegister {
    buffer: [u8; 1 + DATETIME_LEN],
}

impl DateTimeRegister {
    /// Creates a register block starting at `register_address`.
    pub const fn new(register_address: u8) -> Self {
        let mut buffer = [0; 1 + DATETIME_LEN];
        buffer[0] = register_address;
        Self { buffer }
    }

    pub const fn register_address(&self) -> u8 {
        self.buffer[0]
    }

    /// The address byte followed by the payload of the last transfer.
    pub const fn buffer(&self) -> &[u8; 1 + DATETIME_LEN] {
        &self.buffer
    }

    /// Splits the buffer into the address byte and the payload to read into.
    pub(crate) fn split(&mut self) -> (&[u8], &mut [u8]) {
        let (address, payload) = self.buffer.split_at_mut(1);
        (address, payload)
    }

    /// Decodes the payload into a date/time. Any byte values are accepted.
    pub(crate) fn decode(&self) -> DateTime {
        let field = |offset: DateTimeOffset| bcd::decode(self.buffer[1 + offset as usize]);
        DateTime {
            year: YEAR_BASE + u16::from(field(DateTimeOffset::Year)),
            month: field(DateTimeOffset::Month),
            day: field(DateTimeOffset::Day),
            weekday: field(DateTimeOffset::Weekday),
            hour: field(DateTimeOffset::Hour),
            minute: field(DateTimeOffset::Minute),
            second: field(DateTimeOffset::Second),
            millisecond: 0,
        }
    }

    /// Encodes `datetime` into the payload and returns the whole buffer,
    /// ready to be written. Years outside 2000-2099 wrap.
    pub(crate) fn encode(&mut self, datetime: &DateTime) -> &[u8] {
        let payload = &mut self.buffer[1..];
        payload[DateTimeOffset::Second as usize] = bcd::encode(datetime.second);
        payload[DateTimeOffset::Minute as usize] = bcd::encode(datetime.minute);
        payload[DateTimeOffset::Hour as usize] = bcd::encode(datetime.hour);
        payload[DateTimeOffset::Weekday as usize] = bcd::encode(datetime.weekday);
        payload[DateTimeOffset::Day as usize] = bcd::encode(datetime.day);
        payload[DateTimeOffset::Month as usize] = bcd::encode(datetime.month);
        // offsets past 255 truncate
        payload[DateTimeOffset::Year as usize] =
            bcd::encode(datetime.year.wrapping_sub(YEAR_BASE) as u8);
        &self.buffer
    }
}

/// A 4-byte BCD alarm register block.
#[derive(Debug, Clone, PartialEq)]
pub struct AlarmRegister {
    buffer: [u8; 1 + ALARM_LEN],
}

impl AlarmRegister {
    /// Creates a register block starting at `register_address`.
    pub const fn new(register_address: u8) -> Self {
        let mut buffer = [0; 1 + ALARM_LEN];
        buffer[0] = register_address;
        Self { buffer }
    }

    pub const fn register_address(&self) -> u8 {
        self.buffer[0]
    }

    /// The address byte followed by the payload of the last transfer.
    pub const fn buffer(&self) -> &[u8; 1 + ALARM_LEN] {
        &self.buffer
    }

    pub(crate) fn split(&mut self) -> (&[u8], &mut [u8]) {
        let (address, payload) = self.buffer.split_at_mut(1);
        (address, payload)
    }

    fn byte(&self, offset: AlarmOffset) -> AlarmByte {
        AlarmByte(self.buffer[1 + offset as usize])
    }

    /// Decodes the payload. Returns `None` when bit 7 of the minute byte is
    /// clear, whatever the other bytes hold.
    pub(crate) fn decode(&self) -> Option<DateTime> {
        let minute = self.byte(AlarmOffset::Minute);
        if !minute.armed() {
            return None;
        }
        Some(DateTime {
            weekday: self.byte(AlarmOffset::Weekday).value(),
            day: self.byte(AlarmOffset::Day).value(),
            hour: self.byte(AlarmOffset::Hour).value(),
            minute: minute.value(),
            ..DateTime::default()
        })
    }

    /// Encodes `alarm` into the payload and returns the whole buffer, ready
    /// to be written.
    pub(crate) fn encode(&mut self, alarm: &Alarm) -> &[u8] {
        let weekday = match alarm.weekday {
            AlarmField::Armed(_) => {
                let mut byte = AlarmByte::from_field(alarm.weekday);
                byte.set_enabled(true);
                byte
            }
            AlarmField::Wildcard => AlarmByte::WILDCARD,
        };
        let payload = &mut self.buffer[1..];
        payload[AlarmOffset::Minute as usize] = AlarmByte::from_field(alarm.minute).into();
        payload[AlarmOffset::Hour as usize] = AlarmByte::from_field(alarm.hour).into();
        payload[AlarmOffset::Day as usize] = AlarmByte::from_field(alarm.day).into();
        payload[AlarmOffset::Weekday as usize] = weekday.into();
        &self.buffer
    }
}
