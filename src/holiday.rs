//! Holiday records and the built-in Turkish holiday tables.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::HolidayError;

/// Mean length of an Islamic (lunar) year in days.
pub const LUNAR_YEAR_DAYS: f64 = 354.36667;

/// Year in which every lunar anchor date was observed.
pub const BASE_YEAR: i32 = 2024;

/// Fixed Gregorian holidays observed in Turkey, as `MM-DD` and name.
pub const BASE_FIXED_HOLIDAYS: &[(&str, &str)] = &[
    ("01-01", "Yeni Yıl"),
    ("04-23", "Ulusal Egemenlik ve Çocuk Bayramı"),
    ("05-01", "İşçi Bayramı"),
    ("05-19", "Atatürk'ü Anma, Gençlik ve Spor Bayramı"),
    ("07-20", "Barış ve Özgürlük Bayramı"),
    ("08-30", "Zafer Bayramı"),
    ("10-29", "Cumhuriyet Bayramı"),
];

/// Islamic holidays observed in Turkey: name, anchor (year, month, day) and duration.
pub const BASE_LUNAR_ANCHORS: &[(&str, (i32, u32, u32), u32)] = &[
    ("ramazanBayrami", (2024, 4, 10), 3),
    ("kurbanBayrami", (2024, 6, 28), 4),
];

/// A lunar holiday anchored on its occurrence in [`BASE_YEAR`].
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct HolidayRecord {
    pub name: String,
    /// First day of the holiday in the base year.
    pub date: NaiveDate,
    /// Number of consecutive days, at least one.
    pub days: u32,
}

impl HolidayRecord {
    pub fn new(name: impl Into<String>, date: NaiveDate, days: u32) -> Result<Self, HolidayError> {
        let name = name.into();
        if days == 0 {
            return Err(HolidayError::InvalidDuration { name });
        }
        Ok(HolidayRecord { name, date, days })
    }

    /// Builds a record from one row of an anchor table such as [`BASE_LUNAR_ANCHORS`].
    pub fn from_table_row(
        (name, (year, month, day), days): (&str, (i32, u32, u32), u32),
    ) -> Result<Self, HolidayError> {
        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
            HolidayError::InvalidAnchorDate {
                name: name.to_string(),
                date: format!("{:04}-{:02}-{:02}", year, month, day),
            }
        })?;
        HolidayRecord::new(name, date, days)
    }

    /// Every date covered by this holiday after shifting its anchor by `shift_days`.
    pub fn window(&self, shift_days: i64) -> impl Iterator<Item = NaiveDate> + '_ {
        let start = self.date.checked_add_signed(Duration::days(shift_days));
        (0..self.days).filter_map(move |i| start?.checked_add_signed(Duration::days(i as i64)))
    }
}

/// A holiday registered by the user on a single validator.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CustomHoliday {
    pub date: NaiveDate,
    /// Match the month and day every year instead of the exact date.
    pub recurring: bool,
    /// Recorded for callers, not used when matching.
    pub is_lunar: bool,
}

impl CustomHoliday {
    pub fn new(date: NaiveDate, recurring: bool, is_lunar: bool) -> Self {
        CustomHoliday {
            date,
            recurring,
            is_lunar,
        }
    }

    /// Returns true if `date` falls on this custom holiday.
    pub fn matches(&self, date: NaiveDate) -> bool {
        if self.recurring {
            date.month() == self.date.month() && date.day() == self.date.day()
        } else {
            date == self.date
        }
    }
}

/// Formats the `MM-DD` key used by fixed holiday tables.
pub fn month_day(date: NaiveDate) -> String {
    format!("{:02}-{:02}", date.month(), date.day())
}

/// Checks that `entry` is a zero-padded `MM-DD` naming a day that exists in
/// some year (02-29 is accepted).
pub fn validate_month_day(entry: &str) -> Result<(), HolidayError> {
    let invalid = || HolidayError::InvalidMonthDay {
        entry: entry.to_string(),
    };
    let bytes = entry.as_bytes();
    if bytes.len() != 5 || bytes[2] != b'-' {
        return Err(invalid());
    }
    let digits = [bytes[0], bytes[1], bytes[3], bytes[4]];
    if !digits.iter().all(u8::is_ascii_digit) {
        return Err(invalid());
    }
    let month: u32 = entry[0..2].parse().map_err(|_| invalid())?;
    let day: u32 = entry[3..5].parse().map_err(|_| invalid())?;
    // 2000 is a leap year, so every real month-day exists in it
    NaiveDate::from_ymd_opt(2000, month, day)
        .map(|_| ())
        .ok_or_else(invalid)
}
