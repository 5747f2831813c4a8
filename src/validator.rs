//! Holiday classification: weekends, fixed holidays, projected lunar
//! holidays and custom holidays.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Deserialize;

use crate::error::HolidayError;
use crate::holiday::{
    month_day, validate_month_day, CustomHoliday, HolidayRecord, BASE_YEAR, LUNAR_YEAR_DAYS,
};
use crate::region::Region;

/// The holiday tables a validator checks against
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RegionConfig {
    fixed_holidays: BTreeSet<String>,
    fixed_names: BTreeMap<String, String>,
    lunar_anchors: Vec<HolidayRecord>,
}

#[derive(Deserialize)]
struct RegionConfigJson {
    #[serde(default)]
    fixed_holidays: Vec<String>,
    #[serde(default)]
    fixed_names: BTreeMap<String, String>,
    #[serde(default)]
    lunar_anchors: Vec<HolidayRecord>,
}

impl RegionConfig {
    /// Builds a config from `MM-DD` entries and lunar anchors, rejecting
    /// malformed entries, zero-day anchors and anchors outside [`BASE_YEAR`].
    pub fn new<S: AsRef<str>>(
        fixed_holidays: impl IntoIterator<Item = S>,
        lunar_anchors: Vec<HolidayRecord>,
    ) -> Result<RegionConfig, HolidayError> {
        let mut fixed = BTreeSet::new();
        for entry in fixed_holidays {
            let entry = entry.as_ref();
            validate_month_day(entry)?;
            fixed.insert(entry.to_string());
        }
        for record in &lunar_anchors {
            if record.days == 0 {
                return Err(HolidayError::InvalidDuration {
                    name: record.name.clone(),
                });
            }
            if record.date.year() != BASE_YEAR {
                return Err(HolidayError::AnchorYear {
                    name: record.name.clone(),
                    year: record.date.year(),
                    expected: BASE_YEAR,
                });
            }
        }
        Ok(RegionConfig {
            fixed_holidays: fixed,
            fixed_names: BTreeMap::new(),
            lunar_anchors,
        })
    }

    /// Names fixed holidays. Every named `MM-DD` also becomes a fixed holiday.
    pub fn with_fixed_names<S: AsRef<str>, N: Into<String>>(
        mut self,
        names: impl IntoIterator<Item = (S, N)>,
    ) -> Result<RegionConfig, HolidayError> {
        for (entry, name) in names {
            let entry = entry.as_ref();
            validate_month_day(entry)?;
            self.fixed_holidays.insert(entry.to_string());
            self.fixed_names.insert(entry.to_string(), name.into());
        }
        Ok(self)
    }

    /// Parses additional rules, e.g.
    /// `{"fixed_holidays": ["08-01"], "fixed_names": {"11-15": "x"}, "lunar_anchors": [{"name": "x", "date": "2024-09-15", "days": 1}]}`.
    /// Every field may be omitted.
    pub fn from_json(json: &str) -> Result<RegionConfig, HolidayError> {
        let raw: RegionConfigJson = serde_json::from_str(json)?;
        RegionConfig::new(raw.fixed_holidays, raw.lunar_anchors)?.with_fixed_names(raw.fixed_names)
    }

    /// Layers `other` on top of this config. Anchors keep their order, with
    /// this config's anchors first.
    pub fn extend(&self, other: &RegionConfig) -> RegionConfig {
        let mut merged = self.clone();
        merged
            .fixed_holidays
            .extend(other.fixed_holidays.iter().cloned());
        merged
            .fixed_names
            .extend(other.fixed_names.iter().map(|(k, v)| (k.clone(), v.clone())));
        merged
            .lunar_anchors
            .extend(other.lunar_anchors.iter().cloned());
        tracing::debug!(
            fixed = merged.fixed_holidays.len(),
            lunar = merged.lunar_anchors.len(),
            "merged holiday configuration"
        );
        merged
    }

    /// The `MM-DD` entries of every fixed holiday.
    pub fn fixed_holidays(&self) -> &BTreeSet<String> {
        &self.fixed_holidays
    }

    /// Name of the fixed holiday on `date`, if it has one.
    pub fn fixed_name(&self, date: NaiveDate) -> Option<&str> {
        self.fixed_names.get(&month_day(date)).map(String::as_str)
    }

    /// Lunar anchors in the order they are checked.
    pub fn lunar_anchors(&self) -> &[HolidayRecord] {
        &self.lunar_anchors
    }

    /// Number of days the lunar anchors move in `year` relative to [`BASE_YEAR`].
    ///
    /// The product is truncated toward zero, so negative offsets round up.
    pub fn lunar_shift(year: i32) -> i64 {
        let year_offset = year as i64 - BASE_YEAR as i64;
        (year_offset as f64 * LUNAR_YEAR_DAYS) as i64
    }

    /// Projects every lunar anchor into `year`.
    pub fn lunar_holidays(&self, year: i32) -> BTreeSet<NaiveDate> {
        let shift = RegionConfig::lunar_shift(year);
        tracing::trace!(year, shift, "projecting lunar holidays");
        self.lunar_anchors
            .iter()
            .flat_map(|anchor| anchor.window(shift))
            .collect()
    }
}

/// Decides whether a date is a holiday under one region's rules.
///
/// Custom holidays are added through `&mut self`; sharing one validator
/// between threads that register holidays needs a `Mutex` or similar.
#[derive(Debug, Clone)]
pub struct HolidayValidator {
    include_saturday: bool,
    config: Arc<RegionConfig>,
    custom_holidays: Vec<CustomHoliday>,
}

impl HolidayValidator {
    /// Creates a validator for the base (Turkey) rules.
    ///
    /// # Arguments
    ///
    /// * `include_saturday` - Whether Saturdays count as holidays.
    pub fn new(include_saturday: bool) -> HolidayValidator {
        Region::Turkey.validator(include_saturday)
    }

    /// Creates a validator for any set of tables, e.g. a region extended
    /// through [`RegionConfig::from_json`].
    pub fn with_config(
        config: impl Into<Arc<RegionConfig>>,
        include_saturday: bool,
    ) -> HolidayValidator {
        HolidayValidator {
            include_saturday,
            config: config.into(),
            custom_holidays: Vec::new(),
        }
    }

    /// Returns true if the date is a weekend day, a fixed holiday, inside a
    /// lunar holiday window or a registered custom holiday.
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.is_weekend(date)
            || self.is_fixed_holiday(date)
            || self.is_lunar_holiday(date)
            || self.is_custom_holiday(date)
    }

    /// Registers a custom holiday. `is_lunar` is kept on the record but
    /// does not change how it matches.
    pub fn add_custom_holiday(&mut self, date: NaiveDate, recurring: bool, is_lunar: bool) {
        self.custom_holidays
            .push(CustomHoliday::new(date, recurring, is_lunar));
    }

    /// Sunday, and Saturday when `include_saturday` is set.
    pub fn is_weekend(&self, date: NaiveDate) -> bool {
        match date.weekday() {
            Weekday::Sun => true,
            Weekday::Sat => self.include_saturday,
            _ => false,
        }
    }

    /// True if the month and day of `date` is in the fixed holiday table.
    pub fn is_fixed_holiday(&self, date: NaiveDate) -> bool {
        self.config.fixed_holidays.contains(&month_day(date))
    }

    /// True if `date` falls in a lunar holiday window projected into its year.
    pub fn is_lunar_holiday(&self, date: NaiveDate) -> bool {
        self.config.lunar_holidays(date.year()).contains(&date)
    }

    /// True if any registered custom holiday matches `date`.
    pub fn is_custom_holiday(&self, date: NaiveDate) -> bool {
        self.custom_holidays.iter().any(|h| h.matches(date))
    }

    /// All projected lunar holiday dates in `year`.
    pub fn lunar_holidays(&self, year: i32) -> BTreeSet<NaiveDate> {
        self.config.lunar_holidays(year)
    }

    /// Name of the lunar or fixed holiday on `date`, if any. Lunar names
    /// win when both apply.
    pub fn holiday_name(&self, date: NaiveDate) -> Option<&str> {
        let shift = RegionConfig::lunar_shift(date.year());
        self.config
            .lunar_anchors
            .iter()
            .find(|anchor| anchor.window(shift).any(|d| d == date))
            .map(|anchor| anchor.name.as_str())
            .or_else(|| self.config.fixed_name(date))
    }

    /// Every date in `year` for which [`HolidayValidator::is_holiday`] holds.
    pub fn holidays_in_year(&self, year: i32) -> BTreeSet<NaiveDate> {
        let lunar = self.lunar_holidays(year);
        let first = match NaiveDate::from_ymd_opt(year, 1, 1) {
            Some(date) => date,
            None => return BTreeSet::new(),
        };
        first
            .iter_days()
            .take_while(|d| d.year() == year)
            .filter(|&d| {
                self.is_weekend(d)
                    || self.is_fixed_holiday(d)
                    || lunar.contains(&d)
                    || self.is_custom_holiday(d)
            })
            .collect()
    }

    /// Whether Saturdays count as weekend days.
    pub fn include_saturday(&self) -> bool {
        self.include_saturday
    }

    /// The tables this validator checks against.
    pub fn config(&self) -> &RegionConfig {
        &self.config
    }

    /// Custom holidays in registration order.
    pub fn custom_holidays(&self) -> &[CustomHoliday] {
        &self.custom_holidays
    }
}
