//! Public holiday checks for Turkey and the TRNC.
//!
//! A [`validator::HolidayValidator`] combines weekend days, fixed month-day
//! holidays, approximated Islamic holiday windows and user supplied custom
//! holidays. Regional variants are picked through [`region::Region`].
//!
//! ```
//! use chrono::NaiveDate;
//! use holiday_checker::region::Region;
//!
//! let validator = Region::Trnc.validator(false);
//! assert!(validator.is_holiday(NaiveDate::from_ymd_opt(2024, 8, 1).unwrap()));
//! ```

pub mod error;
pub mod holiday;
pub mod region;
pub mod validator;

pub use error::HolidayError;
pub use holiday::{CustomHoliday, HolidayRecord, BASE_YEAR, LUNAR_YEAR_DAYS};
pub use region::Region;
pub use validator::{HolidayValidator, RegionConfig};
