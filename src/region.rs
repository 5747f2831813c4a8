//! Regional holiday rule sets. TRNC layers its own holidays on top of the
//! Turkish base tables.

use std::env;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Serialize};

use crate::error::HolidayError;
use crate::holiday::{HolidayRecord, BASE_FIXED_HOLIDAYS, BASE_LUNAR_ANCHORS};
use crate::validator::{HolidayValidator, RegionConfig};

/// Env var holding extra rules in [`RegionConfig::from_json`] form.
pub const ADDITIONAL_HOLIDAYS_VAR: &str = "ADDITIONAL_HOLIDAYS";

/// Fixed holidays observed in the TRNC on top of the Turkish ones.
pub const TRNC_FIXED_HOLIDAYS: &[(&str, &str)] = &[
    ("08-01", "TMT Günü"),
    ("11-15", "Kuzey Kıbrıs Türk Cumhuriyeti'nin İlanı"),
];

/// Lunar holidays observed in the TRNC on top of the Turkish ones.
pub const TRNC_LUNAR_ANCHORS: &[(&str, (i32, u32, u32), u32)] =
    &[("mevlidKandili", (2024, 9, 15), 1)];

/// Regions with a built-in rule set
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    /// The base rule set.
    Turkey,
    /// Turkish Republic of Northern Cyprus.
    Trnc,
}

fn table_config(
    fixed: &[(&str, &str)],
    anchors: &[(&str, (i32, u32, u32), u32)],
) -> Result<RegionConfig, HolidayError> {
    let anchors = anchors
        .iter()
        .map(|row| HolidayRecord::from_table_row(*row))
        .collect::<Result<Vec<_>, _>>()?;
    RegionConfig::new(Vec::<&str>::new(), anchors)?.with_fixed_names(fixed.iter().copied())
}

fn base_config() -> &'static Arc<RegionConfig> {
    static BASE: OnceLock<Arc<RegionConfig>> = OnceLock::new();
    BASE.get_or_init(|| {
        Arc::new(
            table_config(BASE_FIXED_HOLIDAYS, BASE_LUNAR_ANCHORS)
                .expect("built-in Turkish holiday tables are valid"),
        )
    })
}

fn trnc_config() -> &'static Arc<RegionConfig> {
    static TRNC: OnceLock<Arc<RegionConfig>> = OnceLock::new();
    TRNC.get_or_init(|| {
        let additions = table_config(TRNC_FIXED_HOLIDAYS, TRNC_LUNAR_ANCHORS)
            .expect("built-in TRNC holiday tables are valid");
        Arc::new(base_config().extend(&additions))
    })
}

impl Region {
    pub const ALL: [Region; 2] = [Region::Turkey, Region::Trnc];

    /// The merged, read-only rule set of this region.
    pub fn config(self) -> &'static Arc<RegionConfig> {
        match self {
            Region::Turkey => base_config(),
            Region::Trnc => trnc_config(),
        }
    }

    /// Creates a validator for this region with no custom holidays.
    pub fn validator(self, include_saturday: bool) -> HolidayValidator {
        HolidayValidator::with_config(Arc::clone(self.config()), include_saturday)
    }

    /// The region config extended with the rules in `json`.
    pub fn config_with_json(self, json: &str) -> Result<RegionConfig, HolidayError> {
        let additional = RegionConfig::from_json(json)?;
        Ok(self.config().extend(&additional))
    }

    /// The region config, extended with the `ADDITIONAL_HOLIDAYS` env var
    /// when it is set.
    pub fn config_from_env(self) -> Result<RegionConfig, HolidayError> {
        match env::var(ADDITIONAL_HOLIDAYS_VAR) {
            Ok(json) => {
                tracing::debug!(
                    region = %self,
                    "loading additional holidays from {}",
                    ADDITIONAL_HOLIDAYS_VAR
                );
                self.config_with_json(&json)
            }
            Err(env::VarError::NotPresent) => Ok(RegionConfig::clone(self.config())),
            Err(err) => Err(err.into()),
        }
    }

    /// Creates a validator from [`Region::config_from_env`].
    pub fn validator_from_env(
        self,
        include_saturday: bool,
    ) -> Result<HolidayValidator, HolidayError> {
        Ok(HolidayValidator::with_config(
            self.config_from_env()?,
            include_saturday,
        ))
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Region::Turkey => write!(f, "turkey"),
            Region::Trnc => write!(f, "trnc"),
        }
    }
}

impl FromStr for Region {
    type Err = HolidayError;

    fn from_str(s: &str) -> Result<Region, HolidayError> {
        match s.to_ascii_lowercase().as_str() {
            "turkey" | "tr" => Ok(Region::Turkey),
            "trnc" | "kktc" => Ok(Region::Trnc),
            _ => Err(HolidayError::UnknownRegion {
                name: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn trnc_tables_are_well_formed() {
        assert!(table_config(TRNC_FIXED_HOLIDAYS, TRNC_LUNAR_ANCHORS).is_ok());
    }

    #[test]
    fn trnc_extends_turkey() {
        let turkey = Region::Turkey.config();
        let trnc = Region::Trnc.config();
        assert!(turkey.fixed_holidays().is_subset(trnc.fixed_holidays()));
        assert_eq!(trnc.fixed_holidays().len(), 9);
        assert!(trnc.fixed_holidays().contains("08-01"));
        assert!(trnc.fixed_holidays().contains("11-15"));
        assert!(!turkey.fixed_holidays().contains("08-01"));

        let names: Vec<&str> = trnc.lunar_anchors().iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["ramazanBayrami", "kurbanBayrami", "mevlidKandili"]);
        assert_eq!(turkey.lunar_anchors().len(), 2);
    }

    #[test]
    fn configs_are_shared() {
        assert!(Arc::ptr_eq(Region::Trnc.config(), Region::Trnc.config()));
        let validator = Region::Trnc.validator(false);
        assert_eq!(validator.config(), Region::Trnc.config().as_ref());
    }

    #[test]
    fn trnc_lunar_anchor() {
        let turkey = Region::Turkey.validator(false);
        let trnc = Region::Trnc.validator(false);
        assert!(trnc.is_lunar_holiday(ymd(2024, 9, 15)));
        assert!(!trnc.is_lunar_holiday(ymd(2024, 9, 16)));
        assert!(!turkey.is_lunar_holiday(ymd(2024, 9, 15)));
        assert_eq!(trnc.holiday_name(ymd(2024, 9, 15)), Some("mevlidKandili"));
        // 2024-09-15 + 354 days
        assert!(trnc.is_lunar_holiday(ymd(2025, 9, 4)));
    }

    #[test]
    fn trnc_fixed_names() {
        let trnc = Region::Trnc.validator(false);
        assert_eq!(trnc.holiday_name(ymd(2024, 8, 1)), Some("TMT Günü"));
        assert_eq!(
            trnc.holiday_name(ymd(2024, 4, 23)),
            Some("Ulusal Egemenlik ve Çocuk Bayramı")
        );
        let turkey = Region::Turkey.validator(false);
        assert_eq!(turkey.holiday_name(ymd(2024, 8, 1)), None);
    }

    // the only test touching ADDITIONAL_HOLIDAYS, so the env var is not shared
    // with tests running in parallel
    #[test]
    fn config_from_env() {
        env::remove_var(ADDITIONAL_HOLIDAYS_VAR);
        let config = Region::Trnc.config_from_env().unwrap();
        assert_eq!(&config, Region::Trnc.config().as_ref());

        env::set_var(
            ADDITIONAL_HOLIDAYS_VAR,
            r#"{"fixed_holidays": ["03-18"], "lunar_anchors": [{"name": "kandil", "date": "2024-02-06", "days": 1}]}"#,
        );
        let validator = Region::Trnc.validator_from_env(false);

        env::set_var(ADDITIONAL_HOLIDAYS_VAR, r#"{"fixed_holidays": ["18-03"]}"#);
        let invalid = Region::Turkey.config_from_env();

        #[cfg(unix)]
        let not_unicode = {
            use std::ffi::OsStr;
            use std::os::unix::ffi::OsStrExt;
            env::set_var(ADDITIONAL_HOLIDAYS_VAR, OsStr::from_bytes(&[0x66, 0x6f, 0x80]));
            Region::Turkey.config_from_env()
        };
        env::remove_var(ADDITIONAL_HOLIDAYS_VAR);

        let validator = validator.unwrap();
        // 2024-03-18 is a Monday
        assert!(validator.is_holiday(ymd(2024, 3, 18)));
        assert!(validator.is_holiday(ymd(2024, 2, 6)));
        assert!(validator.is_holiday(ymd(2024, 8, 1)));
        assert!(matches!(invalid, Err(HolidayError::InvalidMonthDay { .. })));
        #[cfg(unix)]
        assert!(matches!(
            not_unicode,
            Err(HolidayError::EnvVar(env::VarError::NotUnicode(_)))
        ));
    }

    #[test]
    fn parse_region() {
        assert_eq!("turkey".parse::<Region>().unwrap(), Region::Turkey);
        assert_eq!("TR".parse::<Region>().unwrap(), Region::Turkey);
        assert_eq!("trnc".parse::<Region>().unwrap(), Region::Trnc);
        assert_eq!("KKTC".parse::<Region>().unwrap(), Region::Trnc);
        assert!(matches!(
            "cyprus".parse::<Region>(),
            Err(HolidayError::UnknownRegion { name }) if name == "cyprus"
        ));
        for region in Region::ALL {
            assert_eq!(region.to_string().parse::<Region>().unwrap(), region);
        }
    }

    #[test]
    fn serialize_region() {
        assert_eq!(serde_json::to_string(&Region::Trnc).unwrap(), r#""trnc""#);
        let region: Region = serde_json::from_str(r#""turkey""#).unwrap();
        assert_eq!(region, Region::Turkey);
    }

    #[test]
    fn region_with_additional_rules() {
        let config = Region::Turkey
            .config_with_json(
                r#"{"fixed_holidays": ["03-18"], "lunar_anchors": [{"name": "kandil", "date": "2024-02-06", "days": 1}]}"#,
            )
            .unwrap();
        let validator = HolidayValidator::with_config(config, false);
        // 2024-03-18 is a Monday
        assert!(validator.is_holiday(ymd(2024, 3, 18)));
        assert!(validator.is_holiday(ymd(2024, 2, 6)));
        assert!(validator.is_holiday(ymd(2024, 4, 23)));
        // built-in tables are untouched
        assert!(!Region::Turkey.validator(false).is_holiday(ymd(2024, 3, 18)));

        assert!(Region::Trnc.config_with_json(r#"{"fixed_holidays": ["18-03"]}"#).is_err());
    }
}
