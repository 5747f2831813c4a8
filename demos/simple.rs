use chrono::NaiveDate;
use holiday_checker::Region;

fn main() {
    let mut validator = Region::Trnc.validator(false);
    validator.add_custom_holiday(NaiveDate::from_ymd_opt(2024, 12, 25).unwrap(), true, false);
    for (y, m, d) in [(2024, 8, 1), (2024, 4, 13), (2025, 12, 25)] {
        let date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
        println!("{} holiday: {}", date, validator.is_holiday(date));
    }
}
