use holiday_checker::Region;
/// example to show the non-weekend holidays of a region
use std::env::args;
fn main() {
    let args: Vec<String> = args().collect();
    let len = args.len();
    if len < 3 {
        panic!("Usage: {} region first [last]", args[0]);
    }
    let region: Region = args[1].parse().unwrap();
    let first: i32 = args[2].parse().unwrap();
    let last: i32 = if len > 3 { args[3].parse().unwrap() } else { first };
    let validator = region.validator(false);
    let mut fixed = Vec::new();
    let mut lunar = Vec::new();
    for year in first..=last {
        for date in validator.holidays_in_year(year) {
            if validator.is_lunar_holiday(date) {
                lunar.push(date);
            } else if validator.is_fixed_holiday(date) {
                fixed.push(date);
            }
        }
    }
    println!("fixed holidays: {:?}", fixed);
    println!("lunar holidays: {:?}", lunar);
}
