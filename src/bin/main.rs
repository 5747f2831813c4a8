use std::env::args;
use std::process::ExitCode;

use holiday_checker::{HolidayError, Region};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: holiday-checker <turkey|trnc> <first_year> [last_year] [--saturday]";

struct Args {
    region: Region,
    first: i32,
    last: i32,
    include_saturday: bool,
}

fn parse_year(arg: &str) -> Result<i32, HolidayError> {
    arg.parse().map_err(|_| HolidayError::InvalidYear {
        arg: arg.to_string(),
    })
}

fn parse_args(raw: &[String]) -> Result<Option<Args>, HolidayError> {
    let include_saturday = raw.iter().any(|a| a == "--saturday");
    let positional: Vec<&String> = raw.iter().filter(|a| !a.starts_with("--")).collect();
    let (region, first) = match positional.as_slice() {
        [region, first, ..] => (region.parse::<Region>()?, parse_year(first)?),
        _ => return Ok(None),
    };
    let last = match positional.get(2) {
        Some(last) => parse_year(last)?,
        None => first,
    };
    Ok(Some(Args {
        region,
        first,
        last,
        include_saturday,
    }))
}

fn run(args: Args) -> Result<(), HolidayError> {
    let validator = args.region.validator_from_env(args.include_saturday)?;
    tracing::info!(
        region = %args.region,
        first = args.first,
        last = args.last,
        "listing holidays"
    );
    for year in args.first..=args.last {
        for date in validator.holidays_in_year(year) {
            // plain weekend days are left out of the listing
            let named = validator.is_fixed_holiday(date)
                || validator.is_lunar_holiday(date)
                || validator.is_custom_holiday(date);
            if !named {
                continue;
            }
            match validator.holiday_name(date) {
                Some(name) => println!("{} {}", date, name),
                None => println!("{}", date),
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let raw: Vec<String> = args().skip(1).collect();
    let result = match parse_args(&raw) {
        Ok(Some(parsed)) => run(parsed),
        Ok(None) => {
            eprintln!("{}", USAGE);
            return ExitCode::from(2);
        }
        Err(err) => Err(err),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
