use anyhow::{anyhow, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

const MS_PER_DAY: i64 = 86_400_000;
const MS_PER_HOUR: i64 = 3_600_000;
const MS_PER_MINUTE: i64 = 60_000;
const MS_PER_SECOND: i64 = 1_000;

static CODE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{2})(\d{2})(\d{2})").unwrap());

/// Parse a DDHHMM duration code into milliseconds.
///
/// The first run of six digits anywhere in the input is used: two digits
/// each for days, hours and minutes. Anything before or after that run is
/// ignored. There is no range check, so "99" hours is ninety-nine literal
/// hours. "000000" parses to zero and makes a timer that is already done.
pub fn parse_code(input: &str) -> Result<i64> {
    let groups = CODE_PATTERN
        .captures(input)
        .ok_or_else(|| anyhow!("Enter a time code in DDHHMM format, like 010230 for 1d 2h 30m."))?;

    let days: i64 = groups[1].parse()?;
    let hours: i64 = groups[2].parse()?;
    let minutes: i64 = groups[3].parse()?;

    Ok(((days * 24 + hours) * 60 + minutes) * 60 * 1000)
}

/// One decomposed reading of a timer, ready to display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Countdown {
    Running {
        days: i64,
        hours: i64,
        minutes: i64,
        seconds: i64,
    },
    /// The end time has passed.
    Done,
}

impl Countdown {
    /// Decompose a remaining span in milliseconds, truncating at each unit.
    /// Anything at or below zero is the terminal state.
    pub fn from_remaining(remaining_ms: i64) -> Countdown {
        if remaining_ms <= 0 {
            return Countdown::Done;
        }

        Countdown::Running {
            days: remaining_ms / MS_PER_DAY,
            hours: (remaining_ms % MS_PER_DAY) / MS_PER_HOUR,
            minutes: (remaining_ms % MS_PER_HOUR) / MS_PER_MINUTE,
            seconds: (remaining_ms % MS_PER_MINUTE) / MS_PER_SECOND,
        }
    }

    /// The reading of a timer ending at `end_time_ms`, as seen at `now_ms`.
    pub fn at(end_time_ms: i64, now_ms: i64) -> Countdown {
        Countdown::from_remaining(end_time_ms - now_ms)
    }

    pub fn is_done(&self) -> bool {
        matches!(self, Countdown::Done)
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Countdown::Done => write!(f, "DONE"),
            Countdown::Running {
                days,
                hours,
                minutes,
                seconds,
            } => write!(f, "{}d {}h {}m {}s", days, hours, minutes, seconds),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_parses_days_hours_minutes() {
        assert_eq!(parse_code("010203").unwrap(), ((1 * 24 + 2) * 60 + 3) * 60 * 1000);
    }

    #[test]
    fn code_ignores_text_around_the_digits() {
        let expected = ((11 * 24 + 22) * 60 + 33) * 60 * 1000;
        assert_eq!(parse_code("builder: 112233 (second hut)").unwrap(), expected);
    }

    #[test]
    fn code_takes_the_first_six_digits() {
        // the seventh digit is trailing garbage
        let expected = ((12 * 24 + 34) * 60 + 56) * 60 * 1000;
        assert_eq!(parse_code("1234567").unwrap(), expected);
    }

    #[test]
    fn code_without_a_six_digit_run_is_rejected() {
        assert!(parse_code("abc").is_err());
        assert!(parse_code("12 34 56").is_err());
        assert!(parse_code("12345").is_err());
        assert!(parse_code("").is_err());
    }

    #[test]
    fn zero_code_parses_to_zero() {
        assert_eq!(parse_code("000000").unwrap(), 0);
    }

    #[test]
    fn no_range_check_on_the_groups() {
        // 99 hours stay 99 hours
        assert_eq!(parse_code("009900").unwrap(), 99 * 60 * 60 * 1000);
    }

    #[test]
    fn remaining_decomposes_truncating_each_unit() {
        assert_eq!(
            Countdown::from_remaining(90_061_000),
            Countdown::Running {
                days: 1,
                hours: 1,
                minutes: 1,
                seconds: 1
            }
        );
    }

    #[test]
    fn sub_second_remainders_truncate_to_zero_seconds() {
        assert_eq!(
            Countdown::from_remaining(999),
            Countdown::Running {
                days: 0,
                hours: 0,
                minutes: 0,
                seconds: 0
            }
        );
    }

    #[test]
    fn elapsed_remaining_is_the_terminal_state() {
        assert_eq!(Countdown::from_remaining(-5_000), Countdown::Done);
        assert_eq!(Countdown::from_remaining(0), Countdown::Done);
    }

    #[test]
    fn reading_subtracts_now_from_the_end_time() {
        assert!(Countdown::at(1_000, 2_000).is_done());
        assert_eq!(
            Countdown::at(93_784_000, 0),
            Countdown::Running {
                days: 1,
                hours: 2,
                minutes: 3,
                seconds: 4
            }
        );
    }

    #[test]
    fn display_spells_out_the_units() {
        assert_eq!(Countdown::from_remaining(93_784_000).to_string(), "1d 2h 3m 4s");
        assert_eq!(Countdown::Done.to_string(), "DONE");
    }
}
