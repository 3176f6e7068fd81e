//! Calendar rules: month lengths, year lengths and leap years for one calendar.
//!
//! Every conversion and every piece of date arithmetic takes a [`CalendarRules`] value
//! explicitly, so several calendars can be used side by side.

use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_COMMON_YEAR, DAYS_IN_LEAP_YEAR, ESFAND, ESFAND_DAYS, ESFAND_DAYS_LEAP,
    FEBRUARY, FEBRUARY_DAYS_LEAP, FIRST_HALF_LAST_ORDINAL, FIRST_HALF_MONTH_DAYS,
    GREGORIAN_CYCLE, GREGORIAN_DAYS_IN_MONTH, GREGORIAN_EPOCH_YEAR, JALALI_CYCLE_LEAPS,
    JALALI_CYCLE_YEARS, JALALI_EPOCH_ORDINAL, JALALI_EPOCH_YEAR, JALALI_LEAP_COUNT_OFFSET,
    LEAP_YEAR_CYCLE, MEHR, MIN_DAY, MIN_ORDINAL, MONTHS_IN_YEAR, NON_LEAP_CORRECTION,
    SECOND_HALF_MONTH_DAYS,
};
use crate::types::{MonthDay, Ordinal, Year};
use crate::OutOfRange;
use std::fmt;

const JALALI_EPOCH: Year = const_year(JALALI_EPOCH_YEAR);
const GREGORIAN_EPOCH: Year = const_year(GREGORIAN_EPOCH_YEAR);

const fn const_year(value: i32) -> Year {
    match Year::new(value) {
        Ok(year) => year,
        Err(_) => panic!("epoch year must be non-zero"),
    }
}

/// The shape of one calendar.
///
/// Implementors supply the leap-year predicate, the month table and a closed-form count of
/// the days before each year; the conversions between month-day and ordinal positions are
/// derived from them and may be overridden with closed forms. Implementations must be pure:
/// the same inputs always produce the same outputs.
pub trait CalendarRules: fmt::Debug + Send + Sync {
    /// Human-readable name (e.g. `"Jalali"`).
    fn name(&self) -> &'static str;

    /// Return `true` if `year` has an extra day.
    fn is_leap_year(&self, year: Year) -> bool;

    /// Number of days in `month` of `year`.
    ///
    /// # Errors
    /// Returns `OutOfRange::Month` if `month` is outside `1..=months_in_year()`.
    fn days_in_month(&self, year: Year, month: u8) -> Result<u8, OutOfRange>;

    /// The year and ordinal of Gregorian 1970-01-01 in this calendar.
    fn epoch(&self) -> (Year, Ordinal);

    /// Days from the first day of year 1 to the first day of `year`, negative before year 1.
    ///
    /// Must agree with summing [`CalendarRules::days_in_year`] over the years in between,
    /// without visiting them: day arithmetic relies on it staying constant-time.
    fn days_before_year(&self, year: Year) -> i64;

    /// Number of months in every year.
    fn months_in_year(&self) -> u8 {
        MONTHS_IN_YEAR
    }

    /// Number of days in `year`.
    fn days_in_year(&self, year: Year) -> u16 {
        (1..=self.months_in_year())
            .filter_map(|month| self.days_in_month(year, month).ok())
            .map(u16::from)
            .sum()
    }

    /// The ordinal of `month`/`day` within `year`.
    ///
    /// # Errors
    /// Returns `OutOfRange::Month` or `OutOfRange::Day` if either does not exist in `year`.
    fn month_day_to_ordinal(&self, year: Year, month: u8, day: u8) -> Result<Ordinal, OutOfRange> {
        let max = self.days_in_month(year, month)?;
        if day < MIN_DAY || day > max {
            return Err(OutOfRange::Day {
                year: year.get(),
                month,
                day,
                max,
            });
        }
        let preceding = (1..month)
            .map(|m| self.days_in_month(year, m).map(u16::from))
            .sum::<Result<u16, _>>()?;
        Ok(Ordinal::new(preceding + u16::from(day)))
    }

    /// The month and day `ordinal` falls on within `year`.
    ///
    /// # Errors
    /// Returns `OutOfRange::Ordinal` if `ordinal` is outside `1..=days_in_year(year)`.
    fn ordinal_to_month_day(&self, year: Year, ordinal: Ordinal) -> Result<MonthDay, OutOfRange> {
        let max = self.days_in_year(year);
        let out_of_range = OutOfRange::Ordinal {
            year: year.get(),
            ordinal: ordinal.get(),
            max,
        };
        if ordinal.get() < MIN_ORDINAL || ordinal.get() > max {
            return Err(out_of_range);
        }

        let mut remaining = ordinal.get();
        for month in 1..=self.months_in_year() {
            let length = self.days_in_month(year, month)?;
            if remaining <= u16::from(length) {
                let day = u8::try_from(remaining).map_err(|_| out_of_range)?;
                return Ok(MonthDay::new(month, day));
            }
            remaining -= u16::from(length);
        }
        Err(out_of_range)
    }
}

/// The Solar Hijri (Jalali, Persian) calendar.
///
/// Six 31-day months, five 30-day months and Esfand with 29 days, or 30 in leap years.
/// Leap years follow the 33-year rule corrected by [`NON_LEAP_CORRECTION`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Jalali;

impl CalendarRules for Jalali {
    fn name(&self) -> &'static str {
        "Jalali"
    }

    fn is_leap_year(&self, year: Year) -> bool {
        is_jalali_leap_year(year.get())
    }

    fn days_in_month(&self, year: Year, month: u8) -> Result<u8, OutOfRange> {
        match month {
            1..MEHR => Ok(FIRST_HALF_MONTH_DAYS),
            MEHR..ESFAND => Ok(SECOND_HALF_MONTH_DAYS),
            ESFAND if self.is_leap_year(year) => Ok(ESFAND_DAYS_LEAP),
            ESFAND => Ok(ESFAND_DAYS),
            _ => Err(OutOfRange::Month {
                month,
                max: MONTHS_IN_YEAR,
            }),
        }
    }

    fn epoch(&self) -> (Year, Ordinal) {
        (JALALI_EPOCH, Ordinal::new(JALALI_EPOCH_ORDINAL))
    }

    fn days_before_year(&self, year: Year) -> i64 {
        let raw = i64::from(year.get());
        let elapsed = if raw > 0 { raw - 1 } else { raw };
        let rule_leaps =
            (JALALI_CYCLE_LEAPS * raw + JALALI_LEAP_COUNT_OFFSET).div_euclid(JALALI_CYCLE_YEARS);
        // a corrected year hands its leap day to the next one
        let deferred = year
            .get()
            .checked_sub(1)
            .is_some_and(|prev| NON_LEAP_CORRECTION.binary_search(&prev).is_ok());
        i64::from(DAYS_IN_COMMON_YEAR) * elapsed + rule_leaps - i64::from(deferred)
    }

    fn days_in_year(&self, year: Year) -> u16 {
        if self.is_leap_year(year) {
            DAYS_IN_LEAP_YEAR
        } else {
            DAYS_IN_COMMON_YEAR
        }
    }

    fn month_day_to_ordinal(&self, year: Year, month: u8, day: u8) -> Result<Ordinal, OutOfRange> {
        let max = self.days_in_month(year, month)?;
        if day < MIN_DAY || day > max {
            return Err(OutOfRange::Day {
                year: year.get(),
                month,
                day,
                max,
            });
        }
        let preceding = if month < MEHR {
            u16::from(month - 1) * u16::from(FIRST_HALF_MONTH_DAYS)
        } else {
            FIRST_HALF_LAST_ORDINAL + u16::from(month - MEHR) * u16::from(SECOND_HALF_MONTH_DAYS)
        };
        Ok(Ordinal::new(preceding + u16::from(day)))
    }

    fn ordinal_to_month_day(&self, year: Year, ordinal: Ordinal) -> Result<MonthDay, OutOfRange> {
        let max = self.days_in_year(year);
        let value = ordinal.get();
        if value < MIN_ORDINAL || value > max {
            return Err(OutOfRange::Ordinal {
                year: year.get(),
                ordinal: value,
                max,
            });
        }

        // zero-based offsets into the half year; both halves fit in a u8 once divided
        let (first_month, offset, month_length) = if value <= FIRST_HALF_LAST_ORDINAL {
            (1, value - 1, u16::from(FIRST_HALF_MONTH_DAYS))
        } else {
            (MEHR, value - FIRST_HALF_LAST_ORDINAL - 1, u16::from(SECOND_HALF_MONTH_DAYS))
        };
        let months = u8::try_from(offset / month_length).unwrap_or(u8::MAX);
        let day = u8::try_from(offset % month_length).unwrap_or(u8::MAX);
        Ok(MonthDay::new(first_month + months, day + 1))
    }
}

/// The proleptic Gregorian calendar.
///
/// Negative years count back from 1 BC (year -1), which is leap like astronomical year 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Gregorian;

impl CalendarRules for Gregorian {
    fn name(&self) -> &'static str {
        "Gregorian"
    }

    fn is_leap_year(&self, year: Year) -> bool {
        is_gregorian_leap_year(year.get())
    }

    fn days_in_month(&self, year: Year, month: u8) -> Result<u8, OutOfRange> {
        if month == 0 || month > MONTHS_IN_YEAR {
            return Err(OutOfRange::Month {
                month,
                max: MONTHS_IN_YEAR,
            });
        }
        Ok(gregorian_days_in_month(year.get(), month))
    }

    fn epoch(&self) -> (Year, Ordinal) {
        (GREGORIAN_EPOCH, Ordinal::new(MIN_ORDINAL))
    }

    fn days_before_year(&self, year: Year) -> i64 {
        // years elapsed since astronomical year 1; 1 BC is astronomical year 0
        let raw = i64::from(year.get());
        let elapsed = if raw > 0 { raw - 1 } else { raw };
        i64::from(DAYS_IN_COMMON_YEAR) * elapsed + elapsed.div_euclid(i64::from(LEAP_YEAR_CYCLE))
            - elapsed.div_euclid(i64::from(CENTURY_CYCLE))
            + elapsed.div_euclid(i64::from(GREGORIAN_CYCLE))
    }
}

// Helper functions

/// Jalali leap-year predicate on a raw year number.
pub fn is_jalali_leap_year(year: i32) -> bool {
    if NON_LEAP_CORRECTION.binary_search(&year).is_ok() {
        return false;
    }
    if year
        .checked_sub(1)
        .is_some_and(|prev| NON_LEAP_CORRECTION.binary_search(&prev).is_ok())
    {
        return true;
    }
    (25 * i64::from(year) + 11).rem_euclid(JALALI_CYCLE_YEARS) < JALALI_CYCLE_LEAPS
}

/// Gregorian leap-year predicate on a raw year number (no year zero, -1 is 1 BC).
pub const fn is_gregorian_leap_year(year: i32) -> bool {
    let year = if year < 0 { year + 1 } else { year };
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

pub const fn gregorian_days_in_month(year: i32, month: u8) -> u8 {
    debug_assert!(month != 0 && month <= MONTHS_IN_YEAR);

    if month == FEBRUARY && is_gregorian_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        GREGORIAN_DAYS_IN_MONTH[month as usize]
    }
}
