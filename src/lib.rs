//! Calendar-relative dates for the Jalali (Solar Hijri) calendar and friends.
//!
//! A day within a year is either an [`Ordinal`] (day-of-year) or a [`MonthDay`]. Both are
//! year-agnostic until anchored to a [`Year`] through a [`CalendarRules`] value, which is
//! where they are validated and converted into one another. A [`Date`] pairs a year with a
//! validated ordinal; day arithmetic crosses year boundaries without visiting the years in
//! between.
//!
//! ```
//! use jalali_date::{Date, MonthDay, Ordinal};
//!
//! let fixed_point: Date = Date::new(1404, MonthDay::new(2, 13))?;
//! assert_eq!(fixed_point.ordinal(), Ordinal::new(44));
//!
//! let moved = fixed_point.add_days(11);
//! assert_eq!(moved.to_month_day(), MonthDay::new(2, 24));
//! # Ok::<(), jalali_date::OutOfRange>(())
//! ```

mod calendar;
mod compare;
mod consts;
mod prelude;
mod types;

pub use calendar::{
    CalendarRules, Gregorian, Jalali, gregorian_days_in_month, is_gregorian_leap_year,
    is_jalali_leap_year,
};
pub use compare::{Canonical, ext_cmp};
pub use consts::{
    DAYS_IN_COMMON_YEAR, DAYS_IN_LEAP_YEAR, JALALI_EPOCH_ORDINAL, JALALI_EPOCH_YEAR,
    MIN_ORDINAL, MONTHS_IN_YEAR, NON_LEAP_CORRECTION,
};
pub use types::{MonthDay, Ordinal, Position, Year};

use consts::SECONDS_PER_DAY;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Sub};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::trace;

/// Raised when a year, month, day-of-month or ordinal does not exist in a calendar.
///
/// Every constructor and conversion reports invalid input with this error; nothing is
/// clamped to a nearby valid value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum OutOfRange {
    /// Year zero was requested.
    #[error("Invalid year: 0 (there is no year zero)")]
    Year,

    /// Month outside `1..=max`.
    #[error("Invalid month: {month} (must be 1-{max})")]
    Month { month: u8, max: u8 },

    /// Day-of-month past the end of its month.
    #[error("Invalid day {day} for month {year}/{month:02} (must be 1-{max})")]
    Day { year: i32, month: u8, day: u8, max: u8 },

    /// Ordinal outside the days of its year.
    #[error("Invalid ordinal {ordinal} for year {year} (must be 1-{max})")]
    Ordinal { year: i32, ordinal: u16, max: u16 },
}

/// A calendar day: a year and a validated day-of-year in calendar `C`.
///
/// Dates are immutable values. Arithmetic returns new dates and equality means "same
/// calendar day" regardless of whether the date was built from an ordinal or a month-day.
#[derive(Debug, Clone, Copy)]
pub struct Date<C: CalendarRules = Jalali> {
    calendar: C,
    year:     Year,
    ordinal:  Ordinal,
}

impl<C: CalendarRules + Default> Date<C> {
    /// Creates a date from a year and a position in either representation.
    ///
    /// # Errors
    /// Returns `OutOfRange` if the year is 0 or the position does not exist in that year.
    pub fn new(year: i32, position: impl Into<Position>) -> Result<Self, OutOfRange> {
        Self::with_calendar(C::default(), year, position)
    }

    /// Creates a date from year, month and day-of-month.
    ///
    /// # Errors
    /// Returns `OutOfRange` if any component is invalid for the calendar.
    pub fn from_ymd(year: i32, month: u8, day: u8) -> Result<Self, OutOfRange> {
        Self::new(year, MonthDay::new(month, day))
    }

    /// Creates a date from year and day-of-year.
    ///
    /// # Errors
    /// Returns `OutOfRange` if the year is 0 or the ordinal does not exist in that year.
    pub fn from_year_ordinal(year: i32, ordinal: u16) -> Result<Self, OutOfRange> {
        Self::new(year, Ordinal::new(ordinal))
    }

    /// The first day of `year`.
    ///
    /// # Errors
    /// Returns `OutOfRange::Year` if the year is 0.
    pub fn first_day_of(year: i32) -> Result<Self, OutOfRange> {
        Self::from_year_ordinal(year, MIN_ORDINAL)
    }

    /// The date `days` after (or before, when negative) the calendar's epoch.
    /// Returns `None` if the result leaves the representable year range.
    pub fn from_days_since_epoch(days: i64) -> Option<Self> {
        let calendar = C::default();
        let epoch = day_number(&calendar, calendar.epoch());
        Self::from_day_number(calendar, epoch.checked_add(days)?)
    }

    /// The date a point in time falls on, counted in whole days from the Unix epoch (UTC).
    ///
    /// Times before the epoch round down to the earlier day. Returns `None` only if the day
    /// lies outside the representable year range.
    pub fn from_system_time(time: SystemTime) -> Option<Self> {
        let days = match time.duration_since(UNIX_EPOCH) {
            Ok(elapsed) => i64::try_from(elapsed.as_secs() / SECONDS_PER_DAY).ok()?,
            Err(err) => {
                let before = err.duration();
                let partial = u64::from(before.subsec_nanos() > 0);
                let seconds = before.as_secs().saturating_add(partial);
                -i64::try_from(seconds.div_ceil(SECONDS_PER_DAY)).ok()?
            }
        };
        Self::from_days_since_epoch(days)
    }
}

impl<C: CalendarRules> Date<C> {
    /// Creates a date in an explicitly supplied calendar.
    ///
    /// # Errors
    /// Returns `OutOfRange` if the year is 0 or the position does not exist in that year.
    pub fn with_calendar(
        calendar: C,
        year: i32,
        position: impl Into<Position>,
    ) -> Result<Self, OutOfRange> {
        let year = Year::new(year)?;
        let ordinal = position.into().to_ordinal(&calendar, year)?;
        Ok(Self {
            calendar,
            year,
            ordinal,
        })
    }

    /// Returns the calendar this date belongs to
    pub const fn calendar(&self) -> &C {
        &self.calendar
    }

    /// Returns the year
    pub const fn year(&self) -> Year {
        self.year
    }

    /// Returns the day-of-year
    pub const fn ordinal(&self) -> Ordinal {
        self.ordinal
    }

    /// Returns the month (1-based)
    pub fn month(&self) -> u8 {
        self.to_month_day().month()
    }

    /// Returns the day of the month (1-based)
    pub fn day(&self) -> u8 {
        self.to_month_day().day()
    }

    /// Is this date's year a leap year
    pub fn is_leap_year(&self) -> bool {
        self.calendar.is_leap_year(self.year)
    }

    /// Number of days in this date's year
    pub fn days_in_year(&self) -> u16 {
        self.calendar.days_in_year(self.year)
    }

    /// Returns the position within the year as an ordinal.
    pub const fn to_ordinal(&self) -> Ordinal {
        self.ordinal
    }

    /// Returns the position within the year as a month and day.
    ///
    /// # Panics
    /// Only if the calendar's month table disagrees with its own `days_in_year`, since the
    /// stored ordinal was validated against the latter.
    pub fn to_month_day(&self) -> MonthDay {
        match self.calendar.ordinal_to_month_day(self.year, self.ordinal) {
            Ok(month_day) => month_day,
            Err(err) => unreachable!("date holds an ordinal validated for its year: {err}"),
        }
    }

    /// Calendar-aware comparison: first by year, then by day-of-year.
    pub fn ext_cmp(&self, other: &Self) -> Ordering {
        (self.year, self.ordinal).cmp(&(other.year, other.ordinal))
    }

    /// The same month and day in another year.
    ///
    /// # Errors
    /// Returns `OutOfRange::Year` for year 0, or `OutOfRange::Day` when the day does not
    /// exist there (Esfand 30th moved to a common year).
    pub fn with_year(self, year: i32) -> Result<Self, OutOfRange> {
        let month_day = self.to_month_day();
        Self::with_calendar(self.calendar, year, month_day)
    }

    /// The same day of the month in another month of this year.
    ///
    /// # Errors
    /// Returns `OutOfRange::Month` for an unknown month, or `OutOfRange::Day` when the
    /// month is too short for the day.
    pub fn with_month(self, month: u8) -> Result<Self, OutOfRange> {
        let day = self.day();
        Self::with_calendar(self.calendar, self.year.get(), MonthDay::new(month, day))
    }

    /// Another day of this month.
    ///
    /// # Errors
    /// Returns `OutOfRange::Day` if the month has no such day.
    pub fn with_day(self, day: u8) -> Result<Self, OutOfRange> {
        let month = self.month();
        Self::with_calendar(self.calendar, self.year.get(), MonthDay::new(month, day))
    }

    /// Moves the date by whole years, keeping its month and day.
    ///
    /// A day missing from the target year is clamped to the last day of its month, so
    /// Esfand 30th of a leap year becomes Esfand 29th in a common year. Year zero is
    /// skipped. Returns `None` outside the representable year range.
    pub fn checked_add_years(self, years: i32) -> Option<Self> {
        let year = self.year.checked_add(years)?;
        let month_day = self.to_month_day();
        Self::clamped(self.calendar, year, month_day.month(), month_day.day())
    }

    /// Moves the date by whole months across year boundaries, keeping its day.
    ///
    /// A day missing from the target month is clamped to that month's last day
    /// (Shahrivar 31st plus one month is Mehr 30th). Returns `None` outside the
    /// representable year range.
    pub fn checked_add_months(self, months: i32) -> Option<Self> {
        let per_year = i64::from(self.calendar.months_in_year());
        let month_day = self.to_month_day();
        let total =
            self.year.index() * per_year + i64::from(month_day.month()) - 1 + i64::from(months);
        let year = Year::from_index(total.div_euclid(per_year))?;
        let month = u8::try_from(total.rem_euclid(per_year) + 1).ok()?;
        Self::clamped(self.calendar, year, month, month_day.day())
    }

    /// Returns the date `days` after this one (before it, when negative).
    ///
    /// Returns `None` if the result leaves the representable year range.
    pub fn checked_add_days(self, days: i32) -> Option<Self> {
        self.checked_shift(i64::from(days))
    }

    /// Returns the date `days` before this one (after it, when negative).
    ///
    /// Returns `None` if the result leaves the representable year range.
    pub fn checked_sub_days(self, days: i32) -> Option<Self> {
        self.checked_shift(-i64::from(days))
    }

    /// Returns the date `days` after this one (before it, when negative).
    ///
    /// # Panics
    /// Panics if the result falls outside the representable year range (`i32` years).
    pub fn add_days(self, days: i32) -> Self {
        let year = self.year;
        self.checked_add_days(days)
            .unwrap_or_else(|| panic!("adding {days} days to year {year} overflows the year range"))
    }

    /// Signed number of days from this date to `other`.
    pub fn days_until(&self, other: &Self) -> i64 {
        day_number(&self.calendar, (other.year, other.ordinal))
            - day_number(&self.calendar, (self.year, self.ordinal))
    }

    /// Signed number of days since the calendar's epoch (Gregorian 1970-01-01).
    pub fn days_since_epoch(&self) -> i64 {
        day_number(&self.calendar, (self.year, self.ordinal))
            - day_number(&self.calendar, self.calendar.epoch())
    }

    fn checked_shift(self, days: i64) -> Option<Self> {
        let start = self.year;
        let target = day_number(&self.calendar, (self.year, self.ordinal)).checked_add(days)?;
        let shifted = Self::from_day_number(self.calendar, target);
        trace!(
            %start,
            days,
            end = ?shifted.as_ref().map(|date| date.year.get()),
            "shifted date by days"
        );
        shifted
    }

    /// The date on `day` counted from the first day of year 1 (day 0).
    fn from_day_number(calendar: C, day: i64) -> Option<Self> {
        let last_ordinal = Ordinal::new(calendar.days_in_year(Year::MAX));
        let last = day_number(&calendar, (Year::MAX, last_ordinal));
        if day < calendar.days_before_year(Year::MIN) || day > last {
            return None;
        }

        // bisect on the gapless year index for the last year starting on or before `day`
        let mut low = Year::MIN.index();
        let mut high = Year::MAX.index();
        while low < high {
            let mid = low + (high - low + 1) / 2;
            if calendar.days_before_year(Year::from_index(mid)?) <= day {
                low = mid;
            } else {
                high = mid - 1;
            }
        }

        let year = Year::from_index(low)?;
        let ordinal = u16::try_from(day - calendar.days_before_year(year) + 1).ok()?;
        trace!(calendar = calendar.name(), day, %year, ordinal, "located day number");
        Some(Self {
            calendar,
            year,
            ordinal: Ordinal::new(ordinal),
        })
    }

    fn clamped(calendar: C, year: Year, month: u8, day: u8) -> Option<Self> {
        let last = calendar.days_in_month(year, month).ok()?;
        let ordinal = calendar.month_day_to_ordinal(year, month, day.min(last)).ok()?;
        Some(Self {
            calendar,
            year,
            ordinal,
        })
    }
}

/// Days from the first day of year 1 (day 0) to `(year, ordinal)`.
fn day_number<C: CalendarRules + ?Sized>(calendar: &C, (year, ordinal): (Year, Ordinal)) -> i64 {
    calendar.days_before_year(year) + i64::from(ordinal.get()) - i64::from(MIN_ORDINAL)
}

impl<C: CalendarRules> PartialEq for Date<C> {
    fn eq(&self, other: &Self) -> bool {
        self.ext_cmp(other).is_eq()
    }
}

impl<C: CalendarRules> Eq for Date<C> {}

impl<C: CalendarRules> PartialOrd for Date<C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<C: CalendarRules> Ord for Date<C> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ext_cmp(other)
    }
}

impl<C: CalendarRules> Hash for Date<C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.year.hash(state);
        self.ordinal.hash(state);
    }
}

impl<C: CalendarRules> Add<i32> for Date<C> {
    type Output = Self;

    fn add(self, rhs: i32) -> Self::Output {
        self.add_days(rhs)
    }
}

impl<C: CalendarRules> Sub<i32> for Date<C> {
    type Output = Self;

    fn sub(self, rhs: i32) -> Self::Output {
        let year = self.year;
        self.checked_sub_days(rhs)
            .unwrap_or_else(|| panic!("subtracting {rhs} days from year {year} overflows the year range"))
    }
}

impl<C: CalendarRules> Sub for Date<C> {
    type Output = i64;

    fn sub(self, rhs: Self) -> Self::Output {
        rhs.days_until(&self)
    }
}

impl<C: CalendarRules> From<Date<C>> for (Year, Ordinal) {
    fn from(date: Date<C>) -> Self {
        (date.year, date.ordinal)
    }
}

#[derive(Serialize, Deserialize)]
struct SerdeDate {
    year:    Year,
    ordinal: Ordinal,
}

impl<C: CalendarRules> Serialize for Date<C> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        SerdeDate {
            year:    self.year,
            ordinal: self.ordinal,
        }
        .serialize(serializer)
    }
}

impl<'de, C: CalendarRules + Default> Deserialize<'de> for Date<C> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let SerdeDate { year, ordinal } = SerdeDate::deserialize(deserializer)?;
        Self::new(year.get(), ordinal).map_err(serde::de::Error::custom)
    }
}
