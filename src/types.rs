use crate::calendar::CalendarRules;
use crate::consts::{MIN_DAY, MIN_ORDINAL};
use crate::OutOfRange;
use crate::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::num::NonZeroI32;
use std::ops::{Add, Sub};

/// A year number. There is no year zero: year -1 is immediately followed by year 1.
/// Uses `NonZeroI32` internally, so 0 is not a valid year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Year(NonZeroI32);

impl Year {
    /// Creates a new Year, validating that it's non-zero
    ///
    /// # Errors
    /// Returns `OutOfRange::Year` if the value is 0.
    pub const fn new(value: i32) -> Result<Self, OutOfRange> {
        match NonZeroI32::new(value) {
            Some(non_zero) => Ok(Self(non_zero)),
            None => Err(OutOfRange::Year),
        }
    }

    /// Returns the year value as i32
    #[inline]
    pub const fn get(self) -> i32 {
        self.0.get()
    }

    /// The earliest representable year
    pub const MIN: Self = Self(NonZeroI32::MIN);
    /// The latest representable year
    pub const MAX: Self = Self(NonZeroI32::MAX);

    /// Position in the gapless sequence of years: year 1 is 1, year -1 is 0.
    pub(crate) const fn index(self) -> i64 {
        let value = self.0.get() as i64;
        if value > 0 { value } else { value + 1 }
    }

    /// Inverse of [`Year::index`]. Returns `None` outside the `i32` year range.
    pub(crate) fn from_index(index: i64) -> Option<Self> {
        let value = if index > 0 { index } else { index - 1 };
        let value = i32::try_from(value).ok()?;
        NonZeroI32::new(value).map(Self)
    }

    /// The year `years` after this one (before it, when negative), skipping year zero.
    /// Returns `None` outside the `i32` year range.
    pub fn checked_add(self, years: i32) -> Option<Self> {
        Self::from_index(self.index() + i64::from(years))
    }

    /// The year after this one, skipping the missing year zero.
    /// Returns `None` past `i32::MAX`.
    pub const fn checked_succ(self) -> Option<Self> {
        let next = match self.0.get() {
            -1 => 1,
            value => match value.checked_add(1) {
                Some(next) => next,
                None => return None,
            },
        };
        match NonZeroI32::new(next) {
            Some(non_zero) => Some(Self(non_zero)),
            None => None,
        }
    }

    /// The year before this one, skipping the missing year zero.
    /// Returns `None` before `i32::MIN`.
    pub const fn checked_pred(self) -> Option<Self> {
        let prev = match self.0.get() {
            1 => -1,
            value => match value.checked_sub(1) {
                Some(prev) => prev,
                None => return None,
            },
        };
        match NonZeroI32::new(prev) {
            Some(non_zero) => Some(Self(non_zero)),
            None => None,
        }
    }
}

impl TryFrom<i32> for Year {
    type Error = OutOfRange;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Year> for i32 {
    fn from(year: Year) -> Self {
        year.0.get()
    }
}

/// The 1-based position of a day within a year, independent of any particular year.
///
/// A bare ordinal is only checked when it is anchored to a year (`1..=days_in_year`), so it
/// may hold an out-of-range value until then. The derived ordering is plain integer order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, From, Into, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Ordinal(u16);

impl Ordinal {
    /// Wraps a raw day-of-year number without validation
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// Returns the ordinal value as u16
    #[inline]
    pub const fn get(self) -> u16 {
        self.0
    }

    /// Checks this ordinal against `year` of `calendar`.
    ///
    /// # Errors
    /// Returns `OutOfRange::Ordinal` if the value is 0 or past the last day of `year`.
    pub fn to_ordinal<C: CalendarRules + ?Sized>(
        self,
        calendar: &C,
        year: Year,
    ) -> Result<Self, OutOfRange> {
        let max = calendar.days_in_year(year);
        if self.0 < MIN_ORDINAL || self.0 > max {
            return Err(OutOfRange::Ordinal {
                year: year.get(),
                ordinal: self.0,
                max,
            });
        }
        Ok(self)
    }

    /// Converts to the month and day this ordinal falls on in `year`.
    ///
    /// # Errors
    /// Returns `OutOfRange::Ordinal` if the value does not exist in `year`.
    pub fn to_month_day<C: CalendarRules + ?Sized>(
        self,
        calendar: &C,
        year: Year,
    ) -> Result<MonthDay, OutOfRange> {
        calendar.ordinal_to_month_day(year, self)
    }

    /// The validated ordinal as a plain integer.
    ///
    /// # Errors
    /// Same as [`Ordinal::to_ordinal`].
    pub fn canonical_key<C: CalendarRules + ?Sized>(
        self,
        calendar: &C,
        year: Year,
    ) -> Result<u16, OutOfRange> {
        Position::Ordinal(self).canonical_key(calendar, year)
    }

    /// Calendar-aware comparison against either representation. See [`Position::ext_cmp`].
    ///
    /// # Errors
    /// Returns `OutOfRange` if either operand does not exist in `year`.
    pub fn ext_cmp<C: CalendarRules + ?Sized>(
        self,
        other: impl Into<Position>,
        calendar: &C,
        year: Year,
    ) -> Result<Ordering, OutOfRange> {
        Position::Ordinal(self).ext_cmp(other, calendar, year)
    }
}

impl Add<u16> for Ordinal {
    type Output = Self;

    fn add(self, rhs: u16) -> Self::Output {
        Self(self.0.saturating_add(rhs))
    }
}

impl Sub<u16> for Ordinal {
    type Output = Self;

    fn sub(self, rhs: u16) -> Self::Output {
        Self(self.0.saturating_sub(rhs))
    }
}

/// A month and day-of-month pair, independent of any particular year.
///
/// Like [`Ordinal`], it is only validated once anchored to a year. The derived ordering is
/// lexicographic on `(month, day)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthDay {
    month: u8,
    day:   u8,
}

impl MonthDay {
    /// Wraps a raw month and day without validation
    pub const fn new(month: u8, day: u8) -> Self {
        Self { month, day }
    }

    /// Returns the month value as u8
    #[inline]
    pub const fn month(self) -> u8 {
        self.month
    }

    /// Returns the day-of-month value as u8
    #[inline]
    pub const fn day(self) -> u8 {
        self.day
    }

    /// Returns both components as `(month, day)`
    pub const fn get(self) -> (u8, u8) {
        (self.month, self.day)
    }

    /// Converts to the day of `year` this month and day denote.
    ///
    /// # Errors
    /// Returns `OutOfRange::Month` or `OutOfRange::Day` when either component does not
    /// exist in `year`.
    pub fn to_ordinal<C: CalendarRules + ?Sized>(
        self,
        calendar: &C,
        year: Year,
    ) -> Result<Ordinal, OutOfRange> {
        calendar.month_day_to_ordinal(year, self.month, self.day)
    }

    /// Checks this month and day against `year` of `calendar`.
    ///
    /// # Errors
    /// Same as [`MonthDay::to_ordinal`].
    pub fn to_month_day<C: CalendarRules + ?Sized>(
        self,
        calendar: &C,
        year: Year,
    ) -> Result<Self, OutOfRange> {
        let max = calendar.days_in_month(year, self.month)?;
        if self.day < MIN_DAY || self.day > max {
            return Err(OutOfRange::Day {
                year: year.get(),
                month: self.month,
                day: self.day,
                max,
            });
        }
        Ok(self)
    }

    /// The ordinal this month and day denote in `year`, as a plain integer.
    ///
    /// # Errors
    /// Same as [`MonthDay::to_ordinal`].
    pub fn canonical_key<C: CalendarRules + ?Sized>(
        self,
        calendar: &C,
        year: Year,
    ) -> Result<u16, OutOfRange> {
        Position::MonthDay(self).canonical_key(calendar, year)
    }

    /// Calendar-aware comparison against either representation. See [`Position::ext_cmp`].
    ///
    /// # Errors
    /// Returns `OutOfRange` if either operand does not exist in `year`.
    pub fn ext_cmp<C: CalendarRules + ?Sized>(
        self,
        other: impl Into<Position>,
        calendar: &C,
        year: Year,
    ) -> Result<Ordering, OutOfRange> {
        Position::MonthDay(self).ext_cmp(other, calendar, year)
    }
}

impl From<(u8, u8)> for MonthDay {
    fn from((month, day): (u8, u8)) -> Self {
        Self::new(month, day)
    }
}

impl From<MonthDay> for (u8, u8) {
    fn from(value: MonthDay) -> Self {
        value.get()
    }
}

/// A position within a year in either representation.
///
/// The derived `PartialEq` is structural: `Ordinal(44)` and `MonthDay(2, 13)` are not equal
/// even when they denote the same day. Use [`Position::ext_cmp`] for calendar-aware equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, From)]
pub enum Position {
    Ordinal(Ordinal),
    MonthDay(MonthDay),
}

impl Position {
    /// Validates against `year` and returns the ordinal form.
    ///
    /// # Errors
    /// Returns `OutOfRange` if the position does not exist in `year`.
    pub fn to_ordinal<C: CalendarRules + ?Sized>(
        self,
        calendar: &C,
        year: Year,
    ) -> Result<Ordinal, OutOfRange> {
        match self {
            Self::Ordinal(ordinal) => ordinal.to_ordinal(calendar, year),
            Self::MonthDay(month_day) => month_day.to_ordinal(calendar, year),
        }
    }

    /// Validates against `year` and returns the month-day form.
    ///
    /// # Errors
    /// Returns `OutOfRange` if the position does not exist in `year`.
    pub fn to_month_day<C: CalendarRules + ?Sized>(
        self,
        calendar: &C,
        year: Year,
    ) -> Result<MonthDay, OutOfRange> {
        match self {
            Self::Ordinal(ordinal) => ordinal.to_month_day(calendar, year),
            Self::MonthDay(month_day) => month_day.to_month_day(calendar, year),
        }
    }

    /// The within-year ordinal used to compare positions regardless of representation.
    ///
    /// # Errors
    /// Returns `OutOfRange` if the position does not exist in `year`.
    pub fn canonical_key<C: CalendarRules + ?Sized>(
        self,
        calendar: &C,
        year: Year,
    ) -> Result<u16, OutOfRange> {
        self.to_ordinal(calendar, year).map(Ordinal::get)
    }

    /// Orders two positions by the day they denote in `year`.
    ///
    /// Both operands are reduced to their canonical key first, so an ordinal and a month-day
    /// naming the same day compare `Equal`.
    ///
    /// # Errors
    /// Returns `OutOfRange` if either operand does not exist in `year`.
    pub fn ext_cmp<C: CalendarRules + ?Sized>(
        self,
        other: impl Into<Self>,
        calendar: &C,
        year: Year,
    ) -> Result<Ordering, OutOfRange> {
        let lhs = self.canonical_key(calendar, year)?;
        let rhs = other.into().canonical_key(calendar, year)?;
        Ok(lhs.cmp(&rhs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{Gregorian, Jalali};

    fn year(value: i32) -> Year {
        Year::new(value).unwrap()
    }

    #[test]
    fn test_year_new_valid() {
        assert!(Year::new(1).is_ok());
        assert!(Year::new(1404).is_ok());
        assert!(Year::new(-1).is_ok());
        assert!(Year::new(i32::MAX).is_ok());
        assert!(Year::new(i32::MIN).is_ok());
    }

    #[test]
    fn test_year_new_invalid_zero() {
        let result = Year::new(0);
        assert!(matches!(result, Err(OutOfRange::Year)));
    }

    #[test]
    fn test_year_get_and_display() {
        let y = year(1404);
        assert_eq!(y.get(), 1404);
        assert_eq!(y.to_string(), "1404");
        assert_eq!(year(-5).to_string(), "-5");
    }

    #[test]
    fn test_year_try_from_i32() {
        let y: Year = 1404.try_into().unwrap();
        assert_eq!(y.get(), 1404);

        let result: Result<Year, _> = 0.try_into();
        assert!(result.is_err());

        let value: i32 = y.into();
        assert_eq!(value, 1404);
    }

    #[test]
    fn test_year_succ_pred_skip_zero() {
        assert_eq!(year(-1).checked_succ(), Some(year(1)));
        assert_eq!(year(1).checked_pred(), Some(year(-1)));
        assert_eq!(year(1403).checked_succ(), Some(year(1404)));
        assert_eq!(year(-7).checked_pred(), Some(year(-8)));
    }

    #[test]
    fn test_year_succ_pred_limits() {
        assert_eq!(year(i32::MAX).checked_succ(), None);
        assert_eq!(year(i32::MIN).checked_pred(), None);
    }

    #[test]
    fn test_year_checked_add() {
        struct TestCase {
            start:    i32,
            years:    i32,
            expected: Option<i32>,
        }

        let cases = [
            TestCase { start: 1403, years: 1, expected: Some(1404) },
            TestCase { start: 1404, years: -1, expected: Some(1403) },
            TestCase { start: 1, years: -1, expected: Some(-1) },
            TestCase { start: -1, years: 1, expected: Some(1) },
            TestCase { start: -3, years: 5, expected: Some(3) },
            TestCase { start: 3, years: -5, expected: Some(-3) },
            TestCase { start: 1404, years: 0, expected: Some(1404) },
            TestCase { start: i32::MAX, years: 1, expected: None },
            TestCase { start: i32::MIN, years: -1, expected: None },
            TestCase { start: i32::MIN, years: i32::MAX, expected: Some(-1) },
            TestCase { start: -1, years: i32::MAX, expected: Some(i32::MAX) },
        ];

        for case in cases {
            assert_eq!(
                year(case.start).checked_add(case.years).map(Year::get),
                case.expected,
                "Year {} + {}",
                case.start,
                case.years
            );
        }
    }

    #[test]
    fn test_year_index_is_gapless() {
        assert_eq!(year(1).index(), 1);
        assert_eq!(year(-1).index(), 0);
        assert_eq!(Year::from_index(0), Some(year(-1)));
        assert_eq!(Year::from_index(Year::MAX.index()), Some(Year::MAX));
        assert_eq!(Year::from_index(Year::MIN.index()), Some(Year::MIN));
        assert_eq!(Year::from_index(Year::MAX.index() + 1), None);
        assert_eq!(Year::from_index(Year::MIN.index() - 1), None);
    }

    #[test]
    fn test_year_ordering() {
        assert!(year(-1) < year(1));
        assert!(year(1403) < year(1404));
    }

    #[test]
    fn test_year_serde() {
        let y = year(1404);
        let json = serde_json::to_string(&y).unwrap();
        assert_eq!(json, "1404");

        let parsed: Year = serde_json::from_str(&json).unwrap();
        assert_eq!(y, parsed);

        let result: Result<Year, _> = serde_json::from_str("0");
        assert!(result.is_err());
    }

    #[test]
    fn test_ordinal_conversions() {
        let ordinal: Ordinal = 44.into();
        assert_eq!(ordinal.get(), 44);
        let raw: u16 = ordinal.into();
        assert_eq!(raw, 44);
        assert_eq!(ordinal.to_string(), "44");
    }

    #[test]
    fn test_ordinal_arithmetic_saturates() {
        assert_eq!(Ordinal::new(44) + 11, Ordinal::new(55));
        assert_eq!(Ordinal::new(5) - 10, Ordinal::new(0));
        assert_eq!(Ordinal::new(u16::MAX) + 1, Ordinal::new(u16::MAX));
    }

    #[test]
    fn test_ordinal_validation_cases() {
        struct TestCase {
            year:        i32,
            ordinal:     u16,
            valid:       bool,
            description: &'static str,
        }

        let cases = [
            TestCase {
                year:        1404,
                ordinal:     1,
                valid:       true,
                description: "first day",
            },
            TestCase {
                year:        1404,
                ordinal:     365,
                valid:       true,
                description: "last day of a common year",
            },
            TestCase {
                year:        1404,
                ordinal:     366,
                valid:       false,
                description: "leap day in a common year",
            },
            TestCase {
                year:        1403,
                ordinal:     366,
                valid:       true,
                description: "leap day in a leap year",
            },
            TestCase {
                year:        1403,
                ordinal:     0,
                valid:       false,
                description: "day zero",
            },
            TestCase {
                year:        1404,
                ordinal:     400,
                valid:       false,
                description: "far past the end of the year",
            },
        ];

        for case in &cases {
            let result = Ordinal::new(case.ordinal).to_ordinal(&Jalali, year(case.year));
            assert_eq!(result.is_ok(), case.valid, "{}", case.description);
        }
    }

    #[test]
    fn test_ordinal_out_of_range_error() {
        let result = Ordinal::new(366).to_ordinal(&Jalali, year(1404));
        assert_eq!(
            result,
            Err(OutOfRange::Ordinal {
                year:    1404,
                ordinal: 366,
                max:     365,
            })
        );
    }

    #[test]
    fn test_ordinal_to_month_day() {
        let md = Ordinal::new(44).to_month_day(&Jalali, year(1404)).unwrap();
        assert_eq!(md, MonthDay::new(2, 13));

        let md = Ordinal::new(60).to_month_day(&Gregorian, year(2024)).unwrap();
        assert_eq!(md, MonthDay::new(2, 29));
    }

    #[test]
    fn test_month_day_accessors() {
        let md = MonthDay::new(2, 13);
        assert_eq!(md.month(), 2);
        assert_eq!(md.day(), 13);
        assert_eq!(md.get(), (2, 13));
        assert_eq!(MonthDay::from((2, 13)), md);
        let pair: (u8, u8) = md.into();
        assert_eq!(pair, (2, 13));
    }

    #[test]
    fn test_month_day_to_ordinal_is_calendar_driven() {
        // first half months have 31 days, so the naive formula happens to agree...
        assert_eq!(
            MonthDay::new(2, 13).to_ordinal(&Jalali, year(1404)),
            Ok(Ordinal::new(44))
        );
        // ...but not once 30-day months are involved
        assert_eq!(
            MonthDay::new(8, 13).to_ordinal(&Jalali, year(1404)),
            Ok(Ordinal::new(229))
        );
        assert_eq!(
            MonthDay::new(2, 13).to_ordinal(&Gregorian, year(2025)),
            Ok(Ordinal::new(44))
        );
        assert_eq!(
            MonthDay::new(3, 1).to_ordinal(&Gregorian, year(2025)),
            Ok(Ordinal::new(60))
        );
    }

    #[test]
    fn test_month_day_validation_errors() {
        assert_eq!(
            MonthDay::new(13, 1).to_month_day(&Jalali, year(1404)),
            Err(OutOfRange::Month { month: 13, max: 12 })
        );
        assert_eq!(
            MonthDay::new(0, 1).to_ordinal(&Jalali, year(1404)),
            Err(OutOfRange::Month { month: 0, max: 12 })
        );
        assert_eq!(
            MonthDay::new(12, 30).to_ordinal(&Jalali, year(1404)),
            Err(OutOfRange::Day {
                year:  1404,
                month: 12,
                day:   30,
                max:   29,
            })
        );
        assert_eq!(
            MonthDay::new(7, 31).to_month_day(&Jalali, year(1403)),
            Err(OutOfRange::Day {
                year:  1403,
                month: 7,
                day:   31,
                max:   30,
            })
        );
        assert!(MonthDay::new(12, 30).to_month_day(&Jalali, year(1403)).is_ok());
        assert!(MonthDay::new(5, 0).to_month_day(&Jalali, year(1403)).is_err());
    }

    #[test]
    fn test_month_day_ordering_is_lexicographic() {
        assert!(MonthDay::new(1, 31) < MonthDay::new(2, 1));
        assert!(MonthDay::new(2, 13) < MonthDay::new(2, 14));
        assert_eq!(MonthDay::new(2, 13).cmp(&MonthDay::new(2, 13)), Ordering::Equal);
    }

    #[test]
    fn test_month_day_serde() {
        let md = MonthDay::new(2, 13);
        let json = serde_json::to_string(&md).unwrap();
        assert_eq!(json, r#"{"month":2,"day":13}"#);

        let parsed: MonthDay = serde_json::from_str(&json).unwrap();
        assert_eq!(md, parsed);

        let ordinal: Ordinal = serde_json::from_str("44").unwrap();
        assert_eq!(ordinal, Ordinal::new(44));
    }

    #[test]
    fn test_canonical_key_matches_across_representations() {
        let y = year(1404);
        assert_eq!(Ordinal::new(44).canonical_key(&Jalali, y), Ok(44));
        assert_eq!(MonthDay::new(2, 13).canonical_key(&Jalali, y), Ok(44));
        assert_eq!(Position::from(MonthDay::new(12, 29)).canonical_key(&Jalali, y), Ok(365));
    }

    #[test]
    fn test_ext_cmp_cross_representation() {
        let y = year(1404);
        let ordinal = Ordinal::new(44);
        let md = MonthDay::new(2, 13);

        assert_eq!(md.ext_cmp(MonthDay::new(2, 13), &Jalali, y), Ok(Ordering::Equal));
        assert_eq!(md.ext_cmp(ordinal, &Jalali, y), Ok(Ordering::Equal));
        assert_eq!(ordinal.ext_cmp(md, &Jalali, y), Ok(Ordering::Equal));
        assert_eq!(ordinal.ext_cmp(MonthDay::new(2, 14), &Jalali, y), Ok(Ordering::Less));
        assert_eq!(
            MonthDay::new(7, 1).ext_cmp(Ordinal::new(186), &Jalali, y),
            Ok(Ordering::Greater)
        );
    }

    #[test]
    fn test_ext_cmp_is_not_structural() {
        let lhs = Position::from(Ordinal::new(44));
        let rhs = Position::from(MonthDay::new(2, 13));
        assert_ne!(lhs, rhs);
        assert_eq!(lhs.ext_cmp(rhs, &Jalali, year(1404)), Ok(Ordering::Equal));
    }

    #[test]
    fn test_ext_cmp_depends_on_calendar() {
        // 8/13 is day 229 in Jalali but day 225 in Gregorian
        let lhs = MonthDay::new(8, 13);
        assert_eq!(lhs.ext_cmp(Ordinal::new(229), &Jalali, year(1404)), Ok(Ordering::Equal));
        assert_eq!(
            lhs.ext_cmp(Ordinal::new(229), &Gregorian, year(2025)),
            Ok(Ordering::Less)
        );
    }

    #[test]
    fn test_ext_cmp_propagates_out_of_range() {
        let y = year(1404);
        assert_eq!(
            Ordinal::new(366).ext_cmp(Ordinal::new(1), &Jalali, y),
            Err(OutOfRange::Ordinal {
                year:    1404,
                ordinal: 366,
                max:     365,
            })
        );
        assert!(Ordinal::new(1).ext_cmp(MonthDay::new(12, 30), &Jalali, y).is_err());
    }

    #[test]
    fn test_position_conversions() {
        let y = year(1403);
        let position = Position::from(Ordinal::new(366));
        assert_eq!(position.to_month_day(&Jalali, y), Ok(MonthDay::new(12, 30)));
        let position = Position::from(MonthDay::new(12, 30));
        assert_eq!(position.to_ordinal(&Jalali, y), Ok(Ordinal::new(366)));
        assert_eq!(position.to_month_day(&Jalali, y), Ok(MonthDay::new(12, 30)));
    }
}
