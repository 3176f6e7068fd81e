//! Comparison across representations.
//!
//! Ordinals, month-days, positions and dates are all reduced to the same `(year, ordinal)`
//! key before comparing, so the question is always "which day comes first", never "which
//! representation was used".

use crate::calendar::CalendarRules;
use crate::types::{MonthDay, Ordinal, Position, Year};
use crate::{Date, OutOfRange};
use std::cmp::Ordering;

/// A value that denotes a calendar day once anchored to a year of calendar `C`.
pub trait Canonical<C: CalendarRules + ?Sized> {
    /// The `(year, ordinal)` this value denotes.
    ///
    /// Year-agnostic values use `year`; values that carry their own year ignore it.
    ///
    /// # Errors
    /// Returns `OutOfRange` if the value does not exist in the year it is anchored to.
    fn canonical(&self, calendar: &C, year: Year) -> Result<(Year, Ordinal), OutOfRange>;
}

impl<C: CalendarRules + ?Sized> Canonical<C> for Ordinal {
    fn canonical(&self, calendar: &C, year: Year) -> Result<(Year, Ordinal), OutOfRange> {
        Ok((year, self.to_ordinal(calendar, year)?))
    }
}

impl<C: CalendarRules + ?Sized> Canonical<C> for MonthDay {
    fn canonical(&self, calendar: &C, year: Year) -> Result<(Year, Ordinal), OutOfRange> {
        Ok((year, self.to_ordinal(calendar, year)?))
    }
}

impl<C: CalendarRules + ?Sized> Canonical<C> for Position {
    fn canonical(&self, calendar: &C, year: Year) -> Result<(Year, Ordinal), OutOfRange> {
        Ok((year, self.to_ordinal(calendar, year)?))
    }
}

impl<C: CalendarRules> Canonical<C> for Date<C> {
    fn canonical(&self, _calendar: &C, _year: Year) -> Result<(Year, Ordinal), OutOfRange> {
        Ok((self.year(), self.ordinal()))
    }
}

/// Orders any two values by the calendar day they denote.
///
/// Year-agnostic operands are anchored to `year`; dates keep their own year. Two values
/// of different shapes that denote the same day compare `Equal`.
///
/// # Errors
/// Returns `OutOfRange` if an operand does not exist in the year it is anchored to.
pub fn ext_cmp<C, A, B>(calendar: &C, year: Year, a: &A, b: &B) -> Result<Ordering, OutOfRange>
where
    C: CalendarRules + ?Sized,
    A: Canonical<C> + ?Sized,
    B: Canonical<C> + ?Sized,
{
    let lhs = a.canonical(calendar, year)?;
    let rhs = b.canonical(calendar, year)?;
    Ok(lhs.cmp(&rhs))
}
