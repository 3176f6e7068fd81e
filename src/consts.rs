/// Months in a Jalali year
pub const MONTHS_IN_YEAR: u8 = 12;

/// First day of month, used for lower bounds
pub(crate) const MIN_DAY: u8 = 1;

/// First ordinal of any year
pub const MIN_ORDINAL: u16 = 1;

/// Days in each of the first six Jalali months (Farvardin to Shahrivar)
pub(crate) const FIRST_HALF_MONTH_DAYS: u8 = 31;
/// Days in months seven to eleven (Mehr to Bahman)
pub(crate) const SECOND_HALF_MONTH_DAYS: u8 = 30;
/// Days in Esfand outside leap years
pub(crate) const ESFAND_DAYS: u8 = 29;
/// Days in Esfand in leap years
pub(crate) const ESFAND_DAYS_LEAP: u8 = 30;

/// Month number of Mehr, the first month of the second half of the year
pub(crate) const MEHR: u8 = 7;
/// Month number of Esfand, the only month whose length depends on the year
pub(crate) const ESFAND: u8 = 12;

/// Ordinal of the last day of Shahrivar (6/31)
pub(crate) const FIRST_HALF_LAST_ORDINAL: u16 = 186;

/// Days in a common year
pub const DAYS_IN_COMMON_YEAR: u16 = 365;
/// Days in a leap year
pub const DAYS_IN_LEAP_YEAR: u16 = 366;

/// Jalali year containing Gregorian 1970-01-01
pub const JALALI_EPOCH_YEAR: i32 = 1348;
/// Ordinal of Gregorian 1970-01-01 within [`JALALI_EPOCH_YEAR`] (10/11, Dey 11th)
pub const JALALI_EPOCH_ORDINAL: u16 = 287;

/// Length of the arithmetic leap cycle
pub(crate) const JALALI_CYCLE_YEARS: i64 = 33;
/// Leap years per [`JALALI_CYCLE_YEARS`]
pub(crate) const JALALI_CYCLE_LEAPS: i64 = 8;
/// Years `0..y` hold `(8 * y + 21) / 33` leap years under the 33-year rule (floored)
pub(crate) const JALALI_LEAP_COUNT_OFFSET: i64 = 21;

/// Years the 33-year rule marks as leap but which are not.
///
/// The year following each of them is leap although the rule says otherwise. The table
/// matches the astronomical calendar on the 52.5°E meridian from 1178 to 3000 AP.
pub const NON_LEAP_CORRECTION: [i32; 78] = [
    1502, 1601, 1634, 1667, 1700, 1733, 1766, 1799, 1832, 1865, 1898, 1931, 1964, 1997, 2030,
    2059, 2063, 2096, 2129, 2158, 2162, 2191, 2195, 2224, 2228, 2257, 2261, 2290, 2294, 2323,
    2327, 2356, 2360, 2389, 2393, 2422, 2426, 2455, 2459, 2488, 2492, 2521, 2525, 2554, 2558,
    2587, 2591, 2620, 2624, 2653, 2657, 2686, 2690, 2719, 2723, 2748, 2752, 2756, 2781, 2785,
    2789, 2818, 2822, 2847, 2851, 2855, 2880, 2884, 2888, 2913, 2917, 2921, 2946, 2950, 2954,
    2979, 2983, 2987,
];

/// Month number for February
pub(crate) const FEBRUARY: u8 = 2;

/// Days in February for leap years
pub(crate) const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each Gregorian month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub(crate) const GREGORIAN_DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: i32 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: i32 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: i32 = 400;

/// Gregorian year of the Unix epoch
pub(crate) const GREGORIAN_EPOCH_YEAR: i32 = 1970;

/// Seconds in a calendar day, leap seconds ignored
pub(crate) const SECONDS_PER_DAY: u64 = 86_400;
