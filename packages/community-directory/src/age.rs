//! Calendar age calculation.

use chrono::{Datelike, NaiveDate};

/// Whole years between `birth_date` and `as_of`.
///
/// A birthday not yet reached in `as_of`'s year does not count. A birth date
/// after `as_of` yields a negative number; callers decide how to surface that.
pub fn age_in_years(birth_date: NaiveDate, as_of: NaiveDate) -> i32 {
    let mut age = as_of.year() - birth_date.year();
    if (as_of.month(), as_of.day()) < (birth_date.month(), birth_date.day()) {
        age -= 1;
    }
    age
}
