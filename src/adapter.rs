use crate::AdapterError;
use crate::format::DateFormat;
use crate::locale::{LocaleChanges, LocaleState};
use crate::types::NameStyle;
use std::cmp::Ordering;

/// Calendar decomposition, naming and arithmetic over a date type `D`.
///
/// Months are 0-indexed (0 = January) and weekdays are 0-indexed with
/// Sunday as 0. Decomposition returns `None` for dates the implementation
/// considers invalid.
///
/// The locale is adapter-wide state. Implementations own a [`LocaleState`]
/// and expose it through [`locale_state`](Self::locale_state); changing it
/// through [`set_locale`](Self::set_locale) notifies every subscriber once.
pub trait DateAdapter<D> {
    type Locale: 'static;

    fn locale_state(&self) -> &LocaleState<Self::Locale>;

    fn locale_state_mut(&mut self) -> &mut LocaleState<Self::Locale>;

    /// The locale used for all names and formatting
    fn locale(&self) -> &Self::Locale {
        self.locale_state().locale()
    }

    /// Replaces the locale and emits one notification on the change channel.
    fn set_locale(&mut self, locale: Self::Locale) {
        self.locale_state_mut().replace(locale);
    }

    /// Subscription point for locale changes
    fn locale_changes_mut(&mut self) -> &mut LocaleChanges {
        self.locale_state_mut().changes_mut()
    }

    fn year(&self, date: &D) -> Option<i32>;

    /// Month of the date, 0-11
    fn month(&self, date: &D) -> Option<u32>;

    /// Day of the month, 1-31
    fn day_of_month(&self, date: &D) -> Option<u32>;

    /// Day of the week, 0-6 with Sunday as 0
    fn day_of_week(&self, date: &D) -> Option<u32>;

    /// The twelve month names, starting with January.
    fn month_names(&self, style: NameStyle) -> Vec<String>;

    /// The names of the 31 possible dates of a month, starting with "1".
    fn date_names(&self) -> Vec<String>;

    /// The seven weekday names, starting with Sunday.
    fn day_of_week_names(&self, style: NameStyle) -> Vec<String>;

    /// The display name of the date's year (`2017`, `2017年`).
    ///
    /// # Errors
    /// Returns `AdapterError::InvalidDate` if `date` is invalid.
    fn year_name(&self, date: &D) -> Result<String, AdapterError>;

    /// Configured first day of the week, 0-6 with Sunday as 0
    fn first_day_of_week(&self) -> u32;

    fn num_days_in_month(&self, date: &D) -> Option<u32>;

    /// Creates a date at midnight. `month` is 0-indexed and `date` is the day
    /// of the month; both are expected to be in range. Years are literal
    /// (89 is the year 89).
    fn create_date(&self, year: i32, month: i32, date: i32) -> D;

    /// The current date and time
    fn today(&self) -> D;

    /// Adds years as if flipping twelve calendar pages per year and then
    /// taking the closest date in that month: Feb 29, 2016 plus one year is
    /// Feb 28, 2017.
    fn add_calendar_years(&self, date: &D, years: i32) -> D {
        self.add_calendar_months(date, years.saturating_mul(12))
    }

    /// Adds months as if flipping calendar pages and then taking the closest
    /// date in the new month: Jan 31, 2017 plus one month is Feb 28, 2017.
    fn add_calendar_months(&self, date: &D, months: i32) -> D;

    /// Adds days as if moving one calendar cell per day.
    fn add_calendar_days(&self, date: &D, days: i32) -> D;

    /// Formats the date with the current locale.
    ///
    /// # Errors
    /// Returns `AdapterError::InvalidDate` if `date` is invalid.
    fn format(&self, date: &D, format: &DateFormat) -> Result<String, AdapterError>;

    /// Orders two dates by calendar day, ignoring the time of day. `None` if
    /// either date is invalid.
    fn compare_date(&self, first: &D, second: &D) -> Option<Ordering> {
        let key = |date: &D| Some((self.year(date)?, self.month(date)?, self.day_of_month(date)?));
        Some(key(first)?.cmp(&key(second)?))
    }

    /// True if both dates are valid and fall on the same calendar day.
    fn same_date(&self, first: &D, second: &D) -> bool {
        self.compare_date(first, second) == Some(Ordering::Equal)
    }

    /// Moves `date` into `[min, max]` by calendar day; unset bounds are open.
    fn clamp_date(&self, date: &D, min: Option<&D>, max: Option<&D>) -> D
    where
        D: Clone,
    {
        match (min, max) {
            (Some(min), _) if self.compare_date(date, min) == Some(Ordering::Less) => min.clone(),
            (_, Some(max)) if self.compare_date(date, max) == Some(Ordering::Greater) => {
                max.clone()
            }
            _ => date.clone(),
        }
    }
}
