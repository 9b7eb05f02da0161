//! [`DateAdapter`] over `chrono`'s local wall-clock time.

use crate::AdapterError;
use crate::adapter::DateAdapter;
use crate::config::CalendarConfig;
use crate::consts::{
    DAYS_IN_WEEK, DEFAULT_LOCALE, JAPAN_OFFSET_HOURS, JAPANESE_LOCALE, MAX_DAYS_IN_MONTH,
    MONTHS_IN_YEAR, REFERENCE_YEAR, SECS_PER_HOUR,
};
use crate::format::{DateFormat, NumericStyle};
use crate::locale::{Locale, LocaleState};
use crate::types::{DayOfWeek, NameStyle};
use chrono::{Datelike, Days, Local, NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt;

/// A local date and time, or an invalid date.
///
/// Invalid dates come from arithmetic that leaves the supported calendar
/// range and from [`NativeDate::invalid`]. They decompose to `None` and
/// stay invalid through further arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NativeDate(Option<NaiveDateTime>);

impl NativeDate {
    pub const fn invalid() -> Self {
        Self(None)
    }

    pub const fn is_valid(&self) -> bool {
        self.0.is_some()
    }

    pub const fn as_naive(&self) -> Option<NaiveDateTime> {
        self.0
    }

    /// `YYYY-MM-DD`, or `None` for an invalid date
    pub fn to_iso8601(&self) -> Option<String> {
        self.0.map(|naive| naive.format("%Y-%m-%d").to_string())
    }
}

impl From<NaiveDateTime> for NativeDate {
    fn from(naive: NaiveDateTime) -> Self {
        Self(Some(naive))
    }
}

impl From<NaiveDate> for NativeDate {
    fn from(date: NaiveDate) -> Self {
        Self(Some(date.and_time(NaiveTime::MIN)))
    }
}

impl fmt::Display for NativeDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(naive) => write!(f, "{naive}"),
            None => f.write_str("Invalid Date"),
        }
    }
}

/// Date adapter backed by `chrono`.
#[derive(Debug)]
pub struct NativeDateAdapter {
    config: CalendarConfig,
    locale: LocaleState<Locale>,
}

impl NativeDateAdapter {
    /// Creates an adapter whose locale is picked from the local UTC offset.
    pub fn new(config: CalendarConfig) -> Self {
        Self::with_utc_offset(config, Local::now().offset().local_minus_utc())
    }

    /// Creates an adapter whose locale is picked from `offset_secs`, the
    /// local offset from UTC in seconds: Japanese when it is exactly 9 hours
    /// either way, US English otherwise.
    pub fn with_utc_offset(config: CalendarConfig, offset_secs: i32) -> Self {
        let tag = detect_locale(offset_secs);
        log::debug!("Detected locale {tag} from UTC offset {offset_secs}s");
        Self::with_locale(config, Locale::new(tag))
    }

    /// Creates an adapter using the locale named in `config`.
    pub fn with_configured_locale(config: CalendarConfig) -> Self {
        let locale = Locale::new(config.locale.as_str());
        Self::with_locale(config, locale)
    }

    pub fn with_locale(config: CalendarConfig, locale: Locale) -> Self {
        Self {
            config,
            locale: LocaleState::new(locale),
        }
    }

    pub const fn config(&self) -> &CalendarConfig {
        &self.config
    }

    pub const fn is_valid(&self, date: &NativeDate) -> bool {
        date.is_valid()
    }

    pub const fn invalid(&self) -> NativeDate {
        NativeDate::invalid()
    }

    pub const fn clone_date(&self, date: &NativeDate) -> NativeDate {
        *date
    }

    /// Parses `YYYY-MM-DD` (as midnight) or `YYYY-MM-DDTHH:MM:SS[.fff]`.
    ///
    /// # Errors
    /// Returns `AdapterError::Unparseable` if `value` is neither.
    pub fn parse_iso8601(&self, value: &str) -> Result<NativeDate, AdapterError> {
        let value = value.trim();
        NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map(NativeDate::from)
            .or_else(|_| value.parse::<NaiveDateTime>().map(NativeDate::from))
            .map_err(|_| AdapterError::Unparseable(value.to_owned()))
    }

    /// Formats `date` by copying its local fields into the UTC fields of a
    /// shadow value and formatting that, so no daylight-saving rule can move
    /// it to another day.
    fn format_shadow(&self, date: NaiveDateTime, format: &DateFormat) -> String {
        format.render(&date.and_utc(), self.locale())
    }

    /// Formats reference dates in `REFERENCE_YEAR`, given as (0-indexed month, day).
    fn reference_names(
        &self,
        dates: impl IntoIterator<Item = (i32, i32)>,
        format: &DateFormat,
    ) -> Vec<String> {
        dates
            .into_iter()
            .filter_map(|(month, day)| {
                create_date_with_overflow(REFERENCE_YEAR, month, day).as_naive()
            })
            .map(|naive| self.format_shadow(naive, format))
            .collect()
    }
}

impl Default for NativeDateAdapter {
    fn default() -> Self {
        Self::new(CalendarConfig::default())
    }
}

impl DateAdapter<NativeDate> for NativeDateAdapter {
    type Locale = Locale;

    fn locale_state(&self) -> &LocaleState<Locale> {
        &self.locale
    }

    fn locale_state_mut(&mut self) -> &mut LocaleState<Locale> {
        &mut self.locale
    }

    fn year(&self, date: &NativeDate) -> Option<i32> {
        date.0.map(|naive| naive.year())
    }

    fn month(&self, date: &NativeDate) -> Option<u32> {
        date.0.map(|naive| naive.month0())
    }

    fn day_of_month(&self, date: &NativeDate) -> Option<u32> {
        date.0.map(|naive| naive.day())
    }

    fn day_of_week(&self, date: &NativeDate) -> Option<u32> {
        date.0
            .map(|naive| u32::from(DayOfWeek::from(naive.weekday()).get()))
    }

    fn month_names(&self, style: NameStyle) -> Vec<String> {
        let format = DateFormat::new().with_month(style.into());
        self.reference_names((0..MONTHS_IN_YEAR).map(|month| (month, 1)), &format)
    }

    fn date_names(&self) -> Vec<String> {
        let format = DateFormat::new().with_day(NumericStyle::Numeric);
        self.reference_names((1..=MAX_DAYS_IN_MONTH).map(|day| (0, day)), &format)
    }

    fn day_of_week_names(&self, style: NameStyle) -> Vec<String> {
        // January 1st of the reference year is a Sunday
        let format = DateFormat::new().with_weekday(style);
        self.reference_names((1..=DAYS_IN_WEEK).map(|day| (0, day)), &format)
    }

    fn year_name(&self, date: &NativeDate) -> Result<String, AdapterError> {
        self.format(date, &DateFormat::new().with_year(NumericStyle::Numeric))
    }

    fn first_day_of_week(&self) -> u32 {
        u32::from(self.config.first_day_of_week().get())
    }

    fn num_days_in_month(&self, date: &NativeDate) -> Option<u32> {
        let (year, month, _) = fields(date)?;
        // Day 0 of the next month is the last day of this one
        self.day_of_month(&create_date_with_overflow(year, month.checked_add(1)?, 0))
    }

    fn create_date(&self, year: i32, month: i32, date: i32) -> NativeDate {
        create_date_with_overflow(year, month, date)
    }

    fn today(&self) -> NativeDate {
        Local::now().naive_local().into()
    }

    fn add_calendar_months(&self, date: &NativeDate, months: i32) -> NativeDate {
        let Some((year, month, day)) = fields(date) else {
            return NativeDate::invalid();
        };
        let Some(target) = month.checked_add(months) else {
            return NativeDate::invalid();
        };
        let shifted = create_date_with_overflow(year, target, day);

        // A day past the end of the target month spills into the following
        // month; go back to the last day of the target month instead.
        match fields(&shifted) {
            Some((year, month, _)) if month != target.rem_euclid(MONTHS_IN_YEAR) => {
                create_date_with_overflow(year, month, 0)
            }
            _ => shifted,
        }
    }

    fn add_calendar_days(&self, date: &NativeDate, days: i32) -> NativeDate {
        fields(date)
            .and_then(|(year, month, day)| {
                day.checked_add(days)
                    .map(|day| create_date_with_overflow(year, month, day))
            })
            .unwrap_or_else(NativeDate::invalid)
    }

    fn format(&self, date: &NativeDate, format: &DateFormat) -> Result<String, AdapterError> {
        let naive = date.0.ok_or(AdapterError::InvalidDate)?;
        Ok(self.format_shadow(naive, format))
    }
}

/// Builds midnight of `year`/`month`/`date` by field arithmetic, letting the
/// month and day overflow in either direction.
///
/// `month` is 0-indexed; 12 is January of the next year and -1 is December
/// of the previous one. `date` counts from the first of that month; 0 is the
/// last day of the previous month. The year is never reinterpreted (89 stays
/// the year 89). Results outside `chrono`'s range are invalid.
pub(crate) fn create_date_with_overflow(year: i32, month: i32, date: i32) -> NativeDate {
    year.checked_add(month.div_euclid(MONTHS_IN_YEAR))
        .and_then(|year| {
            NaiveDate::from_ymd_opt(year, month.rem_euclid(MONTHS_IN_YEAR).unsigned_abs() + 1, 1)
        })
        .and_then(|first| shift_days(first, i64::from(date) - 1))
        .map(NativeDate::from)
        .unwrap_or_else(NativeDate::invalid)
}

fn shift_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    let magnitude = Days::new(days.unsigned_abs());
    if days >= 0 {
        date.checked_add_days(magnitude)
    } else {
        date.checked_sub_days(magnitude)
    }
}

/// (year, 0-indexed month, day of month) of a valid date
fn fields(date: &NativeDate) -> Option<(i32, i32, i32)> {
    let naive = date.as_naive()?;
    Some((
        naive.year(),
        i32::try_from(naive.month0()).ok()?,
        i32::try_from(naive.day()).ok()?,
    ))
}

fn detect_locale(offset_secs: i32) -> &'static str {
    let japan = JAPAN_OFFSET_HOURS * SECS_PER_HOUR;
    if offset_secs == japan || offset_secs == -japan {
        JAPANESE_LOCALE
    } else {
        DEFAULT_LOCALE
    }
}
