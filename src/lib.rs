//! Locale-aware calendar arithmetic and naming for calendar widgets.
//!
//! [`DateAdapter`] is the contract a calendar view programs against: take a
//! date apart, name months and weekdays, step through the calendar and
//! format dates. [`NativeDateAdapter`] implements it on top of `chrono`.
//!
//! ```
//! use date_adapter::{CalendarConfig, DateAdapter, Locale, NameStyle, NativeDateAdapter};
//!
//! let adapter = NativeDateAdapter::with_locale(CalendarConfig::default(), Locale::new("en-US"));
//! let jan31 = adapter.create_date(2017, 0, 31);
//! let feb = adapter.add_calendar_months(&jan31, 1);
//! assert_eq!(adapter.day_of_month(&feb), Some(28));
//! assert_eq!(adapter.month_names(NameStyle::Short)[1], "Feb");
//! ```

mod adapter;
mod config;
mod consts;
mod format;
mod locale;
mod native;
mod prelude;
mod types;

pub use adapter::DateAdapter;
pub use config::{CalendarConfig, ConfigError, ConfigOverride, DisplayConfig, ParseConfig};
pub use consts::*;
pub use format::{DateFormat, MonthStyle, NumericStyle};
pub use locale::{Locale, LocaleChanges, LocaleState, Subscription};
pub use native::{NativeDate, NativeDateAdapter};
pub use types::{DayOfWeek, NameStyle};

/// Error type for adapter operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdapterError {
    /// The date has no valid point in time behind it.
    #[error("Cannot format invalid date")]
    InvalidDate,

    /// Text that isn't an ISO-8601 date or date-time.
    #[error("Not an ISO-8601 date: {0:?}")]
    Unparseable(String),
}
