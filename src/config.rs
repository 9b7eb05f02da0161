use crate::consts::{DEFAULT_LOCALE, MONDAY};
use crate::format::{DateFormat, MonthStyle};
use crate::types::DayOfWeek;
use serde::{Deserialize, Serialize};

/// Error type for calendar configuration values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Weekday index outside 0-6.
    #[error("Invalid day of week: {0} (must be 0-6, Sunday = 0)")]
    InvalidDayOfWeek(u8),
}

/// Hints for turning user input into dates. Carried through, not interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParseConfig {
    pub date_input: Option<DateFormat>,
}

/// Formats used when displaying dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DisplayConfig {
    pub date_input:            DateFormat,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month_label:           Option<DateFormat>,
    pub month_year_label:      DateFormat,
    pub date_a11y_label:       DateFormat,
    pub month_year_a11y_label: DateFormat,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            date_input:            DateFormat::numeric_date(),
            month_label:           None,
            month_year_label:      DateFormat::month_year(MonthStyle::Short),
            date_a11y_label:       DateFormat::long_date(),
            month_year_a11y_label: DateFormat::month_year(MonthStyle::Long),
        }
    }
}

/// Static configuration handed to an adapter when it is built.
///
/// Never mutated after construction; [`with_overrides`](Self::with_overrides)
/// derives a new value instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CalendarConfig {
    pub parse:             ParseConfig,
    pub display:           DisplayConfig,
    pub first_day_of_week: Option<DayOfWeek>,
    pub locale:            String,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            parse:             ParseConfig::default(),
            display:           DisplayConfig::default(),
            first_day_of_week: Some(DayOfWeek::new(MONDAY).unwrap_or_default()),
            locale:            DEFAULT_LOCALE.to_owned(),
        }
    }
}

/// A partial configuration. Present fields replace the matching top-level
/// field of the base config wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConfigOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse:             Option<ParseConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display:           Option<DisplayConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_day_of_week: Option<DayOfWeek>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale:            Option<String>,
}

impl CalendarConfig {
    /// Returns a new config with `overrides` applied on top of this one.
    pub fn with_overrides(&self, overrides: ConfigOverride) -> Self {
        Self {
            parse:             overrides.parse.unwrap_or(self.parse),
            display:           overrides.display.unwrap_or(self.display),
            first_day_of_week: overrides.first_day_of_week.or(self.first_day_of_week),
            locale:            overrides.locale.unwrap_or_else(|| self.locale.clone()),
        }
    }

    /// The configured first day of the week, Sunday when unset
    pub fn first_day_of_week(&self) -> DayOfWeek {
        self.first_day_of_week.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SUNDAY;
    use crate::format::NumericStyle;

    #[test]
    fn test_defaults() {
        let config = CalendarConfig::default();
        assert_eq!(config.locale, "en-US");
        assert_eq!(config.first_day_of_week().get(), MONDAY);
        assert_eq!(config.parse.date_input, None);
        assert_eq!(config.display.date_input, DateFormat::numeric_date());
        assert_eq!(
            config.display.month_year_label,
            DateFormat::new()
                .with_year(NumericStyle::Numeric)
                .with_month(MonthStyle::Short)
        );
        assert_eq!(config.display.date_a11y_label, DateFormat::long_date());
        assert_eq!(
            config.display.month_year_a11y_label,
            DateFormat::month_year(MonthStyle::Long)
        );
        assert_eq!(config.display.month_label, None);
    }

    #[test]
    fn test_unset_first_day_is_sunday() {
        let config = CalendarConfig {
            first_day_of_week: None,
            ..CalendarConfig::default()
        };
        assert_eq!(config.first_day_of_week().get(), SUNDAY);
    }

    #[test]
    fn test_overrides_build_new_config() {
        let base = CalendarConfig::default();
        let derived = base.with_overrides(ConfigOverride {
            first_day_of_week: Some(DayOfWeek::new(SUNDAY).unwrap()),
            locale: Some("de-DE".to_owned()),
            ..ConfigOverride::default()
        });

        assert_eq!(derived.locale, "de-DE");
        assert_eq!(derived.first_day_of_week().get(), SUNDAY);
        assert_eq!(derived.display, base.display);
        // base untouched
        assert_eq!(base, CalendarConfig::default());
    }

    #[test]
    fn test_override_replaces_display_wholesale() {
        let display = DisplayConfig {
            month_label: Some(DateFormat::new().with_month(MonthStyle::Narrow)),
            ..DisplayConfig::default()
        };
        let derived = CalendarConfig::default().with_overrides(ConfigOverride {
            display: Some(display),
            ..ConfigOverride::default()
        });
        assert_eq!(derived.display, display);
    }

    #[test]
    fn test_empty_override_is_identity() {
        let base = CalendarConfig::default();
        assert_eq!(base.with_overrides(ConfigOverride::default()), base);
    }

    #[test]
    fn test_load_from_json() {
        let json = r#"{
            "parse": { "dateInput": null },
            "display": {
                "dateInput": { "year": "numeric", "month": "numeric", "day": "numeric" },
                "monthYearLabel": { "year": "numeric", "month": "short" },
                "dateA11yLabel": { "year": "numeric", "month": "long", "day": "numeric" },
                "monthYearA11yLabel": { "year": "numeric", "month": "long" }
            },
            "firstDayOfWeek": 1,
            "locale": "en-US"
        }"#;
        let config: CalendarConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config, CalendarConfig::default());
    }

    #[test]
    fn test_load_partial_json_uses_defaults() {
        let config: CalendarConfig = serde_json::from_str(r#"{ "locale": "ja-JP" }"#).unwrap();
        assert_eq!(config.locale, "ja-JP");
        assert_eq!(config.display, DisplayConfig::default());
        assert_eq!(config.first_day_of_week().get(), MONDAY);
    }

    #[test]
    fn test_load_rejects_bad_first_day() {
        let result: Result<CalendarConfig, _> = serde_json::from_str(r#"{ "firstDayOfWeek": 7 }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_override_from_json() {
        let overrides: ConfigOverride =
            serde_json::from_str(r#"{ "firstDayOfWeek": 0 }"#).unwrap();
        let derived = CalendarConfig::default().with_overrides(overrides);
        assert_eq!(derived.first_day_of_week().get(), SUNDAY);
        assert_eq!(derived.locale, DEFAULT_LOCALE);
    }
}
