//! Display format options and their locale-aware rendering.
//!
//! A [`DateFormat`] names which fields to show and how, in the same shape as
//! a host formatter's option bag (`{ year: "numeric", month: "short" }`). The
//! field order and the text between fields come from the locale, see
//! [`FieldLayout`].

use crate::consts::{REFERENCE_YEAR, SAMPLE_DAY, SAMPLE_MONTH};
use crate::locale::Locale;
use crate::types::NameStyle;
use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

/// How a numeric field is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NumericStyle {
    /// `7`, `2017`
    #[serde(rename = "numeric")]
    Numeric,
    /// `07`, `17`
    #[serde(rename = "2-digit")]
    TwoDigit,
}

/// How the month is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MonthStyle {
    #[serde(rename = "numeric")]
    Numeric,
    #[serde(rename = "2-digit")]
    TwoDigit,
    #[serde(rename = "long")]
    Long,
    #[serde(rename = "short")]
    Short,
    #[serde(rename = "narrow")]
    Narrow,
}

impl From<NameStyle> for MonthStyle {
    fn from(style: NameStyle) -> Self {
        match style {
            NameStyle::Long => Self::Long,
            NameStyle::Short => Self::Short,
            NameStyle::Narrow => Self::Narrow,
        }
    }
}

impl MonthStyle {
    /// Whether the month is written as a name rather than a number
    pub const fn is_textual(self) -> bool {
        matches!(self, Self::Long | Self::Short | Self::Narrow)
    }
}

/// Which date fields to display, and in what style.
///
/// Fields left as `None` are omitted. A format with no fields at all renders
/// like [`DateFormat::numeric_date`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DateFormat {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekday: Option<NameStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<NumericStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<MonthStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<NumericStyle>,
}

impl DateFormat {
    /// An empty format
    pub const fn new() -> Self {
        Self {
            weekday: None,
            year: None,
            month: None,
            day: None,
        }
    }

    /// `{ year: numeric, month: numeric, day: numeric }`
    pub const fn numeric_date() -> Self {
        Self::new()
            .with_year(NumericStyle::Numeric)
            .with_month(MonthStyle::Numeric)
            .with_day(NumericStyle::Numeric)
    }

    /// `{ year: numeric, month: <style> }`
    pub const fn month_year(month: MonthStyle) -> Self {
        Self::new().with_year(NumericStyle::Numeric).with_month(month)
    }

    /// `{ year: numeric, month: long, day: numeric }`
    pub const fn long_date() -> Self {
        Self::month_year(MonthStyle::Long).with_day(NumericStyle::Numeric)
    }

    pub const fn with_weekday(mut self, style: NameStyle) -> Self {
        self.weekday = Some(style);
        self
    }

    pub const fn with_year(mut self, style: NumericStyle) -> Self {
        self.year = Some(style);
        self
    }

    pub const fn with_month(mut self, style: MonthStyle) -> Self {
        self.month = Some(style);
        self
    }

    pub const fn with_day(mut self, style: NumericStyle) -> Self {
        self.day = Some(style);
        self
    }

    /// True if no field is selected
    pub const fn is_empty(&self) -> bool {
        self.weekday.is_none() && self.year.is_none() && self.month.is_none() && self.day.is_none()
    }

    /// Renders `shadow` in `locale`.
    ///
    /// `shadow` carries the wall-clock fields of the date being displayed in
    /// its UTC fields, so no time zone rule can move it to another day.
    pub(crate) fn render(&self, shadow: &DateTime<Utc>, locale: &Locale) -> String {
        let format = if self.is_empty() {
            Self::numeric_date()
        } else {
            *self
        };
        let layout = locale.layout();
        let parts: Vec<(Field, String, &str)> = layout
            .fields
            .iter()
            .filter_map(|(field, text)| {
                format
                    .field_value(*field, shadow, locale)
                    .map(|value| (*field, value, text.as_str()))
            })
            .collect();

        let mut out = String::new();
        if layout.suffixed {
            for (_, value, text) in &parts {
                out.push_str(value);
                // Month names such as "11月" already carry the suffix
                let mark = text.trim_end();
                if !mark.is_empty() && value.ends_with(mark) {
                    out.push_str(&text[mark.len()..]);
                } else {
                    out.push_str(text);
                }
            }
            out.truncate(out.trim_end().len());
            if let Some(style) = format.weekday {
                if !out.is_empty() && layout.spaced() {
                    out.push(' ');
                }
                out.push_str(&weekday_name(shadow, locale, style));
            }
            return out;
        }

        let textual = format.month.is_some_and(MonthStyle::is_textual);
        for (i, (field, value, _)) in parts.iter().enumerate() {
            if let Some((prev_field, _, prev_text)) = i.checked_sub(1).and_then(|p| parts.get(p)) {
                let separator = match (textual, prev_field, field) {
                    (true, Field::Day, Field::Year) => ", ",
                    (true, _, _) => " ",
                    (false, _, _) => *prev_text,
                };
                out.push_str(separator);
            }
            out.push_str(value);
            // "22. November", "2017. november 22."
            if textual && layout.is_marked(*field) {
                out.push('.');
            }
        }
        if !textual {
            // closing mark of the locale's pattern, `22.11.2017.`
            if let Some((_, _, text)) = parts.last().filter(|(field, ..)| layout.is_last(*field)) {
                out.push_str(text.trim_end());
            }
        }
        match format.weekday {
            Some(style) if out.is_empty() => weekday_name(shadow, locale, style),
            Some(style) => format!("{}, {out}", weekday_name(shadow, locale, style)),
            None => out,
        }
    }

    fn field_value(&self, field: Field, shadow: &DateTime<Utc>, locale: &Locale) -> Option<String> {
        match field {
            Field::Year => self.year.map(|style| match style {
                NumericStyle::Numeric => shadow.year().to_string(),
                NumericStyle::TwoDigit => format!("{:02}", shadow.year().rem_euclid(100)),
            }),
            Field::Month => self.month.map(|style| {
                // Without a day the month stands alone: "styczeń", not "stycznia"
                let (long, short) = if self.day.is_none() {
                    (locale.standalone_months(), locale.standalone_short_months())
                } else {
                    (None, None)
                };
                match style {
                    MonthStyle::Numeric => shadow.month().to_string(),
                    MonthStyle::TwoDigit => format!("{:02}", shadow.month()),
                    MonthStyle::Long => month_name(shadow, locale, "%B", long),
                    MonthStyle::Short => month_name(shadow, locale, "%b", short),
                    MonthStyle::Narrow => narrow(
                        &month_name(shadow, locale, "%B", long),
                        &month_name(shadow, locale, "%b", short),
                    ),
                }
            }),
            Field::Day => self.day.map(|style| match style {
                NumericStyle::Numeric => shadow.day().to_string(),
                NumericStyle::TwoDigit => format!("{:02}", shadow.day()),
            }),
        }
    }
}

fn weekday_name(shadow: &DateTime<Utc>, locale: &Locale, style: NameStyle) -> String {
    match style {
        NameStyle::Long => localized(shadow, locale, "%A"),
        NameStyle::Short => localized(shadow, locale, "%a"),
        NameStyle::Narrow => narrow(
            &localized(shadow, locale, "%A"),
            &localized(shadow, locale, "%a"),
        ),
    }
}

/// The month of `shadow` from `names` if given, otherwise as `pattern` formats it.
fn month_name(
    shadow: &DateTime<Utc>,
    locale: &Locale,
    pattern: &str,
    names: Option<&[&str]>,
) -> String {
    usize::try_from(shadow.month0())
        .ok()
        .and_then(|index| names?.get(index))
        .map_or_else(|| localized(shadow, locale, pattern), |name| name.trim().to_owned())
}

fn localized(shadow: &DateTime<Utc>, locale: &Locale, pattern: &str) -> String {
    shadow
        .format_localized(pattern, locale.host())
        .to_string()
        .trim()
        .to_owned()
}

/// First letter of the long name, or the whole short name when it is a
/// number ("1月").
fn narrow(long: &str, short: &str) -> String {
    match long.chars().next() {
        Some(c) if !c.is_numeric() => c.to_uppercase().collect(),
        _ => short.to_owned(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Field {
    Year,
    Month,
    Day,
}

/// The order of year, month and day in a locale, and the text that follows
/// each one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FieldLayout {
    fields: Vec<(Field, String)>,
    /// Fields carry their own suffix (`2017年11月22日`) instead of separators
    suffixed: bool,
    /// Numeric fields written with a trailing full stop next to a month name
    marks: Vec<Field>,
}

impl FieldLayout {
    /// Learns the layout from a locale's rendering of the sample date.
    /// Returns `None` unless the year, month and day all appear as numbers.
    pub(crate) fn from_sample(sample: &str) -> Option<Self> {
        let mut fields: Vec<(Field, String)> = Vec::with_capacity(3);
        let mut rest = sample.trim_start_matches(|c: char| !c.is_ascii_digit());
        while !rest.is_empty() {
            let digits_end = rest
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(rest.len());
            let (digits, tail) = rest.split_at(digits_end);
            let text_end = tail.find(|c: char| c.is_ascii_digit()).unwrap_or(tail.len());
            let (text, remaining) = tail.split_at(text_end);

            let field = match digits.parse::<i32>().ok()? {
                n if n == REFERENCE_YEAR || n == REFERENCE_YEAR % 100 => Field::Year,
                n if u32::try_from(n).ok() == Some(SAMPLE_MONTH) => Field::Month,
                n if u32::try_from(n).ok() == Some(SAMPLE_DAY) => Field::Day,
                _ => return None,
            };
            if fields.iter().any(|(seen, _)| *seen == field) {
                return None;
            }
            fields.push((field, text.to_owned()));
            rest = remaining;
        }
        if fields.len() != 3 {
            return None;
        }
        // A closing "." (`22.11.2017.`) is punctuation, not a suffix
        let suffixed = fields
            .last()
            .is_some_and(|(_, text)| text.chars().any(char::is_alphabetic));
        Some(Self {
            fields,
            suffixed,
            marks: Vec::new(),
        })
    }

    /// Records which numeric fields a locale's long date pattern (glibc
    /// `date_fmt`, e.g. `%a %-d. %b %H:%M:%S %Z %Y`) follows with a full stop.
    pub(crate) fn with_marks(mut self, pattern: &str) -> Self {
        let mut chars = pattern.chars().peekable();
        while let Some(c) = chars.next() {
            if c != '%' {
                continue;
            }
            if chars.peek().is_some_and(|c| matches!(*c, '-' | '_' | '0' | '^' | '#')) {
                chars.next();
            }
            let field = match chars.next() {
                Some('Y') => Field::Year,
                Some('d' | 'e') => Field::Day,
                _ => continue,
            };
            if chars.peek() == Some(&'.') && !self.marks.contains(&field) {
                self.marks.push(field);
            }
        }
        self
    }

    fn is_last(&self, field: Field) -> bool {
        self.fields.last().is_some_and(|(last, _)| *last == field)
    }

    fn is_marked(&self, field: Field) -> bool {
        self.marks.contains(&field)
    }

    /// Whether suffixed fields are set apart by spaces (`2017년 11월 22일`)
    fn spaced(&self) -> bool {
        self.fields
            .iter()
            .any(|(_, text)| text.ends_with(char::is_whitespace))
    }
}

impl Default for FieldLayout {
    /// ISO order, `2017-11-22`
    fn default() -> Self {
        Self {
            fields: vec![
                (Field::Year, "-".to_owned()),
                (Field::Month, "-".to_owned()),
                (Field::Day, String::new()),
            ],
            suffixed: false,
            marks: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn shadow(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            .and_utc()
    }

    #[test]
    fn test_layout_month_first() {
        let layout = FieldLayout::from_sample("11/22/2017").unwrap();
        assert_eq!(
            layout.fields,
            vec![
                (Field::Month, "/".to_owned()),
                (Field::Day, "/".to_owned()),
                (Field::Year, String::new()),
            ]
        );
        assert!(!layout.suffixed);
    }

    #[test]
    fn test_layout_two_digit_year() {
        let layout = FieldLayout::from_sample("22/11/17").unwrap();
        assert_eq!(layout.fields.first().map(|(f, _)| *f), Some(Field::Day));
        assert_eq!(layout.fields.last().map(|(f, _)| *f), Some(Field::Year));
    }

    #[test]
    fn test_layout_suffixed() {
        let layout = FieldLayout::from_sample("2017年11月22日").unwrap();
        assert!(layout.suffixed);
        assert_eq!(layout.fields.first(), Some(&(Field::Year, "年".to_owned())));
    }

    #[test]
    fn test_layout_closing_dot_is_not_a_suffix() {
        let layout = FieldLayout::from_sample("22.11.2017.").unwrap();
        assert!(!layout.suffixed);
        assert_eq!(layout.fields.last(), Some(&(Field::Year, ".".to_owned())));
    }

    #[test]
    fn test_layout_marks_from_long_pattern() {
        let layout = FieldLayout::default().with_marks("%a %-d. %b %H:%M:%S %Z %Y");
        assert!(layout.is_marked(Field::Day));
        assert!(!layout.is_marked(Field::Year));

        let layout = FieldLayout::default().with_marks("%Y. %b. %-e., %A, %H:%M:%S %Z");
        assert_eq!(layout.marks, vec![Field::Year, Field::Day]);

        let layout = FieldLayout::default().with_marks("%a %d %b %Y %r %Z");
        assert!(layout.marks.is_empty());
    }

    #[test]
    fn test_layout_rejects_unrecognized() {
        assert!(FieldLayout::from_sample("22 Nov 2017").is_none());
        assert!(FieldLayout::from_sample("2017-11-22-22").is_none());
        assert!(FieldLayout::from_sample("").is_none());
        assert!(FieldLayout::from_sample("03/04/2017").is_none());
    }

    #[test]
    fn test_render_en_us() {
        let locale = Locale::new("en-US");
        let date = shadow(2017, 1, 15);
        assert_eq!(DateFormat::numeric_date().render(&date, &locale), "1/15/2017");
        assert_eq!(
            DateFormat::month_year(MonthStyle::Short).render(&date, &locale),
            "Jan 2017"
        );
        assert_eq!(DateFormat::long_date().render(&date, &locale), "January 15, 2017");
        assert_eq!(
            DateFormat::new()
                .with_weekday(NameStyle::Long)
                .render(&date, &locale),
            "Sunday"
        );
    }

    #[test]
    fn test_render_day_first_locale() {
        let locale = Locale::new("de-DE");
        let date = shadow(2017, 3, 5);
        assert_eq!(DateFormat::numeric_date().render(&date, &locale), "5.3.2017");
        assert_eq!(DateFormat::long_date().render(&date, &locale), "5. März 2017");
        assert_eq!(
            DateFormat::long_date()
                .with_weekday(NameStyle::Long)
                .render(&date, &locale),
            "Sonntag, 5. März 2017"
        );
        assert_eq!(
            DateFormat::month_year(MonthStyle::Long).render(&date, &locale),
            "März 2017"
        );
    }

    #[test]
    fn test_render_keeps_ordinal_marks() {
        let date = shadow(2017, 11, 22);
        let locale = Locale::new("hu-HU");
        assert_eq!(DateFormat::long_date().render(&date, &locale), "2017. november 22.");
        assert_eq!(DateFormat::numeric_date().render(&date, &locale), "2017-11-22");

        let locale = Locale::new("sr-Latn-RS");
        assert_eq!(DateFormat::long_date().render(&date, &locale), "22. novembar 2017.");
        assert_eq!(DateFormat::numeric_date().render(&date, &locale), "22.11.2017.");

        let locale = Locale::new("pl-PL");
        assert_eq!(DateFormat::long_date().render(&date, &locale), "22 listopada 2017");
    }

    #[test]
    fn test_render_standalone_month() {
        let date = shadow(2017, 11, 22);
        let locale = Locale::new("pl-PL");
        assert_eq!(
            DateFormat::month_year(MonthStyle::Long).render(&date, &locale),
            "listopad 2017"
        );
        assert_eq!(
            DateFormat::new()
                .with_month(MonthStyle::Long)
                .with_day(NumericStyle::Numeric)
                .render(&date, &locale),
            "22 listopada"
        );

        let locale = Locale::new("ru-RU");
        assert_eq!(
            DateFormat::month_year(MonthStyle::Long).render(&date, &locale),
            "Ноябрь 2017"
        );
        assert_eq!(
            DateFormat::month_year(MonthStyle::Short).render(&date, &locale),
            "ноя 2017"
        );
    }

    #[test]
    fn test_render_suffixed_locale() {
        let locale = Locale::new("ja-JP");
        let date = shadow(2017, 11, 22);
        assert_eq!(DateFormat::numeric_date().render(&date, &locale), "2017年11月22日");
        assert_eq!(
            DateFormat::month_year(MonthStyle::Long).render(&date, &locale),
            "2017年11月"
        );
        assert_eq!(
            DateFormat::new()
                .with_year(NumericStyle::Numeric)
                .render(&date, &locale),
            "2017年"
        );
        assert_eq!(
            DateFormat::numeric_date()
                .with_weekday(NameStyle::Long)
                .render(&date, &locale),
            "2017年11月22日水曜日"
        );
    }

    #[test]
    fn test_render_spaced_suffixed_locale() {
        let locale = Locale::new("ko-KR");
        let date = shadow(2017, 11, 22);
        assert_eq!(DateFormat::numeric_date().render(&date, &locale), "2017년 11월 22일");
        assert_eq!(
            DateFormat::numeric_date()
                .with_weekday(NameStyle::Long)
                .render(&date, &locale),
            "2017년 11월 22일 수요일"
        );
    }

    #[test]
    fn test_render_empty_format_is_numeric_date() {
        let locale = Locale::new("en-US");
        let date = shadow(2020, 2, 29);
        assert_eq!(DateFormat::new().render(&date, &locale), "2/29/2020");
    }

    #[test]
    fn test_render_two_digit() {
        let locale = Locale::new("en-US");
        let date = shadow(2009, 4, 3);
        let format = DateFormat::new()
            .with_year(NumericStyle::TwoDigit)
            .with_month(MonthStyle::TwoDigit)
            .with_day(NumericStyle::TwoDigit);
        assert_eq!(format.render(&date, &locale), "04/03/09");
    }

    #[test]
    fn test_narrow() {
        assert_eq!(narrow("January", "Jan"), "J");
        assert_eq!(narrow("janvier", "janv."), "J");
        assert_eq!(narrow("1月", "1月"), "1月");
        assert_eq!(narrow("", "x"), "x");
    }

    #[test]
    fn test_format_serde_option_names() {
        let format: DateFormat =
            serde_json::from_str(r#"{"year":"numeric","month":"short"}"#).unwrap();
        assert_eq!(format, DateFormat::month_year(MonthStyle::Short));

        let format: DateFormat = serde_json::from_str(r#"{"day":"2-digit"}"#).unwrap();
        assert_eq!(format.day, Some(NumericStyle::TwoDigit));

        let json = serde_json::to_string(&DateFormat::long_date()).unwrap();
        assert_eq!(json, r#"{"year":"numeric","month":"long","day":"numeric"}"#);
    }
}
