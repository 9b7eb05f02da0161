/// Year used for every name lookup (any fixed year works; 2017 starts on a Sunday)
pub const REFERENCE_YEAR: i32 = 2017;

/// Month number (1-indexed) of the sample date used to learn a locale's field order
pub(crate) const SAMPLE_MONTH: u32 = 11;
/// Day of the sample date; distinct from the month so the two can't be confused
pub(crate) const SAMPLE_DAY: u32 = 22;

/// Number of months in a year
pub const MONTHS_IN_YEAR: i32 = 12;
/// Number of days in a week
pub const DAYS_IN_WEEK: i32 = 7;
/// Most days any month can have, and so the number of date names
pub const MAX_DAYS_IN_MONTH: i32 = 31;

/// Sunday, the origin of 0-indexed weekdays
pub const SUNDAY: u8 = 0;
/// Monday, the default first day of the week
pub const MONDAY: u8 = 1;
/// Saturday, the last valid weekday index
pub const SATURDAY: u8 = 6;

/// Seconds in an hour, for turning UTC offsets into hours
pub(crate) const SECS_PER_HOUR: i32 = 3600;
/// UTC offset magnitude (in hours) that selects the Japanese locale at startup
pub const JAPAN_OFFSET_HOURS: i32 = 9;

/// Locale chosen when the local UTC offset is +/-9 hours
pub const JAPANESE_LOCALE: &str = "ja-JP";
/// Locale chosen otherwise, and the configured default
pub const DEFAULT_LOCALE: &str = "en-US";

/// Separator between language and region in BCP-47 tags
pub const TAG_SEPARATOR: char = '-';
/// Separator between language and region in host locale names
pub(crate) const HOST_TAG_SEPARATOR: char = '_';
