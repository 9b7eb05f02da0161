use crate::ConfigError;
use crate::consts::{SATURDAY, SUNDAY};
use crate::prelude::*;
use serde::{Deserialize, Serialize};

/// How wordy a month or weekday name should be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum NameStyle {
    /// `January`, `Sunday`
    #[default]
    #[display(fmt = "long")]
    Long,
    /// `Jan`, `Sun`
    #[display(fmt = "short")]
    Short,
    /// `J`, `S`
    #[display(fmt = "narrow")]
    Narrow,
}

/// A weekday index guaranteed to be in the range `SUNDAY..=SATURDAY` (0..=6),
/// with Sunday as 0.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display, Into,
)]
#[serde(try_from = "u8", into = "u8")]
#[display(fmt = "{_0}")]
pub struct DayOfWeek(u8);

impl DayOfWeek {
    /// Creates a new `DayOfWeek`, validating that it is at most `SATURDAY`
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidDayOfWeek` if the value is greater than 6.
    pub const fn new(value: u8) -> Result<Self, ConfigError> {
        if value > SATURDAY {
            return Err(ConfigError::InvalidDayOfWeek(value));
        }
        Ok(Self(value))
    }

    /// Returns the weekday index as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl Default for DayOfWeek {
    fn default() -> Self {
        Self(SUNDAY)
    }
}

impl TryFrom<u8> for DayOfWeek {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<chrono::Weekday> for DayOfWeek {
    fn from(weekday: chrono::Weekday) -> Self {
        // num_days_from_sunday is always 0..=6
        Self(u8::try_from(weekday.num_days_from_sunday()).unwrap_or(SUNDAY))
    }
}
