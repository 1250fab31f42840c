//! Ambient context: weather, light and calendar facts for one request.

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

/// Temperature reported when weather lookup is unavailable.
pub const FALLBACK_TEMPERATURE_C: f64 = 10.0;

/// Coarse weather category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCategory {
    Clear,
    Cloudy,
    Rainy,
    Snowy,
    /// A condition was reported but matched no known category.
    Neutral,
    /// No report could be obtained.
    #[default]
    Unknown,
}

impl WeatherCategory {
    /// Map a free-text provider condition ("Light rain", "Parçalı bulutlu")
    /// to a category. Keywords are checked in a fixed order so mixed
    /// conditions resolve deterministically.
    pub fn from_condition(condition: &str) -> Self {
        let c = condition.to_lowercase();
        if c.contains("yağmur") || c.contains("rain") {
            Self::Rainy
        } else if c.contains("bulut") || c.contains("cloud") {
            Self::Cloudy
        } else if c.contains("açık") || c.contains("clear") {
            Self::Clear
        } else if c.contains("kar") || c.contains("snow") {
            Self::Snowy
        } else {
            Self::Neutral
        }
    }
}

/// Weekday versus weekend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayType {
    Weekday,
    Weekend,
}

impl DayType {
    pub fn from_weekday(day: Weekday) -> Self {
        match day {
            Weekday::Sat | Weekday::Sun => Self::Weekend,
            _ => Self::Weekday,
        }
    }
}

/// Coarse time of day: night is before 06:00 or from 20:00.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    Day,
    Night,
}

impl TimeOfDay {
    pub fn from_hour(hour: u32) -> Self {
        if hour < 6 || hour >= 20 {
            Self::Night
        } else {
            Self::Day
        }
    }
}

/// Result of a weather lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub category: WeatherCategory,
    pub temperature_c: f64,
    pub is_dark: bool,
}

impl WeatherReport {
    /// The deterministic report used whenever lookup fails.
    pub fn fallback() -> Self {
        Self {
            category: WeatherCategory::Unknown,
            temperature_c: FALLBACK_TEMPERATURE_C,
            is_dark: false,
        }
    }
}

impl Default for WeatherReport {
    fn default() -> Self {
        Self::fallback()
    }
}

/// Read-only facts about the user's surroundings for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextSnapshot {
    pub city: String,
    pub weather: WeatherCategory,
    pub temperature_c: f64,
    pub is_dark: bool,
    pub time_of_day: TimeOfDay,
    pub day_type: DayType,
}

impl ContextSnapshot {
    /// Combine a weather report with the local wall-clock time.
    pub fn from_parts(city: impl Into<String>, weather: WeatherReport, now: NaiveDateTime) -> Self {
        Self {
            city: city.into(),
            weather: weather.category,
            temperature_c: weather.temperature_c,
            is_dark: weather.is_dark,
            time_of_day: TimeOfDay::from_hour(now.hour()),
            day_type: DayType::from_weekday(now.weekday()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_weather_category_mapping() {
        assert_eq!(WeatherCategory::from_condition("Light rain shower"), WeatherCategory::Rainy);
        assert_eq!(WeatherCategory::from_condition("Parçalı bulutlu"), WeatherCategory::Cloudy);
        assert_eq!(WeatherCategory::from_condition("Clear"), WeatherCategory::Clear);
        assert_eq!(WeatherCategory::from_condition("Heavy snow"), WeatherCategory::Snowy);
        assert_eq!(WeatherCategory::from_condition("Mist"), WeatherCategory::Neutral);
    }

    #[test]
    fn test_time_of_day_boundaries() {
        assert_eq!(TimeOfDay::from_hour(5), TimeOfDay::Night);
        assert_eq!(TimeOfDay::from_hour(6), TimeOfDay::Day);
        assert_eq!(TimeOfDay::from_hour(19), TimeOfDay::Day);
        assert_eq!(TimeOfDay::from_hour(20), TimeOfDay::Night);
    }

    #[test]
    fn test_snapshot_from_parts() {
        // 2024-06-08 is a Saturday.
        let now = NaiveDate::from_ymd_opt(2024, 6, 8)
            .unwrap()
            .and_hms_opt(21, 30, 0)
            .unwrap();
        let snapshot = ContextSnapshot::from_parts("Bursa", WeatherReport::fallback(), now);
        assert_eq!(snapshot.city, "Bursa");
        assert_eq!(snapshot.weather, WeatherCategory::Unknown);
        assert_eq!(snapshot.temperature_c, FALLBACK_TEMPERATURE_C);
        assert_eq!(snapshot.time_of_day, TimeOfDay::Night);
        assert_eq!(snapshot.day_type, DayType::Weekend);
    }
}
