use crate::error::{AppError, Result};
use chrono::{NaiveDate, NaiveTime, Weekday};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

pub const LOG_ENV: &str = "RECOVERY_OFFICE_LOG";
pub const CONFIG_ENV: &str = "RECOVERY_OFFICE_CONFIG";

const DEFAULT_LOG_FILTER: &str = "info,recovery_office=info";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// `tracing` filter directive, overridden by `RECOVERY_OFFICE_LOG`.
    pub log_filter: String,
    pub schedule: ScheduleConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            schedule: ScheduleConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct ScheduleConfig {
    pub slot_minutes: u32,
    pub opening_hours: Vec<OpeningHours>,
    pub closed_dates: Vec<NaiveDate>,
    pub booked: Vec<BookedSlot>,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        let weekdays = [
            DayOfWeek::Monday,
            DayOfWeek::Tuesday,
            DayOfWeek::Wednesday,
            DayOfWeek::Thursday,
            DayOfWeek::Friday,
        ];
        Self {
            slot_minutes: 60,
            opening_hours: weekdays
                .into_iter()
                .map(|weekday| OpeningHours {
                    weekday,
                    open: "09:00".to_string(),
                    close: "17:00".to_string(),
                })
                .collect(),
            closed_dates: Vec::new(),
            booked: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct OpeningHours {
    pub weekday: DayOfWeek,
    /// 24-hour `HH:MM`.
    pub open: String,
    /// 24-hour `HH:MM`, exclusive.
    pub close: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct BookedSlot {
    pub date: NaiveDate,
    /// 24-hour `HH:MM`.
    pub time: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl From<DayOfWeek> for Weekday {
    fn from(day: DayOfWeek) -> Self {
        match day {
            DayOfWeek::Monday => Weekday::Mon,
            DayOfWeek::Tuesday => Weekday::Tue,
            DayOfWeek::Wednesday => Weekday::Wed,
            DayOfWeek::Thursday => Weekday::Thu,
            DayOfWeek::Friday => Weekday::Fri,
            DayOfWeek::Saturday => Weekday::Sat,
            DayOfWeek::Sunday => Weekday::Sun,
        }
    }
}

impl AppConfig {
    /// Loads the YAML file at `path`, or the built-in defaults when no path
    /// is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let raw = std::fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&raw)
    }

    pub fn from_yaml_str(raw: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.schedule.validate()
    }

    pub fn effective_log_filter(&self) -> String {
        env::var(LOG_ENV).unwrap_or_else(|_| self.log_filter.clone())
    }

    pub fn json_schema() -> Result<String> {
        let schema = schemars::schema_for!(AppConfig);
        Ok(serde_json::to_string_pretty(&schema)?)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

impl ScheduleConfig {
    pub fn validate(&self) -> Result<()> {
        if self.slot_minutes == 0 {
            return Err(AppError::InvalidConfig(
                "schedule.slot_minutes must be greater than zero".to_string(),
            ));
        }

        for hours in &self.opening_hours {
            let open = parse_clock(&hours.open)?;
            let close = parse_clock(&hours.close)?;
            if open >= close {
                return Err(AppError::InvalidConfig(format!(
                    "opening hours for {:?} close ({}) before they open ({})",
                    hours.weekday, hours.close, hours.open
                )));
            }
        }

        for slot in &self.booked {
            parse_clock(&slot.time)?;
        }

        Ok(())
    }
}

pub fn parse_clock(raw: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(raw.trim(), "%H:%M")
        .map_err(|_| AppError::InvalidConfig(format!("invalid time '{raw}', expected HH:MM")))
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, DayOfWeek};
    use crate::error::AppError;

    #[test]
    fn defaults_open_weekdays_only() {
        let config = AppConfig::default();
        assert_eq!(config.schedule.slot_minutes, 60);
        assert_eq!(config.schedule.opening_hours.len(), 5);
        assert!(
            config
                .schedule
                .opening_hours
                .iter()
                .all(|h| h.weekday != DayOfWeek::Saturday && h.weekday != DayOfWeek::Sunday)
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parses_yaml_with_partial_fields() {
        let raw = r#"
schedule:
  slot_minutes: 30
  opening_hours:
    - weekday: saturday
      open: "10:00"
      close: "12:00"
  closed_dates: ["2026-12-25"]
"#;
        let config = AppConfig::from_yaml_str(raw).expect("config should parse");
        assert_eq!(config.schedule.slot_minutes, 30);
        assert_eq!(config.schedule.opening_hours[0].weekday, DayOfWeek::Saturday);
        assert_eq!(config.schedule.closed_dates.len(), 1);
        assert_eq!(config.log_filter, AppConfig::default().log_filter);
    }

    #[test]
    fn rejects_inverted_opening_hours() {
        let raw = r#"
schedule:
  opening_hours:
    - weekday: monday
      open: "17:00"
      close: "09:00"
"#;
        let err = AppConfig::from_yaml_str(raw).expect_err("inverted hours should fail");
        assert!(matches!(err, AppError::InvalidConfig(_)));
    }

    #[test]
    fn rejects_zero_interval_and_bad_times() {
        let zero = "schedule:\n  slot_minutes: 0\n";
        assert!(matches!(
            AppConfig::from_yaml_str(zero),
            Err(AppError::InvalidConfig(_))
        ));

        let bad_time = r#"
schedule:
  booked:
    - date: "2026-10-20"
      time: "quarter past nine"
"#;
        assert!(matches!(
            AppConfig::from_yaml_str(bad_time),
            Err(AppError::InvalidConfig(_))
        ));
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = AppConfig::from_yaml_str("colour: teal\n").expect_err("unknown key");
        assert!(matches!(err, AppError::ConfigParse(_)));
    }

    #[test]
    fn schema_mentions_schedule() {
        let schema = AppConfig::json_schema().expect("schema");
        assert!(schema.contains("slot_minutes"));
    }
}
