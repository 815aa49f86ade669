use crate::config::{ScheduleConfig, parse_clock};
use crate::error::Result;
use chrono::{Datelike, NaiveDate, NaiveTime, Timelike, Weekday};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeSlot {
    pub id: String,
    pub time: String,
    pub available: bool,
}

pub trait TimeSlotProvider {
    fn slots_for(&self, date: NaiveDate) -> Vec<TimeSlot>;
}

impl<F> TimeSlotProvider for F
where
    F: Fn(NaiveDate) -> Vec<TimeSlot>,
{
    fn slots_for(&self, date: NaiveDate) -> Vec<TimeSlot> {
        self(date)
    }
}

/// Slots generated from weekly opening hours at a fixed interval.
#[derive(Debug, Clone)]
pub struct ScheduleSlotProvider {
    slot_minutes: u32,
    hours: HashMap<Weekday, (NaiveTime, NaiveTime)>,
    closed: HashSet<NaiveDate>,
    booked: HashSet<(NaiveDate, NaiveTime)>,
}

impl ScheduleSlotProvider {
    pub fn from_config(config: &ScheduleConfig) -> Result<Self> {
        config.validate()?;

        let mut hours = HashMap::new();
        for entry in &config.opening_hours {
            let open = parse_clock(&entry.open)?;
            let close = parse_clock(&entry.close)?;
            hours.insert(Weekday::from(entry.weekday), (open, close));
        }

        let mut booked = HashSet::new();
        for slot in &config.booked {
            booked.insert((slot.date, parse_clock(&slot.time)?));
        }

        Ok(Self {
            slot_minutes: config.slot_minutes,
            hours,
            closed: config.closed_dates.iter().copied().collect(),
            booked,
        })
    }

    pub fn is_open(&self, date: NaiveDate) -> bool {
        !self.closed.contains(&date) && self.hours.contains_key(&date.weekday())
    }
}

impl TimeSlotProvider for ScheduleSlotProvider {
    fn slots_for(&self, date: NaiveDate) -> Vec<TimeSlot> {
        if self.closed.contains(&date) {
            return Vec::new();
        }
        let Some((open, close)) = self.hours.get(&date.weekday()) else {
            return Vec::new();
        };

        let open_min = minutes_of(*open);
        let close_min = minutes_of(*close);
        let step = self.slot_minutes.max(1) as usize;

        (open_min..close_min)
            .step_by(step)
            .take_while(|start| start + self.slot_minutes <= close_min)
            .filter_map(|start| NaiveTime::from_hms_opt(start / 60, start % 60, 0))
            .map(|time| TimeSlot {
                id: format!("{}-{}", date.format("%Y-%m-%d"), time.format("%H%M")),
                time: display_time(time),
                available: !self.booked.contains(&(date, time)),
            })
            .collect()
    }
}

fn minutes_of(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// 12-hour display form, e.g. `9:00 AM`.
pub fn display_time(time: NaiveTime) -> String {
    time.format("%-I:%M %p").to_string()
}
