//! Scheduling oracle: is the store open now, and which future delivery
//! slots can a customer pick.
//!
//! All decisions run on wall-clock `now` passed by the caller, which keeps
//! the boundary cases testable.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

use crate::models::Settings;

/// Weekday names as stored in `Settings::opening_hours`, Sunday first.
pub const DAY_NAMES: [&str; 7] = [
    "Domingo", "Segunda", "Terça", "Quarta", "Quinta", "Sexta", "Sábado",
];

const DAY_NAMES_LONG: [&str; 7] = [
    "Domingo",
    "Segunda-feira",
    "Terça-feira",
    "Quarta-feira",
    "Quinta-feira",
    "Sexta-feira",
    "Sábado",
];

const MINUTES_PER_DAY: u32 = 24 * 60;
const SLOT_MINUTES: u32 = 30;

fn day_name(date: NaiveDate) -> &'static str {
    DAY_NAMES[date.weekday().num_days_from_sunday() as usize]
}

fn parse_hhmm(value: &str) -> Option<u32> {
    let (h, m) = value.split_once(':')?;
    let h: u32 = h.parse().ok()?;
    let m: u32 = m.parse().ok()?;
    (h < 24 && m < 60).then_some(h * 60 + m)
}

fn format_hhmm(minutes: u32) -> String {
    let minutes = minutes % MINUTES_PER_DAY;
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Whether the store accepts orders at `now`.
///
/// Open is inclusive, close exclusive. A window whose close precedes its
/// open wraps past midnight: 22:00–02:00 is open at 01:59.
pub fn is_store_open(settings: &Settings, now: NaiveDateTime) -> bool {
    if settings.is_temporarily_closed {
        return false;
    }

    let Some(hours) = settings.hours_for_day(day_name(now.date())) else {
        return false;
    };
    if !hours.is_open {
        return false;
    }

    let (Some(open), Some(close)) = (parse_hhmm(&hours.open), parse_hhmm(&hours.close)) else {
        return false;
    };
    let current = now.hour() * 60 + now.minute();

    if close < open {
        current >= open || current < close
    } else {
        current >= open && current < close
    }
}

/// One pickable day on the scheduling form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleDay {
    pub date: NaiveDate,
    pub label: String,
}

/// The next seven days on which the store opens, labelled "Hoje", "Amanhã"
/// or the long weekday name plus day-of-month.
pub fn available_schedule_days(settings: &Settings, now: NaiveDateTime) -> Vec<ScheduleDay> {
    (0..7)
        .filter_map(|offset| {
            let date = now.date() + chrono::Days::new(offset);
            let hours = settings.hours_for_day(day_name(date))?;
            if !hours.is_open {
                return None;
            }
            let label = match offset {
                0 => "Hoje".to_string(),
                1 => "Amanhã".to_string(),
                _ => format!(
                    "{}, {}",
                    DAY_NAMES_LONG[date.weekday().num_days_from_sunday() as usize],
                    date.day()
                ),
            };
            Some(ScheduleDay { date, label })
        })
        .collect()
}

/// Half-hour delivery slots for a chosen day, as "HH:MM" labels.
///
/// Slots run from the day's opening time to its closing time; an overnight
/// close extends the range past midnight. For today, the first slot is the
/// next half hour at or after `now`, rounded up to :00/:30.
pub fn available_schedule_times(
    settings: &Settings,
    day: NaiveDate,
    now: NaiveDateTime,
) -> Vec<String> {
    let Some(hours) = settings.hours_for_day(day_name(day)) else {
        return Vec::new();
    };
    if !hours.is_open {
        return Vec::new();
    }
    let (Some(open), Some(close)) = (parse_hhmm(&hours.open), parse_hhmm(&hours.close)) else {
        return Vec::new();
    };

    let end = if close < open { close + MINUTES_PER_DAY } else { close };

    let earliest = if day == now.date() {
        let current = now.hour() * 60 + now.minute();
        current + (SLOT_MINUTES - current % SLOT_MINUTES) % SLOT_MINUTES
    } else {
        0
    };

    let mut slots = Vec::new();
    let mut slot = open;
    while slot <= end {
        if slot >= earliest {
            slots.push(format_hhmm(slot));
        }
        slot += SLOT_MINUTES;
    }
    slots
}
