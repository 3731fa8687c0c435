//! Store-open oracle and delivery slot generation.

mod common;

use chrono::{NaiveDate, NaiveDateTime};
use storefront_core::models::{OpeningHours, Settings};
use storefront_core::services::schedule::{
    available_schedule_days, available_schedule_times, is_store_open, DAY_NAMES,
};

fn hours(day: &str, is_open: bool, open: &str, close: &str) -> OpeningHours {
    OpeningHours {
        day: day.to_string(),
        is_open,
        open: open.to_string(),
        close: close.to_string(),
    }
}

/// Week mirroring the seed: closed Mondays, late close Friday/Saturday.
fn settings() -> Settings {
    Settings {
        opening_hours: vec![
            hours("Domingo", true, "14:00", "22:00"),
            hours("Segunda", false, "18:00", "23:00"),
            hours("Terça", true, "18:00", "23:00"),
            hours("Quarta", true, "18:00", "23:00"),
            hours("Quinta", true, "18:00", "23:00"),
            hours("Sexta", true, "18:00", "00:00"),
            hours("Sábado", true, "22:00", "02:00"),
        ],
        ..Settings::default()
    }
}

/// 2026-08-25 is a Tuesday.
fn tuesday_at(h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 8, 25)
        .unwrap()
        .and_hms_opt(h, m, 0)
        .unwrap()
}

fn saturday_at(h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 8, 29)
        .unwrap()
        .and_hms_opt(h, m, 0)
        .unwrap()
}

#[test]
fn open_edge_is_inclusive_close_exclusive() {
    let settings = settings();
    assert!(!is_store_open(&settings, tuesday_at(17, 59)));
    assert!(is_store_open(&settings, tuesday_at(18, 0)));
    assert!(is_store_open(&settings, tuesday_at(22, 59)));
    assert!(!is_store_open(&settings, tuesday_at(23, 0)));
}

#[test]
fn closed_day_and_temporary_closure_win() {
    let settings = settings();
    // Monday 2026-08-24, inside what would be the window.
    let monday = NaiveDate::from_ymd_opt(2026, 8, 24)
        .unwrap()
        .and_hms_opt(19, 0, 0)
        .unwrap();
    assert!(!is_store_open(&settings, monday));

    let mut closed = settings;
    closed.is_temporarily_closed = true;
    assert!(!is_store_open(&closed, tuesday_at(19, 0)));
}

#[test]
fn overnight_window_wraps_past_midnight() {
    let settings = settings();
    // Saturday 22:00–02:00.
    assert!(is_store_open(&settings, saturday_at(23, 30)));
    assert!(is_store_open(&settings, saturday_at(1, 59)));
    assert!(!is_store_open(&settings, saturday_at(2, 0)));
    assert!(!is_store_open(&settings, saturday_at(12, 0)));
}

#[test]
fn schedule_days_skip_closed_days_and_label_the_first_two() {
    let settings = settings();
    let days = available_schedule_days(&settings, tuesday_at(12, 0));

    assert_eq!(days.len(), 6);
    assert_eq!(days[0].label, "Hoje");
    assert_eq!(days[1].label, "Amanhã");
    assert_eq!(days[2].label, "Quinta-feira, 27");
    // Monday 2026-08-31 is closed and absent.
    assert!(days
        .iter()
        .all(|d| d.date != NaiveDate::from_ymd_opt(2026, 8, 31).unwrap()));
}

#[test]
fn slots_run_from_open_to_close_inclusive() {
    let settings = settings();
    // Picking Tuesday from Sunday: no earliest-slot cutoff.
    let day = NaiveDate::from_ymd_opt(2026, 8, 25).unwrap();
    let slots = available_schedule_times(&settings, day, tuesday_at(12, 0) - chrono::Days::new(2));

    assert_eq!(slots.first().map(String::as_str), Some("18:00"));
    assert_eq!(slots.last().map(String::as_str), Some("23:00"));
    assert_eq!(slots.len(), 11);
}

#[test]
fn today_slots_round_up_to_the_next_half_hour() {
    let settings = settings();
    let day = NaiveDate::from_ymd_opt(2026, 8, 25).unwrap();

    let at_18_14 = available_schedule_times(&settings, day, tuesday_at(18, 14));
    assert_eq!(at_18_14.first().map(String::as_str), Some("18:30"));

    let at_18_31 = available_schedule_times(&settings, day, tuesday_at(18, 31));
    assert_eq!(at_18_31.first().map(String::as_str), Some("19:00"));

    // Exactly on a slot keeps it.
    let at_19_00 = available_schedule_times(&settings, day, tuesday_at(19, 0));
    assert_eq!(at_19_00.first().map(String::as_str), Some("19:00"));
}

#[test]
fn overnight_close_extends_slots_past_midnight() {
    let settings = settings();
    // Friday 18:00–00:00: midnight is the last slot.
    let friday = NaiveDate::from_ymd_opt(2026, 8, 28).unwrap();
    let slots = available_schedule_times(&settings, friday, tuesday_at(12, 0));
    assert_eq!(slots.last().map(String::as_str), Some("00:00"));

    // Saturday 22:00–02:00.
    let saturday = NaiveDate::from_ymd_opt(2026, 8, 29).unwrap();
    let slots = available_schedule_times(&settings, saturday, tuesday_at(12, 0));
    assert_eq!(slots.first().map(String::as_str), Some("22:00"));
    assert_eq!(slots.last().map(String::as_str), Some("02:00"));
    assert_eq!(slots.len(), 9);
}

#[test]
fn day_names_cover_the_week_sunday_first() {
    assert_eq!(DAY_NAMES.len(), 7);
    assert_eq!(DAY_NAMES[0], "Domingo");
    assert_eq!(DAY_NAMES[6], "Sábado");
}
