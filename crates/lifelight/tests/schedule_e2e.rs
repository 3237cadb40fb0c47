//! Weekly schedule loaded from TOML and evaluated.

use chrono::Weekday;
use lifelight::schedule::WEEKDAYS;
use lifelight::{ClockTime, Config, Schedule, ScheduleSource, Transition};

const WEEK: &str = r#"
[[schedule.window]]
on = "12:00"
off = "12:30"

[[schedule.window]]
days = ["Mon", "Tue", "Wed", "Thu", "Fri"]
on = "08:00"
off = "08:45"

[[schedule.window]]
days = ["Mon", "Tue", "Wed", "Thu", "Fri"]
on = "17:15"
off = "23:00"

[[schedule.window]]
days = ["Sat", "Sun"]
on = "08:00"
off = "23:00"

[[schedule.window]]
days = ["Sat"]
on = "02:00"
off = "06:00"

[[schedule.window]]
days = ["Sun"]
on = "06:00"
off = "23:00"
"#;

fn week() -> Schedule {
  let config = Config::from_toml_str(WEEK).unwrap();
  Schedule::from_windows(&config.schedule.window)
}

fn t(s: &str) -> ClockTime {
  s.parse().unwrap()
}

fn list(items: &[(&str, bool)]) -> Vec<Transition> {
  items
    .iter()
    .map(|&(at, on)| Transition { at: t(at), on })
    .collect()
}

#[test]
fn transitions_are_sorted_per_day() {
  let schedule = week();
  assert_eq!(schedule.day_count(), 7);

  let weekday = list(&[
    ("08:00", true),
    ("08:45", false),
    ("12:00", true),
    ("12:30", false),
    ("17:15", true),
    ("23:00", false),
  ]);
  for day in &WEEKDAYS[..5] {
    assert_eq!(schedule.transitions(*day), weekday.as_slice(), "{day}");
  }

  assert_eq!(
    schedule.transitions(Weekday::Sat),
    list(&[
      ("02:00", true),
      ("06:00", false),
      ("08:00", true),
      ("12:00", true),
      ("12:30", false),
      ("23:00", false),
    ])
    .as_slice()
  );
  assert_eq!(
    schedule.transitions(Weekday::Sun),
    list(&[
      ("06:00", true),
      ("08:00", true),
      ("12:00", true),
      ("12:30", false),
      ("23:00", false),
      ("23:00", false),
    ])
    .as_slice()
  );
}

#[test]
fn evaluates_state_over_the_week() {
  let schedule = week();
  let cases = [
    (Weekday::Mon, "08:30", false, true),
    (Weekday::Tue, "13:00", false, false),
    (Weekday::Wed, "17:00", true, false),
    (Weekday::Wed, "17:30", true, true),
    (Weekday::Sat, "07:30", true, false),
    (Weekday::Sat, "12:15", false, true),
    (Weekday::Sun, "23:15", true, false),
  ];

  for (day, time, current, want) in cases {
    assert_eq!(
      schedule.evaluate(day, t(time), current),
      want,
      "{day} {time} from {current}"
    );
  }
}

#[test]
fn early_morning_keeps_previous_state() {
  let schedule = week();
  assert!(schedule.evaluate(Weekday::Mon, t("07:00"), true));
  assert!(!schedule.evaluate(Weekday::Mon, t("07:00"), false));
}
