//! Tick loop driven with a headless sink.

use std::thread::{self, JoinHandle};
use std::time::Duration;

use lifelight::config::Config;
use lifelight::{Driver, HandoffReceiver, HeadlessSink, PaletteKind, SinkKind, handoff};
use lifelight_automaton::{Automaton, AutomatonConfig, ColorScheme, PixelSink, Rgba};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn small_driver() -> Driver {
  let config = AutomatonConfig {
    width: 8,
    height: 8,
    ..Default::default()
  };
  let mut automaton = Automaton::new(config, StdRng::seed_from_u64(42)).unwrap();
  automaton.randomize();
  Driver::new(automaton, ColorScheme::default(), Duration::from_millis(1))
}

/// Sends `changes` from another thread, one handoff at a time, and returns
/// once the first is waiting to be taken. The sender is dropped at the end.
fn schedule_changes(changes: &'static [bool]) -> (HandoffReceiver, JoinHandle<usize>) {
  let (tx, rx) = handoff();
  let handle = thread::spawn(move || changes.iter().take_while(|&&on| tx.send(on).is_ok()).count());
  while rx.pending() == 0 {
    thread::yield_now();
  }
  (rx, handle)
}

#[derive(Default)]
struct UnpluggedSink {
  sets: usize,
  renders: usize,
}

impl PixelSink for UnpluggedSink {
  type Error = std::io::Error;

  fn set(&mut self, _x: usize, _y: usize, _color: Rgba) {
    self.sets += 1;
  }

  fn render(&mut self) -> std::io::Result<()> {
    self.renders += 1;
    Err(std::io::Error::other("unplugged"))
  }
}

#[test]
fn runs_requested_ticks() {
  let mut driver = small_driver();
  let mut sink = HeadlessSink::new(8, 8);
  let (_tx, rx) = handoff();

  let stats = driver.run(&mut sink, &rx, Some(5)).unwrap();
  assert_eq!(stats.ticks, 5);
  assert_eq!(stats.pauses, 0);
  assert_eq!(sink.renders(), 5);
  assert_eq!(driver.automaton().generation(), 5);
}

#[test]
fn off_clears_and_waits_for_on() {
  let mut driver = small_driver();
  let mut sink = HeadlessSink::new(8, 8);
  let (rx, sender) = schedule_changes(&[false, true]);

  let stats = driver.run(&mut sink, &rx, Some(3)).unwrap();
  assert_eq!(stats.pauses, 1);
  assert_eq!(stats.ticks, 3);
  assert_eq!(sink.clears(), 1);
  // Three frames plus the blank one.
  assert_eq!(sink.renders(), 4);
  assert_eq!(sender.join().unwrap(), 2);
}

#[test]
fn sender_waits_until_the_change_is_applied() {
  let mut driver = small_driver();
  let mut sink = HeadlessSink::new(8, 8);
  let (rx, sender) = schedule_changes(&[false, true]);

  thread::sleep(Duration::from_millis(20));
  assert!(!sender.is_finished());
  assert_eq!(rx.pending(), 1);

  driver.run(&mut sink, &rx, Some(1)).unwrap();
  assert_eq!(sender.join().unwrap(), 2);
  assert_eq!(rx.pending(), 0);
}

#[test]
fn closed_handoff_resumes() {
  let mut driver = small_driver();
  let mut sink = HeadlessSink::new(8, 8);
  let (rx, sender) = schedule_changes(&[false]);

  let stats = driver.run(&mut sink, &rx, Some(2)).unwrap();
  assert_eq!(stats.pauses, 1);
  assert_eq!(stats.ticks, 2);
  assert_eq!(sender.join().unwrap(), 1);
}

#[test]
fn pause_regenerates_palette() {
  let mut driver = small_driver().with_palette_regeneration(vec![PaletteKind::Happy], StdRng::seed_from_u64(1));
  let before = driver.scheme().clone();
  let mut sink = HeadlessSink::new(8, 8);
  let (rx, sender) = schedule_changes(&[false, true]);

  driver.run(&mut sink, &rx, Some(1)).unwrap();
  assert_eq!(sender.join().unwrap(), 2);
  assert_ne!(driver.scheme(), &before);
  assert_eq!(driver.scheme().live_count(), 4);
}

#[test]
fn frames_use_the_scheme() {
  let mut driver = small_driver();
  let mut sink = HeadlessSink::new(8, 8);
  let (_tx, rx) = handoff();
  driver.run(&mut sink, &rx, Some(1)).unwrap();

  let scheme = driver.scheme();
  for (pixel, cell) in sink.frame().as_slice().iter().zip(driver.automaton().cells()) {
    assert_eq!(*pixel, scheme.color(*cell));
  }
  assert!(sink.frame().as_slice().iter().any(|&p| p != Rgba::BLACK));
}

#[test]
fn sink_failure_stops_the_run() {
  let mut driver = small_driver();
  let mut sink = UnpluggedSink::default();
  let (_tx, rx) = handoff();

  let err = driver.run(&mut sink, &rx, Some(5)).unwrap_err();
  assert_eq!(err.to_string(), "unplugged");
  assert_eq!(sink.renders, 1);
  assert_eq!(sink.sets, 64);
  assert_eq!(driver.automaton().generation(), 1);
}

#[test]
fn headless_run_from_config() {
  let mut config = Config::from_toml_str("ticks_per_second = 1000\nrng_seed = 3\n[display]\nwidth = 10\nheight = 6").unwrap();
  config.schedule.enabled = false;

  let stats = lifelight::run(&config, SinkKind::Headless, Some(4)).unwrap();
  assert_eq!(stats.ticks, 4);
  assert_eq!(stats.pauses, 0);
}
