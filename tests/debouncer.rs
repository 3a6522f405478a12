//! Host-level tests for the polled button debouncer.

mod common;

use common::{DeadInput, FakeButton, FakeClock};
use desk_clock_kit::{Debouncer, Error, LONG_PRESS_DURATION, PressDuration};
use embassy_time::Duration;

const SETTLE: Duration = Duration::from_millis(10);

fn debouncer(start: u32) -> (Debouncer<FakeButton, FakeClock>, FakeButton, FakeClock) {
    let button = FakeButton::default();
    let clock = FakeClock::starting_at(start);
    let debouncer = Debouncer::new(button.clone(), clock.clone(), SETTLE).unwrap();
    (debouncer, button, clock)
}

#[test]
fn starts_from_the_sampled_level() {
    let button = FakeButton::default();
    button.set_high(true);
    let debouncer = Debouncer::new(button, FakeClock::default(), SETTLE).unwrap();
    assert!(debouncer.read());
    assert!(!debouncer.rising_edge());
}

#[test]
fn unreadable_input_is_reported() {
    assert_eq!(
        Debouncer::new(DeadInput, FakeClock::default(), SETTLE).err(),
        Some(Error::CannotReadInput)
    );
}

#[test]
fn chatter_inside_the_settle_interval_reports_one_change() {
    let (mut debouncer, button, clock) = debouncer(1_000);
    clock.advance(20);

    let mut changes = 0;
    for (step, high) in [true, false, true, false, true].into_iter().enumerate() {
        button.set_high(high);
        if debouncer.poll().unwrap() {
            changes += 1;
            assert_eq!(step, 0, "only the first edge may be accepted");
        }
        clock.advance(2);
    }

    assert_eq!(changes, 1);
    assert!(debouncer.read());
}

#[test]
fn a_change_after_the_interval_is_accepted() {
    let (mut debouncer, button, clock) = debouncer(0);
    clock.advance(10);
    button.set_high(true);
    assert!(debouncer.poll().unwrap());
    assert!(debouncer.rising_edge());

    button.set_high(false);
    clock.advance(9);
    assert!(!debouncer.poll().unwrap());
    assert!(debouncer.read());

    clock.advance(1);
    assert!(debouncer.poll().unwrap());
    assert!(debouncer.falling_edge());
}

#[test]
fn edges_last_one_poll_and_never_coincide() {
    let (mut debouncer, button, clock) = debouncer(0);
    for (advance, high) in [(15, true), (1, true), (30, false), (1, false), (30, true)] {
        clock.advance(advance);
        button.set_high(high);
        debouncer.poll().unwrap();
        assert!(!(debouncer.rising_edge() && debouncer.falling_edge()));
    }
    // The last poll accepted a rise; the next quiet poll clears it.
    assert!(debouncer.rising_edge());
    clock.advance(1);
    debouncer.poll().unwrap();
    assert!(!debouncer.rising_edge());
}

#[test]
fn settle_timing_survives_counter_wrap() {
    let (mut debouncer, button, clock) = debouncer(u32::MAX - 4);
    button.set_high(true);

    clock.advance(4);
    assert!(!debouncer.poll().unwrap());

    clock.advance(6); // wraps past zero; 10 ms elapsed in total
    assert!(debouncer.poll().unwrap());
    assert_eq!(debouncer.duration(), Duration::from_millis(0));
}

#[test]
fn rebounce_repeats_a_held_level_once() {
    let (mut debouncer, button, clock) = debouncer(0);
    clock.advance(10);
    button.set_high(true);
    assert!(debouncer.poll().unwrap());
    debouncer.set_rebounce_interval(Duration::from_millis(250));

    clock.advance(249);
    assert!(!debouncer.poll().unwrap());
    clock.advance(1);
    assert!(debouncer.poll().unwrap());
    assert!(debouncer.read(), "a synthetic change keeps the level");
    assert!(debouncer.rising_edge());

    // Each repeat disarms itself.
    clock.advance(500);
    assert!(!debouncer.poll().unwrap());
}

#[test]
fn changing_the_settle_interval_disarms_rebounce() {
    let (mut debouncer, _button, clock) = debouncer(0);
    debouncer.set_rebounce_interval(Duration::from_millis(50));
    debouncer.set_settle_interval(Duration::from_millis(20));

    clock.advance(100);
    assert!(!debouncer.poll().unwrap());
}

#[test]
fn duration_measures_time_since_the_last_transition() {
    let (mut debouncer, button, clock) = debouncer(0);
    clock.advance(10);
    button.set_high(true);
    debouncer.poll().unwrap();

    clock.advance(600);
    assert_eq!(debouncer.duration(), Duration::from_millis(600));
    assert_eq!(PressDuration::from(debouncer.duration()), PressDuration::Long);
    assert_eq!(
        PressDuration::from(LONG_PRESS_DURATION - Duration::from_millis(1)),
        PressDuration::Short
    );
}

#[test]
fn write_forces_state_and_drives_the_pin() {
    let (mut debouncer, button, _clock) = debouncer(0);
    debouncer.write(true).unwrap();
    assert!(debouncer.read());

    let mut probe = button.clone();
    assert!(embedded_hal::digital::InputPin::is_high(&mut probe).unwrap());
}
