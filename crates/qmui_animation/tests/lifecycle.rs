use qmui_animation::{animate_color, Animation, AnimationState, Animator, Easing};
use qmui_core::Color;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

fn completion_counter(animation: &Animation) -> Arc<AtomicUsize> {
    let count = Arc::new(AtomicUsize::new(0));
    let counter = count.clone();
    animation.set_on_complete(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    count
}

/// Bounded wait so a slow machine cannot hang the suite
fn wait_until_finished(animation: &Animation) {
    let deadline = Instant::now() + Duration::from_secs(2);
    while animation.is_running() && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(5));
    }
}

#[test]
fn animation_completes_once_after_duration() {
    let animation = Animation::new(Duration::from_millis(100), Some(Easing::EaseOutQuad), |_| {});
    let completions = completion_counter(&animation);

    animation.start();
    assert!(animation.is_running());

    thread::sleep(Duration::from_millis(150));
    wait_until_finished(&animation);

    assert_eq!(completions.load(Ordering::SeqCst), 1);
    assert!(!animation.is_running());
    assert_eq!(animation.state(), AnimationState::Completed);
}

#[test]
fn stop_mid_flight_suppresses_completion() {
    let animation = Animation::new(Duration::from_millis(100), None, |_| {});
    let completions = completion_counter(&animation);

    animation.start();
    thread::sleep(Duration::from_millis(50));
    animation.stop();

    assert!(!animation.is_running());
    assert_eq!(animation.state(), AnimationState::Cancelled);

    thread::sleep(Duration::from_millis(150));
    assert_eq!(completions.load(Ordering::SeqCst), 0);
    assert_eq!(animation.state(), AnimationState::Cancelled);
}

#[test]
fn double_start_runs_a_single_instance() {
    let ticks = Arc::new(AtomicUsize::new(0));
    let counter = ticks.clone();
    let animation = Animation::builder(Duration::from_millis(60))
        .tick_interval(Duration::from_millis(10))
        .build(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
    let completions = completion_counter(&animation);

    animation.start();
    animation.start();
    thread::sleep(Duration::from_millis(100));
    wait_until_finished(&animation);

    assert_eq!(completions.load(Ordering::SeqCst), 1);
    // One ticker at 10ms over 60ms; a second would roughly double this
    assert!(ticks.load(Ordering::SeqCst) <= 10, "ticks = {}", ticks.load(Ordering::SeqCst));
}

#[test]
fn progress_reaches_one_and_stays_non_decreasing_for_monotonic_curves() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let animation = Animation::builder(Duration::from_millis(80))
        .easing(Easing::EaseInOutCubic)
        .tick_interval(Duration::from_millis(5))
        .build(move |p| sink.lock().unwrap().push(p));

    animation.start();
    wait_until_finished(&animation);

    let seen = seen.lock().unwrap();
    assert!(seen.len() >= 2);
    assert!(seen.windows(2).all(|w| w[1] >= w[0]));
    assert_eq!(*seen.last().unwrap(), 1.0);
}

#[test]
fn concurrent_stop_and_completion_fire_at_most_once() {
    for _ in 0..20 {
        let animation = Animation::builder(Duration::from_millis(5))
            .tick_interval(Duration::from_millis(1))
            .build(|_| {});
        let completions = completion_counter(&animation);

        animation.start();
        let stopper = animation.clone();
        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(5));
            stopper.stop();
        });
        handle.join().unwrap();
        wait_until_finished(&animation);

        let fired = completions.load(Ordering::SeqCst);
        match animation.state() {
            AnimationState::Completed => assert_eq!(fired, 1),
            AnimationState::Cancelled => assert_eq!(fired, 0),
            other => panic!("unexpected state {other:?}"),
        }
    }
}

#[test]
fn color_helper_ends_on_target() {
    let latest = Arc::new(Mutex::new(Color::BLACK));
    let sink = latest.clone();
    let target = Color::from_hex(0x31BD65);

    let animation = animate_color(
        Color::WHITE,
        target,
        Duration::from_millis(30),
        Some(Easing::EaseOutSine),
        move |c| *sink.lock().unwrap() = c,
    );
    assert!(animation.is_running());
    wait_until_finished(&animation);

    let last = *latest.lock().unwrap();
    for (got, want) in last.to_array().iter().zip(target.to_array()) {
        assert!((got - want).abs() < 1e-5);
    }
}

#[test]
fn animator_starts_and_completes_group() {
    let mut animator = Animator::new();
    let counters: Vec<_> = (0..3)
        .map(|i| {
            let animation = Animation::new(Duration::from_millis(20 * (i + 1)), None, |_| {});
            let counter = completion_counter(&animation);
            animator.add(animation);
            counter
        })
        .collect();

    animator.start_all();
    let deadline = Instant::now() + Duration::from_secs(2);
    while animator.is_any_running() && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(5));
    }

    for counter in counters {
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }
    assert_eq!(animator.clear_finished(), 3);
}
