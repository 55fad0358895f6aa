//! Time-based animation driver
//!
//! An [`Animation`] runs an update callback on its own background thread at a
//! fixed cadence (16ms by default) until its duration has elapsed, feeding the
//! callback eased progress.
//!
//! # States
//!
//! ```text
//! Idle ──start──▶ Running ──elapsed ≥ duration──▶ Completed
//!                    │
//!                    └──────stop──────▶ Cancelled
//! ```
//!
//! Natural completion and cancellation race through a single atomic state
//! word, so exactly one of them is observable: `on_complete` fires on
//! completion only, and never after `stop()` has returned.
//!
//! Callbacks run on the animation thread. Code embedding this in a UI must
//! marshal their effects onto its UI thread.
//!
//! ```rust
//! use qmui_animation::{Animation, Easing};
//! use std::sync::atomic::{AtomicBool, Ordering};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let done = Arc::new(AtomicBool::new(false));
//! let flag = done.clone();
//!
//! let fade = Animation::new(Duration::ZERO, Some(Easing::EaseOutCubic), |_opacity| {});
//! fade.set_on_complete(move || flag.store(true, Ordering::SeqCst));
//! fade.start();
//!
//! while fade.is_running() {
//!     std::thread::sleep(Duration::from_millis(1));
//! }
//! assert!(done.load(Ordering::SeqCst));
//! ```

use crate::config::AnimationConfig;
use crate::easing::Easing;
use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, Thread};
use std::time::{Duration, Instant};

/// Default tick cadence (~60Hz)
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(16);

/// Shortest cadence the driver will tick at
const MIN_TICK_INTERVAL: Duration = Duration::from_millis(1);

const IDLE: u8 = 0;
const RUNNING: u8 = 1;
/// `on_complete` is executing; still reported as running
const COMPLETING: u8 = 2;
const COMPLETED: u8 = 3;
const CANCELLED: u8 = 4;

/// Callback receiving eased progress on every tick
pub type UpdateCallback = Arc<dyn Fn(f64) + Send + Sync>;

/// Callback invoked once on natural completion
pub type CompleteCallback = Box<dyn FnOnce() + Send>;

/// Observable lifecycle state of an [`Animation`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimationState {
    /// Created, not yet started
    Idle,
    /// Ticking on the background thread
    Running,
    /// Reached its duration; `on_complete` has fired
    Completed,
    /// Stopped before reaching its duration
    Cancelled,
}

impl AnimationState {
    /// Completed and Cancelled are final; `start()` has no effect on them
    pub fn is_terminal(self) -> bool {
        matches!(self, AnimationState::Completed | AnimationState::Cancelled)
    }

    fn from_raw(raw: u8) -> Self {
        match raw {
            IDLE => AnimationState::Idle,
            RUNNING | COMPLETING => AnimationState::Running,
            COMPLETED => AnimationState::Completed,
            _ => AnimationState::Cancelled,
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

struct AnimationInner {
    duration: Duration,
    easing: Easing,
    tick_interval: Duration,
    state: AtomicU8,
    on_update: UpdateCallback,
    on_complete: Mutex<Option<CompleteCallback>>,
    /// Ticking thread, present while running
    ticker: Mutex<Option<Thread>>,
}

impl AnimationInner {
    /// Map elapsed time to `0.0..=1.0`; zero duration is already finished
    fn normalized_time(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    fn is_running(&self) -> bool {
        matches!(self.state.load(Ordering::Acquire), RUNNING | COMPLETING)
    }

    /// Natural completion; loses silently to a concurrent `stop()`
    fn complete(&self) {
        if self
            .state
            .compare_exchange(RUNNING, COMPLETING, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return;
        }

        let callback = lock(&self.on_complete).take();
        if let Some(callback) = callback {
            callback();
        }

        self.state.store(COMPLETED, Ordering::Release);
        tracing::debug!("Animation completed after {:?}", self.duration);
    }

    /// Hand progress to `on_update` unless the animation has left `Running`
    ///
    /// A `stop()` racing this check may still see one update in flight.
    fn deliver(&self, progress: f64) -> bool {
        if self.state.load(Ordering::Acquire) != RUNNING {
            return false;
        }
        (self.on_update)(progress);
        true
    }

    /// Undo a `start()` whose thread never spawned; a concurrent `stop()` wins
    fn abandon_start(&self) {
        let _ = self
            .state
            .compare_exchange(RUNNING, IDLE, Ordering::AcqRel, Ordering::Acquire);
    }

    fn run_ticks(self: Arc<Self>, started: Instant) {
        *lock(&self.ticker) = Some(thread::current());
        let mut ticks: u64 = 0;

        loop {
            let frame_start = Instant::now();

            if self.state.load(Ordering::Acquire) != RUNNING {
                break;
            }

            let t = self.normalized_time(started.elapsed());
            let progress = self.easing.apply(t);
            ticks += 1;
            tracing::trace!("Animation tick {}: t={:.3}, progress={:.3}", ticks, t, progress);
            if !self.deliver(progress) {
                break;
            }

            if t >= 1.0 {
                self.complete();
                break;
            }

            // Sleep for the remaining frame time; stop() unparks early
            let elapsed = frame_start.elapsed();
            if elapsed < self.tick_interval {
                thread::park_timeout(self.tick_interval - elapsed);
            }
        }

        *lock(&self.ticker) = None;
    }
}

/// A single timed transition driven by a background thread
///
/// Cloning yields another handle to the same animation. All methods take
/// `&self` and may be called from any thread, including from inside the
/// animation's own callbacks.
#[derive(Clone)]
pub struct Animation {
    inner: Arc<AnimationInner>,
}

impl Animation {
    /// Create an idle animation
    ///
    /// `easing` of `None` means linear progress.
    pub fn new<F>(duration: Duration, easing: Option<Easing>, on_update: F) -> Self
    where
        F: Fn(f64) + Send + Sync + 'static,
    {
        Self::builder(duration)
            .easing(easing.unwrap_or_default())
            .build(on_update)
    }

    /// Start configuring an animation of the given duration
    pub fn builder(duration: Duration) -> AnimationBuilder {
        AnimationBuilder {
            duration,
            easing: Easing::Linear,
            tick_interval: DEFAULT_TICK_INTERVAL,
            on_complete: None,
        }
    }

    /// Create an idle animation using the configured defaults
    pub fn with_config<F>(config: &AnimationConfig, on_update: F) -> Self
    where
        F: Fn(f64) + Send + Sync + 'static,
    {
        AnimationBuilder::from_config(config).build(on_update)
    }

    /// Attach the completion callback, replacing any previous one
    ///
    /// Must happen before the animation completes to have any effect.
    pub fn set_on_complete<F>(&self, on_complete: F)
    where
        F: FnOnce() + Send + 'static,
    {
        *lock(&self.inner.on_complete) = Some(Box::new(on_complete));
    }

    /// Begin ticking on a background thread
    ///
    /// Only an idle animation starts; repeated calls are no-ops.
    pub fn start(&self) {
        if self
            .inner
            .state
            .compare_exchange(IDLE, RUNNING, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::trace!("Animation::start ignored in state {:?}", self.state());
            return;
        }

        let started = Instant::now();
        let inner = Arc::clone(&self.inner);

        let spawned = thread::Builder::new()
            .name("qmui-animation".into())
            .spawn(move || inner.run_ticks(started));

        match spawned {
            // The thread detaches and exits once the animation leaves the
            // running state.
            Ok(_) => {
                tracing::debug!(
                    "Animation started: duration={:?}, easing={}, tick={:?}",
                    self.inner.duration,
                    self.inner.easing,
                    self.inner.tick_interval
                );
            }
            Err(err) => {
                tracing::error!("Failed to spawn animation thread: {}", err);
                self.inner.abandon_start();
            }
        }
    }

    /// Cancel a running animation without firing `on_complete`
    ///
    /// No-op unless running. Once this returns, `is_running()` is false and
    /// no completion callback will be observed. An `on_update` already past
    /// its state check on the ticking thread may still finish.
    pub fn stop(&self) {
        if self
            .inner
            .state
            .compare_exchange(RUNNING, CANCELLED, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return;
        }

        // Release the completion callback's captures right away
        drop(lock(&self.inner.on_complete).take());

        if let Some(ticker) = lock(&self.inner.ticker).as_ref() {
            ticker.unpark();
        }
        tracing::debug!("Animation cancelled");
    }

    /// Point-in-time running check
    pub fn is_running(&self) -> bool {
        self.inner.is_running()
    }

    /// Current lifecycle state
    pub fn state(&self) -> AnimationState {
        AnimationState::from_raw(self.inner.state.load(Ordering::Acquire))
    }

    pub fn duration(&self) -> Duration {
        self.inner.duration
    }

    pub fn easing(&self) -> Easing {
        self.inner.easing
    }

    pub fn tick_interval(&self) -> Duration {
        self.inner.tick_interval
    }
}

impl fmt::Debug for Animation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Animation")
            .field("duration", &self.inner.duration)
            .field("easing", &self.inner.easing)
            .field("tick_interval", &self.inner.tick_interval)
            .field("state", &self.state())
            .finish()
    }
}

/// Builder for [`Animation`]
pub struct AnimationBuilder {
    duration: Duration,
    easing: Easing,
    tick_interval: Duration,
    on_complete: Option<CompleteCallback>,
}

impl AnimationBuilder {
    /// Builder seeded with the configured duration, easing and cadence
    pub fn from_config(config: &AnimationConfig) -> Self {
        Animation::builder(config.default_duration())
            .easing(config.default_easing)
            .tick_interval(config.tick_interval())
    }

    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Tick cadence; clamped to at least 1ms
    pub fn tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval.max(MIN_TICK_INTERVAL);
        self
    }

    pub fn on_complete<F>(mut self, on_complete: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        self.on_complete = Some(Box::new(on_complete));
        self
    }

    /// Finish with the per-tick update callback; the animation starts idle
    pub fn build<F>(self, on_update: F) -> Animation
    where
        F: Fn(f64) + Send + Sync + 'static,
    {
        Animation {
            inner: Arc::new(AnimationInner {
                duration: self.duration,
                easing: self.easing,
                tick_interval: self.tick_interval,
                state: AtomicU8::new(IDLE),
                on_update: Arc::new(on_update),
                on_complete: Mutex::new(self.on_complete),
                ticker: Mutex::new(None),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn wait_until_finished(animation: &Animation) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while animation.is_running() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(2));
        }
    }

    #[test]
    fn test_new_animation_is_idle() {
        let animation = Animation::new(Duration::from_millis(100), None, |_| {});
        assert_eq!(animation.state(), AnimationState::Idle);
        assert!(!animation.is_running());
        assert_eq!(animation.easing(), Easing::Linear);
        assert_eq!(animation.tick_interval(), DEFAULT_TICK_INTERVAL);
    }

    #[test]
    fn test_stop_before_start_is_noop() {
        let animation = Animation::new(Duration::from_millis(10), None, |_| {});
        animation.stop();
        assert_eq!(animation.state(), AnimationState::Idle);
    }

    #[test]
    fn test_zero_duration_completes_on_first_tick() {
        let updates = Arc::new(Mutex::new(Vec::new()));
        let sink = updates.clone();
        let completions = Arc::new(AtomicUsize::new(0));
        let counter = completions.clone();

        let animation = Animation::builder(Duration::ZERO)
            .easing(Easing::EaseOutBack)
            .on_complete(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .build(move |p| sink.lock().unwrap().push(p));
        animation.start();
        wait_until_finished(&animation);

        assert_eq!(animation.state(), AnimationState::Completed);
        assert_eq!(completions.load(Ordering::SeqCst), 1);
        assert_eq!(*updates.lock().unwrap(), vec![1.0]);
    }

    #[test]
    fn test_last_update_is_final_progress() {
        let last = Arc::new(Mutex::new(f64::NAN));
        let sink = last.clone();

        let animation = Animation::builder(Duration::from_millis(40))
            .easing(Easing::EaseInOutSine)
            .tick_interval(Duration::from_millis(5))
            .build(move |p| *sink.lock().unwrap() = p);
        animation.start();
        wait_until_finished(&animation);

        assert!((*last.lock().unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_restart_after_completion_is_noop() {
        let ticks = Arc::new(AtomicUsize::new(0));
        let counter = ticks.clone();
        let animation = Animation::new(Duration::ZERO, None, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        animation.start();
        wait_until_finished(&animation);
        animation.start();
        thread::sleep(Duration::from_millis(20));

        assert_eq!(ticks.load(Ordering::SeqCst), 1);
        assert_eq!(animation.state(), AnimationState::Completed);
    }

    #[test]
    fn test_stop_from_update_callback() {
        let slot: Arc<Mutex<Option<Animation>>> = Arc::new(Mutex::new(None));
        let handle = slot.clone();
        let completions = Arc::new(AtomicUsize::new(0));
        let counter = completions.clone();

        let animation = Animation::new(Duration::from_millis(200), None, move |p| {
            if p > 0.1 {
                if let Some(animation) = handle.lock().unwrap().as_ref() {
                    animation.stop();
                }
            }
        });
        animation.set_on_complete(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        *slot.lock().unwrap() = Some(animation.clone());

        animation.start();
        wait_until_finished(&animation);
        thread::sleep(Duration::from_millis(250));

        assert_eq!(animation.state(), AnimationState::Cancelled);
        assert_eq!(completions.load(Ordering::SeqCst), 0);
        slot.lock().unwrap().take();
    }

    #[test]
    fn test_no_update_once_stopped() {
        let ticks = Arc::new(AtomicUsize::new(0));
        let counter = ticks.clone();
        let animation = Animation::new(Duration::from_millis(10), None, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        animation.inner.state.store(RUNNING, Ordering::Release);
        assert!(animation.inner.deliver(0.5));
        animation.stop();
        assert!(!animation.inner.deliver(1.0));

        assert_eq!(ticks.load(Ordering::SeqCst), 1);
        assert_eq!(animation.state(), AnimationState::Cancelled);
    }

    #[test]
    fn test_abandoned_start_keeps_cancellation() {
        let animation = Animation::new(Duration::from_millis(10), None, |_| {});

        animation.inner.state.store(RUNNING, Ordering::Release);
        animation.stop();
        animation.inner.abandon_start();
        assert_eq!(animation.state(), AnimationState::Cancelled);

        let fresh = Animation::new(Duration::from_millis(10), None, |_| {});
        fresh.inner.state.store(RUNNING, Ordering::Release);
        fresh.inner.abandon_start();
        assert_eq!(fresh.state(), AnimationState::Idle);
    }

    #[test]
    fn test_tick_interval_is_clamped() {
        let animation = Animation::builder(Duration::from_millis(10))
            .tick_interval(Duration::ZERO)
            .build(|_| {});
        assert_eq!(animation.tick_interval(), MIN_TICK_INTERVAL);
    }
}
