//! Fixed-timestep loop driver.
//!
//! Simulation advances in constant quanta no matter how long a rendered frame
//! takes. Each outer iteration samples the clock, runs every simulation step that
//! has become due, then renders and presents exactly once.

use std::time::{Duration, Instant};

use super::frame_rate::FrameRateCounter;

/// Monotonic time source, measured from an arbitrary origin.
pub trait Clock {
    fn now(&mut self) -> Duration;
}

/// Wall clock backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&mut self) -> Duration {
        self.origin.elapsed()
    }
}

/// Callbacks driven by [`FixedTimestep::run`].
///
/// Every fallible hook short-circuits the loop: the error is returned from `run`
/// as-is and no further hook is invoked.
pub trait LoopHooks {
    type Error;

    /// Polled once at the top of every outer iteration.
    fn should_stop(&mut self) -> bool;

    /// Advances the simulation by `dt` seconds, which is always the fixed step.
    fn simulate(&mut self, dt: f64) -> Result<(), Self::Error>;

    fn render(&mut self) -> Result<(), Self::Error>;

    /// Hands control to the windowing layer (buffer swap, event delivery).
    fn present_and_poll(&mut self) -> Result<(), Self::Error>;

    /// Observed frames per second, reported at most once per second.
    fn frame_rate(&mut self, _fps: f64) {}
}

/// Time bookkeeping for a single [`FixedTimestep::run`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopState {
    clock_start: Duration,
    last_time: Duration,
    accumulator: Duration,
}

impl LoopState {
    pub fn new(now: Duration) -> Self {
        Self {
            clock_start: now,
            last_time: now,
            accumulator: Duration::ZERO,
        }
    }

    /// Moves the baseline to `now` and banks the elapsed time.
    ///
    /// Returns the raw delta. The banked amount is clamped to `max_delta` when set;
    /// a clock that goes backwards banks nothing.
    pub fn advance(&mut self, now: Duration, max_delta: Option<Duration>) -> Duration {
        let delta = now.saturating_sub(self.last_time);
        self.last_time = now;

        let banked = match max_delta {
            Some(max) => delta.min(max),
            None => delta,
        };
        self.accumulator += banked;
        delta
    }

    /// Takes one `step` out of the accumulator if a whole one is available.
    pub fn try_consume(&mut self, step: Duration) -> bool {
        if self.accumulator >= step {
            self.accumulator -= step;
            true
        } else {
            false
        }
    }

    pub fn accumulator(&self) -> Duration {
        self.accumulator
    }

    /// Wall time covered between the loop start and the latest sample.
    pub fn elapsed(&self) -> Duration {
        self.last_time.saturating_sub(self.clock_start)
    }
}

/// Summary returned when a loop stops normally.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoopStats {
    /// Outer iterations, i.e. rendered frames.
    pub iterations: u64,
    /// Simulation steps taken.
    pub steps: u64,
    pub elapsed: Duration,
}

/// Fixed-timestep loop configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedTimestep {
    step: Duration,
    max_frame_delta: Option<Duration>,
}

impl FixedTimestep {
    pub const DEFAULT_RATE_HZ: u32 = 60;
    pub const DEFAULT_MAX_FRAME_DELTA: Duration = Duration::from_millis(250);

    const MIN_STEP: Duration = Duration::from_nanos(1);

    /// Steps `rate_hz` times per simulated second. A rate of zero is treated as one.
    pub fn from_hz(rate_hz: u32) -> Self {
        Self::with_step(Duration::from_secs(1) / rate_hz.max(1))
    }

    pub fn with_step(step: Duration) -> Self {
        Self {
            step: step.max(Self::MIN_STEP),
            max_frame_delta: Some(Self::DEFAULT_MAX_FRAME_DELTA),
        }
    }

    /// Caps how much wall time a single iteration may bank. `None` disables the cap,
    /// which lets a long stall trigger an arbitrarily long catch-up burst.
    pub fn max_frame_delta(mut self, max_frame_delta: Option<Duration>) -> Self {
        self.max_frame_delta = max_frame_delta;
        self
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    pub fn run<C, H>(&self, clock: &mut C, hooks: &mut H) -> Result<LoopStats, H::Error>
    where
        C: Clock,
        H: LoopHooks,
    {
        let dt = self.step.as_secs_f64();
        let mut state = LoopState::new(clock.now());
        let mut frame_rate = FrameRateCounter::default();
        let mut stats = LoopStats::default();

        while !hooks.should_stop() {
            let delta = state.advance(clock.now(), self.max_frame_delta);

            while state.try_consume(self.step) {
                hooks.simulate(dt)?;
                stats.steps += 1;
            }

            hooks.render()?;
            hooks.present_and_poll()?;
            stats.iterations += 1;

            if let Some(fps) = frame_rate.record(delta) {
                hooks.frame_rate(fps);
            }
        }

        stats.elapsed = state.elapsed();
        Ok(stats)
    }
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::from_hz(Self::DEFAULT_RATE_HZ)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Replays a fixed list of deltas. The first sample is the loop start.
    pub(crate) struct ScriptedClock {
        now: Duration,
        deltas: std::vec::IntoIter<Duration>,
        started: bool,
    }

    impl ScriptedClock {
        pub(crate) fn new(deltas: &[f64]) -> Self {
            let deltas: Vec<_> = deltas.iter().map(|d| Duration::from_secs_f64(*d)).collect();
            Self {
                now: Duration::ZERO,
                deltas: deltas.into_iter(),
                started: false,
            }
        }
    }

    impl Clock for ScriptedClock {
        fn now(&mut self) -> Duration {
            if !self.started {
                self.started = true;
            } else if let Some(delta) = self.deltas.next() {
                self.now += delta;
            }
            self.now
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Simulate(f64),
        Render,
        Present,
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
        stop_after: usize,
        presents: usize,
        fail_render_at: Option<usize>,
        render_attempts: usize,
        reported: Vec<f64>,
    }

    impl Recorder {
        fn stopping_after(iterations: usize) -> Self {
            Self {
                stop_after: iterations,
                ..Default::default()
            }
        }

        fn count(&self, call: fn(&Call) -> bool) -> usize {
            self.calls.iter().filter(|c| call(c)).count()
        }

        fn simulations(&self) -> usize {
            self.count(|c| matches!(c, Call::Simulate(_)))
        }

        fn renders(&self) -> usize {
            self.count(|c| matches!(c, Call::Render))
        }
    }

    impl LoopHooks for Recorder {
        type Error = String;

        fn should_stop(&mut self) -> bool {
            self.presents >= self.stop_after
        }

        fn simulate(&mut self, dt: f64) -> Result<(), String> {
            self.calls.push(Call::Simulate(dt));
            Ok(())
        }

        fn render(&mut self) -> Result<(), String> {
            self.render_attempts += 1;
            if self.fail_render_at == Some(self.render_attempts) {
                return Err(format!("render {} failed", self.render_attempts));
            }
            self.calls.push(Call::Render);
            Ok(())
        }

        fn present_and_poll(&mut self) -> Result<(), String> {
            self.presents += 1;
            self.calls.push(Call::Present);
            Ok(())
        }

        fn frame_rate(&mut self, fps: f64) {
            self.reported.push(fps);
        }
    }

    fn sixty_hz_unclamped() -> FixedTimestep {
        FixedTimestep::from_hz(60).max_frame_delta(None)
    }

    #[test]
    fn sixty_hz_step_is_one_sixtieth() {
        let step = FixedTimestep::default().step();
        assert_eq!(step, Duration::from_nanos(16_666_666));
    }

    #[test]
    fn three_twenty_ms_frames_take_three_steps() {
        let mut clock = ScriptedClock::new(&[0.02, 0.02, 0.02]);
        let mut hooks = Recorder::stopping_after(3);
        let stats = sixty_hz_unclamped().run(&mut clock, &mut hooks).unwrap();

        assert_eq!(hooks.simulations(), 3);
        assert_eq!(hooks.renders(), 3);
        assert_eq!(stats.steps, 3);
        assert_eq!(stats.iterations, 3);
        assert_eq!(stats.elapsed, Duration::from_millis(60));
    }

    #[test]
    fn long_frame_catches_up_before_single_render() {
        let mut clock = ScriptedClock::new(&[0.2]);
        let mut hooks = Recorder::stopping_after(1);
        sixty_hz_unclamped().run(&mut clock, &mut hooks).unwrap();

        let step = FixedTimestep::default().step().as_secs_f64();
        let mut expected = vec![Call::Simulate(step); 12];
        expected.push(Call::Render);
        expected.push(Call::Present);
        assert_eq!(hooks.calls, expected);
    }

    #[test]
    fn default_clamp_still_allows_two_hundred_ms() {
        let mut clock = ScriptedClock::new(&[0.2]);
        let mut hooks = Recorder::stopping_after(1);
        FixedTimestep::default().run(&mut clock, &mut hooks).unwrap();
        assert_eq!(hooks.simulations(), 12);
    }

    #[test]
    fn stall_is_clamped_to_max_frame_delta() {
        let mut clock = ScriptedClock::new(&[5.0]);
        let mut hooks = Recorder::stopping_after(1);
        let stats = FixedTimestep::default().run(&mut clock, &mut hooks).unwrap();

        // 250 ms at 60 Hz
        assert_eq!(stats.steps, 15);
        assert_eq!(stats.elapsed, Duration::from_secs(5));
    }

    #[test]
    fn stop_before_first_iteration_calls_nothing() {
        let mut clock = ScriptedClock::new(&[1.0]);
        let mut hooks = Recorder::stopping_after(0);
        let stats = FixedTimestep::default().run(&mut clock, &mut hooks).unwrap();

        assert!(hooks.calls.is_empty());
        assert_eq!(stats, LoopStats::default());
    }

    #[test]
    fn renders_once_per_iteration_until_stopped() {
        let mut clock = ScriptedClock::new(&[0.001, 0.05, 0.0, 0.016, 0.3, 0.5, 0.5]);
        let mut hooks = Recorder::stopping_after(5);
        FixedTimestep::default().run(&mut clock, &mut hooks).unwrap();

        assert_eq!(hooks.renders(), 5);
        assert_eq!(hooks.calls.last(), Some(&Call::Present));

        // render and present alternate, with simulation only in between
        let frame_calls: Vec<_> = hooks
            .calls
            .iter()
            .filter(|c| !matches!(c, Call::Simulate(_)))
            .collect();
        for pair in frame_calls.chunks(2) {
            assert_eq!(pair, [&Call::Render, &Call::Present]);
        }
    }

    #[test]
    fn simulated_time_tracks_wall_time_within_one_step() {
        let deltas = [0.013, 0.021, 0.0049, 0.033, 0.0161, 0.017, 0.1, 0.0007, 0.04];
        let total: f64 = deltas.iter().sum();
        let mut clock = ScriptedClock::new(&deltas);
        let mut hooks = Recorder::stopping_after(deltas.len());
        let timestep = sixty_hz_unclamped();
        let stats = timestep.run(&mut clock, &mut hooks).unwrap();

        let simulated = stats.steps as f64 * timestep.step().as_secs_f64();
        assert!(simulated <= total + 1e-6);
        assert!(total - simulated < timestep.step().as_secs_f64());
    }

    #[test]
    fn accumulator_stays_below_one_step() {
        let step = FixedTimestep::default().step();
        let mut state = LoopState::new(Duration::ZERO);
        let mut now = Duration::ZERO;
        for millis in [3, 17, 16, 40, 1, 0, 99, 33] {
            now += Duration::from_millis(millis);
            state.advance(now, None);
            while state.try_consume(step) {}
            assert!(state.accumulator() < step);
        }
    }

    #[test]
    fn backwards_clock_banks_nothing() {
        let mut state = LoopState::new(Duration::from_secs(2));
        let delta = state.advance(Duration::from_secs(1), None);
        assert_eq!(delta, Duration::ZERO);
        assert_eq!(state.accumulator(), Duration::ZERO);
    }

    #[test]
    fn hook_error_stops_the_loop() {
        let mut clock = ScriptedClock::new(&[0.02, 0.02, 0.02]);
        let mut hooks = Recorder {
            stop_after: 10,
            fail_render_at: Some(2),
            ..Default::default()
        };
        let err = FixedTimestep::default()
            .run(&mut clock, &mut hooks)
            .unwrap_err();

        assert_eq!(err, "render 2 failed");
        assert_eq!(hooks.presents, 1);
    }

    #[test]
    fn frame_rate_is_reported_once_per_second() {
        let deltas = vec![0.1; 25];
        let mut clock = ScriptedClock::new(&deltas);
        let mut hooks = Recorder::stopping_after(deltas.len());
        FixedTimestep::default().run(&mut clock, &mut hooks).unwrap();

        assert_eq!(hooks.reported.len(), 2);
        assert!((hooks.reported[0] - 10.0).abs() < 1e-6);
    }

    #[test]
    fn zero_rate_and_zero_step_do_not_spin() {
        assert_eq!(FixedTimestep::from_hz(0).step(), Duration::from_secs(1));
        assert_eq!(
            FixedTimestep::with_step(Duration::ZERO).step(),
            Duration::from_nanos(1)
        );
    }
}
