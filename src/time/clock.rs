use std::time::{Duration, Instant};

/// Real, user and system time spent between [`Clock::start`] and [`Clock::end`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Elapsed {
    pub real: Duration,
    pub user: Duration,
    pub system: Duration,
}

impl Elapsed {
    pub fn real_secs(&self) -> f64 {
        self.real.as_secs_f64()
    }

    pub fn user_secs(&self) -> f64 {
        self.user.as_secs_f64()
    }

    pub fn system_secs(&self) -> f64 {
        self.system.as_secs_f64()
    }
}

#[derive(Debug, Clone, Copy)]
struct Snapshot {
    real: Instant,
    user: Duration,
    system: Duration,
}

impl Snapshot {
    fn take() -> Self {
        let (user, system) = cpu_times();
        Self {
            real: Instant::now(),
            user,
            system,
        }
    }
}

#[derive(Debug, Default)]
pub struct Clock {
    started: Option<Snapshot>,
    elapsed: Elapsed,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self) {
        self.started = Some(Snapshot::take());
    }

    /// Stops the clock and returns the measured times. Calling `end`
    /// without a prior `start` yields zero.
    pub fn end(&mut self) -> Elapsed {
        if let Some(start) = self.started.take() {
            let now = Snapshot::take();
            self.elapsed = Elapsed {
                real: now.real.duration_since(start.real),
                user: now.user.checked_sub(start.user).unwrap_or_default(),
                system: now.system.checked_sub(start.system).unwrap_or_default(),
            };
        }
        self.elapsed
    }

    pub fn elapsed(&self) -> Elapsed {
        self.elapsed
    }
}

#[cfg(unix)]
fn cpu_times() -> (Duration, Duration) {
    use nix::sys::resource::{getrusage, UsageWho};
    use nix::sys::time::{TimeVal, TimeValLike};

    fn to_duration(tv: TimeVal) -> Duration {
        Duration::from_micros(tv.num_microseconds().max(0) as u64)
    }

    match getrusage(UsageWho::RUSAGE_SELF) {
        Ok(usage) => (to_duration(usage.user_time()), to_duration(usage.system_time())),
        Err(e) => {
            warn!("getrusage failed: {}", e);
            (Duration::default(), Duration::default())
        }
    }
}

#[cfg(not(unix))]
fn cpu_times() -> (Duration, Duration) {
    (Duration::default(), Duration::default())
}

#[cfg(test)]
mod test {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn test_clock_measures_real_time() {
        let mut clock = Clock::new();
        clock.start();
        sleep(Duration::from_millis(20));
        let elapsed = clock.end();

        assert!(elapsed.real >= Duration::from_millis(20));
        assert_eq!(clock.elapsed(), elapsed);
    }

    #[test]
    fn test_cpu_times_never_go_backwards() {
        let (user, system) = cpu_times();
        let mut acc = 0u64;
        for i in 0..1_000_000u64 {
            acc = acc.wrapping_mul(31).wrapping_add(i);
        }
        let (later_user, later_system) = cpu_times();

        assert!(acc != 1);
        assert!(later_user + later_system >= user + system);
    }

    #[test]
    fn test_end_without_start_is_zero() {
        let mut clock = Clock::new();

        assert_eq!(clock.end(), Elapsed::default());
    }
}
