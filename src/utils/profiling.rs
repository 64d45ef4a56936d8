use std::time::{Duration, Instant};

use log::{log_enabled, Level};

/// Per-phase timings and counters gathered during one world step.
#[derive(Debug, Default, Clone, Copy)]
pub struct StepProfile {
    pub broad_phase_time: Duration,
    pub narrow_phase_time: Duration,
    pub solver_time: Duration,
    pub integrator_time: Duration,
    pub total_time: Duration,

    pub body_count: usize,
    pub pair_count: usize,
    pub contact_count: usize,
    pub awake_count: usize,
}

impl StepProfile {
    /// Writes the profile through the `log` facade at debug level.
    pub fn report(&self) {
        let total_us = self.total_time.as_micros() as f32;
        if total_us < 1.0 || !log_enabled!(Level::Debug) {
            return;
        }

        log::debug!(
            "bodies: {}, awake: {}, pairs: {}, contacts: {}",
            self.body_count,
            self.awake_count,
            self.pair_count,
            self.contact_count
        );
        log::debug!(
            "step {:.3} ms (broad {:.1}%, narrow {:.1}%, solver {:.1}%, integrate {:.1}%)",
            self.total_time.as_secs_f32() * 1000.0,
            share(self.broad_phase_time, total_us),
            share(self.narrow_phase_time, total_us),
            share(self.solver_time, total_us),
            share(self.integrator_time, total_us),
        );
    }
}

fn share(phase: Duration, total_us: f32) -> f32 {
    (phase.as_micros() as f32 / total_us) * 100.0
}

/// Adds the elapsed time of a scope to `output` and traces it.
pub struct ScopedTimer<'a> {
    label: &'static str,
    start: Instant,
    output: &'a mut Duration,
}

impl<'a> ScopedTimer<'a> {
    pub fn new(label: &'static str, output: &'a mut Duration) -> Self {
        if log_enabled!(Level::Trace) {
            log::trace!("start {label}");
        }
        Self {
            label,
            start: Instant::now(),
            output,
        }
    }
}

impl<'a> Drop for ScopedTimer<'a> {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed();
        *self.output += elapsed;
        if log_enabled!(Level::Trace) {
            log::trace!("end {} ({} µs)", self.label, elapsed.as_micros());
        }
    }
}
