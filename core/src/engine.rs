//! The simulation engine at the heart of the post office.
//!
//! STEP ORDER (fixed, documented, never reordered), once per minute:
//!   1. Boundary events (facility opens / closes)
//!   2. Robbery, which short-circuits the rest of the minute
//!   3. Customer arrival
//!   4. Head-of-queue departure
//!
//! RULES:
//!   - The engine owns all mutable state; the driver owns pacing.
//!   - All randomness flows through the injected SimRng, drawn in the
//!     step order above, so a run is reproducible from its seed.
//!   - Every observable change is reported to the EventSink, in order.

use std::collections::VecDeque;

use crate::config::SimConfig;
use crate::customer::Customer;
use crate::error::SimResult;
use crate::event::{RunStats, SimEvent};
use crate::rng::{PcgRng, SimRng};
use crate::robbery::RobberyModel;
use crate::sink::EventSink;
use crate::types::{CustomerId, Minute};

/// Outcome of one [`SimEngine::advance`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum RunState {
    Continuing,
    Ended(RunStats),
}

pub struct SimEngine {
    config: SimConfig,
    rng: Box<dyn SimRng>,
    current_time: Minute,
    queue: VecDeque<Customer>,
    customer_count: CustomerId,
    total_wait_minutes: u64,
    robbery: RobberyModel,
    finished: Option<RunStats>,
}

impl SimEngine {
    /// Validate the configuration and build an engine around the given
    /// random source. Construction is the configure step: it commits all
    /// parameters or none, and an unconfigured engine cannot exist.
    pub fn new(config: SimConfig, rng: Box<dyn SimRng>) -> SimResult<Self> {
        config.validate()?;
        let robbery = RobberyModel::new(&config);
        Ok(Self {
            current_time: config.open,
            queue: VecDeque::new(),
            customer_count: 0,
            total_wait_minutes: 0,
            robbery,
            finished: None,
            rng,
            config,
        })
    }

    /// Convenience constructor over the default PCG source.
    pub fn seeded(config: SimConfig, seed: u64) -> SimResult<Self> {
        Self::new(config, Box::new(PcgRng::seeded(seed)))
    }

    /// The current simulated minute.
    pub fn current_time(&self) -> Minute {
        self.current_time
    }

    /// Customers currently waiting or being served.
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Advance until at least one observable event occurs or the run ends.
    /// Sink callbacks fire synchronously, in order, during the call.
    ///
    /// Total: once a valid configuration has started a run, no step can
    /// fail. After the run ends the engine is inert and every further call
    /// returns the final statistics without emitting anything.
    pub fn advance(&mut self, sink: &mut dyn EventSink) -> RunState {
        if let Some(stats) = &self.finished {
            return RunState::Ended(stats.clone());
        }

        loop {
            if self.current_time > self.config.close && self.queue.is_empty() {
                let stats = self.final_stats();
                sink.emit(&SimEvent::RunEnded { stats: stats.clone() });
                log::debug!(
                    "run ended: customers={} total_wait={}",
                    stats.customer_count,
                    stats.total_wait_minutes
                );
                self.finished = Some(stats.clone());
                return RunState::Ended(stats);
            }

            let now = self.current_time;
            let mut observed = false;

            if now == self.config.open {
                observed = true;
                sink.emit(&SimEvent::FacilityOpened { time: now });
            }
            if now == self.config.close {
                observed = true;
                sink.emit(&SimEvent::FacilityClosed { time: now });
            }

            // A robbery consumes the rest of the minute: no arrival or
            // departure is evaluated, and control returns to the driver.
            if now < self.config.close && self.rng.chance(self.config.robbery_probability) {
                self.run_robbery(sink);
                self.current_time += 1;
                return RunState::Continuing;
            }

            if self.arrival_due(now) {
                observed = true;
                self.admit_customer(sink);
            }

            if self.departure_due(now) {
                observed = true;
                self.complete_head(sink);
            }

            self.current_time += 1;
            if observed {
                return RunState::Continuing;
            }
        }
    }

    fn arrival_due(&mut self, now: Minute) -> bool {
        if now >= self.config.close {
            return false;
        }
        let p = self.robbery.spawn_probability(now);
        self.rng.chance(p)
    }

    fn admit_customer(&mut self, sink: &mut dyn EventSink) {
        let now = self.current_time;
        self.customer_count += 1;
        let mut customer = Customer::new(self.customer_count, now, self.rng.as_mut());
        let id = customer.id;
        if self.queue.is_empty() {
            customer.schedule_service(now, self.config.minutes_per_task);
            self.queue.push_back(customer);
            sink.emit(&SimEvent::ServedImmediately { time: now, customer: id });
        } else {
            self.queue.push_back(customer);
            sink.emit(&SimEvent::Queued {
                time: now,
                customer: id,
                position: self.queue.len(),
            });
        }
    }

    fn departure_due(&self, now: Minute) -> bool {
        matches!(self.queue.front(), Some(head) if head.exit_time == Some(now))
    }

    fn complete_head(&mut self, sink: &mut dyn EventSink) {
        let now = self.current_time;
        let Some(done) = self.queue.pop_front() else {
            return;
        };
        if let Some(exit) = done.exit_time {
            self.total_wait_minutes += u64::from(exit - done.entry_time);
        }
        if let Some(next) = self.queue.front_mut() {
            next.schedule_service(now, self.config.minutes_per_task);
            sink.emit(&SimEvent::HandedOff {
                time: now,
                departed: done.id,
                now_serving: next.id,
            });
        } else {
            sink.emit(&SimEvent::Departed { time: now, customer: done.id });
        }
    }

    /// Clear the queue, roll casualties and the outcome, and enter the
    /// cooling-down state. Interrupted customers contribute their
    /// wait-so-far to the aggregate.
    fn run_robbery(&mut self, sink: &mut dyn EventSink) {
        let now = self.current_time;
        sink.emit(&SimEvent::RobberyStarted { time: now });

        let mut casualties = 0u32;
        for customer in self.queue.drain(..) {
            self.total_wait_minutes += u64::from(now - customer.entry_time);
            if self.rng.chance(self.config.kill_probability) {
                casualties += 1;
            }
        }
        sink.emit(&SimEvent::QueueDispersed { time: now, casualties });

        let succeeded = self.rng.chance(self.config.robbery_success_rate);
        sink.emit(&SimEvent::RobberyResolved { time: now, succeeded });
        self.robbery.record(now, succeeded);
        log::debug!("t={now} robbery: casualties={casualties} succeeded={succeeded}");
    }

    fn final_stats(&self) -> RunStats {
        let mean_wait_minutes = if self.customer_count > 0 {
            Some(self.total_wait_minutes as f64 / f64::from(self.customer_count))
        } else {
            None
        };
        RunStats {
            customer_count: self.customer_count,
            total_wait_minutes: self.total_wait_minutes,
            mean_wait_minutes,
        }
    }
}
