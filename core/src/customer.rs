//! One arrival at the counter.

use crate::rng::SimRng;
use crate::types::{CustomerId, Minute};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    /// Number of tasks the clerk must complete, drawn once at creation.
    pub task_count: u32,
    /// Minute of arrival. Immutable after creation.
    pub entry_time: Minute,
    /// Minute at which service completes. None until this customer reaches
    /// the head of the queue; once set, immutable.
    pub exit_time: Option<Minute>,
}

impl Customer {
    pub fn new(id: CustomerId, entry_time: Minute, rng: &mut dyn SimRng) -> Self {
        Self {
            id,
            task_count: draw_task_count(rng),
            entry_time,
            exit_time: None,
        }
    }

    /// Fix the service completion time. Called when this customer becomes
    /// the head of the queue.
    pub fn schedule_service(&mut self, now: Minute, minutes_per_task: u32) {
        debug_assert!(self.exit_time.is_none(), "service scheduled twice");
        self.exit_time = Some(now + self.task_count * minutes_per_task);
    }

    /// Minutes spent in the facility, defined once service is scheduled.
    pub fn wait_time(&self) -> Option<Minute> {
        self.exit_time.map(|exit| exit - self.entry_time)
    }
}

/// Coin-flip loop: start at 1, keep flipping, add a task per "continue"
/// outcome. Geometric on {1, 2, 3, ...} with P(k) = 0.5^k, mean 2.
fn draw_task_count(rng: &mut dyn SimRng) -> u32 {
    let mut count = 1;
    while rng.chance(0.5) {
        count += 1;
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{FixedRng, PcgRng, SequenceRng};

    #[test]
    fn task_count_is_at_least_one() {
        let mut rng = PcgRng::seeded(11);
        for _ in 0..10_000 {
            assert!(draw_task_count(&mut rng) >= 1);
        }
    }

    #[test]
    fn task_count_is_geometric() {
        let mut rng = PcgRng::seeded(1729);
        let n = 100_000usize;
        let mut buckets = [0usize; 4]; // counts for k = 1..=3, rest in [3]
        for _ in 0..n {
            let k = draw_task_count(&mut rng) as usize;
            buckets[k.min(4) - 1] += 1;
        }
        let freq = |i: usize| buckets[i] as f64 / n as f64;
        assert!((freq(0) - 0.5).abs() < 0.01, "P(1) = {}", freq(0));
        assert!((freq(1) - 0.25).abs() < 0.01, "P(2) = {}", freq(1));
        assert!((freq(2) - 0.125).abs() < 0.01, "P(3) = {}", freq(2));
    }

    #[test]
    fn task_count_reproducible_under_same_seed() {
        let mut a = PcgRng::seeded(42);
        let mut b = PcgRng::seeded(42);
        for _ in 0..1_000 {
            assert_eq!(draw_task_count(&mut a), draw_task_count(&mut b));
        }
    }

    #[test]
    fn scheduling_fixes_exit_and_wait() {
        // Two "continue" flips then a stop: three tasks.
        let mut rng = SequenceRng::new(vec![0.3, 0.4, 0.9]);
        let mut customer = Customer::new(1, 100, &mut rng);
        assert_eq!(customer.task_count, 3);
        assert_eq!(customer.exit_time, None);
        assert_eq!(customer.wait_time(), None);

        customer.schedule_service(104, 2);
        assert_eq!(customer.exit_time, Some(110));
        assert_eq!(customer.wait_time(), Some(10));
    }

    #[test]
    fn single_task_customer() {
        let mut rng = FixedRng(0.75);
        let mut customer = Customer::new(7, 540, &mut rng);
        assert_eq!(customer.task_count, 1);

        customer.schedule_service(540, 1);
        assert_eq!(customer.exit_time, Some(541));
        assert_eq!(customer.wait_time(), Some(1));
    }
}
