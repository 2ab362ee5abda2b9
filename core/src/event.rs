//! Observable happenings, reported to the attached sink.
//!
//! RULE: The engine communicates with the presentation layer ONLY
//! through these events. It never formats text and never prints.

use crate::types::{CustomerId, Minute};
use serde::{Deserialize, Serialize};

/// Every notification the engine can emit during a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SimEvent {
    FacilityOpened {
        time: Minute,
    },
    FacilityClosed {
        time: Minute,
    },
    /// A customer arrived to an empty counter and service began at once.
    ServedImmediately {
        time: Minute,
        customer: CustomerId,
    },
    /// A customer arrived and joined the line. Position is 1-indexed,
    /// counted after the append.
    Queued {
        time: Minute,
        customer: CustomerId,
        position: usize,
    },
    /// The head of the queue finished service, leaving the counter empty.
    Departed {
        time: Minute,
        customer: CustomerId,
    },
    /// The head of the queue finished service and the next customer
    /// moved up to the counter.
    HandedOff {
        time: Minute,
        departed: CustomerId,
        now_serving: CustomerId,
    },
    RobberyStarted {
        time: Minute,
    },
    /// The queue scattered; casualties were rolled per queued customer.
    QueueDispersed {
        time: Minute,
        casualties: u32,
    },
    /// Whether the robbers prevailed against the clerk.
    RobberyResolved {
        time: Minute,
        succeeded: bool,
    },
    /// Final aggregate statistics. Emitted exactly once, when the run ends.
    RunEnded {
        stats: RunStats,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunStats {
    pub customer_count: u32,
    pub total_wait_minutes: u64,
    /// `total_wait_minutes / customer_count`; None when nobody showed up.
    pub mean_wait_minutes: Option<f64>,
}
