//! Event sinks: where the engine reports observable happenings.
//!
//! The engine calls [`EventSink::emit`] synchronously, in order, for
//! every notification produced during an advance. Formatting and
//! display are entirely the sink's concern.

use crate::clock;
use crate::event::SimEvent;

pub trait EventSink {
    fn emit(&mut self, event: &SimEvent);
}

/// Routes every event through the `log` facade at info level.
pub struct LogSink;

impl EventSink for LogSink {
    fn emit(&mut self, event: &SimEvent) {
        match event {
            SimEvent::FacilityOpened { time } => {
                log::info!("{} the post office opens", clock::display(*time));
            }
            SimEvent::FacilityClosed { time } => {
                log::info!("{} the post office closes", clock::display(*time));
            }
            SimEvent::ServedImmediately { time, customer } => {
                log::info!(
                    "{} customer {customer} enters and is served immediately",
                    clock::display(*time)
                );
            }
            SimEvent::Queued { time, customer, position } => {
                log::info!(
                    "{} customer {customer} enters and stands in line as no. {position}",
                    clock::display(*time)
                );
            }
            SimEvent::Departed { time, customer } => {
                log::info!("{} customer {customer} leaves", clock::display(*time));
            }
            SimEvent::HandedOff { time, departed, now_serving } => {
                log::info!(
                    "{} customer {departed} leaves and customer {now_serving} is served",
                    clock::display(*time)
                );
            }
            SimEvent::RobberyStarted { time } => {
                log::info!("{} a robber has entered the post office", clock::display(*time));
            }
            SimEvent::QueueDispersed { casualties, .. } => {
                log::info!("the queue has dispersed and {casualties} customers were killed");
            }
            SimEvent::RobberyResolved { succeeded, .. } => {
                if *succeeded {
                    log::info!("the clerk fails to fight off the robbers");
                } else {
                    log::info!("the clerk fights off the robbers");
                }
            }
            SimEvent::RunEnded { stats } => {
                log::info!(
                    "run ended: {} customers, {} total wait minutes",
                    stats.customer_count,
                    stats.total_wait_minutes
                );
            }
        }
    }
}

/// Buffers every event in memory. Useful for embedding the engine in a
/// driver that polls state between steps, and for tests.
#[derive(Debug, Default)]
pub struct CollectingSink {
    pub events: Vec<SimEvent>,
}

impl EventSink for CollectingSink {
    fn emit(&mut self, event: &SimEvent) {
        self.events.push(event.clone());
    }
}
