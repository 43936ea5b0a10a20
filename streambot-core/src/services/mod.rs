pub mod discord;
pub mod live_poll_service;

pub use live_poll_service::{CycleOutcome, CycleReport, LivePollService};
