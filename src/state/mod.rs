//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `RunState`: the phase of a crawl run (idle, running, draining, done)
//! - `HostState`: per-host politeness tracking (last dispatch, crawl delay)

mod host_state;
mod run_state;

// Re-export main types
pub use host_state::HostState;
pub use run_state::RunState;
