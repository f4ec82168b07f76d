//! Low-power state statistics types
//!
//! This platform gathers no residency data; the query surface exists for
//! interface completeness and always reports empty collections.

/// Result status attached to statistics queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
}

/// A voter keeping the platform out of a sleep state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateVoter {
    pub name: String,
    pub total_time_msec: u64,
    pub total_votes: u64,
}

/// Residency of one platform-wide sleep state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformSleepState {
    pub name: String,
    pub residency_msec: u64,
    pub total_transitions: u64,
    pub voters: Vec<StateVoter>,
}

/// Residency of one sleep state within a subsystem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubsystemSleepState {
    pub name: String,
    pub residency_msec: u64,
    pub total_transitions: u64,
    pub last_entry_timestamp_msec: u64,
}

/// Sleep states reported by a single subsystem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubsystemStats {
    pub name: String,
    pub states: Vec<SubsystemSleepState>,
}
