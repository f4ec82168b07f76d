//! perfhintd: readiness-gated power hint coordination
//!
//! The daemon sits between a concurrent hint front end and a power policy
//! backend and provides:
//! - One-shot asynchronous bring-up gating all hint processing
//! - Translation of two versioned hint sets into named backend actions
//! - A sustained-performance override that suppresses transient hints
//!
//! Transport is out of scope: [`dispatch::HintDispatcher`] is the surface an
//! RPC adapter clones and calls into.

pub mod backend;
pub mod config;
pub mod dispatch;
pub mod features;
pub mod hints;
pub mod lifecycle;
pub mod properties;
pub mod stats;
