//! Readiness-gated hint dispatch
//!
//! The dispatcher is the externally callable surface: hint delivery in two
//! set versions, interactive-mode notification, feature toggles, and
//! low-power statistics queries. Hints are dropped until bring-up publishes
//! the backend handles.

mod dispatcher;

pub use dispatcher::HintDispatcher;
