//! Versioned hint identifier sets
//!
//! Two overlapping enumerations: the base set and the extension set that
//! grew out of it. Extension values share the base set's numeric space, so
//! anything the extended dispatch path does not special-case falls back to
//! base handling.

mod ids;

pub use ids::{ExtHintId, HintId};
