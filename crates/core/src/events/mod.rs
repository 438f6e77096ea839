//! Domain events module.
//!
//! Provides domain event types and the sink trait for emitting events
//! after successful journal mutations. Views subscribe to these to
//! re-derive their projections from the store.

mod domain_event;
mod sink;

pub use domain_event::*;
pub use sink::*;
