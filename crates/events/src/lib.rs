//! Domain events and the append-only stock movement history.
//!
//! - [`Event`]: facts emitted by aggregates.
//! - [`MovementRecord`]: one line of an inventory item's history, written on
//!   every quantity change and never edited afterwards.

pub mod event;
pub mod movement;

pub use event::Event;
pub use movement::{MovementAction, MovementRecord, TIMESTAMP_FORMAT};
