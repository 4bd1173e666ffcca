//! Instrumentation built on top of the [`Emit`](crate::Emit) seam.
//!
//! The emitter itself never logs. Observers wrap it from the outside:
//! - [`Traced`] (enabled via the `logging` feature) records each dispatch with
//!   `tracing`, including how deeply emits are nested.

mod traced;

pub use traced::Traced;
