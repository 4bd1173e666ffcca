//! # Handles to individual listener registrations.
//!
//! Every `on`/`once` call returns a [`Subscription`] that identifies exactly one
//! entry. [`ScopedSubscription`] ties that entry's lifetime to a scope.
//!
//! ## Rules
//! - Handles never keep the emitter alive and stay usable after it is dropped
//!   (`is_connected() == false`, `disconnect()` is a no-op).
//! - Clones refer to the same entry; disconnecting one is visible through all.
//! - Dropping a plain [`Subscription`] does **not** remove the listener.

mod scoped;
mod subscription;

pub use scoped::ScopedSubscription;
pub use subscription::Subscription;
