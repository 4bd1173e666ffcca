//! Listener entries: the unit stored in an event's sequence.
//!
//! ## Contents
//! - [`ListenerId`] per-emitter unique identity of one registration
//! - `Listener` the entry itself (handler + `once` flag + liveness flag)
//!
//! ## Lifecycle
//! ```text
//! on()/once() ──► Registered ──(dispatch reaches it, once=false)──► Registered
//!                     │
//!                     ├──(dispatch reaches it, once=true)──► detach ──► invoke ──► Removed
//!                     │
//!                     └──(off_all / disconnect / clear)──────────────────────────► Removed
//! ```
//! An entry never returns to `Registered` once removed. Registering the same
//! handler again creates a new entry with a new id.

mod id;
mod listener;

pub use id::ListenerId;
pub(crate) use listener::{Listener, ListenerFn};
