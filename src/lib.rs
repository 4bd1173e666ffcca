//! # reemit
//!
//! **reemit** is a synchronous, re-entrant event emitter for Rust.
//!
//! It binds named events to ordered lists of listeners, supports one-shot
//! listeners, and lets listeners mutate the registry (subscribe, unsubscribe,
//! remove themselves, emit again) while a dispatch is in progress without
//! corrupting iteration or breaking ordering.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   on / once / on_extended / forward          off_all / clear / Subscription::disconnect
//!                 │                                            │
//!                 ▼                                            ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Emitter (cheap Clone handle)                                     │
//! │  - Registry behind a Mutex, held only for mutation and snapshots  │
//! │      event ─► [ Listener #1, Listener #4, Listener #7 ]           │
//! │      event ─► [ Listener #2 ]                                     │
//! │  - Listener = handler + once flag + liveness flag + ListenerId    │
//! └──────────────┬────────────────────────────────────────────────────┘
//!                │ emit(event, &args)
//!                ▼
//!        snapshot = [#1, #4, #7]     (entries added later are not in it)
//!                │
//!        for each entry ─► still registered? ── no ──► skip
//!                │ yes
//!                ├─ once? detach first
//!                └─ call handler (may re-enter the emitter)
//! ```
//!
//! ### Dispatch guarantees
//! - Listeners run in registration order, on the caller's thread, before
//!   `emit` returns.
//! - A listener added during a pass runs from the next emit on.
//! - A listener removed during a pass is skipped if its turn has not come yet.
//! - A once listener runs at most once, and is already removed when it runs.
//! - Nested emits complete before the outer pass resumes.
//! - The first failing listener aborts its pass; the error reaches the caller.
//!
//! ## Features
//! | Area              | Description                                                      | Key types / traits                          |
//! |-------------------|------------------------------------------------------------------|---------------------------------------------|
//! | **Registry**      | Subscribe, once, unsubscribe-all, emit, introspection.           | [`Emitter`], [`WeakEmitter`]                |
//! | **Handles**       | Remove or query one registration; scope-bound registrations.     | [`Subscription`], [`ScopedSubscription`]    |
//! | **Errors**        | Typed listener and dispatch failures with nested origin.         | [`ListenerError`], [`EmitError`]            |
//! | **Composition**   | Decorate emit from the outside.                                  | [`Emit`]                                    |
//! | **Configuration** | Allocation settings.                                             | [`Config`]                                  |
//!
//! ## Optional features
//! - `logging` (default): exports [`Traced`], an [`Emit`] decorator that records
//!   dispatches and their nesting depth with `tracing`.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use reemit::Emitter;
//!
//! let em: Emitter<()> = Emitter::new();
//! let count = Arc::new(AtomicUsize::new(0));
//!
//! let (weak, c) = (em.downgrade(), count.clone());
//! em.on("foo", move |_| {
//!     if c.fetch_add(1, Ordering::SeqCst) == 0 {
//!         let em = weak.upgrade().expect("emitter alive");
//!         let c = c.clone();
//!         em.once("foo", move |_| {
//!             c.fetch_add(1, Ordering::SeqCst);
//!             Ok(())
//!         });
//!         // The nested pass takes its own snapshot and sees the once listener.
//!         em.emit("foo", &())?;
//!     }
//!     Ok(())
//! });
//!
//! em.emit("foo", &()).unwrap();
//! assert_eq!(count.load(Ordering::SeqCst), 3);
//!
//! em.emit("foo", &()).unwrap();
//! assert_eq!(count.load(Ordering::SeqCst), 4);
//! ```
mod config;
mod emit;
mod emitter;
mod error;
mod listeners;
mod subscription;

// ---- Public re-exports ----

pub use config::Config;
pub use emit::Emit;
pub use emitter::{Emitter, WeakEmitter};
pub use error::{EmitError, ListenerError};
pub use listeners::ListenerId;
pub use subscription::{ScopedSubscription, Subscription};

// Optional: expose the tracing decorator.
// Enabled by default; opt out with `default-features = false`.
#[cfg(feature = "logging")]
mod observers;
#[cfg(feature = "logging")]
pub use observers::Traced;
