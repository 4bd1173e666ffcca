//! Error types used by the emitter and its listeners.
//!
//! This module defines two error enums:
//!
//! - [`ListenerError`]: what a listener returns when it fails.
//! - [`EmitError`]: what [`Emitter::emit`](crate::Emitter::emit) returns when a
//!   listener in the dispatch pass failed.
//!
//! Both types provide helper methods (`as_label`, `as_message`) for logging/metrics.
//!
//! ## Propagation
//! ```text
//! emit("a") ─► listener #1 ─► emit("b") ─► listener #4 ── Err(Fail)
//!                   │                           │
//!                   │    ListenerFailed{b, #4} ◄┘
//!                   │
//!   Err(Nested(..)) ┘  (via `?` inside listener #1)
//!        │
//!        ▼
//! ListenerFailed{a, #1, Nested(ListenerFailed{b, #4, Fail})}
//! ```
//! [`EmitError::origin`] walks this chain down to where the failure started.

use thiserror::Error;

use crate::listeners::ListenerId;

/// # Errors produced by listeners.
///
/// A listener returns `Ok(())` when it is done; the value is otherwise ignored.
/// Returning an error aborts the remainder of the dispatch pass it runs in.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ListenerError {
    /// Listener failed while handling the event.
    #[error("listener failed: {error}")]
    Fail {
        /// The underlying error message.
        error: String,
    },

    /// A nested emit performed by the listener failed.
    #[error("nested emit failed: {0}")]
    Nested(Box<EmitError>),
}

impl ListenerError {
    /// Shorthand for [`ListenerError::Fail`].
    ///
    /// # Example
    /// ```
    /// use reemit::ListenerError;
    ///
    /// let err = ListenerError::fail("disk full");
    /// assert_eq!(err.to_string(), "listener failed: disk full");
    /// ```
    pub fn fail(error: impl Into<String>) -> Self {
        ListenerError::Fail {
            error: error.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            ListenerError::Fail { .. } => "listener_failed",
            ListenerError::Nested(_) => "listener_nested_failed",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            ListenerError::Fail { error } => format!("error: {error}"),
            ListenerError::Nested(inner) => format!("nested: {}", inner.as_message()),
        }
    }
}

impl From<EmitError> for ListenerError {
    fn from(err: EmitError) -> Self {
        ListenerError::Nested(Box::new(err))
    }
}

/// # Errors produced by a dispatch pass.
///
/// Listeners that ran before the failing one stay invoked and every registry
/// change made up to that point stays in effect. Listeners after it in the
/// same pass are not invoked and are never retried.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum EmitError {
    /// A listener returned an error.
    #[error("listener {listener} on event {event} failed: {source}")]
    ListenerFailed {
        /// Debug rendering of the event name.
        event: String,
        /// The failing listener.
        listener: ListenerId,
        /// What the listener returned.
        source: ListenerError,
    },
}

impl EmitError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use reemit::{Emitter, ListenerError};
    ///
    /// let em: Emitter<u32> = Emitter::new();
    /// em.on("tick", |_| Err(ListenerError::fail("boom")));
    ///
    /// let err = em.emit("tick", &1).unwrap_err();
    /// assert_eq!(err.as_label(), "emit_listener_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            EmitError::ListenerFailed { .. } => "emit_listener_failed",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            EmitError::ListenerFailed {
                event,
                listener,
                source,
            } => format!("event={event} listener={listener} {}", source.as_message()),
        }
    }

    /// The listener that failed in this pass.
    pub fn listener(&self) -> ListenerId {
        match self {
            EmitError::ListenerFailed { listener, .. } => *listener,
        }
    }

    /// The event this pass was dispatching (Debug rendering).
    pub fn event(&self) -> &str {
        match self {
            EmitError::ListenerFailed { event, .. } => event,
        }
    }

    /// Follows nested failures down to the pass where the failure originated.
    ///
    /// Returns `self` when the failing listener did not fail because of a nested emit.
    pub fn origin(&self) -> &EmitError {
        let mut current = self;
        while let EmitError::ListenerFailed {
            source: ListenerError::Nested(inner),
            ..
        } = current
        {
            current = inner.as_ref();
        }
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failed(event: &str, id: u64, source: ListenerError) -> EmitError {
        EmitError::ListenerFailed {
            event: event.to_string(),
            listener: ListenerId::new(id),
            source,
        }
    }

    #[test]
    fn test_labels_are_stable() {
        assert_eq!(ListenerError::fail("x").as_label(), "listener_failed");
        let nested = ListenerError::from(failed("\"a\"", 1, ListenerError::fail("x")));
        assert_eq!(nested.as_label(), "listener_nested_failed");
        assert_eq!(
            failed("\"a\"", 1, ListenerError::fail("x")).as_label(),
            "emit_listener_failed"
        );
    }

    #[test]
    fn test_display_names_event_and_listener() {
        let err = failed("\"save\"", 3, ListenerError::fail("disk full"));
        assert_eq!(
            err.to_string(),
            "listener #3 on event \"save\" failed: listener failed: disk full"
        );
        assert_eq!(err.as_message(), "event=\"save\" listener=#3 error: disk full");
    }

    #[test]
    fn test_origin_walks_nested_chain() {
        let inner = failed("\"b\"", 4, ListenerError::fail("boom"));
        let middle = failed("\"a\"", 2, ListenerError::from(inner));
        let outer = failed("\"root\"", 1, ListenerError::from(middle));

        let origin = outer.origin();
        assert_eq!(origin.listener(), ListenerId::new(4));
        assert_eq!(origin.event(), "\"b\"");
        assert_eq!(outer.listener(), ListenerId::new(1));
    }

    #[test]
    fn test_origin_of_flat_failure_is_self() {
        let err = failed("\"a\"", 9, ListenerError::fail("x"));
        assert_eq!(err.origin().listener(), ListenerId::new(9));
    }

    #[test]
    fn test_source_chain_is_exposed() {
        use std::error::Error as _;

        let err = failed("\"a\"", 1, ListenerError::fail("x"));
        let source = err.source().map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("listener failed: x"));
    }
}
