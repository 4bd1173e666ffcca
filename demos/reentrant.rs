//! # Example: reentrant
//!
//! A listener that registers a once listener for its own event and emits that
//! event again, from inside the pass that is dispatching it.
//!
//! Every dispatch goes through [`Traced`], so the nesting is visible in the
//! logs (`depth=1`, then `depth=2`).
//!
//! ## Flow
//! ```text
//! emit("foo")                      depth=1, snapshot = [counter]
//!   └─► counter: count=1
//!         ├─► once("foo", bump)    live = [counter, bump]
//!         └─► emit("foo")          depth=2, snapshot = [counter, bump]
//!               ├─► counter: count=2 (no further nesting)
//!               └─► bump (detached first): count=3
//! emit("foo")                      depth=1, snapshot = [counter]
//!   └─► counter: count=4
//! ```
//!
//! ## Run
//! ```bash
//! RUST_LOG=debug cargo run --example reentrant
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use reemit::{Emit, EmitError, Emitter, Traced};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), EmitError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "debug".into()))
        .init();

    let em: Emitter<()> = Emitter::new();
    let traced = Traced::new(em.clone());
    let count = Arc::new(AtomicUsize::new(0));

    let (t, c) = (traced.clone(), count.clone());
    em.on("foo", move |_| {
        let seen = c.fetch_add(1, Ordering::SeqCst) + 1;
        println!("[counter] count={seen}");
        if seen == 1 {
            let c = c.clone();
            t.inner().once("foo", move |_| {
                let seen = c.fetch_add(1, Ordering::SeqCst) + 1;
                println!("[bump] count={seen}");
                Ok(())
            });
            t.emit("foo", &())?;
        }
        Ok(())
    });

    traced.emit("foo", &())?;
    println!("after first emit: count={}", count.load(Ordering::SeqCst));

    traced.emit("foo", &())?;
    println!("after second emit: count={}", count.load(Ordering::SeqCst));

    // The listener holds a clone of the emitter; break the cycle.
    em.clear();
    Ok(())
}
