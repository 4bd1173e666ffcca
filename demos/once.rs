//! # Example: once
//!
//! One-shot listeners: each fires on the first emit after it was registered,
//! and is already gone from the registry while it runs.
//!
//! ## Run
//! ```bash
//! cargo run --example once
//! ```

use std::sync::{Arc, Mutex};

use reemit::{EmitError, Emitter};

#[derive(Debug)]
struct Login {
    user: String,
    attempt: u32,
}

fn main() -> Result<(), EmitError> {
    let em: Emitter<Login> = Emitter::new();
    let log = Arc::new(Mutex::new(Vec::<String>::new()));

    let l = log.clone();
    em.on("login", move |ev| {
        l.lock().unwrap().push(format!("audit {} #{}", ev.user, ev.attempt));
        Ok(())
    });

    let (l, weak) = (log.clone(), em.downgrade());
    em.once("login", move |ev| {
        // Already detached: only the audit listener is left.
        let left = weak.upgrade().map_or(0, |em| em.listener_count("login"));
        l.lock()
            .unwrap()
            .push(format!("welcome {} ({left} listener left)", ev.user));
        Ok(())
    });

    for attempt in 1..=3 {
        em.emit(
            "login",
            &Login {
                user: "ada".to_string(),
                attempt,
            },
        )?;
    }

    for line in log.lock().unwrap().iter() {
        println!("{line}");
    }
    println!("listeners on login: {}", em.listener_count("login"));
    Ok(())
}
